//! Spatial flow network data model.
//!
//! This module turns raw point and flow records into the structures the
//! gravity model and the optimiser work on:
//!
//! - [`Point`], [`FlowRecord`]: Input records
//! - [`NodeIndex`]: Bidirectional id ↔ position mapping in first-seen order
//! - [`NodePair`], [`PairMatrix`]: Unordered-pair storage
//! - [`InteractionMatrix`]: Observed flows and distances kept side by side
//! - [`InteractionMatrixBuilder`]: Validating construction from records
//!
//! Observed flows, distances and predictions live in separate pair matrices,
//! so computing predictions never destroys the geometry they were derived from.

mod builder;
mod index;
mod matrix;
mod point;

pub use builder::{DuplicateFlowPolicy, InteractionMatrixBuilder};
pub use index::NodeIndex;
pub use matrix::{InteractionMatrix, NodePair, PairMatrix};
pub use point::{FlowRecord, Point};
