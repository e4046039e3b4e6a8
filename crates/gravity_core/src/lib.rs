//! # gravity_core: Foundation for Gravity-Model Calibration
//!
//! ## Layer 1 (Foundation) Role
//!
//! gravity_core is the bottom layer of the workspace, providing:
//! - Great-circle distances (`math::geo`)
//! - Pearson goodness of fit (`math::correlation`)
//! - Flow network data model and matrix construction (`network`)
//! - The gravity interaction law (`model`)
//! - Structured error types (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other workspace crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - thiserror: Error derivation
//! - tracing: Diagnostics for soft data issues
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use gravity_core::network::{FlowRecord, InteractionMatrixBuilder, Point};
//! use gravity_core::model::GravityModel;
//! use gravity_core::math::correlation::goodness_of_fit;
//!
//! let points = vec![
//!     Point::new("A", 0.0, 0.0),
//!     Point::new("B", 1.0, 0.0),
//!     Point::new("C", 0.0, 1.0),
//! ];
//! let flows = vec![
//!     FlowRecord::new("A", "B", 120.0),
//!     FlowRecord::new("B", "C", 80.0),
//!     FlowRecord::new("A", "C", 40.0),
//! ];
//!
//! let matrix = InteractionMatrixBuilder::new(&points).build(&flows).unwrap();
//! assert_eq!(matrix.node_count(), 3);
//! assert_eq!(matrix.valid_pair_count(), 3);
//!
//! let model = GravityModel::new(1.0);
//! let predicted = model.predict_flows(&[10.0, 12.0, 4.0], &matrix).unwrap();
//! let score = goodness_of_fit(&predicted, matrix.observed_flows());
//! assert!(score > -1.0 - 1e-12 && score < 1.0 + 1e-12);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for points, flow records and pair matrices

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod model;
pub mod network;
pub mod types;
