//! # gravity_optimiser
//!
//! Calibration of gravity-model node masses and distance decay for spatial
//! flow networks.
//!
//! This crate sits on top of `gravity_core` (L1) and solves the inverse
//! problem: given observed flows, find the per-node masses and the decay
//! exponent β whose gravity predictions correlate best with the observations.
//!
//! ## Modules
//!
//! - `swarm`: Particle Swarm Optimisation over the mass space for a fixed β
//! - `sweep`: Repeated swarm runs across a β grid with best-fit selection
//!
//! ## Example
//!
//! ```rust
//! use gravity_core::network::{FlowRecord, InteractionMatrixBuilder, Point};
//! use gravity_optimiser::prelude::*;
//!
//! let points = vec![
//!     Point::new("A", 0.0, 0.0),
//!     Point::new("B", 1.0, 0.0),
//!     Point::new("C", 0.0, 1.0),
//! ];
//! let flows = vec![
//!     FlowRecord::new("A", "B", 300.0),
//!     FlowRecord::new("B", "C", 90.0),
//!     FlowRecord::new("A", "C", 150.0),
//! ];
//! let matrix = InteractionMatrixBuilder::new(&points).build(&flows).unwrap();
//!
//! let config = SweepConfig::builder()
//!     .pso(PsoConfig::fast().with_seed(7))
//!     .betas(BetaGrid::Values(vec![0.5, 1.0]))
//!     .build();
//! let result = CalibrationSweep::new(config).run(&matrix).unwrap();
//!
//! assert_eq!(result.runs.len(), 2);
//! assert_eq!(result.best_masses.len(), 3);
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel` (default): Score particles (and optionally β values) on the rayon pool
//! - `serde`: Serialisation of results

pub mod swarm;
pub mod sweep;

mod error;

pub use error::{ConfigError, OptimiserError};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::swarm::*;
    pub use crate::sweep::*;
    pub use crate::{ConfigError, OptimiserError};
}
