//! Calibration across a grid of decay exponents.
//!
//! For every β the sweep runs one particle swarm from the degree seed and
//! records the best score and masses. The overall winner is the run with
//! the highest score; on ties the earliest β in grid order is kept.

mod config;
mod engine;
mod grid;
mod result;
mod seed;

pub use config::{SweepConfig, SweepConfigBuilder};
pub use engine::CalibrationSweep;
pub use grid::{BetaGrid, MAX_GRID_POINTS};
pub use result::{BetaRun, CalibrationResult};
pub use seed::seed_masses;
