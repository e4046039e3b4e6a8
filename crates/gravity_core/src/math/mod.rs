//! Numerical building blocks.
//!
//! - [`geo`]: Great-circle distance on a spherical Earth
//! - [`correlation`]: Pearson correlation used as the calibration objective

pub mod correlation;
pub mod geo;
