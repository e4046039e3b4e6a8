//! Shared types for the gravity calibration workspace.
//!
//! This module provides:
//! - Error types: `NetworkError`, `FitError` (`error`)

pub mod error;

pub use error::{FitError, NetworkError};
