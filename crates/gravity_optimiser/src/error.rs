//! Optimiser error types.
//!
//! - `ConfigError`: Invalid hyperparameters, raised before any optimisation work
//! - `OptimiserError`: Top-level error for swarm runs and sweeps

use gravity_core::types::NetworkError;
use thiserror::Error;

/// Invalid optimiser configuration.
///
/// # Examples
///
/// ```
/// use gravity_optimiser::ConfigError;
///
/// let err = ConfigError::non_positive_search_range(-1.0);
/// assert!(format!("{}", err).contains("-1"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The swarm has no particles.
    #[error("Particle count must be greater than zero")]
    ZeroParticleCount,

    /// The iteration budget is zero.
    #[error("Maximum iterations must be greater than zero")]
    ZeroIterations,

    /// The search range is not a positive finite number.
    #[error("Search range must be positive and finite, got {value}")]
    NonPositiveSearchRange {
        /// The rejected range
        value: f64,
    },

    /// The β grid bounds or step are invalid.
    #[error("Invalid beta range: min = {min}, max = {max}, step = {step}")]
    InvalidBetaRange {
        /// Lower bound
        min: f64,
        /// Upper bound
        max: f64,
        /// Step
        step: f64,
    },

    /// The β grid contains no values.
    #[error("Beta grid is empty")]
    EmptyBetaGrid,

    /// A single β value is not positive and finite.
    #[error("Invalid beta {value}: must be positive and finite")]
    InvalidBeta {
        /// The rejected value
        value: f64,
    },

    /// A coefficient or threshold is NaN or infinite.
    #[error("Parameter '{name}' must be finite, got {value}")]
    NonFiniteParameter {
        /// Parameter name
        name: &'static str,
        /// The rejected value
        value: f64,
    },

    /// The initial jitter fraction is negative, not finite, or scales the
    /// search range past the representable float range.
    #[error("Jitter fraction must be finite, non-negative and keep the jitter span finite, got {value}")]
    InvalidJitter {
        /// The rejected value
        value: f64,
    },
}

impl ConfigError {
    /// Create a non-positive search range error.
    pub fn non_positive_search_range(value: f64) -> Self {
        Self::NonPositiveSearchRange { value }
    }

    /// Create an invalid β range error.
    pub fn invalid_beta_range(min: f64, max: f64, step: f64) -> Self {
        Self::InvalidBetaRange { min, max, step }
    }

    /// Create an invalid β error.
    pub fn invalid_beta(value: f64) -> Self {
        Self::InvalidBeta { value }
    }

    /// Create a non-finite parameter error.
    pub fn non_finite(name: &'static str, value: f64) -> Self {
        Self::NonFiniteParameter { name, value }
    }
}

/// Errors returned by swarm runs and calibration sweeps.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptimiserError {
    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Structural problem with the network or a mass vector.
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    /// The sweep was cancelled through its token.
    #[error("Calibration cancelled after {completed} completed beta runs")]
    Cancelled {
        /// Number of β runs finished before cancellation
        completed: usize,
    },
}

impl OptimiserError {
    /// Check if this is a configuration error.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Check if this is a network error.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    /// Check if the run was cancelled.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}
