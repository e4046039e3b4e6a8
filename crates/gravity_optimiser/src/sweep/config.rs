//! Calibration sweep configuration.

use super::grid::BetaGrid;
use crate::error::ConfigError;
use crate::swarm::PsoConfig;

/// Configuration of a full β sweep.
///
/// # Examples
///
/// ```
/// use gravity_optimiser::swarm::PsoConfig;
/// use gravity_optimiser::sweep::{BetaGrid, SweepConfig};
///
/// let config = SweepConfig::builder()
///     .pso(PsoConfig::fast())
///     .betas(BetaGrid::range(0.5, 1.5, 0.5))
///     .parallel_betas(true)
///     .build();
/// assert_eq!(config.betas.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SweepConfig {
    /// Swarm settings shared by every β run.
    ///
    /// `search_range` also sets the scale of the degree seed.
    pub pso: PsoConfig,

    /// Decay exponents to visit.
    ///
    /// Default: 0.1 to 2.9 in steps of 0.1
    pub betas: BetaGrid,

    /// Run β values concurrently when the `parallel` feature is on.
    ///
    /// Default: false
    pub parallel_betas: bool,
}

impl SweepConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration builder for fluent construction.
    pub fn builder() -> SweepConfigBuilder {
        SweepConfigBuilder::default()
    }

    /// Set the swarm settings.
    pub fn with_pso(mut self, pso: PsoConfig) -> Self {
        self.pso = pso;
        self
    }

    /// Set the β grid.
    pub fn with_betas(mut self, betas: BetaGrid) -> Self {
        self.betas = betas;
        self
    }

    /// Check the swarm settings and the β grid.
    ///
    /// # Errors
    ///
    /// The first offending parameter as a [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.pso.validate()?;
        self.betas.validate()
    }
}

/// Builder for [`SweepConfig`].
#[derive(Debug, Clone, Default)]
pub struct SweepConfigBuilder {
    config: SweepConfig,
}

impl SweepConfigBuilder {
    /// Set the swarm settings.
    pub fn pso(mut self, pso: PsoConfig) -> Self {
        self.config.pso = pso;
        self
    }

    /// Set the β grid.
    pub fn betas(mut self, betas: BetaGrid) -> Self {
        self.config.betas = betas;
        self
    }

    /// Run β values concurrently.
    pub fn parallel_betas(mut self, parallel: bool) -> Self {
        self.config.parallel_betas = parallel;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> SweepConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sweep() {
        let config = SweepConfig::default();
        assert_eq!(config.pso, PsoConfig::default());
        assert_eq!(config.betas, BetaGrid::default());
        assert!(!config.parallel_betas);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_checks_pso_first() {
        let config = SweepConfig::new()
            .with_pso(PsoConfig::default().with_max_iterations(0))
            .with_betas(BetaGrid::Values(vec![]));
        assert_eq!(config.validate(), Err(ConfigError::ZeroIterations));
    }

    #[test]
    fn test_validate_checks_grid() {
        let config = SweepConfig::new().with_betas(BetaGrid::range(1.0, 0.5, 0.1));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidBetaRange { .. })
        ));
    }
}
