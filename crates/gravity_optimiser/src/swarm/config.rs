//! Particle swarm configuration.

use std::time::Duration;

use crate::error::ConfigError;

/// Hyperparameters of one particle swarm run.
///
/// # Examples
///
/// ```
/// use gravity_optimiser::swarm::PsoConfig;
///
/// let config = PsoConfig::default();
/// assert_eq!(config.particle_count, 1000);
/// assert_eq!(config.search_range, 1000.0);
///
/// let config = PsoConfig::builder()
///     .particle_count(50)
///     .max_iterations(100)
///     .seed(42)
///     .build();
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PsoConfig {
    /// Number of particles in the swarm.
    ///
    /// Default: 1000
    pub particle_count: usize,

    /// Upper bound of every mass coordinate; the search box is `[0, search_range]ᴺ`.
    ///
    /// Default: 1000.0
    pub search_range: f64,

    /// Inertia weight `w` applied to the previous velocity.
    ///
    /// Default: 1.0
    pub inertia_weight: f64,

    /// Cognitive coefficient `c1` (pull towards the personal best).
    ///
    /// Default: 2.0
    pub cognitive_coeff: f64,

    /// Social coefficient `c2` (pull towards the global best).
    ///
    /// Default: 2.0
    pub social_coeff: f64,

    /// Iteration budget.
    ///
    /// Default: 1000
    pub max_iterations: usize,

    /// The run converges once the largest velocity component falls below this.
    ///
    /// Default: 5.0
    pub convergence_velocity_threshold: f64,

    /// The run converges once the global best score exceeds this.
    ///
    /// Default: 0.98
    pub convergence_score_threshold: f64,

    /// Half-width of the initial jitter around the seed, as a fraction of
    /// the search range.
    ///
    /// Default: 0.1
    pub jitter_fraction: f64,

    /// RNG seed. `None` draws a seed from the OS.
    ///
    /// Default: None
    pub seed: Option<u64>,

    /// Wall-clock budget for one run.
    ///
    /// Default: None
    pub time_limit: Option<Duration>,

    /// Score particles on the rayon pool when the `parallel` feature is on.
    ///
    /// Default: true
    pub parallel: bool,
}

impl Default for PsoConfig {
    fn default() -> Self {
        Self {
            particle_count: 1000,
            search_range: 1000.0,
            inertia_weight: 1.0,
            cognitive_coeff: 2.0,
            social_coeff: 2.0,
            max_iterations: 1000,
            convergence_velocity_threshold: 5.0,
            convergence_score_threshold: 0.98,
            jitter_fraction: 0.1,
            seed: None,
            time_limit: None,
            parallel: true,
        }
    }
}

impl PsoConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration builder for fluent construction.
    pub fn builder() -> PsoConfigBuilder {
        PsoConfigBuilder::new()
    }

    /// Small swarm for interactive use and tests.
    ///
    /// 100 particles, 200 iterations.
    pub fn fast() -> Self {
        Self {
            particle_count: 100,
            max_iterations: 200,
            ..Self::default()
        }
    }

    /// Constricted swarm (Clerc coefficients) with a tight score target.
    ///
    /// `w = 0.729`, `c1 = c2 = 1.49445`, 500 iterations, stops above 0.999.
    pub fn high_precision() -> Self {
        Self {
            inertia_weight: 0.729,
            cognitive_coeff: 1.49445,
            social_coeff: 1.49445,
            max_iterations: 500,
            convergence_score_threshold: 0.999,
            convergence_velocity_threshold: 1e-3,
            ..Self::default()
        }
    }

    /// Set the particle count.
    pub fn with_particle_count(mut self, particle_count: usize) -> Self {
        self.particle_count = particle_count;
        self
    }

    /// Set the search range.
    pub fn with_search_range(mut self, search_range: f64) -> Self {
        self.search_range = search_range;
        self
    }

    /// Set inertia, cognitive and social coefficients at once.
    pub fn with_coefficients(mut self, inertia: f64, cognitive: f64, social: f64) -> Self {
        self.inertia_weight = inertia;
        self.cognitive_coeff = cognitive;
        self.social_coeff = social;
        self
    }

    /// Set the iteration budget.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the velocity and score convergence thresholds.
    pub fn with_convergence(mut self, velocity: f64, score: f64) -> Self {
        self.convergence_velocity_threshold = velocity;
        self.convergence_score_threshold = score;
        self
    }

    /// Set the initial jitter fraction.
    pub fn with_jitter_fraction(mut self, jitter_fraction: f64) -> Self {
        self.jitter_fraction = jitter_fraction;
        self
    }

    /// Fix the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set a wall-clock budget.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Enable or disable parallel scoring.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Check that every parameter is usable.
    ///
    /// # Errors
    ///
    /// The first offending parameter as a [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.particle_count == 0 {
            return Err(ConfigError::ZeroParticleCount);
        }
        if self.max_iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        if !(self.search_range.is_finite() && self.search_range > 0.0) {
            return Err(ConfigError::non_positive_search_range(self.search_range));
        }
        let finite = [
            ("inertia_weight", self.inertia_weight),
            ("cognitive_coeff", self.cognitive_coeff),
            ("social_coeff", self.social_coeff),
            (
                "convergence_velocity_threshold",
                self.convergence_velocity_threshold,
            ),
            ("convergence_score_threshold", self.convergence_score_threshold),
        ];
        if let Some(&(name, value)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::non_finite(name, value));
        }
        // The sampler spans [-spread, spread], so twice the spread must stay finite
        let span = 2.0 * self.jitter_fraction * self.search_range;
        let fraction_ok = self.jitter_fraction.is_finite() && self.jitter_fraction >= 0.0;
        if !(fraction_ok && span.is_finite()) {
            return Err(ConfigError::InvalidJitter {
                value: self.jitter_fraction,
            });
        }
        Ok(())
    }
}

/// Builder for [`PsoConfig`].
#[derive(Debug, Clone, Default)]
pub struct PsoConfigBuilder {
    config: PsoConfig,
}

impl PsoConfigBuilder {
    /// Create a new builder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the particle count.
    pub fn particle_count(mut self, particle_count: usize) -> Self {
        self.config.particle_count = particle_count;
        self
    }

    /// Set the search range.
    pub fn search_range(mut self, search_range: f64) -> Self {
        self.config.search_range = search_range;
        self
    }

    /// Set the inertia weight.
    pub fn inertia_weight(mut self, w: f64) -> Self {
        self.config.inertia_weight = w;
        self
    }

    /// Set the cognitive coefficient.
    pub fn cognitive_coeff(mut self, c1: f64) -> Self {
        self.config.cognitive_coeff = c1;
        self
    }

    /// Set the social coefficient.
    pub fn social_coeff(mut self, c2: f64) -> Self {
        self.config.social_coeff = c2;
        self
    }

    /// Set the iteration budget.
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.config.max_iterations = max_iterations;
        self
    }

    /// Set the velocity convergence threshold.
    pub fn convergence_velocity_threshold(mut self, threshold: f64) -> Self {
        self.config.convergence_velocity_threshold = threshold;
        self
    }

    /// Set the score convergence threshold.
    pub fn convergence_score_threshold(mut self, threshold: f64) -> Self {
        self.config.convergence_score_threshold = threshold;
        self
    }

    /// Set the initial jitter fraction.
    pub fn jitter_fraction(mut self, jitter_fraction: f64) -> Self {
        self.config.jitter_fraction = jitter_fraction;
        self
    }

    /// Fix the RNG seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Set a wall-clock budget.
    pub fn time_limit(mut self, limit: Duration) -> Self {
        self.config.time_limit = Some(limit);
        self
    }

    /// Enable or disable parallel scoring.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.config.parallel = parallel;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> PsoConfig {
        self.config
    }
}
