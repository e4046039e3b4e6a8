//! `gravityfit.toml` configuration.
//!
//! Settings are layered: built-in defaults, then the TOML file, then
//! `GRAVITYFIT_*` environment variables, then command-line flags.
//!
//! ```toml
//! [pso]
//! particle_count = 1000
//! max_iterations = 1000
//! seed = 42
//!
//! [sweep]
//! beta_min = 0.1
//! beta_max = 2.9
//! beta_step = 0.1
//! duplicate_policy = "replace"
//!
//! [output]
//! dir = "results"
//! format = "csv"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::ValueEnum;
use gravity_core::network::DuplicateFlowPolicy;
use gravity_optimiser::swarm::PsoConfig;
use gravity_optimiser::sweep::{BetaGrid, SweepConfig};
use serde::Deserialize;
use thiserror::Error;

/// Result file format.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `node_masses.csv` and `beta_scores.csv`
    #[default]
    Csv,
    /// `calibration.json`
    Json,
}

impl OutputFormat {
    fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// `[pso]` section.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct PsoSection {
    /// Number of particles
    pub particle_count: usize,
    /// Upper bound of every mass
    pub search_range: f64,
    /// Inertia weight
    pub inertia_weight: f64,
    /// Cognitive coefficient
    pub cognitive_coeff: f64,
    /// Social coefficient
    pub social_coeff: f64,
    /// Iteration budget per β
    pub max_iterations: usize,
    /// Velocity convergence threshold
    pub convergence_velocity_threshold: f64,
    /// Score convergence threshold
    pub convergence_score_threshold: f64,
    /// Initial jitter as a fraction of the search range
    pub jitter_fraction: f64,
    /// RNG seed for reproducible runs
    pub seed: Option<u64>,
    /// Wall-clock budget per β, in seconds
    pub time_limit_secs: Option<f64>,
    /// Score particles in parallel
    pub parallel: bool,
}

impl Default for PsoSection {
    fn default() -> Self {
        let pso = PsoConfig::default();
        Self {
            particle_count: pso.particle_count,
            search_range: pso.search_range,
            inertia_weight: pso.inertia_weight,
            cognitive_coeff: pso.cognitive_coeff,
            social_coeff: pso.social_coeff,
            max_iterations: pso.max_iterations,
            convergence_velocity_threshold: pso.convergence_velocity_threshold,
            convergence_score_threshold: pso.convergence_score_threshold,
            jitter_fraction: pso.jitter_fraction,
            seed: None,
            time_limit_secs: None,
            parallel: pso.parallel,
        }
    }
}

/// `[sweep]` section.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct SweepSection {
    /// First β
    pub beta_min: f64,
    /// Last β
    pub beta_max: f64,
    /// β spacing
    pub beta_step: f64,
    /// Explicit β list; overrides the range when set
    pub betas: Option<Vec<f64>>,
    /// Run β values concurrently
    pub parallel_betas: bool,
    /// How repeated flow pairs are combined
    pub duplicate_policy: DuplicateFlowPolicy,
}

impl Default for SweepSection {
    fn default() -> Self {
        Self {
            beta_min: 0.1,
            beta_max: 2.9,
            beta_step: 0.1,
            betas: None,
            parallel_betas: false,
            duplicate_policy: DuplicateFlowPolicy::default(),
        }
    }
}

/// `[output]` section.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputSection {
    /// Directory for result files
    pub dir: PathBuf,
    /// Result file format
    pub format: OutputFormat,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            format: OutputFormat::default(),
        }
    }
}

/// Full `gravityfit` configuration.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct GravityfitConfig {
    /// Swarm settings
    pub pso: PsoSection,
    /// Sweep settings
    pub sweep: SweepSection,
    /// Output settings
    pub output: OutputSection,
}

impl GravityfitConfig {
    /// Default file name looked up in the working directory.
    pub const DEFAULT_FILE: &'static str = "gravityfit.toml";

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load `path` if given, else `gravityfit.toml` if present, else defaults.
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default = Path::new(Self::DEFAULT_FILE);
                if default.exists() {
                    Self::load(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Apply `GRAVITYFIT_*` environment variable overrides.
    pub fn with_env_override(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a key lookup. Unparsable values are ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(n) = lookup("GRAVITYFIT_PARTICLES").and_then(|v| v.parse().ok()) {
            self.pso.particle_count = n;
        }
        if let Some(n) = lookup("GRAVITYFIT_MAX_ITERATIONS").and_then(|v| v.parse().ok()) {
            self.pso.max_iterations = n;
        }
        if let Some(r) = lookup("GRAVITYFIT_SEARCH_RANGE").and_then(|v| v.parse().ok()) {
            self.pso.search_range = r;
        }
        if let Some(seed) = lookup("GRAVITYFIT_SEED").and_then(|v| v.parse().ok()) {
            self.pso.seed = Some(seed);
        }
        if let Some(parallel) = lookup("GRAVITYFIT_PARALLEL").and_then(|v| v.parse().ok()) {
            self.pso.parallel = parallel;
        }
        if let Some(dir) = lookup("GRAVITYFIT_OUTPUT_DIR") {
            self.output.dir = PathBuf::from(dir);
        }
        if let Some(format) = lookup("GRAVITYFIT_FORMAT").and_then(|v| OutputFormat::parse(&v)) {
            self.output.format = format;
        }
        self
    }

    /// Swarm configuration for the optimiser.
    pub fn pso_config(&self) -> PsoConfig {
        let p = &self.pso;
        PsoConfig {
            particle_count: p.particle_count,
            search_range: p.search_range,
            inertia_weight: p.inertia_weight,
            cognitive_coeff: p.cognitive_coeff,
            social_coeff: p.social_coeff,
            max_iterations: p.max_iterations,
            convergence_velocity_threshold: p.convergence_velocity_threshold,
            convergence_score_threshold: p.convergence_score_threshold,
            jitter_fraction: p.jitter_fraction,
            seed: p.seed,
            time_limit: p
                .time_limit_secs
                .and_then(|secs| Duration::try_from_secs_f64(secs).ok()),
            parallel: p.parallel,
        }
    }

    /// β grid for the sweep.
    pub fn beta_grid(&self) -> BetaGrid {
        match &self.sweep.betas {
            Some(values) => BetaGrid::Values(values.clone()),
            None => BetaGrid::range(
                self.sweep.beta_min,
                self.sweep.beta_max,
                self.sweep.beta_step,
            ),
        }
    }

    /// Sweep configuration for the optimiser.
    pub fn sweep_config(&self) -> SweepConfig {
        SweepConfig::builder()
            .pso(self.pso_config())
            .betas(self.beta_grid())
            .parallel_betas(self.sweep.parallel_betas)
            .build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if let Err(e) = self.pso_config().validate() {
            errors.push(e.to_string());
        }
        if let Err(e) = self.beta_grid().validate() {
            errors.push(e.to_string());
        }
        if let Some(secs) = self.pso.time_limit_secs {
            if let Err(e) = Duration::try_from_secs_f64(secs) {
                errors.push(format!("time_limit_secs = {} is not a usable duration: {}", secs, e));
            }
        }
        if self.output.dir.as_os_str().is_empty() {
            errors.push("output dir cannot be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

/// Configuration error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error: {0}")]
    Io(String),
    /// Parse error in config file
    #[error("Parse error: {0}")]
    Parse(String),
    /// Validation error
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}
