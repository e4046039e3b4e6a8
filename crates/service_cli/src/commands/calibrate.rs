//! Calibrate command implementation
//!
//! Reads points and flows, runs the β sweep and writes the result tables.

use std::io::Write;
use std::path::PathBuf;

use gravity_core::network::InteractionMatrixBuilder;
use gravity_optimiser::sweep::{CalibrationResult, CalibrationSweep};
use tracing::info;

use crate::config::{GravityfitConfig, OutputFormat};
use crate::io;
use crate::Result;

/// Arguments of `gravityfit calibrate`.
#[derive(Debug, Clone, Default)]
pub struct CalibrateOptions {
    /// Tab-delimited point file
    pub points: PathBuf,
    /// Tab-delimited flow file
    pub flows: PathBuf,
    /// Overrides `[output] dir`
    pub output_dir: Option<PathBuf>,
    /// Overrides `[output] format`
    pub format: Option<OutputFormat>,
    /// Overrides `[pso] seed`
    pub seed: Option<u64>,
    /// Overrides `[pso] particle_count`
    pub particles: Option<usize>,
}

impl CalibrateOptions {
    /// Fold command-line overrides into `config`.
    pub fn apply(&self, mut config: GravityfitConfig) -> GravityfitConfig {
        if let Some(dir) = &self.output_dir {
            config.output.dir = dir.clone();
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }
        if let Some(seed) = self.seed {
            config.pso.seed = Some(seed);
        }
        if let Some(particles) = self.particles {
            config.pso.particle_count = particles;
        }
        config
    }
}

/// Run the calibrate command, printing the summary to `out`.
pub fn run<W: Write>(
    options: &CalibrateOptions,
    config: GravityfitConfig,
    out: &mut W,
) -> Result<CalibrationResult> {
    let config = options.apply(config);
    config.validate()?;

    info!("Starting calibration...");
    info!("  Points: {}", options.points.display());
    info!("  Flows: {}", options.flows.display());

    let points = io::read_points(&options.points)?;
    let flows = io::read_flows(&options.flows)?;
    let matrix = InteractionMatrixBuilder::new(&points)
        .duplicate_policy(config.sweep.duplicate_policy)
        .build(&flows)?;

    let result = CalibrationSweep::new(config.sweep_config()).run(&matrix)?;

    let dir = &config.output.dir;
    match config.output.format {
        OutputFormat::Csv => {
            io::write_csv(&result, dir)?;
        }
        OutputFormat::Json => {
            io::write_json(&result, dir)?;
        }
    }
    io::write_summary(&result, out)?;

    info!("Calibration complete");
    Ok(result)
}
