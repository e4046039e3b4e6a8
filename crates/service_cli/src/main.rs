//! gravityfit - Command Line Gravity-Model Calibration
//!
//! # Commands
//!
//! - `gravityfit calibrate --points <file> --flows <file>` - Fit node masses and β
//! - `gravityfit check --points <file> --flows <file>` - Validate inputs only
//!
//! # Logging
//!
//! Progress goes to stderr through `tracing`. The default filter is
//! `gravityfit=info`; `--verbose` raises it to debug and `RUST_LOG`
//! overrides both.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use service_cli::commands::calibrate::CalibrateOptions;
use service_cli::commands::{calibrate, check};
use service_cli::config::{GravityfitConfig, OutputFormat};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Gravity-model calibration CLI
#[derive(Parser)]
#[command(name = "gravityfit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (defaults to ./gravityfit.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calibrate node masses and distance decay from observed flows
    Calibrate {
        /// Tab-delimited point file: id, longitude, latitude
        #[arg(short, long)]
        points: PathBuf,

        /// Tab-delimited flow file: origin, destination, value
        #[arg(short, long)]
        flows: PathBuf,

        /// Output directory for result files
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// RNG seed for reproducible runs
        #[arg(short, long)]
        seed: Option<u64>,

        /// Number of particles per swarm
        #[arg(long)]
        particles: Option<usize>,
    },

    /// Load inputs and build the interaction matrix without calibrating
    Check {
        /// Tab-delimited point file
        #[arg(short, long)]
        points: PathBuf,

        /// Tab-delimited flow file
        #[arg(short, long)]
        flows: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "gravityfit=debug,service_cli=debug,gravity_optimiser=debug,gravity_core=debug"
    } else {
        "gravityfit=info,service_cli=info,gravity_optimiser=info,gravity_core=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let config = GravityfitConfig::resolve(cli.config.as_deref())
        .context("Failed to load configuration")?
        .with_env_override();
    debug!(?config, "Configuration resolved");

    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Commands::Calibrate {
            points,
            flows,
            output_dir,
            format,
            seed,
            particles,
        } => {
            let options = CalibrateOptions {
                points,
                flows,
                output_dir,
                format,
                seed,
                particles,
            };
            calibrate::run(&options, config, &mut stdout).context("Calibration failed")?;
        }
        Commands::Check { points, flows } => {
            check::run(&points, &flows, config.sweep.duplicate_policy, &mut stdout)
                .context("Input check failed")?;
        }
    }
    Ok(())
}
