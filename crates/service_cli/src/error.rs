//! CLI error types.

use std::path::PathBuf;

use gravity_core::types::NetworkError;
use gravity_optimiser::OptimiserError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by `gravityfit` commands.
#[derive(Error, Debug)]
pub enum CliError {
    /// An input or config file does not exist.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// A command-line argument is unusable.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A delimited input file could not be read or parsed.
    #[error("Failed to read {path}: {source}")]
    Input {
        /// File being read
        path: PathBuf,
        /// Underlying reader error
        #[source]
        source: csv::Error,
    },

    /// A result file could not be written.
    #[error("Failed to write {path}: {message}")]
    Output {
        /// File being written
        path: PathBuf,
        /// What went wrong
        message: String,
    },

    /// The configuration file or overrides are invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The points and flows do not form a usable network.
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    /// Calibration failed.
    #[error("Calibration error: {0}")]
    Optimiser(#[from] OptimiserError),

    /// Filesystem error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Create an input error for `path`.
    pub fn input(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Input {
            path: path.into(),
            source,
        }
    }

    /// Create an output error for `path`.
    pub fn output(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Output {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

/// Result type for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
