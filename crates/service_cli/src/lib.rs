//! # service_cli
//!
//! Library side of the `gravityfit` binary: configuration, file formats and
//! command implementations, kept out of `main.rs` so they can be tested.
//!
//! # Architecture
//!
//! As part of the **S**ervice layer, this crate is the only place that
//! touches files. It reads points and flows, hands them to `gravity_core`
//! and `gravity_optimiser`, and writes the result tables back out.

pub mod commands;
pub mod config;
pub mod io;

mod error;

pub use error::{CliError, Result};
