//! Result writers.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use gravity_optimiser::sweep::{BetaRun, CalibrationResult};
use serde::Serialize;
use tracing::info;

use crate::{CliError, Result};

/// Masses per node, one column per β.
pub const NODE_MASSES_FILE: &str = "node_masses.csv";
/// Score per β.
pub const BETA_SCORES_FILE: &str = "beta_scores.csv";
/// Full result as JSON.
pub const CALIBRATION_FILE: &str = "calibration.json";

fn beta_label(beta: f64) -> String {
    format!("{}", beta)
}

/// Write `node_masses.csv` and `beta_scores.csv` into `dir`.
///
/// Returns the paths written.
pub fn write_csv(result: &CalibrationResult, dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;

    let masses_path = dir.join(NODE_MASSES_FILE);
    let mut writer =
        csv::Writer::from_path(&masses_path).map_err(|e| CliError::output(&masses_path, e))?;
    let mut header = vec!["node".to_string()];
    header.extend(result.runs.iter().map(|r| beta_label(r.beta)));
    writer
        .write_record(&header)
        .map_err(|e| CliError::output(&masses_path, e))?;
    for (k, id) in result.node_ids.iter().enumerate() {
        let mut row = vec![id.clone()];
        row.extend(result.runs.iter().map(|r| r.masses[k].to_string()));
        writer
            .write_record(&row)
            .map_err(|e| CliError::output(&masses_path, e))?;
    }
    writer.flush()?;

    let scores_path = dir.join(BETA_SCORES_FILE);
    let mut writer =
        csv::Writer::from_path(&scores_path).map_err(|e| CliError::output(&scores_path, e))?;
    writer
        .write_record(["beta", "score", "iterations", "termination"])
        .map_err(|e| CliError::output(&scores_path, e))?;
    for run in &result.runs {
        writer
            .write_record([
                beta_label(run.beta),
                run.score.to_string(),
                run.iterations.to_string(),
                run.termination.to_string(),
            ])
            .map_err(|e| CliError::output(&scores_path, e))?;
    }
    writer.flush()?;

    info!(dir = %dir.display(), "CSV results written");
    Ok(vec![masses_path, scores_path])
}

#[derive(Serialize)]
struct NodeMass<'a> {
    id: &'a str,
    mass: f64,
}

#[derive(Serialize)]
struct CalibrationReport<'a> {
    generated_at: DateTime<Utc>,
    best_beta: f64,
    best_score: f64,
    nodes: Vec<NodeMass<'a>>,
    runs: &'a [BetaRun],
}

/// Write `calibration.json` into `dir` and return its path.
pub fn write_json(result: &CalibrationResult, dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(CALIBRATION_FILE);

    let report = CalibrationReport {
        generated_at: Utc::now(),
        best_beta: result.best_beta,
        best_score: result.best_score,
        nodes: result
            .node_masses()
            .into_iter()
            .map(|(id, mass)| NodeMass { id, mass })
            .collect(),
        runs: &result.runs,
    };
    let file = std::fs::File::create(&path)?;
    let mut writer = std::io::BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &report).map_err(|e| CliError::output(&path, e))?;
    writer.flush().map_err(|e| CliError::output(&path, e))?;

    info!(path = %path.display(), "JSON result written");
    Ok(path)
}

/// Print the best β followed by one `id   mass` line per node.
pub fn write_summary<W: Write>(result: &CalibrationResult, out: &mut W) -> Result<()> {
    writeln!(out, "beta   {}", beta_label(result.best_beta))?;
    for (id, mass) in result.node_masses() {
        writeln!(out, "{}   {:.6}", id, mass)?;
    }
    Ok(())
}
