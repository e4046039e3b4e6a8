//! Sweep results.

use crate::swarm::{PsoResult, TerminationReason};

/// Summary of the swarm run at one β.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BetaRun {
    /// Decay exponent
    pub beta: f64,
    /// Best score the swarm reached
    pub score: f64,
    /// Best mass vector, in node index order
    pub masses: Vec<f64>,
    /// Iterations the swarm ran
    pub iterations: usize,
    /// Why the swarm stopped
    pub termination: TerminationReason,
}

impl From<PsoResult> for BetaRun {
    fn from(result: PsoResult) -> Self {
        Self {
            beta: result.beta,
            score: result.best_score,
            masses: result.best_masses,
            iterations: result.iterations,
            termination: result.termination,
        }
    }
}

/// Outcome of a full calibration sweep.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalibrationResult {
    /// β of the best-scoring run (the first one on ties)
    pub best_beta: f64,
    /// Score of the best run
    pub best_score: f64,
    /// Masses of the best run
    pub best_masses: Vec<f64>,
    /// Node ids in mass vector order
    pub node_ids: Vec<String>,
    /// One entry per β, in grid order
    pub runs: Vec<BetaRun>,
}

impl CalibrationResult {
    /// Assemble a result, picking the run with the strictly highest score.
    ///
    /// Returns `None` if `runs` is empty.
    pub(crate) fn from_runs(node_ids: Vec<String>, runs: Vec<BetaRun>) -> Option<Self> {
        let best = runs
            .iter()
            .skip(1)
            .fold(runs.first()?, |best, run| if run.score > best.score { run } else { best });
        Some(Self {
            best_beta: best.beta,
            best_score: best.score,
            best_masses: best.masses.clone(),
            node_ids,
            runs,
        })
    }

    /// `(β, score)` per run, in grid order.
    pub fn per_beta_scores(&self) -> Vec<(f64, f64)> {
        self.runs.iter().map(|r| (r.beta, r.score)).collect()
    }

    /// `(β, masses)` per run, in grid order.
    pub fn per_beta_masses(&self) -> Vec<(f64, &[f64])> {
        self.runs.iter().map(|r| (r.beta, r.masses.as_slice())).collect()
    }

    /// Best masses keyed by node id, in node index order.
    pub fn node_masses(&self) -> Vec<(&str, f64)> {
        self.node_ids
            .iter()
            .map(String::as_str)
            .zip(self.best_masses.iter().copied())
            .collect()
    }

    /// The run that produced the best score.
    pub fn best_run(&self) -> Option<&BetaRun> {
        self.runs.iter().find(|r| r.beta == self.best_beta)
    }

    /// The run for a given β, matched to within `1e-9`.
    pub fn run_for(&self, beta: f64) -> Option<&BetaRun> {
        self.runs.iter().find(|r| (r.beta - beta).abs() < 1e-9)
    }
}
