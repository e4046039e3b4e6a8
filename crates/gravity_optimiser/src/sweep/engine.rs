//! The β sweep driver.

use std::time::Instant;

use gravity_core::network::InteractionMatrix;
use tracing::{debug, info};

use super::config::SweepConfig;
use super::result::{BetaRun, CalibrationResult};
use super::seed::seed_masses;
use crate::error::{ConfigError, OptimiserError};
use crate::swarm::{CancellationToken, ParticleSwarmOptimizer, PsoConfig};

/// Odd constant spreading per-β seeds apart.
const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Calibrates a gravity model by running one swarm per β and keeping the
/// best fit.
///
/// Every run starts from the same degree seed. When the swarm config fixes
/// a seed, run `k` uses `seed + k·SEED_STRIDE` (wrapping), so results do
/// not depend on whether β values run concurrently.
#[derive(Debug, Clone, Default)]
pub struct CalibrationSweep {
    config: SweepConfig,
}

impl CalibrationSweep {
    /// Create a sweep with the given configuration.
    pub fn new(config: SweepConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    /// Run the full sweep.
    ///
    /// # Errors
    ///
    /// - `OptimiserError::Config` if the configuration is invalid
    /// - `OptimiserError::Network` if the network cannot be seeded
    pub fn run(&self, matrix: &InteractionMatrix) -> Result<CalibrationResult, OptimiserError> {
        self.run_with_cancel(matrix, &CancellationToken::new())
    }

    /// Run the full sweep, stopping once `token` is cancelled.
    ///
    /// The token is checked before each β and passed into the running
    /// swarm.
    ///
    /// # Errors
    ///
    /// As [`run`](Self::run), plus `OptimiserError::Cancelled` carrying the
    /// number of β runs that finished.
    pub fn run_with_cancel(
        &self,
        matrix: &InteractionMatrix,
        token: &CancellationToken,
    ) -> Result<CalibrationResult, OptimiserError> {
        self.config.validate()?;
        let betas = self.config.betas.values();
        if betas.is_empty() {
            return Err(ConfigError::EmptyBetaGrid.into());
        }
        let seed = seed_masses(matrix, self.config.pso.search_range)?;

        let started = Instant::now();
        info!(
            nodes = matrix.node_count(),
            pairs = matrix.valid_pair_count(),
            betas = betas.len(),
            particles = self.config.pso.particle_count,
            "Starting calibration sweep"
        );

        let runs = self.run_betas(matrix, &betas, &seed, token)?;
        let result = CalibrationResult::from_runs(matrix.node_ids().to_vec(), runs)
            .ok_or(ConfigError::EmptyBetaGrid)?;

        info!(
            best_beta = result.best_beta,
            best_score = result.best_score,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Calibration complete"
        );
        Ok(result)
    }

    #[cfg(feature = "parallel")]
    fn run_betas(
        &self,
        matrix: &InteractionMatrix,
        betas: &[f64],
        seed: &[f64],
        token: &CancellationToken,
    ) -> Result<Vec<BetaRun>, OptimiserError> {
        use rayon::prelude::*;

        if !self.config.parallel_betas {
            return self.run_betas_sequential(matrix, betas, seed, token);
        }
        let outcomes: Vec<Option<BetaRun>> = betas
            .par_iter()
            .enumerate()
            .map(|(k, &beta)| self.run_one(matrix, k, beta, seed, token))
            .collect::<Result<Vec<_>, OptimiserError>>()?;
        let completed = outcomes.iter().filter(|o| o.is_some()).count();
        if completed < betas.len() {
            return Err(OptimiserError::Cancelled { completed });
        }
        Ok(outcomes.into_iter().flatten().collect())
    }

    #[cfg(not(feature = "parallel"))]
    fn run_betas(
        &self,
        matrix: &InteractionMatrix,
        betas: &[f64],
        seed: &[f64],
        token: &CancellationToken,
    ) -> Result<Vec<BetaRun>, OptimiserError> {
        self.run_betas_sequential(matrix, betas, seed, token)
    }

    fn run_betas_sequential(
        &self,
        matrix: &InteractionMatrix,
        betas: &[f64],
        seed: &[f64],
        token: &CancellationToken,
    ) -> Result<Vec<BetaRun>, OptimiserError> {
        let mut runs = Vec::with_capacity(betas.len());
        for (k, &beta) in betas.iter().enumerate() {
            match self.run_one(matrix, k, beta, seed, token)? {
                Some(run) => runs.push(run),
                None => return Err(OptimiserError::Cancelled { completed: runs.len() }),
            }
        }
        Ok(runs)
    }

    /// One swarm run. `None` when the token was already cancelled or fired
    /// mid-run.
    fn run_one(
        &self,
        matrix: &InteractionMatrix,
        index: usize,
        beta: f64,
        seed: &[f64],
        token: &CancellationToken,
    ) -> Result<Option<BetaRun>, OptimiserError> {
        if token.is_cancelled() {
            debug!(beta, "Skipping beta, sweep cancelled");
            return Ok(None);
        }
        let pso = ParticleSwarmOptimizer::new(self.pso_config_for(index));
        let result = pso.optimise_with_cancel(matrix, beta, seed, token)?;
        if token.is_cancelled() {
            return Ok(None);
        }
        info!(
            beta,
            score = result.best_score,
            iterations = result.iterations,
            termination = %result.termination,
            "Beta run finished"
        );
        Ok(Some(result.into()))
    }

    fn pso_config_for(&self, index: usize) -> PsoConfig {
        let mut pso = self.config.pso.clone();
        pso.seed = pso
            .seed
            .map(|s| s.wrapping_add((index as u64).wrapping_mul(SEED_STRIDE)));
        pso
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sweep::BetaGrid;
    use gravity_core::network::{FlowRecord, InteractionMatrixBuilder, Point};

    fn network() -> InteractionMatrix {
        let points = vec![
            Point::new("A", 0.0, 0.0),
            Point::new("B", 0.5, 0.0),
            Point::new("C", 0.0, 0.8),
        ];
        let flows = vec![
            FlowRecord::new("A", "B", 500.0),
            FlowRecord::new("B", "C", 80.0),
            FlowRecord::new("C", "A", 210.0),
        ];
        InteractionMatrixBuilder::new(&points).build(&flows).unwrap()
    }

    fn config(betas: Vec<f64>) -> SweepConfig {
        SweepConfig::builder()
            .pso(
                PsoConfig::fast()
                    .with_particle_count(20)
                    .with_max_iterations(25)
                    .with_seed(3),
            )
            .betas(BetaGrid::Values(betas))
            .build()
    }

    #[test]
    fn test_one_run_per_beta_in_order() {
        let result = CalibrationSweep::new(config(vec![1.5, 0.5, 1.0]))
            .run(&network())
            .unwrap();
        let betas: Vec<f64> = result.runs.iter().map(|r| r.beta).collect();
        assert_eq!(betas, vec![1.5, 0.5, 1.0]);
        assert_eq!(result.node_ids, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_best_is_max_over_runs() {
        let result = CalibrationSweep::new(config(vec![0.3, 0.9, 1.8]))
            .run(&network())
            .unwrap();
        let max = result
            .runs
            .iter()
            .map(|r| r.score)
            .fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(result.best_score, max);
        let best = result.best_run().unwrap();
        assert_eq!(best.masses, result.best_masses);
    }

    #[test]
    fn test_per_beta_seeds_differ() {
        let sweep = CalibrationSweep::new(config(vec![1.0, 1.0]));
        assert_ne!(sweep.pso_config_for(0).seed, sweep.pso_config_for(1).seed);
        assert_eq!(sweep.pso_config_for(0).seed, Some(3));
    }

    #[test]
    fn test_unseeded_config_stays_unseeded() {
        let sweep = CalibrationSweep::new(SweepConfig::default());
        assert_eq!(sweep.pso_config_for(4).seed, None);
    }

    #[test]
    fn test_pre_cancelled_sweep() {
        let token = CancellationToken::new();
        token.cancel();
        let err = CalibrationSweep::new(config(vec![0.5, 1.0]))
            .run_with_cancel(&network(), &token)
            .unwrap_err();
        assert_eq!(err, OptimiserError::Cancelled { completed: 0 });
    }

    #[test]
    fn test_invalid_grid_fails_before_work() {
        let err = CalibrationSweep::new(config(vec![]))
            .run(&network())
            .unwrap_err();
        assert_eq!(err, OptimiserError::Config(ConfigError::EmptyBetaGrid));
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_betas_match_sequential() {
        let m = network();
        let sequential = CalibrationSweep::new(config(vec![0.4, 0.8, 1.2, 1.6]))
            .run(&m)
            .unwrap();
        let mut parallel_config = config(vec![0.4, 0.8, 1.2, 1.6]);
        parallel_config.parallel_betas = true;
        let parallel = CalibrationSweep::new(parallel_config).run(&m).unwrap();
        assert_eq!(sequential, parallel);
    }
}
