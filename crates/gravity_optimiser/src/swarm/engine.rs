//! The particle swarm run loop.

use std::time::Instant;

use gravity_core::model::{GravityKernel, GravityModel};
use gravity_core::network::InteractionMatrix;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, trace};

use super::config::PsoConfig;
use super::particle::{Particle, SwarmState};
use super::termination::{CancellationToken, TerminationReason};
use crate::error::{ConfigError, OptimiserError};

/// Outcome of one swarm run at a fixed β.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PsoResult {
    /// Decay exponent the run optimised for
    pub beta: f64,
    /// Global best score at termination
    pub best_score: f64,
    /// Global best mass vector at termination
    pub best_masses: Vec<f64>,
    /// Iterations completed
    pub iterations: usize,
    /// Why the run stopped
    pub termination: TerminationReason,
    /// Global best score after each iteration; non-decreasing
    pub history: Vec<f64>,
    /// Number of particle evaluations performed
    pub evaluations: usize,
}

/// Particle Swarm Optimiser for the node masses of a gravity model.
///
/// # Examples
///
/// ```
/// use gravity_core::network::{FlowRecord, InteractionMatrixBuilder, Point};
/// use gravity_optimiser::swarm::{ParticleSwarmOptimizer, PsoConfig};
///
/// let points = vec![
///     Point::new("A", 0.0, 0.0),
///     Point::new("B", 1.0, 0.0),
///     Point::new("C", 0.0, 1.0),
/// ];
/// let flows = vec![
///     FlowRecord::new("A", "B", 10.0),
///     FlowRecord::new("B", "C", 4.0),
///     FlowRecord::new("A", "C", 7.0),
/// ];
/// let matrix = InteractionMatrixBuilder::new(&points).build(&flows).unwrap();
///
/// let pso = ParticleSwarmOptimizer::new(PsoConfig::fast().with_seed(1));
/// let result = pso.optimise(&matrix, 1.0, &[1000.0, 500.0, 800.0]).unwrap();
/// assert!(result.termination.is_terminal());
/// assert!(result.best_masses.iter().all(|m| (0.0..=1000.0).contains(m)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ParticleSwarmOptimizer {
    config: PsoConfig,
}

impl ParticleSwarmOptimizer {
    /// Create an optimiser with the given configuration.
    pub fn new(config: PsoConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &PsoConfig {
        &self.config
    }

    /// Optimise node masses for decay exponent `beta`, starting from `seed`.
    ///
    /// # Errors
    ///
    /// - `OptimiserError::Config` if the configuration or `beta` is invalid
    /// - `OptimiserError::Network` if `seed` does not have one entry per node
    pub fn optimise(
        &self,
        matrix: &InteractionMatrix,
        beta: f64,
        seed: &[f64],
    ) -> Result<PsoResult, OptimiserError> {
        self.optimise_with_cancel(matrix, beta, seed, &CancellationToken::new())
    }

    /// As [`optimise`](Self::optimise), stopping early once `token` is cancelled.
    ///
    /// Cancellation and the time limit are checked after each iteration, so
    /// at least one iteration always runs and the result carries a valid
    /// best.
    pub fn optimise_with_cancel(
        &self,
        matrix: &InteractionMatrix,
        beta: f64,
        seed: &[f64],
        token: &CancellationToken,
    ) -> Result<PsoResult, OptimiserError> {
        self.config.validate()?;
        if !(beta.is_finite() && beta > 0.0) {
            return Err(ConfigError::invalid_beta(beta).into());
        }
        matrix.check_dimension(seed.len())?;

        let config = &self.config;
        let started = Instant::now();
        let run_seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(run_seed);
        let kernel = GravityModel::new(beta).kernel(matrix);

        let mut swarm = SwarmState::initialise(config, seed, &mut rng);
        debug!(
            beta,
            particles = swarm.len(),
            nodes = seed.len(),
            pairs = matrix.valid_pair_count(),
            seed = run_seed,
            "Swarm initialised"
        );

        let mut scores = vec![0.0; swarm.len()];
        let mut history = Vec::with_capacity(config.max_iterations);
        let mut termination = TerminationReason::Running;
        let mut iterations = 0;

        while !termination.is_terminal() {
            evaluate(&kernel, &swarm.particles, &mut scores, config.parallel);
            swarm.record_scores(&scores);
            let max_velocity = swarm.step(config, &mut rng);
            iterations += 1;
            history.push(swarm.global_best_score);

            trace!(
                iteration = iterations,
                best_score = swarm.global_best_score,
                max_velocity,
                "PSO iteration"
            );

            termination = if swarm.global_best_score > config.convergence_score_threshold {
                TerminationReason::ConvergedByScore
            } else if max_velocity < config.convergence_velocity_threshold {
                TerminationReason::ConvergedByVelocity
            } else if iterations >= config.max_iterations {
                TerminationReason::ExhaustedIterations
            } else if token.is_cancelled() {
                TerminationReason::Cancelled
            } else if config
                .time_limit
                .is_some_and(|limit| started.elapsed() >= limit)
            {
                TerminationReason::TimedOut
            } else {
                TerminationReason::Running
            };
        }

        debug!(
            beta,
            best_score = swarm.global_best_score,
            iterations,
            termination = %termination,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Swarm finished"
        );

        Ok(PsoResult {
            beta,
            best_score: swarm.global_best_score,
            best_masses: swarm.global_best,
            iterations,
            termination,
            history,
            evaluations: iterations * scores.len(),
        })
    }
}

/// Score every particle's position into `scores`.
#[cfg(feature = "parallel")]
fn evaluate(kernel: &GravityKernel<'_>, particles: &[Particle], scores: &mut [f64], parallel: bool) {
    use rayon::prelude::*;

    if !parallel {
        return evaluate_sequential(kernel, particles, scores);
    }
    particles
        .par_iter()
        .zip(scores.par_iter_mut())
        .for_each_init(Vec::new, |scratch, (particle, score)| {
            *score = kernel.score_with(&particle.position, scratch);
        });
}

/// Fallback to sequential when parallel feature is disabled.
#[cfg(not(feature = "parallel"))]
fn evaluate(
    kernel: &GravityKernel<'_>,
    particles: &[Particle],
    scores: &mut [f64],
    _parallel: bool,
) {
    evaluate_sequential(kernel, particles, scores)
}

fn evaluate_sequential(kernel: &GravityKernel<'_>, particles: &[Particle], scores: &mut [f64]) {
    let mut scratch = Vec::new();
    for (particle, score) in particles.iter().zip(scores.iter_mut()) {
        *score = kernel.score_with(&particle.position, &mut scratch);
    }
}
