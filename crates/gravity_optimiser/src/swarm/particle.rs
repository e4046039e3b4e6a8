//! Particles and the shared swarm state.
//!
//! # Update Rule
//!
//! ```text
//! v' = w·v + c1·r1·(pbest - x) + c2·r2·(gbest - x)
//! x' = x + v'
//! ```
//!
//! `r1` and `r2` are drawn once per particle per iteration and shared by
//! all of its dimensions. `v'` is truncated so that `x'` lands inside
//! `[0, search_range]`.

use rand::Rng;
use rand_distr::{Distribution, Uniform};

use super::config::PsoConfig;

/// One candidate mass vector and its memory.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Current mass vector
    pub position: Vec<f64>,
    /// Current velocity, one component per node
    pub velocity: Vec<f64>,
    /// Best position this particle has visited
    pub personal_best: Vec<f64>,
    /// Score of `personal_best`
    pub personal_best_score: f64,
}

impl Particle {
    fn new(position: Vec<f64>, velocity: Vec<f64>) -> Self {
        Self {
            personal_best: position.clone(),
            position,
            velocity,
            personal_best_score: f64::NEG_INFINITY,
        }
    }
}

/// All particles of one run plus the global best.
#[derive(Debug, Clone, PartialEq)]
pub struct SwarmState {
    /// Particles in a fixed order
    pub particles: Vec<Particle>,
    /// Best position seen by any particle
    pub global_best: Vec<f64>,
    /// Score of `global_best`
    pub global_best_score: f64,
}

impl SwarmState {
    /// Place `config.particle_count` particles around `seed`.
    ///
    /// Particle 0 sits on the seed. The others are jittered uniformly by
    /// up to `jitter_fraction · search_range` per dimension. Every position
    /// is clamped into the search box. Velocities are uniform in
    /// `[-search_range/2, search_range/2]`.
    ///
    /// Draw order is fixed (positions of particles 1.., then all
    /// velocities) so a seeded RNG always yields the same swarm.
    pub fn initialise<R: Rng + ?Sized>(config: &PsoConfig, seed: &[f64], rng: &mut R) -> Self {
        let range = config.search_range;
        let spread = config.jitter_fraction * range;
        let jitter = Uniform::new_inclusive(-spread, spread);
        let velocity = Uniform::new_inclusive(-range / 2.0, range / 2.0);

        let origin: Vec<f64> = seed.iter().map(|&m| m.clamp(0.0, range)).collect();
        let mut positions = Vec::with_capacity(config.particle_count);
        positions.push(origin.clone());
        for _ in 1..config.particle_count {
            positions.push(
                seed.iter()
                    .map(|&m| (m + jitter.sample(rng)).clamp(0.0, range))
                    .collect(),
            );
        }

        let particles = positions
            .into_iter()
            .map(|position| {
                let v = (0..seed.len()).map(|_| velocity.sample(rng)).collect();
                Particle::new(position, v)
            })
            .collect();

        Self {
            particles,
            global_best: origin,
            global_best_score: f64::NEG_INFINITY,
        }
    }

    /// Number of particles.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether the swarm is empty.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Fold one round of scores into the personal and global bests.
    ///
    /// `scores[k]` belongs to particle `k`. Only strict improvements are
    /// accepted, and particles are visited in order, so on a tie the
    /// earliest particle keeps the global best.
    pub fn record_scores(&mut self, scores: &[f64]) {
        debug_assert_eq!(scores.len(), self.particles.len());
        for (particle, &score) in self.particles.iter_mut().zip(scores) {
            if score > particle.personal_best_score {
                particle.personal_best_score = score;
                particle.personal_best.clone_from(&particle.position);
            }
            if score > self.global_best_score {
                self.global_best_score = score;
                self.global_best.clone_from(&particle.position);
            }
        }
    }

    /// Move every particle once and return the largest absolute velocity
    /// component after truncation.
    pub fn step<R: Rng + ?Sized>(&mut self, config: &PsoConfig, rng: &mut R) -> f64 {
        let range = config.search_range;
        let (w, c1, c2) = (
            config.inertia_weight,
            config.cognitive_coeff,
            config.social_coeff,
        );
        let global_best = &self.global_best;
        let mut max_velocity = 0.0_f64;

        for particle in &mut self.particles {
            let r1: f64 = rng.gen();
            let r2: f64 = rng.gen();
            for d in 0..particle.position.len() {
                let x = particle.position[d];
                let raw = w * particle.velocity[d]
                    + c1 * r1 * (particle.personal_best[d] - x)
                    + c2 * r2 * (global_best[d] - x);
                let v = truncate_velocity(x, raw, range);
                particle.velocity[d] = v;
                particle.position[d] = (x + v).clamp(0.0, range);
                max_velocity = max_velocity.max(v.abs());
            }
        }
        max_velocity
    }
}

/// Shorten `velocity` so that `position + velocity` stays in `[0, upper]`.
#[inline]
fn truncate_velocity(position: f64, velocity: f64, upper: f64) -> f64 {
    let next = position + velocity;
    if next > upper {
        upper - position
    } else if next < 0.0 {
        -position
    } else {
        velocity
    }
}
