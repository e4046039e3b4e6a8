//! Particle Swarm Optimisation of node masses at a fixed β.
//!
//! A swarm of candidate mass vectors moves through `[0, search_range]ᴺ`,
//! each particle pulled towards its own best position and the swarm's best.
//! A run ends on the first of:
//!
//! - global best score above `convergence_score_threshold`
//! - largest velocity component below `convergence_velocity_threshold`
//! - `max_iterations` reached
//! - a triggered [`CancellationToken`] or an expired `time_limit`

mod config;
mod engine;
mod particle;
mod termination;

pub use config::{PsoConfig, PsoConfigBuilder};
pub use engine::{ParticleSwarmOptimizer, PsoResult};
pub use particle::{Particle, SwarmState};
pub use termination::{CancellationToken, TerminationReason};
