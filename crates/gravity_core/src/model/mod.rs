//! Interaction models.
//!
//! - [`GravityModel`]: `flow = mᵢ · mⱼ / dᵢⱼ^β`
//! - [`GravityKernel`]: A model bound to one network, with the distance
//!   decay of every valid pair precomputed for repeated evaluation

mod gravity;

pub use gravity::{GravityKernel, GravityModel};
