//! Degree-based starting point for the swarm.

use gravity_core::network::InteractionMatrix;
use gravity_core::types::NetworkError;

use crate::error::{ConfigError, OptimiserError};

/// Initial mass estimate: each node's total observed flow over valid pairs,
/// rescaled so the largest entry equals `scale`.
///
/// # Errors
///
/// - `OptimiserError::Config` if `scale` is not positive and finite
/// - `OptimiserError::Network` (`NoValidPairs`) if every degree is zero
///
/// # Examples
///
/// ```
/// use gravity_core::network::{FlowRecord, InteractionMatrixBuilder, Point};
/// use gravity_optimiser::sweep::seed_masses;
///
/// let points = vec![
///     Point::new("A", 0.0, 0.0),
///     Point::new("B", 1.0, 0.0),
///     Point::new("C", 2.0, 0.0),
/// ];
/// let flows = vec![FlowRecord::new("A", "B", 30.0), FlowRecord::new("B", "C", 10.0)];
/// let matrix = InteractionMatrixBuilder::new(&points).build(&flows).unwrap();
///
/// assert_eq!(seed_masses(&matrix, 1000.0).unwrap(), vec![750.0, 1000.0, 250.0]);
/// ```
pub fn seed_masses(matrix: &InteractionMatrix, scale: f64) -> Result<Vec<f64>, OptimiserError> {
    if !(scale.is_finite() && scale > 0.0) {
        return Err(ConfigError::non_positive_search_range(scale).into());
    }
    let degrees = matrix.node_degrees();
    let max = degrees.iter().copied().fold(0.0_f64, f64::max);
    if max <= 0.0 {
        return Err(NetworkError::NoValidPairs.into());
    }
    Ok(degrees.into_iter().map(|d| d / max * scale).collect())
}
