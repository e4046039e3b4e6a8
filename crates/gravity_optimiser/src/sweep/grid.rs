//! The set of decay exponents a sweep visits.

use crate::error::ConfigError;

/// Largest number of β values a range grid may expand to.
pub const MAX_GRID_POINTS: usize = 10_000;

/// Decay exponents to calibrate, visited in order.
///
/// # Examples
///
/// ```
/// use gravity_optimiser::sweep::BetaGrid;
///
/// let grid = BetaGrid::default();
/// let betas = grid.values();
/// assert_eq!(betas.len(), 29);
/// assert_eq!(betas[0], 0.1);
/// assert_eq!(betas[28], 2.9);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BetaGrid {
    /// `min, min + step, …` up to and including `max`.
    Range {
        /// First β
        min: f64,
        /// Last β (inclusive, within rounding)
        max: f64,
        /// Spacing
        step: f64,
    },
    /// An explicit list.
    Values(Vec<f64>),
}

impl Default for BetaGrid {
    fn default() -> Self {
        Self::Range {
            min: 0.1,
            max: 2.9,
            step: 0.1,
        }
    }
}

impl BetaGrid {
    /// Inclusive range grid.
    pub fn range(min: f64, max: f64, step: f64) -> Self {
        Self::Range { min, max, step }
    }

    /// Materialise the grid.
    ///
    /// Range points are computed as `min + k·step` and rounded to ten
    /// decimals, so `0.1..=2.9` by `0.1` yields exactly 29 clean values.
    pub fn values(&self) -> Vec<f64> {
        match self {
            Self::Values(values) => values.clone(),
            Self::Range { min, max, step } => {
                let (min, max, step) = (*min, *max, *step);
                let Some(count) = range_count(min, max, step) else {
                    return Vec::new();
                };
                (0..count)
                    .map(|k| round10(min + k as f64 * step))
                    .collect()
            }
        }
    }

    /// Number of β values.
    pub fn len(&self) -> usize {
        self.values().len()
    }

    /// Whether the grid is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check bounds and values.
    ///
    /// # Errors
    ///
    /// - `ConfigError::InvalidBetaRange` for non-finite bounds, a
    ///   non-positive `min` or `step`, `max < min`, or a range that expands
    ///   to more than [`MAX_GRID_POINTS`] values
    /// - `ConfigError::EmptyBetaGrid` for an empty list
    /// - `ConfigError::InvalidBeta` for a listed value that is not positive
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Self::Range { min, max, step } => {
                let finite = min.is_finite() && max.is_finite() && step.is_finite();
                if !finite || *min <= 0.0 || *step <= 0.0 || max < min {
                    return Err(ConfigError::invalid_beta_range(*min, *max, *step));
                }
                match range_count(*min, *max, *step) {
                    Some(_) => Ok(()),
                    None => Err(ConfigError::invalid_beta_range(*min, *max, *step)),
                }
            }
            Self::Values(values) => {
                if values.is_empty() {
                    return Err(ConfigError::EmptyBetaGrid);
                }
                match values.iter().find(|b| !(b.is_finite() && **b > 0.0)) {
                    Some(&bad) => Err(ConfigError::invalid_beta(bad)),
                    None => Ok(()),
                }
            }
        }
    }
}

/// Point count of `min..=max` by `step`, or `None` when the range is
/// malformed or expands past [`MAX_GRID_POINTS`].
fn range_count(min: f64, max: f64, step: f64) -> Option<usize> {
    if !(step > 0.0 && max >= min) {
        return None;
    }
    let intervals = ((max - min) / step + 1e-9).floor();
    if !intervals.is_finite() || intervals >= MAX_GRID_POINTS as f64 {
        return None;
    }
    (intervals as usize).checked_add(1)
}

#[inline]
fn round10(x: f64) -> f64 {
    (x * 1e10).round() / 1e10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid() {
        let values = BetaGrid::default().values();
        assert_eq!(values.len(), 29);
        assert_eq!(values.first(), Some(&0.1));
        assert_eq!(values.last(), Some(&2.9));
        assert_eq!(values[9], 1.0);
        for w in values.windows(2) {
            assert!((w[1] - w[0] - 0.1).abs() < 1e-9);
        }
    }

    #[test]
    fn test_single_point_range() {
        assert_eq!(BetaGrid::range(1.5, 1.5, 0.1).values(), vec![1.5]);
    }

    #[test]
    fn test_range_stops_before_overshoot() {
        assert_eq!(BetaGrid::range(0.5, 1.2, 0.5).values(), vec![0.5, 1.0]);
    }

    #[test]
    fn test_explicit_values_kept_in_order() {
        let grid = BetaGrid::Values(vec![2.0, 0.5, 1.0]);
        assert_eq!(grid.values(), vec![2.0, 0.5, 1.0]);
        assert_eq!(grid.len(), 3);
        assert!(grid.validate().is_ok());
    }

    // ========================================
    // Validation Tests
    // ========================================

    #[test]
    fn test_invalid_ranges() {
        for grid in [
            BetaGrid::range(2.0, 1.0, 0.1),
            BetaGrid::range(0.0, 1.0, 0.1),
            BetaGrid::range(0.1, 1.0, 0.0),
            BetaGrid::range(0.1, f64::INFINITY, 0.1),
        ] {
            assert!(matches!(
                grid.validate(),
                Err(ConfigError::InvalidBetaRange { .. })
            ));
        }
        assert!(BetaGrid::range(2.0, 1.0, 0.1).is_empty());
    }

    #[test]
    fn test_oversized_ranges_rejected() {
        for grid in [
            BetaGrid::range(0.1, 1e300, 1e-300),
            BetaGrid::range(0.1, 2.9, 1e-7),
        ] {
            assert!(matches!(
                grid.validate(),
                Err(ConfigError::InvalidBetaRange { .. })
            ));
            assert!(grid.values().is_empty());
        }
    }

    #[test]
    fn test_largest_allowed_range() {
        let grid = BetaGrid::range(1.0, 1.0 + (MAX_GRID_POINTS - 1) as f64, 1.0);
        assert!(grid.validate().is_ok());
        assert_eq!(grid.len(), MAX_GRID_POINTS);
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            BetaGrid::Values(vec![]).validate(),
            Err(ConfigError::EmptyBetaGrid)
        );
        assert_eq!(
            BetaGrid::Values(vec![1.0, -0.5]).validate(),
            Err(ConfigError::invalid_beta(-0.5))
        );
    }
}
