//! Pearson correlation as a goodness-of-fit measure.
//!
//! ```text
//! r = Σ(x - x̄)(y - ȳ) / √(Σ(x - x̄)² · Σ(y - ȳ)²)
//! ```
//!
//! Two entry points are provided:
//! - [`pearson_correlation`] reports degenerate input as a [`FitError`]
//! - [`goodness_of_fit`] absorbs every [`FitError`] into a score of zero,
//!   which is what the optimiser consumes
//!
//! # Example
//!
//! ```
//! use gravity_core::math::correlation::{goodness_of_fit, pearson_correlation};
//!
//! let x = [1.0_f64, 2.0, 3.0, 4.0];
//! let y = [2.0, 4.0, 6.0, 8.0];
//! assert!((pearson_correlation(&x, &y).unwrap() - 1.0).abs() < 1e-12);
//!
//! // Constant input carries no information
//! assert_eq!(goodness_of_fit(&[5.0, 5.0, 5.0], &[1.0, 2.0, 3.0]), 0.0);
//! ```

use num_traits::Float;

use crate::types::FitError;

/// Sum of squared deviations below which a sequence counts as constant.
pub const DEGENERATE_VARIANCE: f64 = 1e-8;

/// Pearson correlation coefficient of two equal-length sequences.
///
/// # Errors
///
/// - `FitError::LengthMismatch` if the lengths differ
/// - `FitError::Empty` if both sequences are empty
/// - `FitError::Degenerate` if either sum of squared deviations is below
///   [`DEGENERATE_VARIANCE`]
pub fn pearson_correlation<T: Float>(x: &[T], y: &[T]) -> Result<T, FitError> {
    if x.len() != y.len() {
        return Err(FitError::LengthMismatch {
            left: x.len(),
            right: y.len(),
        });
    }
    if x.is_empty() {
        return Err(FitError::Empty);
    }

    let n = T::from(x.len()).ok_or(FitError::Empty)?;
    let (sum_x, sum_y) = x
        .iter()
        .zip(y)
        .fold((T::zero(), T::zero()), |(sx, sy), (&a, &b)| (sx + a, sy + b));
    let mean_x = sum_x / n;
    let mean_y = sum_y / n;

    let mut cov_xy = T::zero();
    let mut var_x = T::zero();
    let mut var_y = T::zero();
    for (&a, &b) in x.iter().zip(y) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov_xy = cov_xy + dx * dy;
        var_x = var_x + dx * dx;
        var_y = var_y + dy * dy;
    }

    let threshold = T::from(DEGENERATE_VARIANCE).unwrap_or_else(T::epsilon);
    if var_x.abs() < threshold || var_y.abs() < threshold {
        return Err(FitError::Degenerate {
            variance_x: var_x.to_f64().unwrap_or(0.0),
            variance_y: var_y.to_f64().unwrap_or(0.0),
        });
    }

    Ok(cov_xy / var_x.sqrt() / var_y.sqrt())
}

/// Goodness of fit between predicted and observed flows.
///
/// Returns the Pearson correlation, or zero whenever it is undefined.
/// A zero score signals "no discriminative fit possible" and lets a search
/// keep going instead of aborting.
#[inline]
pub fn goodness_of_fit<T: Float>(predicted: &[T], observed: &[T]) -> T {
    debug_assert_eq!(predicted.len(), observed.len());
    pearson_correlation(predicted, observed).unwrap_or_else(|_| T::zero())
}
