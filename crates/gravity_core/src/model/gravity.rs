//! The gravity interaction law.
//!
//! # Model
//!
//! ```text
//! predicted(i, j) = mass[i] · mass[j] / distance(i, j)^β
//! ```
//!
//! Flow scales with the product of the two node masses and decays with
//! distance raised to the exponent β. Only valid pairs (positive observed
//! flow over a positive distance) receive a prediction.
//!
//! # Example
//!
//! ```
//! use gravity_core::model::GravityModel;
//!
//! let model = GravityModel::new(2.0);
//! assert_eq!(model.predict(10.0, 20.0, 10.0), 2.0);
//! ```

use crate::math::correlation::goodness_of_fit;
use crate::network::{InteractionMatrix, NodePair, PairMatrix};
use crate::types::NetworkError;

/// Gravity model with a fixed distance-decay exponent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityModel {
    beta: f64,
}

impl GravityModel {
    /// Create a model with decay exponent `beta`.
    pub fn new(beta: f64) -> Self {
        Self { beta }
    }

    /// The decay exponent.
    #[inline]
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Predicted interaction between two masses at a distance.
    #[inline]
    pub fn predict(&self, mass_i: f64, mass_j: f64, distance: f64) -> f64 {
        mass_i * mass_j / distance.powf(self.beta)
    }

    /// Bind the model to a network, precomputing `1 / dᵢⱼ^β` per valid pair.
    pub fn kernel<'m>(&self, matrix: &'m InteractionMatrix) -> GravityKernel<'m> {
        let decay = matrix
            .pair_distances()
            .iter()
            .map(|d| d.powf(-self.beta))
            .collect();
        GravityKernel {
            beta: self.beta,
            matrix,
            decay,
        }
    }

    /// Predicted flows aligned with `matrix.valid_pairs()`.
    ///
    /// # Errors
    ///
    /// `NetworkError::DimensionMismatch` if `masses.len()` differs from the node count.
    pub fn predict_flows(
        &self,
        masses: &[f64],
        matrix: &InteractionMatrix,
    ) -> Result<Vec<f64>, NetworkError> {
        let mut flows = Vec::with_capacity(matrix.valid_pair_count());
        self.predict_into(masses, matrix, &mut flows)?;
        Ok(flows)
    }

    /// Write predicted flows into a caller-owned buffer aligned with
    /// `matrix.valid_pairs()`. The buffer is resized to the valid pair count.
    ///
    /// # Errors
    ///
    /// `NetworkError::DimensionMismatch` if `masses.len()` differs from the node count.
    pub fn predict_into(
        &self,
        masses: &[f64],
        matrix: &InteractionMatrix,
        buffer: &mut Vec<f64>,
    ) -> Result<(), NetworkError> {
        matrix.check_dimension(masses.len())?;
        buffer.clear();
        buffer.extend(
            matrix
                .valid_pairs()
                .iter()
                .zip(matrix.pair_distances())
                .map(|(pair, &d)| self.predict(masses[pair.i], masses[pair.j], d)),
        );
        Ok(())
    }

    /// Predicted flows as a pair matrix. Pairs that are not valid stay unset.
    ///
    /// # Errors
    ///
    /// `NetworkError::DimensionMismatch` if `masses.len()` differs from the node count.
    pub fn predicted_matrix(
        &self,
        masses: &[f64],
        matrix: &InteractionMatrix,
    ) -> Result<PairMatrix, NetworkError> {
        let flows = self.predict_flows(masses, matrix)?;
        let mut predicted = PairMatrix::new(matrix.node_count());
        for (&pair, flow) in matrix.valid_pairs().iter().zip(flows) {
            predicted.set_pair(pair, flow);
        }
        Ok(predicted)
    }

    /// Goodness of fit of a mass vector against the observed flows.
    ///
    /// # Errors
    ///
    /// `NetworkError::DimensionMismatch` if `masses.len()` differs from the node count.
    pub fn score(&self, masses: &[f64], matrix: &InteractionMatrix) -> Result<f64, NetworkError> {
        let predicted = self.predict_flows(masses, matrix)?;
        Ok(goodness_of_fit(&predicted, matrix.observed_flows()))
    }
}

/// A [`GravityModel`] bound to one [`InteractionMatrix`].
///
/// Distance decay is computed once, so each evaluation costs two
/// multiplications per valid pair. The kernel is immutable and can be
/// shared between threads; every evaluation writes into a caller-owned
/// buffer.
#[derive(Debug, Clone)]
pub struct GravityKernel<'m> {
    beta: f64,
    matrix: &'m InteractionMatrix,
    decay: Vec<f64>,
}

impl<'m> GravityKernel<'m> {
    /// The decay exponent.
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// The bound network.
    pub fn matrix(&self) -> &'m InteractionMatrix {
        self.matrix
    }

    /// Number of node masses an evaluation expects.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.matrix.node_count()
    }

    /// Write predictions for every valid pair into `out`.
    ///
    /// `masses` must hold one entry per node and `out` one slot per valid
    /// pair; both are checked in debug builds only.
    #[inline]
    pub fn predict_into(&self, masses: &[f64], out: &mut [f64]) {
        debug_assert_eq!(masses.len(), self.dimension());
        debug_assert_eq!(out.len(), self.decay.len());
        let pairs: &[NodePair] = self.matrix.valid_pairs();
        for ((slot, pair), &decay) in out.iter_mut().zip(pairs).zip(&self.decay) {
            *slot = masses[pair.i] * masses[pair.j] * decay;
        }
    }

    /// Goodness of fit of `masses`, using `scratch` as the prediction buffer.
    #[inline]
    pub fn score_with(&self, masses: &[f64], scratch: &mut Vec<f64>) -> f64 {
        scratch.resize(self.decay.len(), 0.0);
        self.predict_into(masses, scratch);
        goodness_of_fit(scratch.as_slice(), self.matrix.observed_flows())
    }

    /// Goodness of fit of `masses` with a freshly allocated buffer.
    pub fn score(&self, masses: &[f64]) -> f64 {
        let mut scratch = Vec::with_capacity(self.decay.len());
        self.score_with(masses, &mut scratch)
    }
}
