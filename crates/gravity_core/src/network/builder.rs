//! Validating construction of an [`InteractionMatrix`] from raw records.

use std::collections::HashMap;

use tracing::{debug, warn};

use super::index::NodeIndex;
use super::matrix::{InteractionMatrix, NodePair, PairMatrix};
use super::point::{FlowRecord, Point};
use crate::math::geo::{haversine_km, GeoPoint};
use crate::types::NetworkError;

/// How repeated records for the same unordered pair are combined.
///
/// `A → B` and `B → A` address the same pair, so a file listing both
/// directions produces a repeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DuplicateFlowPolicy {
    /// The last record wins (default).
    #[default]
    Replace,
    /// Values are added together.
    Sum,
    /// Repeats are a hard error.
    Reject,
}

/// Builds an [`InteractionMatrix`] from point and flow records.
///
/// Nodes are indexed in first-seen order over flow endpoints (origin, then
/// destination, record by record); points that never appear in a flow are
/// left out of the network.
///
/// # Examples
///
/// ```
/// use gravity_core::network::{FlowRecord, InteractionMatrixBuilder, Point};
///
/// let points = vec![Point::new("P", 0.0, 0.0), Point::new("Q", 1.0, 0.0)];
/// let flows = vec![FlowRecord::new("Q", "P", 500.0)];
///
/// let matrix = InteractionMatrixBuilder::new(&points).build(&flows).unwrap();
/// assert_eq!(matrix.node_ids(), &["Q", "P"]);
/// assert_eq!(matrix.observed().get(0, 1), Some(500.0));
///
/// let missing = vec![FlowRecord::new("P", "R", 1.0)];
/// let err = InteractionMatrixBuilder::new(&points).build(&missing).unwrap_err();
/// assert!(err.is_missing_point());
/// ```
#[derive(Debug, Clone)]
pub struct InteractionMatrixBuilder<'a> {
    points: &'a [Point],
    duplicate_policy: DuplicateFlowPolicy,
}

impl<'a> InteractionMatrixBuilder<'a> {
    /// Create a builder over a point list.
    pub fn new(points: &'a [Point]) -> Self {
        Self {
            points,
            duplicate_policy: DuplicateFlowPolicy::default(),
        }
    }

    /// Set the duplicate flow policy.
    pub fn duplicate_policy(mut self, policy: DuplicateFlowPolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    /// Build the interaction matrix.
    ///
    /// # Errors
    ///
    /// - `DuplicatePoint` / `InvalidCoordinate` for bad point records
    /// - `NegativeFlow`, `SelfLoop`, `MissingPoint` for bad flow records
    /// - `DuplicateFlow` under [`DuplicateFlowPolicy::Reject`]
    /// - `InsufficientNodes` if fewer than two nodes are connected
    /// - `NoValidPairs` if no pair has a positive flow over a positive distance
    pub fn build(&self, flows: &[FlowRecord]) -> Result<InteractionMatrix, NetworkError> {
        let locations = self.locate_points()?;

        let mut index = NodeIndex::new();
        let mut endpoints = Vec::with_capacity(flows.len());
        for flow in flows {
            if !flow.value.is_finite() || flow.value < 0.0 {
                return Err(NetworkError::negative_flow(
                    &flow.origin,
                    &flow.destination,
                    flow.value,
                ));
            }
            if flow.origin == flow.destination {
                return Err(NetworkError::self_loop(&flow.origin));
            }
            let origin = *locations
                .get(flow.origin.as_str())
                .ok_or_else(|| NetworkError::missing_point(&flow.origin))?;
            let destination = *locations
                .get(flow.destination.as_str())
                .ok_or_else(|| NetworkError::missing_point(&flow.destination))?;

            let a = index.insert(&flow.origin);
            let b = index.insert(&flow.destination);
            endpoints.push((a, b, origin, destination));
        }

        let n = index.len();
        if n < 2 {
            return Err(NetworkError::insufficient_nodes(2, n));
        }

        let mut observed = PairMatrix::new(n);
        let mut distance = PairMatrix::new(n);
        for (flow, &(a, b, origin, destination)) in flows.iter().zip(&endpoints) {
            let Some(pair) = NodePair::new(a, b) else {
                continue;
            };
            let value = match (observed.get_pair(pair), self.duplicate_policy) {
                (None, _) => flow.value,
                (Some(_), DuplicateFlowPolicy::Replace) => {
                    warn!(
                        origin = %flow.origin,
                        destination = %flow.destination,
                        "Repeated flow pair, keeping the last record"
                    );
                    flow.value
                }
                (Some(previous), DuplicateFlowPolicy::Sum) => previous + flow.value,
                (Some(_), DuplicateFlowPolicy::Reject) => {
                    return Err(NetworkError::duplicate_flow(
                        &flow.origin,
                        &flow.destination,
                    ));
                }
            };
            observed.set_pair(pair, value);
            distance.set_pair(pair, haversine_km(origin, destination));
        }

        let matrix = InteractionMatrix::new(index, observed, distance, flows.len());
        self.report(&matrix);

        if matrix.valid_pair_count() == 0 {
            return Err(NetworkError::NoValidPairs);
        }
        Ok(matrix)
    }

    fn locate_points(&self) -> Result<HashMap<&'a str, GeoPoint>, NetworkError> {
        let mut locations = HashMap::with_capacity(self.points.len());
        for point in self.points {
            let position = point.position();
            if !position.is_valid() {
                return Err(NetworkError::invalid_coordinate(
                    &point.id,
                    point.longitude,
                    point.latitude,
                ));
            }
            if locations.insert(point.id.as_str(), position).is_some() {
                return Err(NetworkError::duplicate_point(&point.id));
            }
        }
        Ok(locations)
    }

    fn report(&self, matrix: &InteractionMatrix) {
        let recorded = matrix.observed().len();
        let excluded = recorded - matrix.valid_pair_count();
        if excluded > 0 {
            warn!(
                excluded,
                "Pairs with zero flow or zero distance are excluded from the fit"
            );
        }
        let unused = self.points.len().saturating_sub(matrix.node_count());
        if unused > 0 {
            debug!(unused, "Points without any flow are not part of the network");
        }
        debug!(
            nodes = matrix.node_count(),
            valid_pairs = matrix.valid_pair_count(),
            records = matrix.flow_record_count(),
            "Interaction matrix built"
        );
    }
}
