//! Unordered-pair matrices and the interaction matrix.

use super::index::NodeIndex;
use crate::types::NetworkError;

/// An unordered pair of node positions, normalised so that `i < j`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodePair {
    /// Smaller node position
    pub i: usize,
    /// Larger node position
    pub j: usize,
}

impl NodePair {
    /// Create a normalised pair. Returns `None` when both positions coincide.
    ///
    /// ```
    /// use gravity_core::network::NodePair;
    ///
    /// assert_eq!(NodePair::new(3, 1), NodePair::new(1, 3));
    /// assert!(NodePair::new(2, 2).is_none());
    /// ```
    pub fn new(a: usize, b: usize) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self { i: a, j: b }),
            std::cmp::Ordering::Greater => Some(Self { i: b, j: a }),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// Symmetric storage of optional values addressed by unordered node pairs.
///
/// Only the strict upper triangle is stored. A cell that was never set
/// reads as `None`, which plays the role of the "no observed pair" sentinel.
///
/// # Examples
///
/// ```
/// use gravity_core::network::PairMatrix;
///
/// let mut m = PairMatrix::new(3);
/// m.set(2, 0, 42.0);
/// assert_eq!(m.get(0, 2), Some(42.0));
/// assert_eq!(m.get(2, 0), Some(42.0));
/// assert_eq!(m.get(0, 1), None);
/// assert_eq!(m.get(1, 1), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PairMatrix {
    size: usize,
    cells: Vec<Option<f64>>,
}

impl PairMatrix {
    /// Create an empty matrix for `size` nodes.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size.saturating_sub(1) / 2],
        }
    }

    /// Number of nodes (rows/columns).
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn offset(&self, pair: NodePair) -> Option<usize> {
        if pair.j >= self.size {
            return None;
        }
        // Row i starts after rows 0..i, each holding (size - r - 1) cells
        Some(pair.i * (2 * self.size - pair.i - 1) / 2 + (pair.j - pair.i - 1))
    }

    /// Value stored for the pair `(a, b)`, in either order.
    pub fn get(&self, a: usize, b: usize) -> Option<f64> {
        NodePair::new(a, b).and_then(|pair| self.get_pair(pair))
    }

    /// Value stored for a normalised pair.
    #[inline]
    pub fn get_pair(&self, pair: NodePair) -> Option<f64> {
        self.offset(pair).and_then(|k| self.cells[k])
    }

    /// Store a value for the pair `(a, b)`. Diagonal or out-of-range
    /// addresses are ignored and return `false`.
    pub fn set(&mut self, a: usize, b: usize, value: f64) -> bool {
        match NodePair::new(a, b) {
            Some(pair) => self.set_pair(pair, value),
            None => false,
        }
    }

    /// Store a value for a normalised pair.
    pub fn set_pair(&mut self, pair: NodePair, value: f64) -> bool {
        match self.offset(pair) {
            Some(k) => {
                self.cells[k] = Some(value);
                true
            }
            None => false,
        }
    }

    /// Iterate set cells in ascending `(i, j)` order.
    pub fn iter(&self) -> impl Iterator<Item = (NodePair, f64)> + '_ {
        (0..self.size)
            .flat_map(move |i| ((i + 1)..self.size).map(move |j| NodePair { i, j }))
            .filter_map(move |pair| self.get_pair(pair).map(|v| (pair, v)))
    }

    /// Number of set cells.
    pub fn len(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Whether no cell is set.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }
}

/// Observed flows and distances for every node pair of a network.
///
/// Built by [`super::InteractionMatrixBuilder`]. Besides the two pair
/// matrices it keeps the list of *valid* pairs (positive observed flow and
/// positive distance) in ascending `(i, j)` order, together with the
/// observed flow and distance of each, so that a model evaluation is a
/// straight pass over three aligned slices.
#[derive(Debug, Clone)]
pub struct InteractionMatrix {
    index: NodeIndex,
    observed: PairMatrix,
    distance: PairMatrix,
    valid_pairs: Vec<NodePair>,
    observed_flows: Vec<f64>,
    pair_distances: Vec<f64>,
    flow_record_count: usize,
}

impl InteractionMatrix {
    pub(crate) fn new(
        index: NodeIndex,
        observed: PairMatrix,
        distance: PairMatrix,
        flow_record_count: usize,
    ) -> Self {
        let mut valid_pairs = Vec::new();
        let mut observed_flows = Vec::new();
        let mut pair_distances = Vec::new();
        for (pair, flow) in observed.iter() {
            let Some(d) = distance.get_pair(pair) else {
                continue;
            };
            if flow > 0.0 && d > 0.0 {
                valid_pairs.push(pair);
                observed_flows.push(flow);
                pair_distances.push(d);
            }
        }

        Self {
            index,
            observed,
            distance,
            valid_pairs,
            observed_flows,
            pair_distances,
            flow_record_count,
        }
    }

    /// Number of nodes `N`.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.index.len()
    }

    /// Number of pairs that take part in the fit.
    #[inline]
    pub fn valid_pair_count(&self) -> usize {
        self.valid_pairs.len()
    }

    /// Number of flow records the matrix was built from.
    pub fn flow_record_count(&self) -> usize {
        self.flow_record_count
    }

    /// The node index.
    pub fn node_index(&self) -> &NodeIndex {
        &self.index
    }

    /// Node ids in position order.
    pub fn node_ids(&self) -> &[String] {
        self.index.ids()
    }

    /// Observed flows for every recorded pair, including zero flows.
    pub fn observed(&self) -> &PairMatrix {
        &self.observed
    }

    /// Great-circle distances in kilometres for every recorded pair.
    pub fn distance(&self) -> &PairMatrix {
        &self.distance
    }

    /// Valid pairs in ascending `(i, j)` order.
    pub fn valid_pairs(&self) -> &[NodePair] {
        &self.valid_pairs
    }

    /// Observed flows aligned with [`Self::valid_pairs`].
    pub fn observed_flows(&self) -> &[f64] {
        &self.observed_flows
    }

    /// Distances aligned with [`Self::valid_pairs`].
    pub fn pair_distances(&self) -> &[f64] {
        &self.pair_distances
    }

    /// Total observed flow touching each node, over valid pairs.
    pub fn node_degrees(&self) -> Vec<f64> {
        let mut degrees = vec![0.0; self.node_count()];
        for (pair, &flow) in self.valid_pairs.iter().zip(&self.observed_flows) {
            degrees[pair.i] += flow;
            degrees[pair.j] += flow;
        }
        degrees
    }

    /// Check that a per-node vector matches the network size.
    ///
    /// # Errors
    ///
    /// `NetworkError::DimensionMismatch` if the lengths differ.
    pub fn check_dimension(&self, len: usize) -> Result<(), NetworkError> {
        if len == self.node_count() {
            Ok(())
        } else {
            Err(NetworkError::dimension_mismatch(self.node_count(), len))
        }
    }
}
