//! Error types for structured error handling.
//!
//! This module provides:
//! - `NetworkError`: Structural problems in point/flow input data
//! - `FitError`: Statistical problems computing a goodness of fit

use thiserror::Error;

/// Errors raised while building or querying a flow network.
///
/// These are structural failures: the input cannot describe a valid
/// network, so calibration must not start.
///
/// # Examples
///
/// ```
/// use gravity_core::types::NetworkError;
///
/// let err = NetworkError::missing_point("Wuhan");
/// assert!(err.is_missing_point());
/// assert!(format!("{}", err).contains("Wuhan"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NetworkError {
    /// A flow record references a point id that was never supplied.
    #[error("Flow references unknown point '{id}'")]
    MissingPoint {
        /// The offending point id
        id: String,
    },

    /// Two points share the same id.
    #[error("Duplicate point id '{id}'")]
    DuplicatePoint {
        /// The duplicated id
        id: String,
    },

    /// A flow record connects a point to itself.
    #[error("Flow record connects point '{id}' to itself")]
    SelfLoop {
        /// The point id used as both origin and destination
        id: String,
    },

    /// A flow value is negative or not finite.
    #[error("Invalid flow value {value} between '{origin}' and '{destination}'")]
    NegativeFlow {
        /// Origin point id
        origin: String,
        /// Destination point id
        destination: String,
        /// The rejected value
        value: f64,
    },

    /// A point carries coordinates outside the valid lon/lat range.
    #[error("Invalid coordinate for point '{id}': lon = {longitude}, lat = {latitude}")]
    InvalidCoordinate {
        /// Point id
        id: String,
        /// Longitude in degrees
        longitude: f64,
        /// Latitude in degrees
        latitude: f64,
    },

    /// Fewer connected nodes than a network requires.
    #[error("Insufficient nodes: need at least {required}, got {provided}")]
    InsufficientNodes {
        /// Minimum number of nodes
        required: usize,
        /// Number of nodes found
        provided: usize,
    },

    /// No pair carries a positive observed flow.
    #[error("No node pair carries a positive observed flow")]
    NoValidPairs,

    /// The same unordered pair appears in more than one flow record.
    #[error("Duplicate flow between '{origin}' and '{destination}'")]
    DuplicateFlow {
        /// Origin point id
        origin: String,
        /// Destination point id
        destination: String,
    },

    /// A per-node vector does not match the network size.
    #[error("Dimension mismatch: expected {expected} values, got {actual}")]
    DimensionMismatch {
        /// Number of nodes in the network
        expected: usize,
        /// Length of the supplied vector
        actual: usize,
    },

    /// A node id is not part of the node index.
    #[error("Node '{id}' is not part of the network")]
    UnknownNode {
        /// The unknown id
        id: String,
    },
}

impl NetworkError {
    /// Create a missing point error.
    pub fn missing_point(id: impl Into<String>) -> Self {
        Self::MissingPoint { id: id.into() }
    }

    /// Create a duplicate point error.
    pub fn duplicate_point(id: impl Into<String>) -> Self {
        Self::DuplicatePoint { id: id.into() }
    }

    /// Create a self loop error.
    pub fn self_loop(id: impl Into<String>) -> Self {
        Self::SelfLoop { id: id.into() }
    }

    /// Create an invalid flow value error.
    pub fn negative_flow(
        origin: impl Into<String>,
        destination: impl Into<String>,
        value: f64,
    ) -> Self {
        Self::NegativeFlow {
            origin: origin.into(),
            destination: destination.into(),
            value,
        }
    }

    /// Create an invalid coordinate error.
    pub fn invalid_coordinate(id: impl Into<String>, longitude: f64, latitude: f64) -> Self {
        Self::InvalidCoordinate {
            id: id.into(),
            longitude,
            latitude,
        }
    }

    /// Create an insufficient nodes error.
    pub fn insufficient_nodes(required: usize, provided: usize) -> Self {
        Self::InsufficientNodes { required, provided }
    }

    /// Create a duplicate flow error.
    pub fn duplicate_flow(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self::DuplicateFlow {
            origin: origin.into(),
            destination: destination.into(),
        }
    }

    /// Create a dimension mismatch error.
    pub fn dimension_mismatch(expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch { expected, actual }
    }

    /// Create an unknown node error.
    pub fn unknown_node(id: impl Into<String>) -> Self {
        Self::UnknownNode { id: id.into() }
    }

    /// Check if this is a missing point error.
    pub fn is_missing_point(&self) -> bool {
        matches!(self, Self::MissingPoint { .. })
    }

    /// Check if this is a duplicate point error.
    pub fn is_duplicate_point(&self) -> bool {
        matches!(self, Self::DuplicatePoint { .. })
    }

    /// Check if this is a self loop error.
    pub fn is_self_loop(&self) -> bool {
        matches!(self, Self::SelfLoop { .. })
    }

    /// Check if this is an insufficient nodes error.
    pub fn is_insufficient_nodes(&self) -> bool {
        matches!(self, Self::InsufficientNodes { .. })
    }

    /// Check if this is a dimension mismatch error.
    pub fn is_dimension_mismatch(&self) -> bool {
        matches!(self, Self::DimensionMismatch { .. })
    }
}

/// Reasons a correlation cannot be computed.
///
/// `Degenerate` is a soft condition: the optimiser treats it as a score
/// of zero and keeps searching rather than aborting.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum FitError {
    /// The two sequences differ in length.
    #[error("Sequence length mismatch: {left} vs {right}")]
    LengthMismatch {
        /// Length of the first sequence
        left: usize,
        /// Length of the second sequence
        right: usize,
    },

    /// The sequences are empty.
    #[error("Cannot correlate empty sequences")]
    Empty,

    /// At least one sequence is numerically constant.
    #[error("Degenerate fit: variance_x = {variance_x}, variance_y = {variance_y}")]
    Degenerate {
        /// Sum of squared deviations of the first sequence
        variance_x: f64,
        /// Sum of squared deviations of the second sequence
        variance_y: f64,
    },
}

impl FitError {
    /// Check if this is a degenerate (zero variance) fit.
    pub fn is_degenerate(&self) -> bool {
        matches!(self, Self::Degenerate { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================
    // NetworkError Display Tests
    // ========================================

    #[test]
    fn test_missing_point_display() {
        let err = NetworkError::missing_point("Chengdu");
        let display = format!("{}", err);
        assert!(display.contains("unknown point"));
        assert!(display.contains("Chengdu"));
    }

    #[test]
    fn test_negative_flow_display() {
        let err = NetworkError::negative_flow("A", "B", -3.5);
        let display = format!("{}", err);
        assert!(display.contains("-3.5"));
        assert!(display.contains("'A'"));
        assert!(display.contains("'B'"));
    }

    #[test]
    fn test_insufficient_nodes_display() {
        let err = NetworkError::insufficient_nodes(2, 1);
        let display = format!("{}", err);
        assert!(display.contains("Insufficient"));
        assert!(display.contains('2'));
        assert!(display.contains('1'));
    }

    #[test]
    fn test_dimension_mismatch_display() {
        let err = NetworkError::dimension_mismatch(4, 3);
        assert_eq!(
            format!("{}", err),
            "Dimension mismatch: expected 4 values, got 3"
        );
    }

    // ========================================
    // Predicate Tests
    // ========================================

    #[test]
    fn test_is_checks() {
        assert!(NetworkError::missing_point("x").is_missing_point());
        assert!(!NetworkError::missing_point("x").is_self_loop());
        assert!(NetworkError::self_loop("x").is_self_loop());
        assert!(NetworkError::duplicate_point("x").is_duplicate_point());
        assert!(NetworkError::insufficient_nodes(2, 0).is_insufficient_nodes());
        assert!(NetworkError::dimension_mismatch(2, 3).is_dimension_mismatch());
    }

    #[test]
    fn test_fit_error_degenerate() {
        let err = FitError::Degenerate {
            variance_x: 0.0,
            variance_y: 4.0,
        };
        assert!(err.is_degenerate());
        assert!(!FitError::Empty.is_degenerate());
    }

    // ========================================
    // Trait Tests
    // ========================================

    #[test]
    fn test_clone_and_equality() {
        let err1 = NetworkError::duplicate_flow("A", "B");
        let err2 = err1.clone();
        assert_eq!(err1, err2);
    }

    #[test]
    fn test_error_trait_implementation() {
        let err = NetworkError::NoValidPairs;
        let _: &dyn std::error::Error = &err;
        let fit = FitError::Empty;
        let _: &dyn std::error::Error = &fit;
    }
}
