//! Integration tests for gravity_core.
//!
//! Exercises the public module surface end to end: points and flows in,
//! matrix construction, gravity predictions and goodness of fit out.

use approx::assert_relative_eq;
use gravity_core::math::correlation::{goodness_of_fit, pearson_correlation, DEGENERATE_VARIANCE};
use gravity_core::math::geo::{haversine_distance, haversine_km, GeoPoint, EARTH_RADIUS_KM};
use gravity_core::model::GravityModel;
use gravity_core::network::{
    DuplicateFlowPolicy, FlowRecord, InteractionMatrixBuilder, NodeIndex, NodePair, PairMatrix,
    Point,
};
use gravity_core::types::{FitError, NetworkError};

fn cities() -> Vec<Point> {
    vec![
        Point::new("london", -0.1278, 51.5074),
        Point::new("paris", 2.3522, 48.8566),
        Point::new("brussels", 4.3517, 50.8503),
        Point::new("amsterdam", 4.9041, 52.3676),
        Point::new("unused", 13.4050, 52.5200),
    ]
}

fn city_flows() -> Vec<FlowRecord> {
    vec![
        FlowRecord::new("paris", "london", 520.0),
        FlowRecord::new("london", "brussels", 210.0),
        FlowRecord::new("brussels", "paris", 330.0),
        FlowRecord::new("amsterdam", "brussels", 290.0),
        FlowRecord::new("london", "amsterdam", 240.0),
        FlowRecord::new("paris", "amsterdam", 0.0),
    ]
}

// ========================================
// Module Export Tests
// ========================================

#[test]
fn test_constants_exported() {
    assert_eq!(EARTH_RADIUS_KM, 6371.0);
    assert_eq!(DEGENERATE_VARIANCE, 1e-8);
}

#[test]
fn test_standalone_types_usable() {
    let index = NodeIndex::from_ids(["x", "y"]);
    assert_eq!(index.position("y").unwrap(), 1);
    let mut m = PairMatrix::new(2);
    assert!(m.set(1, 0, 4.0));
    assert_eq!(m.get_pair(NodePair::new(0, 1).unwrap()), Some(4.0));
}

// ========================================
// End-to-End Tests
// ========================================

#[test]
fn test_city_network() {
    let matrix = InteractionMatrixBuilder::new(&cities())
        .build(&city_flows())
        .unwrap();

    // First-seen order; the unused point is left out
    assert_eq!(matrix.node_ids(), &["paris", "london", "brussels", "amsterdam"]);
    assert_eq!(matrix.node_count(), 4);
    assert_eq!(matrix.flow_record_count(), 6);
    // Zero flow recorded but not fitted
    assert_eq!(matrix.observed().len(), 6);
    assert_eq!(matrix.valid_pair_count(), 5);

    let london_paris = matrix.distance().get(0, 1).unwrap();
    assert!((london_paris - 343.5).abs() < 1.0);
    assert_relative_eq!(
        london_paris,
        haversine_distance(2.3522, 48.8566, -0.1278, 51.5074),
        epsilon = 1e-9
    );
}

#[test]
fn test_gravity_fit_on_city_network() {
    let matrix = InteractionMatrixBuilder::new(&cities())
        .build(&city_flows())
        .unwrap();
    let model = GravityModel::new(1.0);

    let uniform = model.score(&[1.0; 4], &matrix).unwrap();
    let predicted = model.predict_flows(&[1.0; 4], &matrix).unwrap();
    assert_relative_eq!(
        uniform,
        goodness_of_fit(&predicted, matrix.observed_flows()),
        epsilon = 1e-12
    );
    assert!((-1.0..=1.0).contains(&uniform));

    let diagnostic = model.predicted_matrix(&[1.0; 4], &matrix).unwrap();
    assert_eq!(diagnostic.len(), matrix.valid_pair_count());
}

#[test]
fn test_self_consistent_fit_is_perfect() {
    let points = cities();
    let masses = [900.0, 1000.0, 300.0, 450.0];
    let ids = ["paris", "london", "brussels", "amsterdam"];
    let position = |id: &str| {
        points
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.position())
            .unwrap()
    };
    let model = GravityModel::new(1.4);
    let mut flows = Vec::new();
    for i in 0..4 {
        for j in (i + 1)..4 {
            let d = haversine_km(position(ids[i]), position(ids[j]));
            flows.push(FlowRecord::new(ids[i], ids[j], model.predict(masses[i], masses[j], d)));
        }
    }
    let matrix = InteractionMatrixBuilder::new(&points).build(&flows).unwrap();
    assert_relative_eq!(model.score(&masses, &matrix).unwrap(), 1.0, epsilon = 1e-9);
}

// ========================================
// Error Surface Tests
// ========================================

#[test]
fn test_missing_point_named() {
    let flows = vec![FlowRecord::new("london", "rome", 10.0)];
    let err = InteractionMatrixBuilder::new(&cities())
        .build(&flows)
        .unwrap_err();
    assert_eq!(err, NetworkError::missing_point("rome"));
    assert!(err.to_string().contains("rome"));
}

#[test]
fn test_duplicate_policies_end_to_end() {
    let flows = vec![
        FlowRecord::new("london", "paris", 10.0),
        FlowRecord::new("paris", "london", 5.0),
    ];
    let replace = InteractionMatrixBuilder::new(&cities())
        .build(&flows)
        .unwrap();
    assert_eq!(replace.observed_flows(), &[5.0]);

    let sum = InteractionMatrixBuilder::new(&cities())
        .duplicate_policy(DuplicateFlowPolicy::Sum)
        .build(&flows)
        .unwrap();
    assert_eq!(sum.observed_flows(), &[15.0]);

    let reject = InteractionMatrixBuilder::new(&cities())
        .duplicate_policy(DuplicateFlowPolicy::Reject)
        .build(&flows);
    assert!(matches!(reject, Err(NetworkError::DuplicateFlow { .. })));
}

#[test]
fn test_strict_correlation_surfaces_degenerate() {
    let err = pearson_correlation(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]).unwrap_err();
    assert!(err.is_degenerate());
    assert_eq!(
        pearson_correlation::<f64>(&[], &[]).unwrap_err(),
        FitError::Empty
    );
    assert_eq!(goodness_of_fit(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]), 0.0);
    assert!(GeoPoint::new(0.0, 0.0).is_valid());
}
