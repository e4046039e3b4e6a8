//! Integration tests for gravity_optimiser.
//!
//! Runs full calibrations on small synthetic networks through the public API.

use gravity_core::math::geo::haversine_km;
use gravity_core::model::GravityModel;
use gravity_core::network::{FlowRecord, InteractionMatrix, InteractionMatrixBuilder, Point};
use gravity_optimiser::prelude::*;

/// Eight towns strung out over roughly 200 to 1900 km, with flows generated
/// by the gravity law at β = 1. Masses sit in a narrow band so distance
/// decay, not mass, drives the flow pattern.
fn synthetic_network() -> (InteractionMatrix, [f64; 8]) {
    let points = vec![
        Point::new("A", 0.0, 0.0),
        Point::new("B", 1.5, 1.0),
        Point::new("C", 4.0, -1.0),
        Point::new("D", 7.0, 2.5),
        Point::new("E", 10.0, -0.5),
        Point::new("F", 12.5, 3.0),
        Point::new("G", 15.0, 0.0),
        Point::new("H", 17.0, 2.0),
    ];
    let truth = [800.0, 650.0, 900.0, 500.0, 700.0, 600.0, 850.0, 550.0];
    let model = GravityModel::new(1.0);

    let mut flows = Vec::new();
    for i in 0..points.len() {
        for j in (i + 1)..points.len() {
            let d = haversine_km(points[i].position(), points[j].position());
            flows.push(FlowRecord::new(
                points[i].id.clone(),
                points[j].id.clone(),
                model.predict(truth[i], truth[j], d),
            ));
        }
    }
    let matrix = InteractionMatrixBuilder::new(&points).build(&flows).unwrap();
    (matrix, truth)
}

fn recovery_config(betas: Vec<f64>) -> SweepConfig {
    // Score threshold above 1 so every β gets the same iteration budget
    SweepConfig::builder()
        .pso(
            PsoConfig::high_precision()
                .with_particle_count(100)
                .with_max_iterations(100)
                .with_convergence(-1.0, 1.5)
                .with_seed(2024),
        )
        .betas(BetaGrid::Values(betas))
        .build()
}

// ========================================
// Calibration Quality
// ========================================

#[test]
fn test_recovers_synthetic_gravity_flows() {
    let (matrix, truth) = synthetic_network();
    assert_eq!(matrix.valid_pair_count(), 28);
    let shortest = matrix.pair_distances().iter().copied().fold(f64::INFINITY, f64::min);
    let longest = matrix.pair_distances().iter().copied().fold(0.0, f64::max);
    assert!(shortest > 150.0 && longest > 1800.0);
    // The generating masses score perfectly
    let perfect = GravityModel::new(1.0).score(&truth, &matrix).unwrap();
    assert!(perfect > 0.999999);

    let result = CalibrationSweep::new(recovery_config(vec![0.1, 0.5, 1.0, 1.5]))
        .run(&matrix)
        .unwrap();

    assert_eq!(result.runs.len(), 4);
    assert_eq!(result.best_beta, 1.0);
    let at_truth = result.run_for(1.0).unwrap().score;
    assert!(at_truth >= 0.999, "score at beta 1 = {}", at_truth);
    for beta in [0.1, 0.5, 1.5] {
        let other = result.run_for(beta).unwrap().score;
        assert!(at_truth > other, "beta {} scored {} vs {}", beta, other, at_truth);
    }
    assert!(at_truth - result.run_for(0.1).unwrap().score > 0.005);
    assert!(result
        .best_masses
        .iter()
        .all(|m| (0.0..=1000.0).contains(m)));
}

#[test]
fn test_two_point_network_is_degenerate() {
    let points = vec![Point::new("A", 0.0, 0.0), Point::new("B", 1.0, 1.0)];
    let flows = vec![FlowRecord::new("A", "B", 100.0)];
    let matrix = InteractionMatrixBuilder::new(&points).build(&flows).unwrap();

    let config = SweepConfig::builder()
        .pso(PsoConfig::fast().with_particle_count(20).with_seed(5))
        .betas(BetaGrid::Values(vec![1.0]))
        .build();
    let result = CalibrationSweep::new(config).run(&matrix).unwrap();

    // One pair has no variance, so every candidate scores zero
    assert_eq!(result.best_score, 0.0);
    assert_eq!(result.best_masses.len(), 2);
    assert!(result
        .best_masses
        .iter()
        .all(|m| (0.0..=1000.0).contains(m)));
    assert_ne!(result.runs[0].termination, TerminationReason::ConvergedByScore);
}

#[test]
fn test_best_is_max_over_default_style_grid() {
    let (matrix, _) = synthetic_network();
    let config = SweepConfig::builder()
        .pso(
            PsoConfig::fast()
                .with_particle_count(15)
                .with_max_iterations(10)
                .with_seed(8),
        )
        .betas(BetaGrid::range(0.5, 2.5, 0.5))
        .build();
    let result = CalibrationSweep::new(config).run(&matrix).unwrap();

    assert_eq!(result.runs.len(), 5);
    let scores = result.per_beta_scores();
    let (first_best, max) = scores
        .iter()
        .fold((0.0, f64::NEG_INFINITY), |acc, &(b, s)| if s > acc.1 { (b, s) } else { acc });
    assert_eq!(result.best_score, max);
    assert_eq!(result.best_beta, first_best);
    assert_eq!(result.node_masses().len(), 8);
}

// ========================================
// Determinism
// ========================================

#[test]
fn test_same_seed_same_sweep_regardless_of_threading() {
    let (matrix, _) = synthetic_network();
    let base = PsoConfig::fast()
        .with_particle_count(25)
        .with_max_iterations(30)
        .with_seed(77);

    let sequential = SweepConfig::builder()
        .pso(base.clone().with_parallel(false))
        .betas(BetaGrid::Values(vec![0.5, 1.0, 1.5]))
        .build();
    let threaded = SweepConfig::builder()
        .pso(base.with_parallel(true))
        .betas(BetaGrid::Values(vec![0.5, 1.0, 1.5]))
        .parallel_betas(true)
        .build();

    let a = CalibrationSweep::new(sequential).run(&matrix).unwrap();
    let b = CalibrationSweep::new(threaded).run(&matrix).unwrap();
    assert_eq!(a, b);
}

// ========================================
// Errors and Cancellation
// ========================================

#[test]
fn test_invalid_config_rejected() {
    let (matrix, _) = synthetic_network();
    let config = SweepConfig::new().with_pso(PsoConfig::default().with_search_range(-1.0));
    let err = CalibrationSweep::new(config).run(&matrix).unwrap_err();
    assert!(err.is_config());
}

#[test]
fn test_pre_cancelled_sweep_returns_cancelled() {
    let (matrix, _) = synthetic_network();
    let token = CancellationToken::new();
    token.cancel();
    let err = CalibrationSweep::new(recovery_config(vec![0.5, 1.0]))
        .run_with_cancel(&matrix, &token)
        .unwrap_err();
    assert!(err.is_cancelled());
}

#[test]
fn test_single_swarm_from_public_api() {
    let (matrix, truth) = synthetic_network();
    let seed = seed_masses(&matrix, 1000.0).unwrap();
    assert_eq!(seed.iter().copied().fold(0.0, f64::max), 1000.0);

    let result = ParticleSwarmOptimizer::new(PsoConfig::fast().with_seed(1))
        .optimise(&matrix, 1.0, &seed)
        .unwrap();
    assert_eq!(result.best_masses.len(), truth.len());
    assert!(result.history.windows(2).all(|w| w[1] >= w[0]));
}
