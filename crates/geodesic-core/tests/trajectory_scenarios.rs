// ─────────────────────────────────────────────────────────────────────
// SCPN Geodesic Core — End-to-End Trajectory Scenarios
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Full bulk and streaming integrations around a unit geometrized mass
//! (r_s = 2) plus one SI weak-field orbit.

use std::f64::consts::FRAC_PI_2;
use std::path::PathBuf;

use geodesic_core::schwarzschild::Schwarzschild;
use geodesic_core::singularity::RecordingSink;
use geodesic_math::coordinates::state_to_cartesian;
use geodesic_types::config::{
    CoordinateFrame, InitialConditions, StepperConfig, StreamConfig, TrajectoryConfig, UnitSystem,
};
use geodesic_types::error::GeodesicError;
use geodesic_types::state::{Trajectory, TrajectoryPoint, PHI, R};

const GEO: UnitSystem = UnitSystem::Geometrized;

fn config_path(name: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("configs")
        .join(name)
        .to_string_lossy()
        .to_string()
}

fn radial(r0: f64, r_dot: f64) -> Schwarzschild {
    Schwarzschild::from_spherical([r0, FRAC_PI_2, 0.0], [r_dot, 0.0, 0.0], 0.0, 1.0, GEO).unwrap()
}

fn bulk(end_lambda: f64, stop: bool) -> TrajectoryConfig {
    TrajectoryConfig {
        start_lambda: 0.0,
        end_lambda,
        stop_on_singularity: stop,
        ..Default::default()
    }
}

fn run(geometry: &Schwarzschild, config: &TrajectoryConfig) -> (Trajectory, RecordingSink) {
    let mut sink = RecordingSink::new();
    let traj = geometry
        .calculate_trajectory_with_sink(config, &mut sink)
        .unwrap();
    (traj, sink)
}

// ── Bulk integration ─────────────────────────────────────────────────

#[test]
fn test_radial_infall_from_config_files() {
    let ic = InitialConditions::from_file(&config_path("radial_infall.json")).unwrap();
    let cfg = TrajectoryConfig::from_file(&config_path("radial_infall_trajectory.json")).unwrap();
    let geometry = Schwarzschild::from_initial_conditions(&ic).unwrap();
    let (traj, sink) = run(&geometry, &cfg);

    assert!(traj.len() > 10 && traj.len() < 100, "len = {}", traj.len());
    assert_eq!(traj.lambdas[0], 0.0);
    assert_eq!(traj.states[[0, R]], 50.0);
    assert_eq!(sink.count(), 1);

    let r = traj.component(R).unwrap();
    for w in r.windows(2) {
        assert!(w[1] <= w[0], "r increased: {} -> {}", w[0], w[1]);
    }
    let last = traj.last_point().unwrap();
    assert!(last.state[R] > 2.002 && last.state[R] < 2.1, "r_last = {}", last.state[R]);
    assert!(last.lambda < cfg.end_lambda);

    let halted_at = traj.singularity_lambda.unwrap();
    assert!(halted_at > last.lambda);
    assert_eq!(sink.warnings[0].lambda, halted_at);
}

#[test]
fn test_lambdas_strictly_increase_within_range() {
    let geometry = radial(10.0, 0.5);
    let cfg = TrajectoryConfig {
        start_lambda: 5.0,
        end_lambda: 55.0,
        ..Default::default()
    };
    let (traj, sink) = run(&geometry, &cfg);
    assert_eq!(traj.lambdas[0], 5.0);
    for w in traj.lambdas.windows(2) {
        assert!(w[1] > w[0]);
    }
    assert!(traj.lambdas.iter().all(|&l| l < 55.0));
    assert!(traj.singularity_lambda.is_none());
    assert_eq!(sink.count(), 0);
}

#[test]
fn test_outgoing_particle_preserves_norm() {
    let geometry = radial(10.0, 0.5);
    let (traj, _) = run(&geometry, &bulk(50.0, true));
    let last = traj.last_point().unwrap();
    assert!(last.state[R] > 15.0);
    for p in traj.points() {
        let norm = geometry.norm(&p.state);
        assert!((norm + 1.0).abs() < 1e-4, "norm = {norm} at lambda {}", p.lambda);
    }
}

#[test]
fn test_circular_orbit_keeps_radius() {
    let r0: f64 = 10.0;
    let phi_dot = (1.0 / (r0.powi(3) - 3.0 * r0 * r0)).sqrt();
    let geometry =
        Schwarzschild::from_spherical([r0, FRAC_PI_2, 0.0], [0.0, 0.0, phi_dot], 0.0, 1.0, GEO)
            .unwrap();
    let (traj, sink) = run(&geometry, &bulk(100.0, true));
    assert_eq!(sink.count(), 0);
    for p in traj.points() {
        assert!((p.state[R] - r0).abs() < 1e-6, "r = {}", p.state[R]);
    }
    let phi = traj.component(PHI).unwrap();
    assert!(phi[phi.len() - 1] > phi[0]);
}

#[test]
fn test_cartesian_output_matches_converted_spherical_run() {
    let geometry =
        Schwarzschild::from_spherical([12.0, 1.2, 0.3], [-0.05, 0.001, 0.02], 0.0, 1.0, GEO)
            .unwrap();
    let sph_cfg = bulk(40.0, true);
    let cart_cfg = TrajectoryConfig {
        output: CoordinateFrame::Cartesian,
        ..sph_cfg
    };
    let (sph, _) = run(&geometry, &sph_cfg);
    let (cart, _) = run(&geometry, &cart_cfg);

    assert_eq!(cart.frame, CoordinateFrame::Cartesian);
    assert_eq!(sph.len(), cart.len());
    for (s, c) in sph.points().zip(cart.points()) {
        assert_eq!(s.lambda, c.lambda);
        assert_eq!(state_to_cartesian(&s.state), c.state);
    }
}

#[test]
fn test_start_inside_threshold_halts_after_initial_point() {
    let geometry = radial(1.9, -1.0);
    let (traj, sink) = run(&geometry, &bulk(0.8, true));
    assert_eq!(traj.len(), 1);
    assert_eq!(traj.states[[0, R]], 1.9);
    assert_eq!(sink.count(), 1);
}

#[test]
fn test_start_inside_threshold_continues_with_single_warning() {
    let geometry = radial(1.9, -1.0);
    let (traj, sink) = run(&geometry, &bulk(0.8, false));
    assert!(traj.len() > 1);
    assert_eq!(sink.count(), 1);
    assert!(traj.singularity_lambda.is_some());
}

#[test]
fn test_halting_run_is_prefix_of_continuing_run() {
    let geometry = radial(2.01, 0.0);
    let (halted, halted_sink) = run(&geometry, &bulk(0.27, true));
    let (full, full_sink) = run(&geometry, &bulk(0.27, false));

    assert_eq!(halted_sink.count(), 1);
    assert_eq!(full_sink.count(), 1);
    assert!(halted.len() < full.len());
    for (h, f) in halted.points().zip(full.points()) {
        assert_eq!(h, f);
    }
    assert_eq!(halted.singularity_lambda, full.singularity_lambda);
}

#[test]
fn test_repeated_calls_are_independent() {
    let geometry = radial(2.01, 0.0);
    let cfg = bulk(0.27, false);
    let (a, sink_a) = run(&geometry, &cfg);
    let (b, sink_b) = run(&geometry, &cfg);
    assert_eq!(a.lambdas, b.lambdas);
    assert_eq!(a.states, b.states);
    assert_eq!(sink_a.count(), 1);
    assert_eq!(sink_b.count(), 1);
}

#[test]
fn test_tracing_entry_point_matches_sink_entry_point() {
    let geometry = radial(10.0, 0.5);
    let cfg = bulk(20.0, true);
    let (with_sink, _) = run(&geometry, &cfg);
    let plain = geometry.calculate_trajectory(&cfg).unwrap();
    assert_eq!(plain.states, with_sink.states);
}

#[test]
fn test_invalid_configs_are_rejected() {
    let geometry = radial(10.0, 0.0);
    let reversed = TrajectoryConfig {
        start_lambda: 5.0,
        end_lambda: 1.0,
        ..Default::default()
    };
    assert!(matches!(
        geometry.calculate_trajectory(&reversed),
        Err(GeodesicError::ConfigError(_))
    ));
    let zero_step = TrajectoryConfig {
        stepper: StepperConfig::with_step_size(0.0),
        ..Default::default()
    };
    assert!(matches!(
        geometry.calculate_trajectory(&zero_step),
        Err(GeodesicError::ConfigError(_))
    ));
    let nan_start = StreamConfig {
        start_lambda: f64::NAN,
        ..Default::default()
    };
    assert!(geometry.calculate_trajectory_iterator(&nan_start).is_err());
}

#[test]
fn test_si_weak_field_orbit_stays_near_initial_radius() {
    let ic = InitialConditions::from_file(&config_path("earth_orbit_si.json")).unwrap();
    let geometry = Schwarzschild::from_initial_conditions(&ic).unwrap();
    assert_eq!(geometry.input_frame(), CoordinateFrame::Cartesian);
    assert!((geometry.schwarzschild_radius() - 8.87e-3).abs() < 1e-4);

    let (traj, sink) = run(&geometry, &bulk(60.0, true));
    assert_eq!(sink.count(), 0);
    for p in traj.points() {
        assert!((p.state[R] - 7.0e6).abs() / 7.0e6 < 1e-2, "r = {}", p.state[R]);
    }
}

// ── Streaming ────────────────────────────────────────────────────────

#[test]
fn test_stream_reproduces_bulk_points() {
    let geometry = radial(10.0, 0.5);
    let (traj, _) = run(&geometry, &bulk(50.0, true));
    let stream = geometry
        .calculate_trajectory_iterator(&StreamConfig::default())
        .unwrap();
    let streamed: Vec<TrajectoryPoint> = stream.take(traj.len()).map(|p| p.unwrap()).collect();
    let bulk_points: Vec<TrajectoryPoint> = traj.points().collect();
    assert_eq!(streamed, bulk_points);
}

#[test]
fn test_stream_halts_like_bulk_on_infall() {
    let geometry = radial(50.0, -0.1);
    let (traj, _) = run(&geometry, &bulk(1000.0, true));

    let mut stream = geometry
        .calculate_trajectory_iterator_with_sink(&StreamConfig::default(), RecordingSink::new())
        .unwrap();
    let streamed: Vec<TrajectoryPoint> = stream.by_ref().map(|p| p.unwrap()).collect();
    assert_eq!(streamed, traj.points().collect::<Vec<_>>());
    assert!(!stream.has_more());
    assert_eq!(stream.singularity_lambda(), traj.singularity_lambda);
    assert_eq!(stream.into_sink().count(), 1);
}

#[test]
fn test_stream_without_stop_runs_past_threshold() {
    let geometry = radial(2.01, 0.0);
    let cfg = StreamConfig {
        stop_on_singularity: false,
        ..Default::default()
    };
    let mut stream = geometry
        .calculate_trajectory_iterator_with_sink(&cfg, RecordingSink::new())
        .unwrap();
    let pts: Vec<TrajectoryPoint> = stream.by_ref().take(8).map(|p| p.unwrap()).collect();
    assert_eq!(pts.len(), 8);
    assert!(pts.last().unwrap().state[R] < 2.002);
    assert_eq!(stream.sink().count(), 1);
}

#[test]
fn test_stream_starts_at_configured_lambda_in_cartesian() {
    let geometry = radial(10.0, 0.0);
    let cfg = StreamConfig {
        start_lambda: 3.0,
        output: CoordinateFrame::Cartesian,
        ..Default::default()
    };
    let mut stream = geometry.calculate_trajectory_iterator(&cfg).unwrap();
    let first = stream.next().unwrap().unwrap();
    assert_eq!(first.lambda, 3.0);
    assert_eq!(first.state, state_to_cartesian(geometry.initial_state()));
    assert!(stream.next().unwrap().unwrap().lambda > 3.0);
}

#[test]
fn test_stream_config_from_partial_json() {
    let cfg: StreamConfig =
        serde_json::from_str(r#"{"stop_on_singularity": false, "output": "cartesian"}"#).unwrap();
    assert_eq!(cfg.start_lambda, 0.0);
    let geometry = radial(1.9, -1.0);
    let mut stream = geometry
        .calculate_trajectory_iterator_with_sink(&cfg, RecordingSink::new())
        .unwrap();
    assert_eq!(stream.by_ref().take(3).filter(Result::is_ok).count(), 3);
    assert_eq!(stream.sink().count(), 1);
}

#[test]
fn test_infall_past_horizon_diverges_with_stepper_failure() {
    let geometry = radial(1.9, -1.0);
    let mut sink = RecordingSink::new();
    let err = geometry
        .calculate_trajectory_with_sink(&bulk(2.0, false), &mut sink)
        .unwrap_err();
    match err {
        GeodesicError::StepperFailure { lambda, .. } => {
            assert!(lambda > 0.0 && lambda < 2.0, "lambda = {lambda}");
        }
        other => panic!("expected StepperFailure, got {other:?}"),
    }
    assert_eq!(sink.count(), 1);
}
