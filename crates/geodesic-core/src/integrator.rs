// ─────────────────────────────────────────────────────────────────────
// SCPN Geodesic Core — Bulk Trajectory Integrator
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Bulk geodesic integration: record every accepted step up to `end_lambda`.
//!
//! Loop body, per iteration:
//!   1. record the current `(λ, state)`
//!   2. advance the stepper by one adaptive step
//!   3. feed the new radius to the singularity monitor; halt if told to
//! The point that triggered a halt is not recorded.

use geodesic_math::coordinates::state_to_cartesian;
use geodesic_math::rk45::{AdaptiveStepper, Rk45};
use geodesic_types::config::{CoordinateFrame, TrajectoryConfig};
use geodesic_types::error::GeodesicResult;
use geodesic_types::state::{Trajectory, TrajectoryPoint, R};
use tracing::debug;

use crate::schwarzschild::Schwarzschild;
use crate::singularity::{SingularityAction, SingularityMonitor, WarningSink};

/// Drive `stepper` until its parameter reaches `end_lambda` or the monitor
/// halts, returning the recorded spherical samples.
pub fn collect_points<S, W>(
    stepper: &mut S,
    end_lambda: f64,
    monitor: &mut SingularityMonitor,
    sink: &mut W,
) -> GeodesicResult<Vec<TrajectoryPoint>>
where
    S: AdaptiveStepper<8> + ?Sized,
    W: WarningSink + ?Sized,
{
    let mut points = Vec::new();
    while stepper.lambda() < end_lambda {
        points.push(TrajectoryPoint {
            lambda: stepper.lambda(),
            state: *stepper.state(),
        });
        stepper.step()?;
        let action = monitor.observe(stepper.lambda(), stepper.state()[R], sink);
        if action == SingularityAction::Halt {
            break;
        }
    }
    Ok(points)
}

/// Convert recorded spherical samples into the requested output frame.
pub fn into_frame(mut points: Vec<TrajectoryPoint>, frame: CoordinateFrame) -> Vec<TrajectoryPoint> {
    if frame == CoordinateFrame::Cartesian {
        for p in &mut points {
            p.state = state_to_cartesian(&p.state);
        }
    }
    points
}

/// Integrate the geometry's initial state over `[start_lambda, end_lambda]`.
pub fn integrate<W: WarningSink + ?Sized>(
    geometry: &Schwarzschild,
    config: &TrajectoryConfig,
    sink: &mut W,
) -> GeodesicResult<Trajectory> {
    config.validate()?;

    let mut stepper = Rk45::new(
        geometry.field(),
        config.start_lambda,
        *geometry.initial_state(),
        config.end_lambda,
        &config.stepper,
    )?;
    let mut monitor =
        SingularityMonitor::new(geometry.schwarzschild_radius(), config.stop_on_singularity);

    debug!(
        start_lambda = config.start_lambda,
        end_lambda = config.end_lambda,
        r0 = geometry.initial_state()[R],
        "integrating geodesic"
    );

    let points = collect_points(&mut stepper, config.end_lambda, &mut monitor, sink)?;

    let stats = stepper.stats();
    debug!(
        points = points.len(),
        accepted = stats.accepted_steps,
        rejected = stats.rejected_steps,
        halted_at = ?monitor.reached_at(),
        "geodesic integration finished"
    );

    Ok(Trajectory::from_points(
        &into_frame(points, config.output),
        config.output,
        monitor.reached_at(),
    ))
}
