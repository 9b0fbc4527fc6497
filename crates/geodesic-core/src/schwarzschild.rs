// ─────────────────────────────────────────────────────────────────────
// SCPN Geodesic Core — Schwarzschild Geometry
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Test-particle initial conditions around a Schwarzschild mass.
//!
//! A [`Schwarzschild`] value owns the mass, unit system and the normalized
//! initial state vector. It is immutable; every trajectory computation works
//! on its own stepper seeded from a copy of the initial state.

use geodesic_math::coordinates::cartesian_to_spherical;
use geodesic_types::config::{
    CoordinateFrame, InitialConditions, StreamConfig, TrajectoryConfig, UnitSystem,
};
use geodesic_types::error::{GeodesicError, GeodesicResult};
use geodesic_types::state::{StateVector, Trajectory};

use crate::field::GeodesicField;
use crate::integrator;
use crate::singularity::{TracingSink, WarningSink};
use crate::stream::TrajectoryStream;

/// Schwarzschild spacetime plus one test particle's initial state.
#[derive(Debug, Clone, PartialEq)]
pub struct Schwarzschild {
    mass: f64,
    units: UnitSystem,
    schwarzschild_radius: f64,
    initial_state: StateVector,
    input_frame: CoordinateFrame,
}

fn validate_finite(values: &[f64], label: &str) -> GeodesicResult<()> {
    if values.iter().any(|v| !v.is_finite()) {
        return Err(GeodesicError::PhysicsViolation(format!(
            "{label} components must be finite"
        )));
    }
    Ok(())
}

/// dt/dλ that makes the 4-velocity timelike with unit proper-time norm:
///   g_{μν} u^μ u^ν = -c²
/// so that λ tracks proper time.
pub fn time_velocity(pos: [f64; 3], vel: [f64; 3], mass: f64, units: UnitSystem) -> f64 {
    let [r, theta, _] = pos;
    let [r_dot, theta_dot, phi_dot] = vel;
    let c = units.speed_of_light();
    let c2 = c * c;
    let f = 1.0 - units.schwarzschild_radius(mass) / r;
    let sin_t = theta.sin();

    let spatial = r_dot * r_dot / f
        + r * r * theta_dot * theta_dot
        + r * r * sin_t * sin_t * phi_dot * phi_dot;
    ((c2 + spatial) / (f * c2)).sqrt()
}

impl Schwarzschild {
    /// Build from spherical `(r, θ, φ)` position and `(ṙ, θ̇, φ̇)` velocity.
    /// θ must be off the polar axis.
    pub fn from_spherical(
        pos: [f64; 3],
        vel: [f64; 3],
        time: f64,
        mass: f64,
        units: UnitSystem,
    ) -> GeodesicResult<Self> {
        Self::build(pos, vel, time, mass, units, CoordinateFrame::Spherical)
    }

    /// Build from Cartesian `(x, y, z)` position and velocity.
    /// The position must not lie on the polar axis.
    pub fn from_cartesian(
        pos: [f64; 3],
        vel: [f64; 3],
        time: f64,
        mass: f64,
        units: UnitSystem,
    ) -> GeodesicResult<Self> {
        validate_finite(&pos, "position")?;
        validate_finite(&vel, "velocity")?;
        if pos[0] == 0.0 && pos[1] == 0.0 {
            return Err(GeodesicError::PhysicsViolation(
                "Cartesian position on the polar axis has no spherical velocity".to_string(),
            ));
        }
        let (sp_pos, sp_vel) = cartesian_to_spherical(pos, vel);
        Self::build(sp_pos, sp_vel, time, mass, units, CoordinateFrame::Cartesian)
    }

    pub fn from_initial_conditions(ic: &InitialConditions) -> GeodesicResult<Self> {
        match ic.frame {
            CoordinateFrame::Spherical => {
                Self::from_spherical(ic.position, ic.velocity, ic.time, ic.mass, ic.units)
            }
            CoordinateFrame::Cartesian => {
                Self::from_cartesian(ic.position, ic.velocity, ic.time, ic.mass, ic.units)
            }
        }
    }

    fn build(
        pos: [f64; 3],
        vel: [f64; 3],
        time: f64,
        mass: f64,
        units: UnitSystem,
        input_frame: CoordinateFrame,
    ) -> GeodesicResult<Self> {
        if !mass.is_finite() || mass <= 0.0 {
            return Err(GeodesicError::PhysicsViolation(format!(
                "mass must be finite and > 0, got {mass}"
            )));
        }
        if !time.is_finite() {
            return Err(GeodesicError::PhysicsViolation(format!(
                "start time must be finite, got {time}"
            )));
        }
        validate_finite(&pos, "position")?;
        validate_finite(&vel, "velocity")?;
        if pos[0] <= 0.0 {
            return Err(GeodesicError::PhysicsViolation(format!(
                "radial coordinate must be > 0, got {}",
                pos[0]
            )));
        }

        if pos[1].sin().abs() < f64::EPSILON {
            return Err(GeodesicError::PhysicsViolation(format!(
                "polar angle {} lies on the polar axis",
                pos[1]
            )));
        }

        let schwarzschild_radius = units.schwarzschild_radius(mass);
        if pos[0] == schwarzschild_radius {
            return Err(GeodesicError::PhysicsViolation(
                "initial radius coincides with the Schwarzschild radius".to_string(),
            ));
        }

        let t_dot = time_velocity(pos, vel, mass, units);
        if !t_dot.is_finite() || t_dot <= 0.0 {
            return Err(GeodesicError::PhysicsViolation(format!(
                "initial state at r={} cannot be normalized to a timelike geodesic",
                pos[0]
            )));
        }

        Ok(Schwarzschild {
            mass,
            units,
            schwarzschild_radius,
            initial_state: [
                time, pos[0], pos[1], pos[2], t_dot, vel[0], vel[1], vel[2],
            ],
            input_frame,
        })
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn units(&self) -> UnitSystem {
        self.units
    }

    pub fn schwarzschild_radius(&self) -> f64 {
        self.schwarzschild_radius
    }

    /// `[t, r, θ, φ, ṫ, ṙ, θ̇, φ̇]` at the start of every computation.
    pub fn initial_state(&self) -> &StateVector {
        &self.initial_state
    }

    /// Frame the initial conditions were supplied in.
    pub fn input_frame(&self) -> CoordinateFrame {
        self.input_frame
    }

    pub fn field(&self) -> GeodesicField {
        GeodesicField::new(self.mass, self.units)
    }

    /// g_{μν} u^μ u^ν of a spherical state, -c² for a normalized timelike state.
    pub fn norm(&self, state: &StateVector) -> f64 {
        let c = self.units.speed_of_light();
        let (r, theta) = (state[1], state[2]);
        let f = 1.0 - self.schwarzschild_radius / r;
        let sin_t = theta.sin();
        -f * c * c * state[4] * state[4]
            + state[5] * state[5] / f
            + r * r * state[6] * state[6]
            + r * r * sin_t * sin_t * state[7] * state[7]
    }

    /// Integrate from `start_lambda` to `end_lambda`, warnings via `tracing`.
    pub fn calculate_trajectory(&self, config: &TrajectoryConfig) -> GeodesicResult<Trajectory> {
        integrator::integrate(self, config, &mut TracingSink)
    }

    /// Integrate from `start_lambda` to `end_lambda`, warnings into `sink`.
    pub fn calculate_trajectory_with_sink<W: WarningSink + ?Sized>(
        &self,
        config: &TrajectoryConfig,
        sink: &mut W,
    ) -> GeodesicResult<Trajectory> {
        integrator::integrate(self, config, sink)
    }

    /// Lazy, unbounded trajectory, warnings via `tracing`.
    pub fn calculate_trajectory_iterator(
        &self,
        config: &StreamConfig,
    ) -> GeodesicResult<TrajectoryStream<TracingSink>> {
        TrajectoryStream::from_geometry(self, config, TracingSink)
    }

    /// Lazy, unbounded trajectory that owns `sink`.
    pub fn calculate_trajectory_iterator_with_sink<W: WarningSink>(
        &self,
        config: &StreamConfig,
        sink: W,
    ) -> GeodesicResult<TrajectoryStream<W>> {
        TrajectoryStream::from_geometry(self, config, sink)
    }
}
