// ─────────────────────────────────────────────────────────────────────
// SCPN Geodesic Core — State
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use ndarray::{Array1, Array2, ArrayView1};

use crate::config::{CoordinateFrame, UnitSystem};

/// `[t, x1, x2, x3, dt/dλ, dx1/dλ, dx2/dλ, dx3/dλ]`.
/// In the spherical frame `(x1, x2, x3) = (r, θ, φ)`.
pub type StateVector = [f64; 8];

/// Number of components in a [`StateVector`].
pub const STATE_DIM: usize = 8;

pub const T: usize = 0;
pub const R: usize = 1;
pub const THETA: usize = 2;
pub const PHI: usize = 3;
pub const T_DOT: usize = 4;
pub const R_DOT: usize = 5;
pub const THETA_DOT: usize = 6;
pub const PHI_DOT: usize = 7;

/// One trajectory sample: affine parameter and state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryPoint {
    pub lambda: f64,
    pub state: StateVector,
}

impl TrajectoryPoint {
    pub fn position(&self) -> [f64; 3] {
        [self.state[1], self.state[2], self.state[3]]
    }

    pub fn velocity(&self) -> [f64; 3] {
        [self.state[5], self.state[6], self.state[7]]
    }
}

/// Materialized trajectory from a bulk integration.
/// `lambdas` has shape `[n]`, `states` has shape `[n, 8]`.
#[derive(Debug, Clone)]
pub struct Trajectory {
    pub lambdas: Array1<f64>,
    pub states: Array2<f64>,
    /// Representation of the position/velocity sub-vectors.
    pub frame: CoordinateFrame,
    /// Affine parameter at which r first fell to the singularity threshold.
    pub singularity_lambda: Option<f64>,
}

impl Trajectory {
    /// Assemble from recorded samples. The states must already be in `frame`.
    pub fn from_points(
        points: &[TrajectoryPoint],
        frame: CoordinateFrame,
        singularity_lambda: Option<f64>,
    ) -> Self {
        let lambdas = Array1::from_iter(points.iter().map(|p| p.lambda));
        let states = Array2::from_shape_fn((points.len(), STATE_DIM), |(i, k)| points[i].state[k]);
        Trajectory {
            lambdas,
            states,
            frame,
            singularity_lambda,
        }
    }

    pub fn len(&self) -> usize {
        self.lambdas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lambdas.is_empty()
    }

    pub fn state(&self, index: usize) -> Option<ArrayView1<'_, f64>> {
        (index < self.len()).then(|| self.states.row(index))
    }

    pub fn point(&self, index: usize) -> Option<TrajectoryPoint> {
        let row = self.state(index)?;
        let mut state = [0.0; STATE_DIM];
        for (dst, src) in state.iter_mut().zip(row.iter()) {
            *dst = *src;
        }
        Some(TrajectoryPoint {
            lambda: self.lambdas[index],
            state,
        })
    }

    pub fn points(&self) -> impl Iterator<Item = TrajectoryPoint> + '_ {
        (0..self.len()).filter_map(move |i| self.point(i))
    }

    pub fn last_point(&self) -> Option<TrajectoryPoint> {
        self.len().checked_sub(1).and_then(|i| self.point(i))
    }

    /// Column `component` of the state matrix.
    pub fn component(&self, component: usize) -> Option<ArrayView1<'_, f64>> {
        (component < STATE_DIM).then(|| self.states.column(component))
    }

    /// Unit labels of the eight state components in this trajectory's frame.
    pub fn component_units(&self, units: UnitSystem) -> [&'static str; STATE_DIM] {
        component_units(self.frame, units)
    }
}

/// Unit labels of the eight state components for a frame and unit system.
pub fn component_units(frame: CoordinateFrame, units: UnitSystem) -> [&'static str; STATE_DIM] {
    match (units, frame) {
        (UnitSystem::Si, CoordinateFrame::Spherical) => {
            ["s", "m", "rad", "rad", "1", "m/s", "rad/s", "rad/s"]
        }
        (UnitSystem::Si, CoordinateFrame::Cartesian) => {
            ["s", "m", "m", "m", "1", "m/s", "m/s", "m/s"]
        }
        (UnitSystem::Geometrized, CoordinateFrame::Spherical) => {
            ["M", "M", "rad", "rad", "1", "1", "rad/M", "rad/M"]
        }
        (UnitSystem::Geometrized, CoordinateFrame::Cartesian) => {
            ["M", "M", "M", "M", "1", "1", "1", "1"]
        }
    }
}
