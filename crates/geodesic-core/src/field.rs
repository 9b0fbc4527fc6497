// ─────────────────────────────────────────────────────────────────────
// SCPN Geodesic Core — Geodesic Vector Field
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Right-hand side of the geodesic equation as a first-order system.
//!
//! For the state `[x^μ, u^μ]` with `u^μ = dx^μ/dλ`:
//!   dx^μ/dλ = u^μ
//!   du^μ/dλ = -Γ^μ_{αβ} u^α u^β
//! expanded over the nonzero Schwarzschild symbols only.

use geodesic_math::rk45::OdeSystem;
use geodesic_types::config::UnitSystem;
use geodesic_types::state::{StateVector, PHI_DOT, R, R_DOT, THETA, THETA_DOT, T_DOT};

use crate::christoffel::schwarzschild_christoffels;

/// Geodesic vector field around a fixed central mass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeodesicField {
    mass: f64,
    units: UnitSystem,
}

impl GeodesicField {
    pub fn new(mass: f64, units: UnitSystem) -> Self {
        GeodesicField { mass, units }
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn units(&self) -> UnitSystem {
        self.units
    }

    /// d(state)/dλ at `state`.
    pub fn evaluate(&self, state: &StateVector) -> StateVector {
        let mut out = [0.0; 8];
        self.evaluate_into(state, &mut out);
        out
    }

    pub fn evaluate_into(&self, vec: &StateVector, vals: &mut StateVector) {
        let chl = schwarzschild_christoffels(vec[R], vec[THETA], self.mass, self.units);
        let (ut, ur, uth, uph) = (vec[T_DOT], vec[R_DOT], vec[THETA_DOT], vec[PHI_DOT]);

        vals[..4].copy_from_slice(&vec[4..]);
        vals[4] = -2.0 * chl.get(0, 0, 1) * ut * ur;
        vals[5] = -(chl.get(1, 0, 0) * ut * ut
            + chl.get(1, 1, 1) * ur * ur
            + chl.get(1, 2, 2) * uth * uth
            + chl.get(1, 3, 3) * uph * uph);
        vals[6] = -2.0 * chl.get(2, 2, 1) * uth * ur - chl.get(2, 3, 3) * uph * uph;
        vals[7] = -2.0 * (chl.get(3, 3, 1) * uph * ur + chl.get(3, 3, 2) * uph * uth);
    }
}

impl OdeSystem<8> for GeodesicField {
    fn rhs(&self, _lambda: f64, y: &[f64; 8], dydt: &mut [f64; 8]) {
        self.evaluate_into(y, dydt);
    }
}
