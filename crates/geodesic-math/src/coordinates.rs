// ─────────────────────────────────────────────────────────────────────
// SCPN Geodesic Core — Coordinate Transforms
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Spherical ↔ Cartesian conversion of positions and velocities.
//!
//! Spherical coordinates are `(r, θ, φ)` with θ the polar angle from +z and
//! φ the azimuth from +x. Velocities are mapped through the Jacobian of the
//! position map, so `(ṙ, θ̇, φ̇)` ↔ `(ẋ, ẏ, ż)`.
//!
//! The spherical → Cartesian direction is defined everywhere. The reverse
//! direction is undefined at the origin, and its velocity Jacobian is
//! undefined on the polar axis (x = y = 0).

use geodesic_types::state::StateVector;

/// `(r, θ, φ)` → `(x, y, z)`.
pub fn spherical_to_cartesian_pos(pos: [f64; 3]) -> [f64; 3] {
    let [r, theta, phi] = pos;
    let (sin_t, cos_t) = theta.sin_cos();
    let (sin_p, cos_p) = phi.sin_cos();
    [r * sin_t * cos_p, r * sin_t * sin_p, r * cos_t]
}

/// `(ṙ, θ̇, φ̇)` at `(r, θ, φ)` → `(ẋ, ẏ, ż)`.
pub fn spherical_to_cartesian_vel(pos: [f64; 3], vel: [f64; 3]) -> [f64; 3] {
    let [r, theta, phi] = pos;
    let [r_dot, theta_dot, phi_dot] = vel;
    let (sin_t, cos_t) = theta.sin_cos();
    let (sin_p, cos_p) = phi.sin_cos();
    [
        sin_t * cos_p * r_dot + r * cos_t * cos_p * theta_dot - r * sin_t * sin_p * phi_dot,
        sin_t * sin_p * r_dot + r * cos_t * sin_p * theta_dot + r * sin_t * cos_p * phi_dot,
        cos_t * r_dot - r * sin_t * theta_dot,
    ]
}

/// `(x, y, z)` → `(r, θ, φ)` with θ ∈ [0, π] and φ ∈ (-π, π].
pub fn cartesian_to_spherical_pos(pos: [f64; 3]) -> [f64; 3] {
    let [x, y, z] = pos;
    let rho = (x * x + y * y).sqrt();
    let r = (rho * rho + z * z).sqrt();
    let theta = rho.atan2(z);
    let phi = y.atan2(x);
    [r, theta, phi]
}

/// `(ẋ, ẏ, ż)` at `(x, y, z)` → `(ṙ, θ̇, φ̇)`.
pub fn cartesian_to_spherical_vel(pos: [f64; 3], vel: [f64; 3]) -> [f64; 3] {
    let [x, y, z] = pos;
    let [vx, vy, vz] = vel;
    let rho_sq = x * x + y * y;
    let r_sq = rho_sq + z * z;
    let r = r_sq.sqrt();
    let rho = rho_sq.sqrt();
    let planar = x * vx + y * vy;
    [
        (planar + z * vz) / r,
        (z * planar - rho_sq * vz) / (r_sq * rho),
        (x * vy - y * vx) / rho_sq,
    ]
}

/// Combined position and velocity transform, spherical → Cartesian.
pub fn spherical_to_cartesian(pos: [f64; 3], vel: [f64; 3]) -> ([f64; 3], [f64; 3]) {
    (
        spherical_to_cartesian_pos(pos),
        spherical_to_cartesian_vel(pos, vel),
    )
}

/// Combined position and velocity transform, Cartesian → spherical.
pub fn cartesian_to_spherical(pos: [f64; 3], vel: [f64; 3]) -> ([f64; 3], [f64; 3]) {
    (
        cartesian_to_spherical_pos(pos),
        cartesian_to_spherical_vel(pos, vel),
    )
}

/// Map a spherical state vector to Cartesian form.
/// Components 0 (t) and 4 (dt/dλ) pass through unchanged.
pub fn state_to_cartesian(state: &StateVector) -> StateVector {
    let pos = [state[1], state[2], state[3]];
    let vel = [state[5], state[6], state[7]];
    let (p, v) = spherical_to_cartesian(pos, vel);
    [state[0], p[0], p[1], p[2], state[4], v[0], v[1], v[2]]
}

/// Map a Cartesian state vector to spherical form.
pub fn state_to_spherical(state: &StateVector) -> StateVector {
    let pos = [state[1], state[2], state[3]];
    let vel = [state[5], state[6], state[7]];
    let (p, v) = cartesian_to_spherical(pos, vel);
    [state[0], p[0], p[1], p[2], state[4], v[0], v[1], v[2]]
}
