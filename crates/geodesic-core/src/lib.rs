// ─────────────────────────────────────────────────────────────────────
// SCPN Geodesic Core — Geodesic Engine
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Schwarzschild geodesic engine.
//!
//! Christoffel symbols → geodesic vector field → adaptive RK45 stepping,
//! exposed as bulk trajectories and as a lazy stream, with a one-shot
//! singularity-proximity warning.
//!
//! ```
//! use geodesic_core::schwarzschild::Schwarzschild;
//! use geodesic_types::config::{TrajectoryConfig, UnitSystem};
//!
//! let geometry = Schwarzschild::from_spherical(
//!     [50.0, std::f64::consts::FRAC_PI_2, 0.0],
//!     [-0.1, 0.0, 0.0],
//!     0.0,
//!     1.0,
//!     UnitSystem::Geometrized,
//! )
//! .unwrap();
//! let traj = geometry
//!     .calculate_trajectory(&TrajectoryConfig { end_lambda: 5.0, ..Default::default() })
//!     .unwrap();
//! assert_eq!(traj.lambdas[0], 0.0);
//! ```

pub mod christoffel;
pub mod field;
pub mod integrator;
pub mod schwarzschild;
pub mod singularity;
pub mod stream;

pub use schwarzschild::Schwarzschild;
pub use stream::TrajectoryStream;
