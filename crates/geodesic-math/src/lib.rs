//! Mathematical primitives for SCPN Geodesic Core.

pub mod coordinates;
pub mod rk45;
