// ─────────────────────────────────────────────────────────────────────
// SCPN Geodesic Core — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
/// Newtonian gravitational constant (m^3 kg^-1 s^-2), CODATA 2018.
pub const G_SI: f64 = 6.674_30e-11;

/// Speed of light in vacuum (m/s), exact.
pub const C_SI: f64 = 299_792_458.0;

/// Radius multiplier of r_s below which the singularity warning fires.
pub const SINGULARITY_PROXIMITY_FACTOR: f64 = 1.001;

/// Default starting affine parameter.
pub const DEFAULT_START_LAMBDA: f64 = 0.0;

/// Default final affine parameter for bulk integration.
pub const DEFAULT_END_LAMBDA: f64 = 10.0;

/// Default first trial step of the adaptive stepper.
pub const DEFAULT_STEP_SIZE: f64 = 1e-3;

/// Bound handed to the stepper in streaming mode. Never reached in practice.
pub const STREAM_LAMBDA_BOUND: f64 = 1e300;

/// Relative tolerance derived from the step size when none is given.
pub const RTOL_PER_STEP: f64 = 0.2;

/// Absolute tolerance as a fraction of the relative tolerance.
pub const ATOL_PER_RTOL: f64 = 0.1;
