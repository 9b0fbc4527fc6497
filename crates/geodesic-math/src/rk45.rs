// ─────────────────────────────────────────────────────────────────────
// SCPN Geodesic Core — Adaptive Runge-Kutta Stepper
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Dormand–Prince 5(4) explicit Runge–Kutta stepper with adaptive step size.
//!
//! The stepper advances one accepted step per call to [`AdaptiveStepper::step`],
//! exposing the current parameter and state in between. Error control:
//!   err = ‖h Σ E_i k_i / (atol + rtol · max(|y|, |y_new|))‖_rms
//!   h_next = h · clamp(0.9 · err^(-1/5), 0.2, 10)
//! with no growth on the step immediately following a rejection. Steps are
//! clipped so the bound is hit exactly. Integration runs forward only.

use geodesic_types::config::StepperConfig;
use geodesic_types::error::{GeodesicError, GeodesicResult};

const STAGES: usize = 6;
const SAFETY: f64 = 0.9;
const MIN_FACTOR: f64 = 0.2;
const MAX_FACTOR: f64 = 10.0;
const ERROR_EXPONENT: f64 = -1.0 / 5.0;
/// Minimum step as a multiple of the float spacing at the current parameter.
const MIN_STEP_ULPS: f64 = 10.0;

const C: [f64; STAGES] = [0.0, 1.0 / 5.0, 3.0 / 10.0, 4.0 / 5.0, 8.0 / 9.0, 1.0];
const A: [[f64; 5]; STAGES] = [
    [0.0, 0.0, 0.0, 0.0, 0.0],
    [1.0 / 5.0, 0.0, 0.0, 0.0, 0.0],
    [3.0 / 40.0, 9.0 / 40.0, 0.0, 0.0, 0.0],
    [44.0 / 45.0, -56.0 / 15.0, 32.0 / 9.0, 0.0, 0.0],
    [
        19372.0 / 6561.0,
        -25360.0 / 2187.0,
        64448.0 / 6561.0,
        -212.0 / 729.0,
        0.0,
    ],
    [
        9017.0 / 3168.0,
        -355.0 / 33.0,
        46732.0 / 5247.0,
        49.0 / 176.0,
        -5103.0 / 18656.0,
    ],
];
const B: [f64; STAGES] = [
    35.0 / 384.0,
    0.0,
    500.0 / 1113.0,
    125.0 / 192.0,
    -2187.0 / 6784.0,
    11.0 / 84.0,
];
/// Difference between the 5th and embedded 4th order weights, including
/// the FSAL stage.
const E: [f64; STAGES + 1] = [
    -71.0 / 57600.0,
    0.0,
    71.0 / 16695.0,
    -71.0 / 1920.0,
    17253.0 / 339200.0,
    -22.0 / 525.0,
    1.0 / 40.0,
];

/// System of ordinary differential equations: dy/dt = f(t, y).
pub trait OdeSystem<const N: usize> {
    fn rhs(&self, t: f64, y: &[f64; N], dydt: &mut [f64; N]);
}

/// Lifecycle of a stepper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepperStatus {
    Running,
    /// The bound has been reached.
    Finished,
    /// A previous step failed; the stepper will not advance again.
    Failed,
}

/// Contract the trajectory engine relies on: read the current parameter and
/// state, and advance both by one adaptive increment.
pub trait AdaptiveStepper<const N: usize> {
    fn lambda(&self) -> f64;
    fn state(&self) -> &[f64; N];
    fn status(&self) -> StepperStatus;
    fn step(&mut self) -> GeodesicResult<()>;
}

/// Integration statistics for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub fn_evals: u64,
    pub accepted_steps: u64,
    pub rejected_steps: u64,
}

/// Dormand–Prince 5(4) stepper bound to one system and one initial state.
#[derive(Debug, Clone)]
pub struct Rk45<S, const N: usize> {
    system: S,
    t: f64,
    y: [f64; N],
    /// Derivative at `(t, y)`, reused as the first stage of the next step.
    f: [f64; N],
    h_abs: f64,
    t_bound: f64,
    rtol: f64,
    atol: f64,
    max_step: f64,
    status: StepperStatus,
    stats: Stats,
}

impl<S: OdeSystem<N>, const N: usize> Rk45<S, N> {
    pub fn new(
        system: S,
        t0: f64,
        y0: [f64; N],
        t_bound: f64,
        config: &StepperConfig,
    ) -> GeodesicResult<Self> {
        config.validate()?;
        if !t0.is_finite() {
            return Err(GeodesicError::ConfigError(format!(
                "initial parameter must be finite, got {t0}"
            )));
        }
        if t_bound.is_nan() || t_bound < t0 {
            return Err(GeodesicError::ConfigError(format!(
                "bound ({t_bound}) must not precede the initial parameter ({t0})"
            )));
        }
        if y0.iter().any(|v| !v.is_finite()) {
            return Err(GeodesicError::PhysicsViolation(
                "initial state components must be finite".to_string(),
            ));
        }

        let (rtol, atol) = config.tolerances();
        let mut f = [0.0; N];
        system.rhs(t0, &y0, &mut f);
        let status = if t0 >= t_bound {
            StepperStatus::Finished
        } else {
            StepperStatus::Running
        };

        Ok(Rk45 {
            system,
            t: t0,
            y: y0,
            f,
            h_abs: config.step_size,
            t_bound,
            rtol,
            atol,
            max_step: config.max_step(),
            status,
            stats: Stats {
                fn_evals: 1,
                ..Stats::default()
            },
        })
    }

    pub fn system(&self) -> &S {
        &self.system
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// Step size that will be tried next.
    pub fn next_step_size(&self) -> f64 {
        self.h_abs
    }

    pub fn bound(&self) -> f64 {
        self.t_bound
    }

    fn fail(&mut self, message: String) -> GeodesicError {
        self.status = StepperStatus::Failed;
        GeodesicError::StepperFailure {
            lambda: self.t,
            message,
        }
    }

    /// One trial step of size `h`; returns `(y_new, f_new, error_norm)`.
    fn trial(&mut self, h: f64) -> ([f64; N], [f64; N], f64) {
        let t = self.t;
        let mut k = [[0.0; N]; STAGES + 1];
        k[0] = self.f;

        for s in 1..STAGES {
            let mut y_stage = self.y;
            for (i, y_i) in y_stage.iter_mut().enumerate() {
                let mut acc = 0.0;
                for j in 0..s {
                    acc += A[s][j] * k[j][i];
                }
                *y_i += h * acc;
            }
            self.system.rhs(t + C[s] * h, &y_stage, &mut k[s]);
        }

        let mut y_new = self.y;
        for (i, y_i) in y_new.iter_mut().enumerate() {
            let mut acc = 0.0;
            for j in 0..STAGES {
                acc += B[j] * k[j][i];
            }
            *y_i += h * acc;
        }

        let mut f_new = [0.0; N];
        self.system.rhs(t + h, &y_new, &mut f_new);
        k[STAGES] = f_new;
        self.stats.fn_evals += STAGES as u64;

        let mut sum_sq = 0.0;
        for i in 0..N {
            let mut err = 0.0;
            for j in 0..=STAGES {
                err += E[j] * k[j][i];
            }
            let scale = self.atol + self.y[i].abs().max(y_new[i].abs()) * self.rtol;
            let ratio = h * err / scale;
            sum_sq += ratio * ratio;
        }
        let error_norm = (sum_sq / N.max(1) as f64).sqrt();

        (y_new, f_new, error_norm)
    }
}

impl<S: OdeSystem<N>, const N: usize> AdaptiveStepper<N> for Rk45<S, N> {
    fn lambda(&self) -> f64 {
        self.t
    }

    fn state(&self) -> &[f64; N] {
        &self.y
    }

    fn status(&self) -> StepperStatus {
        self.status
    }

    fn step(&mut self) -> GeodesicResult<()> {
        match self.status {
            StepperStatus::Running => {}
            StepperStatus::Finished => {
                return Err(GeodesicError::StepperFailure {
                    lambda: self.t,
                    message: "step requested after reaching the bound".to_string(),
                })
            }
            StepperStatus::Failed => {
                return Err(GeodesicError::StepperFailure {
                    lambda: self.t,
                    message: "step requested after a failed step".to_string(),
                })
            }
        }

        let t = self.t;
        let min_step = MIN_STEP_ULPS * spacing(t);
        let mut h_abs = self.h_abs.clamp(min_step, self.max_step.max(min_step));
        let mut rejected = false;

        loop {
            if !(h_abs >= min_step) {
                return Err(self.fail(format!(
                    "step size {h_abs:e} fell below the minimum {min_step:e}"
                )));
            }

            let t_new = (t + h_abs).min(self.t_bound);
            let h = t_new - t;
            h_abs = h;

            let (y_new, f_new, error_norm) = self.trial(h);

            if error_norm < 1.0 {
                let mut factor = if error_norm == 0.0 {
                    MAX_FACTOR
                } else {
                    MAX_FACTOR.min(SAFETY * error_norm.powf(ERROR_EXPONENT))
                };
                if rejected {
                    factor = factor.min(1.0);
                }

                if y_new.iter().any(|v| !v.is_finite()) {
                    self.t = t_new;
                    return Err(self.fail("accepted step produced a non-finite state".to_string()));
                }

                self.stats.accepted_steps += 1;
                self.h_abs = h_abs * factor;
                self.t = t_new;
                self.y = y_new;
                self.f = f_new;
                if self.t >= self.t_bound {
                    self.status = StepperStatus::Finished;
                }
                return Ok(());
            }

            // NaN error norms fall through to the minimum factor.
            self.stats.rejected_steps += 1;
            h_abs *= MIN_FACTOR.max(SAFETY * error_norm.powf(ERROR_EXPONENT));
            rejected = true;
        }
    }
}

/// Distance from `t` to the next representable float away from zero.
fn spacing(t: f64) -> f64 {
    let a = t.abs();
    if a == 0.0 {
        return f64::from_bits(1);
    }
    if !a.is_finite() {
        return f64::INFINITY;
    }
    f64::from_bits(a.to_bits() + 1) - a
}
