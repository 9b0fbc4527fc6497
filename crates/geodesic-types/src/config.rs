// ─────────────────────────────────────────────────────────────────────
// SCPN Geodesic Core — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use serde::{Deserialize, Serialize};

use crate::constants::{
    ATOL_PER_RTOL, C_SI, DEFAULT_END_LAMBDA, DEFAULT_START_LAMBDA, DEFAULT_STEP_SIZE, G_SI,
    RTOL_PER_STEP,
};
use crate::error::{GeodesicError, GeodesicResult};

/// Smallest relative tolerance the stepper will honour.
const RTOL_FLOOR: f64 = 100.0 * f64::EPSILON;

/// Unit system baked into the metric formulas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitSystem {
    /// SI: mass in kg, lengths in m, t and lambda in s.
    #[default]
    Si,
    /// G = c = 1: mass in length units, so r_s = 2M.
    Geometrized,
}

impl UnitSystem {
    pub fn gravitational_constant(self) -> f64 {
        match self {
            UnitSystem::Si => G_SI,
            UnitSystem::Geometrized => 1.0,
        }
    }

    pub fn speed_of_light(self) -> f64 {
        match self {
            UnitSystem::Si => C_SI,
            UnitSystem::Geometrized => 1.0,
        }
    }

    /// Schwarzschild radius r_s = 2GM/c^2.
    pub fn schwarzschild_radius(self, mass: f64) -> f64 {
        let c = self.speed_of_light();
        2.0 * self.gravitational_constant() * mass / (c * c)
    }
}

/// Spherical `(r, theta, phi)` or Cartesian `(x, y, z)` representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinateFrame {
    #[default]
    Spherical,
    Cartesian,
}

/// Adaptive stepper settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepperConfig {
    /// First trial step; also sets the default tolerances.
    #[serde(default = "default_step_size")]
    pub step_size: f64,
    /// Relative tolerance. Defaults to `0.2 * step_size`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rtol: Option<f64>,
    /// Absolute tolerance. Defaults to `0.1 * rtol`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atol: Option<f64>,
    /// Upper bound on any single step. Unbounded when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_step: Option<f64>,
}

fn default_step_size() -> f64 {
    DEFAULT_STEP_SIZE
}
fn default_start_lambda() -> f64 {
    DEFAULT_START_LAMBDA
}
fn default_end_lambda() -> f64 {
    DEFAULT_END_LAMBDA
}
fn default_stop_on_singularity() -> bool {
    true
}

impl Default for StepperConfig {
    fn default() -> Self {
        StepperConfig {
            step_size: default_step_size(),
            rtol: None,
            atol: None,
            max_step: None,
        }
    }
}

impl StepperConfig {
    pub fn with_step_size(step_size: f64) -> Self {
        StepperConfig {
            step_size,
            ..Self::default()
        }
    }

    /// Effective `(rtol, atol)` pair after defaults and flooring.
    pub fn tolerances(&self) -> (f64, f64) {
        let rtol = self
            .rtol
            .unwrap_or(RTOL_PER_STEP * self.step_size)
            .max(RTOL_FLOOR);
        let atol = self.atol.unwrap_or(ATOL_PER_RTOL * rtol);
        (rtol, atol)
    }

    /// Effective maximum step.
    pub fn max_step(&self) -> f64 {
        self.max_step.unwrap_or(f64::INFINITY)
    }

    pub fn validate(&self) -> GeodesicResult<()> {
        if !self.step_size.is_finite() || self.step_size <= 0.0 {
            return Err(GeodesicError::ConfigError(format!(
                "step_size must be finite and > 0, got {}",
                self.step_size
            )));
        }
        if let Some(rtol) = self.rtol {
            if !rtol.is_finite() || rtol <= 0.0 {
                return Err(GeodesicError::ConfigError(format!(
                    "rtol must be finite and > 0, got {rtol}"
                )));
            }
        }
        if let Some(atol) = self.atol {
            if !atol.is_finite() || atol < 0.0 {
                return Err(GeodesicError::ConfigError(format!(
                    "atol must be finite and >= 0, got {atol}"
                )));
            }
        }
        if let Some(max_step) = self.max_step {
            if max_step.is_nan() || max_step <= 0.0 {
                return Err(GeodesicError::ConfigError(format!(
                    "max_step must be > 0, got {max_step}"
                )));
            }
        }
        Ok(())
    }
}

/// Parameters of one bulk trajectory computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryConfig {
    #[serde(default = "default_start_lambda")]
    pub start_lambda: f64,
    #[serde(default = "default_end_lambda")]
    pub end_lambda: f64,
    #[serde(default = "default_stop_on_singularity")]
    pub stop_on_singularity: bool,
    #[serde(default)]
    pub stepper: StepperConfig,
    #[serde(default)]
    pub output: CoordinateFrame,
}

impl Default for TrajectoryConfig {
    fn default() -> Self {
        TrajectoryConfig {
            start_lambda: default_start_lambda(),
            end_lambda: default_end_lambda(),
            stop_on_singularity: default_stop_on_singularity(),
            stepper: StepperConfig::default(),
            output: CoordinateFrame::default(),
        }
    }
}

impl TrajectoryConfig {
    /// Load from a JSON file.
    pub fn from_file(path: &str) -> GeodesicResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> GeodesicResult<()> {
        if !self.start_lambda.is_finite() || !self.end_lambda.is_finite() {
            return Err(GeodesicError::ConfigError(format!(
                "lambda range must be finite, got [{}, {}]",
                self.start_lambda, self.end_lambda
            )));
        }
        if self.end_lambda <= self.start_lambda {
            return Err(GeodesicError::ConfigError(format!(
                "end_lambda ({}) must exceed start_lambda ({})",
                self.end_lambda, self.start_lambda
            )));
        }
        self.stepper.validate()
    }
}

/// Parameters of one streaming trajectory computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StreamConfig {
    #[serde(default = "default_start_lambda")]
    pub start_lambda: f64,
    #[serde(default = "default_stop_on_singularity")]
    pub stop_on_singularity: bool,
    #[serde(default)]
    pub stepper: StepperConfig,
    #[serde(default)]
    pub output: CoordinateFrame,
}

impl Default for StreamConfig {
    fn default() -> Self {
        StreamConfig {
            start_lambda: default_start_lambda(),
            stop_on_singularity: default_stop_on_singularity(),
            stepper: StepperConfig::default(),
            output: CoordinateFrame::default(),
        }
    }
}

impl StreamConfig {
    pub fn validate(&self) -> GeodesicResult<()> {
        if !self.start_lambda.is_finite() {
            return Err(GeodesicError::ConfigError(format!(
                "start_lambda must be finite, got {}",
                self.start_lambda
            )));
        }
        self.stepper.validate()
    }
}

/// Initial position, velocity, start time and central mass of a test particle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InitialConditions {
    #[serde(default)]
    pub frame: CoordinateFrame,
    pub position: [f64; 3],
    pub velocity: [f64; 3],
    #[serde(default)]
    pub time: f64,
    pub mass: f64,
    #[serde(default)]
    pub units: UnitSystem,
}

impl InitialConditions {
    /// Load from a JSON file. Physical validation happens when the
    /// geometry is built.
    pub fn from_file(path: &str) -> GeodesicResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let conditions: Self = serde_json::from_str(&contents)?;
        Ok(conditions)
    }
}
