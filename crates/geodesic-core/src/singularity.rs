// ─────────────────────────────────────────────────────────────────────
// SCPN Geodesic Core — Singularity Proximity Policy
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! One-shot warning latch for trajectories approaching the Schwarzschild radius.
//!
//! A monitor is created per trajectory computation. The first time the radial
//! coordinate falls to `1.001 r_s` or below it emits one warning through a
//! [`WarningSink`]; afterwards it either halts the caller or stays silent for
//! the rest of that computation.

use geodesic_types::constants::SINGULARITY_PROXIMITY_FACTOR;

/// Advisory raised once per trajectory when r reaches the threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SingularityWarning {
    pub lambda: f64,
    pub radius: f64,
    pub threshold: f64,
}

impl std::fmt::Display for SingularityWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "r component of position vector reached Schwarzschild radius \
             (lambda={}, r={}, threshold={})",
            self.lambda, self.radius, self.threshold
        )
    }
}

/// Non-fatal notification channel.
pub trait WarningSink {
    fn warn(&mut self, warning: &SingularityWarning);
}

/// Forwards warnings to `tracing` at WARN level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl WarningSink for TracingSink {
    fn warn(&mut self, warning: &SingularityWarning) {
        tracing::warn!(
            lambda = warning.lambda,
            radius = warning.radius,
            threshold = warning.threshold,
            "r component of position vector reached Schwarzschild radius"
        );
    }
}

/// Keeps every warning it receives.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    pub warnings: Vec<SingularityWarning>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.warnings.len()
    }
}

impl WarningSink for RecordingSink {
    fn warn(&mut self, warning: &SingularityWarning) {
        self.warnings.push(*warning);
    }
}

impl<W: WarningSink + ?Sized> WarningSink for &mut W {
    fn warn(&mut self, warning: &SingularityWarning) {
        (**self).warn(warning);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SingularityAction {
    Continue,
    Halt,
}

/// Per-computation latch.
#[derive(Debug, Clone, Copy)]
pub struct SingularityMonitor {
    threshold: f64,
    stop_on_singularity: bool,
    reached_at: Option<f64>,
}

impl SingularityMonitor {
    pub fn new(schwarzschild_radius: f64, stop_on_singularity: bool) -> Self {
        SingularityMonitor {
            threshold: schwarzschild_radius * SINGULARITY_PROXIMITY_FACTOR,
            stop_on_singularity,
            reached_at: None,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// λ at which the threshold was first reached, if it has been.
    pub fn reached_at(&self) -> Option<f64> {
        self.reached_at
    }

    /// Check the radius after a step. Warns at most once.
    pub fn observe<W: WarningSink + ?Sized>(
        &mut self,
        lambda: f64,
        radius: f64,
        sink: &mut W,
    ) -> SingularityAction {
        if self.reached_at.is_some() || radius > self.threshold {
            return SingularityAction::Continue;
        }

        self.reached_at = Some(lambda);
        sink.warn(&SingularityWarning {
            lambda,
            radius,
            threshold: self.threshold,
        });

        if self.stop_on_singularity {
            SingularityAction::Halt
        } else {
            SingularityAction::Continue
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_scaled_radius() {
        let m = SingularityMonitor::new(2.0, true);
        assert!((m.threshold() - 2.002).abs() < 1e-15);
    }

    #[test]
    fn test_outside_threshold_is_silent() {
        let mut sink = RecordingSink::new();
        let mut m = SingularityMonitor::new(2.0, true);
        for r in [50.0, 10.0, 2.1, 2.0021] {
            assert_eq!(m.observe(0.0, r, &mut sink), SingularityAction::Continue);
        }
        assert_eq!(sink.count(), 0);
        assert!(m.reached_at().is_none());
    }

    #[test]
    fn test_halts_on_first_crossing() {
        let mut sink = RecordingSink::new();
        let mut m = SingularityMonitor::new(2.0, true);
        assert_eq!(m.observe(1.5, 2.002, &mut sink), SingularityAction::Halt);
        assert_eq!(sink.count(), 1);
        assert_eq!(m.reached_at(), Some(1.5));
        assert_eq!(sink.warnings[0].radius, 2.002);
    }

    #[test]
    fn test_latch_warns_once_when_continuing() {
        let mut sink = RecordingSink::new();
        let mut m = SingularityMonitor::new(2.0, false);
        for (i, r) in [2.5, 2.001, 1.9, 1.5, 2.5, 1.0].iter().enumerate() {
            assert_eq!(
                m.observe(i as f64, *r, &mut sink),
                SingularityAction::Continue
            );
        }
        assert_eq!(sink.count(), 1);
        assert_eq!(m.reached_at(), Some(1.0));
    }

    #[test]
    fn test_warning_message() {
        let w = SingularityWarning {
            lambda: 1.0,
            radius: 2.0,
            threshold: 2.002,
        };
        assert!(w.to_string().starts_with("r component of position vector reached"));
    }

    #[test]
    fn test_tracing_sink_accepts_warning() {
        let mut m = SingularityMonitor::new(2.0, false);
        assert_eq!(
            m.observe(0.0, 1.0, &mut TracingSink),
            SingularityAction::Continue
        );
        assert!(m.reached_at().is_some());
    }
}
