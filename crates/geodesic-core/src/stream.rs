// ─────────────────────────────────────────────────────────────────────
// SCPN Geodesic Core — Streaming Trajectory Cursor
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Demand-driven geodesic integration.
//!
//! [`TrajectoryStream`] owns its stepper, singularity monitor and warning
//! sink. Each pull yields the current point; the step that follows it only
//! runs on the next pull (or on [`TrajectoryStream::has_more`]), so dropping
//! the stream is the cancellation mechanism. With `stop_on_singularity =
//! false` the stream may never end; bound consumption with `take` or similar.

use std::iter::FusedIterator;

use geodesic_math::coordinates::state_to_cartesian;
use geodesic_math::rk45::{AdaptiveStepper, Rk45, StepperStatus};
use geodesic_types::config::{CoordinateFrame, StreamConfig};
use geodesic_types::constants::STREAM_LAMBDA_BOUND;
use geodesic_types::error::{GeodesicError, GeodesicResult};
use geodesic_types::state::{TrajectoryPoint, R};
use tracing::debug;

use crate::field::GeodesicField;
use crate::schwarzschild::Schwarzschild;
use crate::singularity::{SingularityAction, SingularityMonitor, TracingSink, WarningSink};

enum Cursor {
    /// The stepper's current point has not been yielded yet.
    Ready,
    /// The last point was yielded; a step is owed before the next one.
    NeedsStep,
    Failed(GeodesicError),
    Done,
}

/// Lazy, single-consumer sequence of trajectory points.
pub struct TrajectoryStream<W = TracingSink, S = Rk45<GeodesicField, 8>>
where
    W: WarningSink,
    S: AdaptiveStepper<8>,
{
    stepper: S,
    monitor: SingularityMonitor,
    output: CoordinateFrame,
    sink: W,
    cursor: Cursor,
}

impl<W: WarningSink> TrajectoryStream<W> {
    /// Seed a stream from a geometry's initial state.
    pub fn from_geometry(
        geometry: &Schwarzschild,
        config: &StreamConfig,
        sink: W,
    ) -> GeodesicResult<Self> {
        config.validate()?;
        let stepper = Rk45::new(
            geometry.field(),
            config.start_lambda,
            *geometry.initial_state(),
            STREAM_LAMBDA_BOUND,
            &config.stepper,
        )?;
        let monitor =
            SingularityMonitor::new(geometry.schwarzschild_radius(), config.stop_on_singularity);
        debug!(
            start_lambda = config.start_lambda,
            r0 = geometry.initial_state()[R],
            "opening geodesic stream"
        );
        Ok(Self::new(stepper, monitor, config.output, sink))
    }
}

impl<W, S> TrajectoryStream<W, S>
where
    W: WarningSink,
    S: AdaptiveStepper<8>,
{
    pub fn new(stepper: S, monitor: SingularityMonitor, output: CoordinateFrame, sink: W) -> Self {
        TrajectoryStream {
            stepper,
            monitor,
            output,
            sink,
            cursor: Cursor::Ready,
        }
    }

    /// Whether another element will be produced. May run the pending step.
    pub fn has_more(&mut self) -> bool {
        self.settle();
        matches!(self.cursor, Cursor::Ready | Cursor::Failed(_))
    }

    pub fn output_frame(&self) -> CoordinateFrame {
        self.output
    }

    /// λ at which the singularity threshold was first reached.
    pub fn singularity_lambda(&self) -> Option<f64> {
        self.monitor.reached_at()
    }

    pub fn sink(&self) -> &W {
        &self.sink
    }

    pub fn into_sink(self) -> W {
        self.sink
    }

    pub fn stepper(&self) -> &S {
        &self.stepper
    }

    /// Run the owed step, if any, and apply the singularity policy.
    fn settle(&mut self) {
        if !matches!(self.cursor, Cursor::NeedsStep) {
            return;
        }
        if self.stepper.status() == StepperStatus::Finished {
            self.cursor = Cursor::Done;
            return;
        }
        self.cursor = match self.stepper.step() {
            Err(e) => {
                debug!(error = %e, "geodesic stream failed");
                Cursor::Failed(e)
            }
            Ok(()) => {
                let action = self.monitor.observe(
                    self.stepper.lambda(),
                    self.stepper.state()[R],
                    &mut self.sink,
                );
                match action {
                    SingularityAction::Halt => {
                        debug!(lambda = self.stepper.lambda(), "geodesic stream halted");
                        Cursor::Done
                    }
                    SingularityAction::Continue => Cursor::Ready,
                }
            }
        };
    }

    fn current_point(&self) -> TrajectoryPoint {
        let state = *self.stepper.state();
        let state = match self.output {
            CoordinateFrame::Spherical => state,
            CoordinateFrame::Cartesian => state_to_cartesian(&state),
        };
        TrajectoryPoint {
            lambda: self.stepper.lambda(),
            state,
        }
    }
}

impl<W, S> Iterator for TrajectoryStream<W, S>
where
    W: WarningSink,
    S: AdaptiveStepper<8>,
{
    type Item = GeodesicResult<TrajectoryPoint>;

    fn next(&mut self) -> Option<Self::Item> {
        self.settle();
        match std::mem::replace(&mut self.cursor, Cursor::Done) {
            Cursor::Ready => {
                self.cursor = Cursor::NeedsStep;
                Some(Ok(self.current_point()))
            }
            Cursor::Failed(e) => Some(Err(e)),
            Cursor::NeedsStep | Cursor::Done => None,
        }
    }
}

impl<W, S> FusedIterator for TrajectoryStream<W, S>
where
    W: WarningSink,
    S: AdaptiveStepper<8>,
{
}
