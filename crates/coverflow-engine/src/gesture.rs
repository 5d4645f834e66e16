use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::trace;

/// A signed request to move the active index by some number of panels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Step(pub i32);

impl Step {
    pub const ZERO: Step = Step(0);
    pub const FORWARD: Step = Step(1);
    pub const BACK: Step = Step(-1);

    pub fn value(self) -> i32 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

/// Thresholds that turn a swipe into a step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureTuning {
    /// Minimum horizontal travel (pixels) before a swipe counts at all.
    pub swipe_threshold: f64,
    /// Panels per (pixel / millisecond) of swipe velocity.
    pub velocity_scale: f64,
    /// Hard cap on panels moved by one swipe.
    pub max_swipe_step: u32,
}

impl Default for GestureTuning {
    fn default() -> Self {
        Self {
            swipe_threshold: 20.0,
            velocity_scale: 5.0,
            max_swipe_step: 3,
        }
    }
}

impl GestureTuning {
    /// Convert a finished swipe into a step.
    ///
    /// - `delta_x`: start x minus end x (positive = finger moved left = advance).
    /// - `delta_ms`: gesture duration in milliseconds.
    ///
    /// Short swipes, zero or negative durations and non-finite input all yield
    /// [`Step::ZERO`], so no non-finite velocity ever reaches the caller.
    pub fn swipe_step(&self, delta_x: f64, delta_ms: f64) -> Step {
        if !delta_x.is_finite() || delta_x.abs() <= self.swipe_threshold {
            return Step::ZERO;
        }
        if !delta_ms.is_finite() || delta_ms <= 0.0 {
            trace!(delta_x, delta_ms, "Ignoring zero-duration swipe");
            return Step::ZERO;
        }

        let velocity = delta_x / delta_ms;
        // `as` saturates, so an enormous velocity still lands on the cap.
        let magnitude = ((velocity.abs() * self.velocity_scale).floor() as u32)
            .min(self.max_swipe_step)
            .min(i32::MAX as u32) as i32;

        if delta_x > 0.0 {
            Step(magnitude)
        } else {
            Step(-magnitude)
        }
    }
}

/// Where and when the tracked touch went down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureState {
    pub start_x: f64,
    pub started_at: Instant,
}

/// Turns wheel deltas and touch begin/end pairs into [`Step`]s.
#[derive(Debug, Clone, Default)]
pub struct GestureInterpreter {
    tuning: GestureTuning,
    pending: Option<GestureState>,
}

impl GestureInterpreter {
    pub fn new(tuning: GestureTuning) -> Self {
        Self {
            tuning,
            pending: None,
        }
    }

    /// The open gesture, if a touch went down and has not been released yet.
    pub fn pending(&self) -> Option<&GestureState> {
        self.pending.as_ref()
    }

    /// One step per wheel event in the direction of `delta_y`.
    pub fn wheel(&self, delta_y: f64) -> Step {
        if delta_y > 0.0 {
            Step::FORWARD
        } else if delta_y < 0.0 {
            Step::BACK
        } else {
            Step::ZERO
        }
    }

    /// Record the start of a swipe. A second begin replaces the first.
    pub fn touch_begin(&mut self, x: f64, at: Instant) {
        self.pending = Some(GestureState {
            start_x: x,
            started_at: at,
        });
    }

    /// Finish the open swipe and clear it.
    ///
    /// A touch-end with no matching begin is ignored.
    pub fn touch_end(&mut self, x: f64, at: Instant) -> Step {
        let Some(start) = self.pending.take() else {
            trace!(x, "Touch end without a recorded start");
            return Step::ZERO;
        };

        let delta_x = start.start_x - x;
        let delta_ms = match at.checked_duration_since(start.started_at) {
            Some(elapsed) => elapsed.as_secs_f64() * 1000.0,
            None => 0.0,
        };

        let step = self.tuning.swipe_step(delta_x, delta_ms);
        trace!(delta_x, delta_ms, step = step.0, "Swipe finished");
        step
    }
}
