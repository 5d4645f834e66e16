use crate::InputEvent;
use std::time::Instant;
use winit::dpi::PhysicalPosition;
use winit::event::{Touch, TouchPhase};

/// Horizontal position in logical pixels.
///
/// Swipe thresholds and velocities are tuned in logical pixels, so the physical
/// position winit reports is divided by the window scale factor first.
pub fn logical_x(location: PhysicalPosition<f64>, scale_factor: f64) -> f64 {
    let scale_factor = if scale_factor.is_finite() && scale_factor > 0.0 {
        scale_factor
    } else {
        1.0
    };
    location.to_logical::<f64>(scale_factor).x
}

/// Follows the first finger on the surface from touch-down to lift-off.
///
/// Additional fingers are ignored until the tracked one lifts.
#[derive(Debug, Default)]
pub struct TouchTracker {
    finger: Option<u64>,
}

impl TouchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the finger currently tracked.
    pub fn tracked(&self) -> Option<u64> {
        self.finger
    }

    /// Feed a winit touch from a window with the given scale factor.
    pub fn on_touch(
        &mut self,
        touch: &Touch,
        scale_factor: f64,
        at: Instant,
    ) -> Option<InputEvent> {
        let x = logical_x(touch.location, scale_factor);
        self.track(touch.id, touch.phase, x, at)
    }

    /// Like [`on_touch`](Self::on_touch), with `x` already in logical pixels.
    pub fn track(&mut self, id: u64, phase: TouchPhase, x: f64, at: Instant) -> Option<InputEvent> {
        match phase {
            TouchPhase::Started => {
                if self.finger.is_some() {
                    return None;
                }
                self.finger = Some(id);
                Some(InputEvent::TouchBegin { x, at })
            }
            TouchPhase::Ended => {
                if self.finger != Some(id) {
                    return None;
                }
                self.finger = None;
                Some(InputEvent::TouchEnd { x, at })
            }
            TouchPhase::Cancelled => {
                // Frees the tracker, the engine's open gesture stays as it is.
                if self.finger == Some(id) {
                    self.finger = None;
                }
                None
            }
            TouchPhase::Moved => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coverflow_engine::{Coverflow, Settings};
    use std::time::Duration;

    #[test]
    fn begin_and_end_of_first_finger() {
        let mut tracker = TouchTracker::new();
        let t0 = Instant::now();
        assert_eq!(
            tracker.track(7, TouchPhase::Started, 100.0, t0),
            Some(InputEvent::TouchBegin { x: 100.0, at: t0 })
        );
        assert_eq!(tracker.track(7, TouchPhase::Moved, 60.0, t0), None);
        assert_eq!(
            tracker.track(7, TouchPhase::Ended, 0.0, t0),
            Some(InputEvent::TouchEnd { x: 0.0, at: t0 })
        );
        assert_eq!(tracker.tracked(), None);
    }

    #[test]
    fn second_finger_is_ignored() {
        let mut tracker = TouchTracker::new();
        let t0 = Instant::now();
        tracker.track(1, TouchPhase::Started, 10.0, t0);
        assert_eq!(tracker.track(2, TouchPhase::Started, 50.0, t0), None);
        assert_eq!(tracker.track(2, TouchPhase::Ended, 50.0, t0), None);
        assert_eq!(tracker.tracked(), Some(1));
    }

    #[test]
    fn cancel_releases_without_end() {
        let mut tracker = TouchTracker::new();
        let t0 = Instant::now();
        tracker.track(3, TouchPhase::Started, 10.0, t0);
        assert_eq!(tracker.track(3, TouchPhase::Cancelled, 10.0, t0), None);
        assert_eq!(tracker.tracked(), None);
        assert!(tracker.track(4, TouchPhase::Started, 20.0, t0).is_some());
    }

    #[test]
    fn end_without_start_is_ignored() {
        let mut tracker = TouchTracker::new();
        assert_eq!(tracker.track(9, TouchPhase::Ended, 0.0, Instant::now()), None);
    }

    #[test]
    fn physical_position_is_scaled_down() {
        assert_eq!(logical_x(PhysicalPosition::new(230.0, 40.0), 2.0), 115.0);
        assert_eq!(logical_x(PhysicalPosition::new(230.0, 40.0), 1.0), 230.0);
        assert_eq!(logical_x(PhysicalPosition::new(90.0, 0.0), 1.5), 60.0);
        assert_eq!(logical_x(PhysicalPosition::new(50.0, 0.0), 0.0), 50.0);
        assert_eq!(logical_x(PhysicalPosition::new(50.0, 0.0), f64::NAN), 50.0);
    }

    #[test]
    fn short_flick_on_hidpi_display_does_not_navigate() {
        // 30 physical px at scale 2.0 is a 15 logical px flick, under the 20 px threshold.
        let mut flow: Coverflow<usize> =
            Coverflow::new((0..5).collect(), Settings::default()).unwrap();
        let mut tracker = TouchTracker::new();
        let t0 = Instant::now();
        let t1 = t0 + Duration::from_millis(20);

        let down = logical_x(PhysicalPosition::new(230.0, 0.0), 2.0);
        let up = logical_x(PhysicalPosition::new(200.0, 0.0), 2.0);
        let Some(InputEvent::TouchBegin { x: start, at }) =
            tracker.track(1, TouchPhase::Started, down, t0)
        else {
            panic!("first finger should open a gesture");
        };
        let Some(InputEvent::TouchEnd { x: stop, at: end_at }) =
            tracker.track(1, TouchPhase::Ended, up, t1)
        else {
            panic!("tracked finger should close the gesture");
        };
        assert_eq!(start - stop, 15.0);

        flow.touch_begin(start, at);
        assert_eq!(flow.touch_end(stop, end_at), 0);
        assert!(flow.gesture().pending().is_none());

        // The same flick read as physical pixels would have jumped three panels.
        flow.touch_begin(230.0, t0);
        assert_eq!(flow.touch_end(200.0, t1), 3);
    }
}
