use crate::InputEvent;
use winit::event::MouseScrollDelta;

/// Pixels treated as one wheel line when normalizing pixel deltas.
const PIXELS_PER_LINE: f64 = 100.0;

/// Convert a winit scroll delta to a DOM-style `deltaY`.
///
/// winit reports a positive vertical delta when the wheel rolls away from the
/// user, which the DOM reports as a negative `deltaY`.
pub fn scroll_delta_y(delta: MouseScrollDelta) -> f64 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => -(y as f64),
        MouseScrollDelta::PixelDelta(pos) => -pos.y / PIXELS_PER_LINE,
    }
}

/// Wheel event for the surface, or `None` for purely horizontal scrolling.
pub fn wheel_event(delta: MouseScrollDelta) -> Option<InputEvent> {
    let delta_y = scroll_delta_y(delta);
    if delta_y == 0.0 {
        return None;
    }
    Some(InputEvent::Wheel { delta_y })
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;

    #[test]
    fn line_delta_is_inverted() {
        assert_eq!(scroll_delta_y(MouseScrollDelta::LineDelta(0.0, -1.0)), 1.0);
        assert_eq!(scroll_delta_y(MouseScrollDelta::LineDelta(0.0, 2.0)), -2.0);
    }

    #[test]
    fn pixel_delta_is_scaled() {
        let delta = MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, -50.0));
        assert_eq!(scroll_delta_y(delta), 0.5);
    }

    #[test]
    fn horizontal_scroll_is_dropped() {
        assert_eq!(wheel_event(MouseScrollDelta::LineDelta(3.0, 0.0)), None);
        assert_eq!(
            wheel_event(MouseScrollDelta::LineDelta(0.0, -1.0)),
            Some(InputEvent::Wheel { delta_y: 1.0 })
        );
    }
}
