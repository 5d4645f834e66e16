pub mod binding;
pub mod mouse;
pub mod surface;
pub mod touch;

pub use binding::{attach, Attachment};
pub use surface::{InputSurface, ListenerKind, Subscription};
pub use touch::{logical_x, TouchTracker};

use std::time::Instant;

/// Navigation input delivered by the container surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Vertical wheel movement, DOM convention (positive = scroll down).
    Wheel { delta_y: f64 },
    /// First finger went down at horizontal position `x`.
    TouchBegin { x: f64, at: Instant },
    /// Tracked finger lifted at horizontal position `x`.
    TouchEnd { x: f64, at: Instant },
}

impl InputEvent {
    pub fn kind(&self) -> ListenerKind {
        match self {
            InputEvent::Wheel { .. } => ListenerKind::Wheel,
            InputEvent::TouchBegin { .. } => ListenerKind::TouchBegin,
            InputEvent::TouchEnd { .. } => ListenerKind::TouchEnd,
        }
    }
}
