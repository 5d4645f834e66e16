//! Navigation and animation core of the cover flow gallery.
//!
//! Input (wheel deltas, touch swipes) becomes a [`Step`], the step moves a
//! clamped [`ActiveIndex`], and every tick each [`Panel`] eases toward the
//! pose its offset from the active index asks for.

pub mod driver;
pub mod gesture;
pub mod index;
pub mod pose;

pub use driver::{AnimationDriver, Panel, RenderPanel};
pub use gesture::{GestureInterpreter, GestureState, GestureTuning, Step};
pub use index::{select, ActiveIndex};
pub use pose::{advance, target_pose, Pose, PoseLayout, Smoothing};

use std::fmt;
use std::time::Instant;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    #[error("Gallery needs at least one panel")]
    EmptyGallery,
    #[error("Smoothing fraction must be in (0, 1], got {0}")]
    InvalidSmoothing(f32),
}

/// Tuning for a [`Coverflow`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Settings {
    pub gesture: GestureTuning,
    pub layout: PoseLayout,
    pub smoothing: Smoothing,
}

/// Read-only "position of total" view of the active index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlay {
    pub active: usize,
    pub total: usize,
}

impl fmt::Display for Overlay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Scroll / Swipe to navigate \u{2022} {} of {}",
            self.active + 1,
            self.total
        )
    }
}

/// The assembled engine: a fixed set of panels, the active index, and the
/// gesture and animation state that act on them.
///
/// `H` is the opaque per-panel image handle, passed through untouched.
#[derive(Debug, Clone)]
pub struct Coverflow<H> {
    panels: Vec<Panel<H>>,
    active: ActiveIndex,
    gesture: GestureInterpreter,
    driver: AnimationDriver,
}

impl<H> Coverflow<H> {
    pub fn new(handles: Vec<H>, settings: Settings) -> Result<Self, EngineError> {
        let active = ActiveIndex::new(handles.len())?;
        let panels = handles
            .into_iter()
            .enumerate()
            .map(|(i, handle)| Panel::new(i, handle))
            .collect();

        Ok(Self {
            panels,
            active,
            gesture: GestureInterpreter::new(settings.gesture),
            driver: AnimationDriver::new(settings.layout, settings.smoothing),
        })
    }

    /// Number of panels; never zero.
    pub fn panel_count(&self) -> usize {
        self.panels.len()
    }

    pub fn active_index(&self) -> usize {
        self.active.get()
    }

    pub fn panels(&self) -> &[Panel<H>] {
        &self.panels
    }

    pub fn gesture(&self) -> &GestureInterpreter {
        &self.gesture
    }

    pub fn overlay(&self) -> Overlay {
        Overlay {
            active: self.active.get(),
            total: self.active.count(),
        }
    }

    /// Apply a step directly and return the new active index.
    pub fn step(&mut self, step: Step) -> usize {
        let before = self.active.get();
        let after = self.active.apply(step);
        if before != after {
            debug!(from = before, to = after, step = step.value(), "Active panel changed");
        }
        after
    }

    /// Handle a wheel event with DOM-style `delta_y` (positive = advance).
    pub fn wheel(&mut self, delta_y: f64) -> usize {
        let step = self.gesture.wheel(delta_y);
        self.step(step)
    }

    pub fn touch_begin(&mut self, x: f64, at: Instant) {
        self.gesture.touch_begin(x, at);
    }

    pub fn touch_end(&mut self, x: f64, at: Instant) -> usize {
        let step = self.gesture.touch_end(x, at);
        self.step(step)
    }

    /// Advance every panel one animation step.
    pub fn tick(&mut self) {
        let active = self.active.get();
        self.driver.tick(&mut self.panels, active);
    }

    /// [`tick`](Self::tick), then push each pose to the matching render panel.
    ///
    /// Extra targets beyond the panel count are left alone.
    pub fn tick_into<R: RenderPanel>(&mut self, targets: &mut [R]) {
        self.tick();
        for (panel, target) in self.panels.iter().zip(targets.iter_mut()) {
            panel.emit(target);
        }
    }

    pub fn is_settled(&self, epsilon: f32) -> bool {
        self.driver
            .is_settled(&self.panels, self.active.get(), epsilon)
    }
}
