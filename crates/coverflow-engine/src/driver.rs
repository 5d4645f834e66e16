use crate::pose::{advance, Pose, PoseLayout, Smoothing};
use tracing::trace;

/// Receiver of animated poses, typically a mesh in the render scene.
///
/// The driver only writes to it; nothing is read back.
pub trait RenderPanel {
    fn set_pose(&mut self, pose: &Pose);
    fn set_tint(&mut self, tint: f32);
}

/// One entry of the gallery: a fixed index, an opaque image handle and its pose.
#[derive(Debug, Clone)]
pub struct Panel<H> {
    index: usize,
    handle: H,
    pose: Pose,
}

impl<H> Panel<H> {
    pub fn new(index: usize, handle: H) -> Self {
        Self {
            index,
            handle,
            pose: Pose::default(),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn handle(&self) -> &H {
        &self.handle
    }

    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    /// Push the current pose and tint to a render target.
    pub fn emit<R: RenderPanel + ?Sized>(&self, target: &mut R) {
        target.set_pose(&self.pose);
        target.set_tint(self.pose.tint);
    }
}

/// Moves every panel a fixed fraction toward its target once per tick.
///
/// Smoothing is per call, not per second: the host decides the cadence.
#[derive(Debug, Clone, Default)]
pub struct AnimationDriver {
    layout: PoseLayout,
    smoothing: Smoothing,
    ticks: u64,
}

impl AnimationDriver {
    pub fn new(layout: PoseLayout, smoothing: Smoothing) -> Self {
        Self {
            layout,
            smoothing,
            ticks: 0,
        }
    }

    pub fn layout(&self) -> &PoseLayout {
        &self.layout
    }

    pub fn smoothing(&self) -> Smoothing {
        self.smoothing
    }

    /// Number of ticks run so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Advance all panels against the same `active` snapshot.
    pub fn tick<H>(&mut self, panels: &mut [Panel<H>], active: usize) {
        for panel in panels.iter_mut() {
            let target = self.layout.target(panel.index, active);
            panel.pose = advance(&panel.pose, &target, self.smoothing);
        }

        self.ticks += 1;
        if self.ticks % 600 == 0 {
            trace!(ticks = self.ticks, active, "Animation heartbeat");
        }
    }

    /// True once every panel is within `epsilon` of its target.
    pub fn is_settled<H>(&self, panels: &[Panel<H>], active: usize, epsilon: f32) -> bool {
        panels
            .iter()
            .all(|p| p.pose.is_settled(&self.layout.target(p.index, active), epsilon))
    }
}
