use crate::EngineError;
use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Animated visual transform of one panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub x: f32,
    pub z: f32,
    /// Rotation about the vertical axis (radians).
    pub rotation_y: f32,
    pub scale: Vec3,
    /// Brightness multiplier in `[0, 1]`.
    pub tint: f32,
}

impl Default for Pose {
    /// An untransformed, untinted panel.
    fn default() -> Self {
        Self {
            x: 0.0,
            z: 0.0,
            rotation_y: 0.0,
            scale: Vec3::ONE,
            tint: 1.0,
        }
    }
}

impl Pose {
    pub fn translation(&self) -> Vec3 {
        Vec3::new(self.x, 0.0, self.z)
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.rotation_y)
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation(), self.translation())
    }

    /// Largest absolute difference across all channels.
    pub fn max_error(&self, other: &Pose) -> f32 {
        let scale = (self.scale - other.scale).abs().max_element();
        [
            (self.x - other.x).abs(),
            (self.z - other.z).abs(),
            (self.rotation_y - other.rotation_y).abs(),
            scale,
            (self.tint - other.tint).abs(),
        ]
        .into_iter()
        .fold(0.0, f32::max)
    }

    pub fn is_settled(&self, target: &Pose, epsilon: f32) -> bool {
        self.max_error(target) < epsilon
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite()
            && self.z.is_finite()
            && self.rotation_y.is_finite()
            && self.scale.is_finite()
            && self.tint.is_finite()
    }
}

/// Constants that place panels along the depth axis around the active one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoseLayout {
    /// Horizontal distance between neighbouring panels.
    pub spacing: f32,
    /// How far each step away from the active panel recedes.
    pub depth_step: f32,
    /// Y rotation per step of offset (radians).
    pub rotation_step: f32,
    pub active_scale: f32,
    pub inactive_scale: f32,
    pub active_tint: f32,
    pub inactive_tint: f32,
}

impl Default for PoseLayout {
    fn default() -> Self {
        Self {
            spacing: 2.5,
            depth_step: 1.0,
            rotation_step: 0.3,
            active_scale: 1.2,
            inactive_scale: 1.0,
            active_tint: 1.0,
            inactive_tint: 0.6,
        }
    }
}

impl PoseLayout {
    /// Pose a panel should settle at given the active index.
    pub fn target(&self, panel: usize, active: usize) -> Pose {
        let distance = panel as i64 - active as i64;
        let offset = distance as f32;
        let focused = distance == 0;

        let scale = if focused {
            self.active_scale
        } else {
            self.inactive_scale
        };

        Pose {
            x: offset * self.spacing,
            z: -offset.abs() * self.depth_step,
            rotation_y: -offset * self.rotation_step,
            scale: Vec3::splat(scale),
            tint: if focused {
                self.active_tint
            } else {
                self.inactive_tint
            },
        }
    }
}

/// Target pose with the default layout.
pub fn target_pose(panel: usize, active: usize) -> Pose {
    PoseLayout::default().target(panel, active)
}

/// Fraction of the remaining gap closed on every tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct Smoothing(f32);

impl Smoothing {
    pub const DEFAULT: Smoothing = Smoothing(0.1);

    pub fn new(fraction: f32) -> Result<Self, EngineError> {
        if fraction.is_finite() && fraction > 0.0 && fraction <= 1.0 {
            Ok(Self(fraction))
        } else {
            Err(EngineError::InvalidSmoothing(fraction))
        }
    }

    pub fn fraction(self) -> f32 {
        self.0
    }
}

impl Default for Smoothing {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<f32> for Smoothing {
    type Error = EngineError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Smoothing::new(value)
    }
}

impl From<Smoothing> for f32 {
    fn from(value: Smoothing) -> Self {
        value.0
    }
}

fn approach(current: f32, target: f32, fraction: f32) -> f32 {
    current + (target - current) * fraction
}

/// One exponential smoothing step from `current` toward `target`.
pub fn advance(current: &Pose, target: &Pose, smoothing: Smoothing) -> Pose {
    let k = smoothing.fraction();
    Pose {
        x: approach(current.x, target.x, k),
        z: approach(current.z, target.z, k),
        rotation_y: approach(current.rotation_y, target.rotation_y, k),
        scale: Vec3::new(
            approach(current.scale.x, target.scale.x, k),
            approach(current.scale.y, target.scale.y, k),
            approach(current.scale.z, target.scale.z, k),
        ),
        tint: approach(current.tint, target.tint, k),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn active_panel_target() {
        let pose = target_pose(3, 3);
        assert_eq!(pose.x, 0.0);
        assert_eq!(pose.z, 0.0);
        assert_eq!(pose.rotation_y, 0.0);
        assert_eq!(pose.scale, Vec3::splat(1.2));
        assert_eq!(pose.tint, 1.0);
    }

    #[test]
    fn offset_panel_targets() {
        let right = target_pose(4, 2);
        assert!(close(right.x, 5.0));
        assert!(close(right.z, -2.0));
        assert!(close(right.rotation_y, -0.6));
        assert_eq!(right.scale, Vec3::ONE);
        assert!(close(right.tint, 0.6));

        let left = target_pose(0, 1);
        assert!(close(left.x, -2.5));
        assert!(close(left.z, -1.0));
        assert!(close(left.rotation_y, 0.3));
    }

    #[test]
    fn one_tick_closes_ten_percent() {
        let rest = Pose {
            x: 0.0,
            z: 0.0,
            rotation_y: 0.0,
            scale: Vec3::ZERO,
            tint: 0.6,
        };
        let target = target_pose(2, 0);
        let next = advance(&rest, &target, Smoothing::DEFAULT);
        assert!(close(next.x, 0.5));
        assert!(close(next.z, -0.2));
        assert!(close(next.rotation_y, -0.06));
        assert!(close(next.scale.x, 0.1));
        assert!(close(next.scale.y, 0.1));
        assert!(close(next.scale.z, 0.1));
        assert!(close(next.tint, 0.6));
    }

    #[test]
    fn error_decays_geometrically() {
        let target = target_pose(0, 3);
        let start = Pose::default();
        let initial = start.max_error(&target);

        let mut pose = start;
        for k in 1..=40 {
            pose = advance(&pose, &target, Smoothing::DEFAULT);
            let expected = initial * 0.9_f32.powi(k);
            assert!((pose.max_error(&target) - expected).abs() < 1e-4);
        }
    }

    #[test]
    fn never_overshoots() {
        let target = target_pose(1, 0);
        let mut pose = Pose::default();
        for _ in 0..200 {
            let next = advance(&pose, &target, Smoothing::DEFAULT);
            assert!(next.x <= target.x + EPS);
            assert!(next.x >= pose.x - EPS);
            pose = next;
        }
    }

    #[test]
    fn settled_pose_stays_settled() {
        let target = target_pose(2, 2);
        let mut pose = Pose::default();
        while !pose.is_settled(&target, 1e-4) {
            pose = advance(&pose, &target, Smoothing::DEFAULT);
        }
        for _ in 0..1000 {
            pose = advance(&pose, &target, Smoothing::DEFAULT);
            assert!(pose.is_settled(&target, 1e-4));
        }
    }

    #[test]
    fn smoothing_rejects_out_of_range() {
        assert!(Smoothing::new(0.0).is_err());
        assert!(Smoothing::new(-0.1).is_err());
        assert!(Smoothing::new(1.5).is_err());
        assert!(Smoothing::new(f32::NAN).is_err());
        assert_eq!(Smoothing::new(1.0).unwrap().fraction(), 1.0);
    }

    #[test]
    fn full_smoothing_snaps() {
        let target = target_pose(0, 2);
        let pose = advance(&Pose::default(), &target, Smoothing::new(1.0).unwrap());
        assert!(pose.is_settled(&target, EPS));
    }
}
