use coverflow_engine::{GestureTuning, PoseLayout, Settings, Smoothing};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Length of the default image list. It names `assets/covers/cover-1.png` onwards;
/// no covers ship with the crate, and missing files render as placeholders.
const DEFAULT_COVER_COUNT: usize = 8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Ordered image list, one panel per entry. Fixed for the whole run.
    pub images: Vec<PathBuf>,
    pub window: WindowConfig,
    pub camera: CameraConfig,
    /// Swipe thresholds.
    pub navigation: GestureTuning,
    pub animation: AnimationConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            images: (1..=DEFAULT_COVER_COUNT)
                .map(|i| PathBuf::from(format!("assets/covers/cover-{i}.png")))
                .collect(),
            window: WindowConfig::default(),
            camera: CameraConfig::default(),
            navigation: GestureTuning::default(),
            animation: AnimationConfig::default(),
        }
    }
}

impl AppConfig {
    /// Engine tuning derived from this config.
    pub fn engine_settings(&self) -> Settings {
        Settings {
            gesture: self.navigation,
            layout: self.animation.layout,
            smoothing: self.animation.smoothing,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Cover Flow".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Eye position; the camera always looks down -Z.
    #[serde(with = "vec3_serde")]
    pub position: Vec3,
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 5.0),
            fov_y_degrees: 50.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Fraction of the remaining distance covered per rendered frame.
    pub smoothing: Smoothing,
    pub layout: PoseLayout,
}

// glam's own serde output is a struct; TOML reads nicer as a plain array.
mod vec3_serde {
    use glam::Vec3;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(v: &Vec3, s: S) -> Result<S::Ok, S::Error> {
        [v.x, v.y, v.z].serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec3, D::Error> {
        let [x, y, z] = <[f32; 3]>::deserialize(d)?;
        Ok(Vec3::new(x, y, z))
    }
}
