use coverflow_engine::{Pose, RenderPanel};
use glam::Mat4;

/// A renderable panel in the 3D scene.
#[derive(Debug, Clone)]
pub struct ScenePanel {
    pub index: usize,
    pub pose: Pose,
    pub tint: f32,
}

impl ScenePanel {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            pose: Pose::default(),
            tint: 1.0,
        }
    }

    pub fn model_matrix(&self) -> Mat4 {
        self.pose.model_matrix()
    }
}

impl RenderPanel for ScenePanel {
    fn set_pose(&mut self, pose: &Pose) {
        self.pose = *pose;
    }

    fn set_tint(&mut self, tint: f32) {
        self.tint = tint.clamp(0.0, 1.0);
    }
}

/// The 3D scene containing all panels.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub panels: Vec<ScenePanel>,
}

impl Scene {
    pub fn new(count: usize) -> Self {
        Self {
            panels: (0..count).map(ScenePanel::new).collect(),
        }
    }

    /// Panel indices ordered far-to-near, so blended edges composite correctly.
    pub fn draw_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.panels.len()).collect();
        order.sort_by(|&a, &b| self.panels[a].pose.z.total_cmp(&self.panels[b].pose.z));
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coverflow_engine::{Coverflow, Settings};
    use glam::Vec3;

    #[test]
    fn engine_drives_scene() {
        let mut flow = Coverflow::new(vec!["a", "b", "c"], Settings::default()).unwrap();
        let mut scene = Scene::new(flow.panel_count());
        flow.wheel(1.0);
        for _ in 0..400 {
            flow.tick_into(&mut scene.panels);
        }

        let focused = &scene.panels[1];
        assert!(focused.pose.translation().length() < 1e-3);
        assert!((focused.tint - 1.0).abs() < 1e-3);
        assert!((scene.panels[0].tint - 0.6).abs() < 1e-3);
    }

    #[test]
    fn focused_panel_draws_last() {
        let mut scene = Scene::new(3);
        scene.panels[0].pose.z = -1.0;
        scene.panels[1].pose.z = 0.0;
        scene.panels[2].pose.z = -1.0;
        assert_eq!(scene.draw_order().last(), Some(&1));
    }

    #[test]
    fn model_matrix_places_panel() {
        let mut panel = ScenePanel::new(0);
        panel.set_pose(&Pose {
            x: 2.5,
            z: -1.0,
            rotation_y: 0.0,
            scale: Vec3::ONE,
            tint: 0.6,
        });
        let origin = panel.model_matrix().transform_point3(Vec3::ZERO);
        assert!((origin - Vec3::new(2.5, 0.0, -1.0)).length() < 1e-6);
    }
}
