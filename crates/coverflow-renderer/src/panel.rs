use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// Vertex format for panel meshes.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct PanelVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
    pub normal: [f32; 3],
}

impl PanelVertex {
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // position
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                // uv
                wgpu::VertexAttribute {
                    offset: 12,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
                // normal
                wgpu::VertexAttribute {
                    offset: 20,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

/// Width and height of every gallery panel in world units.
pub const PANEL_SIZE: Vec2 = Vec2::new(2.0, 2.0);

/// A generated panel mesh (vertices + indices).
pub struct PanelMesh {
    pub vertices: Vec<PanelVertex>,
    pub indices: Vec<u32>,
}

/// Flat quad centered on the origin, facing +Z.
pub fn generate_panel_mesh(size: Vec2) -> PanelMesh {
    let hw = size.x / 2.0;
    let hh = size.y / 2.0;
    let normal = [0.0, 0.0, 1.0];

    let vertices = vec![
        PanelVertex {
            position: [-hw, hh, 0.0],
            uv: [0.0, 0.0],
            normal,
        },
        PanelVertex {
            position: [hw, hh, 0.0],
            uv: [1.0, 0.0],
            normal,
        },
        PanelVertex {
            position: [-hw, -hh, 0.0],
            uv: [0.0, 1.0],
            normal,
        },
        PanelVertex {
            position: [hw, -hh, 0.0],
            uv: [1.0, 1.0],
            normal,
        },
    ];

    let indices = vec![0, 2, 1, 1, 2, 3];

    PanelMesh { vertices, indices }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_has_two_triangles() {
        let mesh = generate_panel_mesh(PANEL_SIZE);
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices.len(), 6);
    }

    #[test]
    fn quad_spans_requested_size() {
        let mesh = generate_panel_mesh(Vec2::new(2.0, 1.0));
        let xs: Vec<f32> = mesh.vertices.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = mesh.vertices.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 1.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), -0.5);
    }

    #[test]
    fn winding_is_counter_clockwise_from_front() {
        let mesh = generate_panel_mesh(PANEL_SIZE);
        let p = |i: u32| Vec2::from_slice(&mesh.vertices[i as usize].position[..2]);
        for tri in mesh.indices.chunks(3) {
            let (a, b, c) = (p(tri[0]), p(tri[1]), p(tri[2]));
            assert!((b - a).perp_dot(c - a) > 0.0);
        }
    }
}
