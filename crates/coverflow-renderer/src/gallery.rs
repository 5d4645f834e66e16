use crate::camera::Camera;
use crate::panel::{generate_panel_mesh, PANEL_SIZE};
use crate::pipeline::{RenderPipeline, Uniforms};
use crate::scene::Scene;
use crate::texture::PanelImage;
use wgpu::util::DeviceExt;

/// Dark backdrop behind the panels.
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.02,
    g: 0.02,
    b: 0.03,
    a: 1.0,
};

/// GPU resources for a single panel (mesh, image, per-panel uniforms).
pub struct PanelGpuResources {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
    pub texture: wgpu::Texture,
    pub texture_bind_group: wgpu::BindGroup,
    pub uniform_buffer: wgpu::Buffer,
    pub uniform_bind_group: wgpu::BindGroup,
}

/// Draws every gallery panel in one pass onto the window surface.
pub struct GalleryRenderer {
    pub render_pipeline: RenderPipeline,
}

impl GalleryRenderer {
    pub fn new(
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            render_pipeline: RenderPipeline::new(device, color_format, width, height),
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.render_pipeline.resize(device, width, height);
    }

    /// Create GPU resources for a panel and upload its image.
    pub fn create_panel_resources(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &PanelImage,
    ) -> PanelGpuResources {
        let mesh = generate_panel_mesh(PANEL_SIZE);

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("panel_vertex_buffer"),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("panel_index_buffer"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let (texture, texture_view) = create_panel_texture(device, image.width, image.height);
        let texture_bind_group = self
            .render_pipeline
            .create_texture_bind_group(device, &texture_view);

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("panel_uniform_buffer"),
            size: std::mem::size_of::<Uniforms>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let uniform_bind_group = self
            .render_pipeline
            .create_uniform_bind_group(device, &uniform_buffer);

        let resources = PanelGpuResources {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
            texture,
            texture_bind_group,
            uniform_buffer,
            uniform_bind_group,
        };

        self.upload_image(queue, &resources, image);
        resources
    }

    /// Upload RGBA8 pixels to a panel's texture.
    pub fn upload_image(&self, queue: &wgpu::Queue, resources: &PanelGpuResources, image: &PanelImage) {
        queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &resources.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &image.data,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(4 * image.width),
                rows_per_image: Some(image.height),
            },
            wgpu::Extent3d {
                width: image.width,
                height: image.height,
                depth_or_array_layers: 1,
            },
        );
    }

    /// Render the scene into `target`.
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        target: &wgpu::TextureView,
        scene: &Scene,
        camera: &Camera,
        panel_resources: &[PanelGpuResources],
    ) -> wgpu::CommandBuffer {
        let view = camera.view_matrix();
        let projection = camera.projection_matrix();

        for (panel, resources) in scene.panels.iter().zip(panel_resources.iter()) {
            let uniforms = Uniforms::new(panel.model_matrix(), view, projection, panel.tint);
            queue.write_buffer(&resources.uniform_buffer, 0, bytemuck::cast_slice(&[uniforms]));
        }

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("gallery_render"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("gallery_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.render_pipeline.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            pass.set_pipeline(&self.render_pipeline.pipeline);

            for index in scene.draw_order() {
                let Some(resources) = panel_resources.get(index) else {
                    continue;
                };
                pass.set_bind_group(0, &resources.uniform_bind_group, &[]);
                pass.set_bind_group(1, &resources.texture_bind_group, &[]);
                pass.set_vertex_buffer(0, resources.vertex_buffer.slice(..));
                pass.set_index_buffer(resources.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..resources.index_count, 0, 0..1);
            }
        }

        encoder.finish()
    }
}

fn create_panel_texture(
    device: &wgpu::Device,
    width: u32,
    height: u32,
) -> (wgpu::Texture, wgpu::TextureView) {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("panel_texture"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });
    let view = texture.create_view(&Default::default());
    (texture, view)
}
