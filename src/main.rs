use anyhow::{Context, Result};
use coverflow_config::AppConfig;
use coverflow_engine::{Coverflow, Overlay};
use coverflow_input::{attach, mouse, Attachment, InputEvent, InputSurface, TouchTracker};
use coverflow_renderer::camera::Camera;
use coverflow_renderer::gallery::{GalleryRenderer, PanelGpuResources};
use coverflow_renderer::scene::Scene;
use coverflow_renderer::texture::PanelImage;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

/// Application state.
struct App {
    config: AppConfig,
    engine: Rc<RefCell<Coverflow<PathBuf>>>,
    /// Container surface the gallery listens on.
    surface: InputSurface,
    /// Released on exit, or when the app is dropped.
    attachment: Option<Attachment>,
    touches: TouchTracker,
    /// Decoded images, handed to the GPU once the window exists.
    images: Vec<PanelImage>,
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    /// Overlay currently shown in the title bar.
    shown: Option<Overlay>,
}

struct GpuState {
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    surface_config: wgpu::SurfaceConfiguration,
    renderer: GalleryRenderer,
    scene: Scene,
    panel_resources: Vec<PanelGpuResources>,
    camera: Camera,
    frame_count: u64,
}

impl App {
    fn new(config: AppConfig, engine: Coverflow<PathBuf>, images: Vec<PanelImage>) -> Self {
        let engine = Rc::new(RefCell::new(engine));
        let surface = InputSurface::new();
        let attachment = attach(&surface, engine.clone());

        Self {
            config,
            engine,
            surface,
            attachment: Some(attachment),
            touches: TouchTracker::new(),
            images,
            window: None,
            gpu: None,
            shown: None,
        }
    }

    fn dispatch(&mut self, event: InputEvent) {
        let consumed = self.surface.dispatch(&event);
        debug!(?event, consumed, "Input dispatched");
        self.refresh_overlay();
    }

    /// Show the "i of N" indicator in the window title when it changes.
    fn refresh_overlay(&mut self) {
        let overlay = self.engine.borrow().overlay();
        if self.shown == Some(overlay) {
            return;
        }
        if let Some(window) = &self.window {
            window.set_title(&format!("{} | {}", self.config.window.title, overlay));
            let engine = self.engine.borrow();
            let image = engine.panels()[overlay.active].handle();
            info!(active = overlay.active, total = overlay.total, ?image, "Focused panel");
            self.shown = Some(overlay);
        }
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        self.attachment.take();
        event_loop.exit();
    }

    fn init_gpu(&mut self, window: Arc<Window>) -> Result<GpuState> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor::default());

        let surface = instance
            .create_surface(window.clone())
            .context("Failed to create surface")?;

        let (device, queue, adapter) = pollster::block_on(async {
            let adapter = instance
                .request_adapter(&wgpu::RequestAdapterOptions {
                    power_preference: wgpu::PowerPreference::default(),
                    compatible_surface: Some(&surface),
                    force_fallback_adapter: false,
                })
                .await
                .context("No suitable GPU adapter found")?;

            info!(name = adapter.get_info().name, "Using GPU");

            let (device, queue) = adapter
                .request_device(
                    &wgpu::DeviceDescriptor {
                        label: Some("coverflow_device"),
                        required_features: wgpu::Features::empty(),
                        required_limits: wgpu::Limits::default(),
                        memory_hints: Default::default(),
                    },
                    None,
                )
                .await
                .context("Failed to create device")?;

            Ok::<_, anyhow::Error>((device, queue, adapter))
        })?;

        let win_size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);

        let format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .context("Surface reports no supported formats")?;

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: win_size.width.max(1),
            height: win_size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: wgpu::CompositeAlphaMode::Auto,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);

        let renderer = GalleryRenderer::new(&device, format, surface_config.width, surface_config.height);

        let panel_resources: Vec<PanelGpuResources> = self
            .images
            .drain(..)
            .map(|image| renderer.create_panel_resources(&device, &queue, &image))
            .collect();

        let scene = Scene::new(panel_resources.len());

        let camera_config = self.config.camera;
        let mut camera = Camera::new(
            camera_config.position,
            camera_config.fov_y_degrees,
            camera_config.near,
            camera_config.far,
        );
        camera.set_viewport(surface_config.width, surface_config.height);

        Ok(GpuState {
            device,
            queue,
            surface,
            surface_config,
            renderer,
            scene,
            panel_resources,
            camera,
            frame_count: 0,
        })
    }

    fn redraw(&mut self) {
        let Some(gpu) = &mut self.gpu else {
            return;
        };

        // One animation step per rendered frame.
        self.engine.borrow_mut().tick_into(&mut gpu.scene.panels);

        let output = match gpu.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.surface.configure(&gpu.device, &gpu.surface_config);
                return;
            }
            Err(e) => {
                warn!(?e, "Failed to get surface texture");
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let cmd = gpu.renderer.render(
            &gpu.device,
            &gpu.queue,
            &view,
            &gpu.scene,
            &gpu.camera,
            &gpu.panel_resources,
        );
        gpu.queue.submit(std::iter::once(cmd));
        output.present();

        gpu.frame_count += 1;
        if gpu.frame_count % 300 == 0 {
            debug!(frames = gpu.frame_count, "Render heartbeat");
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(self.config.window.title.clone())
            .with_inner_size(PhysicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));

        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!(?e, "Failed to create window");
                self.shutdown(event_loop);
                return;
            }
        };
        self.window = Some(window.clone());

        match self.init_gpu(window.clone()) {
            Ok(gpu) => {
                info!(panels = gpu.panel_resources.len(), "Application initialized");
                self.gpu = Some(gpu);
            }
            Err(e) => {
                error!(?e, "GPU initialization failed");
                self.shutdown(event_loop);
                return;
            }
        }

        self.refresh_overlay();
        window.request_redraw();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => self.shutdown(event_loop),

            WindowEvent::Resized(size) => {
                if size.width > 0 && size.height > 0 {
                    if let Some(gpu) = &mut self.gpu {
                        gpu.surface_config.width = size.width;
                        gpu.surface_config.height = size.height;
                        gpu.surface.configure(&gpu.device, &gpu.surface_config);
                        gpu.renderer.resize(&gpu.device, size.width, size.height);
                        gpu.camera.set_viewport(size.width, size.height);
                    }
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state.is_pressed()
                    && event.physical_key == PhysicalKey::Code(KeyCode::Escape)
                {
                    self.shutdown(event_loop);
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                if let Some(event) = mouse::wheel_event(delta) {
                    self.dispatch(event);
                }
            }

            WindowEvent::Touch(touch) => {
                let scale_factor = self.window.as_ref().map_or(1.0, |w| w.scale_factor());
                if let Some(event) = self.touches.on_touch(&touch, scale_factor, Instant::now()) {
                    self.dispatch(event);
                }
            }

            WindowEvent::RedrawRequested => {
                self.redraw();

                // Request next frame.
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "coverflow=info,coverflow_config=info,coverflow_renderer=info".into()
            }),
        )
        .init();

    info!("Cover flow starting");

    let config_exists = coverflow_config::config_path()
        .map(|p| p.exists())
        .unwrap_or(false);
    let config = coverflow_config::load_config().unwrap_or_else(|e| {
        warn!(?e, "Failed to load config, using defaults");
        AppConfig::default()
    });
    if !config_exists {
        if let Err(e) = coverflow_config::save_config(&config) {
            warn!(?e, "Failed to write default config");
        }
    }

    // The image list is fixed from here on.
    let images: Vec<PanelImage> = config
        .images
        .iter()
        .enumerate()
        .map(|(i, path)| PanelImage::load_or_placeholder(path, i))
        .collect();

    let engine = Coverflow::new(config.images.clone(), config.engine_settings())
        .context("Config lists no images")?;
    info!(panels = engine.panel_count(), "Gallery ready");

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config, engine, images);
    event_loop.run_app(&mut app)?;

    Ok(())
}
