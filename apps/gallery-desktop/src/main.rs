use anyhow::{Context, Result};
use clap::Parser;
use egui::Context as EguiContext;
use gallery_assets::{SourceManifest, TextureStore};
use gallery_common::Screen;
use gallery_input::{InputEvent, TouchPhase, TouchTracker, WheelDelta};
use gallery_kernel::{Gallery, GalleryConfig, GalleryEvent, ViewMode};
use gallery_layout::{GridLayout, GridLayoutConfig};
use gallery_render::{TextureBindings, project_quads};
use gallery_render_wgpu::{GalleryCamera, WgpuRenderer};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "gallery-desktop", about = "Infinite gallery desktop viewer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Media directory or JSON manifest; placeholders are generated when omitted
    #[arg(long)]
    images: Option<PathBuf>,

    /// Placeholder tile count when no media is given
    #[arg(long, default_value = "24")]
    tiles: usize,

    /// JSON viewer config
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
struct WindowConfig {
    width: u32,
    height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

/// Everything the viewer reads from its config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct ViewerConfig {
    gallery: GalleryConfig,
    layout: GridLayoutConfig,
    window: WindowConfig,
}

impl ViewerConfig {
    fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => gallery_kernel::config::load_json::<Self>(path)
                .with_context(|| format!("reading config {}", path.display()))?,
            None => Self::default(),
        };
        config.gallery.validate()?;
        config.layout.validate()?;
        Ok(config)
    }
}

/// Engine-side state, independent of the GPU.
struct AppState {
    gallery: Gallery,
    layout: GridLayout,
    store: TextureStore,
    bindings: TextureBindings,
    camera: GalleryCamera,
    touch: TouchTracker,
    cursor: (f32, f32),
    show_stats: bool,
    wraps: u64,
    last_frame: Instant,
    frame_ms: f32,
}

impl AppState {
    fn new(config: &ViewerConfig, store: TextureStore) -> Result<Self> {
        let tile_count = store.tile_count();
        let layout = GridLayout::new(config.layout, tile_count)?;
        let bindings = TextureBindings::from_store(&store);
        let screen = Screen::new(config.window.width as f32, config.window.height as f32);
        Ok(Self {
            gallery: Gallery::new(config.gallery, tile_count),
            layout,
            store,
            bindings,
            camera: GalleryCamera::new(config.gallery.camera, screen),
            touch: TouchTracker::new(),
            cursor: (0.0, 0.0),
            show_stats: true,
            wraps: 0,
            last_frame: Instant::now(),
            frame_ms: 0.0,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        let screen = Screen::new(width as f32, height as f32);
        self.camera.resize(screen);
        self.gallery
            .resize(screen, self.camera.params, &mut self.layout);
    }

    fn input(&mut self, event: InputEvent) {
        if event.apply(&mut self.gallery) {
            tracing::info!(mode = ?self.gallery.mode(), "view mode toggled");
        }
    }

    fn update(&mut self) {
        let now = Instant::now();
        self.frame_ms = (now - self.last_frame).as_secs_f32() * 1000.0;
        self.last_frame = now;

        self.gallery.update();
        for event in self.gallery.drain_events() {
            if let GalleryEvent::Wrapped { .. } = event {
                self.wraps += 1;
            }
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        if key == KeyCode::F1 {
            self.show_stats = !self.show_stats;
        }
    }

    fn draw_ui(&self, ctx: &EguiContext) {
        if !self.show_stats {
            return;
        }

        let summary = self.gallery.summary();
        egui::SidePanel::left("stats")
            .default_width(240.0)
            .show(ctx, |ui| {
                ui.heading("Gallery");
                ui.separator();
                ui.label(format!("Frame: {}  ({:.1} ms)", summary.frame, self.frame_ms));
                ui.label(format!(
                    "Tiles: {} placed / {} total",
                    summary.placed, summary.tile_count
                ));
                ui.label(format!(
                    "Textures: {} loaded, {} failed",
                    self.store.loaded_count(),
                    self.store.failures().len()
                ));
                ui.separator();
                ui.label(format!(
                    "Scroll: ({:.0}, {:.0})",
                    summary.scroll.x, summary.scroll.y
                ));
                ui.label(format!(
                    "Target: ({:.0}, {:.0})",
                    summary.target.x, summary.target.y
                ));
                ui.label(format!(
                    "Direction: {:?} / {:?}",
                    summary.direction_x, summary.direction_y
                ));
                ui.label(format!("Wraps: {}", self.wraps));
                if let Some(tile) = self.gallery.hovered() {
                    ui.label(format!("Hovered: tile {tile}"));
                }
                match summary.mode {
                    ViewMode::Overview => ui.label("Mode: overview"),
                    ViewMode::Detail { tile } => ui.label(format!("Mode: detail (tile {tile})")),
                };
                ui.separator();
                ui.small("Drag or wheel to scroll | Click a tile: detail | F1: stats");
            });
    }
}

/// Window plus every GPU object, created together once the event loop resumes.
struct Gpu {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: WgpuRenderer,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

impl Gpu {
    fn new(event_loop: &ActiveEventLoop, egui_ctx: &EguiContext, size: WindowConfig) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title("Infinite Gallery")
            .with_inner_size(PhysicalSize::new(size.width, size.height));
        let window = Arc::new(event_loop.create_window(attrs)?);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window.clone())?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("no compatible GPU adapter")?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("gallery_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))?;

        let size = window.inner_size();
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first())
            .copied()
            .context("surface reports no formats")?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let renderer = WgpuRenderer::new(&device, format);
        let egui_winit = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, format, None, 1, false);

        tracing::info!(
            backend = adapter.get_info().backend.to_str(),
            "GPU initialized"
        );

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            renderer,
            egui_winit,
            egui_renderer,
        })
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        self.config.width = size.width.max(1);
        self.config.height = size.height.max(1);
        self.surface.configure(&self.device, &self.config);
    }

    fn upload_textures(&mut self, store: &TextureStore) {
        for (id, image) in store.textures() {
            self.renderer.upload_texture(
                &self.device,
                &self.queue,
                id,
                image.width,
                image.height,
                &image.rgba,
            );
        }
        tracing::info!(textures = self.renderer.texture_count(), "textures on GPU");
    }

    fn draw_frame(&mut self, state: &AppState, egui_ctx: &EguiContext) {
        let output = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let quads = project_quads(&state.gallery, &state.bindings);
        self.renderer
            .render(&self.device, &self.queue, &view, &state.camera, &quads);

        let raw_input = self.egui_winit.take_egui_input(&self.window);
        let full_output = egui_ctx.run(raw_input, |ctx| state.draw_ui(ctx));
        self.egui_winit
            .handle_platform_output(&self.window, full_output.platform_output);

        let paint_jobs = egui_ctx.tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, image_delta);
        }
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui_encoder"),
            });
        self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            self.egui_renderer
                .render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        self.queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        output.present();
    }
}

struct GpuApp {
    state: AppState,
    window_config: WindowConfig,
    gpu: Option<Gpu>,
    egui_ctx: EguiContext,
}

impl GpuApp {
    fn new(state: AppState, window_config: WindowConfig) -> Self {
        Self {
            state,
            window_config,
            gpu: None,
            egui_ctx: EguiContext::default(),
        }
    }
}

/// winit reports wheel-up as positive; the gallery scrolls toward the end on positive.
fn wheel_delta(delta: MouseScrollDelta) -> WheelDelta {
    match delta {
        MouseScrollDelta::LineDelta(x, y) => WheelDelta::Lines { x: -x, y: -y },
        MouseScrollDelta::PixelDelta(p) => WheelDelta::Pixels {
            x: -p.x as f32,
            y: -p.y as f32,
        },
    }
}

fn touch_phase(phase: winit::event::TouchPhase) -> TouchPhase {
    match phase {
        winit::event::TouchPhase::Started => TouchPhase::Started,
        winit::event::TouchPhase::Moved => TouchPhase::Moved,
        winit::event::TouchPhase::Ended => TouchPhase::Ended,
        winit::event::TouchPhase::Cancelled => TouchPhase::Cancelled,
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }

        let mut gpu = match Gpu::new(event_loop, &self.egui_ctx, self.window_config) {
            Ok(gpu) => gpu,
            Err(e) => {
                tracing::error!("failed to initialize GPU: {e:#}");
                event_loop.exit();
                return;
            }
        };
        gpu.upload_textures(&self.state.store);

        let size = gpu.window.inner_size();
        self.state.resize(size.width, size.height);
        self.gpu = Some(gpu);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(gpu) = &mut self.gpu else {
            return;
        };

        let response = gpu.egui_winit.on_window_event(&gpu.window, &event);
        if response.consumed {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                gpu.resize(new_size);
                self.state.resize(new_size.width, new_size.height);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                self.state.handle_key(key);
            }
            WindowEvent::CursorMoved { position, .. } => {
                let (x, y) = (position.x as f32, position.y as f32);
                self.state.cursor = (x, y);
                self.state.input(InputEvent::Move { x, y });
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state: btn_state,
                ..
            } => {
                let (x, y) = self.state.cursor;
                let event = match btn_state {
                    ElementState::Pressed => InputEvent::Down { x, y },
                    ElementState::Released => InputEvent::Up { x, y },
                };
                self.state.input(event);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.state.input(InputEvent::Wheel(wheel_delta(delta)));
            }
            WindowEvent::Touch(touch) => {
                let (x, y) = (touch.location.x as f32, touch.location.y as f32);
                if let Some(event) =
                    self.state
                        .touch
                        .touch(touch.id, touch_phase(touch.phase), x, y)
                {
                    self.state.input(event);
                }
            }
            WindowEvent::RedrawRequested => {
                self.state.update();
                gpu.draw_frame(&self.state, &self.egui_ctx);
                gpu.window.request_redraw();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(gpu) = &self.gpu {
            gpu.window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("gallery-desktop starting");

    let config = ViewerConfig::load(cli.config.as_deref())?;
    let store = match &cli.images {
        Some(path) => {
            let manifest = SourceManifest::open(path)
                .with_context(|| format!("reading media from {}", path.display()))?;
            TextureStore::load_all(&manifest.sources)
        }
        None => TextureStore::placeholders(cli.tiles, 512, 640),
    };
    anyhow::ensure!(store.tile_count() > 0, "no media sources found");

    let state = AppState::new(&config, store)?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(state, config.window);
    event_loop.run_app(&mut app)?;

    Ok(())
}
