use std::sync::Arc;

use egui::Context as EguiContext;
use storehouse_common::{InitError, Viewport};
use storehouse_layout::Layout;
use storehouse_render::{RenderView, Renderer};
use storehouse_render_wgpu::{LightTuning, WgpuRenderer};
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::Window;

use crate::hud::{self, HudStats};

/// Window-backed renderer: wgpu scene plus the egui overlay.
pub struct DesktopRenderer {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    scene: WgpuRenderer,
    egui_ctx: EguiContext,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
    pub tuning: LightTuning,
    pub stats: HudStats,
}

impl DesktopRenderer {
    /// Open the window and bring up the GPU. Any failure is fatal.
    pub fn new(
        event_loop: &ActiveEventLoop,
        title: &str,
        viewport: Viewport,
        tuning: LightTuning,
    ) -> Result<Self, InitError> {
        let viewport = viewport.clamped();
        let attrs = Window::default_attributes()
            .with_title(title)
            .with_inner_size(PhysicalSize::new(viewport.width, viewport.height));
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(|e| InitError::Window(e.to_string()))?,
        );

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .map_err(|e| InitError::Surface(e.to_string()))?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or(InitError::NoAdapter)?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("storehouse_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .map_err(|e| InitError::Device(e.to_string()))?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or(InitError::NoSurfaceFormat)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let scene = WgpuRenderer::new(&device, surface_format, config.width, config.height);

        let egui_ctx = EguiContext::default();
        let egui_winit = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        tracing::info!(
            backend = adapter.get_info().backend.to_str(),
            format = ?surface_format,
            "GPU initialized"
        );

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            scene,
            egui_ctx,
            egui_winit,
            egui_renderer,
            tuning,
            stats: HudStats::default(),
        })
    }

    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    /// Current drawable size in physical pixels.
    pub fn surface_size(&self) -> Viewport {
        Viewport::new(self.config.width, self.config.height)
    }

    /// Let the overlay see a window event. Returns true if it consumed it.
    pub fn on_window_event(&mut self, event: &WindowEvent) -> bool {
        self.egui_winit.on_window_event(&self.window, event).consumed
    }

    /// Whether the pointer is over an overlay widget.
    pub fn wants_pointer(&self) -> bool {
        self.egui_ctx.wants_pointer_input()
    }

    fn draw_overlay(&mut self, target: &wgpu::TextureView) {
        let raw_input = self.egui_winit.take_egui_input(&self.window);
        let tuning = &mut self.tuning;
        let stats = &self.stats;
        let scene = (self.scene.instance_count(), self.scene.light_count());
        let full_output = self
            .egui_ctx
            .run(raw_input, |ctx| hud::draw_panel(ctx, tuning, stats, scene));

        self.egui_winit
            .handle_platform_output(&self.window, full_output.platform_output);

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
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
                        view: target,
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
    }
}

impl Renderer for DesktopRenderer {
    /// Errors the surface could not recover from by reconfiguring.
    type Output = Result<(), wgpu::SurfaceError>;

    fn populate(&mut self, layout: &Layout) {
        self.scene.populate(&self.device, layout);
    }

    fn render(&mut self, view: &RenderView) -> Self::Output {
        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        let target = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.scene
            .render(&self.device, &self.queue, &target, view, &self.tuning);
        self.draw_overlay(&target);

        frame.present();
        Ok(())
    }

    fn resize(&mut self, viewport: Viewport) {
        let viewport = viewport.clamped();
        self.config.width = viewport.width;
        self.config.height = viewport.height;
        self.surface.configure(&self.device, &self.config);
        self.scene
            .resize(&self.device, viewport.width, viewport.height);
    }
}
