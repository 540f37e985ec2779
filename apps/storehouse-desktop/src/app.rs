use glam::Vec2;
use storehouse_common::{InitError, Viewport};
use storehouse_frame::{FrameOutcome, FrameScheduler, Stage};
use storehouse_input::InputState;
use storehouse_layout::Layout;
use storehouse_locomotion::{
    InteractionMode, LocomotionController, LocomotionSettings, NavigationState, StrategyKind,
};
use storehouse_render_wgpu::LightTuning;
use winit::application::ApplicationHandler;
use winit::event::{DeviceEvent, DeviceId, ElementState, MouseButton, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::window::WindowId;

use crate::capture::WindowCapture;
use crate::hud::HudStats;
use crate::keymap;
use crate::viewer::DesktopRenderer;

const TITLE: &str = "Storehouse";

/// Everything that only exists once the window is up.
struct Viewer {
    stage: Stage<DesktopRenderer>,
    capture: WindowCapture,
}

/// Composition root: owns the scene, rig, input and frame loop.
pub struct ViewerApp {
    layout: Layout,
    tuning: LightTuning,
    scheduler: FrameScheduler,
    controller: LocomotionController,
    input: InputState,
    viewer: Option<Viewer>,
    dragging: bool,
    init_error: Option<InitError>,
}

impl ViewerApp {
    pub fn new(
        layout: Layout,
        strategy: StrategyKind,
        settings: LocomotionSettings,
        tuning: LightTuning,
    ) -> Self {
        let nav = NavigationState::looking_at(layout.camera_anchor, layout.camera_target);
        let controller = LocomotionController::from_kind(strategy, &settings, nav, layout.camera_target);
        Self {
            layout,
            tuning,
            scheduler: FrameScheduler::default(),
            controller,
            input: InputState::new(),
            viewer: None,
            dragging: false,
            init_error: None,
        }
    }

    /// The fatal error that stopped the event loop, if any.
    pub fn take_init_error(&mut self) -> Option<InitError> {
        self.init_error.take()
    }

    /// Pointer motion only steers the rig while locked, or while dragging
    /// for strategies that never lock.
    fn steering(&self) -> bool {
        if self.controller.requires_lock() {
            self.controller.mode() == InteractionMode::Locked
        } else {
            self.dragging
        }
    }

    fn lose_focus(&mut self) {
        self.scheduler.set_focus(false);
        self.input.release_all();
        self.dragging = false;
        if let Some(viewer) = &mut self.viewer {
            self.controller.release(&mut viewer.capture);
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(viewer) = &mut self.viewer else {
            return;
        };
        let timer = self.scheduler.timer();
        viewer.stage.renderer.stats = HudStats::sample(
            &self.controller,
            timer.fps(),
            timer.average().as_secs_f32() * 1000.0,
        );

        let outcome = self.scheduler.frame(
            &mut viewer.stage,
            &mut self.controller,
            &mut self.input,
            &mut viewer.capture,
        );
        if let FrameOutcome::Rendered {
            output: Err(e), ..
        } = outcome
        {
            match e {
                wgpu::SurfaceError::OutOfMemory => {
                    tracing::error!("surface out of memory; exiting");
                    event_loop.exit();
                }
                other => tracing::warn!("frame skipped: {other}"),
            }
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.viewer.is_some() {
            return;
        }

        let renderer =
            match DesktopRenderer::new(event_loop, TITLE, Viewport::default(), self.tuning) {
                Ok(renderer) => renderer,
                Err(e) => {
                    tracing::error!("initialization failed: {e}");
                    self.init_error = Some(e);
                    event_loop.exit();
                    return;
                }
            };

        let capture = WindowCapture::new(renderer.window().clone());
        let viewport = renderer.surface_size();
        let mut stage = Stage::with_viewport(viewport, renderer);
        stage.populate(&self.layout);

        tracing::info!(
            strategy = %self.controller.kind(),
            width = viewport.width,
            height = viewport.height,
            "viewer ready"
        );
        self.viewer = Some(Viewer { stage, capture });
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let Some(viewer) = &mut self.viewer else {
            return;
        };

        // The overlay is inert while the pointer is locked to the scene.
        let consumed = self.controller.mode() == InteractionMode::Unlocked
            && viewer.stage.renderer.on_window_event(&event);
        if let WindowEvent::KeyboardInput { event: key, .. } = &event {
            keymap::apply_key(&mut self.input, key.physical_key, key.state, consumed);
            return;
        }
        if consumed {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                self.scheduler
                    .resize(&mut viewer.stage, Viewport::new(size.width, size.height));
            }
            WindowEvent::Focused(true) => {
                self.scheduler.set_focus(true);
            }
            WindowEvent::Focused(false) => {
                self.lose_focus();
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state,
                ..
            } => {
                let pressed = state == ElementState::Pressed;
                let over_overlay = viewer.stage.renderer.wants_pointer();
                self.dragging = pressed && !over_overlay;
                if pressed && !over_overlay {
                    self.input.request_lock();
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.input.wheel(keymap::wheel_delta(delta));
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }
            _ => {}
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _device_id: DeviceId, event: DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            if self.steering() {
                self.input
                    .pointer_motion(Vec2::new(delta.0 as f32, delta.1 as f32));
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(viewer) = &self.viewer {
            viewer.stage.renderer.window().request_redraw();
        }
    }
}
