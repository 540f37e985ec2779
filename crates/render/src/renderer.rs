use std::fmt::Write as _;

use storehouse_common::Viewport;
use storehouse_layout::Layout;

use crate::camera::RenderView;

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer instantiates visuals for a layout once, then draws frames
/// from views it is handed. It never mutates layout or navigation state.
pub trait Renderer {
    /// The output type produced by one frame.
    type Output;

    /// Instantiate crate and light visuals for `layout`, replacing any
    /// previous scene.
    fn populate(&mut self, layout: &Layout);

    /// Render one frame from the given view.
    fn render(&mut self, view: &RenderView) -> Self::Output;

    /// Resize the output surface. Applied before the next `render`.
    fn resize(&mut self, viewport: Viewport);
}

/// Debug text renderer for headless runs and tests.
///
/// Produces a human-readable description of each frame.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    units: usize,
    lights: usize,
    aisles: usize,
    viewport: Viewport,
    frames: u64,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn populate(&mut self, layout: &Layout) {
        self.units = layout.units.len();
        self.lights = layout.lights.len();
        self.aisles = layout
            .units
            .iter()
            .map(|u| u.aisle + 1)
            .chain(layout.lights.iter().map(|l| l.aisle + 1))
            .max()
            .unwrap_or(0);
        tracing::debug!(units = self.units, lights = self.lights, "debug scene populated");
    }

    fn render(&mut self, view: &RenderView) -> String {
        self.frames += 1;
        let mut out = String::new();
        let _ = writeln!(
            out,
            "=== Frame {} ({}x{}) ===",
            self.frames, self.viewport.width, self.viewport.height
        );
        let _ = writeln!(
            out,
            "Scene: units={} lights={} aisles={}",
            self.units, self.lights, self.aisles
        );
        let target = view.target();
        let _ = writeln!(
            out,
            "Camera: eye=({:.2}, {:.2}, {:.2}) target=({:.2}, {:.2}, {:.2}) fov={:.0} aspect={:.3}",
            view.eye.x,
            view.eye.y,
            view.eye.z,
            target.x,
            target.y,
            target.z,
            view.fov_degrees,
            view.aspect
        );
        out
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Camera;
    use glam::Vec3;
    use storehouse_layout::{WarehouseConfig, generate_layout};
    use storehouse_locomotion::NavigationState;

    #[test]
    fn debug_renderer_empty_scene() {
        let mut renderer = DebugTextRenderer::new();
        renderer.populate(&generate_layout(&WarehouseConfig::new(
            Vec::<String>::new(),
            1,
            1,
            1,
        )));
        let view = Camera::default().view(&NavigationState::default());
        let output = renderer.render(&view);

        assert!(output.contains("Frame 1"));
        assert!(output.contains("units=0"));
        assert!(output.contains("aisles=0"));
    }

    #[test]
    fn debug_renderer_with_layout() {
        let mut renderer = DebugTextRenderer::new();
        renderer.populate(&generate_layout(&WarehouseConfig::new(["A1", "A2"], 1, 2, 2)));
        renderer.resize(Viewport::new(800, 600));

        let nav = NavigationState::new(Vec3::new(1.0, 2.0, 3.0));
        let view = Camera::for_viewport(renderer.viewport()).view(&nav);
        let output = renderer.render(&view);

        assert!(output.contains("(800x600)"));
        assert!(output.contains("units=16 lights=2 aisles=2"));
        assert!(output.contains("eye=(1.00, 2.00, 3.00)"));
        assert_eq!(renderer.frames(), 1);
    }
}
