use storehouse_common::Viewport;
use storehouse_layout::Layout;
use storehouse_locomotion::NavigationState;
use storehouse_render::{Camera, RenderView, Renderer};

/// The camera and renderer a composition root hands to the scheduler.
///
/// There is no global environment; whoever builds the stage owns it and
/// passes it by reference into every frame.
#[derive(Debug)]
pub struct Stage<R: Renderer> {
    pub camera: Camera,
    pub renderer: R,
}

impl<R: Renderer> Stage<R> {
    pub fn new(camera: Camera, renderer: R) -> Self {
        Self { camera, renderer }
    }

    /// A stage already sized to `viewport`.
    pub fn with_viewport(viewport: Viewport, renderer: R) -> Self {
        let mut stage = Self::new(Camera::for_viewport(viewport), renderer);
        stage.renderer.resize(viewport);
        stage
    }

    /// Hand the layout to the renderer for instantiation.
    pub fn populate(&mut self, layout: &Layout) {
        self.renderer.populate(layout);
    }

    /// Update camera aspect and renderer size together.
    pub fn resize(&mut self, viewport: Viewport) {
        self.camera.set_viewport(viewport);
        self.renderer.resize(viewport);
    }

    pub fn view(&self, nav: &NavigationState) -> RenderView {
        self.camera.view(nav)
    }

    pub fn render(&mut self, nav: &NavigationState) -> R::Output {
        let view = self.camera.view(nav);
        self.renderer.render(&view)
    }
}
