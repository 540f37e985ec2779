use glam::{Mat4, Vec3};
use storehouse_common::Viewport;
use storehouse_locomotion::NavigationState;

/// Perspective projection parameters. The transform lives in
/// [`NavigationState`]; the camera only knows how to project.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            aspect: Viewport::default().aspect(),
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Camera {
    pub fn for_viewport(viewport: Viewport) -> Self {
        Self {
            aspect: viewport.aspect(),
            ..Self::default()
        }
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.aspect = viewport.aspect();
    }

    /// Combine with the rig transform into a view for one frame.
    pub fn view(&self, nav: &NavigationState) -> RenderView {
        RenderView {
            eye: nav.position,
            forward: nav.forward(),
            fov_degrees: self.fov_degrees,
            aspect: self.aspect,
            near: self.near,
            far: self.far,
        }
    }
}

/// Everything a renderer needs to draw one frame from the rig's eye.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderView {
    pub eye: Vec3,
    /// Unit view direction.
    pub forward: Vec3,
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl RenderView {
    pub fn target(&self) -> Vec3 {
        self.eye + self.forward
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target(), Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
