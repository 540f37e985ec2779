//! Rendering Adapter: renderer-agnostic interface.
//!
//! # Invariants
//! - Renderers never mutate navigation or layout; they only read them.
//! - A resize reaches both the camera and the renderer before the next frame.
//!
//! The [`Renderer`] trait is implemented by [`DebugTextRenderer`] for
//! headless runs and by the wgpu backend for the desktop viewer.

mod camera;
mod renderer;

pub use camera::{Camera, RenderView};
pub use renderer::{DebugTextRenderer, Renderer};

pub fn crate_info() -> &'static str {
    "storehouse-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_info_names_crate() {
        assert!(crate_info().contains("render"));
    }
}
