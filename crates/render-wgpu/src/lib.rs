//! wgpu render backend for the storehouse viewer.
//!
//! Renders a floor grid and one instanced unit cube per crate placement,
//! lit by the layout's spot lights.
//!
//! # Invariants
//! - Renderer never mutates layout or navigation state.
//! - Scene buffers are rebuilt only on `populate`; frames only rewrite uniforms.

mod gpu;
mod shaders;
mod tuning;

pub use gpu::{MAX_LIGHTS, WgpuRenderer};
pub use tuning::LightTuning;
