//! Shared types for the storehouse viewer: viewport geometry and fatal init errors.

mod error;
mod types;

pub use error::InitError;
pub use types::Viewport;
