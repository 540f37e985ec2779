//! Input: platform-neutral events folded into one snapshot per frame.
//!
//! # Invariants
//! - Consumers read named logical directions and requests, never raw
//!   platform events.
//! - Held direction flags persist until released; discrete events are
//!   cleared after each frame consumes them.

pub mod event;
pub mod state;

pub use event::{InputEvent, LogicalKey};
pub use state::{HeldDirections, InputState};
