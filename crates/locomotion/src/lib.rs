//! Locomotion: turns input snapshots into camera motion.
//!
//! The controller owns the [`NavigationState`] and delegates motion to one
//! [`LocomotionStrategy`] chosen when the controller is built.
//!
//! # Invariants
//! - Only `Unlocked -> Locked` (engage) and `Locked -> Unlocked` (release)
//!   transitions exist; engage needs the pointer capture collaborator to agree.
//! - Strategies that require lock never move the rig while unlocked.
//! - Damping never flips the sign of a velocity component.

mod capture;
mod controller;
mod first_person;
mod keyboard;
mod orbit;
mod state;
mod strategy;

pub use capture::{CaptureError, HeadlessCapture, PointerCapture};
pub use controller::LocomotionController;
pub use first_person::{FirstPersonSettings, LockedFirstPersonStrategy};
pub use keyboard::{ClampedKeyboardStrategy, KeyboardSettings};
pub use orbit::{OrbitSettings, OrbitStrategy};
pub use state::{InteractionMode, NavigationState, PITCH_LIMIT};
pub use strategy::{
    LocomotionSettings, LocomotionStrategy, ParseStrategyError, SettingsError, StrategyKind,
};

pub fn crate_info() -> &'static str {
    "storehouse-locomotion v0.1.0"
}
