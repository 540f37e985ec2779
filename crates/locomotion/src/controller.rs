use glam::Vec3;
use storehouse_input::InputState;

use crate::capture::PointerCapture;
use crate::state::{InteractionMode, NavigationState};
use crate::strategy::{LocomotionSettings, LocomotionStrategy, StrategyKind};

/// Owns the navigation state and drives it from input once per frame.
#[derive(Debug)]
pub struct LocomotionController {
    nav: NavigationState,
    strategy: Box<dyn LocomotionStrategy>,
}

impl LocomotionController {
    /// Adopt `strategy`, letting it derive its state from `nav`.
    pub fn new(mut strategy: Box<dyn LocomotionStrategy>, mut nav: NavigationState) -> Self {
        nav.set_mode(InteractionMode::Unlocked);
        strategy.attach(&mut nav);
        tracing::debug!(strategy = %strategy.kind(), "locomotion controller created");
        Self { nav, strategy }
    }

    /// Build the strategy named by `kind` and start the rig at `nav`.
    pub fn from_kind(
        kind: StrategyKind,
        settings: &LocomotionSettings,
        nav: NavigationState,
        orbit_target: Vec3,
    ) -> Self {
        Self::new(kind.build(settings, orbit_target), nav)
    }

    pub fn state(&self) -> &NavigationState {
        &self.nav
    }

    pub fn mode(&self) -> InteractionMode {
        self.nav.mode()
    }

    pub fn kind(&self) -> StrategyKind {
        self.strategy.kind()
    }

    pub fn requires_lock(&self) -> bool {
        self.strategy.requires_lock()
    }

    /// Ask the host to capture the pointer and enter locked mode.
    ///
    /// Returns whether the controller is locked afterwards. Denied capture
    /// leaves it unlocked. Strategies that do not use lock ignore the request.
    pub fn engage(&mut self, capture: &mut dyn PointerCapture) -> bool {
        if !self.strategy.requires_lock() {
            tracing::debug!(strategy = %self.strategy.kind(), "lock request ignored");
            return false;
        }
        if self.nav.mode() == InteractionMode::Locked {
            return true;
        }
        match capture.capture() {
            Ok(()) => {
                self.nav.set_mode(InteractionMode::Locked);
                tracing::info!("pointer locked");
                true
            }
            Err(e) => {
                tracing::warn!("pointer lock unavailable: {e}");
                false
            }
        }
    }

    /// Leave locked mode and hand the pointer back. No-op when unlocked.
    pub fn release(&mut self, capture: &mut dyn PointerCapture) {
        if self.nav.mode() == InteractionMode::Unlocked {
            return;
        }
        capture.release();
        self.nav.set_mode(InteractionMode::Unlocked);
        tracing::info!("pointer unlocked");
    }

    /// Apply pending lock/unlock requests. Unlock wins if both are pending.
    pub fn handle_requests(&mut self, input: &InputState, capture: &mut dyn PointerCapture) {
        if input.unlock_requested() {
            self.release(capture);
        } else if input.lock_requested() {
            self.engage(capture);
        }
    }

    /// Advance the rig by `dt` seconds.
    ///
    /// Non-finite or negative `dt` is treated as zero. Lock-requiring
    /// strategies are frozen while unlocked: no integration, no decay.
    pub fn tick(&mut self, dt: f32, input: &InputState) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        if self.strategy.requires_lock() && self.nav.mode() == InteractionMode::Unlocked {
            return;
        }
        self.strategy.step(&mut self.nav, dt, input);
    }
}
