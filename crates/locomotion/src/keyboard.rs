use storehouse_input::{InputState, LogicalKey};

use crate::state::NavigationState;
use crate::strategy::{LocomotionStrategy, SettingsError, StrategyKind};

/// Tuning for [`ClampedKeyboardStrategy`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyboardSettings {
    /// World units moved per key press or wheel notch.
    pub step: f32,
    /// Radians turned per turn key press.
    pub turn_step: f32,
    /// X stays within `[-x_limit, x_limit]` when moved sideways.
    pub x_limit: f32,
}

impl Default for KeyboardSettings {
    fn default() -> Self {
        Self {
            step: 0.2,
            turn_step: 0.02,
            x_limit: 10.0,
        }
    }
}

impl KeyboardSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !self.step.is_finite() {
            return Err(SettingsError::InvalidStep(self.step));
        }
        if !self.turn_step.is_finite() {
            return Err(SettingsError::InvalidTurnStep(self.turn_step));
        }
        if !self.x_limit.is_finite() || self.x_limit < 0.0 {
            return Err(SettingsError::InvalidXLimit(self.x_limit));
        }
        Ok(())
    }
}

/// Steps the rig along world axes once per key press, for bounded scenes.
///
/// Held state and elapsed time are ignored; every press (auto-repeat
/// included) is one fixed increment. Works in either interaction mode.
#[derive(Debug, Clone)]
pub struct ClampedKeyboardStrategy {
    settings: KeyboardSettings,
}

impl ClampedKeyboardStrategy {
    pub fn new(settings: KeyboardSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &KeyboardSettings {
        &self.settings
    }

    fn press(&self, nav: &mut NavigationState, key: LogicalKey) {
        let KeyboardSettings {
            step,
            turn_step,
            x_limit,
        } = self.settings;
        match key {
            LogicalKey::Forward => nav.position.z -= step,
            LogicalKey::Backward => nav.position.z += step,
            LogicalKey::Left => nav.position.x = (nav.position.x - step).max(-x_limit),
            LogicalKey::Right => nav.position.x = (nav.position.x + step).min(x_limit),
            LogicalKey::TurnRight => nav.yaw -= turn_step,
            LogicalKey::TurnLeft => nav.yaw += turn_step,
            LogicalKey::Cancel => {}
        }
    }
}

impl LocomotionStrategy for ClampedKeyboardStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Keyboard
    }

    fn step(&mut self, nav: &mut NavigationState, _dt: f32, input: &InputState) {
        for &key in input.presses() {
            self.press(nav, key);
        }

        let scroll = input.scroll_delta();
        if scroll != 0.0 {
            nav.position.z += scroll.signum() * self.settings.step;
        }
    }
}
