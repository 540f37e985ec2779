use std::fmt;
use std::str::FromStr;

use glam::Vec3;
use storehouse_input::InputState;

use crate::first_person::{FirstPersonSettings, LockedFirstPersonStrategy};
use crate::keyboard::{ClampedKeyboardStrategy, KeyboardSettings};
use crate::orbit::{OrbitSettings, OrbitStrategy};
use crate::state::NavigationState;

/// One way of turning input into rig motion.
pub trait LocomotionStrategy: fmt::Debug {
    fn kind(&self) -> StrategyKind;

    /// Whether the rig only moves while the pointer is captured.
    fn requires_lock(&self) -> bool {
        false
    }

    /// Called once when the controller adopts the strategy, so it can derive
    /// its internal state from the starting rig.
    fn attach(&mut self, _nav: &mut NavigationState) {}

    /// Advance the rig. `dt` is seconds, already sanitised to be finite and
    /// non-negative; it may be zero.
    fn step(&mut self, nav: &mut NavigationState, dt: f32, input: &InputState);
}

/// Strategy selector used by configuration surfaces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    /// Pointer-locked walking along the rig's local axes, with damping.
    #[default]
    FirstPerson,
    /// Orbit around a target point.
    Orbit,
    /// World-axis stepping per key press, clamped on X.
    Keyboard,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 3] = [Self::FirstPerson, Self::Orbit, Self::Keyboard];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::FirstPerson => "first-person",
            Self::Orbit => "orbit",
            Self::Keyboard => "keyboard",
        }
    }

    /// Build the strategy. `orbit_target` is only used by [`Self::Orbit`].
    pub fn build(
        self,
        settings: &LocomotionSettings,
        orbit_target: Vec3,
    ) -> Box<dyn LocomotionStrategy> {
        match self {
            Self::FirstPerson => Box::new(LockedFirstPersonStrategy::new(settings.first_person)),
            Self::Orbit => Box::new(OrbitStrategy::new(orbit_target, settings.orbit)),
            Self::Keyboard => Box::new(ClampedKeyboardStrategy::new(settings.keyboard)),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown locomotion strategy `{0}` (expected first-person, orbit or keyboard)")]
pub struct ParseStrategyError(pub String);

impl FromStr for StrategyKind {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first-person" | "firstperson" | "fps" => Ok(Self::FirstPerson),
            "orbit" => Ok(Self::Orbit),
            "keyboard" | "clamped" => Ok(Self::Keyboard),
            _ => Err(ParseStrategyError(s.to_string())),
        }
    }
}

/// Tuning values a strategy cannot run with.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SettingsError {
    #[error("damping must be finite and positive, got {0}")]
    InvalidDamping(f32),
    #[error("acceleration must be finite, got {0}")]
    InvalidAcceleration(f32),
    #[error("look sensitivity must be finite, got {0}")]
    InvalidLookSensitivity(f32),
    #[error("keyboard step must be finite, got {0}")]
    InvalidStep(f32),
    #[error("turn step must be finite, got {0}")]
    InvalidTurnStep(f32),
    #[error("x limit must be finite and non-negative, got {0}")]
    InvalidXLimit(f32),
    #[error("orbit rotate speed must be finite, got {0}")]
    InvalidRotateSpeed(f32),
    #[error("orbit zoom factor must lie in (0, 1), got {0}")]
    InvalidZoomFactor(f32),
    #[error("orbit distance range {min}..{max} must be finite, positive and ordered")]
    InvalidDistanceRange { min: f32, max: f32 },
}

/// Tuning for every strategy; only the selected one is read.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LocomotionSettings {
    pub first_person: FirstPersonSettings,
    pub keyboard: KeyboardSettings,
    pub orbit: OrbitSettings,
}

impl LocomotionSettings {
    /// Check every strategy's tuning, not just the selected one.
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.first_person.validate()?;
        self.keyboard.validate()?;
        self.orbit.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_names() {
        for kind in StrategyKind::ALL {
            assert_eq!(kind.as_str().parse::<StrategyKind>(), Ok(kind));
        }
        assert_eq!("FPS".parse::<StrategyKind>(), Ok(StrategyKind::FirstPerson));
        assert!("hover".parse::<StrategyKind>().is_err());
    }

    #[test]
    fn build_reports_kind_and_lock_requirement() {
        let settings = LocomotionSettings::default();
        for kind in StrategyKind::ALL {
            let strategy = kind.build(&settings, Vec3::ZERO);
            assert_eq!(strategy.kind(), kind);
            assert_eq!(strategy.requires_lock(), kind == StrategyKind::FirstPerson);
        }
    }

    #[test]
    fn default_settings_are_valid() {
        assert_eq!(LocomotionSettings::default().validate(), Ok(()));
    }

    #[test]
    fn invalid_strategy_tuning_is_reported() {
        let mut settings = LocomotionSettings::default();
        settings.first_person.damping = 0.0;
        assert_eq!(settings.validate(), Err(SettingsError::InvalidDamping(0.0)));

        let mut settings = LocomotionSettings::default();
        settings.keyboard.x_limit = -1.0;
        assert_eq!(settings.validate(), Err(SettingsError::InvalidXLimit(-1.0)));

        let mut settings = LocomotionSettings::default();
        settings.orbit.min_distance = 10.0;
        settings.orbit.max_distance = 5.0;
        assert_eq!(
            settings.validate(),
            Err(SettingsError::InvalidDistanceRange {
                min: 10.0,
                max: 5.0
            })
        );
    }
}
