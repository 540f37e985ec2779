use glam::{Vec2, Vec3};
use storehouse_input::InputState;

use crate::state::NavigationState;
use crate::strategy::{LocomotionStrategy, SettingsError, StrategyKind};

/// Tuning for [`LockedFirstPersonStrategy`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FirstPersonSettings {
    /// Exponential velocity decay rate, per second.
    pub damping: f32,
    /// Acceleration while a direction is held, units per second squared.
    pub acceleration: f32,
    /// Radians of yaw/pitch per pixel of pointer motion.
    pub look_sensitivity: f32,
}

impl Default for FirstPersonSettings {
    fn default() -> Self {
        Self {
            damping: 10.0,
            acceleration: 400.0,
            look_sensitivity: 0.002,
        }
    }
}

impl FirstPersonSettings {
    /// Damping must be positive so velocity decays once input stops.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !self.damping.is_finite() || self.damping <= 0.0 {
            return Err(SettingsError::InvalidDamping(self.damping));
        }
        if !self.acceleration.is_finite() {
            return Err(SettingsError::InvalidAcceleration(self.acceleration));
        }
        if !self.look_sensitivity.is_finite() {
            return Err(SettingsError::InvalidLookSensitivity(self.look_sensitivity));
        }
        Ok(())
    }
}

/// Pointer-locked walking with damped velocity along the rig's local axes.
#[derive(Debug, Clone)]
pub struct LockedFirstPersonStrategy {
    settings: FirstPersonSettings,
}

impl LockedFirstPersonStrategy {
    pub fn new(settings: FirstPersonSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &FirstPersonSettings {
        &self.settings
    }

    fn look(&self, nav: &mut NavigationState, delta: Vec2) {
        if delta == Vec2::ZERO {
            return;
        }
        nav.yaw -= delta.x * self.settings.look_sensitivity;
        nav.pitch -= delta.y * self.settings.look_sensitivity;
        nav.clamp_pitch();
    }
}

/// First-order decay of one velocity component. A decay factor of one or
/// more would flip the sign, so the component stops at zero instead.
fn damp(v: f32, factor: f32) -> f32 {
    if factor >= 1.0 { 0.0 } else { v - v * factor }
}

impl LocomotionStrategy for LockedFirstPersonStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::FirstPerson
    }

    fn requires_lock(&self) -> bool {
        true
    }

    fn step(&mut self, nav: &mut NavigationState, dt: f32, input: &InputState) {
        self.look(nav, input.look_delta());
        if dt <= 0.0 {
            return;
        }

        let decay = self.settings.damping * dt;
        let mut velocity = nav.velocity;
        velocity.x = damp(velocity.x, decay);
        velocity.z = damp(velocity.z, decay);

        let held = input.held();
        let direction = Vec2::new(held.lateral_axis(), held.forward_axis()).normalize_or_zero();
        let boost = self.settings.acceleration * dt;
        if held.forward || held.backward {
            velocity.z -= direction.y * boost;
        }
        if held.left || held.right {
            velocity.x -= direction.x * boost;
        }
        nav.velocity = velocity;

        let displacement: Vec3 =
            nav.right() * (velocity.x * dt) - nav.flat_forward() * (velocity.z * dt);
        nav.position += displacement;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storehouse_input::LogicalKey;

    fn strategy(damping: f32) -> LockedFirstPersonStrategy {
        LockedFirstPersonStrategy::new(FirstPersonSettings {
            damping,
            ..FirstPersonSettings::default()
        })
    }

    #[test]
    fn damping_must_be_positive_and_finite() {
        assert_eq!(FirstPersonSettings::default().validate(), Ok(()));
        for damping in [0.0, -5.0] {
            let settings = FirstPersonSettings {
                damping,
                ..FirstPersonSettings::default()
            };
            assert_eq!(settings.validate(), Err(SettingsError::InvalidDamping(damping)));
        }
        let settings = FirstPersonSettings {
            damping: f32::NAN,
            ..FirstPersonSettings::default()
        };
        assert!(matches!(settings.validate(), Err(SettingsError::InvalidDamping(d)) if d.is_nan()));
    }

    #[test]
    fn non_finite_acceleration_and_sensitivity_rejected() {
        let settings = FirstPersonSettings {
            acceleration: f32::INFINITY,
            ..FirstPersonSettings::default()
        };
        assert_eq!(
            settings.validate(),
            Err(SettingsError::InvalidAcceleration(f32::INFINITY))
        );
        let settings = FirstPersonSettings {
            look_sensitivity: f32::NAN,
            ..FirstPersonSettings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::InvalidLookSensitivity(_))
        ));
    }

    #[test]
    fn velocity_decays_without_input() {
        let mut s = strategy(20.0);
        let mut nav = NavigationState::default();
        nav.velocity = Vec3::new(3.0, 0.0, -5.0);
        let before = nav.speed();

        s.step(&mut nav, 0.01, &InputState::new());

        assert!(nav.speed() < before);
        assert!(nav.velocity.x > 0.0);
        assert!(nav.velocity.z < 0.0);
        assert!((nav.velocity.z - -4.0).abs() < 1e-5);
    }

    #[test]
    fn large_decay_floors_at_zero() {
        let mut s = strategy(20.0);
        let mut nav = NavigationState::default();
        nav.velocity = Vec3::new(-2.0, 0.0, 7.0);

        // damping * dt == 2
        s.step(&mut nav, 0.1, &InputState::new());
        assert_eq!(nav.velocity, Vec3::ZERO);
    }

    #[test]
    fn repeated_decay_approaches_zero_monotonically() {
        let mut s = strategy(10.0);
        let mut nav = NavigationState::default();
        nav.velocity = Vec3::new(0.0, 0.0, -8.0);
        let input = InputState::new();
        let mut last = nav.speed();
        for _ in 0..50 {
            s.step(&mut nav, 1.0 / 60.0, &input);
            assert!(nav.velocity.z <= 0.0);
            assert!(nav.speed() < last);
            last = nav.speed();
        }
    }

    #[test]
    fn holding_forward_moves_along_view() {
        let mut s = strategy(10.0);
        let mut nav = NavigationState::default();
        let mut input = InputState::new();
        input.key_down(LogicalKey::Forward);

        for _ in 0..10 {
            s.step(&mut nav, 1.0 / 60.0, &input);
        }
        assert!(nav.velocity.z < 0.0);
        assert!(nav.position.z < 0.0);
        assert!(nav.position.x.abs() < 1e-5);
    }

    #[test]
    fn motion_follows_orientation() {
        let mut s = strategy(10.0);
        let mut nav = NavigationState::default();
        nav.yaw = std::f32::consts::FRAC_PI_2;
        let mut input = InputState::new();
        input.key_down(LogicalKey::Forward);

        for _ in 0..10 {
            s.step(&mut nav, 1.0 / 60.0, &input);
        }
        // facing -X
        assert!(nav.position.x < 0.0);
        assert!(nav.position.z.abs() < 1e-4);
    }

    #[test]
    fn holding_left_strafes_left() {
        let mut s = strategy(10.0);
        let mut nav = NavigationState::default();
        let mut input = InputState::new();
        input.key_down(LogicalKey::Left);

        s.step(&mut nav, 1.0 / 60.0, &input);
        assert!(nav.velocity.x < 0.0);
        assert!(nav.position.x < 0.0);
    }

    #[test]
    fn diagonal_input_is_normalized() {
        let mut s = strategy(0.0);
        let mut nav = NavigationState::default();
        let mut input = InputState::new();
        input.key_down(LogicalKey::Forward);
        input.key_down(LogicalKey::Right);

        s.step(&mut nav, 0.01, &input);
        let planar = Vec2::new(nav.velocity.x, nav.velocity.z).length();
        assert!((planar - 400.0 * 0.01).abs() < 1e-3);
    }

    #[test]
    fn opposing_keys_produce_no_nan() {
        let mut s = strategy(10.0);
        let mut nav = NavigationState::default();
        let mut input = InputState::new();
        input.key_down(LogicalKey::Forward);
        input.key_down(LogicalKey::Backward);

        s.step(&mut nav, 0.016, &input);
        assert!(nav.position.is_finite());
        assert_eq!(nav.velocity, Vec3::ZERO);
    }

    #[test]
    fn zero_dt_only_applies_look() {
        let mut s = strategy(10.0);
        let mut nav = NavigationState::default();
        nav.velocity = Vec3::new(0.0, 0.0, -1.0);
        let mut input = InputState::new();
        input.key_down(LogicalKey::Forward);
        input.pointer_motion(Vec2::new(100.0, 0.0));

        s.step(&mut nav, 0.0, &input);
        assert_eq!(nav.position, Vec3::ZERO);
        assert_eq!(nav.velocity, Vec3::new(0.0, 0.0, -1.0));
        assert!((nav.yaw - -0.2).abs() < 1e-6);
    }

    #[test]
    fn look_pitch_is_clamped() {
        let mut s = strategy(10.0);
        let mut nav = NavigationState::default();
        let mut input = InputState::new();
        input.pointer_motion(Vec2::new(0.0, -100_000.0));
        s.step(&mut nav, 0.0, &input);
        assert_eq!(nav.pitch, crate::state::PITCH_LIMIT);
    }
}
