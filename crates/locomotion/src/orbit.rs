use std::f32::consts::{FRAC_PI_4, PI};

use glam::Vec3;
use storehouse_input::InputState;

use crate::state::NavigationState;
use crate::strategy::{LocomotionStrategy, SettingsError, StrategyKind};

/// Polar angle margin that keeps the orbit off the poles.
const POLE_MARGIN: f32 = 0.01;

/// Tuning for [`OrbitStrategy`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitSettings {
    /// Radians per pixel of pointer motion.
    pub rotate_speed: f32,
    /// Radius multiplier per wheel notch towards the target, in `(0, 1)`.
    pub zoom_factor: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            rotate_speed: 0.005,
            zoom_factor: 0.95,
            min_distance: 1.0,
            max_distance: 500.0,
        }
    }
}

impl OrbitSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !self.rotate_speed.is_finite() {
            return Err(SettingsError::InvalidRotateSpeed(self.rotate_speed));
        }
        if !(self.zoom_factor > 0.0 && self.zoom_factor < 1.0) {
            return Err(SettingsError::InvalidZoomFactor(self.zoom_factor));
        }
        let (min, max) = (self.min_distance, self.max_distance);
        if !(min.is_finite() && max.is_finite() && min > 0.0 && min <= max) {
            return Err(SettingsError::InvalidDistanceRange { min, max });
        }
        Ok(())
    }
}

/// Keeps the rig on a sphere around a target, always looking at it.
#[derive(Debug, Clone)]
pub struct OrbitStrategy {
    settings: OrbitSettings,
    target: Vec3,
    radius: f32,
    /// Angle around +Y, measured from +Z.
    azimuth: f32,
    /// Angle down from +Y.
    polar: f32,
}

impl OrbitStrategy {
    pub fn new(target: Vec3, settings: OrbitSettings) -> Self {
        Self {
            settings,
            target,
            radius: settings.min_distance.max(f32::EPSILON),
            azimuth: 0.0,
            polar: FRAC_PI_4,
        }
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    fn clamp(&mut self) {
        self.polar = self.polar.clamp(POLE_MARGIN, PI - POLE_MARGIN);
        self.radius = self
            .radius
            .clamp(self.settings.min_distance, self.settings.max_distance);
    }

    fn place(&self, nav: &mut NavigationState) {
        let (sin_polar, cos_polar) = self.polar.sin_cos();
        let (sin_azimuth, cos_azimuth) = self.azimuth.sin_cos();
        let offset = Vec3::new(
            sin_polar * sin_azimuth,
            cos_polar,
            sin_polar * cos_azimuth,
        ) * self.radius;
        nav.position = self.target + offset;
        nav.look_at(self.target);
    }
}

impl LocomotionStrategy for OrbitStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Orbit
    }

    fn attach(&mut self, nav: &mut NavigationState) {
        let offset = nav.position - self.target;
        let radius = offset.length();
        if radius > f32::EPSILON {
            self.radius = radius;
            self.azimuth = offset.x.atan2(offset.z);
            self.polar = (offset.y / radius).clamp(-1.0, 1.0).acos();
        }
        self.clamp();
        self.place(nav);
    }

    fn step(&mut self, nav: &mut NavigationState, _dt: f32, input: &InputState) {
        let look = input.look_delta();
        self.azimuth -= look.x * self.settings.rotate_speed;
        self.polar -= look.y * self.settings.rotate_speed;

        let scroll = input.scroll_delta();
        if scroll > 0.0 {
            self.radius /= self.settings.zoom_factor;
        } else if scroll < 0.0 {
            self.radius *= self.settings.zoom_factor;
        }

        self.clamp();
        self.place(nav);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn attached(eye: Vec3, target: Vec3) -> (OrbitStrategy, NavigationState) {
        let mut s = OrbitStrategy::new(target, OrbitSettings::default());
        let mut nav = NavigationState::new(eye);
        s.attach(&mut nav);
        (s, nav)
    }

    #[test]
    fn attach_preserves_distance_and_faces_target() {
        let target = Vec3::new(18.0, 0.0, 18.0);
        let (s, nav) = attached(Vec3::new(18.0, 10.0, 28.0), target);
        assert!((s.radius() - (200.0_f32).sqrt()).abs() < 1e-3);
        let to_target = (target - nav.position).normalize();
        assert!((nav.forward() - to_target).length() < 1e-3);
    }

    #[test]
    fn pointer_motion_keeps_radius() {
        let target = Vec3::ZERO;
        let (mut s, mut nav) = attached(Vec3::new(0.0, 5.0, 5.0), target);
        let mut input = InputState::new();
        input.pointer_motion(Vec2::new(120.0, -30.0));
        s.step(&mut nav, 0.016, &input);
        assert!(((nav.position - target).length() - s.radius()).abs() < 1e-3);
        assert!(nav.position.x.abs() > 0.1);
    }

    #[test]
    fn scroll_zooms_within_limits() {
        let (mut s, mut nav) = attached(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);
        let mut zoom_in = InputState::new();
        zoom_in.wheel(-1.0);
        s.step(&mut nav, 0.016, &zoom_in);
        assert!((s.radius() - 9.5).abs() < 1e-4);

        for _ in 0..500 {
            s.step(&mut nav, 0.016, &zoom_in);
        }
        assert_eq!(s.radius(), OrbitSettings::default().min_distance);

        let mut zoom_out = InputState::new();
        zoom_out.wheel(1.0);
        for _ in 0..500 {
            s.step(&mut nav, 0.016, &zoom_out);
        }
        assert_eq!(s.radius(), OrbitSettings::default().max_distance);
    }

    #[test]
    fn eye_on_target_falls_back_to_min_distance() {
        let (s, nav) = attached(Vec3::ONE, Vec3::ONE);
        assert_eq!(s.radius(), 1.0);
        assert!(nav.position.is_finite());
        assert_ne!(nav.position, Vec3::ONE);
    }

    #[test]
    fn overhead_anchor_stays_off_the_pole() {
        let (mut s, mut nav) = attached(Vec3::new(0.0, 20.0, 0.0), Vec3::ZERO);
        let mut input = InputState::new();
        input.pointer_motion(Vec2::new(0.0, 1000.0));
        s.step(&mut nav, 0.016, &input);
        assert!(nav.forward().is_finite());
        assert!(nav.position.y > 0.0);
    }
}
