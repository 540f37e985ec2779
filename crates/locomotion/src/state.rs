use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Largest pitch magnitude, just short of looking straight up or down.
pub const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

/// Whether input currently drives the rig.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionMode {
    #[default]
    Unlocked,
    /// Pointer captured; first-person input moves the rig.
    Locked,
}

/// Camera rig transform and motion.
///
/// Yaw and pitch are radians; yaw 0 looks down -Z and positive yaw turns
/// left. Velocity is camera-local: +X is right and +Z is backward, so a
/// rig walking forward has a negative `velocity.z`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NavigationState {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub velocity: Vec3,
    mode: InteractionMode,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

impl NavigationState {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
            velocity: Vec3::ZERO,
            mode: InteractionMode::Unlocked,
        }
    }

    /// A rig at `eye` oriented towards `target`.
    pub fn looking_at(eye: Vec3, target: Vec3) -> Self {
        let mut state = Self::new(eye);
        state.look_at(target);
        state
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub(crate) fn set_mode(&mut self, mode: InteractionMode) {
        self.mode = mode;
    }

    /// Unit view direction including pitch.
    pub fn forward(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        Vec3::new(-sin_yaw * cos_pitch, sin_pitch, -cos_yaw * cos_pitch)
    }

    /// Horizontal forward axis used for walking.
    pub fn flat_forward(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        Vec3::new(-sin_yaw, 0.0, -cos_yaw)
    }

    /// Horizontal right axis.
    pub fn right(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        Vec3::new(cos_yaw, 0.0, -sin_yaw)
    }

    /// Turn towards `target`. A target at the eye leaves orientation as is.
    pub fn look_at(&mut self, target: Vec3) {
        let dir = target - self.position;
        if dir.length_squared() <= f32::EPSILON {
            return;
        }
        self.yaw = (-dir.x).atan2(-dir.z);
        let horizontal = (dir.x * dir.x + dir.z * dir.z).sqrt();
        self.pitch = dir.y.atan2(horizontal).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    pub fn clamp_pitch(&mut self) {
        self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn default_looks_down_negative_z() {
        let nav = NavigationState::default();
        assert_eq!(nav.mode(), InteractionMode::Unlocked);
        assert!(approx(nav.forward(), Vec3::NEG_Z));
        assert!(approx(nav.right(), Vec3::X));
    }

    #[test]
    fn positive_yaw_turns_left() {
        let nav = NavigationState {
            yaw: FRAC_PI_2,
            ..NavigationState::default()
        };
        assert!(approx(nav.flat_forward(), Vec3::NEG_X));
        assert!(approx(nav.right(), Vec3::NEG_Z));
    }

    #[test]
    fn look_at_points_forward_at_target() {
        let nav = NavigationState::looking_at(Vec3::ZERO, Vec3::new(3.0, 0.0, 0.0));
        assert!(approx(nav.forward(), Vec3::X));

        let nav = NavigationState::looking_at(Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 5.0, 3.0));
        let expected = Vec3::new(1.0, 1.0, 0.0).normalize();
        assert!(approx(nav.forward(), expected));
    }

    #[test]
    fn look_straight_down_clamps_pitch() {
        let nav = NavigationState::looking_at(Vec3::new(0.0, 10.0, 0.0), Vec3::ZERO);
        assert_eq!(nav.pitch, -PITCH_LIMIT);
        assert!(nav.forward().is_finite());
    }

    #[test]
    fn look_at_self_is_ignored() {
        let mut nav = NavigationState::new(Vec3::ONE);
        nav.yaw = 0.5;
        nav.look_at(Vec3::ONE);
        assert_eq!(nav.yaw, 0.5);
    }
}
