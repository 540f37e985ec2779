use glam::Vec2;

use crate::event::{InputEvent, LogicalKey};

/// Movement keys currently held down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldDirections {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl HeldDirections {
    fn set(&mut self, key: LogicalKey, held: bool) {
        match key {
            LogicalKey::Forward => self.forward = held,
            LogicalKey::Backward => self.backward = held,
            LogicalKey::Left => self.left = held,
            LogicalKey::Right => self.right = held,
            _ => {}
        }
    }

    pub fn any(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }

    /// `forward - backward` as -1, 0 or 1.
    pub fn forward_axis(&self) -> f32 {
        f32::from(u8::from(self.forward)) - f32::from(u8::from(self.backward))
    }

    /// `left - right` as -1, 0 or 1.
    pub fn lateral_axis(&self) -> f32 {
        f32::from(u8::from(self.left)) - f32::from(u8::from(self.right))
    }
}

/// Everything the input collaborator reported since the last frame.
///
/// Handler methods fold events in; the frame scheduler hands the state to
/// the locomotion controller by reference and then calls
/// [`InputState::clear_discrete`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputState {
    held: HeldDirections,
    presses: Vec<LogicalKey>,
    lock_requested: bool,
    unlock_requested: bool,
    scroll_delta: f32,
    look_delta: Vec2,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one event into the snapshot.
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown(key) => self.key_down(key),
            InputEvent::KeyUp(key) => self.key_up(key),
            InputEvent::Wheel(delta) => self.wheel(delta),
            InputEvent::PointerMotion(delta) => self.pointer_motion(delta),
            InputEvent::LockRequested => self.request_lock(),
            InputEvent::UnlockRequested => self.request_unlock(),
        }
    }

    pub fn key_down(&mut self, key: LogicalKey) {
        if key == LogicalKey::Cancel {
            self.request_unlock();
            return;
        }
        self.held.set(key, true);
        self.presses.push(key);
    }

    pub fn key_up(&mut self, key: LogicalKey) {
        self.held.set(key, false);
    }

    pub fn wheel(&mut self, delta: f32) {
        if delta.is_finite() {
            self.scroll_delta += delta;
        }
    }

    pub fn pointer_motion(&mut self, delta: Vec2) {
        if delta.is_finite() {
            self.look_delta += delta;
        }
    }

    pub fn request_lock(&mut self) {
        self.lock_requested = true;
    }

    pub fn request_unlock(&mut self) {
        self.unlock_requested = true;
    }

    /// Release every held key, e.g. when the window loses focus and key-up
    /// events will never arrive.
    pub fn release_all(&mut self) {
        self.held = HeldDirections::default();
    }

    pub fn held(&self) -> HeldDirections {
        self.held
    }

    /// Key presses this frame in arrival order, auto-repeats included.
    pub fn presses(&self) -> &[LogicalKey] {
        &self.presses
    }

    pub fn lock_requested(&self) -> bool {
        self.lock_requested
    }

    pub fn unlock_requested(&self) -> bool {
        self.unlock_requested
    }

    pub fn scroll_delta(&self) -> f32 {
        self.scroll_delta
    }

    pub fn look_delta(&self) -> Vec2 {
        self.look_delta
    }

    /// True if any discrete event is waiting to be consumed.
    pub fn has_pending(&self) -> bool {
        !self.presses.is_empty()
            || self.lock_requested
            || self.unlock_requested
            || self.scroll_delta != 0.0
            || self.look_delta != Vec2::ZERO
    }

    /// Drop discrete events after a frame consumed them. Held flags stay.
    pub fn clear_discrete(&mut self) {
        if self.has_pending() {
            tracing::trace!(presses = self.presses.len(), "clearing discrete input");
        }
        self.presses.clear();
        self.lock_requested = false;
        self.unlock_requested = false;
        self.scroll_delta = 0.0;
        self.look_delta = Vec2::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_flags_follow_down_and_up() {
        let mut input = InputState::new();
        input.apply(InputEvent::KeyDown(LogicalKey::Forward));
        input.apply(InputEvent::KeyDown(LogicalKey::Left));
        assert!(input.held().forward);
        assert!(input.held().left);
        assert_eq!(input.held().forward_axis(), 1.0);
        assert_eq!(input.held().lateral_axis(), 1.0);

        input.apply(InputEvent::KeyUp(LogicalKey::Forward));
        assert!(!input.held().forward);
        assert_eq!(input.held().forward_axis(), 0.0);
    }

    #[test]
    fn opposing_keys_cancel() {
        let mut input = InputState::new();
        input.key_down(LogicalKey::Left);
        input.key_down(LogicalKey::Right);
        assert!(input.held().any());
        assert_eq!(input.held().lateral_axis(), 0.0);
    }

    #[test]
    fn clear_discrete_keeps_held_flags() {
        let mut input = InputState::new();
        input.key_down(LogicalKey::Backward);
        input.wheel(3.0);
        input.pointer_motion(Vec2::new(4.0, -2.0));
        input.request_lock();
        assert!(input.has_pending());

        input.clear_discrete();
        assert!(!input.has_pending());
        assert!(input.presses().is_empty());
        assert_eq!(input.scroll_delta(), 0.0);
        assert_eq!(input.look_delta(), Vec2::ZERO);
        assert!(input.held().backward);
    }

    #[test]
    fn repeats_are_recorded_as_presses() {
        let mut input = InputState::new();
        for _ in 0..3 {
            input.key_down(LogicalKey::Right);
        }
        input.key_down(LogicalKey::TurnLeft);
        assert_eq!(
            input.presses(),
            &[
                LogicalKey::Right,
                LogicalKey::Right,
                LogicalKey::Right,
                LogicalKey::TurnLeft
            ]
        );
    }

    #[test]
    fn cancel_key_requests_unlock() {
        let mut input = InputState::new();
        input.apply(InputEvent::KeyDown(LogicalKey::Cancel));
        assert!(input.unlock_requested());
        assert!(input.presses().is_empty());
    }

    #[test]
    fn deltas_accumulate_between_frames() {
        let mut input = InputState::new();
        input.apply(InputEvent::Wheel(1.0));
        input.apply(InputEvent::Wheel(-3.0));
        input.apply(InputEvent::PointerMotion(Vec2::new(1.0, 1.0)));
        input.apply(InputEvent::PointerMotion(Vec2::new(2.0, 0.0)));
        input.wheel(f32::NAN);
        assert_eq!(input.scroll_delta(), -2.0);
        assert_eq!(input.look_delta(), Vec2::new(3.0, 1.0));
    }

    #[test]
    fn release_all_clears_held() {
        let mut input = InputState::new();
        input.key_down(LogicalKey::Forward);
        input.key_down(LogicalKey::Right);
        input.release_all();
        assert!(!input.held().any());
    }
}
