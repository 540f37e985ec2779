use glam::Vec2;

/// A logical key, already mapped from whatever the platform reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalKey {
    Forward,
    Backward,
    Left,
    Right,
    /// Decreases yaw (clockwise seen from above).
    TurnRight,
    /// Increases yaw.
    TurnLeft,
    /// Leaves locked mode.
    Cancel,
}

impl LogicalKey {
    /// True for the four movement keys that have a held state.
    pub fn is_directional(self) -> bool {
        matches!(
            self,
            Self::Forward | Self::Backward | Self::Left | Self::Right
        )
    }
}

/// One input notification from the host.
///
/// Every embodiment (window, headless script) produces these; the
/// locomotion layer only ever sees the [`crate::InputState`] they fold into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Key pressed. Auto-repeat delivers this again without a release.
    KeyDown(LogicalKey),
    KeyUp(LogicalKey),
    /// Scroll wheel movement; positive scrolls towards the user.
    Wheel(f32),
    /// Relative pointer motion in pixels.
    PointerMotion(Vec2),
    /// The user asked to capture the pointer (e.g. clicked the scene).
    LockRequested,
    /// The pointer capture was lost or cancelled.
    UnlockRequested,
}
