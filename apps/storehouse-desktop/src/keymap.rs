use storehouse_input::{InputState, LogicalKey};
use winit::event::{ElementState, MouseScrollDelta};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Pixels of trackpad scroll that count as one wheel notch.
const PIXELS_PER_LINE: f32 = 40.0;

/// Map a physical key to the logical key it drives, if any.
pub fn logical_key(code: KeyCode) -> Option<LogicalKey> {
    match code {
        KeyCode::KeyW | KeyCode::ArrowUp => Some(LogicalKey::Forward),
        KeyCode::KeyS | KeyCode::ArrowDown => Some(LogicalKey::Backward),
        KeyCode::KeyA | KeyCode::ArrowLeft => Some(LogicalKey::Left),
        KeyCode::KeyD | KeyCode::ArrowRight => Some(LogicalKey::Right),
        KeyCode::KeyQ => Some(LogicalKey::TurnRight),
        KeyCode::KeyE => Some(LogicalKey::TurnLeft),
        KeyCode::Escape => Some(LogicalKey::Cancel),
        _ => None,
    }
}

/// Fold one keyboard event into `input`.
///
/// Presses the overlay consumed are dropped. Releases always land, so a key
/// let go while a panel widget has focus never stays held.
pub fn apply_key(input: &mut InputState, key: PhysicalKey, state: ElementState, consumed: bool) {
    let PhysicalKey::Code(code) = key else {
        return;
    };
    let Some(key) = logical_key(code) else {
        return;
    };
    match state {
        ElementState::Pressed if !consumed => input.key_down(key),
        ElementState::Released if key != LogicalKey::Cancel => input.key_up(key),
        _ => {}
    }
}

/// Wheel delta in notches, positive when scrolling towards the user.
pub fn wheel_delta(delta: MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => -y,
        MouseScrollDelta::PixelDelta(pos) => -(pos.y as f32) / PIXELS_PER_LINE,
    }
}
