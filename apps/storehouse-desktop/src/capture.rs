use std::sync::Arc;

use storehouse_locomotion::{CaptureError, PointerCapture};
use winit::window::{CursorGrabMode, Window};

/// Pointer capture through winit cursor grabbing.
///
/// Tries a true pointer lock first; platforms without one (X11, Windows)
/// get a confined, hidden cursor instead. Raw mouse motion keeps flowing
/// either way.
pub struct WindowCapture {
    window: Arc<Window>,
}

impl WindowCapture {
    pub fn new(window: Arc<Window>) -> Self {
        Self { window }
    }
}

impl PointerCapture for WindowCapture {
    fn capture(&mut self) -> Result<(), CaptureError> {
        self.window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| self.window.set_cursor_grab(CursorGrabMode::Confined))
            .map_err(|e| CaptureError::Denied(e.to_string()))?;
        self.window.set_cursor_visible(false);
        Ok(())
    }

    fn release(&mut self) {
        if let Err(e) = self.window.set_cursor_grab(CursorGrabMode::None) {
            tracing::warn!("failed to release cursor grab: {e}");
        }
        self.window.set_cursor_visible(true);
    }
}
