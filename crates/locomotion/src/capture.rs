/// Reasons the host refused to capture the pointer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CaptureError {
    #[error("pointer capture denied: {0}")]
    Denied(String),
    #[error("pointer capture is not available on this host")]
    Unavailable,
}

/// Host side of pointer capture (cursor grab, pointer lock).
pub trait PointerCapture {
    /// Try to capture the pointer. On error the controller stays unlocked.
    fn capture(&mut self) -> Result<(), CaptureError>;

    /// Give the pointer back. Must tolerate being called when not captured.
    fn release(&mut self);
}

/// Capture stand-in for headless runs and tests.
#[derive(Debug, Clone, Default)]
pub struct HeadlessCapture {
    grant: bool,
    captured: bool,
}

impl HeadlessCapture {
    /// A host that grants every capture request.
    pub fn granting() -> Self {
        Self {
            grant: true,
            captured: false,
        }
    }

    /// A host without pointer capture.
    pub fn denying() -> Self {
        Self::default()
    }

    pub fn is_captured(&self) -> bool {
        self.captured
    }
}

impl PointerCapture for HeadlessCapture {
    fn capture(&mut self) -> Result<(), CaptureError> {
        if !self.grant {
            return Err(CaptureError::Unavailable);
        }
        self.captured = true;
        Ok(())
    }

    fn release(&mut self) {
        self.captured = false;
    }
}
