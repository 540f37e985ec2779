/// Unrecoverable failures while bringing up the viewer.
///
/// Any of these halts initialization; there is no partial-scene fallback.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("failed to create window: {0}")]
    Window(String),
    #[error("failed to create rendering surface: {0}")]
    Surface(String),
    #[error("no compatible graphics adapter found")]
    NoAdapter,
    #[error("failed to create graphics device: {0}")]
    Device(String),
    #[error("surface reports no supported texture formats")]
    NoSurfaceFormat,
}
