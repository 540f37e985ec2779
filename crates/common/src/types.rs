use serde::{Deserialize, Serialize};

/// Output surface dimensions in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width over height. Zero sides count as one pixel so the ratio stays
    /// finite and positive while a window is minimised.
    pub fn aspect(&self) -> f32 {
        let Self { width, height } = self.clamped();
        width as f32 / height as f32
    }

    /// Dimensions with both sides clamped to at least one pixel, as GPU
    /// surfaces require.
    pub fn clamped(&self) -> Self {
        Self {
            width: self.width.max(1),
            height: self.height.max(1),
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_is_exact_ratio() {
        let vp = Viewport::new(800, 600);
        assert_eq!(vp.aspect(), 800.0 / 600.0);
    }

    #[test]
    fn zero_height_stays_finite() {
        let vp = Viewport::new(640, 0);
        assert!(vp.aspect().is_finite());
        assert_eq!(vp.clamped(), Viewport::new(640, 1));
    }

    #[test]
    fn zero_width_keeps_positive_aspect() {
        assert_eq!(Viewport::new(0, 600).aspect(), 1.0 / 600.0);
        assert_eq!(Viewport::new(0, 0).aspect(), 1.0);
    }
}
