/// Spot light parameters shared by every light in the scene, editable at
/// runtime from the tuning panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightTuning {
    pub color: [f32; 3],
    pub intensity: f32,
    /// Half-angle of the cone, in degrees.
    pub angle_degrees: f32,
    /// Fraction of the cone, in `[0, 1]`, that fades out towards the edge.
    pub penumbra: f32,
    /// Range after which light contributes nothing. Zero means unlimited.
    pub distance: f32,
    /// Flat ambient term so unlit crates stay visible.
    pub ambient: f32,
}

impl Default for LightTuning {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0],
            intensity: 1.5,
            angle_degrees: 30.0,
            penumbra: 0.2,
            distance: 30.0,
            ambient: 0.25,
        }
    }
}

impl LightTuning {
    pub const MAX_ANGLE_DEGREES: f32 = 89.0;

    /// Clamp every field to the range the shader can use.
    pub fn sanitized(&self) -> Self {
        Self {
            color: self.color.map(|c| c.clamp(0.0, 1.0)),
            intensity: self.intensity.max(0.0),
            angle_degrees: self.angle_degrees.clamp(1.0, Self::MAX_ANGLE_DEGREES),
            penumbra: self.penumbra.clamp(0.0, 1.0),
            distance: self.distance.max(0.0),
            ambient: self.ambient.clamp(0.0, 1.0),
        }
    }

    /// Cosines of the outer and inner cone edges. The inner edge is kept
    /// strictly inside the outer one so the shader's smoothstep has a range.
    pub fn cone_cosines(&self) -> (f32, f32) {
        let t = self.sanitized();
        let outer = t.angle_degrees.to_radians();
        let inner = outer * (1.0 - t.penumbra);
        let cos_outer = outer.cos();
        let cos_inner = inner.cos().max(cos_outer + 1e-4);
        (cos_outer, cos_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cone_has_nonempty_range() {
        let hard = LightTuning {
            penumbra: 0.0,
            ..LightTuning::default()
        };
        let (outer, inner) = hard.cone_cosines();
        assert!(inner > outer);

        let soft = LightTuning {
            penumbra: 1.0,
            ..LightTuning::default()
        };
        let (outer, inner) = soft.cone_cosines();
        assert_eq!(inner, 1.0);
        assert!(outer < inner);
    }

    #[test]
    fn sanitized_clamps_ranges() {
        let wild = LightTuning {
            color: [2.0, -1.0, 0.5],
            intensity: -3.0,
            angle_degrees: 180.0,
            penumbra: 4.0,
            distance: -1.0,
            ambient: 9.0,
        }
        .sanitized();
        assert_eq!(wild.color, [1.0, 0.0, 0.5]);
        assert_eq!(wild.intensity, 0.0);
        assert_eq!(wild.angle_degrees, LightTuning::MAX_ANGLE_DEGREES);
        assert_eq!(wild.penumbra, 1.0);
        assert_eq!(wild.distance, 0.0);
        assert_eq!(wild.ambient, 1.0);
    }
}
