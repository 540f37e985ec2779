use serde::{Deserialize, Serialize};

/// Gap between neighbouring shelf lines of one aisle, along X.
pub const DISTANCE_BETWEEN_LINES: f32 = 2.0;

/// Depth between the front and back line of one aisle, along Z.
pub const DISTANCE_BETWEEN_AISLES: f32 = 4.0;

/// Errors from layout configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("line gap must be finite and non-negative, got {0}")]
    InvalidLineGap(f32),
    #[error("aisle gap must be finite and positive, got {0}")]
    InvalidAisleGap(f32),
}

/// Shape of the warehouse to generate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarehouseConfig {
    /// Aisle identifiers in generation order.
    pub aisles: Vec<String>,
    pub lines_per_aisle: u32,
    pub rows_per_shelf: u32,
    pub columns_per_shelf: u32,
}

impl WarehouseConfig {
    pub fn new(
        aisles: impl IntoIterator<Item = impl Into<String>>,
        lines_per_aisle: u32,
        rows_per_shelf: u32,
        columns_per_shelf: u32,
    ) -> Self {
        Self {
            aisles: aisles.into_iter().map(Into::into).collect(),
            lines_per_aisle,
            rows_per_shelf,
            columns_per_shelf,
        }
    }

    /// Parse a comma separated aisle list such as `"A1,A2,B1"`.
    /// Blank entries are skipped.
    pub fn parse_aisles(list: &str) -> Vec<String> {
        list.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    }

    /// Number of units a generation from this config produces.
    pub fn unit_count(&self) -> usize {
        // front + back line per aisle
        self.aisles.len()
            * self.lines_per_aisle as usize
            * self.rows_per_shelf as usize
            * self.columns_per_shelf as usize
            * 2
    }
}

impl Default for WarehouseConfig {
    fn default() -> Self {
        Self::new(["A1", "A2", "A3", "B1", "B2", "B3"], 3, 10, 4)
    }
}

/// Spacing constants used by the generator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutSpacing {
    pub line_gap: f32,
    pub aisle_gap: f32,
}

impl LayoutSpacing {
    /// Reject spacings that would let two placements coincide.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if !self.line_gap.is_finite() || self.line_gap < 0.0 {
            return Err(LayoutError::InvalidLineGap(self.line_gap));
        }
        if !self.aisle_gap.is_finite() || self.aisle_gap <= 0.0 {
            return Err(LayoutError::InvalidAisleGap(self.aisle_gap));
        }
        Ok(())
    }
}

impl Default for LayoutSpacing {
    fn default() -> Self {
        Self {
            line_gap: DISTANCE_BETWEEN_LINES,
            aisle_gap: DISTANCE_BETWEEN_AISLES,
        }
    }
}
