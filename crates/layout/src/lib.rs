//! Layout: turns a warehouse shape into crate and spot light placements.
//!
//! # Invariants
//! - Generation is a pure function of the config and spacing.
//! - No two unit placements of one generation share a position.
//! - Counts, not ratios, drive the loops; any zero dimension yields an empty
//!   unit list without error.

mod config;
mod generator;

pub use config::{
    DISTANCE_BETWEEN_AISLES, DISTANCE_BETWEEN_LINES, LayoutError, LayoutSpacing, WarehouseConfig,
};
pub use generator::{
    Bounds, Layout, LightPlacement, ShelfFace, UnitPlacement, generate_layout,
    generate_layout_with,
};

pub fn crate_info() -> &'static str {
    "storehouse-layout v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_info_names_crate() {
        assert!(crate_info().contains("layout"));
    }
}
