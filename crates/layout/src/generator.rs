use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::{LayoutError, LayoutSpacing, WarehouseConfig};

/// Which side of an aisle a shelf line faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShelfFace {
    Front,
    Back,
}

/// One crate slot on a shelf.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitPlacement {
    pub position: Vec3,
    /// Index into [`WarehouseConfig::aisles`].
    pub aisle: usize,
    pub face: ShelfFace,
}

/// A spot light hanging over one shelf line, aimed at the floor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightPlacement {
    pub position: Vec3,
    pub target: Vec3,
    pub aisle: usize,
    pub line: u32,
}

/// Axis-aligned extents of the generated units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds {
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

/// Result of one layout generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub units: Vec<UnitPlacement>,
    pub lights: Vec<LightPlacement>,
    /// Overview vantage point sized to the whole warehouse.
    pub camera_anchor: Vec3,
    /// Ground point directly below the anchor.
    pub camera_target: Vec3,
}

impl Layout {
    /// Extents of all unit positions, or `None` for an empty layout.
    pub fn bounds(&self) -> Option<Bounds> {
        let first = self.units.first()?.position;
        let (min, max) = self
            .units
            .iter()
            .fold((first, first), |(min, max), u| {
                (min.min(u.position), max.max(u.position))
            });
        Some(Bounds { min, max })
    }

    /// Units belonging to one aisle, in generation order.
    pub fn units_in_aisle(&self, aisle: usize) -> impl Iterator<Item = &UnitPlacement> {
        self.units.iter().filter(move |u| u.aisle == aisle)
    }
}

/// Generate a layout with the default spacing constants.
pub fn generate_layout(config: &WarehouseConfig) -> Layout {
    build(config, LayoutSpacing::default())
}

/// Generate a layout with custom spacing. Fails only on invalid spacing.
pub fn generate_layout_with(
    config: &WarehouseConfig,
    spacing: LayoutSpacing,
) -> Result<Layout, LayoutError> {
    spacing.validate()?;
    Ok(build(config, spacing))
}

fn build(config: &WarehouseConfig, spacing: LayoutSpacing) -> Layout {
    let rows = config.rows_per_shelf as f32;
    let columns = config.columns_per_shelf as f32;
    let line_stride = rows + spacing.line_gap;

    let mut units = Vec::with_capacity(config.unit_count());
    let mut lights = Vec::with_capacity(config.aisles.len() * config.lines_per_aisle as usize);

    let mut z = 0.0_f32;
    for aisle in 0..config.aisles.len() {
        push_line(&mut units, config, line_stride, aisle, ShelfFace::Front, z);

        // One light per line, shared by the front and back shelves.
        let light_z = z + spacing.aisle_gap / 2.0;
        for line in 0..config.lines_per_aisle {
            let light_x = rows / 2.0 + line as f32 * line_stride;
            lights.push(LightPlacement {
                position: Vec3::new(light_x, 2.0 * columns, light_z),
                target: Vec3::new(light_x, 0.0, light_z),
                aisle,
                line,
            });
        }

        z += spacing.aisle_gap;
        push_line(&mut units, config, line_stride, aisle, ShelfFace::Back, z);

        z += 1.0;
    }

    let aisle_count = config.aisles.len() as f32;
    // The depth term keeps the original two-unit allowance per aisle.
    let camera_anchor = Vec3::new(
        config.lines_per_aisle as f32 / 2.0 * line_stride,
        columns * 1.5 + aisle_count * 3.0,
        aisle_count * (2.0 + spacing.aisle_gap) / 2.0,
    );
    let camera_target = Vec3::new(camera_anchor.x, 0.0, camera_anchor.z);

    tracing::debug!(
        aisles = config.aisles.len(),
        units = units.len(),
        lights = lights.len(),
        "layout generated"
    );

    Layout {
        units,
        lights,
        camera_anchor,
        camera_target,
    }
}

fn push_line(
    units: &mut Vec<UnitPlacement>,
    config: &WarehouseConfig,
    line_stride: f32,
    aisle: usize,
    face: ShelfFace,
    z: f32,
) {
    for line in 0..config.lines_per_aisle {
        for row in 0..config.rows_per_shelf {
            for column in 0..config.columns_per_shelf {
                units.push(UnitPlacement {
                    position: Vec3::new(row as f32 + line as f32 * line_stride, column as f32, z),
                    aisle,
                    face,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DISTANCE_BETWEEN_AISLES, DISTANCE_BETWEEN_LINES};
    use std::collections::HashSet;

    fn small() -> WarehouseConfig {
        WarehouseConfig::new(["A1", "A2"], 1, 2, 2)
    }

    fn position_key(p: Vec3) -> (u32, u32, u32) {
        (p.x.to_bits(), p.y.to_bits(), p.z.to_bits())
    }

    #[test]
    fn small_warehouse_has_sixteen_units() {
        let layout = generate_layout(&small());
        assert_eq!(layout.units.len(), 16);
        assert_eq!(layout.lights.len(), 2);
    }

    #[test]
    fn front_and_back_lines_of_first_aisle() {
        let layout = generate_layout(&small());

        let front: Vec<Vec3> = layout
            .units_in_aisle(0)
            .filter(|u| u.face == ShelfFace::Front)
            .map(|u| u.position)
            .collect();
        assert_eq!(front.len(), 4);
        for p in &front {
            assert_eq!(p.z, 0.0);
            assert!(p.x == 0.0 || p.x == 1.0);
            assert!(p.y == 0.0 || p.y == 1.0);
        }

        let back_z: HashSet<u32> = layout
            .units_in_aisle(0)
            .filter(|u| u.face == ShelfFace::Back)
            .map(|u| u.position.z.to_bits())
            .collect();
        assert_eq!(back_z, HashSet::from([DISTANCE_BETWEEN_AISLES.to_bits()]));
    }

    #[test]
    fn consecutive_aisles_are_separated_by_one() {
        let layout = generate_layout(&small());
        let second_front = layout
            .units_in_aisle(1)
            .find(|u| u.face == ShelfFace::Front)
            .unwrap();
        assert_eq!(second_front.position.z, DISTANCE_BETWEEN_AISLES + 1.0);
    }

    #[test]
    fn unit_count_matches_formula() {
        for (aisles, lines, rows, columns) in [(1, 1, 1, 1), (3, 2, 5, 4), (6, 3, 10, 4), (2, 4, 1, 7)] {
            let names: Vec<String> = (0..aisles).map(|i| format!("A{i}")).collect();
            let config = WarehouseConfig::new(names, lines, rows, columns);
            let layout = generate_layout(&config);
            assert_eq!(
                layout.units.len(),
                aisles * lines as usize * rows as usize * columns as usize * 2
            );
            assert_eq!(layout.units.len(), config.unit_count());
        }
    }

    #[test]
    fn positions_are_unique() {
        let layout = generate_layout(&WarehouseConfig::default());
        let unique: HashSet<_> = layout.units.iter().map(|u| position_key(u.position)).collect();
        assert_eq!(unique.len(), layout.units.len());
    }

    #[test]
    fn positions_unique_with_zero_line_gap() {
        let spacing = LayoutSpacing {
            line_gap: 0.0,
            aisle_gap: 0.5,
        };
        let layout = generate_layout_with(&WarehouseConfig::new(["A", "B", "C"], 3, 4, 2), spacing)
            .unwrap();
        let unique: HashSet<_> = layout.units.iter().map(|u| position_key(u.position)).collect();
        assert_eq!(unique.len(), layout.units.len());
    }

    #[test]
    fn generation_is_idempotent() {
        let config = WarehouseConfig::default();
        let a = generate_layout(&config);
        let b = generate_layout(&config);
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn lights_hang_over_line_midpoints() {
        let layout = generate_layout(&WarehouseConfig::new(["A1"], 2, 10, 4));
        assert_eq!(layout.lights.len(), 2);

        let second = layout.lights[1];
        let expected_x = 10.0 / 2.0 + (10.0 + DISTANCE_BETWEEN_LINES);
        assert_eq!(second.line, 1);
        assert_eq!(second.position, Vec3::new(expected_x, 8.0, DISTANCE_BETWEEN_AISLES / 2.0));
        assert_eq!(second.target, Vec3::new(expected_x, 0.0, DISTANCE_BETWEEN_AISLES / 2.0));
    }

    #[test]
    fn camera_anchor_spans_the_warehouse() {
        let layout = generate_layout(&WarehouseConfig::default());
        // 3 lines of 10 rows with a gap of 2
        assert_eq!(layout.camera_anchor, Vec3::new(18.0, 24.0, 18.0));
        assert_eq!(layout.camera_target, Vec3::new(18.0, 0.0, 18.0));
    }

    #[test]
    fn zero_dimensions_yield_empty_units() {
        let cases = [
            WarehouseConfig::new(Vec::<String>::new(), 3, 10, 4),
            WarehouseConfig::new(["A1"], 0, 10, 4),
            WarehouseConfig::new(["A1"], 3, 0, 4),
            WarehouseConfig::new(["A1"], 3, 10, 0),
        ];
        for config in &cases {
            let layout = generate_layout(config);
            assert!(layout.units.is_empty());
            assert!(layout.bounds().is_none());
            assert!(layout.camera_anchor.is_finite());
        }
        // lights depend only on aisles and lines
        assert_eq!(generate_layout(&cases[2]).lights.len(), 3);
        assert!(generate_layout(&cases[1]).lights.is_empty());
    }

    #[test]
    fn bounds_cover_every_unit() {
        let layout = generate_layout(&small());
        let bounds = layout.bounds().unwrap();
        assert_eq!(bounds.min, Vec3::ZERO);
        assert_eq!(bounds.max, Vec3::new(1.0, 1.0, 2.0 * DISTANCE_BETWEEN_AISLES + 1.0));
        assert!(bounds.size().cmpge(Vec3::ZERO).all());
    }

    #[test]
    fn invalid_spacing_is_rejected() {
        let spacing = LayoutSpacing {
            line_gap: -3.0,
            aisle_gap: 4.0,
        };
        assert!(generate_layout_with(&small(), spacing).is_err());
    }
}
