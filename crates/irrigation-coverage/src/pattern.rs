use irrigation_core::fixed::{Fixed64, clamp_unit, pressure_fraction};
use irrigation_core::grid::GridPosition;
use serde::{Deserialize, Serialize};

/// Sprinkler head type. Decides the shape of the watered area and how
/// efficiency responds to distance and pressure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SprinklerClass {
    /// Pop-up spray: 3x3 block, uniform efficiency.
    Fixed,
    /// Gear-driven rotor: medium disc, efficiency falls off with distance.
    Rotary,
    /// Impact head: largest throw, gentle falloff.
    Impact,
    /// Drip/micro head: tiny footprint, least sensitive to low pressure.
    Precision,
}

impl SprinklerClass {
    pub fn all() -> [SprinklerClass; 4] {
        [
            SprinklerClass::Fixed,
            SprinklerClass::Rotary,
            SprinklerClass::Impact,
            SprinklerClass::Precision,
        ]
    }

    /// Largest offset along either axis.
    pub fn reach(&self) -> i32 {
        match self {
            SprinklerClass::Fixed | SprinklerClass::Precision => 1,
            SprinklerClass::Rotary => 2,
            SprinklerClass::Impact => 3,
        }
    }

    /// Whether the tile at offset `(dx, dy)` from the head is watered.
    fn covers(&self, dx: i32, dy: i32) -> bool {
        let d2 = dx * dx + dy * dy;
        match self {
            SprinklerClass::Fixed => dx.abs() <= 1 && dy.abs() <= 1,
            SprinklerClass::Rotary => d2 <= 5,
            SprinklerClass::Impact => d2 <= 10,
            SprinklerClass::Precision => d2 <= 1,
        }
    }

    /// Efficiency on a covered tile at squared distance `d2`, for a pressure
    /// fraction `pf` in `[0, 1]`.
    fn efficiency(&self, d2: i32, pf: Fixed64) -> Fixed64 {
        let falloff = |span: i32| Fixed64::ONE - Fixed64::from_num(d2) / Fixed64::from_num(span);
        let value = match self {
            SprinklerClass::Fixed => pf,
            SprinklerClass::Rotary => pf * falloff(10),
            SprinklerClass::Impact => pf * falloff(20),
            SprinklerClass::Precision => {
                if pf == Fixed64::ZERO {
                    Fixed64::ZERO
                } else {
                    let half = Fixed64::from_num(0.5);
                    half + half * pf
                }
            }
        };
        clamp_unit(value)
    }
}

/// One watered tile and the efficiency achieved on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageTile {
    pub position: GridPosition,
    /// In `[0, 1]`; non-decreasing in pressure.
    pub efficiency: Fixed64,
}

/// Every tile watered by a `class` head at `center` under `pressure`
/// (0..100), in row-major order.
///
/// The tile set depends only on the class; pressure only scales
/// efficiencies, and pressure 0 yields efficiency 0 everywhere.
pub fn coverage_pattern(
    center: GridPosition,
    class: SprinklerClass,
    pressure: Fixed64,
) -> Vec<CoverageTile> {
    let pf = pressure_fraction(pressure);
    let reach = class.reach();
    let mut tiles = Vec::new();
    for dy in -reach..=reach {
        for dx in -reach..=reach {
            if !class.covers(dx, dy) {
                continue;
            }
            tiles.push(CoverageTile {
                position: center.offset(dx, dy),
                efficiency: class.efficiency(dx * dx + dy * dy, pf),
            });
        }
    }
    tiles
}

/// Sum of per-tile efficiencies.
pub fn total_efficiency(tiles: &[CoverageTile]) -> Fixed64 {
    tiles
        .iter()
        .fold(Fixed64::ZERO, |acc, t| acc.saturating_add(t.efficiency))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(v: i32) -> Fixed64 {
        Fixed64::from_num(v)
    }

    fn center_efficiency(tiles: &[CoverageTile], center: GridPosition) -> Fixed64 {
        tiles
            .iter()
            .find(|t| t.position == center)
            .map(|t| t.efficiency)
            .unwrap()
    }

    #[test]
    fn fixed_full_pressure_is_nine_full_tiles() {
        let center = GridPosition::new(10, 10);
        let tiles = coverage_pattern(center, SprinklerClass::Fixed, p(100));
        assert_eq!(tiles.len(), 9);
        assert_eq!(center_efficiency(&tiles, center), Fixed64::ONE);
        assert!(tiles.iter().all(|t| t.efficiency == Fixed64::ONE));
    }

    #[test]
    fn fixed_half_pressure_lowers_center() {
        let center = GridPosition::new(10, 10);
        let full = coverage_pattern(center, SprinklerClass::Fixed, p(100));
        let half = coverage_pattern(center, SprinklerClass::Fixed, p(50));
        assert_eq!(half.len(), 9);
        assert!(center_efficiency(&half, center) < center_efficiency(&full, center));
        assert_eq!(center_efficiency(&half, center), Fixed64::from_num(0.5));
    }

    #[test]
    fn tile_counts_are_ordered() {
        let c = GridPosition::new(0, 0);
        let count = |class| coverage_pattern(c, class, p(100)).len();
        assert_eq!(count(SprinklerClass::Fixed), 9);
        assert_eq!(count(SprinklerClass::Rotary), 21);
        assert_eq!(count(SprinklerClass::Impact), 37);
        assert_eq!(count(SprinklerClass::Precision), 5);
        assert!(count(SprinklerClass::Impact) >= count(SprinklerClass::Rotary));
        assert!(count(SprinklerClass::Rotary) > count(SprinklerClass::Fixed));
    }

    #[test]
    fn precision_beats_fixed_at_reduced_pressure() {
        let c = GridPosition::new(3, 3);
        for pressure in [10, 25, 50, 75, 99] {
            let fixed = coverage_pattern(c, SprinklerClass::Fixed, p(pressure));
            let precise = coverage_pattern(c, SprinklerClass::Precision, p(pressure));
            assert!(center_efficiency(&precise, c) > center_efficiency(&fixed, c));
        }
    }

    #[test]
    fn rotary_falls_off_with_distance() {
        let c = GridPosition::new(0, 0);
        let tiles = coverage_pattern(c, SprinklerClass::Rotary, p(100));
        let at = |x, y| center_efficiency(&tiles, GridPosition::new(x, y));
        assert_eq!(at(0, 0), Fixed64::ONE);
        assert!(at(1, 0) < at(0, 0));
        assert!(at(2, 0) < at(1, 0));
        assert!(at(2, 1) < at(2, 0));
        assert!(at(2, 1) > Fixed64::ZERO);
    }

    #[test]
    fn zero_pressure_waters_nothing() {
        let c = GridPosition::new(0, 0);
        for class in SprinklerClass::all() {
            let tiles = coverage_pattern(c, class, Fixed64::ZERO);
            assert!(!tiles.is_empty());
            assert_eq!(total_efficiency(&tiles), Fixed64::ZERO);
        }
    }

    #[test]
    fn out_of_range_pressure_is_clamped() {
        let c = GridPosition::new(0, 0);
        for class in SprinklerClass::all() {
            assert_eq!(
                coverage_pattern(c, class, p(250)),
                coverage_pattern(c, class, p(100))
            );
            assert_eq!(
                coverage_pattern(c, class, p(-20)),
                coverage_pattern(c, class, Fixed64::ZERO)
            );
        }
    }

    #[test]
    fn pattern_is_translated_with_center() {
        let a = coverage_pattern(GridPosition::new(0, 0), SprinklerClass::Impact, p(60));
        let b = coverage_pattern(GridPosition::new(7, -4), SprinklerClass::Impact, p(60));
        for (ta, tb) in a.iter().zip(&b) {
            assert_eq!(ta.position.offset(7, -4), tb.position);
            assert_eq!(ta.efficiency, tb.efficiency);
        }
    }

    #[test]
    fn tiles_are_row_major_and_unique() {
        let tiles = coverage_pattern(GridPosition::new(0, 0), SprinklerClass::Impact, p(100));
        for pair in tiles.windows(2) {
            assert!(pair[0].position < pair[1].position);
        }
    }
}
