//! Builders shared by unit and integration tests.

use irrigation_core::fixed::Fixed64;
use irrigation_core::grid::GridPosition;
use irrigation_network::PipeClass;

use crate::source::WaterSourceClass;
use crate::system::IrrigationSystem;

pub fn pos(x: i32, y: i32) -> GridPosition {
    GridPosition::new(x, y)
}

pub fn fixed(v: f64) -> Fixed64 {
    Fixed64::from_num(v)
}

/// PVC pipes at `coords` (laid at time 0), a municipal source on the first
/// one, pressures already updated.
pub fn pressurized_line(coords: &[(i32, i32)]) -> IrrigationSystem {
    let mut sys = IrrigationSystem::new();
    if let Some(&(x, y)) = coords.first() {
        sys = sys.add_water_source(WaterSourceClass::Municipal, pos(x, y));
    }
    for &(x, y) in coords {
        sys = sys.add_pipe(pos(x, y), PipeClass::Pvc, 0);
    }
    sys.update_pipe_pressures()
}

/// A fairway-style layout: a trunk along `y = 0` from `x = 0` to
/// `length - 1`, fed at the origin, with a lateral of `lateral` pipes
/// every `spacing` columns. Pressures are updated.
pub fn fairway(length: i32, spacing: i32, lateral: i32) -> IrrigationSystem {
    let mut sys = IrrigationSystem::new().add_water_source(WaterSourceClass::Reservoir, pos(0, 0));
    for x in 0..length {
        sys = sys.add_pipe(pos(x, 0), PipeClass::Pvc, 0);
        if spacing > 0 && x % spacing == 0 {
            for y in 1..=lateral {
                sys = sys.add_pipe(pos(x, y), PipeClass::Hdpe, 0);
            }
        }
    }
    sys.update_pipe_pressures()
}

/// Pipe pressures at the given coordinates (0 where there is no pipe).
pub fn pressures_along(sys: &IrrigationSystem, coords: &[(i32, i32)]) -> Vec<Fixed64> {
    coords
        .iter()
        .map(|&(x, y)| {
            sys.pipe_at(pos(x, y))
                .map(|p| p.pressure())
                .unwrap_or(Fixed64::ZERO)
        })
        .collect()
}
