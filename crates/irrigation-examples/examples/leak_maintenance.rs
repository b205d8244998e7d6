//! Leak maintenance example: aging pipes, seeded leak rolls, repairs.
//!
//! Builds a small loop of mixed pipe classes, advances a year day by day
//! with a fixed seed, and sends a crew to fix every leak the next morning.
//! The same seed always produces the same maintenance log.
//!
//! Run with: `cargo run -p irrigation-examples --example leak_maintenance`

use std::path::Path;

use irrigation_core::fixed::days;
use irrigation_core::grid::GridPosition;
use irrigation_core::rng::SimRng;
use irrigation_network::{NetworkEvent, PipeClass};
use irrigation_system::{IrrigationSystem, WaterSourceClass};

fn main() {
    // Tunables come from `./data/irrigation.*` when present.
    let config = irrigation_data::load_irrigation_config(Path::new("data")).unwrap_or_else(|e| {
        println!("falling back to defaults: {e}");
        Default::default()
    });

    let mut sys = IrrigationSystem::with_config(config)
        .add_water_source(WaterSourceClass::Well, GridPosition::new(0, 0));
    let classes = PipeClass::all();
    let mut i = 0;
    for x in 0..5 {
        for y in [0, 4] {
            sys = sys.add_pipe(GridPosition::new(x, y), classes[i % classes.len()], 0);
            i += 1;
        }
    }
    for y in 1..4 {
        for x in [0, 4] {
            sys = sys.add_pipe(GridPosition::new(x, y), classes[i % classes.len()], 0);
            i += 1;
        }
    }
    sys = sys.update_pipe_pressures();

    let mut rng = SimRng::new(0x601f);
    let mut repairs = 0;

    for day in 1..=365 {
        let (next, events) = sys.check_for_leaks(days(day), &mut rng);
        sys = next;
        for event in &events {
            if let NetworkEvent::LeakFormed { position, .. } = event {
                let class = sys
                    .pipe_at(*position)
                    .map(|p| format!("{:?}", p.class()))
                    .unwrap_or_default();
                println!("day {day:3}: leak at ({}, {}) [{class}]", position.x, position.y);
            }
        }
        for position in sys.leaking_pipes() {
            if let Some(fixed) = sys.repair_leak(position) {
                sys = fixed;
                repairs += 1;
            }
        }
    }

    let stats = sys.stats();
    println!(
        "\nAfter a year: {} pipes, {} repairs, {} still leaking",
        stats.pipes, repairs, stats.leaking_pipes
    );
}
