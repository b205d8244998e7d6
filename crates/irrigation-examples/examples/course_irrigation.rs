//! Course irrigation example: a fairway with a night schedule.
//!
//! Lays a trunk line from a municipal hookup, branches two laterals, places
//! sprinkler heads along them, and runs a simulated day in one-hour steps,
//! printing water used and cost per hour. Halfway through a lateral is cut
//! to show pressure loss propagating to the heads.
//!
//! Run with: `cargo run -p irrigation-examples --example course_irrigation`

use irrigation_core::fixed::{Fixed64, MINUTES_PER_HOUR};
use irrigation_core::grid::GridPosition;
use irrigation_coverage::SprinklerClass;
use irrigation_network::{NetworkEvent, PipeClass};
use irrigation_system::{IrrigationSystem, SprinklerSchedule, TimeRange, WaterSourceClass};

fn main() {
    let hookup = GridPosition::new(0, 0);
    let mut sys = IrrigationSystem::new().add_water_source(WaterSourceClass::Municipal, hookup);

    // --- Lay the trunk and two laterals ---

    for x in 0..8 {
        sys = sys.add_pipe(GridPosition::new(x, 0), PipeClass::DuctileIron, 0);
    }
    for y in 1..=3 {
        sys = sys.add_pipe(GridPosition::new(2, y), PipeClass::Pvc, 0);
        sys = sys.add_pipe(GridPosition::new(6, y), PipeClass::Hdpe, 0);
    }
    sys = sys.update_pipe_pressures();

    // --- Place heads ---

    let night = SprinklerSchedule::windows(vec![
        TimeRange::hours(21, 5).expect("valid window"),
    ]);
    let placements = [
        (GridPosition::new(2, 3), SprinklerClass::Rotary),
        (GridPosition::new(6, 3), SprinklerClass::Rotary),
        (GridPosition::new(4, 0), SprinklerClass::Impact),
        (GridPosition::new(0, 0), SprinklerClass::Precision),
    ];
    let mut ids = Vec::new();
    for (position, class) in placements {
        let (next, id) = sys.add_sprinkler(position, class, 0);
        sys = next
            .set_sprinkler_schedule(id, night.clone())
            .expect("head was just added");
        ids.push(id);
    }

    println!("=== Layout ===\n");
    let stats = sys.stats();
    println!(
        "pipes={}, heads={}, sources={}",
        stats.pipes, stats.heads, stats.sources
    );
    for head in sys.heads() {
        println!(
            "  {} {:?} at ({}, {}): pressure {:.0}, {} tiles",
            head.id,
            head.class,
            head.position.x,
            head.position.y,
            sys.head_pressure(head),
            head.coverage.len()
        );
    }

    // --- Run a day ---

    println!("\n=== One day, hourly ===\n");
    let source = sys.sources()[0];
    let mut total_volume = Fixed64::ZERO;
    let mut total_cost = Fixed64::ZERO;

    for hour in 0..24u64 {
        let now = hour * MINUTES_PER_HOUR;

        if hour == 2 {
            // A mower clips the east lateral.
            sys = sys
                .remove_pipe(GridPosition::new(6, 1))
                .expect("lateral pipe exists");
            let (next, events) = sys.update_pipe_pressures_with_events();
            sys = next;
            let lost = events
                .iter()
                .filter(|e| matches!(e, NetworkEvent::PressureLost { .. }))
                .count();
            println!("  [02:00] lateral cut, {lost} pipes lost pressure");
        }

        let running = sys.heads_running_at(now);
        let usage = sys.calculate_water_usage(running.iter().copied(), MINUTES_PER_HOUR);
        let cost = sys.calculate_water_cost(usage.volume, &source);
        total_volume += usage.volume;
        total_cost += cost;

        if usage.contributing_heads > 0 {
            println!(
                "  {:02}:00  heads={} tiles={} volume={:.2} cost={:.4}",
                hour,
                usage.contributing_heads,
                usage.deltas.len(),
                usage.volume,
                cost
            );
        }
    }

    println!("\nTotal: volume={total_volume:.2}, cost={total_cost:.4}");
}
