//! Irrigation System -- the aggregate root of the course irrigation network.
//!
//! [`system::IrrigationSystem`] composes the pipe network, sprinkler heads
//! and water sources and exposes every operation the rest of the game calls.
//! It is treated as an immutable value: each operation borrows the current
//! aggregate and returns a new one, leaving the input untouched, so any
//! state can be snapshotted, diffed and replayed.
//!
//! # Tick Ordering
//!
//! Pressure is never recomputed implicitly. After any topology change (pipe
//! or source added/removed) the caller runs
//! [`update_pipe_pressures`](system::IrrigationSystem::update_pipe_pressures)
//! before trusting coverage or usage:
//!
//! ```rust,ignore
//! let sys = IrrigationSystem::new()
//!     .add_water_source(WaterSourceClass::Municipal, GridPosition::new(5, 5))
//!     .add_pipe(GridPosition::new(5, 5), PipeClass::Pvc, now)
//!     .update_pipe_pressures();
//! ```
//!
//! # Key Types
//!
//! - [`system::IrrigationSystem`] -- aggregate root and orchestrator.
//! - [`head::SprinklerHead`] -- a head with its coverage and schedule.
//! - [`source::WaterSource`] -- a pressure origin with a cost rate.
//! - [`usage::WaterUsage`] -- volume used plus per-tile moisture deltas.
//! - [`config::IrrigationConfig`] -- every tunable, with defaults.
//! - [`serialize`] -- versioned binary snapshots via bitcode.

pub mod config;
pub mod head;
pub mod index;
pub mod serialize;
pub mod source;
pub mod system;
pub mod usage;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::{ConfigError, IrrigationConfig};
pub use head::{ScheduleError, SprinklerHead, SprinklerSchedule, TimeRange};
pub use source::{WaterSource, WaterSourceClass};
pub use system::{IrrigationSystem, NetworkStats};
pub use usage::{
    ConsumptionRates, MoistureDelta, SourceCostRates, UsageConfig, WaterUsage,
    calculate_water_cost, calculate_water_usage, water_cost_with,
};
