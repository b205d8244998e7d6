//! Pipe network for the course irrigation simulation.
//!
//! Holds every pipe keyed by grid coordinate, keeps the orthogonal
//! adjacency graph symmetric, derives per-pipe pressure by distance decay
//! from water sources, and ages pipes into probabilistic leaks.
//!
//! # Design
//!
//! - At most one pipe per coordinate; the coordinate is the pipe's identity.
//! - Adjacency is established at insertion by scanning the four orthogonal
//!   neighbors, and both sides of every edge are always written together.
//! - Pressure is never recomputed implicitly. Callers run
//!   [`PipeNetwork::update_pressures`] after topology edits, so bulk edits
//!   stay linear.
//! - Leak checks take an explicit [`SimRng`](irrigation_core::rng::SimRng)
//!   and refuse to re-roll a timestamp they have already rolled.

pub mod event;
pub mod graph;
pub mod leak;
pub mod pipe;
pub mod pressure;

pub use event::NetworkEvent;
pub use graph::PipeNetwork;
pub use leak::{LeakConfig, RepairOutcome};
pub use pipe::{Pipe, PipeClass};
pub use pressure::PressureConfig;
