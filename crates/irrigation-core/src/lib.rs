//! Irrigation Core -- shared primitives for the course irrigation simulation.
//!
//! Every other irrigation crate builds on the types defined here:
//!
//! - [`fixed::Fixed64`] -- Q32.32 fixed-point type for deterministic math.
//!   Pressure, coverage efficiency, water volume and cost are all `Fixed64`
//!   so a replay produces bit-identical results on every platform.
//! - [`fixed::GameMinutes`] -- the unit of game time.
//! - [`grid::GridPosition`] -- a tile coordinate on the course grid, with
//!   4-neighborhood helpers used by the pipe graph.
//! - [`id::SprinklerId`] -- identity of a sprinkler head.
//! - [`rng::SimRng`] -- explicitly threaded, seedable PRNG. The simulation
//!   never reaches for ambient randomness.

pub mod fixed;
pub mod grid;
pub mod id;
pub mod rng;
