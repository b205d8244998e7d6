//! Sprinkler coverage geometry.
//!
//! A coverage pattern is the set of tiles a sprinkler head waters and the
//! efficiency (0..1) it achieves on each, as a pure function of the head's
//! position, its [`SprinklerClass`] and the pressure at its pipe. Same
//! inputs always give the same pattern, in the same row-major order.
//!
//! | class | shape | tiles |
//! |---|---|---|
//! | `Fixed` | 3x3 block | 9 |
//! | `Rotary` | disc, `d² <= 5` | 21 |
//! | `Impact` | disc, `d² <= 10` | 37 |
//! | `Precision` | plus | 5 |

pub mod pattern;

pub use pattern::{CoverageTile, SprinklerClass, coverage_pattern, total_efficiency};
