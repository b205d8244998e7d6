//! Data-driven tunables for the irrigation simulation.
//!
//! A course ships an optional `irrigation.ron`, `irrigation.toml` or
//! `irrigation.json` next to its other data files. Any value it sets
//! overrides the built-in default; anything it omits keeps the default.

pub mod loader;
pub mod schema;

pub use loader::{DataLoadError, Format, load_config_file, load_irrigation_config};
pub use schema::{IrrigationData, UnrepresentableValue};
