//! Tunables for the whole irrigation system.

use irrigation_core::fixed::{Fixed64, MAX_PRESSURE};
use irrigation_network::{LeakConfig, PressureConfig};
use serde::{Deserialize, Serialize};

use crate::usage::UsageConfig;

/// A tunable rejected by [`IrrigationConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be within [{min}, {max}], got {value}")]
    OutOfRange {
        field: &'static str,
        value: Fixed64,
        min: Fixed64,
        max: Fixed64,
    },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: Fixed64 },
}

/// Every tunable of the irrigation simulation. The defaults are the
/// reference behavior; data files may override any of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrrigationConfig {
    pub pressure: PressureConfig,
    pub leak: LeakConfig,
    pub usage: UsageConfig,
}

fn check_range(
    field: &'static str,
    value: Fixed64,
    min: Fixed64,
    max: Fixed64,
) -> Result<(), ConfigError> {
    if value < min || value > max {
        return Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

fn check_non_negative(field: &'static str, value: Fixed64) -> Result<(), ConfigError> {
    if value < Fixed64::ZERO {
        return Err(ConfigError::Negative { field, value });
    }
    Ok(())
}

impl IrrigationConfig {
    /// Check that every value keeps the simulation's invariants reachable:
    /// pressures in `[0, 100]` with a non-zero connected floor, probabilities
    /// in `[0, 1]`, and non-negative rates.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.pressure;
        let tiny = Fixed64::from_bits(1);
        check_range("pressure.source_pressure", p.source_pressure, tiny, MAX_PRESSURE)?;
        check_non_negative("pressure.decay_per_hop", p.decay_per_hop)?;
        check_range(
            "pressure.min_connected_pressure",
            p.min_connected_pressure,
            tiny,
            p.source_pressure,
        )?;

        let l = &self.leak;
        check_range("leak.base_probability", l.base_probability, Fixed64::ZERO, Fixed64::ONE)?;
        check_range(
            "leak.per_day_probability",
            l.per_day_probability,
            Fixed64::ZERO,
            Fixed64::ONE,
        )?;
        check_range("leak.max_probability", l.max_probability, Fixed64::ZERO, Fixed64::ONE)?;

        let c = &self.usage.consumption;
        check_non_negative("usage.consumption.fixed", c.fixed)?;
        check_non_negative("usage.consumption.rotary", c.rotary)?;
        check_non_negative("usage.consumption.impact", c.impact)?;
        check_non_negative("usage.consumption.precision", c.precision)?;

        let r = &self.usage.cost;
        check_non_negative("usage.cost.municipal", r.municipal)?;
        check_non_negative("usage.cost.well", r.well)?;
        check_non_negative("usage.cost.reservoir", r.reservoir)?;
        Ok(())
    }
}
