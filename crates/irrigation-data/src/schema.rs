//! File-facing shapes. Values are plain `f64` here and become `Fixed64`
//! only when resolved, so data files stay human-editable.

use irrigation_core::fixed::{
    Fixed64, GameMinutes, MINUTES_PER_DAY, checked_f64_to_fixed64, fixed64_to_f64,
};
use irrigation_network::{LeakConfig, PressureConfig};
use irrigation_system::IrrigationConfig;
use irrigation_system::usage::{ConsumptionRates, SourceCostRates, UsageConfig};
use serde::{Deserialize, Serialize};

/// Top-level layout of an irrigation data file. Every section and field is
/// optional.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IrrigationData {
    pub pressure: PressureData,
    pub leak: LeakData,
    pub usage: UsageData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PressureData {
    pub source_pressure: f64,
    pub decay_per_hop: f64,
    pub min_connected_pressure: f64,
}

impl Default for PressureData {
    fn default() -> Self {
        let d = PressureConfig::default();
        Self {
            source_pressure: fixed64_to_f64(d.source_pressure),
            decay_per_hop: fixed64_to_f64(d.decay_per_hop),
            min_connected_pressure: fixed64_to_f64(d.min_connected_pressure),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LeakData {
    /// Whole days; converted to minutes.
    pub age_threshold_days: u64,
    pub base_probability: f64,
    pub per_day_probability: f64,
    pub max_probability: f64,
}

impl Default for LeakData {
    fn default() -> Self {
        let d = LeakConfig::default();
        Self {
            age_threshold_days: d.age_threshold / MINUTES_PER_DAY,
            base_probability: fixed64_to_f64(d.base_probability),
            per_day_probability: fixed64_to_f64(d.per_day_probability),
            max_probability: fixed64_to_f64(d.max_probability),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConsumptionData {
    pub fixed: f64,
    pub rotary: f64,
    pub impact: f64,
    pub precision: f64,
}

impl Default for ConsumptionData {
    fn default() -> Self {
        let d = ConsumptionRates::default();
        Self {
            fixed: fixed64_to_f64(d.fixed),
            rotary: fixed64_to_f64(d.rotary),
            impact: fixed64_to_f64(d.impact),
            precision: fixed64_to_f64(d.precision),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CostData {
    pub municipal: f64,
    pub well: f64,
    pub reservoir: f64,
}

impl Default for CostData {
    fn default() -> Self {
        let d = SourceCostRates::default();
        Self {
            municipal: fixed64_to_f64(d.municipal),
            well: fixed64_to_f64(d.well),
            reservoir: fixed64_to_f64(d.reservoir),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UsageData {
    pub consumption: ConsumptionData,
    pub cost_per_thousand: CostData,
}

/// A file value that has no `Fixed64` representation (NaN, infinite, or
/// beyond the Q32.32 range).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{field} = {value} is not representable")]
pub struct UnrepresentableValue {
    pub field: &'static str,
    pub value: f64,
}

fn convert(field: &'static str, value: f64) -> Result<Fixed64, UnrepresentableValue> {
    checked_f64_to_fixed64(value).ok_or(UnrepresentableValue { field, value })
}

impl IrrigationData {
    /// Convert to the simulation's config. Does not validate ranges; only
    /// rejects values that cannot be represented at all.
    pub fn resolve(&self) -> Result<IrrigationConfig, UnrepresentableValue> {
        let age_threshold: GameMinutes = self
            .leak
            .age_threshold_days
            .saturating_mul(MINUTES_PER_DAY);
        let p = &self.pressure;
        let l = &self.leak;
        let c = &self.usage.consumption;
        let r = &self.usage.cost_per_thousand;
        Ok(IrrigationConfig {
            pressure: PressureConfig {
                source_pressure: convert("pressure.source_pressure", p.source_pressure)?,
                decay_per_hop: convert("pressure.decay_per_hop", p.decay_per_hop)?,
                min_connected_pressure: convert(
                    "pressure.min_connected_pressure",
                    p.min_connected_pressure,
                )?,
            },
            leak: LeakConfig {
                age_threshold,
                base_probability: convert("leak.base_probability", l.base_probability)?,
                per_day_probability: convert("leak.per_day_probability", l.per_day_probability)?,
                max_probability: convert("leak.max_probability", l.max_probability)?,
            },
            usage: UsageConfig {
                consumption: ConsumptionRates {
                    fixed: convert("usage.consumption.fixed", c.fixed)?,
                    rotary: convert("usage.consumption.rotary", c.rotary)?,
                    impact: convert("usage.consumption.impact", c.impact)?,
                    precision: convert("usage.consumption.precision", c.precision)?,
                },
                cost: SourceCostRates {
                    municipal: convert("usage.cost_per_thousand.municipal", r.municipal)?,
                    well: convert("usage.cost_per_thousand.well", r.well)?,
                    reservoir: convert("usage.cost_per_thousand.reservoir", r.reservoir)?,
                },
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_data_resolves_to_default_config() {
        assert_eq!(IrrigationData::default().resolve(), Ok(IrrigationConfig::default()));
    }

    #[test]
    fn age_threshold_is_in_days() {
        let mut data = IrrigationData::default();
        data.leak.age_threshold_days = 14;
        assert_eq!(data.resolve().unwrap().leak.age_threshold, 14 * MINUTES_PER_DAY);
    }

    #[test]
    fn unrepresentable_values_name_their_field() {
        let mut data = IrrigationData::default();
        data.usage.cost_per_thousand.well = 1.0e12;
        let err = data.resolve().unwrap_err();
        assert_eq!(err.field, "usage.cost_per_thousand.well");

        let mut data = IrrigationData::default();
        data.leak.max_probability = f64::NAN;
        assert_eq!(data.resolve().unwrap_err().field, "leak.max_probability");
    }
}
