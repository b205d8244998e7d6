//! Water consumption and cost accounting.
//!
//! Usage is summed over the heads the caller passes in: each active head
//! with pressure at its pipe contributes
//! `sum(coverage efficiency) * class rate * delta_minutes / 60`.
//! Heads without pressure contribute nothing, whatever their active flag.
//! The per-tile amounts feed the terrain moisture model.

use std::collections::BTreeMap;

use irrigation_core::fixed::{Fixed64, GameMinutes, MINUTES_PER_HOUR};
use irrigation_core::grid::GridPosition;
use irrigation_coverage::{SprinklerClass, total_efficiency};
use serde::{Deserialize, Serialize};

use crate::head::SprinklerHead;
use crate::source::{WaterSource, WaterSourceClass};
use crate::system::IrrigationSystem;

/// Water used per hour by one fully efficient covered tile, per head class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumptionRates {
    pub fixed: Fixed64,
    pub rotary: Fixed64,
    pub impact: Fixed64,
    pub precision: Fixed64,
}

impl Default for ConsumptionRates {
    fn default() -> Self {
        Self {
            fixed: Fixed64::from_num(20),
            rotary: Fixed64::from_num(15),
            impact: Fixed64::from_num(12),
            precision: Fixed64::from_num(8),
        }
    }
}

impl ConsumptionRates {
    pub fn rate(&self, class: SprinklerClass) -> Fixed64 {
        match class {
            SprinklerClass::Fixed => self.fixed,
            SprinklerClass::Rotary => self.rotary,
            SprinklerClass::Impact => self.impact,
            SprinklerClass::Precision => self.precision,
        }
    }
}

/// Price per 1000 units of water, per source class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCostRates {
    pub municipal: Fixed64,
    pub well: Fixed64,
    pub reservoir: Fixed64,
}

impl Default for SourceCostRates {
    fn default() -> Self {
        Self {
            municipal: Fixed64::from_num(0.1),
            well: Fixed64::from_num(0.04),
            reservoir: Fixed64::from_num(0.02),
        }
    }
}

impl SourceCostRates {
    pub fn per_thousand(&self, class: WaterSourceClass) -> Fixed64 {
        match class {
            WaterSourceClass::Municipal => self.municipal,
            WaterSourceClass::Well => self.well,
            WaterSourceClass::Reservoir => self.reservoir,
        }
    }
}

/// Tunables for usage and cost.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageConfig {
    pub consumption: ConsumptionRates,
    pub cost: SourceCostRates,
}

/// Water delivered to one tile during the accounted interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoistureDelta {
    pub position: GridPosition,
    pub amount: Fixed64,
}

/// Result of a usage calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WaterUsage {
    /// Total volume drawn from the sources.
    pub volume: Fixed64,
    /// Per-tile amounts, merged across overlapping heads, in row-major
    /// order. Tiles that received nothing are omitted. They sum to
    /// `volume` up to fixed-point rounding.
    pub deltas: Vec<MoistureDelta>,
    /// Heads that actually contributed.
    pub contributing_heads: usize,
}

/// Convert an interval to hours. Saturates on absurd intervals.
fn hours(delta_minutes: GameMinutes) -> Fixed64 {
    Fixed64::saturating_from_num(delta_minutes) / Fixed64::from_num(MINUTES_PER_HOUR)
}

/// Water used by `heads` over `delta_minutes`, measured against the
/// pressures and rates of `system`.
pub fn calculate_water_usage<'a>(
    heads: impl IntoIterator<Item = &'a SprinklerHead>,
    delta_minutes: GameMinutes,
    system: &IrrigationSystem,
) -> WaterUsage {
    let time_factor = hours(delta_minutes);
    let rates = &system.config().usage.consumption;

    let mut volume = Fixed64::ZERO;
    let mut per_tile: BTreeMap<GridPosition, Fixed64> = BTreeMap::new();
    let mut contributing_heads = 0;

    for head in heads {
        if !head.active || system.head_pressure(head) == Fixed64::ZERO {
            continue;
        }
        let scale = rates.rate(head.class).saturating_mul(time_factor);
        volume = volume.saturating_add(total_efficiency(&head.coverage).saturating_mul(scale));
        for tile in &head.coverage {
            let amount = tile.efficiency.saturating_mul(scale);
            if amount > Fixed64::ZERO {
                let entry = per_tile.entry(tile.position).or_insert(Fixed64::ZERO);
                *entry = entry.saturating_add(amount);
            }
        }
        contributing_heads += 1;
    }

    tracing::trace!(
        delta_minutes,
        contributing_heads,
        tiles = per_tile.len(),
        "water usage calculated"
    );

    WaterUsage {
        volume,
        deltas: per_tile
            .into_iter()
            .map(|(position, amount)| MoistureDelta { position, amount })
            .collect(),
        contributing_heads,
    }
}

/// Price of `volume` units drawn from `source`, at the default rates.
pub fn calculate_water_cost(volume: Fixed64, source: &WaterSource) -> Fixed64 {
    water_cost_with(volume, source, &SourceCostRates::default())
}

/// Price of `volume` units drawn from `source` at the given rates.
/// Linear: `volume * rate / 1000`.
pub fn water_cost_with(volume: Fixed64, source: &WaterSource, rates: &SourceCostRates) -> Fixed64 {
    volume.saturating_mul(rates.per_thousand(source.class)) / Fixed64::from_num(1000)
}
