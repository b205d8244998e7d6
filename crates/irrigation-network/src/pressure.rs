//! Distance-decay pressure propagation.
//!
//! Every recompute starts from scratch: each water source seeds the pipe
//! co-located with it at full pressure, a breadth-first walk assigns
//! `source_pressure - hops * decay_per_hop` outward, and each pipe keeps the
//! best value any source offers. Pipes no source reaches settle at 0.
//! Results depend only on graph distance, never on insertion order.

use std::collections::{BTreeMap, BTreeSet};

use irrigation_core::fixed::{Fixed64, MAX_PRESSURE, clamp_pressure};
use irrigation_core::grid::GridPosition;
use serde::{Deserialize, Serialize};

use crate::event::NetworkEvent;
use crate::graph::PipeNetwork;

/// Tunables for pressure propagation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PressureConfig {
    /// Pressure of a pipe sitting on a water source.
    pub source_pressure: Fixed64,
    /// Pressure lost per pipe hop away from the source.
    pub decay_per_hop: Fixed64,
    /// Floor for any pipe that has a path to a source. Must be above 0 so
    /// that pressure 0 always means "no path".
    pub min_connected_pressure: Fixed64,
}

impl Default for PressureConfig {
    fn default() -> Self {
        Self {
            source_pressure: MAX_PRESSURE,
            decay_per_hop: Fixed64::from_num(10),
            min_connected_pressure: Fixed64::ONE,
        }
    }
}

impl PressureConfig {
    /// Pressure offered to a pipe `hops` steps from a source.
    pub fn pressure_at_hops(&self, hops: u32) -> Fixed64 {
        let lost = self.decay_per_hop.saturating_mul_int(i64::from(hops));
        let decayed = self.source_pressure.saturating_sub(lost);
        clamp_pressure(decayed.max(self.min_connected_pressure))
    }
}

impl PipeNetwork {
    /// Compute pressure for every pipe without modifying the network.
    pub fn compute_pressures(
        &self,
        sources: impl IntoIterator<Item = GridPosition>,
        config: &PressureConfig,
    ) -> BTreeMap<GridPosition, Fixed64> {
        let mut result: BTreeMap<GridPosition, Fixed64> =
            self.positions().map(|p| (p, Fixed64::ZERO)).collect();

        let origins: BTreeSet<GridPosition> = sources.into_iter().collect();
        for origin in origins {
            if !self.contains(origin) {
                tracing::trace!(x = origin.x, y = origin.y, "source has no pipe on it");
                continue;
            }
            for (pos, hops) in self.hop_distances(origin) {
                let offered = config.pressure_at_hops(hops);
                if let Some(current) = result.get_mut(&pos) {
                    if offered > *current {
                        *current = offered;
                    }
                }
            }
        }

        result
    }

    /// Recompute and store pressure for every pipe.
    ///
    /// Returns a [`NetworkEvent::PressureLost`] or
    /// [`NetworkEvent::PressureRestored`] for each pipe whose pressurized
    /// state flipped, in coordinate order.
    pub fn update_pressures(
        &mut self,
        sources: impl IntoIterator<Item = GridPosition>,
        config: &PressureConfig,
    ) -> Vec<NetworkEvent> {
        let computed = self.compute_pressures(sources, config);
        let mut events = Vec::new();
        for pipe in self.pipes_mut() {
            let was_pressurized = pipe.is_pressurized();
            let value = computed
                .get(&pipe.position())
                .copied()
                .unwrap_or(Fixed64::ZERO);
            pipe.set_pressure(value);

            match (was_pressurized, pipe.is_pressurized()) {
                (true, false) => events.push(NetworkEvent::PressureLost {
                    position: pipe.position(),
                }),
                (false, true) => events.push(NetworkEvent::PressureRestored {
                    position: pipe.position(),
                    pressure: pipe.pressure(),
                }),
                _ => {}
            }
        }
        tracing::debug!(
            pipes = self.len(),
            pressurized = self.pipes().filter(|p| p.is_pressurized()).count(),
            transitions = events.len(),
            "pipe pressures recomputed"
        );
        events
    }
}
