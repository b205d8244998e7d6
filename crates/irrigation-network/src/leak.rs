//! Pipe aging and probabilistic leak formation.

use irrigation_core::fixed::{Fixed64, GameMinutes, MINUTES_PER_DAY, clamp_unit, days};
use irrigation_core::grid::GridPosition;
use irrigation_core::rng::SimRng;
use serde::{Deserialize, Serialize};

use crate::event::NetworkEvent;
use crate::graph::PipeNetwork;
use crate::pipe::PipeClass;

/// Tunables for leak formation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeakConfig {
    /// Pipes younger than this never leak.
    pub age_threshold: GameMinutes,
    /// Chance per check for a pipe that just reached the threshold.
    pub base_probability: Fixed64,
    /// Extra chance per check for every full day past the threshold.
    pub per_day_probability: Fixed64,
    /// Cap applied before the material multiplier.
    pub max_probability: Fixed64,
}

impl Default for LeakConfig {
    fn default() -> Self {
        Self {
            age_threshold: days(30),
            base_probability: Fixed64::from_num(0.001),
            per_day_probability: Fixed64::from_num(0.0002),
            max_probability: Fixed64::from_num(0.05),
        }
    }
}

impl LeakConfig {
    /// Chance that a sound pipe of `class` and `age` starts leaking on one check.
    pub fn leak_probability(&self, age: GameMinutes, class: PipeClass) -> Fixed64 {
        if age < self.age_threshold {
            return Fixed64::ZERO;
        }
        let days_past = (age - self.age_threshold) / MINUTES_PER_DAY;
        let days_past = i64::try_from(days_past).unwrap_or(i64::MAX);
        let scaled = self
            .base_probability
            .saturating_add(self.per_day_probability.saturating_mul_int(days_past))
            .min(self.max_probability);
        clamp_unit(scaled.saturating_mul(class.leak_multiplier()))
    }
}

impl PipeClass {
    /// Relative leak susceptibility. PVC is the reference material.
    pub fn leak_multiplier(&self) -> Fixed64 {
        match self {
            PipeClass::Pvc => Fixed64::ONE,
            PipeClass::Hdpe => Fixed64::from_num(0.5),
            PipeClass::DuctileIron => Fixed64::from_num(0.75),
        }
    }
}

/// Result of repairing an existing pipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepairOutcome {
    /// The pipe was leaking and is now sound.
    Repaired,
    /// The pipe was already sound; nothing changed.
    NotLeaking,
}

impl PipeNetwork {
    /// Roll for new leaks at `now`.
    ///
    /// Every sound pipe old enough to be eligible draws once from `rng`, in
    /// coordinate order. A call whose `now` is not later than the previous
    /// rolling call does nothing and consumes no randomness, so a tick that
    /// was already checked can be replayed without re-rolling it.
    pub fn check_for_leaks(
        &mut self,
        now: GameMinutes,
        rng: &mut SimRng,
        config: &LeakConfig,
    ) -> Vec<NetworkEvent> {
        if self.last_leak_check.is_some_and(|last| now <= last) {
            tracing::trace!(now, "leak check skipped, timestamp already rolled");
            return Vec::new();
        }

        let mut events = Vec::new();
        for pipe in self.pipes_mut() {
            if pipe.is_leaking() {
                continue;
            }
            let probability = config.leak_probability(pipe.age(now), pipe.class());
            if probability == Fixed64::ZERO {
                continue;
            }
            if rng.chance(probability) {
                pipe.set_leaking(true);
                events.push(NetworkEvent::LeakFormed {
                    position: pipe.position(),
                    at: now,
                });
            }
        }
        self.last_leak_check = Some(now);

        tracing::debug!(now, new_leaks = events.len(), "leak check");
        events
    }

    /// Clear the leak flag of the pipe at `position`.
    ///
    /// Returns `None` if there is no pipe there.
    pub fn repair_leak(&mut self, position: GridPosition) -> Option<RepairOutcome> {
        let pipe = self.pipe_at_mut(position)?;
        if !pipe.is_leaking() {
            return Some(RepairOutcome::NotLeaking);
        }
        pipe.set_leaking(false);
        tracing::debug!(x = position.x, y = position.y, "leak repaired");
        Some(RepairOutcome::Repaired)
    }
}
