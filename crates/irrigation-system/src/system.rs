//! The irrigation aggregate and its operations.
//!
//! Every operation takes `&self` and returns a fresh aggregate (or `None`
//! when the target does not exist). The input is never modified, which makes
//! the aggregate safe to snapshot for saves and to replay in tests. Copying
//! costs O(pipes + heads) per edit, which is fine for course-sized networks.

use irrigation_core::fixed::{Fixed64, GameMinutes};
use irrigation_core::grid::GridPosition;
use irrigation_core::id::SprinklerId;
use irrigation_core::rng::SimRng;
use irrigation_coverage::{SprinklerClass, coverage_pattern};
use irrigation_network::{NetworkEvent, Pipe, PipeClass, PipeNetwork};
use serde::{Deserialize, Serialize};

use crate::config::IrrigationConfig;
use crate::head::{SprinklerHead, SprinklerSchedule};
use crate::source::{WaterSource, WaterSourceClass};
use crate::usage::{self, WaterUsage};

/// Counts for overlays and HUDs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NetworkStats {
    pub pipes: usize,
    pub heads: usize,
    pub active_heads: usize,
    pub sources: usize,
    pub leaking_pipes: usize,
    pub unpressurized_pipes: usize,
}

/// Aggregate root: pipes, sprinkler heads and water sources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrrigationSystem {
    network: PipeNetwork,
    /// Ordered by id. Several heads may share a coordinate.
    heads: Vec<SprinklerHead>,
    /// Append-only, in placement order.
    sources: Vec<WaterSource>,
    next_head_id: u32,
    /// Set by topology edits, cleared by a pressure update.
    pressures_stale: bool,
    config: IrrigationConfig,
}

impl IrrigationSystem {
    /// An empty system with default tunables.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty system with the given tunables.
    pub fn with_config(config: IrrigationConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &IrrigationConfig {
        &self.config
    }

    pub fn network(&self) -> &PipeNetwork {
        &self.network
    }

    pub fn heads(&self) -> &[SprinklerHead] {
        &self.heads
    }

    pub fn sources(&self) -> &[WaterSource] {
        &self.sources
    }

    /// Whether a topology change happened since the last pressure update.
    pub fn needs_pressure_update(&self) -> bool {
        self.pressures_stale
    }

    /// The id the next added head will get.
    pub fn next_head_id(&self) -> SprinklerId {
        SprinklerId(self.next_head_id)
    }

    // -- Pipes --

    /// Lay a pipe at `position`, connected to its orthogonal neighbors.
    ///
    /// A coordinate already holding a pipe keeps its existing pipe and the
    /// returned aggregate equals the input.
    pub fn add_pipe(&self, position: GridPosition, class: PipeClass, now: GameMinutes) -> Self {
        let mut next = self.clone();
        if next.network.add_pipe(position, class, now) {
            next.pressures_stale = true;
        }
        next
    }

    /// Remove the pipe at `position`, detaching it from its neighbors.
    /// `None` if there is no pipe there.
    pub fn remove_pipe(&self, position: GridPosition) -> Option<Self> {
        if !self.network.contains(position) {
            tracing::debug!(x = position.x, y = position.y, "remove pipe: not found");
            return None;
        }
        let mut next = self.clone();
        next.network.remove_pipe(position);
        next.pressures_stale = true;
        Some(next)
    }

    /// The pipe at `position`, if any.
    pub fn pipe_at(&self, position: GridPosition) -> Option<&Pipe> {
        self.network.pipe_at(position)
    }

    // -- Pressure --

    /// Recompute every pipe's pressure from the water sources and refresh
    /// every head's coverage from its pipe's new pressure.
    pub fn update_pipe_pressures(&self) -> Self {
        self.update_pipe_pressures_with_events().0
    }

    /// Like [`update_pipe_pressures`](Self::update_pipe_pressures), also
    /// returning the pipes whose pressurized state flipped.
    pub fn update_pipe_pressures_with_events(&self) -> (Self, Vec<NetworkEvent>) {
        let mut next = self.clone();
        let sources: Vec<GridPosition> = next.sources.iter().map(|s| s.position).collect();
        let events = next.network.update_pressures(sources, &next.config.pressure);
        next.refresh_coverage();
        next.pressures_stale = false;
        (next, events)
    }

    fn refresh_coverage(&mut self) {
        let network = &self.network;
        for head in &mut self.heads {
            let pressure = pressure_under(network, head.position);
            head.coverage = coverage_pattern(head.position, head.class, pressure);
        }
    }

    /// Pressure available to `head`: that of the pipe it sits on, or 0.
    pub fn head_pressure(&self, head: &SprinklerHead) -> Fixed64 {
        pressure_under(&self.network, head.position)
    }

    // -- Leaks --

    /// Roll for new leaks at `now` using `rng`.
    ///
    /// A timestamp that is not later than the previous rolling check is a
    /// no-op, so re-running a tick never re-rolls it.
    pub fn check_for_leaks(&self, now: GameMinutes, rng: &mut SimRng) -> (Self, Vec<NetworkEvent>) {
        let mut next = self.clone();
        let events = next.network.check_for_leaks(now, rng, &next.config.leak);
        (next, events)
    }

    /// Clear the leak flag of the pipe at `position`. `None` if there is no
    /// pipe there. Repairing a sound pipe returns an equal aggregate.
    pub fn repair_leak(&self, position: GridPosition) -> Option<Self> {
        let mut next = self.clone();
        next.network.repair_leak(position)?;
        Some(next)
    }

    /// Coordinates of all leaking pipes.
    pub fn leaking_pipes(&self) -> Vec<GridPosition> {
        self.network.leaking_positions()
    }

    // -- Sprinkler heads --

    /// Install a head at `position`. It starts active with an always-on
    /// schedule, and its coverage reflects the pipe pressure currently
    /// stored under it.
    pub fn add_sprinkler(
        &self,
        position: GridPosition,
        class: SprinklerClass,
        now: GameMinutes,
    ) -> (Self, SprinklerId) {
        let mut next = self.clone();
        let id = SprinklerId(next.next_head_id);
        next.next_head_id = next.next_head_id.wrapping_add(1);

        if next.heads.iter().any(|h| h.position == position) {
            tracing::warn!(x = position.x, y = position.y, %id, "multiple heads on one tile");
        }

        let pressure = pressure_under(&next.network, position);
        next.heads.push(SprinklerHead {
            id,
            position,
            class,
            installed_at: now,
            active: true,
            coverage: coverage_pattern(position, class, pressure),
            schedule: SprinklerSchedule::default(),
        });
        tracing::debug!(x = position.x, y = position.y, %id, ?class, "sprinkler added");
        (next, id)
    }

    /// Remove a head. `None` if no head has that id.
    pub fn remove_sprinkler(&self, id: SprinklerId) -> Option<Self> {
        let idx = self.head_index(id)?;
        let mut next = self.clone();
        next.heads.remove(idx);
        tracing::debug!(%id, "sprinkler removed");
        Some(next)
    }

    /// The head with `id`, if any.
    pub fn sprinkler(&self, id: SprinklerId) -> Option<&SprinklerHead> {
        self.head_index(id).map(|idx| &self.heads[idx])
    }

    /// Toggle a head's activation flag. Pressure and coverage are untouched.
    pub fn set_sprinkler_active(&self, id: SprinklerId, active: bool) -> Option<Self> {
        let idx = self.head_index(id)?;
        let mut next = self.clone();
        next.heads[idx].active = active;
        Some(next)
    }

    /// Replace a head's schedule.
    pub fn set_sprinkler_schedule(&self, id: SprinklerId, schedule: SprinklerSchedule) -> Option<Self> {
        let idx = self.head_index(id)?;
        let mut next = self.clone();
        next.heads[idx].schedule = schedule;
        Some(next)
    }

    /// Heads that are active, regardless of schedule.
    pub fn active_heads(&self) -> impl Iterator<Item = &SprinklerHead> {
        self.heads.iter().filter(|h| h.active)
    }

    /// Heads that are active and allowed by their schedule at `now`.
    pub fn heads_running_at(&self, now: GameMinutes) -> Vec<&SprinklerHead> {
        self.heads.iter().filter(|h| h.runs_at(now)).collect()
    }

    /// A copy whose id counter restarts just past the highest live id, or at
    /// 0 when there are no heads. Lets a test or replay start from a known
    /// counter without risking duplicate ids.
    pub fn reset_id_counter(&self) -> Self {
        let mut next = self.clone();
        next.next_head_id = self
            .heads
            .iter()
            .map(|h| h.id.0.wrapping_add(1))
            .max()
            .unwrap_or(0);
        next
    }

    fn head_index(&self, id: SprinklerId) -> Option<usize> {
        self.heads.iter().position(|h| h.id == id)
    }

    // -- Water sources --

    /// Append a source. Pressures are not recomputed; the aggregate is
    /// marked as needing a pressure update.
    pub fn add_water_source(&self, class: WaterSourceClass, position: GridPosition) -> Self {
        let mut next = self.clone();
        next.sources.push(WaterSource::new(class, position));
        next.pressures_stale = true;
        if !next.network.contains(position) {
            tracing::warn!(x = position.x, y = position.y, "source placed without a pipe on it");
        }
        next
    }

    // -- Usage and cost --

    /// Water used by `heads` over `delta_minutes`.
    pub fn calculate_water_usage<'a>(
        &self,
        heads: impl IntoIterator<Item = &'a SprinklerHead>,
        delta_minutes: GameMinutes,
    ) -> WaterUsage {
        usage::calculate_water_usage(heads, delta_minutes, self)
    }

    /// Price of `volume` drawn from `source` at this system's rates.
    pub fn calculate_water_cost(&self, volume: Fixed64, source: &WaterSource) -> Fixed64 {
        usage::water_cost_with(volume, source, &self.config.usage.cost)
    }

    // -- Stats --

    pub fn stats(&self) -> NetworkStats {
        NetworkStats {
            pipes: self.network.len(),
            heads: self.heads.len(),
            active_heads: self.active_heads().count(),
            sources: self.sources.len(),
            leaking_pipes: self.network.pipes().filter(|p| p.is_leaking()).count(),
            unpressurized_pipes: self.network.pipes().filter(|p| !p.is_pressurized()).count(),
        }
    }
}

fn pressure_under(network: &PipeNetwork, position: GridPosition) -> Fixed64 {
    network
        .pipe_at(position)
        .map(|p| p.pressure())
        .unwrap_or(Fixed64::ZERO)
}
