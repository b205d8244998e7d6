use irrigation_core::fixed::{Fixed64, GameMinutes, clamp_pressure};
use irrigation_core::grid::GridPosition;
use serde::{Deserialize, Serialize};

/// Pipe material. Affects how quickly an aged pipe starts leaking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum PipeClass {
    #[default]
    Pvc,
    Hdpe,
    DuctileIron,
}

impl PipeClass {
    pub fn all() -> [PipeClass; 3] {
        [PipeClass::Pvc, PipeClass::Hdpe, PipeClass::DuctileIron]
    }
}

/// A single grid-cell segment of the distribution network.
///
/// Only [`PipeNetwork`](crate::PipeNetwork) creates pipes, so the adjacency
/// list, pressure and leak flag can only change through network operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pipe {
    position: GridPosition,
    class: PipeClass,
    installed_at: GameMinutes,
    /// Orthogonally adjacent pipes, kept sorted.
    connections: Vec<GridPosition>,
    /// Derived pressure in `[0, 100]`.
    pressure: Fixed64,
    leaking: bool,
}

impl Pipe {
    pub(crate) fn new(position: GridPosition, class: PipeClass, installed_at: GameMinutes) -> Self {
        Self {
            position,
            class,
            installed_at,
            connections: Vec::new(),
            pressure: Fixed64::ZERO,
            leaking: false,
        }
    }

    pub fn position(&self) -> GridPosition {
        self.position
    }

    pub fn class(&self) -> PipeClass {
        self.class
    }

    pub fn installed_at(&self) -> GameMinutes {
        self.installed_at
    }

    /// Age at `now`. A pipe "installed in the future" has age 0.
    pub fn age(&self, now: GameMinutes) -> GameMinutes {
        now.saturating_sub(self.installed_at)
    }

    pub fn connections(&self) -> &[GridPosition] {
        &self.connections
    }

    pub fn is_connected_to(&self, other: GridPosition) -> bool {
        self.connections.binary_search(&other).is_ok()
    }

    pub fn pressure(&self) -> Fixed64 {
        self.pressure
    }

    pub fn is_pressurized(&self) -> bool {
        self.pressure > Fixed64::ZERO
    }

    pub fn is_leaking(&self) -> bool {
        self.leaking
    }

    pub(crate) fn connect(&mut self, other: GridPosition) {
        if let Err(idx) = self.connections.binary_search(&other) {
            self.connections.insert(idx, other);
        }
    }

    pub(crate) fn disconnect(&mut self, other: GridPosition) {
        if let Ok(idx) = self.connections.binary_search(&other) {
            self.connections.remove(idx);
        }
    }

    pub(crate) fn set_pressure(&mut self, pressure: Fixed64) {
        self.pressure = clamp_pressure(pressure);
    }

    pub(crate) fn set_leaking(&mut self, leaking: bool) {
        self.leaking = leaking;
    }
}
