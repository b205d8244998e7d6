use irrigation_core::fixed::{Fixed64, GameMinutes};
use irrigation_core::grid::GridPosition;

/// Events emitted by the pipe network. Like the rest of the simulation they
/// fire on transitions only, never every tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkEvent {
    /// A pipe started leaking during a leak check.
    LeakFormed {
        position: GridPosition,
        at: GameMinutes,
    },
    /// A pipe that had pressure lost its last path to a source.
    PressureLost { position: GridPosition },
    /// A dry pipe gained a path to a source.
    PressureRestored {
        position: GridPosition,
        pressure: Fixed64,
    },
}

impl NetworkEvent {
    /// The coordinate of the pipe this event is about.
    pub fn position(&self) -> GridPosition {
        match self {
            NetworkEvent::LeakFormed { position, .. }
            | NetworkEvent::PressureLost { position }
            | NetworkEvent::PressureRestored { position, .. } => *position,
        }
    }
}
