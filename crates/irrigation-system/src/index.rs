//! Coordinate lookups across pipes, heads and sources.
//!
//! Pure reads over the aggregate, used by placement UIs and renderers.

use irrigation_core::grid::GridPosition;
use irrigation_network::Pipe;

use crate::head::SprinklerHead;
use crate::source::WaterSource;
use crate::system::IrrigationSystem;

/// Everything installed on one tile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TileContents<'a> {
    pub pipe: Option<&'a Pipe>,
    pub heads: Vec<&'a SprinklerHead>,
    pub sources: Vec<&'a WaterSource>,
}

impl TileContents<'_> {
    pub fn is_empty(&self) -> bool {
        self.pipe.is_none() && self.heads.is_empty() && self.sources.is_empty()
    }
}

impl IrrigationSystem {
    /// Heads installed at `position`, in id order.
    pub fn heads_at(&self, position: GridPosition) -> Vec<&SprinklerHead> {
        self.heads().iter().filter(|h| h.position == position).collect()
    }

    /// Sources placed at `position`, in placement order.
    pub fn sources_at(&self, position: GridPosition) -> Vec<&WaterSource> {
        self.sources()
            .iter()
            .filter(|s| s.position == position)
            .collect()
    }

    /// Everything on the tile at `position`.
    pub fn tile(&self, position: GridPosition) -> TileContents<'_> {
        TileContents {
            pipe: self.pipe_at(position),
            heads: self.heads_at(position),
            sources: self.sources_at(position),
        }
    }

    /// Whether anything is installed at `position`.
    pub fn is_occupied(&self, position: GridPosition) -> bool {
        !self.tile(position).is_empty()
    }
}
