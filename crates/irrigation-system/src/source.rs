use irrigation_core::grid::GridPosition;
use serde::{Deserialize, Serialize};

/// Where the water comes from. Decides the price per unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WaterSourceClass {
    /// City hookup; the most expensive water.
    Municipal,
    /// On-course well; pays for pumping only.
    Well,
    /// Pond or reservoir; cheapest.
    Reservoir,
}

impl WaterSourceClass {
    pub fn all() -> [WaterSourceClass; 3] {
        [
            WaterSourceClass::Municipal,
            WaterSourceClass::Well,
            WaterSourceClass::Reservoir,
        ]
    }
}

/// A fixed-location, unlimited origin of pressure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaterSource {
    pub class: WaterSourceClass,
    pub position: GridPosition,
}

impl WaterSource {
    pub fn new(class: WaterSourceClass, position: GridPosition) -> Self {
        Self { class, position }
    }
}
