use serde::{Deserialize, Serialize};

/// Identifies a sprinkler head. Allocated from a counter owned by the
/// irrigation system aggregate, never from process-wide state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SprinklerId(pub u32);

impl SprinklerId {
    /// The id that follows this one.
    pub fn next(self) -> SprinklerId {
        SprinklerId(self.0.wrapping_add(1))
    }
}

impl std::fmt::Display for SprinklerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "head#{}", self.0)
    }
}
