//! Versioned binary snapshots of the irrigation aggregate.
//!
//! The persistence layer embeds these bytes in the save document. A snapshot
//! is a [`SnapshotHeader`] followed by the aggregate, encoded with `bitcode`.
//! Identical aggregates always encode to identical bytes: every collection
//! inside the aggregate has a stable order.

use serde::{Deserialize, Serialize};

use crate::system::IrrigationSystem;

/// Magic number identifying an irrigation snapshot.
pub const SNAPSHOT_MAGIC: u32 = 0x1AA1_0001;

/// Current format version. Increment when breaking the wire format.
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, thiserror::Error)]
pub enum SerializeError {
    #[error("bitcode encoding failed: {0}")]
    Encode(String),
}

#[derive(Debug, thiserror::Error)]
pub enum DeserializeError {
    #[error("invalid magic number: expected 0x{:08X}, got 0x{:08X}", SNAPSHOT_MAGIC, .0)]
    InvalidMagic(u32),
    #[error("unsupported format version: expected {}, got {}", FORMAT_VERSION, .0)]
    UnsupportedVersion(u32),
    #[error("snapshot from future version {0} (this build supports up to {FORMAT_VERSION})")]
    FutureVersion(u32),
    #[error("bitcode decoding failed: {0}")]
    Decode(String),
}

/// Header prepended to every snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotHeader {
    pub magic: u32,
    pub version: u32,
}

impl Default for SnapshotHeader {
    fn default() -> Self {
        Self {
            magic: SNAPSHOT_MAGIC,
            version: FORMAT_VERSION,
        }
    }
}

impl SnapshotHeader {
    pub fn validate(&self) -> Result<(), DeserializeError> {
        if self.magic != SNAPSHOT_MAGIC {
            return Err(DeserializeError::InvalidMagic(self.magic));
        }
        if self.version > FORMAT_VERSION {
            return Err(DeserializeError::FutureVersion(self.version));
        }
        if self.version < FORMAT_VERSION {
            return Err(DeserializeError::UnsupportedVersion(self.version));
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    header: SnapshotHeader,
    system: &'a IrrigationSystem,
}

#[derive(Deserialize)]
struct Snapshot {
    header: SnapshotHeader,
    system: IrrigationSystem,
}

impl IrrigationSystem {
    /// Encode the aggregate as a versioned snapshot.
    pub fn serialize(&self) -> Result<Vec<u8>, SerializeError> {
        let snapshot = SnapshotRef {
            header: SnapshotHeader::default(),
            system: self,
        };
        let bytes =
            bitcode::serialize(&snapshot).map_err(|e| SerializeError::Encode(e.to_string()))?;
        tracing::debug!(bytes = bytes.len(), "irrigation snapshot written");
        Ok(bytes)
    }

    /// Decode a snapshot produced by [`serialize`](Self::serialize).
    pub fn deserialize(data: &[u8]) -> Result<Self, DeserializeError> {
        let snapshot: Snapshot =
            bitcode::deserialize(data).map_err(|e| DeserializeError::Decode(e.to_string()))?;
        snapshot.header.validate()?;
        Ok(snapshot.system)
    }
}
