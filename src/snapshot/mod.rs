//! Wholesale engine persistence.
//!
//! A snapshot captures the full engine state - agent identity, current
//! metrics, evolution history, and the engine's action log - as one
//! structured record, written on demand and replaced wholesale. The host
//! owns file I/O; this module only produces and consumes the serialized
//! bytes.

use crate::core::{CapabilityState, EvolutionHistory};
use crate::engine::{ActionRecord, TransitionEngine};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::SnapshotError;

/// Version identifier for the snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serializable snapshot of a `TransitionEngine`.
///
/// Does NOT include the guard's decision log; that log is owned by the
/// guard and serialized separately by hosts that want a full audit trail.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    /// Snapshot format version
    pub version: u32,

    /// Unique snapshot identifier
    pub id: Uuid,

    /// When the snapshot was taken
    pub taken_at: DateTime<Utc>,

    /// Agent the engine governs
    pub agent_id: String,

    /// When the engine was created
    pub created_at: DateTime<Utc>,

    /// Current committed metrics
    pub current: CapabilityState,

    /// Complete evolution history
    pub history: EvolutionHistory,

    /// Engine action log (applied/rejected improvements)
    pub actions: Vec<ActionRecord>,
}

impl EngineSnapshot {
    /// Capture a snapshot of the engine's current state.
    pub fn capture(engine: &TransitionEngine) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            id: Uuid::new_v4(),
            taken_at: Utc::now(),
            agent_id: engine.agent_id().to_string(),
            created_at: engine.created_at(),
            current: engine.assess_current().clone(),
            history: engine.history().clone(),
            actions: engine.actions().to_vec(),
        }
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    /// Restore from JSON, validating version and consistency.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Serialize to a compact binary representation.
    pub fn to_binary(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    /// Restore from binary, validating version and consistency.
    pub fn from_binary(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let snapshot: Self = bincode::deserialize(bytes)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    fn validate(&self) -> Result<(), SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }
        match self.history.latest() {
            None => Err(SnapshotError::ValidationFailed(
                "evolution history is empty".to_string(),
            )),
            Some(latest) if *latest != self.current => Err(SnapshotError::ValidationFailed(
                "current state does not match the last history entry".to_string(),
            )),
            Some(_) => Ok(()),
        }
    }
}
