//! Snapshot error types.

use thiserror::Error;

/// Errors that can occur while capturing or restoring snapshots
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Serialization to JSON or binary format failed
    #[error("serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON or binary format failed
    #[error("deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Snapshot format version is not supported by this build
    #[error("unsupported snapshot version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Snapshot contents failed consistency validation
    #[error("snapshot validation failed: {0}")]
    ValidationFailed(String),
}
