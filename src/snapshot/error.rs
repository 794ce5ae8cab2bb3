//! Snapshot error types.

use thiserror::Error;

/// Errors that can occur while encoding, decoding, or applying snapshots.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Serialization to JSON or binary format failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON or binary format failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Snapshot version is not supported by this version of the crate
    #[error("Unsupported snapshot version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// The snapshot references a state the target machine does not have
    #[error("Snapshot {role} handle references unregistered state '{identifier}'")]
    UnresolvedHandle {
        role: &'static str,
        identifier: String,
    },
}
