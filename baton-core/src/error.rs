//! Error types for BATON operations

use crate::enums::Outcome;
use crate::identity::EntryId;
use std::path::PathBuf;
use thiserror::Error;

/// Validation errors.
///
/// Raised before any state change; a failed validation never produces a
/// partial record, so callers can always retry the same request.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("Required field missing: {field}")]
    RequiredFieldMissing { field: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Value for {field} out of range: {value} (expected {min} to {max})")]
    OutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// Audit-log storage errors, surfaced verbatim to the caller. The store never
/// retries internally; retry policy belongs to the Conductor/tooling layer.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StorageError {
    #[error("Reasoning entry not found: {id}")]
    EntryNotFound { id: EntryId },

    #[error("Entry {id} outcome already closed as '{existing}', cannot set '{requested}'")]
    OutcomeConflict {
        id: EntryId,
        existing: Outcome,
        requested: Outcome,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Storage backend failure: {reason}")]
    Backend { reason: String },
}

/// A manifest that could not be turned into artifacts.
///
/// These are warnings, not failures: synthesis logs them and continues with
/// the remaining manifests.
#[derive(Debug, Error)]
pub enum ManifestReadError {
    #[error("Failed to read manifest {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Timed out reading manifest {path} after {timeout_ms}ms")]
    Timeout { path: PathBuf, timeout_ms: u64 },

    #[error("Malformed manifest {path}: {reason}")]
    Malformed { path: PathBuf, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_storage_error_messages() {
        let id = EntryId::new(Uuid::nil());
        let err = StorageError::EntryNotFound { id };
        assert!(err.to_string().contains(&Uuid::nil().to_string()));

        let err = StorageError::OutcomeConflict {
            id,
            existing: Outcome::Success,
            requested: Outcome::Failure,
        };
        assert!(err.to_string().contains("success"));
        assert!(err.to_string().contains("failure"));
    }

    #[test]
    fn test_validation_error_wraps_into_storage_error() {
        let err: StorageError = ValidationError::RequiredFieldMissing {
            field: "reasoning".to_string(),
        }
        .into();
        assert!(matches!(err, StorageError::Validation(_)));
    }
}
