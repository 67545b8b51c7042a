//! BATON Core - Entity Types
//!
//! Pure data structures shared by every other BATON crate: typed identifiers,
//! audit-log entries, synthesis artifacts, merge results, and the error
//! taxonomy. This crate contains no I/O and no async code - storage and the
//! synthesis pipeline live in `baton-storage` and `baton-synthesis`.

mod entities;
mod enums;
mod error;
mod identity;
mod telemetry;

pub use entities::{
    Artifact, Conflict, DelegationStats, ManifestOutput, MergeResult, NewEntry, ReasoningEntry,
    ResolvedConflict, SkippedConflict, SynthesisReport, WorkOrderManifest,
};
pub use enums::{
    ArtifactState, MergeStrategy, MergeStrategyParseError, Outcome, OutcomeParseError,
};
pub use error::{ManifestReadError, StorageError, ValidationError};
pub use identity::{new_entry_uuid, EntryId, MissionId, Timestamp, WorkOrderId};
pub use telemetry::{NoopTelemetry, TelemetryHook};

/// Result type for validation-guarded constructors.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
