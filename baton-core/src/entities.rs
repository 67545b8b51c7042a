//! Core entity structures

use crate::{
    ArtifactState, EntryId, MergeStrategy, MissionId, Outcome, Timestamp, ValidationError,
    ValidationResult, WorkOrderId,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

// ============================================================================
// REASONING AUDIT LOG ENTITIES
// ============================================================================

/// One delegation decision recorded by the Conductor.
///
/// Immutable after creation except for the single outcome write
/// (`Pending` -> closed, exactly once).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ReasoningEntry {
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "uuid"))]
    pub entry_id: EntryId,
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub work_order_id: WorkOrderId,
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub mission_id: MissionId,
    /// Identifier of the delegating actor
    pub conductor_agent: String,
    /// Identifier/type of the agent delegated to
    pub delegation_target: String,
    /// Free-text rationale written at delegation time
    pub reasoning: String,
    /// Snapshot of the context handed to the sub-agent
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub context_injected: serde_json::Value,
    /// Expected-success estimate in [0, 1], set at creation
    pub confidence_score: f64,
    pub outcome: Outcome,
    pub outcome_notes: Option<String>,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub created_at: Timestamp,
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>, format = "date-time"))]
    pub outcome_at: Option<Timestamp>,
}

impl ReasoningEntry {
    /// Mint a new pending entry from validated creation input.
    pub fn from_new(new: NewEntry) -> Self {
        Self {
            entry_id: EntryId::now_v7(),
            work_order_id: new.work_order_id,
            mission_id: new.mission_id,
            conductor_agent: new.conductor_agent,
            delegation_target: new.delegation_target,
            reasoning: new.reasoning,
            context_injected: new.context_injected.unwrap_or(serde_json::Value::Null),
            confidence_score: new.confidence_score,
            outcome: Outcome::Pending,
            outcome_notes: None,
            created_at: Utc::now(),
            outcome_at: None,
        }
    }

    /// Close the entry with its eventual outcome. The caller is responsible
    /// for enforcing the exactly-once transition; this just stamps the fields.
    pub fn close(&mut self, outcome: Outcome, notes: Option<String>) {
        self.outcome = outcome;
        self.outcome_notes = notes;
        self.outcome_at = Some(Utc::now());
    }

    /// Whether the eventual outcome has been recorded.
    pub fn is_closed(&self) -> bool {
        self.outcome.is_closed()
    }
}

/// Creation input for a reasoning entry, validated before any write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NewEntry {
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub work_order_id: WorkOrderId,
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub mission_id: MissionId,
    pub conductor_agent: String,
    pub delegation_target: String,
    pub reasoning: String,
    #[cfg_attr(feature = "openapi", schema(value_type = Option<Object>))]
    pub context_injected: Option<serde_json::Value>,
    pub confidence_score: f64,
}

impl NewEntry {
    /// Check required fields and the confidence range.
    ///
    /// Runs before the store is touched so a rejected request leaves no
    /// partial record behind.
    pub fn validate(&self) -> ValidationResult<()> {
        for (field, value) in [
            ("work_order_id", self.work_order_id.as_str()),
            ("mission_id", self.mission_id.as_str()),
            ("conductor_agent", self.conductor_agent.as_str()),
            ("delegation_target", self.delegation_target.as_str()),
            ("reasoning", self.reasoning.as_str()),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::RequiredFieldMissing {
                    field: field.to_string(),
                });
            }
        }

        if !self.confidence_score.is_finite()
            || self.confidence_score < 0.0
            || self.confidence_score > 1.0
        {
            return Err(ValidationError::OutOfRange {
                field: "confidence_score".to_string(),
                value: self.confidence_score,
                min: 0.0,
                max: 1.0,
            });
        }

        Ok(())
    }
}

/// Aggregate delegation statistics for one (conductor, target) pair.
///
/// Used by the Conductor to calibrate future delegation decisions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DelegationStats {
    pub conductor_agent: String,
    pub delegation_target: String,
    /// All entries, pending included
    pub total: u64,
    pub pending: u64,
    pub success: u64,
    pub failure: u64,
    pub partial: u64,
    /// `success / (success + failure + partial)` among closed entries.
    /// `None` when no entry has closed yet - "untested" is not "always fails".
    pub success_rate: Option<f64>,
    /// Mean confidence score across all entries for the pair
    pub mean_confidence: f64,
}

impl DelegationStats {
    pub fn closed(&self) -> u64 {
        self.success + self.failure + self.partial
    }
}

// ============================================================================
// SYNTHESIS ENTITIES
// ============================================================================

/// One file-level output declared by a completed work order.
///
/// Identified by `(path, source_work_order_id)` within a synthesis run, not
/// by content; byte-level merging is out of scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Artifact {
    /// Logical target location, not filesystem-specific
    pub path: String,
    /// Human-readable summary of the change
    pub description: String,
    pub state: ArtifactState,
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub source_work_order_id: WorkOrderId,
    /// When the work order reported this output. Display only - conflict
    /// ordering is positional, never temporal.
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub timestamp: Timestamp,
}

impl Artifact {
    pub fn new(
        path: impl Into<String>,
        description: impl Into<String>,
        source_work_order_id: WorkOrderId,
    ) -> Self {
        Self {
            path: path.into(),
            description: description.into(),
            state: ArtifactState::Proposed,
            source_work_order_id,
            timestamp: Utc::now(),
        }
    }

    pub fn with_timestamp(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_state(mut self, state: ArtifactState) -> Self {
        self.state = state;
        self
    }
}

/// A path claimed by two or more work orders.
///
/// Contenders are kept in the order they were supplied. Input order is the
/// deterministic tie-break; wall-clock timestamps from independently
/// sandboxed executions are not trustworthy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Conflict {
    pub path: String,
    pub contenders: Vec<Artifact>,
}

impl Conflict {
    pub fn new(path: impl Into<String>, contenders: Vec<Artifact>) -> Self {
        Self {
            path: path.into(),
            contenders,
        }
    }

    /// Work orders contending for this path, in input order.
    pub fn contending_work_orders(&self) -> Vec<&WorkOrderId> {
        self.contenders
            .iter()
            .map(|a| &a.source_work_order_id)
            .collect()
    }
}

/// A conflict settled automatically, with the losing contenders retained for
/// traceability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ResolvedConflict {
    pub path: String,
    pub winner: Artifact,
    pub discarded: Vec<Artifact>,
}

/// A conflict excluded from the merged set.
///
/// `requires_manual` distinguishes an ordinary skip from an explicit
/// action item surfaced to a human reviewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SkippedConflict {
    pub path: String,
    pub contenders: Vec<Artifact>,
    pub requires_manual: bool,
}

/// Output of one synthesis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MergeResult {
    pub strategy: MergeStrategy,
    /// Artifacts accepted into the final change set
    pub merged: Vec<Artifact>,
    /// Conflicts settled automatically
    pub resolved_conflicts: Vec<ResolvedConflict>,
    /// Conflicts excluded from the merged set
    pub skipped_conflicts: Vec<SkippedConflict>,
}

impl MergeResult {
    /// An empty result for the given strategy. Empty input is a normal
    /// state, not an error.
    pub fn empty(strategy: MergeStrategy) -> Self {
        Self {
            strategy,
            merged: Vec::new(),
            resolved_conflicts: Vec::new(),
            skipped_conflicts: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.merged.is_empty()
            && self.resolved_conflicts.is_empty()
            && self.skipped_conflicts.is_empty()
    }

    /// Conflicts flagged as needing a human decision.
    pub fn manual_attention(&self) -> impl Iterator<Item = &SkippedConflict> {
        self.skipped_conflicts
            .iter()
            .filter(|c| c.requires_manual)
    }
}

/// Machine-readable counterpart of the PR body, suitable for storage or
/// forwarding to telemetry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SynthesisReport {
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub mission_id: MissionId,
    pub strategy: MergeStrategy,
    pub merged_count: usize,
    pub resolved_count: usize,
    pub skipped_count: usize,
    pub merged: Vec<Artifact>,
    pub resolved_conflicts: Vec<ResolvedConflict>,
    pub skipped_conflicts: Vec<SkippedConflict>,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub generated_at: Timestamp,
}

// ============================================================================
// WORK ORDER MANIFEST (consumed format, owned by the lifecycle engine)
// ============================================================================

/// Declarative description of what a completed work order produced.
///
/// One JSON file per work order. A manifest with zero outputs is valid -
/// some work orders legitimately produce no artifacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkOrderManifest {
    pub work_order_id: WorkOrderId,
    #[serde(default)]
    pub outputs: Vec<ManifestOutput>,
}

/// One declared output inside a work-order manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestOutput {
    pub path: String,
    pub description: String,
    /// Optional report time from the sandbox; display only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reported_at: Option<Timestamp>,
}

impl WorkOrderManifest {
    /// Map each declared output to a proposed artifact.
    pub fn into_artifacts(self, loaded_at: Timestamp) -> Vec<Artifact> {
        let work_order_id = self.work_order_id;
        self.outputs
            .into_iter()
            .map(|output| {
                Artifact::new(output.path, output.description, work_order_id.clone())
                    .with_timestamp(output.reported_at.unwrap_or(loaded_at))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_new_entry() -> NewEntry {
        NewEntry {
            work_order_id: WorkOrderId::new("wo-1"),
            mission_id: MissionId::new("m-1"),
            conductor_agent: "conductor".to_string(),
            delegation_target: "rust-specialist".to_string(),
            reasoning: "The task needs systems expertise".to_string(),
            context_injected: Some(serde_json::json!({"files": ["src/lib.rs"]})),
            confidence_score: 0.8,
        }
    }

    #[test]
    fn test_new_entry_validates() {
        assert!(valid_new_entry().validate().is_ok());
    }

    #[test]
    fn test_new_entry_rejects_blank_fields() {
        let mut entry = valid_new_entry();
        entry.reasoning = "   ".to_string();
        assert_eq!(
            entry.validate(),
            Err(ValidationError::RequiredFieldMissing {
                field: "reasoning".to_string()
            })
        );
    }

    #[test]
    fn test_new_entry_rejects_out_of_range_confidence() {
        let mut entry = valid_new_entry();
        entry.confidence_score = 1.4;
        assert!(matches!(
            entry.validate(),
            Err(ValidationError::OutOfRange { .. })
        ));

        entry.confidence_score = f64::NAN;
        assert!(entry.validate().is_err());
    }

    #[test]
    fn test_from_new_starts_pending() {
        let entry = ReasoningEntry::from_new(valid_new_entry());
        assert_eq!(entry.outcome, Outcome::Pending);
        assert!(entry.outcome_at.is_none());
        assert!(entry.outcome_notes.is_none());
    }

    #[test]
    fn test_close_stamps_outcome() {
        let mut entry = ReasoningEntry::from_new(valid_new_entry());
        entry.close(Outcome::Success, Some("done".to_string()));
        assert!(entry.is_closed());
        assert_eq!(entry.outcome, Outcome::Success);
        assert!(entry.outcome_at.is_some());
    }

    #[test]
    fn test_manifest_into_artifacts() {
        let manifest = WorkOrderManifest {
            work_order_id: WorkOrderId::new("wo-7"),
            outputs: vec![
                ManifestOutput {
                    path: "src/a.rs".to_string(),
                    description: "added module a".to_string(),
                    reported_at: None,
                },
                ManifestOutput {
                    path: "src/b.rs".to_string(),
                    description: "added module b".to_string(),
                    reported_at: None,
                },
            ],
        };

        let loaded_at = Utc::now();
        let artifacts = manifest.into_artifacts(loaded_at);
        assert_eq!(artifacts.len(), 2);
        assert!(artifacts
            .iter()
            .all(|a| a.source_work_order_id == WorkOrderId::new("wo-7")));
        assert!(artifacts.iter().all(|a| a.state == ArtifactState::Proposed));
        assert_eq!(artifacts[0].timestamp, loaded_at);
    }

    #[test]
    fn test_empty_manifest_is_valid() {
        let manifest: WorkOrderManifest =
            serde_json::from_str(r#"{"work_order_id": "wo-9"}"#).unwrap();
        assert!(manifest.outputs.is_empty());
        assert!(manifest.into_artifacts(Utc::now()).is_empty());
    }

    #[test]
    fn test_merge_result_empty() {
        let result = MergeResult::empty(MergeStrategy::Skip);
        assert!(result.is_empty());
        assert_eq!(result.manual_attention().count(), 0);
    }
}
