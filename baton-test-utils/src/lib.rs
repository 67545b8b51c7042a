//! Shared fixtures and generators for BATON test suites.
//!
//! Not compiled into release artifacts; depend on this crate from
//! `[dev-dependencies]` only.

use std::sync::Mutex;

use baton_core::{
    Artifact, MissionId, NewEntry, ReasoningEntry, SynthesisReport, TelemetryHook, WorkOrderId,
};

// ============================================================================
// FIXTURES
// ============================================================================

/// A valid creation request for a reasoning entry.
pub fn sample_new_entry(work_order: &str, conductor: &str, target: &str) -> NewEntry {
    NewEntry {
        work_order_id: WorkOrderId::new(work_order),
        mission_id: MissionId::new("m-test"),
        conductor_agent: conductor.to_string(),
        delegation_target: target.to_string(),
        reasoning: format!("{target} fits the task profile"),
        context_injected: Some(serde_json::json!({"files": ["src/lib.rs"]})),
        confidence_score: 0.75,
    }
}

/// A proposed artifact with a derived description.
pub fn sample_artifact(path: &str, work_order: &str) -> Artifact {
    Artifact::new(path, format!("change to {path}"), WorkOrderId::new(work_order))
}

/// Serialized work-order manifest, as the lifecycle engine writes it.
pub fn manifest_json(work_order: &str, paths: &[&str]) -> String {
    let outputs: Vec<serde_json::Value> = paths
        .iter()
        .map(|p| {
            serde_json::json!({
                "path": p,
                "description": format!("change to {p}"),
            })
        })
        .collect();
    serde_json::json!({
        "work_order_id": work_order,
        "outputs": outputs,
    })
    .to_string()
}

// ============================================================================
// TELEMETRY
// ============================================================================

/// Hook that records every event it receives, for assertions.
#[derive(Debug, Default)]
pub struct RecordingTelemetry {
    log_writes: Mutex<Vec<ReasoningEntry>>,
    reports: Mutex<Vec<SynthesisReport>>,
}

impl RecordingTelemetry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log_writes(&self) -> Vec<ReasoningEntry> {
        self.log_writes.lock().unwrap().clone()
    }

    pub fn reports(&self) -> Vec<SynthesisReport> {
        self.reports.lock().unwrap().clone()
    }
}

impl TelemetryHook for RecordingTelemetry {
    fn on_log_write(&self, entry: &ReasoningEntry) {
        self.log_writes.lock().unwrap().push(entry.clone());
    }

    fn on_synthesis_complete(&self, report: &SynthesisReport) {
        self.reports.lock().unwrap().push(report.clone());
    }
}

// ============================================================================
// PROPTEST STRATEGIES
// ============================================================================

pub mod strategies {
    use super::*;
    use proptest::prelude::*;

    /// Plausible repository-relative paths from a small alphabet, so
    /// generated sets actually collide.
    pub fn arb_path() -> impl Strategy<Value = String> {
        ("[a-e]", "(rs|toml|md)").prop_map(|(stem, ext)| format!("src/{stem}.{ext}"))
    }

    pub fn arb_work_order_id() -> impl Strategy<Value = WorkOrderId> {
        (0u8..6).prop_map(|n| WorkOrderId::new(format!("wo-{n}")))
    }

    pub fn arb_artifact() -> impl Strategy<Value = Artifact> {
        (arb_path(), arb_work_order_id())
            .prop_map(|(path, wo)| Artifact::new(path.clone(), format!("change to {path}"), wo))
    }

    pub fn arb_artifacts(max: usize) -> impl Strategy<Value = Vec<Artifact>> {
        proptest::collection::vec(arb_artifact(), 0..max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_new_entry_is_valid() {
        assert!(sample_new_entry("wo-1", "conductor", "tester")
            .validate()
            .is_ok());
    }

    #[test]
    fn test_manifest_json_round_trips() {
        let json = manifest_json("wo-3", &["src/a.rs", "src/b.rs"]);
        let manifest: baton_core::WorkOrderManifest = serde_json::from_str(&json).unwrap();
        assert_eq!(manifest.work_order_id, WorkOrderId::new("wo-3"));
        assert_eq!(manifest.outputs.len(), 2);
    }

    #[test]
    fn test_recording_telemetry_captures_writes() {
        let hook = RecordingTelemetry::new();
        let entry = ReasoningEntry::from_new(sample_new_entry("wo-1", "conductor", "tester"));
        hook.on_log_write(&entry);
        assert_eq!(hook.log_writes().len(), 1);
        assert!(hook.reports().is_empty());
    }
}
