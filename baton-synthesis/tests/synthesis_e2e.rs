//! End-to-end synthesis runs over real manifest files on disk.

use std::path::PathBuf;
use std::time::Duration;

use baton_core::{ArtifactState, MergeStrategy, MissionId, WorkOrderId};
use baton_synthesis::{run_synthesis, FsManifestReader, LoaderConfig};
use baton_test_utils::{manifest_json, RecordingTelemetry};

struct ManifestDir {
    root: PathBuf,
}

impl ManifestDir {
    fn new(label: &str) -> Self {
        let root = std::env::temp_dir().join(format!(
            "baton-e2e-{label}-{}",
            std::process::id()
        ));
        std::fs::create_dir_all(&root).unwrap();
        Self { root }
    }

    fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.root.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn missing(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

impl Drop for ManifestDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.root);
    }
}

fn reader() -> FsManifestReader {
    FsManifestReader::new(Duration::from_secs(2))
}

#[tokio::test]
async fn test_disjoint_work_orders_all_merge() {
    let dir = ManifestDir::new("disjoint");
    let paths = vec![
        dir.write("wo-1.json", &manifest_json("wo-1", &["src/auth.rs"])),
        dir.write("wo-2.json", &manifest_json("wo-2", &["src/api.rs", "docs/api.md"])),
    ];

    let hook = RecordingTelemetry::new();
    let output = run_synthesis(
        &reader(),
        &paths,
        MergeStrategy::LastWriteWins,
        &MissionId::new("m-1"),
        &LoaderConfig::default(),
        &hook,
    )
    .await;

    assert_eq!(output.merge_result.merged.len(), 3);
    assert!(output.merge_result.resolved_conflicts.is_empty());
    assert!(output.merge_result.skipped_conflicts.is_empty());
    assert!(output
        .merge_result
        .merged
        .iter()
        .all(|a| a.state == ArtifactState::Merged));

    assert!(output.pr_body.contains("Merged 3 artifact(s) from 2 work order(s)"));
    assert!(output.pr_body.contains("- `src/auth.rs`"));
    assert!(!output.pr_body.contains("Conflicts requiring attention"));

    let reports = hook.reports();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].merged_count, 3);
}

#[tokio::test]
async fn test_conflicting_work_orders_last_write_wins() {
    let dir = ManifestDir::new("lww");
    let paths = vec![
        dir.write("wo-1.json", &manifest_json("wo-1", &["src/config.rs", "src/a.rs"])),
        dir.write("wo-2.json", &manifest_json("wo-2", &["src/config.rs"])),
    ];

    let output = run_synthesis(
        &reader(),
        &paths,
        MergeStrategy::LastWriteWins,
        &MissionId::new("m-2"),
        &LoaderConfig::default(),
        &RecordingTelemetry::new(),
    )
    .await;

    assert_eq!(output.merge_result.merged.len(), 2);
    assert_eq!(output.merge_result.resolved_conflicts.len(), 1);

    let resolved = &output.merge_result.resolved_conflicts[0];
    assert_eq!(resolved.path, "src/config.rs");
    // wo-2's manifest came second, so its artifact wins.
    assert_eq!(resolved.winner.source_work_order_id, WorkOrderId::new("wo-2"));
    assert_eq!(resolved.discarded[0].source_work_order_id, WorkOrderId::new("wo-1"));

    assert!(output
        .pr_body
        .contains("- `src/config.rs`: kept `wo-2`, superseded `wo-1`"));
}

#[tokio::test]
async fn test_conflicting_work_orders_manual_required() {
    let dir = ManifestDir::new("manual");
    let paths = vec![
        dir.write("wo-1.json", &manifest_json("wo-1", &["src/shared.rs"])),
        dir.write("wo-2.json", &manifest_json("wo-2", &["src/shared.rs"])),
    ];

    let output = run_synthesis(
        &reader(),
        &paths,
        MergeStrategy::ManualRequired,
        &MissionId::new("m-3"),
        &LoaderConfig::default(),
        &RecordingTelemetry::new(),
    )
    .await;

    assert!(output.merge_result.merged.is_empty());
    assert_eq!(output.merge_result.skipped_conflicts.len(), 1);
    assert!(output.merge_result.skipped_conflicts[0].requires_manual);
    assert_eq!(output.merge_result.manual_attention().count(), 1);

    assert!(output.pr_body.contains("### Conflicts requiring attention"));
    assert!(output
        .pr_body
        .contains("- `src/shared.rs`: contested by `wo-1`, `wo-2` (manual decision required)"));
}

#[tokio::test]
async fn test_missing_and_malformed_manifests_do_not_block_the_rest() {
    let dir = ManifestDir::new("partial");
    let paths = vec![
        dir.write("wo-1.json", &manifest_json("wo-1", &["src/a.rs"])),
        dir.missing("wo-gone.json"),
        dir.write("wo-bad.json", "{not json"),
        dir.write("wo-4.json", &manifest_json("wo-4", &["src/b.rs"])),
    ];

    let output = run_synthesis(
        &reader(),
        &paths,
        MergeStrategy::LastWriteWins,
        &MissionId::new("m-4"),
        &LoaderConfig::default(),
        &RecordingTelemetry::new(),
    )
    .await;

    assert_eq!(output.merge_result.merged.len(), 2);
    assert!(output.pr_body.contains("Contributing work orders: `wo-1`, `wo-4`"));
}

#[tokio::test]
async fn test_empty_mission_produces_well_formed_output() {
    let output = run_synthesis(
        &reader(),
        &[],
        MergeStrategy::Skip,
        &MissionId::new("m-5"),
        &LoaderConfig::default(),
        &RecordingTelemetry::new(),
    )
    .await;

    assert!(output.merge_result.is_empty());
    assert!(output.pr_body.contains("No artifacts were produced by this mission."));
    assert_eq!(output.report.merged_count, 0);
}

#[tokio::test]
async fn test_manifest_with_no_outputs_contributes_nothing() {
    let dir = ManifestDir::new("empty-manifest");
    let paths = vec![
        dir.write("wo-1.json", &manifest_json("wo-1", &[])),
        dir.write("wo-2.json", &manifest_json("wo-2", &["src/only.rs"])),
    ];

    let output = run_synthesis(
        &reader(),
        &paths,
        MergeStrategy::LastWriteWins,
        &MissionId::new("m-6"),
        &LoaderConfig::default(),
        &RecordingTelemetry::new(),
    )
    .await;

    assert_eq!(output.merge_result.merged.len(), 1);
    // wo-1 loaded successfully but declared nothing, so it is not listed.
    assert!(output.pr_body.contains("Contributing work orders: `wo-2`"));
    assert!(!output.pr_body.contains("`wo-1`"));
}
