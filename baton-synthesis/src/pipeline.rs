//! End-to-end synthesis run.

use std::path::PathBuf;

use baton_core::{MergeResult, MergeStrategy, MissionId, SynthesisReport, TelemetryHook, WorkOrderId};

use crate::loader::{load_artifacts, LoaderConfig, ManifestReader};
use crate::merge::merge_artifacts;
use crate::output::{generate_pr_body, generate_report};

/// Everything a synthesis run produces.
#[derive(Debug, Clone)]
pub struct SynthesisOutput {
    pub merge_result: MergeResult,
    pub pr_body: String,
    pub report: SynthesisReport,
}

/// Load manifests, merge their artifacts, and render the result.
///
/// Infallible by construction: unreadable manifests are skipped by the
/// loader and an empty mission produces an empty (still well-formed)
/// output. The telemetry hook fires once, after the report is built.
pub async fn run_synthesis(
    reader: &dyn ManifestReader,
    manifest_paths: &[PathBuf],
    strategy: MergeStrategy,
    mission_id: &MissionId,
    config: &LoaderConfig,
    hook: &dyn TelemetryHook,
) -> SynthesisOutput {
    let artifacts = load_artifacts(reader, manifest_paths, config).await;

    // Contributing work orders in first-seen order, for the PR footer.
    let mut work_order_ids: Vec<WorkOrderId> = Vec::new();
    for artifact in &artifacts {
        if !work_order_ids.contains(&artifact.source_work_order_id) {
            work_order_ids.push(artifact.source_work_order_id.clone());
        }
    }

    let merge_result = merge_artifacts(artifacts, strategy);
    let pr_body = generate_pr_body(&merge_result, mission_id, &work_order_ids);
    let report = generate_report(&merge_result, mission_id);

    hook.on_synthesis_complete(&report);

    tracing::info!(
        mission_id = %mission_id,
        strategy = %merge_result.strategy.as_str(),
        merged = report.merged_count,
        resolved = report.resolved_count,
        skipped = report.skipped_count,
        "Synthesis run complete"
    );

    SynthesisOutput {
        merge_result,
        pr_body,
        report,
    }
}
