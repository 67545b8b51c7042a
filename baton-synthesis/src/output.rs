//! Rendering of merge results.
//!
//! Two views of the same run: a Markdown body meant to be pasted into a
//! pull request, and a structured report for storage or telemetry.

use std::fmt::Write as _;

use baton_core::{MergeResult, MissionId, SynthesisReport, WorkOrderId};
use chrono::Utc;

/// Render a merge result as a PR-ready Markdown body.
///
/// Layout: a summary line, the merged change list, automatically resolved
/// conflicts, conflicts requiring attention, and a footer naming the
/// contributing work orders. Sections with nothing to say are omitted.
/// A merged path never appears in a conflict section and vice versa.
pub fn generate_pr_body(
    result: &MergeResult,
    mission_id: &MissionId,
    work_order_ids: &[WorkOrderId],
) -> String {
    let mut body = String::new();

    let _ = writeln!(body, "## Mission `{mission_id}`: synthesized changes");
    let _ = writeln!(body);
    let _ = writeln!(
        body,
        "Merged {} artifact(s) from {} work order(s) using the `{}` strategy.",
        result.merged.len(),
        work_order_ids.len(),
        result.strategy.as_str(),
    );

    if result.is_empty() {
        let _ = writeln!(body);
        let _ = writeln!(body, "No artifacts were produced by this mission.");
    }

    if !result.merged.is_empty() {
        let _ = writeln!(body);
        let _ = writeln!(body, "### Merged");
        let _ = writeln!(body);
        for artifact in &result.merged {
            let _ = writeln!(
                body,
                "- `{}`: {} (`{}`)",
                artifact.path, artifact.description, artifact.source_work_order_id
            );
        }
    }

    if !result.resolved_conflicts.is_empty() {
        let _ = writeln!(body);
        let _ = writeln!(body, "### Automatically resolved conflicts");
        let _ = writeln!(body);
        for resolved in &result.resolved_conflicts {
            let superseded = resolved
                .discarded
                .iter()
                .map(|a| format!("`{}`", a.source_work_order_id))
                .collect::<Vec<_>>()
                .join(", ");
            let _ = writeln!(
                body,
                "- `{}`: kept `{}`, superseded {}",
                resolved.path, resolved.winner.source_work_order_id, superseded
            );
        }
    }

    if !result.skipped_conflicts.is_empty() {
        let _ = writeln!(body);
        let _ = writeln!(body, "### Conflicts requiring attention");
        let _ = writeln!(body);
        for skipped in &result.skipped_conflicts {
            let contenders = skipped
                .contenders
                .iter()
                .map(|a| format!("`{}`", a.source_work_order_id))
                .collect::<Vec<_>>()
                .join(", ");
            let note = if skipped.requires_manual {
                " (manual decision required)"
            } else {
                " (skipped)"
            };
            let _ = writeln!(
                body,
                "- `{}`: contested by {}{}",
                skipped.path, contenders, note
            );
        }
    }

    if !work_order_ids.is_empty() {
        let listed = work_order_ids
            .iter()
            .map(|w| format!("`{w}`"))
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(body);
        let _ = writeln!(body, "---");
        let _ = writeln!(body);
        let _ = writeln!(body, "Contributing work orders: {listed}");
    }

    body
}

/// Build the machine-readable counterpart of the PR body.
pub fn generate_report(result: &MergeResult, mission_id: &MissionId) -> SynthesisReport {
    SynthesisReport {
        mission_id: mission_id.clone(),
        strategy: result.strategy,
        merged_count: result.merged.len(),
        resolved_count: result.resolved_conflicts.len(),
        skipped_count: result.skipped_conflicts.len(),
        merged: result.merged.clone(),
        resolved_conflicts: result.resolved_conflicts.clone(),
        skipped_conflicts: result.skipped_conflicts.clone(),
        generated_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::merge_artifacts;
    use baton_core::{Artifact, MergeStrategy};

    fn artifact(path: &str, work_order: &str) -> Artifact {
        Artifact::new(path, format!("change to {path}"), WorkOrderId::new(work_order))
    }

    fn work_orders(ids: &[&str]) -> Vec<WorkOrderId> {
        ids.iter().map(|id| WorkOrderId::new(*id)).collect()
    }

    #[test]
    fn test_pr_body_lists_merged_and_contested_paths_separately() {
        let result = merge_artifacts(
            vec![
                artifact("src/a.rs", "wo-1"),
                artifact("src/shared.rs", "wo-1"),
                artifact("src/shared.rs", "wo-2"),
            ],
            MergeStrategy::ManualRequired,
        );
        let body = generate_pr_body(
            &result,
            &MissionId::new("m-42"),
            &work_orders(&["wo-1", "wo-2"]),
        );

        assert!(body.contains("## Mission `m-42`"));
        assert!(body.contains("Merged 1 artifact(s) from 2 work order(s)"));
        assert!(body.contains("`manual-required` strategy"));
        assert!(body.contains("### Merged"));
        assert!(body.contains("- `src/a.rs`"));
        assert!(body.contains("### Conflicts requiring attention"));
        assert!(body.contains("- `src/shared.rs`: contested by `wo-1`, `wo-2`"));
        assert!(body.contains("manual decision required"));
        assert!(body.contains("Contributing work orders: `wo-1`, `wo-2`"));

        // A contested path never shows up in the merged section.
        let merged_section = body
            .split("### Conflicts requiring attention")
            .next()
            .unwrap();
        assert!(!merged_section.contains("src/shared.rs"));
    }

    #[test]
    fn test_pr_body_resolved_section_names_winner_and_superseded() {
        let result = merge_artifacts(
            vec![
                artifact("src/shared.rs", "wo-1"),
                artifact("src/shared.rs", "wo-2"),
            ],
            MergeStrategy::LastWriteWins,
        );
        let body = generate_pr_body(
            &result,
            &MissionId::new("m-1"),
            &work_orders(&["wo-1", "wo-2"]),
        );

        assert!(body.contains("### Automatically resolved conflicts"));
        assert!(body.contains("- `src/shared.rs`: kept `wo-2`, superseded `wo-1`"));
        assert!(!body.contains("### Conflicts requiring attention"));
    }

    #[test]
    fn test_pr_body_for_empty_mission() {
        let result = merge_artifacts(vec![], MergeStrategy::LastWriteWins);
        let body = generate_pr_body(&result, &MissionId::new("m-0"), &[]);

        assert!(body.contains("Merged 0 artifact(s) from 0 work order(s)"));
        assert!(body.contains("No artifacts were produced by this mission."));
        assert!(!body.contains("### Merged"));
        assert!(!body.contains("Contributing work orders"));
    }

    #[test]
    fn test_report_counts_match_detail_lists() {
        let result = merge_artifacts(
            vec![
                artifact("src/a.rs", "wo-1"),
                artifact("src/shared.rs", "wo-1"),
                artifact("src/shared.rs", "wo-2"),
            ],
            MergeStrategy::LastWriteWins,
        );
        let report = generate_report(&result, &MissionId::new("m-9"));

        assert_eq!(report.mission_id, MissionId::new("m-9"));
        assert_eq!(report.strategy, MergeStrategy::LastWriteWins);
        assert_eq!(report.merged_count, report.merged.len());
        assert_eq!(report.resolved_count, report.resolved_conflicts.len());
        assert_eq!(report.skipped_count, report.skipped_conflicts.len());
        assert_eq!(report.merged_count, 2);
        assert_eq!(report.resolved_count, 1);
        assert_eq!(report.skipped_count, 0);
    }
}
