//! Merge strategy application.

use baton_core::{
    Artifact, ArtifactState, MergeResult, MergeStrategy, ResolvedConflict, SkippedConflict,
};

use crate::conflict::detect_conflicts;

/// Apply a merge strategy to a set of proposed artifacts.
///
/// Pure function of its inputs. Conflict-free artifacts are always accepted;
/// the strategy only decides what happens to contested paths:
///
/// - `LastWriteWins`: the last contender in input order is accepted, the
///   rest are recorded as discarded.
/// - `Skip`: contested paths are left out of the merged set entirely.
/// - `ManualRequired`: like `Skip`, but the conflicts are flagged for a
///   human decision.
pub fn merge_artifacts(artifacts: Vec<Artifact>, strategy: MergeStrategy) -> MergeResult {
    let (clean, conflicts) = detect_conflicts(artifacts);

    let mut result = MergeResult::empty(strategy);
    result.merged = clean
        .into_iter()
        .map(|a| a.with_state(ArtifactState::Merged))
        .collect();

    for conflict in conflicts {
        match strategy {
            MergeStrategy::LastWriteWins => {
                let mut contenders = conflict.contenders;
                // detect_conflicts guarantees at least two contenders.
                let winner = match contenders.pop() {
                    Some(artifact) => artifact.with_state(ArtifactState::Merged),
                    None => continue,
                };
                let discarded: Vec<Artifact> = contenders
                    .into_iter()
                    .map(|a| a.with_state(ArtifactState::Skipped))
                    .collect();

                tracing::debug!(
                    path = %conflict.path,
                    winner = %winner.source_work_order_id,
                    discarded = discarded.len(),
                    "Resolved conflict by last write"
                );

                result.merged.push(winner.clone());
                result.resolved_conflicts.push(ResolvedConflict {
                    path: conflict.path,
                    winner,
                    discarded,
                });
            }
            MergeStrategy::Skip | MergeStrategy::ManualRequired => {
                let contenders: Vec<Artifact> = conflict
                    .contenders
                    .into_iter()
                    .map(|a| a.with_state(ArtifactState::Skipped))
                    .collect();
                result.skipped_conflicts.push(SkippedConflict {
                    path: conflict.path,
                    contenders,
                    requires_manual: strategy == MergeStrategy::ManualRequired,
                });
            }
        }
    }

    result
}
