//! Path-level conflict detection.

use std::collections::HashMap;

use baton_core::{Artifact, ArtifactState, Conflict};

/// Partition artifacts into a clean set and a list of conflicts.
///
/// Artifacts are grouped by exact path match. A path claimed once stays in
/// the clean set unchanged; a path claimed by two or more work orders
/// becomes a `Conflict` whose contenders are marked `Conflicted`.
///
/// All ordering is positional: clean artifacts keep their relative input
/// order, conflicts appear in the order their path was first seen, and
/// contenders within a conflict keep input order. Timestamps play no part.
pub fn detect_conflicts(artifacts: Vec<Artifact>) -> (Vec<Artifact>, Vec<Conflict>) {
    let mut first_seen: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<Artifact>> = HashMap::new();

    for artifact in artifacts {
        if !groups.contains_key(&artifact.path) {
            first_seen.push(artifact.path.clone());
        }
        groups.entry(artifact.path.clone()).or_default().push(artifact);
    }

    let mut clean = Vec::new();
    let mut conflicts = Vec::new();

    for path in first_seen {
        let mut group = groups.remove(&path).unwrap_or_default();
        if group.len() == 1 {
            clean.push(group.remove(0));
        } else {
            tracing::debug!(
                path = %path,
                contenders = group.len(),
                "Detected path conflict"
            );
            let contenders = group
                .into_iter()
                .map(|a| a.with_state(ArtifactState::Conflicted))
                .collect();
            conflicts.push(Conflict::new(path, contenders));
        }
    }

    (clean, conflicts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use baton_test_utils::{sample_artifact as artifact, strategies::arb_artifacts};
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn test_disjoint_paths_produce_no_conflicts() {
        let input = vec![
            artifact("src/a.rs", "wo-1"),
            artifact("src/b.rs", "wo-2"),
            artifact("src/c.rs", "wo-3"),
        ];
        let (clean, conflicts) = detect_conflicts(input.clone());
        assert_eq!(clean, input);
        assert!(conflicts.is_empty());
    }

    #[test]
    fn test_shared_path_becomes_conflict_in_input_order() {
        let (clean, conflicts) = detect_conflicts(vec![
            artifact("src/a.rs", "wo-1"),
            artifact("src/shared.rs", "wo-2"),
            artifact("src/b.rs", "wo-3"),
            artifact("src/shared.rs", "wo-1"),
            artifact("src/shared.rs", "wo-4"),
        ]);

        assert_eq!(clean.len(), 2);
        assert_eq!(clean[0].path, "src/a.rs");
        assert_eq!(clean[1].path, "src/b.rs");

        assert_eq!(conflicts.len(), 1);
        let conflict = &conflicts[0];
        assert_eq!(conflict.path, "src/shared.rs");
        let contenders: Vec<_> = conflict
            .contending_work_orders()
            .iter()
            .map(|w| w.as_str().to_string())
            .collect();
        assert_eq!(contenders, vec!["wo-2", "wo-1", "wo-4"]);
        assert!(conflict
            .contenders
            .iter()
            .all(|a| a.state == ArtifactState::Conflicted));
    }

    #[test]
    fn test_same_work_order_can_conflict_with_itself() {
        // A work order that declares the same path twice is still a
        // conflict; synthesis does not trust any single manifest.
        let (clean, conflicts) = detect_conflicts(vec![
            artifact("src/dup.rs", "wo-1"),
            artifact("src/dup.rs", "wo-1"),
        ]);
        assert!(clean.is_empty());
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].contenders.len(), 2);
    }

    #[test]
    fn test_empty_input() {
        let (clean, conflicts) = detect_conflicts(vec![]);
        assert!(clean.is_empty());
        assert!(conflicts.is_empty());
    }

    proptest! {
        #[test]
        fn prop_unique_paths_pass_through_unchanged(artifacts in arb_artifacts(12)) {
            // Keep the first claim per path so the input is conflict-free.
            let mut seen = HashSet::new();
            let input: Vec<_> = artifacts
                .into_iter()
                .filter(|a| seen.insert(a.path.clone()))
                .collect();
            let (clean, conflicts) = detect_conflicts(input.clone());
            prop_assert_eq!(clean, input);
            prop_assert!(conflicts.is_empty());
        }

        #[test]
        fn prop_every_artifact_lands_exactly_once(input in arb_artifacts(16)) {
            let (clean, conflicts) = detect_conflicts(input.clone());
            let total = clean.len()
                + conflicts.iter().map(|c| c.contenders.len()).sum::<usize>();
            prop_assert_eq!(total, input.len());

            let clean_paths: HashSet<&str> =
                clean.iter().map(|a| a.path.as_str()).collect();
            prop_assert_eq!(clean_paths.len(), clean.len());
            for conflict in &conflicts {
                prop_assert!(conflict.contenders.len() >= 2);
                prop_assert!(!clean_paths.contains(conflict.path.as_str()));
            }
        }
    }
}
