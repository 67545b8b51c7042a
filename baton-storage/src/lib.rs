//! BATON Storage - Reasoning Audit Log
//!
//! The only stateful piece of the coordination core: an append-only store of
//! delegation decisions with a single outcome write per entry.
//!
//! The store is defined as a trait so deployments can swap the backend
//! without touching the API or tooling layers; `InMemoryReasoningLog` is the
//! bundled implementation, safe under concurrent writers.

mod memory;

pub use memory::InMemoryReasoningLog;

use async_trait::async_trait;
use baton_core::{
    DelegationStats, EntryId, NewEntry, Outcome, ReasoningEntry, StorageResult, WorkOrderId,
};

/// Filter for aggregate delegation statistics.
///
/// Both fields optional; `None` matches every pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsFilter {
    pub conductor_agent: Option<String>,
    pub delegation_target: Option<String>,
}

impl StatsFilter {
    pub fn matches(&self, conductor_agent: &str, delegation_target: &str) -> bool {
        self.conductor_agent
            .as_deref()
            .map_or(true, |c| c == conductor_agent)
            && self
                .delegation_target
                .as_deref()
                .map_or(true, |t| t == delegation_target)
    }
}

/// Async storage trait for the reasoning audit log.
///
/// Writes are per-entry atomic; entries are independent, so no cross-entry
/// locking is required of implementors. Storage failures surface verbatim -
/// retry policy belongs to the caller, and `create_entry` is always safe to
/// retry because a failed attempt produces no partial record.
#[async_trait]
pub trait ReasoningLogStore: Send + Sync {
    /// Validate and append a new entry with `outcome = pending`.
    /// Returns the minted entry (including its id).
    async fn create_entry(&self, new: NewEntry) -> StorageResult<ReasoningEntry>;

    /// Fetch a single entry by id.
    async fn get_entry(&self, id: EntryId) -> StorageResult<Option<ReasoningEntry>>;

    /// Record the eventual outcome of an entry, exactly once.
    ///
    /// Setting an identical outcome (value and notes) on an already-closed
    /// entry is an idempotent no-op success; this is what makes
    /// at-least-once delivery from callers safe. A contradicting value
    /// fails with `StorageError::OutcomeConflict`.
    async fn update_outcome(
        &self,
        id: EntryId,
        outcome: Outcome,
        notes: Option<String>,
    ) -> StorageResult<ReasoningEntry>;

    /// Full delegation audit trail for one work order, ascending by
    /// `created_at` (ties broken by entry id).
    async fn get_history(&self, work_order_id: &WorkOrderId) -> StorageResult<Vec<ReasoningEntry>>;

    /// Aggregate statistics per (conductor, target) pair.
    async fn get_stats(&self, filter: &StatsFilter) -> StorageResult<Vec<DelegationStats>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_filter_matching() {
        let all = StatsFilter::default();
        assert!(all.matches("conductor", "worker"));

        let by_conductor = StatsFilter {
            conductor_agent: Some("conductor".to_string()),
            delegation_target: None,
        };
        assert!(by_conductor.matches("conductor", "anyone"));
        assert!(!by_conductor.matches("other", "anyone"));

        let exact = StatsFilter {
            conductor_agent: Some("conductor".to_string()),
            delegation_target: Some("worker".to_string()),
        };
        assert!(exact.matches("conductor", "worker"));
        assert!(!exact.matches("conductor", "reviewer"));
    }
}
