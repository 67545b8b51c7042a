//! In-memory reasoning log backed by a concurrent hash map.
//!
//! Each write touches exactly one entry, so DashMap's per-shard locking
//! gives the atomic append-or-update the concurrency model requires without
//! any global lock.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use baton_core::{
    DelegationStats, EntryId, NewEntry, NoopTelemetry, Outcome, ReasoningEntry, StorageError,
    StorageResult, TelemetryHook, ValidationError, WorkOrderId,
};

use crate::{ReasoningLogStore, StatsFilter};

/// In-memory implementation of [`ReasoningLogStore`].
///
/// Cheap to construct, so tests can run many isolated instances; nothing in
/// here reaches for ambient process-wide state.
pub struct InMemoryReasoningLog {
    entries: DashMap<EntryId, ReasoningEntry>,
    hook: Arc<dyn TelemetryHook>,
}

impl InMemoryReasoningLog {
    pub fn new() -> Self {
        Self::with_telemetry(Arc::new(NoopTelemetry))
    }

    /// Construct with a caller-supplied telemetry hook. The hook fires after
    /// successful writes and can never fail them.
    pub fn with_telemetry(hook: Arc<dyn TelemetryHook>) -> Self {
        Self {
            entries: DashMap::new(),
            hook,
        }
    }

    /// Number of entries currently stored.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for InMemoryReasoningLog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReasoningLogStore for InMemoryReasoningLog {
    async fn create_entry(&self, new: NewEntry) -> StorageResult<ReasoningEntry> {
        new.validate()?;

        let entry = ReasoningEntry::from_new(new);
        self.entries.insert(entry.entry_id, entry.clone());

        tracing::debug!(
            entry_id = %entry.entry_id,
            work_order_id = %entry.work_order_id,
            delegation_target = %entry.delegation_target,
            "Reasoning entry created"
        );
        self.hook.on_log_write(&entry);

        Ok(entry)
    }

    async fn get_entry(&self, id: EntryId) -> StorageResult<Option<ReasoningEntry>> {
        Ok(self.entries.get(&id).map(|e| e.clone()))
    }

    async fn update_outcome(
        &self,
        id: EntryId,
        outcome: Outcome,
        notes: Option<String>,
    ) -> StorageResult<ReasoningEntry> {
        if !outcome.is_closed() {
            return Err(ValidationError::InvalidValue {
                field: "outcome".to_string(),
                reason: "must be one of success, failure, partial".to_string(),
            }
            .into());
        }

        // get_mut holds the shard lock for the duration of the mutation,
        // making the compare-and-set atomic per entry.
        let updated = {
            let mut entry = self
                .entries
                .get_mut(&id)
                .ok_or(StorageError::EntryNotFound { id })?;

            if entry.is_closed() {
                if entry.outcome == outcome && entry.outcome_notes == notes {
                    // Idempotent re-delivery of the same outcome: no write.
                    return Ok(entry.clone());
                }
                return Err(StorageError::OutcomeConflict {
                    id,
                    existing: entry.outcome,
                    requested: outcome,
                });
            }

            entry.close(outcome, notes);
            entry.clone()
        };

        tracing::debug!(
            entry_id = %updated.entry_id,
            outcome = %updated.outcome,
            "Reasoning entry outcome recorded"
        );
        self.hook.on_log_write(&updated);

        Ok(updated)
    }

    async fn get_history(&self, work_order_id: &WorkOrderId) -> StorageResult<Vec<ReasoningEntry>> {
        let mut history: Vec<ReasoningEntry> = self
            .entries
            .iter()
            .filter(|e| &e.work_order_id == work_order_id)
            .map(|e| e.clone())
            .collect();

        history.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.entry_id.cmp(&b.entry_id))
        });

        Ok(history)
    }

    async fn get_stats(&self, filter: &StatsFilter) -> StorageResult<Vec<DelegationStats>> {
        // BTreeMap keyed by (conductor, target) keeps the output order
        // deterministic for callers and tests.
        let mut groups: BTreeMap<(String, String), Vec<ReasoningEntry>> = BTreeMap::new();

        for entry in self.entries.iter() {
            if filter.matches(&entry.conductor_agent, &entry.delegation_target) {
                groups
                    .entry((
                        entry.conductor_agent.clone(),
                        entry.delegation_target.clone(),
                    ))
                    .or_default()
                    .push(entry.clone());
            }
        }

        let stats = groups
            .into_iter()
            .map(|((conductor_agent, delegation_target), entries)| {
                let total = entries.len() as u64;
                let mut pending = 0u64;
                let mut success = 0u64;
                let mut failure = 0u64;
                let mut partial = 0u64;
                let mut confidence_sum = 0.0f64;

                for entry in &entries {
                    confidence_sum += entry.confidence_score;
                    match entry.outcome {
                        Outcome::Pending => pending += 1,
                        Outcome::Success => success += 1,
                        Outcome::Failure => failure += 1,
                        Outcome::Partial => partial += 1,
                    }
                }

                let closed = success + failure + partial;
                let success_rate = if closed > 0 {
                    Some(success as f64 / closed as f64)
                } else {
                    None
                };

                DelegationStats {
                    conductor_agent,
                    delegation_target,
                    total,
                    pending,
                    success,
                    failure,
                    partial,
                    success_rate,
                    mean_confidence: confidence_sum / total as f64,
                }
            })
            .collect();

        Ok(stats)
    }
}
