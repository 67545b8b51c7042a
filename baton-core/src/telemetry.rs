//! Optional telemetry hook.
//!
//! A narrow interface the caller may supply instead of a global event-bus
//! singleton. Methods are infallible and expected to return quickly; a hook
//! can never fail an audit-log write or a synthesis run.

use crate::{ReasoningEntry, SynthesisReport};

/// Observer for audit-log writes and completed synthesis runs.
///
/// All methods have no-op defaults, so implementors override only what they
/// care about.
pub trait TelemetryHook: Send + Sync {
    /// Fired after a reasoning entry is created or its outcome recorded.
    fn on_log_write(&self, _entry: &ReasoningEntry) {}

    /// Fired after a synthesis run produced its report.
    fn on_synthesis_complete(&self, _report: &SynthesisReport) {}
}

/// Hook that does nothing. Default when the caller wires no telemetry.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTelemetry;

impl TelemetryHook for NoopTelemetry {}
