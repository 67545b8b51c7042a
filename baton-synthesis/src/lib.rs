//! BATON Synthesis - work-order output aggregation
//!
//! Collects the declared outputs of completed work orders, detects path-level
//! conflicts between them, applies a merge strategy, and renders the result
//! as a PR-ready summary plus a machine-readable report.
//!
//! The engine is deterministic: conflict ordering is positional (the order
//! manifests were supplied), never wall-clock, so the same inputs always
//! produce the same merge decisions.

mod conflict;
mod loader;
mod merge;
mod output;
mod pipeline;

pub use conflict::detect_conflicts;
pub use loader::{load_artifacts, FsManifestReader, LoaderConfig, ManifestReader};
pub use merge::merge_artifacts;
pub use output::{generate_pr_body, generate_report};
pub use pipeline::{run_synthesis, SynthesisOutput};
