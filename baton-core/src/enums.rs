//! Closed enums for outcomes, artifact states, and merge strategies.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// OUTCOME ENUM
// ============================================================================

/// Eventual outcome of a delegation decision.
///
/// Starts `Pending` and transitions exactly once to one of the closed
/// variants. A closed outcome is never reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// Work order dispatched, no outcome reported yet
    Pending,
    /// Work order achieved its goal
    Success,
    /// Work order failed
    Failure,
    /// Work order produced a usable but incomplete result
    Partial,
}

impl Outcome {
    /// Wire/storage string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Pending => "pending",
            Outcome::Success => "success",
            Outcome::Failure => "failure",
            Outcome::Partial => "partial",
        }
    }

    /// Whether this outcome closes the entry (anything but `Pending`).
    pub fn is_closed(&self) -> bool {
        !matches!(self, Outcome::Pending)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Outcome {
    type Err = OutcomeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Outcome::Pending),
            "success" => Ok(Outcome::Success),
            "failure" | "failed" => Ok(Outcome::Failure),
            "partial" => Ok(Outcome::Partial),
            _ => Err(OutcomeParseError(s.to_string())),
        }
    }
}

/// Error when parsing an invalid outcome string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutcomeParseError(pub String);

impl fmt::Display for OutcomeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid outcome: {}", self.0)
    }
}

impl std::error::Error for OutcomeParseError {}

// ============================================================================
// ARTIFACT STATE ENUM
// ============================================================================

/// Lifecycle state of an artifact within one synthesis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum ArtifactState {
    /// Declared by a work-order manifest, not yet examined
    Proposed,
    /// Accepted into the final change set
    Merged,
    /// Part of an unresolved collision
    Conflicted,
    /// Excluded from the final change set
    Skipped,
}

impl ArtifactState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactState::Proposed => "proposed",
            ArtifactState::Merged => "merged",
            ArtifactState::Conflicted => "conflicted",
            ArtifactState::Skipped => "skipped",
        }
    }
}

impl fmt::Display for ArtifactState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// MERGE STRATEGY ENUM
// ============================================================================

/// How colliding artifacts for the same path are settled.
///
/// Modeled as a closed enum so an invalid strategy is rejected at the API
/// boundary instead of surfacing deep inside the merge logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "kebab-case")]
pub enum MergeStrategy {
    /// The positionally-last contender wins; earlier contenders are skipped
    LastWriteWins,
    /// Conflicting paths are excluded from the merged set entirely
    Skip,
    /// Like `Skip`, but every conflict is flagged as needing a human decision
    ManualRequired,
}

impl MergeStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MergeStrategy::LastWriteWins => "last-write-wins",
            MergeStrategy::Skip => "skip",
            MergeStrategy::ManualRequired => "manual-required",
        }
    }
}

impl fmt::Display for MergeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MergeStrategy {
    type Err = MergeStrategyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "last-write-wins" | "last_write_wins" => Ok(MergeStrategy::LastWriteWins),
            "skip" => Ok(MergeStrategy::Skip),
            "manual-required" | "manual_required" => Ok(MergeStrategy::ManualRequired),
            _ => Err(MergeStrategyParseError(s.to_string())),
        }
    }
}

/// Error when parsing an invalid merge strategy string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeStrategyParseError(pub String);

impl fmt::Display for MergeStrategyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid merge strategy: {} (expected last-write-wins, skip, or manual-required)",
            self.0
        )
    }
}

impl std::error::Error for MergeStrategyParseError {}
