//! Core types for the risk scorer (JSON contracts + computed results).

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Diff input (JSON contract — what the caller sends)
// ---------------------------------------------------------------------------

/// Per-file change status as reported by the diff supplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
  Added,
  Modified,
  Removed,
  Renamed,
}

/// One changed file in the normalized diff.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileChange {
  pub path: String,
  pub status: FileStatus,
  pub additions: u32,
  pub deletions: u32,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub patch_text: Option<String>,
}

impl FileChange {
  /// Total churn for this file.
  pub fn changes(&self) -> u32 {
    self.additions + self.deletions
  }
}

/// Normalized diff for one PR at one commit, immutable per assessment run.
///
/// Invariant: `total_additions` / `total_deletions` equal the sums over
/// `files_changed` (the diff supplier guarantees this; `from_files` computes it).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffSummary {
  pub files_changed: Vec<FileChange>,
  pub total_additions: u32,
  pub total_deletions: u32,
}

impl DiffSummary {
  /// Build a summary with totals computed from the file list.
  pub fn from_files(files_changed: Vec<FileChange>) -> Self {
    let total_additions = files_changed.iter().map(|f| f.additions).sum();
    let total_deletions = files_changed.iter().map(|f| f.deletions).sum();
    Self {
      files_changed,
      total_additions,
      total_deletions,
    }
  }

  pub fn total_changes(&self) -> u32 {
    self.total_additions + self.total_deletions
  }
}

// ---------------------------------------------------------------------------
// Impact level / severity enums
// ---------------------------------------------------------------------------

/// Discrete impact classification, shared by per-factor and overall scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactLevel {
  Low,
  Medium,
  High,
  Critical,
}

impl ImpactLevel {
  /// Four-band rule used for the overall score and score-derived factor
  /// impacts: >= 80 critical, >= 60 high, >= 30 medium, else low.
  ///
  /// Factor-level and overall-level classification share these bands on
  /// purpose; do not fork this per call site.
  pub fn for_score(score: u8) -> Self {
    match score {
      80..=u8::MAX => Self::Critical,
      60..=79 => Self::High,
      30..=59 => Self::Medium,
      _ => Self::Low,
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      Self::Low => "low",
      Self::Medium => "medium",
      Self::High => "high",
      Self::Critical => "critical",
    }
  }
}

/// Severity of an individual review comment (assembler-assigned).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
  Info,
  Low,
  Medium,
  High,
  Critical,
}

// ---------------------------------------------------------------------------
// Computed results (JSON contract — what we emit)
// ---------------------------------------------------------------------------

/// One scored risk dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
  pub name: String,
  /// 0-100.
  pub score: u8,
  /// Configuration-defined weight, expected in [0, 1].
  pub weight: f64,
  pub impact_level: ImpactLevel,
  /// Human-readable rationale; deterministic for given inputs.
  pub description: String,
}

/// Combined risk assessment for one diff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskScore {
  /// Weighted mean of factor scores, rounded to the nearest integer.
  pub overall: u8,
  pub level: ImpactLevel,
  /// The five factors, in fixed evaluation order.
  pub factors: Vec<RiskFactor>,
  /// Digest of the high/critical factors.
  pub summary: String,
}

// ---------------------------------------------------------------------------
// CLI stream wrappers
// ---------------------------------------------------------------------------

/// Structured error output for invalid input.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorOutput {
  pub error: bool,
  pub message: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub field: Option<String>,
}

impl ErrorOutput {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      error: true,
      message: message.into(),
      field: None,
    }
  }

  pub fn with_field(mut self, field: impl Into<String>) -> Self {
    self.field = Some(field.into());
    self
  }
}
