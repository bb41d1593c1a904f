//! Persisted review types and the assembler's result contract.

use chrono::{DateTime, Utc};
use risk_scorer::{ImpactLevel, RiskScore, Severity};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Assembler output (JSON contract — what gets persisted)
// ---------------------------------------------------------------------------

/// One finding produced by the review assembler. Carries no posted state;
/// the store owns that exclusively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentDraft {
  pub file_path: String,
  /// 1-based within the new file version.
  pub line_number: u32,
  pub severity: Severity,
  pub category: String,
  pub message: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub suggestion: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub code_snippet: Option<String>,
}

impl CommentDraft {
  /// Attach reconciliation state, producing a storable comment.
  pub fn into_comment(self, posted_to_github: bool, github_comment_id: Option<u64>) -> Comment {
    Comment {
      file_path: self.file_path,
      line_number: self.line_number,
      severity: self.severity,
      category: self.category,
      message: self.message,
      suggestion: self.suggestion,
      code_snippet: self.code_snippet,
      posted_to_github,
      github_comment_id,
    }
  }
}

/// A stored inline comment. Identity key across analyses is the
/// `(file_path, line_number)` coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
  pub file_path: String,
  pub line_number: u32,
  pub severity: Severity,
  pub category: String,
  pub message: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub suggestion: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub code_snippet: Option<String>,
  pub posted_to_github: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub github_comment_id: Option<u64>,
}

impl Comment {
  /// `"file:line"` form used by the posting collaborator's filter.
  pub fn coordinate(&self) -> String {
    format!("{}:{}", self.file_path, self.line_number)
  }
}

/// Full assessment of one PR at one commit, as produced by the assembler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeReviewResult {
  pub risk: RiskScore,
  /// Assembler-computed review score (risk folded with severity penalties).
  pub overall_score: u8,
  pub approved: bool,
  pub requires_changes: bool,
  pub comments: Vec<CommentDraft>,
  /// Opaque structured payload; the store never interprets it.
  #[serde(default)]
  pub simulation: serde_json::Value,
  #[serde(default)]
  pub documentation_suggestions: Vec<String>,
  #[serde(default)]
  pub testing_suggestions: Vec<String>,
}

// ---------------------------------------------------------------------------
// Persisted record
// ---------------------------------------------------------------------------

/// One live review record per `(project_id, pr_number)`; re-analyses update
/// it in place. Never deleted by this engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRecord {
  pub id: Uuid,
  pub project_id: Uuid,
  pub pr_number: u64,
  pub risk_level: ImpactLevel,
  pub risk_score_numeric: f64,
  pub overall_score: u8,
  pub approved: bool,
  pub requires_changes: bool,
  pub comments: Vec<Comment>,
  #[serde(default)]
  pub simulation: serde_json::Value,
  #[serde(default)]
  pub documentation_suggestions: Vec<String>,
  #[serde(default)]
  pub testing_suggestions: Vec<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// One successful GitHub posting, fed back into `mark_comments_posted`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentPosting {
  pub file_path: String,
  pub line_number: u32,
  pub github_comment_id: u64,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn coordinate_formatting() {
    let comment = CommentDraft {
      file_path: "src/a.ts".into(),
      line_number: 10,
      severity: Severity::High,
      category: "bug".into(),
      message: "possible null deref".into(),
      suggestion: None,
      code_snippet: None,
    }
    .into_comment(false, None);
    assert_eq!(comment.coordinate(), "src/a.ts:10");
    assert!(!comment.posted_to_github);
    assert_eq!(comment.github_comment_id, None);
  }

  #[test]
  fn result_defaults_for_optional_sections() {
    let json = r#"{
      "risk": {"overall": 10, "level": "low", "factors": [], "summary": "quiet"},
      "overall_score": 92,
      "approved": true,
      "requires_changes": false,
      "comments": []
    }"#;
    let result: CodeReviewResult = serde_json::from_str(json).unwrap();
    assert!(result.simulation.is_null());
    assert!(result.documentation_suggestions.is_empty());
    assert!(result.testing_suggestions.is_empty());
  }
}
