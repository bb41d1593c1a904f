//! PR Risk Scorer — deterministic, rule-based (V1).
//!
//! Scores a normalized PR diff on five dimensions (change size, file count,
//! critical-path touch, structural complexity, test-to-code ratio), combines
//! them into a weighted overall score and discrete level, and carries the
//! rule-weights presets (balanced/strict/lenient) plus their validation.
//!
//! No AI, no DB, no network; pure computation.

pub mod config;
pub mod error;
pub mod factors;
pub mod score;
pub mod types;
pub mod validate;

pub use config::RuleWeightsConfig;
pub use error::ScorerError;
pub use score::calculate_risk;
pub use types::{
  DiffSummary, FileChange, FileStatus, ImpactLevel, RiskFactor, RiskScore, Severity,
};
pub use validate::{validate_rule_weights, ValidationReport};
