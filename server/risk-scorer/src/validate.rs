//! Opt-in validation for caller-supplied rule weights.
//!
//! The scorer itself never validates; callers run this once per configuration
//! (not per PR) before handing a config to `calculate_risk`.
//!
//! Severity penalties are intentionally not checked here — they belong to the
//! review assembler, which tolerates any positive values.

use crate::config::RuleWeightsConfig;
use crate::error::ScorerError;

/// Outcome of validating a `RuleWeightsConfig`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
  pub valid: bool,
  pub errors: Vec<String>,
}

impl ValidationReport {
  /// Convert to a hard failure for callers that refuse malformed configs.
  pub fn into_result(self) -> Result<(), ScorerError> {
    if self.valid {
      Ok(())
    } else {
      Err(ScorerError::validation(
        "rule_weights",
        &self.errors.join("; "),
      ))
    }
  }
}

/// Check weights and threshold ordering. Collects every problem rather than
/// stopping at the first.
pub fn validate_rule_weights(config: &RuleWeightsConfig) -> ValidationReport {
  let mut errors = Vec::new();

  let w = &config.risk_factor_weights;
  for (field, value) in [
    ("risk_factor_weights.change_size", w.change_size),
    ("risk_factor_weights.file_count", w.file_count),
    ("risk_factor_weights.critical_files", w.critical_files),
    ("risk_factor_weights.complexity", w.complexity),
    ("risk_factor_weights.test_coverage", w.test_coverage),
  ] {
    if !(0.0..=1.0).contains(&value) || value.is_nan() {
      errors.push(format!(
        "{} must be between 0.0 and 1.0 (got {})",
        field, value
      ));
    }
  }

  let t = &config.change_size_thresholds;
  if !(t.small < t.medium && t.medium < t.large && t.large < t.very_large) {
    errors.push(
      "change_size_thresholds must be in strictly ascending order \
       (small < medium < large < very_large)"
        .to_string(),
    );
  }

  let f = &config.file_count_thresholds;
  if !(f.few < f.moderate && f.moderate < f.many) {
    errors.push(
      "file_count_thresholds must be in strictly ascending order (few < moderate < many)"
        .to_string(),
    );
  }

  ValidationReport {
    valid: errors.is_empty(),
    errors,
  }
}
