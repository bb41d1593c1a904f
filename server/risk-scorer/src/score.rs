//! Combine the five factor scores into one weighted risk assessment.

use crate::config::RuleWeightsConfig;
use crate::factors;
use crate::types::{DiffSummary, ImpactLevel, RiskFactor, RiskScore};

/// Score a diff against a rule-weights configuration.
///
/// Pure and infallible: no I/O, deterministic for a given `(diff, config)`
/// pair. Callers that accept untrusted configs should run
/// `validate_rule_weights` first; this function trusts its input.
pub fn calculate_risk(diff: &DiffSummary, config: &RuleWeightsConfig) -> RiskScore {
  let factors = vec![
    factors::change_size_factor(diff, config),
    factors::file_count_factor(diff, config),
    factors::critical_files_factor(diff, config),
    factors::complexity_factor(diff, config),
    factors::test_coverage_factor(diff, config),
  ];

  let overall = weighted_overall(&factors);
  let level = ImpactLevel::for_score(overall);
  let summary = summarize(&factors);

  RiskScore {
    overall,
    level,
    factors,
    summary,
  }
}

/// Weighted mean of factor scores, normalized by the sum of weights actually
/// used. A zero weight sum degrades to 0 rather than dividing by zero.
fn weighted_overall(factors: &[RiskFactor]) -> u8 {
  let weight_sum: f64 = factors.iter().map(|f| f.weight).sum();
  if weight_sum <= 0.0 {
    return 0;
  }
  let weighted: f64 = factors.iter().map(|f| f.score as f64 * f.weight).sum();
  (weighted / weight_sum).round().clamp(0.0, 100.0) as u8
}

/// Digest of the factors that drive the assessment (impact high or critical).
fn summarize(factors: &[RiskFactor]) -> String {
  let drivers: Vec<&str> = factors
    .iter()
    .filter(|f| f.impact_level >= ImpactLevel::High)
    .map(|f| f.name.as_str())
    .collect();

  match drivers.len() {
    0 => "Low-risk change overall; no high-impact risk factors detected.".to_string(),
    1 => format!("Primary risk driver: {}.", drivers[0]),
    _ => format!("High-impact risk factors: {}.", drivers.join(", ")),
  }
}
