//! Rule-weights configuration and the three built-in presets.
//!
//! Presets are plain values of one config shape, not scorer subtypes; the
//! scorer takes whichever value the caller supplies.

use serde::{Deserialize, Serialize};

/// Per-factor weights. Each expected in [0, 1]; the scorer normalizes by the
/// sum of weights actually used, so only the ratios matter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactorWeights {
  pub change_size: f64,
  pub file_count: f64,
  pub critical_files: f64,
  pub complexity: f64,
  pub test_coverage: f64,
}

/// Per-severity penalties applied by the review assembler when it folds
/// comment severity into the overall review score. Strictly descending
/// positive numbers. Not interpreted by the scorer itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeverityPenalties {
  pub critical: f64,
  pub high: f64,
  pub medium: f64,
  pub low: f64,
  pub info: f64,
}

/// Line-count boundaries for the change-size bands. Strictly ascending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeSizeThresholds {
  pub small: u32,
  pub medium: u32,
  pub large: u32,
  pub very_large: u32,
}

/// File-count boundaries for the file-count bands. Strictly ascending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileCountThresholds {
  pub few: u32,
  pub moderate: u32,
  pub many: u32,
}

/// Full rule-weights configuration, supplied per invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleWeightsConfig {
  pub risk_factor_weights: RiskFactorWeights,
  pub severity_penalties: SeverityPenalties,
  pub change_size_thresholds: ChangeSizeThresholds,
  pub file_count_thresholds: FileCountThresholds,
}

impl RuleWeightsConfig {
  /// The default preset. Critical-path changes carry the largest weight —
  /// a small diff touching auth or payments should out-rank a large diff in
  /// application code.
  pub fn balanced() -> Self {
    Self {
      risk_factor_weights: RiskFactorWeights {
        change_size: 0.20,
        file_count: 0.15,
        critical_files: 0.30,
        complexity: 0.20,
        test_coverage: 0.15,
      },
      severity_penalties: SeverityPenalties {
        critical: 25.0,
        high: 15.0,
        medium: 8.0,
        low: 3.0,
        info: 1.0,
      },
      change_size_thresholds: ChangeSizeThresholds {
        small: 50,
        medium: 200,
        large: 500,
        very_large: 1000,
      },
      file_count_thresholds: FileCountThresholds {
        few: 3,
        moderate: 10,
        many: 20,
      },
    }
  }

  /// Lower thresholds, heavier critical-file weight and penalties.
  pub fn strict() -> Self {
    Self {
      risk_factor_weights: RiskFactorWeights {
        change_size: 0.20,
        file_count: 0.15,
        critical_files: 0.35,
        complexity: 0.15,
        test_coverage: 0.15,
      },
      severity_penalties: SeverityPenalties {
        critical: 30.0,
        high: 20.0,
        medium: 10.0,
        low: 5.0,
        info: 2.0,
      },
      change_size_thresholds: ChangeSizeThresholds {
        small: 30,
        medium: 120,
        large: 300,
        very_large: 600,
      },
      file_count_thresholds: FileCountThresholds {
        few: 2,
        moderate: 6,
        many: 12,
      },
    }
  }

  /// Higher thresholds, lighter weights and penalties.
  pub fn lenient() -> Self {
    Self {
      risk_factor_weights: RiskFactorWeights {
        change_size: 0.20,
        file_count: 0.10,
        critical_files: 0.25,
        complexity: 0.15,
        test_coverage: 0.10,
      },
      severity_penalties: SeverityPenalties {
        critical: 20.0,
        high: 12.0,
        medium: 6.0,
        low: 2.0,
        info: 0.5,
      },
      change_size_thresholds: ChangeSizeThresholds {
        small: 80,
        medium: 300,
        large: 800,
        very_large: 1600,
      },
      file_count_thresholds: FileCountThresholds {
        few: 5,
        moderate: 15,
        many: 30,
      },
    }
  }

  /// Look up a preset by name (case-insensitive). Used at the binary boundary.
  pub fn preset(name: &str) -> Option<Self> {
    match name.to_ascii_lowercase().as_str() {
      "balanced" => Some(Self::balanced()),
      "strict" => Some(Self::strict()),
      "lenient" => Some(Self::lenient()),
      _ => None,
    }
  }
}

impl Default for RuleWeightsConfig {
  fn default() -> Self {
    Self::balanced()
  }
}
