//! The five risk factor evaluators. Each is a pure function from the diff
//! (plus config) to one `RiskFactor`; pathological inputs degrade to the
//! lowest band instead of failing.

use crate::config::RuleWeightsConfig;
use crate::types::{DiffSummary, FileChange, FileStatus, ImpactLevel, RiskFactor};

pub const CHANGE_SIZE: &str = "change size";
pub const FILE_COUNT: &str = "file count";
pub const CRITICAL_FILES: &str = "critical files";
pub const COMPLEXITY: &str = "complexity";
pub const TEST_COVERAGE: &str = "test coverage";

/// Churn-based factor: total added + deleted lines against the configured bands.
pub fn change_size_factor(diff: &DiffSummary, config: &RuleWeightsConfig) -> RiskFactor {
  let total = diff.total_changes();
  let t = &config.change_size_thresholds;
  let (score, impact_level) = if total < t.small {
    (10, ImpactLevel::Low)
  } else if total < t.medium {
    (30, ImpactLevel::Low)
  } else if total < t.large {
    (60, ImpactLevel::Medium)
  } else if total < t.very_large {
    (80, ImpactLevel::High)
  } else {
    (95, ImpactLevel::Critical)
  };

  RiskFactor {
    name: CHANGE_SIZE.to_string(),
    score,
    weight: config.risk_factor_weights.change_size,
    impact_level,
    description: format!(
      "{} lines changed ({} additions, {} deletions)",
      total, diff.total_additions, diff.total_deletions
    ),
  }
}

/// Breadth factor: number of files touched.
pub fn file_count_factor(diff: &DiffSummary, config: &RuleWeightsConfig) -> RiskFactor {
  let count = diff.files_changed.len() as u32;
  let t = &config.file_count_thresholds;
  let (score, impact_level) = if count <= t.few {
    (10, ImpactLevel::Low)
  } else if count <= t.moderate {
    (40, ImpactLevel::Medium)
  } else if count <= t.many {
    (70, ImpactLevel::High)
  } else {
    (90, ImpactLevel::Critical)
  };

  RiskFactor {
    name: FILE_COUNT.to_string(),
    score,
    weight: config.risk_factor_weights.file_count,
    impact_level,
    description: format!("{} files changed", count),
  }
}

/// True when the path sits in a sensitive area (auth, payments, schema, ...).
pub fn is_critical_path(path: &str) -> bool {
  let p = path.to_lowercase();
  p.contains("auth")
    || p.contains("security")
    || p.contains("payment")
    || p.contains("billing")
    || p.contains("database")
    || p.contains("/db/")
    || p.contains("migration")
    || p.contains("schema")
    || p.contains("/api/")
    || p.contains("route")
    || p.contains("middleware")
    || p.contains("config")
    || p.contains(".env")
}

/// Sensitive-path factor: how many changed files sit on critical paths.
pub fn critical_files_factor(diff: &DiffSummary, config: &RuleWeightsConfig) -> RiskFactor {
  let matched: Vec<&str> = diff
    .files_changed
    .iter()
    .filter(|f| is_critical_path(&f.path))
    .map(|f| f.path.as_str())
    .collect();

  let (score, impact_level) = match matched.len() {
    0 => (5, ImpactLevel::Low),
    1 => (50, ImpactLevel::Medium),
    2 => (75, ImpactLevel::High),
    _ => (95, ImpactLevel::Critical),
  };

  let description = if matched.is_empty() {
    "No critical-path files touched".to_string()
  } else {
    format!("Critical-path files touched: {}", matched.join(", "))
  };

  RiskFactor {
    name: CRITICAL_FILES.to_string(),
    score,
    weight: config.risk_factor_weights.critical_files,
    impact_level,
    description,
  }
}

/// Structural factor: removals, renames, very large per-file churn, and
/// mixed change kinds. Additive, capped at 100.
pub fn complexity_factor(diff: &DiffSummary, config: &RuleWeightsConfig) -> RiskFactor {
  let files = &diff.files_changed;
  let mut score: u32 = 0;
  let mut reasons: Vec<String> = Vec::new();

  if files.iter().any(|f| f.status == FileStatus::Removed) {
    score += 30;
    reasons.push("file removals".to_string());
  }
  if files.iter().any(|f| f.status == FileStatus::Renamed) {
    score += 20;
    reasons.push("file renames".to_string());
  }

  let large_files = files.iter().filter(|f| f.changes() > 200).count() as u32;
  if large_files > 0 {
    score += (large_files * 10).min(30);
    reasons.push(format!("{} file(s) with >200 lines changed", large_files));
  }

  let has_added = files.iter().any(|f| f.status == FileStatus::Added);
  let has_modified = files.iter().any(|f| f.status == FileStatus::Modified);
  let has_removed = files.iter().any(|f| f.status == FileStatus::Removed);
  if has_added && has_modified && has_removed {
    score += 20;
    reasons.push("mixed additions, modifications and deletions".to_string());
  }

  let score = score.min(100) as u8;
  let description = if reasons.is_empty() {
    "No structural complexity signals".to_string()
  } else {
    format!("Structural signals: {}", reasons.join("; "))
  };

  RiskFactor {
    name: COMPLEXITY.to_string(),
    score,
    weight: config.risk_factor_weights.complexity,
    impact_level: ImpactLevel::for_score(score),
    description,
  }
}

/// True for test files: `*.test.*`, `*.spec.*`, or a `__tests__` directory.
pub fn is_test_path(path: &str) -> bool {
  let p = path.to_lowercase();
  p.contains(".test.") || p.contains(".spec.") || p.contains("__tests__/")
}

/// Test-ratio factor: added test lines relative to added code lines.
pub fn test_coverage_factor(diff: &DiffSummary, config: &RuleWeightsConfig) -> RiskFactor {
  let live = |f: &&FileChange| f.status != FileStatus::Removed;
  let test_additions: u32 = diff
    .files_changed
    .iter()
    .filter(live)
    .filter(|f| is_test_path(&f.path))
    .map(|f| f.additions)
    .sum();
  let code_additions: u32 = diff
    .files_changed
    .iter()
    .filter(live)
    .filter(|f| !is_test_path(&f.path))
    .map(|f| f.additions)
    .sum();

  let (score, impact_level, description) = if code_additions == 0 {
    (0, ImpactLevel::Low, "No code additions to cover".to_string())
  } else {
    let ratio = test_additions as f64 / code_additions as f64;
    let (score, impact_level) = if ratio >= 0.5 {
      (10, ImpactLevel::Low)
    } else if ratio >= 0.2 {
      (40, ImpactLevel::Medium)
    } else if ratio > 0.0 {
      (70, ImpactLevel::High)
    } else {
      (90, ImpactLevel::Critical)
    };
    (
      score,
      impact_level,
      format!(
        "Test-to-code addition ratio {:.2} ({} test lines / {} code lines)",
        ratio, test_additions, code_additions
      ),
    )
  };

  RiskFactor {
    name: TEST_COVERAGE.to_string(),
    score,
    weight: config.risk_factor_weights.test_coverage,
    impact_level,
    description,
  }
}
