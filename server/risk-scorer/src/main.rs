//! Binary entrypoint: read one JSON request from stdin, write one JSON
//! response to stdout.
//!
//! Request shape:
//!   { "diff": DiffSummary, "preset": "balanced"|"strict"|"lenient"?, "weights": RuleWeightsConfig? }
//!
//! Explicit `weights` override `preset` and are validated first; presets are
//! trusted. Output is a RiskScore object, or an ErrorOutput object with exit
//! code 1 when the request is malformed.

use risk_scorer::types::ErrorOutput;
use risk_scorer::{calculate_risk, validate_rule_weights, DiffSummary, RuleWeightsConfig};
use serde::Deserialize;
use std::io::{self, Read, Write};

#[derive(Debug, Deserialize)]
struct AnalyzeRequest {
  diff: DiffSummary,
  #[serde(default)]
  preset: Option<String>,
  #[serde(default)]
  weights: Option<RuleWeightsConfig>,
}

fn main() {
  if let Err(err) = run_binary() {
    let _ = serde_json::to_writer(io::stdout().lock(), &err);
    let _ = writeln!(io::stdout());
    std::process::exit(1);
  }
}

fn run_binary() -> Result<(), ErrorOutput> {
  let mut raw = String::new();
  io::stdin()
    .lock()
    .read_to_string(&mut raw)
    .map_err(|e| ErrorOutput::new(format!("read: {}", e)))?;

  let request: AnalyzeRequest = serde_json::from_str(&raw)
    .map_err(|e| ErrorOutput::new(format!("json parse: {}", e)))?;

  let config = resolve_config(&request)?;
  let score = calculate_risk(&request.diff, &config);

  let out = io::stdout();
  let mut out = out.lock();
  serde_json::to_writer(&mut out, &score)
    .map_err(|e| ErrorOutput::new(format!("json write: {}", e)))?;
  let _ = writeln!(out);
  Ok(())
}

fn resolve_config(request: &AnalyzeRequest) -> Result<RuleWeightsConfig, ErrorOutput> {
  if let Some(weights) = &request.weights {
    let report = validate_rule_weights(weights);
    if !report.valid {
      return Err(ErrorOutput::new(report.errors.join("; ")).with_field("weights"));
    }
    return Ok(weights.clone());
  }
  match &request.preset {
    Some(name) => RuleWeightsConfig::preset(name)
      .ok_or_else(|| ErrorOutput::new(format!("unknown preset: {}", name)).with_field("preset")),
    None => Ok(RuleWeightsConfig::default()),
  }
}
