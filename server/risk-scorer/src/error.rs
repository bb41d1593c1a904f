//! Structured error types for the risk scorer boundary.
//!
//! Scoring itself is infallible; these cover config validation and the
//! JSON contract at the binary edge.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScorerError {
  #[error("validation: {field}: {reason}")]
  Validation { field: String, reason: String },

  #[error("json: {0}")]
  Json(#[from] serde_json::Error),
}

impl ScorerError {
  pub fn validation(field: &str, reason: &str) -> Self {
    Self::Validation {
      field: field.to_string(),
      reason: reason.to_string(),
    }
  }
}
