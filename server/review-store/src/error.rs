//! Structured error types for the review store.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StoreError {
  #[error("review {review_id} not found")]
  NotFound { review_id: Uuid },

  /// Persistence-layer failure, surfaced unmodified. The store never retries
  /// these; callers own retry policy.
  #[error("backend: {0}")]
  Backend(String),
}
