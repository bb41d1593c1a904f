//! The review store: save/update/mark-posted/query operations over the
//! persistence seam, with CAS-retry serialization of read-modify-write
//! sequences.

use std::collections::HashSet;

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::error::StoreError;
use crate::merge::merge_comments;
use crate::persistence::{MemoryPersistence, ReplaceOutcome, ReviewPersistence, Versioned};
use crate::types::{CodeReviewResult, CommentPosting, ReviewRecord};

/// Owns review-record lifecycle and all posted-state mutation. The scorer
/// and assembler never touch `posted_to_github` / `github_comment_id`.
pub struct ReviewStore<P: ReviewPersistence> {
  persistence: P,
}

impl ReviewStore<MemoryPersistence> {
  pub fn in_memory() -> Self {
    Self::new(MemoryPersistence::new())
  }
}

impl<P: ReviewPersistence> ReviewStore<P> {
  pub fn new(persistence: P) -> Self {
    Self { persistence }
  }

  /// First-time persistence of an assessment. Every comment starts unposted.
  pub fn save_review(
    &self,
    project_id: Uuid,
    pr_number: u64,
    result: CodeReviewResult,
  ) -> Result<ReviewRecord, StoreError> {
    let now = Utc::now();
    // Merging against an empty set normalizes duplicate draft coordinates
    // the same way updates do.
    let comments = merge_comments(&[], result.comments);
    let record = ReviewRecord {
      id: Uuid::new_v4(),
      project_id,
      pr_number,
      risk_level: result.risk.level,
      risk_score_numeric: result.risk.overall as f64,
      overall_score: result.overall_score,
      approved: result.approved,
      requires_changes: result.requires_changes,
      comments,
      simulation: result.simulation,
      documentation_suggestions: result.documentation_suggestions,
      testing_suggestions: result.testing_suggestions,
      created_at: now,
      updated_at: now,
    };
    self.persistence.insert(record.clone())?;
    debug!(
      review_id = %record.id,
      pr_number,
      comments = record.comments.len(),
      "saved review"
    );
    Ok(record)
  }

  /// Re-analysis of an already-stored PR: replace comments, risk fields and
  /// scores atomically, carrying posted state forward by coordinate.
  ///
  /// Serialized against concurrent updates of the same record: on a version
  /// conflict the merge is redone against the fresh state, so a racing
  /// `mark_comments_posted` is never lost.
  pub fn update_review(
    &self,
    review_id: Uuid,
    result: CodeReviewResult,
  ) -> Result<ReviewRecord, StoreError> {
    loop {
      let Versioned { record: existing, version } = self
        .persistence
        .fetch(review_id)?
        .ok_or(StoreError::NotFound { review_id })?;

      let comments = merge_comments(&existing.comments, result.comments.clone());
      let carried = comments.iter().filter(|c| c.posted_to_github).count();

      let updated = ReviewRecord {
        risk_level: result.risk.level,
        risk_score_numeric: result.risk.overall as f64,
        overall_score: result.overall_score,
        approved: result.approved,
        requires_changes: result.requires_changes,
        comments,
        simulation: result.simulation.clone(),
        documentation_suggestions: result.documentation_suggestions.clone(),
        testing_suggestions: result.testing_suggestions.clone(),
        updated_at: Utc::now(),
        ..existing
      };

      match self.persistence.replace(updated.clone(), version)? {
        ReplaceOutcome::Applied => {
          debug!(
            review_id = %review_id,
            comments = updated.comments.len(),
            carried_posted = carried,
            "updated review"
          );
          return Ok(updated);
        }
        ReplaceOutcome::Conflict => continue,
      }
    }
  }

  /// Update the live record for `(project_id, pr_number)`, or create one if
  /// this is the first analysis of the PR.
  pub fn save_or_update(
    &self,
    project_id: Uuid,
    pr_number: u64,
    result: CodeReviewResult,
  ) -> Result<ReviewRecord, StoreError> {
    match self.persistence.fetch_by_pull(project_id, pr_number)? {
      Some(existing) => self.update_review(existing.record.id, result),
      None => self.save_review(project_id, pr_number, result),
    }
  }

  /// Record a batch of successful GitHub postings. Returns how many stored
  /// comments were updated.
  ///
  /// A posting whose coordinate is no longer stored (dropped by a later
  /// `update_review`) is a silent no-op, not an error. Empty input returns 0
  /// without touching the backend.
  pub fn mark_comments_posted(
    &self,
    review_id: Uuid,
    postings: &[CommentPosting],
  ) -> Result<usize, StoreError> {
    if postings.is_empty() {
      return Ok(0);
    }

    loop {
      let Versioned { record: mut record, version } = self
        .persistence
        .fetch(review_id)?
        .ok_or(StoreError::NotFound { review_id })?;

      let mut updated = 0;
      for posting in postings {
        let hit = record.comments.iter_mut().find(|c| {
          c.file_path == posting.file_path && c.line_number == posting.line_number
        });
        if let Some(comment) = hit {
          comment.posted_to_github = true;
          comment.github_comment_id = Some(posting.github_comment_id);
          updated += 1;
        }
      }

      if updated == 0 {
        // Nothing matched; don't issue a write.
        return Ok(0);
      }

      record.updated_at = Utc::now();
      match self.persistence.replace(record, version)? {
        ReplaceOutcome::Applied => {
          debug!(review_id = %review_id, updated, "marked comments posted");
          return Ok(updated);
        }
        ReplaceOutcome::Conflict => continue,
      }
    }
  }

  /// Coordinates (`"file:line"`) already posted for a PR, for the posting
  /// collaborator's duplicate filter. Missing record or no comments yields
  /// an empty set, never an error.
  pub fn posted_inline_coordinates(
    &self,
    project_id: Uuid,
    pr_number: u64,
  ) -> Result<HashSet<String>, StoreError> {
    let versioned = match self.persistence.fetch_by_pull(project_id, pr_number)? {
      Some(v) => v,
      None => return Ok(HashSet::new()),
    };
    Ok(
      versioned
        .record
        .comments
        .iter()
        .filter(|c| c.posted_to_github)
        .map(|c| c.coordinate())
        .collect(),
    )
  }

  /// Fetch a record by id (read-only convenience for callers and tests).
  pub fn get_review(&self, review_id: Uuid) -> Result<Option<ReviewRecord>, StoreError> {
    Ok(self.persistence.fetch(review_id)?.map(|v| v.record))
  }
}
