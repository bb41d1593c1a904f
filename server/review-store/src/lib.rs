//! PR Review Store — reconciliation of repeated PR analyses.
//!
//! A PR is re-analyzed on every push. This crate persists one review record
//! per `(project_id, pr_number)` and merges each new analysis with the prior
//! stored state so that inline comments already posted to GitHub keep their
//! posted flag and comment id, while new findings start unposted.
//!
//! Persistence is behind the `ReviewPersistence` trait; `MemoryPersistence`
//! ships in-crate. No network; GitHub posting happens in the caller.

pub mod error;
pub mod merge;
pub mod persistence;
pub mod store;
pub mod types;

pub use error::StoreError;
pub use merge::merge_comments;
pub use persistence::{MemoryPersistence, ReplaceOutcome, ReviewPersistence, Versioned};
pub use store::ReviewStore;
pub use types::{Comment, CommentDraft, CommentPosting, CodeReviewResult, ReviewRecord};
