//! Pure comment reconciliation: merge a fresh analysis into previously
//! stored posted state, keyed by `(file_path, line_number)`.

use std::collections::HashMap;

use crate::types::{Comment, CommentDraft};

/// Replace the stored comment set with `drafts`, carrying posted state
/// forward by coordinate.
///
/// - A draft at a coordinate seen in `old` inherits `posted_to_github` and
///   `github_comment_id` from the old comment.
/// - A draft at a new coordinate starts unposted.
/// - Old coordinates absent from `drafts` are dropped. If such a comment was
///   already posted, the GitHub-side comment is orphaned — deletion is a
///   collaborator concern and no call is issued here. A coordinate dropped
///   and reintroduced by a still-later analysis starts unposted again,
///   because reconciliation reads only the immediately prior stored state.
/// - Duplicate coordinates within `drafts` collapse to one comment; the
///   later draft wins, keeping the first occurrence's position.
pub fn merge_comments(old: &[Comment], drafts: Vec<CommentDraft>) -> Vec<Comment> {
  let posted: HashMap<(&str, u32), (bool, Option<u64>)> = old
    .iter()
    .map(|c| {
      (
        (c.file_path.as_str(), c.line_number),
        (c.posted_to_github, c.github_comment_id),
      )
    })
    .collect();

  let mut merged: Vec<Comment> = Vec::with_capacity(drafts.len());
  let mut index: HashMap<(String, u32), usize> = HashMap::new();

  for draft in drafts {
    let (posted_to_github, github_comment_id) = posted
      .get(&(draft.file_path.as_str(), draft.line_number))
      .copied()
      .unwrap_or((false, None));
    let key = (draft.file_path.clone(), draft.line_number);
    let comment = draft.into_comment(posted_to_github, github_comment_id);

    match index.get(&key) {
      Some(&slot) => merged[slot] = comment,
      None => {
        index.insert(key, merged.len());
        merged.push(comment);
      }
    }
  }

  merged
}
