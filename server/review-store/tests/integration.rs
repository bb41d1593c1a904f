//! Integration tests for the review store reconciliation protocol.

use std::sync::Arc;
use std::thread;

use review_store::{
  CodeReviewResult, CommentDraft, CommentPosting, MemoryPersistence, ReviewStore, StoreError,
};
use risk_scorer::{calculate_risk, DiffSummary, FileChange, FileStatus, RuleWeightsConfig, Severity};
use uuid::Uuid;

fn draft(path: &str, line: u32, message: &str) -> CommentDraft {
  CommentDraft {
    file_path: path.into(),
    line_number: line,
    severity: Severity::Medium,
    category: "correctness".into(),
    message: message.into(),
    suggestion: None,
    code_snippet: None,
  }
}

fn result_with(comments: Vec<CommentDraft>) -> CodeReviewResult {
  let diff = DiffSummary::from_files(vec![FileChange {
    path: "src/lib/feature.ts".into(),
    status: FileStatus::Modified,
    additions: 40,
    deletions: 5,
    patch_text: None,
  }]);
  let risk = calculate_risk(&diff, &RuleWeightsConfig::balanced());
  CodeReviewResult {
    risk,
    overall_score: 70,
    approved: false,
    requires_changes: true,
    comments,
    simulation: serde_json::json!({"impacted_routes": ["/checkout"]}),
    documentation_suggestions: vec!["Document the new export format".into()],
    testing_suggestions: vec!["Add a regression test for empty input".into()],
  }
}

#[test]
fn save_starts_all_comments_unposted() {
  let store = ReviewStore::in_memory();
  let record = store
    .save_review(
      Uuid::new_v4(),
      7,
      result_with(vec![draft("src/a.ts", 10, "check bounds"), draft("src/b.ts", 3, "typo")]),
    )
    .unwrap();

  assert_eq!(record.pr_number, 7);
  assert_eq!(record.comments.len(), 2);
  assert!(record.comments.iter().all(|c| !c.posted_to_github));
  assert!(record.comments.iter().all(|c| c.github_comment_id.is_none()));
  assert_eq!(record.created_at, record.updated_at);
  assert_eq!(record.simulation["impacted_routes"][0], "/checkout");
}

#[test]
fn update_preserves_posted_state_at_matching_coordinates() {
  let store = ReviewStore::in_memory();
  let project = Uuid::new_v4();
  let record = store
    .save_review(project, 12, result_with(vec![draft("src/a.ts", 10, "check bounds")]))
    .unwrap();

  store
    .mark_comments_posted(
      record.id,
      &[CommentPosting {
        file_path: "src/a.ts".into(),
        line_number: 10,
        github_comment_id: 111,
      }],
    )
    .unwrap();

  // Re-analysis: same coordinate with new wording, plus a new finding.
  let updated = store
    .update_review(
      record.id,
      result_with(vec![
        draft("src/a.ts", 10, "bounds check still missing"),
        draft("src/b.ts", 3, "new finding"),
      ]),
    )
    .unwrap();

  assert_eq!(updated.id, record.id);
  assert_eq!(updated.comments.len(), 2);
  let kept = &updated.comments[0];
  assert!(kept.posted_to_github);
  assert_eq!(kept.github_comment_id, Some(111));
  assert_eq!(kept.message, "bounds check still missing");
  assert!(!updated.comments[1].posted_to_github);
  assert!(updated.updated_at >= updated.created_at);
}

#[test]
fn repeated_identical_updates_never_reset_posted_state() {
  let store = ReviewStore::in_memory();
  let record = store
    .save_review(Uuid::new_v4(), 3, result_with(vec![draft("src/a.ts", 10, "finding")]))
    .unwrap();
  store
    .mark_comments_posted(
      record.id,
      &[CommentPosting {
        file_path: "src/a.ts".into(),
        line_number: 10,
        github_comment_id: 500,
      }],
    )
    .unwrap();

  // Five pushes with identical findings: no state loss, no duplicate rows.
  for _ in 0..5 {
    let updated = store
      .update_review(record.id, result_with(vec![draft("src/a.ts", 10, "finding")]))
      .unwrap();
    assert_eq!(updated.comments.len(), 1);
    assert!(updated.comments[0].posted_to_github);
    assert_eq!(updated.comments[0].github_comment_id, Some(500));
  }
}

#[test]
fn posted_coordinate_query_round_trip() {
  let store = ReviewStore::in_memory();
  let project = Uuid::new_v4();
  let record = store
    .save_review(
      project,
      9,
      result_with(vec![draft("src/x.ts", 5, "posted one"), draft("src/y.ts", 8, "unposted one")]),
    )
    .unwrap();

  let updated = store
    .mark_comments_posted(
      record.id,
      &[CommentPosting {
        file_path: "src/x.ts".into(),
        line_number: 5,
        github_comment_id: 999,
      }],
    )
    .unwrap();
  assert_eq!(updated, 1);

  let coords = store.posted_inline_coordinates(project, 9).unwrap();
  assert_eq!(coords.len(), 1);
  assert!(coords.contains("src/x.ts:5"));
}

#[test]
fn posted_coordinates_for_unknown_pr_is_empty() {
  let store = ReviewStore::in_memory();
  let coords = store.posted_inline_coordinates(Uuid::new_v4(), 1).unwrap();
  assert!(coords.is_empty());
}

#[test]
fn empty_postings_are_a_no_op_even_for_unknown_ids() {
  let store = ReviewStore::in_memory();
  // Empty input short-circuits before the id is ever looked up.
  let updated = store.mark_comments_posted(Uuid::new_v4(), &[]).unwrap();
  assert_eq!(updated, 0);
}

#[test]
fn posting_for_dropped_coordinate_is_silently_ignored() {
  let store = ReviewStore::in_memory();
  let record = store
    .save_review(Uuid::new_v4(), 4, result_with(vec![draft("src/a.ts", 10, "finding")]))
    .unwrap();

  // A re-analysis drops the coordinate before the posting callback lands.
  store
    .update_review(record.id, result_with(vec![draft("src/other.ts", 2, "different")]))
    .unwrap();

  let updated = store
    .mark_comments_posted(
      record.id,
      &[CommentPosting {
        file_path: "src/a.ts".into(),
        line_number: 10,
        github_comment_id: 777,
      }],
    )
    .unwrap();
  assert_eq!(updated, 0);

  let stored = store.get_review(record.id).unwrap().unwrap();
  assert!(stored.comments.iter().all(|c| !c.posted_to_github));
}

#[test]
fn unknown_review_id_is_not_found() {
  let store = ReviewStore::in_memory();
  let missing = Uuid::new_v4();

  let err = store
    .update_review(missing, result_with(vec![]))
    .unwrap_err();
  assert!(matches!(err, StoreError::NotFound { review_id } if review_id == missing));

  let err = store
    .mark_comments_posted(
      missing,
      &[CommentPosting {
        file_path: "src/a.ts".into(),
        line_number: 1,
        github_comment_id: 1,
      }],
    )
    .unwrap_err();
  assert!(matches!(err, StoreError::NotFound { .. }));
}

#[test]
fn save_or_update_reuses_the_live_record() {
  let store = ReviewStore::in_memory();
  let project = Uuid::new_v4();

  let first = store
    .save_or_update(project, 21, result_with(vec![draft("src/a.ts", 10, "v1")]))
    .unwrap();
  let second = store
    .save_or_update(project, 21, result_with(vec![draft("src/a.ts", 10, "v2")]))
    .unwrap();

  assert_eq!(first.id, second.id);
  assert_eq!(second.comments[0].message, "v2");

  // A different PR in the same project gets its own record.
  let other = store
    .save_or_update(project, 22, result_with(vec![]))
    .unwrap();
  assert_ne!(other.id, first.id);
}

#[test]
fn concurrent_updates_never_drop_posted_state() {
  let store = Arc::new(ReviewStore::<MemoryPersistence>::in_memory());
  let record = store
    .save_review(
      Uuid::new_v4(),
      5,
      result_with(vec![draft("src/a.ts", 10, "finding"), draft("src/b.ts", 2, "other")]),
    )
    .unwrap();
  store
    .mark_comments_posted(
      record.id,
      &[CommentPosting {
        file_path: "src/a.ts".into(),
        line_number: 10,
        github_comment_id: 321,
      }],
    )
    .unwrap();

  let review_id = record.id;
  let mut handles = Vec::new();
  for _ in 0..4 {
    let store = Arc::clone(&store);
    handles.push(thread::spawn(move || {
      for _ in 0..50 {
        store
          .update_review(
            review_id,
            result_with(vec![draft("src/a.ts", 10, "finding"), draft("src/b.ts", 2, "other")]),
          )
          .unwrap();
      }
    }));
  }
  // One more thread racing mark_comments_posted on the second coordinate.
  {
    let store = Arc::clone(&store);
    handles.push(thread::spawn(move || {
      store
        .mark_comments_posted(
          review_id,
          &[CommentPosting {
            file_path: "src/b.ts".into(),
            line_number: 2,
            github_comment_id: 654,
          }],
        )
        .unwrap();
    }));
  }
  for handle in handles {
    handle.join().unwrap();
  }

  let stored = store.get_review(review_id).unwrap().unwrap();
  let at = |path: &str| {
    stored
      .comments
      .iter()
      .find(|c| c.file_path == path)
      .unwrap()
  };
  // The coordinate posted before the race keeps its state no matter how the
  // updates interleave; the one posted mid-race keeps it too, because every
  // update re-merges against the freshest stored state.
  assert!(at("src/a.ts").posted_to_github);
  assert_eq!(at("src/a.ts").github_comment_id, Some(321));
  assert!(at("src/b.ts").posted_to_github);
  assert_eq!(at("src/b.ts").github_comment_id, Some(654));
}
