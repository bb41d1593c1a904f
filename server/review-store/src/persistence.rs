//! Persistence seam: a narrow versioned CRU interface the reconciliation
//! logic runs against, plus the in-memory backend used in tests and as the
//! default. The production ORM-backed implementation lives in the host
//! platform and satisfies the same contract.

use std::collections::HashMap;
use std::sync::RwLock;

use uuid::Uuid;

use crate::error::StoreError;
use crate::types::ReviewRecord;

/// A record snapshot with its storage version, for compare-and-swap updates.
#[derive(Debug, Clone)]
pub struct Versioned {
  pub record: ReviewRecord,
  pub version: u64,
}

/// Result of a conditional replace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplaceOutcome {
  Applied,
  /// The stored version moved past `expected_version` (or the record
  /// vanished); the caller must re-read and re-apply.
  Conflict,
}

/// ACID-capable record storage keyed by id and by `(project_id, pr_number)`.
///
/// `replace` must be atomic with respect to the version check: two writers
/// racing on the same record see exactly one `Applied`.
pub trait ReviewPersistence: Send + Sync {
  fn insert(&self, record: ReviewRecord) -> Result<(), StoreError>;
  fn fetch(&self, id: Uuid) -> Result<Option<Versioned>, StoreError>;
  fn fetch_by_pull(&self, project_id: Uuid, pr_number: u64)
    -> Result<Option<Versioned>, StoreError>;
  fn replace(&self, record: ReviewRecord, expected_version: u64)
    -> Result<ReplaceOutcome, StoreError>;
}

#[derive(Default)]
struct MemoryInner {
  records: HashMap<Uuid, Versioned>,
  by_pull: HashMap<(Uuid, u64), Uuid>,
}

/// In-memory backend: a `RwLock` over two maps. Version numbers start at 1
/// and bump on every applied replace.
#[derive(Default)]
pub struct MemoryPersistence {
  inner: RwLock<MemoryInner>,
}

impl MemoryPersistence {
  pub fn new() -> Self {
    Self::default()
  }
}

fn poisoned() -> StoreError {
  StoreError::Backend("memory store lock poisoned".to_string())
}

impl ReviewPersistence for MemoryPersistence {
  fn insert(&self, record: ReviewRecord) -> Result<(), StoreError> {
    let mut inner = self.inner.write().map_err(|_| poisoned())?;
    inner
      .by_pull
      .insert((record.project_id, record.pr_number), record.id);
    inner.records.insert(
      record.id,
      Versioned { record, version: 1 },
    );
    Ok(())
  }

  fn fetch(&self, id: Uuid) -> Result<Option<Versioned>, StoreError> {
    let inner = self.inner.read().map_err(|_| poisoned())?;
    Ok(inner.records.get(&id).cloned())
  }

  fn fetch_by_pull(
    &self,
    project_id: Uuid,
    pr_number: u64,
  ) -> Result<Option<Versioned>, StoreError> {
    let inner = self.inner.read().map_err(|_| poisoned())?;
    let id = match inner.by_pull.get(&(project_id, pr_number)) {
      Some(id) => *id,
      None => return Ok(None),
    };
    Ok(inner.records.get(&id).cloned())
  }

  fn replace(
    &self,
    record: ReviewRecord,
    expected_version: u64,
  ) -> Result<ReplaceOutcome, StoreError> {
    let mut inner = self.inner.write().map_err(|_| poisoned())?;
    match inner.records.get_mut(&record.id) {
      Some(stored) if stored.version == expected_version => {
        stored.record = record;
        stored.version += 1;
        Ok(ReplaceOutcome::Applied)
      }
      _ => Ok(ReplaceOutcome::Conflict),
    }
  }
}
