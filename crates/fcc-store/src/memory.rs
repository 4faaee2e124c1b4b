//! In-memory storage backend using DashMap.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;

use fcc_core::{AssessmentId, UserId};
use fcc_engine::AssessmentSubmission;

use crate::{AssessmentStore, StoreError, StoredAssessment};

struct Entry {
    record: StoredAssessment,
    /// Insertion order; breaks ties between records created in the same instant.
    seq: u64,
}

struct Inner {
    assessments: DashMap<AssessmentId, Entry>,
    next_seq: AtomicU64,
}

/// `DashMap`-backed [`AssessmentStore`].
///
/// Cheaply cloneable via `Arc`; all clones share the same data.
#[derive(Clone)]
pub struct InMemoryAssessmentStore {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for InMemoryAssessmentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryAssessmentStore")
            .field("len", &self.inner.assessments.len())
            .finish()
    }
}

impl Default for InMemoryAssessmentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryAssessmentStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                assessments: DashMap::new(),
                next_seq: AtomicU64::new(0),
            }),
        }
    }

    /// Total number of records across all users.
    pub fn len(&self) -> usize {
        self.inner.assessments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.assessments.is_empty()
    }
}

impl AssessmentStore for InMemoryAssessmentStore {
    fn create(
        &self,
        user: UserId,
        submission: AssessmentSubmission,
    ) -> Result<StoredAssessment, StoreError> {
        let record = StoredAssessment {
            id: AssessmentId::new(),
            user_id: user,
            product_category: submission.product_category,
            answers: submission.answers,
            score: submission.score,
            status: submission.status,
            created_at: Utc::now(),
        };
        let seq = self.inner.next_seq.fetch_add(1, Ordering::Relaxed);
        self.inner.assessments.insert(
            record.id,
            Entry {
                record: record.clone(),
                seq,
            },
        );
        tracing::info!(id = %record.id, user = %user, score = record.score, "assessment stored");
        Ok(record)
    }

    fn get(&self, user: UserId, id: AssessmentId) -> Result<StoredAssessment, StoreError> {
        let entry = self
            .inner
            .assessments
            .get(&id)
            .ok_or(StoreError::NotFound(id))?;
        if entry.record.user_id != user {
            tracing::warn!(id = %id, user = %user, "access to another user's assessment denied");
            return Err(StoreError::AccessDenied { id, user });
        }
        Ok(entry.record.clone())
    }

    fn list_for_user(&self, user: UserId) -> Result<Vec<StoredAssessment>, StoreError> {
        let mut entries: Vec<(chrono::DateTime<Utc>, u64, StoredAssessment)> = self
            .inner
            .assessments
            .iter()
            .filter(|e| e.record.user_id == user)
            .map(|e| (e.record.created_at, e.seq, e.record.clone()))
            .collect();
        entries.sort_by(|a, b| (b.0, b.1).cmp(&(a.0, a.1)));
        Ok(entries.into_iter().map(|(_, _, r)| r).collect())
    }

    fn delete(&self, user: UserId, id: AssessmentId) -> Result<(), StoreError> {
        self.inner
            .assessments
            .remove_if(&id, |_, e| e.record.user_id == user)
            .map(|_| {
                tracing::info!(id = %id, user = %user, "assessment deleted");
            })
            .ok_or(StoreError::NotFound(id))
    }
}
