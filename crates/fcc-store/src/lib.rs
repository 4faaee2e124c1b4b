//! # fcc-store: Assessment Persistence
//!
//! The engine hands finalized submissions to a persistence collaborator,
//! which stores them verbatim under an opaque id and an owning user, and
//! returns them later. [`AssessmentStore`] is that contract;
//! [`InMemoryAssessmentStore`] is a `DashMap`-backed implementation for
//! tests, the CLI and single-process deployments.
//!
//! ## Ownership
//!
//! | Operation | Other user's record |
//! |-----------|---------------------|
//! | `get` | [`StoreError::AccessDenied`] |
//! | `delete` | [`StoreError::NotFound`] (existence is not revealed) |
//! | `list_for_user` | never included |

pub mod memory;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use fcc_core::{Answers, AssessmentId, CategoryToken, UserId};
use fcc_engine::{AssessmentSubmission, ComplianceStatus};

pub use memory::InMemoryAssessmentStore;

/// A stored assessment record.
///
/// Serializes as `{id, userId, productCategory, answers, score, status, createdAt}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredAssessment {
    pub id: AssessmentId,
    pub user_id: UserId,
    pub product_category: CategoryToken,
    pub answers: Answers,
    pub score: u8,
    pub status: ComplianceStatus,
    pub created_at: DateTime<Utc>,
}

impl StoredAssessment {
    /// The submission this record was created from.
    pub fn submission(&self) -> AssessmentSubmission {
        AssessmentSubmission {
            product_category: self.product_category.clone(),
            answers: self.answers.clone(),
            score: self.score,
            status: self.status,
        }
    }
}

/// Persistence errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("assessment {0} not found")]
    NotFound(AssessmentId),
    #[error("{user} may not access assessment {id}")]
    AccessDenied { id: AssessmentId, user: UserId },
}

/// Storage for finalized assessments, scoped per user.
///
/// Implementations must be `Send + Sync` so one store can be shared across
/// sessions behind an `Arc`.
pub trait AssessmentStore: Send + Sync {
    /// Store a submission for `user` and return the new record.
    fn create(
        &self,
        user: UserId,
        submission: AssessmentSubmission,
    ) -> Result<StoredAssessment, StoreError>;

    /// Fetch one of `user`'s records.
    fn get(&self, user: UserId, id: AssessmentId) -> Result<StoredAssessment, StoreError>;

    /// All of `user`'s records, newest first.
    fn list_for_user(&self, user: UserId) -> Result<Vec<StoredAssessment>, StoreError>;

    /// Delete one of `user`'s records.
    fn delete(&self, user: UserId, id: AssessmentId) -> Result<(), StoreError>;
}
