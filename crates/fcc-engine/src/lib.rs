//! # fcc-engine: Compliance Assessment Engine
//!
//! Pure computations over the static catalog and a live answer sheet:
//!
//! - **Resolver** (`resolver.rs`): classification → ordered
//!   [`ActiveSections`]. The only producer of active section sets; the
//!   interview step sequencer consumes its output instead of re-deriving
//!   USDA or cold-chain inclusion.
//!
//! - **Score** (`score.rs`): weighted, partial-credit, not-applicable-aware
//!   percentage and [`ComplianceStatus`]. One threshold function serves
//!   both the overall and the per-section verdict.
//!
//! - **Review** (`review.rs`): per-item breakdown of a scored assessment,
//!   the failed-item list fed to the AI summary, and conditional notices.
//!
//! - **Submission** (`submission.rs`): the finalized record handed to the
//!   persistence collaborator.
//!
//! Nothing here performs I/O or holds state between calls. Recomputing any
//! result from the same inputs yields the same output.

pub mod resolver;
pub mod review;
pub mod score;
pub mod submission;

pub use resolver::{resolve, resolve_token, ActiveSections};
pub use review::{review, AssessmentReview, ItemReview, ItemStatus, Notice, SectionReview};
pub use score::{
    score, score_section, section_score, section_status, ComplianceStatus, ScoreResult,
    PARTIAL_THRESHOLD, PASS_THRESHOLD,
};
pub use submission::AssessmentSubmission;
