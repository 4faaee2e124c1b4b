//! # fcc-analysis: AI Collaborator Integration
//!
//! Two independent collaborator calls sit beside the deterministic engine:
//!
//! - **Packaging analysis**: a product-package photo in, proposed answers
//!   with confidence and observations out. The answers are normalized
//!   (`notVisible` → `notApplicable`) before anything merges them.
//! - **Result summary**: a scored assessment in, narrative remediation
//!   advice out. Never fed back into scoring.
//!
//! ## Architecture
//!
//! [`PackagingAnalyzer`] and [`ResultSummarizer`] are the seams the
//! interview session depends on. [`AnalysisClient`] implements both over
//! HTTP; tests substitute in-process mocks.
//!
//! Out-of-vocabulary answers are a contract violation by the service and
//! surface as [`NormalizeError`], never as silently coerced values.

pub mod client;
pub mod config;
pub mod error;
pub mod normalize;
pub mod types;

use std::future::Future;

pub use client::AnalysisClient;
pub use config::{AnalysisConfig, ConfigError};
pub use error::{AnalysisError, VocabularyError};
pub use normalize::{normalize, ExternalAnswer, NormalizeError};
pub use types::{
    ComplianceSummary, Confidence, ImageFormat, ImagePayload, Language, PackagingAnalysis,
    Priority, PriorityAction, RawPackagingAnalysis, SummaryRequest, MAX_IMAGE_BYTES,
};

/// Inspects a package photo and proposes checklist answers.
///
/// One call per image submission. Implementations return answers already
/// in the internal vocabulary.
pub trait PackagingAnalyzer: Send + Sync {
    fn analyze(
        &self,
        image: &ImagePayload,
        language: Language,
    ) -> impl Future<Output = Result<PackagingAnalysis, AnalysisError>> + Send;
}

/// Produces narrative remediation advice for a scored assessment.
pub trait ResultSummarizer: Send + Sync {
    fn summarize(
        &self,
        request: &SummaryRequest,
    ) -> impl Future<Output = Result<ComplianceSummary, AnalysisError>> + Send;
}
