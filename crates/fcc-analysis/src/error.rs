//! Analysis collaborator error types.

use crate::normalize::NormalizeError;

/// Errors from analysis service calls.
///
/// Every variant is recoverable from the interview's point of view: a
/// failed call leaves the session untouched and may simply be retried.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The service returned a non-2xx status.
    ///
    /// `message` is the envelope's `error` field when the body is a
    /// `{success: false, error}` envelope, and the raw body otherwise.
    #[error("analysis service {endpoint} returned {status}: {message}")]
    ApiError {
        endpoint: String,
        status: u16,
        message: String,
        body: String,
    },
    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The service answered `success: false`.
    #[error("analysis service {endpoint} rejected the request: {message}")]
    Rejected { endpoint: String, message: String },
    /// The image was refused before any request was made.
    #[error("invalid image: {reason}")]
    InvalidImage { reason: String },
    /// A summary was requested with no failed items.
    #[error("no failed items to summarize")]
    NothingToSummarize,
    /// The analysis used an answer value outside the known vocabulary.
    #[error(transparent)]
    Normalize(#[from] NormalizeError),
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

/// A wire value outside one of the service's fixed vocabularies.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VocabularyError {
    #[error("unknown answer value {0:?}")]
    Answer(String),
    #[error("unsupported language {0:?} (expected en or zh)")]
    Language(String),
}
