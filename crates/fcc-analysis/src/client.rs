//! Typed HTTP client for the analysis service.
//!
//! Retries are NOT built into the client. A failed call leaves the caller's
//! state untouched; retrying means calling again with the same input.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::config::{AnalysisConfig, ConfigError};
use crate::error::AnalysisError;
use crate::types::{
    AnalyzeResponse, ComplianceSummary, ImagePayload, Language, PackagingAnalysis,
    SummaryRequest, SummaryResponse,
};
use crate::{PackagingAnalyzer, ResultSummarizer};

const ANALYZE_PATH: &str = "/api/ai/analyze-packaging";
const SUMMARIZE_PATH: &str = "/api/ai/summarize-results";

/// HTTP client for both AI endpoints.
#[derive(Debug, Clone)]
pub struct AnalysisClient {
    http: reqwest::Client,
    config: AnalysisConfig,
}

impl AnalysisClient {
    /// Create a new client from configuration.
    pub fn new(config: AnalysisConfig) -> Result<Self, AnalysisError> {
        let mut headers = reqwest::header::HeaderMap::new();
        if let Some(token) = &config.api_token {
            headers.insert(
                reqwest::header::AUTHORIZATION,
                reqwest::header::HeaderValue::from_str(&format!("Bearer {token}"))
                    .map_err(|_| ConfigError::InvalidToken)?,
            );
        }
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| AnalysisError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze a product-package photo.
    ///
    /// Calls `POST {base_url}/api/ai/analyze-packaging` with a multipart
    /// body (`image`, `language`). Answers come back normalized.
    pub async fn analyze_packaging(
        &self,
        image: &ImagePayload,
        language: Language,
    ) -> Result<PackagingAnalysis, AnalysisError> {
        let endpoint = "POST /api/ai/analyze-packaging";
        let url = self.config.endpoint_url(ANALYZE_PATH);

        let part = Part::bytes(image.bytes().to_vec())
            .file_name(image.file_name().to_string())
            .mime_str(image.format().mime_type())
            .map_err(|e| AnalysisError::Http {
                endpoint: endpoint.into(),
                source: e,
            })?;
        let form = Form::new()
            .part("image", part)
            .text("language", language.as_str());

        tracing::debug!(bytes = image.len(), %language, "sending packaging image for analysis");
        let resp = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AnalysisError::Http {
                endpoint: endpoint.into(),
                source: e,
            })?;

        if !resp.status().is_success() {
            return Err(api_error(endpoint, resp).await);
        }

        let envelope: AnalyzeResponse =
            resp.json().await.map_err(|e| AnalysisError::Deserialization {
                endpoint: endpoint.into(),
                source: e,
            })?;

        match envelope {
            AnalyzeResponse {
                success: true,
                analysis: Some(raw),
                ..
            } => Ok(PackagingAnalysis::try_from(raw)?),
            AnalyzeResponse { error, .. } => Err(rejected(endpoint, error)),
        }
    }

    /// Request a narrative summary of a scored assessment.
    ///
    /// Calls `POST {base_url}/api/ai/summarize-results`. A request with no
    /// failed items is refused locally without a network call.
    pub async fn summarize_results(
        &self,
        request: &SummaryRequest,
    ) -> Result<ComplianceSummary, AnalysisError> {
        let endpoint = "POST /api/ai/summarize-results";
        if request.failed_items.is_empty() {
            return Err(AnalysisError::NothingToSummarize);
        }
        let url = self.config.endpoint_url(SUMMARIZE_PATH);

        tracing::debug!(
            failed = request.failed_items.len(),
            score = request.score,
            "requesting result summary"
        );
        let resp = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| AnalysisError::Http {
                endpoint: endpoint.into(),
                source: e,
            })?;

        if !resp.status().is_success() {
            return Err(api_error(endpoint, resp).await);
        }

        let envelope: SummaryResponse =
            resp.json().await.map_err(|e| AnalysisError::Deserialization {
                endpoint: endpoint.into(),
                source: e,
            })?;

        match envelope {
            SummaryResponse {
                success: true,
                summary: Some(summary),
                ..
            } => Ok(summary),
            SummaryResponse { error, .. } => Err(rejected(endpoint, error)),
        }
    }
}

/// Body of a non-2xx response that follows the service's envelope.
#[derive(Deserialize)]
struct ErrorEnvelope {
    error: Option<String>,
}

async fn api_error(endpoint: &str, resp: reqwest::Response) -> AnalysisError {
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorEnvelope>(&body)
        .ok()
        .and_then(|envelope| envelope.error)
        .unwrap_or_else(|| body.clone());
    tracing::warn!(endpoint, status, %message, "analysis service returned an error status");
    AnalysisError::ApiError {
        endpoint: endpoint.into(),
        status,
        message,
        body,
    }
}

fn rejected(endpoint: &str, error: Option<String>) -> AnalysisError {
    let message = error.unwrap_or_else(|| "no payload in response".into());
    tracing::warn!(endpoint, %message, "analysis service rejected request");
    AnalysisError::Rejected {
        endpoint: endpoint.into(),
        message,
    }
}

impl PackagingAnalyzer for AnalysisClient {
    async fn analyze(
        &self,
        image: &ImagePayload,
        language: Language,
    ) -> Result<PackagingAnalysis, AnalysisError> {
        self.analyze_packaging(image, language).await
    }
}

impl ResultSummarizer for AnalysisClient {
    async fn summarize(&self, request: &SummaryRequest) -> Result<ComplianceSummary, AnalysisError> {
        self.summarize_results(request).await
    }
}
