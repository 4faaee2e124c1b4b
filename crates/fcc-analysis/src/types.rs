//! Wire types for the analysis service.
//!
//! ## Endpoints
//!
//! | Method | Path | Request | Response |
//! |--------|------|---------|----------|
//! | POST | `/api/ai/analyze-packaging` | multipart `image`, `language` | [`AnalyzeResponse`] |
//! | POST | `/api/ai/summarize-results` | JSON [`SummaryRequest`] | [`SummaryResponse`] |
//!
//! Response envelopes are `{success, <payload>?, error?}`. Fields use
//! `#[serde(default)]` so a partial payload still decodes; the normalizer
//! decides whether the answers are usable.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use fcc_core::Answers;

use crate::error::{AnalysisError, VocabularyError};
use crate::normalize::{normalize, NormalizeError};

/// Largest image accepted for analysis: 10 MiB.
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

// -- Enums -------------------------------------------------------------------

/// Language hint for free-text observations and summaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Zh,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Zh => "zh",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = VocabularyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Self::En),
            "zh" => Ok(Self::Zh),
            other => Err(VocabularyError::Language(other.to_string())),
        }
    }
}

/// How sure the analysis is about one answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// Urgency of a suggested remediation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// Accepted image encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Webp,
    Gif,
}

impl ImageFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Webp => "image/webp",
            Self::Gif => "image/gif",
        }
    }

    /// Parse a MIME type. Only the four accepted image types succeed.
    pub fn from_mime_type(mime: &str) -> Option<Self> {
        match mime {
            "image/jpeg" => Some(Self::Jpeg),
            "image/png" => Some(Self::Png),
            "image/webp" => Some(Self::Webp),
            "image/gif" => Some(Self::Gif),
            _ => None,
        }
    }

    /// Guess from a file extension, case-insensitively.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "webp" => Some(Self::Webp),
            "gif" => Some(Self::Gif),
            _ => None,
        }
    }

    fn default_file_name(&self) -> &'static str {
        match self {
            Self::Jpeg => "package.jpg",
            Self::Png => "package.png",
            Self::Webp => "package.webp",
            Self::Gif => "package.gif",
        }
    }
}

// -- Image payload -----------------------------------------------------------

/// A validated product-package photo.
///
/// Construction enforces the size limit and a non-empty body; the format
/// is fixed by [`ImageFormat`].
#[derive(Clone, PartialEq, Eq)]
pub struct ImagePayload {
    bytes: Vec<u8>,
    format: ImageFormat,
    file_name: String,
}

impl fmt::Debug for ImagePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImagePayload")
            .field("len", &self.bytes.len())
            .field("format", &self.format)
            .field("file_name", &self.file_name)
            .finish()
    }
}

impl ImagePayload {
    pub fn new(bytes: Vec<u8>, format: ImageFormat) -> Result<Self, AnalysisError> {
        if bytes.is_empty() {
            return Err(AnalysisError::InvalidImage {
                reason: "image is empty".into(),
            });
        }
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(AnalysisError::InvalidImage {
                reason: format!(
                    "image is {} bytes, limit is {MAX_IMAGE_BYTES}",
                    bytes.len()
                ),
            });
        }
        Ok(Self {
            bytes,
            format,
            file_name: format.default_file_name().to_string(),
        })
    }

    /// Build from raw bytes and a MIME type string.
    pub fn from_mime(bytes: Vec<u8>, mime: &str) -> Result<Self, AnalysisError> {
        let format = ImageFormat::from_mime_type(mime).ok_or_else(|| AnalysisError::InvalidImage {
            reason: format!("unsupported type {mime:?}; only JPEG, PNG, WebP, and GIF are allowed"),
        })?;
        Self::new(bytes, format)
    }

    /// Replace the file name sent with the upload.
    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = name.into();
        self
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// -- Packaging analysis ------------------------------------------------------

/// Packaging analysis exactly as the service returns it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPackagingAnalysis {
    #[serde(default)]
    pub answers: BTreeMap<String, String>,
    #[serde(default)]
    pub confidence: BTreeMap<String, Confidence>,
    #[serde(default)]
    pub observations: BTreeMap<String, String>,
    #[serde(default)]
    pub overall_notes: String,
}

/// Packaging analysis with answers in the internal vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackagingAnalysis {
    pub answers: Answers,
    pub confidence: BTreeMap<String, Confidence>,
    pub observations: BTreeMap<String, String>,
    pub overall_notes: String,
}

impl TryFrom<RawPackagingAnalysis> for PackagingAnalysis {
    type Error = NormalizeError;

    fn try_from(raw: RawPackagingAnalysis) -> Result<Self, Self::Error> {
        Ok(Self {
            answers: normalize(&raw.answers)?,
            confidence: raw.confidence,
            observations: raw.observations,
            overall_notes: raw.overall_notes,
        })
    }
}

/// Envelope for `POST /api/ai/analyze-packaging`.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    #[serde(default)]
    pub analysis: Option<RawPackagingAnalysis>,
    #[serde(default)]
    pub error: Option<String>,
}

// -- Result summary ----------------------------------------------------------

/// Request body for `POST /api/ai/summarize-results`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRequest {
    /// Display text of the product category.
    pub product_category: String,
    /// Display texts of the failed questions.
    pub failed_items: Vec<String>,
    pub answers: Answers,
    pub language: Language,
    pub score: u8,
}

/// One prioritized remediation step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityAction {
    pub item: String,
    pub priority: Priority,
    pub action: String,
}

/// Narrative summary layered on top of the computed score.
///
/// Opaque content: nothing here feeds back into scoring.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceSummary {
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub priority_actions: Vec<PriorityAction>,
    #[serde(default)]
    pub detailed_steps: Vec<String>,
    #[serde(default)]
    pub estimated_effort: String,
}

/// Envelope for `POST /api/ai/summarize-results`.
#[derive(Debug, Clone, Deserialize)]
pub struct SummaryResponse {
    pub success: bool,
    #[serde(default)]
    pub summary: Option<ComplianceSummary>,
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use fcc_core::Answer;

    #[test]
    fn image_format_from_mime_and_extension() {
        assert_eq!(ImageFormat::from_mime_type("image/webp"), Some(ImageFormat::Webp));
        assert_eq!(ImageFormat::from_mime_type("image/bmp"), None);
        assert_eq!(ImageFormat::from_extension("JPG"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_extension("tiff"), None);
    }

    #[test]
    fn image_payload_rejects_oversize() {
        let err = ImagePayload::new(vec![0; MAX_IMAGE_BYTES + 1], ImageFormat::Png).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidImage { .. }));
        assert!(ImagePayload::new(vec![0; MAX_IMAGE_BYTES], ImageFormat::Png).is_ok());
    }

    #[test]
    fn image_payload_rejects_empty_and_unknown_mime() {
        assert!(ImagePayload::new(Vec::new(), ImageFormat::Gif).is_err());
        assert!(ImagePayload::from_mime(vec![1, 2, 3], "application/pdf").is_err());
        let img = ImagePayload::from_mime(vec![1, 2, 3], "image/jpeg").unwrap();
        assert_eq!(img.format(), ImageFormat::Jpeg);
        assert_eq!(img.file_name(), "package.jpg");
        assert_eq!(img.len(), 3);
    }

    #[test]
    fn image_debug_omits_bytes() {
        let img = ImagePayload::new(vec![0xAB; 8], ImageFormat::Png).unwrap();
        let debug = format!("{img:?}");
        assert!(debug.contains("len: 8"));
        assert!(!debug.contains("171"));
    }

    #[test]
    fn raw_analysis_decodes_service_json() {
        let raw: RawPackagingAnalysis = serde_json::from_value(serde_json::json!({
            "answers": {"nutritionFacts": "yes", "countryOfOrigin": "notVisible"},
            "confidence": {"nutritionFacts": "high", "countryOfOrigin": "low"},
            "observations": {"nutritionFacts": "FDA-format panel present"},
            "overallNotes": "Mostly compliant"
        }))
        .unwrap();
        let analysis = PackagingAnalysis::try_from(raw).unwrap();
        assert_eq!(analysis.answers.get("countryOfOrigin"), Some(Answer::NotApplicable));
        assert_eq!(analysis.confidence["nutritionFacts"], Confidence::High);
        assert_eq!(analysis.overall_notes, "Mostly compliant");
    }

    #[test]
    fn summary_request_wire_shape() {
        let req = SummaryRequest {
            product_category: "Jerky".into(),
            failed_items: vec!["FSIS establishment".into()],
            answers: [("fsisEstablishment", Answer::No)].into_iter().collect(),
            language: Language::Zh,
            score: 42,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["productCategory"], "Jerky");
        assert_eq!(json["failedItems"][0], "FSIS establishment");
        assert_eq!(json["answers"]["fsisEstablishment"], "no");
        assert_eq!(json["language"], "zh");
        assert_eq!(json["score"], 42);
    }

    #[test]
    fn summary_decodes_with_missing_fields() {
        let resp: SummaryResponse = serde_json::from_value(serde_json::json!({
            "success": true,
            "summary": {
                "overview": "Needs work",
                "priorityActions": [{"item": "Labels", "priority": "high", "action": "Fix"}]
            }
        }))
        .unwrap();
        let summary = resp.summary.unwrap();
        assert_eq!(summary.priority_actions[0].priority, Priority::High);
        assert!(summary.detailed_steps.is_empty());
    }

    #[test]
    fn language_parsing() {
        assert_eq!("zh".parse::<Language>(), Ok(Language::Zh));
        assert_eq!("fr".parse::<Language>(), Err(VocabularyError::Language("fr".into())));
        assert_eq!(Language::default(), Language::En);
    }
}
