//! # Wizard Step Sequencer
//!
//! Builds the ordered interview steps from the current session state:
//!
//! ```text
//! mode-select → category-select → [meat-inquiry] → [image-upload]
//!   → <one step per active section> → review
//! ```
//!
//! Section steps come straight from the resolver's [`ActiveSections`], so
//! the step list and the scored sections can never disagree about USDA or
//! cold-chain inclusion.

use std::fmt;

use serde::{Deserialize, Serialize};

use fcc_core::SectionId;
use fcc_engine::ActiveSections;

use crate::classification::ClassificationState;
use crate::error::UnknownCaptureMode;

/// How answers are captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureMode {
    /// A package photo pre-fills answers before the section steps.
    Upload,
    /// Every answer is entered by hand.
    Manual,
}

impl CaptureMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upload => "upload",
            Self::Manual => "manual",
        }
    }
}

impl fmt::Display for CaptureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CaptureMode {
    type Err = UnknownCaptureMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upload" => Ok(Self::Upload),
            "manual" => Ok(Self::Manual),
            other => Err(UnknownCaptureMode(other.to_string())),
        }
    }
}

/// One interview step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "step", content = "section")]
pub enum WizardStep {
    ModeSelect,
    CategorySelect,
    MeatInquiry,
    ImageUpload,
    /// Answer the questions of one checklist section.
    Section(SectionId),
    /// Terminal step; leaving it means submitting.
    Review,
}

impl WizardStep {
    /// Text key for the step's progress label.
    pub fn label_key(&self) -> String {
        match self {
            Self::ModeSelect => "assessmentMode.title".into(),
            Self::CategorySelect => "assessment.selectCategory".into(),
            Self::MeatInquiry => "assessment.meatInquiry.title".into(),
            Self::ImageUpload => "assessment.uploadImage".into(),
            Self::Section(id) => format!("assessment.sections.{id}"),
            Self::Review => "common.save".into(),
        }
    }

    /// The checklist section this step asks about, if any.
    pub fn section(&self) -> Option<SectionId> {
        match self {
            Self::Section(id) => Some(*id),
            Self::ModeSelect
            | Self::CategorySelect
            | Self::MeatInquiry
            | Self::ImageUpload
            | Self::Review => None,
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ModeSelect => f.write_str("mode-select"),
            Self::CategorySelect => f.write_str("category-select"),
            Self::MeatInquiry => f.write_str("meat-inquiry"),
            Self::ImageUpload => f.write_str("image-upload"),
            Self::Section(id) => write!(f, "{id}"),
            Self::Review => f.write_str("review"),
        }
    }
}

/// Build the step list.
///
/// `mode` is `None` until the user picks one; no image-upload step is
/// shown before that.
pub fn build_steps(
    mode: Option<CaptureMode>,
    classification: &ClassificationState,
    sections: &ActiveSections,
) -> Vec<WizardStep> {
    let mut steps = vec![WizardStep::ModeSelect, WizardStep::CategorySelect];
    if classification.needs_meat_inquiry() {
        steps.push(WizardStep::MeatInquiry);
    }
    if mode == Some(CaptureMode::Upload) {
        steps.push(WizardStep::ImageUpload);
    }
    steps.extend(sections.iter().map(|s| WizardStep::Section(s.id)));
    steps.push(WizardStep::Review);

    tracing::debug!(
        mode = mode.map_or("unset", |m| m.as_str()),
        count = steps.len(),
        "built wizard steps"
    );
    steps
}

/// Text keys for every step, index-aligned with [`build_steps`].
pub fn step_labels(steps: &[WizardStep]) -> Vec<String> {
    steps.iter().map(WizardStep::label_key).collect()
}
