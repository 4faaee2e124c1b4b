//! Interview error types.

use fcc_analysis::AnalysisError;
use fcc_core::{CategoryError, SectionId};
use thiserror::Error;

use crate::steps::{CaptureMode, WizardStep};

/// A capture mode name that is neither `upload` nor `manual`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown capture mode {0:?} (expected upload or manual)")]
pub struct UnknownCaptureMode(pub String);

/// Why the current step cannot be left yet.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdvanceBlocker {
    #[error("no capture mode chosen")]
    ModeNotChosen,
    #[error("no main category chosen")]
    MainCategoryMissing,
    #[error("no subcategory chosen")]
    SubcategoryMissing,
    #[error("custom product name is empty")]
    CustomNameMissing,
    #[error("meat inquiry not answered")]
    MeatAnswerMissing,
    #[error("no image selected")]
    ImageMissing,
    #[error("{section}: {} question(s) unanswered", .missing.len())]
    UnansweredQuestions {
        section: SectionId,
        /// Unanswered question ids, in catalog order.
        missing: Vec<&'static str>,
    },
}

/// Errors raised by classification transitions and the interview session.
#[derive(Error, Debug)]
pub enum WizardError {
    #[error("unknown main category {0:?}")]
    UnknownMainCategory(String),

    #[error("select a main category first")]
    NoMainCategory,

    #[error("subcategory {sub:?} does not belong to main category {main:?}")]
    SubcategoryMismatch { main: String, sub: String },

    #[error("a custom product name is only allowed under the custom category (selected: {main:?})")]
    CustomNameNotAllowed { main: Option<String> },

    #[error("the meat inquiry does not apply to subcategory {sub:?}")]
    MeatInquiryNotApplicable { sub: Option<String> },

    #[error("product classification is incomplete")]
    IncompleteClassification,

    #[error("invalid category token: {0}")]
    Category(#[from] CategoryError),

    #[error("unknown question id {0:?}")]
    UnknownQuestion(String),

    /// The current step's gate is not satisfied.
    #[error("cannot leave step {step}: {blocker}")]
    Blocked {
        step: WizardStep,
        blocker: AdvanceBlocker,
    },

    #[error("already at the first step")]
    AtFirstStep,

    #[error("already at the last step; submit instead")]
    AtLastStep,

    #[error("submission is only possible from the review step (current: {step})")]
    NotAtReview { step: WizardStep },

    #[error("no image selected for analysis")]
    NoImageSelected,

    #[error("image analysis needs upload mode (current: {mode:?})")]
    NotUploadMode { mode: Option<CaptureMode> },

    #[error("operation only valid at step {expected} (current: {current})")]
    WrongStep {
        expected: WizardStep,
        current: WizardStep,
    },

    /// The analysis collaborator failed. Session state is unchanged.
    #[error("image analysis failed: {0}")]
    Analysis(#[from] AnalysisError),
}
