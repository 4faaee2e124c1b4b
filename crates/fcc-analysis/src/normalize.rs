//! # AI Answer Normalizer
//!
//! The image-analysis service speaks a slightly wider answer vocabulary
//! than the engine: it can say `notVisible` when the photo does not show
//! enough to decide. That maps onto `notApplicable`, which removes the
//! question from scoring instead of counting it against the product.
//!
//! | External | Internal |
//! |----------|----------|
//! | `yes` | `yes` |
//! | `no` | `no` |
//! | `partial` | `partial` |
//! | `notVisible` | `notApplicable` |
//! | `notApplicable` | `notApplicable` |
//!
//! Anything else is a contract violation by the collaborator. It is
//! reported with the offending question id; no key is ever dropped.

use std::collections::BTreeMap;
use std::str::FromStr;

use fcc_core::{Answer, Answers};

use crate::error::VocabularyError;

/// An answer value as the analysis service spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExternalAnswer {
    Yes,
    No,
    Partial,
    /// The image does not show enough to decide.
    NotVisible,
    NotApplicable,
}

impl ExternalAnswer {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
            Self::Partial => "partial",
            Self::NotVisible => "notVisible",
            Self::NotApplicable => "notApplicable",
        }
    }

    /// The internal answer this value stands for.
    pub fn to_answer(self) -> Answer {
        match self {
            Self::Yes => Answer::Yes,
            Self::No => Answer::No,
            Self::Partial => Answer::Partial,
            Self::NotVisible | Self::NotApplicable => Answer::NotApplicable,
        }
    }
}

impl FromStr for ExternalAnswer {
    type Err = VocabularyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "yes" => Ok(Self::Yes),
            "no" => Ok(Self::No),
            "partial" => Ok(Self::Partial),
            "notVisible" => Ok(Self::NotVisible),
            "notApplicable" => Ok(Self::NotApplicable),
            other => Err(VocabularyError::Answer(other.to_string())),
        }
    }
}

/// An external answer map contained a value outside the known vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NormalizeError {
    #[error("analysis answered {question_id:?} with unknown value {value:?}")]
    UnknownAnswerValue { question_id: String, value: String },
}

/// Map an external answer map onto the internal vocabulary.
///
/// Fails on the first out-of-vocabulary value (in question-id order).
pub fn normalize(raw: &BTreeMap<String, String>) -> Result<Answers, NormalizeError> {
    raw.iter()
        .map(|(question_id, value)| {
            value
                .parse::<ExternalAnswer>()
                .map(|ext| (question_id.clone(), ext.to_answer()))
                .map_err(|_| {
                    tracing::warn!(
                        question_id = %question_id,
                        value = %value,
                        "analysis returned out-of-vocabulary answer"
                    );
                    NormalizeError::UnknownAnswerValue {
                        question_id: question_id.clone(),
                        value: value.clone(),
                    }
                })
        })
        .collect()
}
