//! # Answer Vocabulary
//!
//! The four answer values a checklist question accepts, the answer sheet
//! that maps question ids to them, and the tri-state meat-inquiry answer.
//!
//! An absent key in [`Answers`] means "unanswered". That state is distinct
//! from every [`Answer`] value: step gating treats it as incomplete, while
//! scoring gives it zero credit with its weight still counted.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FccError;

/// An answer to a single checklist question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Answer {
    /// Requirement fully met. Earns the full weight.
    Yes,
    /// Requirement not met. Earns nothing; weight still counted.
    No,
    /// Requirement partly met. Earns half the weight.
    Partial,
    /// Requirement does not apply. Removed from both earned and total weight.
    NotApplicable,
}

impl Answer {
    /// All answer values in presentation order.
    pub fn all() -> &'static [Answer] {
        &[Self::Yes, Self::No, Self::Partial, Self::NotApplicable]
    }

    /// The wire spelling of this answer.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
            Self::Partial => "partial",
            Self::NotApplicable => "notApplicable",
        }
    }

    /// Credit earned, in half-weight units, for a question of `weight`.
    ///
    /// Half units keep partial credit exact in integer arithmetic.
    /// Returns `None` for `NotApplicable`, which contributes nothing to
    /// either side of the ratio.
    pub fn earned_halves(&self, weight: u32) -> Option<u32> {
        match self {
            Self::Yes => Some(weight * 2),
            Self::Partial => Some(weight),
            Self::No => Some(0),
            Self::NotApplicable => None,
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Answer {
    type Err = FccError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "yes" => Ok(Self::Yes),
            "no" => Ok(Self::No),
            "partial" => Ok(Self::Partial),
            "notApplicable" => Ok(Self::NotApplicable),
            other => Err(FccError::UnknownValue {
                kind: "answer",
                value: other.to_string(),
            }),
        }
    }
}

/// Answer sheet: question id → answer.
///
/// Ordered by question id so serialization is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Answers(BTreeMap<String, Answer>);

impl Answers {
    /// An empty answer sheet.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// The answer for `question_id`, or `None` if unanswered.
    pub fn get(&self, question_id: &str) -> Option<Answer> {
        self.0.get(question_id).copied()
    }

    /// Whether `question_id` has any answer at all.
    pub fn is_answered(&self, question_id: &str) -> bool {
        self.0.contains_key(question_id)
    }

    /// Record (or overwrite) an answer. Returns the previous one.
    pub fn set(&mut self, question_id: impl Into<String>, answer: Answer) -> Option<Answer> {
        self.0.insert(question_id.into(), answer)
    }

    /// Remove an answer, returning the question to "unanswered".
    pub fn clear(&mut self, question_id: &str) -> Option<Answer> {
        self.0.remove(question_id)
    }

    /// Overlay `other` onto this sheet; `other` wins on conflicts.
    pub fn merge(&mut self, other: &Answers) {
        for (id, answer) in &other.0 {
            self.0.insert(id.clone(), *answer);
        }
    }

    /// Number of answered questions.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no question has been answered.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate answers in question-id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Answer)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl FromIterator<(String, Answer)> for Answers {
    fn from_iter<I: IntoIterator<Item = (String, Answer)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<(&'a str, Answer)> for Answers {
    fn from_iter<I: IntoIterator<Item = (&'a str, Answer)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
    }
}

/// Tri-state answer to "does this product contain meat?".
///
/// Starts `Unknown`. Only asked for subcategories in the meat-inquiry set;
/// auto-meat subcategories never ask and are treated as meat regardless.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainsMeat {
    /// Not yet asked or not yet answered.
    #[default]
    Unknown,
    /// The user said the product contains meat.
    Yes,
    /// The user said the product contains no meat.
    No,
}

impl ContainsMeat {
    /// Whether an explicit answer has been given.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// Whether the user confirmed meat content.
    pub fn is_yes(&self) -> bool {
        matches!(self, Self::Yes)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Yes => "yes",
            Self::No => "no",
        }
    }
}

impl fmt::Display for ContainsMeat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<bool> for ContainsMeat {
    fn from(value: bool) -> Self {
        if value {
            Self::Yes
        } else {
            Self::No
        }
    }
}

impl FromStr for ContainsMeat {
    type Err = FccError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "yes" | "true" => Ok(Self::Yes),
            "no" | "false" => Ok(Self::No),
            "unknown" => Ok(Self::Unknown),
            other => Err(FccError::UnknownValue {
                kind: "meat answer",
                value: other.to_string(),
            }),
        }
    }
}
