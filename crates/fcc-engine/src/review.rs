//! # Assessment Review
//!
//! Per-item breakdown of a scored assessment, as shown on the results page
//! and fed to the AI summary collaborator.

use serde::Serialize;

use fcc_core::{Answer, Answers, SectionId};

use crate::resolver::ActiveSections;
use crate::score::{score, score_section, ScoreResult};

/// Outcome of a single question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemStatus {
    Passed,
    Partial,
    /// Answered `no`, or not answered at all.
    Failed,
    NotApplicable,
}

impl From<Option<Answer>> for ItemStatus {
    fn from(answer: Option<Answer>) -> Self {
        match answer {
            Some(Answer::Yes) => Self::Passed,
            Some(Answer::Partial) => Self::Partial,
            Some(Answer::NotApplicable) => Self::NotApplicable,
            Some(Answer::No) | None => Self::Failed,
        }
    }
}

/// One reviewed question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemReview {
    pub question_id: &'static str,
    pub question_key: String,
    pub weight: u32,
    /// `None` if the question was never answered.
    pub answer: Option<Answer>,
    pub status: ItemStatus,
    /// Text key for remediation advice. Present only for failed items.
    pub recommendation_key: Option<String>,
}

/// One reviewed section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionReview {
    pub section: SectionId,
    pub title_key: &'static str,
    pub score: ScoreResult,
    pub items: Vec<ItemReview>,
}

/// Advisory shown when a conditional section applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Notice {
    /// Meat products are subject to USDA/FSIS import rules.
    UsdaImportRules,
    /// Refrigerated and frozen products need documented cold-chain handling.
    ColdChainHandling,
}

impl Notice {
    pub fn text_key(&self) -> &'static str {
        match self {
            Self::UsdaImportRules => "results.usdaWarning",
            Self::ColdChainHandling => "results.coldChainWarning",
        }
    }
}

/// A fully reviewed assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentReview {
    pub score: ScoreResult,
    pub sections: Vec<SectionReview>,
    /// Failed question ids in section order.
    pub failed_questions: Vec<&'static str>,
    /// Questions explicitly answered `no`.
    pub attention_count: usize,
    pub notices: Vec<Notice>,
}

/// Review every active section against the answer sheet.
pub fn review(answers: &Answers, sections: &ActiveSections) -> AssessmentReview {
    let mut failed_questions = Vec::new();
    let mut attention_count = 0;

    let section_reviews = sections
        .iter()
        .map(|section| {
            let items = section
                .questions
                .iter()
                .map(|q| {
                    let answer = answers.get(q.id);
                    let status = ItemStatus::from(answer);
                    if status == ItemStatus::Failed {
                        failed_questions.push(q.id);
                    }
                    if answer == Some(Answer::No) {
                        attention_count += 1;
                    }
                    ItemReview {
                        question_id: q.id,
                        question_key: q.question_key(),
                        weight: q.weight,
                        answer,
                        status,
                        recommendation_key: (status == ItemStatus::Failed)
                            .then(|| format!("recommendations.{}", q.id)),
                    }
                })
                .collect();
            SectionReview {
                section: section.id,
                title_key: section.title_key,
                score: score_section(section, answers),
                items,
            }
        })
        .collect();

    let notices = sections
        .ids()
        .into_iter()
        .filter_map(|id| match id {
            SectionId::Usda => Some(Notice::UsdaImportRules),
            SectionId::ColdChain => Some(Notice::ColdChainHandling),
            SectionId::Labeling | SectionId::Facility | SectionId::Safety | SectionId::ShelfLife => {
                None
            }
        })
        .collect();

    AssessmentReview {
        score: score(answers, sections),
        sections: section_reviews,
        failed_questions,
        attention_count,
        notices,
    }
}
