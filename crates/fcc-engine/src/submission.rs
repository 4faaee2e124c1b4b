//! # Finalized Assessment
//!
//! The record handed to the persistence collaborator when an interview is
//! submitted. Score and status are computed here from the answers and the
//! active sections; the collaborator stores them verbatim.

use serde::{Deserialize, Serialize};

use fcc_core::{Answers, CategoryToken};

use crate::resolver::ActiveSections;
use crate::score::{score, ComplianceStatus, ScoreResult};

/// A finalized assessment ready for storage.
///
/// Serializes as `{productCategory, answers, score, status}`, with the
/// category in its compact token form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentSubmission {
    pub product_category: CategoryToken,
    pub answers: Answers,
    pub score: u8,
    pub status: ComplianceStatus,
}

impl AssessmentSubmission {
    /// Score `answers` over `sections` and package the result.
    pub fn finalize(product_category: CategoryToken, answers: Answers, sections: &ActiveSections) -> Self {
        let ScoreResult { percentage, status } = score(&answers, sections);
        tracing::info!(
            category = %product_category,
            score = percentage,
            %status,
            answered = answers.len(),
            "assessment finalized"
        );
        Self {
            product_category,
            answers,
            score: percentage,
            status,
        }
    }

    /// The score as a [`ScoreResult`].
    pub fn score_result(&self) -> ScoreResult {
        ScoreResult {
            percentage: self.score,
            status: self.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::resolve_token;
    use fcc_core::{Answer, ContainsMeat};

    #[test]
    fn finalize_computes_score_from_answers() {
        let token = CategoryToken::catalog("snacks", "chips").unwrap();
        let sections = resolve_token(&token, ContainsMeat::Unknown);
        let answers: Answers = sections
            .iter()
            .flat_map(|s| s.questions.iter())
            .map(|q| (q.id, Answer::Yes))
            .collect();
        let submission = AssessmentSubmission::finalize(token, answers, &sections);
        assert_eq!(submission.score, 100);
        assert_eq!(submission.status, ComplianceStatus::Passed);
    }

    #[test]
    fn wire_shape_uses_compact_token() {
        let token = CategoryToken::custom("Artisan Spice Mix").unwrap();
        let sections = resolve_token(&token, ContainsMeat::Unknown);
        let answers: Answers = [("gmp", Answer::No)].into_iter().collect();
        let submission = AssessmentSubmission::finalize(token, answers, &sections);

        let json = serde_json::to_value(&submission).unwrap();
        assert_eq!(json["productCategory"], "custom:Artisan Spice Mix");
        assert_eq!(json["answers"]["gmp"], "no");
        assert_eq!(json["score"], 0);
        assert_eq!(json["status"], "failed");

        let back: AssessmentSubmission = serde_json::from_value(json).unwrap();
        assert_eq!(back, submission);
    }
}
