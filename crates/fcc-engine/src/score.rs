//! # Score Engine
//!
//! Weighted compliance scoring with partial credit and not-applicable
//! exclusion.
//!
//! ## Algorithm
//!
//! For every question in scope:
//!
//! | Answer | Denominator | Numerator |
//! |--------|-------------|-----------|
//! | `yes` | weight | weight |
//! | `partial` | weight | weight / 2 |
//! | `no` | weight | 0 |
//! | unanswered | weight | 0 |
//! | `notApplicable` | excluded | excluded |
//!
//! `percentage = round(100 * earned / total)`, or 0 when nothing is in
//! scope. Sums are kept in half-weight units so partial credit stays exact
//! and rounding happens once, half away from zero.
//!
//! The status thresholds live in [`ComplianceStatus::from_percentage`] and
//! nowhere else.

use serde::{Deserialize, Serialize};

use fcc_catalog::{Question, Section};
use fcc_core::{Answers, SectionId};

use crate::resolver::ActiveSections;

/// Minimum percentage for [`ComplianceStatus::Passed`].
pub const PASS_THRESHOLD: u8 = 80;

/// Minimum percentage for [`ComplianceStatus::Partial`].
pub const PARTIAL_THRESHOLD: u8 = 50;

/// Verdict derived from a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplianceStatus {
    /// At or above [`PASS_THRESHOLD`].
    Passed,
    /// At or above [`PARTIAL_THRESHOLD`], below [`PASS_THRESHOLD`].
    Partial,
    /// Below [`PARTIAL_THRESHOLD`].
    Failed,
}

impl ComplianceStatus {
    /// The single threshold function shared by overall and section scores.
    pub fn from_percentage(percentage: u8) -> Self {
        if percentage >= PASS_THRESHOLD {
            Self::Passed
        } else if percentage >= PARTIAL_THRESHOLD {
            Self::Partial
        } else {
            Self::Failed
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Partial => "partial",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A computed score. Always derived from answers, never stored on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoreResult {
    /// 0..=100.
    pub percentage: u8,
    pub status: ComplianceStatus,
}

impl ScoreResult {
    fn from_halves(earned: u64, total: u64) -> Self {
        let percentage = if total == 0 {
            0
        } else {
            // round(100 * earned / total), half up; earned <= total keeps this in 0..=100.
            ((200 * earned + total) / (2 * total)).min(100) as u8
        };
        Self {
            percentage,
            status: ComplianceStatus::from_percentage(percentage),
        }
    }
}

/// Sum earned and total credit, in half-weight units.
fn tally<'a>(questions: impl Iterator<Item = &'a Question>, answers: &Answers) -> (u64, u64) {
    questions.fold((0, 0), |(earned, total), q| {
        match answers.get(q.id) {
            None => (earned, total + 2 * u64::from(q.weight)),
            Some(answer) => match answer.earned_halves(q.weight) {
                Some(halves) => (earned + u64::from(halves), total + 2 * u64::from(q.weight)),
                None => (earned, total),
            },
        }
    })
}

/// Score the answer sheet over every question in `sections`.
pub fn score(answers: &Answers, sections: &ActiveSections) -> ScoreResult {
    let (earned, total) = tally(sections.iter().flat_map(|s| s.questions.iter()), answers);
    ScoreResult::from_halves(earned, total)
}

/// Score a single catalog section.
pub fn score_section(section: &Section, answers: &Answers) -> ScoreResult {
    let (earned, total) = tally(section.questions.iter(), answers);
    ScoreResult::from_halves(earned, total)
}

/// Score one section, if it is active.
pub fn section_score(
    section_id: SectionId,
    answers: &Answers,
    sections: &ActiveSections,
) -> Option<ScoreResult> {
    sections.get(section_id).map(|s| score_section(s, answers))
}

/// Status of one section. A section that is not active is `Failed`.
pub fn section_status(
    section_id: SectionId,
    answers: &Answers,
    sections: &ActiveSections,
) -> ComplianceStatus {
    section_score(section_id, answers, sections).map_or(ComplianceStatus::Failed, |r| r.status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fcc_core::Answer;

    fn labeling_only() -> ActiveSections {
        ActiveSections::from_ids([SectionId::Labeling])
    }

    #[test]
    fn labeling_mixed_answers() {
        let answers: Answers = [
            ("nutritionFacts", Answer::Yes),
            ("ingredientList", Answer::Yes),
            ("allergenDeclaration", Answer::Partial),
            ("netQuantity", Answer::No),
            ("manufacturerInfo", Answer::Yes),
            ("countryOfOrigin", Answer::NotApplicable),
        ]
        .into_iter()
        .collect();
        let result = score(&answers, &labeling_only());
        assert_eq!(result.percentage, 71);
        assert_eq!(result.status, ComplianceStatus::Partial);
    }

    #[test]
    fn thresholds() {
        assert_eq!(ComplianceStatus::from_percentage(100), ComplianceStatus::Passed);
        assert_eq!(ComplianceStatus::from_percentage(80), ComplianceStatus::Passed);
        assert_eq!(ComplianceStatus::from_percentage(79), ComplianceStatus::Partial);
        assert_eq!(ComplianceStatus::from_percentage(50), ComplianceStatus::Partial);
        assert_eq!(ComplianceStatus::from_percentage(49), ComplianceStatus::Failed);
        assert_eq!(ComplianceStatus::from_percentage(0), ComplianceStatus::Failed);
    }

    #[test]
    fn empty_scope_scores_zero_failed() {
        let result = score(&Answers::new(), &ActiveSections::from_ids([]));
        assert_eq!(result.percentage, 0);
        assert_eq!(result.status, ComplianceStatus::Failed);
    }

    #[test]
    fn all_not_applicable_scores_zero_failed() {
        let answers: Answers = fcc_catalog::section(SectionId::Facility)
            .questions
            .iter()
            .map(|q| (q.id, Answer::NotApplicable))
            .collect();
        let result = score(&answers, &ActiveSections::from_ids([SectionId::Facility]));
        assert_eq!(result, ScoreResult { percentage: 0, status: ComplianceStatus::Failed });
    }

    #[test]
    fn unanswered_counts_like_no() {
        let sections = ActiveSections::from_ids([SectionId::Facility]);
        let unanswered: Answers = [("fdaRegistration", Answer::Yes)].into_iter().collect();
        let explicit_no: Answers = [
            ("fdaRegistration", Answer::Yes),
            ("priorNotice", Answer::No),
            ("fsvp", Answer::No),
        ]
        .into_iter()
        .collect();
        assert_eq!(score(&unanswered, &sections), score(&explicit_no, &sections));
        // 25 / 60
        assert_eq!(score(&unanswered, &sections).percentage, 42);
    }

    #[test]
    fn rounding_is_half_up() {
        // safety: haccp 15 partial (7.5) of 15 + fsma 20 + gmp 15 + hazardAnalysis 10 excluded
        // -> 7.5 / 15 = 50%
        let answers: Answers = [
            ("haccp", Answer::Partial),
            ("fsma", Answer::NotApplicable),
            ("gmp", Answer::NotApplicable),
            ("hazardAnalysis", Answer::NotApplicable),
        ]
        .into_iter()
        .collect();
        let result = score(&answers, &ActiveSections::from_ids([SectionId::Safety]));
        assert_eq!(result.percentage, 50);

        // shelfLife: dateMarking 15 partial -> 7.5 / 40 = 18.75 -> 19
        let answers: Answers = [("dateMarking", Answer::Partial)].into_iter().collect();
        let result = score(&answers, &ActiveSections::from_ids([SectionId::ShelfLife]));
        assert_eq!(result.percentage, 19);
    }

    #[test]
    fn section_status_for_inactive_section_is_failed() {
        let all_yes: Answers = fcc_catalog::all_questions().map(|q| (q.id, Answer::Yes)).collect();
        let sections = labeling_only();
        assert_eq!(
            section_status(SectionId::Labeling, &all_yes, &sections),
            ComplianceStatus::Passed
        );
        assert_eq!(section_score(SectionId::Usda, &all_yes, &sections), None);
        assert_eq!(
            section_status(SectionId::Usda, &all_yes, &sections),
            ComplianceStatus::Failed
        );
    }

    #[test]
    fn answers_outside_scope_are_ignored() {
        let answers: Answers = [("fsisEstablishment", Answer::No), ("fsvp", Answer::Yes)]
            .into_iter()
            .collect();
        let sections = ActiveSections::from_ids([SectionId::Facility]);
        // fsvp 15 of 60
        assert_eq!(score(&answers, &sections).percentage, 25);
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&ComplianceStatus::Partial).unwrap();
        assert_eq!(json, "\"partial\"");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn arb_answer() -> impl Strategy<Value = Option<Answer>> {
            prop_oneof![
                Just(None),
                Just(Some(Answer::Yes)),
                Just(Some(Answer::No)),
                Just(Some(Answer::Partial)),
                Just(Some(Answer::NotApplicable)),
            ]
        }

        fn arb_sheet() -> impl Strategy<Value = Answers> {
            let n = fcc_catalog::all_questions().count();
            proptest::collection::vec(arb_answer(), n).prop_map(|slots| {
                fcc_catalog::all_questions()
                    .zip(slots)
                    .filter_map(|(q, a)| a.map(|a| (q.id, a)))
                    .collect()
            })
        }

        fn arb_sections() -> impl Strategy<Value = ActiveSections> {
            proptest::sample::subsequence(SectionId::all().to_vec(), 0..=6)
                .prop_map(ActiveSections::from_ids)
        }

        fn rank(a: Option<Answer>) -> u8 {
            match a {
                None | Some(Answer::No) => 0,
                Some(Answer::Partial) => 1,
                Some(Answer::Yes) => 2,
                Some(Answer::NotApplicable) => 3,
            }
        }

        proptest! {
            #[test]
            fn percentage_is_bounded(answers in arb_sheet(), sections in arb_sections()) {
                let result = score(&answers, &sections);
                prop_assert!(result.percentage <= 100);
                prop_assert_eq!(result.status, ComplianceStatus::from_percentage(result.percentage));
            }

            #[test]
            fn scoring_is_deterministic(answers in arb_sheet(), sections in arb_sections()) {
                prop_assert_eq!(score(&answers, &sections), score(&answers, &sections));
                prop_assert_eq!(score(&answers, &sections), score(&answers.clone(), &sections.clone()));
            }

            #[test]
            fn upgrading_an_answer_never_lowers_the_score(
                answers in arb_sheet(),
                sections in arb_sections(),
                idx in any::<proptest::sample::Index>(),
            ) {
                let questions: Vec<_> = sections.iter().flat_map(|s| s.questions.iter()).collect();
                prop_assume!(!questions.is_empty());
                let q = questions[idx.index(questions.len())];
                let current = answers.get(q.id);
                prop_assume!(rank(current) < 2);

                let before = score(&answers, &sections).percentage;
                let mut upgraded = answers.clone();
                upgraded.set(q.id, if rank(current) == 0 { Answer::Partial } else { Answer::Yes });
                prop_assert!(score(&upgraded, &sections).percentage >= before);
            }

            #[test]
            fn excluding_a_no_never_lowers_the_score(
                answers in arb_sheet(),
                sections in arb_sections(),
                idx in any::<proptest::sample::Index>(),
            ) {
                let questions: Vec<_> = sections.iter().flat_map(|s| s.questions.iter()).collect();
                prop_assume!(!questions.is_empty());
                let q = questions[idx.index(questions.len())];

                let mut with_no = answers.clone();
                with_no.set(q.id, Answer::No);
                let mut excluded = answers.clone();
                excluded.set(q.id, Answer::NotApplicable);
                prop_assert!(
                    score(&excluded, &sections).percentage >= score(&with_no, &sections).percentage
                );
            }

            #[test]
            fn excluding_a_failing_section_strictly_raises_the_score(
                sections in proptest::sample::subsequence(SectionId::all().to_vec(), 2..=6),
                idx in any::<proptest::sample::Index>(),
            ) {
                let failing = sections[idx.index(sections.len())];
                let active = ActiveSections::from_ids(sections.clone());
                let mut answers = Answers::new();
                for s in active.iter() {
                    let answer = if s.id == failing { Answer::No } else { Answer::Yes };
                    for q in s.questions {
                        answers.set(q.id, answer);
                    }
                }
                let with_failing = score(&answers, &active).percentage;

                let mut excluded = answers.clone();
                for q in fcc_catalog::section(failing).questions {
                    excluded.set(q.id, Answer::NotApplicable);
                }
                let remaining = ActiveSections::from_ids(
                    sections.iter().copied().filter(|id| *id != failing),
                );

                prop_assert!(with_failing < 100);
                prop_assert_eq!(score(&excluded, &active).percentage, 100);
                prop_assert_eq!(score(&answers, &remaining).percentage, 100);
            }

            #[test]
            fn section_scores_stay_in_range(answers in arb_sheet()) {
                for id in SectionId::all() {
                    let r = score_section(fcc_catalog::section(*id), &answers);
                    prop_assert!(r.percentage <= 100);
                }
            }
        }
    }
}
