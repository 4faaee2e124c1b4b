//! # Interview Session
//!
//! [`WizardState`] is the one mutable object in an assessment: capture
//! mode, classification, answers, current step, the selected image and
//! the last image analysis. It is owned by a single interview and never
//! shared.
//!
//! ## Step Tracking
//!
//! The current step is stored as a [`WizardStep`], not an index, because
//! the step list changes with the classification. When a change removes
//! the current step (e.g. a new subcategory drops the meat inquiry), the
//! session falls back to the nearest earlier step that still exists.
//!
//! A change can also add steps behind the cursor, such as a meat inquiry
//! after reclassifying at review. The cursor then moves back to the
//! earliest step whose gate no longer holds, so no step is skipped.
//! [`WizardState::submit`] re-checks every gate before finalizing.
//!
//! ## Image Analysis
//!
//! [`WizardState::analyze_image`] is the only suspension point. It takes
//! `&mut self`, so at most one analysis is in flight per session. It is
//! only accepted at the image-upload step of an upload-mode interview. A
//! failed call returns the error and leaves every field as it was.

use serde::Serialize;

use fcc_analysis::{
    ImagePayload, Language, PackagingAnalysis, PackagingAnalyzer, SummaryRequest,
};
use fcc_catalog::question;
use fcc_core::{Answer, Answers, CategoryLabel, ContainsMeat};
use fcc_engine::{review, score, ActiveSections, AssessmentReview, AssessmentSubmission, ScoreResult};

use crate::classification::ClassificationState;
use crate::error::{AdvanceBlocker, WizardError};
use crate::steps::{build_steps, step_labels, CaptureMode, WizardStep};

/// Position within the step list, 1-based for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub current: usize,
    pub total: usize,
}

/// State of one assessment interview.
#[derive(Debug, Clone)]
pub struct WizardState {
    mode: Option<CaptureMode>,
    classification: ClassificationState,
    answers: Answers,
    current: WizardStep,
    image: Option<ImagePayload>,
    analysis: Option<PackagingAnalysis>,
    language: Language,
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardState {
    /// A fresh interview at the mode-select step.
    pub fn new() -> Self {
        Self {
            mode: None,
            classification: ClassificationState::new(),
            answers: Answers::new(),
            current: WizardStep::ModeSelect,
            image: None,
            analysis: None,
            language: Language::default(),
        }
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    // -- accessors -----------------------------------------------------------

    pub fn mode(&self) -> Option<CaptureMode> {
        self.mode
    }

    pub fn classification(&self) -> &ClassificationState {
        &self.classification
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    pub fn image(&self) -> Option<&ImagePayload> {
        self.image.as_ref()
    }

    /// The most recent successful analysis of the current image.
    pub fn analysis(&self) -> Option<&PackagingAnalysis> {
        self.analysis.as_ref()
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    // -- classification & mode ------------------------------------------------

    pub fn select_mode(&mut self, mode: CaptureMode) {
        let before = self.steps();
        self.mode = Some(mode);
        self.reanchor(&before);
    }

    /// Select a main category, clearing subcategory, custom name and meat answer.
    pub fn select_main_category(&mut self, main_id: &str) -> Result<(), WizardError> {
        let before = self.steps();
        self.classification = self.classification.select_main_category(main_id)?;
        self.reanchor(&before);
        Ok(())
    }

    pub fn clear_main_category(&mut self) {
        let before = self.steps();
        self.classification = self.classification.clear_main_category();
        self.reanchor(&before);
    }

    /// Select a subcategory, clearing the meat answer.
    pub fn select_subcategory(&mut self, sub_id: &str) -> Result<(), WizardError> {
        let before = self.steps();
        self.classification = self.classification.select_subcategory(sub_id)?;
        self.reanchor(&before);
        Ok(())
    }

    pub fn set_custom_name(&mut self, name: &str) -> Result<(), WizardError> {
        let before = self.steps();
        self.classification = self.classification.set_custom_name(name)?;
        self.reanchor(&before);
        Ok(())
    }

    pub fn answer_meat_inquiry(&mut self, contains_meat: ContainsMeat) -> Result<(), WizardError> {
        let before = self.steps();
        self.classification = self.classification.answer_meat_inquiry(contains_meat)?;
        self.reanchor(&before);
        Ok(())
    }

    /// After a change to mode or classification, move off the current step
    /// if it no longer exists, then back to the earliest earlier step whose
    /// gate is no longer satisfied.
    fn reanchor(&mut self, before: &[WizardStep]) {
        let after = self.steps();
        if !after.contains(&self.current) {
            let pos = before.iter().position(|s| *s == self.current).unwrap_or(0);
            let fallback = before[..pos]
                .iter()
                .rev()
                .find(|s| after.contains(s))
                .copied()
                .unwrap_or(WizardStep::ModeSelect);
            tracing::debug!(from = %self.current, to = %fallback, "current step removed, falling back");
            self.current = fallback;
        }
        if let Some((step, blocker)) = self.first_blocked(&after) {
            tracing::debug!(from = %self.current, to = %step, %blocker, "earlier step reopened, moving back");
            self.current = step;
        }
    }

    /// The first step before the current one whose gate fails.
    fn first_blocked(&self, steps: &[WizardStep]) -> Option<(WizardStep, AdvanceBlocker)> {
        steps
            .iter()
            .take_while(|s| **s != self.current)
            .find_map(|s| self.blocker_at(*s).map(|b| (*s, b)))
    }

    // -- answers --------------------------------------------------------------

    /// Record an answer. Returns the previous answer, if any.
    pub fn set_answer(&mut self, question_id: &str, answer: Answer) -> Result<Option<Answer>, WizardError> {
        let q = question(question_id).ok_or_else(|| WizardError::UnknownQuestion(question_id.to_string()))?;
        Ok(self.answers.set(q.id, answer))
    }

    /// Remove an answer, making the question unanswered again.
    pub fn clear_answer(&mut self, question_id: &str) -> Option<Answer> {
        self.answers.clear(question_id)
    }

    // -- image analysis -------------------------------------------------------

    /// Select (or deselect) the package photo. Any previous analysis is discarded.
    pub fn select_image(&mut self, image: Option<ImagePayload>) {
        self.image = image;
        self.analysis = None;
    }

    /// Send the selected image to the analyzer, merge its answers and
    /// advance one step.
    ///
    /// Only valid at the image-upload step of an upload-mode interview. On
    /// failure the error is returned and the session is untouched, so the
    /// call can simply be repeated.
    pub async fn analyze_image<A: PackagingAnalyzer>(
        &mut self,
        analyzer: &A,
    ) -> Result<&PackagingAnalysis, WizardError> {
        if self.mode != Some(CaptureMode::Upload) {
            return Err(WizardError::NotUploadMode { mode: self.mode });
        }
        if self.current != WizardStep::ImageUpload {
            return Err(WizardError::WrongStep {
                expected: WizardStep::ImageUpload,
                current: self.current,
            });
        }
        let image = self.image.as_ref().ok_or(WizardError::NoImageSelected)?;
        let analysis = match analyzer.analyze(image, self.language).await {
            Ok(analysis) => analysis,
            Err(e) => {
                tracing::warn!(error = %e, "image analysis failed; answers unchanged");
                return Err(e.into());
            }
        };

        self.answers.merge(&analysis.answers);
        tracing::info!(
            merged = analysis.answers.len(),
            total = self.answers.len(),
            "analysis answers merged"
        );
        self.step_forward();
        Ok(self.analysis.insert(analysis))
    }

    // -- steps ----------------------------------------------------------------

    /// The checklist sections for the current classification.
    pub fn active_sections(&self) -> ActiveSections {
        self.classification.active_sections()
    }

    pub fn steps(&self) -> Vec<WizardStep> {
        build_steps(self.mode, &self.classification, &self.active_sections())
    }

    pub fn step_labels(&self) -> Vec<String> {
        step_labels(&self.steps())
    }

    pub fn current_step(&self) -> WizardStep {
        self.current
    }

    /// 0-based index of the current step.
    pub fn current_index(&self) -> usize {
        self.steps()
            .iter()
            .position(|s| *s == self.current)
            .unwrap_or(0)
    }

    pub fn progress(&self) -> Progress {
        Progress {
            current: self.current_index() + 1,
            total: self.steps().len(),
        }
    }

    /// What keeps the current step from advancing, if anything.
    pub fn advance_blocker(&self) -> Option<AdvanceBlocker> {
        self.blocker_at(self.current)
    }

    fn blocker_at(&self, step: WizardStep) -> Option<AdvanceBlocker> {
        match step {
            WizardStep::ModeSelect => self.mode.is_none().then_some(AdvanceBlocker::ModeNotChosen),
            WizardStep::CategorySelect => {
                let c = &self.classification;
                if c.main_category().is_none() {
                    Some(AdvanceBlocker::MainCategoryMissing)
                } else if c.is_complete() {
                    None
                } else if c.is_custom() {
                    Some(AdvanceBlocker::CustomNameMissing)
                } else {
                    Some(AdvanceBlocker::SubcategoryMissing)
                }
            }
            WizardStep::MeatInquiry => (!self.classification.contains_meat().is_known())
                .then_some(AdvanceBlocker::MeatAnswerMissing),
            WizardStep::ImageUpload => self.image.is_none().then_some(AdvanceBlocker::ImageMissing),
            WizardStep::Section(id) => {
                let missing: Vec<&'static str> = fcc_catalog::section(id)
                    .questions
                    .iter()
                    .filter(|q| !self.answers.is_answered(q.id))
                    .map(|q| q.id)
                    .collect();
                (!missing.is_empty()).then_some(AdvanceBlocker::UnansweredQuestions {
                    section: id,
                    missing,
                })
            }
            WizardStep::Review => None,
        }
    }

    pub fn can_advance(&self) -> bool {
        self.advance_blocker().is_none()
    }

    /// Move to the next step if the current one is satisfied.
    pub fn next(&mut self) -> Result<WizardStep, WizardError> {
        if self.current == WizardStep::Review {
            return Err(WizardError::AtLastStep);
        }
        if let Some(blocker) = self.advance_blocker() {
            return Err(WizardError::Blocked {
                step: self.current,
                blocker,
            });
        }
        Ok(self.step_forward())
    }

    /// Move to the previous step. Never gated.
    pub fn previous(&mut self) -> Result<WizardStep, WizardError> {
        let steps = self.steps();
        let idx = self.current_index();
        if idx == 0 {
            return Err(WizardError::AtFirstStep);
        }
        self.current = steps[idx - 1];
        Ok(self.current)
    }

    fn step_forward(&mut self) -> WizardStep {
        let steps = self.steps();
        if let Some(next) = steps.get(self.current_index() + 1) {
            self.current = *next;
        }
        self.current
    }

    // -- results --------------------------------------------------------------

    /// Score of the answers so far over the active sections.
    pub fn live_score(&self) -> ScoreResult {
        score(&self.answers, &self.active_sections())
    }

    pub fn review(&self) -> AssessmentReview {
        review(&self.answers, &self.active_sections())
    }

    /// Finalize the interview.
    ///
    /// Requires the review step, a complete classification and every
    /// earlier gate satisfied. The session is left intact so a failed store
    /// can be retried.
    pub fn submit(&self) -> Result<AssessmentSubmission, WizardError> {
        if self.current != WizardStep::Review {
            return Err(WizardError::NotAtReview { step: self.current });
        }
        if let Some((step, blocker)) = self.first_blocked(&self.steps()) {
            return Err(WizardError::Blocked { step, blocker });
        }
        let token = self.classification.token()?;
        Ok(AssessmentSubmission::finalize(
            token,
            self.answers.clone(),
            &self.active_sections(),
        ))
    }

    /// Build a summary request for the result summarizer.
    ///
    /// `translate` maps a text key to display text; custom product names
    /// are used as typed.
    pub fn summary_request(
        &self,
        translate: impl Fn(&str) -> String,
    ) -> Result<SummaryRequest, WizardError> {
        let token = self.classification.token()?;
        let product_category = match token.label() {
            CategoryLabel::Literal(name) => name,
            CategoryLabel::Key(key) => translate(&key),
        };
        let review = self.review();
        let failed_items = review
            .failed_questions
            .iter()
            .filter_map(|id| question(id))
            .map(|q| translate(&q.question_key()))
            .collect();
        Ok(SummaryRequest {
            product_category,
            failed_items,
            answers: self.answers.clone(),
            language: self.language,
            score: review.score.percentage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fcc_analysis::{AnalysisError, ImageFormat};
    use fcc_core::SectionId;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedAnalyzer {
        result: Result<Answers, String>,
        calls: AtomicUsize,
    }

    impl FixedAnalyzer {
        fn ok(answers: &[(&str, Answer)]) -> Self {
            Self {
                result: Ok(answers.iter().copied().collect()),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                result: Err(message.to_string()),
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl PackagingAnalyzer for FixedAnalyzer {
        async fn analyze(
            &self,
            _image: &ImagePayload,
            _language: Language,
        ) -> Result<PackagingAnalysis, AnalysisError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.result {
                Ok(answers) => Ok(PackagingAnalysis {
                    answers: answers.clone(),
                    overall_notes: "ok".into(),
                    ..PackagingAnalysis::default()
                }),
                Err(message) => Err(AnalysisError::Rejected {
                    endpoint: "mock".into(),
                    message: message.clone(),
                }),
            }
        }
    }

    fn image() -> ImagePayload {
        ImagePayload::new(vec![1, 2, 3], ImageFormat::Jpeg).unwrap()
    }

    fn answer_section(state: &mut WizardState, id: SectionId, answer: Answer) {
        for q in fcc_catalog::section(id).questions {
            state.set_answer(q.id, answer).unwrap();
        }
    }

    /// Manual interview for snacks:chips, positioned at the first section.
    fn at_labeling() -> WizardState {
        let mut s = WizardState::new();
        s.select_mode(CaptureMode::Manual);
        s.next().unwrap();
        s.select_main_category("snacks").unwrap();
        s.select_subcategory("chips").unwrap();
        s.next().unwrap();
        assert_eq!(s.current_step(), WizardStep::Section(SectionId::Labeling));
        s
    }

    #[test]
    fn fresh_state() {
        let s = WizardState::new();
        assert_eq!(s.current_step(), WizardStep::ModeSelect);
        assert_eq!(s.current_index(), 0);
        assert_eq!(s.advance_blocker(), Some(AdvanceBlocker::ModeNotChosen));
        assert!(matches!(WizardState::new().previous(), Err(WizardError::AtFirstStep)));
    }

    #[test]
    fn category_gate_reports_what_is_missing() {
        let mut s = WizardState::new();
        s.select_mode(CaptureMode::Manual);
        s.next().unwrap();
        assert_eq!(s.advance_blocker(), Some(AdvanceBlocker::MainCategoryMissing));
        s.select_main_category("snacks").unwrap();
        assert_eq!(s.advance_blocker(), Some(AdvanceBlocker::SubcategoryMissing));
        s.select_main_category("other").unwrap();
        assert_eq!(s.advance_blocker(), Some(AdvanceBlocker::CustomNameMissing));
        s.set_custom_name("  ").unwrap();
        assert!(!s.can_advance());
        s.set_custom_name("Artisan Spice Mix").unwrap();
        assert!(s.can_advance());
    }

    #[test]
    fn section_gate_lists_unanswered_questions() {
        let mut s = at_labeling();
        s.set_answer("nutritionFacts", Answer::Yes).unwrap();
        match s.next() {
            Err(WizardError::Blocked {
                blocker: AdvanceBlocker::UnansweredQuestions { section, missing },
                ..
            }) => {
                assert_eq!(section, SectionId::Labeling);
                assert_eq!(missing.len(), 5);
                assert_eq!(missing[0], "ingredientList");
            }
            other => panic!("expected Blocked, got {other:?}"),
        }
        answer_section(&mut s, SectionId::Labeling, Answer::NotApplicable);
        assert_eq!(s.next().unwrap(), WizardStep::Section(SectionId::Facility));
    }

    #[test]
    fn set_answer_rejects_unknown_question() {
        let mut s = WizardState::new();
        assert!(matches!(
            s.set_answer("bogus", Answer::Yes),
            Err(WizardError::UnknownQuestion(_))
        ));
        assert!(s.answers().is_empty());
    }

    #[test]
    fn meat_inquiry_step_appears_and_gates() {
        let mut s = WizardState::new();
        s.select_mode(CaptureMode::Manual);
        s.next().unwrap();
        s.select_main_category("convenience").unwrap();
        s.select_subcategory("canned_food").unwrap();
        assert_eq!(s.next().unwrap(), WizardStep::MeatInquiry);
        assert_eq!(s.advance_blocker(), Some(AdvanceBlocker::MeatAnswerMissing));
        s.answer_meat_inquiry(ContainsMeat::Yes).unwrap();
        assert!(s.steps().contains(&WizardStep::Section(SectionId::Usda)));
        s.answer_meat_inquiry(ContainsMeat::No).unwrap();
        assert!(!s.steps().contains(&WizardStep::Section(SectionId::Usda)));
    }

    #[test]
    fn removed_current_step_falls_back() {
        let mut s = WizardState::new();
        s.select_mode(CaptureMode::Manual);
        s.next().unwrap();
        s.select_main_category("convenience").unwrap();
        s.select_subcategory("canned_food").unwrap();
        s.next().unwrap();
        assert_eq!(s.current_step(), WizardStep::MeatInquiry);

        s.select_subcategory("rice").unwrap();
        assert_eq!(s.current_step(), WizardStep::CategorySelect);
    }

    #[test]
    fn previous_walks_back() {
        let mut s = at_labeling();
        assert_eq!(s.previous().unwrap(), WizardStep::CategorySelect);
        assert_eq!(s.previous().unwrap(), WizardStep::ModeSelect);
        assert!(s.previous().is_err());
    }

    #[test]
    fn progress_counts_from_one() {
        let s = at_labeling();
        assert_eq!(s.progress(), Progress { current: 3, total: 7 });
        assert_eq!(s.step_labels().len(), 7);
    }

    #[test]
    fn full_manual_flow_submits() {
        let mut s = at_labeling();
        for id in [SectionId::Labeling, SectionId::Facility, SectionId::Safety, SectionId::ShelfLife] {
            answer_section(&mut s, id, Answer::Yes);
            s.next().unwrap();
        }
        assert_eq!(s.current_step(), WizardStep::Review);
        assert!(s.can_advance());
        assert!(matches!(s.next(), Err(WizardError::AtLastStep)));

        let submission = s.submit().unwrap();
        assert_eq!(submission.product_category.encode(), "snacks:chips");
        assert_eq!(submission.score, 100);
        assert_eq!(s.live_score().percentage, 100);
    }

    /// Manual canned_food interview answered all Yes, positioned at review.
    fn canned_food_at_review() -> WizardState {
        let mut s = WizardState::new();
        s.select_mode(CaptureMode::Manual);
        s.next().unwrap();
        s.select_main_category("convenience").unwrap();
        s.select_subcategory("canned_food").unwrap();
        s.next().unwrap();
        s.answer_meat_inquiry(ContainsMeat::No).unwrap();
        s.next().unwrap();
        while let WizardStep::Section(id) = s.current_step() {
            answer_section(&mut s, id, Answer::Yes);
            s.next().unwrap();
        }
        assert_eq!(s.current_step(), WizardStep::Review);
        s
    }

    #[test]
    fn reclassifying_at_review_reopens_new_steps() {
        let mut s = canned_food_at_review();
        s.select_subcategory("ready_meals").unwrap();

        assert_eq!(s.current_step(), WizardStep::MeatInquiry);
        assert!(s.steps().contains(&WizardStep::Section(SectionId::ColdChain)));
        assert!(matches!(s.submit(), Err(WizardError::NotAtReview { .. })));

        s.answer_meat_inquiry(ContainsMeat::No).unwrap();
        s.next().unwrap();
        while let WizardStep::Section(id) = s.current_step() {
            if !s.can_advance() {
                answer_section(&mut s, id, Answer::Yes);
            }
            s.next().unwrap();
        }
        assert_eq!(s.submit().unwrap().product_category.encode(), "convenience:ready_meals");
    }

    #[test]
    fn main_category_change_at_review_returns_to_category_select() {
        let mut s = canned_food_at_review();
        s.select_main_category("dairy").unwrap();
        assert_eq!(s.current_step(), WizardStep::CategorySelect);
        assert_eq!(s.advance_blocker(), Some(AdvanceBlocker::SubcategoryMissing));
    }

    #[test]
    fn switching_to_upload_at_review_requires_an_image() {
        let mut s = canned_food_at_review();
        s.select_mode(CaptureMode::Upload);
        assert_eq!(s.current_step(), WizardStep::ImageUpload);
    }

    #[test]
    fn submit_rechecks_every_gate() {
        let mut s = canned_food_at_review();
        s.clear_answer("gmp");
        match s.submit() {
            Err(WizardError::Blocked {
                step,
                blocker: AdvanceBlocker::UnansweredQuestions { missing, .. },
            }) => {
                assert_eq!(step, WizardStep::Section(SectionId::Safety));
                assert_eq!(missing, vec!["gmp"]);
            }
            other => panic!("expected Blocked, got {other:?}"),
        }
        s.set_answer("gmp", Answer::Yes).unwrap();
        assert!(s.submit().is_ok());
    }

    #[test]
    fn submit_outside_review_is_rejected() {
        let s = at_labeling();
        assert!(matches!(s.submit(), Err(WizardError::NotAtReview { .. })));
    }

    #[test]
    fn select_image_clears_previous_analysis() {
        let mut s = WizardState::new();
        s.select_image(Some(image()));
        s.analysis = Some(PackagingAnalysis::default());
        s.select_image(Some(image()));
        assert!(s.analysis().is_none());
        assert!(s.image().is_some());
    }

    #[test]
    fn summary_request_translates_keys() {
        let mut s = at_labeling();
        s.set_answer("netQuantity", Answer::No).unwrap();
        let req = s.summary_request(|key| format!("<{key}>")).unwrap();
        assert_eq!(req.product_category, "<categories.sub.chips>");
        assert!(req
            .failed_items
            .contains(&"<questions.labeling.netQuantity.question>".to_string()));
        assert_eq!(req.score, s.live_score().percentage);
    }

    fn at_upload() -> WizardState {
        let mut s = WizardState::new();
        s.select_mode(CaptureMode::Upload);
        s.next().unwrap();
        s.select_main_category("snacks").unwrap();
        s.select_subcategory("chips").unwrap();
        s.next().unwrap();
        assert_eq!(s.current_step(), WizardStep::ImageUpload);
        s
    }

    #[tokio::test]
    async fn analysis_merges_answers_and_advances() {
        let mut s = at_upload();
        s.set_answer("netQuantity", Answer::Yes).unwrap();
        s.select_image(Some(image()));
        let analyzer = FixedAnalyzer::ok(&[
            ("nutritionFacts", Answer::Yes),
            ("netQuantity", Answer::No),
            ("countryOfOrigin", Answer::NotApplicable),
        ]);

        let notes = s.analyze_image(&analyzer).await.unwrap().overall_notes.clone();
        assert_eq!(notes, "ok");
        assert_eq!(s.answers().get("netQuantity"), Some(Answer::No));
        assert_eq!(s.answers().get("countryOfOrigin"), Some(Answer::NotApplicable));
        assert_eq!(s.current_step(), WizardStep::Section(SectionId::Labeling));
        assert!(s.analysis().is_some());
        assert_eq!(analyzer.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_analysis_leaves_state_unchanged() {
        let mut s = at_upload();
        s.set_answer("gmp", Answer::Partial).unwrap();
        s.select_image(Some(image()));
        let before_answers = s.answers().clone();

        let err = s
            .analyze_image(&FixedAnalyzer::failing("Invalid AI response"))
            .await
            .unwrap_err();
        assert!(matches!(err, WizardError::Analysis(AnalysisError::Rejected { .. })));
        assert_eq!(s.answers(), &before_answers);
        assert_eq!(s.current_step(), WizardStep::ImageUpload);
        assert!(s.analysis().is_none());
        assert_eq!(s.classification().subcategory(), Some("chips"));
    }

    #[tokio::test]
    async fn analysis_before_image_step_is_rejected() {
        let mut s = WizardState::new();
        s.select_mode(CaptureMode::Upload);
        s.next().unwrap();
        s.select_image(Some(image()));
        let analyzer = FixedAnalyzer::ok(&[("nutritionFacts", Answer::Yes)]);

        let err = s.analyze_image(&analyzer).await.unwrap_err();
        assert!(matches!(
            err,
            WizardError::WrongStep {
                expected: WizardStep::ImageUpload,
                current: WizardStep::CategorySelect,
            }
        ));
        assert_eq!(s.current_step(), WizardStep::CategorySelect);
        assert!(s.answers().is_empty());
        assert_eq!(analyzer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn analysis_in_manual_mode_is_rejected() {
        let mut s = at_labeling();
        s.select_image(Some(image()));
        let analyzer = FixedAnalyzer::ok(&[("nutritionFacts", Answer::Yes)]);

        let err = s.analyze_image(&analyzer).await.unwrap_err();
        assert!(matches!(
            err,
            WizardError::NotUploadMode {
                mode: Some(CaptureMode::Manual)
            }
        ));
        assert_eq!(s.current_step(), WizardStep::Section(SectionId::Labeling));
        assert!(s.answers().is_empty());
        assert_eq!(analyzer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn analysis_past_image_step_is_rejected() {
        let mut s = at_upload();
        s.select_image(Some(image()));
        s.next().unwrap();
        assert_eq!(s.current_step(), WizardStep::Section(SectionId::Labeling));

        let analyzer = FixedAnalyzer::ok(&[]);
        assert!(matches!(
            s.analyze_image(&analyzer).await,
            Err(WizardError::WrongStep { .. })
        ));
        assert_eq!(s.current_step(), WizardStep::Section(SectionId::Labeling));
    }

    #[tokio::test]
    async fn analysis_without_image_is_rejected() {
        let mut s = at_upload();
        let analyzer = FixedAnalyzer::ok(&[]);
        assert!(matches!(
            s.analyze_image(&analyzer).await,
            Err(WizardError::NoImageSelected)
        ));
        assert_eq!(analyzer.calls.load(Ordering::SeqCst), 0);
    }
}
