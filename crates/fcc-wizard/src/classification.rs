//! # Classification State
//!
//! The user's product classification as it is being built:
//! main category, then subcategory (or a custom name under `other`), then
//! the meat inquiry if the subcategory calls for one.
//!
//! ## Cascading Reset
//!
//! Every transition returns a *new* state. Picking a main category clears
//! the subcategory, the custom name and the meat answer; picking a
//! subcategory clears the meat answer. These transitions are the only way
//! to change the state, so "the subcategory belongs to the main category"
//! holds for every value of this type.

use serde::Serialize;

use fcc_catalog::{main_category, needs_meat_inquiry};
use fcc_core::{CategoryToken, ContainsMeat, CUSTOM_MAIN_CATEGORY};
use fcc_engine::{resolve, ActiveSections};

use crate::error::WizardError;

/// A product classification in progress.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationState {
    main: Option<&'static str>,
    sub: Option<&'static str>,
    custom_name: Option<String>,
    contains_meat: ContainsMeat,
}

impl ClassificationState {
    /// Nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn main_category(&self) -> Option<&'static str> {
        self.main
    }

    pub fn subcategory(&self) -> Option<&'static str> {
        self.sub
    }

    /// The custom name as typed, untrimmed.
    pub fn custom_name(&self) -> Option<&str> {
        self.custom_name.as_deref()
    }

    pub fn contains_meat(&self) -> ContainsMeat {
        self.contains_meat
    }

    /// Whether the selected main category takes a custom name.
    pub fn is_custom(&self) -> bool {
        self.main == Some(CUSTOM_MAIN_CATEGORY)
    }

    /// Whether the meat inquiry must be asked for this classification.
    pub fn needs_meat_inquiry(&self) -> bool {
        self.sub.is_some_and(needs_meat_inquiry)
    }

    // -- transitions ---------------------------------------------------------

    /// Select a main category. Clears every dependent selection.
    pub fn select_main_category(&self, main_id: &str) -> Result<Self, WizardError> {
        let category = main_category(main_id)
            .ok_or_else(|| WizardError::UnknownMainCategory(main_id.to_string()))?;
        Ok(Self {
            main: Some(category.id),
            ..Self::default()
        })
    }

    /// Back out of the main category. Clears everything.
    pub fn clear_main_category(&self) -> Self {
        Self::default()
    }

    /// Select a subcategory of the current main category. Clears the meat answer.
    pub fn select_subcategory(&self, sub_id: &str) -> Result<Self, WizardError> {
        let main = self.main.ok_or(WizardError::NoMainCategory)?;
        let sub = main_category(main)
            .and_then(|c| c.subcategories.iter().find(|s| s.id == sub_id))
            .ok_or_else(|| WizardError::SubcategoryMismatch {
                main: main.to_string(),
                sub: sub_id.to_string(),
            })?;
        Ok(Self {
            main: self.main,
            sub: Some(sub.id),
            custom_name: None,
            contains_meat: ContainsMeat::Unknown,
        })
    }

    /// Set the free-text product name. Only valid under the custom-allowed
    /// main category.
    pub fn set_custom_name(&self, name: &str) -> Result<Self, WizardError> {
        if !self.is_custom() {
            return Err(WizardError::CustomNameNotAllowed {
                main: self.main.map(str::to_string),
            });
        }
        Ok(Self {
            custom_name: Some(name.to_string()),
            ..self.clone()
        })
    }

    /// Answer the meat inquiry. Only valid when the subcategory asks it.
    pub fn answer_meat_inquiry(&self, contains_meat: ContainsMeat) -> Result<Self, WizardError> {
        if !self.needs_meat_inquiry() {
            return Err(WizardError::MeatInquiryNotApplicable {
                sub: self.sub.map(str::to_string),
            });
        }
        Ok(Self {
            contains_meat,
            ..self.clone()
        })
    }

    // -- derived -------------------------------------------------------------

    /// Whether the category step may be left: a non-blank custom name under
    /// `other`, otherwise both main and subcategory chosen.
    pub fn is_complete(&self) -> bool {
        if self.is_custom() {
            self.custom_name.as_deref().is_some_and(|n| !n.trim().is_empty())
        } else {
            self.main.is_some() && self.sub.is_some()
        }
    }

    /// Encode the classification as a storable token.
    pub fn token(&self) -> Result<CategoryToken, WizardError> {
        if !self.is_complete() {
            return Err(WizardError::IncompleteClassification);
        }
        let main = self.main.ok_or(WizardError::IncompleteClassification)?;
        let custom = if self.is_custom() {
            self.custom_name.as_deref()
        } else {
            None
        };
        Ok(CategoryToken::from_parts(main, self.sub, custom)?)
    }

    /// The checklist sections this classification triggers.
    pub fn active_sections(&self) -> ActiveSections {
        resolve(self.main, self.sub, self.contains_meat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fcc_core::SectionId;

    #[test]
    fn selecting_main_resets_dependents() {
        let state = ClassificationState::new()
            .select_main_category("convenience")
            .unwrap()
            .select_subcategory("canned_food")
            .unwrap()
            .answer_meat_inquiry(ContainsMeat::Yes)
            .unwrap();
        assert_eq!(state.contains_meat(), ContainsMeat::Yes);

        let reset = state.select_main_category("convenience").unwrap();
        assert_eq!(reset.main_category(), Some("convenience"));
        assert_eq!(reset.subcategory(), None);
        assert_eq!(reset.contains_meat(), ContainsMeat::Unknown);
    }

    #[test]
    fn selecting_main_clears_custom_name() {
        let state = ClassificationState::new()
            .select_main_category("other")
            .unwrap()
            .set_custom_name("Artisan Spice Mix")
            .unwrap();
        let reset = state.select_main_category("snacks").unwrap();
        assert_eq!(reset.custom_name(), None);
    }

    #[test]
    fn selecting_sub_resets_meat_answer() {
        let state = ClassificationState::new()
            .select_main_category("bakery")
            .unwrap()
            .select_subcategory("mooncake")
            .unwrap()
            .answer_meat_inquiry(ContainsMeat::No)
            .unwrap()
            .select_subcategory("pastry")
            .unwrap();
        assert_eq!(state.contains_meat(), ContainsMeat::Unknown);
    }

    #[test]
    fn subcategory_must_belong_to_main() {
        let state = ClassificationState::new().select_main_category("dairy").unwrap();
        assert!(matches!(
            state.select_subcategory("jerky"),
            Err(WizardError::SubcategoryMismatch { .. })
        ));
        assert!(matches!(
            ClassificationState::new().select_subcategory("jerky"),
            Err(WizardError::NoMainCategory)
        ));
    }

    #[test]
    fn unknown_main_is_rejected() {
        assert!(matches!(
            ClassificationState::new().select_main_category("pets"),
            Err(WizardError::UnknownMainCategory(_))
        ));
    }

    #[test]
    fn custom_name_only_under_other() {
        let snacks = ClassificationState::new().select_main_category("snacks").unwrap();
        assert!(matches!(
            snacks.set_custom_name("Thing"),
            Err(WizardError::CustomNameNotAllowed { .. })
        ));
    }

    #[test]
    fn meat_inquiry_only_when_needed() {
        let jerky = ClassificationState::new()
            .select_main_category("snacks")
            .unwrap()
            .select_subcategory("jerky")
            .unwrap();
        assert!(!jerky.needs_meat_inquiry());
        assert!(matches!(
            jerky.answer_meat_inquiry(ContainsMeat::No),
            Err(WizardError::MeatInquiryNotApplicable { .. })
        ));
    }

    #[test]
    fn completeness() {
        let other = ClassificationState::new().select_main_category("other").unwrap();
        assert!(!other.is_complete());
        assert!(!other.set_custom_name("   ").unwrap().is_complete());
        assert!(other.set_custom_name("Spice").unwrap().is_complete());

        let snacks = ClassificationState::new().select_main_category("snacks").unwrap();
        assert!(!snacks.is_complete());
        assert!(snacks.select_subcategory("chips").unwrap().is_complete());
        assert!(!ClassificationState::new().is_complete());
    }

    #[test]
    fn token_encoding() {
        let custom = ClassificationState::new()
            .select_main_category("other")
            .unwrap()
            .set_custom_name("Artisan Spice Mix")
            .unwrap();
        assert_eq!(custom.token().unwrap().encode(), "custom:Artisan Spice Mix");

        let chips = ClassificationState::new()
            .select_main_category("snacks")
            .unwrap()
            .select_subcategory("chips")
            .unwrap();
        assert_eq!(chips.token().unwrap().encode(), "snacks:chips");

        assert!(matches!(
            ClassificationState::new().token(),
            Err(WizardError::IncompleteClassification)
        ));
    }

    #[test]
    fn jerky_gets_usda_even_if_meat_unknown() {
        let jerky = ClassificationState::new()
            .select_main_category("snacks")
            .unwrap()
            .select_subcategory("jerky")
            .unwrap();
        assert!(jerky.active_sections().contains(SectionId::Usda));
    }
}
