//! # Section Resolver
//!
//! Maps a product classification to the ordered list of checklist sections
//! that apply to it:
//!
//! 1. `labeling`, `facility`, `safety`, always, in that order.
//! 2. `usda` iff the subcategory is auto-meat or the meat inquiry was
//!    answered yes.
//! 3. `coldChain` iff the main category or subcategory requires cold chain.
//! 4. `shelfLife`, always, last.
//!
//! [`ActiveSections`] can only be built in canonical order without
//! duplicates. Wizard steps and the rendered review iterate it directly.

use serde::Serialize;

use fcc_catalog::{is_auto_meat, requires_cold_chain, section, Section};
use fcc_core::{CategoryToken, ContainsMeat, SectionId};

/// Ordered, duplicate-free set of applicable checklist sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ActiveSections(Vec<&'static Section>);

impl ActiveSections {
    /// Build a set from arbitrary section ids.
    ///
    /// Ids are deduplicated and sorted into canonical order, so the result
    /// upholds the same invariant as [`resolve`]. Useful for scoring a
    /// subset of sections.
    pub fn from_ids(ids: impl IntoIterator<Item = SectionId>) -> Self {
        let mut ids: Vec<SectionId> = ids.into_iter().collect();
        ids.sort_by_key(SectionId::ordinal);
        ids.dedup();
        Self(ids.into_iter().map(section).collect())
    }

    /// Every section in the catalog.
    pub fn all() -> Self {
        Self::from_ids(SectionId::all().iter().copied())
    }

    /// Section ids in order.
    pub fn ids(&self) -> Vec<SectionId> {
        self.0.iter().map(|s| s.id).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static Section> + '_ {
        self.0.iter().copied()
    }

    pub fn as_slice(&self) -> &[&'static Section] {
        &self.0
    }

    pub fn contains(&self, id: SectionId) -> bool {
        self.0.iter().any(|s| s.id == id)
    }

    /// The active section with this id, if any.
    pub fn get(&self, id: SectionId) -> Option<&'static Section> {
        self.iter().find(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Resolve the active sections for a classification.
///
/// A missing main category or subcategory simply fires no trigger; the
/// base sections and `shelfLife` are always present.
pub fn resolve(
    main_id: Option<&str>,
    sub_id: Option<&str>,
    contains_meat: ContainsMeat,
) -> ActiveSections {
    let usda = sub_id.is_some_and(is_auto_meat) || contains_meat.is_yes();
    let cold_chain = main_id.is_some_and(|main| requires_cold_chain(main, sub_id));

    let mut sections: Vec<&'static Section> = SectionId::base().iter().map(|id| section(*id)).collect();
    if usda {
        sections.push(section(SectionId::Usda));
    }
    if cold_chain {
        sections.push(section(SectionId::ColdChain));
    }
    sections.push(section(SectionId::ShelfLife));

    tracing::debug!(
        main = main_id.unwrap_or(""),
        sub = sub_id.unwrap_or(""),
        %contains_meat,
        usda,
        cold_chain,
        "resolved active sections"
    );
    ActiveSections(sections)
}

/// Resolve the active sections for a stored category token.
///
/// Custom tokens resolve under the custom-allowed main category with no
/// subcategory. Legacy bare tokens have no subcategory.
pub fn resolve_token(token: &CategoryToken, contains_meat: ContainsMeat) -> ActiveSections {
    resolve(Some(token.main_id()), token.sub_id(), contains_meat)
}
