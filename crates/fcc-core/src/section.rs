//! # Checklist Sections: Single Source of Truth
//!
//! Defines the `SectionId` enum with all six checklist sections. This is the
//! ONE definition used across the workspace. Every `match` on `SectionId`
//! must be exhaustive, so adding a section is a compile error in the
//! resolver, the step sequencer, and the catalog until each handles it.
//!
//! ## Canonical Order
//!
//! [`SectionId::all()`] lists sections in the only order the rest of the
//! system accepts: base sections, then `usda`, then `coldChain`, then
//! `shelfLife`. Wizard steps and the rendered review both follow it.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::FccError;

/// A checklist section.
///
/// | # | Section | Inclusion |
/// |---|---------|-----------|
/// | 1 | Labeling | always |
/// | 2 | Facility | always |
/// | 3 | Safety | always |
/// | 4 | Usda | meat products |
/// | 5 | ColdChain | refrigerated / frozen products |
/// | 6 | ShelfLife | always, last |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionId {
    /// Package labeling (nutrition facts, ingredients, allergens, ...).
    Labeling,
    /// Facility registration and import notices.
    Facility,
    /// Food safety plans (HACCP, FSMA, GMP).
    Safety,
    /// USDA/FSIS requirements for products containing meat.
    Usda,
    /// Temperature-controlled handling for refrigerated and frozen goods.
    ColdChain,
    /// Date marking, shelf-life validation, storage instructions.
    ShelfLife,
}

/// Total number of checklist sections.
pub const SECTION_COUNT: usize = 6;

impl SectionId {
    /// All six sections in canonical order.
    pub fn all() -> &'static [SectionId] {
        &[
            Self::Labeling,
            Self::Facility,
            Self::Safety,
            Self::Usda,
            Self::ColdChain,
            Self::ShelfLife,
        ]
    }

    /// The three sections present for every product, in order.
    pub fn base() -> &'static [SectionId] {
        &[Self::Labeling, Self::Facility, Self::Safety]
    }

    /// Whether the section is included only when a classification trigger fires.
    pub fn is_conditional(&self) -> bool {
        match self {
            Self::Usda | Self::ColdChain => true,
            Self::Labeling | Self::Facility | Self::Safety | Self::ShelfLife => false,
        }
    }

    /// Returns the camelCase identifier for this section.
    ///
    /// Matches the serde representation and the question text-ref paths.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Labeling => "labeling",
            Self::Facility => "facility",
            Self::Safety => "safety",
            Self::Usda => "usda",
            Self::ColdChain => "coldChain",
            Self::ShelfLife => "shelfLife",
        }
    }

    /// Position in canonical order (0-based).
    pub fn ordinal(&self) -> usize {
        match self {
            Self::Labeling => 0,
            Self::Facility => 1,
            Self::Safety => 2,
            Self::Usda => 3,
            Self::ColdChain => 4,
            Self::ShelfLife => 5,
        }
    }
}

impl std::fmt::Display for SectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionId {
    type Err = FccError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "labeling" => Ok(Self::Labeling),
            "facility" => Ok(Self::Facility),
            "safety" => Ok(Self::Safety),
            "usda" => Ok(Self::Usda),
            "coldChain" => Ok(Self::ColdChain),
            "shelfLife" => Ok(Self::ShelfLife),
            other => Err(FccError::UnknownValue {
                kind: "section",
                value: other.to_string(),
            }),
        }
    }
}
