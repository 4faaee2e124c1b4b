//! # fcc-core: Foundational Types for the Food Compliance Checker
//!
//! This crate is the leaf of the workspace. It defines the vocabulary every
//! other crate speaks: how an answer is spelled, which checklist sections
//! exist, and how a product category is written down as a compact token.
//! It depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Single `SectionId` enum.** Six checklist sections, one definition,
//!    exhaustive `match` everywhere. Adding a section forces every consumer
//!    (resolver, step sequencer, catalog) to handle it.
//!
//! 2. **Unanswered is not an answer.** [`Answers`] stores only explicit
//!    [`Answer`] values. A missing key is "unanswered" and gating logic can
//!    tell it apart from every answer value.
//!
//! 3. **Custom names only under `other`.** [`CategoryToken`] makes a custom
//!    product name without the custom-allowed main category unrepresentable.
//!
//! 4. **Ordered maps on the wire.** Answer sheets serialize through a
//!    `BTreeMap`, so the same answers always produce the same JSON.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `fcc-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod answer;
pub mod category;
pub mod error;
pub mod identity;
pub mod section;

// Re-export primary types for ergonomic imports.
pub use answer::{Answer, Answers, ContainsMeat};
pub use category::{
    CategoryLabel, CategoryToken, TokenParts, CUSTOM_MAIN_CATEGORY, CUSTOM_TOKEN_PREFIX,
};
pub use error::{CategoryError, FccError};
pub use identity::{AssessmentId, UserId};
pub use section::{SectionId, SECTION_COUNT};
