//! # fcc-catalog: Category Taxonomy & Section Catalog
//!
//! Immutable content tables, defined once as `static` data:
//!
//! - **Taxonomy** (`taxonomy.rs`): main categories → subcategories, the one
//!   custom-allowed entry, and the three classification predicates that
//!   decide which conditional sections a product triggers (auto-meat,
//!   meat-inquiry-needed, cold-chain-required).
//!
//! - **Sections** (`sections.rs`): the six checklist sections and their
//!   ordered, weighted questions.
//!
//! Nothing here is mutable. "Currently selected" state lives in the
//! interview session (`fcc-wizard`), never in these tables.
//!
//! Weights are compliance-content constants, not computed values.

pub mod sections;
pub mod taxonomy;

pub use sections::{all_questions, question, section, Question, Section};
pub use taxonomy::{
    is_auto_meat, main_categories, main_category, needs_meat_inquiry, requires_cold_chain,
    subcategories_of, validate, CatalogError, MainCategory, SubCategory, LEGACY_CATEGORIES,
};
