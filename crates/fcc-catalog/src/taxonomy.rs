//! # Category Taxonomy
//!
//! Two-level product classification (main category → subcategories) plus
//! the three predicates that turn a classification into regulatory
//! triggers.
//!
//! ## Triggers
//!
//! | Predicate | Effect |
//! |-----------|--------|
//! | [`is_auto_meat`] | product certainly contains meat; USDA section included without asking |
//! | [`needs_meat_inquiry`] | product may contain meat; the interview asks |
//! | [`requires_cold_chain`] | refrigerated/frozen handling; cold-chain section included |
//!
//! Auto-meat and meat-inquiry membership are disjoint. Cold chain is
//! independent of both and is OR'd across a main-category list and a
//! subcategory list.

use serde::Serialize;
use thiserror::Error;

use fcc_core::{CategoryToken, TokenParts, CUSTOM_MAIN_CATEGORY};

// ---------------------------------------------------------------------------
// Catalog types
// ---------------------------------------------------------------------------

/// A subcategory within a main category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubCategory {
    /// Globally unique subcategory id.
    pub id: &'static str,
}

impl SubCategory {
    /// Text key for the subcategory's display name.
    pub fn label_key(&self) -> String {
        format!("categories.sub.{}", self.id)
    }
}

/// A top-level product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MainCategory {
    /// Main category id.
    pub id: &'static str,
    /// Ordered subcategories. Empty for the custom-allowed entry.
    pub subcategories: &'static [SubCategory],
    /// Whether a free-text product name replaces subcategory selection.
    pub allow_custom: bool,
}

impl MainCategory {
    /// Text key for the main category's display name.
    pub fn label_key(&self) -> String {
        format!("categories.main.{}", self.id)
    }

    /// Whether `sub_id` is one of this category's subcategories.
    pub fn contains(&self, sub_id: &str) -> bool {
        self.subcategories.iter().any(|s| s.id == sub_id)
    }
}

/// A token that is well-formed but does not fit the taxonomy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// No main category has this id.
    #[error("unknown main category {0:?}")]
    UnknownMainCategory(String),

    /// The subcategory is not listed under the given main category.
    #[error("subcategory {sub:?} does not belong to main category {main:?}")]
    SubcategoryMismatch {
        /// Main category id.
        main: String,
        /// Offending subcategory id.
        sub: String,
    },

    /// A legacy bare token names neither a main category nor a legacy flat category.
    #[error("unknown legacy category {0:?}")]
    UnknownLegacyCategory(String),
}

// ---------------------------------------------------------------------------
// Content
// ---------------------------------------------------------------------------

const fn sub(id: &'static str) -> SubCategory {
    SubCategory { id }
}

static CATEGORIES: &[MainCategory] = &[
    MainCategory {
        id: "snacks",
        subcategories: &[
            sub("chips"),
            sub("cookies"),
            sub("candy"),
            sub("nuts"),
            sub("dried_fruits"),
            sub("crackers"),
            sub("popcorn"),
            sub("puffed_snacks"),
            sub("jerky"),
        ],
        allow_custom: false,
    },
    MainCategory {
        id: "beverages",
        subcategories: &[
            sub("carbonated"),
            sub("juice"),
            sub("tea_drinks"),
            sub("coffee_drinks"),
            sub("energy_drinks"),
            sub("water"),
            sub("plant_protein_drinks"),
        ],
        allow_custom: false,
    },
    MainCategory {
        id: "condiments",
        subcategories: &[
            sub("soy_sauce"),
            sub("vinegar"),
            sub("chili_sauce"),
            sub("ketchup"),
            sub("oyster_sauce"),
            sub("salad_dressing"),
            sub("spice_powder"),
            sub("cooking_oil"),
        ],
        allow_custom: false,
    },
    MainCategory {
        id: "convenience",
        subcategories: &[
            sub("instant_noodles"),
            sub("noodles_pasta"),
            sub("rice"),
            sub("instant_porridge"),
            sub("self_heating"),
            sub("canned_food"),
            sub("ready_meals"),
        ],
        allow_custom: false,
    },
    MainCategory {
        id: "bakery",
        subcategories: &[
            sub("bread"),
            sub("cake"),
            sub("pastry"),
            sub("mooncake"),
            sub("pie_tart"),
            sub("chocolate"),
            sub("jelly_pudding"),
        ],
        allow_custom: false,
    },
    MainCategory {
        id: "dairy",
        subcategories: &[
            sub("milk"),
            sub("yogurt"),
            sub("cheese"),
            sub("butter"),
            sub("cream"),
            sub("tofu_soy"),
        ],
        allow_custom: false,
    },
    MainCategory {
        id: "frozen",
        subcategories: &[
            sub("frozen_meat"),
            sub("frozen_seafood"),
            sub("frozen_vegetables"),
            sub("frozen_dumplings"),
            sub("frozen_pizza"),
            sub("ice_cream"),
        ],
        allow_custom: false,
    },
    MainCategory {
        id: "health",
        subcategories: &[
            sub("supplements"),
            sub("protein_powder"),
            sub("nutrition_bars"),
            sub("meal_replacement"),
            sub("organic_food"),
            sub("sugar_free"),
        ],
        allow_custom: false,
    },
    MainCategory {
        id: "ingredients",
        subcategories: &[
            sub("rice_grains"),
            sub("flour"),
            sub("dried_goods"),
            sub("beans"),
            sub("sugar"),
            sub("salt"),
            sub("tea_leaves"),
            sub("spices"),
        ],
        allow_custom: false,
    },
    MainCategory {
        id: CUSTOM_MAIN_CATEGORY,
        subcategories: &[],
        allow_custom: true,
    },
];

/// Subcategories that always contain meat.
const AUTO_MEAT: &[&str] = &["jerky", "frozen_meat"];

/// Subcategories that may or may not contain meat.
const MEAT_INQUIRY: &[&str] = &[
    "instant_noodles",
    "instant_porridge",
    "self_heating",
    "canned_food",
    "ready_meals",
    "frozen_dumplings",
    "frozen_pizza",
    "mooncake",
    "pastry",
    "pie_tart",
];

/// Main categories whose every product needs cold-chain handling.
const COLD_CHAIN_MAIN: &[&str] = &["dairy", "frozen"];

/// Individual subcategories needing cold-chain handling outside those mains.
const COLD_CHAIN_SUB: &[&str] = &["cake", "ready_meals", "jelly_pudding"];

/// Flat category ids from the pre-subcategory schema.
pub const LEGACY_CATEGORIES: &[&str] = &[
    "chips",
    "cookies",
    "candy",
    "nuts",
    "dried_fruits",
    "crackers",
    "popcorn",
    "other",
];

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// All main categories in display order. Never empty.
pub fn main_categories() -> &'static [MainCategory] {
    CATEGORIES
}

/// Look up a main category by id.
pub fn main_category(id: &str) -> Option<&'static MainCategory> {
    CATEGORIES.iter().find(|c| c.id == id)
}

/// Subcategories of `main_id`, in order.
///
/// Empty for the custom-allowed entry and for unknown ids.
pub fn subcategories_of(main_id: &str) -> &'static [SubCategory] {
    main_category(main_id).map_or(&[], |c| c.subcategories)
}

/// Whether the subcategory certainly contains meat.
pub fn is_auto_meat(sub_id: &str) -> bool {
    AUTO_MEAT.contains(&sub_id)
}

/// Whether the interview must ask if the product contains meat.
pub fn needs_meat_inquiry(sub_id: &str) -> bool {
    MEAT_INQUIRY.contains(&sub_id)
}

/// Whether the product needs temperature-controlled handling.
///
/// True if either the main category or the subcategory is on a cold-chain
/// list. A missing subcategory only consults the main-category list.
pub fn requires_cold_chain(main_id: &str, sub_id: Option<&str>) -> bool {
    COLD_CHAIN_MAIN.contains(&main_id) || sub_id.is_some_and(|s| COLD_CHAIN_SUB.contains(&s))
}

/// Check a decoded token against the taxonomy.
///
/// - Catalog tokens need a known main category that lists the subcategory.
/// - Custom tokens are always valid; their main category is fixed by construction.
/// - Bare tokens must name a main category or a legacy flat category.
pub fn validate(token: &CategoryToken) -> Result<(), CatalogError> {
    match token.parts() {
        TokenParts::Catalog { main, sub } => {
            let category = main_category(main)
                .ok_or_else(|| CatalogError::UnknownMainCategory(main.to_string()))?;
            if category.contains(sub) {
                Ok(())
            } else {
                Err(CatalogError::SubcategoryMismatch {
                    main: main.to_string(),
                    sub: sub.to_string(),
                })
            }
        }
        TokenParts::Custom { .. } => Ok(()),
        TokenParts::Bare { main } => {
            if main_category(main).is_some() || LEGACY_CATEGORIES.contains(&main) {
                Ok(())
            } else {
                Err(CatalogError::UnknownLegacyCategory(main.to_string()))
            }
        }
    }
}
