//! # fcc-cli: Food Compliance Checker Command-Line Interface
//!
//! Provides the `fcc` tool, a thin front-end over the engine crates.
//!
//! ## Subcommands
//!
//! - `fcc categories`: Taxonomy tree with trigger flags.
//! - `fcc sections`: Active checklist sections for a category token.
//! - `fcc steps`: Interview step sequence for a token and capture mode.
//! - `fcc score`: Score an answer sheet and list failed items.
//! - `fcc analyze`: Send a package photo to the image-analysis service.
//!
//! ```bash
//! fcc sections snacks:jerky
//! fcc steps convenience:instant_noodles --mode upload --contains-meat yes
//! fcc score dairy:milk --answers answers.json --json
//! ```
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from business logic.
//! - Handlers delegate to the engine crates and only format output.

pub mod analyze;
pub mod categories;
pub mod config;
pub mod score;
pub mod sections;
pub mod steps;

use anyhow::{Context, Result};
use clap::ValueEnum;

use fcc_catalog::{main_category, needs_meat_inquiry, validate};
use fcc_core::{CategoryLabel, CategoryToken, ContainsMeat};
use fcc_wizard::ClassificationState;

/// `--contains-meat` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MeatArg {
    Yes,
    No,
}

impl From<MeatArg> for ContainsMeat {
    fn from(arg: MeatArg) -> Self {
        match arg {
            MeatArg::Yes => ContainsMeat::Yes,
            MeatArg::No => ContainsMeat::No,
        }
    }
}

/// Decode a category token and check it against the taxonomy.
pub fn parse_token(raw: &str) -> Result<CategoryToken> {
    let token = CategoryToken::decode(raw).with_context(|| format!("invalid category token {raw:?}"))?;
    validate(&token).with_context(|| format!("category token {raw:?} is not in the catalog"))?;
    Ok(token)
}

/// The meat answer that actually reaches the resolver.
///
/// Only subcategories that ask the meat inquiry take an answer; anywhere
/// else the flag is ignored with a warning.
pub fn effective_meat(token: &CategoryToken, meat: Option<MeatArg>) -> ContainsMeat {
    let Some(meat) = meat else {
        return ContainsMeat::Unknown;
    };
    if token.sub_id().is_some_and(needs_meat_inquiry) {
        meat.into()
    } else {
        tracing::warn!(token = %token, "--contains-meat ignored: this category does not ask the meat inquiry");
        ContainsMeat::Unknown
    }
}

/// Replay a token through the classification transitions.
///
/// Legacy flat categories that are not main categories yield an empty
/// classification; they have no subcategory and never ask the meat inquiry.
pub fn classification_for(token: &CategoryToken, meat: ContainsMeat) -> Result<ClassificationState> {
    let mut state = ClassificationState::new();
    if main_category(token.main_id()).is_none() {
        return Ok(state);
    }
    state = state.select_main_category(token.main_id())?;
    if let Some(sub) = token.sub_id() {
        state = state.select_subcategory(sub)?;
    }
    if let Some(name) = token.custom_name() {
        state = state.set_custom_name(name)?;
    }
    if state.needs_meat_inquiry() && meat.is_known() {
        state = state.answer_meat_inquiry(meat)?;
    }
    Ok(state)
}

/// Human-readable category display: literal custom names, text keys otherwise.
pub fn display_label(token: &CategoryToken) -> String {
    match token.label() {
        CategoryLabel::Literal(name) => name,
        CategoryLabel::Key(key) => key,
    }
}
