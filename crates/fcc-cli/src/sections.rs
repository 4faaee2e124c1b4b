//! # Sections Subcommand
//!
//! Resolves the active checklist sections for a category token and lists
//! their weighted questions.

use anyhow::Result;
use clap::Args;

use fcc_engine::{resolve_token, ActiveSections};

use crate::{display_label, effective_meat, parse_token, MeatArg};

/// Arguments for the sections subcommand.
#[derive(Args, Debug)]
pub struct SectionsArgs {
    /// Category token, e.g. `snacks:jerky`, `custom:Spice Mix`, `cookies`.
    pub token: String,

    /// Answer to the meat inquiry, for subcategories that ask it.
    #[arg(long, value_enum)]
    pub contains_meat: Option<MeatArg>,

    /// Emit JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Resolve the sections named by the arguments.
pub fn active_sections(args: &SectionsArgs) -> Result<ActiveSections> {
    let token = parse_token(&args.token)?;
    let meat = effective_meat(&token, args.contains_meat);
    Ok(resolve_token(&token, meat))
}

/// Execute the sections subcommand.
pub fn run_sections(args: &SectionsArgs) -> Result<u8> {
    let token = parse_token(&args.token)?;
    let sections = active_sections(args)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&sections)?);
        return Ok(0);
    }

    println!("Category: {} ({})", token, display_label(&token));
    println!();
    for section in sections.iter() {
        println!("{} (weight {})", section.id, section.total_weight());
        for q in section.questions {
            println!("  {:<24} {:>3}", q.id, q.weight);
        }
    }
    println!();
    println!("Total: {} sections", sections.len());
    Ok(0)
}
