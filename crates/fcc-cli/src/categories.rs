//! # Categories Subcommand
//!
//! Prints the product taxonomy with the regulatory triggers each entry fires.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use fcc_catalog::{is_auto_meat, main_categories, needs_meat_inquiry, requires_cold_chain};

/// Arguments for the categories subcommand.
#[derive(Args, Debug)]
pub struct CategoriesArgs {
    /// Emit JSON instead of a text tree.
    #[arg(long)]
    pub json: bool,
}

/// One taxonomy row with its trigger flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRow {
    pub main: &'static str,
    pub sub: Option<&'static str>,
    pub label_key: String,
    pub allow_custom: bool,
    pub auto_meat: bool,
    pub meat_inquiry: bool,
    pub cold_chain: bool,
}

/// Flatten the taxonomy into rows: each main category, then its subcategories.
pub fn category_rows() -> Vec<CategoryRow> {
    let mut rows = Vec::new();
    for main in main_categories() {
        rows.push(CategoryRow {
            main: main.id,
            sub: None,
            label_key: main.label_key(),
            allow_custom: main.allow_custom,
            auto_meat: false,
            meat_inquiry: false,
            cold_chain: requires_cold_chain(main.id, None),
        });
        rows.extend(main.subcategories.iter().map(|sub| CategoryRow {
            main: main.id,
            sub: Some(sub.id),
            label_key: sub.label_key(),
            allow_custom: false,
            auto_meat: is_auto_meat(sub.id),
            meat_inquiry: needs_meat_inquiry(sub.id),
            cold_chain: requires_cold_chain(main.id, Some(sub.id)),
        }));
    }
    rows
}

fn flags(row: &CategoryRow) -> String {
    let mut out = Vec::new();
    if row.allow_custom {
        out.push("custom");
    }
    if row.auto_meat {
        out.push("usda");
    }
    if row.meat_inquiry {
        out.push("meat-inquiry");
    }
    if row.cold_chain {
        out.push("cold-chain");
    }
    if out.is_empty() {
        String::new()
    } else {
        format!("[{}]", out.join(", "))
    }
}

/// Execute the categories subcommand.
pub fn run_categories(args: &CategoriesArgs) -> Result<u8> {
    let rows = category_rows();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(0);
    }

    for row in &rows {
        match row.sub {
            None => println!("{:<14} {}", row.main, flags(row)),
            Some(sub) => println!("  {}:{:<20} {}", row.main, sub, flags(row)),
        }
    }
    println!();
    println!("Total: {} main categories", main_categories().len());
    Ok(0)
}
