//! # Score Subcommand
//!
//! Scores an answer sheet against the sections a category token activates.
//!
//! The answer file maps question ids to `yes | no | partial | notApplicable`,
//! as JSON (`.json`) or YAML (anything else):
//!
//! ```json
//! { "nutritionFacts": "yes", "allergenDeclaration": "partial", "fsisEstablishment": "no" }
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use fcc_core::Answers;
use fcc_engine::{resolve_token, review, AssessmentReview};

use crate::{display_label, effective_meat, parse_token, MeatArg};

/// Arguments for the score subcommand.
#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Category token.
    pub token: String,

    /// Path to the answer file.
    #[arg(long)]
    pub answers: PathBuf,

    /// Answer to the meat inquiry, for subcategories that ask it.
    #[arg(long, value_enum)]
    pub contains_meat: Option<MeatArg>,

    /// Emit the full review as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Read an answer file. Ids outside the catalog are kept but reported.
pub fn load_answers(path: &Path) -> Result<Answers> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answer file: {}", path.display()))?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let answers: Answers = if is_json {
        serde_json::from_str(&text)
            .with_context(|| format!("invalid JSON answer file: {}", path.display()))?
    } else {
        serde_yaml::from_str(&text)
            .with_context(|| format!("invalid YAML answer file: {}", path.display()))?
    };

    for (id, _) in answers.iter() {
        if fcc_catalog::question(id).is_none() {
            tracing::warn!(question = id, "answer for unknown question id ignored by scoring");
        }
    }
    Ok(answers)
}

/// Review the answer sheet named by the arguments.
pub fn review_for(args: &ScoreArgs) -> Result<AssessmentReview> {
    let token = parse_token(&args.token)?;
    let meat = effective_meat(&token, args.contains_meat);
    let answers = load_answers(&args.answers)?;
    Ok(review(&answers, &resolve_token(&token, meat)))
}

/// Execute the score subcommand.
pub fn run_score(args: &ScoreArgs) -> Result<u8> {
    let token = parse_token(&args.token)?;
    let result = review_for(args)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(0);
    }

    println!("Category: {} ({})", token, display_label(&token));
    println!("Score:    {}% ({})", result.score.percentage, result.score.status);
    println!();
    for section in &result.sections {
        println!(
            "  {:<12} {:>3}%  {}",
            section.section.as_str(),
            section.score.percentage,
            section.score.status
        );
    }

    if !result.failed_questions.is_empty() {
        println!();
        println!("Failed items:");
        for id in &result.failed_questions {
            println!("  - {id}");
        }
    }
    if result.attention_count > 0 {
        println!();
        println!("{} item(s) answered no", result.attention_count);
    }
    for notice in &result.notices {
        println!("Notice: {}", notice.text_key());
    }
    Ok(0)
}
