//! # Steps Subcommand
//!
//! Prints the interview step sequence for a classification and capture mode.

use anyhow::Result;
use clap::{Args, ValueEnum};

use fcc_wizard::{build_steps, CaptureMode, WizardStep};

use crate::{classification_for, effective_meat, parse_token, MeatArg};

/// `--mode` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Upload,
    Manual,
}

impl From<ModeArg> for CaptureMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Upload => CaptureMode::Upload,
            ModeArg::Manual => CaptureMode::Manual,
        }
    }
}

/// Arguments for the steps subcommand.
#[derive(Args, Debug)]
pub struct StepsArgs {
    /// Category token.
    pub token: String,

    /// Capture mode.
    #[arg(long, value_enum)]
    pub mode: ModeArg,

    /// Answer to the meat inquiry, for subcategories that ask it.
    #[arg(long, value_enum)]
    pub contains_meat: Option<MeatArg>,

    /// Emit JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Build the step list for the arguments.
pub fn steps_for(args: &StepsArgs) -> Result<Vec<WizardStep>> {
    let token = parse_token(&args.token)?;
    let meat = effective_meat(&token, args.contains_meat);
    let classification = classification_for(&token, meat)?;
    let sections = fcc_engine::resolve_token(&token, meat);
    Ok(build_steps(Some(args.mode.into()), &classification, &sections))
}

/// Execute the steps subcommand.
pub fn run_steps(args: &StepsArgs) -> Result<u8> {
    let steps = steps_for(args)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&steps)?);
        return Ok(0);
    }

    for (i, step) in steps.iter().enumerate() {
        println!("{:>2}. {:<16} {}", i + 1, step.to_string(), step.label_key());
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fcc_core::SectionId;

    fn args(token: &str, mode: ModeArg, meat: Option<MeatArg>) -> StepsArgs {
        StepsArgs {
            token: token.to_string(),
            mode,
            contains_meat: meat,
            json: false,
        }
    }

    #[test]
    fn upload_flow_with_meat_inquiry() {
        let steps = steps_for(&args("convenience:instant_noodles", ModeArg::Upload, Some(MeatArg::Yes))).unwrap();
        assert_eq!(
            steps,
            vec![
                WizardStep::ModeSelect,
                WizardStep::CategorySelect,
                WizardStep::MeatInquiry,
                WizardStep::ImageUpload,
                WizardStep::Section(SectionId::Labeling),
                WizardStep::Section(SectionId::Facility),
                WizardStep::Section(SectionId::Safety),
                WizardStep::Section(SectionId::Usda),
                WizardStep::Section(SectionId::ShelfLife),
                WizardStep::Review,
            ]
        );
    }

    #[test]
    fn manual_flow_has_no_upload_step() {
        let steps = steps_for(&args("snacks:chips", ModeArg::Manual, None)).unwrap();
        assert!(!steps.contains(&WizardStep::ImageUpload));
        assert!(!steps.contains(&WizardStep::MeatInquiry));
        assert_eq!(steps.len(), 2 + 4 + 1);
    }

    #[test]
    fn custom_token_flow() {
        let steps = steps_for(&args("custom:Spice Mix", ModeArg::Manual, None)).unwrap();
        assert_eq!(steps.first(), Some(&WizardStep::ModeSelect));
        assert_eq!(steps.last(), Some(&WizardStep::Review));
    }
}
