//! # Analyze Subcommand
//!
//! Sends a package photo to the image-analysis service and prints the
//! proposed answers, already normalized to the checklist vocabulary.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use fcc_analysis::{AnalysisClient, ImageFormat, ImagePayload, Language, PackagingAnalysis};

use crate::config::CliConfig;

/// `--language` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LanguageArg {
    En,
    Zh,
}

impl From<LanguageArg> for Language {
    fn from(arg: LanguageArg) -> Self {
        match arg {
            LanguageArg::En => Language::En,
            LanguageArg::Zh => Language::Zh,
        }
    }
}

/// Arguments for the analyze subcommand.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Package photo (JPEG, PNG, WebP or GIF, at most 10 MiB).
    pub image: PathBuf,

    /// Language for observations. Defaults to the config file, then `en`.
    #[arg(long, value_enum)]
    pub language: Option<LanguageArg>,

    /// Emit the analysis as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Read and validate an image file. Nothing is sent if this fails.
pub fn load_image(path: &Path) -> Result<ImagePayload> {
    let format = path
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(ImageFormat::from_extension)
        .with_context(|| {
            format!(
                "unsupported image type: {} (expected .jpg, .jpeg, .png, .webp or .gif)",
                path.display()
            )
        })?;
    let bytes = std::fs::read(path).with_context(|| format!("failed to read image: {}", path.display()))?;
    let mut payload = ImagePayload::new(bytes, format)
        .with_context(|| format!("image rejected: {}", path.display()))?;
    if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
        payload = payload.with_file_name(name);
    }
    Ok(payload)
}

/// Execute the analyze subcommand.
pub fn run_analyze(args: &AnalyzeArgs, config: &CliConfig) -> Result<u8> {
    let payload = load_image(&args.image)?;
    let language = args
        .language
        .map(Language::from)
        .or(config.language)
        .unwrap_or_default();
    let client = AnalysisClient::new(config.analysis_config()?)?;

    tracing::info!(
        image = %args.image.display(),
        bytes = payload.len(),
        %language,
        "submitting package photo"
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    let analysis = runtime
        .block_on(client.analyze_packaging(&payload, language))
        .context("image analysis failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        print_analysis(&analysis);
    }
    Ok(0)
}

fn print_analysis(analysis: &PackagingAnalysis) {
    println!("Proposed answers:");
    for (id, answer) in analysis.answers.iter() {
        let confidence = analysis
            .confidence
            .get(id)
            .map(|c| format!(" ({c:?})").to_lowercase())
            .unwrap_or_default();
        println!("  {id:<24} {answer}{confidence}");
        if let Some(note) = analysis.observations.get(id) {
            println!("      {note}");
        }
    }
    if !analysis.overall_notes.is_empty() {
        println!();
        println!("{}", analysis.overall_notes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn image_file(ext: &str, body: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(ext).tempfile().unwrap();
        file.write_all(body).unwrap();
        file
    }

    #[test]
    fn loads_png_with_file_name() {
        let file = image_file(".png", b"fake-png-bytes");
        let payload = load_image(file.path()).unwrap();
        assert_eq!(payload.format(), ImageFormat::Png);
        assert_eq!(payload.len(), 14);
        assert!(payload.file_name().ends_with(".png"));
    }

    #[test]
    fn rejects_unsupported_extension() {
        let file = image_file(".bmp", b"BM");
        let err = load_image(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("unsupported image type"));
    }

    #[test]
    fn rejects_empty_image() {
        let file = image_file(".jpg", b"");
        assert!(load_image(file.path()).is_err());
    }

    #[test]
    fn missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_image(&dir.path().join("absent.gif")).is_err());
    }
}
