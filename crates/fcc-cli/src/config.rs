//! # CLI Configuration File
//!
//! Optional YAML file passed with `--config`:
//!
//! ```yaml
//! analysis:
//!   url: http://127.0.0.1:3001
//!   timeout_secs: 30
//! language: zh
//! ```
//!
//! Values in the file override the `FCC_ANALYSIS_*` environment defaults.
//! The bearer token is never read from the file; use `FCC_ANALYSIS_TOKEN`.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use fcc_analysis::{AnalysisConfig, Language};

/// Parsed `fcc.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    #[serde(default)]
    pub analysis: AnalysisSection,
    /// Default language hint for `fcc analyze`.
    #[serde(default)]
    pub language: Option<Language>,
}

/// The `analysis:` block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisSection {
    pub url: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl CliConfig {
    /// Read and parse a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_yaml(&text).with_context(|| format!("invalid config file: {}", path.display()))
    }

    /// Parse YAML text. An empty document is the default config.
    pub fn from_yaml(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    /// Load `path` if given, else the default config.
    pub fn load_optional(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    /// Analysis service settings: environment first, then file overrides.
    pub fn analysis_config(&self) -> Result<AnalysisConfig> {
        let mut config = AnalysisConfig::from_env().context("invalid analysis environment")?;
        if let Some(url) = &self.analysis.url {
            let token = config.api_token.take();
            config = AnalysisConfig::with_base_url(url)
                .with_context(|| format!("invalid analysis url in config: {url}"))?;
            config.api_token = token;
        }
        if let Some(timeout) = self.analysis.timeout_secs {
            config.timeout_secs = timeout;
        }
        Ok(config)
    }
}
