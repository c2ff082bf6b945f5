//! Project configuration module.
//!
//! Handles loading, validating, and merging the optional `folio.toml` in the
//! project root. Stock defaults reproduce the conventional layout, so a
//! project with no config file builds exactly like one with the stock file.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [build]
//! content = "contents/content.md"        # Input for `folio build` with no arguments
//! deploy_content = "contents/index.md"   # Input used by `folio deploy`
//!
//! [pdf]
//! format = "A4"                          # A3, A4, A5, Letter, Legal
//! margin_mm = 2.0                        # Uniform margin on all four sides
//! scale = 0.65                           # Content scale factor (0.1 - 2.0)
//!
//! [deploy]
//! html_target = "index.html"             # Where the primary page is moved
//! pdf_target = "files/resume.pdf"        # Where the résumé PDF is moved
//! ```
//!
//! Paths are relative to the project root. Positional CLI arguments win over
//! config values. Unknown keys are rejected to catch typos early.

use crate::pdf::{self, PaperFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const CONFIG_FILE: &str = "folio.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Project configuration loaded from `folio.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    pub build: BuildConfig,
    pub pdf: PdfConfig,
    pub deploy: DeployConfig,
}

impl ProjectConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.build.content.trim().is_empty() || self.build.deploy_content.trim().is_empty() {
            return Err(ConfigError::Validation(
                "build.content and build.deploy_content must not be empty".into(),
            ));
        }
        if !(pdf::MIN_SCALE..=pdf::MAX_SCALE).contains(&self.pdf.scale) {
            return Err(ConfigError::Validation(format!(
                "pdf.scale must be {}-{}",
                pdf::MIN_SCALE,
                pdf::MAX_SCALE
            )));
        }
        if self.pdf.margin_mm.is_nan() || self.pdf.margin_mm < 0.0 {
            return Err(ConfigError::Validation(
                "pdf.margin_mm must not be negative".into(),
            ));
        }
        if self.deploy.html_target.trim().is_empty() || self.deploy.pdf_target.trim().is_empty() {
            return Err(ConfigError::Validation(
                "deploy targets must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Content inputs for the build stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    pub content: String,
    pub deploy_content: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            content: "contents/content.md".to_string(),
            deploy_content: "contents/index.md".to_string(),
        }
    }
}

/// Page geometry for the PDF export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PdfConfig {
    pub format: PaperFormat,
    pub margin_mm: f64,
    pub scale: f64,
}

impl Default for PdfConfig {
    fn default() -> Self {
        let options = pdf::PdfOptions::default();
        Self {
            format: options.format,
            margin_mm: options.margin_mm,
            scale: options.scale,
        }
    }
}

impl PdfConfig {
    pub fn options(&self) -> pdf::PdfOptions {
        pdf::PdfOptions {
            format: self.format,
            margin_mm: self.margin_mm,
            scale: self.scale,
        }
    }
}

/// Final locations of the deployed artifacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeployConfig {
    pub html_target: String,
    pub pdf_target: String,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            html_target: "index.html".to_string(),
            pdf_target: "files/resume.pdf".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(ProjectConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `folio.toml` from the project root as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = root.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Load config from the project root: stock defaults, user overrides, validation.
pub fn load_config(root: &Path) -> Result<ProjectConfig, ConfigError> {
    let merged = match load_raw_config(root)? {
        Some(overlay) => merge_toml(stock_defaults_value(), overlay),
        None => stock_defaults_value(),
    };
    let config: ProjectConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `folio.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Folio Configuration
# ===================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Paths are relative to the project root.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Build
# ---------------------------------------------------------------------------
[build]
# Markdown file with the ---json frontmatter, used when `folio build` gets no input.
content = "contents/content.md"

# Markdown file built by `folio deploy`. Its outputs are named after its stem
# (index.md -> index.generate.html, index.generate.resume.html).
deploy_content = "contents/index.md"

# ---------------------------------------------------------------------------
# PDF export (headless Chrome)
# ---------------------------------------------------------------------------
[pdf]
# Paper size: A3, A4, A5, Letter or Legal.
format = "A4"

# Margin on all four sides, in millimetres.
margin_mm = 2.0

# Content scale factor. Chrome accepts 0.1 to 2.0.
scale = 0.65

# ---------------------------------------------------------------------------
# Deploy
# ---------------------------------------------------------------------------
[deploy]
# Destination of the primary page. Existing files are overwritten.
html_target = "index.html"

# Destination of the résumé PDF. Parent directories are created as needed.
pdf_target = "files/resume.pdf"
"##
}
