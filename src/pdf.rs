//! HTML → PDF export through headless Chrome.
//!
//! The exporter opens a local HTML file in a fresh browser context, waits for
//! navigation to settle, and prints the page with fixed geometry: a named
//! paper size, a uniform margin on all four sides, backgrounds on, and a
//! content scale factor.
//!
//! "Settled" means the load event has fired (`wait_until_navigated`); this is
//! not a network-idle wait, so requests started after load are not awaited.
//!
//! The browser executable is located before anything is launched, so a
//! machine without Chrome fails with install instructions instead of a
//! half-finished run. The [`Browser`] handle lives only inside
//! [`export_pdf`]; dropping it kills the Chrome process on every return path.

use headless_chrome::browser::default_executable;
use headless_chrome::types::PrintToPdfOptions;
use headless_chrome::{Browser, LaunchOptions};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use url::Url;

/// Chrome rejects scale factors outside this range.
pub const MIN_SCALE: f64 = 0.1;
pub const MAX_SCALE: f64 = 2.0;

const MM_PER_INCH: f64 = 25.4;

pub const INSTALL_HELP: &str = "\
Install Chrome or Chromium, for example:
  Debian/Ubuntu:  sudo apt install chromium
  Fedora:         sudo dnf install chromium
  macOS:          brew install --cask google-chrome
or point the CHROME environment variable at an existing executable.";

#[derive(Error, Debug)]
pub enum PdfError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Input not found: {0}")]
    InputNotFound(PathBuf),
    #[error("Cannot build a file URL for {0}")]
    InvalidPath(PathBuf),
    #[error("Invalid PDF option: {0}")]
    InvalidOption(String),
    #[error("Headless Chrome is required to export PDFs ({0}).\n{help}", help = INSTALL_HELP)]
    BrowserMissing(String),
    #[error("Browser error: {0}")]
    Browser(String),
}

/// Named paper sizes, as width × height in inches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PaperFormat {
    A3,
    #[default]
    A4,
    A5,
    Letter,
    Legal,
}

impl PaperFormat {
    pub const ALL: [PaperFormat; 5] = [
        PaperFormat::A3,
        PaperFormat::A4,
        PaperFormat::A5,
        PaperFormat::Letter,
        PaperFormat::Legal,
    ];

    pub fn size_inches(self) -> (f64, f64) {
        match self {
            PaperFormat::A3 => (11.69, 16.54),
            PaperFormat::A4 => (8.27, 11.69),
            PaperFormat::A5 => (5.83, 8.27),
            PaperFormat::Letter => (8.5, 11.0),
            PaperFormat::Legal => (8.5, 14.0),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PaperFormat::A3 => "A3",
            PaperFormat::A4 => "A4",
            PaperFormat::A5 => "A5",
            PaperFormat::Letter => "Letter",
            PaperFormat::Legal => "Legal",
        }
    }
}

impl fmt::Display for PaperFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PaperFormat {
    type Err = PdfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaperFormat::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let names: Vec<&str> = PaperFormat::ALL.iter().map(|f| f.name()).collect();
                PdfError::InvalidOption(format!(
                    "unknown paper format '{s}', expected one of: {}",
                    names.join(", ")
                ))
            })
    }
}

impl TryFrom<String> for PaperFormat {
    type Error = PdfError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PaperFormat> for String {
    fn from(format: PaperFormat) -> Self {
        format.name().to_string()
    }
}

/// Page geometry for one export.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PdfOptions {
    pub format: PaperFormat,
    pub margin_mm: f64,
    pub scale: f64,
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            format: PaperFormat::A4,
            margin_mm: 2.0,
            scale: 0.65,
        }
    }
}

impl PdfOptions {
    pub fn validate(&self) -> Result<(), PdfError> {
        if !(MIN_SCALE..=MAX_SCALE).contains(&self.scale) {
            return Err(PdfError::InvalidOption(format!(
                "scale must be between {MIN_SCALE} and {MAX_SCALE}, got {}",
                self.scale
            )));
        }
        if self.margin_mm.is_nan() || self.margin_mm < 0.0 {
            return Err(PdfError::InvalidOption(format!(
                "margin must not be negative, got {}",
                self.margin_mm
            )));
        }
        Ok(())
    }

    /// Chrome's print parameters: sizes in inches, backgrounds on.
    pub fn print_options(&self) -> PrintToPdfOptions {
        let (width, height) = self.format.size_inches();
        let margin = self.margin_mm / MM_PER_INCH;
        PrintToPdfOptions {
            print_background: Some(true),
            scale: Some(self.scale),
            paper_width: Some(width),
            paper_height: Some(height),
            margin_top: Some(margin),
            margin_bottom: Some(margin),
            margin_left: Some(margin),
            margin_right: Some(margin),
            ..Default::default()
        }
    }
}

/// Result of a successful export.
#[derive(Debug, Clone)]
pub struct PdfReport {
    pub output: PathBuf,
    pub bytes: usize,
}

/// `resume.html` → `resume.pdf`, next to the input.
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension("pdf")
}

/// Locate a Chrome/Chromium executable without launching it.
pub fn locate_browser() -> Result<PathBuf, PdfError> {
    default_executable().map_err(PdfError::BrowserMissing)
}

/// Render `input` (a local HTML file) to a PDF at `output`.
pub fn export_pdf(input: &Path, output: &Path, options: &PdfOptions) -> Result<PdfReport, PdfError> {
    if !input.is_file() {
        return Err(PdfError::InputNotFound(input.to_path_buf()));
    }
    options.validate()?;
    let executable = locate_browser()?;

    let absolute = fs::canonicalize(input)?;
    let url = Url::from_file_path(&absolute).map_err(|()| PdfError::InvalidPath(absolute.clone()))?;

    let browser = Browser::new(LaunchOptions {
        path: Some(executable),
        ..Default::default()
    })
    .map_err(browser_error)?;
    let context = browser.new_context().map_err(browser_error)?;
    let tab = context.new_tab().map_err(browser_error)?;

    tab.navigate_to(url.as_str())
        .map_err(browser_error)?
        .wait_until_navigated()
        .map_err(browser_error)?;
    let pdf = tab
        .print_to_pdf(Some(options.print_options()))
        .map_err(browser_error)?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(output, &pdf)?;

    Ok(PdfReport {
        output: output.to_path_buf(),
        bytes: pdf.len(),
    })
}

fn browser_error(err: impl fmt::Display) -> PdfError {
    PdfError::Browser(err.to_string())
}
