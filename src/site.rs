//! Build stage: content file → HTML pages.
//!
//! Reads a Markdown file with JSON frontmatter and writes two pages into the
//! project root:
//!
//! ```text
//! contents/index.md  →  index.generate.html          (record's own layout)
//!                       index.generate.resume.html   (full-width, for the PDF)
//! ```
//!
//! The primary name defaults to the input stem plus `.generate.html`. When an
//! output path is given only its file name is used; generated pages always
//! land in the project root so the relative stylesheet links resolve.

use crate::frontmatter::{self, Frontmatter, FrontmatterError};
use crate::layout::{ColumnSplit, LayoutError};
use crate::profile::SiteData;
use crate::render;
use maud::Markup;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const GENERATED_SUFFIX: &str = "generate.html";
const RESUME_TAG: &str = "resume";

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Frontmatter(#[from] FrontmatterError),
    #[error("Invalid profile data: {0}")]
    Profile(#[from] serde_json::Error),
    #[error("Invalid layout: {0}")]
    Layout(#[from] LayoutError),
    #[error("Cannot derive an output file name from {0}")]
    OutputName(PathBuf),
}

/// Where the two generated pages go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildPaths {
    pub primary: PathBuf,
    pub resume: PathBuf,
}

impl BuildPaths {
    /// Resolve output locations under `root` for `input`, honouring an
    /// optional output name.
    pub fn resolve(root: &Path, input: &Path, output: Option<&Path>) -> Result<Self, BuildError> {
        let primary_name = match output {
            Some(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .ok_or_else(|| BuildError::OutputName(path.to_path_buf()))?,
            None => {
                let stem = input
                    .file_stem()
                    .ok_or_else(|| BuildError::OutputName(input.to_path_buf()))?;
                format!("{}.{GENERATED_SUFFIX}", stem.to_string_lossy())
            }
        };

        let primary = root.join(&primary_name);
        let resume = root.join(resume_name(Path::new(&primary_name)));
        Ok(Self { primary, resume })
    }
}

/// `index.generate.html` → `index.generate.resume.html`.
fn resume_name(primary: &Path) -> String {
    let stem = primary
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    match primary.extension() {
        Some(ext) => format!("{stem}.{RESUME_TAG}.{}", ext.to_string_lossy()),
        None => format!("{stem}.{RESUME_TAG}"),
    }
}

/// Files written by one build.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub input: PathBuf,
    pub paths: BuildPaths,
}

/// The two renderings of a record: its own layout and the full-width résumé.
pub struct Variants {
    pub primary: Markup,
    pub resume: Markup,
}

/// Render both variants from a parsed frontmatter object.
pub fn render_variants(data: &SiteData) -> Result<Variants, BuildError> {
    let split = ColumnSplit::from_layout(&data.layout)?;
    Ok(Variants {
        primary: render::render_page(data, split),
        resume: render::render_page(data, ColumnSplit::FULL_WIDTH),
    })
}

/// Render both variants from a parsed content document.
pub fn render_frontmatter(frontmatter: Frontmatter) -> Result<Variants, BuildError> {
    let data = SiteData::from_object(frontmatter.data)?;
    render_variants(&data)
}

/// Run the build stage: read `input`, write both pages under `root`.
///
/// Nothing is written unless the document parses and renders completely.
pub fn build(root: &Path, input: &Path, output: Option<&Path>) -> Result<BuildReport, BuildError> {
    let paths = BuildPaths::resolve(root, input, output)?;
    let variants = render_frontmatter(frontmatter::read_frontmatter(input)?)?;

    fs::write(&paths.primary, variants.primary.into_string())?;
    fs::write(&paths.resume, variants.resume.into_string())?;

    Ok(BuildReport {
        input: input.to_path_buf(),
        paths,
    })
}
