//! Pipeline orchestration: build → generate → deploy.
//!
//! Stages are cumulative. Asking for a stage runs every stage before it:
//!
//! | Stage | Effect |
//! |-------|--------|
//! | `build` | render `index.generate.html` and `index.generate.resume.html` |
//! | `generate` | build, then export the résumé page to `index.generate.resume.pdf` |
//! | `deploy` | generate, then move the primary page and the PDF to their targets |
//!
//! The first failing step aborts the run. Files already moved stay moved.

use crate::config::ProjectConfig;
use crate::pdf::{self, PdfError, PdfReport};
use crate::site::{self, BuildError, BuildPaths, BuildReport};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeployError {
    #[error("Unknown stage '{name}'. Choose from: {}", Stage::names().join(", "))]
    UnknownStage { name: String },
    #[error("Build failed: {0}")]
    Build(#[from] BuildError),
    #[error("PDF export failed: {0}")]
    Pdf(#[from] PdfError),
    #[error("Cannot move {from} to {to}: {source}")]
    Move {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },
}

/// Pipeline stages in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Stage {
    Build,
    Generate,
    #[default]
    Deploy,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::Build, Stage::Generate, Stage::Deploy];

    pub fn name(self) -> &'static str {
        match self {
            Stage::Build => "build",
            Stage::Generate => "generate",
            Stage::Deploy => "deploy",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Stage::ALL.iter().map(|s| s.name()).collect()
    }

    /// 1-based position, used in progress output.
    pub fn number(self) -> usize {
        self as usize + 1
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Stage {
    type Err = DeployError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stage::ALL
            .into_iter()
            .find(|stage| stage.name() == s)
            .ok_or_else(|| DeployError::UnknownStage {
                name: s.to_string(),
            })
    }
}

/// Progress notifications emitted while the pipeline runs.
#[derive(Debug)]
pub enum DeployEvent {
    StageStarted(Stage),
    Built(BuildReport),
    Exported(PdfReport),
    Moved { from: PathBuf, to: PathBuf },
}

/// Every artifact location involved in a deploy, derived from the config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployPlan {
    pub input: PathBuf,
    pub pages: BuildPaths,
    pub pdf: PathBuf,
    pub html_target: PathBuf,
    pub pdf_target: PathBuf,
}

impl DeployPlan {
    pub fn new(root: &Path, config: &ProjectConfig) -> Result<Self, DeployError> {
        let input = root.join(&config.build.deploy_content);
        let pages = BuildPaths::resolve(root, &input, None)?;
        let pdf = pdf::default_output_path(&pages.resume);
        Ok(Self {
            input,
            pdf,
            pages,
            html_target: root.join(&config.deploy.html_target),
            pdf_target: root.join(&config.deploy.pdf_target),
        })
    }
}

/// Run every stage up to and including `target`.
pub fn run(
    root: &Path,
    config: &ProjectConfig,
    target: Stage,
    mut on_event: impl FnMut(DeployEvent),
) -> Result<(), DeployError> {
    let plan = DeployPlan::new(root, config)?;

    on_event(DeployEvent::StageStarted(Stage::Build));
    let report = site::build(root, &plan.input, None)?;
    on_event(DeployEvent::Built(report));
    if target == Stage::Build {
        return Ok(());
    }

    on_event(DeployEvent::StageStarted(Stage::Generate));
    let report = pdf::export_pdf(&plan.pages.resume, &plan.pdf, &config.pdf.options())?;
    on_event(DeployEvent::Exported(report));
    if target == Stage::Generate {
        return Ok(());
    }

    on_event(DeployEvent::StageStarted(Stage::Deploy));
    for (from, to) in [
        (&plan.pages.primary, &plan.html_target),
        (&plan.pdf, &plan.pdf_target),
    ] {
        relocate(from, to)?;
        on_event(DeployEvent::Moved {
            from: from.clone(),
            to: to.clone(),
        });
    }
    Ok(())
}

/// Move `from` to `to`, replacing any existing file and creating parent directories.
pub fn relocate(from: &Path, to: &Path) -> Result<(), DeployError> {
    let move_error = |source| DeployError::Move {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    };
    if let Some(parent) = to.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(move_error)?;
    }
    fs::rename(from, to).map_err(move_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn stage_parse() {
        assert_eq!("build".parse::<Stage>().unwrap(), Stage::Build);
        assert_eq!("generate".parse::<Stage>().unwrap(), Stage::Generate);
        assert_eq!("deploy".parse::<Stage>().unwrap(), Stage::Deploy);
    }

    #[test]
    fn unknown_stage_lists_valid_names() {
        let err = "publish".parse::<Stage>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unknown stage 'publish'. Choose from: build, generate, deploy"
        );
    }

    #[test]
    fn stages_are_ordered() {
        assert!(Stage::Build < Stage::Generate);
        assert!(Stage::Generate < Stage::Deploy);
        assert_eq!(Stage::default(), Stage::Deploy);
        assert_eq!(Stage::Generate.number(), 2);
    }

    #[test]
    fn plan_uses_config_paths() {
        let plan = DeployPlan::new(Path::new("/site"), &ProjectConfig::default()).unwrap();
        assert_eq!(plan.input, PathBuf::from("/site/contents/index.md"));
        assert_eq!(plan.pages.primary, PathBuf::from("/site/index.generate.html"));
        assert_eq!(
            plan.pages.resume,
            PathBuf::from("/site/index.generate.resume.html")
        );
        assert_eq!(plan.pdf, PathBuf::from("/site/index.generate.resume.pdf"));
        assert_eq!(plan.html_target, PathBuf::from("/site/index.html"));
        assert_eq!(plan.pdf_target, PathBuf::from("/site/files/resume.pdf"));
    }

    #[test]
    fn build_stage_stops_after_build() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("contents")).unwrap();
        fs::write(
            tmp.path().join("contents/index.md"),
            "---json\n{\"profile\": {\"name\": \"A\"}}\n---\n",
        )
        .unwrap();

        let mut events = Vec::new();
        run(tmp.path(), &ProjectConfig::default(), Stage::Build, |e| {
            events.push(e)
        })
        .unwrap();

        assert!(matches!(events[0], DeployEvent::StageStarted(Stage::Build)));
        assert!(matches!(events[1], DeployEvent::Built(_)));
        assert_eq!(events.len(), 2);
        assert!(tmp.path().join("index.generate.html").exists());
        assert!(!tmp.path().join("index.html").exists());
    }

    #[test]
    fn build_failure_aborts_pipeline() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("contents")).unwrap();
        fs::write(tmp.path().join("contents/index.md"), "no frontmatter").unwrap();

        let mut events = Vec::new();
        let result = run(tmp.path(), &ProjectConfig::default(), Stage::Deploy, |e| {
            events.push(e)
        });

        assert!(matches!(result, Err(DeployError::Build(_))));
        assert_eq!(events.len(), 1);
        assert!(!tmp.path().join("index.html").exists());
    }

    #[test]
    fn relocate_overwrites_and_creates_parents() {
        let tmp = TempDir::new().unwrap();
        let from = tmp.path().join("index.generate.resume.pdf");
        let to = tmp.path().join("files/resume.pdf");
        fs::write(&from, "new").unwrap();

        relocate(&from, &to).unwrap();
        assert_eq!(fs::read_to_string(&to).unwrap(), "new");
        assert!(!from.exists());

        fs::write(&from, "newer").unwrap();
        relocate(&from, &to).unwrap();
        assert_eq!(fs::read_to_string(&to).unwrap(), "newer");
    }

    #[test]
    fn relocate_missing_source_is_error() {
        let tmp = TempDir::new().unwrap();
        let result = relocate(&tmp.path().join("nope.html"), &tmp.path().join("index.html"));
        assert!(matches!(result, Err(DeployError::Move { .. })));
    }
}
