//! CLI output formatting for all pipeline stages.
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.
//!
//! # Output Format
//!
//! ```text
//! ==> Stage 1: Building pages
//! Source: contents/index.md
//! Wrote index.generate.html
//! Wrote index.generate.resume.html
//! ==> Stage 2: Exporting résumé PDF
//! Wrote index.generate.resume.pdf (182.4 KB)
//! ==> Stage 3: Deploying
//! Moved index.generate.html → index.html
//! Moved index.generate.resume.pdf → files/resume.pdf
//! ```
//!
//! Paths under the project root are shown relative to it.

use crate::deploy::{DeployEvent, Stage};
use crate::pdf::PdfReport;
use crate::site::BuildReport;
use std::path::Path;

/// `path` relative to `root` when it lives under it, as-is otherwise.
fn display_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

/// Human-readable byte count: `512 B`, `12.3 KB`, `1.5 MB`.
fn format_size(bytes: usize) -> String {
    const KB: f64 = 1024.0;
    let b = bytes as f64;
    if b < KB {
        format!("{bytes} B")
    } else if b < KB * KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{:.1} MB", b / (KB * KB))
    }
}

fn stage_heading(stage: Stage) -> &'static str {
    match stage {
        Stage::Build => "Building pages",
        Stage::Generate => "Exporting résumé PDF",
        Stage::Deploy => "Deploying",
    }
}

// ============================================================================
// Build
// ============================================================================

pub fn format_build_output(report: &BuildReport, root: &Path) -> Vec<String> {
    vec![
        format!("Wrote {}", display_path(&report.paths.primary, root)),
        format!("Wrote {}", display_path(&report.paths.resume, root)),
    ]
}

pub fn print_build_output(report: &BuildReport, root: &Path) {
    for line in format_build_output(report, root) {
        println!("{}", line);
    }
}

// ============================================================================
// PDF
// ============================================================================

pub fn format_pdf_output(report: &PdfReport, root: &Path) -> Vec<String> {
    vec![format!(
        "Wrote {} ({})",
        display_path(&report.output, root),
        format_size(report.bytes)
    )]
}

pub fn print_pdf_output(report: &PdfReport, root: &Path) {
    for line in format_pdf_output(report, root) {
        println!("{}", line);
    }
}

// ============================================================================
// Deploy
// ============================================================================

/// Format a single pipeline event as display lines.
pub fn format_deploy_event(event: &DeployEvent, root: &Path) -> Vec<String> {
    match event {
        DeployEvent::StageStarted(stage) => {
            vec![format!("==> Stage {}: {}", stage.number(), stage_heading(*stage))]
        }
        DeployEvent::Built(report) => {
            let mut lines = vec![format!("Source: {}", display_path(&report.input, root))];
            lines.extend(format_build_output(report, root));
            lines
        }
        DeployEvent::Exported(report) => format_pdf_output(report, root),
        DeployEvent::Moved { from, to } => vec![format!(
            "Moved {} \u{2192} {}",
            display_path(from, root),
            display_path(to, root)
        )],
    }
}

pub fn print_deploy_event(event: &DeployEvent, root: &Path) {
    for line in format_deploy_event(event, root) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::BuildPaths;
    use std::path::PathBuf;

    fn build_report() -> BuildReport {
        BuildReport {
            input: PathBuf::from("/site/contents/index.md"),
            paths: BuildPaths {
                primary: PathBuf::from("/site/index.generate.html"),
                resume: PathBuf::from("/site/index.generate.resume.html"),
            },
        }
    }

    #[test]
    fn build_output_lists_both_pages() {
        let lines = format_build_output(&build_report(), Path::new("/site"));
        assert_eq!(
            lines,
            vec![
                "Wrote index.generate.html",
                "Wrote index.generate.resume.html"
            ]
        );
    }

    #[test]
    fn paths_outside_root_shown_in_full() {
        let lines = format_build_output(&build_report(), Path::new("/elsewhere"));
        assert_eq!(lines[0], "Wrote /site/index.generate.html");
    }

    #[test]
    fn pdf_output_includes_size() {
        let report = PdfReport {
            output: PathBuf::from("/site/index.generate.resume.pdf"),
            bytes: 186_777,
        };
        let lines = format_pdf_output(&report, Path::new("/site"));
        assert_eq!(lines, vec!["Wrote index.generate.resume.pdf (182.4 KB)"]);
    }

    #[test]
    fn format_size_units() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024 / 2), "1.5 MB");
    }

    #[test]
    fn stage_headers_numbered() {
        let root = Path::new("/site");
        assert_eq!(
            format_deploy_event(&DeployEvent::StageStarted(Stage::Build), root),
            vec!["==> Stage 1: Building pages"]
        );
        assert_eq!(
            format_deploy_event(&DeployEvent::StageStarted(Stage::Deploy), root),
            vec!["==> Stage 3: Deploying"]
        );
    }

    #[test]
    fn built_event_shows_source() {
        let lines = format_deploy_event(&DeployEvent::Built(build_report()), Path::new("/site"));
        assert_eq!(lines[0], "Source: contents/index.md");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn moved_event_uses_arrow() {
        let event = DeployEvent::Moved {
            from: PathBuf::from("/site/index.generate.resume.pdf"),
            to: PathBuf::from("/site/files/resume.pdf"),
        };
        assert_eq!(
            format_deploy_event(&event, Path::new("/site")),
            vec!["Moved index.generate.resume.pdf \u{2192} files/resume.pdf"]
        );
    }
}
