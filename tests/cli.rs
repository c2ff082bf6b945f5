//! End-to-end tests that drive the `folio` binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const CONTENT: &str = r#"---json
{
  "profile": {
    "name": "A. Researcher",
    "titles": ["PhD Student"],
    "links": [{ "url": "https://example.org", "label": "Home" }]
  },
  "publications": [
    { "tag": "[C1]", "title": "On <Things>", "authors": [{ "name": "A. Researcher", "self": true }] }
  ],
  "layout": { "left": 3, "right": 3 }
}
---
Body text.
"#;

fn folio(root: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_folio"))
        .arg("--root")
        .arg(root)
        .args(args)
        .output()
        .expect("failed to run folio")
}

fn project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("contents")).unwrap();
    fs::write(tmp.path().join("contents/index.md"), CONTENT).unwrap();
    fs::write(tmp.path().join("contents/content.md"), CONTENT).unwrap();
    tmp
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn build_writes_primary_and_resume() {
    let tmp = project();
    let input = tmp.path().join("contents/index.md");
    let out = folio(tmp.path(), &["build", input.to_str().unwrap()]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let primary = fs::read_to_string(tmp.path().join("index.generate.html")).unwrap();
    let resume = fs::read_to_string(tmp.path().join("index.generate.resume.html")).unwrap();
    assert!(primary.contains(r#"class="col-md-6""#));
    assert!(resume.contains(r#"class="col-md-12""#));
    assert!(primary.contains("On &lt;Things&gt;"));

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Wrote index.generate.html"));
    assert!(stdout.contains("Wrote index.generate.resume.html"));
}

#[test]
fn build_defaults_to_configured_content() {
    let tmp = project();
    let out = folio(tmp.path(), &["build"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(tmp.path().join("content.generate.html").exists());
    assert!(tmp.path().join("content.generate.resume.html").exists());
}

#[test]
fn build_with_output_name() {
    let tmp = project();
    let input = tmp.path().join("contents/index.md");
    let out = folio(
        tmp.path(),
        &["build", input.to_str().unwrap(), "nested/dir/page.html"],
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(tmp.path().join("page.html").exists());
    assert!(tmp.path().join("page.resume.html").exists());
}

#[test]
fn build_rejects_unterminated_frontmatter() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("bad.md");
    fs::write(&input, "---json\n{\"profile\": {}}\n").unwrap();

    let out = folio(tmp.path(), &["build", input.to_str().unwrap()]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("terminated"));
    assert!(!tmp.path().join("bad.generate.html").exists());
}

#[test]
fn deploy_unknown_stage_exits_one_without_writes() {
    let tmp = project();
    let before = file_names(tmp.path());

    let out = folio(tmp.path(), &["deploy", "publish"]);
    assert_eq!(out.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Unknown stage 'publish'"));
    assert!(stderr.contains("build, generate, deploy"));
    assert_eq!(file_names(tmp.path()), before);
}

#[test]
fn deploy_build_stage_only_builds() {
    let tmp = project();
    let out = folio(tmp.path(), &["deploy", "build"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    assert!(tmp.path().join("index.generate.html").exists());
    assert!(!tmp.path().join("index.html").exists());
    assert!(!tmp.path().join("index.generate.resume.pdf").exists());
    assert!(String::from_utf8_lossy(&out.stdout).contains("==> Stage 1: Building pages"));
}

#[test]
fn pdf_missing_input_fails() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("missing.html");
    let out = folio(tmp.path(), &["pdf", missing.to_str().unwrap()]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Input not found"));
}

#[test]
fn invalid_config_is_reported() {
    let tmp = project();
    fs::write(tmp.path().join("folio.toml"), "[pdf]\nscael = 1.0\n").unwrap();
    let out = folio(tmp.path(), &["build"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("unknown field"));
}

#[test]
fn gen_config_prints_stock_file() {
    let tmp = TempDir::new().unwrap();
    let out = folio(tmp.path(), &["gen-config"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("[build]"));
    assert!(stdout.contains("[pdf]"));
    assert!(stdout.contains("[deploy]"));
}
