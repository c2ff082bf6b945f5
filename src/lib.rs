//! # Folio
//!
//! A static personal-website generator for academic profiles. One Markdown
//! file with a JSON frontmatter block holds the whole profile (bio, links,
//! publications, experience, education, awards); folio renders it into a
//! Bootstrap page, prints a full-width variant to a PDF résumé, and moves the
//! results to where the site serves them.
//!
//! # Architecture: Three-Stage Pipeline
//!
//! ```text
//! 1. Build     contents/index.md  →  index.generate.html, index.generate.resume.html
//! 2. Generate  resume page        →  index.generate.resume.pdf   (headless Chrome)
//! 3. Deploy    artifacts          →  index.html, files/resume.pdf
//! ```
//!
//! Each stage can run on its own (`folio build`, `folio pdf`) or as part of
//! the cumulative `folio deploy [stage]` pipeline. A failure anywhere aborts
//! the run.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`frontmatter`] | Splits the `---json` block off a content file and parses it |
//! | [`profile`] | Typed, permissive profile record and the escaping [`profile::Text`] scalar |
//! | [`layout`] | 12-unit column split with documented key aliases |
//! | [`render`] | Maud templates, one renderer per page section |
//! | [`site`] | Build stage: both page variants, output naming, file writes |
//! | [`pdf`] | HTML → PDF export through headless Chrome |
//! | [`deploy`] | Stage ordering, pipeline run, artifact relocation |
//! | [`config`] | Optional `folio.toml`: content paths, PDF geometry, deploy targets |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/). Malformed markup
//! is a compile error, and every interpolated value goes through
//! [`maud::Render`]. Profile text implements `Render` with full escaping
//! (quotes included), so frontmatter content can never inject markup.
//!
//! ## Permissive Input, Strict Config
//!
//! The frontmatter is hand-edited content: unknown keys are ignored, missing
//! fields render empty, and numbers are accepted where text is expected. The
//! `folio.toml` config is the opposite: unknown keys are rejected to catch
//! typos before a deploy moves files around.
//!
//! ## In-Process Pipeline
//!
//! The stages call each other as library functions. Error propagation with
//! `?` gives the stop-at-first-failure behaviour without subprocess plumbing.

pub mod config;
pub mod deploy;
pub mod frontmatter;
pub mod layout;
pub mod output;
pub mod pdf;
pub mod profile;
pub mod render;
pub mod site;
