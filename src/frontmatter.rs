//! JSON frontmatter extraction.
//!
//! A content file starts with a `---json` marker, carries a JSON object, and
//! closes the block with a `---` line. Anything after the closing line is the
//! Markdown body, which is kept but not rendered.
//!
//! ```text
//! ---json
//! { "profile": { "name": "A. Researcher" } }
//! ---
//! Free-form notes.
//! ```
//!
//! Splitting happens on the `---` delimiter with at most two cuts, so a well
//! formed document yields exactly three parts: the empty prefix, the tagged
//! JSON block, and the body.

use crate::profile::json_kind;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const MARKER: &str = "---json";
pub const DELIMITER: &str = "---";
const LANGUAGE_TAG: &str = "json";

#[derive(Error, Debug)]
pub enum FrontmatterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Markdown must start with a ---json frontmatter block")]
    MissingMarker,
    #[error("Frontmatter must be terminated by a line with ---")]
    Unterminated,
    #[error("Invalid frontmatter JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Frontmatter must be a JSON object, found {0}")]
    NotAnObject(&'static str),
}

/// A parsed content document.
#[derive(Debug, Clone, PartialEq)]
pub struct Frontmatter {
    pub data: Map<String, Value>,
    /// Markdown after the closing delimiter, unused by rendering.
    pub body: String,
}

/// Split a document and parse its JSON frontmatter object.
pub fn parse_frontmatter(text: &str) -> Result<Frontmatter, FrontmatterError> {
    if !text.starts_with(MARKER) {
        return Err(FrontmatterError::MissingMarker);
    }

    let parts: Vec<&str> = text.splitn(3, DELIMITER).collect();
    let &[_, block, body] = parts.as_slice() else {
        return Err(FrontmatterError::Unterminated);
    };

    let json = block.trim();
    let json = json.strip_prefix(LANGUAGE_TAG).unwrap_or(json).trim();

    match serde_json::from_str::<Value>(json)? {
        Value::Object(data) => Ok(Frontmatter {
            data,
            body: body.to_string(),
        }),
        other => Err(FrontmatterError::NotAnObject(json_kind(&other))),
    }
}

/// Read a UTF-8 content file and parse its frontmatter.
pub fn read_frontmatter(path: &Path) -> Result<Frontmatter, FrontmatterError> {
    let text = fs::read_to_string(path)?;
    parse_frontmatter(&text)
}
