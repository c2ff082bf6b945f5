//! Column layout on a 12-unit grid.
//!
//! Every section is a row of three columns: a left spacer, the main content,
//! and a right spacer. The frontmatter `layout` object may override the
//! widths. Each width has a fixed, ordered list of accepted keys; the first
//! key present wins:
//!
//! | Width | Keys |
//! |-------|------|
//! | left  | `left`, `side` |
//! | right | `right`, `side_right`, `side-right` |
//! | main  | `main` |
//!
//! Left defaults to 2 and right defaults to the resolved left. Main is either
//! given or takes whatever the sides leave over. Widths outside 0..=12 are
//! clamped to the grid before the split is resolved. The resolved split always
//! sums to 12 with a positive main width:
//!
//! - a non-positive main falls back to the default 2/8/2 split;
//! - an explicit main that disagrees with the sides keeps the left width when
//!   it fits and gives the remainder to the right.

use crate::profile::json_kind;
use serde_json::{Map, Value};
use thiserror::Error;

pub const GRID_UNITS: u8 = 12;

pub const LEFT_KEYS: &[&str] = &["left", "side"];
pub const RIGHT_KEYS: &[&str] = &["right", "side_right", "side-right"];
pub const MAIN_KEYS: &[&str] = &["main"];

#[derive(Error, Debug, PartialEq)]
pub enum LayoutError {
    #[error("layout.{key} must be a whole number, found {found}")]
    NotANumber { key: String, found: String },
}

/// Resolved column widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSplit {
    pub left: u8,
    pub main: u8,
    pub right: u8,
}

impl Default for ColumnSplit {
    fn default() -> Self {
        Self {
            left: 2,
            main: 8,
            right: 2,
        }
    }
}

impl ColumnSplit {
    /// The single-column résumé layout.
    pub const FULL_WIDTH: ColumnSplit = ColumnSplit {
        left: 0,
        main: GRID_UNITS,
        right: 0,
    };

    /// Resolve a split from a frontmatter `layout` object.
    pub fn from_layout(layout: &Map<String, Value>) -> Result<Self, LayoutError> {
        let default = Self::default();
        let left = lookup(layout, LEFT_KEYS)?.unwrap_or(i64::from(default.left));
        let right = lookup(layout, RIGHT_KEYS)?.unwrap_or(left);
        let explicit_main = lookup(layout, MAIN_KEYS)?;

        let units = i64::from(GRID_UNITS);
        let main = explicit_main.unwrap_or(units - left - right);
        if main <= 0 {
            return Ok(default);
        }

        // All three values are within 0..=12 here.
        let (left, main, right) = (left as u8, main as u8, right as u8);
        if left + main + right == GRID_UNITS {
            return Ok(Self { left, main, right });
        }

        let remaining = GRID_UNITS - main;
        let left = left.min(remaining);
        Ok(Self {
            left,
            main,
            right: remaining - left,
        })
    }

    /// Bootstrap classes for (left, main, right).
    pub fn classes(&self) -> ColumnClasses {
        ColumnClasses {
            left: col_class(self.left),
            main: col_class(self.main),
            right: col_class(self.right),
        }
    }
}

/// Grid class names handed to every section renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnClasses {
    pub left: String,
    pub main: String,
    pub right: String,
}

impl Default for ColumnClasses {
    fn default() -> Self {
        ColumnSplit::default().classes()
    }
}

fn col_class(width: u8) -> String {
    format!("col-md-{width}")
}

/// First present key from `keys`, parsed as a width and clamped to the grid.
fn lookup(layout: &Map<String, Value>, keys: &[&str]) -> Result<Option<i64>, LayoutError> {
    let Some((key, value)) = keys
        .iter()
        .find_map(|k| layout.get(*k).map(|v| (*k, v)))
    else {
        return Ok(None);
    };

    let width = parse_width(value).ok_or_else(|| LayoutError::NotANumber {
        key: key.to_string(),
        found: match value {
            Value::String(s) => format!("\"{s}\""),
            other => json_kind(other).to_string(),
        },
    })?;

    Ok(Some(width.clamp(0, i64::from(GRID_UNITS))))
}

/// Integers, floats (truncated toward zero) and numeric strings.
fn parse_width(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
