//! The profile record carried in a page's JSON frontmatter.
//!
//! Every field is optional. Absent scalars become empty text, absent lists
//! become empty lists, and unknown keys are ignored so that a content file can
//! carry extra data for other tools.
//!
//! ```json
//! {
//!   "profile": {
//!     "name": "A. Researcher",
//!     "avatar": "images/me.jpg",
//!     "titles": ["PhD Student", "Some University"],
//!     "emails": ["me at example dot org"],
//!     "links": [{ "url": "https://scholar.example/me", "label": "Scholar" }]
//!   },
//!   "research_interests": [{ "text": "Compilers", "url": "https://..." }],
//!   "experience": [{ "org": "Lab", "logo": "logo.png", "date": "2021 - Now", "roles": ["Intern"] }],
//!   "publications": [{ "tag": "[C1]", "title": "...", "authors": [{ "name": "A. Researcher", "self": true }] }],
//!   "awards": [{ "title": "Best Paper", "date": 2023 }],
//!   "layout": { "left": 2, "right": 2 },
//!   "icon_emoji": "🧪",
//!   "footer_note": "Last updated 2026"
//! }
//! ```

use maud::Render;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::fmt;

/// Favicon glyph used when neither `icon_emoji` nor `favicon_emoji` is set.
pub const DEFAULT_ICON: &str = "🌐";

/// A user-supplied scalar rendered into markup.
///
/// Deserializes from any JSON scalar: strings as-is, numbers and booleans by
/// their display form, `null` as empty. Rendering through maud escapes
/// `& < > " '`, so the value is safe both as text content and inside a quoted
/// attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Text(String);

impl Text {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Text {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Text {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(Text::default()),
            Value::String(s) => Ok(Text(s)),
            Value::Bool(b) => Ok(Text(b.to_string())),
            Value::Number(n) => Ok(Text(n.to_string())),
            other => Err(serde::de::Error::custom(format!(
                "expected a text value, found {}",
                json_kind(&other)
            ))),
        }
    }
}

impl Render for Text {
    fn render_to(&self, buffer: &mut String) {
        escape_into(&self.0, buffer);
    }
}

/// Escape text for HTML content and double- or single-quoted attributes.
pub fn escape_into(text: &str, buffer: &mut String) {
    for c in text.chars() {
        match c {
            '&' => buffer.push_str("&amp;"),
            '<' => buffer.push_str("&lt;"),
            '>' => buffer.push_str("&gt;"),
            '"' => buffer.push_str("&quot;"),
            '\'' => buffer.push_str("&#x27;"),
            _ => buffer.push(c),
        }
    }
}

/// Human-readable name of a JSON value's type, used in error messages.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// The whole frontmatter record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SiteData {
    pub profile: Profile,
    pub research_interests: Vec<Interest>,
    pub experience: Vec<TimelineEntry>,
    pub education: Vec<TimelineEntry>,
    pub publications: Vec<Publication>,
    pub teaching_assistant: Vec<DatedItem>,
    pub awards: Vec<DatedItem>,
    /// Raw column overrides; resolved by [`crate::layout::ColumnSplit::from_layout`].
    pub layout: Map<String, Value>,
    pub icon_emoji: Text,
    pub favicon_emoji: Text,
    pub footer_note: Text,
}

impl SiteData {
    /// Deserialize from an already-parsed frontmatter object.
    pub fn from_object(object: Map<String, Value>) -> Result<Self, serde_json::Error> {
        serde_json::from_value(Value::Object(object))
    }

    /// The favicon glyph: `icon_emoji`, then `favicon_emoji`, then [`DEFAULT_ICON`].
    pub fn icon(&self) -> &str {
        [&self.icon_emoji, &self.favicon_emoji]
            .into_iter()
            .find(|t| !t.is_empty())
            .map(Text::as_str)
            .unwrap_or(DEFAULT_ICON)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Profile {
    /// `None` when absent, so the page title can fall back to "Site".
    pub name: Option<Text>,
    pub avatar: Text,
    pub titles: Vec<Text>,
    pub emails: Vec<Text>,
    pub links: Vec<ProfileLink>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProfileLink {
    pub url: Text,
    pub label: Text,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Interest {
    pub text: Text,
    pub url: Text,
}

/// An experience or education entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TimelineEntry {
    pub org: Text,
    pub logo: Text,
    pub date: Text,
    pub roles: Vec<Text>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Publication {
    pub tag: Text,
    pub title: Text,
    pub link: Text,
    pub authors: Vec<Author>,
    pub venue: Text,
    pub abbr: Text,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Author {
    pub name: Text,
    #[serde(rename = "self", deserialize_with = "truthy")]
    pub is_self: bool,
}

/// Lenient flag: `null`, `false`, `0`, `""`, `[]` and `{}` are false,
/// everything else is true.
fn truthy<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => false,
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    })
}

/// A teaching assistantship or award.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DatedItem {
    pub title: Text,
    pub date: Text,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> SiteData {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn empty_object_gives_defaults() {
        let data = parse(json!({}));
        assert!(data.profile.name.is_none());
        assert!(data.publications.is_empty());
        assert!(data.layout.is_empty());
        assert_eq!(data.icon(), DEFAULT_ICON);
    }

    #[test]
    fn text_accepts_numbers_and_booleans() {
        let data = parse(json!({ "awards": [{ "title": "Prize", "date": 2023 }] }));
        assert_eq!(data.awards[0].date.as_str(), "2023");

        let text: Text = serde_json::from_value(json!(true)).unwrap();
        assert_eq!(text.as_str(), "true");
    }

    #[test]
    fn text_null_is_empty() {
        let text: Text = serde_json::from_value(Value::Null).unwrap();
        assert!(text.is_empty());
    }

    #[test]
    fn text_rejects_arrays() {
        let result: Result<Text, _> = serde_json::from_value(json!(["a"]));
        assert!(result.is_err());
    }

    #[test]
    fn unknown_keys_ignored() {
        let data = parse(json!({ "profile": { "name": "X", "orcid": "0000" }, "extra": 1 }));
        assert_eq!(data.profile.name.unwrap().as_str(), "X");
    }

    #[test]
    fn author_self_flag() {
        let data = parse(json!({
            "publications": [{ "authors": [{ "name": "Me", "self": true }, { "name": "You" }] }]
        }));
        let authors = &data.publications[0].authors;
        assert!(authors[0].is_self);
        assert!(!authors[1].is_self);
    }

    #[test]
    fn author_self_flag_is_lenient() {
        let data = parse(json!({
            "publications": [{ "authors": [
                { "name": "A", "self": null },
                { "name": "B", "self": 1 },
                { "name": "C", "self": 0 },
                { "name": "D", "self": "yes" },
                { "name": "E", "self": "" },
                { "name": "F", "self": 0.5 }
            ] }]
        }));
        let flags: Vec<bool> = data.publications[0]
            .authors
            .iter()
            .map(|a| a.is_self)
            .collect();
        assert_eq!(flags, vec![false, true, false, true, false, true]);
    }

    #[test]
    fn icon_falls_back_to_favicon_emoji() {
        let data = parse(json!({ "favicon_emoji": "🧪" }));
        assert_eq!(data.icon(), "🧪");

        let data = parse(json!({ "icon_emoji": "📚", "favicon_emoji": "🧪" }));
        assert_eq!(data.icon(), "📚");
    }

    #[test]
    fn render_escapes_all_special_characters() {
        let text = Text::new(r#"<b>"Tom" & 'Jerry'</b>"#);
        let rendered = text.render().into_string();
        assert_eq!(
            rendered,
            "&lt;b&gt;&quot;Tom&quot; &amp; &#x27;Jerry&#x27;&lt;/b&gt;"
        );
    }

    #[test]
    fn lists_preserve_input_order() {
        let data = parse(json!({ "profile": { "titles": ["c", "a", "b", "a"] } }));
        let titles: Vec<&str> = data.profile.titles.iter().map(Text::as_str).collect();
        assert_eq!(titles, vec!["c", "a", "b", "a"]);
    }
}
