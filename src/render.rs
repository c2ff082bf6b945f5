//! HTML page rendering.
//!
//! Turns a [`SiteData`] record and a [`ColumnSplit`] into one complete HTML
//! document. Each visual section has its own renderer, a pure function of its
//! slice of the data plus the column classes:
//!
//! ```text
//! profile header
//! ── rule ──
//! Research Interests
//! Experience            (timeline)
//! Education             (timeline)
//! Publications
//! Teaching Assistant    (title/date list)
//! Awards and Honors     (title/date list)
//! footer
//! ```
//!
//! The page links Bootstrap 5.3.2 and `styles/site.css` relative to the
//! output file; both are expected to sit next to the generated HTML.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Every data field is a [`Text`](crate::profile::Text), which escapes itself
//! on render, so no raw markup reaches the page from the frontmatter.

use crate::layout::{ColumnClasses, ColumnSplit};
use crate::profile::{
    DatedItem, Interest, Profile, Publication, SiteData, Text, TimelineEntry,
};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

const BOOTSTRAP_CSS: &str = "./bootstrap-5.3.2-dist/css/bootstrap.min.css";
const SITE_CSS: &str = "./styles/site.css";
const DESCRIPTION: &str = "This site is built by bootstrap v5.3.2";

/// Characters left unescaped in the favicon data URL.
const DATA_URL_SAFE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~')
    .remove(b'/');

/// Renders the full page for one column layout.
pub fn render_page(data: &SiteData, split: ColumnSplit) -> Markup {
    let cols = split.classes();
    let name = data.profile.name.clone().unwrap_or_default();
    let title = data
        .profile
        .name
        .clone()
        .unwrap_or_else(|| Text::from("Site"));

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                meta name="description" content=(DESCRIPTION);
                meta name="author" content=(name);
                meta content="text/html; charset=UTF-8" http-equiv="Content-Type";
                link href=(BOOTSTRAP_CSS) rel="stylesheet" type="text/css";
                title { (title) }
                link href=(SITE_CSS) rel="stylesheet" type="text/css";
                link rel="icon" href=(favicon_data_url(data.icon()));
            }
            body {
                (render_profile(&data.profile, &cols))
                (spacer())
                div.container {
                    (row(&cols, html! {
                        p align="center" { hr; }
                    }))
                }
                (double_spacer())
                (render_interests(&data.research_interests, &cols))
                (double_spacer())
                (render_timeline("Experience", &data.experience, &cols))
                (double_spacer())
                (render_timeline("Education", &data.education, &cols))
                (double_spacer())
                (render_publications(&data.publications, &cols))
                (double_spacer())
                (render_list_section("Teaching Assistant", &data.teaching_assistant, "ta-list", &cols))
                (double_spacer())
                (render_list_section("Awards and Honors", &data.awards, "award-list", &cols))
                (double_spacer())
                (render_footer(&data.footer_note, &cols))
            }
        }
    }
}

/// SVG favicon showing a single emoji glyph, as a `data:` URL.
pub fn favicon_data_url(emoji: &str) -> String {
    let svg = format!(
        "<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 100 100'>\
         <text y='0.9em' font-size='90'>{emoji}</text></svg>"
    );
    format!(
        "data:image/svg+xml,{}",
        utf8_percent_encode(&svg, DATA_URL_SAFE)
    )
}

// ============================================================================
// Layout helpers
// ============================================================================

fn spacer() -> Markup {
    html! {
        div.row { p {} }
    }
}

fn double_spacer() -> Markup {
    html! {
        (spacer())
        (spacer())
    }
}

/// A grid row: left spacer, content, right spacer.
fn row(cols: &ColumnClasses, content: Markup) -> Markup {
    html! {
        div.row {
            div class=(cols.left) {}
            div class=(cols.main) { (content) }
            div class=(cols.right) {}
        }
    }
}

/// A titled section: heading row followed by a content row.
fn section(cols: &ColumnClasses, heading: &str, content: Markup) -> Markup {
    html! {
        div.container {
            (row(cols, html! { h2 { (heading) } }))
            (row(cols, content))
        }
    }
}

// ============================================================================
// Section renderers
// ============================================================================

/// Avatar, name, titles, contact lines and profile links.
pub fn render_profile(profile: &Profile, cols: &ColumnClasses) -> Markup {
    let name = profile.name.clone().unwrap_or_default();

    html! {
        div.container {
            (row(cols, html! {
                div.media {
                    a.media-left href="#" {
                        img src=(profile.avatar)
                            class="img-thumbnail rounded-circle float-start profile__avatar"
                            style="width: 180px;" alt=(name) loading="lazy" decoding="async";
                    }
                    div.media-body {
                        div class="profile text-end" {
                            h1 { (name) }
                            @for line in &profile.titles {
                                span class="profile__meta" { (line) br; }
                            }
                            @for email in &profile.emails {
                                span class="profile__contact" { (email) br; }
                            }
                            div class="profile__links" {
                                @for link in profile.links.iter().filter(|l| !l.url.is_empty()) {
                                    a class="link-accent profile__link" href=(link.url) target="_blank"
                                        rel="noopener noreferrer" aria-label=(link.label) { (link.label) }
                                }
                            }
                        }
                    }
                }
            }))
        }
    }
}

/// Comma-separated interests, linked when a URL is given.
pub fn render_interests(items: &[Interest], cols: &ColumnClasses) -> Markup {
    section(cols, "Research Interests", html! {
        div.row {
            span class="research__item" {
                @for (idx, item) in items.iter().enumerate() {
                    @if idx > 0 { ", " }
                    @if item.url.is_empty() {
                        (item.text)
                    } @else {
                        a target="_blank" href=(item.url) class="link-accent" rel="noopener noreferrer" {
                            (item.text)
                        }
                    }
                }
            }
        }
    })
}

/// Organisation entries with logo, date and one line per role.
pub fn render_timeline(title: &str, entries: &[TimelineEntry], cols: &ColumnClasses) -> Markup {
    section(cols, title, html! {
        div.timeline {
            @for entry in entries {
                div class="timeline__item" {
                    span class="timeline__header" {
                        span class="timeline__org" {
                            img src=(entry.logo) alt={ (entry.org) " logo" } class="timeline__logo";
                            span class="timeline__name" { (entry.org) }
                        }
                        span class="timeline__date" { (entry.date) }
                    }
                    @for role in &entry.roles {
                        span class="timeline__role" { (role) }
                    }
                }
            }
        }
    })
}

/// Publication list: tag, title, link, authors, venue.
pub fn render_publications(entries: &[Publication], cols: &ColumnClasses) -> Markup {
    section(cols, "Publications", html! {
        div.publication {
            @for entry in entries {
                div class="publication__item" {
                    b { span class="publication__tag" { (entry.tag) } }
                    b class="publication__title" { (entry.title) }
                    @if entry.link.is_empty() {
                        span class="publication__link link-plain" { "[Link]" }
                    } @else {
                        a class="link-accent publication__link" target="_blank" href=(entry.link)
                            rel="noopener noreferrer" { "[Link]" }
                    }
                    br;
                    @for (idx, author) in entry.authors.iter().enumerate() {
                        @let author_class = if author.is_self {
                            "publication__author publication__author--self"
                        } else {
                            "publication__author"
                        };
                        span class=(author_class) {
                            (author.name)
                            @if idx + 1 < entry.authors.len() { ", " }
                        }
                    }
                    br;
                    span class="publication__venue" { (entry.venue) }
                    " "
                    span class="publication__abbr" { "(" (entry.abbr) ")" }
                }
            }
        }
    })
}

/// A `<ul>` of title/date pairs. `block` is the BEM block name, e.g. `award-list`.
pub fn render_list_section(
    title: &str,
    items: &[DatedItem],
    block: &str,
    cols: &ColumnClasses,
) -> Markup {
    let item_class = format!("{block}__item");
    let title_class = format!("{item_class}__title");
    let date_class = format!("{item_class}__date");

    section(cols, title, html! {
        ul class={ "list-unstyled mb-0 " (block) } {
            @for item in items {
                li class=(item_class) {
                    span class=(title_class) { (item.title) }
                    " "
                    span class=(date_class) { (item.date) }
                }
            }
        }
    })
}

pub fn render_footer(note: &Text, cols: &ColumnClasses) -> Markup {
    html! {
        div.container {
            div.row {
                div class=(cols.left) {}
                footer.text-center {
                    div {
                        span class="footer__note" { (PreEscaped("&#127752; ")) (note) }
                    }
                }
                div class=(cols.right) {}
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
