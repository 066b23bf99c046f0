//! Multi-page splitting
//!
//! Generated output sometimes carries several pages in one text blob, each
//! introduced by a marker line naming the file:
//!
//! ```text
//! // index.html
//! <body>...</body>
//! <!-- about.html -->
//! <body>...</body>
//! ```
//!
//! Markdown code fences around a page are stripped. Text before the first
//! marker is ignored when markers exist; text without any marker is one
//! `index.html` page. The tree builder runs once per page.

use once_cell::sync::Lazy;
use regex::Regex;

/// Name used when the text has no page markers.
pub const DEFAULT_PAGE: &str = "index.html";

static MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?://\s*([\w./-]+\.html?)|<!--\s*([\w./-]+\.html?)\s*-->)\s*$")
        .expect("page marker pattern is valid")
});

static FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*```[\w-]*\s*$").expect("fence pattern is valid"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub name: String,
    pub content: String,
}

/// Split `text` into named pages in marker order.
///
/// A repeated name keeps both pages; callers writing files decide how to
/// handle the collision.
pub fn split_pages(text: &str) -> Vec<Page> {
    let mut pages = Vec::new();
    let mut current: Option<(String, Vec<&str>)> = None;

    for line in text.lines() {
        if let Some(name) = marker_name(line) {
            if let Some((name, lines)) = current.take() {
                pages.push(page(name, &lines));
            }
            current = Some((name.to_string(), Vec::new()));
        } else if let Some((_, lines)) = current.as_mut() {
            lines.push(line);
        }
    }
    if let Some((name, lines)) = current {
        pages.push(page(name, &lines));
    }

    if pages.is_empty() {
        let lines: Vec<&str> = text.lines().collect();
        let content = strip_fences(&lines);
        if !content.is_empty() {
            pages.push(Page {
                name: DEFAULT_PAGE.to_string(),
                content,
            });
        }
    }
    pages
}

/// The file name in a marker line, if `line` is one.
pub fn marker_name(line: &str) -> Option<&str> {
    let captures = MARKER.captures(line)?;
    captures.get(1).or_else(|| captures.get(2)).map(|m| m.as_str())
}

fn page(name: String, lines: &[&str]) -> Page {
    Page {
        name,
        content: strip_fences(lines),
    }
}

fn strip_fences(lines: &[&str]) -> String {
    lines
        .iter()
        .filter(|line| !FENCE.is_match(line))
        .copied()
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
