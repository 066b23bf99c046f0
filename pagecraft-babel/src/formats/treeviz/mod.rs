//! Treeviz formatter for component trees
//!
//! A visual outline of a [`Tree`], one line per node:
//!
//! ```text
//! ⧉ Page (6 nodes)
//! ├─ ☰ Navbar Acme (2 links)
//! ├─ ★ Hero Welcome
//! ├─ ▦ Grid 3 columns
//! │ └─ ▤ Card T
//! └─ ⎯ Footer © 2024
//! ```
//!
//! The format is `<prefix><connector> <icon> <Kind> <label>`, labels truncated
//! to 30 characters. Output only.
//!
//! Icons (see [`super::icons`]):
//!     Container ▢, Text ¶, Button ⏺, Image ▣, Video ▶, Hero ★, Card ▤,
//!     Navbar ☰, Footer ⎯, Row ⇹, Column ⇵, Grid ▦, Link ⊕, Divider ─,
//!     CustomHTML ‹›, missing node ∅

use super::icons::{get_icon, MISSING_ICON, PAGE_ICON};
use crate::error::FormatError;
use crate::format::{bool_option, check_options, Format};
use crate::style::emit::class_list;
use crate::tree::{Component, ComponentNode, Tree};
use std::collections::HashMap;

const LABEL_WIDTH: usize = 30;

const OPTIONS: &[&str] = &["show-props", "show-style"];

/// What each line shows besides the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreevizOptions {
    /// Append a short label taken from the props.
    pub show_props: bool,
    /// Append the node's class list in brackets.
    pub show_style: bool,
}

impl Default for TreevizOptions {
    fn default() -> Self {
        TreevizOptions {
            show_props: true,
            show_style: false,
        }
    }
}

pub fn to_treeviz_str(tree: &Tree) -> String {
    to_treeviz_str_with_options(tree, TreevizOptions::default())
}

pub fn to_treeviz_str_with_options(tree: &Tree, options: TreevizOptions) -> String {
    let root = tree.root();
    let mut output = format!(
        "{PAGE_ICON} Page ({} nodes){}\n",
        tree.node_count(),
        style_suffix(root, options)
    );
    format_children(tree, root, "", options, &mut output);
    output
}

fn format_children(
    tree: &Tree,
    node: &ComponentNode,
    prefix: &str,
    options: TreevizOptions,
    output: &mut String,
) {
    let count = node.children().len();
    for (i, child_id) in node.children().iter().enumerate() {
        let is_last = i + 1 == count;
        let connector = if is_last { "└─" } else { "├─" };
        let Some(child) = tree.get(child_id) else {
            output.push_str(&format!("{prefix}{connector} {MISSING_ICON} missing {child_id}\n"));
            continue;
        };

        let mut line = format!("{prefix}{connector} {} {}", get_icon(child.kind()), child.kind());
        if options.show_props {
            let label = label(&child.component);
            if !label.is_empty() {
                line.push(' ');
                line.push_str(&truncate(&label, LABEL_WIDTH));
            }
        }
        if child.hidden {
            line.push_str(" (hidden)");
        }
        line.push_str(&style_suffix(child, options));
        output.push_str(&line);
        output.push('\n');

        let child_prefix = format!("{prefix}{}", if is_last { "  " } else { "│ " });
        format_children(tree, child, &child_prefix, options, output);
    }
}

fn style_suffix(node: &ComponentNode, options: TreevizOptions) -> String {
    if !options.show_style {
        return String::new();
    }
    let classes = class_list(&node.style, &node.class_name);
    if classes.is_empty() {
        String::new()
    } else {
        format!(" [{classes}]")
    }
}

fn label(component: &Component) -> String {
    match component {
        Component::Container(p) => tag_label(&p.tag),
        Component::Row(p) | Component::Column(p) => tag_label(&p.tag),
        Component::Grid(p) => {
            let unit = if p.columns == 1 { "column" } else { "columns" };
            format!("{} {unit}", p.columns)
        }
        Component::Text(p) => p.text.clone(),
        Component::Button(p) => p.text.clone(),
        Component::Link(p) => format!("{} → {}", p.text, p.href),
        Component::Image(p) => p.src.clone(),
        Component::Video(p) => p.src.clone(),
        Component::Hero(p) => p.title.clone(),
        Component::Card(p) => p.title.clone(),
        Component::Navbar(p) => {
            let links = match p.items.len() {
                1 => "1 link".to_string(),
                n => format!("{n} links"),
            };
            if p.logo_text.is_empty() {
                format!("({links})")
            } else {
                format!("{} ({links})", p.logo_text)
            }
        }
        Component::Footer(p) => p.text.clone(),
        Component::Divider => String::new(),
        Component::CustomHtml(p) => p.html.clone(),
    }
}

fn tag_label(tag: &str) -> String {
    if tag == "div" {
        String::new()
    } else {
        format!("<{tag}>")
    }
}

fn truncate(text: &str, width: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= width {
        flat
    } else {
        let mut out: String = flat.chars().take(width - 1).collect();
        out.push('…');
        out
    }
}

/// Format implementation for treeviz format
pub struct TreevizFormat;

impl Format for TreevizFormat {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn description(&self) -> &str {
        "Visual tree representation with Unicode icons"
    }

    fn file_extensions(&self) -> &[&str] {
        &["tree", "treeviz"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, tree: &Tree) -> Result<String, FormatError> {
        Ok(to_treeviz_str(tree))
    }

    fn serialize_with_options(
        &self,
        tree: &Tree,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        check_options(self.name(), options, OPTIONS)?;
        let defaults = TreevizOptions::default();
        let options = TreevizOptions {
            show_props: bool_option(options, "show-props", defaults.show_props)?,
            show_style: bool_option(options, "show-style", defaults.show_style)?,
        };
        Ok(to_treeviz_str_with_options(tree, options))
    }
}
