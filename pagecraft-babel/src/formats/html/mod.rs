//! HTML format implementation
//!
//! Import runs the tree builder over an html5ever parse; export runs the
//! inverse renderer. Import never fails: whatever the markup, a tree rooted
//! at a Container comes back (see [`crate::builder`]).
//!
//! # Output
//!
//! By default export produces a single, self-contained HTML5 document:
//! - the root's style classes on `<body>`, its children as body content
//! - embedded CSS: `css/baseline.css` followed by rules for every emitted
//!   utility class
//! - a `generator` meta tag and a mobile viewport
//!
//! With `fragment=true` only the rendered root element is returned, preceded
//! by a `<style>` block when any utility CSS was generated.
//!
//! # Options
//!
//! | Key        | Values       | Default            |
//! |------------|--------------|--------------------|
//! | `fragment` | true / false | false              |
//! | `baseline` | true / false | from RenderOptions |
//! | `title`    | any text     | from RenderOptions |
//!
//! # Lossy Conversions
//!
//! - Markup folded into leaf props (nav links, card text) is regenerated from
//!   the kind's template, not preserved.
//! - Modified utilities (`md:`, `hover:`) survive as residue classes only.
//! - Comments, scripts and styles are dropped on import.

use crate::builder::{build_from_html, BuildOptions};
use crate::error::FormatError;
use crate::format::{bool_option, check_options, Format};
use crate::render::{render, render_document, RenderOptions};
use crate::tree::Tree;
use std::collections::HashMap;

const OPTIONS: &[&str] = &["fragment", "baseline", "title"];

/// Format implementation for HTML
#[derive(Debug, Clone, Default)]
pub struct HtmlFormat {
    build: BuildOptions,
    render: RenderOptions,
}

impl HtmlFormat {
    pub fn new(build: BuildOptions, render: RenderOptions) -> Self {
        Self { build, render }
    }

    pub fn build_options(&self) -> &BuildOptions {
        &self.build
    }

    pub fn render_options(&self) -> &RenderOptions {
        &self.render
    }

    fn render_fragment(&self, tree: &Tree, options: &RenderOptions) -> String {
        let output = render(tree, tree.root_id(), options);
        if output.css.is_empty() {
            output.html
        } else {
            format!("<style>\n{}</style>\n{}", output.css, output.html)
        }
    }
}

impl Format for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "HTML5 with utility classes"
    }

    fn file_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Tree, FormatError> {
        Ok(build_from_html(source, &self.build))
    }

    fn serialize(&self, tree: &Tree) -> Result<String, FormatError> {
        Ok(render_document(tree, &self.render))
    }

    fn serialize_with_options(
        &self,
        tree: &Tree,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        check_options(self.name(), options, OPTIONS)?;

        let mut render_options = self.render.clone();
        render_options.include_baseline_css =
            bool_option(options, "baseline", render_options.include_baseline_css)?;
        if let Some(title) = options.get("title") {
            render_options.title = title.clone();
        }

        if bool_option(options, "fragment", false)? {
            Ok(self.render_fragment(tree, &render_options))
        } else {
            Ok(render_document(tree, &render_options))
        }
    }
}
