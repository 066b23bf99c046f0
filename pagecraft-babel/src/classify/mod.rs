//! Component classification
//!
//! Maps one DOM element to a [`ComponentKind`] with an ordered rule cascade.
//! The first rule that matches wins, so the order resolves ambiguity from the
//! most specific signal to the most generic:
//!
//! 1. exact tags: `nav`, `footer`, `img`, `video`, `hr`, `a`, `button`
//! 2. (opt-in) embeds: `iframe`, `svg`, `table`, `form` become CustomHTML
//! 3. hero marker in the class tokens or `id="hero"`, with a heading inside
//! 4. card or shadow marker, with an image and a heading or strong inside
//! 5. text-only headings
//! 6. text-only `p` / `span`
//! 7. generic blocks (`div`, `section`, `main`, `header`) by layout markers:
//!    Row, Column, Grid or Container
//! 8. `ul` / `ol` as Column
//! 9. Container for everything else
//!
//! Hero and card detection are substring heuristics on class tokens. They
//! will miss differently named markup and can fire on unrelated names that
//! happen to contain the marker.
//!
//! Classification never fails: Container is the total fallback.

pub mod props;
pub mod signature;

pub use props::{component_for, MalformedElement, PropContext};
pub use signature::ChildSignature;

use crate::dom::{DomNode, NodeKind};
use crate::style::LayoutMarkers;
use crate::tree::ComponentKind;
use signature::is_heading;
use std::collections::HashMap;

/// Tags dropped before classification. They are not representable in a tree.
pub const DROPPED_TAGS: &[&str] = &[
    "script", "style", "template", "noscript", "link", "meta", "title", "base", "head",
];

/// Tags kept verbatim as CustomHTML when embeds are preserved.
pub const EMBED_TAGS: &[&str] = &["iframe", "svg", "table", "form"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassifyOptions {
    pub preserve_embeds: bool,
}

/// Classify an element with default options.
pub fn classify(
    tag: &str,
    class_string: &str,
    attrs: &HashMap<String, String>,
    signature: &ChildSignature,
) -> ComponentKind {
    classify_with(tag, class_string, attrs, signature, &ClassifyOptions::default())
}

pub fn classify_with(
    tag: &str,
    class_string: &str,
    attrs: &HashMap<String, String>,
    signature: &ChildSignature,
    options: &ClassifyOptions,
) -> ComponentKind {
    let tag = tag.to_ascii_lowercase();
    let tag = tag.as_str();

    match tag {
        "nav" => return ComponentKind::Navbar,
        "footer" => return ComponentKind::Footer,
        "img" => return ComponentKind::Image,
        "video" => return ComponentKind::Video,
        "hr" => return ComponentKind::Divider,
        "a" => return ComponentKind::Link,
        "button" => return ComponentKind::Button,
        _ => {}
    }

    if options.preserve_embeds && EMBED_TAGS.contains(&tag) {
        return ComponentKind::CustomHtml;
    }

    let has_marker = |markers: &[&str]| {
        class_string
            .split_whitespace()
            .any(|token| markers.iter().any(|m| token.to_ascii_lowercase().contains(m)))
    };

    let hero_id = attrs.get("id").is_some_and(|id| id.eq_ignore_ascii_case("hero"));
    if (has_marker(&["hero"]) || hero_id) && signature.has_heading {
        return ComponentKind::Hero;
    }

    if has_marker(&["card", "shadow"])
        && signature.has_image
        && (signature.has_heading || signature.has_strong)
    {
        return ComponentKind::Card;
    }

    if is_heading(tag) && signature.text_only {
        return ComponentKind::Text;
    }

    if matches!(tag, "p" | "span") && signature.text_only {
        return ComponentKind::Text;
    }

    if matches!(tag, "div" | "section" | "main" | "header") {
        let layout = LayoutMarkers::scan(class_string);
        return if layout.flex_col {
            ComponentKind::Column
        } else if layout.flex {
            ComponentKind::Row
        } else if layout.grid {
            ComponentKind::Grid
        } else {
            ComponentKind::Container
        };
    }

    if matches!(tag, "ul" | "ol") {
        return ComponentKind::Column;
    }

    ComponentKind::Container
}

/// Classify a DOM element directly.
pub fn classify_node<N: DomNode>(node: &N, max_depth: usize, options: &ClassifyOptions) -> ComponentKind {
    let tag = node.tag_name().unwrap_or_default();
    let class_string = node.attribute("class").unwrap_or_default();
    let attrs: HashMap<String, String> = node.attributes().into_iter().collect();
    let signature = ChildSignature::of(node, max_depth);
    classify_with(&tag, &class_string, &attrs, &signature, options)
}

/// One classification decision, for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceEntry {
    pub depth: usize,
    pub tag: String,
    pub class_string: String,
    pub signature: ChildSignature,
    pub kind: ComponentKind,
}

/// Classify every element the builder would visit under `root`, in document order.
///
/// Children of absorbing kinds are not visited, dropped tags are skipped and
/// the walk stops at `max_depth`, mirroring the builder.
pub fn trace<N: DomNode>(root: &N, max_depth: usize, options: &ClassifyOptions) -> Vec<TraceEntry> {
    let mut entries = Vec::new();
    let mut stack: Vec<(usize, N)> = root.child_nodes().into_iter().rev().map(|c| (1, c)).collect();
    while let Some((depth, node)) = stack.pop() {
        if node.kind() != NodeKind::Element || depth > max_depth {
            continue;
        }
        let tag = node.tag_name().unwrap_or_default();
        if DROPPED_TAGS.contains(&tag.as_str()) {
            continue;
        }
        let class_string = node.attribute("class").unwrap_or_default();
        let attrs: HashMap<String, String> = node.attributes().into_iter().collect();
        let signature = ChildSignature::of(&node, max_depth);
        let kind = classify_with(&tag, &class_string, &attrs, &signature, options);
        entries.push(TraceEntry {
            depth,
            tag,
            class_string,
            signature,
            kind,
        });
        if !kind.absorbs_children() {
            for child in node.child_nodes().into_iter().rev() {
                stack.push((depth + 1, child));
            }
        }
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_html;

    fn sig() -> ChildSignature {
        ChildSignature {
            text_only: true,
            ..Default::default()
        }
    }

    fn attrs(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_exact_tags_win() {
        let heading = ChildSignature {
            has_heading: true,
            has_image: true,
            ..Default::default()
        };
        assert_eq!(classify("nav", "hero card", &attrs(&[]), &heading), ComponentKind::Navbar);
        assert_eq!(classify("FOOTER", "", &attrs(&[]), &sig()), ComponentKind::Footer);
        assert_eq!(classify("a", "card", &attrs(&[]), &heading), ComponentKind::Link);
        assert_eq!(classify("hr", "", &attrs(&[]), &sig()), ComponentKind::Divider);
    }

    #[test]
    fn test_hero_requires_heading() {
        let with_heading = ChildSignature {
            has_heading: true,
            ..Default::default()
        };
        assert_eq!(
            classify("section", "hero-banner", &attrs(&[]), &with_heading),
            ComponentKind::Hero
        );
        assert_eq!(
            classify("div", "", &attrs(&[("id", "hero")]), &with_heading),
            ComponentKind::Hero
        );
        assert_eq!(
            classify("section", "hero flex", &attrs(&[]), &ChildSignature::default()),
            ComponentKind::Row
        );
    }

    #[test]
    fn test_card_requires_image_and_title() {
        let full = ChildSignature {
            has_image: true,
            has_strong: true,
            ..Default::default()
        };
        assert_eq!(classify("div", "shadow-md", &attrs(&[]), &full), ComponentKind::Card);
        let no_image = ChildSignature {
            has_heading: true,
            ..Default::default()
        };
        assert_eq!(
            classify("div", "card", &attrs(&[]), &no_image),
            ComponentKind::Container
        );
    }

    #[test]
    fn test_text_rules() {
        assert_eq!(classify("h2", "", &attrs(&[]), &sig()), ComponentKind::Text);
        assert_eq!(classify("span", "", &attrs(&[]), &sig()), ComponentKind::Text);
        let structured = ChildSignature::default();
        assert_eq!(classify("p", "", &attrs(&[]), &structured), ComponentKind::Container);
        assert_eq!(classify("h1", "", &attrs(&[]), &structured), ComponentKind::Container);
    }

    #[test]
    fn test_layout_rules() {
        let empty = ChildSignature::default();
        assert_eq!(classify("div", "flex", &attrs(&[]), &empty), ComponentKind::Row);
        assert_eq!(classify("main", "flex flex-col", &attrs(&[]), &empty), ComponentKind::Column);
        assert_eq!(classify("header", "grid", &attrs(&[]), &empty), ComponentKind::Grid);
        assert_eq!(classify("section", "md:flex", &attrs(&[]), &empty), ComponentKind::Container);
        assert_eq!(classify("ul", "flex", &attrs(&[]), &empty), ComponentKind::Column);
        assert_eq!(classify("article", "flex", &attrs(&[]), &empty), ComponentKind::Container);
        assert_eq!(classify("custom-widget", "foo", &attrs(&[]), &sig()), ComponentKind::Container);
    }

    #[test]
    fn test_embeds_are_opt_in() {
        let empty = ChildSignature::default();
        assert_eq!(classify("iframe", "", &attrs(&[]), &empty), ComponentKind::Container);
        let options = ClassifyOptions {
            preserve_embeds: true,
        };
        assert_eq!(
            classify_with("iframe", "", &attrs(&[]), &empty, &options),
            ComponentKind::CustomHtml
        );
    }

    #[test]
    fn test_trace_skips_absorbed_children() {
        let body = parse_html(
            "<div class=\"flex\"><nav><a href=/>Home</a></nav><script>x()</script><p>Hi</p></div>",
        );
        let entries = trace(&body, 50, &ClassifyOptions::default());
        let summary: Vec<(usize, &str, ComponentKind)> = entries
            .iter()
            .map(|e| (e.depth, e.tag.as_str(), e.kind))
            .collect();
        assert_eq!(
            summary,
            vec![
                (1, "div", ComponentKind::Row),
                (2, "nav", ComponentKind::Navbar),
                (2, "p", ComponentKind::Text),
            ]
        );
    }
}
