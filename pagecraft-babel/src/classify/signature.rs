//! Child signatures: a bounded summary of what sits under an element.

use crate::dom::{DomNode, NodeKind};

/// Inline tags that do not count as structure when deciding text-only-ness.
pub const INLINE_FORMATTING: &[&str] = &[
    "a", "abbr", "b", "br", "cite", "code", "em", "i", "kbd", "mark", "q", "s", "small", "span",
    "strong", "sub", "sup", "time", "u",
];

pub fn is_heading(tag: &str) -> bool {
    matches!(tag, "h1" | "h2" | "h3" | "h4" | "h5" | "h6")
}

/// What the classifier needs to know about an element's children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChildSignature {
    /// Direct element children.
    pub element_count: usize,
    pub has_image: bool,
    pub has_heading: bool,
    /// A `strong` or `b` descendant.
    pub has_strong: bool,
    /// A `button` or `a` descendant.
    pub has_action: bool,
    pub has_paragraph: bool,
    /// Every descendant element is inline formatting.
    pub text_only: bool,
}

impl ChildSignature {
    /// Summarize the descendants of `node`, looking at most `max_depth` levels down.
    pub fn of<N: DomNode>(node: &N, max_depth: usize) -> Self {
        let children = node.child_nodes();
        let mut signature = ChildSignature {
            element_count: children
                .iter()
                .filter(|c| c.kind() == NodeKind::Element)
                .count(),
            text_only: true,
            ..Default::default()
        };

        let mut stack: Vec<(usize, N)> = children.into_iter().rev().map(|c| (1, c)).collect();
        while let Some((depth, child)) = stack.pop() {
            let Some(tag) = child.tag_name() else {
                continue;
            };
            match tag.as_str() {
                "img" => signature.has_image = true,
                "strong" | "b" => signature.has_strong = true,
                "button" | "a" => signature.has_action = true,
                "p" => signature.has_paragraph = true,
                t if is_heading(t) => signature.has_heading = true,
                _ => {}
            }
            if !INLINE_FORMATTING.contains(&tag.as_str()) {
                signature.text_only = false;
            }
            if depth < max_depth {
                for grandchild in child.child_nodes().into_iter().rev() {
                    stack.push((depth + 1, grandchild));
                }
            }
        }
        signature
    }
}
