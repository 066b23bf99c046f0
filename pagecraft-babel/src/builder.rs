//! Tree builder (HTML import)
//!
//! Walks a DOM depth-first from the root's children and turns every element
//! into a [`ComponentNode`]: extract style from the class attribute, classify,
//! absorb props, assign a fresh id and append to the parent. Only layout kinds
//! (Container, Row, Column, Grid) are descended into; every other kind folds
//! its subtree into props.
//!
//! Import is total. Problems with a single element are logged and that
//! element's subtree is skipped; the root is always returned.
//!
//! | DOM input                      | Result                                   |
//! |--------------------------------|------------------------------------------|
//! | comment, doctype               | dropped                                  |
//! | whitespace-only text           | dropped                                  |
//! | other text under a layout node | Text leaf, `tag = "span"`                |
//! | `script`, `style`, `meta`, ... | dropped with its subtree                 |
//! | element deeper than max depth  | dropped with its subtree, warned once    |
//! | `<video>` without any source   | skipped as malformed                     |

use crate::classify::{
    classify_with, component_for, ChildSignature, ClassifyOptions, PropContext, DROPPED_TAGS,
};
use crate::dom::{collapse_whitespace, parse_html, DomNode, NodeKind};
use crate::style::{self, LayoutMarkers};
use crate::tree::component::{ContainerProps, TextProps};
use crate::tree::{Component, ComponentNode, Tree, ROOT_ID};
use std::collections::HashMap;
use url::Url;

/// Import settings.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildOptions {
    /// Deepest element level turned into a node; the root's children are level 1.
    pub max_depth: usize,
    /// Prefix of generated node ids.
    pub id_prefix: String,
    /// Keep `iframe`, `svg`, `table` and `form` as CustomHTML.
    pub preserve_embeds: bool,
    /// Base for relative image and video sources.
    pub asset_base_url: Option<Url>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        BuildOptions {
            max_depth: 50,
            id_prefix: "node-".to_string(),
            preserve_embeds: false,
            asset_base_url: None,
        }
    }
}

impl BuildOptions {
    fn classify_options(&self) -> ClassifyOptions {
        ClassifyOptions {
            preserve_embeds: self.preserve_embeds,
        }
    }
}

/// Per-build id namespace: `{prefix}1`, `{prefix}2`, ...
struct IdGenerator<'a> {
    prefix: &'a str,
    next: usize,
}

impl<'a> IdGenerator<'a> {
    fn new(prefix: &'a str) -> Self {
        IdGenerator { prefix, next: 1 }
    }

    fn next_id(&mut self) -> String {
        let id = format!("{}{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

/// Parse `source` and build a tree from its body.
pub fn build_from_html(source: &str, options: &BuildOptions) -> Tree {
    build(&parse_html(source), options)
}

/// Build a tree from the children of `root`. `root` itself becomes the
/// Container root node, carrying the style of its class attribute.
pub fn build<N: DomNode>(root: &N, options: &BuildOptions) -> Tree {
    let (style, class_name) = style::extract(&root.attribute("class").unwrap_or_default()).into_parts();
    let root_node = ComponentNode::new(
        ROOT_ID,
        Component::Container(ContainerProps::default()),
    )
    .with_style(style, class_name);
    let mut tree = Tree::with_root(root_node);

    let classify_options = options.classify_options();
    let ctx = PropContext {
        max_depth: options.max_depth,
        base_url: options.asset_base_url.as_ref(),
    };
    let mut ids = IdGenerator::new(&options.id_prefix);
    let mut truncated = 0usize;

    let mut stack: Vec<(String, usize, N)> = root
        .child_nodes()
        .into_iter()
        .rev()
        .map(|child| (ROOT_ID.to_string(), 1, child))
        .collect();

    while let Some((parent_id, depth, node)) = stack.pop() {
        if depth > options.max_depth {
            if node.kind() == NodeKind::Element {
                if truncated == 0 {
                    log::warn!(
                        "nesting deeper than {} levels, truncating under '{parent_id}'",
                        options.max_depth
                    );
                }
                truncated += 1;
            }
            continue;
        }
        let element = match node.kind() {
            NodeKind::Comment | NodeKind::Other => continue,
            NodeKind::Text => {
                let text = collapse_whitespace(&node.data().unwrap_or_default());
                if text.is_empty() {
                    continue;
                }
                let leaf = ComponentNode::new(
                    ids.next_id(),
                    Component::Text(TextProps {
                        text,
                        tag: "span".to_string(),
                    }),
                );
                if let Err(e) = tree.append_child(&parent_id, leaf) {
                    log::warn!("dropping text under '{parent_id}': {e}");
                }
                continue;
            }
            NodeKind::Element => node,
        };

        let tag = element.tag_name().unwrap_or_default();
        if DROPPED_TAGS.contains(&tag.as_str()) {
            log::debug!("dropping <{tag}>");
            continue;
        }

        let class_string = element.attribute("class").unwrap_or_default();
        let attrs: HashMap<String, String> = element.attributes().into_iter().collect();
        let signature = ChildSignature::of(&element, options.max_depth);
        let kind = classify_with(&tag, &class_string, &attrs, &signature, &classify_options);
        log::debug!("<{tag} class=\"{class_string}\"> -> {kind}");

        let layout = LayoutMarkers::scan(&class_string);
        let props = match component_for(kind, &element, &layout, &ctx) {
            Ok(props) => props,
            Err(e) => {
                log::warn!("skipping element: {e}");
                continue;
            }
        };

        let (style, class_name) = style::extract(&class_string).into_parts();
        let id = ids.next_id();
        let child = ComponentNode::new(id.clone(), props).with_style(style, class_name);
        if let Err(e) = tree.append_child(&parent_id, child) {
            log::warn!("skipping <{tag}>: {e}");
            continue;
        }

        if !kind.absorbs_children() {
            for grandchild in element.child_nodes().into_iter().rev() {
                stack.push((id.clone(), depth + 1, grandchild));
            }
        }
    }

    if truncated > 0 {
        log::warn!("{truncated} element(s) beyond max depth were dropped");
    }
    log::debug!("built {} nodes", tree.node_count());
    tree
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::ComponentKind;

    fn kinds(tree: &Tree, id: &str) -> Vec<ComponentKind> {
        tree.children_of(id)
            .iter()
            .filter_map(|c| tree.get(c))
            .map(|n| n.kind())
            .collect()
    }

    #[test]
    fn test_ids_follow_document_order() {
        let tree = build_from_html(
            "<div><p>a</p><p>b</p></div><hr>",
            &BuildOptions::default(),
        );
        let ids: Vec<&str> = tree.walk().into_iter().map(|(_, n)| n.id.as_str()).collect();
        assert_eq!(ids, vec!["ROOT", "node-1", "node-2", "node-3", "node-4"]);
        assert_eq!(tree.get("node-4").unwrap().kind(), ComponentKind::Divider);
    }

    #[test]
    fn test_custom_prefix_and_fresh_namespace() {
        let options = BuildOptions {
            id_prefix: "n".into(),
            ..Default::default()
        };
        let first = build_from_html("<p>x</p>", &options);
        let second = build_from_html("<p>x</p>", &options);
        assert_eq!(first.children_of(ROOT_ID), ["n1"]);
        assert_eq!(second.children_of(ROOT_ID), ["n1"]);
    }

    #[test]
    fn test_dropped_content() {
        let tree = build_from_html(
            "<body>\n  <!-- c --><script>alert(1)</script><style>p{}</style>\n  <p>kept</p>\n</body>",
            &BuildOptions::default(),
        );
        assert_eq!(kinds(&tree, ROOT_ID), vec![ComponentKind::Text]);
    }

    #[test]
    fn test_loose_text_becomes_span() {
        let tree = build_from_html(
            "<div class=\"flex\">  hello\n world <button>Go</button></div>",
            &BuildOptions::default(),
        );
        let row = &tree.children_of(ROOT_ID)[0];
        assert_eq!(tree.get(row).unwrap().kind(), ComponentKind::Row);
        let children = tree.children_of(row);
        let Component::Text(text) = &tree.get(&children[0]).unwrap().component else {
            panic!("expected text");
        };
        assert_eq!(text.text, "hello world");
        assert_eq!(text.tag, "span");
        assert_eq!(kinds(&tree, row)[1], ComponentKind::Button);
    }

    #[test]
    fn test_body_class_goes_to_root() {
        let tree = build_from_html(
            "<html><body class=\"bg-gray-50 antialiased\"><p>x</p></body></html>",
            &BuildOptions::default(),
        );
        assert_eq!(tree.root().style.background_color.as_deref(), Some("#f9fafb"));
        assert_eq!(tree.root().class_name, "antialiased");
    }

    #[test]
    fn test_malformed_video_is_skipped() {
        let tree = build_from_html(
            "<video></video><p>after</p>",
            &BuildOptions::default(),
        );
        assert_eq!(kinds(&tree, ROOT_ID), vec![ComponentKind::Text]);
    }

    #[test]
    fn test_depth_truncation() {
        let html = format!("{}{}", "<div>".repeat(10), "</div>".repeat(10));
        let options = BuildOptions {
            max_depth: 4,
            ..Default::default()
        };
        let tree = build_from_html(&html, &options);
        assert_eq!(tree.node_count(), 5);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_asset_base_url() {
        let options = BuildOptions {
            asset_base_url: Some(Url::parse("https://cdn.example.com/site/").unwrap()),
            ..Default::default()
        };
        let tree = build_from_html("<img src=\"a.png\" alt=\"A\">", &options);
        let image = &tree.get("node-1").unwrap().component;
        let Component::Image(image) = image else {
            panic!("expected image");
        };
        assert_eq!(image.src, "https://cdn.example.com/site/a.png");
    }
}
