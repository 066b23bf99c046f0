//! Inverse renderer (tree -> HTML + CSS)
//!
//! Each component kind has one markup template, parameterized by its props.
//! Structured style is written back as the canonical utility classes from
//! [`crate::style::emit`], followed by the residue classes, so importing the
//! output again yields the same style fields. CSS rules are generated for the
//! emitted utility classes only; residue classes pass through untouched.
//!
//! Pipeline: Tree -> RcDom -> html5ever serializer -> String.
//!
//! | Kind       | Markup                                                               |
//! |------------|----------------------------------------------------------------------|
//! | Container  | `<{tag}>` children                                                   |
//! | Row        | `<{tag} class="flex">` children                                      |
//! | Column     | `<{tag} class="flex flex-col">` children                             |
//! | Grid       | `<{tag} class="grid grid-cols-N gap-M">` children                    |
//! | Text       | `<{tag}>text</{tag}>`                                                |
//! | Button     | `<button type="button">text</button>`                                |
//! | Link       | `<a href>text</a>`                                                   |
//! | Image      | `<img src alt>`                                                      |
//! | Video      | `<video src poster controls autoplay loop muted>`                    |
//! | Divider    | `<hr>`                                                               |
//! | Hero       | `<section class="hero">` h1, p, `a.hero-button`, img                 |
//! | Card       | `<div class="card">` img, `div.card-body` with h3, p, button or a    |
//! | Navbar     | `<nav>` `a.navbar-logo`, `ul.navbar-items`, button, children         |
//! | Footer     | `<footer>` p, `div.footer-links`, children                           |
//! | CustomHTML | the stored markup, verbatim                                          |
//!
//! Rendering is total: a child id without a node renders as an empty
//! `<div data-missing-node="...">` placeholder, and descent stops at
//! `max_depth`.

use crate::dom::{parse_html, DomNode, HtmlNode};
use crate::style::emit::{flex_tokens, grid_tokens, StyleSheet, UtilityToken};
use crate::style::LayoutMarkers;
use crate::tree::component::{CardProps, FooterProps, HeroProps, NavbarProps, VideoProps};
use crate::tree::{Component, ComponentNode, Tree};
use html5ever::serialize::{SerializeOpts, TraversalScope};
use html5ever::{ns, serialize, Attribute, LocalName, QualName};
use indexmap::IndexSet;
use markup5ever_rcdom::{Handle, Node, NodeData, SerializableHandle};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

const BASELINE_CSS: &str = include_str!("../css/baseline.css");

const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

const UNSAFE_TAGS: &[&str] = &["script", "style", "template", "noscript", "title", "head", "html", "body"];

/// Export settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Embed the baseline stylesheet in full documents.
    pub include_baseline_css: bool,
    /// Deepest level rendered below the starting node.
    pub max_depth: usize,
    pub title: String,
    pub lang: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            include_baseline_css: true,
            max_depth: 256,
            title: "Untitled page".to_string(),
            lang: "en".to_string(),
        }
    }
}

/// Rendered markup and the CSS for its utility classes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOutput {
    pub html: String,
    pub css: String,
}

/// Render the subtree rooted at `root_id`, including that node.
pub fn render(tree: &Tree, root_id: &str, options: &RenderOptions) -> RenderOutput {
    let mut renderer = Renderer::new(tree, options);
    let holder = create_element("div", Vec::new());
    renderer.render_node(&holder, root_id, 0);
    RenderOutput {
        html: serialize_children(&holder),
        css: renderer.sheet.to_css(),
    }
}

/// Render a complete HTML5 page. The root's classes go on `<body>` and its
/// children become the body content.
pub fn render_document(tree: &Tree, options: &RenderOptions) -> String {
    let mut renderer = Renderer::new(tree, options);
    let root = tree.root();
    let body_class = renderer.class_attr(Vec::new(), &[], root, Layout::Plain);

    let holder = create_element("div", Vec::new());
    for child in root.children() {
        renderer.render_node(&holder, child, 1);
    }
    let body_html = serialize_children(&holder);
    let css = renderer.sheet.to_css();

    let baseline = if options.include_baseline_css {
        BASELINE_CSS
    } else {
        ""
    };
    let body_open = if body_class.is_empty() {
        "<body>".to_string()
    } else {
        format!("<body class=\"{}\">", html_escape(&body_class))
    };
    let title = html_escape(&options.title);
    let lang = html_escape(&options.lang);

    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <meta name="generator" content="pagecraft">
  <title>{title}</title>
  <style>
{baseline}
{css}
  </style>
</head>
{body_open}
{body_html}
</body>
</html>
"#
    )
}

/// Which layout markers a node kind writes from its own props.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    Plain,
    Flex,
    Grid,
}

impl Layout {
    /// Whether a residue `token` is superseded by the markers this layout emits.
    fn supersedes(self, token: &str) -> bool {
        if self == Layout::Plain || !LayoutMarkers::is_marker(token) {
            return false;
        }
        if token.starts_with("gap-") {
            return true;
        }
        match self {
            Layout::Flex => token == "flex" || token == "flex-col",
            Layout::Grid => token == "grid" || token.starts_with("grid-cols-"),
            Layout::Plain => false,
        }
    }
}

struct Renderer<'a> {
    tree: &'a Tree,
    options: &'a RenderOptions,
    sheet: StyleSheet,
    // Parsed custom HTML; its nodes are grafted into the output tree.
    fragments: Vec<HtmlNode>,
}

impl<'a> Renderer<'a> {
    fn new(tree: &'a Tree, options: &'a RenderOptions) -> Self {
        Renderer {
            tree,
            options,
            sheet: StyleSheet::new(),
            fragments: Vec::new(),
        }
    }

    /// Class attribute: leading layout tokens, template classes, style tokens, residue.
    fn class_attr(
        &mut self,
        leading: Vec<UtilityToken>,
        template: &[&str],
        node: &ComponentNode,
        layout: Layout,
    ) -> String {
        self.sheet.add_tokens(&leading);
        let style_tokens = self.sheet.add(&node.style);
        let mut classes: IndexSet<String> = leading.into_iter().map(|t| t.class).collect();
        classes.extend(template.iter().map(|c| c.to_string()));
        classes.extend(style_tokens.into_iter().map(|t| t.class));
        for token in node.class_name.split_whitespace() {
            if layout.supersedes(token) {
                continue;
            }
            classes.insert(token.to_string());
        }
        classes.into_iter().collect::<Vec<_>>().join(" ")
    }

    fn render_node(&mut self, parent: &Handle, id: &str, depth: usize) {
        let tree = self.tree;
        let Some(node) = tree.get(id) else {
            log::warn!("render: missing node '{id}', emitting placeholder");
            append(parent, create_element("div", vec![("data-missing-node", id)]));
            return;
        };
        if depth > self.options.max_depth {
            log::warn!(
                "render: depth limit {} reached at '{id}', skipping subtree",
                self.options.max_depth
            );
            return;
        }

        let element = match &node.component {
            Component::Container(props) => {
                let class = self.class_attr(Vec::new(), &[], node, Layout::Plain);
                let el = self.element(safe_tag(&props.tag, "div"), &class, node, Vec::new());
                self.render_children(&el, node, depth);
                el
            }
            Component::Row(props) | Component::Column(props) => {
                let column = matches!(node.component, Component::Column(_));
                let class = self.class_attr(flex_tokens(column, props.gap), &[], node, Layout::Flex);
                let el = self.element(safe_tag(&props.tag, "div"), &class, node, Vec::new());
                self.render_children(&el, node, depth);
                el
            }
            Component::Grid(props) => {
                let class = self.class_attr(grid_tokens(props.columns, props.gap), &[], node, Layout::Grid);
                let el = self.element(safe_tag(&props.tag, "div"), &class, node, Vec::new());
                self.render_children(&el, node, depth);
                el
            }
            Component::Text(props) => {
                let class = self.class_attr(Vec::new(), &[], node, Layout::Plain);
                let el = self.element(safe_tag(&props.tag, "p"), &class, node, Vec::new());
                append(&el, create_text(&props.text));
                el
            }
            Component::Button(props) => {
                let class = self.class_attr(Vec::new(), &[], node, Layout::Plain);
                let mut attrs = vec![("type", "button".to_string())];
                if let Some(href) = &props.href {
                    attrs.push(("data-href", href.clone()));
                }
                let el = self.element("button", &class, node, attrs);
                append(&el, create_text(&props.text));
                el
            }
            Component::Link(props) => {
                let class = self.class_attr(Vec::new(), &[], node, Layout::Plain);
                let mut attrs = vec![("href", props.href.clone())];
                if props.new_tab {
                    attrs.push(("target", "_blank".to_string()));
                    attrs.push(("rel", "noopener noreferrer".to_string()));
                }
                let el = self.element("a", &class, node, attrs);
                append(&el, create_text(&props.text));
                el
            }
            Component::Image(props) => {
                let class = self.class_attr(Vec::new(), &[], node, Layout::Plain);
                self.element(
                    "img",
                    &class,
                    node,
                    vec![("src", props.src.clone()), ("alt", props.alt.clone())],
                )
            }
            Component::Video(props) => {
                let class = self.class_attr(Vec::new(), &[], node, Layout::Plain);
                self.element("video", &class, node, video_attrs(props))
            }
            Component::Divider => {
                let class = self.class_attr(Vec::new(), &[], node, Layout::Plain);
                self.element("hr", &class, node, Vec::new())
            }
            Component::Hero(props) => {
                let class = self.class_attr(Vec::new(), &["hero"], node, Layout::Plain);
                let el = self.element("section", &class, node, Vec::new());
                hero_body(&el, props);
                el
            }
            Component::Card(props) => {
                let class = self.class_attr(Vec::new(), &["card"], node, Layout::Plain);
                let el = self.element("div", &class, node, Vec::new());
                card_body(&el, props);
                el
            }
            Component::Navbar(props) => {
                let class = self.class_attr(Vec::new(), &[], node, Layout::Plain);
                let el = self.element("nav", &class, node, Vec::new());
                navbar_body(&el, props);
                self.render_children(&el, node, depth);
                el
            }
            Component::Footer(props) => {
                let class = self.class_attr(Vec::new(), &[], node, Layout::Plain);
                let el = self.element("footer", &class, node, Vec::new());
                footer_body(&el, props);
                self.render_children(&el, node, depth);
                el
            }
            Component::CustomHtml(props) => {
                let class = self.class_attr(Vec::new(), &[], node, Layout::Plain);
                let fragment = parse_html(&props.html);
                let nodes: Vec<Handle> = fragment
                    .child_nodes()
                    .iter()
                    .map(|n| n.handle().clone())
                    .collect();
                self.fragments.push(fragment);
                if class.is_empty() && !node.hidden {
                    for child in nodes {
                        append(parent, child);
                    }
                    return;
                }
                let el = self.element("div", &class, node, Vec::new());
                for child in nodes {
                    append(&el, child);
                }
                el
            }
        };
        append(parent, element);
    }

    fn render_children(&mut self, element: &Handle, node: &ComponentNode, depth: usize) {
        for child in node.children() {
            self.render_node(element, child, depth + 1);
        }
    }

    fn element(
        &self,
        tag: &str,
        class: &str,
        node: &ComponentNode,
        mut attrs: Vec<(&'static str, String)>,
    ) -> Handle {
        if !class.is_empty() {
            attrs.insert(0, ("class", class.to_string()));
        }
        if node.hidden {
            attrs.push(("hidden", String::new()));
        }
        create_element(tag, attrs.iter().map(|(k, v)| (*k, v.as_str())).collect())
    }
}

fn video_attrs(props: &VideoProps) -> Vec<(&'static str, String)> {
    let mut attrs = vec![("src", props.src.clone())];
    if let Some(poster) = &props.poster {
        attrs.push(("poster", poster.clone()));
    }
    for (name, on) in [
        ("controls", props.controls),
        ("autoplay", props.autoplay),
        ("loop", props.looped),
        ("muted", props.muted),
    ] {
        if on {
            attrs.push((name, String::new()));
        }
    }
    attrs
}

fn text_element(tag: &str, attrs: Vec<(&str, &str)>, text: &str) -> Handle {
    let el = create_element(tag, attrs);
    append(&el, create_text(text));
    el
}

fn action(href: Option<&str>, class: Option<&str>, text: &str) -> Handle {
    let mut attrs = Vec::new();
    if let Some(class) = class {
        attrs.push(("class", class));
    }
    match href {
        Some(href) => {
            attrs.push(("href", href));
            text_element("a", attrs, text)
        }
        None => {
            attrs.push(("type", "button"));
            text_element("button", attrs, text)
        }
    }
}

fn hero_body(el: &Handle, props: &HeroProps) {
    append(el, text_element("h1", Vec::new(), &props.title));
    if !props.description.is_empty() {
        append(el, text_element("p", Vec::new(), &props.description));
    }
    if let Some(text) = &props.button_text {
        let href = props.button_href.as_deref().unwrap_or("#");
        append(el, action(Some(href), Some("hero-button"), text));
    }
    if let Some(src) = &props.image_src {
        append(el, create_element("img", vec![("src", src.as_str()), ("alt", "")]));
    }
}

fn card_body(el: &Handle, props: &CardProps) {
    if !props.image_src.is_empty() {
        append(
            el,
            create_element(
                "img",
                vec![("src", props.image_src.as_str()), ("alt", props.image_alt.as_str())],
            ),
        );
    }
    let body = create_element("div", vec![("class", "card-body")]);
    append(&body, text_element("h3", Vec::new(), &props.title));
    if !props.description.is_empty() {
        append(&body, text_element("p", Vec::new(), &props.description));
    }
    if let Some(text) = &props.button_text {
        append(&body, action(props.button_href.as_deref(), None, text));
    }
    append(el, body);
}

fn navbar_body(el: &Handle, props: &NavbarProps) {
    if !props.logo_text.is_empty() {
        append(
            el,
            text_element("a", vec![("class", "navbar-logo"), ("href", "/")], &props.logo_text),
        );
    }
    if !props.items.is_empty() {
        let list = create_element("ul", vec![("class", "navbar-items")]);
        for item in &props.items {
            let li = create_element("li", Vec::new());
            append(&li, text_element("a", vec![("href", item.href.as_str())], &item.label));
            append(&list, li);
        }
        append(el, list);
    }
    if let Some(text) = &props.button_text {
        append(el, action(None, None, text));
    }
}

fn footer_body(el: &Handle, props: &FooterProps) {
    if !props.text.is_empty() {
        append(el, text_element("p", Vec::new(), &props.text));
    }
    if !props.links.is_empty() {
        let links = create_element("div", vec![("class", "footer-links")]);
        for link in &props.links {
            append(&links, text_element("a", vec![("href", link.href.as_str())], &link.label));
        }
        append(el, links);
    }
}

/// `tag` if it is a plain, non-void, renderable element name, else `fallback`.
fn safe_tag<'t>(tag: &'t str, fallback: &'t str) -> &'t str {
    let valid = tag
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic())
        && tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        && !VOID_TAGS.contains(&tag)
        && !UNSAFE_TAGS.contains(&tag);
    if valid {
        tag
    } else {
        fallback
    }
}

fn append(parent: &Handle, child: Handle) {
    parent.children.borrow_mut().push(child);
}

/// Create an HTML element with attributes
fn create_element(tag: &str, attrs: Vec<(&str, &str)>) -> Handle {
    let qual_name = QualName::new(None, ns!(html), LocalName::from(tag));
    let attributes = attrs
        .into_iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(name)),
            value: value.to_string().into(),
        })
        .collect();

    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Element {
            name: qual_name,
            attrs: RefCell::new(attributes),
            template_contents: Default::default(),
            mathml_annotation_xml_integration_point: false,
        },
    })
}

/// Create a text node
fn create_text(text: &str) -> Handle {
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Text {
            contents: RefCell::new(text.to_string().into()),
        },
    })
}

/// Serialize the children of `holder`, each including its own tag.
fn serialize_children(holder: &Handle) -> String {
    let mut output = Vec::new();
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };
    for child in holder.children.borrow().iter() {
        let serializable = SerializableHandle::from(child.clone());
        if let Err(e) = serialize(&mut output, &serializable, opts.clone()) {
            log::warn!("render: HTML serialization failed: {e}");
        }
    }
    String::from_utf8_lossy(&output).into_owned()
}

/// Escape HTML special characters in text
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{extract, Length};
    use crate::tree::component::{GridProps, LinkProps, TextProps};
    use crate::tree::{ComponentKind, ROOT_ID};

    fn text(id: &str, value: &str, class: &str) -> ComponentNode {
        let (style, class_name) = extract(class).into_parts();
        ComponentNode::new(
            id,
            Component::Text(TextProps {
                text: value.into(),
                tag: "p".into(),
            }),
        )
        .with_style(style, class_name)
    }

    #[test]
    fn test_render_text_with_style() {
        let mut tree = Tree::new();
        tree.append_child(ROOT_ID, text("t", "Hi & bye", "text-center p-4 lead"))
            .unwrap();
        let out = render(&tree, "t", &RenderOptions::default());
        assert_eq!(out.html, r#"<p class="p-4 text-center lead">Hi &amp; bye</p>"#);
        assert!(out.css.contains(".p-4 { padding: 16px; }"));
        assert!(out.css.contains(".text-center { text-align: center; }"));
        assert!(!out.css.contains("lead"));
    }

    #[test]
    fn test_render_grid_dedupes_layout_markers() {
        let mut tree = Tree::new();
        let (style, class_name) = extract("grid grid-cols-2 gap-2 max-w-6xl").into_parts();
        tree.append_child(
            ROOT_ID,
            ComponentNode::new(
                "g",
                Component::Grid(GridProps {
                    tag: "section".into(),
                    columns: 3,
                    gap: None,
                }),
            )
            .with_style(style, class_name),
        )
        .unwrap();
        tree.append_child("g", text("a", "A", "")).unwrap();
        let out = render(&tree, "g", &RenderOptions::default());
        assert_eq!(
            out.html,
            r#"<section class="grid grid-cols-3 max-w-6xl"><p>A</p></section>"#
        );
    }

    #[test]
    fn test_layout_markers_of_another_kind_survive() {
        let mut tree = Tree::new();
        let (style, class_name) = extract("flex grid-cols-2 gap-4 lead").into_parts();
        tree.append_child(
            ROOT_ID,
            ComponentNode::new(
                "r",
                Component::Row(crate::tree::component::FlexProps {
                    tag: "div".into(),
                    gap: Some(Length::px(8.0)),
                }),
            )
            .with_style(style, class_name),
        )
        .unwrap();
        let (style, class_name) = extract("flex-col grid-cols-5").into_parts();
        tree.append_child(
            ROOT_ID,
            ComponentNode::new(
                "g",
                Component::Grid(GridProps {
                    tag: "div".into(),
                    columns: 3,
                    gap: None,
                }),
            )
            .with_style(style, class_name),
        )
        .unwrap();

        let row = render(&tree, "r", &RenderOptions::default());
        assert_eq!(row.html, r#"<div class="flex gap-2 grid-cols-2 lead"></div>"#);
        let grid = render(&tree, "g", &RenderOptions::default());
        assert_eq!(grid.html, r#"<div class="grid grid-cols-3 flex-col"></div>"#);
    }

    #[test]
    fn test_missing_child_placeholder() {
        let json = r#"{
            "ROOT": { "type": { "resolvedName": "Container" }, "isCanvas": true, "nodes": ["ghost", "l"] },
            "l": { "type": { "resolvedName": "Link" }, "props": { "text": "x", "href": "/x", "newTab": true } }
        }"#;
        let tree = Tree::from_json(json).unwrap();
        let out = render(&tree, ROOT_ID, &RenderOptions::default());
        assert_eq!(
            out.html,
            r#"<div><div data-missing-node="ghost"></div><a href="/x" target="_blank" rel="noopener noreferrer">x</a></div>"#
        );
    }

    #[test]
    fn test_missing_root_renders_placeholder() {
        let out = render(&Tree::new(), "nope", &RenderOptions::default());
        assert_eq!(out.html, r#"<div data-missing-node="nope"></div>"#);
    }

    #[test]
    fn test_unsafe_tags_fall_back() {
        assert_eq!(safe_tag("section", "div"), "section");
        assert_eq!(safe_tag("script", "div"), "div");
        assert_eq!(safe_tag("img", "div"), "div");
        assert_eq!(safe_tag("x y", "div"), "div");
        assert_eq!(safe_tag("", "p"), "p");
    }

    #[test]
    fn test_custom_html_is_verbatim() {
        let mut tree = Tree::new();
        tree.append_child(
            ROOT_ID,
            ComponentNode::new(
                "c",
                Component::CustomHtml(crate::tree::component::CustomHtmlProps {
                    html: "<table><tbody><tr><td>1</td></tr></tbody></table>".into(),
                }),
            ),
        )
        .unwrap();
        let out = render(&tree, "c", &RenderOptions::default());
        assert_eq!(out.html, "<table><tbody><tr><td>1</td></tr></tbody></table>");
    }

    #[test]
    fn test_custom_html_nested_markup_in_wrapper() {
        let mut tree = Tree::new();
        let (style, class_name) = extract("p-4 embed").into_parts();
        tree.append_child(
            ROOT_ID,
            ComponentNode::new(
                "c",
                Component::CustomHtml(crate::tree::component::CustomHtmlProps {
                    html: "<ul><li><b>x</b> y</li></ul><p>z</p>".into(),
                }),
            )
            .with_style(style, class_name),
        )
        .unwrap();
        let out = render(&tree, ROOT_ID, &RenderOptions::default());
        assert_eq!(
            out.html,
            r#"<div><div class="p-4 embed"><ul><li><b>x</b> y</li></ul><p>z</p></div></div>"#
        );
    }

    #[test]
    fn test_document_wraps_body() {
        let mut tree = Tree::with_root(
            ComponentNode::new(ROOT_ID, Component::empty(ComponentKind::Container))
                .with_style(Default::default(), "antialiased"),
        );
        tree.append_child(
            ROOT_ID,
            ComponentNode::new(
                "l",
                Component::Link(LinkProps {
                    text: "Home".into(),
                    href: "/".into(),
                    new_tab: false,
                }),
            ),
        )
        .unwrap();
        let options = RenderOptions {
            title: "A <b> page".into(),
            include_baseline_css: false,
            ..Default::default()
        };
        let html = render_document(&tree, &options);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>A &lt;b&gt; page</title>"));
        assert!(html.contains("<body class=\"antialiased\">\n<a href=\"/\">Home</a>\n</body>"));
        assert!(!html.contains(".navbar-logo"));
    }
}
