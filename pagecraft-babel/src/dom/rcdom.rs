//! [`DomNode`] over `markup5ever_rcdom`.
//!
//! Parsing goes through html5ever, so malformed markup is normalized the way a
//! browser would before the importer sees it.

use super::{DomNode, NodeKind};
use html5ever::serialize::{SerializeOpts, TraversalScope};
use html5ever::tendril::TendrilSink;
use html5ever::{parse_document, serialize};
use markup5ever_rcdom::{Handle, NodeData, RcDom, SerializableHandle};
use std::rc::Rc;

/// A node handle from an html5ever parse.
///
/// Dropping an rcdom document empties the children of every node under it, so
/// each handle shares ownership of the document it came from.
#[derive(Clone)]
pub struct HtmlNode {
    handle: Handle,
    document: Rc<RcDom>,
}

impl HtmlNode {
    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    fn sibling(&self, handle: Handle) -> Self {
        HtmlNode {
            handle,
            document: Rc::clone(&self.document),
        }
    }
}

impl std::fmt::Debug for HtmlNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.tag_name() {
            Some(tag) => write!(f, "HtmlNode(<{tag}>)"),
            None => write!(f, "HtmlNode({:?})", self.kind()),
        }
    }
}

/// Parse a document and return its `<body>` element.
///
/// html5ever always synthesizes `html`/`head`/`body`, so fragments and full
/// documents both work. If no body can be found the document node itself is
/// returned.
pub fn parse_html(source: &str) -> HtmlNode {
    let dom = parse_document(RcDom::default(), Default::default()).one(source);
    let handle = find_body(&dom.document).unwrap_or_else(|| dom.document.clone());
    HtmlNode {
        handle,
        document: Rc::new(dom),
    }
}

fn find_body(document: &Handle) -> Option<Handle> {
    let html = document
        .children
        .borrow()
        .iter()
        .find(|c| element_name(c).as_deref() == Some("html"))
        .cloned()?;
    let body = html
        .children
        .borrow()
        .iter()
        .find(|c| element_name(c).as_deref() == Some("body"))
        .cloned();
    body
}

fn element_name(handle: &Handle) -> Option<String> {
    match &handle.data {
        NodeData::Element { name, .. } => Some(name.local.as_ref().to_ascii_lowercase()),
        _ => None,
    }
}

impl DomNode for HtmlNode {
    fn kind(&self) -> NodeKind {
        match &self.handle.data {
            NodeData::Element { .. } => NodeKind::Element,
            NodeData::Text { .. } => NodeKind::Text,
            NodeData::Comment { .. } => NodeKind::Comment,
            _ => NodeKind::Other,
        }
    }

    fn tag_name(&self) -> Option<String> {
        element_name(&self.handle)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        match &self.handle.data {
            NodeData::Element { attrs, .. } => attrs
                .borrow()
                .iter()
                .find(|a| a.name.local.as_ref().eq_ignore_ascii_case(name))
                .map(|a| a.value.to_string()),
            _ => None,
        }
    }

    fn attributes(&self) -> Vec<(String, String)> {
        match &self.handle.data {
            NodeData::Element { attrs, .. } => attrs
                .borrow()
                .iter()
                .map(|a| (a.name.local.to_string(), a.value.to_string()))
                .collect(),
            _ => Vec::new(),
        }
    }

    fn child_nodes(&self) -> Vec<Self> {
        self.handle
            .children
            .borrow()
            .iter()
            .map(|child| self.sibling(child.clone()))
            .collect()
    }

    fn data(&self) -> Option<String> {
        match &self.handle.data {
            NodeData::Text { contents } => Some(contents.borrow().to_string()),
            NodeData::Comment { contents } => Some(contents.to_string()),
            _ => None,
        }
    }

    fn outer_html(&self) -> String {
        let mut output = Vec::new();
        let opts = SerializeOpts {
            traversal_scope: TraversalScope::IncludeNode,
            ..Default::default()
        };
        let serializable = SerializableHandle::from(self.handle.clone());
        if let Err(e) = serialize(&mut output, &serializable, opts) {
            log::warn!("failed to serialize <{:?}>: {e}", self.tag_name());
            return String::new();
        }
        String::from_utf8_lossy(&output).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fragment_finds_body() {
        let body = parse_html("<div class=\"a\">x</div>");
        assert_eq!(body.tag_name().as_deref(), Some("body"));
        let children = body.element_children();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].attribute("class").as_deref(), Some("a"));
        assert_eq!(children[0].attribute("CLASS").as_deref(), Some("a"));
    }

    #[test]
    fn test_comment_and_text_kinds() {
        let body = parse_html("<body><!-- note -->hi</body>");
        let kinds: Vec<NodeKind> = body.child_nodes().iter().map(|n| n.kind()).collect();
        assert_eq!(kinds, vec![NodeKind::Comment, NodeKind::Text]);
    }

    #[test]
    fn test_outer_html() {
        let body = parse_html("<p class=\"x\">a &amp; b</p>");
        let p = &body.element_children()[0];
        assert_eq!(p.outer_html(), "<p class=\"x\">a &amp; b</p>");
    }

    #[test]
    fn test_descendants_outlive_the_body_handle() {
        let list = parse_html("<ul><li>a</li><li>b <em>c</em></li></ul>")
            .element_children()
            .remove(0);
        let items = list.element_children();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].element_children().len(), 1);
        assert_eq!(list.text_content(), "ab c");
        assert_eq!(list.outer_html(), "<ul><li>a</li><li>b <em>c</em></li></ul>");
    }
}
