//! Abstract DOM capability
//!
//! The classifier and builder only ever see a [`DomNode`]: tag name,
//! attributes, child nodes and text content. Any HTML parser can feed the
//! importer by implementing this trait; the crate ships an implementation over
//! html5ever's reference-counted DOM in [`rcdom`].

pub mod rcdom;

pub use rcdom::{parse_html, HtmlNode};

/// Coarse node classification used while walking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Element,
    Text,
    Comment,
    /// Doctype, processing instructions, the document node itself.
    Other,
}

/// Read-only view of one node in a parsed HTML tree.
pub trait DomNode: Sized {
    fn kind(&self) -> NodeKind;

    /// Lowercase local name for elements, `None` otherwise.
    fn tag_name(&self) -> Option<String>;

    fn attribute(&self, name: &str) -> Option<String>;

    /// All attributes in source order.
    fn attributes(&self) -> Vec<(String, String)>;

    fn child_nodes(&self) -> Vec<Self>;

    /// The node's own character data (text and comment nodes).
    fn data(&self) -> Option<String>;

    /// Serialized markup of the node including itself.
    fn outer_html(&self) -> String;

    /// Concatenated text of all descendant text nodes, in document order.
    fn text_content(&self) -> String {
        let mut out = String::new();
        let mut stack = vec![self.child_nodes()];
        while let Some(level) = stack.last_mut() {
            if level.is_empty() {
                stack.pop();
                continue;
            }
            let node = level.remove(0);
            match node.kind() {
                NodeKind::Text => {
                    if let Some(text) = node.data() {
                        out.push_str(&text);
                    }
                }
                NodeKind::Element => stack.push(node.child_nodes()),
                NodeKind::Comment | NodeKind::Other => {}
            }
        }
        out
    }

    /// Child nodes that are elements.
    fn element_children(&self) -> Vec<Self> {
        self.child_nodes()
            .into_iter()
            .filter(|c| c.kind() == NodeKind::Element)
            .collect()
    }

    fn has_tag(&self, tag: &str) -> bool {
        self.tag_name().as_deref() == Some(tag)
    }
}

/// Collapse runs of whitespace into single spaces and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
