//! Component tree
//!
//! A [`Tree`] is an arena of [`ComponentNode`]s keyed by id, with one root.
//! Ownership runs parent to children through each node's ordered `children`
//! list; `parent` is a back-reference kept in sync by [`Tree::append_child`].
//! The invariants below hold for every tree built through this API:
//!
//! - the root exists and has no parent
//! - every other node appears in exactly one children list, and that list's
//!   owner is its `parent`
//! - a node whose kind is not a container has no children
//! - every node is reachable from the root
//!
//! Trees loaded from a node map may additionally carry dangling child ids
//! (see [`nodemap`]); [`Tree::validate`] reports those.

pub mod component;
pub mod nodemap;

pub use component::{Component, ComponentKind, NavItem};

use crate::error::TreeError;
use crate::style::StyleProps;
use indexmap::{IndexMap, IndexSet};

/// Id of the root node in every tree.
pub const ROOT_ID: &str = "ROOT";

#[derive(Debug, Clone, PartialEq)]
pub struct ComponentNode {
    pub id: String,
    pub component: Component,
    pub style: StyleProps,
    /// Class tokens not captured by `style`, space separated.
    pub class_name: String,
    pub hidden: bool,
    children: Vec<String>,
    parent: Option<String>,
}

impl ComponentNode {
    pub fn new(id: impl Into<String>, component: Component) -> Self {
        ComponentNode {
            id: id.into(),
            component,
            style: StyleProps::default(),
            class_name: String::new(),
            hidden: false,
            children: Vec::new(),
            parent: None,
        }
    }

    pub fn with_style(mut self, style: StyleProps, class_name: impl Into<String>) -> Self {
        self.style = style;
        self.class_name = class_name.into();
        self
    }

    pub fn kind(&self) -> ComponentKind {
        self.component.kind()
    }

    pub fn is_container(&self) -> bool {
        self.kind().is_container()
    }

    pub fn children(&self) -> &[String] {
        &self.children
    }

    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    root: String,
    nodes: IndexMap<String, ComponentNode>,
}

impl Default for Tree {
    fn default() -> Self {
        Tree::new()
    }
}

impl Tree {
    /// A tree holding only an empty `div` Container root.
    pub fn new() -> Self {
        Tree::with_root(ComponentNode::new(
            ROOT_ID,
            Component::empty(ComponentKind::Container),
        ))
    }

    /// A tree whose root is `root`. The node's id becomes the root id.
    pub fn with_root(mut root: ComponentNode) -> Self {
        root.parent = None;
        root.children.clear();
        let mut nodes = IndexMap::new();
        let id = root.id.clone();
        nodes.insert(id.clone(), root);
        Tree { root: id, nodes }
    }

    pub fn root_id(&self) -> &str {
        &self.root
    }

    pub fn root(&self) -> &ComponentNode {
        // The root is inserted on construction and never removed.
        &self.nodes[self.root.as_str()]
    }

    pub fn get(&self, id: &str) -> Option<&ComponentNode> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Children of `id`, empty for unknown ids.
    pub fn children_of(&self, id: &str) -> &[String] {
        self.nodes.get(id).map(|n| n.children()).unwrap_or(&[])
    }

    /// Number of nodes including the root.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &ComponentNode> {
        self.nodes.values()
    }

    /// Append `node` as the last child of `parent_id`.
    pub fn append_child(&mut self, parent_id: &str, mut node: ComponentNode) -> Result<(), TreeError> {
        if self.nodes.contains_key(&node.id) {
            return Err(TreeError::DuplicateId(node.id));
        }
        let parent = self
            .nodes
            .get_mut(parent_id)
            .ok_or_else(|| TreeError::UnknownNode(parent_id.to_string()))?;
        if !parent.is_container() {
            return Err(TreeError::LeafCannotHaveChildren {
                parent: parent_id.to_string(),
                kind: parent.kind().name().to_string(),
            });
        }
        parent.children.push(node.id.clone());
        node.parent = Some(parent_id.to_string());
        node.children.clear();
        self.nodes.insert(node.id.clone(), node);
        Ok(())
    }

    /// Depth-first pre-order walk from the root, yielding `(depth, node)`.
    ///
    /// Dangling child ids are skipped and each node is visited at most once.
    pub fn walk(&self) -> Vec<(usize, &ComponentNode)> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut seen: IndexSet<&str> = IndexSet::new();
        let mut stack: Vec<(usize, &str)> = vec![(0, self.root.as_str())];
        while let Some((depth, id)) = stack.pop() {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            if !seen.insert(id) {
                continue;
            }
            out.push((depth, node));
            for child in node.children.iter().rev() {
                stack.push((depth + 1, child.as_str()));
            }
        }
        out
    }

    /// Check every tree invariant.
    pub fn validate(&self) -> Result<(), TreeError> {
        if self.root().parent.is_some() {
            return Err(TreeError::InconsistentParent(self.root.clone()));
        }
        let mut listed: IndexMap<&str, &str> = IndexMap::new();
        for node in self.nodes.values() {
            if !node.is_container() && !node.children.is_empty() {
                return Err(TreeError::LeafCannotHaveChildren {
                    parent: node.id.clone(),
                    kind: node.kind().name().to_string(),
                });
            }
            for child in &node.children {
                if !self.nodes.contains_key(child) {
                    return Err(TreeError::UnknownNode(child.clone()));
                }
                if listed.insert(child.as_str(), node.id.as_str()).is_some() {
                    return Err(TreeError::InconsistentParent(child.clone()));
                }
            }
        }
        for node in self.nodes.values() {
            if node.id == self.root {
                continue;
            }
            match listed.get(node.id.as_str()) {
                Some(owner) if node.parent.as_deref() == Some(*owner) => {}
                _ => return Err(TreeError::InconsistentParent(node.id.clone())),
            }
        }
        let reachable = self.walk().len();
        if reachable != self.nodes.len() {
            let seen: IndexSet<&str> = self.walk().into_iter().map(|(_, n)| n.id.as_str()).collect();
            if let Some(lost) = self.nodes.keys().find(|id| !seen.contains(id.as_str())) {
                return Err(TreeError::Unreachable(lost.clone()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::component::{ImageProps, TextProps};
    use super::*;

    fn text(id: &str, value: &str) -> ComponentNode {
        ComponentNode::new(
            id,
            Component::Text(TextProps {
                text: value.into(),
                tag: "p".into(),
            }),
        )
    }

    #[test]
    fn test_new_tree_has_root() {
        let tree = Tree::new();
        assert_eq!(tree.root_id(), ROOT_ID);
        assert_eq!(tree.root().kind(), ComponentKind::Container);
        assert_eq!(tree.node_count(), 1);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_append_child_links_both_directions() {
        let mut tree = Tree::new();
        tree.append_child(ROOT_ID, text("a", "A")).unwrap();
        tree.append_child(ROOT_ID, text("b", "B")).unwrap();
        assert_eq!(tree.children_of(ROOT_ID), ["a", "b"]);
        assert_eq!(tree.get("b").unwrap().parent(), Some(ROOT_ID));
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_leaf_rejects_children() {
        let mut tree = Tree::new();
        tree.append_child(ROOT_ID, text("a", "A")).unwrap();
        let err = tree
            .append_child("a", ComponentNode::new("b", Component::Image(ImageProps::default())))
            .unwrap_err();
        assert_eq!(
            err,
            TreeError::LeafCannotHaveChildren {
                parent: "a".into(),
                kind: "Text".into()
            }
        );
        assert!(!tree.contains("b"));
    }

    #[test]
    fn test_duplicate_and_unknown_ids() {
        let mut tree = Tree::new();
        tree.append_child(ROOT_ID, text("a", "A")).unwrap();
        assert_eq!(
            tree.append_child(ROOT_ID, text("a", "again")),
            Err(TreeError::DuplicateId("a".into()))
        );
        assert_eq!(
            tree.append_child("missing", text("c", "C")),
            Err(TreeError::UnknownNode("missing".into()))
        );
    }

    #[test]
    fn test_walk_is_preorder() {
        let mut tree = Tree::new();
        tree.append_child(ROOT_ID, ComponentNode::new("box", Component::empty(ComponentKind::Column)))
            .unwrap();
        tree.append_child("box", text("inner", "I")).unwrap();
        tree.append_child(ROOT_ID, text("after", "A")).unwrap();
        let order: Vec<(usize, &str)> = tree.walk().into_iter().map(|(d, n)| (d, n.id.as_str())).collect();
        assert_eq!(order, vec![(0, "ROOT"), (1, "box"), (2, "inner"), (1, "after")]);
    }
}
