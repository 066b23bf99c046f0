//! Shared helpers for the integration tests

use pagecraft_babel::{build_from_html, BuildOptions, Component, ComponentKind, Tree};

pub fn import(html: &str) -> Tree {
    build_from_html(html, &BuildOptions::default())
}

/// Kinds of the children of `id`, in order.
pub fn child_kinds(tree: &Tree, id: &str) -> Vec<ComponentKind> {
    tree.children_of(id)
        .iter()
        .filter_map(|child| tree.get(child))
        .map(|node| node.kind())
        .collect()
}

/// The component of the `n`th child of `id`.
pub fn child<'a>(tree: &'a Tree, id: &str, n: usize) -> &'a Component {
    let child_id = &tree.children_of(id)[n];
    &tree.get(child_id).expect("child exists").component
}
