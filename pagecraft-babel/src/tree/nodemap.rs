//! Flat node-map interchange
//!
//! The persisted and editor-facing shape of a tree is a flat JSON object keyed
//! by node id:
//!
//! ```json
//! {
//!   "ROOT": {
//!     "type": { "resolvedName": "Container" },
//!     "isCanvas": true,
//!     "props": { "tag": "body", "paddingTop": "16px", "className": "antialiased" },
//!     "displayName": "Container",
//!     "nodes": ["node-1"],
//!     "parent": null,
//!     "hidden": false,
//!     "linkedNodes": {}
//!   }
//! }
//! ```
//!
//! `props` merges the component's own props, the structured style fields and
//! the residue `className`. Loading is lenient: persisted projects outlive
//! the code that wrote them, so anything that can be repaired is repaired and
//! logged rather than rejected.

use super::{Component, ComponentKind, ComponentNode, Tree, ROOT_ID};
use crate::style::StyleProps;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Id to record, in tree order.
pub type NodeMap = IndexMap<String, NodeRecord>;

/// `{"resolvedName": "..."}`. A bare string is accepted on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDescriptor {
    pub resolved_name: String,
}

impl<'de> Deserialize<'de> for TypeDescriptor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Name(String),
            #[serde(rename_all = "camelCase")]
            Resolved { resolved_name: String },
        }
        Ok(match Repr::deserialize(deserializer)? {
            Repr::Name(resolved_name) | Repr::Resolved { resolved_name } => {
                TypeDescriptor { resolved_name }
            }
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRecord {
    #[serde(rename = "type")]
    pub node_type: TypeDescriptor,
    #[serde(default, alias = "isContainer")]
    pub is_canvas: bool,
    #[serde(default)]
    pub props: Map<String, Value>,
    #[serde(default)]
    pub display_name: String,
    #[serde(default, alias = "children")]
    pub nodes: Vec<String>,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub linked_nodes: IndexMap<String, String>,
}

fn node_record(node: &ComponentNode) -> Result<NodeRecord, serde_json::Error> {
    let kind = node.kind();
    let mut props = node.component.props()?;
    if let Value::Object(style) = serde_json::to_value(&node.style)? {
        props.extend(style);
    }
    if !node.class_name.is_empty() {
        props.insert("className".to_string(), Value::from(node.class_name.clone()));
    }
    Ok(NodeRecord {
        node_type: TypeDescriptor {
            resolved_name: kind.name().to_string(),
        },
        is_canvas: kind.is_container(),
        props,
        display_name: kind.name().to_string(),
        nodes: node.children.clone(),
        parent: node.parent.clone(),
        hidden: node.hidden,
        linked_nodes: IndexMap::new(),
    })
}

/// Decode one record into a childless node.
fn component_node(id: &str, record: &NodeRecord) -> ComponentNode {
    let name = record.node_type.resolved_name.as_str();
    let component = match ComponentKind::from_name(name) {
        Some(kind) => Component::from_props(kind, &record.props).unwrap_or_else(|e| {
            log::warn!("node '{id}': invalid {name} props ({e}), using defaults");
            Component::empty(kind)
        }),
        None => {
            log::warn!("node '{id}': unknown component '{name}', loading as Container");
            Component::empty(ComponentKind::Container)
        }
    };
    let style = serde_json::from_value::<StyleProps>(Value::Object(record.props.clone()))
        .unwrap_or_else(|e| {
            log::warn!("node '{id}': invalid style props ({e}), dropping style");
            StyleProps::default()
        });
    let class_name = record
        .props
        .get("className")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let mut node = ComponentNode::new(id, component).with_style(style, class_name);
    node.hidden = record.hidden;
    node
}

impl Tree {
    /// Flatten into the interchange node map, root first then pre-order.
    pub fn to_node_map(&self) -> Result<NodeMap, serde_json::Error> {
        let mut map = NodeMap::new();
        for (_, node) in self.walk() {
            map.insert(node.id.clone(), node_record(node)?);
        }
        Ok(map)
    }

    /// Rebuild a tree from a node map.
    ///
    /// The root is `"ROOT"` if present, else the first record without a
    /// parent, else the first record. Parent references are recomputed from
    /// the children lists. Records that cannot be reached from the root, and
    /// repeated references to an already placed node, are dropped. Children
    /// of leaf kinds are dropped. Child ids without a record are kept so that
    /// rendering can substitute a placeholder.
    pub fn from_node_map(map: &NodeMap) -> Tree {
        let root_id = if map.contains_key(ROOT_ID) {
            Some(ROOT_ID)
        } else {
            map.iter()
                .find(|(_, r)| r.parent.is_none())
                .or_else(|| map.iter().next())
                .map(|(id, _)| id.as_str())
        };
        let Some(root_id) = root_id else {
            return Tree::new();
        };

        let mut tree = Tree::with_root(component_node(root_id, &map[root_id]));
        let mut placed: IndexSet<String> = IndexSet::new();
        placed.insert(root_id.to_string());
        let mut stack = vec![root_id.to_string()];

        while let Some(id) = stack.pop() {
            let record = &map[id.as_str()];
            let is_container = tree.get(&id).map(|n| n.is_container()).unwrap_or(false);
            if !is_container {
                if !record.nodes.is_empty() {
                    log::warn!(
                        "node '{id}': {} cannot have children, dropping {}",
                        record.node_type.resolved_name,
                        record.nodes.len()
                    );
                }
                continue;
            }

            let mut children = Vec::with_capacity(record.nodes.len());
            for child_id in &record.nodes {
                if placed.contains(child_id) {
                    log::warn!("node '{child_id}' is referenced more than once, keeping the first");
                    continue;
                }
                match map.get(child_id) {
                    Some(child_record) => {
                        let mut child = component_node(child_id, child_record);
                        child.parent = Some(id.clone());
                        tree.nodes.insert(child_id.clone(), child);
                        placed.insert(child_id.clone());
                        children.push(child_id.clone());
                    }
                    None => {
                        log::warn!("node '{id}' references missing node '{child_id}'");
                        children.push(child_id.clone());
                    }
                }
            }
            for child_id in children.iter().rev() {
                if tree.nodes.contains_key(child_id) {
                    stack.push(child_id.clone());
                }
            }
            if let Some(node) = tree.nodes.get_mut(&id) {
                node.children = children;
            }
        }

        let dropped = map.len() - placed.len();
        if dropped > 0 {
            log::warn!("dropped {dropped} node(s) unreachable from '{root_id}'");
        }
        tree
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.to_node_map()?)
    }

    pub fn from_json(source: &str) -> Result<Tree, serde_json::Error> {
        let map: NodeMap = serde_json::from_str(source)?;
        Ok(Tree::from_node_map(&map))
    }
}
