//! In-memory accessibility tree snapshot.
//!
//! Nodes are stored in pre-order, so a [`NodeId`] doubles as the document
//! position and every subtree occupies a contiguous index range. Snapshots
//! are usually loaded from JSON:
//!
//! ```json
//! {
//!   "role": "list", "id": "fruits",
//!   "children": [
//!     { "role": "listitem", "name": "Apple" },
//!     { "role": "listitem", "name": "Pear", "hidden": true }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::result::LocatorResult;
use crate::tree::{AccessibilityTree, Visibility};

/// Handle to a node of a [`UiTree`] (its pre-order index)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub usize);

/// Nested description of a UI node, used to build a [`UiTree`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiNodeSpec {
    /// ARIA role (`None` for generic containers)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Accessible name
    pub name: String,
    /// Optional identifier for lookups and diagnostics
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Resolved ARIA attribute values
    pub attributes: BTreeMap<String, String>,
    /// Hidden from the accessibility tree (applies to the whole subtree)
    pub hidden: bool,
    /// Role suppressed as presentational
    pub presentational: bool,
    /// Child nodes in document order
    pub children: Vec<UiNodeSpec>,
}

impl UiNodeSpec {
    /// Create a node with a role
    #[must_use]
    pub fn new(role: impl Into<String>) -> Self {
        Self {
            role: Some(role.into()),
            ..Self::default()
        }
    }

    /// Create a node without a role
    #[must_use]
    pub fn generic() -> Self {
        Self::default()
    }

    /// Set the identifier
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the accessible name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set an ARIA attribute value
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Mark the subtree hidden
    #[must_use]
    pub const fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Mark the role presentational
    #[must_use]
    pub const fn with_presentational(mut self, presentational: bool) -> Self {
        self.presentational = presentational;
        self
    }

    /// Append a child
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Append several children
    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = Self>) -> Self {
        self.children.extend(children);
        self
    }
}

#[derive(Debug, Clone)]
struct FlatNode {
    role: Option<String>,
    name: String,
    id: Option<String>,
    attributes: BTreeMap<String, String>,
    /// Hidden itself or through an ancestor
    hidden: bool,
    presentational: bool,
    parent: Option<NodeId>,
    /// One past the last descendant
    subtree_end: usize,
}

/// Immutable snapshot of a UI tree
#[derive(Debug, Clone)]
pub struct UiTree {
    nodes: Vec<FlatNode>,
}

impl UiTree {
    /// Build a tree from its root node
    #[must_use]
    pub fn new(root: UiNodeSpec) -> Self {
        let mut tree = Self { nodes: Vec::new() };
        tree.push(root, None, false);
        tree
    }

    /// Parse a tree from JSON
    ///
    /// # Errors
    ///
    /// Returns error if the JSON does not describe a node
    pub fn from_json(json: &str) -> LocatorResult<Self> {
        let root: UiNodeSpec = serde_json::from_str(json)?;
        Ok(Self::new(root))
    }

    /// Load a tree from a JSON file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed
    pub fn from_path(path: impl AsRef<Path>) -> LocatorResult<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    fn push(&mut self, spec: UiNodeSpec, parent: Option<NodeId>, hidden_ancestor: bool) {
        let UiNodeSpec {
            role,
            name,
            id,
            attributes,
            hidden,
            presentational,
            children,
        } = spec;
        let index = self.nodes.len();
        let hidden = hidden || hidden_ancestor;
        self.nodes.push(FlatNode {
            role,
            name,
            id,
            attributes,
            hidden,
            presentational,
            parent,
            subtree_end: index + 1,
        });
        for child in children {
            self.push(child, Some(NodeId(index)), hidden);
        }
        self.nodes[index].subtree_end = self.nodes.len();
    }

    /// The root node
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of nodes
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree has no nodes (never true for a built tree)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Find the first node with the given identifier
    #[must_use]
    pub fn by_id(&self, id: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|node| node.id.as_deref() == Some(id))
            .map(NodeId)
    }

    /// Role of a node
    #[must_use]
    pub fn role(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(node.0).and_then(|n| n.role.as_deref())
    }

    /// Identifier of a node
    #[must_use]
    pub fn id(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(node.0).and_then(|n| n.id.as_deref())
    }

    /// Parent of a node
    #[must_use]
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.0).and_then(|n| n.parent)
    }

    /// Whether a node is hidden, directly or through an ancestor
    #[must_use]
    pub fn is_hidden(&self, node: NodeId) -> bool {
        self.nodes.get(node.0).is_some_and(|n| n.hidden)
    }
}

impl AccessibilityTree for UiTree {
    type Element = NodeId;

    fn compare_document_position(&self, a: &NodeId, b: &NodeId) -> Ordering {
        a.0.cmp(&b.0)
    }

    fn is_ancestor(&self, ancestor: &NodeId, descendant: &NodeId) -> bool {
        self.nodes
            .get(ancestor.0)
            .is_some_and(|node| ancestor.0 < descendant.0 && descendant.0 < node.subtree_end)
    }

    fn find_by_role(&self, role: &str, base: &NodeId, visibility: Visibility) -> Vec<NodeId> {
        let Some(base_node) = self.nodes.get(base.0) else {
            return Vec::new();
        };
        (base.0 + 1..base_node.subtree_end)
            .filter(|&index| {
                let node = &self.nodes[index];
                node.role.as_deref() == Some(role)
                    && (visibility.include_hidden || !node.hidden)
                    && (visibility.include_presentational || !node.presentational)
            })
            .map(NodeId)
            .collect()
    }

    fn accessible_name(&self, element: &NodeId) -> String {
        self.nodes
            .get(element.0)
            .map(|node| node.name.clone())
            .unwrap_or_default()
    }

    fn attribute_value(&self, element: &NodeId, attribute: &str) -> Option<String> {
        self.nodes
            .get(element.0)
            .and_then(|node| node.attributes.get(attribute).cloned())
    }

    fn describe(&self, element: &NodeId) -> String {
        let Some(node) = self.nodes.get(element.0) else {
            return format!("<unknown node {}>", element.0);
        };
        let mut out = node.role.clone().unwrap_or_else(|| "generic".to_string());
        if let Some(id) = &node.id {
            out.push('#');
            out.push_str(id);
        }
        if !node.name.is_empty() {
            out.push_str(&format!(" {:?}", node.name));
        }
        out
    }
}
