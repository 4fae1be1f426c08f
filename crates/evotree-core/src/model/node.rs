use std::fmt;

use serde::Serialize;

use super::operation::Operation;

/// Identity of a node inside one tree (its position in creation order)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Outgoing edge: the child it leads to and the operation that derives it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub child: NodeId,
    pub op: Operation,
    /// Char offset in the parent's value where `op` applies
    pub at: usize,
}

/// A string reachable from the root by a sequence of operations
///
/// `name` is the display identity and is unique within a tree; `value` is the
/// logical string used for every further derivation. The two differ only when
/// the value was already taken by a node at capacity and a numeric suffix was
/// needed (`abc_1`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    pub id: NodeId,

    /// Display identity (may carry a disambiguating suffix)
    pub name: String,

    /// Logical string this node represents
    pub value: String,

    /// Edge count from the root
    pub depth: usize,

    /// Parent node (None for the root)
    pub parent: Option<NodeId>,

    /// Operation on the incoming edge (None for the root)
    pub op: Option<Operation>,

    /// Outgoing edges in creation order
    pub children: Vec<Edge>,

    /// Set once the node represents a placed target string
    pub is_leaf: bool,
}

impl Node {
    /// Create the root node of a tree
    pub fn root(value: String) -> Self {
        Self {
            id: NodeId(0),
            name: value.clone(),
            value,
            depth: 0,
            parent: None,
            op: None,
            children: Vec::new(),
            is_leaf: false,
        }
    }

    /// Create a child node; the caller records the edge on the parent
    pub fn child(id: NodeId, name: String, value: String, parent: &Node, op: Operation) -> Self {
        Self {
            id,
            name,
            value,
            depth: parent.depth + 1,
            parent: Some(parent.id),
            op: Some(op),
            children: Vec::new(),
            is_leaf: false,
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Current number of outgoing edges
    pub fn edge_count(&self) -> usize {
        self.children.len()
    }

    /// Whether the display name differs from the logical value
    pub fn is_disambiguated(&self) -> bool {
        self.name != self.value
    }
}
