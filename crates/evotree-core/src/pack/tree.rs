use std::collections::HashMap;

use serde::Serialize;

use crate::errors::{EvoTreeError, Result};
use crate::model::{Edge, Node, NodeId, Operation};
use crate::script::EditScript;

/// Terminal state of one requested leaf
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PlacementOutcome {
    /// A path exists and its final node is flagged as the leaf
    Leaf { node: NodeId },
    /// No node with spare capacity could take the leaf
    Unplaced,
}

/// Outcome for one requested leaf, in placement order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placement {
    pub leaf: String,
    pub outcome: PlacementOutcome,
}

/// Tree of strings reachable from a root by edit operations
///
/// Nodes live in an arena indexed by [`NodeId`] in creation order. Display
/// names are unique; several nodes may share a logical value when the
/// branching cap forced a disambiguated copy.
///
/// Not thread-safe and never shared: every build owns its own tree.
#[derive(Debug, Clone, Serialize)]
pub struct EvolutionTree {
    max_edges: usize,
    nodes: Vec<Node>,
    placements: Vec<Placement>,
    /// Display name to node
    #[serde(skip)]
    names: HashMap<String, NodeId>,
    /// Logical value to nodes carrying it, in creation order
    #[serde(skip)]
    by_value: HashMap<String, Vec<NodeId>>,
}

impl EvolutionTree {
    /// Create a tree holding only the root node
    pub fn new(root: impl Into<String>, max_edges: usize) -> Self {
        let root = Node::root(root.into());
        let mut names = HashMap::new();
        let mut by_value = HashMap::new();
        names.insert(root.name.clone(), root.id);
        by_value.insert(root.value.clone(), vec![root.id]);

        Self {
            max_edges,
            nodes: vec![root],
            placements: Vec::new(),
            names,
            by_value,
        }
    }

    pub fn root_id(&self) -> NodeId {
        NodeId(0)
    }

    pub fn root(&self) -> &Node {
        &self.nodes[0]
    }

    /// The root string
    pub fn root_value(&self) -> &str {
        &self.nodes[0].value
    }

    pub fn max_edges(&self) -> usize {
        self.max_edges
    }

    /// Get a node by identity
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` if `id` does not belong to this tree.
    pub fn get(&self, id: NodeId) -> Result<&Node> {
        self.nodes
            .get(id.0)
            .ok_or(EvoTreeError::NodeNotFound { node_id: id.0 })
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes
            .get_mut(id.0)
            .ok_or(EvoTreeError::NodeNotFound { node_id: id.0 })
    }

    /// Look a node up by its display name
    pub fn node_by_name(&self, name: &str) -> Option<&Node> {
        self.names.get(name).map(|id| &self.nodes[id.0])
    }

    /// All nodes carrying `value`, canonical node first
    pub fn nodes_with_value(&self, value: &str) -> Vec<&Node> {
        self.by_value
            .get(value)
            .map(|ids| ids.iter().map(|id| &self.nodes[id.0]).collect())
            .unwrap_or_default()
    }

    /// All nodes in creation order
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Number of nodes (at least one: the root)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn max_depth(&self) -> usize {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
    }

    /// Nodes flagged as leaves, in placement order
    pub fn leaves(&self) -> impl Iterator<Item = &Node> + '_ {
        self.placements.iter().filter_map(|p| match p.outcome {
            PlacementOutcome::Leaf { node } => self.nodes.get(node.0),
            PlacementOutcome::Unplaced => None,
        })
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves().count()
    }

    /// Leaves that could not be placed under the branching cap
    pub fn unplaced(&self) -> Vec<&str> {
        self.placements
            .iter()
            .filter(|p| p.outcome == PlacementOutcome::Unplaced)
            .map(|p| p.leaf.as_str())
            .collect()
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Whether `id` may take another outgoing edge
    pub fn accepts_children(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.0)
            .is_some_and(|n| !n.is_leaf && n.edge_count() < self.max_edges)
    }

    /// Nodes that may take another outgoing edge, in creation order
    pub fn available_nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes
            .iter()
            .filter(|n| !n.is_leaf && n.edge_count() < self.max_edges)
    }

    /// Walk `script` from `from`, creating or reusing nodes, and flag the end as `leaf`
    ///
    /// Returns the leaf node.
    ///
    /// # Errors
    ///
    /// * `AnchorMismatch` / `DerivationMismatch` - the script does not lead
    ///   from `from`'s value to `leaf` (the engine and packer disagree)
    /// * `CapacityExceeded` / `LeafNotExpandable` - a node on the walk cannot
    ///   take the new edge
    pub fn graft(&mut self, from: NodeId, script: &EditScript, leaf: &str) -> Result<NodeId> {
        let mut current = from;

        for step in script {
            let derived = step.apply(&self.get(current)?.value)?;
            current = self.attach(current, derived, step.op.clone(), step.at)?;
        }

        let node = self.get(current)?;
        if node.value != leaf {
            return Err(EvoTreeError::DerivationMismatch {
                node: node.name.clone(),
                expected: leaf.to_string(),
                derived: node.value.clone(),
            });
        }

        self.get_mut(current)?.is_leaf = true;
        self.placements.push(Placement {
            leaf: leaf.to_string(),
            outcome: PlacementOutcome::Leaf { node: current },
        });

        Ok(current)
    }

    /// Record a leaf that found no attachment point
    pub(crate) fn record_unplaced(&mut self, leaf: String) {
        self.placements.push(Placement {
            leaf,
            outcome: PlacementOutcome::Unplaced,
        });
    }

    /// Step from `parent` to the node for `value`
    ///
    /// An existing non-leaf node for `value` with spare capacity is reused
    /// (the walk continues there, no edge is added). Otherwise a new child
    /// of `parent` is created, with a `_<n>` suffix on its display name if
    /// the plain value is already taken.
    fn attach(&mut self, parent: NodeId, value: String, op: Operation, at: usize) -> Result<NodeId> {
        if let Some(existing) = self.reusable(&value) {
            tracing::debug!(node = %self.nodes[existing.0].name, "reusing existing node");
            return Ok(existing);
        }

        let parent_node = self.get(parent)?;
        if parent_node.is_leaf {
            return Err(EvoTreeError::LeafNotExpandable {
                node: parent_node.name.clone(),
            });
        }
        if parent_node.edge_count() >= self.max_edges {
            return Err(EvoTreeError::CapacityExceeded {
                node: parent_node.name.clone(),
                edge_count: parent_node.edge_count(),
                max_edges: self.max_edges,
            });
        }

        let id = NodeId(self.nodes.len());
        let name = self.free_name(&value);
        let node = Node::child(id, name.clone(), value.clone(), parent_node, op.clone());

        tracing::debug!(parent = %parent_node.name, node = %name, op = %op, "created node");

        self.nodes.push(node);
        self.names.insert(name, id);
        self.by_value.entry(value).or_default().push(id);
        self.get_mut(parent)?.children.push(Edge { child: id, op, at });

        Ok(id)
    }

    /// Canonical node for `value` if open, else the newest open variant
    fn reusable(&self, value: &str) -> Option<NodeId> {
        let ids = self.by_value.get(value)?;
        let open = |id: &&NodeId| self.accepts_children(**id);

        ids.first()
            .filter(open)
            .or_else(|| ids.last().filter(open))
            .copied()
    }

    fn free_name(&self, value: &str) -> String {
        if !self.names.contains_key(value) {
            return value.to_string();
        }
        let mut suffix = 1;
        loop {
            let candidate = format!("{}_{}", value, suffix);
            if !self.names.contains_key(&candidate) {
                return candidate;
            }
            suffix += 1;
        }
    }
}
