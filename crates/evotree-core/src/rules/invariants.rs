use std::collections::{HashMap, HashSet};

use crate::model::NodeId;
use crate::pack::{EvolutionTree, PlacementOutcome};

/// Find nodes with more outgoing edges than the tree's cap
pub fn find_over_capacity(tree: &EvolutionTree) -> Vec<NodeId> {
    tree.nodes()
        .iter()
        .filter(|n| n.edge_count() > tree.max_edges())
        .map(|n| n.id)
        .collect()
}

/// Find nodes whose depth is not their parent's depth plus one
///
/// The root must have depth 0, no parent and no incoming operation.
pub fn find_depth_mismatches(tree: &EvolutionTree) -> Vec<NodeId> {
    let mut mismatches = Vec::new();

    for node in tree.nodes() {
        let consistent = match node.parent {
            None => node.id == tree.root_id() && node.depth == 0 && node.op.is_none(),
            Some(parent) => tree
                .get(parent)
                .map(|p| node.depth == p.depth + 1 && node.op.is_some())
                .unwrap_or(false),
        };
        if !consistent {
            mismatches.push(node.id);
        }
    }

    mismatches
}

/// Find edges whose operation, applied to the parent's value at the edge's
/// anchor, does not give the child's value
///
/// Returns list of (parent, child) tuples
pub fn find_derivation_mismatches(tree: &EvolutionTree) -> Vec<(NodeId, NodeId)> {
    let mut mismatches = Vec::new();

    for parent in tree.nodes() {
        for edge in &parent.children {
            let derived = edge.op.apply_at(&parent.value, edge.at);
            let ok = match (derived, tree.get(edge.child)) {
                (Ok(value), Ok(child)) => {
                    value == child.value
                        && child.parent == Some(parent.id)
                        && child.op.as_ref() == Some(&edge.op)
                }
                _ => false,
            };
            if !ok {
                mismatches.push((parent.id, edge.child));
            }
        }
    }

    mismatches
}

/// Find nodes whose display name is shared with another node
pub fn find_duplicate_names(tree: &EvolutionTree) -> Vec<NodeId> {
    let mut seen: HashSet<&str> = HashSet::new();
    tree.nodes()
        .iter()
        .filter(|n| !seen.insert(n.name.as_str()))
        .map(|n| n.id)
        .collect()
}

/// Find placement records that disagree with the leaf flags
///
/// A placed leaf must point at a flagged node carrying the leaf's string,
/// every flagged node must be claimed by exactly one placement, and no leaf
/// may be recorded twice (placed and unplaced are disjoint).
///
/// Returns the offending leaf strings and node names
pub fn find_placement_inconsistencies(tree: &EvolutionTree) -> Vec<String> {
    let mut problems = Vec::new();
    let mut seen_leaves: HashSet<&str> = HashSet::new();
    let mut claims: HashMap<NodeId, usize> = HashMap::new();

    for placement in tree.placements() {
        if !seen_leaves.insert(placement.leaf.as_str()) {
            problems.push(placement.leaf.clone());
            continue;
        }
        if let PlacementOutcome::Leaf { node } = placement.outcome {
            *claims.entry(node).or_insert(0) += 1;
            let matches = tree
                .get(node)
                .map(|n| n.is_leaf && n.value == placement.leaf)
                .unwrap_or(false);
            if !matches {
                problems.push(placement.leaf.clone());
            }
        }
    }

    for node in tree.nodes() {
        let claimed = claims.get(&node.id).copied().unwrap_or(0);
        if (node.is_leaf && claimed != 1) || (!node.is_leaf && claimed != 0) {
            problems.push(node.name.clone());
        }
    }

    problems
}

/// Find requested leaves that are neither placed nor reported unplaced
pub fn find_unaccounted_leaves<'a>(tree: &EvolutionTree, requested: &'a [String]) -> Vec<&'a str> {
    let recorded: HashSet<&str> = tree.placements().iter().map(|p| p.leaf.as_str()).collect();
    requested
        .iter()
        .map(String::as_str)
        .filter(|leaf| !recorded.contains(leaf))
        .collect()
}
