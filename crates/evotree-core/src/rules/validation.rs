use crate::errors::{EvoTreeError, Result};
use crate::model::NodeId;
use crate::pack::EvolutionTree;

use super::invariants;

/// Validate a finished evolution tree
///
/// Runs every structural check in turn:
///
/// 1. No node has more outgoing edges than the cap
/// 2. Depth is parent depth plus one, root at depth 0
/// 3. Every edge's operation derives the child's value from the parent's
/// 4. Display names are unique
/// 5. Placement records agree with the leaf flags
///
/// # Errors
///
/// Returns `InvariantViolation` for the first violation found. For
/// exhaustive reporting, call the individual invariant functions directly.
pub fn validate_tree(tree: &EvolutionTree) -> Result<()> {
    if let Some(&id) = invariants::find_over_capacity(tree).first() {
        let node = tree.get(id)?;
        return Err(violation(
            tree,
            id,
            format!(
                "{} outgoing edges exceed the cap of {}",
                node.edge_count(),
                tree.max_edges()
            ),
        ));
    }

    if let Some(&id) = invariants::find_depth_mismatches(tree).first() {
        return Err(violation(
            tree,
            id,
            "depth is not parent depth plus one".to_string(),
        ));
    }

    if let Some(&(parent, child)) = invariants::find_derivation_mismatches(tree).first() {
        let parent_name = name_of(tree, parent);
        return Err(violation(
            tree,
            child,
            format!("edge from {} does not derive this value", parent_name),
        ));
    }

    if let Some(&id) = invariants::find_duplicate_names(tree).first() {
        return Err(violation(tree, id, "display name is not unique".to_string()));
    }

    if let Some(subject) = invariants::find_placement_inconsistencies(tree).first() {
        return Err(EvoTreeError::InvariantViolation {
            node: subject.clone(),
            reason: "placement record disagrees with leaf flags".to_string(),
        });
    }

    Ok(())
}

fn name_of(tree: &EvolutionTree, id: NodeId) -> String {
    tree.get(id)
        .map(|n| n.name.clone())
        .unwrap_or_else(|_| id.to_string())
}

fn violation(tree: &EvolutionTree, id: NodeId, reason: String) -> EvoTreeError {
    EvoTreeError::InvariantViolation {
        node: name_of(tree, id),
        reason,
    }
}
