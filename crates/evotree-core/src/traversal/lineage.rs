use crate::errors::{EvoTreeError, Result};
use crate::model::{NodeId, Operation};
use crate::pack::EvolutionTree;
use crate::script::{EditScript, EditStep};

/// Compute the lineage of a node: the node ids from the root down to it
///
/// Follows parent pointers upward and reverses to get root-to-node order.
///
/// # Arguments
/// * `tree` - Tree to walk
/// * `node` - Node whose lineage is wanted
///
/// # Returns
/// Vector of node ids in root-to-node order
///
/// # Errors
/// * `NodeNotFound` - If `node` (or a parent on the way up) is not in the tree
/// * `InvariantViolation` - If the parent chain is longer than the tree (cycle)
pub fn lineage(tree: &EvolutionTree, node: NodeId) -> Result<Vec<NodeId>> {
    let mut path = Vec::new();
    let mut current = Some(node);

    while let Some(id) = current {
        if path.len() >= tree.len() {
            return Err(EvoTreeError::InvariantViolation {
                node: tree.get(node)?.name.clone(),
                reason: "parent chain does not reach the root".to_string(),
            });
        }
        path.push(id);
        current = tree.get(id)?.parent;
    }

    path.reverse();
    Ok(path)
}

/// The incoming operations along the lineage of `node`, root first
///
/// # Errors
/// Same as [`lineage`].
pub fn operations_to(tree: &EvolutionTree, node: NodeId) -> Result<Vec<Operation>> {
    let mut ops = Vec::new();
    for id in lineage(tree, node)? {
        if let Some(op) = &tree.get(id)?.op {
            ops.push(op.clone());
        }
    }
    Ok(ops)
}

/// The anchored script along the lineage of `node`
///
/// Applying it to the root value reproduces the node's logical value.
///
/// # Errors
/// Same as [`lineage`], plus `InvariantViolation` if a parent does not hold
/// an edge to the next node of the lineage.
pub fn script_to(tree: &EvolutionTree, node: NodeId) -> Result<EditScript> {
    let path = lineage(tree, node)?;
    let mut steps = Vec::with_capacity(path.len().saturating_sub(1));

    for pair in path.windows(2) {
        let (parent, child) = (tree.get(pair[0])?, pair[1]);
        let edge = parent
            .children
            .iter()
            .find(|edge| edge.child == child)
            .ok_or_else(|| EvoTreeError::InvariantViolation {
                node: parent.name.clone(),
                reason: format!("no edge to child {}", child),
            })?;
        steps.push(EditStep::new(edge.op.clone(), edge.at));
    }

    Ok(EditScript::new(steps))
}
