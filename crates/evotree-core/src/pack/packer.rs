//! Tree packer
//!
//! Places every requested leaf into one shared tree under a branching cap.
//! The longest root-relative script is attached first; each remaining leaf
//! is grafted at the node that minimizes `(node depth + script length,
//! node edge count)`, searched over every node that can still take a child.
//!
//! Each leaf moves through `Pending -> Scheduled -> Attached` and ends as a
//! flagged leaf node or as an unplaced entry in [`EvolutionTree::placements`].

use std::collections::HashSet;
use std::time::Instant;

use crate::errors::Result;
use crate::model::NodeId;
use crate::rules::validation;
use crate::script::{compute_script, EditScript};
use crate::{log_op_end, log_op_error, log_op_start};

use super::options::PackOptions;
use super::tree::EvolutionTree;

/// A possible attachment point for one leaf
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub node: NodeId,
    /// Script from the node's value to the leaf
    pub script: EditScript,
    /// `(resulting depth, existing edge count)`; lower is better
    pub score: (usize, usize),
}

/// Build a tree from `root` reaching every leaf, with the default cap of 3
///
/// # Errors
///
/// Fails only on an internal defect (the engine and the packer disagree on
/// a derived string, or the finished tree breaks a structural invariant).
/// Leaves that cannot be placed are reported through
/// [`EvolutionTree::unplaced`], not as errors.
///
/// # Example
///
/// ```
/// use evotree_core::pack::build;
///
/// let tree = build("abc", ["abxcd", "ch"]).unwrap();
/// assert_eq!(tree.leaf_count(), 2);
/// assert!(tree.unplaced().is_empty());
/// ```
pub fn build<I, S>(root: &str, leaves: I) -> Result<EvolutionTree>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    build_with_options(root, leaves, &PackOptions::default())
}

/// Build a tree with explicit packing options
///
/// # Errors
///
/// Returns `InvalidOptions` for a zero cap, and the internal-defect errors
/// described on [`build`].
pub fn build_with_options<I, S>(root: &str, leaves: I, options: &PackOptions) -> Result<EvolutionTree>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let leaves = dedup(leaves);
    log_op_start!("pack_build", root = root, leaf_count = leaves.len());
    let start = Instant::now();

    let tree = build_impl(root, leaves, options).map_err(|e| {
        log_op_error!(
            "pack_build",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "pack_build",
        duration_ms = start.elapsed().as_millis() as u64,
        tree = &tree
    );

    Ok(tree)
}

fn build_impl(root: &str, leaves: Vec<String>, options: &PackOptions) -> Result<EvolutionTree> {
    options.validate()?;

    let mut tree = EvolutionTree::new(root, options.max_edges);
    let mut queue = schedule(root, leaves).into_iter();

    if let Some((leaf, script)) = queue.next() {
        tracing::debug!(leaf = %leaf, script_len = script.len(), "attaching longest path at root");
        tree.graft(tree.root_id(), &script, &leaf)?;
    }

    for (leaf, _) in queue {
        match best_candidate(&tree, &leaf) {
            Some(candidate) => {
                let anchor = tree.get(candidate.node)?;
                tracing::debug!(
                    leaf = %leaf,
                    node = %anchor.name,
                    depth = candidate.score.0,
                    edges = candidate.score.1,
                    "grafting leaf"
                );
                tree.graft(candidate.node, &candidate.script, &leaf)?;
            }
            None => {
                tracing::warn!(leaf = %leaf, "no node with spare capacity; leaf unplaced");
                tree.record_unplaced(leaf);
            }
        }
    }

    validation::validate_tree(&tree)?;
    Ok(tree)
}

/// Keep the first occurrence of every leaf
fn dedup<I, S>(leaves: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen = HashSet::new();
    leaves
        .into_iter()
        .map(Into::into)
        .filter(|leaf| seen.insert(leaf.clone()))
        .collect()
}

/// Pair each leaf with its root-relative script, longest first
///
/// The sort is stable, so equal lengths keep input order.
pub fn schedule(root: &str, leaves: Vec<String>) -> Vec<(String, EditScript)> {
    let mut scheduled: Vec<(String, EditScript)> = leaves
        .into_iter()
        .map(|leaf| {
            let script = compute_script(root, &leaf);
            (leaf, script)
        })
        .collect();
    scheduled.sort_by(|a, b| b.1.len().cmp(&a.1.len()));
    scheduled
}

/// Score every node that can take a child, in creation order
pub fn score_candidates(tree: &EvolutionTree, leaf: &str) -> Vec<Candidate> {
    tree.available_nodes()
        .map(|node| {
            let script = compute_script(&node.value, leaf);
            Candidate {
                node: node.id,
                score: (node.depth + script.len(), node.edge_count()),
                script,
            }
        })
        .collect()
}

/// Lowest-scoring candidate; the earliest-created node wins ties
pub fn best_candidate(tree: &EvolutionTree, leaf: &str) -> Option<Candidate> {
    score_candidates(tree, leaf)
        .into_iter()
        .min_by_key(|candidate| candidate.score)
}
