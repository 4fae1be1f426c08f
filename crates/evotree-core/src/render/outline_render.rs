use crate::model::NodeId;
use crate::pack::{EvolutionTree, PlacementOutcome};

/// Render an evolution tree as an indented plain-text outline
///
/// One line per node, children indented two spaces under their parent and
/// introduced by the operation that produced them. Leaf nodes are marked with
/// `*`. Unplaced leaves, if any, are listed after the tree.
///
/// ```text
/// abc
///   [sub:c→x] abx
///     [add:cd] abxcd *
///   [del:ab] c
///     [add:h] ch *
/// ```
pub fn render_outline(tree: &EvolutionTree) -> String {
    let mut output = String::new();
    let mut stack: Vec<(NodeId, usize)> = vec![(tree.root_id(), 0)];

    while let Some((id, indent)) = stack.pop() {
        let Ok(node) = tree.get(id) else {
            continue;
        };

        output.push_str(&"  ".repeat(indent));
        if let Some(op) = &node.op {
            output.push_str(&format!("[{}] ", op));
        }
        output.push_str(&node.name);
        if node.is_leaf {
            output.push_str(" *");
        }
        output.push('\n');

        // Reverse so the first edge is printed first
        for edge in node.children.iter().rev() {
            stack.push((edge.child, indent + 1));
        }
    }

    let unplaced: Vec<&str> = tree
        .placements()
        .iter()
        .filter(|p| p.outcome == PlacementOutcome::Unplaced)
        .map(|p| p.leaf.as_str())
        .collect();

    if !unplaced.is_empty() {
        output.push_str("\nunplaced:\n");
        for leaf in unplaced {
            output.push_str(&format!("  {}\n", leaf));
        }
    }

    output
}
