use std::fmt::Write;

use crate::model::{Node, OperationKind};
use crate::pack::EvolutionTree;

/// Render an evolution tree as Graphviz DOT
///
/// Generates a `digraph` with:
/// - One rounded box per node, labelled `name` and `(depth: d, edges: e)`
/// - Leaf nodes outlined green with a heavier pen
/// - Edges coloured by operation kind (add green, del red, sub blue) and
///   labelled with the operation payload
/// - A top-centred graph label carrying the maximum depth
///
/// Nodes and edges are emitted in creation order, so equal trees render to
/// identical text.
pub fn render_dot(tree: &EvolutionTree) -> String {
    let mut output = String::new();

    output.push_str("digraph evolution {\n");
    output.push_str("    node [shape=box, style=rounded];\n");
    let _ = writeln!(
        output,
        "    label=\"Maximum tree depth: {}\";",
        tree.max_depth()
    );
    output.push_str("    labelloc=\"t\";\n");
    output.push_str("    labeljust=\"c\";\n");

    for node in tree.nodes() {
        let _ = writeln!(output, "    {}", node_statement(node));
    }

    for node in tree.nodes() {
        for edge in &node.children {
            let Ok(child) = tree.get(edge.child) else {
                continue;
            };
            let color = edge_color(edge.op.kind());
            let _ = writeln!(
                output,
                "    \"{}\" -> \"{}\" [label=\"{}\", color={}, fontcolor={}];",
                escape(&node.name),
                escape(&child.name),
                escape(&edge.op.label()),
                color,
                color
            );
        }
    }

    output.push_str("}\n");
    output
}

fn node_statement(node: &Node) -> String {
    let label = format!(
        "{}\\n(depth: {}, edges: {})",
        escape(&node.name),
        node.depth,
        node.edge_count()
    );
    if node.is_leaf {
        format!(
            "\"{}\" [label=\"{}\", color=green, penwidth=2];",
            escape(&node.name),
            label
        )
    } else {
        format!("\"{}\" [label=\"{}\"];", escape(&node.name), label)
    }
}

fn edge_color(kind: OperationKind) -> &'static str {
    match kind {
        OperationKind::Insert => "green",
        OperationKind::Delete => "red",
        OperationKind::Substitute => "blue",
    }
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pack::build;

    #[test]
    fn test_render_dot_basic() {
        let tree = build("abc", ["abcd"]).unwrap();
        let output = render_dot(&tree);

        assert!(output.starts_with("digraph evolution {"));
        assert!(output.contains("\"abc\" [label=\"abc\\n(depth: 0, edges: 1)\"];"));
        assert!(output.contains(
            "\"abcd\" [label=\"abcd\\n(depth: 1, edges: 0)\", color=green, penwidth=2];"
        ));
        assert!(output.contains("\"abc\" -> \"abcd\" [label=\"d\", color=green, fontcolor=green];"));
        assert!(output.contains("label=\"Maximum tree depth: 1\";"));
    }

    #[test]
    fn test_render_dot_escapes_quotes() {
        let tree = build("a\"b", Vec::<String>::new()).unwrap();
        let output = render_dot(&tree);

        assert!(output.contains("\"a\\\"b\" [label="));
    }
}
