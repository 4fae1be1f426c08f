//! DOT, outline and JSON rendering

use evotree_core::pack::{build, build_with_options, PackOptions};
use evotree_core::render::{render_dot, render_outline};

#[test]
fn test_render_dot_colours_each_operation_kind() {
    // abc -sub-> abx -add-> abxcd ; abc -del-> c -add-> ch
    let tree = build("abc", ["abxcd", "ch"]).unwrap();
    let dot = render_dot(&tree);

    assert!(dot.contains("\"abc\" -> \"abx\" [label=\"c→x\", color=blue, fontcolor=blue];"));
    assert!(dot.contains("\"abx\" -> \"abxcd\" [label=\"cd\", color=green, fontcolor=green];"));
    assert!(dot.contains("\"abc\" -> \"c\" [label=\"ab\", color=red, fontcolor=red];"));
    assert!(dot.contains("label=\"Maximum tree depth: 2\";"));
    assert_eq!(dot.matches("penwidth=2").count(), 2);
    assert!(dot.ends_with("}\n"));
}

#[test]
fn test_render_dot_is_stable() {
    let first = render_dot(&build("XYZ", ["XYZA", "XYA", "YZ"]).unwrap());
    let second = render_dot(&build("XYZ", ["XYZA", "XYA", "YZ"]).unwrap());

    assert_eq!(first, second);
}

#[test]
fn test_render_outline_lists_unplaced() {
    let tree = build_with_options("a", ["ab", "ac"], &PackOptions::with_max_edges(1)).unwrap();
    let outline = render_outline(&tree);

    assert_eq!(outline, "a\n  [add:b] ab *\n\nunplaced:\n  ac\n");
}

#[test]
fn test_tree_serializes_to_json() {
    let tree = build("abc", ["abcd"]).unwrap();
    let value = serde_json::to_value(&tree).unwrap();

    assert_eq!(value["max_edges"], 3);
    assert_eq!(value["nodes"][1]["name"], "abcd");
    assert_eq!(value["nodes"][1]["op"]["kind"], "insert");
    assert_eq!(value["nodes"][0]["children"][0]["at"], 3);
    assert_eq!(value["placements"][0]["outcome"]["state"], "leaf");
    assert_eq!(value["placements"][0]["outcome"]["node"], 1);
}
