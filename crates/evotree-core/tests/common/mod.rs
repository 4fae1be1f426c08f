use evotree_core::rules::{invariants, validation};
use evotree_core::traversal::{lineage, script_to};
use evotree_core::EvolutionTree;

/// Display names of every node, in creation order
#[allow(dead_code)]
pub fn names(tree: &EvolutionTree) -> Vec<&str> {
    tree.nodes().iter().map(|n| n.name.as_str()).collect()
}

/// Display names along the lineage of the node called `name`
#[allow(dead_code)]
pub fn lineage_names(tree: &EvolutionTree, name: &str) -> Vec<String> {
    let node = tree.node_by_name(name).unwrap();
    lineage(tree, node.id)
        .unwrap()
        .into_iter()
        .map(|id| tree.get(id).unwrap().name.clone())
        .collect()
}

/// Assert every structural invariant and that each placed leaf replays from the root
#[allow(dead_code)]
pub fn assert_well_formed(tree: &EvolutionTree, requested: &[String]) {
    validation::validate_tree(tree).unwrap();
    assert!(invariants::find_unaccounted_leaves(tree, requested).is_empty());

    for leaf in tree.leaves() {
        let script = script_to(tree, leaf.id).unwrap();
        assert_eq!(script.apply(tree.root_value()).unwrap(), leaf.value);
        assert_eq!(script.len(), leaf.depth);
    }
}

/// Owned leaf list from literals
#[allow(dead_code)]
pub fn leaves(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
