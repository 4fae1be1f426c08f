//! Tree packing: placing many target strings into one capped tree

pub mod options;
pub mod packer;
pub mod tree;

pub use options::{PackOptions, DEFAULT_MAX_EDGES};
pub use packer::{best_candidate, build, build_with_options, score_candidates, Candidate};
pub use tree::{EvolutionTree, Placement, PlacementOutcome};
