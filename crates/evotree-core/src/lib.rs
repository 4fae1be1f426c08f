//! evotree core - edit scripts and evolution trees
//!
//! This crate provides:
//! - An edit-script engine that groups character edits into insert, delete
//!   and substitute runs in a canonical order
//! - A packer that grows one tree from a root string to a set of leaf
//!   strings, reusing shared intermediate strings under a branching cap
//! - Traversal, invariant checks and DOT/outline rendering for the result
//! - The error and structured logging facilities shared with the CLI
//!
//! ```
//! use evotree_core::{build, compute_script};
//!
//! assert_eq!(compute_script("abc", "abcd").len(), 1);
//!
//! let tree = build("abc", ["abxcd", "ch"]).unwrap();
//! assert_eq!(tree.len(), 5);
//! ```

pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod pack;
pub mod render;
pub mod rules;
pub mod script;
pub mod traversal;

pub use evotree_core_types as core_types;

// Re-export commonly used types
pub use errors::{EvoTreeError, ExError, ExErrorKind, Result};
pub use model::{Edge, Node, NodeId, Operation, OperationKind};
pub use pack::{build, build_with_options, EvolutionTree, PackOptions, Placement, PlacementOutcome};
pub use script::{compute_script, EditScript, EditStep};
