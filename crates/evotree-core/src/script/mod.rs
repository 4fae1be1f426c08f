//! Edit scripts: grouped operations with anchors, and the engine that computes them

pub mod edit_script;
pub mod engine;

pub use edit_script::{EditScript, EditStep};
pub use engine::compute_script;
