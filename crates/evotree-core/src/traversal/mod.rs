pub mod lineage;

pub use lineage::{lineage, operations_to, script_to};
