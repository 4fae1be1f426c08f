pub mod node;
pub mod operation;

pub use node::{Edge, Node, NodeId};
pub use operation::{Operation, OperationKind};
