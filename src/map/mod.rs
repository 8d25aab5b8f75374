//! Map graph model and the node status engine.

pub mod engine;
pub mod graph;

pub use engine::{activate_starting_node, complete_node, set_node_status};
pub use graph::{MapGraph, Node, NodeKind, NodeStatus, PathEdge, Position, UnlockRule};
