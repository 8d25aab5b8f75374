//! Adventure map graph data structures.
//!
//! A zone's map (and the master map) is a directed graph of quest
//! nodes. The graph definition is shared across all children; each
//! child sees it through a per-child status overlay kept on their
//! progress record.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::QuestError;

/// Per-child status of a quest node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    /// Not yet reachable
    Locked,
    /// Unlocked, can be played
    Available,
    /// The node presented as "next to play"
    Current,
    /// Finished
    Completed,
}

impl NodeStatus {
    /// Parses a wire-format status string (used by the direct
    /// status-set operation).
    pub fn parse(value: &str) -> Result<Self, QuestError> {
        match value {
            "locked" => Ok(NodeStatus::Locked),
            "available" => Ok(NodeStatus::Available),
            "current" => Ok(NodeStatus::Current),
            "completed" => Ok(NodeStatus::Completed),
            other => Err(QuestError::validation(format!(
                "unknown node status: {other}"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeStatus::Locked => "locked",
            NodeStatus::Available => "available",
            NodeStatus::Current => "current",
            NodeStatus::Completed => "completed",
        }
    }
}

/// What kind of quest a node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    MiniTask,
    MiniGame,
    Lesson,
    Boss,
    /// Master-map node standing for a whole zone
    Zone,
    /// Master-map node requiring keys to pass
    Gate,
}

/// How a node's predecessors gate its unlock.
///
/// Authored configs that omit the field get `Any`: the node unlocks as
/// soon as one predecessor completes. `All` requires every predecessor
/// completed before the node leaves `Locked`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnlockRule {
    #[default]
    Any,
    All,
}

/// Canvas coordinates. Presentational only; never read by the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

/// A single quest node within a map graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    #[serde(default)]
    pub position: Position,
    pub status: NodeStatus,
    pub kind: NodeKind,
    #[serde(default)]
    pub unlock_rule: UnlockRule,
}

/// Directed edge: `to` cannot unlock until its predecessors complete
/// (per its `UnlockRule`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathEdge {
    pub from: String,
    pub to: String,
}

/// A zone or master-map graph: nodes, prerequisite edges, and an
/// opaque decoration payload carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapGraph {
    pub nodes: Vec<Node>,
    pub paths: Vec<PathEdge>,
    #[serde(default)]
    pub decorations: serde_json::Value,
}

impl MapGraph {
    pub fn node(&self, node_id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == node_id)
    }

    pub fn node_mut(&mut self, node_id: &str) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == node_id)
    }

    pub fn status_of(&self, node_id: &str) -> Option<NodeStatus> {
        self.node(node_id).map(|n| n.status)
    }

    /// Ids of nodes reachable over one outgoing edge, in path order.
    pub fn successors(&self, node_id: &str) -> Vec<&str> {
        self.paths
            .iter()
            .filter(|p| p.from == node_id)
            .map(|p| p.to.as_str())
            .collect()
    }

    /// Ids of nodes with an edge into `node_id`, in path order.
    pub fn predecessors(&self, node_id: &str) -> Vec<&str> {
        self.paths
            .iter()
            .filter(|p| p.to == node_id)
            .map(|p| p.from.as_str())
            .collect()
    }

    pub fn has_node_with_status(&self, status: NodeStatus) -> bool {
        self.nodes.iter().any(|n| n.status == status)
    }

    /// True when every node is completed. An empty graph never counts
    /// as completed.
    pub fn all_completed(&self) -> bool {
        !self.nodes.is_empty() && self.nodes.iter().all(|n| n.status == NodeStatus::Completed)
    }

    /// The zone's entry point: the first node with no incoming path,
    /// or the first node in the array when the graph is a cycle.
    pub fn starting_node_id(&self) -> Option<&str> {
        self.nodes
            .iter()
            .find(|n| !self.paths.iter().any(|p| p.to == n.id))
            .or_else(|| self.nodes.first())
            .map(|n| n.id.as_str())
    }

    /// Extracts the per-child status overlay from this graph.
    pub fn overlay(&self) -> HashMap<String, NodeStatus> {
        self.nodes
            .iter()
            .map(|n| (n.id.clone(), n.status))
            .collect()
    }

    /// Materializes a child's view: the shared graph with the child's
    /// recorded statuses applied. Nodes the overlay does not mention
    /// keep their authored status.
    pub fn with_overlay(&self, overlay: &HashMap<String, NodeStatus>) -> MapGraph {
        let mut view = self.clone();
        for node in &mut view.nodes {
            if let Some(status) = overlay.get(&node.id) {
                node.status = *status;
            }
        }
        view
    }
}
