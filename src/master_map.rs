//! Master maps: world-level graphs whose nodes are zones and key-locked
//! gates.

use serde::{Deserialize, Serialize};

use crate::error::{QuestError, Result};
use crate::map::{MapGraph, NodeStatus};
use crate::profile::ChildProfile;

/// A world map sequencing zones and gates. Shares the graph shape with
/// zones; node kinds are restricted to `Zone` and `Gate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MasterMap {
    pub id: String,
    pub name: String,
    pub description: String,
    pub config: MapGraph,
    /// Marks the single globally active master map.
    #[serde(default)]
    pub current_active: bool,
}

/// A key-locked barrier on a master map, addressed by `(master map,
/// node)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    pub master_map_id: String,
    pub node_id: String,
    pub name: String,
    pub description: String,
    pub required_keys: Vec<String>,
    pub unlock_message: String,
}

/// Result of evaluating a gate against a child's keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateCheck {
    pub unlocked: bool,
    pub message: String,
    pub missing_keys: Vec<String>,
}

/// Pure key comparison: the gate opens when the child's key set covers
/// every required key. Extra keys are irrelevant; keys are never
/// consumed.
pub fn evaluate_gate(gate: &Gate, profile: &ChildProfile) -> GateCheck {
    let missing = profile.missing_keys(&gate.required_keys);
    if missing.is_empty() {
        GateCheck {
            unlocked: true,
            message: gate.unlock_message.clone(),
            missing_keys: vec![],
        }
    } else {
        GateCheck {
            unlocked: false,
            message: format!("The gate stays shut. Missing keys: {}", missing.join(", ")),
            missing_keys: missing,
        }
    }
}

/// Applies a successful gate unlock to a child's view of the master
/// map: the gate node completes and each locked target of its outgoing
/// paths becomes available. Gates never auto-select a destination, so
/// no node is promoted to current.
pub fn open_gate(view: &MapGraph, gate_node_id: &str) -> Result<MapGraph> {
    if view.node(gate_node_id).is_none() {
        return Err(QuestError::not_found("node", gate_node_id));
    }

    let mut updated = view.clone();
    if let Some(node) = updated.node_mut(gate_node_id) {
        node.status = NodeStatus::Completed;
    }

    let targets: Vec<String> = updated
        .successors(gate_node_id)
        .into_iter()
        .map(str::to_string)
        .collect();
    for target_id in targets {
        if let Some(target) = updated.node_mut(&target_id) {
            if target.status == NodeStatus::Locked {
                target.status = NodeStatus::Available;
            }
        }
    }

    Ok(updated)
}
