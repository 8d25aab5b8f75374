//! Zone definitions and per-child progress records.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::map::{MapGraph, NodeStatus};

/// Conditions a child must meet before a zone can become their next
/// adventure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnlockRequirements {
    #[serde(default)]
    pub level: Option<u32>,
    #[serde(default)]
    pub completed_zones: Vec<String>,
    /// Item ids a zone may ask for. Carried for authoring; eligibility
    /// scanning only evaluates level and completed zones.
    #[serde(default)]
    pub items: Vec<String>,
}

/// A single adventure map: a shared graph of quest nodes plus unlock
/// requirements and an optional link into a master map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Authored difficulty (1-10). Drives reward scale and item rarity.
    pub difficulty: u32,
    pub config: MapGraph,
    #[serde(default)]
    pub unlock_requirements: UnlockRequirements,
    #[serde(default)]
    pub master_map_id: Option<String>,
    #[serde(default)]
    pub master_map_node_id: Option<String>,
    /// Key granted when the child returns to the master map after
    /// completing this zone.
    #[serde(default)]
    pub reward_key: Option<String>,
}

/// Per-child status overlay for one zone or master-map graph.
///
/// Created on the child's first status change in that graph, updated on
/// every completion, never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub child_id: String,
    pub map_id: String,
    pub node_statuses: HashMap<String, NodeStatus>,
    pub started_at: i64,
    pub updated_at: i64,
}

impl ProgressRecord {
    pub fn new(child_id: impl Into<String>, map_id: impl Into<String>, now: i64) -> Self {
        Self {
            child_id: child_id.into(),
            map_id: map_id.into(),
            node_statuses: HashMap::new(),
            started_at: now,
            updated_at: now,
        }
    }

    /// Folds an updated child view back into the record.
    pub fn absorb(&mut self, view: &MapGraph, now: i64) {
        self.node_statuses = view.overlay();
        self.updated_at = now;
    }
}
