//! The operation surface over the stores: quest completion, zone
//! completion and chaining, and master-map navigation.
//!
//! Each operation is a read-modify-write over a child's view of one
//! graph. A per-(child, map) lock registry serializes those
//! read-modify-writes so two simultaneous completions cannot leave a
//! zone with zero or two current nodes. Engine calls stay pure; nothing
//! is persisted until the new view and profile are fully computed.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{QuestError, Result};
use crate::map::{self, MapGraph, NodeKind, NodeStatus};
use crate::master_map::{evaluate_gate, open_gate, MasterMap};
use crate::profile::ChildProfile;
use crate::rewards::{self, QuestReward, ZoneCompletionReward};
use crate::store::WorldStore;
use crate::zones::{chaining, ProgressRecord, Zone};

/// Outcome of `complete_quest`: the reward granted and the child's
/// updated view of the zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestCompletion {
    pub reward: QuestReward,
    pub map: MapGraph,
}

/// Outcome of `check_zone_completion`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneCompletionOutcome {
    pub completed: bool,
    pub reward: Option<ZoneCompletionReward>,
    pub next_zone_id: Option<String>,
}

/// Outcome of `check_gate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateOutcome {
    pub unlocked: bool,
    pub message: String,
    pub missing_keys: Vec<String>,
    pub map: MapGraph,
}

/// Outcome of `return_to_master_map`. `linked` is false when the zone
/// has no master-map link; nothing was mutated in that case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnOutcome {
    pub linked: bool,
    pub master_map_id: Option<String>,
    pub granted_key: Option<String>,
}

pub struct ProgressService<S: WorldStore> {
    store: S,
    locks: Mutex<HashMap<(String, String), Arc<Mutex<()>>>>,
}

impl<S: WorldStore> ProgressService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Registers a new child profile.
    pub fn create_child(&self, name: &str) -> Result<ChildProfile> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(QuestError::validation("child name cannot be empty"));
        }
        let profile = ChildProfile::new(trimmed, Utc::now().timestamp());
        self.store.put_child(profile.clone())?;
        info!("created child profile {} ({})", profile.id, profile.name);
        Ok(profile)
    }

    /// Direct per-child node status set (the PATCH surface).
    pub fn set_node_status(
        &self,
        zone_id: &str,
        node_id: &str,
        child_id: &str,
        status_value: &str,
    ) -> Result<MapGraph> {
        let status = NodeStatus::parse(status_value)?;
        let zone = self.require_zone(zone_id)?;
        self.require_child(child_id)?;

        let entry = self.map_lock(child_id, zone_id)?;
        let _guard = lock_entry(&entry)?;

        let view = self.child_view(&zone.config, child_id, zone_id)?;
        let updated = map::set_node_status(&view, node_id, status)?;
        self.persist_view(child_id, zone_id, &updated)?;
        Ok(updated)
    }

    /// Completes a quest node for a child and grants the quest reward
    /// in the same operation.
    pub fn complete_quest(
        &self,
        zone_id: &str,
        node_id: &str,
        child_id: &str,
        quest_type: NodeKind,
        quest_id: Option<&str>,
    ) -> Result<QuestCompletion> {
        let zone = self.require_zone(zone_id)?;
        let mut profile = self.require_child(child_id)?;
        let content = match quest_id {
            Some(id) => Some(
                self.store
                    .content(id)?
                    .ok_or_else(|| QuestError::not_found("content", id))?,
            ),
            None => None,
        };

        let entry = self.map_lock(child_id, zone_id)?;
        let _guard = lock_entry(&entry)?;

        let view = self.child_view(&zone.config, child_id, zone_id)?;
        let updated = map::complete_node(&view, node_id)?;
        let reward = rewards::grant_quest_reward(&mut profile, quest_type, content.as_ref())?;

        // Both mutations computed; commit progress, then profile.
        self.persist_view(child_id, zone_id, &updated)?;
        self.store.put_child(profile)?;

        Ok(QuestCompletion {
            reward,
            map: updated,
        })
    }

    /// Detects full-zone completion, grants the zone reward, and
    /// activates the next eligible zone for the child.
    pub fn check_zone_completion(
        &self,
        zone_id: &str,
        child_id: &str,
    ) -> Result<ZoneCompletionOutcome> {
        let zone = self.require_zone(zone_id)?;
        let mut profile = self.require_child(child_id)?;

        let reward = {
            let entry = self.map_lock(child_id, zone_id)?;
            let _guard = lock_entry(&entry)?;

            let view = self.child_view(&zone.config, child_id, zone_id)?;
            if !chaining::is_zone_completed(&view) {
                return Ok(ZoneCompletionOutcome {
                    completed: false,
                    reward: None,
                    next_zone_id: None,
                });
            }

            let mut rng = rand::thread_rng();
            let reward = rewards::grant_zone_completion_reward(&mut profile, &zone, &mut rng);
            self.store.put_child(profile.clone())?;
            info!(
                "child {} completed zone {} (+{} xp, +{} coins)",
                child_id, zone_id, reward.xp, reward.coins
            );
            reward
        };

        // The guard is released before the next zone's view is touched;
        // that activation takes its own (child, zone) lock.
        let zones = self.store.zones()?;
        let completed_ids = self.completed_zone_ids(&zones, child_id)?;
        let next_zone_id = match chaining::find_next_eligible_zone(
            &zones,
            zone_id,
            profile.level,
            &completed_ids,
        ) {
            Some(next) => {
                self.activate_zone(&next.id, child_id)?;
                Some(next.id.clone())
            }
            None => None,
        };

        Ok(ZoneCompletionOutcome {
            completed: true,
            reward: Some(reward),
            next_zone_id,
        })
    }

    /// Puts a zone's starting node into `current` for a child.
    pub fn activate_zone(&self, zone_id: &str, child_id: &str) -> Result<MapGraph> {
        let zone = self.require_zone(zone_id)?;

        let entry = self.map_lock(child_id, zone_id)?;
        let _guard = lock_entry(&entry)?;

        let view = self.child_view(&zone.config, child_id, zone_id)?;
        let activated = map::activate_starting_node(&view);
        self.persist_view(child_id, zone_id, &activated)?;
        info!("zone {} activated for child {}", zone_id, child_id);
        Ok(activated)
    }

    /// Tests a master-map gate against the child's collected keys and
    /// opens it when they suffice.
    pub fn check_gate(&self, map_id: &str, node_id: &str, child_id: &str) -> Result<GateOutcome> {
        let master_map = self.require_master_map(map_id)?;
        let node = master_map
            .config
            .node(node_id)
            .ok_or_else(|| QuestError::not_found("node", node_id))?;
        if node.kind != NodeKind::Gate {
            return Err(QuestError::invalid_state(format!(
                "node {node_id} is not a gate"
            )));
        }
        let gate = self
            .store
            .gate(map_id, node_id)?
            .ok_or_else(|| QuestError::not_found("gate", node_id))?;
        let profile = self.require_child(child_id)?;

        let entry = self.map_lock(child_id, map_id)?;
        let _guard = lock_entry(&entry)?;

        let view = self.child_view(&master_map.config, child_id, map_id)?;
        let check = evaluate_gate(&gate, &profile);
        if !check.unlocked {
            // No mutation on a failed check.
            return Ok(GateOutcome {
                unlocked: false,
                message: check.message,
                missing_keys: check.missing_keys,
                map: view,
            });
        }

        let updated = open_gate(&view, node_id)?;
        self.persist_view(child_id, map_id, &updated)?;
        info!("gate {} on {} opened for child {}", node_id, map_id, child_id);

        Ok(GateOutcome {
            unlocked: true,
            message: check.message,
            missing_keys: vec![],
            map: updated,
        })
    }

    /// Resolves a master-map zone node to its zone and marks the node
    /// `current` for the child. Gameplay then continues on the zone's
    /// own graph.
    pub fn enter_zone_node(&self, map_id: &str, node_id: &str, child_id: &str) -> Result<String> {
        let master_map = self.require_master_map(map_id)?;
        let node = master_map
            .config
            .node(node_id)
            .ok_or_else(|| QuestError::not_found("node", node_id))?;
        if node.kind != NodeKind::Zone {
            return Err(QuestError::invalid_state(format!(
                "node {node_id} is not a zone node"
            )));
        }
        self.require_child(child_id)?;

        let zones = self.store.zones()?;
        let zone = zones
            .iter()
            .find(|z| {
                z.master_map_id.as_deref() == Some(map_id)
                    && z.master_map_node_id.as_deref() == Some(node_id)
            })
            .ok_or_else(|| {
                QuestError::not_found("zone", format!("linked to {map_id}/{node_id}"))
            })?;

        let entry = self.map_lock(child_id, map_id)?;
        let _guard = lock_entry(&entry)?;

        let view = self.child_view(&master_map.config, child_id, map_id)?;
        let updated = map::set_node_status(&view, node_id, NodeStatus::Current)?;
        self.persist_view(child_id, map_id, &updated)?;

        Ok(zone.id.clone())
    }

    /// Marks a zone's master-map node completed when the child exits
    /// the zone, granting the zone's reward key (at most once). Zones
    /// without a master-map link report `linked: false` and mutate
    /// nothing.
    pub fn return_to_master_map(&self, zone_id: &str, child_id: &str) -> Result<ReturnOutcome> {
        let zone = self.require_zone(zone_id)?;
        let mut profile = self.require_child(child_id)?;

        let Some(map_id) = zone.master_map_id.clone() else {
            return Ok(ReturnOutcome {
                linked: false,
                master_map_id: None,
                granted_key: None,
            });
        };
        let node_id = zone.master_map_node_id.clone().ok_or_else(|| {
            QuestError::validation(format!(
                "zone {zone_id} links master map {map_id} without a node id"
            ))
        })?;
        let master_map = self.require_master_map(&map_id)?;

        let entry = self.map_lock(child_id, &map_id)?;
        let _guard = lock_entry(&entry)?;

        let view = self.child_view(&master_map.config, child_id, &map_id)?;
        let updated = map::set_node_status(&view, &node_id, NodeStatus::Completed)?;
        self.persist_view(child_id, &map_id, &updated)?;

        let granted_key = match &zone.reward_key {
            Some(key) if profile.grant_key(key) => {
                self.store.put_child(profile)?;
                info!("child {} earned key {}", child_id, key);
                Some(key.clone())
            }
            _ => None,
        };

        Ok(ReturnOutcome {
            linked: true,
            master_map_id: Some(map_id),
            granted_key,
        })
    }

    /// The child's materialized view of a zone's map.
    pub fn zone_view(&self, zone_id: &str, child_id: &str) -> Result<MapGraph> {
        let zone = self.require_zone(zone_id)?;
        self.child_view(&zone.config, child_id, zone_id)
    }

    /// The child's materialized view of a master map.
    pub fn master_map_view(&self, map_id: &str, child_id: &str) -> Result<MapGraph> {
        let master_map = self.require_master_map(map_id)?;
        self.child_view(&master_map.config, child_id, map_id)
    }

    fn require_zone(&self, zone_id: &str) -> Result<Zone> {
        self.store
            .zone(zone_id)?
            .ok_or_else(|| QuestError::not_found("zone", zone_id))
    }

    fn require_child(&self, child_id: &str) -> Result<ChildProfile> {
        self.store
            .child(child_id)?
            .ok_or_else(|| QuestError::not_found("child", child_id))
    }

    fn require_master_map(&self, map_id: &str) -> Result<MasterMap> {
        self.store
            .master_map(map_id)?
            .ok_or_else(|| QuestError::not_found("master map", map_id))
    }

    fn child_view(&self, config: &MapGraph, child_id: &str, map_id: &str) -> Result<MapGraph> {
        match self.store.progress(child_id, map_id)? {
            Some(record) => Ok(config.with_overlay(&record.node_statuses)),
            None => Ok(config.clone()),
        }
    }

    fn persist_view(&self, child_id: &str, map_id: &str, view: &MapGraph) -> Result<()> {
        let now = Utc::now().timestamp();
        let mut record = self
            .store
            .progress(child_id, map_id)?
            .unwrap_or_else(|| ProgressRecord::new(child_id, map_id, now));
        record.absorb(view, now);
        self.store.put_progress(record)
    }

    /// Zone ids fully completed for this child, across all zones.
    fn completed_zone_ids(&self, zones: &[Zone], child_id: &str) -> Result<HashSet<String>> {
        let mut completed = HashSet::new();
        for zone in zones {
            let view = self.child_view(&zone.config, child_id, &zone.id)?;
            if view.all_completed() {
                completed.insert(zone.id.clone());
            }
        }
        Ok(completed)
    }

    fn map_lock(&self, child_id: &str, map_id: &str) -> Result<Arc<Mutex<()>>> {
        let mut registry = self
            .locks
            .lock()
            .map_err(|_| QuestError::storage("lock registry poisoned"))?;
        Ok(registry
            .entry((child_id.to_string(), map_id.to_string()))
            .or_default()
            .clone())
    }
}

fn lock_entry(entry: &Arc<Mutex<()>>) -> Result<std::sync::MutexGuard<'_, ()>> {
    entry
        .lock()
        .map_err(|_| QuestError::storage("map lock poisoned"))
}
