//! In-memory world store used by the service, the demo binary, and
//! tests.

use std::collections::HashMap;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::content::QuestContent;
use crate::error::{QuestError, Result};
use crate::master_map::{Gate, MasterMap};
use crate::profile::ChildProfile;
use crate::zones::{ProgressRecord, Zone};

use super::{
    ChildProfileStore, ContentStore, GateStore, MasterMapStore, ProgressStore, ZoneStore,
};

/// Serializable contents of the world. Zones keep authored list order;
/// everything else is keyed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorldData {
    pub children: HashMap<String, ChildProfile>,
    pub zones: Vec<Zone>,
    pub master_maps: HashMap<String, MasterMap>,
    pub gates: HashMap<(String, String), Gate>,
    pub progress: HashMap<(String, String), ProgressRecord>,
    pub content: HashMap<String, QuestContent>,
}

/// Mutex-guarded `WorldData`. Getters hand out clones so callers mutate
/// scratch state and commit through a put call.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<WorldData>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_data(data: WorldData) -> Self {
        Self {
            inner: Mutex::new(data),
        }
    }

    /// Copies out the full world, e.g. for a snapshot.
    pub fn export(&self) -> Result<WorldData> {
        Ok(self.lock()?.clone())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, WorldData>> {
        self.inner
            .lock()
            .map_err(|_| QuestError::storage("world store lock poisoned"))
    }
}

impl ChildProfileStore for MemoryStore {
    fn child(&self, child_id: &str) -> Result<Option<ChildProfile>> {
        Ok(self.lock()?.children.get(child_id).cloned())
    }

    fn put_child(&self, profile: ChildProfile) -> Result<()> {
        self.lock()?.children.insert(profile.id.clone(), profile);
        Ok(())
    }
}

impl ZoneStore for MemoryStore {
    fn zone(&self, zone_id: &str) -> Result<Option<Zone>> {
        Ok(self.lock()?.zones.iter().find(|z| z.id == zone_id).cloned())
    }

    fn zones(&self) -> Result<Vec<Zone>> {
        Ok(self.lock()?.zones.clone())
    }

    fn put_zone(&self, zone: Zone) -> Result<()> {
        let mut data = self.lock()?;
        if let Some(existing) = data.zones.iter_mut().find(|z| z.id == zone.id) {
            *existing = zone;
        } else {
            data.zones.push(zone);
        }
        Ok(())
    }
}

impl MasterMapStore for MemoryStore {
    fn master_map(&self, map_id: &str) -> Result<Option<MasterMap>> {
        Ok(self.lock()?.master_maps.get(map_id).cloned())
    }

    fn active_master_map(&self) -> Result<Option<MasterMap>> {
        Ok(self
            .lock()?
            .master_maps
            .values()
            .find(|m| m.current_active)
            .cloned())
    }

    fn put_master_map(&self, map: MasterMap) -> Result<()> {
        self.lock()?.master_maps.insert(map.id.clone(), map);
        Ok(())
    }
}

impl GateStore for MemoryStore {
    fn gate(&self, master_map_id: &str, node_id: &str) -> Result<Option<Gate>> {
        Ok(self
            .lock()?
            .gates
            .get(&(master_map_id.to_string(), node_id.to_string()))
            .cloned())
    }

    fn put_gate(&self, gate: Gate) -> Result<()> {
        self.lock()?
            .gates
            .insert((gate.master_map_id.clone(), gate.node_id.clone()), gate);
        Ok(())
    }
}

impl ProgressStore for MemoryStore {
    fn progress(&self, child_id: &str, map_id: &str) -> Result<Option<ProgressRecord>> {
        Ok(self
            .lock()?
            .progress
            .get(&(child_id.to_string(), map_id.to_string()))
            .cloned())
    }

    fn put_progress(&self, record: ProgressRecord) -> Result<()> {
        self.lock()?
            .progress
            .insert((record.child_id.clone(), record.map_id.clone()), record);
        Ok(())
    }
}

impl ContentStore for MemoryStore {
    fn content(&self, content_id: &str) -> Result<Option<QuestContent>> {
        Ok(self.lock()?.content.get(content_id).cloned())
    }

    fn put_content(&self, content: QuestContent) -> Result<()> {
        self.lock()?.content.insert(content.id.clone(), content);
        Ok(())
    }
}
