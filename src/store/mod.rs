//! Repository interfaces for the entities the engine operates on.
//!
//! The state-machine logic never assumes in-memory access: it loads
//! copies through these traits, mutates scratch state, and persists the
//! result through an update call. `MemoryStore` is the bundled
//! implementation; a database-backed store only has to implement the
//! same traits.

pub mod memory;

pub use memory::{MemoryStore, WorldData};

use crate::content::QuestContent;
use crate::error::Result;
use crate::master_map::{Gate, MasterMap};
use crate::profile::ChildProfile;
use crate::zones::{ProgressRecord, Zone};

pub trait ChildProfileStore {
    fn child(&self, child_id: &str) -> Result<Option<ChildProfile>>;
    fn put_child(&self, profile: ChildProfile) -> Result<()>;
}

pub trait ZoneStore {
    fn zone(&self, zone_id: &str) -> Result<Option<Zone>>;
    /// All zones in authored list order; chaining scans this order.
    fn zones(&self) -> Result<Vec<Zone>>;
    fn put_zone(&self, zone: Zone) -> Result<()>;
}

pub trait MasterMapStore {
    fn master_map(&self, map_id: &str) -> Result<Option<MasterMap>>;
    fn active_master_map(&self) -> Result<Option<MasterMap>>;
    fn put_master_map(&self, map: MasterMap) -> Result<()>;
}

pub trait GateStore {
    fn gate(&self, master_map_id: &str, node_id: &str) -> Result<Option<Gate>>;
    fn put_gate(&self, gate: Gate) -> Result<()>;
}

pub trait ProgressStore {
    fn progress(&self, child_id: &str, map_id: &str) -> Result<Option<ProgressRecord>>;
    fn put_progress(&self, record: ProgressRecord) -> Result<()>;
}

pub trait ContentStore {
    fn content(&self, content_id: &str) -> Result<Option<QuestContent>>;
    fn put_content(&self, content: QuestContent) -> Result<()>;
}

/// Everything the progress service needs from a backing store.
pub trait WorldStore:
    ChildProfileStore + ZoneStore + MasterMapStore + GateStore + ProgressStore + ContentStore
{
}

impl<T> WorldStore for T where
    T: ChildProfileStore + ZoneStore + MasterMapStore + GateStore + ProgressStore + ContentStore
{
}
