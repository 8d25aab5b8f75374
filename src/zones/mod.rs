//! Zone model, completion/chaining logic, and the authored starter
//! world.

pub mod chaining;
pub mod data;
pub mod types;

pub use chaining::{find_next_eligible_zone, is_zone_completed};
pub use data::{seed_starter_world, starter_world};
pub use types::{ProgressRecord, UnlockRequirements, Zone};
