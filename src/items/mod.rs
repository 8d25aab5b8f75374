//! Item system: types, loadout, and reward generation.

pub mod equipment;
pub mod generation;
pub mod types;

pub use equipment::Loadout;
pub use generation::{generate_item, rarity_for_difficulty, roll_random_slot};
pub use types::{ItemSlot, MagicItem, Rarity, StatBonuses};
