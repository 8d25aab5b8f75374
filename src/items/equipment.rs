//! Per-slot loadout of equipped magical items.

use serde::{Deserialize, Serialize};

use super::types::{ItemSlot, MagicItem, StatBonuses};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Loadout {
    pub wand: Option<MagicItem>,
    pub hat: Option<MagicItem>,
    pub robe: Option<MagicItem>,
    pub boots: Option<MagicItem>,
    pub amulet: Option<MagicItem>,
}

impl Loadout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: ItemSlot) -> &Option<MagicItem> {
        match slot {
            ItemSlot::Wand => &self.wand,
            ItemSlot::Hat => &self.hat,
            ItemSlot::Robe => &self.robe,
            ItemSlot::Boots => &self.boots,
            ItemSlot::Amulet => &self.amulet,
        }
    }

    /// Places `item` in `slot`, returning whatever was equipped there.
    pub fn set(&mut self, slot: ItemSlot, item: Option<MagicItem>) -> Option<MagicItem> {
        let target = match slot {
            ItemSlot::Wand => &mut self.wand,
            ItemSlot::Hat => &mut self.hat,
            ItemSlot::Robe => &mut self.robe,
            ItemSlot::Boots => &mut self.boots,
            ItemSlot::Amulet => &mut self.amulet,
        };
        std::mem::replace(target, item)
    }

    pub fn iter_equipped(&self) -> impl Iterator<Item = &MagicItem> {
        [&self.wand, &self.hat, &self.robe, &self.boots, &self.amulet]
            .into_iter()
            .filter_map(|item| item.as_ref())
    }

    /// Sum of bonuses across every equipped item.
    pub fn total_bonuses(&self) -> StatBonuses {
        let mut total = StatBonuses::default();
        for item in self.iter_equipped() {
            total.magic_power += item.bonuses.magic_power;
            total.wisdom += item.bonuses.wisdom;
            total.agility += item.bonuses.agility;
        }
        total
    }
}
