//! Magical item types collected and equipped by children.

use serde::{Deserialize, Serialize};

/// Slot a magical item occupies on a child's loadout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemSlot {
    Wand,
    Hat,
    Robe,
    Boots,
    Amulet,
}

impl ItemSlot {
    pub fn all() -> [ItemSlot; 5] {
        [
            ItemSlot::Wand,
            ItemSlot::Hat,
            ItemSlot::Robe,
            ItemSlot::Boots,
            ItemSlot::Amulet,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ItemSlot::Wand => "Wand",
            ItemSlot::Hat => "Hat",
            ItemSlot::Robe => "Robe",
            ItemSlot::Boots => "Boots",
            ItemSlot::Amulet => "Amulet",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rarity {
    Common = 0,
    Uncommon = 1,
    Rare = 2,
    Epic = 3,
    Legendary = 4,
}

impl Rarity {
    /// Returns the display name for this rarity tier.
    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
        }
    }
}

/// Stat bonuses an item grants while equipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBonuses {
    pub magic_power: u32,
    pub wisdom: u32,
    pub agility: u32,
}

impl StatBonuses {
    pub fn total(&self) -> u32 {
        self.magic_power + self.wisdom + self.agility
    }
}

/// An equippable magical item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MagicItem {
    pub id: String,
    pub slot: ItemSlot,
    pub rarity: Rarity,
    pub name: String,
    pub bonuses: StatBonuses,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rarity_ordering() {
        assert!(Rarity::Common < Rarity::Uncommon);
        assert!(Rarity::Uncommon < Rarity::Rare);
        assert!(Rarity::Rare < Rarity::Epic);
        assert!(Rarity::Epic < Rarity::Legendary);
    }

    #[test]
    fn test_stat_bonuses_total() {
        let bonuses = StatBonuses {
            magic_power: 5,
            wisdom: 3,
            agility: 2,
        };
        assert_eq!(bonuses.total(), 10);
    }
}
