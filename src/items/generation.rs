//! Random generation of magical items for zone-completion rewards.
//!
//! All rolls take `&mut impl Rng` so reward tests can drive them with a
//! seeded generator.

use rand::Rng;
use uuid::Uuid;

use super::types::{ItemSlot, MagicItem, Rarity, StatBonuses};

pub fn roll_random_slot(rng: &mut impl Rng) -> ItemSlot {
    let slots = ItemSlot::all();
    slots[rng.gen_range(0..slots.len())]
}

/// Rolls an item rarity gated by zone difficulty: harder zones shift
/// the distribution toward the top tiers.
pub fn rarity_for_difficulty(difficulty: u32, rng: &mut impl Rng) -> Rarity {
    let roll = rng.gen::<f64>();

    match difficulty {
        0..=2 => {
            // 60% Common, 30% Uncommon, 10% Rare
            if roll < 0.60 {
                Rarity::Common
            } else if roll < 0.90 {
                Rarity::Uncommon
            } else {
                Rarity::Rare
            }
        }
        3..=5 => {
            // 30% Common, 40% Uncommon, 25% Rare, 5% Epic
            if roll < 0.30 {
                Rarity::Common
            } else if roll < 0.70 {
                Rarity::Uncommon
            } else if roll < 0.95 {
                Rarity::Rare
            } else {
                Rarity::Epic
            }
        }
        6..=7 => {
            // 15% Common, 30% Uncommon, 40% Rare, 13% Epic, 2% Legendary
            if roll < 0.15 {
                Rarity::Common
            } else if roll < 0.45 {
                Rarity::Uncommon
            } else if roll < 0.85 {
                Rarity::Rare
            } else if roll < 0.98 {
                Rarity::Epic
            } else {
                Rarity::Legendary
            }
        }
        _ => {
            // 10% Common, 20% Uncommon, 35% Rare, 25% Epic, 10% Legendary
            if roll < 0.10 {
                Rarity::Common
            } else if roll < 0.30 {
                Rarity::Uncommon
            } else if roll < 0.65 {
                Rarity::Rare
            } else if roll < 0.90 {
                Rarity::Epic
            } else {
                Rarity::Legendary
            }
        }
    }
}

pub fn generate_item(slot: ItemSlot, rarity: Rarity, rng: &mut impl Rng) -> MagicItem {
    let bonuses = generate_bonuses(rarity, rng);
    MagicItem {
        id: Uuid::new_v4().to_string(),
        slot,
        rarity,
        name: generate_display_name(slot, rarity, rng),
        bonuses,
    }
}

fn generate_bonuses(rarity: Rarity, rng: &mut impl Rng) -> StatBonuses {
    let (min, max) = match rarity {
        Rarity::Common => (1, 2),
        Rarity::Uncommon => (2, 4),
        Rarity::Rare => (3, 6),
        Rarity::Epic => (5, 10),
        Rarity::Legendary => (8, 15),
    };

    // Boost 1-3 stats
    let num_stats = rng.gen_range(1..=3);
    let mut bonuses = StatBonuses::default();

    for _ in 0..num_stats {
        let value = rng.gen_range(min..=max);
        match rng.gen_range(0..3) {
            0 => bonuses.magic_power += value,
            1 => bonuses.wisdom += value,
            _ => bonuses.agility += value,
        }
    }

    bonuses
}

fn generate_display_name(slot: ItemSlot, rarity: Rarity, rng: &mut impl Rng) -> String {
    let prefixes: &[&str] = match rarity {
        Rarity::Common => &["Plain", "Simple", "Sturdy"],
        Rarity::Uncommon => &["Glowing", "Charmed", "Shiny"],
        Rarity::Rare => &["Enchanted", "Starlit", "Whispering"],
        Rarity::Epic => &["Dragonheart", "Moonforged", "Stormcaller"],
        Rarity::Legendary => &["Ancient", "Celestial", "Everbright"],
    };
    let base: &[&str] = match slot {
        ItemSlot::Wand => &["Wand", "Scepter"],
        ItemSlot::Hat => &["Hat", "Cap"],
        ItemSlot::Robe => &["Robe", "Cloak"],
        ItemSlot::Boots => &["Boots", "Slippers"],
        ItemSlot::Amulet => &["Amulet", "Charm"],
    };

    let prefix = prefixes[rng.gen_range(0..prefixes.len())];
    let noun = base[rng.gen_range(0..base.len())];
    format!("{prefix} {noun}")
}
