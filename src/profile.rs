//! Child profile state: level, currency, stats, keys, and inventory.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::items::{Loadout, MagicItem, StatBonuses};
use crate::rewards::level_for_xp;

/// Base stats grown through play and boosted by equipped items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildStats {
    pub magic_power: u32,
    pub wisdom: u32,
    pub agility: u32,
}

impl Default for ChildStats {
    fn default() -> Self {
        Self {
            magic_power: 5,
            wisdom: 5,
            agility: 5,
        }
    }
}

/// A child's persistent profile.
///
/// `level` is derived from `xp` through the canonical curve and
/// recomputed on every grant; it is stored as well so list views do not
/// need the curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildProfile {
    pub id: String,
    pub name: String,
    pub level: u32,
    pub xp: u64,
    pub coins: u64,
    pub stats: ChildStats,
    pub loadout: Loadout,
    pub inventory: Vec<MagicItem>,
    /// Gate keys collected from completed zones. Behaves as a set:
    /// granting an already-held key is a no-op.
    pub keys: Vec<String>,
    pub created_at: i64,
}

impl ChildProfile {
    pub fn new(name: impl Into<String>, created_at: i64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            level: 1,
            xp: 0,
            coins: 0,
            stats: ChildStats::default(),
            loadout: Loadout::new(),
            inventory: Vec::new(),
            keys: Vec::new(),
            created_at,
        }
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
    }

    /// Adds a key if not already held. Returns true when newly granted.
    pub fn grant_key(&mut self, key: &str) -> bool {
        if self.has_key(key) {
            return false;
        }
        self.keys.push(key.to_string());
        true
    }

    /// Required keys the child does not hold yet, in requirement order.
    pub fn missing_keys(&self, required: &[String]) -> Vec<String> {
        required
            .iter()
            .filter(|k| !self.has_key(k))
            .cloned()
            .collect()
    }

    /// Adds xp and coins in one update and re-derives the level.
    /// Returns the new level when it increased.
    pub fn add_reward(&mut self, xp: u64, coins: u64) -> Option<u32> {
        self.xp += xp;
        self.coins += coins;

        let new_level = level_for_xp(self.xp);
        if new_level > self.level {
            self.level = new_level;
            Some(new_level)
        } else {
            None
        }
    }

    /// Base stats plus every equipped item's bonuses.
    pub fn effective_stats(&self) -> ChildStats {
        let bonuses: StatBonuses = self.loadout.total_bonuses();
        ChildStats {
            magic_power: self.stats.magic_power + bonuses.magic_power,
            wisdom: self.stats.wisdom + bonuses.wisdom,
            agility: self.stats.agility + bonuses.agility,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{ItemSlot, Rarity};

    #[test]
    fn test_new_profile_defaults() {
        let profile = ChildProfile::new("Mira", 0);
        assert_eq!(profile.level, 1);
        assert_eq!(profile.xp, 0);
        assert_eq!(profile.coins, 0);
        assert!(profile.keys.is_empty());
        assert!(!profile.id.is_empty());
    }

    #[test]
    fn test_grant_key_dedupes() {
        let mut profile = ChildProfile::new("Mira", 0);

        assert!(profile.grant_key("crystal_key"));
        assert!(!profile.grant_key("crystal_key"));
        assert_eq!(profile.keys.len(), 1);
        assert!(profile.has_key("crystal_key"));
    }

    #[test]
    fn test_missing_keys() {
        let mut profile = ChildProfile::new("Mira", 0);
        profile.grant_key("meadow_key");

        let required = vec!["meadow_key".to_string(), "grove_key".to_string()];
        assert_eq!(profile.missing_keys(&required), vec!["grove_key"]);
    }

    #[test]
    fn test_add_reward_levels_up() {
        let mut profile = ChildProfile::new("Mira", 0);

        // 150 xp -> floor(1 + sqrt(1.5)) = 2
        assert_eq!(profile.add_reward(150, 20), Some(2));
        assert_eq!(profile.level, 2);
        assert_eq!(profile.xp, 150);
        assert_eq!(profile.coins, 20);

        // Small grant, no level change
        assert_eq!(profile.add_reward(10, 0), None);
        assert_eq!(profile.level, 2);
    }

    #[test]
    fn test_effective_stats_include_loadout() {
        let mut profile = ChildProfile::new("Mira", 0);
        profile.loadout.set(
            ItemSlot::Wand,
            Some(MagicItem {
                id: "w1".to_string(),
                slot: ItemSlot::Wand,
                rarity: Rarity::Rare,
                name: "Starlit Wand".to_string(),
                bonuses: StatBonuses {
                    magic_power: 4,
                    wisdom: 1,
                    agility: 0,
                },
            }),
        );

        let stats = profile.effective_stats();
        assert_eq!(stats.magic_power, 9);
        assert_eq!(stats.wisdom, 6);
        assert_eq!(stats.agility, 5);
    }
}
