// Leveling curve constants
pub const LEVEL_CURVE_XP_BASE: f64 = 100.0;

// Quest reward constants
pub const MINI_TASK_XP: u64 = 15;
pub const MINI_TASK_COINS: u64 = 5;
pub const BOSS_FALLBACK_XP: u64 = 100;
pub const BOSS_FALLBACK_COINS: u64 = 50;

// Zone completion reward constants
pub const ZONE_XP_PER_DIFFICULTY: u64 = 50;
pub const ZONE_COINS_PER_DIFFICULTY: u64 = 20;
pub const TIME_BONUS_XP_MIN: u64 = 5;
pub const TIME_BONUS_XP_MAX: u64 = 25;
pub const SPECIAL_ITEM_CHANCE: f64 = 0.30;
pub const SPECIAL_ITEM_GUARANTEE_DIFFICULTY: u32 = 7;

// Snapshot constants
pub const SNAPSHOT_VERSION_MAGIC: u64 = 0x5153544D41503030; // "QSTMAP00"
