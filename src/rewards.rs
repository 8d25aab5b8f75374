//! Reward computation: leveling curve, quest rewards, and
//! zone-completion rewards.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{
    BOSS_FALLBACK_COINS, BOSS_FALLBACK_XP, LEVEL_CURVE_XP_BASE, MINI_TASK_COINS, MINI_TASK_XP,
    SPECIAL_ITEM_CHANCE, SPECIAL_ITEM_GUARANTEE_DIFFICULTY, TIME_BONUS_XP_MAX, TIME_BONUS_XP_MIN,
    ZONE_COINS_PER_DIFFICULTY, ZONE_XP_PER_DIFFICULTY,
};
use crate::content::QuestContent;
use crate::error::{QuestError, Result};
use crate::items::{generate_item, rarity_for_difficulty, roll_random_slot, MagicItem};
use crate::map::NodeKind;
use crate::profile::ChildProfile;
use crate::zones::Zone;

/// Canonical level curve. Every level display and every grant derives
/// from this one function.
pub fn level_for_xp(xp: u64) -> u32 {
    (1.0 + (xp as f64 / LEVEL_CURVE_XP_BASE).sqrt()).floor() as u32
}

/// Exact inverse of the curve: total xp needed to reach `level`.
pub fn xp_for_level(level: u32) -> u64 {
    let steps = level.saturating_sub(1) as u64;
    (LEVEL_CURVE_XP_BASE as u64) * steps * steps
}

/// Outcome of a single quest-completion grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestReward {
    pub xp: u64,
    pub coins: u64,
    pub level_up: bool,
    pub new_level: u32,
}

/// Reward values for a quest type. Lessons and mini-games read their
/// authored reward fields; bosses fall back to flat configuration when
/// no content record exists; mini-tasks are always flat.
pub fn quest_reward_values(kind: NodeKind, content: Option<&QuestContent>) -> Result<(u64, u64)> {
    match kind {
        NodeKind::MiniTask => Ok((MINI_TASK_XP, MINI_TASK_COINS)),
        NodeKind::Lesson | NodeKind::MiniGame => content
            .map(|c| (c.xp_reward, c.coin_reward))
            .ok_or_else(|| {
                QuestError::validation("lesson/mini-game completion requires a content record")
            }),
        NodeKind::Boss => Ok(content
            .map(|c| (c.xp_reward, c.coin_reward))
            .unwrap_or((BOSS_FALLBACK_XP, BOSS_FALLBACK_COINS))),
        NodeKind::Zone | NodeKind::Gate => Err(QuestError::validation(format!(
            "node kind {kind:?} is not a playable quest"
        ))),
    }
}

/// Applies a quest reward to the profile as one combined xp+coins+level
/// update. The caller invokes this exactly once per node-completion
/// event; no dedupe state is held here.
pub fn grant_quest_reward(
    profile: &mut ChildProfile,
    kind: NodeKind,
    content: Option<&QuestContent>,
) -> Result<QuestReward> {
    let (xp, coins) = quest_reward_values(kind, content)?;
    let leveled = profile.add_reward(xp, coins);

    log::info!(
        "child {} earned {xp} xp / {coins} coins for {kind:?}",
        profile.id
    );

    Ok(QuestReward {
        xp,
        coins,
        level_up: leveled.is_some(),
        new_level: profile.level,
    })
}

/// Outcome of completing every node in a zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneCompletionReward {
    pub xp: u64,
    pub coins: u64,
    pub level_up: bool,
    pub new_level: u32,
    pub special_item: Option<MagicItem>,
    pub time_bonus: u64,
}

/// Grants the zone-completion reward: base xp/coins scaled by the
/// zone's authored difficulty, a small random time bonus, and a chance
/// at a special item whose rarity is gated by difficulty. Sufficiently
/// difficult zones always drop an item.
pub fn grant_zone_completion_reward(
    profile: &mut ChildProfile,
    zone: &Zone,
    rng: &mut impl Rng,
) -> ZoneCompletionReward {
    let difficulty = zone.difficulty.max(1);
    let base_xp = ZONE_XP_PER_DIFFICULTY * difficulty as u64;
    let base_coins = ZONE_COINS_PER_DIFFICULTY * difficulty as u64;
    let time_bonus = rng.gen_range(TIME_BONUS_XP_MIN..=TIME_BONUS_XP_MAX);

    let guaranteed = difficulty >= SPECIAL_ITEM_GUARANTEE_DIFFICULTY;
    let special_item = if guaranteed || rng.gen::<f64>() < SPECIAL_ITEM_CHANCE {
        let rarity = rarity_for_difficulty(difficulty, rng);
        let slot = roll_random_slot(rng);
        let item = generate_item(slot, rarity, rng);
        log::info!(
            "child {} found {} ({}) clearing {}",
            profile.id,
            item.name,
            item.rarity.name(),
            zone.name
        );
        profile.inventory.push(item.clone());
        Some(item)
    } else {
        None
    };

    let leveled = profile.add_reward(base_xp + time_bonus, base_coins);

    ZoneCompletionReward {
        xp: base_xp + time_bonus,
        coins: base_coins,
        level_up: leveled.is_some(),
        new_level: profile.level,
        special_item,
        time_bonus,
    }
}
