//! Authored quest content records.
//!
//! Lesson and mini-game text originates outside this crate (a content
//! pipeline authors it); the progression engine only reads the reward
//! fields stored alongside it.

use serde::{Deserialize, Serialize};

use crate::map::NodeKind;

/// A lesson, mini-game, or boss encounter with its authored rewards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestContent {
    pub id: String,
    pub kind: NodeKind,
    pub title: String,
    pub xp_reward: u64,
    pub coin_reward: u64,
}
