//! Starter-world playthrough CLI.
//!
//! Seeds the demo world, creates a child profile, and auto-plays it
//! through every zone: quest completions, zone rewards, key grants, the
//! crystal gate, and the final citadel run.
//!
//! Usage:
//!   cargo run --bin playthrough
//!
//! Set RUST_LOG=debug for engine-level detail.

use questmap::build_info::{BUILD_COMMIT, BUILD_DATE};
use questmap::error::Result;
use questmap::map::{NodeStatus, NodeKind};
use questmap::service::ProgressService;
use questmap::store::{ChildProfileStore, MemoryStore};
use questmap::zones::seed_starter_world;

fn main() {
    env_logger::init();

    println!("questmap playthrough (build {BUILD_COMMIT}, {BUILD_DATE})");
    println!();

    if let Err(err) = run() {
        eprintln!("playthrough failed: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let store = MemoryStore::new();
    seed_starter_world(&store)?;

    let service = ProgressService::new(store);
    let child = service.create_child("Mira")?;
    println!("Child: {} ({})", child.name, child.id);
    println!();

    // The crystal gate before any keys
    let gate = service.check_gate("astoria", "crystal-gate", &child.id)?;
    println!("Gate check: {}", gate.message);
    println!();

    let mut zone_id = "meadow".to_string();
    loop {
        println!("=== Zone: {zone_id} ===");
        play_zone(&service, &zone_id, &child.id)?;

        let outcome = service.check_zone_completion(&zone_id, &child.id)?;
        if let Some(reward) = &outcome.reward {
            println!(
                "Zone cleared! +{} xp, +{} coins (time bonus {})",
                reward.xp, reward.coins, reward.time_bonus
            );
            if reward.level_up {
                println!("Level up! Now level {}", reward.new_level);
            }
            if let Some(item) = &reward.special_item {
                println!("Special item: {} ({})", item.name, item.rarity.name());
            }
        }

        let returned = service.return_to_master_map(&zone_id, &child.id)?;
        if let Some(key) = &returned.granted_key {
            println!("Key earned: {key}");
        }
        println!();

        match outcome.next_zone_id {
            Some(next) => zone_id = next,
            None => break,
        }
    }

    // All keys collected; the gate should open now
    let gate = service.check_gate("astoria", "crystal-gate", &child.id)?;
    println!("Gate check: {}", gate.message);
    println!();

    let profile = service.store().child(&child.id)?.expect("child vanished");
    println!("=== Run report ===");
    println!("Level:     {}", profile.level);
    println!("XP:        {}", profile.xp);
    println!("Coins:     {}", profile.coins);
    println!("Keys:      {}", profile.keys.join(", "));
    println!("Inventory: {} item(s)", profile.inventory.len());
    for item in &profile.inventory {
        println!("  - {} [{}]", item.name, item.rarity.name());
    }

    Ok(())
}

/// Completes every node in the zone, always playing the current node
/// first.
fn play_zone<S: questmap::store::WorldStore>(
    service: &ProgressService<S>,
    zone_id: &str,
    child_id: &str,
) -> Result<()> {
    loop {
        let view = service.zone_view(zone_id, child_id)?;
        let next = view
            .nodes
            .iter()
            .find(|n| n.status == NodeStatus::Current)
            .or_else(|| {
                view.nodes
                    .iter()
                    .find(|n| n.status == NodeStatus::Available)
            });

        let Some(node) = next else {
            return Ok(());
        };

        // Content ids in the starter world match node ids; bosses
        // without a record use the flat fallback reward.
        let quest_id = match node.kind {
            NodeKind::MiniTask => None,
            _ => service
                .store()
                .content(&node.id)?
                .map(|content| content.id),
        };

        let outcome = service.complete_quest(
            zone_id,
            &node.id,
            child_id,
            node.kind,
            quest_id.as_deref(),
        )?;
        println!(
            "  {} done: +{} xp, +{} coins{}",
            node.id,
            outcome.reward.xp,
            outcome.reward.coins,
            if outcome.reward.level_up {
                format!(" (level {}!)", outcome.reward.new_level)
            } else {
                String::new()
            }
        );
    }
}
