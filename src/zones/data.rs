//! Authored starter world: three zones, a master map with a key-locked
//! gate, and the quest content records their nodes reference.
//!
//! Content ids match node ids so a client can look a node's quest up
//! directly. The meadow boss deliberately has no content record and
//! falls back to the flat boss reward.

use serde_json::json;

use crate::content::QuestContent;
use crate::error::Result;
use crate::map::{MapGraph, Node, NodeKind, NodeStatus, PathEdge, Position, UnlockRule};
use crate::master_map::{Gate, MasterMap};
use crate::store::WorldStore;

use super::types::{UnlockRequirements, Zone};

pub struct StarterWorld {
    pub zones: Vec<Zone>,
    pub master_map: MasterMap,
    pub gates: Vec<Gate>,
    pub content: Vec<QuestContent>,
}

fn qnode(id: &str, kind: NodeKind, status: NodeStatus, x: f32, y: f32) -> Node {
    Node {
        id: id.to_string(),
        position: Position { x, y },
        status,
        kind,
        unlock_rule: UnlockRule::Any,
    }
}

fn edge(from: &str, to: &str) -> PathEdge {
    PathEdge {
        from: from.to_string(),
        to: to.to_string(),
    }
}

fn content(id: &str, kind: NodeKind, title: &str, xp: u64, coins: u64) -> QuestContent {
    QuestContent {
        id: id.to_string(),
        kind,
        title: title.to_string(),
        xp_reward: xp,
        coin_reward: coins,
    }
}

/// Builds the starter world. Zone list order doubles as chaining scan
/// order.
pub fn starter_world() -> StarterWorld {
    let meadow = Zone {
        id: "meadow".to_string(),
        name: "Whispering Meadow".to_string(),
        description: "Gentle fields where every adventure begins.".to_string(),
        difficulty: 1,
        config: MapGraph {
            nodes: vec![
                qnode("meadow-lesson", NodeKind::Lesson, NodeStatus::Current, 80.0, 220.0),
                qnode("meadow-game", NodeKind::MiniGame, NodeStatus::Locked, 200.0, 160.0),
                qnode("meadow-task", NodeKind::MiniTask, NodeStatus::Locked, 320.0, 200.0),
                qnode("meadow-boss", NodeKind::Boss, NodeStatus::Locked, 440.0, 140.0),
            ],
            paths: vec![
                edge("meadow-lesson", "meadow-game"),
                edge("meadow-game", "meadow-task"),
                edge("meadow-task", "meadow-boss"),
            ],
            decorations: json!([{ "kind": "flowers", "x": 150, "y": 250 }]),
        },
        unlock_requirements: UnlockRequirements::default(),
        master_map_id: Some("astoria".to_string()),
        master_map_node_id: Some("mm-meadow".to_string()),
        reward_key: Some("meadow_key".to_string()),
    };

    // The grove boss waits for both branches.
    let mut grove_boss = qnode("grove-boss", NodeKind::Boss, NodeStatus::Locked, 460.0, 180.0);
    grove_boss.unlock_rule = UnlockRule::All;

    let grove = Zone {
        id: "grove".to_string(),
        name: "Starlit Grove".to_string(),
        description: "Moonlit trees humming with riddles.".to_string(),
        difficulty: 4,
        config: MapGraph {
            nodes: vec![
                qnode("grove-lesson", NodeKind::Lesson, NodeStatus::Locked, 80.0, 180.0),
                qnode("grove-game", NodeKind::MiniGame, NodeStatus::Locked, 220.0, 100.0),
                qnode("grove-task", NodeKind::MiniTask, NodeStatus::Locked, 220.0, 260.0),
                grove_boss,
            ],
            paths: vec![
                edge("grove-lesson", "grove-game"),
                edge("grove-lesson", "grove-task"),
                edge("grove-game", "grove-boss"),
                edge("grove-task", "grove-boss"),
            ],
            decorations: json!([{ "kind": "fireflies", "x": 300, "y": 140 }]),
        },
        unlock_requirements: UnlockRequirements {
            level: Some(2),
            completed_zones: vec!["meadow".to_string()],
            items: vec![],
        },
        master_map_id: Some("astoria".to_string()),
        master_map_node_id: Some("mm-grove".to_string()),
        reward_key: Some("grove_key".to_string()),
    };

    let citadel = Zone {
        id: "citadel".to_string(),
        name: "Crystal Citadel".to_string(),
        description: "A fortress of light behind the crystal gate.".to_string(),
        difficulty: 8,
        config: MapGraph {
            nodes: vec![
                qnode("citadel-lesson", NodeKind::Lesson, NodeStatus::Locked, 100.0, 200.0),
                qnode("citadel-game", NodeKind::MiniGame, NodeStatus::Locked, 260.0, 140.0),
                qnode("citadel-boss", NodeKind::Boss, NodeStatus::Locked, 420.0, 200.0),
            ],
            paths: vec![
                edge("citadel-lesson", "citadel-game"),
                edge("citadel-game", "citadel-boss"),
            ],
            decorations: json!([]),
        },
        unlock_requirements: UnlockRequirements {
            level: Some(3),
            completed_zones: vec!["grove".to_string()],
            items: vec![],
        },
        master_map_id: Some("astoria".to_string()),
        master_map_node_id: Some("mm-citadel".to_string()),
        reward_key: None,
    };

    let master_map = MasterMap {
        id: "astoria".to_string(),
        name: "Realm of Astoria".to_string(),
        description: "The world map linking every adventure.".to_string(),
        config: MapGraph {
            nodes: vec![
                qnode("mm-meadow", NodeKind::Zone, NodeStatus::Current, 100.0, 300.0),
                qnode("mm-grove", NodeKind::Zone, NodeStatus::Locked, 260.0, 240.0),
                qnode("crystal-gate", NodeKind::Gate, NodeStatus::Locked, 400.0, 200.0),
                qnode("mm-citadel", NodeKind::Zone, NodeStatus::Locked, 540.0, 160.0),
            ],
            paths: vec![
                edge("mm-meadow", "mm-grove"),
                edge("mm-grove", "crystal-gate"),
                edge("crystal-gate", "mm-citadel"),
            ],
            decorations: json!([{ "kind": "mountains", "x": 470, "y": 120 }]),
        },
        current_active: true,
    };

    let gates = vec![Gate {
        master_map_id: "astoria".to_string(),
        node_id: "crystal-gate".to_string(),
        name: "Crystal Gate".to_string(),
        description: "Twin keyholes glitter in the crystal.".to_string(),
        required_keys: vec!["meadow_key".to_string(), "grove_key".to_string()],
        unlock_message: "The crystal gate swings open with a chime!".to_string(),
    }];

    let content_records = vec![
        content("meadow-lesson", NodeKind::Lesson, "Shapes in the Grass", 40, 12),
        content("meadow-game", NodeKind::MiniGame, "Bubble Counter", 60, 20),
        content("grove-lesson", NodeKind::Lesson, "Star Patterns", 50, 15),
        content("grove-game", NodeKind::MiniGame, "Potion Mixer", 60, 20),
        content("grove-boss", NodeKind::Boss, "Thornshade", 150, 40),
        content("citadel-lesson", NodeKind::Lesson, "Rune Reading", 70, 25),
        content("citadel-game", NodeKind::MiniGame, "Crystal Echoes", 80, 30),
        content("citadel-boss", NodeKind::Boss, "The Shadow King", 200, 80),
    ];

    StarterWorld {
        zones: vec![meadow, grove, citadel],
        master_map,
        gates,
        content: content_records,
    }
}

/// Loads the starter world into a store.
pub fn seed_starter_world<S: WorldStore>(store: &S) -> Result<()> {
    let world = starter_world();
    for zone in world.zones {
        store.put_zone(zone)?;
    }
    store.put_master_map(world.master_map)?;
    for gate in world.gates {
        store.put_gate(gate)?;
    }
    for record in world.content {
        store.put_content(record)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starter_world_shape() {
        let world = starter_world();
        assert_eq!(world.zones.len(), 3);
        assert_eq!(world.gates.len(), 1);
        assert!(world.master_map.current_active);

        // Every zone links back into the master map
        for zone in &world.zones {
            assert_eq!(zone.master_map_id.as_deref(), Some("astoria"));
            let node_id = zone.master_map_node_id.as_deref().unwrap();
            assert!(world.master_map.config.node(node_id).is_some());
        }
    }

    #[test]
    fn test_meadow_boss_has_no_content_record() {
        let world = starter_world();
        assert!(!world.content.iter().any(|c| c.id == "meadow-boss"));
        assert!(world.content.iter().any(|c| c.id == "grove-boss"));
    }

    #[test]
    fn test_gate_keys_are_grantable() {
        let world = starter_world();
        let gate = &world.gates[0];
        for key in &gate.required_keys {
            assert!(
                world.zones.iter().any(|z| z.reward_key.as_ref() == Some(key)),
                "no zone grants {key}"
            );
        }
    }

    #[test]
    fn test_seed_starter_world() {
        use crate::store::{MemoryStore, ZoneStore};

        let store = MemoryStore::new();
        seed_starter_world(&store).unwrap();
        let ids: Vec<String> = store.zones().unwrap().into_iter().map(|z| z.id).collect();
        assert_eq!(ids, vec!["meadow", "grove", "citadel"]);
    }
}
