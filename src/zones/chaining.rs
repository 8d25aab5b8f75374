//! Zone completion detection and next-zone selection.

use std::collections::HashSet;

use log::debug;

use crate::map::MapGraph;

use super::types::Zone;

/// True when every node in the child's view of the zone is completed.
pub fn is_zone_completed(view: &MapGraph) -> bool {
    view.all_completed()
}

/// Scans `zones` in list order for the next adventure a child may
/// start after finishing `completed_zone_id`.
///
/// A zone is eligible when it is not already fully completed for the
/// child, its level requirement (if any) is within the child's current
/// level, and every prerequisite zone is in `completed_zone_ids`. The
/// just-finished zone satisfies prerequisites that reference it. The
/// first eligible zone wins; there is no ranking.
pub fn find_next_eligible_zone<'a>(
    zones: &'a [Zone],
    completed_zone_id: &str,
    child_level: u32,
    completed_zone_ids: &HashSet<String>,
) -> Option<&'a Zone> {
    for zone in zones {
        if zone.id == completed_zone_id {
            continue;
        }
        if completed_zone_ids.contains(&zone.id) {
            continue;
        }
        if let Some(required_level) = zone.unlock_requirements.level {
            if child_level < required_level {
                debug!(
                    "zone {} needs level {required_level}, child is {child_level}",
                    zone.id
                );
                continue;
            }
        }
        let prerequisites_met = zone
            .unlock_requirements
            .completed_zones
            .iter()
            .all(|id| completed_zone_ids.contains(id));
        if !prerequisites_met {
            continue;
        }
        return Some(zone);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{MapGraph, Node, NodeKind, NodeStatus, Position, UnlockRule};
    use crate::zones::UnlockRequirements;

    fn zone(id: &str, level: Option<u32>, completed_zones: Vec<&str>) -> Zone {
        Zone {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            difficulty: 1,
            config: MapGraph::default(),
            unlock_requirements: UnlockRequirements {
                level,
                completed_zones: completed_zones.into_iter().map(String::from).collect(),
                items: vec![],
            },
            master_map_id: None,
            master_map_node_id: None,
            reward_key: None,
        }
    }

    fn completed(ids: &[&str]) -> HashSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_zone_completed_requires_every_node() {
        let mut view = MapGraph {
            nodes: vec![
                Node {
                    id: "n1".to_string(),
                    position: Position::default(),
                    status: NodeStatus::Completed,
                    kind: NodeKind::Lesson,
                    unlock_rule: UnlockRule::Any,
                },
                Node {
                    id: "n2".to_string(),
                    position: Position::default(),
                    status: NodeStatus::Current,
                    kind: NodeKind::Boss,
                    unlock_rule: UnlockRule::Any,
                },
            ],
            paths: vec![],
            decorations: serde_json::Value::Null,
        };
        assert!(!is_zone_completed(&view));

        view.node_mut("n2").unwrap().status = NodeStatus::Completed;
        assert!(is_zone_completed(&view));
    }

    #[test]
    fn test_first_eligible_zone_in_list_order_wins() {
        let zones = vec![
            zone("a", None, vec![]),
            zone("b", None, vec![]),
            zone("c", None, vec![]),
        ];
        let next = find_next_eligible_zone(&zones, "a", 1, &completed(&["a"])).unwrap();
        assert_eq!(next.id, "b");
    }

    #[test]
    fn test_level_requirement_blocks_selection() {
        let zones = vec![zone("a", None, vec![]), zone("b", Some(5), vec![])];
        assert!(find_next_eligible_zone(&zones, "a", 4, &completed(&["a"])).is_none());
        assert!(find_next_eligible_zone(&zones, "a", 5, &completed(&["a"])).is_some());
    }

    #[test]
    fn test_prerequisite_zone_must_be_fully_completed() {
        // b requires a; a not completed -> b never selected
        let zones = vec![zone("b", None, vec!["a"])];
        assert!(find_next_eligible_zone(&zones, "x", 10, &completed(&[])).is_none());
        assert!(find_next_eligible_zone(&zones, "x", 10, &completed(&["a"])).is_some());
    }

    #[test]
    fn test_just_completed_zone_satisfies_its_own_reference() {
        let zones = vec![zone("a", None, vec![]), zone("b", None, vec!["a"])];
        let next = find_next_eligible_zone(&zones, "a", 1, &completed(&["a"])).unwrap();
        assert_eq!(next.id, "b");
    }

    #[test]
    fn test_already_completed_zones_are_skipped() {
        let zones = vec![
            zone("a", None, vec![]),
            zone("b", None, vec![]),
            zone("c", None, vec![]),
        ];
        let next = find_next_eligible_zone(&zones, "a", 1, &completed(&["a", "b"])).unwrap();
        assert_eq!(next.id, "c");
    }
}
