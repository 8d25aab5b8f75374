//! Integration test: master-map gates, zone entry, and key grants.

use questmap::map::NodeStatus;
use questmap::service::ProgressService;
use questmap::store::{ChildProfileStore, MemoryStore, ZoneStore};
use questmap::zones::seed_starter_world;

fn starter_service() -> (ProgressService<MemoryStore>, String) {
    let store = MemoryStore::new();
    seed_starter_world(&store).unwrap();
    let service = ProgressService::new(store);
    let child = service.create_child("Mira").unwrap();
    (service, child.id)
}

fn grant_keys(service: &ProgressService<MemoryStore>, child_id: &str, keys: &[&str]) {
    let mut profile = service.store().child(child_id).unwrap().unwrap();
    for key in keys {
        profile.grant_key(key);
    }
    service.store().put_child(profile).unwrap();
}

#[test]
fn test_gate_check_on_non_gate_node_is_invalid() {
    let (service, child_id) = starter_service();
    let err = service
        .check_gate("astoria", "mm-meadow", &child_id)
        .unwrap_err();
    assert_eq!(err.status_code(), 409);
}

#[test]
fn test_gate_without_keys_reports_missing() {
    let (service, child_id) = starter_service();

    let outcome = service
        .check_gate("astoria", "crystal-gate", &child_id)
        .unwrap();
    assert!(!outcome.unlocked);
    assert!(outcome.message.contains("meadow_key"));
    assert!(outcome.message.contains("grove_key"));
    assert_eq!(outcome.missing_keys.len(), 2);
}

#[test]
fn test_failed_gate_check_is_idempotent() {
    let (service, child_id) = starter_service();

    let first = service
        .check_gate("astoria", "crystal-gate", &child_id)
        .unwrap();
    let second = service
        .check_gate("astoria", "crystal-gate", &child_id)
        .unwrap();

    assert_eq!(first, second);
    // Gate node untouched in the child's view
    let view = service.master_map_view("astoria", &child_id).unwrap();
    assert_eq!(view.status_of("crystal-gate"), Some(NodeStatus::Locked));
}

#[test]
fn test_partial_keys_still_blocked() {
    let (service, child_id) = starter_service();
    grant_keys(&service, &child_id, &["meadow_key"]);

    let outcome = service
        .check_gate("astoria", "crystal-gate", &child_id)
        .unwrap();
    assert!(!outcome.unlocked);
    assert_eq!(outcome.missing_keys, vec!["grove_key"]);
}

#[test]
fn test_gate_opens_with_all_keys() {
    let (service, child_id) = starter_service();
    grant_keys(&service, &child_id, &["meadow_key", "grove_key", "spare_key"]);

    let outcome = service
        .check_gate("astoria", "crystal-gate", &child_id)
        .unwrap();
    assert!(outcome.unlocked);
    assert_eq!(outcome.message, "The crystal gate swings open with a chime!");

    // Gate node completed; the zone behind it becomes available, not
    // current
    let view = service.master_map_view("astoria", &child_id).unwrap();
    assert_eq!(view.status_of("crystal-gate"), Some(NodeStatus::Completed));
    assert_eq!(view.status_of("mm-citadel"), Some(NodeStatus::Available));
}

#[test]
fn test_enter_zone_node_resolves_linked_zone() {
    let (service, child_id) = starter_service();

    let zone_id = service
        .enter_zone_node("astoria", "mm-grove", &child_id)
        .unwrap();
    assert_eq!(zone_id, "grove");

    let view = service.master_map_view("astoria", &child_id).unwrap();
    assert_eq!(view.status_of("mm-grove"), Some(NodeStatus::Current));
}

#[test]
fn test_enter_zone_node_on_gate_is_invalid() {
    let (service, child_id) = starter_service();
    let err = service
        .enter_zone_node("astoria", "crystal-gate", &child_id)
        .unwrap_err();
    assert_eq!(err.status_code(), 409);
}

#[test]
fn test_return_to_master_map_grants_key_once() {
    let (service, child_id) = starter_service();

    let first = service.return_to_master_map("meadow", &child_id).unwrap();
    assert!(first.linked);
    assert_eq!(first.granted_key.as_deref(), Some("meadow_key"));

    let view = service.master_map_view("astoria", &child_id).unwrap();
    assert_eq!(view.status_of("mm-meadow"), Some(NodeStatus::Completed));

    // Re-entering and returning again must not duplicate the key
    let second = service.return_to_master_map("meadow", &child_id).unwrap();
    assert!(second.linked);
    assert_eq!(second.granted_key, None);

    let profile = service.store().child(&child_id).unwrap().unwrap();
    assert_eq!(
        profile.keys.iter().filter(|k| *k == "meadow_key").count(),
        1
    );
}

#[test]
fn test_return_from_unlinked_zone_is_a_noop() {
    let (service, child_id) = starter_service();

    // Strip the master-map link off a zone copy
    let mut zone = service.store().zone("meadow").unwrap().unwrap();
    zone.id = "standalone".to_string();
    zone.master_map_id = None;
    zone.master_map_node_id = None;
    service.store().put_zone(zone).unwrap();

    let outcome = service
        .return_to_master_map("standalone", &child_id)
        .unwrap();
    assert!(!outcome.linked);
    assert_eq!(outcome.granted_key, None);

    let profile = service.store().child(&child_id).unwrap().unwrap();
    assert!(profile.keys.is_empty());
}

#[test]
fn test_unknown_map_gate_and_child_are_not_found() {
    let (service, child_id) = starter_service();

    assert_eq!(
        service
            .check_gate("atlantis", "crystal-gate", &child_id)
            .unwrap_err()
            .status_code(),
        404
    );
    assert_eq!(
        service
            .check_gate("astoria", "ruby-gate", &child_id)
            .unwrap_err()
            .status_code(),
        404
    );
    assert_eq!(
        service
            .check_gate("astoria", "crystal-gate", "nobody")
            .unwrap_err()
            .status_code(),
        404
    );
}
