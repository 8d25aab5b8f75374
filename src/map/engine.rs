//! Node status transitions for a child's view of a map graph.
//!
//! All functions here are pure: they take a materialized child view,
//! work on a scratch clone, and hand back the updated graph. Nothing is
//! persisted until the caller folds the result into the child's
//! progress record, so a failed store write leaves prior state intact.

use log::{debug, info, warn};

use super::graph::{MapGraph, NodeStatus, UnlockRule};
use crate::error::{QuestError, Result};

/// Marks `node_id` completed and propagates unlocks along its outgoing
/// paths.
///
/// Unlock candidates are the locked successors whose unlock rule is
/// satisfied. The first candidate in path order becomes `current` when
/// the graph holds no other current or available node at that moment;
/// the rest become `available`. A final repair pass promotes the first
/// available node if the graph would otherwise be left without a
/// current one.
///
/// The node does not have to be `current` to be completed; completing
/// an `available` node directly is accepted.
pub fn complete_node(graph: &MapGraph, node_id: &str) -> Result<MapGraph> {
    if graph.node(node_id).is_none() {
        return Err(QuestError::not_found("node", node_id));
    }

    let mut updated = graph.clone();

    if let Some(node) = updated.node_mut(node_id) {
        node.status = NodeStatus::Completed;
    }
    info!("node {node_id} completed");

    // Successor ids collected up front; the borrow on `updated` must
    // end before we start flipping statuses.
    let successors: Vec<String> = updated
        .successors(node_id)
        .into_iter()
        .map(str::to_string)
        .collect();

    for target_id in successors {
        let Some(target) = updated.node(&target_id) else {
            continue;
        };
        if target.status != NodeStatus::Locked {
            continue;
        }
        if !unlock_rule_satisfied(&updated, &target_id) {
            debug!("node {target_id} stays locked, unlock rule not satisfied");
            continue;
        }

        let occupied = updated.has_node_with_status(NodeStatus::Current)
            || updated.has_node_with_status(NodeStatus::Available);
        let next_status = if occupied {
            NodeStatus::Available
        } else {
            NodeStatus::Current
        };
        if let Some(target) = updated.node_mut(&target_id) {
            target.status = next_status;
        }
        debug!("node {target_id} unlocked as {}", next_status.as_str());
    }

    repair_current(&mut updated);

    Ok(updated)
}

/// Whether `node_id`'s predecessors allow it to leave `Locked`.
fn unlock_rule_satisfied(graph: &MapGraph, node_id: &str) -> bool {
    let Some(node) = graph.node(node_id) else {
        return false;
    };
    match node.unlock_rule {
        // One completed predecessor suffices, and the caller only asks
        // after completing one.
        UnlockRule::Any => true,
        UnlockRule::All => graph
            .predecessors(node_id)
            .into_iter()
            .all(|pred| graph.status_of(pred) == Some(NodeStatus::Completed)),
    }
}

/// Promotes the first available node to current when no current node
/// exists. Keeps each child pointed at a "next to play" node even after
/// out-of-order completions.
fn repair_current(graph: &mut MapGraph) {
    if graph.has_node_with_status(NodeStatus::Current) {
        return;
    }
    if let Some(node) = graph
        .nodes
        .iter_mut()
        .find(|n| n.status == NodeStatus::Available)
    {
        warn!("no current node after completion, promoting {}", node.id);
        node.status = NodeStatus::Current;
    }
}

/// Direct per-child status set, the PATCH surface. No propagation.
pub fn set_node_status(graph: &MapGraph, node_id: &str, status: NodeStatus) -> Result<MapGraph> {
    if graph.node(node_id).is_none() {
        return Err(QuestError::not_found("node", node_id));
    }
    let mut updated = graph.clone();
    if let Some(node) = updated.node_mut(node_id) {
        node.status = status;
    }
    Ok(updated)
}

/// Puts the graph's starting node into `current`. Used when a zone is
/// activated for a child; this is a direct set, not a completion
/// event. A starting node the child already completed is left alone.
pub fn activate_starting_node(graph: &MapGraph) -> MapGraph {
    let mut updated = graph.clone();
    if let Some(start_id) = updated.starting_node_id().map(str::to_string) {
        if let Some(node) = updated.node_mut(&start_id) {
            if node.status != NodeStatus::Completed {
                info!("activating starting node {start_id}");
                node.status = NodeStatus::Current;
            }
        }
    }
    updated
}
