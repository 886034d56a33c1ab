//! Room connectivity: hop-limited reachability and unweighted shortest paths
//! over `connects` edges. Door traversal cost is uniform, so plain BFS finds
//! minimum-hop paths; the store returns neighbors in ascending id order,
//! which makes the first-discovered path deterministic.

use std::collections::VecDeque;

use ahash::{AHashMap, AHashSet};

use crate::{errors::BuildingGraphError, model::Element, store::GraphStore};

/// Rooms reachable from Room `id` over `connects` edges, ordered by hop
/// distance then id. `hop_limit = Some(1)` yields direct neighbors only;
/// `None` yields the transitive closure. The start room is excluded.
pub fn connected_rooms<S: GraphStore>(
    store: &S,
    id: &str,
    hop_limit: Option<u32>,
) -> Result<Vec<Element>, BuildingGraphError> {
    let start = store.get_element(id)?;
    if !start.is_room() {
        return Err(BuildingGraphError::invalid_argument(format!(
            "element '{id}' is not a Room"
        )));
    }
    let mut seen = AHashSet::new();
    seen.insert(id.to_string());
    let mut queue = VecDeque::new();
    queue.push_back((id.to_string(), 0_u32));
    let mut found = Vec::new();
    while let Some((current, hops)) = queue.pop_front() {
        if let Some(limit) = hop_limit {
            if hops >= limit {
                continue;
            }
        }
        for room in store.connected_rooms(&current)? {
            if seen.insert(room.id.clone()) {
                queue.push_back((room.id.clone(), hops + 1));
                found.push(room);
            }
        }
    }
    Ok(found)
}

/// Minimum-hop path between two Rooms as the ordered id sequence from `from`
/// to `to` inclusive. `Ok(None)` when the rooms sit in disconnected
/// components; that is a documented outcome, not an error.
pub fn shortest_path<S: GraphStore>(
    store: &S,
    from: &str,
    to: &str,
) -> Result<Option<Vec<String>>, BuildingGraphError> {
    for (id, element) in [(from, store.get_element(from)?), (to, store.get_element(to)?)] {
        if !element.is_room() {
            return Err(BuildingGraphError::invalid_argument(format!(
                "element '{id}' is not a Room"
            )));
        }
    }
    if from == to {
        return Ok(Some(vec![from.to_string()]));
    }
    let mut queue = VecDeque::new();
    let mut parents: AHashMap<String, String> = AHashMap::new();
    let mut seen = AHashSet::new();
    queue.push_back(from.to_string());
    seen.insert(from.to_string());
    let mut found = false;
    while let Some(node) = queue.pop_front() {
        for next in store.connected_rooms(&node)? {
            if seen.insert(next.id.clone()) {
                parents.insert(next.id.clone(), node.clone());
                if next.id == to {
                    found = true;
                    break;
                }
                queue.push_back(next.id);
            }
        }
        if found {
            break;
        }
    }
    if !found {
        return Ok(None);
    }
    let mut path = vec![to.to_string()];
    let mut current = to.to_string();
    while let Some(parent) = parents.get(&current) {
        path.push(parent.clone());
        if parent == from {
            break;
        }
        current = parent.clone();
    }
    if path.last().map(String::as_str) != Some(from) {
        return Ok(None);
    }
    path.reverse();
    Ok(Some(path))
}
