//! Containment traversal: breadth-first descendant walks and parent-chain
//! ancestor lookups over `contains` edges. Both guard against malformed
//! input with a visited set instead of trusting the forest invariant.

use std::collections::{BTreeMap, VecDeque};

use ahash::AHashSet;

use crate::{
    errors::BuildingGraphError,
    model::{Element, ElementType},
    store::GraphStore,
};

/// Descendants of one element together with a per-type tally.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DescendantSet {
    pub elements: Vec<Element>,
    pub counts: BTreeMap<ElementType, usize>,
}

impl DescendantSet {
    pub fn count(&self, element_type: ElementType) -> usize {
        self.counts.get(&element_type).copied().unwrap_or(0)
    }
}

/// Walks `contains` edges outward from `id` in breadth-first order. The start
/// element is not part of the result. `max_depth` bounds the walk in hops;
/// `None` collects the whole subtree. A revisited id means the containment
/// edges are not a forest and fails the walk.
pub fn descendants<S: GraphStore>(
    store: &S,
    id: &str,
    max_depth: Option<u32>,
) -> Result<DescendantSet, BuildingGraphError> {
    store.get_element(id)?;
    let mut seen = AHashSet::new();
    seen.insert(id.to_string());
    let mut queue = VecDeque::new();
    queue.push_back((id.to_string(), 0_u32));
    let mut result = DescendantSet::default();
    while let Some((current, depth)) = queue.pop_front() {
        if let Some(limit) = max_depth {
            if depth >= limit {
                continue;
            }
        }
        for child in store.children(&current)? {
            if !seen.insert(child.id.clone()) {
                return Err(BuildingGraphError::integrity(format!(
                    "containment cycle detected at element '{}'",
                    child.id
                )));
            }
            *result.counts.entry(child.element_type).or_insert(0) += 1;
            queue.push_back((child.id.clone(), depth + 1));
            result.elements.push(child);
        }
    }
    Ok(result)
}

/// Walks `parent` links upward from `id`. Returns the chain from immediate
/// parent to root; empty when `id` is itself a root.
pub fn ancestors<S: GraphStore>(
    store: &S,
    id: &str,
) -> Result<Vec<Element>, BuildingGraphError> {
    store.get_element(id)?;
    let mut seen = AHashSet::new();
    seen.insert(id.to_string());
    let mut chain = Vec::new();
    let mut current = id.to_string();
    while let Some(parent) = store.parent(&current)? {
        if !seen.insert(parent.id.clone()) {
            return Err(BuildingGraphError::integrity(format!(
                "containment cycle detected at element '{}'",
                parent.id
            )));
        }
        current = parent.id.clone();
        chain.push(parent);
    }
    Ok(chain)
}
