//! Aggregation over the loaded graph: per-type counts and area sums rooted at
//! a container, occupancy grouped by room category, and whole-graph metadata.
//! Area totals are computed on demand from Room descendants, never stored.

use std::collections::BTreeMap;

use crate::{
    errors::BuildingGraphError,
    hierarchy,
    model::{ElementType, RelationKind},
    store::GraphStore,
};

/// Which descendant type contributes to the area total. `Rooms` is the
/// default; `Floors` matches datasets that only carry floor-level areas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AreaBasis {
    #[default]
    Rooms,
    Floors,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ElementStats {
    pub counts: BTreeMap<ElementType, usize>,
    pub total_area: f64,
}

impl ElementStats {
    pub fn count(&self, element_type: ElementType) -> usize {
        self.counts.get(&element_type).copied().unwrap_or(0)
    }
}

/// Tallies element counts per type under `root_id` and sums `area` over the
/// descendants selected by `basis`.
pub fn type_and_area_stats<S: GraphStore>(
    store: &S,
    root_id: &str,
    basis: AreaBasis,
) -> Result<ElementStats, BuildingGraphError> {
    let walk = hierarchy::descendants(store, root_id, None)?;
    let area_type = match basis {
        AreaBasis::Rooms => ElementType::Room,
        AreaBasis::Floors => ElementType::Floor,
    };
    let mut total_area = 0.0;
    for element in &walk.elements {
        if element.element_type == area_type {
            total_area += element.area;
        }
    }
    Ok(ElementStats {
        counts: walk.counts,
        total_area,
    })
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CategoryStats {
    pub count: usize,
    pub total_area: f64,
    pub total_capacity: i64,
}

/// Groups the Room descendants of `root_id` by room category. Rooms without
/// a category land under "Other".
pub fn occupancy_report<S: GraphStore>(
    store: &S,
    root_id: &str,
) -> Result<BTreeMap<String, CategoryStats>, BuildingGraphError> {
    let walk = hierarchy::descendants(store, root_id, None)?;
    let mut report: BTreeMap<String, CategoryStats> = BTreeMap::new();
    for element in &walk.elements {
        if !element.is_room() {
            continue;
        }
        let entry = report.entry(element.room_category().to_string()).or_default();
        entry.count += 1;
        entry.total_area += element.area;
        entry.total_capacity += element.capacity();
    }
    Ok(report)
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphMetadata {
    pub total_elements: usize,
    pub element_counts: BTreeMap<ElementType, usize>,
    pub total_relations: usize,
    pub relation_counts: BTreeMap<RelationKind, usize>,
}

/// Whole-graph statistics from a single full scan, independent of any root.
/// Symmetrically stored `connects` pairs count as two relations.
pub fn graph_metadata<S: GraphStore>(store: &S) -> Result<GraphMetadata, BuildingGraphError> {
    let elements = store.all_elements(None)?;
    let relations = store.all_relations(None)?;
    let mut metadata = GraphMetadata {
        total_elements: elements.len(),
        total_relations: relations.len(),
        ..GraphMetadata::default()
    };
    for element in &elements {
        *metadata.element_counts.entry(element.element_type).or_insert(0) += 1;
    }
    for relation in &relations {
        *metadata.relation_counts.entry(relation.kind).or_insert(0) += 1;
    }
    Ok(metadata)
}
