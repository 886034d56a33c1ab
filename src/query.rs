//! The fixed catalogue of named building queries. Each operation validates
//! its inputs, composes the traversal/aggregation primitives, and returns a
//! plain structured value; rendering is the caller's concern.

use std::collections::BTreeMap;

use crate::{
    errors::BuildingGraphError,
    graph::BuildingGraph,
    hierarchy::{self, DescendantSet},
    model::{Element, ElementType, Relation, RelationKind},
    stats::{self, AreaBasis, CategoryStats, ElementStats, GraphMetadata},
    store::GraphStore,
    wayfinding,
};

/// Doors and windows of a single room, split by type.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RoomOpenings {
    pub doors: Vec<Element>,
    pub windows: Vec<Element>,
}

pub struct QueryEngine<'a, S> {
    store: &'a S,
}

impl<'a, S: GraphStore> QueryEngine<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub fn element_by_id(&self, id: &str) -> Result<Element, BuildingGraphError> {
        self.store.get_element(id)
    }

    pub fn elements_by_type(&self, type_name: &str) -> Result<Vec<Element>, BuildingGraphError> {
        let element_type = parse_element_type(type_name)?;
        self.store.all_elements(Some(element_type))
    }

    pub fn children(&self, id: &str) -> Result<Vec<Element>, BuildingGraphError> {
        self.store.children(id)
    }

    pub fn parent(&self, id: &str) -> Result<Option<Element>, BuildingGraphError> {
        self.store.parent(id)
    }

    pub fn descendants(
        &self,
        id: &str,
        max_depth: Option<u32>,
    ) -> Result<Vec<Element>, BuildingGraphError> {
        hierarchy::descendants(self.store, id, max_depth).map(|walk| walk.elements)
    }

    /// Descendants together with the per-type breakdown.
    pub fn descendants_summary(
        &self,
        id: &str,
        max_depth: Option<u32>,
    ) -> Result<DescendantSet, BuildingGraphError> {
        hierarchy::descendants(self.store, id, max_depth)
    }

    pub fn ancestors(&self, id: &str) -> Result<Vec<Element>, BuildingGraphError> {
        hierarchy::ancestors(self.store, id)
    }

    /// Rooms directly connected to Room `id` (one door away).
    pub fn connected_rooms(&self, id: &str) -> Result<Vec<Element>, BuildingGraphError> {
        wayfinding::connected_rooms(self.store, id, Some(1))
    }

    /// Rooms reachable from Room `id`; `None` removes the hop bound.
    pub fn reachable_rooms(
        &self,
        id: &str,
        hop_limit: Option<u32>,
    ) -> Result<Vec<Element>, BuildingGraphError> {
        wayfinding::connected_rooms(self.store, id, hop_limit)
    }

    pub fn room_openings(&self, id: &str) -> Result<RoomOpenings, BuildingGraphError> {
        let room = self.store.get_element(id)?;
        if !room.is_room() {
            return Err(BuildingGraphError::invalid_argument(format!(
                "element '{id}' is not a Room"
            )));
        }
        let mut openings = RoomOpenings::default();
        for child in self.store.children(id)? {
            match child.element_type {
                ElementType::Door => openings.doors.push(child),
                ElementType::Window => openings.windows.push(child),
                _ => {}
            }
        }
        Ok(openings)
    }

    /// Shortest door-to-door path between two rooms, hydrated to elements.
    /// `Ok(None)` when the rooms are in disconnected components.
    pub fn find_path(
        &self,
        from: &str,
        to: &str,
    ) -> Result<Option<Vec<Element>>, BuildingGraphError> {
        let Some(ids) = wayfinding::shortest_path(self.store, from, to)? else {
            return Ok(None);
        };
        let mut path = Vec::with_capacity(ids.len());
        for id in &ids {
            path.push(self.store.get_element(id)?);
        }
        Ok(Some(path))
    }

    pub fn element_statistics(&self, building_id: &str) -> Result<ElementStats, BuildingGraphError> {
        stats::type_and_area_stats(self.store, building_id, AreaBasis::Rooms)
    }

    pub fn occupancy_report(
        &self,
        building_id: &str,
    ) -> Result<BTreeMap<String, CategoryStats>, BuildingGraphError> {
        stats::occupancy_report(self.store, building_id)
    }

    pub fn graph_metadata(&self) -> Result<GraphMetadata, BuildingGraphError> {
        stats::graph_metadata(self.store)
    }

    pub fn relations(&self, kind: Option<&str>) -> Result<Vec<Relation>, BuildingGraphError> {
        let filter = match kind {
            Some(name) => Some(RelationKind::parse(name).ok_or_else(|| {
                BuildingGraphError::invalid_argument(format!("unknown relation kind '{name}'"))
            })?),
            None => None,
        };
        self.store.all_relations(filter)
    }
}

impl BuildingGraph {
    pub fn query(&self) -> QueryEngine<'_, BuildingGraph> {
        QueryEngine::new(self)
    }
}

fn parse_element_type(name: &str) -> Result<ElementType, BuildingGraphError> {
    ElementType::parse(name).ok_or_else(|| {
        BuildingGraphError::invalid_argument(format!("unknown element type '{name}'"))
    })
}
