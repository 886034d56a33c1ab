//! Read-only adapter boundary between the traversal/aggregation engines and
//! the backing store. Engines are generic over [`GraphStore`] so they can run
//! against any store implementation; [`BuildingGraph`] is the SQLite one.
//! Every sequence-returning method orders by element id, which is what makes
//! traversal output reproducible.

use crate::{
    errors::BuildingGraphError,
    graph::BuildingGraph,
    model::{Element, ElementType, Relation, RelationKind},
};

pub trait GraphStore {
    /// Fails with `NotFound` when the id is absent.
    fn get_element(&self, id: &str) -> Result<Element, BuildingGraphError>;

    /// Direct `contains` targets, sorted by id.
    fn children(&self, id: &str) -> Result<Vec<Element>, BuildingGraphError>;

    /// The unique `contains` source, if any.
    fn parent(&self, id: &str) -> Result<Option<Element>, BuildingGraphError>;

    /// Direct `connects` neighbors of Room type, sorted by id.
    fn connected_rooms(&self, id: &str) -> Result<Vec<Element>, BuildingGraphError>;

    fn all_elements(
        &self,
        filter: Option<ElementType>,
    ) -> Result<Vec<Element>, BuildingGraphError>;

    fn all_relations(
        &self,
        filter: Option<RelationKind>,
    ) -> Result<Vec<Relation>, BuildingGraphError>;
}

impl GraphStore for BuildingGraph {
    fn get_element(&self, id: &str) -> Result<Element, BuildingGraphError> {
        self.fetch_element(id)
    }

    fn children(&self, id: &str) -> Result<Vec<Element>, BuildingGraphError> {
        self.fetch_element(id)?;
        let mut children = Vec::new();
        for child_id in self.fetch_children_ids(id)? {
            children.push(self.fetch_element(&child_id)?);
        }
        Ok(children)
    }

    fn parent(&self, id: &str) -> Result<Option<Element>, BuildingGraphError> {
        self.fetch_element(id)?;
        let parents = self.fetch_parent_ids(id)?;
        match parents.as_slice() {
            [] => Ok(None),
            [parent_id] => Ok(Some(self.fetch_element(parent_id)?)),
            _ => Err(BuildingGraphError::integrity(format!(
                "element '{id}' has multiple parents: {}",
                parents.join(", ")
            ))),
        }
    }

    fn connected_rooms(&self, id: &str) -> Result<Vec<Element>, BuildingGraphError> {
        self.fetch_element(id)?;
        let mut rooms = Vec::new();
        for room_id in self.fetch_connected_ids(id)? {
            rooms.push(self.fetch_element(&room_id)?);
        }
        Ok(rooms)
    }

    fn all_elements(
        &self,
        filter: Option<ElementType>,
    ) -> Result<Vec<Element>, BuildingGraphError> {
        self.scan_elements(filter)
    }

    fn all_relations(
        &self,
        filter: Option<RelationKind>,
    ) -> Result<Vec<Relation>, BuildingGraphError> {
        self.scan_relations(filter)
    }
}
