use std::path::Path;

use rusqlite::{Connection, OptionalExtension, params};
use tracing::debug;

use crate::{
    cache::AdjacencyCache,
    errors::BuildingGraphError,
    model::{Element, ElementType, Relation, RelationKind},
    schema::ensure_schema,
};

/// Counts reported by a completed bulk load.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub elements: usize,
    pub relations: usize,
}

/// SQLite-backed building graph. Elements and relations are written once
/// during load; every query path is read-only and cache-friendly.
pub struct BuildingGraph {
    conn: Connection,
    children_cache: AdjacencyCache,
    connects_cache: AdjacencyCache,
}

impl BuildingGraph {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, BuildingGraphError> {
        let conn =
            Connection::open(path).map_err(|e| BuildingGraphError::connection(e.to_string()))?;
        ensure_schema(&conn)?;
        Ok(Self::from_connection(conn))
    }

    pub fn open_in_memory() -> Result<Self, BuildingGraphError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| BuildingGraphError::connection(e.to_string()))?;
        ensure_schema(&conn)?;
        Ok(Self::from_connection(conn))
    }

    pub fn insert_element(&self, element: &Element) -> Result<(), BuildingGraphError> {
        validate_element(element)?;
        if self.element_exists(&element.id)? {
            return Err(BuildingGraphError::invalid_argument(format!(
                "duplicate element id '{}'",
                element.id
            )));
        }
        let properties = serde_json::to_string(&element.properties)
            .map_err(|e| BuildingGraphError::invalid_argument(e.to_string()))?;
        self.conn
            .execute(
                "INSERT INTO building_elements(id, element_type, name, area, properties) \
                 VALUES(?1, ?2, ?3, ?4, ?5)",
                params![
                    element.id.as_str(),
                    element.element_type.as_str(),
                    element.name.as_str(),
                    element.area,
                    properties,
                ],
            )
            .map_err(|e| BuildingGraphError::query(e.to_string()))?;
        self.invalidate_caches();
        Ok(())
    }

    /// Inserts a relation and returns the SQLite rowid. Endpoints must exist;
    /// `contains` targets must not already have a parent and `connects`
    /// endpoints must both be Rooms.
    pub fn insert_relation(&self, relation: &Relation) -> Result<i64, BuildingGraphError> {
        if relation.from_id == relation.to_id {
            return Err(BuildingGraphError::invalid_argument(format!(
                "self loop on element '{}'",
                relation.from_id
            )));
        }
        for endpoint in [&relation.from_id, &relation.to_id] {
            if !self.element_exists(endpoint)? {
                return Err(BuildingGraphError::invalid_argument(format!(
                    "relation endpoint '{endpoint}' does not exist"
                )));
            }
        }
        match relation.kind {
            RelationKind::Contains => {
                if !self.fetch_parent_ids(&relation.to_id)?.is_empty() {
                    return Err(BuildingGraphError::invalid_argument(format!(
                        "element '{}' already has a parent",
                        relation.to_id
                    )));
                }
            }
            RelationKind::Connects => {
                for endpoint in [&relation.from_id, &relation.to_id] {
                    let element = self.fetch_element(endpoint)?;
                    if !element.is_room() {
                        return Err(BuildingGraphError::invalid_argument(format!(
                            "connects endpoint '{endpoint}' is not a Room"
                        )));
                    }
                }
            }
        }
        let properties = serde_json::to_string(&relation.properties)
            .map_err(|e| BuildingGraphError::invalid_argument(e.to_string()))?;
        self.conn
            .execute(
                "INSERT INTO building_relations(from_id, to_id, kind, properties) \
                 VALUES(?1, ?2, ?3, ?4)",
                params![
                    relation.from_id.as_str(),
                    relation.to_id.as_str(),
                    relation.kind.as_str(),
                    properties,
                ],
            )
            .map_err(|e| BuildingGraphError::query(e.to_string()))?;
        self.invalidate_caches();
        Ok(self.conn.last_insert_rowid())
    }

    /// Loads the whole graph in one transaction. Either every element and
    /// relation lands, or the store is rolled back to its prior state.
    pub fn bulk_load(
        &self,
        elements: &[Element],
        relations: &[Relation],
    ) -> Result<LoadStats, BuildingGraphError> {
        self.conn
            .execute("BEGIN IMMEDIATE", [])
            .map_err(|e| BuildingGraphError::query(e.to_string()))?;
        let result = (|| {
            for element in elements {
                self.insert_element(element)?;
            }
            for relation in relations {
                self.insert_relation(relation)?;
            }
            Ok(LoadStats {
                elements: elements.len(),
                relations: relations.len(),
            })
        })();
        match result {
            Ok(stats) => {
                self.conn
                    .execute("COMMIT", [])
                    .map_err(|e| BuildingGraphError::query(e.to_string()))?;
                self.invalidate_caches();
                debug!(
                    elements = stats.elements,
                    relations = stats.relations,
                    "bulk load committed"
                );
                Ok(stats)
            }
            Err(err) => {
                let _ = self.conn.execute("ROLLBACK", []);
                Err(err)
            }
        }
    }

    pub fn element_count(&self) -> Result<usize, BuildingGraphError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM building_elements", [], |row| {
                row.get(0)
            })
            .map_err(|e| BuildingGraphError::query(e.to_string()))?;
        Ok(count as usize)
    }
}

impl BuildingGraph {
    pub(crate) fn fetch_element(&self, id: &str) -> Result<Element, BuildingGraphError> {
        self.conn
            .query_row(
                "SELECT id, element_type, name, area, properties \
                 FROM building_elements WHERE id=?1",
                params![id],
                |row| row_to_element(row),
            )
            .map_err(|err| match err {
                rusqlite::Error::QueryReturnedNoRows => {
                    BuildingGraphError::not_found(format!("element '{id}'"))
                }
                other => BuildingGraphError::query(other.to_string()),
            })
    }

    pub(crate) fn fetch_children_ids(&self, id: &str) -> Result<Vec<String>, BuildingGraphError> {
        if let Some(cached) = self.children_cache.get(id) {
            return Ok(cached);
        }
        let result = self.collect_adjacency(
            "SELECT to_id FROM building_relations \
             WHERE from_id=?1 AND kind='contains' ORDER BY to_id",
            id,
        )?;
        self.children_cache.insert(id.to_string(), result.clone());
        Ok(result)
    }

    pub(crate) fn fetch_connected_ids(&self, id: &str) -> Result<Vec<String>, BuildingGraphError> {
        if let Some(cached) = self.connects_cache.get(id) {
            return Ok(cached);
        }
        let result = self.collect_adjacency(
            "SELECT r.to_id FROM building_relations r \
             JOIN building_elements e ON e.id = r.to_id \
             WHERE r.from_id=?1 AND r.kind='connects' AND e.element_type='Room' \
             ORDER BY r.to_id",
            id,
        )?;
        self.connects_cache.insert(id.to_string(), result.clone());
        Ok(result)
    }

    pub(crate) fn fetch_parent_ids(&self, id: &str) -> Result<Vec<String>, BuildingGraphError> {
        self.collect_adjacency(
            "SELECT from_id FROM building_relations \
             WHERE to_id=?1 AND kind='contains' ORDER BY from_id",
            id,
        )
    }

    pub(crate) fn scan_elements(
        &self,
        filter: Option<ElementType>,
    ) -> Result<Vec<Element>, BuildingGraphError> {
        let (sql, bound) = match filter {
            Some(element_type) => (
                "SELECT id, element_type, name, area, properties \
                 FROM building_elements WHERE element_type=?1 ORDER BY id",
                Some(element_type),
            ),
            None => (
                "SELECT id, element_type, name, area, properties \
                 FROM building_elements ORDER BY id",
                None,
            ),
        };
        let mut stmt = self
            .conn
            .prepare(sql)
            .map_err(|e| BuildingGraphError::query(e.to_string()))?;
        let mut elements = Vec::new();
        let rows = match bound {
            Some(element_type) => stmt.query_map(params![element_type.as_str()], row_to_element),
            None => stmt.query_map([], row_to_element),
        }
        .map_err(|e| BuildingGraphError::query(e.to_string()))?;
        for row in rows {
            elements.push(row.map_err(|e| BuildingGraphError::query(e.to_string()))?);
        }
        Ok(elements)
    }

    pub(crate) fn scan_relations(
        &self,
        filter: Option<RelationKind>,
    ) -> Result<Vec<Relation>, BuildingGraphError> {
        let (sql, bound) = match filter {
            Some(kind) => (
                "SELECT id, from_id, to_id, kind, properties \
                 FROM building_relations WHERE kind=?1 ORDER BY id",
                Some(kind),
            ),
            None => (
                "SELECT id, from_id, to_id, kind, properties \
                 FROM building_relations ORDER BY id",
                None,
            ),
        };
        let mut stmt = self
            .conn
            .prepare(sql)
            .map_err(|e| BuildingGraphError::query(e.to_string()))?;
        let mut relations = Vec::new();
        let rows = match bound {
            Some(kind) => stmt.query_map(params![kind.as_str()], row_to_relation),
            None => stmt.query_map([], row_to_relation),
        }
        .map_err(|e| BuildingGraphError::query(e.to_string()))?;
        for row in rows {
            relations.push(row.map_err(|e| BuildingGraphError::query(e.to_string()))?);
        }
        Ok(relations)
    }

    fn collect_adjacency(&self, sql: &str, id: &str) -> Result<Vec<String>, BuildingGraphError> {
        let mut stmt = self
            .conn
            .prepare(sql)
            .map_err(|e| BuildingGraphError::query(e.to_string()))?;
        let rows = stmt
            .query_map(params![id], |row| row.get(0))
            .map_err(|e| BuildingGraphError::query(e.to_string()))?;
        let mut result = Vec::new();
        for item in rows {
            result.push(item.map_err(|e| BuildingGraphError::query(e.to_string()))?);
        }
        Ok(result)
    }

    fn element_exists(&self, id: &str) -> Result<bool, BuildingGraphError> {
        let exists: Option<i64> = self
            .conn
            .query_row(
                "SELECT 1 FROM building_elements WHERE id=?1",
                params![id],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| BuildingGraphError::query(e.to_string()))?;
        Ok(exists.is_some())
    }

    fn invalidate_caches(&self) {
        self.children_cache.clear();
        self.connects_cache.clear();
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn,
            children_cache: AdjacencyCache::new(),
            connects_cache: AdjacencyCache::new(),
        }
    }
}

fn row_to_element(row: &rusqlite::Row<'_>) -> Result<Element, rusqlite::Error> {
    let type_text: String = row.get(1)?;
    let element_type = ElementType::parse(&type_text).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            type_text.len(),
            rusqlite::types::Type::Text,
            Box::new(BuildingGraphError::schema(format!(
                "unknown element type '{type_text}'"
            ))),
        )
    })?;
    let data: String = row.get(4)?;
    let properties: serde_json::Value = serde_json::from_str(&data).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(
            data.len(),
            rusqlite::types::Type::Text,
            Box::new(e),
        )
    })?;
    Ok(Element {
        id: row.get(0)?,
        element_type,
        name: row.get(2)?,
        area: row.get(3)?,
        properties,
    })
}

fn row_to_relation(row: &rusqlite::Row<'_>) -> Result<Relation, rusqlite::Error> {
    let kind_text: String = row.get(3)?;
    let kind = RelationKind::parse(&kind_text).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            kind_text.len(),
            rusqlite::types::Type::Text,
            Box::new(BuildingGraphError::schema(format!(
                "unknown relation kind '{kind_text}'"
            ))),
        )
    })?;
    let data: String = row.get(4)?;
    let properties: serde_json::Value = serde_json::from_str(&data).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(
            data.len(),
            rusqlite::types::Type::Text,
            Box::new(e),
        )
    })?;
    Ok(Relation {
        id: row.get(0)?,
        from_id: row.get(1)?,
        to_id: row.get(2)?,
        kind,
        properties,
    })
}

fn validate_element(element: &Element) -> Result<(), BuildingGraphError> {
    if element.id.trim().is_empty() {
        return Err(BuildingGraphError::schema("element id must be set"));
    }
    if element.area < 0.0 {
        return Err(BuildingGraphError::schema(format!(
            "element '{}' has negative area {}",
            element.id, element.area
        )));
    }
    Ok(())
}
