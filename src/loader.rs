//! Building description loader. Parses the JSON dataset format (sections of
//! elements, each section accepting a single object or a list), validates the
//! whole description up front, derives `contains` and `connects` relation
//! records, and loads everything into a [`BuildingGraph`] in one transaction.
//!
//! Connects convention: every two-room door produces a symmetric pair of
//! directed `connects` edges, each carrying the door id under `via_door`.
//! Queries therefore only ever follow outgoing connects edges.

use std::fs;
use std::path::Path;

use ahash::{AHashMap, AHashSet};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::{
    errors::BuildingGraphError,
    graph::{BuildingGraph, LoadStats},
    model::{Element, ElementType, Relation, RelationKind},
};

/// Reference targets that may point outside the dataset (e.g. a door to the
/// street). They are accepted during validation but produce no element or
/// edge.
pub const ALLOWED_EXTERNAL_IDS: [&str; 2] = ["outside", "corridor"];

#[derive(Debug, Default, Deserialize)]
pub struct BuildingDataset {
    #[serde(default, deserialize_with = "one_or_many")]
    pub project: Vec<ElementRecord>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub site: Vec<ElementRecord>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub buildings: Vec<ElementRecord>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub floors: Vec<ElementRecord>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub rooms: Vec<ElementRecord>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub doors: Vec<ElementRecord>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub windows: Vec<ElementRecord>,
}

impl BuildingDataset {
    fn sections(&self) -> [(&[ElementRecord], &'static str); 7] {
        [
            (self.project.as_slice(), "Project"),
            (self.site.as_slice(), "Site"),
            (self.buildings.as_slice(), "Building"),
            (self.floors.as_slice(), "Floor"),
            (self.rooms.as_slice(), "Room"),
            (self.doors.as_slice(), "Door"),
            (self.windows.as_slice(), "Window"),
        ]
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct ElementRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub element_type: Option<String>,
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default = "empty_object")]
    pub properties: Value,
    #[serde(default)]
    pub connects: Option<Vec<String>>,
}

pub fn parse_dataset(input: &str) -> Result<BuildingDataset, BuildingGraphError> {
    serde_json::from_str(input).map_err(|e| BuildingGraphError::load(e.to_string()))
}

pub fn read_dataset<P: AsRef<Path>>(path: P) -> Result<BuildingDataset, BuildingGraphError> {
    let text = fs::read_to_string(&path).map_err(|e| {
        BuildingGraphError::load(format!("{}: {e}", path.as_ref().display()))
    })?;
    parse_dataset(&text)
}

pub fn load_file<P: AsRef<Path>>(
    graph: &BuildingGraph,
    path: P,
) -> Result<LoadStats, BuildingGraphError> {
    let dataset = read_dataset(path)?;
    load_dataset(graph, &dataset)
}

/// Validates the full description and loads it atomically: either the graph
/// receives every element and relation, or it is left untouched.
pub fn load_dataset(
    graph: &BuildingGraph,
    dataset: &BuildingDataset,
) -> Result<LoadStats, BuildingGraphError> {
    let records = collect_records(dataset)?;
    validate_references(&records)?;
    let elements: Vec<Element> = records.iter().map(|(element, _)| element.clone()).collect();
    let relations = derive_relations(&records);
    let stats = graph.bulk_load(&elements, &relations)?;
    info!(
        elements = stats.elements,
        relations = stats.relations,
        "loaded building dataset"
    );
    Ok(stats)
}

fn collect_records(
    dataset: &BuildingDataset,
) -> Result<Vec<(Element, ElementRecord)>, BuildingGraphError> {
    let mut records = Vec::new();
    let mut seen = AHashSet::new();
    for (section, default_type) in dataset.sections() {
        for record in section {
            let type_name = record.element_type.as_deref().unwrap_or(default_type);
            let element_type = ElementType::parse(type_name).ok_or_else(|| {
                BuildingGraphError::schema(format!(
                    "unknown element type '{type_name}' for element '{}'",
                    record.id
                ))
            })?;
            let element = Element::new(
                record.id.clone(),
                element_type,
                record.name.clone(),
                area_from(&record.properties, &record.id)?,
                record.properties.clone(),
            )?;
            if !seen.insert(element.id.clone()) {
                return Err(BuildingGraphError::load(format!(
                    "duplicate element id '{}'",
                    element.id
                )));
            }
            records.push((element, record.clone()));
        }
    }
    Ok(records)
}

fn validate_references(
    records: &[(Element, ElementRecord)],
) -> Result<(), BuildingGraphError> {
    let mut types: AHashMap<&str, ElementType> = AHashMap::new();
    for (element, _) in records {
        types.insert(element.id.as_str(), element.element_type);
    }
    for (element, record) in records {
        if let Some(parent_id) = record.parent_id.as_deref() {
            if !types.contains_key(parent_id) && !is_external(parent_id) {
                return Err(BuildingGraphError::load(format!(
                    "invalid parent_id '{parent_id}' for element '{}'",
                    element.id
                )));
            }
        }
        if element.element_type != ElementType::Door {
            continue;
        }
        for target in record.connects.iter().flatten() {
            match types.get(target.as_str()) {
                Some(ElementType::Room) => {}
                Some(_) => {
                    return Err(BuildingGraphError::load(format!(
                        "door '{}' connects non-room element '{target}'",
                        element.id
                    )));
                }
                None if is_external(target) => {}
                None => {
                    return Err(BuildingGraphError::load(format!(
                        "door '{}' connects to unknown element '{target}'",
                        element.id
                    )));
                }
            }
        }
    }
    Ok(())
}

fn derive_relations(records: &[(Element, ElementRecord)]) -> Vec<Relation> {
    let ids: AHashSet<&str> = records.iter().map(|(e, _)| e.id.as_str()).collect();
    let mut relations = Vec::new();
    for (element, record) in records {
        if let Some(parent_id) = record.parent_id.as_deref() {
            if ids.contains(parent_id) {
                relations.push(relation(parent_id, &element.id, RelationKind::Contains, None));
            }
        }
    }
    for (element, record) in records {
        if element.element_type != ElementType::Door {
            continue;
        }
        let Some(connects) = record.connects.as_deref() else {
            continue;
        };
        if let [room_a, room_b] = connects {
            if ids.contains(room_a.as_str()) && ids.contains(room_b.as_str()) {
                relations.push(relation(
                    room_a,
                    room_b,
                    RelationKind::Connects,
                    Some(&element.id),
                ));
                relations.push(relation(
                    room_b,
                    room_a,
                    RelationKind::Connects,
                    Some(&element.id),
                ));
            }
        }
    }
    relations
}

fn relation(from: &str, to: &str, kind: RelationKind, via_door: Option<&str>) -> Relation {
    let properties = match via_door {
        Some(door_id) => {
            let mut map = serde_json::Map::new();
            map.insert("via_door".to_string(), Value::String(door_id.to_string()));
            Value::Object(map)
        }
        None => empty_object(),
    };
    Relation {
        id: 0,
        from_id: from.to_string(),
        to_id: to.to_string(),
        kind,
        properties,
    }
}

fn area_from(properties: &Value, id: &str) -> Result<f64, BuildingGraphError> {
    match properties.get("area_sqm") {
        None | Some(Value::Null) => Ok(0.0),
        Some(value) => value.as_f64().ok_or_else(|| {
            BuildingGraphError::schema(format!("element '{id}' has non-numeric area_sqm"))
        }),
    }
}

fn is_external(id: &str) -> bool {
    ALLOWED_EXTERNAL_IDS.contains(&id)
}

fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<ElementRecord>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(ElementRecord),
        Many(Vec<ElementRecord>),
    }
    match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Ok(Vec::new()),
        Some(OneOrMany::One(record)) => Ok(vec![record]),
        Some(OneOrMany::Many(records)) => Ok(records),
    }
}
