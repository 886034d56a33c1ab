//! Vertex and edge schemas for the building graph. Element identity is the
//! caller-supplied string id; equality and hashing ignore every other field.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::BuildingGraphError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ElementType {
    Project,
    Site,
    Building,
    Floor,
    Room,
    Door,
    Window,
}

impl ElementType {
    pub const ALL: [ElementType; 7] = [
        ElementType::Project,
        ElementType::Site,
        ElementType::Building,
        ElementType::Floor,
        ElementType::Room,
        ElementType::Door,
        ElementType::Window,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ElementType::Project => "Project",
            ElementType::Site => "Site",
            ElementType::Building => "Building",
            ElementType::Floor => "Floor",
            ElementType::Room => "Room",
            ElementType::Door => "Door",
            ElementType::Window => "Window",
        }
    }

    pub fn parse(name: &str) -> Option<ElementType> {
        match name {
            "Project" => Some(ElementType::Project),
            "Site" => Some(ElementType::Site),
            "Building" => Some(ElementType::Building),
            "Floor" => Some(ElementType::Floor),
            "Room" => Some(ElementType::Room),
            "Door" => Some(ElementType::Door),
            "Window" => Some(ElementType::Window),
            _ => None,
        }
    }

    /// Containers can carry `contains` children.
    pub fn is_container(self) -> bool {
        matches!(
            self,
            ElementType::Project
                | ElementType::Site
                | ElementType::Building
                | ElementType::Floor
                | ElementType::Room
        )
    }

    /// Area is meaningful for these types; it is zero everywhere else.
    pub fn has_area(self) -> bool {
        matches!(
            self,
            ElementType::Building | ElementType::Floor | ElementType::Room
        )
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationKind {
    Contains,
    Connects,
}

impl RelationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RelationKind::Contains => "contains",
            RelationKind::Connects => "connects",
        }
    }

    pub fn parse(name: &str) -> Option<RelationKind> {
        match name {
            "contains" => Some(RelationKind::Contains),
            "connects" => Some(RelationKind::Connects),
            _ => None,
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Element {
    pub id: String,
    pub element_type: ElementType,
    pub name: String,
    pub area: f64,
    pub properties: Value,
}

impl Element {
    pub fn new<I, N>(
        id: I,
        element_type: ElementType,
        name: N,
        area: f64,
        properties: Value,
    ) -> Result<Element, BuildingGraphError>
    where
        I: Into<String>,
        N: Into<String>,
    {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(BuildingGraphError::schema("element id must be set"));
        }
        if area < 0.0 {
            return Err(BuildingGraphError::schema(format!(
                "element '{id}' has negative area {area}"
            )));
        }
        Ok(Element {
            id,
            element_type,
            name: name.into(),
            area,
            properties,
        })
    }

    pub fn is_room(&self) -> bool {
        self.element_type == ElementType::Room
    }

    /// Room category used by the occupancy report; "Other" when unset.
    pub fn room_category(&self) -> &str {
        self.properties
            .get("room_type")
            .and_then(Value::as_str)
            .unwrap_or("Other")
    }

    pub fn capacity(&self) -> i64 {
        self.properties
            .get("capacity")
            .and_then(Value::as_i64)
            .unwrap_or(0)
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Element) -> bool {
        self.id == other.id
    }
}

impl Eq for Element {}

impl Hash for Element {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Relation {
    pub id: i64,
    pub from_id: String,
    pub to_id: String,
    pub kind: RelationKind,
    pub properties: Value,
}
