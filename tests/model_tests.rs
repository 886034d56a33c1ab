use serde_json::json;

use bimgraph::{BuildingGraphError, Element, ElementType, RelationKind};

#[test]
fn test_element_type_parse_round_trip() {
    for element_type in ElementType::ALL {
        assert_eq!(ElementType::parse(element_type.as_str()), Some(element_type));
    }
}

#[test]
fn test_element_type_parse_unknown() {
    assert_eq!(ElementType::parse("Garage"), None);
    assert_eq!(ElementType::parse("room"), None);
}

#[test]
fn test_relation_kind_parse_round_trip() {
    assert_eq!(RelationKind::parse("contains"), Some(RelationKind::Contains));
    assert_eq!(RelationKind::parse("connects"), Some(RelationKind::Connects));
    assert_eq!(RelationKind::parse("CONTAINS"), None);
}

#[test]
fn test_element_new_rejects_empty_id() {
    let err = Element::new("", ElementType::Room, "Lobby", 10.0, json!({})).expect_err("empty id");
    assert!(matches!(err, BuildingGraphError::SchemaError(_)));
}

#[test]
fn test_element_new_rejects_negative_area() {
    let err =
        Element::new("rm_001", ElementType::Room, "Lobby", -1.0, json!({})).expect_err("area");
    assert!(matches!(err, BuildingGraphError::SchemaError(_)));
}

#[test]
fn test_element_equality_is_id_based() {
    let a = Element::new("rm_001", ElementType::Room, "Lobby", 10.0, json!({})).expect("a");
    let b = Element::new("rm_001", ElementType::Room, "Renamed", 99.0, json!({})).expect("b");
    let c = Element::new("rm_002", ElementType::Room, "Lobby", 10.0, json!({})).expect("c");
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_room_category_and_capacity_defaults() {
    let bare = Element::new("rm_001", ElementType::Room, "Lobby", 0.0, json!({})).expect("bare");
    assert_eq!(bare.room_category(), "Other");
    assert_eq!(bare.capacity(), 0);

    let typed = Element::new(
        "rm_002",
        ElementType::Room,
        "Meeting A",
        28.0,
        json!({"room_type": "MeetingRoom", "capacity": 10}),
    )
    .expect("typed");
    assert_eq!(typed.room_category(), "MeetingRoom");
    assert_eq!(typed.capacity(), 10);
}

#[test]
fn test_type_predicates() {
    assert!(ElementType::Building.is_container());
    assert!(ElementType::Room.is_container());
    assert!(!ElementType::Door.is_container());
    assert!(ElementType::Room.has_area());
    assert!(!ElementType::Window.has_area());
}
