use bimgraph::{
    BuildingGraph, BuildingGraphError, ElementType, GraphStore,
    loader::{load_dataset, parse_dataset},
};

const SCENARIO_DATASET: &str = r#"{
    "buildings": [{"id": "bld_001", "name": "Main Tower"}],
    "floors": [{"id": "flr_001", "name": "Ground Floor", "parent_id": "bld_001"}],
    "rooms": [
        {"id": "rm_001", "name": "Lobby", "parent_id": "flr_001", "properties": {"area_sqm": 120, "room_type": "Lobby"}},
        {"id": "rm_002", "name": "Reception", "parent_id": "flr_001", "properties": {"area_sqm": 35, "room_type": "Office"}}
    ],
    "doors": [{"id": "dr_001", "name": "Reception Door", "parent_id": "rm_001", "connects": ["rm_001", "rm_002"]}],
    "windows": [{"id": "win_001", "name": "Lobby Window", "parent_id": "rm_001"}]
}"#;

fn load_scenario() -> BuildingGraph {
    let graph = BuildingGraph::open_in_memory().expect("graph");
    let dataset = parse_dataset(SCENARIO_DATASET).expect("parse");
    load_dataset(&graph, &dataset).expect("load");
    graph
}

#[test]
fn test_scenario_connected_rooms() {
    let graph = load_scenario();
    let rooms = graph.query().connected_rooms("rm_001").expect("rooms");
    let ids: Vec<&str> = rooms.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["rm_002"]);
}

#[test]
fn test_scenario_find_path() {
    let graph = load_scenario();
    let path = graph
        .query()
        .find_path("rm_001", "rm_002")
        .expect("query")
        .expect("path exists");
    let ids: Vec<&str> = path.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["rm_001", "rm_002"]);
}

#[test]
fn test_scenario_descendant_type_counts() {
    let graph = load_scenario();
    let summary = graph
        .query()
        .descendants_summary("bld_001", None)
        .expect("summary");
    assert_eq!(summary.count(ElementType::Floor), 1);
    assert_eq!(summary.count(ElementType::Room), 2);
    assert_eq!(summary.count(ElementType::Door), 1);
    assert_eq!(summary.count(ElementType::Window), 1);
}

#[test]
fn test_scenario_root_ancestors_empty() {
    let graph = load_scenario();
    let chain = graph.query().ancestors("bld_001").expect("ancestors");
    assert!(chain.is_empty());
}

#[test]
fn test_find_path_to_self() {
    let graph = load_scenario();
    let path = graph
        .query()
        .find_path("rm_001", "rm_001")
        .expect("query")
        .expect("path exists");
    assert_eq!(path.len(), 1);
    assert_eq!(path[0].id, "rm_001");
}

#[test]
fn test_elements_by_type() {
    let graph = load_scenario();
    let rooms = graph.query().elements_by_type("Room").expect("rooms");
    assert_eq!(rooms.len(), 2);
    let windows = graph.query().elements_by_type("Window").expect("windows");
    assert_eq!(windows.len(), 1);
}

#[test]
fn test_elements_by_type_unknown_is_invalid_argument() {
    let graph = load_scenario();
    let err = graph
        .query()
        .elements_by_type("Corridor")
        .expect_err("unknown type");
    assert!(matches!(err, BuildingGraphError::InvalidArgument(_)));
}

#[test]
fn test_element_by_id_unknown_is_not_found() {
    let graph = load_scenario();
    let err = graph.query().element_by_id("rm_404").expect_err("missing");
    assert!(matches!(err, BuildingGraphError::NotFound(_)));
}

#[test]
fn test_parent_and_children_facade() {
    let graph = load_scenario();
    let engine = graph.query();
    let parent = engine.parent("flr_001").expect("parent");
    assert_eq!(parent.map(|p| p.id), Some("bld_001".to_string()));

    let children = engine.children("flr_001").expect("children");
    let ids: Vec<&str> = children.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["rm_001", "rm_002"]);
}

#[test]
fn test_room_openings_split_by_type() {
    let graph = load_scenario();
    let openings = graph.query().room_openings("rm_001").expect("openings");
    let door_ids: Vec<&str> = openings.doors.iter().map(|e| e.id.as_str()).collect();
    let window_ids: Vec<&str> = openings.windows.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(door_ids, vec!["dr_001"]);
    assert_eq!(window_ids, vec!["win_001"]);
}

#[test]
fn test_room_openings_requires_room() {
    let graph = load_scenario();
    let err = graph.query().room_openings("flr_001").expect_err("non-room");
    assert!(matches!(err, BuildingGraphError::InvalidArgument(_)));
}

#[test]
fn test_reachable_rooms_transitive() {
    let graph = load_scenario();
    let rooms = graph
        .query()
        .reachable_rooms("rm_002", None)
        .expect("reachable");
    let ids: Vec<&str> = rooms.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["rm_001"]);
}

#[test]
fn test_relations_with_kind_filter() {
    let graph = load_scenario();
    let engine = graph.query();
    let contains = engine.relations(Some("contains")).expect("contains");
    assert_eq!(contains.len(), 5);
    let connects = engine.relations(Some("connects")).expect("connects");
    assert_eq!(connects.len(), 2);
    let all = engine.relations(None).expect("all");
    assert_eq!(all.len(), 7);
}

#[test]
fn test_relations_unknown_kind_is_invalid_argument() {
    let graph = load_scenario();
    let err = graph.query().relations(Some("walks")).expect_err("kind");
    assert!(matches!(err, BuildingGraphError::InvalidArgument(_)));
}

#[test]
fn test_graph_metadata_matches_full_scan() {
    let graph = load_scenario();
    let metadata = graph.query().graph_metadata().expect("metadata");
    let all = graph.all_elements(None).expect("all");
    assert_eq!(metadata.total_elements, all.len());
    assert_eq!(metadata.total_elements, 6);
}

#[test]
fn test_element_statistics_sums_room_area() {
    let graph = load_scenario();
    let stats = graph.query().element_statistics("bld_001").expect("stats");
    assert_eq!(stats.total_area, 155.0);
    assert_eq!(stats.count(ElementType::Room), 2);
}

#[test]
fn test_occupancy_report_facade() {
    let graph = load_scenario();
    let report = graph.query().occupancy_report("bld_001").expect("report");
    assert_eq!(report.len(), 2);
    assert_eq!(report.get("Lobby").expect("Lobby").count, 1);
    assert_eq!(report.get("Office").expect("Office").count, 1);
}
