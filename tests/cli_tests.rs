use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;

const DATASET: &str = r#"{
    "buildings": [{"id": "bld_001", "name": "Main Tower"}],
    "floors": [{"id": "flr_001", "name": "Ground Floor", "parent_id": "bld_001"}],
    "rooms": [
        {"id": "rm_001", "name": "Lobby", "parent_id": "flr_001", "properties": {"area_sqm": 120}},
        {"id": "rm_002", "name": "Reception", "parent_id": "flr_001", "properties": {"area_sqm": 35}}
    ],
    "doors": [{"id": "dr_001", "name": "Reception Door", "parent_id": "rm_001", "connects": ["rm_001", "rm_002"]}]
}"#;

fn temp_path(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(name);
    let _ = fs::remove_file(&path);
    path
}

fn dataset_path(name: &str) -> PathBuf {
    let path = temp_path(name);
    fs::write(&path, DATASET).expect("write dataset");
    path
}

#[test]
fn test_cli_exits_with_success_on_help() {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_bimgraph"));
    cmd.arg("--help");
    cmd.assert().success();
}

#[test]
fn test_cli_status_command() {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_bimgraph"));
    cmd.args(["--command", "status"]);
    cmd.assert().success();
}

#[test]
fn test_cli_load_and_stats() {
    let db = temp_path("bimgraph_cli_stats.db");
    let data = dataset_path("bimgraph_cli_stats.json");
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_bimgraph"));
    cmd.args([
        "--db",
        db.to_str().expect("db path"),
        "--data",
        data.to_str().expect("data path"),
        "--command",
        "stats",
        "--id",
        "bld_001",
    ]);
    cmd.assert().success();
}

#[test]
fn test_cli_path_command() {
    let data = dataset_path("bimgraph_cli_path.json");
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_bimgraph"));
    cmd.args([
        "--data",
        data.to_str().expect("data path"),
        "--command",
        "path",
        "--from",
        "rm_001",
        "--to",
        "rm_002",
    ]);
    cmd.assert().success();
}

#[test]
fn test_cli_rejects_unknown_flag() {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_bimgraph"));
    cmd.arg("--bogus");
    cmd.assert().failure().code(2);
}

#[test]
fn test_cli_fails_on_missing_path_endpoint() {
    let data = dataset_path("bimgraph_cli_missing.json");
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_bimgraph"));
    cmd.args([
        "--data",
        data.to_str().expect("data path"),
        "--command",
        "path",
        "--from",
        "rm_001",
        "--to",
        "rm_404",
    ]);
    cmd.assert().failure().code(1);
}
