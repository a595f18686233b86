//! Integration tests for Graphfold
//!
//! These tests run the built binary against snapshot files.

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn graphfold(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_graphfold"))
        .args(args)
        .output()
        .expect("Failed to execute graphfold")
}

/// Five nodes with nodes 1 and 3 hidden; node 0 sits directly above node 2.
fn write_snapshot(dir: &Path) -> String {
    let snapshot = serde_json::json!({
        "nodes": ["usual", "usual", "usual", "unmatched", "usual"],
        "edges": [
            { "up": 0, "down": 1 },
            { "up": 0, "down": 2 },
            { "up": 1, "down": 2, "type": "dotted" },
            { "up": 2, "down": 4 }
        ],
        "hidden": [1, 3],
        "layout": {
            "ranks": [0, 1, 2, 3, 4],
            "heads": [0, 0, 0, 3, 3]
        }
    });
    let path = dir.join("graph.json");
    std::fs::write(&path, serde_json::to_string_pretty(&snapshot).unwrap()).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn test_cli_help() {
    let output = graphfold(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("compacted visible subgraph"));
}

#[test]
fn test_show_compacted_view() {
    let temp_dir = TempDir::new().unwrap();
    let snapshot = write_snapshot(temp_dir.path());

    let output = graphfold(&["show", &snapshot]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("visible 3 of 5 nodes"));

    let rows: Vec<&str> = stdout.lines().skip(2).collect();
    assert_eq!(rows.len(), 3);
    // Node 2 is short index 1 with node 0 above it and node 4 below it.
    assert!(rows[1].starts_with("1 "));
    assert!(rows[1].contains("#2"));
    assert!(rows[1].ends_with(&format!("{:<12} {}", "[0]", "[2]")));
}

#[test]
fn test_show_after_reveal_and_hide() {
    let temp_dir = TempDir::new().unwrap();
    let snapshot = write_snapshot(temp_dir.path());

    let output = graphfold(&["show", &snapshot, "--reveal", "1", "--reveal", "3", "--hide", "4"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("visible 4 of 5 nodes"));
    assert!(stdout.contains("unmatched"));
}

#[test]
fn test_check_with_config() {
    let temp_dir = TempDir::new().unwrap();
    let snapshot = write_snapshot(temp_dir.path());
    let config = temp_dir.path().join("graphfold.toml");
    std::fs::write(&config, "block_size = 2\n").unwrap();

    let output = graphfold(&["--config", &config.to_string_lossy(), "check", &snapshot]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ok: 5 nodes, 3 visible, block size 2"));
}

#[test]
fn test_show_rejects_unknown_node() {
    let temp_dir = TempDir::new().unwrap();
    let snapshot = write_snapshot(temp_dir.path());

    let output = graphfold(&["show", &snapshot, "--hide", "42"]);
    assert!(!output.status.success());
}

#[test]
fn test_missing_snapshot_fails() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("absent.json");

    let output = graphfold(&["check", &missing.to_string_lossy()]);
    assert!(!output.status.success());
}
