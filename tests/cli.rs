//! End-to-end tests of the `ledmap` binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

const ROW_OF_TWO: &str = r#"{"panels":[{"x":0,"y":0,"w":32,"h":32,"s":true},{"x":32,"y":0,"w":32,"h":32,"s":true}],"panelCount":2}"#;

fn ledmap() -> Command {
    let mut cmd = Command::cargo_bin("ledmap").unwrap();
    cmd.env_remove("LEDMAP_CONFIG").env_remove("RUST_LOG");
    cmd
}

fn document(dir: &TempDir, name: &str, text: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, text).unwrap();
    path
}

#[test]
fn test_help_lists_commands() {
    ledmap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("inspect"))
        .stdout(predicate::str::contains("normalize"))
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("wiring"))
        .stdout(predicate::str::contains("grid"));
}

#[test]
fn test_inspect_reports_grid() {
    let dir = TempDir::new().unwrap();
    let file = document(&dir, "matrix.json", ROW_OF_TWO);

    ledmap()
        .args(["--no-color", "inspect"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Grid unit:    8x8 LEDs"))
        .stdout(predicate::str::contains("Covered LEDs: 2048"));
}

#[test]
fn test_inspect_json_is_parseable() {
    let dir = TempDir::new().unwrap();
    let file = document(&dir, "matrix.json", ROW_OF_TWO);

    let output = ledmap()
        .arg("inspect")
        .arg(&file)
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["grid_factor_y"], 8);
    assert_eq!(report["bounding_rect"]["size"]["width"], 8);
}

#[test]
fn test_normalize_writes_output_file() {
    let dir = TempDir::new().unwrap();
    let file = document(&dir, "matrix.json", ROW_OF_TWO);
    let out = dir.path().join("out").join("normalized.json");
    std::fs::create_dir_all(out.parent().unwrap()).unwrap();

    ledmap()
        .args(["--no-color", "normalize"])
        .arg(&file)
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("normalized"));

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(written["panelCount"], 2);
    assert_eq!(written["panels"][1]["x"], 32);
}

#[test]
fn test_validate_fails_on_overlap() {
    let dir = TempDir::new().unwrap();
    document(&dir, "good.json", ROW_OF_TWO);
    document(
        &dir,
        "bad.json",
        r#"{"panels":[{"x":0,"y":0,"w":32,"h":32},{"x":8,"y":8,"w":32,"h":32}]}"#,
    );

    ledmap()
        .args(["--no-color", "validate"])
        .arg(dir.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("good.json (2 panels)"))
        .stdout(predicate::str::contains("overlap"))
        .stderr(predicate::str::contains("1 of 2 documents failed validation"));
}

#[test]
fn test_validate_missing_file() {
    ledmap()
        .args(["validate", "/nonexistent/matrix.json"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("not found"));
}

#[test]
fn test_wiring_even_rows_exit_adjacent() {
    ledmap()
        .args([
            "--no-color",
            "wiring",
            "--serpentine",
            "--width",
            "3",
            "--height",
            "4",
        ])
        .assert()
        .success()
        .stdout("entry: top-left (-180°)\nexit:  bottom-left (0°)\n");
}

#[test]
fn test_bad_config_from_env() {
    let dir = TempDir::new().unwrap();
    let config = document(&dir, "ledmap.toml", "scale_factor = 0\n");
    let file = document(&dir, "matrix.json", ROW_OF_TWO);

    ledmap()
        .env("LEDMAP_CONFIG", &config)
        .arg("inspect")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config"));
}

#[test]
fn test_grid_prints_led_map() {
    ledmap()
        .args(["grid", "--width", "3", "--height", "1", "--cell", "2,0", "--cell", "0,0"])
        .assert()
        .success()
        .stdout("{\"leds\":[1,-1,0]}\n");
}

#[test]
fn test_inspect_far_offsets() {
    let dir = TempDir::new().unwrap();
    let file = document(
        &dir,
        "far.json",
        r#"{"panels":[{"x":1,"y":0,"w":32,"h":32},{"x":4000000000,"y":0,"w":32,"h":32}]}"#,
    );

    ledmap()
        .args(["--no-color", "inspect"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Panels:       2"));
}
