//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary with a throwaway config file and verify outputs.

use std::path::Path;
use std::process::Command;

/// Run a CLI command against `config` and return (stdout, stderr, code).
fn run_cli(config: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_zonesched"))
        .arg("--config")
        .arg(config)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

const REQUEST: &str = r#"{
    "tasks": [
        {"id": "t1", "title": "Write parser",
         "category": "work", "type": "development", "priority": 5},
        {"id": "t2", "category": "personal", "type": "errand", "priority": 3}
    ],
    "zones": [{
        "id": "work", "name": "Work",
        "start_time": "09:00", "end_time": "10:00",
        "days_of_week": ["monday"],
        "scheduling": {"mode": "whitelist", "allowed_categories": ["work"]}
    }]
}"#;

fn write_request(dir: &Path, body: &str) -> String {
    let path = dir.join("request.json");
    std::fs::write(&path, body).unwrap();
    path.to_string_lossy().to_string()
}

#[test]
fn test_plan_json() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    let input = write_request(dir.path(), REQUEST);

    let (stdout, stderr, code) = run_cli(
        &config,
        &["plan", "--input", &input, "--start", "2026-10-19", "--days", "1", "--json"],
    );
    assert_eq!(code, 0, "plan failed: {stderr}");

    let outcome: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let placements = outcome["placements"].as_array().unwrap();
    assert_eq!(placements.len(), 2);
    assert_eq!(placements[0]["task_id"], "t1");
    assert_eq!(placements[0]["slot"]["start"], "2026-10-19T09:00:00Z");
    assert_eq!(placements[0]["slot"]["origin"]["source"], "zone");
    assert_eq!(placements[1]["slot"]["origin"]["source"], "non_zone");
    assert_eq!(outcome["pool_stats"]["fallback"]["reason"], "insufficient_zone_slots");
}

#[test]
fn test_plan_text() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    let input = write_request(dir.path(), REQUEST);

    let (stdout, _, code) = run_cli(
        &config,
        &["plan", "-i", &input, "--start", "2026-10-19", "--days", "1"],
    );
    assert_eq!(code, 0);
    assert!(stdout.starts_with("placed 2 of 2 tasks"));
    assert!(stdout.contains("2026-10-19 09:00-10:00  zone:work  Write parser"));
}

#[test]
fn test_slots_json() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    let input = write_request(dir.path(), REQUEST);

    let (stdout, _, code) = run_cli(
        &config,
        &[
            "slots", "--input", &input, "--start", "2026-10-19", "--days", "1",
            "--slot-minutes", "30", "--json",
        ],
    );
    assert_eq!(code, 0);

    let pool: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(pool["stats"]["zone_slots"], 2);
    assert_eq!(pool["slots"][0]["end"], "2026-10-19T09:30:00Z");
}

#[test]
fn test_plan_rejects_invalid_request() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    let input = write_request(
        dir.path(),
        r#"{"tasks": [{"id": "a", "category": "w", "type": "x", "priority": 9}]}"#,
    );

    let (_, stderr, code) = run_cli(&config, &["plan", "--input", &input]);
    assert_eq!(code, 1);
    assert!(stderr.starts_with("error:"), "{stderr}");
}

#[test]
fn test_plan_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    let missing = dir.path().join("nope.json");

    let (_, stderr, code) = run_cli(&config, &["plan", "--input", &missing.to_string_lossy()]);
    assert_eq!(code, 1);
    assert!(stderr.contains("cannot read"));
}

#[test]
fn test_config_set_get_reset() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");

    let (stdout, _, code) = run_cli(&config, &["config", "get", "engine.slot_minutes"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "60");

    let (_, _, code) = run_cli(&config, &["config", "set", "engine.slot_minutes", "45"]);
    assert_eq!(code, 0);
    assert!(std::fs::read_to_string(&config).unwrap().contains("slot_minutes = 45"));

    let (stdout, _, _) = run_cli(&config, &["config", "get", "engine.slot_minutes"]);
    assert_eq!(stdout.trim(), "45");

    let (_, _, code) = run_cli(&config, &["config", "reset"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(&config, &["config", "get", "engine.slot_minutes"]);
    assert_eq!(stdout.trim(), "60");
}

#[test]
fn test_config_unknown_key() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");

    let (_, stderr, code) = run_cli(&config, &["config", "get", "engine.nope"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown key"));

    let (_, _, code) = run_cli(&config, &["config", "set", "engine.nope", "1"]);
    assert_eq!(code, 1);
}

#[test]
fn test_config_list_and_path() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");

    let (stdout, _, code) = run_cli(&config, &["config", "list"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["fallback"]["start"], "09:00");

    let (stdout, _, _) = run_cli(&config, &["config", "path"]);
    assert_eq!(stdout.trim(), config.to_string_lossy());
}

#[test]
fn test_config_drives_plan() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    let input = write_request(dir.path(), REQUEST);

    run_cli(&config, &["config", "set", "engine.horizon_days", "1"]);
    run_cli(&config, &["config", "set", "fallback.start", "13:00"]);
    run_cli(&config, &["config", "set", "fallback.end", "14:00"]);

    let (stdout, _, code) = run_cli(
        &config,
        &["slots", "--input", &input, "--start", "2026-10-19", "--json"],
    );
    assert_eq!(code, 0);
    let pool: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(pool["stats"]["zone_slots"], 1);
    assert_eq!(pool["stats"]["non_zone_slots"], 1);
    assert_eq!(pool["slots"][1]["start"], "2026-10-19T13:00:00Z");
}

#[test]
fn test_completions() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");

    let (stdout, _, code) = run_cli(&config, &["completions", "bash"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("zonesched"));
    // Completions never touch the config file
    assert!(!config.exists());
}
