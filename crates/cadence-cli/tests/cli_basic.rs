//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary with HOME pointed at a temporary directory
//! so configuration writes never touch the real user config.

use std::path::Path;
use std::process::Command;

const REQUEST: &str = r#"{
    "task": {"id": "write-report", "estimated_minutes": 60},
    "busy": [
        {"kind": "time_block", "start": "2026-03-02T09:00:00Z", "end": "2026-03-02T10:00:00Z"}
    ]
}"#;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_cadence-cli"))
        .args(args)
        .env("HOME", home)
        .env_remove("CADENCE_ENV")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn write_request(dir: &Path, json: &str) -> String {
    let path = dir.join("request.json");
    std::fs::write(&path, json).unwrap();
    path.to_string_lossy().to_string()
}

#[test]
fn test_schedule_propose() {
    let home = tempfile::tempdir().unwrap();
    let input = write_request(home.path(), REQUEST);

    let (stdout, stderr, code) = run_cli(
        home.path(),
        &["schedule", "propose", "--input", &input, "--now", "2026-03-02T08:00:00Z"],
    );
    assert_eq!(code, 0, "propose failed: {stderr}");

    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["outcome"], "slot");
    assert_eq!(json["start"], "2026-03-02T10:15:00Z");
    assert_eq!(json["end"], "2026-03-02T11:15:00Z");
}

#[test]
fn test_schedule_propose_no_slot_is_not_an_error() {
    let home = tempfile::tempdir().unwrap();
    let input = write_request(
        home.path(),
        r#"{"task": {"id": "t", "estimated_minutes": 60}, "policy": {"working_days": []}}"#,
    );

    let (stdout, stderr, code) = run_cli(
        home.path(),
        &["schedule", "propose", "--input", &input, "--now", "2026-03-02T08:00:00Z"],
    );
    assert_eq!(code, 0);
    assert!(stderr.contains("t: No working days are configured"), "stderr: {stderr}");

    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["outcome"], "no_slot");
    assert_eq!(json["reason"], "no_working_days");
}

#[test]
fn test_schedule_propose_rejects_oversized_buffer() {
    let home = tempfile::tempdir().unwrap();
    let input = write_request(
        home.path(),
        r#"{
            "task": {"id": "t"},
            "busy": [{"kind": "time_block", "start": "2026-03-02T09:00:00Z", "end": "2026-03-02T10:00:00Z"}],
            "policy": {"buffer_minutes": 1000000000000}
        }"#,
    );

    let (_, stderr, code) = run_cli(
        home.path(),
        &["schedule", "propose", "--input", &input, "--now", "2026-03-02T08:00:00Z"],
    );
    assert_eq!(code, 1);
    assert!(stderr.contains("buffer_minutes"), "stderr: {stderr}");
}

#[test]
fn test_schedule_propose_rejects_invalid_policy() {
    let home = tempfile::tempdir().unwrap();
    let input = write_request(
        home.path(),
        r#"{"task": {"id": "t"}, "policy": {"lookahead_days": 0}}"#,
    );

    let (_, stderr, code) = run_cli(home.path(), &["schedule", "propose", "--input", &input]);
    assert_eq!(code, 1);
    assert!(stderr.contains("lookahead_days"), "stderr: {stderr}");
}

#[test]
fn test_schedule_candidates_respects_limit() {
    let home = tempfile::tempdir().unwrap();
    let input = write_request(home.path(), REQUEST);

    let (stdout, _, code) = run_cli(
        home.path(),
        &[
            "schedule", "candidates", "--input", &input, "--now", "2026-03-02T08:00:00Z", "--limit", "2",
        ],
    );
    assert_eq!(code, 0);

    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let candidates = json.as_array().unwrap();
    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0]["start"], "2026-03-02T10:15:00Z");
    assert_eq!(candidates[1]["start"], "2026-03-03T09:00:00Z");
}

#[test]
fn test_schedule_free() {
    let home = tempfile::tempdir().unwrap();
    let input = write_request(home.path(), REQUEST);

    let (stdout, _, code) = run_cli(
        home.path(),
        &["schedule", "free", "--input", &input, "--now", "2026-03-02T08:00:00Z"],
    );
    assert_eq!(code, 0);

    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let slots = json.as_array().unwrap();
    assert_eq!(slots[0]["start"], "2026-03-02T10:15:00Z");
    assert_eq!(slots[0]["end"], "2026-03-02T17:00:00Z");
    assert_eq!(slots.len(), 5);
}

#[test]
fn test_schedule_batch() {
    let home = tempfile::tempdir().unwrap();
    let input = write_request(
        home.path(),
        r#"{"tasks": [
            {"id": "low", "priority": "low", "estimated_minutes": 30},
            {"id": "urgent", "priority": "urgent", "estimated_minutes": 30}
        ]}"#,
    );

    let (stdout, _, code) = run_cli(
        home.path(),
        &["schedule", "batch", "--input", &input, "--now", "2026-03-02T08:00:00Z"],
    );
    assert_eq!(code, 0);

    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json[0]["task_id"], "urgent");
    assert_eq!(json[0]["result"]["start"], "2026-03-02T09:00:00Z");
    assert_eq!(json[1]["task_id"], "low");
    assert_eq!(json[1]["result"]["start"], "2026-03-02T09:45:00Z");
}

#[test]
fn test_config_set_changes_scheduling() {
    let home = tempfile::tempdir().unwrap();

    let (_, _, code) = run_cli(home.path(), &["config", "set", "scheduling.buffer_minutes", "0"]);
    assert_eq!(code, 0);

    let (stdout, _, code) = run_cli(home.path(), &["config", "get", "scheduling.buffer_minutes"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "0");

    let input = write_request(home.path(), REQUEST);
    let (stdout, _, _) = run_cli(
        home.path(),
        &["schedule", "propose", "--input", &input, "--now", "2026-03-02T08:00:00Z"],
    );
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["start"], "2026-03-02T10:00:00Z");
}

#[test]
fn test_config_set_rejects_invalid_value() {
    let home = tempfile::tempdir().unwrap();

    let (_, stderr, code) = run_cli(
        home.path(),
        &["config", "set", "scheduling.working_hours_start", "25:00"],
    );
    assert_eq!(code, 1);
    assert!(stderr.contains("working_hours_start"), "stderr: {stderr}");
}

#[test]
fn test_config_get_unknown_key() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["config", "get", "scheduling.nope"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown key"));
}

#[test]
fn test_config_list_and_reset() {
    let home = tempfile::tempdir().unwrap();

    let (_, _, code) = run_cli(home.path(), &["config", "set", "scheduling.lookahead_days", "3"]);
    assert_eq!(code, 0);

    let (stdout, _, code) = run_cli(home.path(), &["config", "reset"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("reset"));

    let (stdout, _, code) = run_cli(home.path(), &["config", "list"]);
    assert_eq!(code, 0);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["scheduling"]["lookahead_days"], 7);
}
