//! Binary-level tests for the entry-point modes.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn adaptive_hooks() -> Command {
    Command::cargo_bin("adaptive-hooks").unwrap()
}

#[test]
fn detect_prints_default_for_empty_directory() {
    let dir = TempDir::new().unwrap();

    adaptive_hooks()
        .current_dir(dir.path())
        .arg("--detect")
        .assert()
        .success()
        .stdout("default\n");
}

#[test]
fn detect_prints_go_for_go_project() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("go.mod"), "module example.com/demo").unwrap();

    adaptive_hooks()
        .current_dir(dir.path())
        .arg("--detect")
        .assert()
        .success()
        .stdout("go\n");
}

#[test]
fn hook_mode_without_validation_request_prints_project_type() {
    let dir = TempDir::new().unwrap();

    adaptive_hooks()
        .current_dir(dir.path())
        .write_stdin("{}")
        .assert()
        .success()
        .stdout("{\"project_type\":\"default\"}\n");
}

#[test]
fn hook_mode_treats_malformed_input_as_empty_request() {
    let dir = TempDir::new().unwrap();

    adaptive_hooks()
        .current_dir(dir.path())
        .write_stdin("this is not json")
        .assert()
        .success()
        .stdout("{\"project_type\":\"default\"}\n");
}

#[test]
fn hook_mode_runs_validations_when_requested() {
    // Empty dir resolves to the default tag, which has no commands, so the
    // report carries only the informational message.
    let dir = TempDir::new().unwrap();

    adaptive_hooks()
        .current_dir(dir.path())
        .write_stdin(r#"{"run_validations": true}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"validations\":[]"))
        .stdout(predicate::str::contains(
            "No validations configured for project type: default",
        ));
}

#[test]
fn validate_flag_reports_nothing_to_check_for_default_tag() {
    let dir = TempDir::new().unwrap();

    adaptive_hooks()
        .current_dir(dir.path())
        .arg("--validate")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "No validations configured for project type: default",
        ))
        .stdout(predicate::str::contains("\"project_type\": \"default\""));
}

#[test]
fn pre_compact_is_silent_on_malformed_input() {
    let dir = TempDir::new().unwrap();

    adaptive_hooks()
        .current_dir(dir.path())
        .args(["pre-compact", "--verbose"])
        .write_stdin("garbage")
        .assert()
        .success()
        .stdout("");

    assert!(!dir.path().join("logs/pre_compact.json").exists());
}

#[test]
fn pre_compact_backs_up_the_transcript() {
    let dir = TempDir::new().unwrap();
    let transcript = dir.path().join("abc123.jsonl");
    fs::write(&transcript, "{}\n").unwrap();
    let event = serde_json::json!({
        "session_id": "abc123",
        "transcript_path": transcript,
        "trigger": "manual",
    });

    adaptive_hooks()
        .current_dir(dir.path())
        .args(["pre-compact", "--backup", "--verbose"])
        .write_stdin(event.to_string())
        .assert()
        .success()
        .stdout(predicate::str::contains("Transcript backed up to:"));

    let backups: Vec<_> = fs::read_dir(dir.path().join("logs/transcript_backups"))
        .unwrap()
        .collect();
    assert_eq!(backups.len(), 1);
}

#[test]
fn plan_checkpoint_show_reports_missing_checkpoint() {
    let dir = TempDir::new().unwrap();
    let cache = TempDir::new().unwrap();

    adaptive_hooks()
        .current_dir(dir.path())
        .env("XDG_CACHE_HOME", cache.path())
        .args(["plan", "checkpoint", "show"])
        .assert()
        .success()
        .stdout("No checkpoint saved.\n");
}

#[test]
fn plan_checkpoint_create_outside_a_repo_exits_zero() {
    // Whether git is absent or the directory is outside any repository,
    // the hook reports it and leaves no checkpoint behind.
    let dir = TempDir::new().unwrap();
    let cache = TempDir::new().unwrap();

    adaptive_hooks()
        .current_dir(dir.path())
        .env("XDG_CACHE_HOME", cache.path())
        .args(["plan", "checkpoint", "create"])
        .assert()
        .success()
        .stdout(predicate::str::contains("skipping checkpoint"));

    assert!(!cache.path().join("claude-plans/checkpoint.json").exists());
}
