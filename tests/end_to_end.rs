//! Workspace-level integration tests driving the core crate end to end.

use std::fs;

use adaptive_hooks_core::{commands_for, EcosystemTag, HookSession};
use tempfile::TempDir;

#[test]
fn go_project_detection_and_command_table() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("go.mod"), "module example.com/demo").unwrap();

    let mut session = HookSession::new(dir.path().to_path_buf());
    assert_eq!(session.project_type(), EcosystemTag::Go);

    let commands: Vec<String> = commands_for(EcosystemTag::Go)
        .iter()
        .map(|command| command.display())
        .collect();
    assert_eq!(commands, ["go vet ./...", "go fmt ./..."]);
}

#[test]
fn empty_directory_report_matches_wire_contract() {
    let dir = TempDir::new().unwrap();

    let mut session = HookSession::new(dir.path().to_path_buf());
    let report = session.validate();

    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "project_type": "default",
            "validations": [],
            "message": "No validations configured for project type: default",
        })
    );
}

#[test]
fn burst_of_validations_reuses_one_report() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("Gemfile"), "source 'https://rubygems.org'").unwrap();

    let mut session = HookSession::new(dir.path().to_path_buf());
    let first = session.validate();
    let second = session.validate();

    assert_eq!(first.project_type, EcosystemTag::Ruby);
    assert_eq!(first, second);
}
