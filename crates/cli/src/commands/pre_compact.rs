//! Pre-compaction hook: event logging and transcript backup.

use std::fs;
use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

const EVENT_LOG: &str = "logs/pre_compact.json";
const BACKUP_DIR: &str = "logs/transcript_backups";

/// Event the host sends before compacting the conversation.
#[derive(Debug, Default, Deserialize)]
struct PreCompactEvent {
    #[serde(default)]
    session_id: String,
    #[serde(default)]
    transcript_path: String,
    #[serde(default)]
    trigger: String,
    #[serde(default)]
    custom_instructions: String,
}

impl PreCompactEvent {
    // "manual" or "auto"; anything else is reported as unknown.
    fn trigger_label(&self) -> &str {
        if self.trigger.is_empty() {
            "unknown"
        } else {
            &self.trigger
        }
    }
}

pub fn pre_compact_command(backup: bool, verbose: bool) -> Result<()> {
    handle_event(Path::new("."), &read_stdin(), backup, verbose)
}

fn handle_event(root: &Path, raw: &str, backup: bool, verbose: bool) -> Result<()> {
    // An event that does not parse leaves no trace: no log entry, no
    // summary, just a clean exit so compaction proceeds.
    let Ok(value) = serde_json::from_str::<Value>(raw) else {
        warn!("unparsable pre-compact event, skipping");
        return Ok(());
    };
    let event: PreCompactEvent = serde_json::from_value(value.clone()).unwrap_or_default();

    if let Err(err) = append_event_log(root, value) {
        warn!(error = %err, "could not append pre-compact event log");
    }

    let backup_path = if backup && !event.transcript_path.is_empty() {
        backup_transcript(root, Path::new(&event.transcript_path), event.trigger_label())
    } else {
        None
    };

    if verbose {
        print_summary(&event, backup_path.as_deref());
    }

    // Compaction proceeds no matter what happened above.
    Ok(())
}

fn read_stdin() -> String {
    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        return String::new();
    }
    let mut raw = String::new();
    let _ = stdin.read_to_string(&mut raw);
    raw
}

// The log is a JSON array of events; a corrupt log starts over.
fn append_event_log(root: &Path, event: Value) -> Result<()> {
    let log_path = root.join(EVENT_LOG);
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create log dir {}", parent.display()))?;
    }

    let mut events: Vec<Value> = fs::read_to_string(&log_path)
        .ok()
        .and_then(|contents| serde_json::from_str(&contents).ok())
        .unwrap_or_default();
    events.push(event);

    fs::write(&log_path, serde_json::to_string_pretty(&events)?)
        .with_context(|| format!("write {}", log_path.display()))?;
    Ok(())
}

fn backup_transcript(root: &Path, transcript: &Path, trigger: &str) -> Option<PathBuf> {
    if !transcript.exists() {
        return None;
    }
    let backup_dir = root.join(BACKUP_DIR);
    fs::create_dir_all(&backup_dir).ok()?;

    let stem = transcript.file_stem()?.to_string_lossy();
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let dest = backup_dir.join(format!("{stem}_pre_compact_{trigger}_{timestamp}.jsonl"));
    fs::copy(transcript, &dest).ok()?;
    Some(dest)
}

fn print_summary(event: &PreCompactEvent, backup_path: Option<&Path>) {
    let session = event.session_id.get(..8).unwrap_or(&event.session_id);
    match event.trigger_label() {
        "manual" => {
            println!("Preparing for manual compaction (session: {session}...)");
            if !event.custom_instructions.is_empty() {
                let head = event
                    .custom_instructions
                    .get(..100)
                    .unwrap_or(&event.custom_instructions);
                println!("Custom instructions: {head}...");
            }
        }
        _ => {
            println!("Auto-compaction triggered due to full context window (session: {session}...)");
        }
    }
    if let Some(path) = backup_path {
        println!("Transcript backed up to: {}", path.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn events_accumulate_in_the_log() {
        let root = TempDir::new().unwrap();
        append_event_log(root.path(), serde_json::json!({"trigger": "manual"})).unwrap();
        append_event_log(root.path(), serde_json::json!({"trigger": "auto"})).unwrap();

        let contents = fs::read_to_string(root.path().join(EVENT_LOG)).unwrap();
        let events: Vec<Value> = serde_json::from_str(&contents).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1]["trigger"], "auto");
    }

    #[test]
    fn corrupt_log_starts_over() {
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join("logs")).unwrap();
        fs::write(root.path().join(EVENT_LOG), "not json").unwrap();

        append_event_log(root.path(), serde_json::json!({"trigger": "auto"})).unwrap();

        let contents = fs::read_to_string(root.path().join(EVENT_LOG)).unwrap();
        let events: Vec<Value> = serde_json::from_str(&contents).unwrap();
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn malformed_event_leaves_no_log_entry() {
        let root = TempDir::new().unwrap();
        handle_event(root.path(), "garbage", true, true).unwrap();

        assert!(!root.path().join(EVENT_LOG).exists());
        assert!(!root.path().join(BACKUP_DIR).exists());
    }

    #[test]
    fn well_formed_event_is_logged() {
        let root = TempDir::new().unwrap();
        handle_event(root.path(), r#"{"trigger": "auto"}"#, false, false).unwrap();

        let contents = fs::read_to_string(root.path().join(EVENT_LOG)).unwrap();
        let events: Vec<Value> = serde_json::from_str(&contents).unwrap();
        assert_eq!(events[0]["trigger"], "auto");
    }

    #[test]
    fn backup_copies_the_transcript() {
        let root = TempDir::new().unwrap();
        let transcript = root.path().join("session.jsonl");
        fs::write(&transcript, "{\"role\":\"user\"}\n").unwrap();

        let dest = backup_transcript(root.path(), &transcript, "manual").unwrap();
        assert!(dest.exists());
        let name = dest.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("session_pre_compact_manual_"));
        assert!(name.ends_with(".jsonl"));
        assert_eq!(fs::read_to_string(dest).unwrap(), "{\"role\":\"user\"}\n");
    }

    #[test]
    fn missing_transcript_yields_no_backup() {
        let root = TempDir::new().unwrap();
        let missing = root.path().join("gone.jsonl");
        assert!(backup_transcript(root.path(), &missing, "auto").is_none());
    }
}
