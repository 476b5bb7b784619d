//! Git checkpoints recorded alongside saved plans.
//!
//! Before a plan is executed the repository state (branch, commit, dirty
//! status) is captured to `checkpoint.json` in the plan store, so the
//! working tree can be inspected or hard-reset after the plan ran.

use std::fs;
use std::io;
use std::path::Path;
use std::process::Command;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Subcommand;
use serde::{Deserialize, Serialize};
use tracing::debug;

use adaptive_hooks_core::process::run_with_timeout;
use adaptive_hooks_core::Error;

use super::plan::plans_dir;

const CHECKPOINT_FILE: &str = "checkpoint.json";
const GIT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Subcommand, Debug)]
pub enum CheckpointAction {
    /// Record the current branch, commit, and dirty status
    Create,
    /// Hard-reset the repository to the recorded commit
    Restore,
    /// Print the recorded checkpoint
    Show,
}

#[derive(Debug, Serialize, Deserialize)]
struct Checkpoint {
    timestamp: String,
    branch: String,
    commit: String,
    has_changes: bool,
    status: String,
}

/// What a git invocation came back with. Both a missing binary and a
/// directory outside any repository are ordinary outcomes here, not errors.
enum GitOutcome {
    Output { exit_ok: bool, stdout: String },
    GitMissing,
}

fn git(dir: &Path, args: &[&str]) -> Result<GitOutcome> {
    let mut cmd = Command::new("git");
    cmd.args(args).current_dir(dir);
    match run_with_timeout(cmd, GIT_TIMEOUT) {
        Ok(output) => Ok(GitOutcome::Output {
            exit_ok: output.status.success() && !output.timed_out,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        }),
        Err(Error::IoError(err)) if err.kind() == io::ErrorKind::NotFound => {
            Ok(GitOutcome::GitMissing)
        }
        Err(err) => Err(err).with_context(|| format!("run git {}", args.join(" "))),
    }
}

fn git_stdout(dir: &Path, args: &[&str]) -> Result<String> {
    match git(dir, args)? {
        GitOutcome::Output { stdout, .. } => Ok(stdout),
        GitOutcome::GitMissing => Ok(String::new()),
    }
}

/// Capture the git state of `repo_dir` into `checkpoint_path`.
///
/// Returns `None` without writing anything when git is not installed or
/// `repo_dir` is outside a repository; the plan flow goes on either way.
fn create_checkpoint(repo_dir: &Path, checkpoint_path: &Path) -> Result<Option<Checkpoint>> {
    match git(repo_dir, &["rev-parse", "--git-dir"])? {
        GitOutcome::GitMissing => {
            println!("Git not found, skipping checkpoint.");
            return Ok(None);
        }
        GitOutcome::Output { exit_ok: false, .. } => {
            println!("Not inside a git repository, skipping checkpoint.");
            return Ok(None);
        }
        GitOutcome::Output { .. } => {}
    }

    let status = git_stdout(repo_dir, &["status", "--porcelain"])?;
    let branch = git_stdout(repo_dir, &["branch", "--show-current"])?
        .trim()
        .to_string();
    let commit = git_stdout(repo_dir, &["rev-parse", "HEAD"])?.trim().to_string();
    let has_changes = !status.trim().is_empty();

    let checkpoint = Checkpoint {
        timestamp: Local::now().to_rfc3339(),
        branch,
        commit,
        has_changes,
        status,
    };

    if let Some(parent) = checkpoint_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create checkpoint dir {}", parent.display()))?;
    }
    fs::write(checkpoint_path, serde_json::to_string_pretty(&checkpoint)?)
        .with_context(|| format!("write {}", checkpoint_path.display()))?;
    debug!(path = %checkpoint_path.display(), "checkpoint written");
    Ok(Some(checkpoint))
}

fn read_checkpoint(path: &Path) -> Option<Checkpoint> {
    let raw = fs::read_to_string(path).ok()?;
    serde_json::from_str(&raw).ok()
}

fn short(commit: &str) -> &str {
    commit.get(..8).unwrap_or(commit)
}

pub fn checkpoint_command(action: CheckpointAction) -> Result<()> {
    let checkpoint_path = plans_dir()?.join(CHECKPOINT_FILE);
    let cwd = std::env::current_dir().context("resolve working directory")?;

    match action {
        CheckpointAction::Create => {
            if let Some(checkpoint) = create_checkpoint(&cwd, &checkpoint_path)? {
                println!("Checkpoint created:");
                println!("  Branch: {}", checkpoint.branch);
                println!("  Commit: {}", short(&checkpoint.commit));
                if checkpoint.has_changes {
                    println!("  Uncommitted changes present");
                } else {
                    println!("  Working tree clean");
                }
            }
        }
        CheckpointAction::Restore => match read_checkpoint(&checkpoint_path) {
            None => println!("No checkpoint found."),
            Some(checkpoint) => {
                println!(
                    "Restoring {} @ {}",
                    checkpoint.branch,
                    short(&checkpoint.commit)
                );
                match git(&cwd, &["reset", "--hard", &checkpoint.commit])? {
                    GitOutcome::Output { exit_ok: true, .. } => println!("Restored."),
                    _ => println!("Restore failed, repository left as-is."),
                }
            }
        },
        CheckpointAction::Show => match read_checkpoint(&checkpoint_path) {
            None => println!("No checkpoint saved."),
            Some(checkpoint) => {
                let created = checkpoint
                    .timestamp
                    .get(..19)
                    .unwrap_or(&checkpoint.timestamp)
                    .replace('T', " ");
                println!("Current checkpoint:");
                println!("  Created: {created}");
                println!("  Branch: {}", checkpoint.branch);
                println!("  Commit: {}", short(&checkpoint.commit));
                println!(
                    "  Changes: {}",
                    if checkpoint.has_changes { "yes" } else { "no" }
                );
            }
        },
    }
    Ok(())
}
