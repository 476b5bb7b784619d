//! Report types emitted to the host, and their wire serialization.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::ecosystem::EcosystemTag;
use crate::error::Result;

/// Failure reason reported when a command's program cannot be found.
pub const TOOL_MISSING_REASON: &str = "Command not found (tool not installed)";

/// How a single validation command ended.
///
/// The three recoverable failure kinds the report must expose (missing
/// tool, timeout, launch fault) are variants here rather than bare strings,
/// so callers can branch on them without parsing reasons back out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The command ran to completion. `exit_code` is `None` when the
    /// process was terminated by a signal.
    Completed {
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
    },
    /// The program could not be located on this machine.
    ToolMissing,
    /// The command was killed after running for the full timeout.
    TimedOut { timeout_secs: u64 },
    /// Any other launch or wait fault.
    Failed { reason: String },
}

/// Result of one validation command, immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub command: String,
    pub outcome: CommandOutcome,
}

impl CommandResult {
    pub fn new(command: impl Into<String>, outcome: CommandOutcome) -> Self {
        Self {
            command: command.into(),
            outcome,
        }
    }

    pub fn success(&self) -> bool {
        matches!(
            self.outcome,
            CommandOutcome::Completed {
                exit_code: Some(0),
                ..
            }
        )
    }

    /// The failure reason string as it appears on the wire, if any.
    pub fn failure_reason(&self) -> Option<String> {
        match &self.outcome {
            CommandOutcome::Completed { .. } => None,
            CommandOutcome::ToolMissing => Some(TOOL_MISSING_REASON.to_string()),
            CommandOutcome::TimedOut { timeout_secs } => {
                Some(format!("Timeout after {timeout_secs}s"))
            }
            CommandOutcome::Failed { reason } => Some(reason.clone()),
        }
    }
}

// Wire shape expected by the host: completed commands carry
// {command, success, exit_code, output, error}; commands that never
// produced output carry {command, success, error} with the reason.
impl Serialize for CommandResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match &self.outcome {
            CommandOutcome::Completed {
                exit_code,
                stdout,
                stderr,
            } => {
                let mut state = serializer.serialize_struct("CommandResult", 5)?;
                state.serialize_field("command", &self.command)?;
                state.serialize_field("success", &self.success())?;
                state.serialize_field("exit_code", exit_code)?;
                state.serialize_field("output", stdout)?;
                state.serialize_field("error", stderr)?;
                state.end()
            }
            CommandOutcome::ToolMissing => {
                serialize_failure(serializer, &self.command, TOOL_MISSING_REASON)
            }
            CommandOutcome::TimedOut { timeout_secs } => serialize_failure(
                serializer,
                &self.command,
                &format!("Timeout after {timeout_secs}s"),
            ),
            CommandOutcome::Failed { reason } => {
                serialize_failure(serializer, &self.command, reason)
            }
        }
    }
}

fn serialize_failure<S: Serializer>(
    serializer: S,
    command: &str,
    reason: &str,
) -> std::result::Result<S::Ok, S::Error> {
    let mut state = serializer.serialize_struct("CommandResult", 3)?;
    state.serialize_field("command", command)?;
    state.serialize_field("success", &false)?;
    state.serialize_field("error", reason)?;
    state.end()
}

/// Aggregated result of one runner invocation.
///
/// `validations` preserves registry order exactly; `message` is only set
/// when no commands are configured for the tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub project_type: EcosystemTag,
    pub validations: Vec<CommandResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ValidationReport {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
