//! Runs the registered validation commands for a resolved ecosystem tag.

use std::io;
use std::path::Path;
use std::process::Command;
use std::time::Duration;

use tracing::debug;

use crate::ecosystem::EcosystemTag;
use crate::error::Error;
use crate::process;
use crate::registry::{self, ValidationCommand};
use crate::report::{CommandOutcome, CommandResult, ValidationReport};

/// Per-command wall-clock budget.
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(30);

/// Captured output is bounded to this many trailing characters per stream.
pub const OUTPUT_TAIL_CHARS: usize = 1000;

/// Executes an ecosystem's check commands strictly in registry order.
///
/// Every per-command problem (missing tool, timeout, launch fault) is
/// recorded in the report and never stops the sequence: a broken linter
/// must not abort the whole run, and `run` itself cannot fail.
#[derive(Debug)]
pub struct ValidationRunner {
    timeout: Duration,
}

impl Default for ValidationRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationRunner {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_COMMAND_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Build the validation report for `tag`, executing inside `dir`.
    pub fn run(&self, tag: EcosystemTag, dir: &Path) -> ValidationReport {
        let commands = registry::commands_for(tag);
        if commands.is_empty() {
            debug!(%tag, "no validations configured");
            return ValidationReport {
                project_type: tag,
                validations: Vec::new(),
                message: Some(format!(
                    "No validations configured for project type: {tag}"
                )),
            };
        }
        self.run_commands(tag, commands, dir)
    }

    fn run_commands(
        &self,
        tag: EcosystemTag,
        commands: &[ValidationCommand],
        dir: &Path,
    ) -> ValidationReport {
        let mut validations = Vec::with_capacity(commands.len());
        for command in commands {
            debug!(command = %command.display(), "running validation");
            validations.push(self.run_one(command, dir));
        }
        ValidationReport {
            project_type: tag,
            validations,
            message: None,
        }
    }

    fn run_one(&self, command: &ValidationCommand, dir: &Path) -> CommandResult {
        let mut cmd = Command::new(command.program);
        cmd.args(command.args).current_dir(dir);

        let outcome = match process::run_with_timeout(cmd, self.timeout) {
            Ok(output) if output.timed_out => CommandOutcome::TimedOut {
                timeout_secs: self.timeout.as_secs(),
            },
            Ok(output) => CommandOutcome::Completed {
                exit_code: output.status.code(),
                stdout: process::tail(&String::from_utf8_lossy(&output.stdout), OUTPUT_TAIL_CHARS)
                    .to_string(),
                stderr: process::tail(&String::from_utf8_lossy(&output.stderr), OUTPUT_TAIL_CHARS)
                    .to_string(),
            },
            Err(Error::IoError(err)) if err.kind() == io::ErrorKind::NotFound => {
                CommandOutcome::ToolMissing
            }
            Err(err) => CommandOutcome::Failed {
                reason: err.to_string(),
            },
        };

        CommandResult::new(command.display(), outcome)
    }
}
