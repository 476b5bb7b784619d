use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands::{
    detect_command, hook_command, plan_command, pre_compact_command, tasks_command,
    validate_command, PlanAction,
};

/// Adaptive validation dispatcher for coding-assistant lifecycle hooks
#[derive(Parser)]
#[command(name = "adaptive-hooks")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    RUST_LOG=debug    Enable debug logging on stderr")]
pub struct Cli {
    /// Print the detected project type and exit
    #[arg(long, conflicts_with = "validate")]
    pub detect: bool,

    /// Run validations for the detected project type and print the report
    #[arg(long)]
    pub validate: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log a pre-compaction event and optionally back up the transcript
    PreCompact {
        /// Copy the transcript aside before compaction
        #[arg(long)]
        backup: bool,

        /// Print a human-readable summary
        #[arg(long)]
        verbose: bool,
    },
    /// Save, recall, and list plan-mode documents
    Plan {
        #[command(subcommand)]
        action: PlanAction,
    },
    /// Extract actionable tasks from the saved current plan
    Tasks {
        /// List the tasks instead of emitting JSON
        #[arg(long)]
        preview: bool,
    },
}

impl Cli {
    /// Execute the selected mode
    pub fn execute(self) -> Result<()> {
        match self.command {
            Some(Commands::PreCompact { backup, verbose }) => pre_compact_command(backup, verbose),
            Some(Commands::Plan { action }) => plan_command(action),
            Some(Commands::Tasks { preview }) => tasks_command(preview),
            None if self.detect => detect_command(),
            None if self.validate => validate_command(),
            None => hook_command(),
        }
    }
}
