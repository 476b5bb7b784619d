//! Plan persistence: save, recall, and list plan-mode documents.

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use chrono::Local;
use clap::Subcommand;
use serde::{Deserialize, Serialize};

use super::checkpoint::{checkpoint_command, CheckpointAction};

#[derive(Subcommand, Debug)]
pub enum PlanAction {
    /// Save a plan read from stdin
    Save {
        /// Plan title recorded in the index
        #[arg(long)]
        title: Option<String>,

        /// Project the plan belongs to
        #[arg(long)]
        project: Option<String>,
    },
    /// Print the most recent plan
    Load,
    /// List saved plans
    List,
    /// Remove the current plan
    Clear,
    /// Record, restore, or show the git state tied to the plan
    Checkpoint {
        #[command(subcommand)]
        action: CheckpointAction,
    },
}

/// Only the newest plans are kept in the index.
const MAX_PLANS: usize = 20;

#[derive(Debug, Default, Serialize, Deserialize)]
struct PlanIndex {
    plans: Vec<PlanEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
struct PlanEntry {
    id: String,
    file: PathBuf,
    created_at: String,
    #[serde(default)]
    metadata: PlanMetadata,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PlanMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
}

/// Directory holding plan files and their git checkpoints.
pub(crate) fn plans_dir() -> Result<PathBuf> {
    let cache = dirs::cache_dir().ok_or_else(|| anyhow!("no user cache directory"))?;
    Ok(cache.join("claude-plans"))
}

/// Plan store rooted at a directory (the user cache dir in production):
/// `current_plan.md`, `index.json`, and one `plan_{id}.md` per save.
pub struct PlanStore {
    root: PathBuf,
}

impl PlanStore {
    pub fn at(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn default_location() -> Result<Self> {
        Ok(Self::at(plans_dir()?))
    }

    fn index_path(&self) -> PathBuf {
        self.root.join("index.json")
    }

    fn current_path(&self) -> PathBuf {
        self.root.join("current_plan.md")
    }

    fn ensure_root(&self) -> Result<()> {
        fs::create_dir_all(&self.root)
            .with_context(|| format!("create plan dir {}", self.root.display()))?;
        Ok(())
    }

    // A corrupt or missing index starts over empty rather than failing.
    fn read_index(&self) -> PlanIndex {
        fs::read_to_string(self.index_path())
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    /// Save `content` as the current plan. Returns the plan file path.
    pub fn save(&self, content: &str, metadata: PlanMetadata) -> Result<PathBuf> {
        let now = Local::now();
        self.save_with_id(
            &now.format("%Y%m%d_%H%M%S").to_string(),
            &now.to_rfc3339(),
            content,
            metadata,
        )
    }

    fn save_with_id(
        &self,
        id: &str,
        created_at: &str,
        content: &str,
        metadata: PlanMetadata,
    ) -> Result<PathBuf> {
        self.ensure_root()?;

        let file = self.root.join(format!("plan_{id}.md"));
        fs::write(&file, content).with_context(|| format!("write plan {}", file.display()))?;

        let mut index = self.read_index();
        index.plans.insert(
            0,
            PlanEntry {
                id: id.to_string(),
                file: file.clone(),
                created_at: created_at.to_string(),
                metadata,
            },
        );
        index.plans.truncate(MAX_PLANS);
        fs::write(self.index_path(), serde_json::to_string_pretty(&index)?)
            .context("write plan index")?;

        fs::write(self.current_path(), content).context("write current plan")?;
        Ok(file)
    }

    /// Current plan content, falling back to the newest index entry.
    pub fn current(&self) -> Option<String> {
        if let Ok(content) = fs::read_to_string(self.current_path()) {
            return Some(content);
        }
        let index = self.read_index();
        let latest = index.plans.first()?;
        fs::read_to_string(&latest.file).ok()
    }

    pub fn clear(&self) -> Result<()> {
        let current = self.current_path();
        if current.exists() {
            fs::remove_file(&current)
                .with_context(|| format!("remove {}", current.display()))?;
        }
        Ok(())
    }

    fn list(&self) -> Vec<String> {
        let index = self.read_index();
        index
            .plans
            .iter()
            .map(|entry| {
                let title = entry
                    .metadata
                    .title
                    .clone()
                    .unwrap_or_else(|| format!("Plan #{}", entry.id));
                let created = entry
                    .created_at
                    .get(..19)
                    .unwrap_or(&entry.created_at)
                    .replace('T', " ");
                format!("{title}\n    Created: {created}\n    ID: {}", entry.id)
            })
            .collect()
    }
}

pub fn plan_command(action: PlanAction) -> Result<()> {
    let store = PlanStore::default_location()?;
    match action {
        PlanAction::Save { title, project } => {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .context("read plan from stdin")?;
            let file = store.save(&content, PlanMetadata { title, project })?;
            println!("Plan saved: {}", file.display());
        }
        PlanAction::Load => match store.current() {
            Some(content) => print!("{content}"),
            None => println!("No plan saved."),
        },
        PlanAction::List => {
            let entries = store.list();
            if entries.is_empty() {
                println!("No plans saved.");
            } else {
                println!("Saved plans ({}):", entries.len());
                for entry in entries {
                    println!("  {entry}");
                }
            }
        }
        PlanAction::Clear => {
            store.clear()?;
            println!("Current plan cleared.");
        }
        PlanAction::Checkpoint { action } => checkpoint_command(action)?,
    }
    Ok(())
}
