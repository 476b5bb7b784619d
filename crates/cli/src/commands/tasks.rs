//! Turns the saved plan into an actionable task list.

use anyhow::Result;
use serde::Serialize;

use super::plan::PlanStore;

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct PlanTask {
    pub id: usize,
    pub section: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub indent: usize,
}

/// Extract checkbox tasks from a markdown plan.
///
/// A `###` heading opens a section. Each unchecked `- [ ]` line becomes a
/// task; lines between it and the next checkbox or heading become its
/// description, and the first backtick span in the task text is surfaced
/// as a file reference.
pub fn extract_tasks(plan: &str) -> Vec<PlanTask> {
    let lines: Vec<&str> = plan.lines().collect();
    let mut tasks = Vec::new();
    let mut section: Option<String> = None;

    for (i, line) in lines.iter().enumerate() {
        if line.starts_with("###") && !line.starts_with("####") {
            section = Some(line.trim_start_matches('#').trim().to_string());
            continue;
        }

        let trimmed = line.trim_start();
        let Some(rest) = trimmed.strip_prefix("- [ ]") else {
            continue;
        };
        let indent = line.len() - trimmed.len();
        let mut text = rest.trim().to_string();

        let mut description = String::new();
        for next in &lines[i + 1..] {
            if next.trim_start().starts_with("- [") || next.starts_with("###") {
                break;
            }
            if !next.trim().is_empty() {
                description.push_str(next.trim());
                description.push('\n');
            }
        }

        if let Some(file_ref) = first_backtick_span(&text) {
            text.push_str(&format!(" (file: {file_ref})"));
        }

        let description = description.trim_end();
        tasks.push(PlanTask {
            id: tasks.len() + 1,
            section: section.clone().unwrap_or_else(|| "General".to_string()),
            text,
            description: (!description.is_empty()).then(|| description.to_string()),
            indent,
        });
    }

    tasks
}

fn first_backtick_span(text: &str) -> Option<String> {
    let start = text.find('`')?;
    let rest = &text[start + 1..];
    let end = rest.find('`')?;
    (!rest[..end].is_empty()).then(|| rest[..end].to_string())
}

pub fn tasks_command(preview: bool) -> Result<()> {
    let store = PlanStore::default_location()?;
    let Some(plan) = store.current() else {
        println!("No plan found. Save one with `adaptive-hooks plan save` first.");
        return Ok(());
    };

    let tasks = extract_tasks(&plan);
    if preview {
        println!("{} tasks found:", tasks.len());
        for task in &tasks {
            let pad = " ".repeat(task.indent);
            println!("{pad}- [{}] {}", task.id, task.text);
            if let Some(description) = &task.description {
                for line in description.lines() {
                    println!("{pad}    {line}");
                }
            }
        }
    } else {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({ "tasks": tasks }))?
        );
    }
    Ok(())
}
