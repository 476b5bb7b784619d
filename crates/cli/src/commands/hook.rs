//! Entry-point modes: `--detect`, `--validate`, and the stdin hook mode.

use std::io::{IsTerminal, Read};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::warn;

use adaptive_hooks_core::HookSession;

/// Fields the host may pass on stdin. Anything missing defaults off.
#[derive(Debug, Default, Deserialize)]
struct HookRequest {
    #[serde(default)]
    run_validations: bool,
}

fn session() -> Result<HookSession> {
    let cwd = std::env::current_dir().context("resolve working directory")?;
    Ok(HookSession::new(cwd))
}

pub fn detect_command() -> Result<()> {
    let mut session = session()?;
    println!("{}", session.project_type());
    Ok(())
}

pub fn validate_command() -> Result<()> {
    let mut session = session()?;
    let report = session.validate();
    println!("{}", report.to_json_pretty()?);
    Ok(())
}

/// Hook mode: read the request from stdin, reply with JSON on stdout.
pub fn hook_command() -> Result<()> {
    let request = read_request();
    let mut session = session()?;

    if request.run_validations {
        let report = session.validate();
        println!("{}", report.to_json()?);
    } else {
        let tag = session.project_type();
        println!("{}", serde_json::json!({ "project_type": tag }));
    }
    Ok(())
}

// Absent, empty, or malformed input is an empty request, never an error.
fn read_request() -> HookRequest {
    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        return HookRequest::default();
    }

    let mut raw = String::new();
    if stdin.read_to_string(&mut raw).is_err() {
        return HookRequest::default();
    }

    match serde_json::from_str(&raw) {
        Ok(request) => request,
        Err(err) => {
            warn!(error = %err, "unparsable hook input, treating as empty request");
            HookRequest::default()
        }
    }
}
