//! Child process execution with timeouts and bounded capture.

use std::io::Read;
use std::process::{Command, ExitStatus, Stdio};
use std::thread;
use std::time::Duration;

use tracing::{debug, warn};
use wait_timeout::ChildExt;

use crate::error::Result;

/// Captured output of one finished (or killed) child process.
#[derive(Debug)]
pub struct CommandOutput {
    pub status: ExitStatus,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub timed_out: bool,
}

/// Run `cmd` to completion or until `timeout`, capturing stdout and stderr.
///
/// Both pipes are drained on reader threads while the child runs, so a
/// chatty child can never deadlock on a full pipe. On timeout the child is
/// killed and reaped, and whatever output was captured up to that point is
/// returned with `timed_out` set.
pub fn run_with_timeout(mut cmd: Command, timeout: Duration) -> Result<CommandOutput> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    debug!("spawning child process");
    let mut child = cmd.spawn()?;

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();
    let stdout_handle = thread::spawn(move || drain(stdout));
    let stderr_handle = thread::spawn(move || drain(stderr));

    let mut timed_out = false;
    let status = match child.wait_timeout(timeout)? {
        Some(status) => status,
        None => {
            warn!(
                timeout_secs = timeout.as_secs(),
                "command timed out, killing"
            );
            timed_out = true;
            child.kill()?;
            child.wait()?
        }
    };

    let stdout = stdout_handle.join().unwrap_or_default();
    let stderr = stderr_handle.join().unwrap_or_default();
    debug!(exit_code = ?status.code(), timed_out, "command finished");

    Ok(CommandOutput {
        status,
        stdout,
        stderr,
        timed_out,
    })
}

fn drain<R: Read>(stream: Option<R>) -> Vec<u8> {
    let mut buf = Vec::new();
    if let Some(mut stream) = stream {
        let _ = stream.read_to_end(&mut buf);
    }
    buf
}

/// Trailing `max_chars` characters of `text`, or all of it if shorter.
///
/// The tail is kept rather than the head: the most actionable diagnostic
/// lines from a checker are usually the last ones.
pub fn tail(text: &str, max_chars: usize) -> &str {
    let extra = text.chars().count().saturating_sub(max_chars);
    if extra == 0 {
        return text;
    }
    text.char_indices()
        .nth(extra)
        .map(|(idx, _)| &text[idx..])
        .unwrap_or(text)
}
