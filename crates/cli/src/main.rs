use clap::Parser;
use tracing::error;

use adaptive_hooks::cli::Cli;

fn main() {
    // Initialize tracing based on RUST_LOG env var. Logs go to stderr;
    // stdout is reserved for the hook's structured reply.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let detect_mode = cli.detect;
    let structured_mode = cli.command.is_none() && !cli.detect;

    // A failing check, a missing tool, or even an internal fault must never
    // break the host's lifecycle hook chain: log it, emit a best-effort
    // reply, and still exit 0.
    if let Err(err) = cli.execute() {
        error!(error = %err, "hook finished with internal error");
        if detect_mode {
            println!("default");
        } else if structured_mode {
            println!("{}", serde_json::json!({ "project_type": "default" }));
        }
    }
}
