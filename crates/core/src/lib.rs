//! adaptive-hooks - adaptive validation dispatch for lifecycle hooks
//!
//! This crate provides functionality to:
//! - Detect which software ecosystem occupies a working directory
//! - Run that ecosystem's static-check commands with per-command timeouts
//! - Aggregate command outcomes into a structured report
//! - Debounce repeated invocations arriving in a short burst
pub mod debounce;
pub mod detector;
pub mod ecosystem;
pub mod error;
pub mod process;
pub mod registry;
pub mod report;
pub mod runner;
pub mod session;

// Re-export commonly used types
pub use debounce::{DebounceGate, DEBOUNCE_WINDOW};
pub use detector::{ProjectDetector, DETECTION_TTL};
pub use ecosystem::EcosystemTag;
pub use error::{Error, Result};
pub use registry::{commands_for, ValidationCommand};
pub use report::{CommandOutcome, CommandResult, ValidationReport};
pub use runner::{ValidationRunner, DEFAULT_COMMAND_TIMEOUT};
pub use session::HookSession;
