//! Workspace test harness for adaptive-hooks.
//!
//! The real code lives in `crates/core` and `crates/cli`; this package only
//! anchors the workspace-level integration tests in `tests/`.

pub use adaptive_hooks_core as core;
