//! adaptive-hooks binary crate: argument parsing and hook command
//! implementations on top of `adaptive-hooks-core`.
pub mod cli;
pub mod commands;

// Re-export commonly used items
pub use cli::{Cli, Commands};
