//! CLI command implementations for procfind.
//!
//! This module provides implementations for all CLI subcommands:
//! - `lookup`: pids, ps, pid, name, grep, tree, state, exists
//! - `check`: Process root and configuration validation
//! - `config`: Effective configuration output

pub mod check;
pub mod config;
pub mod lookup;

// Re-export command functions
pub use check::command_check;
pub use config::command_config;
pub use lookup::{
    command_exists, command_grep, command_name, command_pid, command_pids, command_ps,
    command_state, command_tree,
};
