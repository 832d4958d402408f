//! Process-related modules for discovery, reading, parsing and lookup.
//!
//! This module provides:
//! - `scanner`: Pid enumeration over the process root
//! - `reader`: Raw per-process file reads, tolerant of exited processes
//! - `parser`: Delimited (`stat`) and key-value (`status`) record parsing
//! - `index`: Snapshots and lookup queries
//! - `state`: State code decoding

pub mod index;
pub mod parser;
pub mod reader;
pub mod scanner;
pub mod state;

use serde::{Deserialize, Serialize};
use std::fmt;

// Re-export commonly used types
pub use index::{ProcFs, Snapshot};
pub use parser::{parse_or_zero, parse_record};
pub use reader::{RawRecord, RecordReader};
pub use scanner::list_pids;
pub use state::decode_state;

/// On-disk record format read for every process.
///
/// Chosen when a `ProcFs` is constructed; the two formats are never mixed
/// within one snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordFormat {
    /// `/proc/<pid>/stat`: single line, space separated, `comm` in parentheses.
    Stat,
    /// `/proc/<pid>/status` (`Label:\tvalue` lines) plus `/proc/<pid>/cmdline`.
    #[default]
    Status,
}

impl RecordFormat {
    /// File name of the primary metadata file under `/proc/<pid>/`.
    pub fn primary_file(self) -> &'static str {
        match self {
            RecordFormat::Stat => "stat",
            RecordFormat::Status => "status",
        }
    }

    /// Whether this format also reads `/proc/<pid>/cmdline`.
    pub fn reads_cmdline(self) -> bool {
        matches!(self, RecordFormat::Status)
    }
}

impl fmt::Display for RecordFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.primary_file())
    }
}

/// A single process record from one snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Process {
    /// The process id
    pub pid: u32,
    /// Executable short name, without the kernel's parentheses
    pub comm: String,
    /// Raw command line, arguments separated by nul bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cmdline: Option<String>,
    /// Single-character state code, decoded on demand
    pub state: String,
    /// Parent process id, 0 for the root of the tree
    pub ppid: u32,
    /// Process group id (thread group id in the key-value format)
    pub pgrp: u32,
    /// Real user id, key-value format only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<u32>,
    /// Real group id, key-value format only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gid: Option<u32>,
}

impl Process {
    /// Human-readable label for `state`, `None` if the code is unrecognized.
    pub fn state_label(&self) -> Option<&'static str> {
        decode_state(&self.state)
    }

    /// Command line split on nul bytes, for display.
    pub fn argv(&self) -> Vec<&str> {
        match &self.cmdline {
            Some(cmd) => cmd.split('\0').filter(|s| !s.is_empty()).collect(),
            None => Vec::new(),
        }
    }
}
