//! procfind - process lookup over the Linux `/proc` filesystem
//!
//! Enumerates live processes by reading per-process metadata files and
//! answers lookups by pid, executable name, command line substring and
//! parent chain. Every query builds a fresh snapshot; nothing is cached
//! between calls.
//!
//! # Record formats
//!
//! - [`RecordFormat::Status`] (default): `/proc/<pid>/status` plus
//!   `/proc/<pid>/cmdline`; populates `cmdline`, `uid` and `gid`.
//! - [`RecordFormat::Stat`]: `/proc/<pid>/stat` only; command line queries
//!   fail with [`ProcError::UnsupportedField`].
//!
//! # Usage
//!
//! ```no_run
//! use procfind::{ProcFs, RecordFormat};
//!
//! let procfs = ProcFs::new("/proc", RecordFormat::Status);
//!
//! match procfs.find_by_name("sshd") {
//!     Ok(p) => println!("sshd is pid {} (parent {})", p.pid, p.ppid),
//!     Err(e) if e.is_not_found() => println!("sshd is not running"),
//!     Err(e) => eprintln!("lookup failed: {}", e),
//! }
//!
//! let snapshot = procfs.snapshot().unwrap();
//! for p in snapshot.ancestry_chain("sshd").unwrap_or_default() {
//!     println!("{} {}", p.pid, p.comm);
//! }
//! ```
//!
//! The free functions at the crate root use `/proc` with the default format.

pub mod error;
pub mod process;

// Re-export main types for convenience
pub use error::{ParseError, ProcError};
pub use process::index::DEFAULT_PROC_ROOT;
pub use process::{decode_state, Process, ProcFs, RecordFormat, Snapshot};

/// Pids of all live processes.
pub fn list_pids() -> Result<Vec<u32>, ProcError> {
    ProcFs::default().list_pids()
}

/// All live processes.
pub fn get_all_processes() -> Result<Vec<Process>, ProcError> {
    ProcFs::default().get_all_processes()
}

pub fn find_by_pid(pid: u32) -> Result<Process, ProcError> {
    ProcFs::default().find_by_pid(pid)
}

pub fn find_by_name(name: &str) -> Result<Process, ProcError> {
    ProcFs::default().find_by_name(name)
}

pub fn find_all_by_cmdline_contains(substr: &str) -> Result<Vec<Process>, ProcError> {
    ProcFs::default().find_all_by_cmdline_contains(substr)
}

pub fn ancestry_chain(name: &str) -> Result<Vec<Process>, ProcError> {
    ProcFs::default().ancestry_chain(name)
}

pub fn pid(name: &str) -> Result<u32, ProcError> {
    ProcFs::default().pid(name)
}

pub fn ppid(name: &str) -> Result<u32, ProcError> {
    ProcFs::default().ppid(name)
}

pub fn pgrp(name: &str) -> Result<u32, ProcError> {
    ProcFs::default().pgrp(name)
}

pub fn exists(name: &str) -> Result<bool, ProcError> {
    ProcFs::default().exists(name)
}

pub fn pid_exists(pid: u32) -> Result<bool, ProcError> {
    ProcFs::default().pid_exists(pid)
}

pub fn state(pid: u32) -> Result<Option<&'static str>, ProcError> {
    ProcFs::default().state(pid)
}
