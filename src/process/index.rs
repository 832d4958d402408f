//! Process snapshots and lookup queries.
//!
//! A [`Snapshot`] is built by enumerating the process root, reading and
//! parsing every pid, and collecting the records in listing order. It is
//! never updated afterwards. Every query on [`ProcFs`] builds a new one, so
//! two calls may observe different system states.

use ahash::AHashSet as HashSet;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, warn};

use crate::error::ProcError;
use crate::process::parser::parse_record;
use crate::process::reader::RecordReader;
use crate::process::scanner::list_pids;
use crate::process::state::decode_state;
use crate::process::{Process, RecordFormat};

/// Default process root on Linux.
pub const DEFAULT_PROC_ROOT: &str = "/proc";

/// Handle on a process root read with one record format.
#[derive(Debug, Clone)]
pub struct ProcFs {
    root: PathBuf,
    format: RecordFormat,
    max_ancestry_depth: Option<usize>,
}

impl Default for ProcFs {
    fn default() -> Self {
        Self::new(DEFAULT_PROC_ROOT, RecordFormat::default())
    }
}

impl ProcFs {
    pub fn new(root: impl Into<PathBuf>, format: RecordFormat) -> Self {
        Self {
            root: root.into(),
            format,
            max_ancestry_depth: None,
        }
    }

    /// Caps the number of records an ancestry chain may contain.
    /// The snapshot size is always an upper bound as well.
    pub fn with_max_ancestry_depth(mut self, depth: usize) -> Self {
        self.max_ancestry_depth = Some(depth);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn format(&self) -> RecordFormat {
        self.format
    }

    /// Lists candidate pids under the process root.
    pub fn list_pids(&self) -> Result<Vec<u32>, ProcError> {
        list_pids(&self.root)
    }

    /// Builds a fresh snapshot.
    ///
    /// Pids that vanish between enumeration and read are skipped, as are
    /// records that fail to parse. Any other read failure aborts the build.
    pub fn snapshot(&self) -> Result<Snapshot, ProcError> {
        let start = Instant::now();
        let pids = self.list_pids()?;
        let reader = RecordReader::new(&self.root, self.format);

        let mut processes = Vec::with_capacity(pids.len());
        let mut vanished = 0usize;
        let mut invalid = 0usize;

        for pid in pids {
            let raw = match reader.read_raw(pid) {
                Ok(raw) => raw,
                Err(ProcError::Vanished { pid }) => {
                    debug!("Process {} exited before it could be read, skipping", pid);
                    vanished += 1;
                    continue;
                }
                Err(e) => return Err(e),
            };

            match parse_record(self.format, &raw) {
                Ok(p) => processes.push(p),
                Err(e) => {
                    warn!("Skipping unparsable {} record for pid {}: {}", self.format, pid, e);
                    invalid += 1;
                }
            }
        }

        debug!(
            "Snapshot of {} built in {:.2?}: {} processes ({} vanished, {} invalid, format={})",
            self.root.display(),
            start.elapsed(),
            processes.len(),
            vanished,
            invalid,
            self.format
        );

        Ok(Snapshot {
            format: self.format,
            processes,
            max_ancestry_depth: self.max_ancestry_depth,
        })
    }

    /// All processes of a fresh snapshot, in listing order.
    pub fn get_all_processes(&self) -> Result<Vec<Process>, ProcError> {
        Ok(self.snapshot()?.into_processes())
    }

    pub fn find_by_pid(&self, pid: u32) -> Result<Process, ProcError> {
        self.snapshot()?.find_by_pid(pid).cloned()
    }

    pub fn find_by_name(&self, name: &str) -> Result<Process, ProcError> {
        self.snapshot()?.find_by_name(name).cloned()
    }

    pub fn find_all_by_cmdline_contains(&self, substr: &str) -> Result<Vec<Process>, ProcError> {
        let snapshot = self.snapshot()?;
        let found = snapshot.find_all_by_cmdline_contains(substr)?;
        Ok(found.into_iter().cloned().collect())
    }

    pub fn ancestry_chain(&self, name: &str) -> Result<Vec<Process>, ProcError> {
        let snapshot = self.snapshot()?;
        let chain = snapshot.ancestry_chain(name)?;
        Ok(chain.into_iter().cloned().collect())
    }

    /// Pid of the first process named `name`.
    pub fn pid(&self, name: &str) -> Result<u32, ProcError> {
        Ok(self.find_by_name(name)?.pid)
    }

    /// Parent pid of the first process named `name`.
    pub fn ppid(&self, name: &str) -> Result<u32, ProcError> {
        Ok(self.find_by_name(name)?.ppid)
    }

    /// Process group id of the first process named `name`.
    pub fn pgrp(&self, name: &str) -> Result<u32, ProcError> {
        Ok(self.find_by_name(name)?.pgrp)
    }

    /// `Ok(false)` when no process is named `name`; other failures propagate.
    pub fn exists(&self, name: &str) -> Result<bool, ProcError> {
        found(self.find_by_name(name))
    }

    /// `Ok(false)` when `pid` is not in the snapshot; other failures propagate.
    pub fn pid_exists(&self, pid: u32) -> Result<bool, ProcError> {
        found(self.find_by_pid(pid))
    }

    /// Decoded state label of `pid`; `None` if the state code is unrecognized.
    pub fn state(&self, pid: u32) -> Result<Option<&'static str>, ProcError> {
        let p = self.find_by_pid(pid)?;
        Ok(decode_state(&p.state))
    }
}

fn found(result: Result<Process, ProcError>) -> Result<bool, ProcError> {
    match result {
        Ok(_) => Ok(true),
        Err(ProcError::NoProcess) => Ok(false),
        Err(e) => Err(e),
    }
}

/// One point-in-time, ordered collection of process records.
#[derive(Debug, Clone)]
pub struct Snapshot {
    format: RecordFormat,
    processes: Vec<Process>,
    max_ancestry_depth: Option<usize>,
}

impl Snapshot {
    /// Wraps already-parsed records, e.g. for replaying a captured listing.
    pub fn from_processes(format: RecordFormat, processes: Vec<Process>) -> Self {
        Self {
            format,
            processes,
            max_ancestry_depth: None,
        }
    }

    pub fn with_max_ancestry_depth(mut self, depth: usize) -> Self {
        self.max_ancestry_depth = Some(depth);
        self
    }

    pub fn format(&self) -> RecordFormat {
        self.format
    }

    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    pub fn into_processes(self) -> Vec<Process> {
        self.processes
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// First record with the given pid.
    pub fn find_by_pid(&self, pid: u32) -> Result<&Process, ProcError> {
        self.processes
            .iter()
            .find(|p| p.pid == pid)
            .ok_or(ProcError::NoProcess)
    }

    /// First record, in snapshot order, whose `comm` equals `name`.
    pub fn find_by_name(&self, name: &str) -> Result<&Process, ProcError> {
        self.processes
            .iter()
            .find(|p| p.comm == name)
            .ok_or(ProcError::NoProcess)
    }

    /// Every record whose command line contains `substr`.
    ///
    /// Fails with `UnsupportedField` for formats that never read the command line.
    pub fn find_all_by_cmdline_contains(&self, substr: &str) -> Result<Vec<&Process>, ProcError> {
        if !self.format.reads_cmdline() {
            return Err(ProcError::UnsupportedField {
                field: "cmdline",
                format: self.format,
            });
        }

        Ok(self
            .processes
            .iter()
            .filter(|p| p.cmdline.as_deref().is_some_and(|c| c.contains(substr)))
            .collect())
    }

    /// Direct children of `pid`.
    pub fn children(&self, pid: u32) -> Vec<&Process> {
        self.processes.iter().filter(|p| p.ppid == pid && p.pid != pid).collect()
    }

    /// Parent chain of the first process named `name`, root first.
    ///
    /// Walks ppid links until a parent is missing from the snapshot or a
    /// record is its own parent. Revisiting a pid, or growing past the depth
    /// cap (at most the snapshot size), is `ProcError::AncestryCycle`.
    pub fn ancestry_chain(&self, name: &str) -> Result<Vec<&Process>, ProcError> {
        let start = self.find_by_name(name)?;
        let cap = self
            .max_ancestry_depth
            .map_or(self.processes.len(), |d| d.min(self.processes.len()));

        let mut chain = vec![start];
        let mut seen = HashSet::new();
        seen.insert(start.pid);

        let mut current = start;
        while current.ppid != current.pid {
            let parent = match self.find_by_pid(current.ppid) {
                Ok(p) => p,
                Err(_) => break,
            };
            if !seen.insert(parent.pid) || chain.len() >= cap {
                return Err(ProcError::AncestryCycle {
                    pid: start.pid,
                    steps: chain.len(),
                });
            }
            chain.push(parent);
            current = parent;
        }

        chain.reverse();
        Ok(chain)
    }
}
