//! Raw reads of per-process metadata files.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::trace;

use crate::error::{classify_read_error, ProcError};
use crate::process::RecordFormat;

/// Unparsed contents of one process's metadata files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub pid: u32,
    /// Contents of `stat` or `status`, depending on the format
    pub primary: String,
    /// Contents of `cmdline`, only read by the key-value format
    pub cmdline: Option<String>,
}

/// Reads per-process files below a process root.
#[derive(Debug, Clone)]
pub struct RecordReader {
    root: PathBuf,
    format: RecordFormat,
}

impl RecordReader {
    pub fn new(root: impl Into<PathBuf>, format: RecordFormat) -> Self {
        Self {
            root: root.into(),
            format,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn format(&self) -> RecordFormat {
        self.format
    }

    /// Reads the primary file and, for the key-value format, the command line.
    ///
    /// Returns `ProcError::Vanished` if the process exited since enumeration;
    /// any other I/O failure is a `ProcError::Read`.
    pub fn read_raw(&self, pid: u32) -> Result<RawRecord, ProcError> {
        let proc_path = self.root.join(pid.to_string());

        let primary_path = proc_path.join(self.format.primary_file());
        let bytes = fs::read(&primary_path)
            .map_err(|e| classify_read_error(pid, primary_path.clone(), e))?;
        // comm is arbitrary bytes chosen by the process
        let primary = String::from_utf8_lossy(&bytes).into_owned();

        let cmdline = if self.format.reads_cmdline() {
            let cmd_path = proc_path.join("cmdline");
            let bytes =
                fs::read(&cmd_path).map_err(|e| classify_read_error(pid, cmd_path.clone(), e))?;
            // Nul separators are kept as-is
            Some(String::from_utf8_lossy(&bytes).into_owned())
        } else {
            None
        };

        trace!("Read {} for pid {}", self.format.primary_file(), pid);
        Ok(RawRecord {
            pid,
            primary,
            cmdline,
        })
    }
}
