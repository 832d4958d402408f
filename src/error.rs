//! Error types for process enumeration, record reading and lookups.

use std::io;
use std::path::PathBuf;

use crate::process::RecordFormat;

/// Errors surfaced by snapshot builds and lookups.
#[derive(Debug, thiserror::Error)]
pub enum ProcError {
    /// The process root itself could not be listed (missing mount, permissions).
    #[error("Failed to list process root {}: {source}", .root.display())]
    Enumeration {
        root: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A per-process file exists but could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The process exited between enumeration and read.
    #[error("Process {pid} vanished before it could be read")]
    Vanished { pid: u32 },

    /// A lookup found no matching record.
    #[error("no process with provided name found")]
    NoProcess,

    /// The query needs a field the active record format never populates.
    #[error("Field '{field}' is not populated by the {format} record format")]
    UnsupportedField {
        field: &'static str,
        format: RecordFormat,
    },

    /// The parent chain revisited a pid or exceeded the step cap.
    #[error("Parent chain starting at pid {pid} did not terminate after {steps} steps")]
    AncestryCycle { pid: u32, steps: usize },
}

impl ProcError {
    /// True when the error only means "no such process", which callers
    /// treat as a routine outcome.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ProcError::NoProcess)
    }
}

/// Record-level parse failures. A record that fails to parse is skipped;
/// the snapshot build continues.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Invalid pid field: {raw:?}")]
    InvalidPid { raw: String },

    #[error("Record is empty")]
    Empty,
}

/// Maps a per-pid read failure to either `Vanished` or a hard `Read` error.
pub(crate) fn classify_read_error(pid: u32, path: PathBuf, err: io::Error) -> ProcError {
    let vanished =
        err.kind() == io::ErrorKind::NotFound || err.raw_os_error() == Some(libc::ESRCH);
    if vanished {
        ProcError::Vanished { pid }
    } else {
        ProcError::Read { path, source: err }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_vanished() {
        let err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let mapped = classify_read_error(42, PathBuf::from("/proc/42/status"), err);
        assert!(matches!(mapped, ProcError::Vanished { pid: 42 }));
    }

    #[test]
    fn test_esrch_maps_to_vanished() {
        let err = io::Error::from_raw_os_error(libc::ESRCH);
        let mapped = classify_read_error(7, PathBuf::from("/proc/7/cmdline"), err);
        assert!(matches!(mapped, ProcError::Vanished { pid: 7 }));
    }

    #[test]
    fn test_permission_denied_is_hard_error() {
        let err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let mapped = classify_read_error(7, PathBuf::from("/proc/7/status"), err);
        match mapped {
            ProcError::Read { path, .. } => assert_eq!(path, PathBuf::from("/proc/7/status")),
            other => panic!("expected Read error, got {:?}", other),
        }
    }

    #[test]
    fn test_is_not_found() {
        assert!(ProcError::NoProcess.is_not_found());
        assert!(!ProcError::Vanished { pid: 1 }.is_not_found());
    }
}
