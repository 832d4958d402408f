//! Process discovery over the process root.
//!
//! Lists the numeric subdirectories of `/proc` (or a synthetic root used in tests)
//! as candidate pids.

use std::fs;
use std::path::Path;
use tracing::trace;

use crate::error::ProcError;

/// Scans the process root for numeric entries and returns them as pids.
///
/// Non-numeric entries (`self`, `sys`, `meminfo`, ...) and anything that is
/// not a directory are skipped silently.
/// Order follows the directory listing and is not guaranteed.
pub fn list_pids(root: &Path) -> Result<Vec<u32>, ProcError> {
    let entries = fs::read_dir(root).map_err(|e| ProcError::Enumeration {
        root: root.to_path_buf(),
        source: e,
    })?;

    let mut out = Vec::new();
    for entry in entries.flatten() {
        let file_name = entry.file_name();
        let name = match file_name.to_str() {
            Some(v) => v,
            None => continue,
        };
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_digit()) {
            continue;
        }
        let pid: u32 = match name.parse() {
            Ok(v) if v > 0 => v,
            _ => continue,
        };
        // Only pid subdirectories; a failed lookup means the entry is gone
        match entry.file_type() {
            Ok(ft) if ft.is_dir() => out.push(pid),
            _ => continue,
        }
    }

    trace!("Enumerated {} pids under {}", out.len(), root.display());
    Ok(out)
}
