//! Synthetic process roots for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A temporary directory laid out like /proc.
pub struct FakeProc {
    pub dir: TempDir,
}

impl FakeProc {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        // Non-numeric entries real /proc always has
        fs::create_dir(dir.path().join("self")).expect("Failed to create self");
        fs::write(dir.path().join("uptime"), "350735.47 234388.90\n").expect("Failed to write uptime");
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Adds a process with both stat and status/cmdline files.
    pub fn add(&self, pid: u32, ppid: u32, comm: &str, state: &str, cmdline: &str) -> &Self {
        let stat = format!(
            "{pid} ({comm}) {state} {ppid} {pid} {pid} 0 -1 4194560 1043 0 0 0 12 7 0 0 20 0 1 0 8 172654592 3235\n"
        );
        let status = format!(
            "Name:\t{comm}\nUmask:\t0022\nState:\t{state} (whatever)\nTgid:\t{pid}\nNgid:\t0\nPid:\t{pid}\nPPid:\t{ppid}\nTracerPid:\t0\nUid:\t1000\t1000\t1000\t1000\nGid:\t100\t100\t100\t100\nFDSize:\t64\nThreads:\t1\n"
        );
        self.write(pid, "stat", stat.as_bytes());
        self.write(pid, "status", status.as_bytes());
        self.write(pid, "cmdline", cmdline.as_bytes());
        self
    }

    /// Writes a raw file under `<root>/<pid>/`.
    pub fn write(&self, pid: u32, name: &str, content: &[u8]) -> &Self {
        let dir = self.root().join(pid.to_string());
        fs::create_dir_all(&dir).expect("Failed to create pid dir");
        fs::write(dir.join(name), content).expect("Failed to write proc file");
        self
    }

    /// A pid directory with no files, as left by a process that just exited.
    pub fn add_vanished(&self, pid: u32) -> &Self {
        fs::create_dir_all(self.root().join(pid.to_string())).expect("Failed to create pid dir");
        self
    }

    /// A pid whose primary files cannot be read (directories in place of files).
    pub fn add_unreadable(&self, pid: u32) -> &Self {
        let dir = self.root().join(pid.to_string());
        fs::create_dir_all(dir.join("stat")).expect("Failed to create dir");
        fs::create_dir_all(dir.join("status")).expect("Failed to create dir");
        self
    }

    /// A small tree: systemd(1) -> sshd(812) -> sshd(2201) -> bash(2250), plus kthreadd(2).
    pub fn standard() -> Self {
        let fake = Self::new();
        fake.add(1, 0, "systemd", "S", "/sbin/init\0splash\0")
            .add(2, 0, "kthreadd", "S", "")
            .add(812, 1, "sshd", "S", "sshd: /usr/sbin/sshd -D [listener]\0")
            .add(2201, 812, "sshd", "S", "sshd: alice [priv]\0")
            .add(2250, 2201, "bash", "R", "-bash\0");
        fake
    }
}
