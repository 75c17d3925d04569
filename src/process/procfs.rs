//! Access to a procfs-style tree.
//!
//! The resolver never touches `std::fs` directly; everything goes through the
//! [`ProcFs`] trait so a fake tree can stand in for `/proc` in tests.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Default procfs mount point.
pub const DEFAULT_PROC_ROOT: &str = "/proc";

/// Symlinks read from a process directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcLink {
    Exe,
    Cwd,
}

impl ProcLink {
    pub fn file_name(self) -> &'static str {
        match self {
            ProcLink::Exe => "exe",
            ProcLink::Cwd => "cwd",
        }
    }
}

/// Read-only view of the per-process pseudo-filesystem.
pub trait ProcFs {
    /// Whether the host follows the procfs convention at all.
    fn os_supported(&self) -> bool;

    /// Whether the mount point exists.
    fn root_exists(&self) -> bool;

    /// Numeric process directories in listing order. No sort is applied.
    fn list_pids(&self) -> io::Result<Vec<u32>>;

    /// Raw content of `<root>/<pid>/stat`.
    fn read_stat(&self, pid: u32) -> io::Result<String>;

    /// Target of `<root>/<pid>/exe` or `<root>/<pid>/cwd`.
    fn read_link(&self, pid: u32, link: ProcLink) -> io::Result<PathBuf>;
}

/// [`ProcFs`] backed by the real filesystem.
#[derive(Debug, Clone)]
pub struct HostProcFs {
    root: PathBuf,
}

impl HostProcFs {
    /// Uses `root` as the procfs mount point. Any directory laid out like
    /// procfs works, which is how the integration tests build fake trees.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn pid_dir(&self, pid: u32) -> PathBuf {
        self.root.join(pid.to_string())
    }
}

impl Default for HostProcFs {
    fn default() -> Self {
        Self::new(DEFAULT_PROC_ROOT)
    }
}

impl ProcFs for HostProcFs {
    fn os_supported(&self) -> bool {
        cfg!(target_os = "linux")
    }

    fn root_exists(&self) -> bool {
        self.root.exists()
    }

    fn list_pids(&self) -> io::Result<Vec<u32>> {
        let mut out = Vec::new();
        for entry in fs::read_dir(&self.root)?.flatten() {
            let name = entry.file_name();
            let name = match name.to_str() {
                Some(v) => v,
                None => continue,
            };
            if name.is_empty() || !name.chars().all(|c| c.is_ascii_digit()) {
                continue;
            }
            if let Ok(pid) = name.parse::<u32>() {
                out.push(pid);
            }
        }
        Ok(out)
    }

    fn read_stat(&self, pid: u32) -> io::Result<String> {
        fs::read_to_string(self.pid_dir(pid).join("stat"))
    }

    fn read_link(&self, pid: u32, link: ProcLink) -> io::Result<PathBuf> {
        fs::read_link(self.pid_dir(pid).join(link.file_name()))
    }
}
