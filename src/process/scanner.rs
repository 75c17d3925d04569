//! Process enumeration over a procfs tree.
//!
//! Records come out in the order the underlying directory listing returns
//! them (kernel-reported order, no total order guaranteed). Nothing here
//! sorts, since the `first` reconciliation strategy depends on that order.

use std::io;
use std::vec;

use tracing::debug;

use crate::process::procfs::{ProcFs, ProcLink};
use crate::process::stat::parse_stat;

/// Identity attributes of one live process at scan time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRecord {
    pub pid: u32,
    pub ppid: u32,
    pub name: String,
    /// Executable path, empty if unreadable.
    pub path: String,
    /// Working directory, empty if unreadable.
    pub cwd: String,
    /// Start time in clock ticks since boot. Only meaningful relative to
    /// other records of the same host.
    pub start: u64,
}

/// Reads a symlink, mapping any failure (permission denied, process gone,
/// not a link) to the empty string.
pub fn read_link_or_empty<F: ProcFs + ?Sized>(procfs: &F, pid: u32, link: ProcLink) -> String {
    match procfs.read_link(pid, link) {
        Ok(target) => target.to_string_lossy().into_owned(),
        Err(e) => {
            debug!("pid {}: {} unreadable: {}", pid, link.file_name(), e);
            String::new()
        }
    }
}

/// Builds the record for `pid`.
///
/// Returns `None` when the stat file cannot be read or parsed, which happens
/// when the process exits between listing and reading. Such processes are
/// skipped rather than failing the scan.
pub fn read_process_record<F: ProcFs + ?Sized>(procfs: &F, pid: u32) -> Option<ProcessRecord> {
    let line = match procfs.read_stat(pid) {
        Ok(s) => s,
        Err(e) => {
            debug!("pid {}: stat unreadable, skipping: {}", pid, e);
            return None;
        }
    };
    let stat = match parse_stat(&line) {
        Ok(f) => f,
        Err(e) => {
            debug!("pid {}: malformed stat, skipping: {}", pid, e);
            return None;
        }
    };

    Some(ProcessRecord {
        pid,
        ppid: stat.ppid,
        name: stat.name,
        path: read_link_or_empty(procfs, pid, ProcLink::Exe),
        cwd: read_link_or_empty(procfs, pid, ProcLink::Cwd),
        start: stat.start,
    })
}

/// Lazy iterator over the records of one scan.
///
/// Each record is read only when requested, so a consumer that stops early
/// issues no further reads.
pub struct Scan<'a, F: ProcFs + ?Sized> {
    procfs: &'a F,
    pids: vec::IntoIter<u32>,
    skipped: usize,
}

impl<'a, F: ProcFs + ?Sized> Scan<'a, F> {
    /// Number of listed pids dropped so far because they vanished mid-scan.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl<F: ProcFs + ?Sized> Iterator for Scan<'_, F> {
    type Item = ProcessRecord;

    fn next(&mut self) -> Option<Self::Item> {
        for pid in self.pids.by_ref() {
            match read_process_record(self.procfs, pid) {
                Some(rec) => return Some(rec),
                None => self.skipped += 1,
            }
        }
        None
    }
}

/// Lists pids and returns a lazy record iterator over them.
pub fn scan_processes<F: ProcFs + ?Sized>(procfs: &F) -> io::Result<Scan<'_, F>> {
    let pids = procfs.list_pids()?;
    debug!("Listed {} process entries", pids.len());
    Ok(Scan {
        procfs,
        pids: pids.into_iter(),
        skipped: 0,
    })
}
