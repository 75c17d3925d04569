//! Process discovery, filtering and reconciliation.
//!
//! This module provides:
//! - `procfs`: the `ProcFs` seam and the host implementation
//! - `stat`: `/proc/<pid>/stat` parsing
//! - `scanner`: lazy enumeration into `ProcessRecord`s
//! - `filter`: regex criteria and per-record classification
//! - `reconcile`: strategies for picking one pid out of many hits

pub mod filter;
pub mod procfs;
pub mod reconcile;
pub mod scanner;
pub mod stat;

// Re-export commonly used types
pub use filter::{CompiledCriteria, MatchCriteria, Verdict};
pub use procfs::{HostProcFs, ProcFs, ProcLink, DEFAULT_PROC_ROOT};
pub use reconcile::{reconcile, Strategy};
pub use scanner::{read_process_record, scan_processes, ProcessRecord, Scan};
pub use stat::{parse_stat, StatFields, StatParseError};
