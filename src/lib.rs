//! procfind library
//!
//! Resolves a single process id on Linux from optional regex criteria on the
//! process name, executable path and working directory. When several
//! processes match, a named reconciliation strategy picks one.
//!
//! # Features
//!
//! - **Lazy enumeration**: records are read from `/proc` one at a time, in
//!   kernel listing order
//! - **Fail-closed filters**: a path or CWD filter on a process whose link
//!   cannot be read aborts the scan instead of skipping the process
//! - **Reconciliation**: `first`, `parent` (root of the hit set) and `uptime`
//!   (earliest started)
//! - **Pluggable procfs**: any [`ProcFs`] implementation, including a fake
//!   directory tree
//!
//! # Usage
//!
//! ```rust,no_run
//! use procfind::{resolve_process_id, MatchCriteria};
//!
//! let criteria = MatchCriteria::new()
//!     .name("^nginx$")
//!     .reconcile("parent");
//!
//! let res = resolve_process_id(&criteria);
//! match res.reason {
//!     None => println!("nginx master is pid {}", res.pid),
//!     Some(reason) => eprintln!("no pid: {}", reason),
//! }
//! ```

pub mod error;
pub mod label;
pub mod process;
pub mod reclaim;
pub mod resolver;

// Re-export main types for convenience
pub use error::{CriterionField, ResolveError};
pub use label::format_source;
pub use process::{HostProcFs, MatchCriteria, ProcFs, ProcLink, ProcessRecord, Strategy};
pub use resolver::{resolve_process_id, Resolution, Resolver};
