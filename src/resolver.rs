//! The resolution pipeline: enumerate, filter, reconcile.
//!
//! One call is one point-in-time scan. Nothing is cached between calls.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ResolveError;
use crate::process::{reconcile, scan_processes, HostProcFs, MatchCriteria, ProcFs, ProcessRecord};

/// Result of a resolution. `pid == 0` always carries a reason, a non-zero
/// pid never does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub pid: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Resolution {
    pub fn found(pid: u32) -> Self {
        Self { pid, reason: None }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            pid: 0,
            reason: Some(reason.into()),
        }
    }

    pub fn is_found(&self) -> bool {
        self.pid != 0
    }
}

impl From<Result<u32, ResolveError>> for Resolution {
    fn from(res: Result<u32, ResolveError>) -> Self {
        match res {
            Ok(pid) => Resolution::found(pid),
            Err(e) => Resolution::failed(e.to_string()),
        }
    }
}

/// Runs resolutions against a [`ProcFs`].
#[derive(Debug, Clone, Default)]
pub struct Resolver<F: ProcFs = HostProcFs> {
    procfs: F,
}

impl<F: ProcFs> Resolver<F> {
    pub fn new(procfs: F) -> Self {
        Self { procfs }
    }

    pub fn procfs(&self) -> &F {
        &self.procfs
    }

    /// Resolves `criteria` to a single pid, always returning a [`Resolution`].
    pub fn resolve(&self, criteria: &MatchCriteria) -> Resolution {
        self.try_resolve(criteria).into()
    }

    /// Resolves `criteria` to a single pid.
    pub fn try_resolve(&self, criteria: &MatchCriteria) -> Result<u32, ResolveError> {
        let hits = self.find_hits(criteria)?;
        let res = reconcile(&hits, criteria.reconcile.as_deref());
        match &res {
            Ok(pid) => info!("Resolved pid {} from {} hit(s)", pid, hits.len()),
            Err(e) => info!("Resolution failed ({}): {}", e.kind(), e),
        }
        res
    }

    /// Returns every record matching `criteria`, in enumeration order,
    /// without reconciling.
    ///
    /// Platform checks run first and issue no per-process reads. Patterns are
    /// compiled once before the scan starts.
    pub fn find_hits(&self, criteria: &MatchCriteria) -> Result<Vec<ProcessRecord>, ResolveError> {
        self.check_platform()?;

        let compiled = criteria.compile()?;
        let mut scan = scan_processes(&self.procfs).map_err(ResolveError::Listing)?;
        let hits = compiled.collect_hits(scan.by_ref());

        if scan.skipped() > 0 {
            debug!("Skipped {} process(es) that vanished mid-scan", scan.skipped());
        }
        hits
    }

    fn check_platform(&self) -> Result<(), ResolveError> {
        if !self.procfs.os_supported() {
            return Err(ResolveError::UnsupportedPlatform);
        }
        if !self.procfs.root_exists() {
            return Err(ResolveError::MissingProcfs);
        }
        Ok(())
    }
}

/// Resolves `criteria` against the host's `/proc`.
pub fn resolve_process_id(criteria: &MatchCriteria) -> Resolution {
    Resolver::new(HostProcFs::default()).resolve(criteria)
}
