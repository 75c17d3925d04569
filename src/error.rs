//! Failure taxonomy for process resolution.
//!
//! Every variant maps to a human readable reason that ends up in a
//! [`Resolution`](crate::resolver::Resolution) with `pid == 0`. Nothing in the
//! resolution path is surfaced to the caller as a panic or an I/O error.

use std::fmt;

/// Criterion a regex or a readability check refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CriterionField {
    Name,
    Path,
    Cwd,
}

impl fmt::Display for CriterionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CriterionField::Name => "name",
            CriterionField::Path => "path",
            CriterionField::Cwd => "CWD",
        };
        f.write_str(s)
    }
}

/// Reason a resolution produced no pid.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("OS not supported")]
    UnsupportedPlatform,

    #[error("OS is missing procfs")]
    MissingProcfs,

    /// A path or CWD filter was requested but the attribute could not be read
    /// for some process. Aborts the scan regardless of hits found so far.
    #[error("A {field} regex was specified but {field} was not readable, this may be a security issue")]
    SecurityUnreadable { field: CriterionField, pid: u32 },

    #[error("Unable to find a process")]
    NoMatch,

    #[error("Multiple processes found but no way to reconcile to one")]
    AmbiguousNoStrategy,

    #[error("Multiple processes found which are not all children")]
    AmbiguousAfterReconciliation,

    #[error("Unknown reconciliation strategy '{0}'")]
    UnknownStrategy(String),

    #[error("Invalid {field} regex '{pattern}': {source}")]
    InvalidPattern {
        field: CriterionField,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The pid listing itself failed (not a per-process read).
    #[error("Failed to list processes: {0}")]
    Listing(#[source] std::io::Error),
}

impl ResolveError {
    /// Short machine-friendly tag, used in logs and JSON output.
    pub fn kind(&self) -> &'static str {
        match self {
            ResolveError::UnsupportedPlatform => "unsupported_platform",
            ResolveError::MissingProcfs => "missing_procfs",
            ResolveError::SecurityUnreadable { .. } => "security_unreadable",
            ResolveError::NoMatch => "no_match",
            ResolveError::AmbiguousNoStrategy => "ambiguous_no_strategy",
            ResolveError::AmbiguousAfterReconciliation => "ambiguous_after_reconciliation",
            ResolveError::UnknownStrategy(_) => "unknown_strategy",
            ResolveError::InvalidPattern { .. } => "invalid_pattern",
            ResolveError::Listing(_) => "listing_failed",
        }
    }
}
