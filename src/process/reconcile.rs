//! Reduction of a hit set to a single pid.

use std::fmt;
use std::str::FromStr;

use ahash::AHashSet as HashSet;
use tracing::debug;

use crate::error::ResolveError;
use crate::process::scanner::ProcessRecord;

/// Named policy for picking one pid out of several hits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// First hit in enumeration order.
    First,
    /// The single hit whose parent lies outside the hit set.
    Parent,
    /// The earliest-started hit.
    Uptime,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::First, Strategy::Parent, Strategy::Uptime];

    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::First => "first",
            Strategy::Parent => "parent",
            Strategy::Uptime => "uptime",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first" => Ok(Strategy::First),
            "parent" => Ok(Strategy::Parent),
            "uptime" => Ok(Strategy::Uptime),
            other => Err(ResolveError::UnknownStrategy(other.to_string())),
        }
    }
}

/// Reduces `hits` to one pid.
///
/// A single hit wins unconditionally, so the strategy token is only parsed
/// (and only rejected if unknown) when there is something to disambiguate.
pub fn reconcile(hits: &[ProcessRecord], strategy: Option<&str>) -> Result<u32, ResolveError> {
    match hits {
        [] => Err(ResolveError::NoMatch),
        [only] => Ok(only.pid),
        _ => {
            let token = match strategy {
                None | Some("") => return Err(ResolveError::AmbiguousNoStrategy),
                Some(t) => t,
            };
            let strategy: Strategy = token.parse()?;
            debug!("Reconciling {} hits with strategy '{}'", hits.len(), strategy);
            match strategy {
                Strategy::First => Ok(hits[0].pid),
                Strategy::Parent => reconcile_parent(hits),
                Strategy::Uptime => Ok(reconcile_uptime(hits)),
            }
        }
    }
}

/// Returns the only hit whose parent is not another hit.
///
/// Zero roots (a parent cycle, e.g. from pid reuse during the scan) and
/// multiple roots both fail.
fn reconcile_parent(hits: &[ProcessRecord]) -> Result<u32, ResolveError> {
    let pids: HashSet<u32> = hits.iter().map(|h| h.pid).collect();

    let mut roots = hits
        .iter()
        .filter(|h| h.ppid == h.pid || !pids.contains(&h.ppid));

    match (roots.next(), roots.next()) {
        (Some(root), None) => Ok(root.pid),
        (Some(_), Some(_)) => Err(ResolveError::AmbiguousAfterReconciliation),
        (None, _) => {
            debug!("No root among {} hits, parent links form a cycle", hits.len());
            Err(ResolveError::AmbiguousAfterReconciliation)
        }
    }
}

// min_by_key keeps the first of equal minima, which is the tie-break we want.
fn reconcile_uptime(hits: &[ProcessRecord]) -> u32 {
    hits.iter()
        .min_by_key(|h| h.start)
        .map(|h| h.pid)
        .unwrap_or_default()
}
