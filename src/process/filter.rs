//! Regex criteria and per-record classification.
//!
//! Criteria are applied in a fixed order: name, path, cwd. A path or cwd
//! criterion on a record whose attribute could not be read aborts the whole
//! scan; an unreadable attribute must never silently exclude a process the
//! caller explicitly asked to filter on.

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{CriterionField, ResolveError};
use crate::process::scanner::ProcessRecord;

/// Caller-supplied match criteria. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchCriteria {
    /// Regex for the short process name
    #[serde(default, alias = "processName")]
    pub process_name: Option<String>,
    /// Regex for the resolved executable path
    #[serde(default, alias = "processPath")]
    pub process_path: Option<String>,
    /// Regex for the resolved working directory
    #[serde(default, alias = "processCwd")]
    pub process_cwd: Option<String>,
    /// Reconciliation strategy token: first, parent or uptime
    #[serde(default)]
    pub reconcile: Option<String>,
}

impl MatchCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, pattern: impl Into<String>) -> Self {
        self.process_name = Some(pattern.into());
        self
    }

    pub fn path(mut self, pattern: impl Into<String>) -> Self {
        self.process_path = Some(pattern.into());
        self
    }

    pub fn cwd(mut self, pattern: impl Into<String>) -> Self {
        self.process_cwd = Some(pattern.into());
        self
    }

    pub fn reconcile(mut self, strategy: impl Into<String>) -> Self {
        self.reconcile = Some(strategy.into());
        self
    }

    /// Compiles each pattern once. A malformed pattern fails here, before any
    /// process is looked at.
    pub fn compile(&self) -> Result<CompiledCriteria, ResolveError> {
        Ok(CompiledCriteria {
            name: compile_pattern(CriterionField::Name, self.process_name.as_deref())?,
            path: compile_pattern(CriterionField::Path, self.process_path.as_deref())?,
            cwd: compile_pattern(CriterionField::Cwd, self.process_cwd.as_deref())?,
        })
    }
}

// An empty pattern counts as unset, the same as an absent one.
fn compile_pattern(
    field: CriterionField,
    pattern: Option<&str>,
) -> Result<Option<Regex>, ResolveError> {
    match pattern {
        None | Some("") => Ok(None),
        Some(p) => Regex::new(p)
            .map(Some)
            .map_err(|source| ResolveError::InvalidPattern {
                field,
                pattern: p.to_string(),
                source,
            }),
    }
}

/// Outcome for a single record that did not abort the scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Hit,
    Rejected(CriterionField),
}

/// Criteria with their regexes built.
#[derive(Debug, Clone, Default)]
pub struct CompiledCriteria {
    name: Option<Regex>,
    path: Option<Regex>,
    cwd: Option<Regex>,
}

impl CompiledCriteria {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.path.is_none() && self.cwd.is_none()
    }

    /// Classifies one record. `Err` means the scan must stop.
    pub fn classify(&self, rec: &ProcessRecord) -> Result<Verdict, ResolveError> {
        if let Some(re) = &self.name {
            if !re.is_match(&rec.name) {
                return Ok(Verdict::Rejected(CriterionField::Name));
            }
        }
        if let Some(re) = &self.path {
            if !guarded_match(re, &rec.path, CriterionField::Path, rec.pid)? {
                return Ok(Verdict::Rejected(CriterionField::Path));
            }
        }
        if let Some(re) = &self.cwd {
            if !guarded_match(re, &rec.cwd, CriterionField::Cwd, rec.pid)? {
                return Ok(Verdict::Rejected(CriterionField::Cwd));
            }
        }
        Ok(Verdict::Hit)
    }

    /// Runs every record through [`classify`](Self::classify) and collects the
    /// hits in input order. Stops pulling records at the first abort.
    pub fn collect_hits<I>(&self, records: I) -> Result<Vec<ProcessRecord>, ResolveError>
    where
        I: IntoIterator<Item = ProcessRecord>,
    {
        let mut hits = Vec::new();
        for rec in records {
            match self.classify(&rec)? {
                Verdict::Hit => {
                    debug!("Hit: pid {} ({})", rec.pid, rec.name);
                    hits.push(rec);
                }
                Verdict::Rejected(field) => {
                    debug!("Rejected pid {} ({}) on {}", rec.pid, rec.name, field);
                }
            }
        }
        Ok(hits)
    }
}

fn guarded_match(
    re: &Regex,
    value: &str,
    field: CriterionField,
    pid: u32,
) -> Result<bool, ResolveError> {
    if value.is_empty() {
        warn!(
            "pid {}: {} filter requested but {} unreadable, aborting scan",
            pid, field, field
        );
        return Err(ResolveError::SecurityUnreadable { field, pid });
    }
    Ok(re.is_match(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(pid: u32, name: &str, path: &str, cwd: &str) -> ProcessRecord {
        ProcessRecord {
            pid,
            ppid: 1,
            name: name.into(),
            path: path.into(),
            cwd: cwd.into(),
            start: pid as u64,
        }
    }

    #[test]
    fn test_no_criteria_accepts_everything() {
        let c = MatchCriteria::new().compile().unwrap();
        assert!(c.is_empty());
        assert_eq!(c.classify(&rec(1, "x", "", "")).unwrap(), Verdict::Hit);
    }

    #[test]
    fn test_name_is_unanchored_regex() {
        let c = MatchCriteria::new().name("^node").compile().unwrap();
        assert_eq!(c.classify(&rec(1, "node", "", "")).unwrap(), Verdict::Hit);
        assert_eq!(
            c.classify(&rec(2, "nodejs", "", "")).unwrap(),
            Verdict::Hit
        );
        assert_eq!(
            c.classify(&rec(3, "xnode", "", "")).unwrap(),
            Verdict::Rejected(CriterionField::Name)
        );
    }

    #[test]
    fn test_name_reject_happens_before_path_check() {
        // Unreadable path on a name-rejected record must not abort.
        let c = MatchCriteria::new().name("^sshd$").path("/usr/sbin").compile().unwrap();
        assert_eq!(
            c.classify(&rec(1, "kthreadd", "", "")).unwrap(),
            Verdict::Rejected(CriterionField::Name)
        );
    }

    #[test]
    fn test_unreadable_path_aborts() {
        let c = MatchCriteria::new().path("bin").compile().unwrap();
        let err = c.classify(&rec(9, "x", "", "/")).unwrap_err();
        assert!(matches!(
            err,
            ResolveError::SecurityUnreadable {
                field: CriterionField::Path,
                pid: 9
            }
        ));
    }

    #[test]
    fn test_unreadable_cwd_aborts() {
        let c = MatchCriteria::new().cwd("^/srv").compile().unwrap();
        let err = c.classify(&rec(9, "x", "/bin/x", "")).unwrap_err();
        assert!(matches!(
            err,
            ResolveError::SecurityUnreadable {
                field: CriterionField::Cwd,
                ..
            }
        ));
    }

    #[test]
    fn test_mismatched_path_and_cwd_reject() {
        let c = MatchCriteria::new().path("^/opt/").cwd("^/srv").compile().unwrap();
        assert_eq!(
            c.classify(&rec(1, "x", "/usr/bin/x", "/srv")).unwrap(),
            Verdict::Rejected(CriterionField::Path)
        );
        assert_eq!(
            c.classify(&rec(2, "x", "/opt/x", "/home")).unwrap(),
            Verdict::Rejected(CriterionField::Cwd)
        );
        assert_eq!(
            c.classify(&rec(3, "x", "/opt/x", "/srv/app")).unwrap(),
            Verdict::Hit
        );
    }

    #[test]
    fn test_abort_discards_earlier_hits() {
        let c = MatchCriteria::new().path("x").compile().unwrap();
        let records = vec![rec(1, "a", "/x", "/"), rec(2, "b", "", "/"), rec(3, "c", "/x", "/")];
        assert!(matches!(
            c.collect_hits(records),
            Err(ResolveError::SecurityUnreadable { pid: 2, .. })
        ));
    }

    #[test]
    fn test_collect_hits_stops_pulling_after_abort() {
        let c = MatchCriteria::new().path("x").compile().unwrap();
        let mut pulled = 0;
        let records = vec![rec(1, "a", "", "/"), rec(2, "b", "/x", "/")]
            .into_iter()
            .inspect(|_| pulled += 1);
        assert!(c.collect_hits(records).is_err());
        assert_eq!(pulled, 1);
    }

    #[test]
    fn test_invalid_pattern_is_construction_error() {
        let err = MatchCriteria::new().cwd("([a-z]").compile().unwrap_err();
        match err {
            ResolveError::InvalidPattern { field, pattern, .. } => {
                assert_eq!(field, CriterionField::Cwd);
                assert_eq!(pattern, "([a-z]");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_criteria_accepts_camel_case_keys() {
        let c: MatchCriteria =
            serde_json::from_str(r#"{"processName":"^nginx$","processCwd":"/srv","reconcile":"parent"}"#)
                .unwrap();
        assert_eq!(c.process_name.as_deref(), Some("^nginx$"));
        assert_eq!(c.process_path, None);
        assert_eq!(c.process_cwd.as_deref(), Some("/srv"));
        assert_eq!(c.reconcile.as_deref(), Some("parent"));
    }
}
