//! Platform precondition tests.
//!
//! Unsupported hosts and missing procfs must short-circuit before any
//! per-process read.

mod common;

use common::{FakeProc, MemProcFs};
use procfind::{MatchCriteria, Resolution, Resolver};

fn procs() -> Vec<FakeProc> {
    vec![FakeProc::new(1, "init", 0, 1), FakeProc::new(2, "sh", 1, 2)]
}

#[test]
fn test_unsupported_platform_issues_no_reads() {
    let mut procfs = MemProcFs::new(procs());
    procfs.supported = false;
    let resolver = Resolver::new(procfs);

    let res = resolver.resolve(&MatchCriteria::new().name("init"));
    assert_eq!(res, Resolution::failed("OS not supported"));
    assert_eq!(resolver.procfs().reads.get(), 0);
}

#[test]
fn test_missing_procfs_issues_no_reads() {
    let mut procfs = MemProcFs::new(procs());
    procfs.root_present = false;
    let resolver = Resolver::new(procfs);

    let res = resolver.resolve(&MatchCriteria::new().path("/sbin/init"));
    assert_eq!(res, Resolution::failed("OS is missing procfs"));
    assert_eq!(resolver.procfs().reads.get(), 0);
}

#[test]
fn test_unsupported_wins_over_invalid_pattern() {
    let mut procfs = MemProcFs::new(procs());
    procfs.supported = false;
    let resolver = Resolver::new(procfs);

    let res = resolver.resolve(&MatchCriteria::new().name("("));
    assert_eq!(res, Resolution::failed("OS not supported"));
}

#[cfg(target_os = "linux")]
#[test]
fn test_host_scan_finds_own_process() {
    use procfind::HostProcFs;

    if !std::path::Path::new("/proc/self/stat").exists() {
        return;
    }

    let me = std::process::id();
    let stat = std::fs::read_to_string(format!("/proc/{}/stat", me)).unwrap();
    let name = procfind::process::parse_stat(&stat).unwrap().name;

    let resolver = Resolver::new(HostProcFs::default());
    let criteria = MatchCriteria::new().name(format!("^{}$", regex::escape(&name)));
    let hits = resolver.find_hits(&criteria).unwrap();
    assert!(hits.iter().any(|h| h.pid == me));
}
