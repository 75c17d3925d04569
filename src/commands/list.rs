//! List command implementation.
//!
//! Prints every process matching the configured criteria, in scan order.

use std::time::Instant;

use procfind::{HostProcFs, Resolver};

use crate::config::Config;

/// Lists matching processes without reconciling them.
pub fn command_list(verbose: bool, config: &Config) -> anyhow::Result<()> {
    let resolver = Resolver::new(HostProcFs::new(config.proc_root()));

    let start = Instant::now();
    let hits = resolver.find_hits(&config.criteria())?;
    let duration = start.elapsed();

    println!("{:>8} {:>8} {:>12}  NAME", "PID", "PPID", "START");
    for hit in &hits {
        println!("{:>8} {:>8} {:>12}  {}", hit.pid, hit.ppid, hit.start, hit.name);
        if verbose {
            println!("{:>31}exe: {}", "", or_unreadable(&hit.path));
            println!("{:>31}cwd: {}", "", or_unreadable(&hit.cwd));
        }
    }

    eprintln!(
        "{} matching process(es), scan took {:.2}ms",
        hits.len(),
        duration.as_secs_f64() * 1000.0
    );
    Ok(())
}

fn or_unreadable(value: &str) -> &str {
    if value.is_empty() {
        "<unreadable>"
    } else {
        value
    }
}
