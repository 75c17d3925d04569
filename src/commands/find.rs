//! Find command implementation.
//!
//! Resolves the configured criteria to one pid and prints the result.

use procfind::{HostProcFs, Resolution, Resolver};

use crate::cli::OutputFormat;
use crate::config::Config;

/// Resolves a pid. Returns the resolution so the caller can pick the exit code.
pub fn command_find(config: &Config) -> anyhow::Result<Resolution> {
    let resolver = Resolver::new(HostProcFs::new(config.proc_root()));
    let res = resolver.resolve(&config.criteria());

    print!("{}", render_resolution(&res, config.output_format.unwrap_or(OutputFormat::Text))?);
    if let Some(reason) = &res.reason {
        if config.output_format != Some(OutputFormat::Json) {
            eprintln!("procfind: {}", reason);
        }
    }
    Ok(res)
}

/// Renders a resolution for stdout. Text mode prints only the pid, and
/// nothing at all on failure.
pub fn render_resolution(res: &Resolution, format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Json => format!("{}\n", serde_json::to_string(res)?),
        OutputFormat::Text if res.is_found() => format!("{}\n", res.pid),
        OutputFormat::Text => String::new(),
    })
}
