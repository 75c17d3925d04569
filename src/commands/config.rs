//! Config command implementation.
//!
//! Generates configuration files in various formats.

use anyhow::Context;
use std::fs;
use std::path::PathBuf;

use crate::cli::ConfigFormat;
use crate::config::{render_config, Config};

/// Generates configuration files.
pub fn command_config(
    output: Option<PathBuf>,
    format: ConfigFormat,
    commented: bool,
) -> anyhow::Result<()> {
    let config = Config::default();
    let output = output.unwrap_or_else(|| PathBuf::from("procfind.yaml"));

    let mut content = render_config(&config, &format)?;
    if commented && matches!(format, ConfigFormat::Yaml) {
        content = add_config_comments(content);
    }

    if output.to_string_lossy() == "-" {
        print!("{}", content);
    } else {
        fs::write(&output, content)
            .with_context(|| format!("Failed to write {}", output.display()))?;
        println!("✅ Configuration written to: {}", output.display());
    }

    Ok(())
}

/// Adds comments to YAML configuration.
fn add_config_comments(yaml: String) -> String {
    let comments = r#"# procfind Configuration
# =======================
#
# Match Criteria (regular expressions, all optional)
# --------------------------------------------------
# process_name: "^nginx$"      # Short process name (comm)
# process_path: "^/usr/sbin/"  # Executable path; unreadable path aborts the scan
# process_cwd: "^/srv/app"     # Working directory; unreadable cwd aborts the scan
# reconcile: parent            # first | parent | uptime, used when several match
#
# Host
# ----
# proc_root: /proc             # procfs mount point
#
# Output
# ------
# output_format: text          # text (pid only) | json ({"pid":..,"reason":..})
#
# Logging
# -------
# log_level: "warn"            # off, error, warn, info, debug, trace
#
# Memory
# ------
# reclaim_interval_secs: null  # Trim the heap every N seconds (null = disabled)
"#;

    format!("{comments}\n{yaml}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_config_parses_back() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("procfind.yaml");
        command_config(Some(out.clone()), ConfigFormat::Yaml, true).unwrap();

        let cfg = crate::config::load_config(Some(&out)).unwrap();
        assert_eq!(cfg.proc_root(), PathBuf::from("/proc"));
        assert_eq!(cfg.process_name, None);
    }
}
