//! Configuration management for procfind.
//!
//! This module handles loading, merging, and validating configuration from files
//! and CLI arguments. It supports YAML, JSON, and TOML formats.

use anyhow::{bail, Context};
use clap::ValueEnum;
use procfind::process::DEFAULT_PROC_ROOT;
use procfind::MatchCriteria;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::cli::{Args, ConfigFormat, LogLevel, OutputFormat};

/// Default config file locations, first existing wins.
const DEFAULT_CONFIG_PATHS: [&str; 8] = [
    "/etc/procfind/procfind.yaml",
    "/etc/procfind/procfind.yml",
    "/etc/procfind/procfind.json",
    "/etc/procfind/procfind.toml",
    "./procfind.yaml",
    "./procfind.yml",
    "./procfind.json",
    "./procfind.toml",
];

/// Effective configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Match criteria
    #[serde(alias = "processName")]
    pub process_name: Option<String>,
    #[serde(alias = "processPath")]
    pub process_path: Option<String>,
    #[serde(alias = "processCwd")]
    pub process_cwd: Option<String>,
    /// "first" | "parent" | "uptime"
    pub reconcile: Option<String>,

    // Host
    #[serde(alias = "proc-root")]
    pub proc_root: Option<PathBuf>,

    // Output
    #[serde(alias = "output-format")]
    pub output_format: Option<OutputFormat>,

    // Logging
    pub log_level: Option<String>,

    /// Start the background heap-trim timer with this interval
    #[serde(alias = "reclaim-interval-secs")]
    pub reclaim_interval_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            process_name: None,
            process_path: None,
            process_cwd: None,
            reconcile: None,
            proc_root: Some(PathBuf::from(DEFAULT_PROC_ROOT)),
            output_format: Some(OutputFormat::Text),
            log_level: Some("warn".into()),
            reclaim_interval_secs: None,
        }
    }
}

impl Config {
    /// Match criteria built from the configured patterns.
    pub fn criteria(&self) -> MatchCriteria {
        MatchCriteria {
            process_name: self.process_name.clone(),
            process_path: self.process_path.clone(),
            process_cwd: self.process_cwd.clone(),
            reconcile: self.reconcile.clone(),
        }
    }

    /// Configured log level, if it names a known level.
    pub fn log_level(&self) -> Option<LogLevel> {
        self.log_level
            .as_deref()
            .and_then(|s| LogLevel::from_str(s, true).ok())
    }

    pub fn proc_root(&self) -> PathBuf {
        self.proc_root
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PROC_ROOT))
    }
}

/// Validate effective config (used by --check-config and at startup)
pub fn validate_effective_config(cfg: &Config) -> anyhow::Result<()> {
    if let Some(root) = &cfg.proc_root {
        if root.as_os_str().is_empty() {
            bail!("proc_root must not be empty");
        }
    }

    if let Some(level) = cfg.log_level.as_deref() {
        if cfg.log_level().is_none() {
            bail!(
                "Invalid log_level '{}', expected off, error, warn, info, debug or trace",
                level
            );
        }
    }

    if cfg.reclaim_interval_secs == Some(0) {
        bail!("reclaim_interval_secs must be greater than 0");
    }

    cfg.criteria().compile()?;
    Ok(())
}

/// Resolves configuration from CLI args, config file, and defaults.
/// This enforces precedence: CLI (if provided) > config file > default.
pub fn resolve_config(args: &Args) -> anyhow::Result<Config> {
    let mut config = if args.no_config {
        Config::default()
    } else {
        load_config(args.config.as_deref())?
    };

    if let Some(name) = &args.name {
        config.process_name = Some(name.clone());
    }
    if let Some(path) = &args.path {
        config.process_path = Some(path.clone());
    }
    if let Some(cwd) = &args.cwd {
        config.process_cwd = Some(cwd.clone());
    }
    if let Some(reconcile) = &args.reconcile {
        config.reconcile = Some(reconcile.clone());
    }
    if let Some(root) = &args.proc_root {
        config.proc_root = Some(root.clone());
    }
    if let Some(output) = args.output {
        config.output_format = Some(output);
    }

    Ok(config)
}

/// Configuration loading with multiple format support
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let path = match path {
        Some(p) => {
            if !p.exists() {
                bail!("Config file not found: {}", p.display());
            }
            p.to_path_buf()
        }
        None => match DEFAULT_CONFIG_PATHS.iter().find(|p| Path::new(p).exists()) {
            Some(p) => PathBuf::from(p),
            None => return Ok(Config::default()),
        },
    };

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    let config: Config = match path.extension().and_then(|s| s.to_str()) {
        Some("json") => serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON in {}", path.display()))?,
        Some("toml") => toml::from_str(&content)
            .with_context(|| format!("Invalid TOML in {}", path.display()))?,
        // Default to YAML
        _ => serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid YAML in {}", path.display()))?,
    };
    info!("Loaded configuration from: {}", path.display());
    Ok(config)
}

/// Renders configuration in the requested format
pub fn render_config(config: &Config, format: &ConfigFormat) -> anyhow::Result<String> {
    let output = match format {
        ConfigFormat::Json => serde_json::to_string_pretty(config)?,
        ConfigFormat::Toml => toml::to_string_pretty(config)?,
        ConfigFormat::Yaml => serde_yaml::to_string(config)?,
    };
    Ok(output)
}

/// Shows configuration in requested format
pub fn show_config(config: &Config, format: ConfigFormat) -> anyhow::Result<()> {
    println!("{}", render_config(config, &format)?);
    Ok(())
}
