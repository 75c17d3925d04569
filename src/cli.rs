//! CLI arguments and subcommands for procfind.
//!
//! This module defines the command-line interface structure using the clap library,
//! including all flags, options, and subcommands.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Log level options for CLI parsing
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Configuration format options for output
#[derive(Debug, Clone, ValueEnum)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

/// How resolution results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

/// Main CLI arguments structure
#[derive(Parser, Debug)]
#[command(
    name = "procfind",
    about = "Resolve a single process id from name, path and cwd regexes",
    long_about = "Resolve a single process id from name, path and cwd regexes.\n\n\
                  Scans /proc once, keeps the processes matching every given regex \
                  and reduces multiple matches to one pid with a reconciliation \
                  strategy (first, parent or uptime).",
    version = "0.1.0",
    propagate_version = true
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Regex for the process name
    #[arg(short = 'n', long)]
    pub name: Option<String>,

    /// Regex for the executable path
    #[arg(short = 'p', long)]
    pub path: Option<String>,

    /// Regex for the working directory
    #[arg(short = 'w', long)]
    pub cwd: Option<String>,

    /// Reconciliation strategy when several processes match (first, parent, uptime)
    #[arg(short = 'r', long)]
    pub reconcile: Option<String>,

    /// procfs mount point
    #[arg(long)]
    pub proc_root: Option<PathBuf>,

    /// Result output format
    #[arg(short = 'o', long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Log level (default: config file value, else warn)
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Config file (YAML/JSON/TOML)
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Disable all config file loading
    #[arg(long)]
    pub no_config: bool,

    /// Print effective merged config and exit
    #[arg(long)]
    pub show_config: bool,

    /// Output format for --show-config
    #[arg(long, value_enum, default_value = "yaml")]
    pub config_format: ConfigFormat,

    /// Validate config and exit (return code 1 on error)
    #[arg(long)]
    pub check_config: bool,
}

/// Subcommands for additional functionality
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List every matching process without reconciling
    List {
        /// Also print path and cwd
        #[arg(long)]
        verbose: bool,
    },

    /// Validate configuration and system requirements
    Check {
        /// Check /proc filesystem
        #[arg(long)]
        proc: bool,

        /// Check all system requirements
        #[arg(long)]
        all: bool,
    },

    /// Generate configuration files
    Config {
        /// Output file path ("-" for stdout)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "yaml")]
        format: ConfigFormat,

        /// Include comments and examples
        #[arg(long)]
        commented: bool,
    },

    /// Replace whitespace runs in a label with hyphens
    Label {
        /// Text to sanitise
        text: String,
    },
}
