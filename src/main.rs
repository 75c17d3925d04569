//! procfind - version 0.1.0
//!
//! Resolves a single process id from regex criteria with tracing logging.
//! This is the main entry point that wires CLI, configuration and subcommands.

mod cli;
mod commands;
mod config;
mod startup_checks;

use clap::Parser;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{debug, info, Level};

use cli::{Args, Commands, LogLevel};
use commands::{command_check, command_config, command_find, command_label, command_list};
use config::{resolve_config, show_config, validate_effective_config, Config};

/// Initializes tracing logging subsystem with configured log level.
/// Precedence: CLI > config file > warn.
fn setup_logging(args: &Args, config: Option<&Config>) {
    let level = args
        .log_level
        .clone()
        .or_else(|| config.and_then(Config::log_level))
        .unwrap_or(LogLevel::Warn);
    let log_level = match level {
        LogLevel::Off => None,
        LogLevel::Error => Some(Level::ERROR),
        LogLevel::Warn => Some(Level::WARN),
        LogLevel::Info => Some(Level::INFO),
        LogLevel::Debug => Some(Level::DEBUG),
        LogLevel::Trace => Some(Level::TRACE),
    };
    let Some(log_level) = log_level else {
        return;
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("procfind: tracing subscriber already installed");
        return;
    }

    debug!("Logging initialized with level: {:?}", level);
}

/// Helper function to load and validate configuration.
/// Exits the process with error code 1 if validation fails.
fn load_validated_config(args: &Args) -> anyhow::Result<Config> {
    let config = resolve_config(args)?;
    if let Err(e) = validate_effective_config(&config) {
        eprintln!("❌ Configuration invalid: {:#}", e);
        std::process::exit(1);
    }
    Ok(config)
}

/// Starts the heap-trim timer if the config asks for one.
fn start_reclaim_timer(config: &Config) {
    if let Some(secs) = config.reclaim_interval_secs {
        if procfind::reclaim::start(Duration::from_secs(secs), procfind::reclaim::trim_heap) {
            info!("Heap reclamation every {}s", secs);
        }
    }
}

/// Main application entry point.
fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    // Early config resolution for show/check modes
    if args.show_config || args.check_config {
        setup_logging(&args, None);
        let config = resolve_config(&args)?;

        if args.check_config {
            if let Err(e) = validate_effective_config(&config) {
                eprintln!("❌ Configuration invalid: {:#}", e);
                return Ok(ExitCode::FAILURE);
            }
            println!("✅ Configuration is valid");
            return Ok(ExitCode::SUCCESS);
        }

        show_config(&config, args.config_format.clone())?;
        return Ok(ExitCode::SUCCESS);
    }

    // Label and Config don't need config validation
    match &args.command {
        Some(Commands::Label { text }) => {
            setup_logging(&args, None);
            command_label(text)?;
            return Ok(ExitCode::SUCCESS);
        }
        Some(Commands::Config {
            output,
            format,
            commented,
        }) => {
            setup_logging(&args, None);
            command_config(output.clone(), format.clone(), *commented)?;
            return Ok(ExitCode::SUCCESS);
        }
        _ => {}
    }

    let config = load_validated_config(&args)?;
    setup_logging(&args, Some(&config));
    start_reclaim_timer(&config);

    match &args.command {
        Some(Commands::List { verbose }) => {
            command_list(*verbose, &config)?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Check { proc, all }) => {
            command_check(*proc, *all, &config)?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Label { .. }) | Some(Commands::Config { .. }) => {
            unreachable!("handled above")
        }
        None => {
            let res = command_find(&config)?;
            Ok(if res.is_found() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}
