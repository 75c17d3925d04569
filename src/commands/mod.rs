//! CLI command implementations for procfind.
//!
//! This module provides implementations for the resolver and all CLI subcommands:
//! - `find`: resolve one pid (default action)
//! - `list`: print every matching process
//! - `check`: system validation
//! - `config`: configuration file generation
//! - `label`: label sanitising

pub mod check;
pub mod config;
pub mod find;
pub mod label;
pub mod list;

// Re-export command functions
pub use check::command_check;
pub use config::command_config;
pub use find::command_find;
pub use label::command_label;
pub use list::command_list;
