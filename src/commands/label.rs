//! Label command implementation.

use procfind::format_source;

/// Prints `text` with whitespace runs replaced by hyphens.
pub fn command_label(text: &str) -> anyhow::Result<()> {
    println!("{}", format_source(text));
    Ok(())
}
