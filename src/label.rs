//! Label sanitising for downstream sinks that reject whitespace in names.

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static regex"));

/// Replaces every run of whitespace in `source` with a single `-`.
pub fn format_source(source: &str) -> String {
    WHITESPACE_RUN.replace_all(source, "-").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_source() {
        assert_eq!(format_source("my web server"), "my-web-server");
        assert_eq!(format_source("tabs\tand \n newlines"), "tabs-and-newlines");
        assert_eq!(format_source("  padded  "), "-padded-");
        assert_eq!(format_source("already-clean"), "already-clean");
        assert_eq!(format_source(""), "");
    }
}
