//! Parser for `/proc/<pid>/stat`.
//!
//! Only the fields the resolver needs are extracted: the short name (field 2),
//! the parent pid (field 4) and the start time in clock ticks since boot
//! (field 22).

/// Fields of interest from a stat line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatFields {
    pub name: String,
    pub ppid: u32,
    pub start: u64,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StatParseError {
    #[error("missing '(' or ')' around process name")]
    MissingName,

    #[error("stat line has {0} fields after the name, expected at least 20")]
    TooShort(usize),

    #[error("failed to parse {field} from '{value}'")]
    InvalidField { field: &'static str, value: String },
}

// Index of a field in the whitespace-separated tail after the closing paren.
// The tail starts at field 3 (state).
const PPID_IDX: usize = 1;
const STARTTIME_IDX: usize = 19;

/// Parses a stat line.
///
/// The name is everything between the first `(` and the last `)`, so names
/// containing spaces or parentheses are handled.
pub fn parse_stat(line: &str) -> Result<StatFields, StatParseError> {
    let open = line.find('(').ok_or(StatParseError::MissingName)?;
    let close = line.rfind(')').ok_or(StatParseError::MissingName)?;
    if close < open {
        return Err(StatParseError::MissingName);
    }

    let name = line[open + 1..close].to_string();
    let rest: Vec<&str> = line[close + 1..].split_whitespace().collect();
    if rest.len() <= STARTTIME_IDX {
        return Err(StatParseError::TooShort(rest.len()));
    }

    let ppid = rest[PPID_IDX]
        .parse()
        .map_err(|_| StatParseError::InvalidField {
            field: "ppid",
            value: rest[PPID_IDX].to_string(),
        })?;
    let start = rest[STARTTIME_IDX]
        .parse()
        .map_err(|_| StatParseError::InvalidField {
            field: "starttime",
            value: rest[STARTTIME_IDX].to_string(),
        })?;

    Ok(StatFields { name, ppid, start })
}
