//! Raw input to typed command parsing.
//!
//! # Responsibility
//! - Split a line into the leading command token and the trimmed remainder.
//! - Decompose `deadline` / `event` arguments on their separator keywords.
//! - Parse date-time sub-fields with the fixed input format.
//!
//! # Invariants
//! - Separators are whole tokens: `by`, `from`, `to`, optionally `/`-prefixed.
//! - Index arguments are parsed but never bounds-checked here.

use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Date-time format accepted in commands, e.g. `2024-12-01 1800`.
pub const INPUT_DATE_TIME_FORMAT: &str = "%Y-%m-%d %H%M";

pub const DEADLINE_USAGE: &str = "deadline <description> by <yyyy-mm-dd HHmm>";
pub const EVENT_USAGE: &str = "event <description> from <yyyy-mm-dd HHmm> to <yyyy-mm-dd HHmm>";

// Greedy description: the last separator wins, so descriptions may contain
// the keyword themselves.
static DEADLINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<description>.+)\s+/?by\s+(?P<due>.+)$").expect("valid deadline regex")
});
static EVENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<description>.+)\s+/?from\s+(?P<start>.+?)\s+/?to\s+(?P<end>.+)$")
        .expect("valid event regex")
});

/// Leading token and remainder of one input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawCommand<'a> {
    pub name: &'a str,
    /// Trimmed remainder; empty when the line holds only the command.
    pub rest: &'a str,
}

/// Typed command produced from one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Bye,
    List,
    /// 1-based index as typed by the user.
    Mark(i64),
    Unmark(i64),
    Delete(i64),
    /// Description may be empty; the task model rejects it.
    Todo {
        description: String,
    },
    Deadline {
        description: String,
        due_at: NaiveDateTime,
    },
    Event {
        description: String,
        starts_at: NaiveDateTime,
        ends_at: NaiveDateTime,
    },
    Find {
        keyword: String,
    },
    /// Leading token matched no known command.
    Unknown(String),
}

/// Parser failure for a recognized command with malformed arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A required separator or sub-field is missing.
    IncompleteArgument {
        command: &'static str,
        usage: &'static str,
    },
    /// A date-time sub-field does not match `INPUT_DATE_TIME_FORMAT`.
    DateTimeParse { value: String },
    /// The index argument of mark/unmark/delete is not an integer.
    InvalidIndex { value: String },
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IncompleteArgument { command, usage } => {
                write!(f, "incomplete `{command}` arguments; expected `{usage}`")
            }
            Self::DateTimeParse { value } => write!(
                f,
                "invalid date-time `{value}`; expected format yyyy-mm-dd HHmm"
            ),
            Self::InvalidIndex { value } => write!(f, "invalid task index `{value}`"),
        }
    }
}

impl Error for ParseError {}

/// Splits one line into its command token and trimmed remainder.
pub fn split_command(input: &str) -> RawCommand<'_> {
    let input = input.trim();
    match input.split_once(char::is_whitespace) {
        Some((name, rest)) => RawCommand {
            name,
            rest: rest.trim(),
        },
        None => RawCommand {
            name: input,
            rest: "",
        },
    }
}

/// Parses one line into a typed command.
///
/// Unknown command tokens are not an error; they yield `Command::Unknown`.
pub fn parse_command(input: &str) -> Result<Command, ParseError> {
    let raw = split_command(input);
    let command = match raw.name {
        "bye" => Command::Bye,
        "list" => Command::List,
        "mark" => Command::Mark(parse_index(raw.rest)?),
        "unmark" => Command::Unmark(parse_index(raw.rest)?),
        "delete" => Command::Delete(parse_index(raw.rest)?),
        "todo" => Command::Todo {
            description: raw.rest.to_string(),
        },
        "deadline" => {
            let (description, due_at) = parse_deadline(raw.rest)?;
            Command::Deadline {
                description,
                due_at,
            }
        }
        "event" => {
            let (description, starts_at, ends_at) = parse_event(raw.rest)?;
            Command::Event {
                description,
                starts_at,
                ends_at,
            }
        }
        "find" => Command::Find {
            keyword: raw.rest.to_string(),
        },
        other => Command::Unknown(other.to_string()),
    };
    Ok(command)
}

/// Splits `<description> by <date-time>` into its parsed parts.
pub fn parse_deadline(args: &str) -> Result<(String, NaiveDateTime), ParseError> {
    let caps = DEADLINE_RE
        .captures(args)
        .ok_or(ParseError::IncompleteArgument {
            command: "deadline",
            usage: DEADLINE_USAGE,
        })?;
    let description = caps["description"].trim().to_string();
    let due_at = parse_date_time(&caps["due"])?;
    Ok((description, due_at))
}

/// Splits `<description> from <start> to <end>` into its parsed parts.
pub fn parse_event(args: &str) -> Result<(String, NaiveDateTime, NaiveDateTime), ParseError> {
    let caps = EVENT_RE.captures(args).ok_or(ParseError::IncompleteArgument {
        command: "event",
        usage: EVENT_USAGE,
    })?;
    let description = caps["description"].trim().to_string();
    let starts_at = parse_date_time(&caps["start"])?;
    let ends_at = parse_date_time(&caps["end"])?;
    Ok((description, starts_at, ends_at))
}

/// Parses one date-time sub-field using `INPUT_DATE_TIME_FORMAT`.
pub fn parse_date_time(value: &str) -> Result<NaiveDateTime, ParseError> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, INPUT_DATE_TIME_FORMAT).map_err(|_| {
        ParseError::DateTimeParse {
            value: value.to_string(),
        }
    })
}

/// Parses an index argument. Integers too large for `i64` saturate so they
/// are later reported as out of range rather than as non-numbers.
fn parse_index(value: &str) -> Result<i64, ParseError> {
    if let Ok(index) = value.parse::<i64>() {
        return Ok(index);
    }
    let (negative, digits) = match value.strip_prefix('-') {
        Some(digits) => (true, digits),
        None => (false, value.strip_prefix('+').unwrap_or(value)),
    };
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(if negative { i64::MIN } else { i64::MAX });
    }
    Err(ParseError::InvalidIndex {
        value: value.to_string(),
    })
}
