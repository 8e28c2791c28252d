// src/internal/logger/format.rs

use std::fmt::{self, Write as _};

use crate::internal::severity::Severity;

/// `chrono` pattern of the leading timestamp column.
pub const TIMESTAMP_FORMAT: &str = "%Y %m %d | %H %M %S";

/// Column separator of a record line.
pub const SEPARATOR: &str = " | ";

const NAME_COLOR: u8 = 35;
const CALLER_COLOR: u8 = 94;

/// Layout switches of a record line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    /// Render the caller-tag column. Untagged records get an empty column.
    pub include_caller_tag: bool,
    /// Wrap label, name and tag in ANSI color sequences.
    pub ansi: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            include_caller_tag: false,
            ansi: true,
        }
    }
}

/// A line is blank when it holds nothing but spaces.
pub fn is_blank(line: &str) -> bool {
    line.trim_matches(' ').is_empty()
}

/// Render one record, newline included.
///
/// `timestamp | LABEL | name | [tag | ]line`
pub fn render_record(
    options: &FormatOptions,
    timestamp: &dyn fmt::Display,
    severity: Severity,
    name: &str,
    caller: Option<&str>,
    line: &str,
) -> String {
    let mut record = String::with_capacity(64 + name.len() + line.len());

    // Writing into a String cannot fail.
    let _ = write!(record, "{}", timestamp);
    record.push_str(SEPARATOR);
    push_colored(&mut record, options.ansi, severity.color_code(), severity.label());
    record.push_str(SEPARATOR);
    push_colored(&mut record, options.ansi, NAME_COLOR, name);
    record.push_str(SEPARATOR);
    if options.include_caller_tag {
        push_colored(&mut record, options.ansi, CALLER_COLOR, caller.unwrap_or(""));
        record.push_str(SEPARATOR);
    }
    record.push_str(line);
    record.push('\n');
    record
}

fn push_colored(record: &mut String, ansi: bool, color: u8, text: &str) {
    if ansi {
        let _ = write!(record, "\x1b[{}m{}\x1b[0m", color, text);
    } else {
        record.push_str(text);
    }
}
