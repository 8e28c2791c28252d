// src/internal/severity/severity.rs

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::internal::error::LogError;

/// Severity of a record, ordered from "nothing at all" to most verbose.
///
/// The ordering is numeric and intentionally inverted with respect to
/// importance: a record at `s` is written only when `s <= threshold`.
/// `Off` is a threshold sentinel, not an event level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
#[repr(u8)]
pub enum Severity {
    Off = 0,
    Fatal = 1,
    Panic = 2,
    Error = 3,
    Warn = 4,
    Info = 5,
    #[default]
    Debug = 6,
}

pub const ANSI_RED: u8 = 31;
pub const ANSI_GREEN: u8 = 32;
pub const ANSI_YELLOW: u8 = 33;
pub const ANSI_CYAN: u8 = 36;

impl Severity {
    /// Every level, in ascending numeric order.
    pub const ALL: [Severity; 7] = [
        Severity::Off,
        Severity::Fatal,
        Severity::Panic,
        Severity::Error,
        Severity::Warn,
        Severity::Info,
        Severity::Debug,
    ];

    /// Display label of the level. Empty for `Off`.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Warn => "WARN",
            Severity::Info => "INFO",
            Severity::Error => "ERROR",
            Severity::Debug => "DEBUG",
            Severity::Fatal => "FATAL",
            Severity::Panic => "PANIC",
            Severity::Off => "",
        }
    }

    /// SGR color selector used for the label column.
    pub fn color_code(self) -> u8 {
        match self {
            Severity::Debug => ANSI_CYAN,
            Severity::Warn => ANSI_YELLOW,
            Severity::Error | Severity::Fatal | Severity::Panic => ANSI_RED,
            Severity::Info | Severity::Off => ANSI_GREEN,
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// True when a record at `self` passes `threshold`.
    pub fn allowed_by(self, threshold: Severity) -> bool {
        self <= threshold
    }
}

/// Label for a severity.
pub fn label_of(severity: Severity) -> &'static str {
    severity.label()
}

/// Color code for a severity.
pub fn color_code_of(severity: Severity) -> u8 {
    severity.color_code()
}

/// Label for an untyped level value; unknown values map to `""`.
pub fn label_of_raw(value: i64) -> &'static str {
    u8::try_from(value)
        .ok()
        .and_then(|v| Severity::try_from(v).ok())
        .map_or("", Severity::label)
}

/// Color code for an untyped level value; unknown values map to green.
pub fn color_code_of_raw(value: i64) -> u8 {
    u8::try_from(value)
        .ok()
        .and_then(|v| Severity::try_from(v).ok())
        .map_or(ANSI_GREEN, Severity::color_code)
}

impl TryFrom<u8> for Severity {
    type Error = LogError;

    fn try_from(value: u8) -> Result<Self, LogError> {
        Severity::ALL
            .get(usize::from(value))
            .copied()
            .ok_or(LogError::InvalidSeverity(value))
    }
}

impl From<Severity> for u8 {
    fn from(severity: Severity) -> u8 {
        severity as u8
    }
}

impl FromStr for Severity {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(value) = trimmed.parse::<u8>() {
            return Severity::try_from(value)
                .map_err(|_| LogError::UnknownSeverity(s.to_string()));
        }

        match trimmed.to_ascii_uppercase().as_str() {
            "OFF" => Ok(Severity::Off),
            "FATAL" => Ok(Severity::Fatal),
            "PANIC" => Ok(Severity::Panic),
            "ERROR" => Ok(Severity::Error),
            "WARN" | "WARNING" => Ok(Severity::Warn),
            "INFO" => Ok(Severity::Info),
            "DEBUG" => Ok(Severity::Debug),
            _ => Err(LogError::UnknownSeverity(s.to_string())),
        }
    }
}

impl TryFrom<String> for Severity {
    type Error = LogError;

    fn try_from(value: String) -> Result<Self, LogError> {
        value.parse()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Off => f.write_str("OFF"),
            other => f.write_str(other.label()),
        }
    }
}
