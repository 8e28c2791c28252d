// src/internal/logger/logger.rs

use std::fmt;
use std::io::Write;

use chrono::Local;
use tracing::warn;

use super::format::{self, FormatOptions, TIMESTAMP_FORMAT};
use crate::internal::output::{self, SharedStream};
use crate::internal::severity::Severity;

/// Separator between a parent's name and a child segment.
pub const NAME_SEPARATOR: &str = "/";

/// Exit status used by `fatal`.
pub const FATAL_EXIT_CODE: i32 = 1;

/// A named emission point.
///
/// Without overrides a logger follows the process-wide threshold and
/// stream, looked up on every emission. Overrides are fixed once the logger
/// is built and are copied into children.
#[derive(Debug, Clone)]
pub struct Logger {
    name: String,
    threshold: Option<Severity>,
    stream: Option<SharedStream>,
    format: FormatOptions,
}

// Shared by `Logger` and `Caller`; both provide `log_display`.
macro_rules! emission_methods {
    () => {
        pub fn debug(&self, message: impl fmt::Display) {
            self.log_display(Severity::Debug, &message);
        }

        pub fn debug_fmt(&self, args: fmt::Arguments<'_>) {
            self.log_display(Severity::Debug, &args);
        }

        pub fn info(&self, message: impl fmt::Display) {
            self.log_display(Severity::Info, &message);
        }

        pub fn info_fmt(&self, args: fmt::Arguments<'_>) {
            self.log_display(Severity::Info, &args);
        }

        pub fn warn(&self, message: impl fmt::Display) {
            self.log_display(Severity::Warn, &message);
        }

        pub fn warn_fmt(&self, args: fmt::Arguments<'_>) {
            self.log_display(Severity::Warn, &args);
        }

        pub fn error(&self, message: impl fmt::Display) {
            self.log_display(Severity::Error, &message);
        }

        pub fn error_fmt(&self, args: fmt::Arguments<'_>) {
            self.log_display(Severity::Error, &args);
        }

        /// Log at FATAL, then exit the process with status 1.
        ///
        /// The exit happens even when FATAL is filtered out.
        pub fn fatal(&self, message: impl fmt::Display) -> ! {
            self.log_display(Severity::Fatal, &message);
            std::process::exit(FATAL_EXIT_CODE)
        }

        pub fn fatal_fmt(&self, args: fmt::Arguments<'_>) -> ! {
            self.log_display(Severity::Fatal, &args);
            std::process::exit(FATAL_EXIT_CODE)
        }

        /// Log at PANIC, then unwind with the rendered message as payload.
        ///
        /// The unwind happens even when PANIC is filtered out. The payload is
        /// a `String`, so `catch_unwind` callers can downcast it.
        pub fn panic(&self, message: impl fmt::Display) -> ! {
            let rendered = message.to_string();
            self.log_display(Severity::Panic, &rendered);
            std::panic::panic_any(rendered)
        }

        pub fn panic_fmt(&self, args: fmt::Arguments<'_>) -> ! {
            let rendered = args.to_string();
            self.log_display(Severity::Panic, &rendered);
            std::panic::panic_any(rendered)
        }
    };
}

impl Logger {
    /// A root logger. Threshold and stream both follow the process-wide
    /// defaults until overridden.
    pub fn root(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            threshold: None,
            stream: None,
            format: FormatOptions::default(),
        }
    }

    /// A child named `<parent>/<segment>` with the parent's overrides.
    pub fn child(&self, segment: &str) -> Self {
        Self {
            name: format!("{}{}{}", self.name, NAME_SEPARATOR, segment),
            threshold: self.threshold,
            stream: self.stream.clone(),
            format: self.format,
        }
    }

    pub fn with_threshold(mut self, threshold: Severity) -> Self {
        self.threshold = Some(threshold);
        self
    }

    /// Drop the threshold override and follow the process-wide default again.
    pub fn with_default_threshold(mut self) -> Self {
        self.threshold = None;
        self
    }

    pub fn with_stream(mut self, stream: SharedStream) -> Self {
        self.stream = Some(stream);
        self
    }

    pub fn with_default_stream(mut self) -> Self {
        self.stream = None;
        self
    }

    pub fn with_format(mut self, format: FormatOptions) -> Self {
        self.format = format;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn threshold_override(&self) -> Option<Severity> {
        self.threshold
    }

    pub fn stream_override(&self) -> Option<&SharedStream> {
        self.stream.as_ref()
    }

    pub fn format(&self) -> FormatOptions {
        self.format
    }

    pub fn effective_threshold(&self) -> Severity {
        self.threshold.unwrap_or_else(output::default_threshold)
    }

    pub fn effective_stream(&self) -> SharedStream {
        match &self.stream {
            Some(stream) => stream.clone(),
            None => output::default_stream(),
        }
    }

    /// Whether a record at `severity` would be written right now.
    ///
    /// `Off` is never a record level, so it is never enabled.
    pub fn enabled(&self, severity: Severity) -> bool {
        severity != Severity::Off && severity.allowed_by(self.effective_threshold())
    }

    /// View of this logger that stamps every record with `tag`.
    pub fn caller<'a>(&'a self, tag: &'a str) -> Caller<'a> {
        Caller { logger: self, tag }
    }

    /// Write `message` at `severity`, one record per non-blank line.
    ///
    /// Returns the number of records produced; zero when the severity is
    /// filtered out or every line is blank.
    pub fn emit(&self, severity: Severity, message: &str) -> usize {
        self.emit_tagged(severity, None, message)
    }

    pub fn emit_tagged(&self, severity: Severity, caller: Option<&str>, message: &str) -> usize {
        if !self.enabled(severity) {
            return 0;
        }
        self.write_lines(severity, caller, message)
    }

    emission_methods!();

    fn log_display(&self, severity: Severity, message: &dyn fmt::Display) -> usize {
        self.log_tagged(severity, None, message)
    }

    fn log_tagged(
        &self,
        severity: Severity,
        caller: Option<&str>,
        message: &dyn fmt::Display,
    ) -> usize {
        // Render only once the level check has passed.
        if !self.enabled(severity) {
            return 0;
        }
        self.write_lines(severity, caller, &message.to_string())
    }

    fn write_lines(&self, severity: Severity, caller: Option<&str>, message: &str) -> usize {
        let stream = self.effective_stream();
        let mut out = stream.lock();
        let mut records = 0;

        for line in message.split('\n') {
            if format::is_blank(line) {
                continue;
            }
            let timestamp = Local::now().format(TIMESTAMP_FORMAT);
            let record =
                format::render_record(&self.format, &timestamp, severity, &self.name, caller, line);
            records += 1;
            if let Err(e) = out.write_all(record.as_bytes()) {
                warn!(target: "minori::output", logger = %self.name, "failed to write log record: {}", e);
            }
        }

        if records > 0 {
            if let Err(e) = out.flush() {
                warn!(target: "minori::output", logger = %self.name, "failed to flush log stream: {}", e);
            }
        }
        records
    }
}

/// A logger borrowed together with a caller tag.
#[derive(Debug, Clone, Copy)]
pub struct Caller<'a> {
    logger: &'a Logger,
    tag: &'a str,
}

impl<'a> Caller<'a> {
    pub fn tag(&self) -> &'a str {
        self.tag
    }

    pub fn logger(&self) -> &'a Logger {
        self.logger
    }

    pub fn emit(&self, severity: Severity, message: &str) -> usize {
        self.logger.emit_tagged(severity, Some(self.tag), message)
    }

    emission_methods!();

    fn log_display(&self, severity: Severity, message: &dyn fmt::Display) -> usize {
        self.logger.log_tagged(severity, Some(self.tag), message)
    }
}
