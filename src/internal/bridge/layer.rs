// src/internal/bridge/layer.rs

//! Forwards `tracing` events into a [`Logger`].
//!
//! Libraries that log through `tracing` end up in the same record stream as
//! direct `Logger` calls. The event target becomes the caller tag, the event
//! level is mapped onto a [`Severity`], and the logger's own threshold still
//! decides what is written.

use std::fmt::{self, Write as _};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::internal::error::Result;
use crate::internal::logger::Logger;
use crate::internal::severity::Severity;

/// Target prefix of this crate's own diagnostics, never forwarded.
const OWN_TARGET: &str = "minori";

pub struct MinoriLayer {
    logger: Logger,
}

impl MinoriLayer {
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// TRACE has no counterpart and folds into DEBUG.
    pub fn severity_for(level: &Level) -> Severity {
        match *level {
            Level::ERROR => Severity::Error,
            Level::WARN => Severity::Warn,
            Level::INFO => Severity::Info,
            Level::DEBUG | Level::TRACE => Severity::Debug,
        }
    }

    fn is_own_target(target: &str) -> bool {
        target == OWN_TARGET || target.starts_with("minori::")
    }
}

impl<S> Layer<S> for MinoriLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let target = metadata.target();
        if Self::is_own_target(target) {
            return;
        }

        let severity = Self::severity_for(metadata.level());
        if !self.logger.enabled(severity) {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        self.logger
            .caller(target)
            .emit(severity, &visitor.into_text());
    }
}

/// Collects the `message` field and renders the rest as `key=value`.
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl MessageVisitor {
    fn into_text(self) -> String {
        if self.fields.is_empty() {
            self.message
        } else if self.message.is_empty() {
            self.fields
        } else {
            format!("{} {}", self.message, self.fields)
        }
    }

    fn push_field(&mut self, name: &str, value: &dyn fmt::Display) {
        if !self.fields.is_empty() {
            self.fields.push(' ');
        }
        let _ = write!(self.fields, "{}={}", name, value);
    }
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_owned();
        } else {
            self.push_field(field.name(), &value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            self.push_field(field.name(), &format_args!("{:?}", value));
        }
    }
}

/// Install a global subscriber forwarding into `logger`.
///
/// `RUST_LOG` narrows what reaches the layer; without it every event is
/// offered and the logger's threshold does the filtering.
pub fn init_tracing(logger: Logger) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace"));
    init_tracing_with_filter(logger, filter)
}

pub fn init_tracing_with_filter(logger: Logger, filter: EnvFilter) -> Result<()> {
    tracing_subscriber::registry()
        .with(filter)
        .with(MinoriLayer::new(logger))
        .try_init()?;
    Ok(())
}
