//! Hierarchical, level-filtered, colorized text logger.
//!
//! ```no_run
//! use minori::{Logger, Severity};
//!
//! minori::set_default_threshold(Severity::Warn);
//!
//! let app = Logger::root("app");
//! let db = app.child("db");
//! db.warn("disk low");      // written
//! db.info("started");       // filtered
//! minori::log_error!(app, "{} retries left", 0);
//! ```

pub mod cli;
pub mod internal;

// Re-export commonly used types
pub use internal::bridge::{init_tracing, MinoriLayer};
pub use internal::config::LoggingConfig;
pub use internal::error::{LogError, Result};
pub use internal::logger::{Caller, FormatOptions, Logger};
pub use internal::output::{
    default_stream, default_threshold, set_default_stream, set_default_threshold, CaptureBuffer,
    SharedStream,
};
pub use internal::severity::{color_code_of, label_of, Severity};
