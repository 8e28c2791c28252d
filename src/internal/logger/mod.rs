// src/internal/logger/mod.rs

pub mod format;
pub mod logger;
mod macros;

pub use format::{FormatOptions, TIMESTAMP_FORMAT};
pub use logger::{Caller, Logger, FATAL_EXIT_CODE, NAME_SEPARATOR};

// The log_* macros are exported at the crate root via #[macro_export].
