//! Shared helpers for integration tests

#![allow(dead_code)]

use std::sync::{Mutex, MutexGuard, PoisonError};

use minori::{set_default_stream, set_default_threshold, Severity, SharedStream};
use regex::Regex;

/// Tests touching the process-wide defaults hold this for their whole body.
pub fn global_lock() -> MutexGuard<'static, ()> {
    static LOCK: Mutex<()> = Mutex::new(());
    LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Restores threshold and stream defaults when dropped.
pub struct DefaultsGuard {
    previous_stream: Option<SharedStream>,
}

impl DefaultsGuard {
    pub fn install(threshold: Severity, stream: SharedStream) -> Self {
        set_default_threshold(threshold);
        Self {
            previous_stream: Some(set_default_stream(stream)),
        }
    }
}

impl Drop for DefaultsGuard {
    fn drop(&mut self) {
        set_default_threshold(Severity::Debug);
        if let Some(stream) = self.previous_stream.take() {
            set_default_stream(stream);
        }
    }
}

/// Matches an uncolored record line and captures label, name and text.
pub fn plain_record() -> Regex {
    Regex::new(r"^\d{4} \d{2} \d{2} \| \d{2} \d{2} \d{2} \| ([A-Z]+) \| ([^|]+) \| (.*)$").unwrap()
}

/// Matches a colored record line and captures color, label, name and text.
pub fn colored_record() -> Regex {
    Regex::new(
        r"^\d{4} \d{2} \d{2} \| \d{2} \d{2} \d{2} \| \x1b\[(\d+)m([A-Z]+)\x1b\[0m \| \x1b\[35m([^\x1b]+)\x1b\[0m \| (.*)$",
    )
    .unwrap()
}
