// src/internal/output/stream.rs

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError, RwLock};

use crate::internal::severity::Severity;

/// A writable destination shared between loggers.
///
/// Every clone points at the same writer. Writes go through one mutex per
/// destination, so whole emissions are serialized against each other.
#[derive(Clone)]
pub struct SharedStream {
    inner: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl SharedStream {
    pub fn new<W>(writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            inner: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }

    /// Open (or create) a log file, creating parent directories as needed.
    /// With `append == false` an existing file is truncated.
    pub fn file(path: impl AsRef<Path>, append: bool) -> io::Result<Self> {
        Ok(Self::new(open_log_file(path.as_ref(), append)?))
    }

    /// Exclusive access to the writer for the duration of the guard.
    pub fn lock(&self) -> MutexGuard<'_, Box<dyn Write + Send>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// True when both handles refer to the same destination.
    pub fn same_as(&self, other: &SharedStream) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for SharedStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedStream")
            .field("handles", &Arc::strong_count(&self.inner))
            .finish()
    }
}

fn open_log_file(path: &Path, append: bool) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut options = OpenOptions::new();
    options.create(true);
    if append {
        options.append(true);
    } else {
        options.write(true).truncate(true);
    }
    options.open(path)
}

// Process-wide defaults. Read on every emission, never cached by loggers.

static DEFAULT_THRESHOLD: AtomicU8 = AtomicU8::new(Severity::Debug as u8);
static DEFAULT_STREAM: OnceLock<RwLock<SharedStream>> = OnceLock::new();

fn default_stream_cell() -> &'static RwLock<SharedStream> {
    DEFAULT_STREAM.get_or_init(|| RwLock::new(SharedStream::stdout()))
}

/// Threshold used by loggers without their own override.
pub fn default_threshold() -> Severity {
    let raw = DEFAULT_THRESHOLD.load(Ordering::Relaxed);
    Severity::try_from(raw).unwrap_or(Severity::Debug)
}

pub fn set_default_threshold(severity: Severity) {
    DEFAULT_THRESHOLD.store(severity.as_u8(), Ordering::Relaxed);
}

/// Destination used by loggers without their own override.
pub fn default_stream() -> SharedStream {
    default_stream_cell()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Replace the process-wide destination, returning the previous one.
pub fn set_default_stream(stream: SharedStream) -> SharedStream {
    let mut guard = default_stream_cell()
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    std::mem::replace(&mut *guard, stream)
}
