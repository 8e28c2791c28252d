//! Logger behavior against the process-wide defaults

use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use minori::{
    default_threshold, log_info, log_warn, CaptureBuffer, FormatOptions, Logger, Severity,
    SharedStream,
};

mod common;
use common::{colored_record, global_lock, plain_record, DefaultsGuard};

fn plain() -> FormatOptions {
    FormatOptions {
        include_caller_tag: false,
        ansi: false,
    }
}

#[test]
fn test_worked_example() {
    let _lock = global_lock();
    let buffer = CaptureBuffer::new();
    let _defaults = DefaultsGuard::install(Severity::Warn, buffer.stream());

    let app = Logger::root("app");
    app.warn("disk low");
    app.info("started");

    let lines = buffer.lines();
    assert_eq!(lines.len(), 1);
    let caps = colored_record().captures(&lines[0]).expect("record pattern");
    assert_eq!(&caps[1], "33");
    assert_eq!(&caps[2], "WARN");
    assert_eq!(&caps[3], "app");
    assert_eq!(&caps[4], "disk low");

    buffer.clear();
    minori::set_default_threshold(Severity::Debug);
    app.debug("x\n\ny");

    let records: Vec<(String, String, String)> = buffer
        .lines()
        .iter()
        .map(|line| {
            let caps = colored_record().captures(line).expect("record pattern");
            (caps[2].to_string(), caps[3].to_string(), caps[4].to_string())
        })
        .collect();
    assert_eq!(
        records,
        vec![
            ("DEBUG".to_string(), "app".to_string(), "x".to_string()),
            ("DEBUG".to_string(), "app".to_string(), "y".to_string()),
        ]
    );
}

#[test]
fn test_threshold_boundaries_for_every_level() {
    let _lock = global_lock();
    let buffer = CaptureBuffer::new();
    let _defaults = DefaultsGuard::install(Severity::Debug, buffer.stream());
    let logger = Logger::root("grid").with_format(plain());

    for threshold in Severity::ALL {
        minori::set_default_threshold(threshold);
        for record in Severity::ALL {
            buffer.clear();
            let written = logger.emit(record, "check");
            let expected = usize::from(record != Severity::Off && record <= threshold);
            assert_eq!(
                written, expected,
                "record {:?} at threshold {:?}",
                record, threshold
            );
            assert_eq!(buffer.lines().len(), expected);
        }
    }
}

#[test]
fn test_existing_loggers_see_threshold_changes() {
    let _lock = global_lock();
    let buffer = CaptureBuffer::new();
    let _defaults = DefaultsGuard::install(Severity::Debug, buffer.stream());

    let child = Logger::root("app").child("worker").with_format(plain());
    minori::set_default_threshold(Severity::Warn);
    assert_eq!(default_threshold(), Severity::Warn);

    child.info("hidden");
    child.warn("shown");

    let lines = buffer.lines();
    assert_eq!(lines.len(), 1);
    let caps = plain_record().captures(&lines[0]).unwrap();
    assert_eq!(&caps[1], "WARN");
    assert_eq!(&caps[2], "app/worker");
}

#[test]
fn test_existing_loggers_see_stream_changes() {
    let _lock = global_lock();
    let first = CaptureBuffer::new();
    let second = CaptureBuffer::new();
    let _defaults = DefaultsGuard::install(Severity::Debug, first.stream());

    let logger = Logger::root("app").child("net");
    logger.info("one");
    minori::set_default_stream(second.stream());
    logger.info("two");

    assert_eq!(first.lines().len(), 1);
    assert_eq!(second.lines().len(), 1);
    assert!(second.contents().ends_with("two\n"));
}

#[test]
fn test_override_ignores_global_changes() {
    let _lock = global_lock();
    let global = CaptureBuffer::new();
    let pinned = CaptureBuffer::new();
    let _defaults = DefaultsGuard::install(Severity::Off, global.stream());

    let logger = Logger::root("app")
        .with_threshold(Severity::Info)
        .with_stream(pinned.stream());
    let child = logger.child("db");

    child.info("kept");
    child.debug("dropped");

    assert!(global.is_empty());
    assert_eq!(pinned.lines().len(), 1);
}

#[test]
fn test_pinned_root_stream_does_not_follow_global() {
    let _lock = global_lock();
    let first = CaptureBuffer::new();
    let second = CaptureBuffer::new();
    let _defaults = DefaultsGuard::install(Severity::Debug, first.stream());

    let pinned = Logger::root("pinned").with_stream(minori::default_stream());
    minori::set_default_stream(second.stream());
    pinned.info("still first");

    assert_eq!(first.lines().len(), 1);
    assert!(second.is_empty());
}

#[test]
fn test_macros_format_arguments() {
    let buffer = CaptureBuffer::new();
    let logger = Logger::root("svc")
        .with_threshold(Severity::Debug)
        .with_stream(buffer.stream())
        .with_format(plain());

    log_info!(logger, "listening on {}:{}", "0.0.0.0", 8080);
    log_warn!(logger.caller("ignored"), "{} slow queries", 3);

    let texts: Vec<String> = buffer
        .lines()
        .iter()
        .map(|line| plain_record().captures(line).unwrap()[3].to_string())
        .collect();
    assert_eq!(texts, vec!["listening on 0.0.0.0:8080", "3 slow queries"]);
}

#[test]
fn test_concurrent_emissions_do_not_interleave() {
    let buffer = CaptureBuffer::new();
    let logger = Logger::root("pool")
        .with_threshold(Severity::Debug)
        .with_stream(buffer.stream())
        .with_format(plain());

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let logger = logger.child(&format!("w{}", worker));
            thread::spawn(move || {
                for i in 0..50 {
                    logger.info(format!("{}-{} a\n{}-{} b", worker, i, worker, i));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let lines = buffer.lines();
    assert_eq!(lines.len(), 8 * 50 * 2);

    let pattern = plain_record();
    for pair in lines.chunks(2) {
        let first = pattern.captures(&pair[0]).expect("record pattern");
        let second = pattern.captures(&pair[1]).expect("record pattern");
        assert_eq!(&first[2], &second[2]);
        let first_id = first[3].trim_end_matches(" a");
        let second_id = second[3].trim_end_matches(" b");
        assert_eq!(first_id, second_id);
    }
}

/// Fails only the second write.
struct FlakyWriter {
    calls: Arc<AtomicUsize>,
    inner: CaptureBuffer,
}

impl Write for FlakyWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 1 {
            return Err(io::Error::new(io::ErrorKind::Other, "flaky"));
        }
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_write_errors_do_not_stop_later_records() {
    let calls = Arc::new(AtomicUsize::new(0));
    let buffer = CaptureBuffer::new();
    let stream = SharedStream::new(FlakyWriter {
        calls: calls.clone(),
        inner: buffer.clone(),
    });
    let logger = Logger::root("io")
        .with_threshold(Severity::Debug)
        .with_stream(stream)
        .with_format(plain());

    assert_eq!(logger.emit(Severity::Info, "one\ntwo\nthree"), 3);
    assert_eq!(logger.emit(Severity::Info, "four"), 1);

    assert_eq!(calls.load(Ordering::SeqCst), 4);
    let texts: Vec<String> = buffer
        .lines()
        .iter()
        .map(|line| plain_record().captures(line).unwrap()[3].to_string())
        .collect();
    assert_eq!(texts, vec!["one", "three", "four"]);
}

#[test]
fn test_cleared_overrides_follow_globals_again() {
    let _lock = global_lock();
    let global = CaptureBuffer::new();
    let pinned = CaptureBuffer::new();
    let _defaults = DefaultsGuard::install(Severity::Warn, global.stream());

    let pinned_logger = Logger::root("app")
        .with_threshold(Severity::Debug)
        .with_stream(pinned.stream())
        .with_format(plain());
    let released = pinned_logger.clone().with_default_threshold().with_default_stream();

    pinned_logger.info("to pinned");
    released.info("filtered by global threshold");
    released.warn("to global");

    assert_eq!(pinned.lines().len(), 1);
    let lines = global.lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(&plain_record().captures(&lines[0]).unwrap()[3], "to global");
}
