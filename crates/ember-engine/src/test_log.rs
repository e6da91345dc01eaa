//! Log capture for unit tests.
//!
//! Installs itself as the process logger on first use. Records are kept per
//! thread so parallel tests only see their own output.

use std::cell::RefCell;
use std::sync::Once;

use log::{Level, LevelFilter, Log, Metadata, Record};

thread_local! {
    static RECORDS: RefCell<Vec<(Level, String)>> = const { RefCell::new(Vec::new()) };
}

struct Capture;

static CAPTURE: Capture = Capture;

impl Log for Capture {
    fn enabled(&self, _: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        RECORDS.with(|r| r.borrow_mut().push((record.level(), record.args().to_string())));
    }

    fn flush(&self) {}
}

pub(crate) fn install() {
    static INSTALL: Once = Once::new();
    INSTALL.call_once(|| {
        if log::set_logger(&CAPTURE).is_ok() {
            log::set_max_level(LevelFilter::Trace);
        }
    });
}

/// Runs `f` and returns its result with everything it logged on this thread.
pub(crate) fn capture<R>(f: impl FnOnce() -> R) -> (R, Vec<(Level, String)>) {
    install();
    RECORDS.with(|r| r.borrow_mut().clear());
    let out = f();
    let records = RECORDS.with(|r| r.borrow_mut().drain(..).collect());
    (out, records)
}
