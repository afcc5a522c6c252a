//! Test utilities and mock types for optbar development.
//!
//! Provides [`ProcessIdentity`] mocks for driving the sentinel branch
//! without running as PID 1, and [`capture`] for collecting whatever the
//! sentinel path writes.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::sync::atomic::{AtomicUsize, Ordering};

use optbar::{ProcessIdentity, SENTINEL_PID};

/// A process identity that always reports the same id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedPid(pub u32);

impl FixedPid {
    /// An identity that triggers the sentinel echo.
    pub const SENTINEL: FixedPid = FixedPid(SENTINEL_PID);

    /// An identity that never triggers it.
    pub const ORDINARY: FixedPid = FixedPid(4242);
}

impl ProcessIdentity for FixedPid {
    fn pid(&self) -> u32 {
        self.0
    }
}

/// Mock identity that counts how often it is queried.
///
/// Atomic so it can be shared across threads in concurrency tests.
#[derive(Debug)]
pub struct CountingPid {
    pid: u32,
    queries: AtomicUsize,
}

impl CountingPid {
    pub fn new(pid: u32) -> Self {
        Self {
            pid,
            queries: AtomicUsize::new(0),
        }
    }

    /// Number of `pid()` calls so far.
    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::Relaxed)
    }
}

impl ProcessIdentity for CountingPid {
    fn pid(&self) -> u32 {
        self.queries.fetch_add(1, Ordering::Relaxed);
        self.pid
    }
}

/// Output opener that appends the sentinel byte to `out`.
///
/// Pass as the `open` argument of
/// [`prevent_optimization_with`](optbar::prevent_optimization_with).
pub fn capture<'a>(out: &'a mut Vec<u8>) -> impl FnOnce() -> &'a mut Vec<u8> + 'a {
    move || out
}

/// Output opener that fails the test if it is ever called.
pub fn never_opened() -> impl FnOnce() -> Vec<u8> {
    || -> Vec<u8> { panic!("sentinel output opened for a non-sentinel process") }
}
