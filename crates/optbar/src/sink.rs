//! Process-wide sink for the [`GlobalSink`](crate::BarrierStrategy::GlobalSink)
//! fallback.
//!
//! Storing an address into a public atomic is an observable side effect the
//! optimizer must keep, but it is weaker than the other strategies: it pins
//! the address, not the pointee. Only used when a build explicitly asks for
//! it.

use std::ptr;
use std::sync::atomic::{AtomicPtr, Ordering};

static SINK: AtomicPtr<u8> = AtomicPtr::new(ptr::null_mut());

/// Record `addr` as the most recently sunk address.
///
/// The address is never dereferenced afterwards.
#[inline]
pub(crate) fn store(addr: *const u8) {
    SINK.store(addr.cast_mut(), Ordering::Relaxed);
}

/// The address most recently passed to the sink, or null if none was.
///
/// Concurrent callers overwrite each other; the result is only meaningful
/// as "some address that was sunk".
pub fn last_sunk() -> *const u8 {
    SINK.load(Ordering::Relaxed)
}
