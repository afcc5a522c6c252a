//! The barrier entry points.

use std::ffi::c_void;

use optbar::SENTINEL_PID;

/// Keep the value at `value` from being optimized away.
///
/// `value` must point to at least one readable byte. If the calling
/// process is PID 1 that byte is written to stdout. A null `value` only
/// gets the barrier: no process id query, no read.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn optbar_prevent_optimization(value: *const c_void) {
    if value.is_null() {
        optbar::touch(value.cast());
        return;
    }
    // SAFETY: non-null checked above; readability is the caller's contract.
    unsafe { optbar::prevent_optimization_raw(value) }
}

/// The barrier alone, without the process id check. `value` is never
/// dereferenced and may be null.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn optbar_touch(value: *const c_void) {
    optbar::touch(value.cast());
}

/// The process id that triggers the stdout echo (always 1).
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn optbar_sentinel_pid() -> u32 {
    SENTINEL_PID
}
