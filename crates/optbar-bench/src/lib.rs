//! Reference workloads and a measurement helper for optbar benchmarks.
//!
//! - [`workloads`]: output-free computations an optimizer is free to fold
//!   or delete unless their results pass through a barrier
//! - [`measure`] / [`measure_barriered`]: wall-clock time of a closure run
//!   N times, optionally passing each result through the barrier

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod workloads;

use std::time::{Duration, Instant};

/// Run `f` `iterations` times and return the total wall-clock time.
///
/// `f` receives the iteration index so each call can vary its input and
/// defeat loop-invariant hoisting.
pub fn measure<F: FnMut(u64)>(iterations: u64, mut f: F) -> Duration {
    let start = Instant::now();
    for i in 0..iterations {
        f(i);
    }
    start.elapsed()
}

/// Like [`measure`], but every result of `f` goes through
/// [`optbar::prevent_optimization`], so the work cannot be elided.
pub fn measure_barriered<T, F: FnMut(u64) -> T>(iterations: u64, mut f: F) -> Duration {
    measure(iterations, |i| {
        let out = f(i);
        optbar::prevent_optimization(&out);
    })
}

/// Mean time per iteration, or zero if `iterations` is zero.
pub fn per_iteration(total: Duration, iterations: u64) -> Duration {
    if iterations == 0 {
        return Duration::ZERO;
    }
    let nanos = total.as_nanos() / iterations as u128;
    Duration::from_nanos(nanos.min(u64::MAX as u128) as u64)
}
