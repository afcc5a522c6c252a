//! Optimization barrier for benchmarks.
//!
//! [`prevent_optimization`] makes a value look observably used, so the
//! computation that produced it survives dead-code elimination and constant
//! folding:
//!
//! ```rust
//! fn sum_of_squares(n: u64) -> u64 {
//!     (1..=n).map(|i| i * i).sum()
//! }
//!
//! let x = sum_of_squares(10_000);
//! optbar::prevent_optimization(&x);
//! ```
//!
//! Each call does two things:
//!
//! 1. Emits the barrier selected at build time ([`ACTIVE_STRATEGY`]): an
//!    empty inline-assembly block on common architectures,
//!    `core::hint::black_box` elsewhere, or a global sink when the
//!    `force-global-sink` feature is enabled.
//! 2. Queries the process id and, if it is [`SENTINEL_PID`], writes the
//!    value's first byte to stdout. This never happens for an ordinary
//!    process; it exists so the optimizer cannot prove the value's bytes are
//!    never read.
//!
//! Off the sentinel path a call never allocates and never blocks.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod barrier;
pub mod error;
pub mod pid;
pub mod sentinel;
pub mod sink;
pub mod strategy;

use std::ffi::c_void;
use std::io::{self, Write};
use std::mem;

pub use barrier::{touch, ActiveBarrier, Barrier, IntrinsicBarrier, SinkBarrier};
pub use error::ParseStrategyError;
pub use pid::{CurrentProcess, ProcessIdentity};
pub use sentinel::SENTINEL_PID;
pub use strategy::{BarrierStrategy, ACTIVE_STRATEGY};

#[cfg(any(
    target_arch = "x86",
    target_arch = "x86_64",
    target_arch = "arm",
    target_arch = "aarch64",
    target_arch = "riscv32",
    target_arch = "riscv64",
    target_arch = "loongarch64",
))]
pub use barrier::AsmBarrier;

/// Keep `value` and the computation that produced it from being optimized
/// away.
///
/// Does not modify `value`. Zero-sized values get the barrier but are never
/// echoed, as they have no byte to read.
#[inline]
pub fn prevent_optimization<T: ?Sized>(value: &T) {
    prevent_optimization_with(value, &CurrentProcess, io::stdout);
}

/// [`prevent_optimization`] with an explicit process identity and output.
///
/// `open` is only called on the sentinel path.
#[inline]
#[allow(unsafe_code)]
pub fn prevent_optimization_with<T, P, W, F>(value: &T, identity: &P, open: F)
where
    T: ?Sized,
    P: ProcessIdentity + ?Sized,
    W: Write,
    F: FnOnce() -> W,
{
    let addr = (value as *const T).cast::<u8>();
    if mem::size_of_val(value) == 0 {
        touch(addr);
        return;
    }
    // SAFETY: `value` is a live reference to at least one byte.
    unsafe { prevent_optimization_raw_with(addr.cast(), identity, open) }
}

/// Pointer form of [`prevent_optimization`].
///
/// # Safety
///
/// `value` must be non-null and valid for a one-byte read for the duration
/// of the call. The read only happens when the process id is
/// [`SENTINEL_PID`], but the contract holds regardless.
#[inline]
#[allow(unsafe_code)]
pub unsafe fn prevent_optimization_raw(value: *const c_void) {
    // SAFETY: forwarded from the caller.
    unsafe { prevent_optimization_raw_with(value, &CurrentProcess, io::stdout) }
}

/// Pointer form of [`prevent_optimization_with`].
///
/// # Safety
///
/// Same contract as [`prevent_optimization_raw`].
#[inline]
#[allow(unsafe_code)]
pub unsafe fn prevent_optimization_raw_with<P, W, F>(value: *const c_void, identity: &P, open: F)
where
    P: ProcessIdentity + ?Sized,
    W: Write,
    F: FnOnce() -> W,
{
    let addr = value.cast::<u8>();
    touch(addr);
    if sentinel::is_sentinel(identity) {
        // SAFETY: the caller guarantees one readable byte at `addr`.
        let byte = unsafe { addr.read() };
        sentinel::echo(byte, open());
    }
}

/// Apply [`prevent_optimization`] to each argument, in order.
///
/// Arguments are borrowed, not moved; temporaries live until the end of the
/// statement.
///
/// ```rust
/// let a = 3u32.pow(7);
/// let b = vec![1u8, 2, 3];
/// optbar::prevent_optimization!(a, b, a + 1);
/// assert_eq!(b.len(), 3);
/// ```
#[macro_export]
macro_rules! prevent_optimization {
    ($($value:expr),+ $(,)?) => {{
        $( $crate::prevent_optimization(&$value); )+
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    // Local mocks: `optbar-test-utils` implements the trait of its own copy
    // of this crate, which unit tests here cannot use.
    fn capture<'a>(out: &'a mut Vec<u8>) -> impl FnOnce() -> &'a mut Vec<u8> + 'a {
        move || out
    }

    struct Fixed(u32);

    impl ProcessIdentity for Fixed {
        fn pid(&self) -> u32 {
            self.0
        }
    }

    struct Counting {
        pid: u32,
        calls: Cell<usize>,
    }

    impl ProcessIdentity for Counting {
        fn pid(&self) -> u32 {
            self.calls.set(self.calls.get() + 1);
            self.pid
        }
    }

    #[test]
    fn value_unchanged() {
        let x = 0xDEAD_BEEF_u64;
        prevent_optimization(&x);
        assert_eq!(x, 0xDEAD_BEEF);
    }

    #[test]
    fn non_sentinel_pid_writes_nothing() {
        let x = b'A';
        let mut out = Vec::new();
        prevent_optimization_with(&x, &Fixed(4242), capture(&mut out));
        assert!(out.is_empty());
    }

    #[test]
    fn non_sentinel_pid_never_opens_output() {
        let x = 9u32;
        prevent_optimization_with(&x, &Fixed(2), || -> Vec<u8> {
            panic!("output opened off the sentinel path")
        });
    }

    #[test]
    fn sentinel_pid_writes_first_byte() {
        let x = b'A';
        let mut out = Vec::new();
        prevent_optimization_with(&x, &Fixed(SENTINEL_PID), capture(&mut out));
        assert_eq!(out, [0x41]);
    }

    #[test]
    fn sentinel_reads_only_the_first_byte() {
        let bytes = *b"ABCD";
        let mut out = Vec::new();
        prevent_optimization_with(&bytes[..], &Fixed(1), capture(&mut out));
        assert_eq!(out, b"A");
    }

    #[test]
    fn zero_sized_values_never_echo() {
        let mut out = Vec::new();
        prevent_optimization_with(&(), &Fixed(1), capture(&mut out));
        let empty: &[u8] = &[];
        prevent_optimization_with(empty, &Fixed(1), capture(&mut out));
        assert!(out.is_empty());
    }

    #[test]
    fn identity_queried_once_per_call() {
        let id = Counting {
            pid: 7,
            calls: Cell::new(0),
        };
        let x = 1u8;
        for _ in 0..5 {
            prevent_optimization_with(&x, &id, io::sink);
        }
        assert_eq!(id.calls.get(), 5);
    }

    #[test]
    #[allow(unsafe_code)]
    fn raw_form_matches_safe_form() {
        let x = b'z';
        let mut out = Vec::new();
        // SAFETY: `x` is a live byte.
        unsafe {
            prevent_optimization_raw_with((&x as *const u8).cast(), &Fixed(1), capture(&mut out));
        }
        assert_eq!(out, b"z");
    }

    #[test]
    fn unsized_values_accepted() {
        let s: &str = "hello";
        prevent_optimization(s);
        let v: Box<[u32]> = vec![1, 2, 3].into_boxed_slice();
        prevent_optimization(&*v);
        assert_eq!(&*v, &[1, 2, 3]);
    }

    #[test]
    fn macro_touches_every_argument_once() {
        let evaluated = Cell::new(0);
        let next = || {
            evaluated.set(evaluated.get() + 1);
            evaluated.get()
        };
        let a = 10u8;
        prevent_optimization!(a, next(), next(),);
        assert_eq!(evaluated.get(), 2);
        assert_eq!(a, 10);
    }

    #[test]
    fn concurrent_calls_on_distinct_addresses() {
        let handles: Vec<_> = (0..8u64)
            .map(|t| {
                std::thread::spawn(move || {
                    let mut acc = t;
                    for i in 0..10_000u64 {
                        acc = acc.wrapping_mul(6364136223846793005).wrapping_add(i);
                        prevent_optimization(&acc);
                    }
                    acc
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn never_alters_bytes(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
                let before = bytes.clone();
                prevent_optimization(&bytes[..]);
                prevent_optimization(&bytes);
                prop_assert_eq!(bytes, before);
            }

            #[test]
            fn sentinel_echo_is_first_byte(
                bytes in proptest::collection::vec(any::<u8>(), 1..64),
                pid in any::<u32>(),
            ) {
                let mut out = Vec::new();
                prevent_optimization_with(&bytes[..], &Fixed(pid), capture(&mut out));
                if pid == SENTINEL_PID {
                    prop_assert_eq!(out, vec![bytes[0]]);
                } else {
                    prop_assert!(out.is_empty());
                }
            }
        }
    }
}
