//! The [`Barrier`] trait and one implementor per [`BarrierStrategy`].
//!
//! [`ActiveBarrier`] aliases the implementor selected at build time. The
//! alias and [`ACTIVE_STRATEGY`] are checked against each other at compile
//! time, so the two can never disagree.

use crate::sink;
use crate::strategy::{BarrierStrategy, ACTIVE_STRATEGY};

/// A way of making an address opaque to the optimizer.
///
/// After `touch(addr)` the compiler must assume the pointee may have been
/// read (and, for the assembly barrier, written), so any computation that
/// produced it has to be materialized before the call.
pub trait Barrier {
    /// The strategy this barrier implements.
    const STRATEGY: BarrierStrategy;

    /// Emit the barrier for `addr`. Never dereferences `addr`.
    fn touch(addr: *const u8);
}

/// Empty inline assembly with the address as a register operand.
///
/// The block declares neither `nomem` nor `readonly`, which is the Rust
/// spelling of a `"memory"` clobber: everything reachable through `addr`
/// is considered read and possibly modified.
#[cfg(any(
    target_arch = "x86",
    target_arch = "x86_64",
    target_arch = "arm",
    target_arch = "aarch64",
    target_arch = "riscv32",
    target_arch = "riscv64",
    target_arch = "loongarch64",
))]
#[derive(Clone, Copy, Debug, Default)]
pub struct AsmBarrier;

#[cfg(any(
    target_arch = "x86",
    target_arch = "x86_64",
    target_arch = "arm",
    target_arch = "aarch64",
    target_arch = "riscv32",
    target_arch = "riscv64",
    target_arch = "loongarch64",
))]
impl Barrier for AsmBarrier {
    const STRATEGY: BarrierStrategy = BarrierStrategy::Assembly;

    #[inline(always)]
    #[allow(unsafe_code)]
    fn touch(addr: *const u8) {
        // SAFETY: the template is a comment; no instruction executes and
        // `addr` is only placed in a register.
        unsafe {
            core::arch::asm!("/* {0} */", in(reg) addr, options(nostack, preserves_flags));
        }
    }
}

/// `core::hint::black_box` on the address.
///
/// Best effort by the language's own definition, but available on every
/// target and backend.
#[derive(Clone, Copy, Debug, Default)]
pub struct IntrinsicBarrier;

impl Barrier for IntrinsicBarrier {
    const STRATEGY: BarrierStrategy = BarrierStrategy::Intrinsic;

    #[inline(always)]
    fn touch(addr: *const u8) {
        let _ = core::hint::black_box(addr);
    }
}

/// Publishes the address through the process-wide sink.
///
/// Last resort: see [`sink`](crate::sink).
#[derive(Clone, Copy, Debug, Default)]
pub struct SinkBarrier;

impl Barrier for SinkBarrier {
    const STRATEGY: BarrierStrategy = BarrierStrategy::GlobalSink;

    #[inline]
    fn touch(addr: *const u8) {
        sink::store(addr);
    }
}

/// The barrier compiled into this build.
#[cfg(feature = "force-global-sink")]
pub type ActiveBarrier = SinkBarrier;

/// The barrier compiled into this build.
#[cfg(all(
    not(feature = "force-global-sink"),
    any(
        feature = "force-intrinsic",
        not(any(
            target_arch = "x86",
            target_arch = "x86_64",
            target_arch = "arm",
            target_arch = "aarch64",
            target_arch = "riscv32",
            target_arch = "riscv64",
            target_arch = "loongarch64",
        ))
    )
))]
pub type ActiveBarrier = IntrinsicBarrier;

/// The barrier compiled into this build.
#[cfg(all(
    not(feature = "force-global-sink"),
    not(feature = "force-intrinsic"),
    any(
        target_arch = "x86",
        target_arch = "x86_64",
        target_arch = "arm",
        target_arch = "aarch64",
        target_arch = "riscv32",
        target_arch = "riscv64",
        target_arch = "loongarch64",
    )
))]
pub type ActiveBarrier = AsmBarrier;

const _: () = assert!(ActiveBarrier::STRATEGY as u8 == ACTIVE_STRATEGY as u8);

/// Emit the active barrier for `addr` without the process-id check.
///
/// Cheaper than [`prevent_optimization`](crate::prevent_optimization) and
/// never reads through `addr`, so `addr` may be null or dangling.
#[inline(always)]
pub fn touch(addr: *const u8) {
    ActiveBarrier::touch(addr);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaves_value_unchanged<B: Barrier>() {
        let mut acc = 0u64;
        for i in 0..1_000u64 {
            acc = acc.wrapping_mul(31).wrapping_add(i);
        }
        let before = acc;
        B::touch((&acc as *const u64).cast());
        assert_eq!(acc, before);
    }

    #[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
    #[test]
    fn asm_barrier_leaves_value_unchanged() {
        leaves_value_unchanged::<AsmBarrier>();
    }

    #[test]
    fn intrinsic_barrier_leaves_value_unchanged() {
        leaves_value_unchanged::<IntrinsicBarrier>();
    }

    #[test]
    fn sink_barrier_leaves_value_unchanged() {
        leaves_value_unchanged::<SinkBarrier>();
    }

    #[test]
    fn strategies_match_implementors() {
        assert_eq!(IntrinsicBarrier::STRATEGY, BarrierStrategy::Intrinsic);
        assert_eq!(SinkBarrier::STRATEGY, BarrierStrategy::GlobalSink);
        assert_eq!(ActiveBarrier::STRATEGY, ACTIVE_STRATEGY);
    }

    // Storing null would race with the sink's own test.
    #[cfg(not(feature = "force-global-sink"))]
    #[test]
    fn touch_accepts_null() {
        touch(std::ptr::null());
    }
}
