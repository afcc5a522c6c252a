//! C-compatible mirror of [`BarrierStrategy`].

use optbar::{BarrierStrategy, ACTIVE_STRATEGY};

/// Barrier strategy compiled into the library. Values are ABI-stable.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptbarStrategy {
    /// Empty inline assembly with a memory clobber.
    Assembly = 0,
    /// `core::hint::black_box`.
    Intrinsic = 1,
    /// Process-wide sink variable (last-resort fallback).
    GlobalSink = 2,
}

impl From<BarrierStrategy> for OptbarStrategy {
    fn from(s: BarrierStrategy) -> Self {
        match s {
            BarrierStrategy::Assembly => OptbarStrategy::Assembly,
            BarrierStrategy::Intrinsic => OptbarStrategy::Intrinsic,
            BarrierStrategy::GlobalSink => OptbarStrategy::GlobalSink,
        }
    }
}

impl From<OptbarStrategy> for BarrierStrategy {
    fn from(s: OptbarStrategy) -> Self {
        match s {
            OptbarStrategy::Assembly => BarrierStrategy::Assembly,
            OptbarStrategy::Intrinsic => BarrierStrategy::Intrinsic,
            OptbarStrategy::GlobalSink => BarrierStrategy::GlobalSink,
        }
    }
}

/// Report which barrier strategy this library was built with.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn optbar_active_strategy() -> OptbarStrategy {
    ACTIVE_STRATEGY.into()
}
