//! Barrier strategies and build-time selection of the active one.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseStrategyError;

/// How an optimization barrier hides a value from the optimizer.
///
/// Exactly one strategy is active per build, see [`ACTIVE_STRATEGY`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BarrierStrategy {
    /// An empty inline-assembly block that takes the address as an operand
    /// and may read or write any memory.
    Assembly,
    /// `core::hint::black_box` on the address.
    Intrinsic,
    /// Store the address into a process-wide atomic. Last resort for
    /// toolchains where neither of the above is trustworthy.
    GlobalSink,
}

impl BarrierStrategy {
    /// Every strategy, in order of preference.
    pub const ALL: [BarrierStrategy; 3] = [
        BarrierStrategy::Assembly,
        BarrierStrategy::Intrinsic,
        BarrierStrategy::GlobalSink,
    ];

    /// Canonical lowercase name, as accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            Self::Assembly => "assembly",
            Self::Intrinsic => "intrinsic",
            Self::GlobalSink => "global-sink",
        }
    }

    /// Whether this strategy can be compiled for the current target.
    pub const fn is_available(self) -> bool {
        match self {
            Self::Assembly => ASM_SUPPORTED,
            Self::Intrinsic | Self::GlobalSink => true,
        }
    }
}

impl fmt::Display for BarrierStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for BarrierStrategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "assembly" | "asm" => Ok(Self::Assembly),
            "intrinsic" => Ok(Self::Intrinsic),
            "global-sink" | "sink" => Ok(Self::GlobalSink),
            _ => Err(ParseStrategyError {
                input: s.to_string(),
            }),
        }
    }
}

/// Whether the target architecture has an assembly barrier.
pub(crate) const ASM_SUPPORTED: bool = cfg!(any(
    target_arch = "x86",
    target_arch = "x86_64",
    target_arch = "arm",
    target_arch = "aarch64",
    target_arch = "riscv32",
    target_arch = "riscv64",
    target_arch = "loongarch64",
));

/// The strategy compiled into this build.
///
/// `force-global-sink` wins over `force-intrinsic`; without either feature
/// the assembly barrier is used wherever the architecture supports it.
pub const ACTIVE_STRATEGY: BarrierStrategy = if cfg!(feature = "force-global-sink") {
    BarrierStrategy::GlobalSink
} else if cfg!(feature = "force-intrinsic") || !ASM_SUPPORTED {
    BarrierStrategy::Intrinsic
} else {
    BarrierStrategy::Assembly
};
