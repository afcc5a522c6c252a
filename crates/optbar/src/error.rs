//! Error types for optbar.
//!
//! The barrier itself cannot fail. The only fallible surface is naming a
//! strategy, e.g. when a bench selects which strategies to measure.

use std::error::Error;
use std::fmt;

/// A strategy name did not match any [`BarrierStrategy`](crate::BarrierStrategy).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseStrategyError {
    /// The rejected input, verbatim.
    pub input: String,
}

impl fmt::Display for ParseStrategyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown barrier strategy '{}' (expected assembly, intrinsic or global-sink)",
            self.input
        )
    }
}

impl Error for ParseStrategyError {}
