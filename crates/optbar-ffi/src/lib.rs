//! C FFI bindings for optbar.
//!
//! Exposes the optimization barrier to C and other languages with a C
//! ABI. The header `include/optbar.h` is generated by `build.rs`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod barrier;
pub mod strategy;

pub use barrier::{optbar_prevent_optimization, optbar_sentinel_pid, optbar_touch};
pub use strategy::{optbar_active_strategy, OptbarStrategy};
