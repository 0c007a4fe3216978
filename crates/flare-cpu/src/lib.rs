//! CPU reference engine for Flare
//!
//! Implements the engine-boundary contract with a thread-local registry of
//! reference-counted storage slots and ndarray-backed kernels. Handles are
//! per-thread: a handle minted on one thread means nothing on another.

mod compare;
mod convert;
mod creation;
mod lifecycle;
mod math;
mod query;
mod random;
mod storage;

use flare_core::{Engine, Error, Handle, Result};
use num_complex::Complex;

/// The reference engine. All state lives in a thread-local registry; the
/// type itself is a stateless tag.
pub struct CpuEngine;

impl Engine for CpuEngine {
    fn name() -> &'static str {
        "cpu"
    }

    fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}

impl CpuEngine {
    /// Number of live registry slots on this thread. Test support: lets
    /// suites assert that every handle is released exactly once.
    pub fn live_handles() -> usize {
        storage::live_count()
    }

    /// Overwrite one element, addressed by flat index, through any handle
    /// that reaches the storage. Test support: makes weak-copy aliasing
    /// observable.
    pub fn set_flat(handle: Handle, index: usize, value: f64) -> Result<()> {
        storage::with_mut(handle, |s| match s.data.iter_mut().nth(index) {
            Some(v) => {
                *v = Complex::new(value, 0.0);
                Ok(())
            }
            None => Err(Error::InvalidArgument(format!(
                "flat index {index} out of bounds"
            ))),
        })
    }
}

/// Convenience alias for frontend values driven by this engine.
pub type CpuArray = flare_core::Array<CpuEngine>;
