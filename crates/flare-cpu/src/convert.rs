//! Type conversion for the CPU engine

use flare_core::{ConvertOps, DType, Handle, Result};
use num_complex::Complex;

use crate::storage::{self, Storage};
use crate::CpuEngine;

/// Quantize an interchange value to a dtype's representable set.
///
/// Non-complex targets drop the imaginary part first; integer targets
/// truncate toward zero (saturating at the dtype's bounds); `Bool` maps
/// nonzero to one; single-precision targets round components through f32.
pub(crate) fn coerce_value(v: Complex<f64>, dtype: DType) -> Complex<f64> {
    match dtype {
        DType::Bool => Complex::new(if v.re != 0.0 { 1.0 } else { 0.0 }, 0.0),
        DType::UInt8 => Complex::new(f64::from(v.re as u8), 0.0),
        DType::Int32 => Complex::new(f64::from(v.re as i32), 0.0),
        DType::UInt32 => Complex::new(f64::from(v.re as u32), 0.0),
        DType::Float32 => Complex::new(f64::from(v.re as f32), 0.0),
        DType::Float64 => Complex::new(v.re, 0.0),
        DType::Complex64 => Complex::new(f64::from(v.re as f32), f64::from(v.im as f32)),
        DType::Complex128 => v,
    }
}

impl ConvertOps for CpuEngine {
    fn cast(handle: Handle, dtype: DType) -> Result<Handle> {
        let storage = storage::with(handle, |s| {
            Ok(Storage::new(
                dtype,
                s.dims,
                s.data.mapv(|v| coerce_value(v, dtype)),
            ))
        })?;
        Ok(storage::insert(storage))
    }
}
