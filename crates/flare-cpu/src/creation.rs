//! Constant generators for the CPU engine

use flare_core::{CreationOps, DType, Dim4, Handle, Result};
use num_complex::Complex;

use crate::convert::coerce_value;
use crate::storage::{self, Storage};
use crate::CpuEngine;

impl CreationOps for CpuEngine {
    fn constant(value: f64, dims: Dim4, dtype: DType) -> Result<Handle> {
        let v = coerce_value(Complex::new(value, 0.0), dtype);
        Ok(storage::insert(Storage::filled(dtype, dims, v)))
    }

    fn constant_c32(value: Complex<f32>, dims: Dim4) -> Result<Handle> {
        let v = Complex::new(f64::from(value.re), f64::from(value.im));
        Ok(storage::insert(Storage::filled(DType::Complex64, dims, v)))
    }

    fn constant_c64(value: Complex<f64>, dims: Dim4) -> Result<Handle> {
        Ok(storage::insert(Storage::filled(DType::Complex128, dims, value)))
    }
}
