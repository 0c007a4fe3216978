//! Generator factory functions
//!
//! Free functions producing fresh array values from the engine's
//! generators. They never touch an existing value; operand coercion and
//! scalar assignment are built on `constant`.

use num_complex::Complex;

use crate::array::Array;
use crate::dim::Dim4;
use crate::dtype::DType;
use crate::engine::Engine;
use crate::error::Result;

/// Array of the given shape and dtype with every element equal to `value`
/// (quantized to the dtype).
pub fn constant<E: Engine>(value: f64, dims: Dim4, dtype: DType) -> Result<Array<E>> {
    Ok(Array::from_handle(E::constant(value, dims, dtype)?))
}

/// Single-precision complex constant array; the dtype is `Complex64`.
pub fn constant_c32<E: Engine>(value: Complex<f32>, dims: Dim4) -> Result<Array<E>> {
    Ok(Array::from_handle(E::constant_c32(value, dims)?))
}

/// Double-precision complex constant array; the dtype is `Complex128`.
pub fn constant_c64<E: Engine>(value: Complex<f64>, dims: Dim4) -> Result<Array<E>> {
    Ok(Array::from_handle(E::constant_c64(value, dims)?))
}

/// Uniform random fill: [0, 1) for floating dtypes, full range for
/// integer dtypes.
pub fn randu<E: Engine>(dims: Dim4, dtype: DType) -> Result<Array<E>> {
    Ok(Array::from_handle(E::randu(dims, dtype)?))
}

/// Standard normal random fill; floating dtypes only.
pub fn randn<E: Engine>(dims: Dim4, dtype: DType) -> Result<Array<E>> {
    Ok(Array::from_handle(E::randn(dims, dtype)?))
}
