//! Behavioral test suite for Flare
//!
//! Exercises the value-semantic frontend against the CPU reference engine:
//! ownership and aliasing, the operator surface, conversion, and the
//! generator functions.

pub mod convert;
pub mod creation;
pub mod ops;
pub mod value;

/// Test utilities
pub mod utils {
    use flare_core::{constant, DType, Dim4};
    use flare_cpu::CpuArray;

    /// Check if two f64 values are approximately equal.
    pub fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        if a.is_nan() && b.is_nan() {
            return true;
        }
        if a.is_infinite() && b.is_infinite() {
            return a.signum() == b.signum();
        }
        (a - b).abs() < tol
    }

    /// Check that every value approximately equals its expected partner.
    pub fn all_approx_eq(values: &[f64], expected: &[f64], tol: f64) -> bool {
        values.len() == expected.len()
            && values
                .iter()
                .zip(expected.iter())
                .all(|(&a, &b)| approx_eq(a, b, tol))
    }

    /// A 2x2 float32 array filled with `value`.
    pub fn const_2x2(value: f64) -> CpuArray {
        constant(value, Dim4::from((2u64, 2u64)), DType::Float32).unwrap()
    }

    /// Default tolerance for floating point comparisons
    pub const DEFAULT_TOL: f64 = 1e-10;
}
