//! Element types, host-memory element mapping, and scalar operands

use num_complex::Complex;
use serde::{Deserialize, Serialize};

/// Element type tag governing storage layout and permissible operations.
///
/// `Complex64` is a pair of `f32` components, `Complex128` a pair of `f64`
/// components (NumPy naming).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DType {
    Bool,
    UInt8,
    Int32,
    UInt32,
    Float32,
    Float64,
    Complex64,
    Complex128,
}

impl DType {
    /// Size of one element in bytes.
    pub fn size(&self) -> usize {
        match self {
            DType::Bool | DType::UInt8 => 1,
            DType::Int32 | DType::UInt32 | DType::Float32 => 4,
            DType::Float64 | DType::Complex64 => 8,
            DType::Complex128 => 16,
        }
    }

    /// String representation (NumPy compatible).
    pub fn as_str(&self) -> &'static str {
        match self {
            DType::Bool => "bool",
            DType::UInt8 => "uint8",
            DType::Int32 => "int32",
            DType::UInt32 => "uint32",
            DType::Float32 => "float32",
            DType::Float64 => "float64",
            DType::Complex64 => "complex64",
            DType::Complex128 => "complex128",
        }
    }

    pub fn is_complex(&self) -> bool {
        matches!(self, DType::Complex64 | DType::Complex128)
    }

    /// Whether elements carry double-precision components.
    pub fn is_double_precision(&self) -> bool {
        matches!(self, DType::Float64 | DType::Complex128)
    }

    /// Whether elements carry single-precision components.
    pub fn is_single_precision(&self) -> bool {
        matches!(self, DType::Float32 | DType::Complex64)
    }

    pub fn is_real_floating(&self) -> bool {
        matches!(self, DType::Float32 | DType::Float64)
    }

    /// Real or complex floating point.
    pub fn is_floating(&self) -> bool {
        self.is_real_floating() || self.is_complex()
    }

    pub fn is_integer(&self) -> bool {
        !self.is_floating()
    }

    /// Common dtype for a mixed-dtype elementwise operation.
    ///
    /// Complex dominates real, double precision dominates single, floating
    /// dominates integer. Two integer dtypes pick the wider one.
    pub fn promote(self, other: DType) -> DType {
        if self == other {
            return self;
        }
        let complex = self.is_complex() || other.is_complex();
        let double = self.is_double_precision() || other.is_double_precision();
        if complex {
            if double {
                DType::Complex128
            } else {
                DType::Complex64
            }
        } else if self.is_floating() || other.is_floating() {
            if double {
                DType::Float64
            } else {
                DType::Float32
            }
        } else {
            fn rank(t: DType) -> u8 {
                match t {
                    DType::Bool => 0,
                    DType::UInt8 => 1,
                    DType::Int32 => 2,
                    DType::UInt32 => 3,
                    _ => unreachable!(),
                }
            }
            if rank(self) >= rank(other) {
                self
            } else {
                other
            }
        }
    }
}

impl std::fmt::Display for DType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Default for DType {
    fn default() -> Self {
        DType::Float32
    }
}

/// Rust element types accepted by host ingestion and readback.
///
/// Each type maps to its [`DType`] tag and embeds exactly in a
/// complex-double interchange value, which is how element data crosses the
/// engine boundary regardless of dtype. This is the closed, compile-time
/// set of supported element types; adding one means adding an impl here.
pub trait HostData: Copy + Default + 'static {
    const DTYPE: DType;

    fn into_interchange(self) -> Complex<f64>;
    fn from_interchange(value: Complex<f64>) -> Self;
}

impl HostData for bool {
    const DTYPE: DType = DType::Bool;

    fn into_interchange(self) -> Complex<f64> {
        Complex::new(if self { 1.0 } else { 0.0 }, 0.0)
    }

    fn from_interchange(value: Complex<f64>) -> Self {
        value.re != 0.0
    }
}

impl HostData for u8 {
    const DTYPE: DType = DType::UInt8;

    fn into_interchange(self) -> Complex<f64> {
        Complex::new(f64::from(self), 0.0)
    }

    fn from_interchange(value: Complex<f64>) -> Self {
        value.re as u8
    }
}

impl HostData for i32 {
    const DTYPE: DType = DType::Int32;

    fn into_interchange(self) -> Complex<f64> {
        Complex::new(f64::from(self), 0.0)
    }

    fn from_interchange(value: Complex<f64>) -> Self {
        value.re as i32
    }
}

impl HostData for u32 {
    const DTYPE: DType = DType::UInt32;

    fn into_interchange(self) -> Complex<f64> {
        Complex::new(f64::from(self), 0.0)
    }

    fn from_interchange(value: Complex<f64>) -> Self {
        value.re as u32
    }
}

impl HostData for f32 {
    const DTYPE: DType = DType::Float32;

    fn into_interchange(self) -> Complex<f64> {
        Complex::new(f64::from(self), 0.0)
    }

    fn from_interchange(value: Complex<f64>) -> Self {
        value.re as f32
    }
}

impl HostData for f64 {
    const DTYPE: DType = DType::Float64;

    fn into_interchange(self) -> Complex<f64> {
        Complex::new(self, 0.0)
    }

    fn from_interchange(value: Complex<f64>) -> Self {
        value.re
    }
}

impl HostData for Complex<f32> {
    const DTYPE: DType = DType::Complex64;

    fn into_interchange(self) -> Complex<f64> {
        Complex::new(f64::from(self.re), f64::from(self.im))
    }

    fn from_interchange(value: Complex<f64>) -> Self {
        Complex::new(value.re as f32, value.im as f32)
    }
}

impl HostData for Complex<f64> {
    const DTYPE: DType = DType::Complex128;

    fn into_interchange(self) -> Complex<f64> {
        self
    }

    fn from_interchange(value: Complex<f64>) -> Self {
        value
    }
}

/// A scalar operand to a binary or comparison operator.
///
/// Never stored: always materialized into a constant array with the array
/// operand's shape before the engine call. `Int` and `Bool` exist for
/// comparison convenience and coerce like real constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    Real(f64),
    C32(Complex<f32>),
    C64(Complex<f64>),
    Int(i32),
    Bool(bool),
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Real(value)
    }
}

impl From<Complex<f32>> for Scalar {
    fn from(value: Complex<f32>) -> Self {
        Scalar::C32(value)
    }
}

impl From<Complex<f64>> for Scalar {
    fn from(value: Complex<f64>) -> Self {
        Scalar::C64(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Int(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}
