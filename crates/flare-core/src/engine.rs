//! Engine boundary: opaque handles, op tags, and the trait contract
//!
//! The engine owns all array storage behind opaque handles and is the only
//! component that allocates, shares, or releases it. The traits here are the
//! documented contract an engine implements; the frontend never sees storage,
//! only handles and the metadata reported for them.

use num_complex::Complex;
use serde::{Deserialize, Serialize};

use crate::dim::Dim4;
use crate::dtype::{DType, HostData};
use crate::error::Result;

/// Opaque identifier for engine-managed array storage.
///
/// `Handle::NULL` is the sentinel carried by default-constructed array
/// values; every engine call rejects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle(u64);

impl Handle {
    pub const NULL: Handle = Handle(0);

    pub fn from_raw(raw: u64) -> Self {
        Handle(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }

    pub fn is_null(self) -> bool {
        self.0 == 0
    }
}

/// Marker for where a data buffer lives. Only host ingestion is supported
/// by this layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Host,
    Device,
}

/// Elementwise binary operation tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

/// Elementwise comparison tag. Comparisons produce `Bool` arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Neq,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CompareOp {
    pub fn name(self) -> &'static str {
        match self {
            CompareOp::Eq => "eq",
            CompareOp::Neq => "neq",
            CompareOp::Lt => "lt",
            CompareOp::Le => "le",
            CompareOp::Gt => "gt",
            CompareOp::Ge => "ge",
        }
    }

    /// Whether this comparison orders operands (and is therefore undefined
    /// for complex dtypes).
    pub fn is_ordering(self) -> bool {
        !matches!(self, CompareOp::Eq | CompareOp::Neq)
    }
}

/// Metadata the engine reports for a handle.
///
/// Shape and dtype are read fresh from the engine on every query; nothing
/// here is cached by the frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrayInfo {
    dims: Dim4,
    dtype: DType,
}

impl ArrayInfo {
    pub fn new(dims: Dim4, dtype: DType) -> Self {
        Self { dims, dtype }
    }

    pub fn dims(&self) -> Dim4 {
        self.dims
    }

    pub fn dtype(&self) -> DType {
        self.dtype
    }

    pub fn ndims(&self) -> u32 {
        self.dims.ndims()
    }

    pub fn elements(&self) -> u64 {
        self.dims.elements()
    }

    pub fn is_empty(&self) -> bool {
        self.elements() == 0
    }

    pub fn is_scalar(&self) -> bool {
        self.elements() == 1
    }

    fn non_unit_dims(&self) -> usize {
        self.dims.get().iter().filter(|&&d| d > 1).count()
    }

    /// Exactly one non-unit dimension, along any axis.
    pub fn is_vector(&self) -> bool {
        self.non_unit_dims() == 1
    }

    pub fn is_row(&self) -> bool {
        let d = self.dims.get();
        d[0] == 1 && d[1] > 1 && d[2] == 1 && d[3] == 1
    }

    pub fn is_column(&self) -> bool {
        let d = self.dims.get();
        d[0] > 1 && d[1] == 1 && d[2] == 1 && d[3] == 1
    }
}

/// Handle lifecycle: allocation, ingestion, duplication, sharing, release.
pub trait LifecycleOps {
    /// Zero-initialized allocation for a dtype and shape.
    fn create_handle(dtype: DType, dims: Dim4) -> Result<Handle>;

    /// Ingest a caller-owned host buffer. The buffer length must match the
    /// shape's element count.
    fn create_array<T: HostData>(data: &[T], dims: Dim4) -> Result<Handle>;

    /// Release a handle. Releasing shared storage drops one reference.
    fn destroy(handle: Handle) -> Result<()>;

    /// Independent duplicate with its own storage.
    fn copy(handle: Handle) -> Result<Handle>;

    /// Reference-sharing alias: the returned handle addresses the same
    /// storage as the source.
    fn weak_copy(handle: Handle) -> Result<Handle>;
}

/// Metadata queries and host readback.
pub trait QueryOps {
    fn dtype(handle: Handle) -> Result<DType>;

    fn elements(handle: Handle) -> Result<u64>;

    fn info(handle: Handle) -> Result<ArrayInfo>;

    /// Read every element into a caller buffer of matching length.
    fn read<T: HostData>(handle: Handle, dst: &mut [T]) -> Result<()>;
}

/// Elementwise arithmetic over two same-shape operands.
pub trait MathOps {
    fn binary(op: BinaryOp, lhs: Handle, rhs: Handle) -> Result<Handle>;
}

/// Elementwise comparison over two same-shape operands.
pub trait CompareOps {
    fn compare(op: CompareOp, lhs: Handle, rhs: Handle) -> Result<Handle>;
}

/// Constant generators.
pub trait CreationOps {
    /// Broadcast a real value over a shape, quantized to the dtype.
    fn constant(value: f64, dims: Dim4, dtype: DType) -> Result<Handle>;

    /// Broadcast a single-precision complex value; the result is `Complex64`.
    fn constant_c32(value: Complex<f32>, dims: Dim4) -> Result<Handle>;

    /// Broadcast a double-precision complex value; the result is `Complex128`.
    fn constant_c64(value: Complex<f64>, dims: Dim4) -> Result<Handle>;
}

/// Random generators.
pub trait RandomOps {
    /// Seed the engine's generator for reproducible fills.
    fn seed(seed: u64);

    /// Uniform fill: [0, 1) for floating dtypes, full range for integers.
    fn randu(dims: Dim4, dtype: DType) -> Result<Handle>;

    /// Standard normal fill; floating dtypes only.
    fn randn(dims: Dim4, dtype: DType) -> Result<Handle>;
}

/// Type conversion.
pub trait ConvertOps {
    /// New handle holding the same logical values converted to `dtype`.
    fn cast(handle: Handle, dtype: DType) -> Result<Handle>;
}

/// A complete engine implementation.
pub trait Engine:
    LifecycleOps + QueryOps + MathOps + CompareOps + CreationOps + RandomOps + ConvertOps
{
    /// Engine name for identification.
    fn name() -> &'static str;

    /// Engine version.
    fn version() -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(dims: [u64; 4]) -> ArrayInfo {
        ArrayInfo::new(Dim4::new(dims), DType::Float32)
    }

    #[test]
    fn test_null_handle() {
        assert!(Handle::NULL.is_null());
        assert!(!Handle::from_raw(3).is_null());
        assert_eq!(Handle::from_raw(3).raw(), 3);
    }

    #[test]
    fn test_scalar_info() {
        let i = info([1, 1, 1, 1]);
        assert!(i.is_scalar());
        assert!(!i.is_empty());
        assert!(!i.is_vector());
        assert!(!i.is_row());
        assert!(!i.is_column());
    }

    #[test]
    fn test_empty_info() {
        let i = info([0, 1, 1, 1]);
        assert!(i.is_empty());
        assert!(!i.is_scalar());
        assert!(!i.is_vector());
        assert_eq!(i.ndims(), 0);
    }

    #[test]
    fn test_column_and_row() {
        let col = info([4, 1, 1, 1]);
        assert!(col.is_vector());
        assert!(col.is_column());
        assert!(!col.is_row());

        let row = info([1, 4, 1, 1]);
        assert!(row.is_vector());
        assert!(row.is_row());
        assert!(!row.is_column());
    }

    #[test]
    fn test_depth_vector_is_neither_row_nor_column() {
        let i = info([1, 1, 5, 1]);
        assert!(i.is_vector());
        assert!(!i.is_row());
        assert!(!i.is_column());
    }

    #[test]
    fn test_matrix_is_not_vector() {
        let i = info([2, 3, 1, 1]);
        assert!(!i.is_vector());
        assert_eq!(i.ndims(), 2);
        assert_eq!(i.elements(), 6);
    }
}
