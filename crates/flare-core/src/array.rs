//! The array value type
//!
//! An [`Array`] owns exactly one engine handle at a time and makes it behave
//! like an ordinary variable. Copying duplicates storage; assignment shares
//! it; dropping releases it. Shape and dtype are never cached here — every
//! introspection call queries the engine fresh, so a value always reflects
//! its current handle even after assignment replaced it.

use std::fmt;
use std::marker::PhantomData;

use crate::creation;
use crate::dim::Dim4;
use crate::dtype::{DType, HostData, Scalar};
use crate::engine::{Engine, Handle, Source};
use crate::error::{Error, Result};

/// A value-semantic wrapper around one engine handle.
///
/// The handle is the null sentinel for default-constructed values; every
/// other constructor produces a freshly created handle. Handles are local to
/// the engine's thread, so the type is deliberately neither `Send` nor
/// `Sync`.
pub struct Array<E: Engine> {
    handle: Handle,
    marker: PhantomData<(E, *const ())>,
}

impl<E: Engine> Array<E> {
    /// Zero-initialized allocation with the given shape and dtype.
    pub fn new(dims: Dim4, dtype: DType) -> Result<Self> {
        Ok(Self::from_handle(E::create_handle(dtype, dims)?))
    }

    /// Ingest a caller-owned host buffer; the dtype is inferred from `T`.
    ///
    /// Only `Source::Host` is accepted. `ngfor` is accepted for call-site
    /// compatibility with batched construction and ignored by this layer.
    pub fn from_host<T: HostData>(
        data: &[T],
        dims: Dim4,
        source: Source,
        ngfor: u64,
    ) -> Result<Self> {
        let _ = ngfor;
        if source != Source::Host {
            return Err(Error::InvalidArgument(
                "only host memory can be ingested".to_string(),
            ));
        }
        Ok(Self::from_handle(E::create_array(data, dims)?))
    }

    /// Host-buffer ingestion with the source marker defaulted.
    pub fn from_slice<T: HostData>(data: &[T], dims: Dim4) -> Result<Self> {
        Self::from_host(data, dims, Source::Host, 0)
    }

    /// Take ownership of a handle the engine already produced.
    pub(crate) fn from_handle(handle: Handle) -> Self {
        Self {
            handle,
            marker: PhantomData,
        }
    }

    /// The raw handle. Lifecycle stays with this value.
    pub fn handle(&self) -> Handle {
        self.handle
    }

    /// Local null check; does not touch the engine.
    pub fn is_null(&self) -> bool {
        self.handle.is_null()
    }

    // ------------------------------------------------------------------
    // Introspection — every call queries the engine fresh
    // ------------------------------------------------------------------

    pub fn dtype(&self) -> Result<DType> {
        E::dtype(self.handle)
    }

    pub fn elements(&self) -> Result<u64> {
        E::elements(self.handle)
    }

    pub fn dims(&self) -> Result<Dim4> {
        Ok(E::info(self.handle)?.dims())
    }

    /// Extent along one of the four axes.
    pub fn dim(&self, axis: usize) -> Result<u64> {
        if axis > 3 {
            return Err(Error::InvalidArgument(format!(
                "axis {axis} out of range, shapes have 4 slots"
            )));
        }
        Ok(self.dims()?[axis])
    }

    pub fn numdims(&self) -> Result<u32> {
        Ok(E::info(self.handle)?.ndims())
    }

    /// Element count times the size of the current dtype. The dtype can
    /// change over the value's lifetime, so this is never memoized.
    pub fn bytes(&self) -> Result<usize> {
        let info = E::info(self.handle)?;
        Ok(info.elements() as usize * info.dtype().size())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(E::info(self.handle)?.is_empty())
    }

    pub fn is_scalar(&self) -> Result<bool> {
        Ok(E::info(self.handle)?.is_scalar())
    }

    pub fn is_vector(&self) -> Result<bool> {
        Ok(E::info(self.handle)?.is_vector())
    }

    pub fn is_row(&self) -> Result<bool> {
        Ok(E::info(self.handle)?.is_row())
    }

    pub fn is_column(&self) -> Result<bool> {
        Ok(E::info(self.handle)?.is_column())
    }

    pub fn is_complex(&self) -> Result<bool> {
        Ok(self.dtype()?.is_complex())
    }

    pub fn is_double_precision(&self) -> Result<bool> {
        Ok(self.dtype()?.is_double_precision())
    }

    pub fn is_single_precision(&self) -> Result<bool> {
        Ok(self.dtype()?.is_single_precision())
    }

    pub fn is_real_floating(&self) -> Result<bool> {
        Ok(self.dtype()?.is_real_floating())
    }

    pub fn is_floating(&self) -> Result<bool> {
        Ok(self.dtype()?.is_floating())
    }

    pub fn is_integer(&self) -> Result<bool> {
        Ok(self.dtype()?.is_integer())
    }

    // ------------------------------------------------------------------
    // Copy, assignment, readback, conversion
    // ------------------------------------------------------------------

    /// Independent duplicate with its own storage.
    pub fn copy(&self) -> Result<Self> {
        Ok(Self::from_handle(E::copy(self.handle)?))
    }

    /// Replace this value's handle with a reference-sharing alias of
    /// `other`'s, so engine-side mutation through either handle is
    /// observable through both. Assigning a value to itself (identical
    /// handle) is a no-op.
    ///
    /// The current handle is destroyed before the new alias is requested;
    /// if the reshare fails, this value is left holding the null handle.
    pub fn assign(&mut self, other: &Array<E>) -> Result<()> {
        if self.handle == other.handle {
            return Ok(());
        }
        if !self.handle.is_null() {
            E::destroy(self.handle)?;
            self.handle = Handle::NULL;
        }
        self.handle = E::weak_copy(other.handle)?;
        Ok(())
    }

    /// Fill with a scalar, preserving the current shape and dtype: a
    /// same-shape constant is generated and this value reshares it.
    ///
    /// Shares the destroy-before-reshare window of [`Array::assign`].
    pub fn assign_scalar(&mut self, value: impl Into<Scalar>) -> Result<()> {
        let cst = self.constant_like(value.into())?;
        if !self.handle.is_null() {
            E::destroy(self.handle)?;
            self.handle = Handle::NULL;
        }
        self.handle = E::weak_copy(cst.handle)?;
        Ok(())
    }

    /// Materialize a scalar as a constant array with this value's shape —
    /// and, for real scalars, its dtype. The operand-coercion primitive.
    pub(crate) fn constant_like(&self, value: Scalar) -> Result<Array<E>> {
        let info = E::info(self.handle)?;
        match value {
            Scalar::Real(v) => creation::constant(v, info.dims(), info.dtype()),
            Scalar::Int(v) => creation::constant(f64::from(v), info.dims(), info.dtype()),
            Scalar::Bool(v) => {
                creation::constant(if v { 1.0 } else { 0.0 }, info.dims(), info.dtype())
            }
            Scalar::C32(v) => creation::constant_c32(v, info.dims()),
            Scalar::C64(v) => creation::constant_c64(v, info.dims()),
        }
    }

    /// Read every element back into a fresh vector. The requested element
    /// type must match the current dtype exactly.
    pub fn host<T: HostData>(&self) -> Result<Vec<T>> {
        let dtype = self.dtype()?;
        if dtype != T::DTYPE {
            return Err(Error::TypeMismatch {
                requested: T::DTYPE,
                actual: dtype,
            });
        }
        let mut out = vec![T::default(); self.elements()? as usize];
        E::read(self.handle, &mut out)?;
        Ok(out)
    }

    /// Read every element into a caller buffer of matching length and type.
    pub fn host_into<T: HostData>(&self, dst: &mut [T]) -> Result<()> {
        let dtype = self.dtype()?;
        if dtype != T::DTYPE {
            return Err(Error::TypeMismatch {
                requested: T::DTYPE,
                actual: dtype,
            });
        }
        E::read(self.handle, dst)
    }

    /// New value holding the same logical values converted to `dtype`.
    /// The receiver is untouched.
    pub fn cast(&self, dtype: DType) -> Result<Self> {
        Ok(Self::from_handle(E::cast(self.handle, dtype)?))
    }
}

impl<E: Engine> Clone for Array<E> {
    /// Deep copy: duplicates storage through the engine.
    ///
    /// # Panics
    ///
    /// Panics if the engine rejects the duplication; use [`Array::copy`]
    /// for the fallible form.
    fn clone(&self) -> Self {
        self.copy().expect("engine copy failed")
    }
}

impl<E: Engine> Default for Array<E> {
    /// The null-handle value. Owns nothing; dropping it is a no-op.
    fn default() -> Self {
        Self::from_handle(Handle::NULL)
    }
}

impl<E: Engine> Drop for Array<E> {
    fn drop(&mut self) {
        // Null handles own nothing. Release failures cannot propagate out
        // of drop and are ignored.
        if !self.handle.is_null() {
            let _ = E::destroy(self.handle);
        }
    }
}

impl<E: Engine> fmt::Debug for Array<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Array")
            .field("engine", &E::name())
            .field("handle", &self.handle.raw())
            .finish()
    }
}
