//! Handle registry and storage slots
//!
//! A thread-local map from handle ids to reference-counted storage. A weak
//! copy mints a new id over the same `Rc`; a deep copy clones the data into
//! a fresh slot. Element data lives in the complex-double interchange
//! domain regardless of dtype; the dtype tag governs quantization, readback,
//! and which ops are permitted.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use flare_core::{DType, Dim4, Error, Handle, Result};
use ndarray::{ArrayD, IxDyn};
use num_complex::Complex;

pub(crate) struct Storage {
    pub dtype: DType,
    pub dims: Dim4,
    pub data: ArrayD<Complex<f64>>,
}

impl Storage {
    pub fn new(dtype: DType, dims: Dim4, data: ArrayD<Complex<f64>>) -> Self {
        Self { dtype, dims, data }
    }

    pub fn filled(dtype: DType, dims: Dim4, value: Complex<f64>) -> Self {
        let data = ArrayD::from_elem(IxDyn(&shape_of(dims)), value);
        Self::new(dtype, dims, data)
    }

    pub fn zeros(dtype: DType, dims: Dim4) -> Self {
        Self::filled(dtype, dims, Complex::new(0.0, 0.0))
    }

    fn duplicate(&self) -> Self {
        Self {
            dtype: self.dtype,
            dims: self.dims,
            data: self.data.clone(),
        }
    }
}

/// All four slots as an ndarray shape.
pub(crate) fn shape_of(dims: Dim4) -> Vec<usize> {
    dims.get().iter().map(|&d| d as usize).collect()
}

#[derive(Default)]
struct Registry {
    next: u64,
    slots: HashMap<u64, Rc<RefCell<Storage>>>,
}

thread_local! {
    static REGISTRY: RefCell<Registry> = RefCell::new(Registry::default());
}

fn insert_rc(slot: Rc<RefCell<Storage>>) -> Handle {
    REGISTRY.with(|r| {
        let mut r = r.borrow_mut();
        r.next += 1;
        let id = r.next;
        r.slots.insert(id, slot);
        Handle::from_raw(id)
    })
}

/// Register fresh storage and mint its handle.
pub(crate) fn insert(storage: Storage) -> Handle {
    insert_rc(Rc::new(RefCell::new(storage)))
}

fn slot(handle: Handle) -> Result<Rc<RefCell<Storage>>> {
    if handle.is_null() {
        return Err(Error::NullHandle);
    }
    REGISTRY.with(|r| {
        r.borrow()
            .slots
            .get(&handle.raw())
            .cloned()
            .ok_or(Error::UnknownHandle(handle.raw()))
    })
}

/// New handle over the same storage.
pub(crate) fn share(handle: Handle) -> Result<Handle> {
    Ok(insert_rc(slot(handle)?))
}

/// New handle over a deep copy of the storage.
pub(crate) fn duplicate(handle: Handle) -> Result<Handle> {
    let copy = slot(handle)?.borrow().duplicate();
    Ok(insert(copy))
}

/// Drop a handle's registry slot. Shared storage survives until its last
/// handle is removed.
pub(crate) fn remove(handle: Handle) -> Result<()> {
    if handle.is_null() {
        return Err(Error::NullHandle);
    }
    REGISTRY.with(|r| {
        r.borrow_mut()
            .slots
            .remove(&handle.raw())
            .map(|_| ())
            .ok_or(Error::UnknownHandle(handle.raw()))
    })
}

pub(crate) fn with<R>(handle: Handle, f: impl FnOnce(&Storage) -> Result<R>) -> Result<R> {
    let rc = slot(handle)?;
    let guard = rc.borrow();
    f(&guard)
}

pub(crate) fn with_mut<R>(handle: Handle, f: impl FnOnce(&mut Storage) -> Result<R>) -> Result<R> {
    let rc = slot(handle)?;
    let mut guard = rc.borrow_mut();
    f(&mut guard)
}

/// Both operands of a binary op. The same handle (or two handles sharing
/// one slot) may appear on both sides; borrows are shared.
pub(crate) fn with2<R>(
    lhs: Handle,
    rhs: Handle,
    f: impl FnOnce(&Storage, &Storage) -> Result<R>,
) -> Result<R> {
    let a = slot(lhs)?;
    let b = slot(rhs)?;
    let ga = a.borrow();
    let gb = b.borrow();
    f(&ga, &gb)
}

pub(crate) fn live_count() -> usize {
    REGISTRY.with(|r| r.borrow().slots.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_remove() {
        let before = live_count();
        let h = insert(Storage::zeros(DType::Float32, Dim4::from(4u64)));
        assert_eq!(live_count(), before + 1);
        remove(h).unwrap();
        assert_eq!(live_count(), before);
    }

    #[test]
    fn test_remove_twice_fails() {
        let h = insert(Storage::zeros(DType::Float32, Dim4::from(2u64)));
        remove(h).unwrap();
        assert!(matches!(remove(h), Err(Error::UnknownHandle(_))));
    }

    #[test]
    fn test_null_handle_rejected() {
        assert!(matches!(remove(Handle::NULL), Err(Error::NullHandle)));
        assert!(matches!(share(Handle::NULL), Err(Error::NullHandle)));
    }

    #[test]
    fn test_share_aliases_storage() {
        let h = insert(Storage::zeros(DType::Float32, Dim4::from(3u64)));
        let alias = share(h).unwrap();
        assert_ne!(h, alias);
        with_mut(h, |s| {
            s.data[IxDyn(&[0, 0, 0, 0])] = Complex::new(7.0, 0.0);
            Ok(())
        })
        .unwrap();
        let seen = with(alias, |s| Ok(s.data[IxDyn(&[0, 0, 0, 0])])).unwrap();
        assert_eq!(seen, Complex::new(7.0, 0.0));
        remove(h).unwrap();
        remove(alias).unwrap();
    }

    #[test]
    fn test_duplicate_is_independent() {
        let h = insert(Storage::zeros(DType::Float32, Dim4::from(3u64)));
        let dup = duplicate(h).unwrap();
        with_mut(h, |s| {
            s.data[IxDyn(&[1, 0, 0, 0])] = Complex::new(5.0, 0.0);
            Ok(())
        })
        .unwrap();
        let seen = with(dup, |s| Ok(s.data[IxDyn(&[1, 0, 0, 0])])).unwrap();
        assert_eq!(seen, Complex::new(0.0, 0.0));
        remove(h).unwrap();
        remove(dup).unwrap();
    }

    #[test]
    fn test_with2_same_slot() {
        let h = insert(Storage::zeros(DType::Float32, Dim4::from(2u64)));
        let alias = share(h).unwrap();
        let ok = with2(h, alias, |a, b| Ok(a.dims == b.dims)).unwrap();
        assert!(ok);
        remove(h).unwrap();
        remove(alias).unwrap();
    }
}
