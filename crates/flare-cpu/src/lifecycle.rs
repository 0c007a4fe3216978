//! Handle lifecycle for the CPU engine

use flare_core::{DType, Dim4, Error, Handle, HostData, LifecycleOps, Result};
use ndarray::{ArrayD, IxDyn};

use crate::storage::{self, shape_of, Storage};
use crate::CpuEngine;

impl LifecycleOps for CpuEngine {
    fn create_handle(dtype: DType, dims: Dim4) -> Result<Handle> {
        Ok(storage::insert(Storage::zeros(dtype, dims)))
    }

    fn create_array<T: HostData>(data: &[T], dims: Dim4) -> Result<Handle> {
        if data.len() as u64 != dims.elements() {
            return Err(Error::InvalidShape {
                dims,
                reason: format!("host buffer holds {} elements", data.len()),
            });
        }
        let values: Vec<_> = data.iter().map(|v| v.into_interchange()).collect();
        let arr = ArrayD::from_shape_vec(IxDyn(&shape_of(dims)), values)
            .map_err(|e| Error::InvalidShape {
                dims,
                reason: e.to_string(),
            })?;
        Ok(storage::insert(Storage::new(T::DTYPE, dims, arr)))
    }

    fn destroy(handle: Handle) -> Result<()> {
        storage::remove(handle)
    }

    fn copy(handle: Handle) -> Result<Handle> {
        storage::duplicate(handle)
    }

    fn weak_copy(handle: Handle) -> Result<Handle> {
        storage::share(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flare_core::QueryOps;

    #[test]
    fn test_create_handle_zero_initialized() {
        let h = CpuEngine::create_handle(DType::Float32, Dim4::from((2u64, 2u64))).unwrap();
        let mut out = [1.0f32; 4];
        CpuEngine::read(h, &mut out).unwrap();
        assert_eq!(out, [0.0; 4]);
        CpuEngine::destroy(h).unwrap();
    }

    #[test]
    fn test_create_array_round_trip() {
        let h = CpuEngine::create_array(&[1i32, -2, 3, -4], Dim4::from((2u64, 2u64))).unwrap();
        assert_eq!(CpuEngine::dtype(h).unwrap(), DType::Int32);
        let mut out = [0i32; 4];
        CpuEngine::read(h, &mut out).unwrap();
        assert_eq!(out, [1, -2, 3, -4]);
        CpuEngine::destroy(h).unwrap();
    }

    #[test]
    fn test_create_array_length_mismatch() {
        let err = CpuEngine::create_array(&[1.0f32, 2.0], Dim4::from((2u64, 2u64))).unwrap_err();
        assert!(matches!(err, Error::InvalidShape { .. }));
    }

    #[test]
    fn test_weak_copy_shares_and_copy_does_not() {
        let h = CpuEngine::create_array(&[1.0f32, 2.0], Dim4::from(2u64)).unwrap();
        let shared = CpuEngine::weak_copy(h).unwrap();
        let owned = CpuEngine::copy(h).unwrap();

        CpuEngine::set_flat(h, 0, 9.0).unwrap();

        let mut out = [0.0f32; 2];
        CpuEngine::read(shared, &mut out).unwrap();
        assert_eq!(out[0], 9.0);
        CpuEngine::read(owned, &mut out).unwrap();
        assert_eq!(out[0], 1.0);

        for handle in [h, shared, owned] {
            CpuEngine::destroy(handle).unwrap();
        }
    }

    #[test]
    fn test_destroy_shared_leaves_peer_alive() {
        let h = CpuEngine::create_array(&[5.0f32], Dim4::from(1u64)).unwrap();
        let shared = CpuEngine::weak_copy(h).unwrap();
        CpuEngine::destroy(h).unwrap();
        let mut out = [0.0f32];
        CpuEngine::read(shared, &mut out).unwrap();
        assert_eq!(out[0], 5.0);
        CpuEngine::destroy(shared).unwrap();
    }
}
