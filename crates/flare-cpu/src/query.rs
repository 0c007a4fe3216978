//! Metadata queries and host readback for the CPU engine

use flare_core::{ArrayInfo, DType, Error, Handle, HostData, QueryOps, Result};

use crate::storage;
use crate::CpuEngine;

impl QueryOps for CpuEngine {
    fn dtype(handle: Handle) -> Result<DType> {
        storage::with(handle, |s| Ok(s.dtype))
    }

    fn elements(handle: Handle) -> Result<u64> {
        storage::with(handle, |s| Ok(s.dims.elements()))
    }

    fn info(handle: Handle) -> Result<ArrayInfo> {
        storage::with(handle, |s| Ok(ArrayInfo::new(s.dims, s.dtype)))
    }

    fn read<T: HostData>(handle: Handle, dst: &mut [T]) -> Result<()> {
        storage::with(handle, |s| {
            if dst.len() != s.data.len() {
                return Err(Error::InvalidArgument(format!(
                    "destination holds {} elements, array has {}",
                    dst.len(),
                    s.data.len()
                )));
            }
            for (d, v) in dst.iter_mut().zip(s.data.iter()) {
                *d = T::from_interchange(*v);
            }
            Ok(())
        })
    }
}
