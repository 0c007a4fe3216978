//! Elementwise arithmetic kernels for the CPU engine

use flare_core::{BinaryOp, Error, Handle, MathOps, Result};

use crate::convert::coerce_value;
use crate::storage::{self, Storage};
use crate::CpuEngine;

impl MathOps for CpuEngine {
    fn binary(op: BinaryOp, lhs: Handle, rhs: Handle) -> Result<Handle> {
        let storage = storage::with2(lhs, rhs, |a, b| {
            if a.dims != b.dims {
                return Err(Error::IncompatibleShapes(a.dims, b.dims));
            }
            let dtype = a.dtype.promote(b.dtype);
            let data = match op {
                BinaryOp::Add => &a.data + &b.data,
                BinaryOp::Sub => &a.data - &b.data,
                BinaryOp::Mul => &a.data * &b.data,
                BinaryOp::Div => &a.data / &b.data,
            };
            // Results are computed in the interchange domain and then
            // quantized, so integer dtypes truncate and f32 dtypes round
            // exactly as the dtype's native arithmetic would.
            Ok(Storage::new(dtype, a.dims, data.mapv(|v| coerce_value(v, dtype))))
        })?;
        Ok(storage::insert(storage))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flare_core::{DType, Dim4, LifecycleOps, QueryOps};
    use num_complex::Complex;

    fn arr(data: &[f64]) -> Handle {
        CpuEngine::create_array(data, Dim4::from(data.len() as u64)).unwrap()
    }

    fn read(h: Handle, len: usize) -> Vec<f64> {
        let mut out = vec![0.0; len];
        CpuEngine::read(h, &mut out).unwrap();
        out
    }

    #[test]
    fn test_add() {
        let a = arr(&[1.0, 2.0, 3.0]);
        let b = arr(&[10.0, 20.0, 30.0]);
        let c = CpuEngine::binary(BinaryOp::Add, a, b).unwrap();
        assert_eq!(read(c, 3), vec![11.0, 22.0, 33.0]);
    }

    #[test]
    fn test_sub_and_div_order() {
        let a = arr(&[10.0, 20.0]);
        let b = arr(&[4.0, 5.0]);
        let s = CpuEngine::binary(BinaryOp::Sub, a, b).unwrap();
        assert_eq!(read(s, 2), vec![6.0, 15.0]);
        let d = CpuEngine::binary(BinaryOp::Div, a, b).unwrap();
        assert_eq!(read(d, 2), vec![2.5, 4.0]);
    }

    #[test]
    fn test_mul() {
        let a = arr(&[1.5, -2.0]);
        let b = arr(&[4.0, 3.0]);
        let m = CpuEngine::binary(BinaryOp::Mul, a, b).unwrap();
        assert_eq!(read(m, 2), vec![6.0, -6.0]);
    }

    #[test]
    fn test_shape_mismatch() {
        let a = arr(&[1.0, 2.0]);
        let b = arr(&[1.0, 2.0, 3.0]);
        assert!(matches!(
            CpuEngine::binary(BinaryOp::Add, a, b),
            Err(Error::IncompatibleShapes(_, _))
        ));
    }

    #[test]
    fn test_integer_division_truncates() {
        let a = CpuEngine::create_array(&[5i32, -7], Dim4::from(2u64)).unwrap();
        let b = CpuEngine::create_array(&[2i32, 2], Dim4::from(2u64)).unwrap();
        let d = CpuEngine::binary(BinaryOp::Div, a, b).unwrap();
        assert_eq!(CpuEngine::dtype(d).unwrap(), DType::Int32);
        let mut out = [0i32; 2];
        CpuEngine::read(d, &mut out).unwrap();
        assert_eq!(out, [2, -3]);
    }

    #[test]
    fn test_mixed_dtype_promotes() {
        let a = CpuEngine::create_array(&[1.0f32, 2.0], Dim4::from(2u64)).unwrap();
        let b = CpuEngine::create_array(
            &[Complex::new(0.0f32, 1.0), Complex::new(1.0, 0.0)],
            Dim4::from(2u64),
        )
        .unwrap();
        let c = CpuEngine::binary(BinaryOp::Add, a, b).unwrap();
        assert_eq!(CpuEngine::dtype(c).unwrap(), DType::Complex64);
        let mut out = [Complex::new(0.0f32, 0.0); 2];
        CpuEngine::read(c, &mut out).unwrap();
        assert_eq!(out, [Complex::new(1.0, 1.0), Complex::new(3.0, 0.0)]);
    }

    #[test]
    fn test_same_handle_both_sides() {
        let a = arr(&[2.0, 3.0]);
        let sq = CpuEngine::binary(BinaryOp::Mul, a, a).unwrap();
        assert_eq!(read(sq, 2), vec![4.0, 9.0]);
    }
}
