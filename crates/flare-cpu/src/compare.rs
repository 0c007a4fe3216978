//! Elementwise comparison kernels for the CPU engine

use flare_core::{CompareOp, CompareOps, DType, Error, Handle, Result};
use ndarray::Zip;
use num_complex::Complex;

use crate::storage::{self, Storage};
use crate::CpuEngine;

fn flag(pred: bool) -> Complex<f64> {
    Complex::new(if pred { 1.0 } else { 0.0 }, 0.0)
}

impl CompareOps for CpuEngine {
    fn compare(op: CompareOp, lhs: Handle, rhs: Handle) -> Result<Handle> {
        let storage = storage::with2(lhs, rhs, |a, b| {
            if a.dims != b.dims {
                return Err(Error::IncompatibleShapes(a.dims, b.dims));
            }
            if op.is_ordering() {
                for dtype in [a.dtype, b.dtype] {
                    if dtype.is_complex() {
                        return Err(Error::UnsupportedDtype {
                            op: op.name(),
                            dtype,
                        });
                    }
                }
            }
            let data = Zip::from(&a.data).and(&b.data).map_collect(|&x, &y| match op {
                CompareOp::Eq => flag(x == y),
                CompareOp::Neq => flag(x != y),
                CompareOp::Lt => flag(x.re < y.re),
                CompareOp::Le => flag(x.re <= y.re),
                CompareOp::Gt => flag(x.re > y.re),
                CompareOp::Ge => flag(x.re >= y.re),
            });
            Ok(Storage::new(DType::Bool, a.dims, data))
        })?;
        Ok(storage::insert(storage))
    }
}
