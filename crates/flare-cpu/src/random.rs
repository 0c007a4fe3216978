//! Random generators for the CPU engine

use std::cell::RefCell;

use flare_core::{DType, Dim4, Error, Handle, RandomOps, Result};
use ndarray::{ArrayD, IxDyn};
use num_complex::Complex;
use rand::prelude::*;
use rand_distr::{Distribution, Normal, Uniform};

use crate::storage::{self, shape_of, Storage};
use crate::CpuEngine;

thread_local! {
    static RNG: RefCell<SmallRng> = RefCell::new(SmallRng::from_os_rng());
}

fn fill(dims: Dim4, dtype: DType, mut draw: impl FnMut(&mut SmallRng) -> Complex<f64>) -> Handle {
    let size = dims.elements() as usize;
    let values: Vec<Complex<f64>> = RNG.with(|rng| {
        let mut rng = rng.borrow_mut();
        (0..size).map(|_| draw(&mut rng)).collect()
    });
    let data = ArrayD::from_shape_vec(IxDyn(&shape_of(dims)), values).unwrap();
    storage::insert(Storage::new(dtype, dims, data))
}

impl RandomOps for CpuEngine {
    fn seed(seed: u64) {
        RNG.with(|rng| {
            *rng.borrow_mut() = SmallRng::seed_from_u64(seed);
        });
    }

    fn randu(dims: Dim4, dtype: DType) -> Result<Handle> {
        let handle = match dtype {
            DType::Float32 => {
                let dist = Uniform::new(0.0f32, 1.0).unwrap();
                fill(dims, dtype, |rng| {
                    Complex::new(f64::from(dist.sample(rng)), 0.0)
                })
            }
            DType::Float64 => {
                let dist = Uniform::new(0.0f64, 1.0).unwrap();
                fill(dims, dtype, |rng| Complex::new(dist.sample(rng), 0.0))
            }
            DType::Complex64 => {
                let dist = Uniform::new(0.0f32, 1.0).unwrap();
                fill(dims, dtype, |rng| {
                    Complex::new(f64::from(dist.sample(rng)), f64::from(dist.sample(rng)))
                })
            }
            DType::Complex128 => {
                let dist = Uniform::new(0.0f64, 1.0).unwrap();
                fill(dims, dtype, |rng| {
                    Complex::new(dist.sample(rng), dist.sample(rng))
                })
            }
            // Integer dtypes draw uniformly over the dtype's full range.
            DType::Bool => fill(dims, dtype, |rng| {
                Complex::new(if rng.random::<bool>() { 1.0 } else { 0.0 }, 0.0)
            }),
            DType::UInt8 => fill(dims, dtype, |rng| {
                Complex::new(f64::from(rng.random::<u8>()), 0.0)
            }),
            DType::Int32 => fill(dims, dtype, |rng| {
                Complex::new(f64::from(rng.random::<i32>()), 0.0)
            }),
            DType::UInt32 => fill(dims, dtype, |rng| {
                Complex::new(f64::from(rng.random::<u32>()), 0.0)
            }),
        };
        Ok(handle)
    }

    fn randn(dims: Dim4, dtype: DType) -> Result<Handle> {
        if !dtype.is_floating() {
            return Err(Error::UnsupportedDtype { op: "randn", dtype });
        }
        let dist = Normal::new(0.0f64, 1.0).unwrap();
        let handle = if dtype.is_complex() {
            fill(dims, dtype, |rng| {
                Complex::new(dist.sample(rng), dist.sample(rng))
            })
        } else {
            fill(dims, dtype, |rng| Complex::new(dist.sample(rng), 0.0))
        };
        // Quantize single-precision fills through f32.
        if dtype.is_single_precision() {
            return storage::with_mut(handle, |s| {
                s.data.mapv_inplace(|v| crate::convert::coerce_value(v, dtype));
                Ok(handle)
            });
        }
        Ok(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flare_core::{LifecycleOps, QueryOps};

    fn read(h: Handle, len: usize) -> Vec<f64> {
        let out = CpuEngine::cast(h, DType::Float64).unwrap();
        let mut values = vec![0.0; len];
        CpuEngine::read(out, &mut values).unwrap();
        CpuEngine::destroy(out).unwrap();
        values
    }

    use flare_core::ConvertOps;

    #[test]
    fn test_randu_range() {
        CpuEngine::seed(42);
        let h = CpuEngine::randu(Dim4::from((3u64, 4u64)), DType::Float32).unwrap();
        assert_eq!(CpuEngine::elements(h).unwrap(), 12);
        for x in read(h, 12) {
            assert!((0.0..1.0).contains(&x));
        }
        CpuEngine::destroy(h).unwrap();
    }

    #[test]
    fn test_randu_integer_values_are_integral() {
        CpuEngine::seed(42);
        let h = CpuEngine::randu(Dim4::from(100u64), DType::UInt8).unwrap();
        assert_eq!(CpuEngine::dtype(h).unwrap(), DType::UInt8);
        for x in read(h, 100) {
            assert!((0.0..=255.0).contains(&x));
            assert_eq!(x, x.floor());
        }
        CpuEngine::destroy(h).unwrap();
    }

    #[test]
    fn test_randn_moments() {
        CpuEngine::seed(42);
        let h = CpuEngine::randn(Dim4::from(1000u64), DType::Float64).unwrap();
        let values = read(h, 1000);
        let mean: f64 = values.iter().sum::<f64>() / 1000.0;
        assert!(mean.abs() < 0.1);
        CpuEngine::destroy(h).unwrap();
    }

    #[test]
    fn test_randn_integer_unsupported() {
        assert!(matches!(
            CpuEngine::randn(Dim4::from(4u64), DType::Int32),
            Err(Error::UnsupportedDtype { .. })
        ));
    }

    #[test]
    fn test_seed_reproducibility() {
        CpuEngine::seed(12345);
        let a = CpuEngine::randu(Dim4::from(5u64), DType::Float64).unwrap();
        CpuEngine::seed(12345);
        let b = CpuEngine::randu(Dim4::from(5u64), DType::Float64).unwrap();
        assert_eq!(read(a, 5), read(b, 5));
        CpuEngine::destroy(a).unwrap();
        CpuEngine::destroy(b).unwrap();
    }
}
