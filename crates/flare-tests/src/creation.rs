//! Generator function tests, including the end-to-end constant example

#[cfg(test)]
mod tests {
    use crate::utils::*;
    use flare_core::{
        constant, constant_c32, constant_c64, randn, randu, DType, Dim4, RandomOps,
    };
    use flare_cpu::CpuEngine;
    use num_complex::Complex;

    // ============ constant ============

    #[test]
    fn test_constant_add_end_to_end() {
        let dims = Dim4::from((2u64, 2u64));
        let a = constant::<CpuEngine>(3.0, dims, DType::Float32).unwrap();
        let b = constant::<CpuEngine>(4.0, dims, DType::Float32).unwrap();
        let c = &a + &b;

        assert_eq!(c.dims().unwrap(), dims);
        assert_eq!(c.dtype().unwrap(), DType::Float32);
        assert_eq!(c.elements().unwrap(), 4);
        assert!(!c.is_scalar().unwrap());
        assert_eq!(c.host::<f32>().unwrap(), vec![7.0; 4]);
    }

    #[test]
    fn test_constant_values() {
        let a = constant::<CpuEngine>(-2.5, Dim4::from((3u64, 2u64)), DType::Float64).unwrap();
        assert!(all_approx_eq(
            &a.host::<f64>().unwrap(),
            &[-2.5; 6],
            DEFAULT_TOL
        ));
    }

    #[test]
    fn test_constant_complex_overloads() {
        let c32 = constant_c32::<CpuEngine>(Complex::new(1.0, 2.0), Dim4::from(3u64)).unwrap();
        assert_eq!(c32.dtype().unwrap(), DType::Complex64);
        assert_eq!(
            c32.host::<Complex<f32>>().unwrap(),
            vec![Complex::new(1.0, 2.0); 3]
        );

        let c64 = constant_c64::<CpuEngine>(Complex::new(-0.5, 0.5), Dim4::from(3u64)).unwrap();
        assert_eq!(c64.dtype().unwrap(), DType::Complex128);
        assert_eq!(
            c64.host::<Complex<f64>>().unwrap(),
            vec![Complex::new(-0.5, 0.5); 3]
        );
    }

    // ============ random ============

    #[test]
    fn test_randu_shape_and_range() {
        CpuEngine::seed(7);
        let a = randu::<CpuEngine>(Dim4::from((4u64, 5u64)), DType::Float32).unwrap();
        assert_eq!(a.dims().unwrap(), Dim4::from((4u64, 5u64)));
        assert_eq!(a.dtype().unwrap(), DType::Float32);
        for v in a.host::<f32>().unwrap() {
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn test_randn_dtype() {
        CpuEngine::seed(7);
        let a = randn::<CpuEngine>(Dim4::from(100u64), DType::Float64).unwrap();
        assert_eq!(a.dtype().unwrap(), DType::Float64);
        assert_eq!(a.elements().unwrap(), 100);
    }

    #[test]
    fn test_randu_complex() {
        CpuEngine::seed(7);
        let a = randu::<CpuEngine>(Dim4::from(10u64), DType::Complex128).unwrap();
        for v in a.host::<Complex<f64>>().unwrap() {
            assert!((0.0..1.0).contains(&v.re));
            assert!((0.0..1.0).contains(&v.im));
        }
    }

    #[test]
    fn test_generators_are_fresh_values() {
        let before = CpuEngine::live_handles();
        {
            let _a = constant::<CpuEngine>(1.0, Dim4::from(2u64), DType::Float32).unwrap();
            let _b = randu::<CpuEngine>(Dim4::from(2u64), DType::Float32).unwrap();
            assert_eq!(CpuEngine::live_handles(), before + 2);
        }
        assert_eq!(CpuEngine::live_handles(), before);
    }
}
