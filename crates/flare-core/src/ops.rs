//! Operator families and operand coercion
//!
//! Every operator pair — {array, array}, {array, scalar}, and the mirrored
//! {scalar, array} — funnels into one dispatch path per operator class:
//! scalar operands are materialized into same-shape constants, then the
//! operation runs as {array, array} through a single engine entry point.
//! The combinatorial surface is macro-instantiated so there is no
//! per-combination logic to drift.

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub, SubAssign};

use num_complex::Complex;

use crate::array::Array;
use crate::dtype::Scalar;
use crate::engine::{BinaryOp, CompareOp, Engine};
use crate::error::{Error, Result};

impl<E: Engine> Array<E> {
    /// Elementwise arithmetic against another array.
    pub fn binary(&self, other: &Array<E>, op: BinaryOp) -> Result<Array<E>> {
        Ok(Array::from_handle(E::binary(op, self.handle(), other.handle())?))
    }

    /// Elementwise arithmetic against a scalar, coerced to this array's
    /// shape (and dtype, for real scalars) first.
    pub fn binary_scalar(&self, value: impl Into<Scalar>, op: BinaryOp) -> Result<Array<E>> {
        let cst = self.constant_like(value.into())?;
        self.binary(&cst, op)
    }

    /// Elementwise comparison against another array; the result is a
    /// `Bool` array.
    pub fn compare(&self, other: &Array<E>, op: CompareOp) -> Result<Array<E>> {
        Ok(Array::from_handle(E::compare(op, self.handle(), other.handle())?))
    }

    /// Elementwise comparison against a scalar, coerced like
    /// [`Array::binary_scalar`].
    pub fn compare_scalar(&self, value: impl Into<Scalar>, op: CompareOp) -> Result<Array<E>> {
        let cst = self.constant_like(value.into())?;
        self.compare(&cst, op)
    }
}

/// Either side of a comparison: an array or a scalar to be coerced.
pub enum Operand<'a, E: Engine> {
    Array(&'a Array<E>),
    Scalar(Scalar),
}

impl<'a, E: Engine> From<&'a Array<E>> for Operand<'a, E> {
    fn from(value: &'a Array<E>) -> Self {
        Operand::Array(value)
    }
}

macro_rules! impl_operand_from_scalar {
    ($($ty:ty),*) => {
        $(
            impl<'a, E: Engine> From<$ty> for Operand<'a, E> {
                fn from(value: $ty) -> Self {
                    Operand::Scalar(value.into())
                }
            }
        )*
    };
}

impl_operand_from_scalar!(f64, i32, bool, Complex<f32>, Complex<f64>);

fn compare_operands<E: Engine>(
    op: CompareOp,
    lhs: Operand<'_, E>,
    rhs: Operand<'_, E>,
) -> Result<Array<E>> {
    match (lhs, rhs) {
        (Operand::Array(a), Operand::Array(b)) => a.compare(b, op),
        (Operand::Array(a), Operand::Scalar(s)) => a.compare_scalar(s, op),
        (Operand::Scalar(s), Operand::Array(b)) => {
            let cst = b.constant_like(s)?;
            cst.compare(b, op)
        }
        (Operand::Scalar(_), Operand::Scalar(_)) => Err(Error::InvalidArgument(
            "comparison requires at least one array operand".to_string(),
        )),
    }
}

macro_rules! impl_compare_fn {
    ($name:ident, $op:expr, $doc:literal) => {
        #[doc = $doc]
        pub fn $name<'a, E, L, R>(lhs: L, rhs: R) -> Result<Array<E>>
        where
            E: Engine + 'a,
            L: Into<Operand<'a, E>>,
            R: Into<Operand<'a, E>>,
        {
            compare_operands($op, lhs.into(), rhs.into())
        }
    };
}

impl_compare_fn!(eq, CompareOp::Eq, "Elementwise equality.");
impl_compare_fn!(neq, CompareOp::Neq, "Elementwise inequality.");
impl_compare_fn!(lt, CompareOp::Lt, "Elementwise less-than.");
impl_compare_fn!(le, CompareOp::Le, "Elementwise less-or-equal.");
impl_compare_fn!(gt, CompareOp::Gt, "Elementwise greater-than.");
impl_compare_fn!(ge, CompareOp::Ge, "Elementwise greater-or-equal.");

// ======================================================================
// Arithmetic operators
//
// The std::ops traits cannot return Result; these panic on engine failure.
// The fallible forms are `binary` / `binary_scalar` above.
// ======================================================================

const BINARY_PANIC: &str = "engine elementwise op failed";
const COMPOUND_PANIC: &str = "compound assignment failed";

macro_rules! impl_binary_scalar_op {
    ($trait:ident, $method:ident, $op:expr, $scalar:ty) => {
        impl<E: Engine> $trait<$scalar> for &Array<E> {
            type Output = Array<E>;

            fn $method(self, rhs: $scalar) -> Array<E> {
                self.binary_scalar(rhs, $op).expect(BINARY_PANIC)
            }
        }

        impl<E: Engine> $trait<$scalar> for Array<E> {
            type Output = Array<E>;

            fn $method(self, rhs: $scalar) -> Array<E> {
                self.binary_scalar(rhs, $op).expect(BINARY_PANIC)
            }
        }

        // Mirrored form: the constant is materialized on the scalar's side,
        // so non-commutative ops stay order-correct.
        impl<E: Engine> $trait<&Array<E>> for $scalar {
            type Output = Array<E>;

            fn $method(self, rhs: &Array<E>) -> Array<E> {
                let out = rhs
                    .constant_like(self.into())
                    .and_then(|cst| cst.binary(rhs, $op));
                out.expect(BINARY_PANIC)
            }
        }

        impl<E: Engine> $trait<Array<E>> for $scalar {
            type Output = Array<E>;

            fn $method(self, rhs: Array<E>) -> Array<E> {
                let out = rhs
                    .constant_like(self.into())
                    .and_then(|cst| cst.binary(&rhs, $op));
                out.expect(BINARY_PANIC)
            }
        }
    };
}

macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, $op:expr) => {
        impl<'a, E: Engine> $trait<&'a Array<E>> for &'a Array<E> {
            type Output = Array<E>;

            fn $method(self, rhs: &'a Array<E>) -> Array<E> {
                self.binary(rhs, $op).expect(BINARY_PANIC)
            }
        }

        impl<E: Engine> $trait<Array<E>> for Array<E> {
            type Output = Array<E>;

            fn $method(self, rhs: Array<E>) -> Array<E> {
                self.binary(&rhs, $op).expect(BINARY_PANIC)
            }
        }

        impl_binary_scalar_op!($trait, $method, $op, f64);
        impl_binary_scalar_op!($trait, $method, $op, Complex<f32>);
        impl_binary_scalar_op!($trait, $method, $op, Complex<f64>);
    };
}

impl_binary_op!(Add, add, BinaryOp::Add);
impl_binary_op!(Sub, sub, BinaryOp::Sub);
impl_binary_op!(Mul, mul, BinaryOp::Mul);
impl_binary_op!(Div, div, BinaryOp::Div);

// ======================================================================
// Compound assignment
//
// Defined as binary-then-assign: the result replaces this value's handle
// through the assignment path, it does not mutate storage in place.
// ======================================================================

macro_rules! impl_compound_op {
    ($trait:ident, $method:ident, $op:expr) => {
        impl<E: Engine> $trait<&Array<E>> for Array<E> {
            fn $method(&mut self, rhs: &Array<E>) {
                let out = self.binary(rhs, $op).expect(COMPOUND_PANIC);
                self.assign(&out).expect(COMPOUND_PANIC);
            }
        }

        impl<E: Engine> $trait<Array<E>> for Array<E> {
            fn $method(&mut self, rhs: Array<E>) {
                self.$method(&rhs);
            }
        }

        impl_compound_scalar_op!($trait, $method, $op, f64);
        impl_compound_scalar_op!($trait, $method, $op, Complex<f32>);
        impl_compound_scalar_op!($trait, $method, $op, Complex<f64>);
    };
}

macro_rules! impl_compound_scalar_op {
    ($trait:ident, $method:ident, $op:expr, $scalar:ty) => {
        impl<E: Engine> $trait<$scalar> for Array<E> {
            fn $method(&mut self, rhs: $scalar) {
                let out = self.binary_scalar(rhs, $op).expect(COMPOUND_PANIC);
                self.assign(&out).expect(COMPOUND_PANIC);
            }
        }
    };
}

impl_compound_op!(AddAssign, add_assign, BinaryOp::Add);
impl_compound_op!(SubAssign, sub_assign, BinaryOp::Sub);
impl_compound_op!(MulAssign, mul_assign, BinaryOp::Mul);
impl_compound_op!(DivAssign, div_assign, BinaryOp::Div);
