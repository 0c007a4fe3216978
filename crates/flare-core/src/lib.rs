//! Flare Core - Array value type and engine boundary traits
//!
//! This crate defines the value-semantic [`Array`] frontend and the trait
//! interface an engine must implement. All storage, kernel execution, and
//! reference counting live behind the engine boundary; the frontend only
//! moves opaque handles around and makes array values behave like ordinary
//! variables (copy, assign, arithmetic, comparison).

pub mod array;
pub mod creation;
pub mod dim;
pub mod dtype;
pub mod engine;
pub mod error;
pub mod ops;

pub use array::Array;
pub use creation::{constant, constant_c32, constant_c64, randn, randu};
pub use dim::Dim4;
pub use dtype::{DType, HostData, Scalar};
pub use engine::{
    ArrayInfo, BinaryOp, CompareOp, CompareOps, ConvertOps, CreationOps, Engine, Handle,
    LifecycleOps, MathOps, QueryOps, RandomOps, Source,
};
pub use error::{Error, Result};
pub use ops::{eq, ge, gt, le, lt, neq, Operand};
