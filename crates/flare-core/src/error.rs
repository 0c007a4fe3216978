//! Error types for Flare

use crate::dim::Dim4;
use crate::dtype::DType;
use thiserror::Error;

/// Every failure surfaced by the engine boundary or the frontend.
///
/// Engine calls report failure synchronously at the call site; nothing is
/// retried, batched, or substituted with defaults.
#[derive(Error, Debug, Clone)]
pub enum Error {
    #[error("null handle")]
    NullHandle,

    #[error("unknown handle: {0}")]
    UnknownHandle(u64),

    #[error("incompatible shapes for operation: {0} and {1}")]
    IncompatibleShapes(Dim4, Dim4),

    #[error("unsupported dtype {dtype} for {op}")]
    UnsupportedDtype { op: &'static str, dtype: DType },

    #[error("invalid shape {dims}: {reason}")]
    InvalidShape { dims: Dim4, reason: String },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("type mismatch: requested {requested}, array holds {actual}")]
    TypeMismatch { requested: DType, actual: DType },
}

pub type Result<T> = std::result::Result<T, Error>;
