//! Core error types for Mirva.

use thiserror::Error;

/// Result type alias using `MirvaError`.
pub type MirvaResult<T> = std::result::Result<T, MirvaError>;

/// Core error type for Mirva operations.
///
/// These are hard faults: an error aborts the whole rewrite call. Rewrite
/// rejections (a candidate view that cannot answer the query) are not
/// errors; they are modeled as data by the rewrite crate.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MirvaError {
    /// Type mismatch or invalid type operation.
    #[error("TypeError: {0}")]
    TypeError(String),

    /// Invalid value provided.
    #[error("ValueError: {0}")]
    ValueError(String),

    /// Schema-related error (column not found, ambiguous reference, etc.).
    #[error("SchemaError: {0}")]
    SchemaError(String),

    /// Column not found in an output list.
    #[error("ColumnNotFound: {0}")]
    ColumnNotFound(String),

    /// Malformed or unsupported logical plan.
    #[error("PlanError: {0}")]
    PlanError(String),

    /// Feature not yet implemented.
    #[error("NotImplemented: {0}")]
    NotImplemented(String),

    /// Internal error (bug in Mirva).
    #[error("InternalError: {0}")]
    InternalError(String),

    /// JSON serialization error.
    #[error("SerdeJsonError: {0}")]
    SerdeJsonError(#[from] serde_json::Error),
}

impl MirvaError {
    /// Create a new `TypeError`.
    pub fn type_error<S: Into<String>>(msg: S) -> Self {
        Self::TypeError(msg.into())
    }

    /// Create a new `ValueError`.
    pub fn value_error<S: Into<String>>(msg: S) -> Self {
        Self::ValueError(msg.into())
    }

    /// Create a new `SchemaError`.
    pub fn schema_error<S: Into<String>>(msg: S) -> Self {
        Self::SchemaError(msg.into())
    }

    /// Create a new `PlanError`.
    pub fn plan_error<S: Into<String>>(msg: S) -> Self {
        Self::PlanError(msg.into())
    }

    /// Create a new `NotImplemented` error.
    pub fn not_implemented<S: Into<String>>(msg: S) -> Self {
        Self::NotImplemented(msg.into())
    }

    /// Create a new `InternalError`.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::InternalError(msg.into())
    }
}

/// Ensure a condition holds, returning the given error variant if not.
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $msg:expr) => {
        if !$cond {
            return Err($crate::MirvaError::InternalError($msg.to_string()));
        }
    };
    ($cond:expr, $variant:ident: $($msg:tt)*) => {
        if !$cond {
            return Err($crate::MirvaError::$variant(format!($($msg)*)));
        }
    };
}

/// Return early with a `ValueError`.
#[macro_export]
macro_rules! value_err {
    ($($arg:tt)*) => {
        return Err($crate::MirvaError::ValueError(format!($($arg)*)))
    };
}

/// Return early with a `TypeError`.
#[macro_export]
macro_rules! type_err {
    ($($arg:tt)*) => {
        return Err($crate::MirvaError::TypeError(format!($($arg)*)))
    };
}
