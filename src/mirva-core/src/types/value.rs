//! Literal value representation.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use common_error::{MirvaError, MirvaResult};

use super::DataType;

/// A literal value in a Mirva expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Null value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// 16-bit signed integer.
    Int16(i16),
    /// 32-bit signed integer.
    Int32(i32),
    /// 64-bit signed integer.
    Int64(i64),
    /// 32-bit floating point.
    Float32(f32),
    /// 64-bit floating point.
    Float64(f64),
    /// UTF-8 string.
    String(String),
    /// Date (days since Unix epoch).
    Date(i32),
    /// Timestamp (nanoseconds since Unix epoch).
    Timestamp(i64),
}

impl Value {
    /// Check if this value is null.
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Try to get as boolean.
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get as i64, widening smaller integers.
    pub const fn as_int64(&self) -> Option<i64> {
        match self {
            Self::Int16(i) => Some(*i as i64),
            Self::Int32(i) => Some(*i as i64),
            Self::Int64(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get as f64, widening any numeric variant.
    pub fn as_float64(&self) -> Option<f64> {
        match self {
            Self::Int16(i) => Some(*i as f64),
            Self::Int32(i) => Some(*i as f64),
            Self::Int64(i) => Some(*i as f64),
            Self::Float32(f) => Some(*f as f64),
            Self::Float64(f) => Some(*f),
            _ => None,
        }
    }

    /// Try to get as string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Check if this value is numeric.
    pub const fn is_numeric(&self) -> bool {
        self.data_type().is_numeric()
    }

    /// Get the type name for error messages.
    pub const fn type_name(&self) -> &'static str {
        self.data_type().display_name()
    }

    /// Get the data type of this value.
    pub const fn data_type(&self) -> DataType {
        match self {
            Self::Null => DataType::Null,
            Self::Bool(_) => DataType::Bool,
            Self::Int16(_) => DataType::Int16,
            Self::Int32(_) => DataType::Int32,
            Self::Int64(_) => DataType::Int64,
            Self::Float32(_) => DataType::Float32,
            Self::Float64(_) => DataType::Float64,
            Self::String(_) => DataType::String,
            Self::Date(_) => DataType::Date,
            Self::Timestamp(_) => DataType::Timestamp,
        }
    }

    /// Compare two values under the range-algebra order.
    ///
    /// Numeric values compare by numeric value after widening to `f64`,
    /// so mixed integer/float comparisons are well defined. Strings compare
    /// lexicographically. Any other combination is a `TypeError`.
    pub fn compare(&self, other: &Self) -> MirvaResult<Ordering> {
        match (self, other) {
            (a, b) if a.is_numeric() && b.is_numeric() => {
                let lhs = a.as_float64().unwrap_or_default();
                let rhs = b.as_float64().unwrap_or_default();
                lhs.partial_cmp(&rhs).ok_or_else(|| {
                    MirvaError::value_error(format!("NaN is not orderable: {lhs} vs {rhs}"))
                })
            }
            (Self::String(a), Self::String(b)) => Ok(a.cmp(b)),
            (a, b) => Err(MirvaError::type_error(format!(
                "values of type {} and {} are not orderable",
                a.type_name(),
                b.type_name()
            ))),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Self::Int16(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int32(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int64(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float32(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float64(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => write!(f, "NULL"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int16(i) => write!(f, "{i}"),
            Self::Int32(i) => write!(f, "{i}"),
            Self::Int64(i) => write!(f, "{i}"),
            Self::Float32(v) => write!(f, "{v}"),
            Self::Float64(v) => write!(f, "{v}"),
            Self::String(s) => write!(f, "'{s}'"),
            Self::Date(d) => write!(f, "DATE({d})"),
            Self::Timestamp(t) => write!(f, "TIMESTAMP({t})"),
        }
    }
}
