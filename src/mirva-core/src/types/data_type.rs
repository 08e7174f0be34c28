//! Data type definitions for Mirva attributes and literals.

use serde::{Deserialize, Serialize};

/// Data type of an attribute or literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    /// Null type (unknown or absent).
    Null,
    /// Boolean type.
    Bool,
    /// 16-bit signed integer.
    Int16,
    /// 32-bit signed integer.
    Int32,
    /// 64-bit signed integer.
    Int64,
    /// 32-bit floating point.
    Float32,
    /// 64-bit floating point.
    Float64,
    /// UTF-8 string.
    String,
    /// Date (days since epoch).
    Date,
    /// Timestamp with nanosecond precision.
    Timestamp,
}

impl DataType {
    /// Check if this type is numeric.
    pub const fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::Int16 | Self::Int32 | Self::Int64 | Self::Float32 | Self::Float64
        )
    }

    /// Check if this type is a string type.
    pub const fn is_string(&self) -> bool {
        matches!(self, Self::String)
    }

    /// Check if this type is a temporal type.
    pub const fn is_temporal(&self) -> bool {
        matches!(self, Self::Timestamp | Self::Date)
    }

    /// Check if values of this type can be ordered by the range algebra.
    ///
    /// Numeric types compare by numeric value, strings lexicographically.
    /// Everything else is rejected by the range machinery.
    pub const fn is_orderable(&self) -> bool {
        self.is_numeric() || self.is_string()
    }

    /// Get the display name for this type.
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Null => "Null",
            Self::Bool => "Bool",
            Self::Int16 => "Int16",
            Self::Int32 => "Int32",
            Self::Int64 => "Int64",
            Self::Float32 => "Float32",
            Self::Float64 => "Float64",
            Self::String => "String",
            Self::Date => "Date",
            Self::Timestamp => "Timestamp",
        }
    }

    /// Get the common supertype of two types (for arithmetic type inference).
    pub fn common_supertype(&self, other: &Self) -> Option<Self> {
        if self == other {
            return Some(*self);
        }

        match (self, other) {
            (Self::Null, t) | (t, Self::Null) => Some(*t),
            (a, b) if a.is_numeric() && b.is_numeric() => {
                if matches!(a, Self::Float32 | Self::Float64)
                    || matches!(b, Self::Float32 | Self::Float64)
                {
                    Some(Self::Float64)
                } else {
                    Some(Self::Int64)
                }
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_predicate() {
        assert!(DataType::Int16.is_numeric());
        assert!(DataType::Float64.is_numeric());
        assert!(!DataType::String.is_numeric());
        assert!(!DataType::Bool.is_numeric());
    }

    #[test]
    fn test_orderable() {
        assert!(DataType::Int32.is_orderable());
        assert!(DataType::String.is_orderable());
        assert!(!DataType::Bool.is_orderable());
        assert!(!DataType::Timestamp.is_orderable());
    }

    #[test]
    fn test_common_supertype() {
        assert_eq!(
            DataType::Int16.common_supertype(&DataType::Int64),
            Some(DataType::Int64)
        );
        assert_eq!(
            DataType::Int64.common_supertype(&DataType::Float32),
            Some(DataType::Float64)
        );
        assert_eq!(DataType::String.common_supertype(&DataType::Int64), None);
    }
}
