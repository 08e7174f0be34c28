//! Expression system for Mirva logical planning.
//!
//! Expressions are the smallest semantic units used in predicates,
//! projections, and aggregations. The rewrite engine compares them with
//! *semantic equality*: structural equality modulo column qualifiers and
//! redundant casts around literals.

mod agg;
mod binary;
mod expression;
mod unary;

pub use agg::{AggExpr, AggFunc};
pub use binary::BinaryOp;
pub use expression::{Literal, LogicalExpr};
pub use unary::UnaryOp;

/// Create an unqualified column reference expression with unknown type.
pub fn col(name: impl Into<String>) -> LogicalExpr {
    LogicalExpr::column(name)
}

/// Create a qualified column reference expression.
pub fn qualified_col(qualifier: impl Into<String>, name: impl Into<String>) -> LogicalExpr {
    LogicalExpr::qualified_column(qualifier, name)
}

/// Create a column reference expression with a known data type.
pub fn typed_col(name: impl Into<String>, data_type: mirva_core::DataType) -> LogicalExpr {
    LogicalExpr::typed_column(name, data_type)
}

/// Create a literal expression.
pub fn lit<V: Into<mirva_core::Value>>(value: V) -> LogicalExpr {
    LogicalExpr::literal(value)
}

/// Create a COUNT(*) aggregate.
pub fn count_star() -> LogicalExpr {
    LogicalExpr::Aggregate(AggExpr::count_star())
}

/// Create a COUNT aggregate.
pub fn count(expr: LogicalExpr) -> LogicalExpr {
    LogicalExpr::Aggregate(AggExpr::count(expr))
}

/// Create a SUM aggregate.
pub fn sum(expr: LogicalExpr) -> LogicalExpr {
    LogicalExpr::Aggregate(AggExpr::sum(expr))
}

/// Create a MIN aggregate.
pub fn min(expr: LogicalExpr) -> LogicalExpr {
    LogicalExpr::Aggregate(AggExpr::min(expr))
}

/// Create a MAX aggregate.
pub fn max(expr: LogicalExpr) -> LogicalExpr {
    LogicalExpr::Aggregate(AggExpr::max(expr))
}

/// Create an AVG aggregate.
pub fn avg(expr: LogicalExpr) -> LogicalExpr {
    LogicalExpr::Aggregate(AggExpr::avg(expr))
}
