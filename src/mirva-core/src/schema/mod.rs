//! Attribute identity for Mirva expressions.

mod column_ref;

pub use column_ref::ColumnRef;
