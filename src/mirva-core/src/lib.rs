//! Core data model for the Mirva view rewriter.
//!
//! This crate provides the fundamental types the rewriter manipulates:
//! - `Value` and `DataType` for literals and their types
//! - `ColumnRef` for attribute identity

pub mod schema;
pub mod types;

// Re-export commonly used types
pub use schema::ColumnRef;
pub use types::{DataType, Value};
