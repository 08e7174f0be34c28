//! Error types and result aliases for Mirva.
//!
//! This module provides the core error handling infrastructure shared by
//! all Mirva crates.

mod error;

pub use error::{MirvaError, MirvaResult};
