//! Table scan operator.

use serde::{Deserialize, Serialize};

use crate::expr::LogicalExpr;

/// Scan operator - reads a base table or a materialized table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanOp {
    /// Table name.
    pub table: String,
    /// Output attributes of the table, as column expressions.
    pub output: Vec<LogicalExpr>,
}

impl ScanOp {
    /// Create a scan with no declared output attributes.
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            output: Vec::new(),
        }
    }

    /// Create a scan with declared output attributes.
    pub fn with_output(table: impl Into<String>, output: Vec<LogicalExpr>) -> Self {
        Self {
            table: table.into(),
            output,
        }
    }

    /// Get the output attribute names.
    pub fn output_names(&self) -> Vec<String> {
        self.output.iter().map(LogicalExpr::output_name).collect()
    }
}

impl std::fmt::Display for ScanOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Scan({})", self.table)
    }
}
