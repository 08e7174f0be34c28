//! Project operator.

use serde::{Deserialize, Serialize};

use crate::expr::LogicalExpr;

/// Project operator - output expression selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectOp {
    /// Projected expressions.
    pub exprs: Vec<LogicalExpr>,
}

impl ProjectOp {
    /// Create a new project operation.
    pub const fn new(exprs: Vec<LogicalExpr>) -> Self {
        Self { exprs }
    }

    /// Create a projection of plain columns.
    pub fn columns(names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            exprs: names
                .into_iter()
                .map(|n| LogicalExpr::column(n.into()))
                .collect(),
        }
    }

    /// Get the output names.
    pub fn output_names(&self) -> Vec<String> {
        self.exprs.iter().map(LogicalExpr::output_name).collect()
    }
}

impl std::fmt::Display for ProjectOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let exprs = self
            .exprs
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "Project({exprs})")
    }
}
