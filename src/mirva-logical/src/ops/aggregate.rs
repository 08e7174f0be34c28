//! Aggregate operator.

use serde::{Deserialize, Serialize};

use crate::expr::LogicalExpr;

/// Aggregate operator - grouping and aggregation.
///
/// `aggregates` is the full output list of the node: grouping columns pass
/// through alongside the (usually aliased) aggregate calls, the way
/// analyzers emit `SELECT dept, COUNT(*) AS c ... GROUP BY dept`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateOp {
    /// Grouping key expressions.
    pub group_keys: Vec<LogicalExpr>,
    /// Output expressions: grouping columns and aggregate calls.
    pub aggregates: Vec<LogicalExpr>,
}

impl AggregateOp {
    /// Create a new aggregate operation.
    pub const fn new(group_keys: Vec<LogicalExpr>, aggregates: Vec<LogicalExpr>) -> Self {
        Self {
            group_keys,
            aggregates,
        }
    }

    /// Create an aggregate with no grouping (global aggregate).
    pub const fn global(aggregates: Vec<LogicalExpr>) -> Self {
        Self {
            group_keys: Vec::new(),
            aggregates,
        }
    }

    /// Check if this is a global aggregate (no grouping keys).
    pub const fn is_global(&self) -> bool {
        self.group_keys.is_empty()
    }

    /// Get the output names.
    pub fn output_names(&self) -> Vec<String> {
        self.aggregates
            .iter()
            .map(LogicalExpr::output_name)
            .collect()
    }

    /// Get the entries that are actual aggregate calls.
    pub fn agg_calls(&self) -> Vec<&LogicalExpr> {
        self.aggregates
            .iter()
            .filter(|e| e.contains_aggregate())
            .collect()
    }
}

impl std::fmt::Display for AggregateOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Aggregate(")?;

        if !self.group_keys.is_empty() {
            let keys = self
                .group_keys
                .iter()
                .map(LogicalExpr::output_name)
                .collect::<Vec<_>>()
                .join(", ");
            write!(f, "keys=[{keys}], ")?;
        }

        let outs = self
            .aggregates
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "out=[{outs}])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{col, count_star, sum};

    #[test]
    fn test_aggregate_creation() {
        let agg = AggregateOp::new(
            vec![col("dept")],
            vec![col("dept"), sum(col("salary")).alias("total")],
        );

        assert_eq!(agg.group_keys.len(), 1);
        assert_eq!(agg.aggregates.len(), 2);
        assert!(!agg.is_global());
        assert_eq!(agg.agg_calls().len(), 1);
    }

    #[test]
    fn test_global_aggregate() {
        let agg = AggregateOp::global(vec![count_star().alias("n")]);
        assert!(agg.is_global());
    }

    #[test]
    fn test_output_names() {
        let agg = AggregateOp::new(
            vec![col("dept")],
            vec![col("dept"), count_star().alias("c")],
        );
        assert_eq!(agg.output_names(), vec!["dept", "c"]);
    }
}
