//! Logical plan root structure.

use serde::{Deserialize, Serialize};

use crate::ops::{AggregateOp, FilterOp, JoinOp, LogicalOp, ProjectOp, ScanOp};

/// Root of a logical query plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogicalPlan {
    /// Root operator of the plan.
    pub root: LogicalOp,
}

impl LogicalPlan {
    /// Create a new logical plan.
    pub const fn new(root: LogicalOp) -> Self {
        Self { root }
    }

    /// Get the root operator.
    pub const fn root(&self) -> &LogicalOp {
        &self.root
    }

    /// Display the plan as a tree.
    pub fn explain(&self) -> String {
        self.root.explain(0)
    }
}

impl std::fmt::Display for LogicalPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.explain())
    }
}

/// Fluent builder for logical plans.
pub struct PlanBuilder {
    op: LogicalOp,
}

impl PlanBuilder {
    /// Start a plan from a scan.
    pub const fn scan(scan: ScanOp) -> Self {
        Self {
            op: LogicalOp::Scan(scan),
        }
    }

    /// Start a plan from an arbitrary operator.
    pub const fn from_op(op: LogicalOp) -> Self {
        Self { op }
    }

    /// Apply a filter.
    #[must_use]
    pub fn filter(self, filter: FilterOp) -> Self {
        Self {
            op: LogicalOp::filter(self.op, filter),
        }
    }

    /// Apply a projection.
    #[must_use]
    pub fn project(self, project: ProjectOp) -> Self {
        Self {
            op: LogicalOp::project(self.op, project),
        }
    }

    /// Apply an aggregation.
    #[must_use]
    pub fn aggregate(self, aggregate: AggregateOp) -> Self {
        Self {
            op: LogicalOp::aggregate(self.op, aggregate),
        }
    }

    /// Join with another plan.
    #[must_use]
    pub fn join(self, right: LogicalOp, join: JoinOp) -> Self {
        Self {
            op: LogicalOp::join(self.op, right, join),
        }
    }

    /// Finish building.
    pub fn build(self) -> LogicalPlan {
        LogicalPlan::new(self.op)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{col, lit};

    #[test]
    fn test_plan_creation() {
        let plan = PlanBuilder::scan(ScanOp::new("person"))
            .filter(FilterOp::new(col("age").gt(lit(18i64))))
            .project(ProjectOp::columns(["name"]))
            .build();

        let explain = plan.explain();
        assert!(explain.contains("Scan"));
        assert!(explain.contains("person"));
    }

    #[test]
    fn test_plan_serde_roundtrip() {
        let plan = PlanBuilder::scan(ScanOp::new("t"))
            .filter(FilterOp::new(col("a").eq(lit("x"))))
            .build();

        let json = serde_json::to_string(&plan).unwrap();
        let back: LogicalPlan = serde_json::from_str(&json).unwrap();
        assert_eq!(plan, back);
    }
}
