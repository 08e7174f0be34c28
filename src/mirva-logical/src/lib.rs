//! Logical planning layer for the Mirva view rewriter.
//!
//! `mirva-logical` provides the expression IR and logical operator set the
//! rewrite engine manipulates. Plans are immutable values; transformation
//! happens through consuming combinators (`transform_down`, `map_children`)
//! that rebuild the tree.
//!
//! # Example
//!
//! ```rust
//! use mirva_logical::{PlanBuilder, ScanOp, FilterOp, ProjectOp};
//! use mirva_logical::expr::{col, lit};
//!
//! // SELECT name, city FROM person WHERE age > 18
//! let plan = PlanBuilder::scan(ScanOp::new("person"))
//!     .filter(FilterOp::new(col("age").gt(lit(18i64))))
//!     .project(ProjectOp::new(vec![col("name"), col("city")]))
//!     .build();
//!
//! println!("{}", plan.explain());
//! ```

pub mod expr;
pub mod ops;
mod plan;

// Re-export commonly used types
pub use plan::{LogicalPlan, PlanBuilder};

pub use ops::{AggregateOp, FilterOp, JoinKind, JoinOp, LogicalOp, ProjectOp, ScanOp};

pub use expr::{AggExpr, AggFunc, BinaryOp, Literal, LogicalExpr, UnaryOp};

// Re-export expression convenience functions
pub use expr::{avg, col, count_star, lit, qualified_col, sum, typed_col};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_plan() {
        // Scan -> Filter -> Project
        let plan = PlanBuilder::scan(ScanOp::new("person"))
            .filter(FilterOp::new(col("age").gte(lit(21i64))))
            .project(ProjectOp::new(vec![col("name"), col("email")]))
            .build();

        let explain = plan.explain();
        assert!(explain.contains("Scan"));
        assert!(explain.contains("Filter"));
        assert!(explain.contains("Project"));
    }

    #[test]
    fn test_aggregation_plan() {
        let plan = PlanBuilder::scan(ScanOp::new("orders"))
            .aggregate(AggregateOp::new(
                vec![col("customer_id")],
                vec![col("customer_id"), sum(col("amount")).alias("total")],
            ))
            .build();

        assert!(plan.root().contains_aggregate());
    }

    #[test]
    fn test_expression_builders() {
        let expr = col("price").mul(col("quantity")).alias("total");
        assert_eq!(expr.output_name(), "total");
    }
}
