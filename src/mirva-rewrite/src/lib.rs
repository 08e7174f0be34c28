//! Materialized-view query rewriting for Mirva.
//!
//! `mirva-rewrite` implements the match-and-compensate engine: given a
//! logical query plan and a catalog of materialized views, it decides
//! whether the query can be answered from a view - possibly with a
//! compensating filter, projection, or aggregation on top - and produces a
//! rewritten plan that reads from the view instead of the base table.
//!
//! Rewriting is a pure function of the plan and a catalog snapshot. A
//! candidate that cannot answer the query is rejected with a typed
//! [`RewriteFailure`]; rejections are data in the result's failure log,
//! never errors. If no candidate commits, the original plan is returned
//! unchanged.
//!
//! # Example
//!
//! ```rust
//! use mirva_logical::expr::{col, lit};
//! use mirva_logical::{FilterOp, PlanBuilder, ProjectOp, ScanOp};
//! use mirva_rewrite::{rewrite, ViewCatalog};
//!
//! // CREATE MATERIALIZED VIEW mv AS SELECT a, b FROM t WHERE a = 'jack'
//! let mut catalog = ViewCatalog::new();
//! catalog.register_view(
//!     "mv",
//!     PlanBuilder::scan(ScanOp::new("t"))
//!         .filter(FilterOp::new(col("a").eq(lit("jack"))))
//!         .project(ProjectOp::columns(["a", "b"]))
//!         .build(),
//!     PlanBuilder::scan(ScanOp::with_output("mv_store", vec![col("a"), col("b")])).build(),
//! );
//!
//! // SELECT a, b FROM t WHERE a = 'jack' AND b = 'wow'
//! let query = PlanBuilder::scan(ScanOp::new("t"))
//!     .filter(FilterOp::new(col("a").eq(lit("jack")).and(col("b").eq(lit("wow")))))
//!     .project(ProjectOp::columns(["a", "b"]))
//!     .build();
//!
//! let result = rewrite(&query, &catalog).unwrap();
//! assert!(result.rewritten);
//! assert_eq!(result.plan.root().extract_tables(), vec!["mv_store"]);
//! ```

pub mod catalog;
pub mod component;
pub mod context;
pub mod failure;
pub mod matchers;
pub mod pipeline;
pub mod range;
pub mod rewriters;
pub mod rules;
pub mod sets;

#[cfg(test)]
mod proptest_laws;

// Re-export commonly used types
pub use catalog::ViewCatalog;
pub use component::ProcessedComponent;
pub use context::RewriteContext;
pub use failure::RewriteFailure;
pub use matchers::{MatchOutcome, Matcher};
pub use pipeline::{Pipeline, PipelineState, Stage};
pub use range::RangeCondition;
pub use rewriters::Rewriter;
pub use rules::{
    AggregateWithoutJoinRule, CandidateFailure, RewriteRule, Rewritten, WithoutJoinGroupRule,
};

use common_error::MirvaResult;
use mirva_logical::LogicalPlan;

/// Knobs for the rewrite engine.
#[derive(Debug, Clone, Copy)]
pub struct RewriteOptions {
    /// Honor bound inclusivity in range containment instead of the
    /// source-compatible value-only comparison.
    pub strict_ranges: bool,
}

impl Default for RewriteOptions {
    fn default() -> Self {
        Self {
            strict_ranges: false,
        }
    }
}

/// Try to rewrite the plan to read from a materialized view.
///
/// Tries the join-free rule and then the aggregate rule; the first rule
/// that commits wins. The returned plan either equals the input or is a
/// valid rewrite reading from a view, with the per-candidate rejections in
/// the failure log either way.
pub fn rewrite(plan: &LogicalPlan, catalog: &ViewCatalog) -> MirvaResult<Rewritten> {
    rewrite_with_options(plan, catalog, &RewriteOptions::default())
}

/// [`rewrite`] with explicit options.
pub fn rewrite_with_options(
    plan: &LogicalPlan,
    catalog: &ViewCatalog,
    options: &RewriteOptions,
) -> MirvaResult<Rewritten> {
    let rules: [&dyn RewriteRule; 2] = [&WithoutJoinGroupRule, &AggregateWithoutJoinRule];

    let mut failures = Vec::new();
    for rule in rules {
        let mut result = rule.apply(plan, catalog, options)?;
        if result.rewritten {
            failures.append(&mut result.failures);
            return Ok(result.with_failures(failures));
        }
        failures.extend(result.failures);
    }

    Ok(Rewritten::unchanged(plan.clone()).with_failures(failures))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mirva_logical::expr::{col, lit};
    use mirva_logical::{FilterOp, PlanBuilder, ProjectOp, ScanOp};

    #[test]
    fn test_rewrite_without_candidates_is_identity() {
        let query = PlanBuilder::scan(ScanOp::new("t"))
            .filter(FilterOp::new(col("a").gt(lit(0i64))))
            .project(ProjectOp::columns(["a"]))
            .build();

        let result = rewrite(&query, &ViewCatalog::new()).unwrap();
        assert!(!result.rewritten);
        assert_eq!(result.plan, query);
        assert!(result.failures.is_empty());
    }

    #[test]
    fn test_options_default_is_lenient() {
        let options = RewriteOptions::default();
        assert!(!options.strict_ranges);
    }
}
