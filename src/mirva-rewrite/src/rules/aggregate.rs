//! Rewrite rule for join-free aggregating queries.

use common_error::MirvaResult;
use mirva_logical::{LogicalOp, LogicalPlan};

use crate::catalog::ViewCatalog;
use crate::component::ProcessedComponent;
use crate::context::RewriteContext;
use crate::failure::RewriteFailure;
use crate::pipeline::Pipeline;
use crate::RewriteOptions;

use super::rule::{CandidateFailure, RewriteRule, Rewritten};

/// Rewrites `Aggregate(Filter?(Scan))` and `Project(Aggregate(Filter?(
/// Scan)))` queries to roll up from a pre-aggregated materialized view.
///
/// The candidate view must itself aggregate; the query may group coarser
/// than the view, with `COUNT(*)` and `AVG` recomputed from the view's
/// partial aggregates.
#[derive(Debug, Default)]
pub struct AggregateWithoutJoinRule;

/// Check the supported aggregate query shapes.
fn is_aggregate_shape(root: &LogicalOp) -> bool {
    match root {
        LogicalOp::Aggregate { .. } => true,
        LogicalOp::Project { input, .. } => matches!(input.as_ref(), LogicalOp::Aggregate { .. }),
        _ => false,
    }
}

impl RewriteRule for AggregateWithoutJoinRule {
    fn name(&self) -> &'static str {
        "AggregateWithoutJoin"
    }

    fn description(&self) -> &'static str {
        "Roll up join-free aggregating queries from pre-aggregated materialized views"
    }

    fn apply(
        &self,
        plan: &LogicalPlan,
        catalog: &ViewCatalog,
        options: &RewriteOptions,
    ) -> MirvaResult<Rewritten> {
        let root = plan.root();

        if !is_aggregate_shape(root) {
            return Ok(Rewritten::unchanged(plan.clone()));
        }
        if root.contains_join() {
            let failure = CandidateFailure::query(RewriteFailure::JoinUnmatch);
            log::debug!("{}: {failure}", self.name());
            return Ok(Rewritten::unchanged(plan.clone()).with_failures(vec![failure]));
        }

        let tables = root.extract_tables();
        let [table] = tables.as_slice() else {
            return Ok(Rewritten::unchanged(plan.clone()));
        };
        let Some(candidates) = catalog.candidate_views(table) else {
            return Ok(Rewritten::unchanged(plan.clone()));
        };

        let mut failures = Vec::new();
        for view_name in candidates {
            let (Some(definition), Some(view_table)) = (
                catalog.view_definition_plan(view_name),
                catalog.view_table_plan(view_name),
            ) else {
                continue;
            };

            if definition.root().contains_join() {
                let failure =
                    CandidateFailure::candidate(view_name, RewriteFailure::JoinUnmatch);
                log::debug!("{}: {failure}", self.name());
                failures.push(failure);
                continue;
            }
            if !definition.root().contains_aggregate() {
                // only pre-aggregated views can feed a roll-up
                continue;
            }

            let component = ProcessedComponent::from_plans(root, definition.root());
            let mut ctx =
                RewriteContext::new(view_name.clone(), definition, view_table, component);

            let state =
                Pipeline::with_aggregate(options.strict_ranges).run(root.clone(), &mut ctx)?;
            if state.stopped {
                let failure = state.failure.unwrap_or(RewriteFailure::AggColumnsUnmatch);
                let failure = CandidateFailure::candidate(view_name, failure);
                log::debug!("{}: {failure}", self.name());
                failures.push(failure);
                continue;
            }

            log::debug!("{}: committed view {view_name}", self.name());
            return Ok(
                Rewritten::committed(LogicalPlan::new(state.plan), view_name.clone())
                    .with_failures(failures),
            );
        }

        Ok(Rewritten::unchanged(plan.clone()).with_failures(failures))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mirva_logical::expr::{col, count_star, sum};
    use mirva_logical::{AggregateOp, PlanBuilder, ScanOp};

    fn rollup_catalog() -> ViewCatalog {
        let mut catalog = ViewCatalog::new();
        let definition = PlanBuilder::scan(ScanOp::new("e"))
            .aggregate(AggregateOp::new(
                vec![col("dept"), col("emp")],
                vec![
                    col("dept"),
                    col("emp"),
                    count_star().alias("c"),
                    sum(col("sal")).alias("s"),
                ],
            ))
            .build();
        let table = PlanBuilder::scan(ScanOp::with_output(
            "mv_dept_emp_store",
            vec![col("dept"), col("emp"), col("c"), col("s")],
        ))
        .build();
        catalog.register_view("mv_dept_emp", definition, table);
        catalog
    }

    #[test]
    fn test_rollup_commits() {
        let query = PlanBuilder::scan(ScanOp::new("e"))
            .aggregate(AggregateOp::new(
                vec![col("dept")],
                vec![
                    col("dept"),
                    count_star().alias("n"),
                    sum(col("sal")).alias("total"),
                ],
            ))
            .build();

        let result = AggregateWithoutJoinRule
            .apply(&query, &rollup_catalog(), &RewriteOptions::default())
            .unwrap();

        assert!(result.rewritten);
        let root = result.plan.root();
        assert_eq!(root.extract_tables(), vec!["mv_dept_emp_store"]);

        let LogicalOp::Aggregate { aggregate, .. } = root else {
            panic!("expected Aggregate at root");
        };
        // COUNT(*) n => SUM(c) AS n, SUM(sal) total => SUM(s) AS total
        assert!(aggregate.aggregates[1].semantic_eq(&sum(col("c"))));
        assert!(aggregate.aggregates[2].semantic_eq(&sum(col("s"))));
    }

    #[test]
    fn test_non_aggregate_query_is_ignored() {
        let query = PlanBuilder::scan(ScanOp::new("e"))
            .project(mirva_logical::ProjectOp::columns(["dept"]))
            .build();

        let result = AggregateWithoutJoinRule
            .apply(&query, &rollup_catalog(), &RewriteOptions::default())
            .unwrap();
        assert!(!result.rewritten);
    }

    #[test]
    fn test_row_level_view_skipped() {
        let mut catalog = ViewCatalog::new();
        let definition = PlanBuilder::scan(ScanOp::new("e"))
            .project(mirva_logical::ProjectOp::columns(["dept", "sal"]))
            .build();
        catalog.register_view(
            "mv_rows",
            definition,
            PlanBuilder::scan(ScanOp::new("mv_rows_store")).build(),
        );

        let query = PlanBuilder::scan(ScanOp::new("e"))
            .aggregate(AggregateOp::new(
                vec![col("dept")],
                vec![col("dept"), count_star().alias("n")],
            ))
            .build();

        let result = AggregateWithoutJoinRule
            .apply(&query, &catalog, &RewriteOptions::default())
            .unwrap();
        assert!(!result.rewritten);
        assert!(result.failures.is_empty());
    }
}
