//! Rewrite rule for join-free, aggregation-free queries.

use common_error::MirvaResult;
use mirva_logical::{LogicalOp, LogicalPlan};

use crate::catalog::ViewCatalog;
use crate::component::ProcessedComponent;
use crate::context::RewriteContext;
use crate::failure::RewriteFailure;
use crate::pipeline::Pipeline;
use crate::RewriteOptions;

use super::rule::{CandidateFailure, RewriteRule, Rewritten};

/// Rewrites `Project(Filter?(Scan))` queries over a single base table to
/// read from a matching materialized view.
///
/// Candidates are the catalog's views over the scanned table, tried in
/// registration order; the first candidate whose pipeline completes without
/// stopping commits, and the remaining candidates are not examined.
#[derive(Debug, Default)]
pub struct WithoutJoinGroupRule;

impl RewriteRule for WithoutJoinGroupRule {
    fn name(&self) -> &'static str {
        "WithoutJoinGroup"
    }

    fn description(&self) -> &'static str {
        "Rewrite join-free, aggregation-free queries against materialized views"
    }

    fn apply(
        &self,
        plan: &LogicalPlan,
        catalog: &ViewCatalog,
        options: &RewriteOptions,
    ) -> MirvaResult<Rewritten> {
        let root = plan.root();

        if !matches!(root, LogicalOp::Project { .. }) || root.contains_aggregate() {
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
            // a missing catalog entry is a soft miss, not a fault
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
            if definition.root().contains_aggregate() {
                // pre-aggregated views cannot answer row-level queries
                continue;
            }

            let component = ProcessedComponent::from_plans(root, definition.root());
            let mut ctx =
                RewriteContext::new(view_name.clone(), definition, view_table, component);

            let state = Pipeline::without_aggregate(options.strict_ranges)
                .run(root.clone(), &mut ctx)?;
            if state.stopped {
                let failure = state.failure.unwrap_or(RewriteFailure::PredicateUnmatch);
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
    use mirva_logical::expr::{col, lit};
    use mirva_logical::{FilterOp, JoinOp, PlanBuilder, ProjectOp, ScanOp};

    fn catalog_with_view() -> ViewCatalog {
        let mut catalog = ViewCatalog::new();
        let definition = PlanBuilder::scan(ScanOp::new("t"))
            .filter(FilterOp::new(col("a").eq(lit("jack"))))
            .project(ProjectOp::columns(["a", "b"]))
            .build();
        let table = PlanBuilder::scan(ScanOp::with_output(
            "mv_jack_store",
            vec![col("a"), col("b")],
        ))
        .build();
        catalog.register_view("mv_jack", definition, table);
        catalog
    }

    #[test]
    fn test_commit_first_matching_candidate() {
        let query = PlanBuilder::scan(ScanOp::new("t"))
            .filter(FilterOp::new(
                col("a").eq(lit("jack")).and(col("b").eq(lit("wow"))),
            ))
            .project(ProjectOp::columns(["a", "b"]))
            .build();

        let result = WithoutJoinGroupRule
            .apply(&query, &catalog_with_view(), &RewriteOptions::default())
            .unwrap();

        assert!(result.rewritten);
        assert_eq!(result.view.as_deref(), Some("mv_jack"));
        assert_eq!(result.plan.root().extract_tables(), vec!["mv_jack_store"]);
    }

    #[test]
    fn test_no_candidates_leaves_plan_unchanged() {
        let query = PlanBuilder::scan(ScanOp::new("other"))
            .project(ProjectOp::columns(["a"]))
            .build();

        let result = WithoutJoinGroupRule
            .apply(&query, &catalog_with_view(), &RewriteOptions::default())
            .unwrap();

        assert!(!result.rewritten);
        assert_eq!(result.plan, query);
    }

    #[test]
    fn test_join_in_query_declines() {
        let query = LogicalPlan::new(mirva_logical::LogicalOp::project(
            mirva_logical::LogicalOp::join(
                mirva_logical::LogicalOp::scan(ScanOp::new("t")),
                mirva_logical::LogicalOp::scan(ScanOp::new("u")),
                JoinOp::inner(col("t.id").eq(col("u.id"))),
            ),
            ProjectOp::columns(["a"]),
        ));

        let result = WithoutJoinGroupRule
            .apply(&query, &catalog_with_view(), &RewriteOptions::default())
            .unwrap();

        assert!(!result.rewritten);
        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.failures[0].failure, RewriteFailure::JoinUnmatch);
    }

    #[test]
    fn test_failed_candidate_recorded_then_next_tried() {
        let mut catalog = ViewCatalog::new();
        // first candidate is too strict for the query
        let strict = PlanBuilder::scan(ScanOp::new("t"))
            .filter(FilterOp::new(col("a").eq(lit("jill"))))
            .project(ProjectOp::columns(["a", "b"]))
            .build();
        catalog.register_view(
            "mv_strict",
            strict,
            PlanBuilder::scan(ScanOp::new("mv_strict_store")).build(),
        );
        // second candidate covers the whole table
        let wide = PlanBuilder::scan(ScanOp::new("t"))
            .project(ProjectOp::columns(["a", "b"]))
            .build();
        catalog.register_view(
            "mv_wide",
            wide,
            PlanBuilder::scan(ScanOp::new("mv_wide_store")).build(),
        );

        let query = PlanBuilder::scan(ScanOp::new("t"))
            .filter(FilterOp::new(col("a").eq(lit("jack"))))
            .project(ProjectOp::columns(["a", "b"]))
            .build();

        let result = WithoutJoinGroupRule
            .apply(&query, &catalog, &RewriteOptions::default())
            .unwrap();

        assert!(result.rewritten);
        assert_eq!(result.view.as_deref(), Some("mv_wide"));
        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.failures[0].view.as_deref(), Some("mv_strict"));
    }
}
