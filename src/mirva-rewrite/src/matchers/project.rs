//! Projection containment matcher.

use common_error::MirvaResult;

use crate::context::RewriteContext;
use crate::failure::RewriteFailure;

use super::{MatchOutcome, Matcher};

/// Checks that every attribute the query projects is available at the first
/// level of the view's output. No compensation is produced; the projection
/// list itself is rewritten by the paired rewriter.
#[derive(Debug, Default)]
pub struct ProjectMatcher;

impl Matcher for ProjectMatcher {
    fn name(&self) -> &'static str {
        "ProjectMatcher"
    }

    fn try_match(&self, ctx: &RewriteContext) -> MirvaResult<MatchOutcome> {
        let view_output = ctx.view_output_names();

        for expr in &ctx.component.query_projection {
            for column in expr.column_refs() {
                if !view_output.iter().any(|name| *name == column.name) {
                    return Ok(MatchOutcome::Unmatched(RewriteFailure::ProjectUnmatch));
                }
            }
        }

        Ok(MatchOutcome::trivial())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ProcessedComponent;
    use mirva_logical::expr::col;
    use mirva_logical::{PlanBuilder, ProjectOp, ScanOp};

    fn context_for(query_cols: &[&str], view_cols: &[&str]) -> RewriteContext {
        let query = PlanBuilder::scan(ScanOp::new("t"))
            .project(ProjectOp::columns(query_cols.iter().copied()))
            .build();
        let view = PlanBuilder::scan(ScanOp::new("t"))
            .project(ProjectOp::columns(view_cols.iter().copied()))
            .build();
        let component = ProcessedComponent::from_plans(query.root(), view.root());
        let table = PlanBuilder::scan(ScanOp::new("mv_store")).build();
        RewriteContext::new("mv", &view, &table, component)
    }

    #[test]
    fn test_projection_covered() {
        let ctx = context_for(&["a"], &["a", "b"]);
        let outcome = ProjectMatcher.try_match(&ctx).unwrap();
        assert!(outcome.is_matched());
    }

    #[test]
    fn test_projection_not_covered() {
        let ctx = context_for(&["a", "c"], &["a", "b"]);
        let outcome = ProjectMatcher.try_match(&ctx).unwrap();
        assert!(matches!(
            outcome,
            MatchOutcome::Unmatched(RewriteFailure::ProjectUnmatch)
        ));
    }

    #[test]
    fn test_computed_projection_attributes() {
        let query = PlanBuilder::scan(ScanOp::new("t"))
            .project(ProjectOp::new(vec![col("a").add(col("b")).alias("s")]))
            .build();
        let view = PlanBuilder::scan(ScanOp::new("t"))
            .project(ProjectOp::columns(["a", "b"]))
            .build();
        let component = ProcessedComponent::from_plans(query.root(), view.root());
        let table = PlanBuilder::scan(ScanOp::new("mv_store")).build();
        let ctx = RewriteContext::new("mv", &view, &table, component);

        // a + b is computable: both attributes are in the view output
        assert!(ProjectMatcher.try_match(&ctx).unwrap().is_matched());
    }
}
