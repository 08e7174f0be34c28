//! Base-table identity matcher.

use common_error::{MirvaError, MirvaResult};

use crate::context::RewriteContext;

use super::{MatchOutcome, Matcher};

/// Confirms the query reads the single base table the view definition
/// reads. No compensation.
///
/// Candidates are selected from the catalog by table name, so a mismatch
/// here means the component was built from the wrong plans; it is reported
/// as an internal fault, not as a rejection.
#[derive(Debug, Default)]
pub struct TableNonOpMatcher;

impl Matcher for TableNonOpMatcher {
    fn name(&self) -> &'static str {
        "TableNonOpMatcher"
    }

    fn try_match(&self, ctx: &RewriteContext) -> MirvaResult<MatchOutcome> {
        let component = &ctx.component;

        let [query_table] = component.query_tables.as_slice() else {
            return Err(MirvaError::internal(format!(
                "expected a single query table, found {:?}",
                component.query_tables
            )));
        };
        let [view_table] = component.view_tables.as_slice() else {
            return Err(MirvaError::internal(format!(
                "expected a single view table, found {:?}",
                component.view_tables
            )));
        };

        if query_table != view_table {
            return Err(MirvaError::internal(format!(
                "candidate view {} reads table {view_table}, query reads {query_table}",
                ctx.view_name
            )));
        }

        Ok(MatchOutcome::trivial())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ProcessedComponent;
    use mirva_logical::{PlanBuilder, ProjectOp, ScanOp};

    fn context_for(query_table: &str, view_table: &str) -> RewriteContext {
        let query = PlanBuilder::scan(ScanOp::new(query_table))
            .project(ProjectOp::columns(["a"]))
            .build();
        let view = PlanBuilder::scan(ScanOp::new(view_table))
            .project(ProjectOp::columns(["a"]))
            .build();
        let component = ProcessedComponent::from_plans(query.root(), view.root());
        let table = PlanBuilder::scan(ScanOp::new("mv_store")).build();
        RewriteContext::new("mv", &view, &table, component)
    }

    #[test]
    fn test_same_table_matches() {
        let ctx = context_for("t", "t");
        assert!(TableNonOpMatcher.try_match(&ctx).unwrap().is_matched());
    }

    #[test]
    fn test_mismatched_table_is_internal_fault() {
        let ctx = context_for("t", "u");
        assert!(TableNonOpMatcher.try_match(&ctx).is_err());
    }
}
