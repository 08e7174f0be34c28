//! Scan substitution rewriter.

use common_error::MirvaResult;
use mirva_logical::{LogicalExpr, LogicalOp};

use crate::context::RewriteContext;

use super::Rewriter;

/// Replaces the matched base-table scan with the view's table plan (the
/// scan against the materialized rows), wrapped in a rewrite boundary so
/// outer transformations do not recurse into the substituted subtree.
#[derive(Debug, Default)]
pub struct TableOrViewRewrite;

impl Rewriter for TableOrViewRewrite {
    fn name(&self) -> &'static str {
        "TableOrViewRewrite"
    }

    fn rewrite(
        &self,
        plan: LogicalOp,
        _compensation: Vec<LogicalExpr>,
        ctx: &mut RewriteContext,
    ) -> MirvaResult<LogicalOp> {
        let view_table = ctx.view_table.clone();
        Ok(plan.transform_down(&mut |op| match op {
            LogicalOp::Scan(_) => LogicalOp::boundary(view_table.clone()),
            other => other,
        }))
    }
}
