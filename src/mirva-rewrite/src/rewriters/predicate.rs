//! Filter compensation rewriter.

use common_error::MirvaResult;
use mirva_logical::{FilterOp, LogicalExpr, LogicalOp};

use crate::context::RewriteContext;

use super::Rewriter;

/// Replaces the query's filter with the AND of the compensation predicates,
/// re-applied above the view. With no compensation the filter is dropped:
/// the view already enforces everything the query asked for.
#[derive(Debug, Default)]
pub struct PredicateRewrite;

impl Rewriter for PredicateRewrite {
    fn name(&self) -> &'static str {
        "PredicateRewrite"
    }

    fn rewrite(
        &self,
        plan: LogicalOp,
        compensation: Vec<LogicalExpr>,
        ctx: &mut RewriteContext,
    ) -> MirvaResult<LogicalOp> {
        let compensation: Vec<_> = compensation
            .into_iter()
            .map(|expr| ctx.replace_columns(expr))
            .collect();
        let condition = LogicalExpr::conjoin(compensation);

        let mut replaced = false;
        Ok(plan.transform_down(&mut |op| match op {
            LogicalOp::Filter { input, filter: _ } if !replaced => {
                replaced = true;
                match condition.clone() {
                    Some(cond) => LogicalOp::Filter {
                        input,
                        filter: FilterOp::new(cond),
                    },
                    None => *input,
                }
            }
            other => other,
        }))
    }
}
