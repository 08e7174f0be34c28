//! Aggregate substitution rewriter.

use common_error::MirvaResult;
use mirva_logical::{AggregateOp, LogicalExpr, LogicalOp};

use crate::context::RewriteContext;

use super::Rewriter;

/// Replaces the query's `Aggregate` node: the grouping expressions are
/// substituted with view-output attributes and the output list becomes the
/// matcher's compensation (the rolled-up aggregate calls).
#[derive(Debug, Default)]
pub struct GroupByRewrite;

impl Rewriter for GroupByRewrite {
    fn name(&self) -> &'static str {
        "GroupByRewrite"
    }

    fn rewrite(
        &self,
        plan: LogicalOp,
        compensation: Vec<LogicalExpr>,
        ctx: &mut RewriteContext,
    ) -> MirvaResult<LogicalOp> {
        let aggregates: Vec<_> = compensation
            .into_iter()
            .map(|expr| ctx.replace_columns(expr))
            .collect();

        let mut replaced = false;
        Ok(plan.transform_down(&mut |op| match op {
            LogicalOp::Aggregate { input, aggregate } if !replaced => {
                replaced = true;
                let group_keys = aggregate
                    .group_keys
                    .into_iter()
                    .map(|key| ctx.replace_columns(key))
                    .collect();
                LogicalOp::Aggregate {
                    input,
                    aggregate: AggregateOp::new(group_keys, aggregates.clone()),
                }
            }
            other => other,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ProcessedComponent;
    use mirva_logical::expr::{col, count_star, sum};
    use mirva_logical::{PlanBuilder, ScanOp};

    #[test]
    fn test_aggregate_node_replaced() {
        let view = PlanBuilder::scan(ScanOp::new("e"))
            .aggregate(AggregateOp::new(
                vec![col("dept"), col("emp")],
                vec![col("dept"), col("emp"), count_star().alias("c")],
            ))
            .build();
        let table = PlanBuilder::scan(ScanOp::with_output(
            "mv_store",
            vec![col("dept"), col("emp"), col("c")],
        ))
        .build();
        let mut ctx = RewriteContext::new("mv", &view, &table, ProcessedComponent::default());

        let plan = PlanBuilder::scan(ScanOp::new("e"))
            .aggregate(AggregateOp::new(
                vec![col("dept")],
                vec![col("dept"), count_star().alias("n")],
            ))
            .build();

        let comp = vec![col("dept"), sum(col("c")).alias("n")];
        let rewritten = GroupByRewrite
            .rewrite(plan.root().clone(), comp, &mut ctx)
            .unwrap();

        let LogicalOp::Aggregate { aggregate, .. } = &rewritten else {
            panic!("expected Aggregate at root");
        };
        assert_eq!(aggregate.group_keys.len(), 1);
        assert!(aggregate.aggregates[1].semantic_eq(&sum(col("c"))));
        assert_eq!(aggregate.aggregates[1].output_name(), "n");
    }
}
