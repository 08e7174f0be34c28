//! Projection substitution rewriter.

use common_error::MirvaResult;
use mirva_logical::{LogicalExpr, LogicalOp, ProjectOp};

use crate::context::RewriteContext;

use super::Rewriter;

/// Substitutes view-output attributes into the query's projection list,
/// recording every substitution in the context's replacement map. The
/// projection list itself is the compensation; the matcher emits none.
#[derive(Debug, Default)]
pub struct ProjectRewrite;

impl Rewriter for ProjectRewrite {
    fn name(&self) -> &'static str {
        "ProjectRewrite"
    }

    fn rewrite(
        &self,
        plan: LogicalOp,
        _compensation: Vec<LogicalExpr>,
        ctx: &mut RewriteContext,
    ) -> MirvaResult<LogicalOp> {
        let mut replaced = false;
        Ok(plan.transform_down(&mut |op| match op {
            LogicalOp::Project { input, project } if !replaced => {
                replaced = true;
                let exprs = project
                    .exprs
                    .into_iter()
                    .map(|expr| ctx.replace_columns(expr))
                    .collect();
                LogicalOp::Project {
                    input,
                    project: ProjectOp::new(exprs),
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
    use mirva_core::DataType;
    use mirva_logical::expr::{col, typed_col};
    use mirva_logical::{PlanBuilder, ScanOp};

    #[test]
    fn test_projection_columns_substituted() {
        let view = PlanBuilder::scan(ScanOp::new("t"))
            .project(ProjectOp::columns(["a", "b"]))
            .build();
        let table = PlanBuilder::scan(ScanOp::with_output(
            "mv_store",
            vec![
                typed_col("a", DataType::Int64),
                typed_col("b", DataType::String),
            ],
        ))
        .build();
        let mut ctx = RewriteContext::new("mv", &view, &table, ProcessedComponent::default());

        let plan = PlanBuilder::scan(ScanOp::new("t"))
            .project(ProjectOp::columns(["a", "b"]))
            .build();
        let rewritten = ProjectRewrite
            .rewrite(plan.root().clone(), Vec::new(), &mut ctx)
            .unwrap();

        let LogicalOp::Project { project, .. } = &rewritten else {
            panic!("expected Project at root");
        };
        // names survive; the substituted attributes carry the view types
        assert!(project.exprs[0].semantic_eq(&col("a")));
        assert_eq!(project.exprs[0].data_type(), Some(DataType::Int64));
        assert_eq!(ctx.replaced_columns.len(), 2);
    }
}
