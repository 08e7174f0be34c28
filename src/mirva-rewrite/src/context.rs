//! Shared state for one pipeline run.

use std::collections::HashMap;

use mirva_core::ColumnRef;
use mirva_logical::{LogicalExpr, LogicalOp, LogicalPlan};

use crate::component::ProcessedComponent;

/// The candidate's plans, split component, and attribute substitutions for
/// one pipeline run.
///
/// A context belongs to exactly one candidate and one pipeline run; it must
/// not be shared between concurrent rewrites. Matchers read it, rewriters
/// read it and record column substitutions.
#[derive(Debug, Clone)]
pub struct RewriteContext {
    /// Name of the candidate view.
    pub view_name: String,
    /// The view's definition plan (`CREATE MATERIALIZED VIEW AS ...`).
    pub view_definition: LogicalOp,
    /// A scan over the materialized rows of the view.
    pub view_table: LogicalOp,
    /// The split query/view component.
    pub component: ProcessedComponent,
    /// Attribute substitutions recorded by the rewriters, query attribute
    /// name to the view-table attribute that replaced it.
    pub replaced_columns: HashMap<String, ColumnRef>,
}

impl RewriteContext {
    /// Build the context for one candidate.
    pub fn new(
        view_name: impl Into<String>,
        definition: &LogicalPlan,
        table: &LogicalPlan,
        component: ProcessedComponent,
    ) -> Self {
        Self {
            view_name: view_name.into(),
            view_definition: definition.root().clone(),
            view_table: table.root().clone(),
            component,
            replaced_columns: HashMap::new(),
        }
    }

    /// The view definition's first-level output names.
    pub fn view_output_names(&self) -> Vec<String> {
        self.view_definition.output_names()
    }

    /// Find the view-table attribute with the given output name, if the
    /// view-table scan declares one.
    pub fn resolve_view_column(&self, name: &str) -> Option<&LogicalExpr> {
        self.view_table
            .output_exprs()
            .into_iter()
            .find(|e| e.output_name() == name)
    }

    /// Substitute every column in `expr` with the view-table attribute of
    /// the same name, recording each substitution. Columns the view table
    /// does not declare are left untouched; they keep their name, which is
    /// also how undeclared view-table outputs resolve at execution time.
    pub fn replace_columns(&mut self, expr: LogicalExpr) -> LogicalExpr {
        expr.transform_down(&mut |e| match e {
            LogicalExpr::Column { column, data_type } => {
                match self.resolve_view_column(&column.name).cloned() {
                    Some(LogicalExpr::Column {
                        column: new_column,
                        data_type: new_type,
                    }) => {
                        self.replaced_columns
                            .insert(column.name.clone(), new_column.clone());
                        // keep a known type from the original attribute if
                        // the view-table attribute is untyped
                        let data_type = if new_type == mirva_core::DataType::Null {
                            data_type
                        } else {
                            new_type
                        };
                        LogicalExpr::column_ref(new_column, data_type)
                    }
                    Some(other) => other,
                    None => LogicalExpr::Column { column, data_type },
                }
            }
            other => other,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mirva_logical::expr::{col, lit};
    use mirva_logical::{PlanBuilder, ProjectOp, ScanOp};

    fn sample_context() -> RewriteContext {
        let definition = PlanBuilder::scan(ScanOp::new("t"))
            .project(ProjectOp::columns(["a", "b"]))
            .build();
        let table = PlanBuilder::scan(ScanOp::with_output(
            "mv_store",
            vec![col("a"), col("b")],
        ))
        .build();
        let component = ProcessedComponent::default();
        RewriteContext::new("mv", &definition, &table, component)
    }

    #[test]
    fn test_view_output_names() {
        let ctx = sample_context();
        assert_eq!(ctx.view_output_names(), vec!["a", "b"]);
    }

    #[test]
    fn test_replace_columns_records_substitutions() {
        let mut ctx = sample_context();
        let rewritten = ctx.replace_columns(col("a").gt(lit(1i64)));

        assert!(rewritten.semantic_eq(&col("a").gt(lit(1i64))));
        assert!(ctx.replaced_columns.contains_key("a"));
    }

    #[test]
    fn test_replace_unknown_column_left_as_is() {
        let mut ctx = sample_context();
        let rewritten = ctx.replace_columns(col("zzz"));
        assert!(rewritten.semantic_eq(&col("zzz")));
    }
}
