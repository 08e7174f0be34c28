//! Per-candidate working set.
//!
//! A `ProcessedComponent` is populated once per candidate view by splitting
//! the query and view plans into their conjunctive predicates, projection,
//! grouping, aggregation, and join lists. Matchers read it; rewriters edit
//! the evolving plan, not the component.

use serde::{Deserialize, Serialize};

use mirva_logical::{JoinOp, LogicalExpr, LogicalOp};

/// The split pieces of the query and view plans for one candidate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessedComponent {
    /// Query filter conjuncts.
    pub query_predicates: Vec<LogicalExpr>,
    /// View filter conjuncts.
    pub view_predicates: Vec<LogicalExpr>,
    /// Query projection list (empty when the root is not a `Project`).
    pub query_projection: Vec<LogicalExpr>,
    /// View first-level output list.
    pub view_projection: Vec<LogicalExpr>,
    /// Query grouping expressions.
    pub query_grouping: Vec<LogicalExpr>,
    /// View grouping expressions.
    pub view_grouping: Vec<LogicalExpr>,
    /// Query aggregate output list.
    pub query_aggregates: Vec<LogicalExpr>,
    /// View aggregate output list.
    pub view_aggregates: Vec<LogicalExpr>,
    /// Joins observed in the query plan.
    pub query_joins: Vec<JoinOp>,
    /// Joins observed in the view definition.
    pub view_joins: Vec<JoinOp>,
    /// Base tables scanned by the query.
    pub query_tables: Vec<String>,
    /// Base tables scanned by the view definition.
    pub view_tables: Vec<String>,
}

fn collect_joins(op: &LogicalOp, out: &mut Vec<JoinOp>) {
    if let LogicalOp::Join { join, .. } = op {
        out.push(join.clone());
    }
    for input in op.inputs() {
        collect_joins(input, out);
    }
}

fn find_aggregate(op: &LogicalOp) -> Option<(&[LogicalExpr], &[LogicalExpr])> {
    if let LogicalOp::Aggregate { aggregate, .. } = op {
        return Some((&aggregate.group_keys, &aggregate.aggregates));
    }
    op.inputs().into_iter().find_map(find_aggregate)
}

impl ProcessedComponent {
    /// Split the query and view plans into the component lists.
    pub fn from_plans(query: &LogicalOp, view: &LogicalOp) -> Self {
        let query_projection = match query {
            LogicalOp::Project { project, .. } => project.exprs.clone(),
            _ => Vec::new(),
        };

        let (query_grouping, query_aggregates) = find_aggregate(query)
            .map(|(g, a)| (g.to_vec(), a.to_vec()))
            .unwrap_or_default();
        let (view_grouping, view_aggregates) = find_aggregate(view)
            .map(|(g, a)| (g.to_vec(), a.to_vec()))
            .unwrap_or_default();

        let mut query_joins = Vec::new();
        collect_joins(query, &mut query_joins);
        let mut view_joins = Vec::new();
        collect_joins(view, &mut view_joins);

        Self {
            query_predicates: query.split_conjunctive_predicates(),
            view_predicates: view.split_conjunctive_predicates(),
            query_projection,
            view_projection: view.output_exprs().into_iter().cloned().collect(),
            query_grouping,
            view_grouping,
            query_aggregates,
            view_aggregates,
            query_joins,
            view_joins,
            query_tables: query.extract_tables(),
            view_tables: view.extract_tables(),
        }
    }

    /// Check if either side contains a join.
    pub fn has_joins(&self) -> bool {
        !self.query_joins.is_empty() || !self.view_joins.is_empty()
    }

    /// The view's first-level output names.
    pub fn view_output_names(&self) -> Vec<String> {
        self.view_projection
            .iter()
            .map(LogicalExpr::output_name)
            .collect()
    }
}
