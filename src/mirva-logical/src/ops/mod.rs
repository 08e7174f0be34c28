//! Logical operators for Mirva query plans.
//!
//! These operators define *what* a query computes, not *how* it is
//! executed. The rewriter consumes and produces trees of them.

mod aggregate;
mod filter;
mod join;
mod project;
mod scan;

pub use aggregate::AggregateOp;
pub use filter::FilterOp;
pub use join::{JoinKind, JoinOp};
pub use project::ProjectOp;
pub use scan::ScanOp;

use serde::{Deserialize, Serialize};

use crate::expr::LogicalExpr;

/// A logical operator in a Mirva query plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LogicalOp {
    /// Scan - source of data.
    Scan(ScanOp),

    /// Filter - restriction by predicate.
    Filter {
        /// Input plan.
        input: Box<LogicalOp>,
        /// Filter operation parameters.
        filter: FilterOp,
    },

    /// Project - output selection.
    Project {
        /// Input plan.
        input: Box<LogicalOp>,
        /// Project operation parameters.
        project: ProjectOp,
    },

    /// Aggregate - grouping and aggregation.
    Aggregate {
        /// Input plan.
        input: Box<LogicalOp>,
        /// Aggregate operation parameters.
        aggregate: AggregateOp,
    },

    /// Join - relational composition of two plans.
    Join {
        /// Left input plan.
        left: Box<LogicalOp>,
        /// Right input plan.
        right: Box<LogicalOp>,
        /// Join operation parameters.
        join: JoinOp,
    },

    /// Boundary - a committed rewrite below this node.
    ///
    /// Plan transformations must not recurse past a boundary; the rewriter
    /// strips all boundaries in a final normalization pass before a plan is
    /// returned to the caller.
    Boundary {
        /// The substituted subtree.
        input: Box<LogicalOp>,
    },
}

impl LogicalOp {
    // ========== Constructors ==========

    /// Create a scan operator.
    pub const fn scan(scan: ScanOp) -> Self {
        Self::Scan(scan)
    }

    /// Create a filter operator.
    pub fn filter(input: LogicalOp, filter: FilterOp) -> Self {
        Self::Filter {
            input: Box::new(input),
            filter,
        }
    }

    /// Create a project operator.
    pub fn project(input: LogicalOp, project: ProjectOp) -> Self {
        Self::Project {
            input: Box::new(input),
            project,
        }
    }

    /// Create an aggregate operator.
    pub fn aggregate(input: LogicalOp, aggregate: AggregateOp) -> Self {
        Self::Aggregate {
            input: Box::new(input),
            aggregate,
        }
    }

    /// Create a join operator.
    pub fn join(left: LogicalOp, right: LogicalOp, join: JoinOp) -> Self {
        Self::Join {
            left: Box::new(left),
            right: Box::new(right),
            join,
        }
    }

    /// Wrap a subtree in a rewrite boundary.
    pub fn boundary(input: LogicalOp) -> Self {
        Self::Boundary {
            input: Box::new(input),
        }
    }

    // ========== Analysis ==========

    /// Get the operator name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Scan(_) => "Scan",
            Self::Filter { .. } => "Filter",
            Self::Project { .. } => "Project",
            Self::Aggregate { .. } => "Aggregate",
            Self::Join { .. } => "Join",
            Self::Boundary { .. } => "Boundary",
        }
    }

    /// Get the number of inputs to this operator.
    pub const fn input_count(&self) -> usize {
        match self {
            Self::Scan(_) => 0,
            Self::Join { .. } => 2,
            _ => 1,
        }
    }

    /// Check if this is a leaf operator (no inputs).
    pub const fn is_leaf(&self) -> bool {
        self.input_count() == 0
    }

    /// Get the input operators.
    pub fn inputs(&self) -> Vec<&LogicalOp> {
        match self {
            Self::Scan(_) => vec![],
            Self::Filter { input, .. }
            | Self::Project { input, .. }
            | Self::Aggregate { input, .. }
            | Self::Boundary { input } => vec![input.as_ref()],
            Self::Join { left, right, .. } => vec![left.as_ref(), right.as_ref()],
        }
    }

    /// Check if any operator in the tree satisfies the predicate.
    pub fn contains_op(&self, pred: impl Fn(&LogicalOp) -> bool + Copy) -> bool {
        pred(self) || self.inputs().iter().any(|i| i.contains_op(pred))
    }

    /// Check if the tree contains a join.
    pub fn contains_join(&self) -> bool {
        self.contains_op(|op| matches!(op, Self::Join { .. }))
    }

    /// Check if the tree contains an aggregate.
    pub fn contains_aggregate(&self) -> bool {
        self.contains_op(|op| matches!(op, Self::Aggregate { .. }))
    }

    /// Collect all filter conjuncts in the tree, top-down.
    pub fn split_conjunctive_predicates(&self) -> Vec<LogicalExpr> {
        let mut out = Vec::new();
        self.collect_conjuncts(&mut out);
        out
    }

    fn collect_conjuncts(&self, out: &mut Vec<LogicalExpr>) {
        if let Self::Filter { filter, .. } = self {
            out.extend(filter.conjuncts().into_iter().cloned());
        }
        for input in self.inputs() {
            input.collect_conjuncts(out);
        }
    }

    /// Collect all base table names referenced by scans in the tree.
    pub fn extract_tables(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_tables(&mut out);
        out
    }

    fn collect_tables(&self, out: &mut Vec<String>) {
        if let Self::Scan(scan) = self {
            out.push(scan.table.clone());
        }
        for input in self.inputs() {
            input.collect_tables(out);
        }
    }

    /// The first-level output expressions of this operator.
    ///
    /// For a `Project` this is the projection list; for an `Aggregate` the
    /// full output list; for a `Scan` its declared attributes. `Filter`,
    /// `Join`, and `Boundary` pass through their (left) input's output.
    pub fn output_exprs(&self) -> Vec<&LogicalExpr> {
        match self {
            Self::Scan(scan) => scan.output.iter().collect(),
            Self::Project { project, .. } => project.exprs.iter().collect(),
            Self::Aggregate { aggregate, .. } => aggregate.aggregates.iter().collect(),
            Self::Filter { input, .. } | Self::Boundary { input } => input.output_exprs(),
            Self::Join { left, .. } => left.output_exprs(),
        }
    }

    /// The output names of this operator.
    pub fn output_names(&self) -> Vec<String> {
        self.output_exprs()
            .iter()
            .map(|e| e.output_name())
            .collect()
    }

    // ========== Transformation ==========

    /// Map over children, replacing them with transformed versions.
    pub fn map_children<F>(self, mut f: F) -> Self
    where
        F: FnMut(LogicalOp) -> LogicalOp,
    {
        match self {
            Self::Scan(_) => self,
            Self::Filter { input, filter } => Self::Filter {
                input: Box::new(f(*input)),
                filter,
            },
            Self::Project { input, project } => Self::Project {
                input: Box::new(f(*input)),
                project,
            },
            Self::Aggregate { input, aggregate } => Self::Aggregate {
                input: Box::new(f(*input)),
                aggregate,
            },
            Self::Join { left, right, join } => Self::Join {
                left: Box::new(f(*left)),
                right: Box::new(f(*right)),
                join,
            },
            Self::Boundary { input } => Self::Boundary {
                input: Box::new(f(*input)),
            },
        }
    }

    /// Pre-order rewrite: apply `f` to this node, then recurse into the
    /// children of the result. Does not descend past a `Boundary`.
    pub fn transform_down<F>(self, f: &mut F) -> Self
    where
        F: FnMut(LogicalOp) -> LogicalOp,
    {
        let node = f(self);
        if matches!(node, Self::Boundary { .. }) {
            return node;
        }
        node.map_children(|child| child.transform_down(f))
    }

    /// Remove all `Boundary` wrappers from the tree.
    pub fn strip_boundaries(self) -> Self {
        match self {
            Self::Boundary { input } => input.strip_boundaries(),
            other => other.map_children(Self::strip_boundaries),
        }
    }

    /// Format as a tree string with indentation.
    pub fn explain(&self, indent: usize) -> String {
        let prefix = "  ".repeat(indent);
        let mut result = format!("{prefix}{self}\n");

        for input in self.inputs() {
            result.push_str(&input.explain(indent + 1));
        }

        result
    }
}

impl std::fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scan(scan) => write!(f, "{scan}"),
            Self::Filter { filter, .. } => write!(f, "{filter}"),
            Self::Project { project, .. } => write!(f, "{project}"),
            Self::Aggregate { aggregate, .. } => write!(f, "{aggregate}"),
            Self::Join { join, .. } => write!(f, "{join}"),
            Self::Boundary { .. } => write!(f, "Boundary"),
        }
    }
}
