//! Typed rewrite rejection reasons.
//!
//! A failure rejects the current candidate view; it is carried as data
//! through the pipeline and the rule's failure log, never raised as an
//! error.

use serde::{Deserialize, Serialize};

/// Why a candidate view cannot answer the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RewriteFailure {
    /// The view has more conjunctive predicates than the query.
    PredicateUnmatch,
    /// A view equality predicate has no counterpart in the query.
    PredicateEqualsUnmatch,
    /// A view range predicate is not implied by any query range.
    PredicateRangeUnmatch,
    /// A view residual predicate has no counterpart in the query.
    PredicateResidualUnmatch,
    /// A compensation predicate references a column the view does not project.
    PredicateColumnsNotInView,
    /// The query projects an attribute the view does not output.
    ProjectUnmatch,
    /// The query groups by more expressions than the view.
    GroupBySizeUnmatch,
    /// A query grouping column is missing from the view output.
    GroupByColumnsNotInView,
    /// The query counts rows but the view keeps no row count.
    AggNumberUnmatch,
    /// A query aggregate has no matching aggregate in the view.
    AggColumnsUnmatch,
    /// The query averages but the view has no COUNT(*) to weight by.
    AggViewMissingCountStar,
    /// A join was observed in the query or the view definition.
    JoinUnmatch,
}

impl RewriteFailure {
    /// All failure tags, for taxonomy checks.
    pub const ALL: [Self; 12] = [
        Self::PredicateUnmatch,
        Self::PredicateEqualsUnmatch,
        Self::PredicateRangeUnmatch,
        Self::PredicateResidualUnmatch,
        Self::PredicateColumnsNotInView,
        Self::ProjectUnmatch,
        Self::GroupBySizeUnmatch,
        Self::GroupByColumnsNotInView,
        Self::AggNumberUnmatch,
        Self::AggColumnsUnmatch,
        Self::AggViewMissingCountStar,
        Self::JoinUnmatch,
    ];

    /// The tag name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PredicateUnmatch => "PredicateUnmatch",
            Self::PredicateEqualsUnmatch => "PredicateEqualsUnmatch",
            Self::PredicateRangeUnmatch => "PredicateRangeUnmatch",
            Self::PredicateResidualUnmatch => "PredicateResidualUnmatch",
            Self::PredicateColumnsNotInView => "PredicateColumnsNotInView",
            Self::ProjectUnmatch => "ProjectUnmatch",
            Self::GroupBySizeUnmatch => "GroupBySizeUnmatch",
            Self::GroupByColumnsNotInView => "GroupByColumnsNotInView",
            Self::AggNumberUnmatch => "AggNumberUnmatch",
            Self::AggColumnsUnmatch => "AggColumnsUnmatch",
            Self::AggViewMissingCountStar => "AggViewMissingCountStar",
            Self::JoinUnmatch => "JoinUnmatch",
        }
    }

    /// Human-readable rejection message.
    pub const fn message(&self) -> &'static str {
        match self {
            Self::PredicateUnmatch => "view predicates outnumber query predicates",
            Self::PredicateEqualsUnmatch => {
                "view equality predicate not present in query predicates"
            }
            Self::PredicateRangeUnmatch => "query range is not contained in the view range",
            Self::PredicateResidualUnmatch => {
                "view residual predicate not present in query predicates"
            }
            Self::PredicateColumnsNotInView => {
                "compensation predicate references a column outside the view output"
            }
            Self::ProjectUnmatch => "query projection references a column outside the view output",
            Self::GroupBySizeUnmatch => "query grouping is finer than the view grouping",
            Self::GroupByColumnsNotInView => {
                "query grouping column is missing from the view output"
            }
            Self::AggNumberUnmatch => "query counts rows but the view has no COUNT(*)",
            Self::AggColumnsUnmatch => "query aggregate has no matching view aggregate",
            Self::AggViewMissingCountStar => {
                "query averages but the view has no COUNT(*) to weight by"
            }
            Self::JoinUnmatch => "joins are not supported by view rewriting",
        }
    }
}

impl std::fmt::Display for RewriteFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.as_str(), self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_messages_are_distinct() {
        let messages: HashSet<_> = RewriteFailure::ALL.iter().map(|f| f.message()).collect();
        assert_eq!(messages.len(), RewriteFailure::ALL.len());
    }

    #[test]
    fn test_display_carries_tag() {
        let text = RewriteFailure::ProjectUnmatch.to_string();
        assert!(text.starts_with("ProjectUnmatch:"));
    }
}
