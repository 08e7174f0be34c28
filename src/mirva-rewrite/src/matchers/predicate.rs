//! Predicate containment matcher.

use common_error::MirvaResult;
use mirva_logical::LogicalExpr;

use crate::context::RewriteContext;
use crate::failure::RewriteFailure;
use crate::range::RangeCondition;
use crate::sets;

use super::{MatchOutcome, Matcher};

/// Checks that the view's filter is no stricter than the query's, and
/// collects the query predicates that must be re-applied above the view.
///
/// Conjuncts partition into three disjoint classes: equalities (`=`,
/// `<=>`), ranges (attribute vs literal under `<`, `<=`, `>`, `>=`), and
/// residuals (everything else). Each class has its own containment test.
#[derive(Debug, Default)]
pub struct PredicateMatcher {
    /// Compare range containment with inclusivity honored on equal bounds.
    pub strict_ranges: bool,
}

impl PredicateMatcher {
    /// Create a matcher with the default (source-compatible) containment.
    pub const fn new() -> Self {
        Self {
            strict_ranges: false,
        }
    }

    /// Create a matcher that honors inclusivity in range containment.
    pub const fn strict() -> Self {
        Self {
            strict_ranges: true,
        }
    }
}

/// Split conjuncts into (equalities, range comparisons, residuals).
fn partition(
    conjuncts: &[LogicalExpr],
) -> MirvaResult<(Vec<LogicalExpr>, Vec<LogicalExpr>, Vec<LogicalExpr>)> {
    let mut equalities = Vec::new();
    let mut ranges = Vec::new();
    let mut residuals = Vec::new();

    for conjunct in conjuncts {
        match conjunct {
            LogicalExpr::Binary { op, .. } if op.is_equality() => {
                equalities.push(conjunct.clone());
            }
            _ => {
                if RangeCondition::try_from_comparison(conjunct)?.is_some() {
                    ranges.push(conjunct.clone());
                } else {
                    residuals.push(conjunct.clone());
                }
            }
        }
    }

    Ok((equalities, ranges, residuals))
}

impl Matcher for PredicateMatcher {
    fn name(&self) -> &'static str {
        "PredicateMatcher"
    }

    fn try_match(&self, ctx: &RewriteContext) -> MirvaResult<MatchOutcome> {
        let component = &ctx.component;

        // quick reject: the view may not carry more conjuncts than the query
        if component.view_predicates.len() > component.query_predicates.len() {
            return Ok(MatchOutcome::Unmatched(RewriteFailure::PredicateUnmatch));
        }

        let (query_eq, query_range, query_residual) = partition(&component.query_predicates)?;
        let (view_eq, view_range, view_residual) = partition(&component.view_predicates)?;

        // equalities: view ones must all appear in the query; the extra
        // query equalities become compensation
        if !sets::is_subset_of(&view_eq, &query_eq) {
            return Ok(MatchOutcome::Unmatched(
                RewriteFailure::PredicateEqualsUnmatch,
            ));
        }
        let mut compensation = sets::semantic_difference(&query_eq, &view_eq);

        // ranges: per-key canonical ranges; every view range needs a query
        // range contained in it, and all query ranges are restated above
        // the view
        let query_ranges = RangeCondition::normalize(&query_range)?;
        let view_ranges = RangeCondition::normalize(&view_range)?;
        if view_ranges.len() > query_ranges.len() {
            return Ok(MatchOutcome::Unmatched(
                RewriteFailure::PredicateRangeUnmatch,
            ));
        }
        for view_range in &view_ranges {
            let mut contained = false;
            for query_range in &query_ranges {
                let sub = if self.strict_ranges {
                    query_range.is_sub_range_strict(view_range)?
                } else {
                    query_range.is_sub_range(view_range)?
                };
                if sub {
                    contained = true;
                    break;
                }
            }
            if !contained {
                return Ok(MatchOutcome::Unmatched(
                    RewriteFailure::PredicateRangeUnmatch,
                ));
            }
        }
        for query_range in &query_ranges {
            compensation.extend(query_range.to_exprs());
        }

        // residuals: exact semantic containment only
        if !sets::is_subset_of(&view_residual, &query_residual) {
            return Ok(MatchOutcome::Unmatched(
                RewriteFailure::PredicateResidualUnmatch,
            ));
        }
        compensation.extend(sets::semantic_difference(&query_residual, &view_residual));

        // every attribute the compensation references must be in the view's
        // first-level output
        let view_output = ctx.view_output_names();
        for expr in &compensation {
            for column in expr.column_refs() {
                if !view_output.iter().any(|name| *name == column.name) {
                    return Ok(MatchOutcome::Unmatched(
                        RewriteFailure::PredicateColumnsNotInView,
                    ));
                }
            }
        }

        Ok(MatchOutcome::Matched(compensation))
    }
}
