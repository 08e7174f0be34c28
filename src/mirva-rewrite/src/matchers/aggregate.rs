//! Aggregate equivalence matcher.

use common_error::{MirvaError, MirvaResult};
use mirva_logical::expr::col;
use mirva_logical::{AggExpr, AggFunc, LogicalExpr};

use crate::context::RewriteContext;
use crate::failure::RewriteFailure;

use super::{MatchOutcome, Matcher};

/// Checks that the query's grouping and aggregates can be computed from the
/// view's pre-aggregated output, and produces the rewritten aggregate
/// output list as compensation.
///
/// The query may group coarser than the view; partial aggregates roll up:
/// `COUNT(*)` becomes a `SUM` over the view's count attribute, `SUM`/`MIN`/
/// `MAX` re-aggregate the view's output attribute, and `AVG` is recomputed
/// as `SUM` weighted by the view's `COUNT(*)`.
#[derive(Debug, Default)]
pub struct AggMatcher;

/// The aggregate call behind an output entry, if any.
fn agg_call(entry: &LogicalExpr) -> Option<&AggExpr> {
    match entry.strip_cosmetic() {
        LogicalExpr::Aggregate(agg) => Some(agg),
        _ => None,
    }
}

impl Matcher for AggMatcher {
    fn name(&self) -> &'static str {
        "AggMatcher"
    }

    fn try_match(&self, ctx: &RewriteContext) -> MirvaResult<MatchOutcome> {
        let component = &ctx.component;

        // the query may only group coarser than (or the same as) the view
        if component.query_grouping.len() > component.view_grouping.len() {
            return Ok(MatchOutcome::Unmatched(RewriteFailure::GroupBySizeUnmatch));
        }
        let view_output = ctx.view_output_names();
        for key in &component.query_grouping {
            for column in key.column_refs() {
                if !view_output.iter().any(|name| *name == column.name) {
                    return Ok(MatchOutcome::Unmatched(
                        RewriteFailure::GroupByColumnsNotInView,
                    ));
                }
            }
        }

        // the view-output attribute holding the view's first COUNT(*)
        let view_count_attr = component
            .view_aggregates
            .iter()
            .find(|entry| agg_call(entry).is_some_and(AggExpr::is_count_star))
            .map(LogicalExpr::output_name);

        let query_has_count_star = component
            .query_aggregates
            .iter()
            .any(|entry| agg_call(entry).is_some_and(AggExpr::is_count_star));
        if query_has_count_star && view_count_attr.is_none() {
            return Ok(MatchOutcome::Unmatched(RewriteFailure::AggNumberUnmatch));
        }

        // the view aggregate matching this query entry, modulo alias
        let matching_view_attr = |entry: &LogicalExpr| -> Option<String> {
            component
                .view_aggregates
                .iter()
                .find(|candidate| candidate.semantic_eq(entry))
                .map(LogicalExpr::output_name)
        };

        let mut compensation = Vec::with_capacity(component.query_aggregates.len());
        for entry in &component.query_aggregates {
            let Some(agg) = agg_call(entry) else {
                // grouping passthrough column
                compensation.push(entry.clone());
                continue;
            };
            let name = entry.output_name();

            let rewritten = if agg.is_count_star() {
                let count_attr = view_count_attr.clone().ok_or_else(|| {
                    MirvaError::internal("COUNT(*) presence was checked above")
                })?;
                LogicalExpr::Aggregate(AggExpr::sum(col(count_attr)))
            } else {
                match agg.func {
                    AggFunc::Avg => {
                        let Some(count_attr) = view_count_attr.clone() else {
                            return Ok(MatchOutcome::Unmatched(
                                RewriteFailure::AggViewMissingCountStar,
                            ));
                        };
                        // AVG(k) recomputes from the view's SUM(k) weighted
                        // by its COUNT(*)
                        let sum_key =
                            LogicalExpr::Aggregate(AggExpr::sum(agg.arg.as_ref().clone()));
                        let Some(view_attr) = matching_view_attr(&sum_key) else {
                            return Ok(MatchOutcome::Unmatched(
                                RewriteFailure::AggColumnsUnmatch,
                            ));
                        };
                        LogicalExpr::Aggregate(AggExpr::sum(col(view_attr))).div(col(count_attr))
                    }
                    AggFunc::Count => {
                        // COUNT(col) rolls up like COUNT(*): sum the view's
                        // matching count attribute
                        let Some(view_attr) = matching_view_attr(entry) else {
                            return Ok(MatchOutcome::Unmatched(
                                RewriteFailure::AggColumnsUnmatch,
                            ));
                        };
                        LogicalExpr::Aggregate(AggExpr::sum(col(view_attr)))
                    }
                    AggFunc::Sum | AggFunc::Min | AggFunc::Max => {
                        let Some(view_attr) = matching_view_attr(entry) else {
                            return Ok(MatchOutcome::Unmatched(
                                RewriteFailure::AggColumnsUnmatch,
                            ));
                        };
                        LogicalExpr::Aggregate(AggExpr::new(agg.func, col(view_attr)))
                    }
                }
            };

            compensation.push(rewritten.alias(name));
        }

        Ok(MatchOutcome::Matched(compensation))
    }
}
