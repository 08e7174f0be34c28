//! Matcher/rewriter pipeline.
//!
//! Stages pair each matcher with its rewriter and run in a fixed order:
//! `Predicate -> Project -> (GroupBy ->)? Table`. The first rejection stops
//! the pipeline and the candidate is abandoned; the caller keeps the
//! original plan.

use common_error::MirvaResult;
use mirva_logical::LogicalOp;

use crate::context::RewriteContext;
use crate::failure::RewriteFailure;
use crate::matchers::{
    AggMatcher, MatchOutcome, Matcher, PredicateMatcher, ProjectMatcher, TableNonOpMatcher,
};
use crate::rewriters::{
    GroupByRewrite, PredicateRewrite, ProjectRewrite, Rewriter, TableOrViewRewrite,
};

/// One matcher paired with its rewriter.
pub struct Stage {
    /// The containment check.
    pub matcher: Box<dyn Matcher>,
    /// The plan edit consuming the matcher's compensation.
    pub rewriter: Box<dyn Rewriter>,
}

impl Stage {
    /// Pair a matcher with its rewriter.
    pub fn new(matcher: impl Matcher + 'static, rewriter: impl Rewriter + 'static) -> Self {
        Self {
            matcher: Box::new(matcher),
            rewriter: Box::new(rewriter),
        }
    }
}

/// The evolving plan and the stop flag for one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineState {
    /// The evolving plan.
    pub plan: LogicalOp,
    /// Set when a matcher rejected the candidate.
    pub stopped: bool,
    /// The rejection reason, when stopped.
    pub failure: Option<RewriteFailure>,
}

/// A fixed sequence of stages run against one candidate.
pub struct Pipeline {
    stages: Vec<Stage>,
}

impl Pipeline {
    /// Create a pipeline from explicit stages.
    pub fn new(stages: Vec<Stage>) -> Self {
        Self { stages }
    }

    /// The stage order for queries without aggregation.
    pub fn without_aggregate(strict_ranges: bool) -> Self {
        Self::new(vec![
            Stage::new(
                PredicateMatcher { strict_ranges },
                PredicateRewrite,
            ),
            Stage::new(ProjectMatcher, ProjectRewrite),
            Stage::new(TableNonOpMatcher, TableOrViewRewrite),
        ])
    }

    /// The stage order for aggregating queries.
    pub fn with_aggregate(strict_ranges: bool) -> Self {
        Self::new(vec![
            Stage::new(
                PredicateMatcher { strict_ranges },
                PredicateRewrite,
            ),
            Stage::new(ProjectMatcher, ProjectRewrite),
            Stage::new(AggMatcher, GroupByRewrite),
            Stage::new(TableNonOpMatcher, TableOrViewRewrite),
        ])
    }

    /// Get the stages.
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Run the stages in order against one candidate.
    ///
    /// Each stage observes the plan produced by the previous one. On the
    /// first rejection the state is returned with `stopped` set and the
    /// plan as it stood; on success the final plan has its rewrite
    /// boundaries stripped.
    pub fn run(&self, plan: LogicalOp, ctx: &mut RewriteContext) -> MirvaResult<PipelineState> {
        let mut state = PipelineState {
            plan,
            stopped: false,
            failure: None,
        };

        for stage in &self.stages {
            match stage.matcher.try_match(ctx)? {
                MatchOutcome::Unmatched(failure) => {
                    state.stopped = true;
                    state.failure = Some(failure);
                    return Ok(state);
                }
                MatchOutcome::Matched(compensation) => {
                    state.plan = stage.rewriter.rewrite(state.plan, compensation, ctx)?;
                }
            }
        }

        state.plan = state.plan.strip_boundaries();
        Ok(state)
    }
}
