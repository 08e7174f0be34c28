//! Matchers: per-aspect containment checks between query and view.
//!
//! Each matcher inspects the candidate's [`ProcessedComponent`] and either
//! produces the compensation expressions its paired rewriter must re-apply
//! above the view, or a typed rejection.
//!
//! [`ProcessedComponent`]: crate::component::ProcessedComponent

mod aggregate;
mod predicate;
mod project;
mod table;

pub use aggregate::AggMatcher;
pub use predicate::PredicateMatcher;
pub use project::ProjectMatcher;
pub use table::TableNonOpMatcher;

use common_error::MirvaResult;
use mirva_logical::LogicalExpr;

use crate::context::RewriteContext;
use crate::failure::RewriteFailure;

/// The result of running one matcher against one candidate.
#[derive(Debug, Clone)]
pub enum MatchOutcome {
    /// The aspect matched; the paired rewriter must re-apply these
    /// expressions above the view.
    Matched(Vec<LogicalExpr>),
    /// The aspect did not match; the candidate is rejected.
    Unmatched(RewriteFailure),
}

impl MatchOutcome {
    /// A match with no compensation.
    pub const fn trivial() -> Self {
        Self::Matched(Vec::new())
    }

    /// Check if this outcome is a match.
    pub const fn is_matched(&self) -> bool {
        matches!(self, Self::Matched(_))
    }
}

/// One containment check between the query and the candidate view.
pub trait Matcher: Send + Sync {
    /// Get the matcher name.
    fn name(&self) -> &'static str;

    /// Check the aspect this matcher owns.
    ///
    /// A typed rejection is data in the returned outcome; `Err` is reserved
    /// for hard faults that abort the whole rewrite.
    fn try_match(&self, ctx: &RewriteContext) -> MirvaResult<MatchOutcome>;
}
