//! Rewrite rule trait and result records.

use common_error::MirvaResult;
use mirva_logical::LogicalPlan;

use crate::catalog::ViewCatalog;
use crate::failure::RewriteFailure;
use crate::RewriteOptions;

/// A top-level view-rewrite strategy.
pub trait RewriteRule: Send + Sync {
    /// Get the name of this rule.
    fn name(&self) -> &'static str;

    /// Get a description of what this rule does.
    fn description(&self) -> &'static str {
        "No description available"
    }

    /// Try to rewrite the plan against the catalog.
    ///
    /// Returns `Ok` whether or not a rewrite committed; candidate
    /// rejections travel in the result's failure log. `Err` is reserved
    /// for hard faults.
    fn apply(
        &self,
        plan: &LogicalPlan,
        catalog: &ViewCatalog,
        options: &RewriteOptions,
    ) -> MirvaResult<Rewritten>;
}

/// A rejected candidate and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFailure {
    /// The rejected view; `None` when the query itself was ineligible.
    pub view: Option<String>,
    /// The rejection reason.
    pub failure: RewriteFailure,
}

impl CandidateFailure {
    /// A rejection of a specific candidate view.
    pub fn candidate(view: impl Into<String>, failure: RewriteFailure) -> Self {
        Self {
            view: Some(view.into()),
            failure,
        }
    }

    /// A rejection of the query shape itself.
    pub const fn query(failure: RewriteFailure) -> Self {
        Self {
            view: None,
            failure,
        }
    }
}

impl std::fmt::Display for CandidateFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.view {
            Some(view) => write!(f, "view {view}: {}", self.failure),
            None => write!(f, "query: {}", self.failure),
        }
    }
}

/// The result of applying a rewrite rule.
#[derive(Debug, Clone)]
pub struct Rewritten {
    /// The (possibly rewritten) plan.
    pub plan: LogicalPlan,
    /// Whether a rewrite committed.
    pub rewritten: bool,
    /// The committed view, when rewritten.
    pub view: Option<String>,
    /// Rejected candidates, in the order they were tried.
    pub failures: Vec<CandidateFailure>,
}

impl Rewritten {
    /// The plan was left unchanged.
    pub const fn unchanged(plan: LogicalPlan) -> Self {
        Self {
            plan,
            rewritten: false,
            view: None,
            failures: Vec::new(),
        }
    }

    /// A rewrite against the given view committed.
    pub fn committed(plan: LogicalPlan, view: impl Into<String>) -> Self {
        Self {
            plan,
            rewritten: true,
            view: Some(view.into()),
            failures: Vec::new(),
        }
    }

    /// Attach the failure log.
    #[must_use]
    pub fn with_failures(mut self, failures: Vec<CandidateFailure>) -> Self {
        self.failures = failures;
        self
    }
}
