//! Top-level rewrite rules.
//!
//! A rule recognizes a query shape, picks candidate views from the catalog,
//! and drives the pipeline over each candidate in registration order,
//! committing the first one that matches.

mod aggregate;
mod rule;
mod without_join;

pub use aggregate::AggregateWithoutJoinRule;
pub use rule::{CandidateFailure, RewriteRule, Rewritten};
pub use without_join::WithoutJoinGroupRule;
