//! Join operator.
//!
//! The rewriter itself declines plans containing joins; the operator exists
//! so that such plans can be represented and recognized.

use serde::{Deserialize, Serialize};

use crate::expr::LogicalExpr;

/// Join kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JoinKind {
    /// Inner join.
    Inner,
    /// Left outer join.
    Left,
    /// Right outer join.
    Right,
    /// Full outer join.
    Full,
}

impl std::fmt::Display for JoinKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Inner => write!(f, "Inner"),
            Self::Left => write!(f, "Left"),
            Self::Right => write!(f, "Right"),
            Self::Full => write!(f, "Full"),
        }
    }
}

/// Join operator parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinOp {
    /// Join kind.
    pub kind: JoinKind,
    /// Join condition, if any.
    pub on: Option<LogicalExpr>,
}

impl JoinOp {
    /// Create a new join operation.
    pub const fn new(kind: JoinKind, on: Option<LogicalExpr>) -> Self {
        Self { kind, on }
    }

    /// Create an inner join with a condition.
    pub fn inner(on: LogicalExpr) -> Self {
        Self::new(JoinKind::Inner, Some(on))
    }
}

impl std::fmt::Display for JoinOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.on {
            Some(on) => write!(f, "Join({}, on={on})", self.kind),
            None => write!(f, "Join({})", self.kind),
        }
    }
}
