//! Unordered containment helpers over expressions.
//!
//! Containment here means *semantic* membership: elements are matched with
//! [`LogicalExpr::semantic_eq`], so `t.a = 'x'` and `a = 'x'` are the same
//! element.

use mirva_logical::LogicalExpr;

/// Check if `x` semantically equals some element of `xs`.
pub fn contains_semantic(xs: &[LogicalExpr], x: &LogicalExpr) -> bool {
    xs.iter().any(|e| e.semantic_eq(x))
}

/// Check if every element of `a` semantically equals some element of `b`.
pub fn is_subset_of(a: &[LogicalExpr], b: &[LogicalExpr]) -> bool {
    a.iter().all(|x| contains_semantic(b, x))
}

/// The elements of `a` with no semantic match in `b`.
pub fn semantic_difference(a: &[LogicalExpr], b: &[LogicalExpr]) -> Vec<LogicalExpr> {
    a.iter()
        .filter(|x| !contains_semantic(b, x))
        .cloned()
        .collect()
}
