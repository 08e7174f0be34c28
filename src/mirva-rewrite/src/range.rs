//! Range algebra over single-key comparison predicates.
//!
//! A conjunct of the form `cmp(key, literal)` or `cmp(literal, key)`
//! normalizes into a [`RangeCondition`] with one bound set. Folding the
//! conjuncts of one key with [`RangeCondition::intersect`] yields a single
//! canonical range per key, which the predicate matcher compares for
//! containment and re-renders as compensation.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use common_error::{MirvaError, MirvaResult};
use mirva_logical::{BinaryOp, Literal, LogicalExpr};

/// A bounded interval over a single keyed expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeCondition {
    /// The keyed expression, usually an attribute reference.
    pub key: LogicalExpr,
    /// Lower bound; `None` means unbounded below.
    pub lower: Option<Literal>,
    /// Upper bound; `None` means unbounded above.
    pub upper: Option<Literal>,
    /// Whether the lower bound is inclusive.
    pub incl_lower: bool,
    /// Whether the upper bound is inclusive.
    pub incl_upper: bool,
}

/// Compare two bound literals under the range order.
fn bound_cmp(a: &Literal, b: &Literal) -> MirvaResult<Ordering> {
    a.value.compare(&b.value)
}

impl RangeCondition {
    /// A range bounded only from below.
    pub const fn lower_bounded(key: LogicalExpr, bound: Literal, inclusive: bool) -> Self {
        Self {
            key,
            lower: Some(bound),
            upper: None,
            incl_lower: inclusive,
            incl_upper: false,
        }
    }

    /// A range bounded only from above.
    pub const fn upper_bounded(key: LogicalExpr, bound: Literal, inclusive: bool) -> Self {
        Self {
            key,
            lower: None,
            upper: Some(bound),
            incl_lower: false,
            incl_upper: inclusive,
        }
    }

    /// Try to normalize a conjunct into a single-bound range.
    ///
    /// Recognizes `key cmp literal` and `literal cmp key` for the four range
    /// comparisons, with the literal possibly wrapped in a cast. Returns
    /// `Ok(None)` for conjuncts of any other shape; a range comparison
    /// against a literal type the order does not support is an error.
    pub fn try_from_comparison(expr: &LogicalExpr) -> MirvaResult<Option<Self>> {
        let LogicalExpr::Binary { left, op, right } = expr else {
            return Ok(None);
        };
        if !op.is_range_comparison() {
            return Ok(None);
        }

        let (key, bound, key_on_left) = if right.is_literal() && !left.is_literal() {
            (left, right, true)
        } else if left.is_literal() && !right.is_literal() {
            (right, left, false)
        } else {
            return Ok(None);
        };

        let LogicalExpr::Literal(bound) = bound.strip_cosmetic() else {
            return Ok(None);
        };
        if !bound.data_type.is_orderable() {
            return Err(MirvaError::type_error(format!(
                "range comparison over unsupported literal type {}",
                bound.data_type
            )));
        }

        let key = key.as_ref().clone();
        let bound = bound.clone();
        let range = match (*op, key_on_left) {
            // k > L  |  L < k
            (BinaryOp::Gt, true) | (BinaryOp::Lt, false) => {
                Self::lower_bounded(key, bound, false)
            }
            // k >= L  |  L <= k
            (BinaryOp::Gte, true) | (BinaryOp::Lte, false) => {
                Self::lower_bounded(key, bound, true)
            }
            // k < L  |  L > k
            (BinaryOp::Lt, true) | (BinaryOp::Gt, false) => {
                Self::upper_bounded(key, bound, false)
            }
            // k <= L  |  L >= k
            (BinaryOp::Lte, true) | (BinaryOp::Gte, false) => {
                Self::upper_bounded(key, bound, true)
            }
            _ => return Ok(None),
        };

        Ok(Some(range))
    }

    /// Group the range conjuncts by key and fold each group into a single
    /// canonical range. First-occurrence key order is preserved.
    pub fn normalize(conjuncts: &[LogicalExpr]) -> MirvaResult<Vec<Self>> {
        let mut ranges: Vec<Self> = Vec::new();
        for conjunct in conjuncts {
            let Some(range) = Self::try_from_comparison(conjunct)? else {
                continue;
            };
            match ranges.iter_mut().find(|r| r.key.semantic_eq(&range.key)) {
                Some(existing) => *existing = existing.intersect(&range)?,
                None => ranges.push(range),
            }
        }
        Ok(ranges)
    }

    /// Intersect two ranges over the same key.
    ///
    /// Takes the greater lower bound and the lesser upper bound; on equal
    /// bound values the exclusive (tighter) inclusivity wins. An empty
    /// result (`lower > upper`) is not rejected; see [`Self::is_empty`].
    pub fn intersect(&self, other: &Self) -> MirvaResult<Self> {
        if !self.key.semantic_eq(&other.key) {
            return Err(MirvaError::internal(format!(
                "cannot intersect ranges over different keys: {} vs {}",
                self.key, other.key
            )));
        }

        let (lower, incl_lower) = match (&self.lower, &other.lower) {
            (None, None) => (None, false),
            (Some(a), None) => (Some(a.clone()), self.incl_lower),
            (None, Some(b)) => (Some(b.clone()), other.incl_lower),
            (Some(a), Some(b)) => match bound_cmp(a, b)? {
                Ordering::Greater => (Some(a.clone()), self.incl_lower),
                Ordering::Less => (Some(b.clone()), other.incl_lower),
                Ordering::Equal => (Some(a.clone()), self.incl_lower && other.incl_lower),
            },
        };

        let (upper, incl_upper) = match (&self.upper, &other.upper) {
            (None, None) => (None, false),
            (Some(a), None) => (Some(a.clone()), self.incl_upper),
            (None, Some(b)) => (Some(b.clone()), other.incl_upper),
            (Some(a), Some(b)) => match bound_cmp(a, b)? {
                Ordering::Less => (Some(a.clone()), self.incl_upper),
                Ordering::Greater => (Some(b.clone()), other.incl_upper),
                Ordering::Equal => (Some(a.clone()), self.incl_upper && other.incl_upper),
            },
        };

        Ok(Self {
            key: self.key.clone(),
            lower,
            upper,
            incl_lower,
            incl_upper,
        })
    }

    /// Check if this range denotes no values at all.
    ///
    /// Intersection does not reject disjoint inputs; the result is silently
    /// the empty set and this predicate makes it observable.
    pub fn is_empty(&self) -> MirvaResult<bool> {
        let (Some(lower), Some(upper)) = (&self.lower, &self.upper) else {
            return Ok(false);
        };
        Ok(match bound_cmp(lower, upper)? {
            Ordering::Greater => true,
            Ordering::Equal => !(self.incl_lower && self.incl_upper),
            Ordering::Less => false,
        })
    }

    /// Check if `self` is contained in `other`.
    ///
    /// Containment compares bound values only; inclusivity flags are
    /// ignored, so `[5, 10]` counts as contained in `(5, 10)`. This is a
    /// deliberate approximation kept for compatibility with the analyzer's
    /// original containment test; [`Self::is_sub_range_strict`] is the
    /// exact variant.
    pub fn is_sub_range(&self, other: &Self) -> MirvaResult<bool> {
        if !self.key.semantic_eq(&other.key) {
            return Ok(false);
        }

        let lower_ok = match (&self.lower, &other.lower) {
            (_, None) => true,
            (None, Some(_)) => false,
            (Some(a), Some(b)) => bound_cmp(a, b)? != Ordering::Less,
        };
        if !lower_ok {
            return Ok(false);
        }

        let upper_ok = match (&self.upper, &other.upper) {
            (_, None) => true,
            (None, Some(_)) => false,
            (Some(a), Some(b)) => bound_cmp(a, b)? != Ordering::Greater,
        };
        Ok(upper_ok)
    }

    /// Containment that also honors inclusivity on equal bounds.
    pub fn is_sub_range_strict(&self, other: &Self) -> MirvaResult<bool> {
        if !self.is_sub_range(other)? {
            return Ok(false);
        }

        if let (Some(a), Some(b)) = (&self.lower, &other.lower) {
            if bound_cmp(a, b)? == Ordering::Equal && self.incl_lower && !other.incl_lower {
                return Ok(false);
            }
        }
        if let (Some(a), Some(b)) = (&self.upper, &other.upper) {
            if bound_cmp(a, b)? == Ordering::Equal && self.incl_upper && !other.incl_upper {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Render the range back to comparison expressions.
    ///
    /// Emits up to two comparisons; a bound whose literal type differs from
    /// the key's type is wrapped in a cast to the key type, matching the
    /// shape the analyzer produces.
    pub fn to_exprs(&self) -> Vec<LogicalExpr> {
        let key_type = self.key.data_type();
        let render_bound = |bound: &Literal| {
            let literal = LogicalExpr::Literal(bound.clone());
            match key_type {
                Some(kt) if kt != bound.data_type => literal.cast(kt),
                _ => literal,
            }
        };

        let mut out = Vec::new();
        if let Some(lower) = &self.lower {
            let bound = render_bound(lower);
            out.push(if self.incl_lower {
                self.key.clone().gte(bound)
            } else {
                self.key.clone().gt(bound)
            });
        }
        if let Some(upper) = &self.upper {
            let bound = render_bound(upper);
            out.push(if self.incl_upper {
                self.key.clone().lte(bound)
            } else {
                self.key.clone().lt(bound)
            });
        }
        out
    }
}

impl std::fmt::Display for RangeCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let lower_bracket = if self.incl_lower { "[" } else { "(" };
        let upper_bracket = if self.incl_upper { "]" } else { ")" };
        let lower = self
            .lower
            .as_ref()
            .map_or_else(|| "-inf".to_string(), ToString::to_string);
        let upper = self
            .upper
            .as_ref()
            .map_or_else(|| "+inf".to_string(), ToString::to_string);
        write!(
            f,
            "{} in {lower_bracket}{lower}, {upper}{upper_bracket}",
            self.key
        )
    }
}
