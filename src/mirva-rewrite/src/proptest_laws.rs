//! Property-based laws for the range algebra and the plan model.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use mirva_logical::expr::{col, lit};
    use mirva_logical::{FilterOp, LogicalPlan, PlanBuilder, ProjectOp, ScanOp};

    use crate::range::RangeCondition;
    use crate::sets;

    // =========================================================================
    // Arbitrary Strategies
    // =========================================================================

    /// Strategy for generating ranges over a shared integer key.
    ///
    /// Bounds are kept ordered when both are present, so generated ranges
    /// are non-empty by construction.
    fn arb_range() -> impl Strategy<Value = RangeCondition> {
        (
            proptest::option::of(-1000i64..1000),
            proptest::option::of(-1000i64..1000),
            any::<bool>(),
            any::<bool>(),
        )
            .prop_map(|(a, b, incl_lower, incl_upper)| {
                let (lower, upper) = match (a, b) {
                    (Some(x), Some(y)) => (Some(x.min(y)), Some(x.max(y))),
                    other => other,
                };
                RangeCondition {
                    key: col("k"),
                    lower: lower.map(mirva_logical::Literal::new),
                    upper: upper.map(mirva_logical::Literal::new),
                    incl_lower,
                    incl_upper,
                }
            })
    }

    /// Strategy for generating small conjunctive filter plans.
    fn arb_filter_plan() -> impl Strategy<Value = LogicalPlan> {
        (
            "[a-c]",
            -100i64..100,
            prop_oneof![Just(true), Just(false)],
        )
            .prop_map(|(column, bound, lower)| {
                let predicate = if lower {
                    col(column).gte(lit(bound))
                } else {
                    col(column).lt(lit(bound))
                };
                PlanBuilder::scan(ScanOp::new("t"))
                    .filter(FilterOp::new(predicate))
                    .project(ProjectOp::columns(["a", "b", "c"]))
                    .build()
            })
    }

    // =========================================================================
    // Range containment laws
    // =========================================================================

    proptest! {
        /// Every range contains itself.
        #[test]
        fn sub_range_reflexive(r in arb_range()) {
            prop_assert!(r.is_sub_range(&r).unwrap());
            prop_assert!(r.is_sub_range_strict(&r).unwrap());
        }

        /// An intersection is contained in both operands.
        #[test]
        fn intersection_contained_in_operands(r1 in arb_range(), r2 in arb_range()) {
            let merged = r1.intersect(&r2).unwrap();
            prop_assert!(merged.is_sub_range(&r1).unwrap());
            prop_assert!(merged.is_sub_range(&r2).unwrap());
        }

        /// Intersection is commutative up to bound values.
        #[test]
        fn intersection_commutative_bounds(r1 in arb_range(), r2 in arb_range()) {
            let a = r1.intersect(&r2).unwrap();
            let b = r2.intersect(&r1).unwrap();
            prop_assert_eq!(a.lower, b.lower);
            prop_assert_eq!(a.upper, b.upper);
            prop_assert_eq!(a.incl_lower, b.incl_lower);
            prop_assert_eq!(a.incl_upper, b.incl_upper);
        }

        /// Containment is transitive.
        #[test]
        fn sub_range_transitive(r1 in arb_range(), r2 in arb_range(), r3 in arb_range()) {
            if r1.is_sub_range(&r2).unwrap() && r2.is_sub_range(&r3).unwrap() {
                prop_assert!(r1.is_sub_range(&r3).unwrap());
            }
        }

        /// Rendering a range and normalizing the rendered conjuncts gives
        /// the range back.
        #[test]
        fn render_normalize_roundtrip(r in arb_range()) {
            let exprs = r.to_exprs();
            let ranges = RangeCondition::normalize(&exprs).unwrap();
            if r.lower.is_none() && r.upper.is_none() {
                prop_assert!(ranges.is_empty());
            } else {
                prop_assert_eq!(ranges.len(), 1);
                prop_assert_eq!(&ranges[0].lower, &r.lower);
                prop_assert_eq!(&ranges[0].upper, &r.upper);
            }
        }
    }

    // =========================================================================
    // Subset helper law
    // =========================================================================

    proptest! {
        /// A list is always a semantic subset of itself plus extras.
        #[test]
        fn subset_of_superset(n in 0usize..5, extra in 0usize..3) {
            let base: Vec<_> = (0..n)
                .map(|i| col(format!("c{i}")).eq(lit(i as i64)))
                .collect();
            let mut superset = base.clone();
            superset.extend((0..extra).map(|i| col(format!("x{i}")).eq(lit(i as i64))));

            prop_assert!(sets::is_subset_of(&base, &superset));
            prop_assert_eq!(
                sets::semantic_difference(&superset, &base).len(),
                extra
            );
        }
    }

    // =========================================================================
    // Serde round-trips
    // =========================================================================

    proptest! {
        /// Plans round-trip through JSON.
        #[test]
        fn plan_serde_roundtrip(plan in arb_filter_plan()) {
            let serialized = serde_json::to_string(&plan).unwrap();
            let deserialized: LogicalPlan = serde_json::from_str(&serialized).unwrap();
            prop_assert_eq!(plan, deserialized);
        }

        /// Ranges round-trip through JSON.
        #[test]
        fn range_serde_roundtrip(r in arb_range()) {
            let serialized = serde_json::to_string(&r).unwrap();
            let deserialized: RangeCondition = serde_json::from_str(&serialized).unwrap();
            prop_assert_eq!(r, deserialized);
        }
    }
}
