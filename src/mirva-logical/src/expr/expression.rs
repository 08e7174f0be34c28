//! Logical expression tree.

use serde::{Deserialize, Serialize};

use mirva_core::{ColumnRef, DataType, Value};

use super::{AggExpr, BinaryOp, UnaryOp};

/// A typed literal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Literal {
    /// The literal value.
    pub value: Value,
    /// The data type of the value.
    pub data_type: DataType,
}

impl Literal {
    /// Create a literal, deriving its type from the value.
    pub fn new(value: impl Into<Value>) -> Self {
        let value = value.into();
        let data_type = value.data_type();
        Self { value, data_type }
    }

    /// Create a literal with an explicit data type.
    pub const fn typed(value: Value, data_type: DataType) -> Self {
        Self { value, data_type }
    }
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Logical expression in a query plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LogicalExpr {
    /// Attribute reference.
    Column {
        /// Column identity (name, optional qualifier).
        column: ColumnRef,
        /// Attribute type; `Null` when unresolved.
        data_type: DataType,
    },
    /// Literal value.
    Literal(Literal),
    /// Type cast.
    Cast {
        /// The expression being cast.
        expr: Box<LogicalExpr>,
        /// Target type.
        target_type: DataType,
    },
    /// Binary operation.
    Binary {
        /// Left operand.
        left: Box<LogicalExpr>,
        /// Operator.
        op: BinaryOp,
        /// Right operand.
        right: Box<LogicalExpr>,
    },
    /// Unary operation.
    Unary {
        /// Operator.
        op: UnaryOp,
        /// Operand.
        expr: Box<LogicalExpr>,
    },
    /// Scalar function call.
    Func {
        /// Function name.
        name: String,
        /// Function arguments.
        args: Vec<LogicalExpr>,
    },
    /// Named expression.
    Alias {
        /// The aliased expression.
        expr: Box<LogicalExpr>,
        /// Output name.
        name: String,
    },
    /// Aggregate call.
    Aggregate(AggExpr),
}

impl LogicalExpr {
    /// Create an unqualified column reference with unknown type.
    pub fn column(name: impl Into<String>) -> Self {
        Self::Column {
            column: ColumnRef::parse(&name.into()),
            data_type: DataType::Null,
        }
    }

    /// Create a qualified column reference.
    pub fn qualified_column(qualifier: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Column {
            column: ColumnRef::qualified(qualifier, name),
            data_type: DataType::Null,
        }
    }

    /// Create a column reference with a known data type.
    pub fn typed_column(name: impl Into<String>, data_type: DataType) -> Self {
        Self::Column {
            column: ColumnRef::parse(&name.into()),
            data_type,
        }
    }

    /// Create a column reference from parts.
    pub const fn column_ref(column: ColumnRef, data_type: DataType) -> Self {
        Self::Column { column, data_type }
    }

    /// Create a literal expression.
    pub fn literal(value: impl Into<Value>) -> Self {
        Self::Literal(Literal::new(value))
    }

    /// Create a binary expression.
    pub fn binary(left: LogicalExpr, op: BinaryOp, right: LogicalExpr) -> Self {
        Self::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// Create a unary expression.
    pub fn unary(op: UnaryOp, expr: LogicalExpr) -> Self {
        Self::Unary {
            op,
            expr: Box::new(expr),
        }
    }

    /// Create a cast expression.
    pub fn cast(self, target_type: DataType) -> Self {
        Self::Cast {
            expr: Box::new(self),
            target_type,
        }
    }

    /// Create a function call expression.
    pub fn func(name: impl Into<String>, args: Vec<LogicalExpr>) -> Self {
        Self::Func {
            name: name.into(),
            args,
        }
    }

    /// Name this expression.
    pub fn alias(self, name: impl Into<String>) -> Self {
        Self::Alias {
            expr: Box::new(self),
            name: name.into(),
        }
    }

    // Comparison operators

    /// Equality comparison.
    pub fn eq(self, other: LogicalExpr) -> Self {
        Self::binary(self, BinaryOp::Eq, other)
    }

    /// Null-safe equality comparison.
    pub fn null_safe_eq(self, other: LogicalExpr) -> Self {
        Self::binary(self, BinaryOp::NullSafeEq, other)
    }

    /// Inequality comparison.
    pub fn neq(self, other: LogicalExpr) -> Self {
        Self::binary(self, BinaryOp::Neq, other)
    }

    /// Greater than comparison.
    pub fn gt(self, other: LogicalExpr) -> Self {
        Self::binary(self, BinaryOp::Gt, other)
    }

    /// Greater than or equal comparison.
    pub fn gte(self, other: LogicalExpr) -> Self {
        Self::binary(self, BinaryOp::Gte, other)
    }

    /// Less than comparison.
    pub fn lt(self, other: LogicalExpr) -> Self {
        Self::binary(self, BinaryOp::Lt, other)
    }

    /// Less than or equal comparison.
    pub fn lte(self, other: LogicalExpr) -> Self {
        Self::binary(self, BinaryOp::Lte, other)
    }

    // Logical operators

    /// Logical AND.
    pub fn and(self, other: LogicalExpr) -> Self {
        Self::binary(self, BinaryOp::And, other)
    }

    /// Logical OR.
    pub fn or(self, other: LogicalExpr) -> Self {
        Self::binary(self, BinaryOp::Or, other)
    }

    /// Logical NOT.
    pub fn not(self) -> Self {
        Self::unary(UnaryOp::Not, self)
    }

    // Arithmetic operators

    /// Addition.
    pub fn add(self, other: LogicalExpr) -> Self {
        Self::binary(self, BinaryOp::Add, other)
    }

    /// Subtraction.
    pub fn sub(self, other: LogicalExpr) -> Self {
        Self::binary(self, BinaryOp::Sub, other)
    }

    /// Multiplication.
    pub fn mul(self, other: LogicalExpr) -> Self {
        Self::binary(self, BinaryOp::Mul, other)
    }

    /// Division.
    pub fn div(self, other: LogicalExpr) -> Self {
        Self::binary(self, BinaryOp::Div, other)
    }

    // ========== Analysis ==========

    /// Check if this is a literal (possibly behind cosmetic wrappers).
    pub fn is_literal(&self) -> bool {
        matches!(self.strip_cosmetic(), Self::Literal(_))
    }

    /// Check if this is a column reference (possibly behind cosmetic wrappers).
    pub fn is_column(&self) -> bool {
        matches!(self.strip_cosmetic(), Self::Column { .. })
    }

    /// Check if this expression contains an aggregate call.
    pub fn contains_aggregate(&self) -> bool {
        match self {
            Self::Aggregate(_) => true,
            Self::Column { .. } | Self::Literal(_) => false,
            Self::Cast { expr, .. } | Self::Alias { expr, .. } | Self::Unary { expr, .. } => {
                expr.contains_aggregate()
            }
            Self::Binary { left, right, .. } => {
                left.contains_aggregate() || right.contains_aggregate()
            }
            Self::Func { args, .. } => args.iter().any(Self::contains_aggregate),
        }
    }

    /// Strip cosmetic wrapping: aliases, and casts around literals.
    ///
    /// The analyzer wraps literals in casts to unify comparison operand
    /// types and wraps output expressions in aliases; neither changes what
    /// the expression denotes.
    pub fn strip_cosmetic(&self) -> &Self {
        match self {
            Self::Alias { expr, .. } => expr.strip_cosmetic(),
            Self::Cast { expr, .. } if matches!(expr.strip_cosmetic(), Self::Literal(_)) => {
                expr.strip_cosmetic()
            }
            _ => self,
        }
    }

    /// Structural equality modulo cosmetic wrapping.
    ///
    /// Column references compare by name with qualifiers stripped; literals
    /// compare by value and type with redundant casts stripped; aliases are
    /// transparent on both sides.
    pub fn semantic_eq(&self, other: &Self) -> bool {
        match (self.strip_cosmetic(), other.strip_cosmetic()) {
            (Self::Column { column: a, .. }, Self::Column { column: b, .. }) => a.semantic_eq(b),
            (Self::Literal(a), Self::Literal(b)) => a == b,
            (
                Self::Cast {
                    expr: a,
                    target_type: ta,
                },
                Self::Cast {
                    expr: b,
                    target_type: tb,
                },
            ) => ta == tb && a.semantic_eq(b),
            (
                Self::Binary {
                    left: la,
                    op: oa,
                    right: ra,
                },
                Self::Binary {
                    left: lb,
                    op: ob,
                    right: rb,
                },
            ) => oa == ob && la.semantic_eq(lb) && ra.semantic_eq(rb),
            (Self::Unary { op: oa, expr: a }, Self::Unary { op: ob, expr: b }) => {
                oa == ob && a.semantic_eq(b)
            }
            (Self::Func { name: na, args: aa }, Self::Func { name: nb, args: ab }) => {
                na == nb
                    && aa.len() == ab.len()
                    && aa.iter().zip(ab).all(|(x, y)| x.semantic_eq(y))
            }
            (Self::Aggregate(a), Self::Aggregate(b)) => {
                a.func == b.func && a.arg.semantic_eq(&b.arg)
            }
            _ => false,
        }
    }

    /// Collect all column references in this expression.
    pub fn column_refs(&self) -> Vec<&ColumnRef> {
        let mut out = Vec::new();
        self.collect_columns(&mut out);
        out
    }

    fn collect_columns<'a>(&'a self, out: &mut Vec<&'a ColumnRef>) {
        match self {
            Self::Column { column, .. } => out.push(column),
            Self::Literal(_) => {}
            Self::Cast { expr, .. } | Self::Alias { expr, .. } | Self::Unary { expr, .. } => {
                expr.collect_columns(out);
            }
            Self::Binary { left, right, .. } => {
                left.collect_columns(out);
                right.collect_columns(out);
            }
            Self::Func { args, .. } => {
                for arg in args {
                    arg.collect_columns(out);
                }
            }
            Self::Aggregate(agg) => agg.arg.collect_columns(out),
        }
    }

    /// Best-effort static type of this expression.
    pub fn data_type(&self) -> Option<DataType> {
        match self {
            Self::Column { data_type, .. } => {
                if *data_type == DataType::Null {
                    None
                } else {
                    Some(*data_type)
                }
            }
            Self::Literal(lit) => Some(lit.data_type),
            Self::Cast { target_type, .. } => Some(*target_type),
            Self::Binary { left, op, right } => {
                if op.is_comparison() || op.is_logical() {
                    Some(DataType::Bool)
                } else {
                    let lt = left.data_type()?;
                    let rt = right.data_type()?;
                    lt.common_supertype(&rt)
                }
            }
            Self::Unary { op, expr } => match op {
                UnaryOp::Not | UnaryOp::IsNull | UnaryOp::IsNotNull => Some(DataType::Bool),
                UnaryOp::Neg => expr.data_type(),
            },
            Self::Func { .. } => None,
            Self::Alias { expr, .. } => expr.data_type(),
            Self::Aggregate(agg) => {
                let input = agg.arg.data_type().unwrap_or(DataType::Null);
                agg.result_type(&input)
            }
        }
    }

    /// Get the effective output name.
    pub fn output_name(&self) -> String {
        match self {
            Self::Alias { name, .. } => name.clone(),
            Self::Column { column, .. } => column.name.clone(),
            other => other.to_string(),
        }
    }

    /// Flatten the top-level AND chain into its conjuncts.
    pub fn split_conjunctions(&self) -> Vec<&Self> {
        match self {
            Self::Binary {
                left,
                op: BinaryOp::And,
                right,
            } => {
                let mut out = left.split_conjunctions();
                out.extend(right.split_conjunctions());
                out
            }
            _ => vec![self],
        }
    }

    /// Combine conjuncts back into a single AND chain.
    ///
    /// Returns `None` for an empty input.
    pub fn conjoin(exprs: impl IntoIterator<Item = LogicalExpr>) -> Option<LogicalExpr> {
        exprs.into_iter().reduce(LogicalExpr::and)
    }

    // ========== Transformation ==========

    /// Map over direct children, replacing them with transformed versions.
    pub fn map_children<F>(self, mut f: F) -> Self
    where
        F: FnMut(LogicalExpr) -> LogicalExpr,
    {
        match self {
            Self::Column { .. } | Self::Literal(_) => self,
            Self::Cast { expr, target_type } => Self::Cast {
                expr: Box::new(f(*expr)),
                target_type,
            },
            Self::Binary { left, op, right } => Self::Binary {
                left: Box::new(f(*left)),
                op,
                right: Box::new(f(*right)),
            },
            Self::Unary { op, expr } => Self::Unary {
                op,
                expr: Box::new(f(*expr)),
            },
            Self::Func { name, args } => Self::Func {
                name,
                args: args.into_iter().map(f).collect(),
            },
            Self::Alias { expr, name } => Self::Alias {
                expr: Box::new(f(*expr)),
                name,
            },
            Self::Aggregate(agg) => Self::Aggregate(AggExpr {
                func: agg.func,
                arg: Box::new(f(*agg.arg)),
            }),
        }
    }

    /// Pre-order rewrite: apply `f` to this node, then recurse into the
    /// children of the result.
    pub fn transform_down<F>(self, f: &mut F) -> Self
    where
        F: FnMut(LogicalExpr) -> LogicalExpr,
    {
        f(self).map_children(|child| child.transform_down(f))
    }
}

impl std::fmt::Display for LogicalExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Column { column, .. } => write!(f, "{column}"),
            Self::Literal(lit) => write!(f, "{lit}"),
            Self::Cast { expr, target_type } => write!(f, "CAST({expr} AS {target_type})"),
            Self::Binary { left, op, right } => write!(f, "({left} {op} {right})"),
            Self::Unary { op, expr } => match op {
                UnaryOp::IsNull | UnaryOp::IsNotNull => write!(f, "{expr} {op}"),
                _ => write!(f, "{op} {expr}"),
            },
            Self::Func { name, args } => {
                let args = args
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "{name}({args})")
            }
            Self::Alias { expr, name } => write!(f, "{expr} AS {name}"),
            Self::Aggregate(agg) => write!(f, "{agg}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{col, lit, qualified_col, sum};

    #[test]
    fn test_expression_building() {
        let expr = col("year").gte(lit(2022i64));

        assert!(matches!(
            expr,
            LogicalExpr::Binary {
                op: BinaryOp::Gte,
                ..
            }
        ));
    }

    #[test]
    fn test_semantic_eq_ignores_qualifier() {
        let bare = col("a").eq(lit("jack"));
        let qualified = qualified_col("t", "a").eq(lit("jack"));
        assert!(bare.semantic_eq(&qualified));
    }

    #[test]
    fn test_semantic_eq_strips_literal_cast() {
        let plain = col("a").gt(lit(5i32));
        let cast = col("a").gt(lit(5i32).cast(DataType::Int64));
        assert!(plain.semantic_eq(&cast));
        assert!(cast.semantic_eq(&plain));
    }

    #[test]
    fn test_semantic_eq_alias_transparent() {
        let named = sum(col("sal")).alias("s");
        let bare = sum(col("sal"));
        assert!(named.semantic_eq(&bare));
    }

    #[test]
    fn test_semantic_eq_is_syntactic_over_structure() {
        // a + b = c and c = a + b are logically equal but shapes differ
        let lhs = col("a").add(col("b")).eq(col("c"));
        let rhs = col("c").eq(col("a").add(col("b")));
        assert!(!lhs.semantic_eq(&rhs));
    }

    #[test]
    fn test_split_conjunctions() {
        let pred = col("a")
            .eq(lit(1i64))
            .and(col("b").gt(lit(2i64)))
            .and(col("c").lt(lit(3i64)));

        let conjuncts = pred.split_conjunctions();
        assert_eq!(conjuncts.len(), 3);
        assert!(conjuncts[0].semantic_eq(&col("a").eq(lit(1i64))));
    }

    #[test]
    fn test_conjoin_roundtrip() {
        let parts = vec![col("a").eq(lit(1i64)), col("b").gt(lit(2i64))];
        let combined = LogicalExpr::conjoin(parts).unwrap();
        assert_eq!(combined.split_conjunctions().len(), 2);

        assert!(LogicalExpr::conjoin(Vec::new()).is_none());
    }

    #[test]
    fn test_column_refs() {
        let expr = col("a").add(qualified_col("t", "b")).gt(lit(0i64));
        let refs = expr.column_refs();
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].name, "a");
        assert_eq!(refs[1].name, "b");
    }

    #[test]
    fn test_transform_down_replaces_columns() {
        let expr = col("a").add(col("b"));
        let rewritten = expr.transform_down(&mut |e| match e {
            LogicalExpr::Column { column, data_type } if column.name == "a" => {
                LogicalExpr::column_ref(mirva_core::ColumnRef::new("x"), data_type)
            }
            other => other,
        });

        let refs = rewritten.column_refs();
        assert_eq!(refs[0].name, "x");
        assert_eq!(refs[1].name, "b");
    }

    #[test]
    fn test_data_type_inference() {
        let cmp = col("a").gt(lit(1i64));
        assert_eq!(cmp.data_type(), Some(DataType::Bool));

        let arith = lit(1i32).add(lit(2.0f64));
        assert_eq!(arith.data_type(), Some(DataType::Float64));

        assert_eq!(sum(lit(1i32)).data_type(), Some(DataType::Int64));
    }

    #[test]
    fn test_output_name() {
        assert_eq!(col("a").output_name(), "a");
        assert_eq!(sum(col("sal")).alias("total").output_name(), "total");
        assert_eq!(sum(col("sal")).output_name(), "SUM(sal)");
    }
}
