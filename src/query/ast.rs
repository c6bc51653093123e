//! Abstract syntax tree for path expressions.

/// A compiled path-expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// The current value, unchanged. Appears as the right-hand side of a
    /// projection with nothing after the `[*]`.
    Identity,

    /// Field access on a mapping (`title`).
    Field(String),

    /// Index access on a sequence (`[0]`, `[-1]`; negative counts from the end).
    Index(i64),

    /// Left-to-right chaining (`lhs.rhs`).
    SubExpr { lhs: Box<Expr>, rhs: Box<Expr> },

    /// Wildcard projection (`lhs[*].rhs`): evaluate `rhs` against every
    /// element of the sequence `lhs` evaluates to.
    Projection { lhs: Box<Expr>, rhs: Box<Expr> },

    /// Multi-select hash (`{Title: title, Price: price}`): build a mapping
    /// with renamed output keys.
    MultiSelectHash(Vec<KeyedExpr>),
}

/// One `key: expression` entry of a multi-select hash.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyedExpr {
    /// Output key in the projected record.
    pub key: String,
    /// Expression evaluated against the current value.
    pub expr: Expr,
}

impl Expr {
    /// Chain two expressions, eliding identity on either side.
    pub fn chained(lhs: Expr, rhs: Expr) -> Expr {
        match (lhs, rhs) {
            (Expr::Identity, rhs) => rhs,
            (lhs, Expr::Identity) => lhs,
            (lhs, rhs) => Expr::SubExpr {
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            },
        }
    }
}
