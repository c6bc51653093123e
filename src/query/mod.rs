//! Declarative path queries over a loaded document.
//!
//! The expression language is a small selection/projection language: nested
//! field traversal (`store.book`), index access (`[0]`), wildcard iteration
//! over a sequence (`[*]`), and multi-select hash projection renaming fields
//! into new output keys (`{Title: title, Price: price}`).
//!
//! Compile an expression once with [`Query::parse`], then evaluate it against
//! any number of documents; or use [`search`] for one-shot evaluation.
//!
//! ```rust
//! use search_template_gen::query::Query;
//! use serde_json::json;
//!
//! # fn main() -> Result<(), search_template_gen::PipelineError> {
//! let doc = json!({"store": {"book": [{"title": "Dune", "price": 9.99}]}});
//! let query = Query::parse("store.book[*].{Title: title}")?;
//! assert_eq!(query.evaluate(&doc), json!([{"Title": "Dune"}]));
//! # Ok(())
//! # }
//! ```

pub mod ast;
pub mod eval;
pub mod parser;
pub mod tokens;

use serde_json::Value;

use crate::error::PipelineResult;

use ast::Expr;

/// A compiled path-query expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    expression: String,
    ast: Expr,
}

impl Query {
    /// Compile an expression string.
    ///
    /// Fails with [`crate::PipelineError::QuerySyntax`] if the expression is
    /// malformed.
    pub fn parse(expression: &str) -> PipelineResult<Self> {
        let ast = parser::parse(expression)?;
        Ok(Self {
            expression: expression.to_string(),
            ast,
        })
    }

    /// The source expression this query was compiled from.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Evaluate the query against a document.
    ///
    /// Evaluation is pure and total; see [`eval`] for the null-propagation
    /// semantics of unresolvable paths.
    pub fn evaluate(&self, document: &Value) -> Value {
        eval::evaluate(&self.ast, document)
    }
}

/// Compile and evaluate an expression in one step.
pub fn search(expression: &str, document: &Value) -> PipelineResult<Value> {
    Ok(Query::parse(expression)?.evaluate(document))
}
