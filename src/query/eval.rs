//! Expression evaluation over a JSON document.
//!
//! Evaluation is pure and total: it never mutates the document and never
//! fails. Paths that do not resolve against the document's actual shape
//! (missing field, field access on a non-mapping, out-of-range index,
//! wildcard over a non-sequence) evaluate to JSON null, and a projection
//! drops per-element null results. Identical document + identical expression
//! always yields results in source order.

use serde_json::Value;

use super::ast::Expr;

/// Evaluate `expr` against `current`, producing a new value.
pub fn evaluate(expr: &Expr, current: &Value) -> Value {
    match expr {
        Expr::Identity => current.clone(),

        Expr::Field(name) => current
            .as_object()
            .and_then(|map| map.get(name))
            .cloned()
            .unwrap_or(Value::Null),

        Expr::Index(index) => match current.as_array() {
            Some(items) => resolve_index(items.len(), *index)
                .and_then(|i| items.get(i))
                .cloned()
                .unwrap_or(Value::Null),
            None => Value::Null,
        },

        Expr::SubExpr { lhs, rhs } => {
            let base = evaluate(lhs, current);
            evaluate(rhs, &base)
        }

        Expr::Projection { lhs, rhs } => match evaluate(lhs, current) {
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .map(|item| evaluate(rhs, item))
                    .filter(|v| !v.is_null())
                    .collect(),
            ),
            _ => Value::Null,
        },

        Expr::MultiSelectHash(entries) => {
            // A multi-select over null stays null rather than producing a
            // record of all-null fields.
            if current.is_null() {
                return Value::Null;
            }
            let mut map = serde_json::Map::with_capacity(entries.len());
            for entry in entries {
                map.insert(entry.key.clone(), evaluate(&entry.expr, current));
            }
            Value::Object(map)
        }
    }
}

fn resolve_index(len: usize, index: i64) -> Option<usize> {
    if index >= 0 {
        Some(index as usize)
    } else {
        len.checked_sub(index.unsigned_abs() as usize)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::evaluate;
    use crate::query::parser::parse;

    fn eval(expression: &str, doc: &Value) -> Value {
        evaluate(&parse(expression).unwrap(), doc)
    }

    fn sample_document() -> Value {
        json!({
            "store": {
                "book": [
                    {"title": "The Catcher in the Rye", "author": "J.D. Salinger", "price": 15.99},
                    {"title": "To Kill a Mockingbird", "author": "Harper Lee", "price": 12.50}
                ],
                "bicycle": {"color": "red", "price": 199.99}
            }
        })
    }

    #[test]
    fn traverses_nested_fields() {
        let doc = sample_document();
        assert_eq!(eval("store.bicycle.color", &doc), json!("red"));
    }

    #[test]
    fn indexes_sequences_from_both_ends() {
        let doc = sample_document();
        assert_eq!(eval("store.book[0].title", &doc), json!("The Catcher in the Rye"));
        assert_eq!(eval("store.book[-1].title", &doc), json!("To Kill a Mockingbird"));
        assert_eq!(eval("store.book[5].title", &doc), Value::Null);
    }

    #[test]
    fn projects_multiselect_hash_in_source_order() {
        let doc = sample_document();
        assert_eq!(
            eval("store.book[*].{Title: title, Price: price}", &doc),
            json!([
                {"Title": "The Catcher in the Rye", "Price": 15.99},
                {"Title": "To Kill a Mockingbird", "Price": 12.50}
            ])
        );
    }

    #[test]
    fn dangling_field_evaluates_to_null() {
        let doc = sample_document();
        assert_eq!(eval("store.magazine", &doc), Value::Null);
        assert_eq!(eval("store.magazine.title", &doc), Value::Null);
    }

    #[test]
    fn projection_over_non_sequence_evaluates_to_null() {
        let doc = sample_document();
        assert_eq!(eval("store.bicycle[*].{Color: color}", &doc), Value::Null);
        assert_eq!(eval("store.missing[*]", &doc), Value::Null);
    }

    #[test]
    fn projection_drops_null_elements() {
        let doc = json!({"book": [{"title": "a"}, {"isbn": "x"}, {"title": "b"}]});
        assert_eq!(eval("book[*].title", &doc), json!(["a", "b"]));
    }

    #[test]
    fn multiselect_keeps_null_field_values() {
        let doc = json!({"book": [{"title": "a"}]});
        assert_eq!(
            eval("book[*].{Title: title, Price: price}", &doc),
            json!([{"Title": "a", "Price": null}])
        );
    }

    #[test]
    fn evaluation_does_not_mutate_the_document() {
        let doc = sample_document();
        let before = doc.clone();
        let _ = eval("store.book[*].{Title: title}", &doc);
        assert_eq!(doc, before);
    }
}
