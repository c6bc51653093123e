//! Projected records.
//!
//! The query evaluator produces a JSON value; the rest of the pipeline works
//! on [`Record`]s, the individual mappings of that result. Conversion is
//! shape-checked: anything other than a (possibly empty) sequence of mappings
//! fails explicitly rather than being coerced.

use serde_json::Value;

use crate::error::{PipelineError, PipelineResult};

/// A single projected record: a mapping from output keys to values.
pub type Record = serde_json::Map<String, Value>;

/// Convert a query result into a list of records.
///
/// - null becomes the empty list (the total-function result of a dangling
///   query path)
/// - a sequence of mappings becomes one [`Record`] per element, in order
/// - anything else fails with [`PipelineError::Projection`]
pub fn records_from_value(value: Value) -> PipelineResult<Vec<Record>> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::Object(map) => Ok(map),
                other => Err(PipelineError::Projection {
                    message: format!("result {i} is not a record (got {})", kind_name(&other)),
                }),
            })
            .collect(),
        other => Err(PipelineError::Projection {
            message: format!("expected a sequence of records, got {}", kind_name(&other)),
        }),
    }
}

/// Numeric view of a record field. `None` if the field is absent or not a
/// number.
pub fn numeric_field(record: &Record, field: &str) -> Option<f64> {
    record.get(field).and_then(Value::as_f64)
}

/// String view of a record field. `None` if the field is absent or not a
/// string.
pub fn string_field<'a>(record: &'a Record, field: &str) -> Option<&'a str> {
    record.get(field).and_then(Value::as_str)
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::{numeric_field, records_from_value, string_field};

    #[test]
    fn null_result_is_the_empty_record_list() {
        assert!(records_from_value(Value::Null).unwrap().is_empty());
    }

    #[test]
    fn sequence_of_mappings_converts_in_order() {
        let records = records_from_value(json!([{"Title": "a"}, {"Title": "b"}])).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["Title"], "a");
        assert_eq!(records[1]["Title"], "b");
    }

    #[test]
    fn scalar_result_is_rejected() {
        let err = records_from_value(json!("red")).unwrap_err();
        assert!(err.to_string().contains("got string"));
    }

    #[test]
    fn sequence_with_scalar_element_is_rejected() {
        let err = records_from_value(json!([{"Title": "a"}, 42])).unwrap_err();
        assert!(err.to_string().contains("result 1 is not a record"));
    }

    #[test]
    fn field_accessors_check_types() {
        let records = records_from_value(json!([{"Title": "a", "Price": 12.5}])).unwrap();
        let record = &records[0];
        assert_eq!(string_field(record, "Title"), Some("a"));
        assert_eq!(numeric_field(record, "Price"), Some(12.5));
        assert_eq!(numeric_field(record, "Title"), None);
        assert_eq!(string_field(record, "Missing"), None);
    }
}
