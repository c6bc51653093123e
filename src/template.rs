//! Index-template rendering.
//!
//! A [`TemplateDescriptor`] is the fixed-shape search-engine index-template
//! document. Everything about its shape is decided at compile time by the
//! struct tree below (serialized key order is declaration order); the only
//! substitution points are the match title and the range price bound, taken
//! verbatim from one projected record.
//!
//! ```rust
//! use search_template_gen::template::TemplateDescriptor;
//! use serde_json::Number;
//!
//! # fn main() -> Result<(), search_template_gen::PipelineError> {
//! let descriptor = TemplateDescriptor::new("Dune", Number::from_f64(9.99).unwrap());
//! let text = descriptor.render()?;
//! assert!(text.contains("\"my-index\""));
//! assert!(text.contains("\"lt\": 9.99"));
//! # Ok(())
//! # }
//! ```

use std::io::Write;

use rayon::prelude::*;
use serde::Serialize;
use serde_json::{Number, Value};

use crate::error::{PipelineError, PipelineResult};
use crate::record::Record;

/// Index pattern every descriptor targets.
pub const INDEX_PATTERN: &str = "my-index";
/// Template version stamped into every descriptor.
pub const TEMPLATE_VERSION: u32 = 1;
/// Template priority stamped into every descriptor.
pub const TEMPLATE_PRIORITY: u32 = 1;

/// A search-engine index-template document for one projected record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateDescriptor {
    /// Index patterns the template applies to. Always `["my-index"]`.
    pub index_patterns: Vec<String>,
    /// Template version. Always `1`.
    pub version: u32,
    /// Template priority. Always `1`.
    pub priority: u32,
    /// The template body.
    pub template: TemplateBody,
}

/// `template` object of a descriptor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateBody {
    /// The stored search source.
    pub source: TemplateSource,
}

/// `template.source` object of a descriptor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateSource {
    /// The boolean query.
    pub query: QueryClause,
}

/// `template.source.query` object of a descriptor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryClause {
    /// The `bool` compound clause.
    #[serde(rename = "bool")]
    pub boolean: BoolClause,
}

/// `bool` clause holding the match and filter contexts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoolClause {
    /// Scoring context: one title match per descriptor.
    pub must: Vec<MustClause>,
    /// Filter context: one price range per descriptor.
    pub filter: Vec<FilterClause>,
}

/// One entry of the `must` array.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MustClause {
    /// The `match` query.
    #[serde(rename = "match")]
    pub matching: MatchClause,
}

/// `match` query on the title field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchClause {
    /// Title text, taken verbatim from the record.
    pub title: String,
}

/// One entry of the `filter` array.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterClause {
    /// The `range` query.
    pub range: RangeClause,
}

/// `range` query on the price field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeClause {
    /// Price bound.
    pub price: PriceRange,
}

/// Upper bound of the price range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceRange {
    /// Exclusive upper bound, taken verbatim from the record.
    pub lt: Number,
}

impl TemplateDescriptor {
    /// Build a descriptor from its two substitution points.
    pub fn new(title: impl Into<String>, price: Number) -> Self {
        Self {
            index_patterns: vec![INDEX_PATTERN.to_string()],
            version: TEMPLATE_VERSION,
            priority: TEMPLATE_PRIORITY,
            template: TemplateBody {
                source: TemplateSource {
                    query: QueryClause {
                        boolean: BoolClause {
                            must: vec![MustClause {
                                matching: MatchClause { title: title.into() },
                            }],
                            filter: vec![FilterClause {
                                range: RangeClause {
                                    price: PriceRange { lt: price },
                                },
                            }],
                        },
                    },
                },
            },
        }
    }

    /// Build a descriptor from a projected record.
    ///
    /// `title_field` must hold a string and `price_field` a number; anything
    /// else fails with [`PipelineError::Record`]. The number is carried
    /// verbatim, so an integer price stays an integer in the output.
    pub fn from_record(record: &Record, title_field: &str, price_field: &str) -> PipelineResult<Self> {
        let title = match record.get(title_field) {
            Some(Value::String(s)) => s.clone(),
            other => return Err(field_error(title_field, other, "expected string")),
        };
        let price = match record.get(price_field) {
            Some(Value::Number(n)) => n.clone(),
            other => return Err(field_error(price_field, other, "expected number")),
        };
        Ok(Self::new(title, price))
    }

    /// Serialize the descriptor to pretty-printed JSON (2-space indentation,
    /// stable key order).
    pub fn render(&self) -> PipelineResult<String> {
        serde_json::to_string_pretty(self).map_err(PipelineError::Serialize)
    }
}

fn field_error(field: &str, value: Option<&Value>, message: &str) -> PipelineError {
    PipelineError::Record {
        field: field.to_string(),
        raw: value.map_or_else(|| "<absent>".to_string(), Value::to_string),
        message: message.to_string(),
    }
}

/// Render one descriptor per record, preserving record order.
///
/// Records are independent, so rendering fans out across a thread pool; the
/// returned documents are still in input order.
pub fn render_all(records: &[Record], title_field: &str, price_field: &str) -> PipelineResult<Vec<String>> {
    records
        .par_iter()
        .map(|record| TemplateDescriptor::from_record(record, title_field, price_field)?.render())
        .collect()
}

/// Write each rendered document to `out`, one per line group.
///
/// Emission is sequential and at-most-once per document: if a write fails
/// partway through, documents already written stay written.
pub fn emit_all(out: &mut dyn Write, documents: &[String]) -> PipelineResult<()> {
    for document in documents {
        writeln!(out, "{document}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::{Number, json};

    use super::{TemplateDescriptor, emit_all, render_all};
    use crate::error::PipelineError;
    use crate::record::records_from_value;

    fn mockingbird() -> TemplateDescriptor {
        TemplateDescriptor::new("To Kill a Mockingbird", Number::from_f64(12.5).unwrap())
    }

    #[test]
    fn renders_the_fixed_shape_with_substitutions() {
        let expected = r#"{
  "index_patterns": [
    "my-index"
  ],
  "version": 1,
  "priority": 1,
  "template": {
    "source": {
      "query": {
        "bool": {
          "must": [
            {
              "match": {
                "title": "To Kill a Mockingbird"
              }
            }
          ],
          "filter": [
            {
              "range": {
                "price": {
                  "lt": 12.5
                }
              }
            }
          ]
        }
      }
    }
  }
}"#;
        assert_eq!(mockingbird().render().unwrap(), expected);
    }

    #[test]
    fn integer_price_stays_an_integer() {
        let descriptor = TemplateDescriptor::new("x", Number::from(12));
        assert!(descriptor.render().unwrap().contains("\"lt\": 12"));
    }

    #[test]
    fn from_record_takes_fields_verbatim() {
        let records =
            records_from_value(json!([{"Title": "To Kill a Mockingbird", "Price": 12.5}])).unwrap();
        let descriptor = TemplateDescriptor::from_record(&records[0], "Title", "Price").unwrap();
        assert_eq!(descriptor, mockingbird());
    }

    #[test]
    fn from_record_rejects_missing_title() {
        let records = records_from_value(json!([{"Price": 12.5}])).unwrap();
        let err = TemplateDescriptor::from_record(&records[0], "Title", "Price").unwrap_err();
        assert!(matches!(err, PipelineError::Record { .. }));
        assert!(err.to_string().contains("'Title'"));
        assert!(err.to_string().contains("<absent>"));
    }

    #[test]
    fn from_record_rejects_non_numeric_price() {
        let records = records_from_value(json!([{"Title": "x", "Price": "12.5"}])).unwrap();
        let err = TemplateDescriptor::from_record(&records[0], "Title", "Price").unwrap_err();
        assert!(err.to_string().contains("expected number"));
    }

    #[test]
    fn render_all_preserves_record_order() {
        let records = records_from_value(json!([
            {"Title": "a", "Price": 1.5},
            {"Title": "b", "Price": 2.5},
            {"Title": "c", "Price": 3.5}
        ]))
        .unwrap();
        let documents = render_all(&records, "Title", "Price").unwrap();
        assert_eq!(documents.len(), 3);
        assert!(documents[0].contains("\"title\": \"a\""));
        assert!(documents[1].contains("\"title\": \"b\""));
        assert!(documents[2].contains("\"title\": \"c\""));
    }

    #[test]
    fn emit_all_writes_one_document_per_line_group() {
        let documents = vec!["{}".to_string(), "{}".to_string()];
        let mut out = Vec::new();
        emit_all(&mut out, &documents).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "{}\n{}\n");
    }
}
