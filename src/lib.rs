//! `search-template-gen` queries an in-memory JSON document with a small
//! path-expression language, filters the projected records by a numeric
//! predicate, and renders a search-engine index-template document per
//! surviving record.
//!
//! The pipeline has four stages, each a pure function from input to output:
//!
//! 1. **Load** ([`document`]): decode JSON text into an in-memory tree.
//! 2. **Query** ([`query`]): evaluate a declarative selection/projection
//!    expression, producing an ordered sequence of projected records.
//! 3. **Filter** ([`filter`]): keep records whose price is strictly below a
//!    threshold.
//! 4. **Render** ([`template`]): build the fixed-shape index-template
//!    descriptor per record and serialize it to pretty-printed JSON.
//!
//! ## Quick example: the full pipeline, stage by stage
//!
//! ```rust
//! use search_template_gen::document::load_document_from_str;
//! use search_template_gen::filter::filter_below;
//! use search_template_gen::query::Query;
//! use search_template_gen::record::records_from_value;
//! use search_template_gen::template::TemplateDescriptor;
//!
//! # fn main() -> Result<(), search_template_gen::PipelineError> {
//! let doc = load_document_from_str(
//!     r#"{"store": {"book": [
//!         {"title": "Dune", "price": 9.99},
//!         {"title": "Hyperion", "price": 24.00}
//!     ]}}"#,
//! )?;
//!
//! let query = Query::parse("store.book[*].{Title: title, Price: price}")?;
//! let records = records_from_value(query.evaluate(&doc))?;
//! let cheap = filter_below(&records, "Price", 15.0);
//! assert_eq!(cheap.len(), 1);
//!
//! for record in &cheap {
//!     let descriptor = TemplateDescriptor::from_record(record, "Title", "Price")?;
//!     println!("{}", descriptor.render()?);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Quick example: one call
//!
//! ```rust
//! use search_template_gen::pipeline::{PipelineOptions, PipelineRequest, run_pipeline};
//!
//! # fn main() -> Result<(), search_template_gen::PipelineError> {
//! let input = r#"{"store": {"book": [{"title": "Dune", "price": 9.99}]}}"#;
//! let request = PipelineRequest::new("store.book[*].{Title: title, Price: price}", "Title", "Price", 15.0);
//!
//! let mut out = Vec::new();
//! let stats = run_pipeline(input, &request, &mut out, &PipelineOptions::default())?;
//! assert_eq!(stats.emitted, 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`document`]: JSON document loading
//! - [`query`]: the path-expression language (tokens, AST, parser, evaluator)
//! - [`record`]: projected records and typed field access
//! - [`filter`]: order-preserving predicate filtering
//! - [`template`]: index-template descriptors and rendering
//! - [`pipeline`]: unified entrypoint chaining all stages
//! - [`observability`]: observer hooks for run outcomes
//! - [`error`]: error types used across the pipeline

pub mod document;
pub mod error;
pub mod filter;
pub mod observability;
pub mod pipeline;
pub mod query;
pub mod record;
pub mod template;

pub use error::{PipelineError, PipelineResult};
