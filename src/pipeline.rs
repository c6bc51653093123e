//! Unified pipeline entrypoint.
//!
//! [`run_pipeline`] chains the four stages — load the document, evaluate the
//! query, filter the projected records, render and emit one template per
//! surviving record — and reports the outcome to an optional
//! [`PipelineObserver`].
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

use std::fmt;
use std::io::Write;
use std::sync::Arc;

use crate::document::load_document_from_str;
use crate::error::{PipelineError, PipelineResult};
use crate::filter::filter_below;
use crate::observability::{
    PipelineContext, PipelineObserver, PipelineSeverity, PipelineStats,
};
use crate::query::Query;
use crate::record::records_from_value;
use crate::template::{emit_all, render_all};

/// The stage a pipeline failure occurred in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    /// Decoding the input text into a document.
    Load,
    /// Compiling and evaluating the query expression.
    Query,
    /// Applying the predicate filter.
    Filter,
    /// Rendering and emitting template documents.
    Render,
}

/// One pipeline run: the query and the filter/render parameters applied to a
/// document.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineRequest {
    /// Path-query expression projecting records out of the document.
    pub expression: String,
    /// Record field holding the title substituted into each template.
    pub title_field: String,
    /// Record field holding the price compared and substituted.
    pub price_field: String,
    /// Records with `price_field` strictly below this survive the filter.
    pub threshold: f64,
}

impl PipelineRequest {
    /// Create a request.
    pub fn new(
        expression: impl Into<String>,
        title_field: impl Into<String>,
        price_field: impl Into<String>,
        threshold: f64,
    ) -> Self {
        Self {
            expression: expression.into(),
            title_field: title_field.into(),
            price_field: price_field.into(),
            threshold,
        }
    }
}

/// Options controlling pipeline observation.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct PipelineOptions {
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn PipelineObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: PipelineSeverity,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            observer: None,
            alert_at_or_above: PipelineSeverity::Critical,
        }
    }
}

impl fmt::Debug for PipelineOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineOptions")
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

/// Run the full pipeline against `document_text`, writing one pretty-printed
/// template document per surviving record to `out`.
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with record/emission counts
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
pub fn run_pipeline(
    document_text: &str,
    request: &PipelineRequest,
    out: &mut dyn Write,
    options: &PipelineOptions,
) -> PipelineResult<PipelineStats> {
    let result = run_stages(document_text, request, out);

    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok(stats) => {
                let ctx = PipelineContext {
                    stage: PipelineStage::Render,
                    expression: request.expression.clone(),
                };
                obs.on_success(&ctx, *stats);
            }
            Err(e) => {
                let ctx = PipelineContext {
                    stage: stage_for_error(e),
                    expression: request.expression.clone(),
                };
                let sev = severity_for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result
}

fn run_stages(
    document_text: &str,
    request: &PipelineRequest,
    out: &mut dyn Write,
) -> PipelineResult<PipelineStats> {
    let document = load_document_from_str(document_text)?;
    let query = Query::parse(&request.expression)?;
    let records = records_from_value(query.evaluate(&document))?;
    let matched = filter_below(&records, &request.price_field, request.threshold);
    let documents = render_all(&matched, &request.title_field, &request.price_field)?;
    emit_all(out, &documents)?;

    Ok(PipelineStats {
        projected: records.len(),
        matched: matched.len(),
        emitted: documents.len(),
    })
}

fn stage_for_error(e: &PipelineError) -> PipelineStage {
    match e {
        PipelineError::Parse(_) => PipelineStage::Load,
        PipelineError::QuerySyntax { .. } | PipelineError::Projection { .. } => PipelineStage::Query,
        PipelineError::Record { .. } | PipelineError::Serialize(_) | PipelineError::Io(_) => {
            PipelineStage::Render
        }
    }
}

fn severity_for_error(e: &PipelineError) -> PipelineSeverity {
    match e {
        PipelineError::Io(_) | PipelineError::Serialize(_) => PipelineSeverity::Critical,
        PipelineError::Projection { .. } => PipelineSeverity::Warning,
        PipelineError::Parse(_) | PipelineError::QuerySyntax { .. } | PipelineError::Record { .. } => {
            PipelineSeverity::Error
        }
    }
}
