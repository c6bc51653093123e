use thiserror::Error;

/// Convenience result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Error type returned by pipeline functions.
///
/// This is a single error enum shared across document loading, query
/// evaluation, and template rendering.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Underlying I/O error (e.g. file not found, closed output stream).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The input text is not well-formed JSON.
    #[error("json parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// The query expression is not well-formed.
    #[error("query syntax error at offset {offset}: {message}")]
    QuerySyntax { offset: usize, message: String },

    /// The query evaluated to something other than a sequence of records.
    #[error("query result mismatch: {message}")]
    Projection { message: String },

    /// A record is missing a substitution field, or the field has the wrong type.
    #[error("record field '{field}': {message} (raw='{raw}')")]
    Record {
        field: String,
        raw: String,
        message: String,
    },

    /// A template descriptor could not be serialized. Not expected for
    /// well-typed descriptors.
    #[error("template serialization error: {0}")]
    Serialize(#[source] serde_json::Error),
}
