//! Document loading.
//!
//! A document is the in-memory JSON tree ([`serde_json::Value`]) that queries
//! run against. Loading fully materializes the input; there is no streaming
//! path, the documents this crate works with are small.

use std::fs;
use std::path::Path;

use crate::error::{PipelineError, PipelineResult};

/// Load a document from a file.
pub fn load_document_from_path(path: impl AsRef<Path>) -> PipelineResult<serde_json::Value> {
    let text = fs::read_to_string(path)?;
    load_document_from_str(&text)
}

/// Load a document from an in-memory JSON string.
///
/// Fails with [`PipelineError::Parse`] if the input is not well-formed JSON
/// (malformed syntax, unterminated structures, invalid literals).
pub fn load_document_from_str(input: &str) -> PipelineResult<serde_json::Value> {
    serde_json::from_str(input.trim()).map_err(PipelineError::Parse)
}
