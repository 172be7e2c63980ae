//! `resultado.json`: the full result plus where it came from.

use anyhow::{Context, Result};
use serde::Serialize;

use agenda_model::{AuditWindow, ProcessingResult};

/// Provenance of the bank export an audit ran on.
#[derive(Debug, Clone, Serialize)]
pub struct InputDigest {
    pub file: String,
    pub sha256: String,
    pub record_count: usize,
}

#[derive(Serialize)]
struct AuditDocument<'a> {
    input: &'a InputDigest,
    window: &'a AuditWindow,
    result: &'a ProcessingResult,
}

/// Pretty-printed JSON of the result. No clock is read, so the same input
/// always yields the same bytes.
pub fn render_result_json(
    result: &ProcessingResult,
    window: &AuditWindow,
    input: &InputDigest,
) -> Result<String> {
    let document = AuditDocument {
        input,
        window,
        result,
    };
    let mut json = serde_json::to_string_pretty(&document).context("serialize audit result")?;
    json.push('\n');
    Ok(json)
}
