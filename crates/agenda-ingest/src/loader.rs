use std::path::Path;

use anyhow::{Context, Result};
use encoding_rs::{UTF_8, WINDOWS_1252};
use sha2::Digest;
use tracing::{debug, info};

use agenda_model::{CalendarEntry, RawBookingRecord};

use crate::bank::parse_bank_export;
use crate::calendar::parse_calendar_listing;

/// Contents of an input file together with its checksum.
#[derive(Debug, Clone)]
pub struct LoadedText {
    pub text: String,
    pub sha256: String,
    /// True when the bytes were not UTF-8 and were read as Windows-1252.
    pub latin1_fallback: bool,
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    hex::encode(digest)
}

/// Decodes file bytes: UTF-8 when valid (BOM dropped), Windows-1252
/// otherwise, which is what spreadsheet exports use for Latin-1 text.
pub fn decode_text(bytes: &[u8]) -> (String, bool) {
    let (text, had_errors) = UTF_8.decode_with_bom_removal(bytes);
    if !had_errors {
        return (text.into_owned(), false);
    }
    let (text, _, _) = WINDOWS_1252.decode(bytes);
    (text.into_owned(), true)
}

pub fn read_text_file(path: &Path) -> Result<LoadedText> {
    let bytes = std::fs::read(path).with_context(|| format!("read file: {}", path.display()))?;
    let sha256 = sha256_hex(&bytes);
    let (text, latin1_fallback) = decode_text(&bytes);
    if latin1_fallback {
        debug!(path = %path.display(), "input is not UTF-8, decoded as Windows-1252");
    }
    Ok(LoadedText {
        text,
        sha256,
        latin1_fallback,
    })
}

/// Reads and parses a bank export file.
pub fn load_bank_file(path: &Path) -> Result<(Vec<RawBookingRecord>, LoadedText)> {
    let loaded = read_text_file(path)?;
    let records = parse_bank_export(&loaded.text);
    info!(
        path = %path.display(),
        record_count = records.len(),
        sha256 = %loaded.sha256,
        "bank export loaded"
    );
    Ok((records, loaded))
}

/// Reads and parses a calendar listing file.
pub fn load_calendar_file(
    path: &Path,
    month: u32,
    year: i32,
    maternity: &str,
) -> Result<Vec<CalendarEntry>> {
    let loaded = read_text_file(path)?;
    let entries = parse_calendar_listing(&loaded.text, month, year, maternity);
    info!(
        path = %path.display(),
        entry_count = entries.len(),
        maternity,
        "calendar listing loaded"
    );
    Ok(entries)
}
