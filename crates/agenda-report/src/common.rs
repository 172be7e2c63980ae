//! Shared cell formatting for the CSV reports.
//!
//! Headers are written bare. String cells are always double-quoted with
//! internal quotes doubled; integer cells are written bare.

use chrono::NaiveDate;

use agenda_normalization::format_date;

/// Marker written in place of a date for a booking left in review.
pub const REVIEW_MARKER: &str = "revisar";

/// Separator between dates in a single cell.
pub const DATE_LIST_SEPARATOR: &str = "; ";

/// Quote a string cell.
pub fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Render an optional date, empty when missing.
pub fn date_text(date: Option<NaiveDate>) -> String {
    date.map(format_date).unwrap_or_default()
}

/// Join a header and rows into file contents ending with a newline.
pub fn join_lines(header: &str, rows: impl IntoIterator<Item = String>) -> String {
    let mut out = String::from(header);
    out.push('\n');
    for row in rows {
        out.push_str(&row);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_doubles_inner_quotes() {
        assert_eq!(quote("Maria \"Mari\" Silva"), "\"Maria \"\"Mari\"\" Silva\"");
        assert_eq!(quote(""), "\"\"");
    }

    #[test]
    fn missing_date_is_empty() {
        assert_eq!(date_text(None), "");
        assert_eq!(
            date_text(NaiveDate::from_ymd_opt(2025, 11, 3)),
            "2025-11-03"
        );
    }
}
