//! Bank export parser.
//!
//! Each line is one booking: name, card id, maternity, date. Exports come
//! from spreadsheets and clipboards, so the delimiter changes from file to
//! file and sometimes from line to line.

use csv::ReaderBuilder;
use tracing::debug;

use agenda_model::RawBookingRecord;
use agenda_normalization::compact_key;

/// First-cell keys that mark a header line.
const HEADER_KEYS: &[&str] = &[
    "NOME",
    "NOMEDAPACIENTE",
    "NOMEPACIENTE",
    "PACIENTE",
    "BENEFICIARIO",
    "NOMEDOBENEFICIARIO",
];

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').trim().to_string()
}

/// Picks the delimiter of one line: tab, then semicolon when the line has no
/// comma, then comma.
fn detect_delimiter(line: &str) -> u8 {
    if line.contains('\t') {
        b'\t'
    } else if line.contains(';') && !line.contains(',') {
        b';'
    } else {
        b','
    }
}

/// Splits one line into trimmed cells, honoring quoted cells.
pub fn split_line(line: &str) -> Vec<String> {
    let delimiter = detect_delimiter(line);
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(line.as_bytes());
    match reader.records().next() {
        Some(Ok(record)) => record.iter().map(normalize_cell).collect(),
        _ => line
            .split(char::from(delimiter))
            .map(normalize_cell)
            .collect(),
    }
}

/// Maps the cells of one line to `(name, card, maternity, date)`.
///
/// The first four non-empty cells are used, which absorbs the blank columns
/// spreadsheets leave behind. A line with only three filled cells whose card
/// column is blank keeps an empty card id.
fn booking_cells(cells: &[String]) -> Option<[String; 4]> {
    let filled: Vec<&String> = cells.iter().filter(|cell| !cell.is_empty()).collect();
    match filled.len() {
        0..=2 => None,
        3 => {
            let card_blank = cells.get(1).is_some_and(String::is_empty)
                && cells.first().is_some_and(|cell| !cell.is_empty());
            if !card_blank {
                return None;
            }
            Some([
                filled[0].clone(),
                String::new(),
                filled[1].clone(),
                filled[2].clone(),
            ])
        }
        _ => Some([
            filled[0].clone(),
            filled[1].clone(),
            filled[2].clone(),
            filled[3].clone(),
        ]),
    }
}

fn is_header(cells: &[String; 4]) -> bool {
    let key = compact_key(&cells[0]);
    HEADER_KEYS.contains(&key.as_str())
}

/// Parses a bank export into raw booking records.
///
/// Malformed lines are dropped without error. Ids are assigned from 1 in
/// input order and define the priority of every later decision.
pub fn parse_bank_export(text: &str) -> Vec<RawBookingRecord> {
    let mut records = Vec::new();
    let mut next_id: u32 = 1;
    let mut seen_data = false;
    for (line_number, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let cells = split_line(line);
        let Some(booking) = booking_cells(&cells) else {
            debug!(line = line_number + 1, "skipping line without booking cells");
            continue;
        };
        if !seen_data && is_header(&booking) {
            debug!(line = line_number + 1, "skipping header line");
            continue;
        }
        seen_data = true;
        let [name, card_id, maternity, date_text] = booking;
        records.push(RawBookingRecord {
            internal_id: next_id,
            name,
            card_id,
            maternity,
            date_text,
        });
        next_id += 1;
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_delimiters() {
        assert_eq!(detect_delimiter("a\tb,c"), b'\t');
        assert_eq!(detect_delimiter("a;b;c"), b';');
        assert_eq!(detect_delimiter("a;b,c"), b',');
    }

    #[test]
    fn split_line_honors_quotes() {
        assert_eq!(
            split_line("\"Silva, Maria\",123, Guarulhos ,03/11/2025"),
            vec!["Silva, Maria", "123", "Guarulhos", "03/11/2025"]
        );
    }
}
