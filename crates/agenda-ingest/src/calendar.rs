//! Calendar listing parser.
//!
//! A maternity calendar is pasted as plain text: a line holding only the day
//! number, followed by the patients booked that day. Patients are often
//! numbered (`1 MARIA SILVA`); that number is an entry number, not a day.

use tracing::debug;

use agenda_model::CalendarEntry;

fn parse_day(text: &str) -> Option<u32> {
    if text.is_empty() || text.len() > 2 || !text.chars().all(|ch| ch.is_ascii_digit()) {
        return None;
    }
    let day: u32 = text.parse().ok()?;
    (1..=31).contains(&day).then_some(day)
}

/// Drops a leading entry number from `12 MARIA SILVA` / `3- ANA`.
///
/// Lines such as `12ABC`, where the digits run into the text, keep their
/// number.
fn strip_number_prefix(line: &str) -> &str {
    let Some(digits_end) = line
        .char_indices()
        .find(|(_, ch)| !ch.is_ascii_digit())
        .map(|(idx, _)| idx)
    else {
        return line;
    };
    if digits_end == 0 {
        return line;
    }
    let rest = &line[digits_end..];
    match rest.chars().next() {
        Some(first) if first.is_whitespace() || matches!(first, '-' | '.' | ')' | ':') => {
            let name = clean_name(rest);
            if name.is_empty() { line } else { name }
        }
        _ => line,
    }
}

fn clean_name(text: &str) -> &str {
    text.trim_start_matches(|ch: char| ch.is_whitespace() || matches!(ch, '-' | '.' | ')' | ':'))
        .trim()
}

/// Parses a calendar listing for one maternity and month.
///
/// Only a line made of a 1-2 digit number sets the current day, which then
/// carries across blank lines until the next day marker. Every other line is
/// a patient booked on the current day, with any leading entry number
/// removed. Names that appear before any day marker are skipped. Ids are
/// assigned from 1 in input order.
pub fn parse_calendar_listing(
    text: &str,
    month: u32,
    year: i32,
    maternity: &str,
) -> Vec<CalendarEntry> {
    let mut entries = Vec::new();
    let mut current_day: Option<u32> = None;
    let mut next_id: u32 = 1;
    let mut push = |day: u32, name: &str, entries: &mut Vec<CalendarEntry>| {
        entries.push(CalendarEntry {
            internal_id: next_id,
            day,
            month,
            year,
            maternity: maternity.to_string(),
            patient_name: name.to_string(),
        });
        next_id += 1;
    };
    for (line_number, raw) in text.lines().enumerate() {
        let line = raw.trim().trim_matches('\u{feff}').trim();
        if line.is_empty() {
            continue;
        }
        if line.chars().all(|ch| ch.is_ascii_digit()) {
            match parse_day(line) {
                Some(day) => current_day = Some(day),
                None => debug!(line = line_number + 1, "ignoring numeric line that is not a day"),
            }
            continue;
        }
        match current_day {
            Some(day) => push(day, clean_name(strip_number_prefix(line)), &mut entries),
            None => debug!(line = line_number + 1, "skipping name before first day marker"),
        }
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_prefix_requires_separator() {
        assert_eq!(strip_number_prefix("12 MARIA"), "MARIA");
        assert_eq!(strip_number_prefix("3- ANA"), "ANA");
        assert_eq!(strip_number_prefix("40 ANA"), "ANA");
        assert_eq!(strip_number_prefix("12ABC"), "12ABC");
        assert_eq!(strip_number_prefix("MARIA 2"), "MARIA 2");
    }
}
