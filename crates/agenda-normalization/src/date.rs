//! Booking date parsing.
//!
//! Exports mix Brazilian day-first dates, ISO dates, trailing times and, when
//! a spreadsheet touched the file, serial day numbers.

use chrono::{Days, NaiveDate};

/// Spreadsheet serial numbers outside this range are rejected as dates.
const SERIAL_RANGE: std::ops::RangeInclusive<u64> = 20_000..=80_000;

fn serial_epoch() -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(1899, 12, 30)
}

/// Parses a booking date.
///
/// Accepted: `dd/mm/yyyy`, `dd/mm/yy`, `dd-mm-yyyy`, `dd.mm.yyyy`,
/// `yyyy-mm-dd`, `yyyy/mm/dd`, any of these followed by a time part, and
/// spreadsheet serial day numbers. Two-digit years are read as 20yy.
///
/// # Examples
///
/// ```
/// use agenda_normalization::parse_booking_date;
/// use chrono::NaiveDate;
///
/// let expected = NaiveDate::from_ymd_opt(2025, 11, 3);
/// assert_eq!(parse_booking_date("03/11/2025"), expected);
/// assert_eq!(parse_booking_date("2025-11-03T08:30:00"), expected);
/// assert_eq!(parse_booking_date("45964"), expected);
/// assert_eq!(parse_booking_date("31/02/2025"), None);
/// ```
pub fn parse_booking_date(text: &str) -> Option<NaiveDate> {
    let token = text.split_whitespace().next()?;
    let token = token.split('T').next().unwrap_or(token);
    if let Some(date) = parse_serial(token) {
        return Some(date);
    }
    parse_calendar_date(token)
}

fn parse_calendar_date(token: &str) -> Option<NaiveDate> {
    let separator = ['/', '-', '.'].into_iter().find(|sep| token.contains(*sep))?;
    let parts: Vec<&str> = token.split(separator).collect();
    if parts.len() != 3 {
        return None;
    }
    if parts
        .iter()
        .any(|part| part.is_empty() || !part.chars().all(|ch| ch.is_ascii_digit()))
    {
        return None;
    }
    let (year_text, month_text, day_text) = if parts[0].len() == 4 {
        (parts[0], parts[1], parts[2])
    } else {
        (parts[2], parts[1], parts[0])
    };
    let year: i32 = match year_text.len() {
        2 => 2000 + year_text.parse::<i32>().ok()?,
        4 => year_text.parse().ok()?,
        _ => return None,
    };
    if month_text.len() > 2 || day_text.len() > 2 {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month_text.parse().ok()?, day_text.parse().ok()?)
}

fn parse_serial(token: &str) -> Option<NaiveDate> {
    let mut parts = token.split('.');
    let whole = parts.next()?;
    let fraction = parts.next();
    if parts.next().is_some() || whole.len() != 5 || !whole.chars().all(|ch| ch.is_ascii_digit())
    {
        return None;
    }
    if let Some(fraction) = fraction {
        if !fraction.chars().all(|ch| ch.is_ascii_digit()) {
            return None;
        }
    }
    let days: u64 = whole.parse().ok()?;
    if !SERIAL_RANGE.contains(&days) {
        return None;
    }
    serial_epoch()?.checked_add_days(Days::new(days))
}

/// Renders a date the way every report writes it.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_day_first_variants() {
        assert_eq!(parse_booking_date("3/11/2025"), Some(date(2025, 11, 3)));
        assert_eq!(parse_booking_date("03-11-2025"), Some(date(2025, 11, 3)));
        assert_eq!(parse_booking_date("03.11.2025"), Some(date(2025, 11, 3)));
        assert_eq!(parse_booking_date("03/11/25"), Some(date(2025, 11, 3)));
        assert_eq!(parse_booking_date(" 03/11/2025 08:00 "), Some(date(2025, 11, 3)));
    }

    #[test]
    fn parses_year_first_variants() {
        assert_eq!(parse_booking_date("2025/11/03"), Some(date(2025, 11, 3)));
        assert_eq!(parse_booking_date("2025-11-03 10:00"), Some(date(2025, 11, 3)));
    }

    #[test]
    fn parses_serial_numbers() {
        assert_eq!(parse_booking_date("45964.5"), Some(date(2025, 11, 3)));
        assert_eq!(parse_booking_date("12345"), None);
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_booking_date(""), None);
        assert_eq!(parse_booking_date("amanhã"), None);
        assert_eq!(parse_booking_date("03/11"), None);
        assert_eq!(parse_booking_date("03/13/2025"), None);
        assert_eq!(parse_booking_date("003/11/2025"), None);
    }
}
