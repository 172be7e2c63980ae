//! Audit window validation.

use chrono::NaiveDate;

use agenda_model::AuditWindow;

/// Closed-interval membership at day granularity: both bounds are inside.
pub fn is_in_window(window: &AuditWindow, date: NaiveDate) -> bool {
    window.start <= date && date <= window.end
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn bounds_are_inclusive() {
        let window = AuditWindow::new(date(2025, 11, 1), date(2025, 12, 31));
        assert!(is_in_window(&window, date(2025, 11, 1)));
        assert!(is_in_window(&window, date(2025, 12, 31)));
        assert!(!is_in_window(&window, date(2025, 10, 31)));
        assert!(!is_in_window(&window, date(2026, 1, 1)));
    }
}
