//! Capacity model.

use chrono::{Datelike, NaiveDate, Weekday};

use agenda_model::AuditConfig;

/// Returns true when `date` falls on the weekday no maternity works.
pub fn is_zero_capacity_day(date: NaiveDate, config: &AuditConfig) -> bool {
    date.weekday() == config.zero_capacity_weekday
}

/// Allowed bookings for `maternity` on `date`.
///
/// The zero-capacity weekday is 0 for every maternity. A name missing from
/// the table is also 0, never unbounded.
pub fn capacity_for(config: &AuditConfig, maternity: &str, date: NaiveDate) -> u32 {
    if is_zero_capacity_day(date, config) {
        return 0;
    }
    let Some(entry) = config.maternity(maternity) else {
        return 0;
    };
    match date.weekday() {
        Weekday::Sat | Weekday::Sun => entry.saturday,
        _ => entry.weekday,
    }
}
