//! Raw inputs produced by the record parsers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of the bank export, already split into its four cells.
///
/// Nothing here is validated yet: the maternity is free text and the date is
/// whatever the export contained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawBookingRecord {
    /// Position in the input, starting at 1. Earlier records win every tie.
    pub internal_id: u32,
    pub name: String,
    /// Health-plan card number ("carteirinha"). May be empty.
    pub card_id: String,
    pub maternity: String,
    pub date_text: String,
}

impl RawBookingRecord {
    pub fn new(
        internal_id: u32,
        name: impl Into<String>,
        card_id: impl Into<String>,
        maternity: impl Into<String>,
        date_text: impl Into<String>,
    ) -> Self {
        Self {
            internal_id,
            name: name.into(),
            card_id: card_id.into(),
            maternity: maternity.into(),
            date_text: date_text.into(),
        }
    }
}

/// A patient line taken from a per-maternity calendar listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEntry {
    pub internal_id: u32,
    pub day: u32,
    pub month: u32,
    pub year: i32,
    pub maternity: String,
    pub patient_name: String,
}

impl CalendarEntry {
    /// The calendar date, when the day exists in that month.
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}
