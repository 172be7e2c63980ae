//! The working appointment and its audit codes.
//!
//! Reason and status codes are rendered in snake case in every report, so the
//! string forms below are part of the output contract.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Why an appointment differs from what the export requested.
///
/// When several passes move the same record, the reason reflects the last one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeReason {
    /// Untouched.
    #[default]
    None,
    /// Booked on the zero-capacity weekday and shifted to the adjacent day.
    SundayRemapped,
    /// Second or later booking of the same card on the same day and maternity.
    DuplicateRedistributed,
    /// Excess booking moved off a day that was over capacity.
    OverbookingResolved,
    /// No date with free capacity remained inside the audit window.
    NoSlotAvailable,
    /// The maternity text matched no known maternity.
    UnknownMaternity,
    /// The date text could not be parsed.
    InvalidDate,
    /// The requested date lies outside the audit window.
    OutOfWindow,
}

impl ChangeReason {
    pub const ALL: [ChangeReason; 8] = [
        ChangeReason::None,
        ChangeReason::SundayRemapped,
        ChangeReason::DuplicateRedistributed,
        ChangeReason::OverbookingResolved,
        ChangeReason::NoSlotAvailable,
        ChangeReason::UnknownMaternity,
        ChangeReason::InvalidDate,
        ChangeReason::OutOfWindow,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeReason::None => "none",
            ChangeReason::SundayRemapped => "sunday_remapped",
            ChangeReason::DuplicateRedistributed => "duplicate_redistributed",
            ChangeReason::OverbookingResolved => "overbooking_resolved",
            ChangeReason::NoSlotAvailable => "no_slot_available",
            ChangeReason::UnknownMaternity => "unknown_maternity",
            ChangeReason::InvalidDate => "invalid_date",
            ChangeReason::OutOfWindow => "out_of_window",
        }
    }
}

impl fmt::Display for ChangeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ChangeReason {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        ChangeReason::ALL
            .iter()
            .copied()
            .find(|reason| reason.as_str() == normalized)
            .ok_or_else(|| format!("Unknown change reason: {s}"))
    }
}

/// Lifecycle state of a working appointment.
///
/// `Kept` is the initial state. `Adjusted` and `NeedsReview` are terminal with
/// respect to status, although an adjusted record may still be moved again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    #[default]
    Kept,
    Adjusted,
    NeedsReview,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Kept => "kept",
            AppointmentStatus::Adjusted => "adjusted",
            AppointmentStatus::NeedsReview => "needs_review",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "kept" => Ok(AppointmentStatus::Kept),
            "adjusted" => Ok(AppointmentStatus::Adjusted),
            "needs_review" => Ok(AppointmentStatus::NeedsReview),
            _ => Err(format!("Unknown appointment status: {s}")),
        }
    }
}

/// A booking under resolution.
///
/// Only `final_date`, `change_reason` and `status` change once the record has
/// been admitted; every other field mirrors the export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingAppointment {
    pub internal_id: u32,
    pub card_id: String,
    pub original_name: String,
    /// Diacritic-free, upper-cased comparison key.
    pub normalized_name: String,
    /// Maternity text as received, after mojibake repair.
    pub maternity_text: String,
    /// Canonical maternity name. `None` when the text matched nothing.
    pub maternity: Option<String>,
    pub original_date_text: String,
    pub original_date: Option<NaiveDate>,
    pub final_date: Option<NaiveDate>,
    pub change_reason: ChangeReason,
    pub status: AppointmentStatus,
}

impl WorkingAppointment {
    /// Returns true when the record takes part in capacity accounting.
    pub fn is_active(&self) -> bool {
        self.status != AppointmentStatus::NeedsReview
            && self.maternity.is_some()
            && self.final_date.is_some()
    }

    /// The `(maternity, date)` pair the record occupies, if it is active.
    pub fn slot(&self) -> Option<(&str, NaiveDate)> {
        if self.status == AppointmentStatus::NeedsReview {
            return None;
        }
        Some((self.maternity.as_deref()?, self.final_date?))
    }

    pub fn needs_review(&self) -> bool {
        self.status == AppointmentStatus::NeedsReview
    }

    /// Moves the record to `date`, recording why.
    pub fn relocate(&mut self, date: NaiveDate, reason: ChangeReason) {
        self.final_date = Some(date);
        self.change_reason = reason;
        self.status = AppointmentStatus::Adjusted;
    }

    /// Parks the record for manual placement. The final date is left as is.
    pub fn flag_for_review(&mut self, reason: ChangeReason) {
        self.change_reason = reason;
        self.status = AppointmentStatus::NeedsReview;
    }
}
