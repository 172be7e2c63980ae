use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::appointment::{AppointmentStatus, ChangeReason, WorkingAppointment};

/// All bookings of one card that the duplicate pass had to touch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateGroup {
    pub card_id: String,
    /// Name of the first-seen booking of the card.
    pub name: String,
    /// Dates of every booking of the card before the pass, in id order.
    pub dates_before: Vec<NaiveDate>,
    /// Dates after the pass, same order. `None` marks a booking left for review.
    pub dates_after: Vec<Option<NaiveDate>>,
}

/// A booking shifted off the zero-capacity weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SundayRemap {
    pub internal_id: u32,
    pub name: String,
    pub original_date: NaiveDate,
    pub adjusted_date: NaiveDate,
}

/// A `(date, maternity)` pair that held more bookings than its capacity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverbookingEntry {
    pub date: NaiveDate,
    pub maternity: String,
    pub capacity: u32,
    pub total: u32,
    pub excess: u32,
}

/// Counters over the final appointment list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditSummary {
    pub total: usize,
    pub kept: usize,
    pub adjusted: usize,
    pub needs_review: usize,
    pub by_reason: BTreeMap<ChangeReason, usize>,
}

impl AuditSummary {
    pub fn from_appointments(appointments: &[WorkingAppointment]) -> Self {
        let mut summary = AuditSummary {
            total: appointments.len(),
            ..AuditSummary::default()
        };
        for appointment in appointments {
            match appointment.status {
                AppointmentStatus::Kept => summary.kept += 1,
                AppointmentStatus::Adjusted => summary.adjusted += 1,
                AppointmentStatus::NeedsReview => summary.needs_review += 1,
            }
            if appointment.change_reason != ChangeReason::None {
                *summary
                    .by_reason
                    .entry(appointment.change_reason)
                    .or_insert(0) += 1;
            }
        }
        summary
    }

    pub fn reason_count(&self, reason: ChangeReason) -> usize {
        self.by_reason.get(&reason).copied().unwrap_or(0)
    }
}

/// Everything one audit run produces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingResult {
    pub appointments: Vec<WorkingAppointment>,
    pub duplicate_groups: Vec<DuplicateGroup>,
    pub sunday_remaps: Vec<SundayRemap>,
    pub overbooking: Vec<OverbookingEntry>,
    pub needs_review: Vec<WorkingAppointment>,
    pub summary: AuditSummary,
}

impl ProcessingResult {
    pub fn has_pending_review(&self) -> bool {
        !self.needs_review.is_empty()
    }
}

/// How a calendar line relates to the working schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonOutcome {
    Match,
    DateMismatch,
    MissingInAgenda,
    MissingInCalendar,
}

impl ComparisonOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonOutcome::Match => "match",
            ComparisonOutcome::DateMismatch => "date_mismatch",
            ComparisonOutcome::MissingInAgenda => "missing_in_agenda",
            ComparisonOutcome::MissingInCalendar => "missing_in_calendar",
        }
    }
}

/// One row of the calendar cross-check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub name: String,
    pub maternity: String,
    pub calendar_date: Option<NaiveDate>,
    pub agenda_date: Option<NaiveDate>,
    pub outcome: ComparisonOutcome,
}
