//! Read-only cross-check of the schedule against a maternity's own calendar.

use chrono::{Datelike, NaiveDate};

use agenda_model::{CalendarEntry, ComparisonOutcome, ComparisonRow, WorkingAppointment};
use agenda_normalization::normalize_name;

/// Matches calendar lines to active appointments of `maternity`.
///
/// A calendar line first looks for a booking with the same normalized name on
/// the same day, then for one with the same name on any day. Each booking is
/// matched at most once. Bookings of `maternity` in `month`/`year` that no
/// calendar line claimed are reported as missing from the calendar.
///
/// Rows follow calendar order, then the unclaimed bookings by `internal_id`.
pub fn compare_with_calendar(
    appointments: &[WorkingAppointment],
    entries: &[CalendarEntry],
    maternity: &str,
    month: u32,
    year: i32,
) -> Vec<ComparisonRow> {
    let candidates: Vec<(&WorkingAppointment, NaiveDate)> = appointments
        .iter()
        .filter_map(|appointment| match appointment.slot() {
            Some((booked_at, date)) if booked_at == maternity => Some((appointment, date)),
            _ => None,
        })
        .collect();
    let mut claimed = vec![false; candidates.len()];
    let names: Vec<String> = entries
        .iter()
        .map(|entry| normalize_name(&entry.patient_name))
        .collect();
    let mut outcomes: Vec<Option<(ComparisonOutcome, Option<NaiveDate>)>> =
        vec![None; entries.len()];

    for ((entry, name), outcome) in entries.iter().zip(&names).zip(outcomes.iter_mut()) {
        let Some(calendar_date) = entry.date() else {
            continue;
        };
        let found = candidates
            .iter()
            .zip(&claimed)
            .position(|((appointment, date), taken)| {
                !taken && appointment.normalized_name == *name && *date == calendar_date
            });
        if let Some(index) = found {
            claimed[index] = true;
            *outcome = Some((ComparisonOutcome::Match, Some(calendar_date)));
        }
    }

    for (name, outcome) in names.iter().zip(outcomes.iter_mut()) {
        if outcome.is_some() {
            continue;
        }
        let found = candidates
            .iter()
            .zip(&claimed)
            .position(|((appointment, _), taken)| !taken && appointment.normalized_name == *name);
        *outcome = Some(match found {
            Some(index) => {
                claimed[index] = true;
                (ComparisonOutcome::DateMismatch, Some(candidates[index].1))
            }
            None => (ComparisonOutcome::MissingInAgenda, None),
        });
    }

    let mut rows: Vec<ComparisonRow> = entries
        .iter()
        .zip(outcomes)
        .map(|(entry, outcome)| {
            let (outcome, agenda_date) =
                outcome.unwrap_or((ComparisonOutcome::MissingInAgenda, None));
            ComparisonRow {
                name: entry.patient_name.clone(),
                maternity: maternity.to_string(),
                calendar_date: entry.date(),
                agenda_date,
                outcome,
            }
        })
        .collect();

    for (index, (appointment, date)) in candidates.iter().enumerate() {
        if claimed[index] || date.month() != month || date.year() != year {
            continue;
        }
        rows.push(ComparisonRow {
            name: appointment.original_name.clone(),
            maternity: maternity.to_string(),
            calendar_date: None,
            agenda_date: Some(*date),
            outcome: ComparisonOutcome::MissingInCalendar,
        });
    }
    rows
}
