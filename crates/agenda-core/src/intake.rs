//! Admission of raw records into working appointments.

use tracing::warn;

use agenda_model::{
    AppointmentStatus, AuditConfig, ChangeReason, RawBookingRecord, WorkingAppointment,
};
use agenda_normalization::{canonicalize_maternity, fix_mojibake, normalize_name, parse_booking_date};

use crate::occupancy::Occupancy;
use crate::pipeline::{ResolutionPass, ResolutionState};
use crate::window::is_in_window;

/// Builds the working appointment for one export line.
///
/// The record starts `kept` with `final_date` equal to the parsed date.
/// Nothing is rejected here; [`IntakePass`] decides what goes to review.
pub fn admit_record(record: &RawBookingRecord, config: &AuditConfig) -> WorkingAppointment {
    let original_name = fix_mojibake(record.name.trim());
    let maternity_text = fix_mojibake(record.maternity.trim());
    let maternity = canonicalize_maternity(&maternity_text, config);
    let original_date = parse_booking_date(&record.date_text);
    WorkingAppointment {
        internal_id: record.internal_id,
        card_id: record.card_id.trim().to_string(),
        normalized_name: normalize_name(&original_name),
        original_name,
        maternity_text,
        maternity,
        original_date_text: record.date_text.clone(),
        original_date,
        final_date: original_date,
        change_reason: ChangeReason::None,
        status: AppointmentStatus::Kept,
    }
}

pub fn admit_records(records: &[RawBookingRecord], config: &AuditConfig) -> Vec<WorkingAppointment> {
    records
        .iter()
        .map(|record| admit_record(record, config))
        .collect()
}

/// The intake reason that keeps `appointment` out of capacity accounting.
///
/// Checked in order: maternity, date, window.
pub fn intake_rejection(
    appointment: &WorkingAppointment,
    config: &AuditConfig,
) -> Option<ChangeReason> {
    if appointment.maternity.is_none() {
        return Some(ChangeReason::UnknownMaternity);
    }
    match appointment.final_date {
        None => Some(ChangeReason::InvalidDate),
        Some(date) if !is_in_window(&config.window, date) => Some(ChangeReason::OutOfWindow),
        Some(_) => None,
    }
}

/// Sends unplaceable records to review and recounts occupancy.
pub struct IntakePass;

impl ResolutionPass for IntakePass {
    fn run(&self, mut state: ResolutionState, config: &AuditConfig) -> ResolutionState {
        for appointment in state.appointments.iter_mut() {
            if appointment.needs_review() {
                continue;
            }
            if let Some(reason) = intake_rejection(appointment, config) {
                appointment.flag_for_review(reason);
                warn!(
                    internal_id = appointment.internal_id,
                    reason = %reason,
                    "appointment sent to review"
                );
            }
        }
        state.occupancy = Occupancy::from_appointments(&state.appointments);
        state
    }

    fn pass_name(&self) -> &str {
        "intake"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn admits_with_repaired_text() {
        let config = AuditConfig::default();
        let record = RawBookingRecord::new(7, " ConceiÃ§Ã£o ", " 42 ", "hospital guarulhos", "03/11/2025");
        let appointment = admit_record(&record, &config);
        assert_eq!(appointment.internal_id, 7);
        assert_eq!(appointment.original_name, "Conceição");
        assert_eq!(appointment.normalized_name, "CONCEICAO");
        assert_eq!(appointment.card_id, "42");
        assert_eq!(appointment.maternity.as_deref(), Some("Guarulhos"));
        assert_eq!(appointment.final_date, NaiveDate::from_ymd_opt(2025, 11, 3));
        assert_eq!(appointment.status, AppointmentStatus::Kept);
    }

    #[test]
    fn rejection_reasons_follow_check_order() {
        let config = AuditConfig::default();
        let unknown = admit_record(&RawBookingRecord::new(1, "A", "1", "Santa Casa", "xx"), &config);
        assert_eq!(intake_rejection(&unknown, &config), Some(ChangeReason::UnknownMaternity));

        let bad_date = admit_record(&RawBookingRecord::new(2, "A", "1", "Salvalus", "xx"), &config);
        assert_eq!(intake_rejection(&bad_date, &config), Some(ChangeReason::InvalidDate));

        let outside = admit_record(
            &RawBookingRecord::new(3, "A", "1", "Salvalus", "15/01/2026"),
            &config,
        );
        assert_eq!(intake_rejection(&outside, &config), Some(ChangeReason::OutOfWindow));
    }
}
