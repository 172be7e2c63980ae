use agenda_core::{Occupancy, resolve, run_audit, verify_schedule};
use agenda_model::{
    AppointmentStatus, AuditConfig, ChangeReason, OverbookingEntry, RawBookingRecord,
};
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn record(id: u32, card: &str, maternity: &str, date_text: &str) -> RawBookingRecord {
    RawBookingRecord::new(id, format!("Paciente {id}"), card, maternity, date_text)
}

#[test]
fn duplicate_booking_moves_to_next_free_day() {
    let config = AuditConfig::default();
    let records = vec![
        record(1, "123", "Guarulhos", "03/11/2025"),
        record(2, "123", "Guarulhos", "03/11/2025"),
        record(3, "123", "Guarulhos", "04/11/2025"),
    ];
    let result = run_audit(&records, &config);

    let first = &result.appointments[0];
    assert_eq!(first.status, AppointmentStatus::Kept);
    assert_eq!(first.final_date, Some(date(2025, 11, 3)));

    // The card already holds 11-04, so the second booking lands on 11-05.
    let second = &result.appointments[1];
    assert_eq!(second.status, AppointmentStatus::Adjusted);
    assert_eq!(second.change_reason, ChangeReason::DuplicateRedistributed);
    assert_eq!(second.final_date, Some(date(2025, 11, 5)));

    assert_eq!(result.duplicate_groups.len(), 1);
    let group = &result.duplicate_groups[0];
    assert_eq!(group.card_id, "123");
    assert_eq!(group.name, "Paciente 1");
    assert_eq!(
        group.dates_before,
        vec![date(2025, 11, 3), date(2025, 11, 3), date(2025, 11, 4)]
    );
    assert_eq!(
        group.dates_after,
        vec![
            Some(date(2025, 11, 3)),
            Some(date(2025, 11, 5)),
            Some(date(2025, 11, 4))
        ]
    );
    assert!(verify_schedule(&result.appointments, &config).is_empty());
}

#[test]
fn empty_card_ids_are_never_duplicates() {
    let config = AuditConfig::default();
    let records = vec![
        record(1, "", "Guarulhos", "03/11/2025"),
        record(2, " ", "Guarulhos", "03/11/2025"),
    ];
    let result = run_audit(&records, &config);
    assert!(result.duplicate_groups.is_empty());
    assert_eq!(result.summary.kept, 2);
}

#[test]
fn overbooked_day_keeps_first_ids() {
    let config = AuditConfig::default();
    let records = vec![
        record(1, "1", "Guarulhos", "03/11/2025"),
        record(2, "2", "Guarulhos", "2025-11-03"),
        record(3, "3", "Guarulhos", "03/11/2025"),
    ];
    let result = run_audit(&records, &config);

    assert_eq!(
        result.overbooking,
        vec![OverbookingEntry {
            date: date(2025, 11, 3),
            maternity: "Guarulhos".to_string(),
            capacity: 2,
            total: 3,
            excess: 1,
        }]
    );
    assert_eq!(result.appointments[0].status, AppointmentStatus::Kept);
    assert_eq!(result.appointments[1].status, AppointmentStatus::Kept);
    let moved = &result.appointments[2];
    assert_eq!(moved.change_reason, ChangeReason::OverbookingResolved);
    assert_eq!(moved.final_date, Some(date(2025, 11, 4)));
    assert_eq!(
        result.summary.reason_count(ChangeReason::OverbookingResolved),
        1
    );
}

#[test]
fn saturday_without_capacity_moves_past_sunday() {
    let config = AuditConfig::default();
    // Salvalus takes no Saturday bookings; 11-08 is a Saturday.
    let result = run_audit(&[record(1, "1", "Salvalus", "08/11/2025")], &config);
    assert_eq!(result.overbooking.len(), 1);
    assert_eq!(result.overbooking[0].capacity, 0);
    assert_eq!(result.appointments[0].final_date, Some(date(2025, 11, 10)));
}

#[test]
fn sunday_booking_shifts_to_monday() {
    let config = AuditConfig::default();
    let result = run_audit(&[record(1, "1", "Notrecare", "09/11/2025")], &config);
    let appointment = &result.appointments[0];
    assert_eq!(appointment.final_date, Some(date(2025, 11, 10)));
    assert_eq!(appointment.change_reason, ChangeReason::SundayRemapped);
    assert_eq!(appointment.status, AppointmentStatus::Adjusted);
    assert_eq!(result.sunday_remaps.len(), 1);
    assert_eq!(result.sunday_remaps[0].original_date, date(2025, 11, 9));
    assert_eq!(result.sunday_remaps[0].adjusted_date, date(2025, 11, 10));
}

#[test]
fn remapped_sunday_booking_can_be_moved_again() {
    let config = AuditConfig::default();
    let records = vec![
        record(1, "1", "Guarulhos", "03/11/2025"),
        record(2, "2", "Guarulhos", "03/11/2025"),
        record(3, "3", "Guarulhos", "02/11/2025"),
    ];
    let result = run_audit(&records, &config);
    let moved = &result.appointments[2];
    assert_eq!(moved.final_date, Some(date(2025, 11, 4)));
    assert_eq!(moved.change_reason, ChangeReason::OverbookingResolved);
    // The remap stays in the log even though a later pass moved it.
    assert_eq!(result.sunday_remaps.len(), 1);
    assert_eq!(result.sunday_remaps[0].adjusted_date, date(2025, 11, 3));
}

#[test]
fn full_window_end_sends_excess_to_review() {
    let config = AuditConfig::default();
    // 12-31 is a Wednesday, the last day of the window.
    let records = vec![
        record(1, "1", "Guarulhos", "31/12/2025"),
        record(2, "2", "Guarulhos", "31/12/2025"),
        record(3, "3", "Guarulhos", "31/12/2025"),
    ];
    let result = run_audit(&records, &config);
    let parked = &result.appointments[2];
    assert_eq!(parked.status, AppointmentStatus::NeedsReview);
    assert_eq!(parked.change_reason, ChangeReason::NoSlotAvailable);
    assert_eq!(result.needs_review.len(), 1);
    assert_eq!(result.needs_review[0].internal_id, 3);
    assert!(result.has_pending_review());
    assert!(verify_schedule(&result.appointments, &config).is_empty());
}

#[test]
fn intake_failures_are_kept_for_review() {
    let config = AuditConfig::default();
    let records = vec![
        record(1, "1", "Santa Casa", "03/11/2025"),
        record(2, "2", "Guarulhos", "31/11/2025"),
        record(3, "3", "Guarulhos", "05/01/2026"),
        record(4, "4", "Guarulhos", "31/10/2025"),
    ];
    let result = run_audit(&records, &config);
    let reasons: Vec<ChangeReason> = result
        .appointments
        .iter()
        .map(|appointment| appointment.change_reason)
        .collect();
    assert_eq!(
        reasons,
        vec![
            ChangeReason::UnknownMaternity,
            ChangeReason::InvalidDate,
            ChangeReason::OutOfWindow,
            ChangeReason::OutOfWindow,
        ]
    );
    assert_eq!(result.summary.needs_review, 4);
    assert_eq!(result.summary.total, 4);
    assert_eq!(Occupancy::from_appointments(&result.appointments).total(), 0);
}

#[test]
fn resolving_twice_changes_nothing() {
    let config = AuditConfig::default();
    let records = vec![
        record(1, "1", "Guarulhos", "02/11/2025"),
        record(2, "1", "Guarulhos", "03/11/2025"),
        record(3, "2", "Guarulhos", "03/11/2025"),
        record(4, "3", "Cruzeiro", "03/11/2025"),
    ];
    let first = run_audit(&records, &config);
    let second = resolve(first.appointments.clone(), &config);
    assert_eq!(second.appointments, first.appointments);
    assert!(second.duplicate_groups.is_empty());
    assert!(second.sunday_remaps.is_empty());
    assert!(second.overbooking.is_empty());
}

#[test]
fn window_bounds_are_inclusive() {
    let config = AuditConfig::default();
    let records = vec![
        record(1, "1", "Notrecare", "01/11/2025"),
        record(2, "2", "Notrecare", "31/12/2025"),
        record(3, "3", "Notrecare", "31/10/2025"),
        record(4, "4", "Notrecare", "01/01/2026"),
    ];
    let result = run_audit(&records, &config);
    let statuses: Vec<AppointmentStatus> = result
        .appointments
        .iter()
        .map(|appointment| appointment.status)
        .collect();
    assert_eq!(
        statuses,
        vec![
            AppointmentStatus::Kept,
            AppointmentStatus::Kept,
            AppointmentStatus::NeedsReview,
            AppointmentStatus::NeedsReview,
        ]
    );
}
