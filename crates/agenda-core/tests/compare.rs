use agenda_core::{compare_with_calendar, run_audit};
use agenda_model::{AuditConfig, CalendarEntry, ComparisonOutcome, RawBookingRecord};
use chrono::NaiveDate;

fn entry(id: u32, day: u32, name: &str) -> CalendarEntry {
    CalendarEntry {
        internal_id: id,
        day,
        month: 11,
        year: 2025,
        maternity: "Guarulhos".to_string(),
        patient_name: name.to_string(),
    }
}

#[test]
fn classifies_each_calendar_line() {
    let config = AuditConfig::default();
    let records = vec![
        RawBookingRecord::new(1, "Maria Conceição", "1", "Guarulhos", "03/11/2025"),
        RawBookingRecord::new(2, "Ana Souza", "2", "Guarulhos", "04/11/2025"),
        RawBookingRecord::new(3, "Julia Lima", "3", "Guarulhos", "05/11/2025"),
        RawBookingRecord::new(4, "Rita Alves", "4", "Notrecare", "05/11/2025"),
    ];
    let result = run_audit(&records, &config);
    let entries = vec![
        entry(1, 3, "MARIA CONCEICAO"),
        entry(2, 6, "ana souza"),
        entry(3, 7, "BEATRIZ"),
    ];
    let rows = compare_with_calendar(&result.appointments, &entries, "Guarulhos", 11, 2025);

    let outcomes: Vec<ComparisonOutcome> = rows.iter().map(|row| row.outcome).collect();
    assert_eq!(
        outcomes,
        vec![
            ComparisonOutcome::Match,
            ComparisonOutcome::DateMismatch,
            ComparisonOutcome::MissingInAgenda,
            ComparisonOutcome::MissingInCalendar,
        ]
    );
    assert_eq!(rows[1].agenda_date, NaiveDate::from_ymd_opt(2025, 11, 4));
    assert_eq!(rows[1].calendar_date, NaiveDate::from_ymd_opt(2025, 11, 6));
    assert_eq!(rows[3].name, "Julia Lima");
    assert!(rows.iter().all(|row| row.maternity == "Guarulhos"));
}

#[test]
fn exact_day_wins_over_earlier_same_name_booking() {
    let config = AuditConfig::default();
    let records = vec![
        RawBookingRecord::new(1, "Ana", "1", "Guarulhos", "03/11/2025"),
        RawBookingRecord::new(2, "Ana", "2", "Guarulhos", "10/11/2025"),
    ];
    let result = run_audit(&records, &config);
    let entries = vec![entry(1, 3, "ANA"), entry(2, 10, "ANA")];
    let rows = compare_with_calendar(&result.appointments, &entries, "Guarulhos", 11, 2025);
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|row| row.outcome == ComparisonOutcome::Match));
}

#[test]
fn bookings_outside_the_month_are_not_missing() {
    let config = AuditConfig::default();
    let records = vec![RawBookingRecord::new(1, "Ana", "1", "Guarulhos", "03/12/2025")];
    let result = run_audit(&records, &config);
    let rows = compare_with_calendar(&result.appointments, &[], "Guarulhos", 11, 2025);
    assert!(rows.is_empty());
}
