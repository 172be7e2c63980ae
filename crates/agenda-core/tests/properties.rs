use std::collections::BTreeSet;

use agenda_core::{resolve, run_audit, verify_schedule};
use agenda_model::{AuditConfig, RawBookingRecord};
use chrono::{Days, NaiveDate};
use proptest::prelude::*;

const MATERNITIES: [&str; 6] = [
    "Guarulhos",
    "Cruzeiro",
    "Notre Care",
    "Salvalus",
    "Hospital Guarulhos",
    "Santa Casa",
];
const CARDS: [&str; 5] = ["", "100", "200", "300", "400"];

/// Dates from late October into early January so every window edge is hit.
fn date_text(offset: u64) -> String {
    let base = NaiveDate::from_ymd_opt(2025, 10, 25).unwrap();
    if offset == 80 {
        return "sem data".to_string();
    }
    let date = base.checked_add_days(Days::new(offset)).unwrap();
    if offset % 2 == 0 {
        date.format("%d/%m/%Y").to_string()
    } else {
        date.format("%Y-%m-%d").to_string()
    }
}

fn records_strategy() -> impl Strategy<Value = Vec<RawBookingRecord>> {
    prop::collection::vec((0..CARDS.len(), 0..MATERNITIES.len(), 0u64..=80), 0..60).prop_map(
        |rows| {
            rows.into_iter()
                .enumerate()
                .map(|(index, (card, maternity, offset))| {
                    let id = index as u32 + 1;
                    RawBookingRecord::new(
                        id,
                        format!("Paciente {id}"),
                        CARDS[card],
                        MATERNITIES[maternity],
                        date_text(offset),
                    )
                })
                .collect()
        },
    )
}

proptest! {
    #[test]
    fn final_schedule_respects_every_rule(records in records_strategy()) {
        let config = AuditConfig::default();
        let result = run_audit(&records, &config);
        let violations = verify_schedule(&result.appointments, &config);
        prop_assert!(violations.is_empty(), "violations: {:?}", violations);
    }

    #[test]
    fn no_record_is_lost(records in records_strategy()) {
        let result = run_audit(&records, &AuditConfig::default());
        prop_assert_eq!(result.appointments.len(), records.len());
        let ids: BTreeSet<u32> = result.appointments.iter().map(|a| a.internal_id).collect();
        let expected: BTreeSet<u32> = records.iter().map(|r| r.internal_id).collect();
        prop_assert_eq!(ids, expected);
        prop_assert_eq!(
            result.summary.kept + result.summary.adjusted + result.summary.needs_review,
            records.len()
        );
        prop_assert_eq!(result.needs_review.len(), result.summary.needs_review);
    }

    #[test]
    fn resolution_is_idempotent(records in records_strategy()) {
        let config = AuditConfig::default();
        let first = run_audit(&records, &config);
        let second = resolve(first.appointments.clone(), &config);
        prop_assert_eq!(second.appointments, first.appointments);
    }
}
