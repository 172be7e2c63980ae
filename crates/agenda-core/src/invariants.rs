//! Post-resolution schedule checks.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;

use agenda_model::{AuditConfig, WorkingAppointment};

use crate::capacity::{capacity_for, is_zero_capacity_day};
use crate::occupancy::identity_key;
use crate::window::is_in_window;

/// A rule broken by the final schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleViolation {
    OutsideWindow {
        internal_id: u32,
        date: NaiveDate,
    },
    ZeroCapacityDay {
        internal_id: u32,
        date: NaiveDate,
    },
    OverCapacity {
        maternity: String,
        date: NaiveDate,
        capacity: u32,
        count: u32,
    },
    DuplicateCard {
        internal_ids: Vec<u32>,
        maternity: String,
        date: NaiveDate,
    },
}

impl fmt::Display for ScheduleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleViolation::OutsideWindow { internal_id, date } => {
                write!(f, "appointment {internal_id} on {date} is outside the audit window")
            }
            ScheduleViolation::ZeroCapacityDay { internal_id, date } => {
                write!(f, "appointment {internal_id} on {date} falls on the zero-capacity day")
            }
            ScheduleViolation::OverCapacity {
                maternity,
                date,
                capacity,
                count,
            } => write!(
                f,
                "{maternity} on {date} holds {count} bookings for capacity {capacity}"
            ),
            ScheduleViolation::DuplicateCard {
                internal_ids,
                maternity,
                date,
            } => write!(
                f,
                "appointments {internal_ids:?} share a card at {maternity} on {date}"
            ),
        }
    }
}

/// Checks every active appointment against the schedule rules.
///
/// Records in review are ignored. An empty result means the schedule is
/// consistent.
pub fn verify_schedule(
    appointments: &[WorkingAppointment],
    config: &AuditConfig,
) -> Vec<ScheduleViolation> {
    let mut violations = Vec::new();
    let mut per_slot: BTreeMap<(String, NaiveDate), u32> = BTreeMap::new();
    let mut per_card: BTreeMap<(String, String, NaiveDate), Vec<u32>> = BTreeMap::new();

    for appointment in appointments {
        let Some((maternity, date)) = appointment.slot() else {
            continue;
        };
        let internal_id = appointment.internal_id;
        if !is_in_window(&config.window, date) {
            violations.push(ScheduleViolation::OutsideWindow { internal_id, date });
        }
        if is_zero_capacity_day(date, config) {
            violations.push(ScheduleViolation::ZeroCapacityDay { internal_id, date });
        }
        *per_slot.entry((maternity.to_string(), date)).or_insert(0) += 1;
        if let Some(key) = identity_key(&appointment.card_id) {
            per_card
                .entry((key, maternity.to_string(), date))
                .or_default()
                .push(internal_id);
        }
    }

    for ((maternity, date), count) in per_slot {
        let capacity = capacity_for(config, &maternity, date);
        if count > capacity {
            violations.push(ScheduleViolation::OverCapacity {
                maternity,
                date,
                capacity,
                count,
            });
        }
    }
    for ((_, maternity, date), internal_ids) in per_card {
        if internal_ids.len() > 1 {
            violations.push(ScheduleViolation::DuplicateCard {
                internal_ids,
                maternity,
                date,
            });
        }
    }
    violations
}
