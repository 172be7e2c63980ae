//! Over-capacity resolution.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use agenda_model::{AuditConfig, ChangeReason, OverbookingEntry, WorkingAppointment};

use crate::capacity::capacity_for;
use crate::occupancy::identity_key;
use crate::pipeline::{ResolutionPass, ResolutionState};

/// Indices of active appointments grouped by `(date, maternity)`.
fn slots_by_day(appointments: &[WorkingAppointment]) -> BTreeMap<(NaiveDate, String), Vec<usize>> {
    let mut slots: BTreeMap<(NaiveDate, String), Vec<usize>> = BTreeMap::new();
    for (index, appointment) in appointments.iter().enumerate() {
        if let Some((maternity, date)) = appointment.slot() {
            slots
                .entry((date, maternity.to_string()))
                .or_default()
                .push(index);
        }
    }
    slots
}

/// Keeps the first `capacity` bookings of each full slot and moves the rest
/// to the next day with room.
///
/// Slots are visited in date then maternity order. A slot that starts within
/// capacity never receives more than it can hold, so one sweep suffices.
pub struct OverbookingPass;

impl ResolutionPass for OverbookingPass {
    fn run(&self, mut state: ResolutionState, config: &AuditConfig) -> ResolutionState {
        for ((date, maternity), members) in slots_by_day(&state.appointments) {
            let capacity = capacity_for(config, &maternity, date);
            let total = members.len() as u32;
            if total <= capacity {
                continue;
            }
            let excess = total - capacity;
            info!(
                date = %date,
                maternity = %maternity,
                capacity,
                total,
                excess,
                "overbooked slot"
            );
            state.overbooking.push(OverbookingEntry {
                date,
                maternity: maternity.clone(),
                capacity,
                total,
                excess,
            });

            for &index in members.iter().skip(capacity as usize) {
                let appointment = &mut state.appointments[index];
                let key = identity_key(&appointment.card_id);
                state.occupancy.release(appointment);
                match state
                    .occupancy
                    .find_free_date(config, &maternity, key.as_deref(), date)
                {
                    Some(target) => {
                        appointment.relocate(target, ChangeReason::OverbookingResolved);
                        state.occupancy.book(appointment);
                        debug!(
                            internal_id = appointment.internal_id,
                            maternity = %maternity,
                            from = %date,
                            to = %target,
                            "overbooking resolved"
                        );
                    }
                    None => {
                        appointment.flag_for_review(ChangeReason::NoSlotAvailable);
                        warn!(
                            internal_id = appointment.internal_id,
                            reason = %ChangeReason::NoSlotAvailable,
                            "appointment sent to review"
                        );
                    }
                }
            }
        }
        state
    }

    fn pass_name(&self) -> &str {
        "overbooking"
    }
}
