//! Same-card duplicate resolution.
//!
//! A card may hold several bookings, but never two at the same maternity on
//! the same day. The first booking by `internal_id` keeps the slot; every
//! later one is moved forward to the first day with room.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use agenda_model::{AuditConfig, ChangeReason, DuplicateGroup, WorkingAppointment};

use crate::occupancy::identity_key;
use crate::pipeline::{ResolutionPass, ResolutionState};

/// Indices of active appointments grouped by `(card, maternity, date)`.
///
/// Appointments without a card id are left out.
fn slots_by_card(
    appointments: &[WorkingAppointment],
) -> BTreeMap<(String, String, NaiveDate), Vec<usize>> {
    let mut slots: BTreeMap<(String, String, NaiveDate), Vec<usize>> = BTreeMap::new();
    for (index, appointment) in appointments.iter().enumerate() {
        let (Some((maternity, date)), Some(key)) =
            (appointment.slot(), identity_key(&appointment.card_id))
        else {
            continue;
        };
        slots
            .entry((key, maternity.to_string(), date))
            .or_default()
            .push(index);
    }
    slots
}

/// Indices of every active booking per card, for the cards in `keys`.
fn bookings_by_card(
    appointments: &[WorkingAppointment],
    keys: &[String],
) -> BTreeMap<String, Vec<usize>> {
    let mut bookings: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    for (index, appointment) in appointments.iter().enumerate() {
        if !appointment.is_active() {
            continue;
        }
        if let Some(key) = identity_key(&appointment.card_id)
            && keys.contains(&key)
        {
            bookings.entry(key).or_default().push(index);
        }
    }
    bookings
}

pub struct DuplicatePass;

impl ResolutionPass for DuplicatePass {
    fn run(&self, mut state: ResolutionState, config: &AuditConfig) -> ResolutionState {
        let slots = slots_by_card(&state.appointments);
        let mut keys: Vec<String> = Vec::new();
        let mut displaced: Vec<usize> = Vec::new();
        for ((key, _, _), members) in &slots {
            if members.len() > 1 {
                displaced.extend_from_slice(&members[1..]);
                if !keys.contains(key) {
                    keys.push(key.clone());
                }
            }
        }
        if displaced.is_empty() {
            return state;
        }
        // Appointments are sorted by id, so index order is id order.
        displaced.sort_unstable();

        let groups = bookings_by_card(&state.appointments, &keys);
        let dates_before: BTreeMap<&String, Vec<NaiveDate>> = groups
            .iter()
            .map(|(key, members)| {
                let dates = members
                    .iter()
                    .filter_map(|&index| state.appointments[index].final_date)
                    .collect();
                (key, dates)
            })
            .collect();

        for index in displaced {
            let appointment = &mut state.appointments[index];
            let Some((maternity, date)) = appointment
                .slot()
                .map(|(maternity, date)| (maternity.to_string(), date))
            else {
                continue;
            };
            let key = identity_key(&appointment.card_id);
            state.occupancy.release(appointment);
            match state
                .occupancy
                .find_free_date(config, &maternity, key.as_deref(), date)
            {
                Some(target) => {
                    appointment.relocate(target, ChangeReason::DuplicateRedistributed);
                    state.occupancy.book(appointment);
                    debug!(
                        internal_id = appointment.internal_id,
                        maternity = %maternity,
                        from = %date,
                        to = %target,
                        "duplicate redistributed"
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

        for (key, members) in &groups {
            let first = &state.appointments[members[0]];
            let before = dates_before.get(key).cloned().unwrap_or_default();
            let after: Vec<Option<NaiveDate>> = members
                .iter()
                .map(|&index| state.appointments[index].slot().map(|(_, date)| date))
                .collect();
            info!(
                first_id = first.internal_id,
                bookings = members.len(),
                dates_before = ?before,
                dates_after = ?after,
                "duplicate group resolved"
            );
            state.duplicate_groups.push(DuplicateGroup {
                card_id: first.card_id.clone(),
                name: first.original_name.clone(),
                dates_before: before,
                dates_after: after,
            });
        }
        state
    }

    fn pass_name(&self) -> &str {
        "duplicates"
    }
}
