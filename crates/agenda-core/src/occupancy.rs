//! Live `(maternity, date)` booking counts threaded between passes.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};

use agenda_model::{AuditConfig, WorkingAppointment};

use crate::capacity::{capacity_for, is_zero_capacity_day};

/// Comparison key for a card id: whitespace removed, upper-cased.
///
/// Returns `None` for blank ids, which never identify a patient.
pub fn identity_key(card_id: &str) -> Option<String> {
    let key: String = card_id
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect();
    if key.is_empty() { None } else { Some(key) }
}

/// Booking counts of active appointments.
///
/// Besides the per-slot totals it indexes which card holds which slot, so the
/// day scan can refuse to put a patient twice on the same day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Occupancy {
    counts: BTreeMap<(String, NaiveDate), u32>,
    cards: BTreeMap<(String, String, NaiveDate), u32>,
}

impl Occupancy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts every active appointment.
    pub fn from_appointments(appointments: &[WorkingAppointment]) -> Self {
        let mut occupancy = Self::new();
        for appointment in appointments {
            occupancy.book(appointment);
        }
        occupancy
    }

    pub fn count(&self, maternity: &str, date: NaiveDate) -> u32 {
        self.counts
            .get(&(maternity.to_string(), date))
            .copied()
            .unwrap_or(0)
    }

    /// Returns true when the card already holds `(maternity, date)`.
    pub fn card_booked(&self, card_key: &str, maternity: &str, date: NaiveDate) -> bool {
        self.cards
            .contains_key(&(card_key.to_string(), maternity.to_string(), date))
    }

    /// Adds the appointment's slot. Inactive appointments are ignored.
    pub fn book(&mut self, appointment: &WorkingAppointment) {
        let Some((maternity, date)) = appointment.slot() else {
            return;
        };
        *self.counts.entry((maternity.to_string(), date)).or_insert(0) += 1;
        if let Some(key) = identity_key(&appointment.card_id) {
            *self
                .cards
                .entry((key, maternity.to_string(), date))
                .or_insert(0) += 1;
        }
    }

    /// Removes the appointment's slot. Call before the appointment changes.
    pub fn release(&mut self, appointment: &WorkingAppointment) {
        let Some((maternity, date)) = appointment.slot() else {
            return;
        };
        decrement(&mut self.counts, (maternity.to_string(), date));
        if let Some(key) = identity_key(&appointment.card_id) {
            decrement(&mut self.cards, (key, maternity.to_string(), date));
        }
    }

    /// Slots with at least one booking, in maternity then date order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, NaiveDate, u32)> + '_ {
        self.counts
            .iter()
            .map(|((maternity, date), count)| (maternity.as_str(), *date, *count))
    }

    /// Total number of booked slots.
    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    /// First date after `after` and inside the window where `maternity` has a
    /// free place and `card_key` (when given) is not already booked there.
    ///
    /// The zero-capacity weekday is never returned.
    pub fn find_free_date(
        &self,
        config: &AuditConfig,
        maternity: &str,
        card_key: Option<&str>,
        after: NaiveDate,
    ) -> Option<NaiveDate> {
        let mut candidate = after.checked_add_days(Days::new(1))?;
        if candidate < config.window.start {
            candidate = config.window.start;
        }
        while candidate <= config.window.end {
            if !is_zero_capacity_day(candidate, config)
                && self.count(maternity, candidate) < capacity_for(config, maternity, candidate)
                && !card_key.is_some_and(|key| self.card_booked(key, maternity, candidate))
            {
                return Some(candidate);
            }
            candidate = candidate.checked_add_days(Days::new(1))?;
        }
        None
    }
}

fn decrement<K: Ord>(map: &mut BTreeMap<K, u32>, key: K) {
    if let Some(count) = map.get_mut(&key) {
        *count = count.saturating_sub(1);
        if *count == 0 {
            map.remove(&key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agenda_model::{AppointmentStatus, ChangeReason};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn appointment(id: u32, card: &str, maternity: &str, day: NaiveDate) -> WorkingAppointment {
        WorkingAppointment {
            internal_id: id,
            card_id: card.to_string(),
            original_name: format!("PACIENTE {id}"),
            normalized_name: format!("PACIENTE {id}"),
            maternity_text: maternity.to_string(),
            maternity: Some(maternity.to_string()),
            original_date_text: day.to_string(),
            original_date: Some(day),
            final_date: Some(day),
            change_reason: ChangeReason::None,
            status: AppointmentStatus::Kept,
        }
    }

    #[test]
    fn identity_key_ignores_case_and_spaces() {
        assert_eq!(identity_key(" ab 12 ").as_deref(), Some("AB12"));
        assert_eq!(identity_key("   "), None);
    }

    #[test]
    fn book_and_release_track_cards() {
        let monday = date(2025, 11, 3);
        let first = appointment(1, "123", "Guarulhos", monday);
        let second = appointment(2, "", "Guarulhos", monday);
        let mut occupancy = Occupancy::from_appointments(&[first.clone(), second]);
        assert_eq!(occupancy.count("Guarulhos", monday), 2);
        assert!(occupancy.card_booked("123", "Guarulhos", monday));

        occupancy.release(&first);
        assert_eq!(occupancy.count("Guarulhos", monday), 1);
        assert!(!occupancy.card_booked("123", "Guarulhos", monday));
        assert_eq!(occupancy.total(), 1);
    }

    #[test]
    fn reviewed_appointments_are_not_counted() {
        let mut reviewed = appointment(1, "123", "Guarulhos", date(2025, 11, 3));
        reviewed.flag_for_review(ChangeReason::NoSlotAvailable);
        assert_eq!(Occupancy::from_appointments(&[reviewed]).total(), 0);
    }

    #[test]
    fn scan_skips_full_days_and_sundays() {
        let config = AuditConfig::default();
        // Saturday 2025-11-08 holds one Guarulhos booking, its capacity.
        let saturday = date(2025, 11, 8);
        let occupancy =
            Occupancy::from_appointments(&[appointment(1, "9", "Guarulhos", saturday)]);
        let found = occupancy.find_free_date(&config, "Guarulhos", None, date(2025, 11, 7));
        assert_eq!(found, Some(date(2025, 11, 10)));
    }

    #[test]
    fn scan_refuses_days_the_card_holds() {
        let config = AuditConfig::default();
        let monday = date(2025, 11, 3);
        let tuesday = date(2025, 11, 4);
        let occupancy =
            Occupancy::from_appointments(&[appointment(1, "123", "Notrecare", tuesday)]);
        let found = occupancy.find_free_date(&config, "Notrecare", Some("123"), monday);
        assert_eq!(found, Some(date(2025, 11, 5)));
    }

    #[test]
    fn scan_stops_at_window_end() {
        let config = AuditConfig::default();
        let found = Occupancy::new().find_free_date(&config, "Guarulhos", None, date(2025, 12, 31));
        assert_eq!(found, None);
    }
}
