//! Zero-capacity weekday resolution.
//!
//! No maternity works on the zero-capacity weekday (Sunday by default), so a
//! booking that lands there is moved to the neighbouring day. Capacity is not
//! checked here; the overbooking pass absorbs whatever the shift piles up.

use chrono::{Days, NaiveDate};
use tracing::{debug, warn};

use agenda_model::{AuditConfig, ChangeReason, SundayRemap};

use crate::capacity::is_zero_capacity_day;
use crate::pipeline::{ResolutionPass, ResolutionState};
use crate::window::is_in_window;

/// Which neighbour of the zero-capacity day receives the booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShiftDirection {
    #[default]
    Forward,
    Backward,
}

/// Returns `date` unchanged unless it is the zero-capacity weekday, in which
/// case the adjacent day in `direction` is returned.
///
/// Only fails at the edges of the calendar range.
pub fn displace_from_zero_capacity_day(
    date: NaiveDate,
    config: &AuditConfig,
    direction: ShiftDirection,
) -> Option<NaiveDate> {
    if !is_zero_capacity_day(date, config) {
        return Some(date);
    }
    match direction {
        ShiftDirection::Forward => date.checked_add_days(Days::new(1)),
        ShiftDirection::Backward => date.checked_sub_days(Days::new(1)),
    }
}

/// Forward shift first; backward when the forward day leaves the window.
fn remapped_date(date: NaiveDate, config: &AuditConfig) -> Option<NaiveDate> {
    [ShiftDirection::Forward, ShiftDirection::Backward]
        .into_iter()
        .filter_map(|direction| displace_from_zero_capacity_day(date, config, direction))
        .find(|candidate| is_in_window(&config.window, *candidate))
}

pub struct SundayPass;

impl ResolutionPass for SundayPass {
    fn run(&self, mut state: ResolutionState, config: &AuditConfig) -> ResolutionState {
        for appointment in state.appointments.iter_mut() {
            let Some((_, date)) = appointment.slot() else {
                continue;
            };
            if !is_zero_capacity_day(date, config) {
                continue;
            }
            state.occupancy.release(appointment);
            match remapped_date(date, config) {
                Some(adjusted) => {
                    appointment.relocate(adjusted, ChangeReason::SundayRemapped);
                    state.occupancy.book(appointment);
                    debug!(
                        internal_id = appointment.internal_id,
                        from = %date,
                        to = %adjusted,
                        "zero-capacity day remapped"
                    );
                    state.sunday_remaps.push(SundayRemap {
                        internal_id: appointment.internal_id,
                        name: appointment.original_name.clone(),
                        original_date: date,
                        adjusted_date: adjusted,
                    });
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
        state
    }

    fn pass_name(&self) -> &str {
        "sunday"
    }
}
