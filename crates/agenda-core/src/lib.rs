//! Booking resolution engine.
//!
//! Admitted appointments go through an ordered [`pipeline`] of passes that
//! move bookings off the zero-capacity weekday, spread same-card duplicates
//! and relieve over-capacity days. Every record that cannot be placed ends in
//! `needs_review`; none is dropped.

pub mod capacity;
pub mod compare;
pub mod duplicates;
pub mod intake;
pub mod invariants;
pub mod occupancy;
pub mod overbooking;
pub mod pipeline;
pub mod sunday;
pub mod window;

pub use capacity::{capacity_for, is_zero_capacity_day};
pub use compare::compare_with_calendar;
pub use duplicates::DuplicatePass;
pub use intake::{IntakePass, admit_record, admit_records, intake_rejection};
pub use invariants::{ScheduleViolation, verify_schedule};
pub use occupancy::{Occupancy, identity_key};
pub use overbooking::OverbookingPass;
pub use pipeline::{
    ResolutionPass, ResolutionPipeline, ResolutionState, build_default_pipeline, resolve,
    run_audit,
};
pub use sunday::{ShiftDirection, SundayPass, displace_from_zero_capacity_day};
pub use window::is_in_window;
