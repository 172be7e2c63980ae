//! Resolution pipeline with ordered passes.
//!
//! Each pass implements [`ResolutionPass`] and is folded over a
//! [`ResolutionState`]: it takes the previous state by value and returns the
//! next one. Occupancy travels inside the state, so a pass always sees the
//! moves made by the passes before it.
//!
//! # Standard Pipeline Order
//!
//! 1. **IntakePass** - Flag records with no maternity, date or window slot
//! 2. **SundayPass** - Shift bookings off the zero-capacity weekday
//! 3. **DuplicatePass** - Spread same-card bookings sharing a slot
//! 4. **OverbookingPass** - Move the excess of over-capacity slots
//!
//! # Example
//!
//! ```
//! use agenda_core::pipeline::run_audit;
//! use agenda_model::{AuditConfig, RawBookingRecord};
//!
//! let records = vec![RawBookingRecord::new(1, "Maria", "123", "Guarulhos", "03/11/2025")];
//! let result = run_audit(&records, &AuditConfig::default());
//! assert_eq!(result.summary.kept, 1);
//! ```

use std::time::Instant;

use tracing::{debug, info, info_span};

use agenda_model::{
    AuditConfig, AuditSummary, DuplicateGroup, OverbookingEntry, ProcessingResult,
    RawBookingRecord, SundayRemap, WorkingAppointment,
};

use crate::duplicates::DuplicatePass;
use crate::intake::{IntakePass, admit_records};
use crate::occupancy::Occupancy;
use crate::overbooking::OverbookingPass;
use crate::sunday::SundayPass;

/// One resolution stage.
pub trait ResolutionPass {
    /// Consumes the state and returns it with this pass applied.
    fn run(&self, state: ResolutionState, config: &AuditConfig) -> ResolutionState;

    /// Human-readable name for this pass (for logging/debugging).
    fn pass_name(&self) -> &str;
}

/// Everything a pass reads and writes.
#[derive(Debug, Clone, Default)]
pub struct ResolutionState {
    /// Sorted by `internal_id`.
    pub appointments: Vec<WorkingAppointment>,
    pub occupancy: Occupancy,
    pub sunday_remaps: Vec<SundayRemap>,
    pub duplicate_groups: Vec<DuplicateGroup>,
    pub overbooking: Vec<OverbookingEntry>,
    /// Pass execution log for debugging.
    pub executed_passes: Vec<String>,
}

impl ResolutionState {
    pub fn new(mut appointments: Vec<WorkingAppointment>) -> Self {
        appointments.sort_by_key(|appointment| appointment.internal_id);
        let occupancy = Occupancy::from_appointments(&appointments);
        Self {
            appointments,
            occupancy,
            ..Self::default()
        }
    }

    /// Aggregates the state into the audit result.
    pub fn into_result(self) -> ProcessingResult {
        let needs_review = self
            .appointments
            .iter()
            .filter(|appointment| appointment.needs_review())
            .cloned()
            .collect();
        let summary = AuditSummary::from_appointments(&self.appointments);
        ProcessingResult {
            appointments: self.appointments,
            duplicate_groups: self.duplicate_groups,
            sunday_remaps: self.sunday_remaps,
            overbooking: self.overbooking,
            needs_review,
            summary,
        }
    }
}

/// An ordered pipeline of resolution passes.
pub struct ResolutionPipeline {
    passes: Vec<Box<dyn ResolutionPass>>,
}

impl Default for ResolutionPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolutionPipeline {
    /// Create an empty pipeline.
    pub fn new() -> Self {
        Self { passes: Vec::new() }
    }

    /// Add a pass to the end of the pipeline.
    pub fn add_pass(mut self, pass: Box<dyn ResolutionPass>) -> Self {
        self.passes.push(pass);
        self
    }

    /// Remove a pass by name.
    pub fn remove_pass(mut self, pass_name: &str) -> Self {
        self.passes.retain(|p| p.pass_name() != pass_name);
        self
    }

    /// Fold every pass over `state`, in order.
    pub fn execute(&self, state: ResolutionState, config: &AuditConfig) -> ResolutionState {
        self.passes.iter().fold(state, |state, pass| {
            let span = info_span!("pass", name = pass.pass_name());
            let _enter = span.enter();
            let start = Instant::now();
            let mut next = pass.run(state, config);
            debug!(
                duration_ms = start.elapsed().as_millis(),
                booked = next.occupancy.total(),
                "pass complete"
            );
            next.executed_passes.push(pass.pass_name().to_string());
            next
        })
    }

    /// List pass names in execution order.
    pub fn pass_names(&self) -> Vec<&str> {
        self.passes.iter().map(|p| p.pass_name()).collect()
    }
}

/// Build the standard pipeline.
pub fn build_default_pipeline() -> ResolutionPipeline {
    ResolutionPipeline::new()
        .add_pass(Box::new(IntakePass))
        .add_pass(Box::new(SundayPass))
        .add_pass(Box::new(DuplicatePass))
        .add_pass(Box::new(OverbookingPass))
}

/// Admits raw export records and resolves them.
pub fn run_audit(records: &[RawBookingRecord], config: &AuditConfig) -> ProcessingResult {
    resolve(admit_records(records, config), config)
}

/// Resolves already admitted appointments.
///
/// Running this again on `result.appointments` leaves them unchanged.
pub fn resolve(appointments: Vec<WorkingAppointment>, config: &AuditConfig) -> ProcessingResult {
    let total = appointments.len();
    let result = build_default_pipeline()
        .execute(ResolutionState::new(appointments), config)
        .into_result();
    info!(
        total,
        kept = result.summary.kept,
        adjusted = result.summary.adjusted,
        needs_review = result.summary.needs_review,
        "audit resolved"
    );
    result
}
