pub mod appointment;
pub mod config;
pub mod error;
pub mod record;
pub mod result;

pub use appointment::{AppointmentStatus, ChangeReason, WorkingAppointment};
pub use config::{AuditConfig, AuditWindow, MaternityCapacity};
pub use error::{AuditError, Result};
pub use record::{CalendarEntry, RawBookingRecord};
pub use result::{
    AuditSummary, ComparisonOutcome, ComparisonRow, DuplicateGroup, OverbookingEntry,
    ProcessingResult, SundayRemap,
};
