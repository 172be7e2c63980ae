//! Audit report emitters.
//!
//! Renderers return the file contents as strings and do no business logic;
//! [`writer`] puts them on disk.

pub mod common;
pub mod csv;
pub mod json;
pub mod writer;

pub use csv::{
    render_appointments, render_comparison, render_duplicates, render_overbooking,
    render_problems, render_sunday_remaps,
};
pub use json::{InputDigest, render_result_json};
pub use writer::{
    APPOINTMENTS_FILE, COMPARISON_FILE, DUPLICATES_FILE, OVERBOOKING_FILE, PROBLEMS_FILE,
    RESULT_FILE, SUNDAY_FILE, write_comparison, write_reports,
};
