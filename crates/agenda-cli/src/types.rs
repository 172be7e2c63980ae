use std::path::PathBuf;

use agenda_core::ScheduleViolation;
use agenda_model::{AuditConfig, ComparisonRow, ProcessingResult};

/// Outcome of the `run` command.
#[derive(Debug)]
pub struct AuditRunResult {
    pub bank_file: PathBuf,
    pub sha256: String,
    pub record_count: usize,
    pub config: AuditConfig,
    pub result: ProcessingResult,
    /// Directory the reports went to. `None` on a dry run.
    pub output_dir: Option<PathBuf>,
    pub written: Vec<PathBuf>,
    pub violations: Vec<ScheduleViolation>,
}

impl AuditRunResult {
    /// True when the run should end with a failing exit status.
    pub fn has_errors(&self, fail_on_review: bool) -> bool {
        !self.violations.is_empty() || (fail_on_review && self.result.has_pending_review())
    }
}

/// Outcome of the `compare` command.
#[derive(Debug)]
pub struct CompareRunResult {
    pub maternity: String,
    pub month: u32,
    pub year: i32,
    pub rows: Vec<ComparisonRow>,
    /// Written comparison file. `None` on a dry run.
    pub output: Option<PathBuf>,
}
