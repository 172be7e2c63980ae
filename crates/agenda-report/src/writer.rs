//! Writing the report files into an output directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use agenda_model::{AuditWindow, ComparisonRow, ProcessingResult};

use crate::csv::{
    render_appointments, render_comparison, render_duplicates, render_overbooking,
    render_problems, render_sunday_remaps,
};
use crate::json::{InputDigest, render_result_json};

pub const DUPLICATES_FILE: &str = "duplicados.csv";
pub const OVERBOOKING_FILE: &str = "superlotacao.csv";
pub const APPOINTMENTS_FILE: &str = "agenda_final.csv";
pub const PROBLEMS_FILE: &str = "problemas.csv";
pub const SUNDAY_FILE: &str = "ajustes_domingo.csv";
pub const RESULT_FILE: &str = "resultado.json";
pub const COMPARISON_FILE: &str = "comparacao_calendario.csv";

fn write_file(dir: &Path, name: &str, contents: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
    debug!(path = %path.display(), bytes = contents.len(), "report written");
    Ok(path)
}

fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))
}

/// Writes every audit report. Returns the written paths in a fixed order.
pub fn write_reports(
    output_dir: &Path,
    result: &ProcessingResult,
    window: &AuditWindow,
    input: &InputDigest,
) -> Result<Vec<PathBuf>> {
    ensure_dir(output_dir)?;
    let files = [
        (DUPLICATES_FILE, render_duplicates(&result.duplicate_groups)),
        (OVERBOOKING_FILE, render_overbooking(&result.overbooking)),
        (APPOINTMENTS_FILE, render_appointments(&result.appointments)),
        (PROBLEMS_FILE, render_problems(&result.appointments)),
        (SUNDAY_FILE, render_sunday_remaps(&result.sunday_remaps)),
        (RESULT_FILE, render_result_json(result, window, input)?),
    ];
    let mut written = Vec::with_capacity(files.len());
    for (name, contents) in &files {
        written.push(write_file(output_dir, name, contents)?);
    }
    info!(
        output_dir = %output_dir.display(),
        file_count = written.len(),
        "reports written"
    );
    Ok(written)
}

/// Writes the calendar cross-check.
pub fn write_comparison(output_dir: &Path, rows: &[ComparisonRow]) -> Result<PathBuf> {
    ensure_dir(output_dir)?;
    write_file(output_dir, COMPARISON_FILE, &render_comparison(rows))
}
