use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use tracing::{debug, error, info, info_span};

use agenda_core::{compare_with_calendar, run_audit, verify_schedule};
use agenda_ingest::{load_bank_file, load_calendar_file};
use agenda_model::{AuditConfig, AuditWindow, ComparisonOutcome};
use agenda_normalization::canonicalize_maternity;
use agenda_report::{InputDigest, write_comparison, write_reports};

use crate::cli::{CompareArgs, ConfigArgs, RunArgs};
use crate::logging::redact_value;
use crate::types::{AuditRunResult, CompareRunResult};

/// Builds the audit configuration: TOML file or defaults, then window flags.
pub fn load_config(args: &ConfigArgs) -> Result<AuditConfig> {
    let mut config = match &args.config {
        Some(path) => AuditConfig::from_toml_file(path)
            .with_context(|| format!("load config {}", path.display()))?,
        None => AuditConfig::default(),
    };
    if args.window_start.is_some() || args.window_end.is_some() {
        let window = AuditWindow::new(
            args.window_start.unwrap_or(config.window.start),
            args.window_end.unwrap_or(config.window.end),
        );
        config = config.with_window(window);
    }
    config.validate().context("invalid audit configuration")?;
    debug!(
        start = %config.window.start,
        end = %config.window.end,
        maternities = config.maternities.len(),
        "audit configuration loaded"
    );
    Ok(config)
}

fn default_output_dir(bank_file: &Path) -> PathBuf {
    bank_file
        .parent()
        .map(|parent| parent.join("output"))
        .unwrap_or_else(|| PathBuf::from("output"))
}

pub fn run_audit_command(args: &RunArgs) -> Result<AuditRunResult> {
    let run_span = info_span!("audit", bank_file = %args.bank_file.display());
    let _run_guard = run_span.enter();
    let config = load_config(&args.config)?;

    let ingest_start = Instant::now();
    let (records, loaded) = info_span!("ingest").in_scope(|| load_bank_file(&args.bank_file))?;
    info!(
        record_count = records.len(),
        latin1 = loaded.latin1_fallback,
        duration_ms = ingest_start.elapsed().as_millis(),
        "ingest complete"
    );

    let resolve_start = Instant::now();
    let result = info_span!("resolve").in_scope(|| run_audit(&records, &config));
    info!(
        kept = result.summary.kept,
        adjusted = result.summary.adjusted,
        needs_review = result.summary.needs_review,
        duration_ms = resolve_start.elapsed().as_millis(),
        "resolution complete"
    );
    for appointment in &result.needs_review {
        debug!(
            internal_id = appointment.internal_id,
            name = redact_value(&appointment.original_name),
            reason = %appointment.change_reason,
            "left for review"
        );
    }

    let violations = verify_schedule(&result.appointments, &config);
    for violation in &violations {
        error!(%violation, "schedule rule violated");
    }

    let input = InputDigest {
        file: args.bank_file.display().to_string(),
        sha256: loaded.sha256.clone(),
        record_count: records.len(),
    };
    let (output_dir, written) = if args.dry_run {
        info!("dry run, no files written");
        (None, Vec::new())
    } else {
        let output_dir = args
            .output_dir
            .clone()
            .unwrap_or_else(|| default_output_dir(&args.bank_file));
        let written = info_span!("output")
            .in_scope(|| write_reports(&output_dir, &result, &config.window, &input))?;
        (Some(output_dir), written)
    };

    Ok(AuditRunResult {
        bank_file: args.bank_file.clone(),
        sha256: loaded.sha256,
        record_count: records.len(),
        config,
        result,
        output_dir,
        written,
        violations,
    })
}

pub fn run_compare_command(args: &CompareArgs) -> Result<CompareRunResult> {
    let compare_span = info_span!("compare", bank_file = %args.bank_file.display());
    let _compare_guard = compare_span.enter();
    let config = load_config(&args.config)?;
    let maternity = canonicalize_maternity(&args.maternity, &config)
        .ok_or_else(|| anyhow!("unknown maternity: {}", args.maternity))?;

    let (records, _) = load_bank_file(&args.bank_file)?;
    let result = run_audit(&records, &config);
    let entries = load_calendar_file(&args.calendar, args.month, args.year, &maternity)
        .with_context(|| format!("load calendar {}", args.calendar.display()))?;
    let rows = compare_with_calendar(
        &result.appointments,
        &entries,
        &maternity,
        args.month,
        args.year,
    );
    for row in rows
        .iter()
        .filter(|row| row.outcome != ComparisonOutcome::Match)
    {
        debug!(
            name = redact_value(&row.name),
            outcome = row.outcome.as_str(),
            "calendar difference"
        );
    }
    info!(
        maternity = %maternity,
        calendar_entries = entries.len(),
        rows = rows.len(),
        "comparison complete"
    );

    let output = if args.dry_run {
        None
    } else {
        let output_dir = args
            .output_dir
            .clone()
            .unwrap_or_else(|| default_output_dir(&args.bank_file));
        Some(write_comparison(&output_dir, &rows)?)
    };
    Ok(CompareRunResult {
        maternity,
        month: args.month,
        year: args.year,
        rows,
        output,
    })
}
