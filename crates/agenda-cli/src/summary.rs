use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use agenda_model::{AppointmentStatus, AuditConfig, ChangeReason, ComparisonOutcome};
use agenda_normalization::format_date;

use agenda_cli::types::{AuditRunResult, CompareRunResult};

pub fn print_run_summary(run: &AuditRunResult) {
    println!("Input: {}", run.bank_file.display());
    println!("SHA-256: {}", run.sha256);
    println!(
        "Window: {} to {}",
        format_date(run.config.window.start),
        format_date(run.config.window.end)
    );
    match &run.output_dir {
        Some(dir) => println!("Output: {}", dir.display()),
        None => println!("Output: (dry run)"),
    }

    let summary = &run.result.summary;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Status"), header_cell("Bookings")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![
        status_cell(AppointmentStatus::Kept),
        count_cell(summary.kept, Color::Green),
    ]);
    table.add_row(vec![
        status_cell(AppointmentStatus::Adjusted),
        count_cell(summary.adjusted, Color::Yellow),
    ]);
    table.add_row(vec![
        status_cell(AppointmentStatus::NeedsReview),
        count_cell(summary.needs_review, Color::Red),
    ]);
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(summary.total).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    if !summary.by_reason.is_empty() {
        let mut table = Table::new();
        table.set_header(vec![header_cell("Reason"), header_cell("Bookings")]);
        apply_table_style(&mut table);
        align_column(&mut table, 1, CellAlignment::Right);
        for reason in ChangeReason::ALL {
            let count = summary.reason_count(reason);
            if count > 0 {
                table.add_row(vec![Cell::new(reason.as_str()), Cell::new(count)]);
            }
        }
        println!("{table}");
    }

    print_overbooking_table(run);
    print_review_table(run);

    if !run.violations.is_empty() {
        eprintln!("Schedule violations:");
        for violation in &run.violations {
            eprintln!("- {violation}");
        }
    }
}

fn print_overbooking_table(run: &AuditRunResult) {
    if run.result.overbooking.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Date"),
        header_cell("Maternity"),
        header_cell("Capacity"),
        header_cell("Total"),
        header_cell("Excess"),
    ]);
    apply_table_style(&mut table);
    for column in 2..5 {
        align_column(&mut table, column, CellAlignment::Right);
    }
    for entry in &run.result.overbooking {
        table.add_row(vec![
            Cell::new(format_date(entry.date)),
            Cell::new(&entry.maternity),
            Cell::new(entry.capacity),
            Cell::new(entry.total),
            count_cell(entry.excess as usize, Color::Yellow),
        ]);
    }
    println!();
    println!("Overbooked days:");
    println!("{table}");
}

fn print_review_table(run: &AuditRunResult) {
    if run.result.needs_review.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Id"),
        header_cell("Name"),
        header_cell("Maternity"),
        header_cell("Requested"),
        header_cell("Reason"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for appointment in &run.result.needs_review {
        let maternity = appointment
            .maternity
            .as_deref()
            .unwrap_or(&appointment.maternity_text);
        let requested = appointment
            .original_date
            .map(format_date)
            .unwrap_or_else(|| appointment.original_date_text.clone());
        table.add_row(vec![
            Cell::new(appointment.internal_id),
            Cell::new(&appointment.original_name),
            Cell::new(maternity),
            Cell::new(requested),
            Cell::new(appointment.change_reason.as_str()).fg(Color::Red),
        ]);
    }
    println!();
    println!("Needs review:");
    println!("{table}");
}

pub fn print_compare_summary(run: &CompareRunResult) {
    println!(
        "Calendar: {} {:02}/{}",
        run.maternity, run.month, run.year
    );
    if let Some(path) = &run.output {
        println!("Output: {}", path.display());
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Outcome"), header_cell("Rows")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (outcome, color) in [
        (ComparisonOutcome::Match, Color::Green),
        (ComparisonOutcome::DateMismatch, Color::Yellow),
        (ComparisonOutcome::MissingInAgenda, Color::Red),
        (ComparisonOutcome::MissingInCalendar, Color::Red),
    ] {
        let count = run.rows.iter().filter(|row| row.outcome == outcome).count();
        table.add_row(vec![Cell::new(outcome.as_str()), count_cell(count, color)]);
    }
    println!("{table}");
}

pub fn print_capacity_table(config: &AuditConfig) {
    println!(
        "Window: {} to {}",
        format_date(config.window.start),
        format_date(config.window.end)
    );
    println!("Zero-capacity weekday: {}", config.zero_capacity_weekday);
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Maternity"),
        header_cell("Aliases"),
        header_cell("Weekday"),
        header_cell("Saturday"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for maternity in &config.maternities {
        let aliases = if maternity.aliases.is_empty() {
            dim_cell("-")
        } else {
            Cell::new(maternity.aliases.join(", "))
        };
        table.add_row(vec![
            Cell::new(&maternity.name)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            aliases,
            Cell::new(maternity.weekday),
            Cell::new(maternity.saturday),
        ]);
    }
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(60);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn status_cell(status: AppointmentStatus) -> Cell {
    Cell::new(status.as_str())
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
