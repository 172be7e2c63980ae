//! Renderers for the CSV report files.

use agenda_model::{
    ComparisonRow, DuplicateGroup, OverbookingEntry, SundayRemap, WorkingAppointment,
};
use agenda_normalization::format_date;

use crate::common::{DATE_LIST_SEPARATOR, REVIEW_MARKER, date_text, join_lines, quote};

pub const DUPLICATES_HEADER: &str = "carteirinha,nome,registros_antes,registros_depois";
pub const OVERBOOKING_HEADER: &str = "data,maternidade,capacidade,total,excedente";
pub const APPOINTMENTS_HEADER: &str = "id_interno,carteirinha,nome_original,nome_normalizado,maternidade,data_original,data_final,motivo_alteracao,status";
pub const SUNDAY_HEADER: &str = "nome,data_original,data_ajustada";
pub const COMPARISON_HEADER: &str = "nome,maternidade,data_calendario,data_agenda,situacao";

/// `duplicados.csv`: one row per card whose bookings were redistributed.
pub fn render_duplicates(groups: &[DuplicateGroup]) -> String {
    join_lines(
        DUPLICATES_HEADER,
        groups.iter().map(|group| {
            let before: Vec<String> = group.dates_before.iter().copied().map(format_date).collect();
            let after: Vec<String> = group
                .dates_after
                .iter()
                .map(|&date| date.map_or_else(|| REVIEW_MARKER.to_string(), format_date))
                .collect();
            [
                quote(&group.card_id),
                quote(&group.name),
                quote(&before.join(DATE_LIST_SEPARATOR)),
                quote(&after.join(DATE_LIST_SEPARATOR)),
            ]
            .join(",")
        }),
    )
}

/// `superlotacao.csv`: one row per slot that started above capacity.
pub fn render_overbooking(entries: &[OverbookingEntry]) -> String {
    join_lines(
        OVERBOOKING_HEADER,
        entries.iter().map(|entry| {
            format!(
                "{},{},{},{},{}",
                quote(&format_date(entry.date)),
                quote(&entry.maternity),
                entry.capacity,
                entry.total,
                entry.excess
            )
        }),
    )
}

fn appointment_row(appointment: &WorkingAppointment) -> String {
    let maternity = appointment
        .maternity
        .as_deref()
        .unwrap_or(&appointment.maternity_text);
    let original_date = match appointment.original_date {
        Some(date) => format_date(date),
        None => appointment.original_date_text.clone(),
    };
    format!(
        "{},{},{},{},{},{},{},{},{}",
        appointment.internal_id,
        quote(&appointment.card_id),
        quote(&appointment.original_name),
        quote(&appointment.normalized_name),
        quote(maternity),
        quote(&original_date),
        quote(&date_text(appointment.final_date)),
        quote(appointment.change_reason.as_str()),
        quote(appointment.status.as_str()),
    )
}

/// `agenda_final.csv`: every appointment in id order.
pub fn render_appointments(appointments: &[WorkingAppointment]) -> String {
    join_lines(APPOINTMENTS_HEADER, appointments.iter().map(appointment_row))
}

/// `problemas.csv`: the appointments left in review.
pub fn render_problems(appointments: &[WorkingAppointment]) -> String {
    join_lines(
        APPOINTMENTS_HEADER,
        appointments
            .iter()
            .filter(|appointment| appointment.needs_review())
            .map(appointment_row),
    )
}

/// `ajustes_domingo.csv`: bookings shifted off the zero-capacity weekday.
pub fn render_sunday_remaps(remaps: &[SundayRemap]) -> String {
    join_lines(
        SUNDAY_HEADER,
        remaps.iter().map(|remap| {
            [
                quote(&remap.name),
                quote(&format_date(remap.original_date)),
                quote(&format_date(remap.adjusted_date)),
            ]
            .join(",")
        }),
    )
}

/// `comparacao_calendario.csv`: the calendar cross-check.
pub fn render_comparison(rows: &[ComparisonRow]) -> String {
    join_lines(
        COMPARISON_HEADER,
        rows.iter().map(|row| {
            [
                quote(&row.name),
                quote(&row.maternity),
                quote(&date_text(row.calendar_date)),
                quote(&date_text(row.agenda_date)),
                quote(row.outcome.as_str()),
            ]
            .join(",")
        }),
    )
}
