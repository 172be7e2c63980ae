use std::fs;

use agenda_ingest::{decode_text, load_bank_file, parse_bank_export, sha256_hex};

#[test]
fn parses_comma_and_tab_lines_in_order() {
    let text = "Maria Silva,123,Guarulhos,03/11/2025\n\
                Ana Souza\t456\tNotrecare\t2025-11-04\n";
    let records = parse_bank_export(text);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].internal_id, 1);
    assert_eq!(records[0].name, "Maria Silva");
    assert_eq!(records[0].card_id, "123");
    assert_eq!(records[0].maternity, "Guarulhos");
    assert_eq!(records[0].date_text, "03/11/2025");
    assert_eq!(records[1].internal_id, 2);
    assert_eq!(records[1].maternity, "Notrecare");
}

#[test]
fn skips_header_and_malformed_lines_without_gaps_in_ids() {
    let text = "Nome,Carteirinha,Maternidade,Data\n\
                \n\
                just garbage\n\
                Maria,123,Guarulhos,03/11/2025\n\
                ,,,\n\
                Ana,456,Salvalus,04/11/2025\n";
    let records = parse_bank_export(text);
    let ids: Vec<u32> = records.iter().map(|r| r.internal_id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(records[1].name, "Ana");
}

#[test]
fn header_name_later_in_file_is_data() {
    let text = "Maria,123,Guarulhos,03/11/2025\nNome,999,Guarulhos,04/11/2025\n";
    assert_eq!(parse_bank_export(text).len(), 2);
}

#[test]
fn first_four_non_empty_cells_are_used() {
    let text = ",Maria,,123,Guarulhos,,03/11/2025,extra\n";
    let records = parse_bank_export(text);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "Maria");
    assert_eq!(records[0].card_id, "123");
    assert_eq!(records[0].date_text, "03/11/2025");
}

#[test]
fn blank_card_column_keeps_empty_card_id() {
    let records = parse_bank_export("Maria,,Guarulhos,03/11/2025\n");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].card_id, "");
    assert_eq!(records[0].maternity, "Guarulhos");
}

#[test]
fn semicolon_exports_are_supported() {
    let records = parse_bank_export("Maria;123;Guarulhos;03/11/2025\r\n");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].date_text, "03/11/2025");
}

#[test]
fn latin1_bytes_are_decoded() {
    let (text, fallback) = decode_text(b"Concei\xe7\xe3o");
    assert!(fallback);
    assert_eq!(text, "Conceição");

    // Spreadsheet exports use the Windows-1252 punctuation range.
    let (text, fallback) = decode_text(b"\x93Jo\xe3o\x94 \x80");
    assert!(fallback);
    assert_eq!(text, "\u{201c}João\u{201d} \u{20ac}");

    let (text, fallback) = decode_text("\u{feff}Conceição".as_bytes());
    assert!(!fallback);
    assert_eq!(text, "Conceição");
}

#[test]
fn loads_file_with_checksum() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("banco.csv");
    let contents = "Maria,123,Guarulhos,03/11/2025\n";
    fs::write(&path, contents).expect("write file");

    let (records, loaded) = load_bank_file(&path).expect("load bank file");
    assert_eq!(records.len(), 1);
    assert_eq!(loaded.sha256, sha256_hex(contents.as_bytes()));
    assert_eq!(loaded.sha256.len(), 64);

    assert!(load_bank_file(&dir.path().join("missing.csv")).is_err());
}
