pub mod bank;
pub mod calendar;
pub mod loader;

pub use bank::{parse_bank_export, split_line};
pub use calendar::parse_calendar_listing;
pub use loader::{
    LoadedText, decode_text, load_bank_file, load_calendar_file, read_text_file, sha256_hex,
};
