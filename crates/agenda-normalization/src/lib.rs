//! Text normalization for booking exports.
//!
//! - [`text`]: mojibake repair and name comparison keys
//! - [`maternity`]: free text to canonical maternity names
//! - [`date`]: booking date parsing and rendering

pub mod date;
pub mod maternity;
pub mod text;

pub use date::{format_date, parse_booking_date};
pub use maternity::canonicalize_maternity;
pub use text::{compact_key, fix_mojibake, normalize_name, strip_diacritics};
