//! Locale-aware formatting: dates, digit transliteration and case mapping.
//!
//! Everything here is a pure function of its arguments. Callers that treat a
//! [`FormatError`](crate::FormatError) as "leave the field blank" get that
//! behaviour from the transformer engine.

mod case;
mod date;
mod digits;
mod locale;

pub use case::uppercase;
pub use date::{format_date, month_name, parse_date};
pub use digits::{DigitMap, transliterate_digits};
pub use locale::{Locale, primary_language};
