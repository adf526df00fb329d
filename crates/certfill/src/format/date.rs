//! Date parsing and pattern formatting.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};

use crate::error::FormatError;
use crate::format::primary_language;
use crate::parser::{DateToken, parse_date_pattern};

const ENGLISH_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const BENGALI_MONTHS: [&str; 12] = [
    "জানুয়ারি",
    "ফেব্রুয়ারি",
    "মার্চ",
    "এপ্রিল",
    "মে",
    "জুন",
    "জুলাই",
    "আগস্ট",
    "সেপ্টেম্বর",
    "অক্টোবর",
    "নভেম্বর",
    "ডিসেম্বর",
];

const FRENCH_MONTHS: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

const ENGLISH_SHORT_MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const FRENCH_SHORT_MONTHS: [&str; 12] = [
    "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.", "nov.",
    "déc.",
];

/// Parse a record date value.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps (converted to UTC), naive
/// `YYYY-MM-DDTHH:MM:SS[.fff]` timestamps and integer epoch milliseconds.
pub fn parse_date(value: &str) -> Result<NaiveDate, FormatError> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|dt| dt.with_timezone(&Utc).date_naive())
        })
        .or_else(|| {
            NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| {
            trimmed
                .parse::<i64>()
                .ok()
                .and_then(DateTime::from_timestamp_millis)
                .map(|dt| dt.date_naive())
        })
        .ok_or_else(|| FormatError::InvalidDate {
            value: value.to_string(),
        })
}

/// Format a record date value with a pattern such as `DD/MM/YYYY`.
///
/// Month names follow `language` (English, Bengali and French are built in;
/// other languages use English names). Digits are always ASCII; pass the
/// result through [`transliterate_digits`](super::transliterate_digits) for
/// native digits.
///
/// # Example
///
/// ```
/// use certfill::format::format_date;
///
/// assert_eq!(format_date("2024-03-21", "DD/MM/YYYY", "en").unwrap(), "21/03/2024");
/// assert_eq!(format_date("2024-03-21", "D MMMM YYYY", "fr").unwrap(), "21 mars 2024");
/// assert!(format_date("21st of March", "DD/MM/YYYY", "en").is_err());
/// ```
pub fn format_date(value: &str, pattern: &str, language: &str) -> Result<String, FormatError> {
    let date = parse_date(value)?;
    let mut output = String::new();
    for token in parse_date_pattern(pattern) {
        match token {
            DateToken::Year => output.push_str(&format!("{:04}", date.year())),
            DateToken::ShortYear => output.push_str(&format!("{:02}", date.year().rem_euclid(100))),
            DateToken::MonthName => output.push_str(month_name(date.month0(), language)),
            DateToken::ShortMonthName => output.push_str(short_month_name(date.month0(), language)),
            DateToken::PaddedMonth => output.push_str(&format!("{:02}", date.month())),
            DateToken::Month => output.push_str(&date.month().to_string()),
            DateToken::PaddedDay => output.push_str(&format!("{:02}", date.day())),
            DateToken::Day => output.push_str(&date.day().to_string()),
            DateToken::Literal(text) => output.push_str(&text),
        }
    }
    Ok(output)
}

/// The localized name of a zero-based month.
pub fn month_name(month0: u32, language: &str) -> &'static str {
    let names = match primary_language(language) {
        "bn" => &BENGALI_MONTHS,
        "fr" => &FRENCH_MONTHS,
        _ => &ENGLISH_MONTHS,
    };
    names.get(month0 as usize).copied().unwrap_or_default()
}

fn short_month_name(month0: u32, language: &str) -> &'static str {
    let names = match primary_language(language) {
        "bn" => &BENGALI_MONTHS,
        "fr" => &FRENCH_SHORT_MONTHS,
        _ => &ENGLISH_SHORT_MONTHS,
    };
    names.get(month0 as usize).copied().unwrap_or_default()
}
