use icu_casemap::CaseMapper;
use icu_locale_core::{LanguageIdentifier, langid};

/// Uppercase `value` using the casing rules of `language`.
///
/// Unknown or malformed language tags fall back to root casing rules.
///
/// ```
/// use certfill::format::uppercase;
///
/// assert_eq!(uppercase("jane doe", "en"), "JANE DOE");
/// assert_eq!(uppercase("istanbul", "tr"), "İSTANBUL");
/// ```
pub fn uppercase(value: &str, language: &str) -> String {
    let id: LanguageIdentifier = language.parse().unwrap_or(langid!("und"));
    CaseMapper::new().uppercase_to_string(value, &id).to_string()
}
