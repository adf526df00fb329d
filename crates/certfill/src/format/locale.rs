//! Output locale for a transformation run.

use bon::Builder;

use crate::format::DigitMap;

/// The language a certificate is rendered in, with its digit conventions.
///
/// # Example
///
/// ```
/// use certfill::Locale;
///
/// let locale = Locale::builder().language("bn").build();
/// assert_eq!(locale.language(), "bn");
/// assert!(locale.digit_map().is_some());
///
/// let english = Locale::new();
/// assert_eq!(english.language(), "en");
/// assert!(english.digit_map().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
#[builder(on(String, into))]
pub struct Locale {
    /// Language tag (e.g., "en", "bn", "fr-CA").
    #[builder(default = "en".to_string())]
    language: String,

    /// Digit map overriding the built-in map for the language.
    digits: Option<DigitMap>,
}

impl Default for Locale {
    fn default() -> Self {
        Locale::builder().build()
    }
}

impl Locale {
    /// Create an English locale.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a locale for the given language with its built-in digit map.
    pub fn with_language(language: impl Into<String>) -> Self {
        Locale::builder().language(language.into()).build()
    }

    /// The full language tag.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// The primary language subtag ("fr" for "fr-CA").
    pub fn primary_language(&self) -> &str {
        primary_language(&self.language)
    }

    /// The digit map used for number conversion, if the language has one.
    pub fn digit_map(&self) -> Option<DigitMap> {
        self.digits
            .or_else(|| DigitMap::for_language(self.primary_language()))
    }
}

/// The primary subtag of a language tag, accepting `-` or `_` separators.
pub fn primary_language(tag: &str) -> &str {
    tag.split(['-', '_']).next().unwrap_or(tag)
}
