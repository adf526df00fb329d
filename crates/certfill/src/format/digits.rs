//! Digit transliteration between ASCII and native numbering systems.

use serde::{Deserialize, Serialize};

const BENGALI: [char; 10] = ['০', '১', '২', '৩', '৪', '৫', '৬', '৭', '৮', '৯'];
const DEVANAGARI: [char; 10] = ['०', '१', '२', '३', '४', '५', '६', '७', '८', '९'];
const ARABIC_INDIC: [char; 10] = ['٠', '١', '٢', '٣', '٤', '٥', '٦', '٧', '٨', '٩'];
const EXTENDED_ARABIC_INDIC: [char; 10] = ['۰', '۱', '۲', '۳', '۴', '۵', '۶', '۷', '۸', '۹'];
const THAI: [char; 10] = ['๐', '๑', '๒', '๓', '๔', '๕', '๖', '๗', '๘', '๙'];

/// Replacement characters for the ASCII digits `0` through `9`.
///
/// Deserializes from a ten-character string listing the replacements in
/// order, e.g. `"০১২৩৪৫৬৭৮৯"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DigitMap {
    digits: [char; 10],
}

impl DigitMap {
    /// Create a map from ten replacement characters.
    pub const fn new(digits: [char; 10]) -> Self {
        Self { digits }
    }

    /// The built-in map for a primary language subtag.
    ///
    /// Returns `None` for languages that write ASCII digits.
    pub fn for_language(language: &str) -> Option<Self> {
        let digits = match language {
            "bn" | "as" => BENGALI,
            "hi" | "mr" | "ne" => DEVANAGARI,
            "ar" => ARABIC_INDIC,
            "fa" | "ur" => EXTENDED_ARABIC_INDIC,
            "th" => THAI,
            _ => return None,
        };
        Some(Self::new(digits))
    }

    /// Map one character, passing non-digits through.
    pub fn map(&self, c: char) -> char {
        c.to_digit(10)
            .and_then(|d| self.digits.get(d as usize).copied())
            .unwrap_or(c)
    }
}

impl TryFrom<String> for DigitMap {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let chars: Vec<char> = value.chars().collect();
        let digits: [char; 10] = chars
            .try_into()
            .map_err(|chars: Vec<char>| {
                format!("digit map needs 10 characters, got {}", chars.len())
            })?;
        Ok(Self::new(digits))
    }
}

impl From<DigitMap> for String {
    fn from(map: DigitMap) -> Self {
        map.digits.iter().collect()
    }
}

/// Replace each ASCII digit in `value` through `map`.
///
/// Non-digit characters pass through unchanged.
///
/// # Example
///
/// ```
/// use certfill::format::{DigitMap, transliterate_digits};
///
/// let bengali = DigitMap::for_language("bn").unwrap();
/// assert_eq!(transliterate_digits("21/03/2024", &bengali), "২১/০৩/২০২৪");
/// ```
pub fn transliterate_digits(value: &str, map: &DigitMap) -> String {
    value.chars().map(|c| map.map(c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_ascii_digits_pass_through() {
        let map = DigitMap::for_language("bn").unwrap();
        assert_eq!(transliterate_digits("২০ and 20", &map), "২০ and ২০");
    }

    #[test]
    fn parses_from_string() {
        let map = DigitMap::try_from("٠١٢٣٤٥٦٧٨٩".to_string()).unwrap();
        assert_eq!(map, DigitMap::for_language("ar").unwrap());
    }

    #[test]
    fn rejects_wrong_length() {
        let err = DigitMap::try_from("0123".to_string()).unwrap_err();
        assert_eq!(err, "digit map needs 10 characters, got 4");
    }

    #[test]
    fn english_has_no_map() {
        assert_eq!(DigitMap::for_language("en"), None);
    }
}
