//! Box decomposition: one field per character of a long value.

use unicode_segmentation::UnicodeSegmentation;

use crate::transform::rule::{Operation, TransformerRule};

/// The character at `index` of `value`, or `""` when out of range.
///
/// Characters are extended grapheme clusters, so a Bengali consonant keeps its
/// vowel sign in the same box.
pub fn char_at(value: &str, index: usize) -> String {
    value
        .graphemes(true)
        .nth(index)
        .unwrap_or_default()
        .to_string()
}

/// Expand one operation into `count` rules writing `{prefix}0` through
/// `{prefix}{count - 1}`, one character each.
///
/// # Example
///
/// ```
/// use certfill::{Operation, box_rules};
///
/// let rules = box_rules("brn", &Operation::field_value("registration.number"), 3);
/// assert_eq!(rules.len(), 3);
/// assert_eq!(rules[2].output_field, "brn2");
/// assert_eq!(rules[2].value_index, Some(2));
/// ```
pub fn box_rules(prefix: &str, operation: &Operation, count: usize) -> Vec<TransformerRule> {
    (0..count)
        .map(|index| {
            TransformerRule::new(format!("{prefix}{index}"), operation.clone()).at_index(index)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_is_empty() {
        assert_eq!(char_at("ABC", 3), "");
        assert_eq!(char_at("", 0), "");
    }

    #[test]
    fn combining_marks_stay_together() {
        // "কি" is KA followed by the vowel sign I.
        assert_eq!(char_at("কি১", 0), "কি");
        assert_eq!(char_at("কি১", 1), "১");
    }
}
