use std::fmt::{Display, Formatter, Result as FmtResult};

/// A value computed by a transformer rule before it is flattened into a
/// [`FieldMap`](super::FieldMap).
///
/// Record values come in three shapes: plain text, label/value pairs from
/// option lists (e.g. a place-of-birth type), and lists of either. Every shape
/// reduces to exactly one display string through [`Field::to_display_string`].
///
/// # Example
///
/// ```
/// use certfill::Field;
///
/// let address = Field::List(vec![
///     Field::from("12 Palm Road"),
///     Field::from(""),
///     Field::label("Ibombo", "ibombo-id"),
/// ]);
/// assert_eq!(address.to_display_string(), "12 Palm Road, Ibombo");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    /// Plain text.
    Text(String),

    /// An option value with its display label.
    Label { label: String, value: String },

    /// An ordered list of values.
    List(Vec<Field>),
}

impl Field {
    /// Build a label/value pair.
    pub fn label(label: impl Into<String>, value: impl Into<String>) -> Self {
        Field::Label {
            label: label.into(),
            value: value.into(),
        }
    }

    /// An empty text value.
    pub fn empty() -> Self {
        Field::Text(String::new())
    }

    /// Reduce this value to the single string placed into a field map.
    ///
    /// Lists drop empty entries, reduce each remaining entry recursively and
    /// join them with `", "`, preserving order. Labels display as their label.
    pub fn to_display_string(&self) -> String {
        match self {
            Field::Text(text) => text.clone(),
            Field::Label { label, .. } => label.clone(),
            Field::List(items) => items
                .iter()
                .map(Field::to_display_string)
                .filter(|item| !item.is_empty())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.to_display_string())
    }
}

impl From<String> for Field {
    fn from(s: String) -> Self {
        Field::Text(s)
    }
}

impl From<&str> for Field {
    fn from(s: &str) -> Self {
        Field::Text(s.to_string())
    }
}

impl From<Vec<Field>> for Field {
    fn from(items: Vec<Field>) -> Self {
        Field::List(items)
    }
}
