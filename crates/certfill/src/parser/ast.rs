//! Public AST types for markup templates and date patterns.

/// A parsed markup template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub segments: Vec<Segment>,
}

impl Template {
    /// Names of all placeholders in order of appearance (with repeats).
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Placeholder(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }
}

/// A segment within a markup template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text, copied to the output unchanged.
    Literal(String),
    /// A `{name}` placeholder. Names may contain dots (`{child.district}`).
    Placeholder(String),
}

/// A token within a date pattern such as `DD/MM/YYYY`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateToken {
    /// `YYYY`: four-digit year.
    Year,
    /// `YY`: two-digit year.
    ShortYear,
    /// `MMMM`: localized month name.
    MonthName,
    /// `MMM`: abbreviated month name.
    ShortMonthName,
    /// `MM`: zero-padded month number.
    PaddedMonth,
    /// `M`: month number.
    Month,
    /// `DD`: zero-padded day of month.
    PaddedDay,
    /// `D`: day of month.
    Day,
    /// Any other text, including `[bracketed]` escapes.
    Literal(String),
}
