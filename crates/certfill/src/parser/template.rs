//! Markup template parser using winnow.
//!
//! Parses template text into literal and placeholder segments. A placeholder
//! is `{name}` with optional inner whitespace, where the name starts with a
//! letter or underscore and continues with letters, digits, `_` or `.`.
//! Every other brace is literal text, so CSS rules and JSON snippets embedded
//! in SVG markup pass through unchanged.

use winnow::combinator::{alt, delimited, repeat};
use winnow::prelude::*;
use winnow::token::{any, one_of, take_while};

use super::ast::{Segment, Template};

/// Parse template text into segments.
pub fn parse_template(input: &str) -> Template {
    let mut remaining = input;
    match template(&mut remaining) {
        Ok(t) if remaining.is_empty() => t,
        // Unreachable with a total grammar; keep the text rather than lose it.
        _ => Template {
            segments: vec![Segment::Literal(input.to_string())],
        },
    }
}

/// Parse a complete template into segments.
fn template(input: &mut &str) -> ModalResult<Template> {
    let segments: Vec<Segment> = repeat(0.., segment).parse_next(input)?;
    Ok(Template {
        segments: merge_literals(segments),
    })
}

/// Merge adjacent Literal segments into single segments.
fn merge_literals(segments: Vec<Segment>) -> Vec<Segment> {
    let mut result = Vec::with_capacity(segments.len());

    for segment in segments {
        match segment {
            Segment::Literal(text) => {
                if let Some(Segment::Literal(prev)) = result.last_mut() {
                    prev.push_str(&text);
                } else {
                    result.push(Segment::Literal(text));
                }
            }
            other => result.push(other),
        }
    }

    result
}

/// Parse a single segment (placeholder or literal character).
fn segment(input: &mut &str) -> ModalResult<Segment> {
    alt((placeholder, literal_char)).parse_next(input)
}

/// Parse any single character as literal text.
fn literal_char(input: &mut &str) -> ModalResult<Segment> {
    any.map(|c: char| Segment::Literal(c.to_string()))
        .parse_next(input)
}

/// Parse a placeholder: { name }
fn placeholder(input: &mut &str) -> ModalResult<Segment> {
    delimited(('{', ws), name, (ws, '}'))
        .map(|name: &str| Segment::Placeholder(name.to_string()))
        .parse_next(input)
}

/// Parse optional whitespace.
fn ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., |c: char| c.is_ascii_whitespace())
        .void()
        .parse_next(input)
}

/// Parse a placeholder name.
fn name<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (one_of(is_name_start), take_while(0.., is_name_cont))
        .take()
        .parse_next(input)
}

/// Check if a character can start a name.
fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Check if a character can continue a name.
fn is_name_cont(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.'
}
