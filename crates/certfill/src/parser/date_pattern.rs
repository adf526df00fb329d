//! Date pattern parser using winnow.
//!
//! Recognizes the moment-style tokens used by certificate templates
//! (`YYYY`, `YY`, `MMMM`, `MMM`, `MM`, `M`, `DD`, `D`). Text inside square
//! brackets is emitted literally, as is any character that does not start a
//! token.

use winnow::combinator::{alt, delimited, repeat};
use winnow::prelude::*;
use winnow::token::{any, take_till};

use super::ast::DateToken;

/// Parse a date pattern into tokens.
pub fn parse_date_pattern(input: &str) -> Vec<DateToken> {
    let mut remaining = input;
    let parsed: ModalResult<Vec<DateToken>> = repeat(0.., token).parse_next(&mut remaining);
    match parsed {
        Ok(tokens) if remaining.is_empty() => merge_literals(tokens),
        _ => vec![DateToken::Literal(input.to_string())],
    }
}

fn token(input: &mut &str) -> ModalResult<DateToken> {
    alt((
        "YYYY".value(DateToken::Year),
        "YY".value(DateToken::ShortYear),
        "MMMM".value(DateToken::MonthName),
        "MMM".value(DateToken::ShortMonthName),
        "MM".value(DateToken::PaddedMonth),
        "M".value(DateToken::Month),
        "DD".value(DateToken::PaddedDay),
        "D".value(DateToken::Day),
        escaped,
        any.map(|c: char| DateToken::Literal(c.to_string())),
    ))
    .parse_next(input)
}

/// Parse `[literal text]`.
fn escaped(input: &mut &str) -> ModalResult<DateToken> {
    delimited('[', take_till(0.., ']'), ']')
        .map(|text: &str| DateToken::Literal(text.to_string()))
        .parse_next(input)
}

fn merge_literals(tokens: Vec<DateToken>) -> Vec<DateToken> {
    let mut result: Vec<DateToken> = Vec::with_capacity(tokens.len());
    for token in tokens {
        match (result.last_mut(), token) {
            (Some(DateToken::Literal(prev)), DateToken::Literal(text)) => prev.push_str(&text),
            (_, token) => result.push(token),
        }
    }
    result
}
