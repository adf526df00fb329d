//! Parsers for markup templates and date patterns.
//!
//! Both parsers are total: text that does not form a placeholder or a date
//! token is kept verbatim as a literal, so parsing never fails.

pub mod ast;
mod date_pattern;
mod template;

pub use ast::*;
pub use date_pattern::parse_date_pattern;
pub use template::parse_template;
