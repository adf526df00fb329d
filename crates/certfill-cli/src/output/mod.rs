//! Output formatting: miette diagnostics and tables.

pub mod diagnostic;
pub mod table;

pub use diagnostic::load_report;
