//! Field transformer engine.
//!
//! This module turns a [`Record`](crate::Record) and an ordered list of
//! [`TransformerRule`]s into a flat [`FieldMap`](crate::FieldMap). Each rule
//! dispatches on its [`Operation`], computes a [`Field`](crate::Field),
//! flattens it to a display string and optionally picks one character out of
//! it for boxed layouts.

mod boxes;
mod engine;
mod operations;
mod rule;

pub use boxes::{box_rules, char_at};
pub use engine::{DEFAULT_HOME_COUNTRY, TransformEngine};
pub use rule::{
    ApplicantNameParams, DateFieldParams, FieldValueParams, IdentifierParams, NameFormat,
    NumberConversionParams, OfflineAddressParams, Operation, TransformerRule,
};
