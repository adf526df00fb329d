//! Certificate template definitions and their compilation.
//!
//! A [`TemplateDefinition`] pairs a render target (markup text such as SVG,
//! or a structured document-object tree) with the transformer rules that fill
//! it. [`compile`] merges a [`FieldMap`](crate::FieldMap) into the target and
//! refuses to emit output with unresolved placeholders.

mod compiler;
mod definition;
mod lint;

pub use compiler::{RenderableTemplate, RenderedBody, compile, compute_suggestions};
pub use definition::{FontFamily, TemplateBody, TemplateDefinition};
pub use lint::{LintWarning, lint_definition};
