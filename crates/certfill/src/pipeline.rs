//! End-to-end certificate composition.

use crate::error::CertificateError;
use crate::format::Locale;
use crate::template::{RenderableTemplate, TemplateDefinition, compile};
use crate::transform::TransformEngine;
use crate::types::{FieldMap, Record};

/// Fill `definition` from `record` and compile it for the renderer.
///
/// Runs the definition's rules, writes `extra` over the result (fee fields,
/// for example) and compiles the body.
///
/// # Errors
///
/// Returns [`CertificateError::Configuration`] when a rule is misconfigured and
/// [`CertificateError::Compile`] when a placeholder is left unresolved.
///
/// # Example
///
/// ```
/// use certfill::{
///     ApplicantNameParams, DateFieldParams, FieldMap, Locale, Record, TemplateBody,
///     TemplateDefinition, TransformEngine, TransformerRule, compose,
/// };
/// use serde_json::json;
///
/// let definition = TemplateDefinition::builder()
///     .body(TemplateBody::Markup("Name: {childName}, DOB: {eventDate}".to_string()))
///     .rules(vec![
///         TransformerRule::new(
///             "eventDate",
///             DateFieldParams::builder().key("child.birthDate").format("DD/MM/YYYY").build(),
///         ),
///         TransformerRule::new(
///             "childName",
///             ApplicantNameParams::builder().actor("child").upper_case(true).build(),
///         ),
///     ])
///     .build();
/// let record = Record::new(json!({
///     "child": { "birthDate": "2024-03-21", "firstNamesEng": "Jane", "familyNameEng": "Doe" }
/// }));
///
/// let engine = TransformEngine::new();
/// let rendered = compose(&engine, &definition, &record, &Locale::new(), FieldMap::new()).unwrap();
/// assert_eq!(rendered.as_markup(), Some("Name: JANE DOE, DOB: 21/03/2024"));
/// ```
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(template = %definition.id, language = locale.language())
)]
pub fn compose(
    engine: &TransformEngine,
    definition: &TemplateDefinition,
    record: &Record,
    locale: &Locale,
    extra: FieldMap,
) -> Result<RenderableTemplate, CertificateError> {
    let fields = engine.run(record, &definition.rules, locale)?.merged(extra);
    Ok(compile(definition, &fields)?)
}
