//! Per-operation value computation.
//!
//! Every operation is a pure function of the record, its parameters and the
//! locale. Data problems surface as [`FieldResolutionError`]; only address
//! clause lists can raise a [`ConfigurationError`].

use crate::address::AddressResolver;
use crate::error::{ConfigurationError, FieldResolutionError};
use crate::format::{Locale, format_date, transliterate_digits, uppercase};
use crate::transform::rule::{
    ApplicantNameParams, DateFieldParams, IdentifierParams, NameFormat, NumberConversionParams,
    Operation,
};
use crate::types::{Field, Record};

/// Why a rule produced no value.
#[derive(Debug)]
pub(crate) enum RuleError {
    /// Recoverable: the field is left blank.
    Field(FieldResolutionError),
    /// Fatal for the run.
    Configuration(ConfigurationError),
}

impl From<FieldResolutionError> for RuleError {
    fn from(error: FieldResolutionError) -> Self {
        RuleError::Field(error)
    }
}

impl From<ConfigurationError> for RuleError {
    fn from(error: ConfigurationError) -> Self {
        RuleError::Configuration(error)
    }
}

/// Inputs shared by every rule of a run.
pub(crate) struct RuleContext<'a> {
    pub record: &'a Record,
    pub locale: &'a Locale,
    pub resolver: AddressResolver<'a>,
}

impl Operation {
    /// Compute the raw value of this operation for `output_field`.
    pub(crate) fn compute(
        &self,
        output_field: &str,
        ctx: &RuleContext<'_>,
    ) -> Result<Field, RuleError> {
        let language = ctx.locale.language();
        match self {
            Operation::FieldValue(params) => Ok(ctx.record.field(&params.key, language)?),
            Operation::IdentifierValue(params) => Ok(identifier_value(params, ctx)?),
            Operation::DateFieldValue(params) => Ok(date_field_value(params, ctx)?),
            Operation::ApplicantName(params) => Ok(applicant_name(params, ctx)?),
            Operation::NumberConversion(params) => Ok(number_conversion(params, ctx)?),
            Operation::OfflineAddress(params) => {
                let address = ctx.resolver.resolve(
                    output_field,
                    &params.conditional_keys,
                    ctx.record,
                    ctx.locale,
                )?;
                Ok(Field::Text(address))
            }
        }
    }
}

fn identifier_value(
    params: &IdentifierParams,
    ctx: &RuleContext<'_>,
) -> Result<Field, FieldResolutionError> {
    let type_path = format!("{}.{}", params.section, params.type_field);
    let found = ctx.record.text(&type_path).unwrap_or_default();
    if found != params.id_type_value {
        return Err(FieldResolutionError::IdentifierTypeMismatch {
            expected: params.id_type_value.clone(),
            found,
        });
    }
    let id_path = format!("{}.{}", params.section, params.id_field);
    ctx.record.field(&id_path, ctx.locale.language())
}

fn date_field_value(
    params: &DateFieldParams,
    ctx: &RuleContext<'_>,
) -> Result<Field, FieldResolutionError> {
    let raw = ctx
        .record
        .text(&params.key)
        .ok_or_else(|| FieldResolutionError::MissingPath {
            path: params.key.clone(),
        })?;
    let formatted = format_date(&raw, &params.format, ctx.locale.language())?;
    let converted = match ctx.locale.digit_map() {
        Some(map) if params.convert_digits => transliterate_digits(&formatted, &map),
        _ => formatted,
    };
    Ok(Field::Text(converted))
}

fn applicant_name(
    params: &ApplicantNameParams,
    ctx: &RuleContext<'_>,
) -> Result<Field, FieldResolutionError> {
    let language = ctx.locale.language();
    let format = params
        .formats
        .get(language)
        .or_else(|| params.formats.get(ctx.locale.primary_language()))
        .cloned()
        .unwrap_or_else(|| NameFormat::default_for(ctx.locale.primary_language()));

    let first_path = format!("{}.{}", params.actor, format.first_names);
    let family_path = format!("{}.{}", params.actor, format.family_name);
    let first = ctx.record.text(&first_path);
    let family = ctx.record.text(&family_path);
    if first.is_none() && family.is_none() {
        return Err(FieldResolutionError::MissingPath { path: first_path });
    }

    let ordered = if format.family_name_first {
        [family, first]
    } else {
        [first, family]
    };
    let name = ordered
        .into_iter()
        .flatten()
        .map(|part| part.trim().to_string())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    Ok(Field::Text(if params.upper_case {
        uppercase(&name, language)
    } else {
        name
    }))
}

fn number_conversion(
    params: &NumberConversionParams,
    ctx: &RuleContext<'_>,
) -> Result<Field, FieldResolutionError> {
    let value = ctx
        .record
        .field(&params.key, ctx.locale.language())?
        .to_display_string();
    Ok(Field::Text(
        match params.digits.or_else(|| ctx.locale.digit_map()) {
            Some(map) => transliterate_digits(&value, &map),
            None => value,
        },
    ))
}
