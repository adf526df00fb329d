//! Static lint rules for template definitions.
//!
//! Checks a definition without running it against a record: rule outputs the
//! body never uses, placeholders nothing declares, and address clause order.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::template::compiler::compute_suggestions;
use crate::template::definition::TemplateDefinition;

/// A problem found by [`lint_definition`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LintWarning {
    /// A rule writes a field the body never references.
    #[error("template '{template}': field '{field}' is computed but never used")]
    UnusedOutput { template: String, field: String },

    /// The body references a field that no rule or optional field declares.
    #[error(
        "template '{template}': placeholder '{name}' is not declared{}",
        format_hint(suggestions)
    )]
    UndeclaredPlaceholder {
        template: String,
        name: String,
        suggestions: Vec<String>,
    },

    /// More than one rule writes the same field; only the last one counts.
    #[error("template '{template}': field '{field}' is written by {count} rules")]
    OverwrittenOutput {
        template: String,
        field: String,
        count: usize,
    },

    /// An address clause list has a misplaced default.
    #[error("template '{template}': {message}")]
    Configuration { template: String, message: String },
}

fn format_hint(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" (did you mean {}?)", suggestions.join(", "))
    }
}

/// Run every lint rule over `definition`.
///
/// Undeclared placeholders are listed even though the caller may supply them
/// at compile time; pass those names through `optionalFields` to silence them.
pub fn lint_definition(definition: &TemplateDefinition) -> Vec<LintWarning> {
    let mut warnings = Vec::new();
    lint_address_clauses(definition, &mut warnings);
    lint_overwritten_outputs(definition, &mut warnings);
    lint_unused_outputs(definition, &mut warnings);
    lint_undeclared_placeholders(definition, &mut warnings);
    warnings
}

fn lint_address_clauses(definition: &TemplateDefinition, warnings: &mut Vec<LintWarning>) {
    if let Err(error) = definition.validate() {
        warnings.push(LintWarning::Configuration {
            template: definition.id.clone(),
            message: error.to_string(),
        });
    }
}

fn lint_overwritten_outputs(definition: &TemplateDefinition, warnings: &mut Vec<LintWarning>) {
    let mut seen = BTreeSet::new();
    let mut reported = BTreeSet::new();
    for rule in &definition.rules {
        let field = rule.output_field.as_str();
        if !seen.insert(field) && reported.insert(field) {
            let count = definition
                .rules
                .iter()
                .filter(|other| other.output_field == field)
                .count();
            warnings.push(LintWarning::OverwrittenOutput {
                template: definition.id.clone(),
                field: field.to_string(),
                count,
            });
        }
    }
}

fn lint_unused_outputs(definition: &TemplateDefinition, warnings: &mut Vec<LintWarning>) {
    let used = definition.placeholders();
    let outputs: BTreeSet<&str> = definition
        .rules
        .iter()
        .map(|rule| rule.output_field.as_str())
        .collect();
    for field in outputs {
        if !used.contains(field) {
            warnings.push(LintWarning::UnusedOutput {
                template: definition.id.clone(),
                field: field.to_string(),
            });
        }
    }
}

fn lint_undeclared_placeholders(definition: &TemplateDefinition, warnings: &mut Vec<LintWarning>) {
    let declared = definition.declared_fields();
    let known: Vec<String> = declared.iter().map(|name| (*name).to_string()).collect();
    for name in definition.placeholders() {
        if !declared.contains(name.as_str()) {
            let suggestions = compute_suggestions(&name, known.iter());
            warnings.push(LintWarning::UndeclaredPlaceholder {
                template: definition.id.clone(),
                name,
                suggestions,
            });
        }
    }
}
