//! Integration tests for template compilation and linting.

use std::collections::BTreeMap;

use certfill::template::{FontFamily, compute_suggestions};
use certfill::{
    AddressCondition, AddressTemplates, CompileIntegrityError, ConditionalAddressKey, FieldMap,
    LintWarning, OfflineAddressParams, Operation, TemplateBody, TemplateDefinition,
    TransformerRule, compile, fields, lint_definition,
};
use insta::assert_snapshot;
use serde_json::json;

fn markup(text: &str) -> TemplateDefinition {
    TemplateDefinition::builder()
        .id("test")
        .body(TemplateBody::Markup(text.to_string()))
        .build()
}

fn with_rules(text: &str, outputs: &[&str]) -> TemplateDefinition {
    TemplateDefinition::builder()
        .id("test")
        .body(TemplateBody::Markup(text.to_string()))
        .rules(
            outputs
                .iter()
                .map(|name| TransformerRule::new(*name, Operation::field_value("child.name")))
                .collect(),
        )
        .build()
}

// =========================================================================
// Markup
// =========================================================================

#[test]
fn fills_markup_placeholders() {
    let rendered = compile(
        &markup("Name: {childName}, DOB: {eventDate}"),
        &fields! { "childName" => "JANE DOE", "eventDate" => "21/03/2024" },
    )
    .unwrap();
    assert_snapshot!(rendered.as_markup().unwrap(), @"Name: JANE DOE, DOB: 21/03/2024");
}

#[test]
fn keeps_svg_and_css_intact() {
    let svg = r#"<svg><style>text{font-family:Noto}</style><text x="10">{ childName }</text></svg>"#;
    let rendered = compile(&markup(svg), &fields! { "childName" => "Jane" }).unwrap();
    assert_eq!(
        rendered.as_markup(),
        Some(r#"<svg><style>text{font-family:Noto}</style><text x="10">Jane</text></svg>"#)
    );
}

#[test]
fn substituted_values_are_not_rescanned() {
    let rendered = compile(
        &markup("{a}|{b}"),
        &fields! { "a" => "{b}", "b" => "B" },
    )
    .unwrap();
    assert_eq!(rendered.as_markup(), Some("{b}|B"));
}

#[test]
fn template_without_placeholders_is_unchanged() {
    let rendered = compile(&markup("Republic of Farajaland"), &FieldMap::new()).unwrap();
    assert_eq!(rendered.as_markup(), Some("Republic of Farajaland"));
}

#[test]
fn declared_fields_may_be_absent() {
    let mut template =
        with_rules("Reg: {registrationNumber} Fee: {amount}", &["registrationNumber"]);
    template.optional_fields = vec!["amount".to_string()];
    let rendered = compile(&template, &FieldMap::new()).unwrap();
    assert_eq!(rendered.as_markup(), Some("Reg:  Fee: "));
}

#[test]
fn unresolved_placeholders_are_an_error() {
    let template = with_rules("{childName} {childNme} {motherName}", &["childName"]);
    let error = compile(&template, &fields! { "childName" => "Jane" }).unwrap_err();
    assert_eq!(
        error,
        CompileIntegrityError::UnresolvedPlaceholders {
            names: vec!["childNme".to_string(), "motherName".to_string()],
            suggestions: vec!["childName".to_string()],
        }
    );
    assert_eq!(
        error.to_string(),
        "unresolved placeholders: childNme, motherName (did you mean childName?)"
    );
}

// =========================================================================
// Documents
// =========================================================================

#[test]
fn fills_document_string_leaves() {
    let template = TemplateDefinition::builder()
        .id("doc")
        .body(TemplateBody::Document(json!({
            "pageSize": "A4",
            "pageMargins": [20, 40, 20, 40],
            "content": [
                { "text": "Certificate of birth", "style": "header" },
                { "text": "This is to certify that {childName} was born on {eventDate}", "bold": true },
                { "columns": [{ "text": "{registrationNumber}" }] }
            ]
        })))
        .build();
    let rendered = compile(
        &template,
        &fields! {
            "childName" => "JANE DOE",
            "eventDate" => "21/03/2024",
            "registrationNumber" => "2024B7JXEBP",
        },
    )
    .unwrap();

    assert_eq!(
        rendered.as_document(),
        Some(&json!({
            "pageSize": "A4",
            "pageMargins": [20, 40, 20, 40],
            "content": [
                { "text": "Certificate of birth", "style": "header" },
                { "text": "This is to certify that JANE DOE was born on 21/03/2024", "bold": true },
                { "columns": [{ "text": "2024B7JXEBP" }] }
            ]
        }))
    );
}

#[test]
fn document_reports_every_unresolved_leaf() {
    let template = TemplateDefinition::builder()
        .body(TemplateBody::Document(json!({ "a": "{x}", "b": ["{y}", "{x}"] })))
        .build();
    let Err(CompileIntegrityError::UnresolvedPlaceholders { names, .. }) =
        compile(&template, &FieldMap::new())
    else {
        panic!("expected unresolved placeholders");
    };
    assert_eq!(names, vec!["x", "y"]);
}

#[test]
fn fonts_are_carried_through() {
    let fonts = BTreeMap::from([(
        "bn".to_string(),
        FontFamily {
            normal: "NotoSansBengali-Light.ttf".to_string(),
            bold: Some("NotoSansBengali-Regular.ttf".to_string()),
            italics: None,
            bolditalics: None,
        },
    )]);
    let template = TemplateDefinition::builder()
        .id("birth")
        .body(TemplateBody::Markup("x".to_string()))
        .fonts(fonts.clone())
        .build();
    let rendered = compile(&template, &FieldMap::new()).unwrap();
    assert_eq!(rendered.id, "birth");
    assert_eq!(rendered.fonts, fonts);
}

#[test]
fn definition_deserializes_from_json() {
    let template: TemplateDefinition = serde_json::from_value(json!({
        "id": "birth-certificate",
        "body": { "markup": "<svg>{childName}</svg>" },
        "rules": [
            { "outputField": "childName", "operation": "ApplicantName", "parameters": { "actor": "child" } }
        ],
        "fonts": { "en": { "normal": "NotoSans-Light.ttf" } },
        "optionalFields": ["amount"]
    }))
    .unwrap();
    assert_eq!(template.rules.len(), 1);
    assert!(template.declared_fields().contains("amount"));
    assert_eq!(
        template.placeholders().into_iter().collect::<Vec<_>>(),
        vec!["childName"]
    );
}

// =========================================================================
// Suggestions
// =========================================================================

#[test]
fn suggestions_are_closest_first_and_bounded() {
    let available: Vec<String> = ["childName", "childNames", "chldName", "motherName", "x"]
        .iter()
        .map(|s| (*s).to_string())
        .collect();
    assert_eq!(
        compute_suggestions("childNme", available.iter()),
        vec!["childName", "childNames", "chldName"]
    );
    assert!(compute_suggestions("ab", available.iter()).is_empty());
}

// =========================================================================
// Lint
// =========================================================================

#[test]
fn lint_reports_unused_and_undeclared() {
    let template = with_rules("{childName} {motherNam}", &["childName", "motherName"]);
    let warnings = lint_definition(&template);
    assert_eq!(
        warnings,
        vec![
            LintWarning::UnusedOutput {
                template: "test".to_string(),
                field: "motherName".to_string(),
            },
            LintWarning::UndeclaredPlaceholder {
                template: "test".to_string(),
                name: "motherNam".to_string(),
                suggestions: vec!["motherName".to_string()],
            },
        ]
    );
    assert_snapshot!(
        warnings[1].to_string(),
        @"template 'test': placeholder 'motherNam' is not declared (did you mean motherName?)"
    );
}

#[test]
fn lint_reports_overwritten_outputs() {
    let template = with_rules("{a}", &["a", "a", "a"]);
    assert_eq!(
        lint_definition(&template),
        vec![LintWarning::OverwrittenOutput {
            template: "test".to_string(),
            field: "a".to_string(),
            count: 3,
        }]
    );
}

#[test]
fn lint_reports_misplaced_default_clause() {
    let clause = |condition| ConditionalAddressKey {
        condition,
        addresses: AddressTemplates {
            country_key: None,
            local_address: "{x}".to_string(),
            international_address: None,
            location_keys: Vec::new(),
        },
    };
    let template = TemplateDefinition::builder()
        .id("test")
        .body(TemplateBody::Markup("{placeOfBirth}".to_string()))
        .rules(vec![TransformerRule::new(
            "placeOfBirth",
            Operation::OfflineAddress(OfflineAddressParams {
                conditional_keys: vec![
                    clause(AddressCondition::Default { default: true }),
                    clause(AddressCondition::Match {
                        key: "eventLocation.type".to_string(),
                        match_values: vec!["OTHER".to_string()],
                    }),
                ],
            }),
        )])
        .build();
    let warnings = lint_definition(&template);
    assert_eq!(warnings.len(), 1);
    assert!(matches!(warnings[0], LintWarning::Configuration { .. }));
}

#[test]
fn clean_template_has_no_warnings() {
    let template = with_rules("{a} {b}", &["a", "b"]);
    assert!(lint_definition(&template).is_empty());
}
