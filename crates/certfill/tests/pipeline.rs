//! End-to-end tests: record and definition in, render-ready template out.

use certfill::fees::{EventType, FeeSchedule, FeeTiers};
use certfill::{
    ApplicantNameParams, CertificateError, DateFieldParams, FieldMap, Locale, Operation, Record,
    TemplateBody, TemplateDefinition, TransformEngine, TransformerRule, box_rules, compose, fields,
};
use insta::assert_snapshot;
use serde_json::json;

fn record() -> Record {
    Record::new(json!({
        "child": { "birthDate": "2024-03-21", "firstNamesEng": "Jane", "familyNameEng": "Doe" },
        "registration": { "number": "2024B7JXEBP" }
    }))
}

fn definition(markup: &str) -> TemplateDefinition {
    TemplateDefinition::builder()
        .id("birth-certificate")
        .body(TemplateBody::Markup(markup.to_string()))
        .rules(vec![
            TransformerRule::new(
                "eventDate",
                DateFieldParams::builder()
                    .key("child.birthDate")
                    .format("DD/MM/YYYY")
                    .build(),
            ),
            TransformerRule::new(
                "childName",
                ApplicantNameParams::builder()
                    .actor("child")
                    .upper_case(true)
                    .build(),
            ),
        ])
        .build()
}

#[test]
fn full_pipeline() {
    let rendered = compose(
        &TransformEngine::new(),
        &definition("Name: {childName}, DOB: {eventDate}"),
        &record(),
        &Locale::new(),
        FieldMap::new(),
    )
    .unwrap();
    assert_snapshot!(rendered.as_markup().unwrap(), @"Name: JANE DOE, DOB: 21/03/2024");
}

#[test]
fn engine_output_matches_expected_field_map() {
    let fields = TransformEngine::new()
        .run(
            &record(),
            &definition("").rules,
            &Locale::new(),
        )
        .unwrap();
    assert_eq!(
        fields,
        fields! { "eventDate" => "21/03/2024", "childName" => "JANE DOE" }
    );
}

#[test]
fn fee_fields_are_merged_before_compilation() {
    let tiers = FeeTiers {
        free_period: 45,
        charge_up_limit: 365,
        lowest_charge: 5.0,
        highest_charge: 20.0,
    };
    let schedule = FeeSchedule::from_tiers(365, tiers, tiers).unwrap();
    // 2024-06-01T00:00:00Z, 72 days after the birth.
    let fee = schedule
        .assess(EventType::Birth, "2024-03-21", 1_717_200_000_000)
        .unwrap();

    let mut template = definition("{childName}: {amount} ({tierMessage})");
    template.optional_fields = vec!["amount".to_string(), "tierMessage".to_string()];

    let rendered = compose(
        &TransformEngine::new(),
        &template,
        &record(),
        &Locale::new(),
        fee.to_fields("amount", "tierMessage"),
    )
    .unwrap();
    assert_eq!(
        rendered.as_markup(),
        Some("JANE DOE: 5.00 (withinChargeRange)")
    );
}

#[test]
fn extra_fields_override_rule_outputs() {
    let rendered = compose(
        &TransformEngine::new(),
        &definition("{childName}"),
        &record(),
        &Locale::new(),
        fields! { "childName" => "J. DOE" },
    )
    .unwrap();
    assert_eq!(rendered.as_markup(), Some("J. DOE"));
}

#[test]
fn boxed_registration_number() {
    let mut template = definition("{brn0}{brn1}{brn2}{brn3}|{brn10}|{brn11}");
    template
        .rules
        .extend(box_rules("brn", &Operation::field_value("registration.number"), 12));
    let rendered = compose(
        &TransformEngine::new(),
        &template,
        &record(),
        &Locale::new(),
        FieldMap::new(),
    )
    .unwrap();
    assert_eq!(rendered.as_markup(), Some("2024|P|"));
}

#[test]
fn unresolved_placeholder_fails_the_certificate() {
    let result = compose(
        &TransformEngine::new(),
        &definition("{childName} {motherName}"),
        &record(),
        &Locale::new(),
        FieldMap::new(),
    );
    let Err(CertificateError::Compile(error)) = result else {
        panic!("expected a compile error");
    };
    assert!(error.to_string().contains("motherName"));
}

#[test]
fn configuration_errors_propagate() {
    let template: TemplateDefinition = serde_json::from_value(json!({
        "id": "broken",
        "body": { "markup": "{placeOfBirth}" },
        "rules": [{
            "outputField": "placeOfBirth",
            "operation": "OfflineAddress",
            "parameters": { "conditionalKeys": [{
                "condition": { "key": "eventLocation.type", "matchValues": ["HEALTH_FACILITY"] },
                "addresses": { "localAddress": "{eventLocation.name}" }
            }] }
        }]
    }))
    .unwrap();
    let result = compose(
        &TransformEngine::new(),
        &template,
        &record(),
        &Locale::new(),
        FieldMap::new(),
    );
    let Err(error @ CertificateError::Configuration(_)) = result else {
        panic!("expected a configuration error");
    };
    assert_eq!(
        error.to_string(),
        "certificate template misconfigured: no address condition matched for field \
         'placeOfBirth' and no default clause is defined"
    );
}
