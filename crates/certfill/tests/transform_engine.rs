//! Integration tests for the field transformer engine.

use std::collections::BTreeMap;

use certfill::{
    AddressCondition, AddressTemplates, ApplicantNameParams, ConditionalAddressKey,
    ConfigurationError, DateFieldParams, DigitMap, IdentifierParams, JurisdictionTable, Locale,
    Location, NameFormat, NumberConversionParams, OfflineAddressParams, Operation, Record,
    TransformEngine, TransformerRule, box_rules,
};
use serde_json::json;

fn record() -> Record {
    Record::new(json!({
        "child": {
            "birthDate": "2024-03-21",
            "firstNamesEng": "Jane",
            "familyNameEng": "Doe",
            "firstNames": "জেন",
            "familyName": "ডো",
            "weight": 3.25
        },
        "mother": {
            "iD": "1234567890",
            "iDType": "NATIONAL_ID",
            "nationality": ["FAR", "", { "label": { "en": "Utopia", "bn": "ইউটোপিয়া" }, "value": "UTO" }]
        },
        "registration": { "number": "2024B7JXEBP" }
    }))
}

fn run(rules: &[TransformerRule]) -> certfill::FieldMap {
    TransformEngine::new()
        .run(&record(), rules, &Locale::new())
        .unwrap()
}

// =========================================================================
// Run semantics
// =========================================================================

#[test]
fn runs_are_idempotent() {
    let rules = vec![
        TransformerRule::new("registrationNumber", Operation::field_value("registration.number")),
        TransformerRule::new(
            "childName",
            ApplicantNameParams::builder().actor("child").build(),
        ),
    ];
    let engine = TransformEngine::new();
    let first = engine.run(&record(), &rules, &Locale::new()).unwrap();
    let second = engine.run(&record(), &rules, &Locale::new()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn last_write_wins() {
    let fields = run(&[
        TransformerRule::new("name", Operation::field_value("child.firstNamesEng")),
        TransformerRule::new("name", Operation::field_value("child.familyNameEng")),
    ]);
    assert_eq!(fields.get("name"), Some("Doe"));
    assert_eq!(fields.len(), 1);
}

#[test]
fn missing_values_leave_field_blank_and_run_continues() {
    let fields = run(&[
        TransformerRule::new("informant", Operation::field_value("informant.name")),
        TransformerRule::new(
            "badDate",
            DateFieldParams::builder().key("child.firstNamesEng").format("DD").build(),
        ),
        TransformerRule::new("registrationNumber", Operation::field_value("registration.number")),
    ]);
    assert_eq!(fields.get("informant"), Some(""));
    assert_eq!(fields.get("badDate"), Some(""));
    assert_eq!(fields.get("registrationNumber"), Some("2024B7JXEBP"));
}

#[test]
fn empty_rule_list_gives_empty_map() {
    assert!(run(&[]).is_empty());
}

// =========================================================================
// FieldValue and list flattening
// =========================================================================

#[test]
fn field_value_flattens_lists_and_labels() {
    let fields = run(&[
        TransformerRule::new("nationality", Operation::field_value("mother.nationality")),
        TransformerRule::new("weight", Operation::field_value("child.weight")),
    ]);
    assert_eq!(fields.get("nationality"), Some("FAR, Utopia"));
    assert_eq!(fields.get("weight"), Some("3.25"));
}

#[test]
fn labels_follow_the_locale() {
    let fields = TransformEngine::new()
        .run(
            &record(),
            &[TransformerRule::new("nationality", Operation::field_value("mother.nationality.2"))],
            &Locale::with_language("bn"),
        )
        .unwrap();
    assert_eq!(fields.get("nationality"), Some("ইউটোপিয়া"));
}

#[test]
fn nested_objects_are_not_displayable() {
    let fields = run(&[TransformerRule::new("child", Operation::field_value("child"))]);
    assert_eq!(fields.get("child"), Some(""));
}

// =========================================================================
// Box decomposition
// =========================================================================

#[test]
fn boxes_reassemble_the_original_value() {
    let rules = box_rules("brn", &Operation::field_value("registration.number"), 11);
    let fields = run(&rules);
    let joined: String = (0..11)
        .map(|i| fields.get(&format!("brn{i}")).unwrap_or_default())
        .collect();
    assert_eq!(joined, "2024B7JXEBP");
    assert_eq!(fields.get("brn4"), Some("B"));
}

#[test]
fn boxes_past_the_end_are_empty() {
    let rules = box_rules("brn", &Operation::field_value("registration.number"), 13);
    let fields = run(&rules);
    assert_eq!(fields.get("brn10"), Some("P"));
    assert_eq!(fields.get("brn11"), Some(""));
    assert_eq!(fields.get("brn12"), Some(""));
}

// =========================================================================
// IdentifierValue
// =========================================================================

#[test]
fn identifier_of_matching_type() {
    let fields = run(&[TransformerRule::new(
        "motherNid",
        IdentifierParams::builder()
            .section("mother")
            .id_type_value("NATIONAL_ID")
            .build(),
    )]);
    assert_eq!(fields.get("motherNid"), Some("1234567890"));
}

#[test]
fn identifier_of_other_type_is_blank() {
    let fields = run(&[TransformerRule::new(
        "motherPassport",
        IdentifierParams::builder()
            .section("mother")
            .id_type_value("PASSPORT")
            .build(),
    )]);
    assert_eq!(fields.get("motherPassport"), Some(""));
}

// =========================================================================
// DateFieldValue
// =========================================================================

#[test]
fn date_with_native_digits() {
    let rule = TransformerRule::new(
        "eventDate",
        DateFieldParams::builder()
            .key("child.birthDate")
            .format("DD MMMM YYYY")
            .convert_digits(true)
            .build(),
    );
    let fields = TransformEngine::new()
        .run(&record(), &[rule], &Locale::with_language("bn"))
        .unwrap();
    assert_eq!(fields.get("eventDate"), Some("২১ মার্চ ২০২৪"));
}

#[test]
fn date_without_digit_conversion_keeps_ascii() {
    let rule = TransformerRule::new(
        "eventDate",
        DateFieldParams::builder()
            .key("child.birthDate")
            .format("DD/MM/YYYY")
            .build(),
    );
    let fields = TransformEngine::new()
        .run(&record(), &[rule], &Locale::with_language("bn"))
        .unwrap();
    assert_eq!(fields.get("eventDate"), Some("21/03/2024"));
}

// =========================================================================
// ApplicantName
// =========================================================================

#[test]
fn name_uses_language_specific_fields() {
    let rule = TransformerRule::new(
        "childName",
        ApplicantNameParams::builder().actor("child").build(),
    );
    let bengali = TransformEngine::new()
        .run(&record(), &[rule.clone()], &Locale::with_language("bn"))
        .unwrap();
    assert_eq!(bengali.get("childName"), Some("জেন ডো"));
    assert_eq!(run(&[rule]).get("childName"), Some("Jane Doe"));
}

#[test]
fn name_with_custom_format_and_uppercase() {
    let formats = BTreeMap::from([(
        "en".to_string(),
        NameFormat {
            first_names: "firstNamesEng".to_string(),
            family_name: "familyNameEng".to_string(),
            family_name_first: true,
        },
    )]);
    let fields = run(&[TransformerRule::new(
        "childName",
        ApplicantNameParams::builder()
            .actor("child")
            .upper_case(true)
            .formats(formats)
            .build(),
    )]);
    assert_eq!(fields.get("childName"), Some("DOE JANE"));
}

#[test]
fn name_with_only_family_name() {
    let record = Record::new(json!({ "child": { "familyNameEng": "Doe" } }));
    let fields = TransformEngine::new()
        .run(
            &record,
            &[TransformerRule::new(
                "childName",
                ApplicantNameParams::builder().actor("child").build(),
            )],
            &Locale::new(),
        )
        .unwrap();
    assert_eq!(fields.get("childName"), Some("Doe"));
}

// =========================================================================
// NumberConversion
// =========================================================================

#[test]
fn number_conversion_uses_locale_digits() {
    let rule = TransformerRule::new(
        "registrationNumber",
        Operation::NumberConversion(NumberConversionParams {
            key: "registration.number".to_string(),
            digits: None,
        }),
    );
    let bengali = TransformEngine::new()
        .run(&record(), &[rule.clone()], &Locale::with_language("bn"))
        .unwrap();
    assert_eq!(bengali.get("registrationNumber"), Some("২০২৪B৭JXEBP"));
    assert_eq!(run(&[rule]).get("registrationNumber"), Some("2024B7JXEBP"));
}

#[test]
fn number_conversion_with_explicit_digits() {
    let rule = TransformerRule::new(
        "weight",
        Operation::NumberConversion(NumberConversionParams {
            key: "child.weight".to_string(),
            digits: DigitMap::for_language("th"),
        }),
    );
    assert_eq!(run(&[rule]).get("weight"), Some("๓.๒๕"));
}

// =========================================================================
// OfflineAddress
// =========================================================================

fn address_rule(default: bool) -> TransformerRule {
    let mut conditional_keys = vec![ConditionalAddressKey {
        condition: AddressCondition::Match {
            key: "eventLocation.type".to_string(),
            match_values: vec!["HEALTH_FACILITY".to_string()],
        },
        addresses: AddressTemplates {
            country_key: None,
            local_address: "{eventLocation.name}".to_string(),
            international_address: None,
            location_keys: Vec::new(),
        },
    }];
    if default {
        conditional_keys.push(ConditionalAddressKey {
            condition: AddressCondition::Default { default: true },
            addresses: AddressTemplates {
                country_key: None,
                local_address: "{eventLocation.district}".to_string(),
                international_address: None,
                location_keys: vec!["eventLocation.district".to_string()],
            },
        });
    }
    TransformerRule::new(
        "placeOfBirth",
        Operation::OfflineAddress(OfflineAddressParams { conditional_keys }),
    )
}

#[test]
fn address_uses_engine_jurisdictions() {
    let engine = TransformEngine::builder()
        .jurisdictions(JurisdictionTable::from(vec![Location {
            id: "ibombo".to_string(),
            name: "Ibombo".to_string(),
            alternative_names: BTreeMap::new(),
            parent: None,
            kind: Some("DISTRICT".to_string()),
        }]))
        .build();
    let record = Record::new(json!({
        "eventLocation": { "type": "PRIVATE_HOME", "district": "ibombo" }
    }));
    let fields = engine.run(&record, &[address_rule(true)], &Locale::new()).unwrap();
    assert_eq!(fields.get("placeOfBirth"), Some("Ibombo"));
    assert_eq!(engine.home_country(), "FAR");
}

#[test]
fn address_without_default_fails_the_run() {
    let record = Record::new(json!({ "eventLocation": { "type": "PRIVATE_HOME" } }));
    let result = TransformEngine::new().run(
        &record,
        &[
            TransformerRule::new(
                "registrationNumber",
                Operation::field_value("registration.number"),
            ),
            address_rule(false),
        ],
        &Locale::new(),
    );
    assert_eq!(
        result,
        Err(ConfigurationError::NoMatchingCondition {
            field: "placeOfBirth".to_string()
        })
    );
}

// =========================================================================
// Rule definitions
// =========================================================================

#[test]
fn rules_deserialize_from_json() {
    let rules: Vec<TransformerRule> = serde_json::from_value(json!([
        { "outputField": "eventDate", "operation": "DateFieldValue",
          "parameters": { "key": "child.birthDate", "format": "DD/MM/YYYY" } },
        { "outputField": "brn0", "operation": "FieldValue",
          "parameters": { "key": "registration.number" }, "valueIndex": 0 },
        { "outputField": "motherNid", "operation": "IdentifierValue",
          "parameters": { "section": "mother", "idTypeValue": "NATIONAL_ID" } },
        { "outputField": "childName", "operation": "ApplicantName",
          "parameters": { "actor": "child", "upperCase": true } },
        { "outputField": "brnBn", "operation": "NumberConversion",
          "parameters": { "key": "registration.number", "digits": "০১২৩৪৫৬৭৮৯" } }
    ]))
    .unwrap();

    assert_eq!(rules[1].value_index, Some(0));
    assert_eq!(rules[3].operation.name(), "ApplicantName");

    let fields = run(&rules);
    assert_eq!(fields.get("eventDate"), Some("21/03/2024"));
    assert_eq!(fields.get("brn0"), Some("2"));
    assert_eq!(fields.get("motherNid"), Some("1234567890"));
    assert_eq!(fields.get("childName"), Some("JANE DOE"));
    assert_eq!(fields.get("brnBn"), Some("২০২৪B৭JXEBP"));
}

#[test]
fn unknown_operations_are_rejected_at_load() {
    let result = serde_json::from_value::<TransformerRule>(json!({
        "outputField": "x", "operation": "Telepathy", "parameters": {}
    }));
    assert!(result.is_err());
}
