use super::*;

#[test]
fn catalog_runs_intro_to_email_in_fixed_order() {
    let keys: Vec<Option<FieldKey>> = steps().iter().map(|step| step.key).collect();
    assert_eq!(
        keys,
        vec![
            None,
            Some(FieldKey::Goal),
            Some(FieldKey::Area),
            Some(FieldKey::Level),
            Some(FieldKey::Specificity),
            Some(FieldKey::TimeHorizon),
            Some(FieldKey::Email),
        ]
    );
    assert_eq!(step_at(0).map(|step| step.kind), Some(StepKind::Intro));
    assert!(step_at(step_count()).is_none());
}

#[test]
fn only_single_choice_steps_carry_options() {
    for step in steps() {
        match step.kind {
            StepKind::SingleChoice => assert!(!step.options.is_empty(), "{:?}", step.key),
            _ => assert!(step.options.is_empty(), "{:?}", step.key),
        }
    }
}

#[test]
fn area_step_offers_other_with_companion_field() {
    let area = step_for(FieldKey::Area).expect("area step");
    assert!(area.has_option(OTHER_OPTION));
    assert_eq!(area.other_companion, Some(FieldKey::AreaOther));
}

#[test]
fn free_text_step_requires_twenty_characters() {
    let specificity = step_for(FieldKey::Specificity).expect("specificity step");
    assert_eq!(specificity.min_length, Some(20));
}

#[test]
fn email_shape_accepts_simple_addresses_only() {
    assert!(email_shape_matches("user@example.cz"));
    assert!(!email_shape_matches("a@b"));
    assert!(!email_shape_matches("noatsymbol.com"));
    assert!(!email_shape_matches(""));
    assert!(!email_shape_matches("user name@example.cz"));
}

#[test]
fn field_keys_accept_camel_case_alias() {
    let key: FieldKey = serde_json::from_str("\"timeHorizon\"").expect("alias");
    assert_eq!(key, FieldKey::TimeHorizon);
    assert_eq!(
        serde_json::to_string(&FieldKey::TimeHorizon).expect("json"),
        "\"time_horizon\""
    );
}
