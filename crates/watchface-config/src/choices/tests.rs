// crates/watchface-config/src/choices/tests.rs
// ============================================================================
// Module: Reported Choices Unit Tests
// Description: Domain checks for host-reported control values.
// Purpose: Ensure reported payloads are typed, checked, and applied atomically.
// Dependencies: watchface-config, serde_json
// ============================================================================

// ============================================================================
// SECTION: Lint Configuration
// ============================================================================

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    clippy::missing_docs_in_private_items,
    reason = "Test-only validation helpers use panic-based assertions for clarity."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Map;
use serde_json::Value;
use serde_json::json;

use super::ChoiceError;
use super::ChoiceValue;
use super::Choices;
use crate::descriptor::HexColor;
use crate::descriptor::OptionCode;
use crate::form::settings_form;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn payload(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => panic!("payload must be an object"),
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn defaults_cover_every_control() {
    let choices = Choices::defaults(&settings_form());
    assert_eq!(choices.len(), 13);
    assert_eq!(choices.option("SelectClock"), Some(OptionCode::new('d')));
    assert_eq!(choices.color("LeftStripeColor"), Some(HexColor::from_rgb(0x55_5555)));
    assert_eq!(choices.toggle("BatteryBarToggle"), Some(true));
    assert_eq!(choices.toggle("InvertOutline"), Some(false));
}

#[test]
fn reported_values_override_defaults() {
    let form = settings_form();
    let mut choices = Choices::defaults(&form);
    choices
        .apply_reported(
            &form,
            &payload(json!({
                "SelectClock": "a",
                "TextColor": 0xFF_0000,
                "HandsColor": "0x00FF00",
                "InvertOutline": 1,
                "HourDots": false
            })),
        )
        .unwrap();
    assert_eq!(choices.option("SelectClock"), Some(OptionCode::new('a')));
    assert_eq!(choices.color("TextColor"), Some(HexColor::from_rgb(0xFF_0000)));
    assert_eq!(choices.color("HandsColor"), Some(HexColor::from_rgb(0x00_FF00)));
    assert_eq!(choices.toggle("InvertOutline"), Some(true));
    assert_eq!(choices.toggle("HourDots"), Some(false));
    assert_eq!(choices.toggle("StrapDetails"), Some(true));
}

#[test]
fn invalid_entry_leaves_choices_untouched() {
    let form = settings_form();
    let mut choices = Choices::defaults(&form);
    let before = choices.clone();
    let err = choices
        .apply_reported(&form, &payload(json!({ "HourDots": false, "SelectClock": "x" })))
        .unwrap_err();
    assert!(matches!(err, ChoiceError::OutOfDomain { .. }));
    assert_eq!(choices, before);
}

#[test]
fn unknown_key_is_rejected() {
    let form = settings_form();
    let mut choices = Choices::defaults(&form);
    let err = choices.apply_reported(&form, &payload(json!({ "Brightness": 3 }))).unwrap_err();
    assert_eq!(err, ChoiceError::UnknownKey("Brightness".to_string()));
}

#[test]
fn type_mismatches_are_rejected() {
    let form = settings_form();
    let mut choices = Choices::defaults(&form);
    for reported in [
        json!({ "SelectClock": 1 }),
        json!({ "TextColor": true }),
        json!({ "HourDots": "yes" }),
        json!({ "HourDots": 2 }),
    ] {
        let err = choices.apply_reported(&form, &payload(reported)).unwrap_err();
        assert!(matches!(err, ChoiceError::TypeMismatch { .. }), "unexpected {err}");
    }
}

#[test]
fn wide_colors_are_out_of_domain() {
    let form = settings_form();
    let mut choices = Choices::defaults(&form);
    let err =
        choices.apply_reported(&form, &payload(json!({ "TextColor": 0x0100_0000 }))).unwrap_err();
    assert!(matches!(err, ChoiceError::OutOfDomain { .. }));
}

#[test]
fn choices_serialize_as_flat_object() {
    let choices = Choices::defaults(&settings_form());
    let value = serde_json::to_value(&choices).unwrap();
    assert_eq!(value["SelectClock"], json!("d"));
    assert_eq!(value["WatchFaceColor"], json!("0xFFFFFF"));
    assert_eq!(value["StrapDetails"], json!(true));
    assert_eq!(choices.get("SelectClock"), Some(ChoiceValue::Option(OptionCode::new('d'))));
}
