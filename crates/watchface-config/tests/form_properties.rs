//! Canonical form property tests for watchface-config.
// crates/watchface-config/tests/form_properties.rs
// =============================================================================
// Module: Canonical Form Property Tests
// Description: Check the canonical form content and its invariants.
// Purpose: Ensure the form the host receives matches the watchface contract.
// =============================================================================

use std::collections::BTreeSet;

use watchface_config::DescriptorKind;
use watchface_config::FieldDescriptor;
use watchface_config::OptionCode;
use watchface_config::SelectOption;
use watchface_config::settings_form;

mod common;

type TestResult = Result<(), String>;

// ============================================================================
// SECTION: Invariants
// ============================================================================

#[test]
fn keys_are_unique_across_the_form() -> TestResult {
    let form = settings_form();
    let mut seen = BTreeSet::new();
    for control in form.controls() {
        let key = control.key().ok_or("control without key")?;
        if !seen.insert(key.as_str()) {
            return Err(format!("duplicate key {key}"));
        }
    }
    Ok(())
}

#[test]
fn submit_is_last_and_unique() -> TestResult {
    let form = settings_form();
    let submits: Vec<String> = form
        .walk()
        .into_iter()
        .filter(|(_, descriptor)| descriptor.kind() == DescriptorKind::Submit)
        .map(|(path, _)| path.to_string())
        .collect();
    if submits != vec![format!("[{}]", form.items().len() - 1)] {
        return Err(format!("unexpected submit positions: {submits:?}"));
    }
    Ok(())
}

#[test]
fn select_defaults_are_declared_options() -> TestResult {
    for control in settings_form().controls() {
        if let FieldDescriptor::Select(select) = control
            && !select.options.iter().any(|option| option.value == select.default)
        {
            return Err(format!("select {} default not offered", select.key));
        }
    }
    Ok(())
}

#[test]
fn color_defaults_are_24_bit() -> TestResult {
    for control in settings_form().controls() {
        if let FieldDescriptor::Color(color) = control {
            if !color.default.is_rgb24() {
                return Err(format!("color {} default is not 24-bit", color.key));
            }
            let reparsed: watchface_config::HexColor =
                color.default.to_string().parse().map_err(|err| format!("{err}"))?;
            if reparsed != color.default {
                return Err(format!("color {} does not reparse", color.key));
            }
        }
    }
    Ok(())
}

// ============================================================================
// SECTION: Concrete Content
// ============================================================================

#[test]
fn first_descriptor_is_the_form_heading() -> TestResult {
    match settings_form().items().first() {
        Some(FieldDescriptor::Heading(heading)) if heading.text == "Watchface Configuration" => {
            Ok(())
        }
        other => Err(format!("unexpected first descriptor: {other:?}")),
    }
}

#[test]
fn clock_select_defaults_to_digital() -> TestResult {
    let form = settings_form();
    let FieldDescriptor::Select(select) = common::control(&form, "SelectClock")? else {
        return Err("SelectClock is not a select".to_string());
    };
    if select.default != OptionCode::new('d') {
        return Err(format!("unexpected default {}", select.default));
    }
    let expected = vec![SelectOption::new("Digital", 'd'), SelectOption::new("Analog", 'a')];
    if select.options != expected {
        return Err(format!("unexpected options {:?}", select.options));
    }
    Ok(())
}

#[test]
fn battery_bar_toggle_defaults_on() -> TestResult {
    let form = settings_form();
    match common::control(&form, "BatteryBarToggle")? {
        FieldDescriptor::Toggle(toggle) if toggle.default => Ok(()),
        other => Err(format!("unexpected BatteryBarToggle: {other:?}")),
    }
}

#[test]
fn last_descriptor_is_save_settings() -> TestResult {
    match settings_form().items().last() {
        Some(FieldDescriptor::Submit(submit)) if submit.label == "Save Settings" => Ok(()),
        other => Err(format!("unexpected last descriptor: {other:?}")),
    }
}

#[test]
fn grayscale_is_offered_only_where_marked() -> TestResult {
    let form = settings_form();
    let expected_plain = ["TextColor", "HandsColor"];
    for control in form.controls() {
        if let FieldDescriptor::Color(color) = control {
            let plain = expected_plain.contains(&color.key.as_str());
            if color.allow_grayscale == plain {
                return Err(format!("unexpected allowGray for {}", color.key));
            }
        }
    }
    Ok(())
}

#[test]
fn sections_open_with_headings() -> TestResult {
    let form = settings_form();
    let headings: Vec<&str> = form
        .items()
        .iter()
        .filter_map(|item| match item {
            FieldDescriptor::Section(section) => section.items.first(),
            _ => None,
        })
        .filter_map(FieldDescriptor::label)
        .collect();
    if headings != ["Clocks", "Colors", "Details"] {
        return Err(format!("unexpected section headings {headings:?}"));
    }
    Ok(())
}
