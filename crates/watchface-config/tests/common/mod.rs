// crates/watchface-config/tests/common/mod.rs
// =============================================================================
// Module: Form Test Helpers
// Description: Shared helpers for settings form integration tests.
// Purpose: Reduce duplication across integration tests for watchface-config.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use serde_json::Value;
use watchface_config::FieldDescriptor;
use watchface_config::SettingsForm;

/// Returns the canonical form encoded as JSON.
pub fn canonical_json() -> Result<Value, String> {
    watchface_config::settings_form().to_json_value().map_err(|err| err.to_string())
}

/// Returns the descriptor declared under `key`.
pub fn control<'a>(form: &'a SettingsForm, key: &str) -> Result<&'a FieldDescriptor, String> {
    form.find(key).ok_or_else(|| format!("missing control {key}"))
}

/// Returns a minimal valid form wrapping `items` ahead of a submit.
pub fn form_with(mut items: Vec<FieldDescriptor>) -> Vec<FieldDescriptor> {
    items.push(FieldDescriptor::submit("Save"));
    items
}
