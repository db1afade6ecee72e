// crates/watchface-config/src/choices.rs
// ============================================================================
// Module: Reported Choices
// Description: Typed resolution of the values a host reports for each key.
// Purpose: Give the watch application one checked value per form control.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! [`Choices`] holds one value per keyed control, starting from the form
//! defaults. A host reports the user's selections as a JSON object keyed by
//! message key; [`Choices::apply_reported`] checks every entry against its
//! control's value domain and applies them all or none.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

use crate::descriptor::FieldDescriptor;
use crate::descriptor::HexColor;
use crate::descriptor::MessageKey;
use crate::descriptor::OptionCode;
use crate::form::SettingsForm;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised when a reported value cannot be applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChoiceError {
    /// The payload names a key the form does not declare.
    #[error("unknown key `{0}`")]
    UnknownKey(String),
    /// The reported value has the wrong JSON type for its control.
    #[error("key `{key}` expects {expected}")]
    TypeMismatch {
        /// Control key.
        key: MessageKey,
        /// Expected value shape.
        expected: &'static str,
    },
    /// The reported value lies outside the control's value domain.
    #[error("key `{key}` value out of domain: {detail}")]
    OutOfDomain {
        /// Control key.
        key: MessageKey,
        /// Human-readable reason.
        detail: String,
    },
}

// ============================================================================
// SECTION: Values
// ============================================================================

/// Typed value of one control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ChoiceValue {
    /// Select option code.
    Option(OptionCode),
    /// Color value.
    Color(HexColor),
    /// Toggle state.
    Toggle(bool),
}

/// Resolved values keyed by message key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Choices {
    /// Current value per key.
    values: BTreeMap<MessageKey, ChoiceValue>,
}

impl Choices {
    /// Returns the form defaults for every keyed control.
    #[must_use]
    pub fn defaults(form: &SettingsForm) -> Self {
        let values = form
            .controls()
            .into_iter()
            .filter_map(|control| match control {
                FieldDescriptor::Select(field) => {
                    Some((field.key.clone(), ChoiceValue::Option(field.default)))
                }
                FieldDescriptor::Color(field) => {
                    Some((field.key.clone(), ChoiceValue::Color(field.default)))
                }
                FieldDescriptor::Toggle(field) => {
                    Some((field.key.clone(), ChoiceValue::Toggle(field.default)))
                }
                _ => None,
            })
            .collect();
        Self {
            values,
        }
    }

    /// Applies a reported payload. Keys absent from the payload keep their value.
    ///
    /// # Errors
    ///
    /// Returns [`ChoiceError`] for the first invalid entry; no entry is applied
    /// in that case.
    pub fn apply_reported(
        &mut self,
        form: &SettingsForm,
        reported: &Map<String, Value>,
    ) -> Result<(), ChoiceError> {
        let mut staged = Vec::with_capacity(reported.len());
        for (key, value) in reported {
            let control = form.find(key).ok_or_else(|| ChoiceError::UnknownKey(key.clone()))?;
            staged.push(resolve(control, value)?);
        }
        for (key, value) in staged {
            self.values.insert(key, value);
        }
        Ok(())
    }

    /// Returns the value stored for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<ChoiceValue> {
        self.values.get(&MessageKey::from(key)).copied()
    }

    /// Returns the option code stored for a select key.
    #[must_use]
    pub fn option(&self, key: &str) -> Option<OptionCode> {
        match self.get(key) {
            Some(ChoiceValue::Option(code)) => Some(code),
            _ => None,
        }
    }

    /// Returns the color stored for a color key.
    #[must_use]
    pub fn color(&self, key: &str) -> Option<HexColor> {
        match self.get(key) {
            Some(ChoiceValue::Color(color)) => Some(color),
            _ => None,
        }
    }

    /// Returns the state stored for a toggle key.
    #[must_use]
    pub fn toggle(&self, key: &str) -> Option<bool> {
        match self.get(key) {
            Some(ChoiceValue::Toggle(state)) => Some(state),
            _ => None,
        }
    }

    /// Returns the number of stored values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true when no values are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// ============================================================================
// SECTION: Resolution
// ============================================================================

/// Converts a reported JSON value into the typed value of `control`.
fn resolve(
    control: &FieldDescriptor,
    value: &Value,
) -> Result<(MessageKey, ChoiceValue), ChoiceError> {
    match control {
        FieldDescriptor::Select(field) => {
            let code = value.as_str().and_then(OptionCode::from_single).ok_or_else(|| {
                ChoiceError::TypeMismatch {
                    key: field.key.clone(),
                    expected: "a single-character string",
                }
            })?;
            if !field.offers(code) {
                return Err(ChoiceError::OutOfDomain {
                    key: field.key.clone(),
                    detail: format!("`{code}` is not a declared option"),
                });
            }
            Ok((field.key.clone(), ChoiceValue::Option(code)))
        }
        FieldDescriptor::Color(field) => {
            let color = match value {
                Value::String(text) => text.parse::<HexColor>().map_err(|err| {
                    ChoiceError::OutOfDomain {
                        key: field.key.clone(),
                        detail: err.to_string(),
                    }
                })?,
                Value::Number(number) => number
                    .as_u64()
                    .and_then(|raw| u32::try_from(raw).ok())
                    .map(HexColor::from_rgb)
                    .ok_or_else(|| ChoiceError::OutOfDomain {
                        key: field.key.clone(),
                        detail: format!("{number} is not a 24-bit RGB value"),
                    })?,
                _ => {
                    return Err(ChoiceError::TypeMismatch {
                        key: field.key.clone(),
                        expected: "an integer or 0xRRGGBB string",
                    });
                }
            };
            if !color.is_rgb24() {
                return Err(ChoiceError::OutOfDomain {
                    key: field.key.clone(),
                    detail: format!("{color} is not a 24-bit RGB value"),
                });
            }
            Ok((field.key.clone(), ChoiceValue::Color(color)))
        }
        FieldDescriptor::Toggle(field) => {
            let state = match value {
                Value::Bool(state) => *state,
                Value::Number(number) if number.as_u64() == Some(0) => false,
                Value::Number(number) if number.as_u64() == Some(1) => true,
                _ => {
                    return Err(ChoiceError::TypeMismatch {
                        key: field.key.clone(),
                        expected: "a boolean or 0/1",
                    });
                }
            };
            Ok((field.key.clone(), ChoiceValue::Toggle(state)))
        }
        other => Err(ChoiceError::UnknownKey(format!("{} has no value", other.kind()))),
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
