// crates/watchface-config/src/wire.rs
// ============================================================================
// Module: Form Wire Representation
// Description: Clay JSON encoding and decoding for the settings form.
// Purpose: Exchange the form with the companion app host without losing order.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! The host loads the form as a JSON array of descriptors (or as a CommonJS
//! module exporting that array). Decoding is fail-closed: descriptor kinds are
//! checked against the closed set before any field is decoded, so an unlisted
//! kind is reported as [`SchemaError::UnknownDescriptorType`] with its
//! position. Sections are decoded item by item, so a malformed nested
//! descriptor is reported at its own path, and the decoded form then goes
//! through [`SettingsForm::new`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde_json::Map;
use serde_json::Value;

use crate::descriptor::DescriptorKind;
use crate::descriptor::FieldDescriptor;
use crate::descriptor::SectionField;
use crate::form::DescriptorPath;
use crate::form::SchemaError;
use crate::form::SettingsForm;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum accepted size of an encoded form in bytes.
pub const MAX_FORM_BYTES: usize = 256 * 1024;
/// Prefix of the CommonJS module the host loads.
const JS_MODULE_PREFIX: &str = "module.exports = ";
/// Attributes a section object may carry.
const SECTION_FIELDS: [&str; 2] = ["type", "items"];

// ============================================================================
// SECTION: Encoding
// ============================================================================

impl SettingsForm {
    /// Encodes the form as a JSON array.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] when serialization fails.
    pub fn to_json_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Encodes the form as pretty-printed JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] when serialization fails.
    pub fn to_json_string_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Renders the `config.js` module the host loads.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] when serialization fails.
    pub fn to_js_module(&self) -> Result<String, serde_json::Error> {
        let body = self.to_json_string_pretty()?;
        Ok(format!("{JS_MODULE_PREFIX}{body};\n"))
    }

    // ========================================================================
    // SECTION: Decoding
    // ========================================================================

    /// Decodes and validates a form from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`] when the text is oversized, not JSON, or does
    /// not describe a valid form.
    pub fn from_json_str(text: &str) -> Result<Self, SchemaError> {
        if text.len() > MAX_FORM_BYTES {
            return Err(SchemaError::Malformed {
                path: DescriptorPath::form(),
                detail: format!("form exceeds {MAX_FORM_BYTES} bytes"),
            });
        }
        let value: Value = serde_json::from_str(text).map_err(|err| SchemaError::Malformed {
            path: DescriptorPath::form(),
            detail: err.to_string(),
        })?;
        Self::from_json_value(&value)
    }

    /// Decodes and validates a form from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`] when the value does not describe a valid form.
    pub fn from_json_value(value: &Value) -> Result<Self, SchemaError> {
        let Value::Array(elements) = value else {
            return Err(SchemaError::Malformed {
                path: DescriptorPath::form(),
                detail: "form must be a JSON array".to_string(),
            });
        };
        for (index, element) in elements.iter().enumerate() {
            check_kinds(element, &DescriptorPath::top(index))?;
        }
        let items = elements
            .iter()
            .enumerate()
            .map(|(index, element)| decode_descriptor(element, &DescriptorPath::top(index)))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(items)
    }
}

// ============================================================================
// SECTION: Descriptor Decoding
// ============================================================================

/// Decodes one descriptor, descending into section items so that a malformed
/// child is reported at its own path.
fn decode_descriptor(
    element: &Value,
    path: &DescriptorPath,
) -> Result<FieldDescriptor, SchemaError> {
    if let Some(object) = element.as_object()
        && object.get("type").and_then(Value::as_str) == Some(DescriptorKind::Section.as_str())
    {
        return decode_section(object, path);
    }
    FieldDescriptor::deserialize(element).map_err(|err| SchemaError::Malformed {
        path: path.clone(),
        detail: err.to_string(),
    })
}

/// Decodes a section object and each of its items.
fn decode_section(
    object: &Map<String, Value>,
    path: &DescriptorPath,
) -> Result<FieldDescriptor, SchemaError> {
    let malformed = |detail: String| SchemaError::Malformed {
        path: path.clone(),
        detail,
    };
    if let Some(field) = object.keys().find(|field| !SECTION_FIELDS.contains(&field.as_str())) {
        return Err(malformed(format!("unknown field `{field}`, expected `items`")));
    }
    let Some(items) = object.get("items") else {
        return Err(malformed("missing field `items`".to_string()));
    };
    let Value::Array(children) = items else {
        return Err(malformed("section `items` must be a JSON array".to_string()));
    };
    let items = children
        .iter()
        .enumerate()
        .map(|(index, child)| decode_descriptor(child, &path.child(index)))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(FieldDescriptor::Section(SectionField {
        items,
    }))
}

// ============================================================================
// SECTION: Kind Checks
// ============================================================================

/// Checks that `element` and any nested section items declare a known kind.
fn check_kinds(element: &Value, path: &DescriptorPath) -> Result<(), SchemaError> {
    let Some(object) = element.as_object() else {
        return Err(SchemaError::Malformed {
            path: path.clone(),
            detail: "descriptor must be a JSON object".to_string(),
        });
    };
    let Some(raw_kind) = object.get("type").and_then(Value::as_str) else {
        return Err(SchemaError::Malformed {
            path: path.clone(),
            detail: "descriptor is missing a string `type`".to_string(),
        });
    };
    let Some(kind) = DescriptorKind::parse(raw_kind) else {
        return Err(SchemaError::UnknownDescriptorType {
            kind: raw_kind.to_string(),
            path: path.clone(),
        });
    };
    if kind == DescriptorKind::Section
        && let Some(Value::Array(children)) = object.get("items")
    {
        for (index, child) in children.iter().enumerate() {
            check_kinds(child, &path.child(index))?;
        }
    }
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================
