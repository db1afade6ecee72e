// crates/watchface-config/src/schema.rs
// ============================================================================
// Module: Form Schemas
// Description: JSON schema builder for the settings form wire representation.
// Purpose: Provide a canonical validation schema for generated form artifacts.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! This module defines the JSON Schema for the Clay form array. One branch is
//! emitted per descriptor kind so the closed kind set is enforced by tooling
//! that never links this crate.

use serde_json::Value;
use serde_json::json;

use crate::descriptor::DescriptorKind;
use crate::descriptor::MAX_RGB24;

/// Returns the JSON schema for the settings form array.
#[must_use]
pub fn form_schema() -> Value {
    let branches: Vec<Value> = DescriptorKind::ALL
        .into_iter()
        .map(|kind| json!({ "$ref": format!("#/$defs/{}", kind.as_str()) }))
        .collect();
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "$id": "watchface-config://schemas/settings-form.schema.json",
        "title": "Watchface Settings Form",
        "description": "Ordered descriptors rendered by the companion app settings host.",
        "type": "array",
        "minItems": 1,
        "items": { "$ref": "#/$defs/descriptor" },
        "$defs": {
            "descriptor": { "oneOf": branches },
            "heading": display_schema("heading", "Heading text."),
            "text": display_schema("text", "Paragraph text."),
            "section": section_schema(),
            "select": select_schema(),
            "color": color_schema(),
            "toggle": toggle_schema(),
            "submit": display_schema("submit", "Submit button label."),
            "messageKey": {
                "type": "string",
                "minLength": 1,
                "description": "Key under which the host reports the control value."
            },
            "optionCode": {
                "type": "string",
                "minLength": 1,
                "maxLength": 1,
                "description": "Single-character option code."
            },
            "hexColor": {
                "oneOf": [
                    {
                        "type": "string",
                        "pattern": "^0[xX][0-9A-Fa-f]{6}$"
                    },
                    {
                        "type": "integer",
                        "minimum": 0,
                        "maximum": MAX_RGB24
                    }
                ],
                "description": "24-bit RGB color."
            }
        }
    })
}

// ============================================================================
// SECTION: Descriptor Schemas
// ============================================================================

/// Schema for descriptors whose only attribute is display text.
fn display_schema(kind: &str, description: &str) -> Value {
    json!({
        "type": "object",
        "properties": {
            "type": { "const": kind },
            "defaultValue": { "type": "string", "description": description }
        },
        "required": ["type", "defaultValue"],
        "additionalProperties": false
    })
}

/// Schema for section groupings.
fn section_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "type": { "const": "section" },
            "items": {
                "type": "array",
                "items": { "$ref": "#/$defs/descriptor" }
            }
        },
        "required": ["type", "items"],
        "additionalProperties": false
    })
}

/// Schema for select controls.
fn select_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "type": { "const": "select" },
            "messageKey": { "$ref": "#/$defs/messageKey" },
            "defaultValue": { "$ref": "#/$defs/optionCode" },
            "label": { "type": "string" },
            "options": {
                "type": "array",
                "minItems": 1,
                "items": {
                    "type": "object",
                    "properties": {
                        "label": { "type": "string" },
                        "value": { "$ref": "#/$defs/optionCode" }
                    },
                    "required": ["label", "value"],
                    "additionalProperties": false
                }
            }
        },
        "required": ["type", "messageKey", "defaultValue", "label", "options"],
        "additionalProperties": false
    })
}

/// Schema for color controls.
fn color_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "type": { "const": "color" },
            "messageKey": { "$ref": "#/$defs/messageKey" },
            "defaultValue": { "$ref": "#/$defs/hexColor" },
            "allowGray": {
                "type": "boolean",
                "default": false,
                "description": "Offer gray swatches alongside color swatches."
            },
            "label": { "type": "string" }
        },
        "required": ["type", "messageKey", "defaultValue", "label"],
        "additionalProperties": false
    })
}

/// Schema for toggle controls.
fn toggle_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "type": { "const": "toggle" },
            "messageKey": { "$ref": "#/$defs/messageKey" },
            "defaultValue": { "type": "boolean" },
            "label": { "type": "string" }
        },
        "required": ["type", "messageKey", "defaultValue", "label"],
        "additionalProperties": false
    })
}
