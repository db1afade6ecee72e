// crates/watchface-config/src/descriptor.rs
// ============================================================================
// Module: Field Descriptors
// Description: Typed descriptor model for the watchface settings form.
// Purpose: One variant per descriptor kind, each carrying only its attributes.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Descriptors are the elements of the settings form: display-only headings
//! and text, section groupings, keyed controls (select, color, toggle) and the
//! terminal submit action. The serde representation matches the Clay form
//! format consumed by the companion app: the kind is carried in `type`, keys
//! in `messageKey` and defaults (or display text) in `defaultValue`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de;
use serde::de::Visitor;

// ============================================================================
// SECTION: Descriptor Kinds
// ============================================================================

/// Closed set of descriptor kinds understood by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DescriptorKind {
    /// Display-only heading.
    Heading,
    /// Display-only paragraph.
    Text,
    /// Ordered grouping of descriptors.
    Section,
    /// Single-choice control.
    Select,
    /// Color-picker control.
    Color,
    /// Boolean switch.
    Toggle,
    /// Terminal submit action.
    Submit,
}

impl DescriptorKind {
    /// All kinds in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Heading,
        Self::Text,
        Self::Section,
        Self::Select,
        Self::Color,
        Self::Toggle,
        Self::Submit,
    ];

    /// Returns the wire discriminant for the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Heading => "heading",
            Self::Text => "text",
            Self::Section => "section",
            Self::Select => "select",
            Self::Color => "color",
            Self::Toggle => "toggle",
            Self::Submit => "submit",
        }
    }

    /// Resolves a wire discriminant, returning `None` for unlisted kinds.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }

    /// Returns true when descriptors of this kind carry a `messageKey`.
    #[must_use]
    pub const fn is_keyed(self) -> bool {
        matches!(self, Self::Select | Self::Color | Self::Toggle)
    }
}

impl fmt::Display for DescriptorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Scalar Values
// ============================================================================

/// Stable identifier under which the host reports a control's value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageKey(String);

impl MessageKey {
    /// Creates a message key.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MessageKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Single-character option code shared by the form and the watch application.
///
/// The watch stores the chosen code as one byte, so codes stay one character
/// wide on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionCode(char);

impl OptionCode {
    /// Creates an option code.
    #[must_use]
    pub const fn new(code: char) -> Self {
        Self(code)
    }

    /// Returns the code character.
    #[must_use]
    pub const fn as_char(self) -> char {
        self.0
    }

    /// Parses a code from a string holding exactly one character.
    #[must_use]
    pub fn from_single(value: &str) -> Option<Self> {
        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (Some(code), None) => Some(Self(code)),
            _ => None,
        }
    }
}

impl fmt::Display for OptionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Largest value representable as a 24-bit RGB color.
pub const MAX_RGB24: u32 = 0x00FF_FFFF;

/// RGB color value written as `0xRRGGBB` on the wire.
///
/// Values are stored unchecked so that out-of-range defaults can be reported
/// by form validation with their position; see [`HexColor::is_rgb24`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HexColor(u32);

/// Hex digits in a color literal.
const RGB24_DIGITS: usize = 6;

impl HexColor {
    /// Creates a color from a packed `0xRRGGBB` value.
    #[must_use]
    pub const fn from_rgb(rgb: u32) -> Self {
        Self(rgb)
    }

    /// Returns the packed value.
    #[must_use]
    pub const fn rgb(self) -> u32 {
        self.0
    }

    /// Returns true when the value fits in 24 bits.
    #[must_use]
    pub const fn is_rgb24(self) -> bool {
        self.0 <= MAX_RGB24
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:06X}", self.0)
    }
}

/// Error raised when a color literal cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color literal `{0}`: expected 0xRRGGBB")]
pub struct ParseColorError(String);

impl FromStr for HexColor {
    type Err = ParseColorError;

    /// Parses `0xRRGGBB` or `0XRRGGBB` with exactly six hex digits.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let digits = value
            .strip_prefix("0x")
            .or_else(|| value.strip_prefix("0X"))
            .ok_or_else(|| ParseColorError(value.to_string()))?;
        if digits.len() != RGB24_DIGITS || !digits.bytes().all(|byte| byte.is_ascii_hexdigit()) {
            return Err(ParseColorError(value.to_string()));
        }
        u32::from_str_radix(digits, 16).map(Self).map_err(|_| ParseColorError(value.to_string()))
    }
}

impl Serialize for HexColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HexColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(HexColorVisitor)
    }
}

/// Accepts either the string literal form or a plain integer.
struct HexColorVisitor;

impl Visitor<'_> for HexColorVisitor {
    type Value = HexColor;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a 0xRRGGBB string or an integer color")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        value.parse().map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        u32::try_from(value)
            .map(HexColor)
            .map_err(|_| E::custom(format!("color {value} exceeds 32 bits")))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        u64::try_from(value)
            .map_err(|_| E::custom(format!("color {value} is negative")))
            .and_then(|value| self.visit_u64(value))
    }
}

// ============================================================================
// SECTION: Descriptors
// ============================================================================

/// One element of the settings form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldDescriptor {
    /// Display-only heading.
    Heading(HeadingField),
    /// Display-only paragraph.
    Text(TextField),
    /// Ordered grouping of descriptors.
    Section(SectionField),
    /// Single-choice control.
    Select(SelectField),
    /// Color-picker control.
    Color(ColorField),
    /// Boolean switch.
    Toggle(ToggleField),
    /// Terminal submit action.
    Submit(SubmitField),
}

impl FieldDescriptor {
    /// Returns the descriptor kind.
    #[must_use]
    pub const fn kind(&self) -> DescriptorKind {
        match self {
            Self::Heading(_) => DescriptorKind::Heading,
            Self::Text(_) => DescriptorKind::Text,
            Self::Section(_) => DescriptorKind::Section,
            Self::Select(_) => DescriptorKind::Select,
            Self::Color(_) => DescriptorKind::Color,
            Self::Toggle(_) => DescriptorKind::Toggle,
            Self::Submit(_) => DescriptorKind::Submit,
        }
    }

    /// Returns the message key for keyed controls.
    #[must_use]
    pub const fn key(&self) -> Option<&MessageKey> {
        match self {
            Self::Select(field) => Some(&field.key),
            Self::Color(field) => Some(&field.key),
            Self::Toggle(field) => Some(&field.key),
            Self::Heading(_) | Self::Text(_) | Self::Section(_) | Self::Submit(_) => None,
        }
    }

    /// Returns the user-facing label or display text.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Heading(field) => Some(&field.text),
            Self::Text(field) => Some(&field.text),
            Self::Select(field) => Some(&field.label),
            Self::Color(field) => Some(&field.label),
            Self::Toggle(field) => Some(&field.label),
            Self::Submit(field) => Some(&field.label),
            Self::Section(_) => None,
        }
    }

    /// Shorthand for a heading descriptor.
    #[must_use]
    pub fn heading(text: impl Into<String>) -> Self {
        Self::Heading(HeadingField {
            text: text.into(),
        })
    }

    /// Shorthand for a text descriptor.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(TextField {
            text: text.into(),
        })
    }

    /// Shorthand for a section descriptor.
    #[must_use]
    pub const fn section(items: Vec<Self>) -> Self {
        Self::Section(SectionField {
            items,
        })
    }

    /// Shorthand for a submit descriptor.
    #[must_use]
    pub fn submit(label: impl Into<String>) -> Self {
        Self::Submit(SubmitField {
            label: label.into(),
        })
    }

    /// Shorthand for a toggle descriptor.
    #[must_use]
    pub fn toggle(key: &str, default: bool, label: impl Into<String>) -> Self {
        Self::Toggle(ToggleField {
            key: MessageKey::from(key),
            default,
            label: label.into(),
        })
    }

    /// Shorthand for a color descriptor.
    #[must_use]
    pub fn color(key: &str, default: u32, allow_grayscale: bool, label: impl Into<String>) -> Self {
        Self::Color(ColorField {
            key: MessageKey::from(key),
            default: HexColor::from_rgb(default),
            allow_grayscale,
            label: label.into(),
        })
    }
}

/// Display-only heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeadingField {
    /// Heading text.
    #[serde(rename = "defaultValue")]
    pub text: String,
}

/// Display-only paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TextField {
    /// Paragraph text.
    #[serde(rename = "defaultValue")]
    pub text: String,
}

/// Ordered grouping of descriptors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SectionField {
    /// Grouped descriptors in display order.
    pub items: Vec<FieldDescriptor>,
}

/// Single-choice control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SelectField {
    /// Key under which the chosen value is reported.
    #[serde(rename = "messageKey")]
    pub key: MessageKey,
    /// Default option value.
    #[serde(rename = "defaultValue")]
    pub default: OptionCode,
    /// Control label.
    pub label: String,
    /// Options in display order.
    pub options: Vec<SelectOption>,
}

impl SelectField {
    /// Returns true when `code` is one of the declared option values.
    #[must_use]
    pub fn offers(&self, code: OptionCode) -> bool {
        self.options.iter().any(|option| option.value == code)
    }
}

/// One entry of a select control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SelectOption {
    /// Option label.
    pub label: String,
    /// Reported value.
    pub value: OptionCode,
}

impl SelectOption {
    /// Creates an option.
    #[must_use]
    pub fn new(label: impl Into<String>, value: char) -> Self {
        Self {
            label: label.into(),
            value: OptionCode::new(value),
        }
    }
}

/// Color-picker control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColorField {
    /// Key under which the chosen color is reported.
    #[serde(rename = "messageKey")]
    pub key: MessageKey,
    /// Default color.
    #[serde(rename = "defaultValue")]
    pub default: HexColor,
    /// Whether gray swatches are offered alongside color swatches.
    #[serde(rename = "allowGray", default, skip_serializing_if = "is_false")]
    pub allow_grayscale: bool,
    /// Control label.
    pub label: String,
}

/// Boolean switch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToggleField {
    /// Key under which the switch state is reported.
    #[serde(rename = "messageKey")]
    pub key: MessageKey,
    /// Default switch state.
    #[serde(rename = "defaultValue")]
    pub default: bool,
    /// Control label.
    pub label: String,
}

/// Terminal submit action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubmitField {
    /// Button label.
    #[serde(rename = "defaultValue")]
    pub label: String,
}

/// Skips serializing `allowGray` when unset.
#[allow(clippy::trivially_copy_pass_by_ref, reason = "serde skip predicates take references.")]
const fn is_false(value: &bool) -> bool {
    !*value
}
