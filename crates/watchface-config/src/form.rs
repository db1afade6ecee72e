// crates/watchface-config/src/form.rs
// ============================================================================
// Module: Settings Form
// Description: Canonical watchface settings form and its construction checks.
// Purpose: Provide the immutable form consumed by the companion app host.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! [`settings_form`] returns the canonical form in display order. Forms built
//! programmatically go through [`SettingsForm::new`], which enforces the form
//! invariants and fails closed with a [`SchemaError`] naming the violated rule
//! and the offending descriptor position:
//! - message keys are unique across the whole form,
//! - exactly one submit exists and it is the last top-level descriptor,
//! - select defaults are declared options and color defaults fit in 24 bits.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::descriptor::FieldDescriptor;
use crate::descriptor::MessageKey;
use crate::descriptor::OptionCode;
use crate::descriptor::SelectField;
use crate::descriptor::SelectOption;

// ============================================================================
// SECTION: Descriptor Paths
// ============================================================================

/// Position of a descriptor: a top-level index followed by section item indexes.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DescriptorPath(Vec<usize>);

impl DescriptorPath {
    /// Path of the form itself.
    #[must_use]
    pub const fn form() -> Self {
        Self(Vec::new())
    }

    /// Path of a top-level descriptor.
    #[must_use]
    pub fn top(index: usize) -> Self {
        Self(vec![index])
    }

    /// Path of an item nested in the section at `self`.
    #[must_use]
    pub fn child(&self, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(index);
        Self(segments)
    }

    /// Returns the index segments.
    #[must_use]
    pub fn segments(&self) -> &[usize] {
        &self.0
    }

    /// Returns true for top-level descriptor paths.
    #[must_use]
    pub fn is_top_level(&self) -> bool {
        self.0.len() == 1
    }
}

impl fmt::Display for DescriptorPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some((first, rest)) = self.0.split_first() else {
            return f.write_str("form");
        };
        write!(f, "[{first}]")?;
        for index in rest {
            write!(f, ".items[{index}]")?;
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised when a form violates its invariants or cannot be decoded.
///
/// # Invariants
/// - Every variant carries the [`DescriptorPath`] of the offending descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A message key is declared more than once.
    #[error("duplicate key `{key}` at {path} (first declared at {first})")]
    DuplicateKey {
        /// Repeated key.
        key: MessageKey,
        /// Position of the repeated declaration.
        path: DescriptorPath,
        /// Position of the first declaration.
        first: DescriptorPath,
    },
    /// The submit descriptor is absent, repeated, nested or not last.
    #[error("missing or misplaced submit at {path}: {detail}")]
    MissingOrMisplacedSubmit {
        /// Offending position (the expected slot when submit is missing).
        path: DescriptorPath,
        /// Human-readable reason.
        detail: String,
    },
    /// A default lies outside its control's value domain.
    #[error("default for `{key}` at {path} is out of domain: {detail}")]
    DefaultOutOfDomain {
        /// Control key.
        key: MessageKey,
        /// Control position.
        path: DescriptorPath,
        /// Human-readable reason.
        detail: String,
    },
    /// A descriptor declares a kind outside the closed set.
    #[error("unknown descriptor type `{kind}` at {path}")]
    UnknownDescriptorType {
        /// Declared kind.
        kind: String,
        /// Descriptor position.
        path: DescriptorPath,
    },
    /// A descriptor cannot be decoded from its external representation.
    #[error("malformed descriptor at {path}: {detail}")]
    Malformed {
        /// Descriptor position.
        path: DescriptorPath,
        /// Decoder message.
        detail: String,
    },
}

impl SchemaError {
    /// Returns the position the error refers to.
    #[must_use]
    pub const fn path(&self) -> &DescriptorPath {
        match self {
            Self::DuplicateKey {
                path, ..
            }
            | Self::MissingOrMisplacedSubmit {
                path, ..
            }
            | Self::DefaultOutOfDomain {
                path, ..
            }
            | Self::UnknownDescriptorType {
                path, ..
            }
            | Self::Malformed {
                path, ..
            } => path,
        }
    }
}

// ============================================================================
// SECTION: Settings Form
// ============================================================================

/// Validated, ordered settings form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SettingsForm {
    /// Top-level descriptors in display order.
    items: Vec<FieldDescriptor>,
}

impl SettingsForm {
    /// Builds a form after checking every form invariant.
    ///
    /// # Errors
    ///
    /// Returns the first [`SchemaError`] found in display order; a missing
    /// trailing submit is reported after every descriptor has been checked.
    pub fn new(items: Vec<FieldDescriptor>) -> Result<Self, SchemaError> {
        validate_items(&items)?;
        Ok(Self {
            items,
        })
    }

    /// Returns the top-level descriptors in display order.
    #[must_use]
    pub fn items(&self) -> &[FieldDescriptor] {
        &self.items
    }

    /// Consumes the form and returns its descriptors.
    #[must_use]
    pub fn into_items(self) -> Vec<FieldDescriptor> {
        self.items
    }

    /// Returns every descriptor depth-first in display order with its position.
    #[must_use]
    pub fn walk(&self) -> Vec<(DescriptorPath, &FieldDescriptor)> {
        let mut out = Vec::new();
        for (index, item) in self.items.iter().enumerate() {
            walk_into(DescriptorPath::top(index), item, &mut out);
        }
        out
    }

    /// Returns the keyed controls in display order.
    #[must_use]
    pub fn controls(&self) -> Vec<&FieldDescriptor> {
        self.walk()
            .into_iter()
            .filter_map(|(_, descriptor)| descriptor.kind().is_keyed().then_some(descriptor))
            .collect()
    }

    /// Finds the control declared under `key`.
    #[must_use]
    pub fn find(&self, key: &str) -> Option<&FieldDescriptor> {
        self.controls().into_iter().find(|descriptor| {
            descriptor.key().is_some_and(|declared| declared.as_str() == key)
        })
    }
}

/// Appends `descriptor` and its nested items to `out`.
fn walk_into<'a>(
    path: DescriptorPath,
    descriptor: &'a FieldDescriptor,
    out: &mut Vec<(DescriptorPath, &'a FieldDescriptor)>,
) {
    let children = match descriptor {
        FieldDescriptor::Section(section) => Some(&section.items),
        _ => None,
    };
    out.push((path.clone(), descriptor));
    if let Some(children) = children {
        for (index, child) in children.iter().enumerate() {
            walk_into(path.child(index), child, out);
        }
    }
}

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Checks form invariants over the top-level descriptors.
fn validate_items(items: &[FieldDescriptor]) -> Result<(), SchemaError> {
    let last = items.len().checked_sub(1);
    let mut keys: BTreeMap<&MessageKey, DescriptorPath> = BTreeMap::new();
    let mut pending = Vec::new();
    for (index, item) in items.iter().enumerate() {
        walk_into(DescriptorPath::top(index), item, &mut pending);
    }
    for (path, descriptor) in pending {
        if let Some(key) = descriptor.key() {
            if let Some(first) = keys.get(key) {
                return Err(SchemaError::DuplicateKey {
                    key: key.clone(),
                    path,
                    first: first.clone(),
                });
            }
            keys.insert(key, path.clone());
        }
        match descriptor {
            FieldDescriptor::Select(select) => check_select_default(select, &path)?,
            FieldDescriptor::Color(color) if !color.default.is_rgb24() => {
                return Err(SchemaError::DefaultOutOfDomain {
                    key: color.key.clone(),
                    path,
                    detail: format!("{} is not a 24-bit RGB value", color.default),
                });
            }
            FieldDescriptor::Submit(_) => {
                if !path.is_top_level() {
                    return Err(SchemaError::MissingOrMisplacedSubmit {
                        path,
                        detail: "submit must not be nested in a section".to_string(),
                    });
                }
                if path.segments().first().copied() != last {
                    return Err(SchemaError::MissingOrMisplacedSubmit {
                        path,
                        detail: "submit must be the final top-level descriptor".to_string(),
                    });
                }
            }
            _ => {}
        }
    }
    match items.last() {
        Some(FieldDescriptor::Submit(_)) => Ok(()),
        _ => Err(SchemaError::MissingOrMisplacedSubmit {
            path: DescriptorPath::top(items.len()),
            detail: "form must end with a submit descriptor".to_string(),
        }),
    }
}

/// Checks that a select default is one of its declared option values.
fn check_select_default(select: &SelectField, path: &DescriptorPath) -> Result<(), SchemaError> {
    if select.options.is_empty() {
        return Err(SchemaError::DefaultOutOfDomain {
            key: select.key.clone(),
            path: path.clone(),
            detail: "select declares no options".to_string(),
        });
    }
    if !select.offers(select.default) {
        return Err(SchemaError::DefaultOutOfDomain {
            key: select.key.clone(),
            path: path.clone(),
            detail: format!("`{}` is not a declared option value", select.default),
        });
    }
    Ok(())
}

// ============================================================================
// SECTION: Canonical Form
// ============================================================================

/// Clock style code for the digital face.
pub const CLOCK_DIGITAL: OptionCode = OptionCode::new('d');
/// Clock style code for the analog face.
pub const CLOCK_ANALOG: OptionCode = OptionCode::new('a');

/// Returns the canonical watchface settings form.
///
/// The result is identical on every call.
#[must_use]
pub fn settings_form() -> SettingsForm {
    SettingsForm {
        items: vec![
            FieldDescriptor::heading("Watchface Configuration"),
            FieldDescriptor::text("You can customize your watchface here."),
            FieldDescriptor::section(vec![
                FieldDescriptor::heading("Clocks"),
                FieldDescriptor::Select(SelectField {
                    key: MessageKey::from("SelectClock"),
                    default: CLOCK_DIGITAL,
                    label: "Preferred Clock Type".to_string(),
                    options: vec![
                        SelectOption::new("Digital", CLOCK_DIGITAL.as_char()),
                        SelectOption::new("Analog", CLOCK_ANALOG.as_char()),
                    ],
                }),
            ]),
            FieldDescriptor::section(vec![
                FieldDescriptor::heading("Colors"),
                FieldDescriptor::color("LeftStripeColor", 0x55_5555, true, "Left Background Stripe"),
                FieldDescriptor::color(
                    "RightStripeColor",
                    0x55_5555,
                    true,
                    "Right Background Stripe",
                ),
                FieldDescriptor::color("WatchBandColor", 0xFF_FFFF, true, "Watchband (Middle Stripe)"),
                FieldDescriptor::color("WatchFaceColor", 0xFF_FFFF, true, "Watchface (Circle)"),
                FieldDescriptor::color("BatteryColor", 0xAA_AAAA, true, "Battery Bar"),
                FieldDescriptor::color("TextColor", 0x00_0000, false, "Clock Text"),
                FieldDescriptor::color("HandsColor", 0x00_0000, false, "Minute/Hour Hands (Analog)"),
                FieldDescriptor::color("SecondHandColor", 0xAA_AAAA, true, "Second Hand (Analog)"),
            ]),
            FieldDescriptor::section(vec![
                FieldDescriptor::heading("Details"),
                FieldDescriptor::toggle("BatteryBarToggle", true, "Draw Circular Battery Meter"),
                FieldDescriptor::toggle("StrapDetails", true, "Draw Watchstrap Details"),
                FieldDescriptor::toggle("HourDots", true, "Draw Clock Hour Markings"),
                FieldDescriptor::toggle("InvertOutline", false, "Invert Outline Color"),
            ]),
            FieldDescriptor::text("When you have finished your selection, hit SAVE!"),
            FieldDescriptor::submit("Save Settings"),
        ],
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
