// crates/watchface-config/src/lib.rs
// ============================================================================
// Module: Watchface Config Library
// Description: Canonical settings form model, validation, and artifacts.
// Purpose: Single source of truth for the watchface settings form.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! `watchface-config` defines the settings form the companion app renders for
//! the watchface: headings, prose, a clock-style selector, color pickers,
//! toggles and a submit action. It provides a typed descriptor model, a
//! fail-closed validating constructor, the Clay JSON wire encoding, a JSON
//! Schema for that encoding, generated docs, and typed resolution of the
//! choices a host reports back.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod choices;
pub mod descriptor;
pub mod docs;
pub mod form;
pub mod schema;
pub mod wire;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use choices::ChoiceError;
pub use choices::ChoiceValue;
pub use choices::Choices;
pub use descriptor::*;
pub use docs::DocsError;
pub use docs::form_docs_markdown;
pub use docs::render_form_docs;
pub use docs::verify_form_docs;
pub use docs::write_form_docs;
pub use form::*;
pub use schema::form_schema;
pub use wire::MAX_FORM_BYTES;
