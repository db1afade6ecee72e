// crates/watchface-config/src/docs.rs
// ============================================================================
// Module: Form Docs Generator
// Description: Markdown generator for the watchface settings reference.
// Purpose: Keep settings docs in sync with the canonical form.
// Dependencies: std, thiserror
// ============================================================================

//! ## Overview
//! Generates `docs/settings.md` from the canonical settings form. Output is
//! deterministic: one table per section, rows in display order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Write;
use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::descriptor::FieldDescriptor;
use crate::form::SettingsForm;
use crate::form::settings_form;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default output path for generated settings docs.
const DOCS_PATH: &str = "docs/settings.md";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised when writing or verifying settings docs.
#[derive(Debug, Error)]
pub enum DocsError {
    /// IO failure while reading or writing docs.
    #[error("docs io error: {0}")]
    Io(String),
    /// Generated docs do not match the committed file.
    #[error("docs drift: {0}")]
    Drift(String),
}

// ============================================================================
// SECTION: Public API
// ============================================================================

/// Generates the settings reference for the canonical form.
#[must_use]
pub fn form_docs_markdown() -> String {
    render_form_docs(&settings_form())
}

/// Generates the settings reference for an arbitrary form.
#[must_use]
pub fn render_form_docs(form: &SettingsForm) -> String {
    let mut out = String::new();

    out.push_str("<!--\n");
    out.push_str("docs/settings.md\n");
    out.push_str("============================================================================\n");
    out.push_str("Document: Watchface Settings Reference\n");
    out.push_str("Description: Controls, keys, and defaults of the watchface settings form.\n");
    out.push_str("Generated: This file is auto-generated; do not edit manually.\n");
    out.push_str("============================================================================\n");
    out.push_str("-->\n\n");

    out.push_str("# Watchface Settings\n\n");

    let mut loose = Vec::new();
    let mut section_count = 0usize;
    for item in form.items() {
        match item {
            FieldDescriptor::Heading(heading) => {
                let _ = writeln!(out, "## {}\n", heading.text);
            }
            FieldDescriptor::Text(text) => {
                let _ = writeln!(out, "{}\n", text.text);
            }
            FieldDescriptor::Section(section) => {
                section_count += 1;
                render_section(&mut out, &section.items, section_count, 3);
            }
            FieldDescriptor::Submit(submit) => {
                let _ = writeln!(out, "Choices are sent when **{}** is pressed.\n", submit.label);
            }
            control => loose.push(control),
        }
    }
    if !loose.is_empty() {
        out.push_str("### Other Controls\n\n");
        render_table(&mut out, &loose);
    }
    out
}

/// Writes the generated docs to `path` or the standard location.
///
/// # Errors
///
/// Returns [`DocsError`] when file output fails.
pub fn write_form_docs(path: Option<&Path>) -> Result<(), DocsError> {
    let path = path.unwrap_or_else(|| Path::new(DOCS_PATH));
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| DocsError::Io(err.to_string()))?;
    }
    fs::write(path, form_docs_markdown().as_bytes()).map_err(|err| DocsError::Io(err.to_string()))
}

/// Verifies the on-disk docs match the generated output.
///
/// # Errors
///
/// Returns [`DocsError`] when the docs drift or cannot be read.
pub fn verify_form_docs(path: Option<&Path>) -> Result<(), DocsError> {
    let path = path.unwrap_or_else(|| Path::new(DOCS_PATH));
    let existing = fs::read_to_string(path).map_err(|err| DocsError::Io(err.to_string()))?;
    if existing != form_docs_markdown() {
        return Err(DocsError::Drift(format!("docs mismatch: {}", path.display())));
    }
    Ok(())
}

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Renders one section: its leading heading (if any), prose, and a control table.
fn render_section(out: &mut String, items: &[FieldDescriptor], ordinal: usize, depth: usize) {
    let marks = "#".repeat(depth);
    let mut rest = items;
    if let Some((FieldDescriptor::Heading(heading), tail)) = items.split_first() {
        let _ = writeln!(out, "{marks} {}\n", heading.text);
        rest = tail;
    } else {
        let _ = writeln!(out, "{marks} Section {ordinal}\n");
    }

    let mut controls = Vec::new();
    let mut nested = Vec::new();
    for item in rest {
        match item {
            FieldDescriptor::Heading(heading) => {
                let _ = writeln!(out, "**{}**\n", heading.text);
            }
            FieldDescriptor::Text(text) => {
                let _ = writeln!(out, "{}\n", text.text);
            }
            FieldDescriptor::Section(section) => nested.push(&section.items),
            control => controls.push(control),
        }
    }
    if !controls.is_empty() {
        render_table(out, &controls);
    }
    for (index, children) in nested.into_iter().enumerate() {
        render_section(out, children, index + 1, depth + 1);
    }
}

/// Renders a table row per keyed control.
fn render_table(out: &mut String, controls: &[&FieldDescriptor]) {
    out.push_str("| Key | Control | Default | Label | Notes |\n");
    out.push_str("| --- | --- | --- | --- | --- |\n");
    for control in controls {
        let (default_value, notes) = match control {
            FieldDescriptor::Select(select) => {
                let options: Vec<String> = select
                    .options
                    .iter()
                    .map(|option| format!("`{}` = {}", option.value, escape_cell(&option.label)))
                    .collect();
                (format!("`{}`", select.default), format!("Options: {}", options.join(", ")))
            }
            FieldDescriptor::Color(color) => {
                let notes = if color.allow_grayscale { "Gray swatches offered." } else { "" };
                (format!("`{}`", color.default), notes.to_string())
            }
            FieldDescriptor::Toggle(toggle) => (format!("`{}`", toggle.default), String::new()),
            _ => (String::from("n/a"), String::new()),
        };
        let key = control.key().map_or_else(|| "n/a".to_string(), |key| format!("`{key}`"));
        let label = escape_cell(control.label().unwrap_or(""));
        let _ = writeln!(out, "| {key} | {} | {default_value} | {label} | {notes} |", control.kind());
    }
    out.push('\n');
}

/// Escapes text placed inside a Markdown table cell.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}
