// crates/watchface-config-contract/src/contract/tests.rs
// ============================================================================
// Module: Contract Builder Unit Tests
// Description: Unit coverage for bundle output safety checks.
// Purpose: Ensure verification fails closed on altered or unsafe outputs.
// Dependencies: watchface-config-contract, tempfile, std
// ============================================================================

//! ## Overview
//! Tests defensive behaviors around bundle verification, including size
//! mismatch detection, stray files, and symlink rejection.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
#[cfg(unix)]
use std::os::unix::fs::symlink;

use super::validate_relative_path;
use crate::ContractBuilder;
use crate::ContractError;

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn verify_output_rejects_size_mismatch() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempfile::tempdir()?;
    let output_dir = temp.path().join("out");
    let builder = ContractBuilder::new(output_dir.clone());
    builder.write()?;

    let bundle = builder.build()?;
    let artifact = bundle.artifacts.first().ok_or("expected at least one artifact")?;
    let artifact_path = output_dir.join(&artifact.path);
    let mut bytes = fs::read(&artifact_path)?;
    bytes.extend_from_slice(b"extra");
    fs::write(&artifact_path, &bytes)?;

    let Err(err) = builder.verify_output(&output_dir) else {
        return Err("expected size mismatch to be rejected".into());
    };
    if !matches!(err, ContractError::Generation(_)) {
        return Err("expected generation error for size mismatch".into());
    }
    Ok(())
}

#[test]
fn verify_output_rejects_unexpected_files() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempfile::tempdir()?;
    let output_dir = temp.path().join("out");
    let builder = ContractBuilder::new(output_dir.clone());
    builder.write()?;
    fs::write(output_dir.join("docs").join("stale.md"), b"old")?;

    let Err(err) = builder.verify_output(&output_dir) else {
        return Err("expected stray artifact to be rejected".into());
    };
    if !err.to_string().contains("unexpected artifact: docs/stale.md") {
        return Err(format!("unexpected error: {err}").into());
    }
    Ok(())
}

#[test]
fn verify_output_rejects_tampered_manifest() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempfile::tempdir()?;
    let output_dir = temp.path().join("out");
    let builder = ContractBuilder::new(output_dir.clone());
    builder.write()?;
    fs::write(output_dir.join("index.json"), b"{}\n")?;

    let Err(err) = builder.verify_output(&output_dir) else {
        return Err("expected manifest mismatch to be rejected".into());
    };
    if !err.to_string().contains("manifest mismatch") {
        return Err(format!("unexpected error: {err}").into());
    }
    Ok(())
}

#[cfg(unix)]
#[test]
fn verify_output_rejects_symlinked_output_dir() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempfile::tempdir()?;
    let output_dir = temp.path().join("out");
    let builder = ContractBuilder::new(output_dir.clone());
    builder.write()?;

    let link = temp.path().join("out-link");
    symlink(&output_dir, &link)?;

    let Err(err) = builder.verify_output(&link) else {
        return Err("expected symlinked output dir to be rejected".into());
    };
    if !matches!(err, ContractError::OutputPath(_)) {
        return Err("expected OutputPath error for symlinked output dir".into());
    }
    Ok(())
}

#[cfg(unix)]
#[test]
fn write_rejects_symlinked_output_dir() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempfile::tempdir()?;
    let target = temp.path().join("target");
    fs::create_dir(&target)?;
    let link = temp.path().join("out-link");
    symlink(&target, &link)?;

    let builder = ContractBuilder::new(link.clone());
    let Err(err) = builder.write() else {
        return Err("expected symlinked output dir to be rejected".into());
    };
    if !matches!(err, ContractError::OutputPath(_)) {
        return Err("expected OutputPath error for symlinked output dir".into());
    }
    if fs::read_dir(&target)?.next().is_some() {
        return Err("nothing should be written through the symlink".into());
    }
    Ok(())
}

#[test]
fn write_rejects_file_as_output_dir() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempfile::tempdir()?;
    let file = temp.path().join("occupied");
    fs::write(&file, b"x")?;
    let builder = ContractBuilder::new(file.clone());
    let Err(err) = builder.write() else {
        return Err("expected file path to be rejected".into());
    };
    if !matches!(err, ContractError::OutputPath(_)) {
        return Err("expected OutputPath error".into());
    }
    Ok(())
}

#[test]
fn relative_paths_reject_traversal() -> Result<(), Box<dyn std::error::Error>> {
    for path in ["", "../escape.json", "/abs.json", "docs/../../x"] {
        if validate_relative_path(path).is_ok() {
            return Err(format!("path {path:?} should be rejected").into());
        }
    }
    validate_relative_path("schemas/settings-form.schema.json")?;
    Ok(())
}
