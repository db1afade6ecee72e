//! Generator config tests for watchface-config-contract.
// crates/watchface-config-contract/tests/generator_config.rs
// =============================================================================
// Module: Generator Config Tests
// Description: Parse and validate the optional generator TOML config.
// Purpose: Ensure config inputs fail closed on unknown fields and bad paths.
// =============================================================================

use std::path::PathBuf;

use watchface_config_contract::ConfigError;
use watchface_config_contract::GeneratorConfig;
use watchface_config_contract::config::DEFAULT_OUTPUT_DIR;

type TestResult = Result<(), String>;

#[test]
fn empty_config_uses_defaults() -> TestResult {
    let config = GeneratorConfig::from_toml_str("").map_err(|err| err.to_string())?;
    if config.output.dir != PathBuf::from(DEFAULT_OUTPUT_DIR) {
        return Err(format!("unexpected output dir {}", config.output.dir.display()));
    }
    if config.docs.path.is_some() {
        return Err("docs.path should default to none".to_string());
    }
    Ok(())
}

#[test]
fn explicit_values_are_read() -> TestResult {
    let config = GeneratorConfig::from_toml_str(
        "[output]\ndir = \"build/pkjs\"\n\n[docs]\npath = \"docs/settings.md\"\n",
    )
    .map_err(|err| err.to_string())?;
    if config.output.dir != PathBuf::from("build/pkjs") {
        return Err("output.dir not applied".to_string());
    }
    if config.docs.path != Some(PathBuf::from("docs/settings.md")) {
        return Err("docs.path not applied".to_string());
    }
    Ok(())
}

#[test]
fn unknown_fields_are_rejected() -> TestResult {
    match GeneratorConfig::from_toml_str("[output]\ndirectory = \"x\"\n") {
        Err(ConfigError::Parse(_)) => Ok(()),
        other => Err(format!("expected parse error, got {other:?}")),
    }
}

#[test]
fn blank_output_dir_is_invalid() -> TestResult {
    match GeneratorConfig::from_toml_str("[output]\ndir = \"  \"\n") {
        Err(ConfigError::Invalid(message)) if message.contains("output.dir") => Ok(()),
        other => Err(format!("expected invalid output.dir, got {other:?}")),
    }
}

#[test]
fn long_path_components_are_invalid() -> TestResult {
    let text = format!("[docs]\npath = \"{}\"\n", "a".repeat(300));
    match GeneratorConfig::from_toml_str(&text) {
        Err(ConfigError::Invalid(message)) if message.contains("docs.path") => Ok(()),
        other => Err(format!("expected invalid docs.path, got {other:?}")),
    }
}

#[test]
fn explicit_missing_file_is_an_io_error() -> TestResult {
    let temp = tempfile::tempdir().map_err(|err| err.to_string())?;
    match GeneratorConfig::load(Some(&temp.path().join("absent.toml"))) {
        Err(ConfigError::Io(_)) => Ok(()),
        other => Err(format!("expected io error, got {other:?}")),
    }
}

#[test]
fn config_file_is_loaded_from_disk() -> TestResult {
    let temp = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = temp.path().join("watchface-config.toml");
    std::fs::write(&path, "[output]\ndir = \"out\"\n").map_err(|err| err.to_string())?;
    let config = GeneratorConfig::load(Some(&path)).map_err(|err| err.to_string())?;
    if config.output.dir != PathBuf::from("out") {
        return Err("output.dir not loaded".to_string());
    }
    Ok(())
}

#[test]
fn oversized_config_file_is_rejected() -> TestResult {
    let temp = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = temp.path().join("big.toml");
    let padding = format!("# {}\n", "x".repeat(70 * 1024));
    std::fs::write(&path, padding).map_err(|err| err.to_string())?;
    match GeneratorConfig::load(Some(&path)) {
        Err(ConfigError::Invalid(message)) if message.contains("size limit") => Ok(()),
        other => Err(format!("expected size limit error, got {other:?}")),
    }
}
