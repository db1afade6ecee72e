// crates/watchface-config-contract/src/contract.rs
// ============================================================================
// Module: Contract Builder
// Description: Generator for settings form artifacts.
// Purpose: Assemble deterministic form outputs and write them to disk.
// Dependencies: watchface-config, serde, serde_jcs, serde_json, std
// ============================================================================

//! ## Overview
//! The contract builder renders the canonical settings form into its
//! artifacts, orders them by path, hashes each one into an `index.json`
//! manifest, and writes or verifies the bundle. JSON artifacts are emitted
//! with canonical key ordering and pretty formatting so diffs stay readable.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::fs;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use serde::Serialize;
use watchface_config::SettingsForm;
use watchface_config::form_schema;
use watchface_config::render_form_docs;
use watchface_config::settings_form;

use crate::ContractError;
use crate::config::DEFAULT_OUTPUT_DIR;
use crate::types::ContractArtifact;
use crate::types::ContractBundle;
use crate::types::ContractManifest;
use crate::types::DEFAULT_HASH_ALGORITHM;
use crate::types::HashAlgorithm;
use crate::types::ManifestArtifact;
use crate::types::hash_bytes;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Manifest filename written alongside the artifacts.
const MANIFEST_PATH: &str = "index.json";
/// Clay JSON artifact path.
pub const FORM_JSON_PATH: &str = "config.json";
/// CommonJS module artifact path.
pub const FORM_MODULE_PATH: &str = "config.js";
/// Settings reference artifact path.
pub const DOCS_ARTIFACT_PATH: &str = "docs/settings.md";
/// Form JSON schema artifact path.
pub const SCHEMA_ARTIFACT_PATH: &str = "schemas/settings-form.schema.json";

// ============================================================================
// SECTION: Contract Builder
// ============================================================================

/// Builder for settings form artifacts.
///
/// # Invariants
/// - Artifacts are deterministic and ordered by their relative path.
/// - Artifact paths are validated as safe, relative paths before writes occur.
#[derive(Debug, Clone)]
pub struct ContractBuilder {
    /// Output directory for generated artifacts.
    output_dir: PathBuf,
    /// Contract version identifier.
    contract_version: String,
    /// Hash algorithm used for artifact digests.
    hash_algorithm: HashAlgorithm,
    /// Form rendered into the bundle.
    form: SettingsForm,
}

impl ContractBuilder {
    /// Creates a builder for the canonical form targeting `output_dir`.
    #[must_use]
    pub fn new(output_dir: PathBuf) -> Self {
        Self::with_form(output_dir, settings_form())
    }

    /// Creates a builder for an arbitrary validated form.
    #[must_use]
    pub fn with_form(output_dir: PathBuf, form: SettingsForm) -> Self {
        Self {
            output_dir,
            contract_version: env!("CARGO_PKG_VERSION").to_string(),
            hash_algorithm: DEFAULT_HASH_ALGORITHM,
            form,
        }
    }

    /// Returns the default output directory for generated artifacts.
    #[must_use]
    pub fn default_output_dir() -> PathBuf {
        PathBuf::from(DEFAULT_OUTPUT_DIR)
    }

    /// Returns the configured output directory.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Builds the bundle without writing to disk.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError`] when an artifact cannot be rendered.
    pub fn build(&self) -> Result<ContractBundle, ContractError> {
        let form_value = self
            .form
            .to_json_value()
            .map_err(|err| ContractError::Serialization(err.to_string()))?;
        let module = self
            .form
            .to_js_module()
            .map_err(|err| ContractError::Serialization(err.to_string()))?;
        let mut artifacts = vec![
            json_artifact(FORM_JSON_PATH, &form_value)?,
            text_artifact(FORM_MODULE_PATH, module, "text/javascript"),
            text_artifact(DOCS_ARTIFACT_PATH, render_form_docs(&self.form), "text/markdown"),
            json_artifact(SCHEMA_ARTIFACT_PATH, &form_schema())?,
        ];

        artifacts.sort_by(|lhs, rhs| lhs.path.cmp(&rhs.path));
        ensure_unique_paths(&artifacts)?;

        let manifest = build_manifest(&self.contract_version, self.hash_algorithm, &artifacts);

        Ok(ContractBundle {
            manifest,
            artifacts,
        })
    }

    /// Writes the bundle to the configured output directory.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError`] when writing fails.
    pub fn write(&self) -> Result<ContractManifest, ContractError> {
        self.write_to(&self.output_dir)
    }

    /// Writes the bundle to the specified output directory.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError`] when writing fails.
    pub fn write_to(&self, output_dir: &Path) -> Result<ContractManifest, ContractError> {
        let bundle = self.build()?;
        ensure_output_dir(output_dir)?;
        for artifact in &bundle.artifacts {
            write_artifact(output_dir, artifact)?;
        }
        let manifest_bytes = serialize_json_pretty(&bundle.manifest)?;
        fs::write(output_dir.join(MANIFEST_PATH), &manifest_bytes)
            .map_err(|err| ContractError::Io(err.to_string()))?;
        Ok(bundle.manifest)
    }

    /// Verifies the on-disk bundle matches the generated bundle.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError`] when an artifact is missing, altered, or
    /// unexpected.
    pub fn verify_output(&self, output_dir: &Path) -> Result<(), ContractError> {
        let bundle = self.build()?;
        ensure_existing_output_dir(output_dir)?;
        let expected_files = expected_paths(&bundle);
        for artifact in &bundle.artifacts {
            let relative = validate_relative_path(&artifact.path)?;
            let bytes = fs::read(output_dir.join(relative))
                .map_err(|err| ContractError::Io(format!("{}: {err}", artifact.path)))?;
            if bytes != artifact.bytes {
                return Err(ContractError::Generation(format!(
                    "artifact mismatch: {}",
                    artifact.path
                )));
            }
        }
        let manifest_bytes = serialize_json_pretty(&bundle.manifest)?;
        let actual_manifest = fs::read(output_dir.join(MANIFEST_PATH))
            .map_err(|err| ContractError::Io(format!("{MANIFEST_PATH}: {err}")))?;
        if actual_manifest != manifest_bytes {
            return Err(ContractError::Generation(format!("manifest mismatch: {MANIFEST_PATH}")));
        }
        let actual_files = collect_output_files(output_dir)?;
        for path in actual_files {
            if !expected_files.contains(&path) {
                return Err(ContractError::Generation(format!("unexpected artifact: {path}")));
            }
        }
        Ok(())
    }
}

impl Default for ContractBuilder {
    fn default() -> Self {
        Self::new(Self::default_output_dir())
    }
}

// ============================================================================
// SECTION: Artifact Helpers
// ============================================================================

/// Builds a JSON artifact with deterministic, pretty-printed serialization.
fn json_artifact<T: Serialize>(path: &str, value: &T) -> Result<ContractArtifact, ContractError> {
    let bytes = serialize_json_pretty(value)?;
    Ok(ContractArtifact {
        path: path.to_string(),
        content_type: String::from("application/json"),
        bytes,
    })
}

/// Builds a text artifact from content.
fn text_artifact(path: &str, content: String, content_type: &str) -> ContractArtifact {
    ContractArtifact {
        path: path.to_string(),
        content_type: content_type.to_string(),
        bytes: content.into_bytes(),
    }
}

/// Serializes a value into pretty JSON bytes with canonical key ordering.
///
/// Array order is preserved; only object keys are reordered.
fn serialize_json_pretty<T: Serialize>(value: &T) -> Result<Vec<u8>, ContractError> {
    let canonical =
        serde_jcs::to_vec(value).map_err(|err| ContractError::Serialization(err.to_string()))?;
    let canonical_value: serde_json::Value = serde_json::from_slice(&canonical)
        .map_err(|err| ContractError::Serialization(err.to_string()))?;
    let mut bytes = serde_json::to_vec_pretty(&canonical_value)
        .map_err(|err| ContractError::Serialization(err.to_string()))?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Builds the manifest from generated artifacts.
fn build_manifest(
    contract_version: &str,
    algorithm: HashAlgorithm,
    artifacts: &[ContractArtifact],
) -> ContractManifest {
    let entries = artifacts
        .iter()
        .map(|artifact| ManifestArtifact {
            path: artifact.path.clone(),
            content_type: artifact.content_type.clone(),
            digest: hash_bytes(algorithm, &artifact.bytes),
        })
        .collect();
    ContractManifest {
        contract_version: contract_version.to_string(),
        hash_algorithm: algorithm,
        artifacts: entries,
    }
}

/// Ensures artifact paths are unique.
fn ensure_unique_paths(artifacts: &[ContractArtifact]) -> Result<(), ContractError> {
    let mut seen = BTreeSet::new();
    for artifact in artifacts {
        if !seen.insert(&artifact.path) {
            return Err(ContractError::Generation(format!(
                "duplicate artifact path: {}",
                artifact.path
            )));
        }
    }
    Ok(())
}

// ============================================================================
// SECTION: Filesystem Helpers
// ============================================================================

/// Ensures the output directory exists (creating it if necessary) and is not
/// a symlink.
fn ensure_output_dir(output_dir: &Path) -> Result<(), ContractError> {
    if output_dir.as_os_str().is_empty() {
        return Err(ContractError::OutputPath(output_dir.to_path_buf()));
    }
    match fs::symlink_metadata(output_dir) {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        Ok(_) => Err(ContractError::OutputPath(output_dir.to_path_buf())),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            fs::create_dir_all(output_dir).map_err(|err| ContractError::Io(err.to_string()))
        }
        Err(err) => Err(ContractError::Io(err.to_string())),
    }
}

/// Ensures the output directory exists, is a directory, and is not a symlink.
fn ensure_existing_output_dir(output_dir: &Path) -> Result<(), ContractError> {
    let metadata = fs::symlink_metadata(output_dir)
        .map_err(|_| ContractError::OutputPath(output_dir.to_path_buf()))?;
    if !metadata.is_dir() {
        return Err(ContractError::OutputPath(output_dir.to_path_buf()));
    }
    Ok(())
}

/// Writes a single artifact to the output directory.
fn write_artifact(output_dir: &Path, artifact: &ContractArtifact) -> Result<(), ContractError> {
    let relative = validate_relative_path(&artifact.path)?;
    let target = output_dir.join(&relative);
    let parent = target.parent().ok_or_else(|| ContractError::OutputPath(target.clone()))?;
    fs::create_dir_all(parent).map_err(|err| ContractError::Io(err.to_string()))?;
    fs::write(&target, &artifact.bytes).map_err(|err| ContractError::Io(err.to_string()))
}

/// Validates that the artifact path is relative and safe.
fn validate_relative_path(path: &str) -> Result<PathBuf, ContractError> {
    if path.trim().is_empty() {
        return Err(ContractError::Generation(String::from("artifact path is empty")));
    }
    let candidate = PathBuf::from(path);
    if candidate.is_absolute() {
        return Err(ContractError::Generation(format!("artifact path must be relative: {path}")));
    }
    for component in candidate.components() {
        if matches!(component, Component::ParentDir | Component::RootDir | Component::Prefix(_)) {
            return Err(ContractError::Generation(format!(
                "artifact path contains invalid component: {path}"
            )));
        }
    }
    Ok(candidate)
}

/// Collects the expected output paths for verification.
fn expected_paths(bundle: &ContractBundle) -> BTreeSet<String> {
    let mut expected = BTreeSet::new();
    expected.insert(String::from(MANIFEST_PATH));
    for artifact in &bundle.artifacts {
        expected.insert(artifact.path.clone());
    }
    expected
}

/// Recursively collects file paths under the output directory.
fn collect_output_files(output_dir: &Path) -> Result<BTreeSet<String>, ContractError> {
    let mut files = BTreeSet::new();
    collect_files_recursive(output_dir, output_dir, &mut files)?;
    Ok(files)
}

/// Recursively collects file paths relative to the root directory.
fn collect_files_recursive(
    root: &Path,
    current: &Path,
    files: &mut BTreeSet<String>,
) -> Result<(), ContractError> {
    let entries = fs::read_dir(current).map_err(|err| ContractError::Io(err.to_string()))?;
    for entry in entries {
        let entry = entry.map_err(|err| ContractError::Io(err.to_string()))?;
        let path = entry.path();
        let relative =
            path.strip_prefix(root).map_err(|_| ContractError::OutputPath(path.clone()))?;
        let text =
            relative.to_str().ok_or_else(|| ContractError::OutputPath(relative.to_path_buf()))?;
        let normalized = text.replace('\\', "/");
        let file_type = entry.file_type().map_err(|err| ContractError::Io(err.to_string()))?;
        if file_type.is_dir() {
            collect_files_recursive(root, &path, files)?;
        } else {
            files.insert(normalized);
        }
    }
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
