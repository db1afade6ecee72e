// crates/watchface-config-contract/src/lib.rs
// ============================================================================
// Module: Watchface Config Contract Library
// Description: Deterministic artifact generation for the settings form.
// Purpose: Emit the files the companion app and tooling consume.
// Dependencies: watchface-config, serde, thiserror
// ============================================================================

//! ## Overview
//! The contract library assembles every generated artifact of the settings
//! form (the Clay JSON, the `config.js` module, the JSON schema and the docs)
//! into a hashed bundle, writes it to disk, and verifies that committed
//! artifacts still match the canonical form.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod contract;
pub mod types;

// ============================================================================
// SECTION: Errors
// ============================================================================

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised when generating contract artifacts.
///
/// # Invariants
/// - Variants carry human-readable context for diagnostics.
/// - [`ContractError::OutputPath`] always includes the offending path.
#[derive(Debug, Error)]
pub enum ContractError {
    /// IO failure while writing artifacts.
    #[error("io error: {0}")]
    Io(String),
    /// Serialization failure while rendering artifacts.
    #[error("serialization error: {0}")]
    Serialization(String),
    /// Contract generation or verification failed.
    #[error("contract generation error: {0}")]
    Generation(String),
    /// Output path invalid or inaccessible.
    #[error("invalid output path: {0}")]
    OutputPath(PathBuf),
}

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::ConfigError;
pub use config::GeneratorConfig;
pub use contract::ContractBuilder;
pub use types::ContractArtifact;
pub use types::ContractBundle;
pub use types::ContractManifest;
pub use types::HashAlgorithm;
pub use types::HashDigest;
pub use types::ManifestArtifact;
