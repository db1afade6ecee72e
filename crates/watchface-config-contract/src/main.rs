// crates/watchface-config-contract/src/main.rs
// ============================================================================
// Module: Contract CLI
// Description: CLI entrypoint for generating settings form artifacts.
// Purpose: Provide deterministic artifact generation and drift checks.
// Dependencies: clap, watchface-config, watchface-config-contract
// ============================================================================

//! ## Overview
//! The contract CLI writes the settings form bundle and can verify that an
//! on-disk bundle still matches the canonical form.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap::Subcommand;
use watchface_config::verify_form_docs;
use watchface_config::write_form_docs;
use watchface_config_contract::ContractBuilder;
use watchface_config_contract::ContractError;
use watchface_config_contract::GeneratorConfig;

// ============================================================================
// SECTION: CLI Definition
// ============================================================================

/// Contract generator CLI arguments.
#[derive(Debug, Parser)]
#[command(
    name = "watchface-config-contract",
    about = "Generate watchface settings form artifacts."
)]
struct Cli {
    /// Generator config file (defaults to watchface-config.toml when present).
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

/// Supported CLI subcommands.
#[derive(Debug, Subcommand)]
enum Command {
    /// Generate the artifact bundle.
    Generate {
        /// Output directory for generated artifacts.
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
    },
    /// Verify generated artifacts match the canonical form.
    Check {
        /// Output directory containing generated artifacts.
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
    },
}

// ============================================================================
// SECTION: CLI Execution
// ============================================================================

/// CLI entrypoint.
fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report_error(&err),
    }
}

/// Executes the CLI command.
fn run() -> Result<(), ContractError> {
    let cli = Cli::parse();
    let config = GeneratorConfig::load(cli.config.as_deref())
        .map_err(|err| ContractError::Generation(err.to_string()))?;
    let output_dir = cli.output_dir().unwrap_or_else(|| config.output.dir.clone());
    let builder = ContractBuilder::new(output_dir.clone());
    match cli.command {
        Command::Generate {
            ..
        } => {
            let manifest = builder.write_to(&output_dir)?;
            if let Some(docs_path) = &config.docs.path {
                write_form_docs(Some(docs_path.as_path()))
                    .map_err(|err| ContractError::Generation(err.to_string()))?;
            }
            report_status(&format!(
                "generated {} artifacts in {}",
                manifest.artifacts.len(),
                output_dir.display()
            ));
            Ok(())
        }
        Command::Check {
            ..
        } => {
            builder.verify_output(&output_dir)?;
            if let Some(docs_path) = &config.docs.path {
                verify_form_docs(Some(docs_path.as_path()))
                    .map_err(|err| ContractError::Generation(err.to_string()))?;
            }
            report_status(&format!("artifacts in {} are up to date", output_dir.display()));
            Ok(())
        }
    }
}

/// Reports a status line to stdout.
fn report_status(message: &str) {
    let mut stdout = std::io::stdout();
    let _ = writeln!(stdout, "{message}");
}

/// Reports CLI errors to stderr and returns a failure exit code.
fn report_error(err: &ContractError) -> ExitCode {
    let mut stderr = std::io::stderr();
    let _ = writeln!(stderr, "{err}");
    ExitCode::FAILURE
}

// ============================================================================
// SECTION: CLI Helpers
// ============================================================================

impl Cli {
    /// Returns the output directory from flags, if any.
    #[must_use]
    fn output_dir(&self) -> Option<PathBuf> {
        match &self.command {
            Command::Generate {
                out,
            }
            | Command::Check {
                out,
            } => out.clone(),
        }
    }
}
