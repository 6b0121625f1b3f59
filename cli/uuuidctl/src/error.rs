//! Error handling and display for the CLI.

use colored::Colorize;
use thiserror::Error;
use uuuid::IdError;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("identifier {id} has an invalid checksum")]
    InvalidChecksum { id: String },

    #[error("invalid --hash value: {0}")]
    InvalidHash(#[from] hex::FromHexError),

    #[error("invalid separator {0:?}: must not contain hex digits")]
    InvalidSeparator(String),

    #[error(transparent)]
    Id(#[from] IdError),
}

/// Print an error in a user-friendly format.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {:#}", "Error:".red().bold(), err);

    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        match cli_err {
            CliError::InvalidChecksum { .. } => {
                eprintln!(
                    "\n{}",
                    "Hint: The identifier was altered or was issued with a different salt (UUUID_SALT). Pass --allow-invalid to inspect it anyway."
                        .yellow()
                );
            }
            CliError::Id(IdError::MalformedInput { .. }) => {
                eprintln!(
                    "\n{}",
                    "Hint: Expected 32 hex digits grouped 8-4-4-4-12, or the 22-character compact form."
                        .yellow()
                );
            }
            _ => {}
        }
    }
}
