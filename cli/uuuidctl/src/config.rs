//! Runtime configuration assembled from flags and environment.
//!
//! clap binds each flag to its environment variable, so flags win:
//! - `UUUID_SALT`: checksum salt shared with cooperating systems
//! - `UUUID_SEPARATOR`: separator for the hex form
//! - `UUUID_LOG_LEVEL`: default tracing filter

use uuuid::{Salt, DEFAULT_SEPARATOR};

use crate::error::CliError;

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Checksum salt installed as the process default.
    pub salt: Salt,

    /// Separator used when reading and writing the hex form.
    pub separator: String,
}

impl Config {
    /// Validates raw settings.
    ///
    /// A separator containing hex digits would make group boundaries
    /// ambiguous, so it is rejected.
    pub fn new(salt: Option<String>, separator: Option<String>) -> Result<Self, CliError> {
        let separator = separator.unwrap_or_else(|| DEFAULT_SEPARATOR.to_string());
        if separator.chars().any(|c| c.is_ascii_hexdigit()) {
            return Err(CliError::InvalidSeparator(separator));
        }

        Ok(Self {
            salt: salt.map(Salt::new).unwrap_or_default(),
            separator,
        })
    }
}
