//! CLI commands.

mod convert;
mod inspect;
mod new;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use uuuid::{IdError, Uuuid};

use crate::config::Config;
use crate::logging;
use crate::output::OutputFormat;

/// uuuid CLI - Generate, inspect and convert self-describing identifiers.
#[derive(Debug, Parser)]
#[command(name = "uuuid")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format (table or json).
    #[arg(long, global = true, default_value = "table")]
    format: String,

    /// Checksum salt shared with cooperating systems.
    #[arg(long, global = true, env = "UUUID_SALT", hide_env_values = true)]
    salt: Option<String>,

    /// Separator between hex groups.
    #[arg(long, global = true, env = "UUUID_SEPARATOR")]
    sep: Option<String>,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long, global = true, env = "UUUID_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    /// Emit logs as JSON.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Generate new identifiers.
    New(new::NewCommand),

    /// Decode an identifier and show its fields.
    Inspect(inspect::InspectCommand),

    /// Re-encode an identifier in another form.
    Convert(convert::ConvertCommand),
}

impl Cli {
    /// Run the CLI command.
    pub fn run(self) -> Result<()> {
        logging::init(&self.log_level, self.log_json);

        let config = Config::new(self.salt, self.sep)?;
        uuuid::install_salt(config.salt.clone()).context("failed to install checksum salt")?;
        tracing::debug!(separator = %config.separator, "configuration loaded");

        let ctx = CommandContext {
            config,
            format: OutputFormat::parse(&self.format),
        };

        match self.command {
            Commands::New(cmd) => cmd.run(&ctx),
            Commands::Inspect(cmd) => cmd.run(&ctx),
            Commands::Convert(cmd) => cmd.run(&ctx),
        }
    }
}

/// Shared command context.
pub struct CommandContext {
    pub config: Config,
    pub format: OutputFormat,
}

impl CommandContext {
    /// Decodes any supported form: compact (22 chars), canonical (32 chars),
    /// or hex grouped with the configured separator.
    pub fn decode(&self, text: &str) -> Result<Uuuid, IdError> {
        decode(text, &self.config.separator)
    }
}

fn decode(text: &str, separator: &str) -> Result<Uuuid, IdError> {
    let text = text.trim();
    match text.len() {
        uuuid::compact::COMPACT_LEN => Uuuid::parse_compact(text),
        uuuid::layout::HEX_LEN => Uuuid::parse_hex(text, ""),
        _ => Uuuid::parse_hex(text, separator),
    }
}
