//! Decode an identifier and show its fields.

use anyhow::Result;
use clap::Args;

use crate::error::CliError;
use crate::output::{print_id, IdView};

use super::CommandContext;

#[derive(Debug, Args)]
pub struct InspectCommand {
    /// Identifier in hex or compact form.
    id: String,

    /// Show the fields even when the checksum does not match.
    #[arg(long)]
    allow_invalid: bool,
}

impl InspectCommand {
    pub fn run(self, ctx: &CommandContext) -> Result<()> {
        let id = ctx.decode(&self.id).map_err(CliError::from)?;

        if !id.is_valid() && !self.allow_invalid {
            return Err(CliError::InvalidChecksum { id: self.id }.into());
        }

        print_id(&IdView::new(&id, &ctx.config.separator), ctx.format);
        Ok(())
    }
}
