//! Generate new identifiers.

use anyhow::Result;
use clap::Args;
use uuuid::Uuuid;

use crate::error::CliError;
use crate::output::{print_single, IdView, OutputFormat};

use super::CommandContext;

#[derive(Debug, Args)]
pub struct NewCommand {
    /// Type tag, reduced modulo 65536.
    #[arg(long = "type", short = 't', default_value = "0")]
    type_id: u32,

    /// Hash fragment as hex; the first six bytes are used, zero-padded.
    #[arg(long)]
    hash: Option<String>,

    /// Number of identifiers to generate.
    #[arg(long, short = 'n', default_value = "1")]
    count: usize,

    /// Print the compact form instead of hex.
    #[arg(long)]
    compact: bool,
}

impl NewCommand {
    pub fn run(self, ctx: &CommandContext) -> Result<()> {
        let hash = self.hash.as_deref().map(hex::decode).transpose().map_err(CliError::from)?;

        let ids: Vec<Uuuid> = (0..self.count)
            .map(|_| match &hash {
                Some(bytes) => Uuuid::generate_with_hash(self.type_id, bytes),
                None => Uuuid::generate(self.type_id),
            })
            .collect();
        tracing::debug!(count = ids.len(), type_id = self.type_id, "generated identifiers");

        match ctx.format {
            OutputFormat::Json => {
                let views: Vec<IdView> = ids
                    .iter()
                    .map(|id| IdView::new(id, &ctx.config.separator))
                    .collect();
                print_single(&views);
            }
            OutputFormat::Table => {
                for id in &ids {
                    if self.compact {
                        println!("{}", id.render_compact());
                    } else {
                        println!("{}", id.render_hex(&ctx.config.separator));
                    }
                }
            }
        }

        Ok(())
    }
}
