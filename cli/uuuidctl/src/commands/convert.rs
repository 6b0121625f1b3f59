//! Re-encode an identifier in another form.

use anyhow::Result;
use clap::{Args, ValueEnum};
use uuuid::Uuuid;

use crate::error::CliError;
use crate::output::{print_single, print_warning, OutputFormat};

use super::CommandContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Form {
    /// Hex grouped with the configured separator.
    Hex,
    /// 32 hex digits, no separators.
    Canonical,
    /// 22-character URL-safe form.
    Compact,
}

#[derive(Debug, Args)]
pub struct ConvertCommand {
    /// Identifier in hex or compact form.
    id: String,

    /// Target form.
    #[arg(long, value_enum, default_value = "compact")]
    to: Form,
}

impl ConvertCommand {
    pub fn run(self, ctx: &CommandContext) -> Result<()> {
        let id = ctx.decode(&self.id).map_err(CliError::from)?;
        if !id.is_valid() {
            tracing::warn!(id = %self.id, "converting identifier with invalid checksum");
            print_warning("checksum does not match; converting anyway");
        }

        let out = render(&id, self.to, &ctx.config.separator);
        match ctx.format {
            OutputFormat::Json => print_single(&serde_json::json!({ "id": out, "valid": id.is_valid() })),
            OutputFormat::Table => println!("{}", out),
        }

        Ok(())
    }
}

fn render(id: &Uuuid, form: Form, separator: &str) -> String {
    match form {
        Form::Hex => id.render_hex(separator),
        Form::Canonical => id.to_canonical(),
        Form::Compact => id.render_compact(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_forms() {
        let id = Uuuid::parse_compact("ZVPxAAAF_oa-7xEiM0RVZg").unwrap();
        assert_eq!(render(&id, Form::Hex, "."), "6553f100.0005.fe86.beef.112233445566");
        assert_eq!(render(&id, Form::Canonical, "."), "6553f1000005fe86beef112233445566");
        assert_eq!(render(&id, Form::Compact, "."), "ZVPxAAAF_oa-7xEiM0RVZg");
    }
}
