//! Output formatting for CLI commands.

use colored::Colorize;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use uuuid::Uuuid;

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON format.
    Json,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Self {
        match value {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Table,
        }
    }
}

/// Every decoded field of one identifier.
#[derive(Debug, Clone, Serialize)]
pub struct IdView {
    pub hex: String,
    pub compact: String,
    pub timestamp: u32,
    pub created_at: String,
    pub type_id: u16,
    pub checksum: String,
    pub rand: String,
    pub hash: String,
    pub valid: bool,
}

impl IdView {
    pub fn new(id: &Uuuid, separator: &str) -> Self {
        Self {
            hex: id.render_hex(separator),
            compact: id.render_compact(),
            timestamp: id.timestamp(),
            created_at: id.created_at().to_rfc3339(),
            type_id: id.type_id(),
            checksum: format!("{:04x}", id.checksum()),
            rand: format!("{:04x}", id.rand()),
            hash: hex::encode(id.hash()),
            valid: id.is_valid(),
        }
    }

    fn rows(&self) -> Vec<FieldRow> {
        let valid = if self.valid {
            "yes".green().to_string()
        } else {
            "no".red().bold().to_string()
        };

        vec![
            FieldRow::new("hex", self.hex.clone()),
            FieldRow::new("compact", self.compact.clone()),
            FieldRow::new("timestamp", self.timestamp.to_string()),
            FieldRow::new("created", self.created_at.clone()),
            FieldRow::new("type", self.type_id.to_string()),
            FieldRow::new("checksum", self.checksum.clone()),
            FieldRow::new("rand", self.rand.clone()),
            FieldRow::new("hash", self.hash.clone()),
            FieldRow::new("valid", valid),
        ]
    }
}

#[derive(Debug, Tabled)]
struct FieldRow {
    #[tabled(rename = "FIELD")]
    field: &'static str,
    #[tabled(rename = "VALUE")]
    value: String,
}

impl FieldRow {
    fn new(field: &'static str, value: String) -> Self {
        Self { field, value }
    }
}

/// Print a single item as pretty JSON.
pub fn print_single<T: Serialize + ?Sized>(data: &T) {
    let json = serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string());
    println!("{}", json);
}

/// Print one identifier in the specified format.
pub fn print_id(view: &IdView, format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            let mut table = Table::new(view.rows());
            table.with(Style::sharp());
            println!("{}", table);
        }
        OutputFormat::Json => print_single(view),
    }
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "Warning:".yellow().bold(), message);
}
