//! CLI commands for data export
//!
//! Writes to a file when `--output` is given, otherwise to stdout.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};

use crate::error::SpendResult;
use crate::export::{export_expenses_csv, export_owner_json, OwnerExport};
use crate::models::OwnerId;
use crate::services::ExpenseService;
use crate::storage::Storage;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// CSV (expenses only)
    Csv,
    /// JSON (expenses and budgets)
    Json,
}

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export the owner's expenses
    Expenses {
        #[arg(short, long, value_enum, default_value = "csv")]
        format: ExportFormat,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle an export command
pub fn handle_export_command(storage: &Storage, owner: &OwnerId, cmd: ExportCommands) -> SpendResult<()> {
    match cmd {
        ExportCommands::Expenses { format, output } => {
            let expenses = ExpenseService::new(storage).list(owner)?;

            let writer: Box<dyn Write> = match &output {
                Some(path) => Box::new(BufWriter::new(File::create(path)?)),
                None => Box::new(io::stdout().lock()),
            };

            match format {
                ExportFormat::Csv => export_expenses_csv(&expenses, writer)?,
                ExportFormat::Json => {
                    let budgets = storage.budgets.list_for_owner(owner)?;
                    let export = OwnerExport::new(owner.clone(), expenses, budgets);
                    export_owner_json(&export, writer)?;
                }
            }

            if let Some(path) = output {
                tracing::info!(path = %path.display(), ?format, "export written");
                eprintln!("Exported to {}", path.display());
            }
        }
    }

    Ok(())
}
