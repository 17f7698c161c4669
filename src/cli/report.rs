//! CLI commands for reports

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::format_spending_summary;
use crate::error::SpendResult;
use crate::models::OwnerId;
use crate::services::SummaryService;
use crate::storage::Storage;

use super::{parse_optional_date, print_json, OutputFormat};

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Spending totals for a date range: overall, by category and by day
    #[command(alias = "dashboard")]
    Spending {
        /// Start date (YYYY-MM-DD)
        #[arg(short, long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD)
        #[arg(short, long)]
        end: Option<String>,
    },
}

/// Handle a report command
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    owner: &OwnerId,
    output: OutputFormat,
    cmd: ReportCommands,
) -> SpendResult<()> {
    match cmd {
        ReportCommands::Spending { start, end } => {
            let start = parse_optional_date(start.as_deref())?;
            let end = parse_optional_date(end.as_deref())?;

            let summary = SummaryService::new(storage).spending_summary(owner, start, end)?;

            match output {
                OutputFormat::Json => print_json(&summary)?,
                OutputFormat::Table => {
                    print!("{}", format_spending_summary(&summary, &settings.currency_symbol))
                }
            }
        }
    }

    Ok(())
}
