//! Budget CLI commands
//!
//! Setting, listing and deleting monthly budgets, plus the budget-vs-actual
//! summary.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_budget_list, format_reconciliation};
use crate::error::SpendResult;
use crate::models::{Money, MonthToken, OwnerId};
use crate::services::{BudgetService, DeleteOutcome, ReconciliationService};
use crate::storage::Storage;

use super::{parse_optional_date, print_json, OutputFormat};

/// Budget subcommands
#[derive(Subcommand, Debug)]
pub enum BudgetCommands {
    /// Set (or overwrite) the limit for a category in a month
    Set {
        /// Category name (e.g. "Food")
        category: String,
        /// Limit amount (e.g. "500" or "500.00")
        amount: String,
        /// Month as YYYY-MM (defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// List the budgets of a month
    List {
        /// Month as YYYY-MM (defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Delete the budget for a category in a month
    #[command(alias = "rm")]
    Delete {
        category: String,
        /// Month as YYYY-MM
        #[arg(short, long)]
        month: String,
    },

    /// Compare budgets with actual spending over a date range
    Summary {
        /// Start date (YYYY-MM-DD)
        #[arg(short, long)]
        start: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(short, long)]
        end: Option<String>,
    },
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    owner: &OwnerId,
    output: OutputFormat,
    cmd: BudgetCommands,
) -> SpendResult<()> {
    let service = BudgetService::new(storage);

    match cmd {
        BudgetCommands::Set {
            category,
            amount,
            month,
        } => {
            let amount = Money::parse_non_negative(&amount)?;
            let month = parse_month(month.as_deref())?;

            let budget = service.set_budget(owner, &category, amount, month)?;

            match output {
                OutputFormat::Json => print_json(&budget)?,
                OutputFormat::Table => println!(
                    "Budget for '{}' in {} set to {}",
                    budget.category,
                    budget.month,
                    budget.limit.format_with_symbol(&settings.currency_symbol)
                ),
            }
        }

        BudgetCommands::List { month } => {
            let month = parse_month(month.as_deref())?;
            let budgets = service.list_budgets(owner, month)?;

            match output {
                OutputFormat::Json => print_json(&budgets)?,
                OutputFormat::Table => print!(
                    "{}",
                    format_budget_list(
                        &budgets,
                        month.unwrap_or_else(MonthToken::current),
                        &settings.currency_symbol
                    )
                ),
            }
        }

        BudgetCommands::Delete { category, month } => {
            let month = MonthToken::parse(&month)?;
            let outcome = service.delete_budget(owner, &category, month)?;

            match output {
                OutputFormat::Json => print_json(&serde_json::json!({
                    "message": "Budget deleted successfully",
                    "deleted": outcome == DeleteOutcome::Deleted,
                }))?,
                OutputFormat::Table => match outcome {
                    DeleteOutcome::Deleted => {
                        println!("Deleted budget for '{}' in {}", category.trim(), month)
                    }
                    DeleteOutcome::AlreadyAbsent => {
                        println!("No budget for '{}' in {}; nothing to delete", category.trim(), month)
                    }
                },
            }
        }

        BudgetCommands::Summary { start, end } => {
            let start = parse_optional_date(start.as_deref())?;
            let end = parse_optional_date(end.as_deref())?;

            let results = ReconciliationService::new(storage).reconcile(owner, start, end)?;

            match output {
                OutputFormat::Json => print_json(&results)?,
                OutputFormat::Table => {
                    print!("{}", format_reconciliation(&results, &settings.currency_symbol))
                }
            }
        }
    }

    Ok(())
}

fn parse_month(raw: Option<&str>) -> SpendResult<Option<MonthToken>> {
    Ok(raw.map(MonthToken::parse).transpose()?)
}
