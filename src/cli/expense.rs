//! Expense CLI commands
//!
//! Writes go through the budget guard; `--override-budget` skips it.

use chrono::NaiveDateTime;
use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_expense_details, format_expense_list};
use crate::error::{SpendError, SpendResult};
use crate::models::month::parse_date_time;
use crate::models::{ExpenseId, Money, OwnerId};
use crate::services::{BudgetGuard, ExpenseChanges, ExpenseService, GuardDecision, NewExpense};
use crate::storage::Storage;

use super::{print_json, OutputFormat};

/// Expense subcommands
#[derive(Subcommand, Debug)]
pub enum ExpenseCommands {
    /// Record an expense
    Add {
        /// Amount (e.g. "12.50")
        amount: String,
        /// Category (e.g. "Food", "Rent", "Travel")
        category: String,
        /// Date (YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS), required
        #[arg(short, long)]
        date: Option<String>,
        #[arg(short, long)]
        notes: Option<String>,
        /// Save even if it exceeds the category's budget
        #[arg(long)]
        override_budget: bool,
    },

    /// Change an expense; omitted fields keep their values
    Edit {
        /// Expense ID (full, or the short form shown by `expense list`)
        id: String,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        date: Option<String>,
        /// New notes; an empty string clears them
        #[arg(short, long)]
        notes: Option<String>,
        /// Save even if it exceeds the category's budget
        #[arg(long)]
        override_budget: bool,
    },

    /// Delete an expense
    #[command(alias = "rm")]
    Delete {
        /// Expense ID (full or short form)
        id: String,
    },

    /// List expenses, newest first
    #[command(alias = "ls")]
    List {
        /// Show at most this many
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Ask the budget guard about an expense without saving it
    Check {
        amount: String,
        category: String,
        /// Date (YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS), required
        #[arg(short, long)]
        date: Option<String>,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    owner: &OwnerId,
    output: OutputFormat,
    cmd: ExpenseCommands,
) -> SpendResult<()> {
    let service = ExpenseService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ExpenseCommands::Add {
            amount,
            category,
            date,
            notes,
            override_budget,
        } => {
            let new = NewExpense {
                amount: Money::parse_non_negative(&amount)?,
                category,
                occurred_on: parse_when(date.as_deref())?,
                notes,
            };

            let expense = service
                .add(owner, new, override_budget)
                .map_err(with_override_hint)?;

            match output {
                OutputFormat::Json => print_json(&expense)?,
                OutputFormat::Table => {
                    println!("Added expense {}", expense.id.short());
                    print!("{}", format_expense_details(&expense, symbol));
                }
            }
        }

        ExpenseCommands::Edit {
            id,
            amount,
            category,
            date,
            notes,
            override_budget,
        } => {
            let id = resolve_expense_id(&service, owner, &id)?;
            let changes = ExpenseChanges {
                amount: amount
                    .as_deref()
                    .map(Money::parse_non_negative)
                    .transpose()?,
                category,
                occurred_on: date.as_deref().map(parse_date_time).transpose()?,
                notes,
            };
            if changes.is_empty() {
                return Err(SpendError::Validation(
                    "Nothing to change. Pass --amount, --category, --date or --notes".into(),
                ));
            }

            let expense = service
                .update(owner, id, changes, override_budget)
                .map_err(with_override_hint)?;

            match output {
                OutputFormat::Json => print_json(&expense)?,
                OutputFormat::Table => {
                    println!("Updated expense {}", expense.id.short());
                    print!("{}", format_expense_details(&expense, symbol));
                }
            }
        }

        ExpenseCommands::Delete { id } => {
            let id = resolve_expense_id(&service, owner, &id)?;
            let expense = service.delete(owner, id)?;

            match output {
                OutputFormat::Json => print_json(&serde_json::json!({
                    "message": "Expense removed",
                    "id": expense.id,
                }))?,
                OutputFormat::Table => println!(
                    "Deleted expense {} ({} {})",
                    expense.id.short(),
                    expense.category,
                    expense.amount.format_with_symbol(symbol)
                ),
            }
        }

        ExpenseCommands::List { limit } => {
            let mut expenses = service.list(owner)?;
            if let Some(limit) = limit {
                expenses.truncate(limit);
            }

            match output {
                OutputFormat::Json => print_json(&expenses)?,
                OutputFormat::Table => {
                    print!("{}", format_expense_list(&expenses, symbol, &settings.date_format))
                }
            }
        }

        ExpenseCommands::Check {
            amount,
            category,
            date,
        } => {
            let amount = Money::parse_non_negative(&amount)?;
            let when = parse_when(date.as_deref())?;

            let decision =
                BudgetGuard::new(storage).check_budget(owner, &category, amount, when, None)?;

            match output {
                OutputFormat::Json => print_json(&decision)?,
                OutputFormat::Table => match &decision {
                    GuardDecision::Allowed => println!("Allowed: within budget"),
                    GuardDecision::Denied(breach) => println!("Denied: {}", breach),
                },
            }
        }
    }

    Ok(())
}

/// The expense date; there is no implicit "now"
fn parse_when(raw: Option<&str>) -> SpendResult<NaiveDateTime> {
    match raw {
        Some(raw) => Ok(parse_date_time(raw)?),
        None => Err(SpendError::Validation(
            "Amount, category, and date are required.".into(),
        )),
    }
}

fn with_override_hint(err: SpendError) -> SpendError {
    if err.is_budget_exceeded() {
        eprintln!("hint: re-run with --override-budget to save it anyway");
    }
    err
}

/// Accept a full UUID, an `exp-` prefixed ID, or a unique prefix of one
/// of the owner's expense IDs
fn resolve_expense_id(service: &ExpenseService<'_>, owner: &OwnerId, input: &str) -> SpendResult<ExpenseId> {
    if let Ok(id) = input.parse::<ExpenseId>() {
        return Ok(id);
    }

    let needle = input.trim().trim_start_matches("exp-").to_ascii_lowercase();
    if needle.is_empty() {
        return Err(SpendError::Validation("Expense ID is required".into()));
    }

    let matches: Vec<ExpenseId> = service
        .list(owner)?
        .into_iter()
        .map(|e| e.id)
        .filter(|id| id.to_string().starts_with(&needle))
        .collect();

    match matches.as_slice() {
        [id] => Ok(*id),
        [] => Err(SpendError::expense_not_found(input)),
        _ => Err(SpendError::Validation(format!(
            "Expense ID '{}' is ambiguous; use more characters",
            input
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::SpendPaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_resolve_expense_id() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let owner = OwnerId::parse("alice").unwrap();
        let expense = service
            .add(
                &owner,
                NewExpense {
                    amount: Money::from_units(1),
                    category: "Food".into(),
                    occurred_on: parse_date_time("2025-03-01").unwrap(),
                    notes: None,
                },
                false,
            )
            .unwrap();

        let full = expense.id.to_string();
        assert_eq!(resolve_expense_id(&service, &owner, &full).unwrap(), expense.id);
        assert_eq!(
            resolve_expense_id(&service, &owner, &expense.id.short()).unwrap(),
            expense.id
        );

        let bob = OwnerId::parse("bob").unwrap();
        assert!(resolve_expense_id(&service, &bob, &expense.id.short())
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_parse_when() {
        let parsed = parse_when(Some("2025-03-10T08:30:00")).unwrap();
        assert_eq!(parsed.format("%Y-%m-%d %H:%M").to_string(), "2025-03-10 08:30");
        assert!(parse_when(Some("yesterday")).unwrap_err().is_validation());
    }

    #[test]
    fn test_missing_date_is_rejected() {
        let err = parse_when(None).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "Validation error: Amount, category, and date are required."
        );
    }
}
