//! CLI command handlers
//!
//! Bridges clap argument parsing with the service layer. This is the caller
//! layer for the services: it resolves the acting owner, validates raw input
//! and decides whether a budget denial blocks a write.

pub mod budget;
pub mod expense;
pub mod export;
pub mod history;
pub mod report;

pub use budget::{handle_budget_command, BudgetCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use export::{handle_export_command, ExportCommands};
pub use history::handle_history_command;
pub use report::{handle_report_command, ReportCommands};

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::settings::Settings;
use crate::error::{SpendError, SpendResult};
use crate::models::month::parse_date;
use crate::models::OwnerId;

/// How command results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Table
        }
    }
}

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> SpendResult<()> {
    let text = serde_json::to_string_pretty(value)?;
    println!("{}", text);
    Ok(())
}

/// The acting owner: `--owner` / `SPENDWISE_OWNER`, then the configured default
pub fn resolve_owner(flag: Option<&str>, settings: &Settings) -> SpendResult<OwnerId> {
    if let Some(raw) = flag {
        return Ok(OwnerId::parse(raw)?);
    }
    settings.default_owner().ok_or_else(|| {
        SpendError::Validation(
            "No owner given. Pass --owner, set SPENDWISE_OWNER, or set default_owner in config.json"
                .into(),
        )
    })
}

/// Parse an optional date argument; absence is left for the service to judge
pub(crate) fn parse_optional_date(raw: Option<&str>) -> SpendResult<Option<NaiveDate>> {
    raw.map(parse_date).transpose().map_err(SpendError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_flag_wins() {
        let mut settings = Settings::default();
        settings.default_owner = Some("bob".into());

        let owner = resolve_owner(Some("alice"), &settings).unwrap();
        assert_eq!(owner.as_str(), "alice");

        let owner = resolve_owner(None, &settings).unwrap();
        assert_eq!(owner.as_str(), "bob");
    }

    #[test]
    fn test_missing_owner_is_validation_error() {
        let err = resolve_owner(None, &Settings::default()).unwrap_err();
        assert!(err.is_validation());

        let err = resolve_owner(Some("  "), &Settings::default()).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_parse_optional_date() {
        assert_eq!(parse_optional_date(None).unwrap(), None);
        assert_eq!(
            parse_optional_date(Some("2025-03-01")).unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 1)
        );
        assert!(parse_optional_date(Some("03/01/2025")).unwrap_err().is_validation());
        assert!(parse_optional_date(Some("2025-03-01T10:00:00"))
            .unwrap_err()
            .is_validation());
    }
}
