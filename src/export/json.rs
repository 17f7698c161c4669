//! JSON export of one owner's data with schema versioning

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{SpendError, SpendResult};
use crate::models::{Budget, Expense, OwnerId};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnerExport {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    pub app_version: String,
    pub owner: OwnerId,
    /// Newest first
    pub expenses: Vec<Expense>,
    pub budgets: Vec<Budget>,
    pub metadata: ExportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub expense_count: usize,
    pub budget_count: usize,
    pub earliest_expense: Option<String>,
    pub latest_expense: Option<String>,
}

impl OwnerExport {
    pub fn new(owner: OwnerId, expenses: Vec<Expense>, budgets: Vec<Budget>) -> Self {
        let earliest_expense = expenses
            .iter()
            .map(|e| e.occurred_on)
            .min()
            .map(|d| d.format("%Y-%m-%d").to_string());
        let latest_expense = expenses
            .iter()
            .map(|e| e.occurred_on)
            .max()
            .map(|d| d.format("%Y-%m-%d").to_string());

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            metadata: ExportMetadata {
                expense_count: expenses.len(),
                budget_count: budgets.len(),
                earliest_expense,
                latest_expense,
            },
            owner,
            expenses,
            budgets,
        }
    }
}

/// Write an owner export as pretty JSON
pub fn export_owner_json<W: Write>(export: &OwnerExport, mut writer: W) -> SpendResult<()> {
    serde_json::to_writer_pretty(&mut writer, export)
        .map_err(|e| SpendError::Export(format!("Failed to serialize export: {}", e)))?;
    writeln!(writer).map_err(|e| SpendError::Export(e.to_string()))?;
    Ok(())
}
