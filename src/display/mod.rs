//! Display formatting for terminal output
//!
//! Plain-text tables for budgets, reconciliation, expenses and the spending
//! summary. JSON output bypasses this module.

pub mod budget;
pub mod expense;
pub mod report;
pub mod summary;

pub use budget::{format_budget_list, format_reconciliation};
pub use expense::{format_expense_details, format_expense_list};
pub use summary::format_spending_summary;
