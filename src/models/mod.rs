//! Core data models for spendwise
//!
//! Expenses, monthly budgets, and the derived budget-vs-actual rows, plus the
//! month and money primitives they are built on.

pub mod budget;
pub mod expense;
pub mod ids;
pub mod money;
pub mod month;
pub mod reconciliation;

pub use budget::{Budget, BudgetKey};
pub use expense::Expense;
pub use ids::{BudgetId, ExpenseId, OwnerId};
pub use money::Money;
pub use month::{DateRange, MonthToken};
pub use reconciliation::{AlertTier, ReconciliationResult};
