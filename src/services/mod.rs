//! Service layer for spendwise
//!
//! Business logic on top of the storage layer: budget reconciliation, the
//! expense budget guard, and the budget and expense write paths.

pub mod budget;
pub mod expense;
pub mod guard;
pub mod reconciliation;
pub mod summary;

pub use budget::{BudgetService, DeleteOutcome};
pub use expense::{ExpenseChanges, ExpenseService, NewExpense};
pub use guard::{BudgetBreach, BudgetGuard, GuardDecision};
pub use reconciliation::ReconciliationService;
pub use summary::{SpendingSummary, SummaryService};
