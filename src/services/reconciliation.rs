//! Budget-vs-actual reconciliation
//!
//! Compares every budget an owner set for the months touched by a date range
//! against what they actually spent in that range.

use chrono::NaiveDate;

use crate::error::SpendResult;
use crate::models::{DateRange, Money, MonthToken, OwnerId, ReconciliationResult};
use crate::storage::{BudgetRegistry, ExpenseLedger, Storage};

/// Service for budget reconciliation
pub struct ReconciliationService<'a> {
    budgets: &'a dyn BudgetRegistry,
    expenses: &'a dyn ExpenseLedger,
}

/// Running per-category total while scanning budgets
struct Accumulated {
    category: String,
    budgeted: Money,
    month: MonthToken,
}

impl<'a> ReconciliationService<'a> {
    /// Create a reconciliation service over the application storage
    pub fn new(storage: &'a Storage) -> Self {
        Self::with_collaborators(&storage.budgets, &storage.expenses)
    }

    /// Create a reconciliation service over arbitrary collaborators
    pub fn with_collaborators(
        budgets: &'a dyn BudgetRegistry,
        expenses: &'a dyn ExpenseLedger,
    ) -> Self {
        Self { budgets, expenses }
    }

    /// One row per budgeted category, in the order categories are first met
    /// while scanning the owner's budgets
    ///
    /// Limits of the same category in several months are summed. The row's
    /// `month` is that of the last budget folded in. Spend is taken over the
    /// whole range, not per month. Categories with spending but no budget do
    /// not appear.
    ///
    /// # Errors
    ///
    /// Validation error if either date is missing or `start > end`; storage
    /// errors are passed through.
    pub fn reconcile(
        &self,
        owner: &OwnerId,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> SpendResult<Vec<ReconciliationResult>> {
        let range = DateRange::from_dates(start, end)?;
        let months = range.months();

        let budgets = self.budgets.find_by_owner_and_months(owner, &months)?;
        let spending = self.expenses.sum_by_category(owner, &range)?;

        tracing::debug!(
            owner = %owner,
            months = months.len(),
            budgets = budgets.len(),
            categories_spent = spending.len(),
            "reconciling budgets"
        );

        let mut accumulated: Vec<Accumulated> = Vec::new();
        for budget in budgets {
            match accumulated.iter_mut().find(|a| a.category == budget.category) {
                Some(entry) => {
                    entry.budgeted += budget.limit;
                    entry.month = budget.month;
                }
                None => accumulated.push(Accumulated {
                    category: budget.category,
                    budgeted: budget.limit,
                    month: budget.month,
                }),
            }
        }

        Ok(accumulated
            .into_iter()
            .map(|entry| {
                let actual = spending
                    .iter()
                    .find(|(category, _)| category == &entry.category)
                    .map(|(_, total)| *total)
                    .unwrap_or_default();
                ReconciliationResult::new(entry.category, entry.month, entry.budgeted, actual)
            })
            .collect())
    }
}
