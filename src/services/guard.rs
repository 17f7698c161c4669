//! Pre-write budget check for expenses
//!
//! The guard only answers "would this expense push its category over the
//! monthly budget?". Whether a denial blocks the write is up to the caller,
//! which may skip the check entirely on an explicit override.
//!
//! The check and the later write are not atomic. Two expenses submitted at
//! the same time for the same category and month can both be allowed and
//! together exceed the limit. The guard is advisory and accepts that.

use std::fmt;

use chrono::NaiveDateTime;
use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::error::SpendResult;
use crate::models::{BudgetKey, ExpenseId, Money, MonthToken, OwnerId};
use crate::storage::{BudgetRegistry, ExpenseLedger, Storage};

/// Details of a denied check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetBreach {
    pub category: String,
    pub limit: Money,
    /// Spend already recorded in the month, excluding the expense being edited
    pub current_spending: Money,
}

impl BudgetBreach {
    /// User-facing explanation of the denial
    pub fn reason(&self) -> String {
        format!(
            "This expense exceeds your budget for \"{}\". Limit: {}, Current Spending: {}.",
            self.category, self.limit, self.current_spending
        )
    }
}

impl fmt::Display for BudgetBreach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason())
    }
}

/// Outcome of a budget check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allowed,
    Denied(BudgetBreach),
}

impl GuardDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }

    pub fn reason(&self) -> Option<String> {
        match self {
            Self::Allowed => None,
            Self::Denied(breach) => Some(breach.reason()),
        }
    }
}

// {"allowed": true} or {"allowed": false, "reason": "..."}
impl Serialize for GuardDecision {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Allowed => {
                let mut state = serializer.serialize_struct("GuardDecision", 1)?;
                state.serialize_field("allowed", &true)?;
                state.end()
            }
            Self::Denied(breach) => {
                let mut state = serializer.serialize_struct("GuardDecision", 2)?;
                state.serialize_field("allowed", &false)?;
                state.serialize_field("reason", &breach.reason())?;
                state.end()
            }
        }
    }
}

/// Checks proposed expenses against the monthly budget of their category
pub struct BudgetGuard<'a> {
    budgets: &'a dyn BudgetRegistry,
    expenses: &'a dyn ExpenseLedger,
}

impl<'a> BudgetGuard<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self::with_collaborators(&storage.budgets, &storage.expenses)
    }

    pub fn with_collaborators(
        budgets: &'a dyn BudgetRegistry,
        expenses: &'a dyn ExpenseLedger,
    ) -> Self {
        Self { budgets, expenses }
    }

    /// Would adding `amount` on `expense_date` exceed the category's budget
    /// for that month?
    ///
    /// No budget for the month means no constraint. `exclude` leaves one
    /// existing expense out of the current total, so an edited expense is not
    /// counted twice. Exceeding the budget is a normal `Denied` result, never
    /// an error.
    pub fn check_budget(
        &self,
        owner: &OwnerId,
        category: &str,
        amount: Money,
        expense_date: NaiveDateTime,
        exclude: Option<ExpenseId>,
    ) -> SpendResult<GuardDecision> {
        let month = MonthToken::containing(expense_date);
        let key = BudgetKey::new(owner.clone(), category, month);

        let budget = match self.budgets.find_one(&key)? {
            Some(budget) => budget,
            None => {
                tracing::debug!(budget = %key, "no budget set, expense allowed");
                return Ok(GuardDecision::Allowed);
            }
        };

        let current_spending =
            self.expenses
                .sum_total(owner, &key.category, &month.range(), exclude)?;

        // An unrepresentable total is over any limit
        let within_limit = current_spending
            .checked_add(amount)
            .map_or(false, |total| total <= budget.limit);

        if !within_limit {
            tracing::debug!(
                budget = %key,
                limit = %budget.limit,
                current = %current_spending,
                proposed = %amount,
                "expense would exceed budget"
            );
            return Ok(GuardDecision::Denied(BudgetBreach {
                category: budget.category,
                limit: budget.limit,
                current_spending,
            }));
        }

        Ok(GuardDecision::Allowed)
    }
}
