//! Expense service
//!
//! The expense write path: ownership checks, validation, the budget guard,
//! and the override that lets a caller write past a denial.

use chrono::NaiveDateTime;

use crate::audit::{AuditEntry, EntityType};
use crate::error::{SpendError, SpendResult};
use crate::models::expense::normalize_notes;
use crate::models::{Expense, ExpenseId, Money, OwnerId};
use crate::storage::{ExpenseLedger, Storage};

use super::guard::{BudgetGuard, GuardDecision};

/// Fields for a new expense
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub amount: Money,
    pub category: String,
    pub occurred_on: NaiveDateTime,
    pub notes: Option<String>,
}

/// Partial update; `None` keeps the stored value
///
/// Blank `notes` clears them.
#[derive(Debug, Clone, Default)]
pub struct ExpenseChanges {
    pub amount: Option<Money>,
    pub category: Option<String>,
    pub occurred_on: Option<NaiveDateTime>,
    pub notes: Option<String>,
}

impl ExpenseChanges {
    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.category.is_none()
            && self.occurred_on.is_none()
            && self.notes.is_none()
    }
}

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

impl<'a> ExpenseService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// All of the owner's expenses, newest first
    pub fn list(&self, owner: &OwnerId) -> SpendResult<Vec<Expense>> {
        self.storage.expenses.list_by_owner(owner)
    }

    /// Record a new expense
    ///
    /// Unless `override_budget` is set, the budget guard runs first and a
    /// denial is returned as `SpendError::BudgetExceeded` with nothing
    /// written.
    pub fn add(&self, owner: &OwnerId, new: NewExpense, override_budget: bool) -> SpendResult<Expense> {
        let expense = Expense::new(owner.clone(), new.amount, new.category, new.occurred_on)
            .with_notes(new.notes);
        expense
            .validate()
            .map_err(|e| SpendError::Validation(e.to_string()))?;

        self.enforce_budget(&expense, None, override_budget)?;

        self.storage.expenses.insert(expense.clone())?;
        tracing::info!(id = %expense.id, category = %expense.category, amount = %expense.amount, "expense added");

        let entry = AuditEntry::create(
            EntityType::Expense,
            expense.id.to_string(),
            owner.as_str(),
            Some(expense.category.clone()),
            &expense,
        )
        .with_budget_override(override_budget);
        self.storage.log_entry(&entry)?;

        Ok(expense)
    }

    /// Change an existing expense
    ///
    /// The guard sees the edited values and leaves the expense's own stored
    /// amount out of the month total.
    pub fn update(
        &self,
        owner: &OwnerId,
        id: ExpenseId,
        changes: ExpenseChanges,
        override_budget: bool,
    ) -> SpendResult<Expense> {
        let before = self.owned(owner, id)?;

        let mut expense = before.clone();
        if let Some(amount) = changes.amount {
            expense.amount = amount;
        }
        if let Some(category) = changes.category {
            expense.category = category.trim().to_string();
        }
        if let Some(occurred_on) = changes.occurred_on {
            expense.occurred_on = occurred_on;
        }
        if changes.notes.is_some() {
            expense.notes = normalize_notes(changes.notes);
        }
        expense
            .validate()
            .map_err(|e| SpendError::Validation(e.to_string()))?;

        self.enforce_budget(&expense, Some(id), override_budget)?;

        expense.touch();
        self.storage.expenses.update(expense.clone())?;
        tracing::info!(id = %id, "expense updated");

        let entry = AuditEntry::update(
            EntityType::Expense,
            id.to_string(),
            owner.as_str(),
            Some(expense.category.clone()),
            &before,
            &expense,
        )
        .with_budget_override(override_budget);
        self.storage.log_entry(&entry)?;

        Ok(expense)
    }

    /// Remove an expense owned by `owner`
    pub fn delete(&self, owner: &OwnerId, id: ExpenseId) -> SpendResult<Expense> {
        let expense = self.owned(owner, id)?;

        if !self.storage.expenses.delete(id)? {
            return Err(SpendError::expense_not_found(id.to_string()));
        }
        tracing::info!(id = %id, "expense deleted");

        self.storage.log_delete(
            EntityType::Expense,
            id.to_string(),
            owner,
            Some(expense.category.clone()),
            &expense,
        )?;

        Ok(expense)
    }

    fn owned(&self, owner: &OwnerId, id: ExpenseId) -> SpendResult<Expense> {
        let expense = self
            .storage
            .expenses
            .get(id)?
            .ok_or_else(|| SpendError::expense_not_found(id.to_string()))?;

        if !expense.is_owned_by(owner) {
            tracing::warn!(id = %id, owner = %owner, "expense belongs to another owner");
            return Err(SpendError::expense_unauthorized(id.to_string()));
        }

        Ok(expense)
    }

    fn enforce_budget(
        &self,
        expense: &Expense,
        exclude: Option<ExpenseId>,
        override_budget: bool,
    ) -> SpendResult<()> {
        if override_budget {
            tracing::warn!(
                category = %expense.category,
                amount = %expense.amount,
                "budget check skipped by override"
            );
            return Ok(());
        }

        let decision = BudgetGuard::new(self.storage).check_budget(
            &expense.owner,
            &expense.category,
            expense.amount,
            expense.occurred_on,
            exclude,
        )?;

        match decision {
            GuardDecision::Allowed => Ok(()),
            GuardDecision::Denied(breach) => {
                tracing::warn!(
                    category = %breach.category,
                    limit = %breach.limit,
                    current = %breach.current_spending,
                    "expense rejected by budget guard"
                );
                Err(SpendError::BudgetExceeded(breach.reason()))
            }
        }
    }
}
