//! Budget service
//!
//! Setting, listing and removing monthly category budgets.

use crate::audit::EntityType;
use crate::error::{SpendError, SpendResult};
use crate::models::{Budget, BudgetKey, Money, MonthToken, OwnerId};
use crate::storage::{BudgetRegistry, Storage};

/// Result of a delete request; both variants are successes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    AlreadyAbsent,
}

/// Service for budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

impl<'a> BudgetService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Set the limit for a category in a month, creating or overwriting it
    ///
    /// `month` defaults to the current month.
    pub fn set_budget(
        &self,
        owner: &OwnerId,
        category: &str,
        amount: Money,
        month: Option<MonthToken>,
    ) -> SpendResult<Budget> {
        let month = month.unwrap_or_else(MonthToken::current);
        let key = BudgetKey::new(owner.clone(), category, month);

        if key.category.is_empty() {
            return Err(SpendError::Validation("Category is required".into()));
        }
        if amount.is_negative() {
            return Err(SpendError::Validation(
                "Budget amount must be a non-negative number".into(),
            ));
        }

        let before = self.storage.budgets.find_one(&key)?;
        let budget = self.storage.budgets.upsert(&key, amount)?;
        let label = Some(format!("{} {}", budget.category, budget.month));

        match before {
            Some(before) => {
                tracing::info!(budget = %key, from = %before.limit, to = %budget.limit, "budget updated");
                self.storage.log_update(
                    EntityType::Budget,
                    budget.id.to_string(),
                    owner,
                    label,
                    &before,
                    &budget,
                )?;
            }
            None => {
                tracing::info!(budget = %key, limit = %budget.limit, "budget created");
                self.storage.log_create(
                    EntityType::Budget,
                    budget.id.to_string(),
                    owner,
                    label,
                    &budget,
                )?;
            }
        }

        Ok(budget)
    }

    /// Budgets of one month (default: current), in the order they were first set
    pub fn list_budgets(&self, owner: &OwnerId, month: Option<MonthToken>) -> SpendResult<Vec<Budget>> {
        let month = month.unwrap_or_else(MonthToken::current);
        self.storage.budgets.list_for_month(owner, month)
    }

    /// Remove a budget; removing one that does not exist is not an error
    pub fn delete_budget(
        &self,
        owner: &OwnerId,
        category: &str,
        month: MonthToken,
    ) -> SpendResult<DeleteOutcome> {
        let key = BudgetKey::new(owner.clone(), category, month);

        let existing = match self.storage.budgets.find_one(&key)? {
            Some(budget) => budget,
            None => {
                tracing::debug!(budget = %key, "budget already absent");
                return Ok(DeleteOutcome::AlreadyAbsent);
            }
        };

        if !self.storage.budgets.delete_one(&key)? {
            return Ok(DeleteOutcome::AlreadyAbsent);
        }

        tracing::info!(budget = %key, "budget deleted");
        self.storage.log_delete(
            EntityType::Budget,
            existing.id.to_string(),
            owner,
            Some(format!("{} {}", existing.category, existing.month)),
            &existing,
        )?;

        Ok(DeleteOutcome::Deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::config::paths::SpendPaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn alice() -> OwnerId {
        OwnerId::parse("alice").unwrap()
    }

    fn march() -> MonthToken {
        MonthToken::parse("2025-03").unwrap()
    }

    #[test]
    fn test_set_twice_overwrites() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        service
            .set_budget(&alice(), "Food", Money::from_units(500), Some(march()))
            .unwrap();
        let second = service
            .set_budget(&alice(), "Food", Money::from_units(800), Some(march()))
            .unwrap();

        let budgets = service.list_budgets(&alice(), Some(march())).unwrap();
        assert_eq!(budgets.len(), 1);
        assert_eq!(budgets[0].limit, Money::from_units(800));
        assert_eq!(budgets[0].id, second.id);

        let audit = storage.audit().read_all().unwrap();
        let ops: Vec<Operation> = audit.iter().map(|e| e.operation).collect();
        assert_eq!(ops, vec![Operation::Create, Operation::Update]);
        assert_eq!(audit[1].diff_summary.as_deref(), Some("limit: 50000 -> 80000"));
    }

    #[test]
    fn test_month_defaults_to_current() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        let budget = service
            .set_budget(&alice(), "Rent", Money::from_units(1200), None)
            .unwrap();
        assert_eq!(budget.month, MonthToken::current());
        assert_eq!(service.list_budgets(&alice(), None).unwrap().len(), 1);
    }

    #[test]
    fn test_validation() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        let err = service
            .set_budget(&alice(), "  ", Money::from_units(1), Some(march()))
            .unwrap_err();
        assert!(err.is_validation());

        let err = service
            .set_budget(&alice(), "Food", Money::from_cents(-1), Some(march()))
            .unwrap_err();
        assert!(err.is_validation());

        assert_eq!(storage.budgets.count().unwrap(), 0);
    }

    #[test]
    fn test_zero_limit_is_allowed() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        let budget = service
            .set_budget(&alice(), "Fun", Money::zero(), Some(march()))
            .unwrap();
        assert!(budget.limit.is_zero());
    }

    #[test]
    fn test_delete_and_delete_again() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);
        service
            .set_budget(&alice(), "Food", Money::from_units(500), Some(march()))
            .unwrap();

        assert_eq!(
            service.delete_budget(&alice(), "Food", march()).unwrap(),
            DeleteOutcome::Deleted
        );
        assert_eq!(
            service.delete_budget(&alice(), "Food", march()).unwrap(),
            DeleteOutcome::AlreadyAbsent
        );
        assert!(service.list_budgets(&alice(), Some(march())).unwrap().is_empty());

        let last = storage.audit().read_recent(1).unwrap();
        assert_eq!(last[0].operation, Operation::Delete);
    }

    #[test]
    fn test_delete_never_set_is_success() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        let outcome = service.delete_budget(&alice(), "Travel", march()).unwrap();
        assert_eq!(outcome, DeleteOutcome::AlreadyAbsent);
        assert!(storage.audit().read_all().unwrap().is_empty());
    }
}
