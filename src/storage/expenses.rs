//! Expense repository for JSON storage
//!
//! Manages loading and saving expenses to `expenses.json` and answers the
//! aggregate queries the budget services need.

use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::SpendError;
use crate::models::{DateRange, Expense, ExpenseId, Money, OwnerId};

use super::file_io::{read_json, write_json_atomic};
use super::ExpenseLedger;

/// Serializable expense file layout
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ExpenseData {
    #[serde(default)]
    expenses: Vec<Expense>,
}

/// Repository for expense persistence
pub struct ExpenseRepository {
    path: PathBuf,
    expenses: RwLock<Vec<Expense>>,
}

impl ExpenseRepository {
    /// Create a new expense repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            expenses: RwLock::new(Vec::new()),
        }
    }

    /// Load expenses from disk
    pub fn load(&self) -> Result<(), SpendError> {
        let file_data: ExpenseData = read_json(&self.path)?;
        let mut expenses = self.write()?;
        *expenses = file_data.expenses;
        tracing::debug!(count = expenses.len(), "expenses loaded");
        Ok(())
    }

    /// Save expenses to disk
    pub fn save(&self) -> Result<(), SpendError> {
        let expenses = self.read()?;
        self.persist(&expenses)
    }

    /// Count expenses across all owners
    pub fn count(&self) -> Result<usize, SpendError> {
        Ok(self.read()?.len())
    }

    fn persist(&self, expenses: &[Expense]) -> Result<(), SpendError> {
        let file_data = ExpenseData {
            expenses: expenses.to_vec(),
        };
        write_json_atomic(&self.path, &file_data)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Expense>>, SpendError> {
        self.expenses
            .read()
            .map_err(|e| SpendError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Expense>>, SpendError> {
        self.expenses
            .write()
            .map_err(|e| SpendError::Storage(format!("Failed to acquire write lock: {}", e)))
    }
}

impl ExpenseLedger for ExpenseRepository {
    fn sum_by_category(
        &self,
        owner: &OwnerId,
        range: &DateRange,
    ) -> Result<Vec<(String, Money)>, SpendError> {
        let expenses = self.read()?;

        let mut totals: Vec<(String, Money)> = Vec::new();
        for expense in expenses
            .iter()
            .filter(|e| &e.owner == owner && range.contains(e.occurred_on))
        {
            match totals.iter_mut().find(|(cat, _)| cat == &expense.category) {
                Some((_, total)) => *total += expense.amount,
                None => totals.push((expense.category.clone(), expense.amount)),
            }
        }

        Ok(totals)
    }

    fn sum_total(
        &self,
        owner: &OwnerId,
        category: &str,
        range: &DateRange,
        exclude: Option<ExpenseId>,
    ) -> Result<Money, SpendError> {
        let expenses = self.read()?;

        Ok(expenses
            .iter()
            .filter(|e| &e.owner == owner && e.category == category)
            .filter(|e| range.contains(e.occurred_on))
            .filter(|e| Some(e.id) != exclude)
            .map(|e| e.amount)
            .sum())
    }

    fn list_by_owner(&self, owner: &OwnerId) -> Result<Vec<Expense>, SpendError> {
        let expenses = self.read()?;

        let mut list: Vec<_> = expenses
            .iter()
            .filter(|e| &e.owner == owner)
            .cloned()
            .collect();
        list.sort_by(|a, b| b.occurred_on.cmp(&a.occurred_on));
        Ok(list)
    }

    fn list_in_range(&self, owner: &OwnerId, range: &DateRange) -> Result<Vec<Expense>, SpendError> {
        let expenses = self.read()?;

        let mut list: Vec<_> = expenses
            .iter()
            .filter(|e| &e.owner == owner && range.contains(e.occurred_on))
            .cloned()
            .collect();
        list.sort_by(|a, b| a.occurred_on.cmp(&b.occurred_on));
        Ok(list)
    }

    fn get(&self, id: ExpenseId) -> Result<Option<Expense>, SpendError> {
        let expenses = self.read()?;
        Ok(expenses.iter().find(|e| e.id == id).cloned())
    }

    fn insert(&self, expense: Expense) -> Result<(), SpendError> {
        let mut expenses = self.write()?;

        if expenses.iter().any(|e| e.id == expense.id) {
            return Err(SpendError::Storage(format!(
                "Expense {} already exists",
                expense.id
            )));
        }
        expenses.push(expense);

        self.persist(&expenses)
    }

    fn update(&self, expense: Expense) -> Result<(), SpendError> {
        let mut expenses = self.write()?;

        let slot = expenses
            .iter_mut()
            .find(|e| e.id == expense.id)
            .ok_or_else(|| SpendError::expense_not_found(expense.id.to_string()))?;
        *slot = expense;

        self.persist(&expenses)
    }

    fn delete(&self, id: ExpenseId) -> Result<bool, SpendError> {
        let mut expenses = self.write()?;

        let before = expenses.len();
        expenses.retain(|e| e.id != id);
        if expenses.len() == before {
            return Ok(false);
        }

        self.persist(&expenses)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, ExpenseRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = ExpenseRepository::new(temp_dir.path().join("expenses.json"));
        repo.load().unwrap();
        (temp_dir, repo)
    }

    fn alice() -> OwnerId {
        OwnerId::parse("alice").unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn march() -> DateRange {
        DateRange::from_dates(
            NaiveDate::from_ymd_opt(2025, 3, 1),
            NaiveDate::from_ymd_opt(2025, 3, 31),
        )
        .unwrap()
    }

    fn add(repo: &ExpenseRepository, owner: OwnerId, units: i64, category: &str, when: NaiveDateTime) -> ExpenseId {
        let expense = Expense::new(owner, Money::from_units(units), category, when);
        let id = expense.id;
        repo.insert(expense).unwrap();
        id
    }

    #[test]
    fn test_insert_and_get() {
        let (_temp_dir, repo) = create_test_repo();
        let id = add(&repo, alice(), 12, "Food", at(2025, 3, 10, 9));

        let stored = repo.get(id).unwrap().unwrap();
        assert_eq!(stored.amount, Money::from_units(12));
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn test_sum_by_category_first_seen_order() {
        let (_temp_dir, repo) = create_test_repo();
        add(&repo, alice(), 30, "Travel", at(2025, 3, 2, 9));
        add(&repo, alice(), 10, "Food", at(2025, 3, 3, 9));
        add(&repo, alice(), 5, "Travel", at(2025, 3, 31, 23));
        add(&repo, alice(), 99, "Food", at(2025, 4, 1, 0));
        add(&repo, OwnerId::parse("bob").unwrap(), 7, "Food", at(2025, 3, 5, 9));

        let totals = repo.sum_by_category(&alice(), &march()).unwrap();
        assert_eq!(
            totals,
            vec![
                ("Travel".to_string(), Money::from_units(35)),
                ("Food".to_string(), Money::from_units(10)),
            ]
        );
    }

    #[test]
    fn test_sum_total_with_exclusion() {
        let (_temp_dir, repo) = create_test_repo();
        let first = add(&repo, alice(), 50, "Food", at(2025, 3, 2, 9));
        add(&repo, alice(), 20, "Food", at(2025, 3, 4, 9));
        add(&repo, alice(), 70, "Rent", at(2025, 3, 4, 9));

        assert_eq!(
            repo.sum_total(&alice(), "Food", &march(), None).unwrap(),
            Money::from_units(70)
        );
        assert_eq!(
            repo.sum_total(&alice(), "Food", &march(), Some(first)).unwrap(),
            Money::from_units(20)
        );
    }

    #[test]
    fn test_sums_saturate() {
        let (_temp_dir, repo) = create_test_repo();
        let huge = Money::from_cents(i64::MAX - 1);
        for day in [1, 2] {
            repo.insert(Expense::new(alice(), huge, "Food", at(2025, 3, day, 9)))
                .unwrap();
        }

        let max = Money::from_cents(i64::MAX);
        assert_eq!(repo.sum_total(&alice(), "Food", &march(), None).unwrap(), max);
        assert_eq!(
            repo.sum_by_category(&alice(), &march()).unwrap(),
            vec![("Food".to_string(), max)]
        );
    }

    #[test]
    fn test_list_by_owner_newest_first() {
        let (_temp_dir, repo) = create_test_repo();
        add(&repo, alice(), 1, "Food", at(2025, 3, 2, 9));
        add(&repo, alice(), 2, "Food", at(2025, 3, 9, 9));
        add(&repo, alice(), 3, "Food", at(2025, 3, 5, 9));

        let amounts: Vec<i64> = repo
            .list_by_owner(&alice())
            .unwrap()
            .iter()
            .map(|e| e.amount.units())
            .collect();
        assert_eq!(amounts, vec![2, 3, 1]);
    }

    #[test]
    fn test_update_and_delete() {
        let (_temp_dir, repo) = create_test_repo();
        let id = add(&repo, alice(), 1, "Food", at(2025, 3, 2, 9));

        let mut expense = repo.get(id).unwrap().unwrap();
        expense.amount = Money::from_units(9);
        repo.update(expense).unwrap();
        assert_eq!(repo.get(id).unwrap().unwrap().amount, Money::from_units(9));

        assert!(repo.delete(id).unwrap());
        assert!(!repo.delete(id).unwrap());
        assert!(repo.get(id).unwrap().is_none());
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let (_temp_dir, repo) = create_test_repo();
        let expense = Expense::new(alice(), Money::from_units(1), "Food", at(2025, 3, 2, 9));
        assert!(repo.update(expense).unwrap_err().is_not_found());
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        let id = add(&repo, alice(), 42, "Food", at(2025, 3, 2, 9));

        let reloaded = ExpenseRepository::new(temp_dir.path().join("expenses.json"));
        reloaded.load().unwrap();
        assert_eq!(reloaded.get(id).unwrap().unwrap().amount, Money::from_units(42));
    }
}
