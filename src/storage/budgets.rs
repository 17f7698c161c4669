//! Budget repository for JSON storage
//!
//! Keeps budgets in `budgets.json` in insertion order. Every mutation takes
//! the write lock, applies the change, and persists before releasing it, so
//! two upserts of the same (owner, category, month) key never interleave.

use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::SpendError;
use crate::models::{Budget, BudgetKey, Money, MonthToken, OwnerId};

use super::file_io::{read_json, write_json_atomic};
use super::BudgetRegistry;

/// Serializable budget file layout
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct BudgetData {
    #[serde(default)]
    budgets: Vec<Budget>,
}

/// Repository for budget persistence
pub struct BudgetRepository {
    path: PathBuf,
    budgets: RwLock<Vec<Budget>>,
}

impl BudgetRepository {
    /// Create a new budget repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            budgets: RwLock::new(Vec::new()),
        }
    }

    /// Load budgets from disk
    pub fn load(&self) -> Result<(), SpendError> {
        let file_data: BudgetData = read_json(&self.path)?;
        let mut budgets = self.write()?;
        *budgets = file_data.budgets;
        tracing::debug!(count = budgets.len(), "budgets loaded");
        Ok(())
    }

    /// Save budgets to disk
    pub fn save(&self) -> Result<(), SpendError> {
        let budgets = self.read()?;
        self.persist(&budgets)
    }

    /// Count budgets across all owners
    pub fn count(&self) -> Result<usize, SpendError> {
        Ok(self.read()?.len())
    }

    /// Every budget of an owner, oldest month first
    pub fn list_for_owner(&self, owner: &OwnerId) -> Result<Vec<Budget>, SpendError> {
        let mut budgets: Vec<Budget> = self
            .read()?
            .iter()
            .filter(|b| &b.owner == owner)
            .cloned()
            .collect();
        budgets.sort_by_key(|b| b.month);
        Ok(budgets)
    }

    fn persist(&self, budgets: &[Budget]) -> Result<(), SpendError> {
        let file_data = BudgetData {
            budgets: budgets.to_vec(),
        };
        write_json_atomic(&self.path, &file_data)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Budget>>, SpendError> {
        self.budgets
            .read()
            .map_err(|e| SpendError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Budget>>, SpendError> {
        self.budgets
            .write()
            .map_err(|e| SpendError::Storage(format!("Failed to acquire write lock: {}", e)))
    }
}

impl BudgetRegistry for BudgetRepository {
    fn find_by_owner_and_months(
        &self,
        owner: &OwnerId,
        months: &[MonthToken],
    ) -> Result<Vec<Budget>, SpendError> {
        let budgets = self.read()?;
        Ok(budgets
            .iter()
            .filter(|b| &b.owner == owner && months.contains(&b.month))
            .cloned()
            .collect())
    }

    fn find_one(&self, key: &BudgetKey) -> Result<Option<Budget>, SpendError> {
        let budgets = self.read()?;
        Ok(budgets.iter().find(|b| key.matches(b)).cloned())
    }

    fn list_for_month(&self, owner: &OwnerId, month: MonthToken) -> Result<Vec<Budget>, SpendError> {
        self.find_by_owner_and_months(owner, &[month])
    }

    fn upsert(&self, key: &BudgetKey, limit: Money) -> Result<Budget, SpendError> {
        let mut budgets = self.write()?;

        let stored = match budgets.iter_mut().find(|b| key.matches(b)) {
            Some(existing) => {
                existing.set_limit(limit);
                existing.clone()
            }
            None => {
                let budget = Budget::new(key.owner.clone(), key.category.clone(), key.month, limit);
                budgets.push(budget.clone());
                budget
            }
        };

        self.persist(&budgets)?;
        Ok(stored)
    }

    fn delete_one(&self, key: &BudgetKey) -> Result<bool, SpendError> {
        let mut budgets = self.write()?;

        let before = budgets.len();
        budgets.retain(|b| !key.matches(b));
        if budgets.len() == before {
            return Ok(false);
        }

        self.persist(&budgets)?;
        Ok(true)
    }
}
