//! Storage layer for spendwise
//!
//! JSON document files with atomic writes, behind two collaborator traits the
//! services program against. The `Storage` coordinator owns both repositories
//! plus the audit logger.

pub mod budgets;
pub mod expenses;
pub mod file_io;

pub use budgets::BudgetRepository;
pub use expenses::ExpenseRepository;
pub use file_io::{read_json, write_json_atomic};

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::SpendPaths;
use crate::error::{SpendError, SpendResult};
use crate::models::{Budget, BudgetKey, DateRange, Expense, ExpenseId, Money, MonthToken, OwnerId};

/// Budget lookups and writes
///
/// Implementations must make `upsert` atomic on the (owner, category, month)
/// key: concurrent upserts of one key leave exactly one record.
pub trait BudgetRegistry {
    /// Every budget of `owner` whose month is one of `months`, in storage order
    fn find_by_owner_and_months(
        &self,
        owner: &OwnerId,
        months: &[MonthToken],
    ) -> SpendResult<Vec<Budget>>;

    fn find_one(&self, key: &BudgetKey) -> SpendResult<Option<Budget>>;

    fn list_for_month(&self, owner: &OwnerId, month: MonthToken) -> SpendResult<Vec<Budget>>;

    /// Insert or overwrite the limit for `key`
    fn upsert(&self, key: &BudgetKey, limit: Money) -> SpendResult<Budget>;

    /// Remove the budget for `key`; `false` if there was none
    fn delete_one(&self, key: &BudgetKey) -> SpendResult<bool>;
}

/// Expense aggregates and record access
pub trait ExpenseLedger {
    /// Per-category spend of `owner` inside `range`, in first-seen order
    fn sum_by_category(&self, owner: &OwnerId, range: &DateRange)
        -> SpendResult<Vec<(String, Money)>>;

    /// Spend of `owner` in one category inside `range`, optionally leaving one expense out
    fn sum_total(
        &self,
        owner: &OwnerId,
        category: &str,
        range: &DateRange,
        exclude: Option<ExpenseId>,
    ) -> SpendResult<Money>;

    /// Newest first
    fn list_by_owner(&self, owner: &OwnerId) -> SpendResult<Vec<Expense>>;

    /// Oldest first
    fn list_in_range(&self, owner: &OwnerId, range: &DateRange) -> SpendResult<Vec<Expense>>;

    fn get(&self, id: ExpenseId) -> SpendResult<Option<Expense>>;

    fn insert(&self, expense: Expense) -> SpendResult<()>;

    fn update(&self, expense: Expense) -> SpendResult<()>;

    fn delete(&self, id: ExpenseId) -> SpendResult<bool>;
}

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: SpendPaths,
    pub budgets: BudgetRepository,
    pub expenses: ExpenseRepository,
    audit: AuditLogger,
    audit_enabled: bool,
}

impl Storage {
    /// Create a new Storage instance, creating the data directories
    pub fn new(paths: SpendPaths) -> Result<Self, SpendError> {
        paths.ensure_directories()?;

        Ok(Self {
            budgets: BudgetRepository::new(paths.budgets_file()),
            expenses: ExpenseRepository::new(paths.expenses_file()),
            audit: AuditLogger::new(paths.audit_log()),
            audit_enabled: true,
            paths,
        })
    }

    /// Turn audit logging on or off (from settings)
    pub fn with_audit(mut self, enabled: bool) -> Self {
        self.audit_enabled = enabled;
        self
    }

    pub fn paths(&self) -> &SpendPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), SpendError> {
        self.budgets.load()?;
        self.expenses.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), SpendError> {
        self.budgets.save()?;
        self.expenses.save()?;
        Ok(())
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Record a newly created entity
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        owner: &OwnerId,
        entity_name: Option<String>,
        entity: &T,
    ) -> SpendResult<()> {
        self.write_audit(|| {
            AuditEntry::create(entity_type, entity_id, owner.as_str(), entity_name, entity)
        })
    }

    /// Record an update, with a field diff of the two snapshots
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        owner: &OwnerId,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> SpendResult<()> {
        self.write_audit(|| {
            AuditEntry::update(entity_type, entity_id, owner.as_str(), entity_name, before, after)
        })
    }

    /// Record a deletion
    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        owner: &OwnerId,
        entity_name: Option<String>,
        entity: &T,
    ) -> SpendResult<()> {
        self.write_audit(|| {
            AuditEntry::delete(entity_type, entity_id, owner.as_str(), entity_name, entity)
        })
    }

    /// Append a prepared entry (used when the entry needs extra flags)
    pub fn log_entry(&self, entry: &AuditEntry) -> SpendResult<()> {
        self.write_audit(|| entry.clone())
    }

    fn write_audit(&self, build: impl FnOnce() -> AuditEntry) -> SpendResult<()> {
        if !self.audit_enabled {
            return Ok(());
        }
        self.audit.log(&build())
    }
}
