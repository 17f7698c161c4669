//! Budget model
//!
//! A spending ceiling for one category in one calendar month. At most one
//! budget exists per (owner, category, month).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{BudgetId, OwnerId};
use super::money::Money;
use super::month::MonthToken;

/// A monthly budget for a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    /// Unique identifier, stable across overwrites of the same key
    pub id: BudgetId,

    /// The user this budget belongs to
    pub owner: OwnerId,

    /// Category label the limit applies to
    pub category: String,

    /// The month the limit applies to
    pub month: MonthToken,

    /// Maximum spend for the month
    pub limit: Money,

    /// When this budget was first set
    pub created_at: DateTime<Utc>,

    /// When this budget was last modified
    pub updated_at: DateTime<Utc>,
}

impl Budget {
    /// Create a new budget
    pub fn new(owner: OwnerId, category: impl Into<String>, month: MonthToken, limit: Money) -> Self {
        let now = Utc::now();
        Self {
            id: BudgetId::new(),
            owner,
            category: category.into().trim().to_string(),
            month,
            limit,
            created_at: now,
            updated_at: now,
        }
    }

    /// The uniqueness key of this budget
    pub fn key(&self) -> BudgetKey {
        BudgetKey::new(self.owner.clone(), self.category.clone(), self.month)
    }

    /// Set the limit
    pub fn set_limit(&mut self, limit: Money) {
        self.limit = limit;
        self.updated_at = Utc::now();
    }

    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if self.limit.is_negative() {
            return Err(BudgetValidationError::NegativeLimit);
        }
        if self.category.trim().is_empty() {
            return Err(BudgetValidationError::EmptyCategory);
        }
        Ok(())
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: limit {}", self.month, self.category, self.limit)
    }
}

/// Composite key enforcing one budget per owner, category and month
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BudgetKey {
    pub owner: OwnerId,
    pub category: String,
    pub month: MonthToken,
}

impl BudgetKey {
    pub fn new(owner: OwnerId, category: impl Into<String>, month: MonthToken) -> Self {
        Self {
            owner,
            category: category.into().trim().to_string(),
            month,
        }
    }

    pub fn matches(&self, budget: &Budget) -> bool {
        budget.owner == self.owner && budget.category == self.category && budget.month == self.month
    }
}

impl fmt::Display for BudgetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.owner, self.category, self.month)
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    NegativeLimit,
    EmptyCategory,
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeLimit => write!(f, "Budget amount cannot be negative"),
            Self::EmptyCategory => write!(f, "Budget category is required"),
        }
    }
}

impl std::error::Error for BudgetValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn march() -> MonthToken {
        MonthToken::parse("2025-03").unwrap()
    }

    fn owner() -> OwnerId {
        OwnerId::parse("alice").unwrap()
    }

    #[test]
    fn test_new_budget() {
        let budget = Budget::new(owner(), " Food ", march(), Money::from_units(1000));
        assert_eq!(budget.category, "Food");
        assert_eq!(budget.limit.cents(), 100_000);
        assert!(budget.validate().is_ok());
    }

    #[test]
    fn test_key_matches_trimmed_category() {
        let budget = Budget::new(owner(), "Food", march(), Money::from_units(10));
        let key = BudgetKey::new(owner(), "Food ", march());
        assert!(key.matches(&budget));
        assert_eq!(budget.key(), key);
        assert!(!BudgetKey::new(owner(), "Rent", march()).matches(&budget));
        assert!(!BudgetKey::new(owner(), "Food", march().next()).matches(&budget));
    }

    #[test]
    fn test_validation() {
        let mut budget = Budget::new(owner(), "Food", march(), Money::from_cents(-100));
        assert_eq!(budget.validate(), Err(BudgetValidationError::NegativeLimit));

        budget.set_limit(Money::zero());
        assert!(budget.validate().is_ok());

        budget.category = String::new();
        assert_eq!(budget.validate(), Err(BudgetValidationError::EmptyCategory));
    }

    #[test]
    fn test_serialization() {
        let budget = Budget::new(owner(), "Food", march(), Money::from_units(10));
        let json = serde_json::to_value(&budget).unwrap();
        assert_eq!(json["month"], "2025-03");
        let back: Budget = serde_json::from_value(json).unwrap();
        assert_eq!(back, budget);
    }
}
