//! Expense model
//!
//! A single spending record. Expenses belong to exactly one owner and carry a
//! free-form category label.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{ExpenseId, OwnerId};
use super::money::Money;

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier
    pub id: ExpenseId,

    /// The user this expense belongs to
    pub owner: OwnerId,

    /// Amount spent (never negative)
    pub amount: Money,

    /// Free-form category label
    pub category: String,

    /// When the expense happened
    pub occurred_on: NaiveDateTime,

    /// Optional notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// When this record was created
    pub created_at: DateTime<Utc>,

    /// When this record was last modified
    pub updated_at: DateTime<Utc>,
}

impl Expense {
    /// Create a new expense
    pub fn new(
        owner: OwnerId,
        amount: Money,
        category: impl Into<String>,
        occurred_on: NaiveDateTime,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ExpenseId::new(),
            owner,
            amount,
            category: category.into().trim().to_string(),
            occurred_on,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Attach notes, treating blank text as no notes
    pub fn with_notes(mut self, notes: Option<String>) -> Self {
        self.notes = normalize_notes(notes);
        self
    }

    /// Mark the record as modified now
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn is_owned_by(&self, owner: &OwnerId) -> bool {
        &self.owner == owner
    }

    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.amount.is_negative() {
            return Err(ExpenseValidationError::NegativeAmount);
        }
        if self.category.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyCategory);
        }
        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.occurred_on.format("%Y-%m-%d"),
            self.category,
            self.amount
        )
    }
}

pub(crate) fn normalize_notes(notes: Option<String>) -> Option<String> {
    notes
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    NegativeAmount,
    EmptyCategory,
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeAmount => write!(f, "Expense amount cannot be negative"),
            Self::EmptyCategory => write!(f, "Expense category is required"),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}
