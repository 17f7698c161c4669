//! Custom error types for spendwise
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

use crate::models::ids::OwnerIdError;
use crate::models::money::MoneyParseError;
use crate::models::month::{DateParseError, DateRangeError, MonthParseError};

/// The main error type for spendwise operations
#[derive(Error, Debug)]
pub enum SpendError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Bad input: missing date range, malformed month token, bad amount
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// The acting owner does not own the record
    #[error("Not authorized to modify {entity_type} {identifier}")]
    Unauthorized {
        entity_type: &'static str,
        identifier: String,
    },

    /// A write was refused because the guard denied it and no override was given
    #[error("{0}")]
    BudgetExceeded(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl SpendError {
    /// Create a "not found" error for expenses
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// Create an ownership error for expenses
    pub fn expense_unauthorized(identifier: impl Into<String>) -> Self {
        Self::Unauthorized {
            entity_type: "expense",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is an ownership error
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Check if this is a refused over-budget write
    pub fn is_budget_exceeded(&self) -> bool {
        matches!(self, Self::BudgetExceeded(_))
    }
}

impl From<std::io::Error> for SpendError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SpendError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for SpendError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

impl From<MonthParseError> for SpendError {
    fn from(err: MonthParseError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<DateParseError> for SpendError {
    fn from(err: DateParseError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<DateRangeError> for SpendError {
    fn from(err: DateRangeError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<MoneyParseError> for SpendError {
    fn from(err: MoneyParseError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<OwnerIdError> for SpendError {
    fn from(err: OwnerIdError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Result type alias for spendwise operations
pub type SpendResult<T> = Result<T, SpendError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SpendError::Validation("Start date and end date are required".into());
        assert_eq!(
            err.to_string(),
            "Validation error: Start date and end date are required"
        );
        assert!(err.is_validation());
    }

    #[test]
    fn test_not_found_error() {
        let err = SpendError::expense_not_found("exp-1234abcd");
        assert_eq!(err.to_string(), "Expense not found: exp-1234abcd");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_unauthorized_error() {
        let err = SpendError::expense_unauthorized("exp-1234abcd");
        assert_eq!(
            err.to_string(),
            "Not authorized to modify expense exp-1234abcd"
        );
        assert!(err.is_unauthorized());
    }

    #[test]
    fn test_budget_exceeded_shows_reason_verbatim() {
        let err = SpendError::BudgetExceeded("over the limit".into());
        assert_eq!(err.to_string(), "over the limit");
        assert!(err.is_budget_exceeded());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: SpendError = io_err.into();
        assert!(matches!(err, SpendError::Io(_)));
    }

    #[test]
    fn test_parse_errors_are_validation() {
        let err: SpendError = crate::models::MonthToken::parse("2025-3").unwrap_err().into();
        assert!(err.is_validation());

        let err: SpendError = crate::models::Money::parse("abc").unwrap_err().into();
        assert!(err.is_validation());

        let err: SpendError = crate::models::DateRange::from_dates(None, None)
            .unwrap_err()
            .into();
        assert_eq!(
            err.to_string(),
            "Validation error: Start date and end date are required."
        );
    }
}
