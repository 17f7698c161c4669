//! Budget-vs-actual results
//!
//! Derived, never persisted: one row per category comparing what was budgeted
//! in a date range with what was actually spent.

use serde::Serialize;
use std::fmt;

use super::money::{serialize_as_decimal, Money};
use super::month::MonthToken;

/// Utilization at or above this percentage is red
pub const RED_THRESHOLD: f64 = 100.0;

/// Utilization at or above this percentage (and below red) is yellow
pub const YELLOW_THRESHOLD: f64 = 80.0;

/// Budget health signal derived from utilization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertTier {
    Green,
    Yellow,
    Red,
}

impl AlertTier {
    /// Classify a (rounded) utilization percentage
    pub fn from_utilization(percent: f64) -> Self {
        if percent >= RED_THRESHOLD {
            Self::Red
        } else if percent >= YELLOW_THRESHOLD {
            Self::Yellow
        } else {
            Self::Green
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Red => "red",
        }
    }
}

impl fmt::Display for AlertTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `actual / budgeted * 100` rounded to two decimals; 0 when nothing is budgeted
pub fn utilization_percent(actual: Money, budgeted: Money) -> f64 {
    if !budgeted.is_positive() {
        return 0.0;
    }
    let raw = actual.cents() as f64 / budgeted.cents() as f64 * 100.0;
    round_to_cents(raw)
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// One category's reconciliation over a date range
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationResult {
    pub category: String,

    /// Sum of every matching budget's limit in the range
    #[serde(serialize_with = "serialize_as_decimal")]
    pub budgeted: Money,

    /// Spend in the whole range, not bucketed by month
    #[serde(serialize_with = "serialize_as_decimal")]
    pub actual_spend: Money,

    /// Month of the last budget folded into this row
    pub month: MonthToken,

    #[serde(serialize_with = "serialize_as_decimal")]
    pub remaining: Money,

    #[serde(rename = "percentageUsed")]
    pub utilization_percent: f64,

    #[serde(rename = "alertStatus")]
    pub alert_tier: AlertTier,
}

impl ReconciliationResult {
    /// Derive remaining, utilization and alert tier from the two totals
    pub fn new(
        category: impl Into<String>,
        month: MonthToken,
        budgeted: Money,
        actual_spend: Money,
    ) -> Self {
        let utilization_percent = utilization_percent(actual_spend, budgeted);
        Self {
            category: category.into(),
            budgeted,
            actual_spend,
            month,
            remaining: budgeted - actual_spend,
            utilization_percent,
            alert_tier: AlertTier::from_utilization(utilization_percent),
        }
    }

    pub fn is_over_budget(&self) -> bool {
        self.remaining.is_negative()
    }
}
