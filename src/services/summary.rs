//! Spending dashboard data
//!
//! Totals for a date range: overall, per category, and per day.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::SpendResult;
use crate::models::money::serialize_as_decimal;
use crate::models::{DateRange, Money, OwnerId};
use crate::storage::{ExpenseLedger, Storage};

/// Spend in one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    #[serde(serialize_with = "serialize_as_decimal")]
    pub total: Money,
}

/// Spend on one calendar day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyTotal {
    #[serde(serialize_with = "serialize_day")]
    pub date: NaiveDate,
    #[serde(serialize_with = "serialize_as_decimal")]
    pub total: Money,
}

fn serialize_day<S: serde::Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&date.format("%Y-%m-%d"))
}

/// Aggregated spending over a date range
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingSummary {
    #[serde(serialize_with = "serialize_as_decimal")]
    pub total_spend_in_period: Money,

    /// Largest category first
    pub spend_by_category: Vec<CategoryTotal>,

    /// Oldest day first; days without spending are omitted
    pub spending_trends: Vec<DailyTotal>,
}

pub struct SummaryService<'a> {
    expenses: &'a dyn ExpenseLedger,
}

impl<'a> SummaryService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            expenses: &storage.expenses,
        }
    }

    /// Build the dashboard summary for `[start, end]`
    ///
    /// # Errors
    ///
    /// Validation error when either date is missing or the range is reversed.
    pub fn spending_summary(
        &self,
        owner: &OwnerId,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> SpendResult<SpendingSummary> {
        let range = DateRange::from_dates(start, end)?;

        let mut spend_by_category: Vec<CategoryTotal> = self
            .expenses
            .sum_by_category(owner, &range)?
            .into_iter()
            .map(|(category, total)| CategoryTotal { category, total })
            .collect();
        // Stable sort: ties keep first-seen order
        spend_by_category.sort_by(|a, b| b.total.cmp(&a.total));

        let total_spend_in_period = spend_by_category.iter().map(|c| c.total).sum();

        let mut spending_trends: Vec<DailyTotal> = Vec::new();
        for expense in self.expenses.list_in_range(owner, &range)? {
            let day = expense.occurred_on.date();
            match spending_trends.last_mut() {
                Some(last) if last.date == day => last.total += expense.amount,
                _ => spending_trends.push(DailyTotal {
                    date: day,
                    total: expense.amount,
                }),
            }
        }

        tracing::debug!(
            owner = %owner,
            categories = spend_by_category.len(),
            days = spending_trends.len(),
            "spending summary built"
        );

        Ok(SpendingSummary {
            total_spend_in_period,
            spend_by_category,
            spending_trends,
        })
    }
}
