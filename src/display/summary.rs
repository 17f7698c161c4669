//! Spending dashboard formatting

use crate::services::SpendingSummary;

use super::report::{format_bar, money_cell, separator, truncate};

pub fn format_spending_summary(summary: &SpendingSummary, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Total spent: {}\n\n",
        summary.total_spend_in_period.format_with_symbol(symbol)
    ));

    if summary.spend_by_category.is_empty() {
        output.push_str("No expenses in this period.\n");
        return output;
    }

    let max = summary
        .spend_by_category
        .first()
        .map(|c| c.total.as_f64())
        .unwrap_or(0.0);

    output.push_str("By category\n");
    output.push_str(&separator(50));
    output.push('\n');
    for row in &summary.spend_by_category {
        output.push_str(&format!(
            "{:16} {} {}\n",
            truncate(&row.category, 16),
            money_cell(row.total, symbol, 12),
            format_bar(row.total.as_f64(), max, 20)
        ));
    }

    output.push_str("\nBy day\n");
    output.push_str(&separator(50));
    output.push('\n');
    for day in &summary.spending_trends {
        output.push_str(&format!(
            "{} {}\n",
            day.date.format("%Y-%m-%d"),
            money_cell(day.total, symbol, 12)
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use crate::services::summary::{CategoryTotal, DailyTotal};
    use chrono::NaiveDate;

    #[test]
    fn test_empty_summary() {
        let summary = SpendingSummary {
            total_spend_in_period: Money::zero(),
            spend_by_category: vec![],
            spending_trends: vec![],
        };
        let output = format_spending_summary(&summary, "$");
        assert!(output.contains("Total spent: $0.00"));
        assert!(output.contains("No expenses in this period."));
    }

    #[test]
    fn test_summary_sections() {
        let summary = SpendingSummary {
            total_spend_in_period: Money::from_units(30),
            spend_by_category: vec![
                CategoryTotal {
                    category: "Rent".into(),
                    total: Money::from_units(20),
                },
                CategoryTotal {
                    category: "Food".into(),
                    total: Money::from_units(10),
                },
            ],
            spending_trends: vec![DailyTotal {
                date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
                total: Money::from_units(30),
            }],
        };
        let output = format_spending_summary(&summary, "$");

        assert!(output.contains("Total spent: $30.00"));
        assert!(output.find("Rent").unwrap() < output.find("Food").unwrap());
        assert!(output.contains("2025-03-01"));
    }
}
