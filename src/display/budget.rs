//! Budget and reconciliation tables

use crate::models::{Budget, MonthToken, ReconciliationResult};

use super::report::{format_bar, format_percentage, money_cell, separator, tier_marker, truncate};

/// Budgets of one month
pub fn format_budget_list(budgets: &[Budget], month: MonthToken, symbol: &str) -> String {
    if budgets.is_empty() {
        return format!("No budgets set for {}.\n", month);
    }

    let mut output = format!("Budgets for {}\n", month);
    output.push_str(&format!("{:20} {:>12}\n", "Category", "Limit"));
    output.push_str(&separator(33));
    output.push('\n');

    for budget in budgets {
        output.push_str(&format!(
            "{:20} {}\n",
            truncate(&budget.category, 20),
            money_cell(budget.limit, symbol, 12)
        ));
    }

    output
}

/// Budget-vs-actual table
pub fn format_reconciliation(results: &[ReconciliationResult], symbol: &str) -> String {
    if results.is_empty() {
        return "No budgets found for this period.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:16} {:7} {:>11} {:>11} {:>11} {:>8} {:10} {}\n",
        "Category", "Month", "Budgeted", "Spent", "Remaining", "Used", "", "Status"
    ));
    output.push_str(&separator(86));
    output.push('\n');

    for row in results {
        output.push_str(&format!(
            "{:16} {:7} {} {} {} {:>8} {:10} {}\n",
            truncate(&row.category, 16),
            row.month,
            money_cell(row.budgeted, symbol, 11),
            money_cell(row.actual_spend, symbol, 11),
            money_cell(row.remaining, symbol, 11),
            format_percentage(row.utilization_percent),
            format_bar(row.utilization_percent, 100.0, 10),
            tier_marker(row.alert_tier)
        ));
    }

    let over: Vec<&str> = results
        .iter()
        .filter(|r| r.is_over_budget())
        .map(|r| r.category.as_str())
        .collect();
    if !over.is_empty() {
        output.push_str(&format!("\nOver budget: {}\n", over.join(", ")));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, OwnerId};

    fn march() -> MonthToken {
        MonthToken::parse("2025-03").unwrap()
    }

    #[test]
    fn test_empty_budget_list() {
        assert_eq!(
            format_budget_list(&[], march(), "$"),
            "No budgets set for 2025-03.\n"
        );
    }

    #[test]
    fn test_budget_list() {
        let owner = OwnerId::parse("alice").unwrap();
        let budgets = vec![Budget::new(owner, "Food", march(), Money::from_units(500))];
        let output = format_budget_list(&budgets, march(), "$");

        assert!(output.contains("Budgets for 2025-03"));
        assert!(output.contains("Food"));
        assert!(output.contains("$500.00"));
    }

    #[test]
    fn test_reconciliation_table() {
        let results = vec![
            ReconciliationResult::new("Food", march(), Money::from_units(1000), Money::from_units(950)),
            ReconciliationResult::new("Rent", march(), Money::from_units(100), Money::from_units(150)),
        ];
        let output = format_reconciliation(&results, "$");

        assert!(output.contains("95.00%"));
        assert!(output.contains("WARN"));
        assert!(output.contains("-$50.00"));
        assert!(output.contains("Over budget: Rent"));
    }
}
