//! Expense list and detail formatting

use crate::models::Expense;

use super::report::{money_cell, separator, truncate};

/// One expense per row, in the order given
pub fn format_expense_list(expenses: &[Expense], symbol: &str, date_format: &str) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:12} {:10} {:16} {:>12}  {}\n",
        "ID", "Date", "Category", "Amount", "Notes"
    ));
    output.push_str(&separator(72));
    output.push('\n');

    for expense in expenses {
        output.push_str(&format_expense_row(expense, symbol, date_format));
        output.push('\n');
    }

    output
}

pub fn format_expense_row(expense: &Expense, symbol: &str, date_format: &str) -> String {
    format!(
        "{:12} {:10} {:16} {}  {}",
        expense.id.short(),
        expense.occurred_on.format(date_format),
        truncate(&expense.category, 16),
        money_cell(expense.amount, symbol, 12),
        truncate(expense.notes.as_deref().unwrap_or(""), 24)
    )
}

pub fn format_expense_details(expense: &Expense, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense:  {}\n", expense.id));
    output.push_str(&format!(
        "Date:     {}\n",
        expense.occurred_on.format("%Y-%m-%d %H:%M")
    ));
    output.push_str(&format!("Amount:   {}\n", expense.amount.format_with_symbol(symbol)));
    output.push_str(&format!("Category: {}\n", expense.category));
    if let Some(notes) = &expense.notes {
        output.push_str(&format!("Notes:    {}\n", notes));
    }

    output
}
