//! CSV export of expenses (spreadsheet-compatible)

use std::io::Write;

use crate::error::SpendResult;
use crate::models::Expense;

const HEADER: [&str; 5] = ["ID", "Date", "Category", "Amount", "Notes"];

/// Write expenses as CSV, one row per expense in the order given
pub fn export_expenses_csv<W: Write>(expenses: &[Expense], writer: W) -> SpendResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(HEADER)?;
    for expense in expenses {
        csv_writer.write_record([
            expense.id.to_string(),
            expense.occurred_on.format("%Y-%m-%dT%H:%M:%S").to_string(),
            expense.category.clone(),
            expense.amount.to_string(),
            expense.notes.clone().unwrap_or_default(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, OwnerId};
    use chrono::NaiveDate;

    fn expense(category: &str, cents: i64, notes: Option<&str>) -> Expense {
        let when = NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap();
        Expense::new(OwnerId::parse("alice").unwrap(), Money::from_cents(cents), category, when)
            .with_notes(notes.map(String::from))
    }

    #[test]
    fn test_header_and_rows() {
        let expenses = vec![expense("Food", 1250, None)];
        let mut out = Vec::new();
        export_expenses_csv(&expenses, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("ID,Date,Category,Amount,Notes"));
        let row = lines.next().unwrap();
        assert!(row.ends_with(",2025-03-10T12:30:00,Food,12.50,"));
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_fields_are_quoted_when_needed() {
        let expenses = vec![expense("Other Expense", 100, Some("dinner, \"fancy\""))];
        let mut out = Vec::new();
        export_expenses_csv(&expenses, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\"dinner, \"\"fancy\"\"\""));

        let mut reader = csv::Reader::from_reader(text.as_bytes());
        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(&record[4], "dinner, \"fancy\"");
    }

    #[test]
    fn test_empty_export_has_header_only() {
        let mut out = Vec::new();
        export_expenses_csv(&[], &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "ID,Date,Category,Amount,Notes\n");
    }
}
