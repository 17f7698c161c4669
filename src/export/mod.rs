//! Export of an owner's data
//!
//! - CSV: expenses only, for spreadsheets
//! - JSON: expenses and budgets with schema and metadata

pub mod csv;
pub mod json;

pub use self::csv::export_expenses_csv;
pub use self::json::{export_owner_json, OwnerExport, EXPORT_SCHEMA_VERSION};
