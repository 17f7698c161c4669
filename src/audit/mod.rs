//! Append-only audit trail of budget and expense mutations
//!
//! Every create, update and delete made through the services is written as
//! one JSON line to `audit.log`, with the record before and after the change.

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
