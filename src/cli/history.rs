//! Audit history command

use crate::audit::AuditEntry;
use crate::error::SpendResult;
use crate::models::OwnerId;
use crate::storage::Storage;

use super::{print_json, OutputFormat};

/// Show the owner's most recent audit entries, oldest first
pub fn handle_history_command(
    storage: &Storage,
    owner: &OwnerId,
    output: OutputFormat,
    count: usize,
) -> SpendResult<()> {
    let entries = recent_for_owner(storage.audit().read_all()?, owner, count);

    match output {
        OutputFormat::Json => print_json(&entries)?,
        OutputFormat::Table => {
            if entries.is_empty() {
                println!("No history yet.");
            }
            for entry in &entries {
                println!("{}", entry.format_human_readable());
            }
        }
    }

    Ok(())
}

fn recent_for_owner(entries: Vec<AuditEntry>, owner: &OwnerId, count: usize) -> Vec<AuditEntry> {
    let mut mine: Vec<AuditEntry> = entries
        .into_iter()
        .filter(|e| e.owner == owner.as_str())
        .collect();
    let skip = mine.len().saturating_sub(count);
    mine.drain(..skip);
    mine
}
