//! Delete command implementation.

use super::{CommandContext, print_json};
use crate::error::Result;
use crate::storage::MemoryStorage;
use serde_json::json;

/// Execute the delete command.
///
/// # Errors
///
/// Returns `IssueNotFound` if the id is unknown.
pub fn execute(id: &str, storage: &mut MemoryStorage, ctx: &CommandContext) -> Result<()> {
    let removed = storage.delete(id)?;

    if ctx.json {
        print_json(&json!({
            "deleted": removed.id,
            "title": removed.title,
            "remaining": storage.len(),
        }))?;
    } else if !ctx.quiet {
        println!("Deleted {}: {}", removed.id, removed.title);
    }
    Ok(())
}
