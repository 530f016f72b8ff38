//! Show command implementation.

use super::{CommandContext, print_json};
use crate::error::Result;
use crate::format::format_issue_details;
use crate::storage::MemoryStorage;

/// Execute the show command.
///
/// # Errors
///
/// Returns `IssueNotFound` if the id is unknown.
pub fn execute(id: &str, storage: &MemoryStorage, ctx: &CommandContext) -> Result<()> {
    let issue = storage.get_required(id)?;

    if ctx.json {
        print_json(issue)?;
    } else if !ctx.quiet {
        print!(
            "{}",
            format_issue_details(issue, &ctx.config.labeler, ctx.use_color)
        );
    }
    Ok(())
}
