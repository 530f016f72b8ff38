//! Update command implementation.

use super::{CommandContext, print_json};
use crate::cli::UpdateArgs;
use crate::error::Result;
use crate::format::format_issue_details;
use crate::model::{IssueUpdate, Priority, Status};
use crate::storage::MemoryStorage;

/// Execute the update command.
///
/// # Errors
///
/// Returns `IssueNotFound`, a parse error for a flag value, or a validation
/// error for the merged record.
pub fn execute(args: &UpdateArgs, storage: &mut MemoryStorage, ctx: &CommandContext) -> Result<()> {
    let update = build_update(args)?;

    let issue = if update.is_empty() {
        if !ctx.json && !ctx.quiet {
            eprintln!("No updates specified for {}", args.id);
        }
        storage.get_required(&args.id)?.clone()
    } else {
        storage.update(&args.id, &update)?
    };

    if ctx.json {
        print_json(&issue)?;
    } else if !ctx.quiet {
        println!("Updated {}", issue.id);
        print!(
            "{}",
            format_issue_details(&issue, &ctx.config.labeler, ctx.use_color)
        );
    }
    Ok(())
}

/// Convert CLI flags into a partial update.
///
/// # Errors
///
/// Returns an error if status or priority cannot be parsed.
pub fn build_update(args: &UpdateArgs) -> Result<IssueUpdate> {
    let assigned_to = if args.unassign {
        Some(None)
    } else {
        args.assignee.clone().map(Some)
    };

    Ok(IssueUpdate {
        title: args.title.clone(),
        description: args.description.clone(),
        status: args.status.as_deref().map(str::parse::<Status>).transpose()?,
        priority: args
            .priority
            .as_deref()
            .map(str::parse::<Priority>)
            .transpose()?,
        category: args.category.clone(),
        assigned_to,
        tags: (!args.tags.is_empty()).then(|| args.tags.clone()),
    })
}
