//! Create command implementation.

use super::{CommandContext, print_json};
use crate::cli::CreateArgs;
use crate::error::{DeskError, Result};
use crate::format::format_issue_details;
use crate::model::{NewIssue, Priority, Status};
use crate::storage::MemoryStorage;
use crate::validation::IssueValidator;

/// Execute the create command.
///
/// # Errors
///
/// Returns an error if a flag value cannot be parsed or the issue is invalid.
pub fn execute(args: CreateArgs, storage: &mut MemoryStorage, ctx: &CommandContext) -> Result<()> {
    let new_issue = build_new_issue(args)?;
    IssueValidator::validate_new(&new_issue).map_err(DeskError::from_validation_errors)?;
    let issue = storage.create(new_issue)?;

    if ctx.json {
        print_json(&issue)?;
    } else if !ctx.quiet {
        println!("Created {}: {}", issue.id, issue.title);
        print!(
            "{}",
            format_issue_details(&issue, &ctx.config.labeler, ctx.use_color)
        );
    }
    Ok(())
}

/// Convert CLI flags into creation fields.
///
/// # Errors
///
/// Returns an error if status or priority cannot be parsed.
pub fn build_new_issue(args: CreateArgs) -> Result<NewIssue> {
    let status = args
        .status
        .as_deref()
        .map(str::parse::<Status>)
        .transpose()?
        .unwrap_or_default();
    let priority = args
        .priority
        .as_deref()
        .map(str::parse::<Priority>)
        .transpose()?
        .unwrap_or_default();

    Ok(NewIssue {
        title: args.title,
        description: args.description.unwrap_or_default(),
        status,
        priority,
        category: args.category.unwrap_or_default(),
        assigned_to: args.assignee.filter(|name| !name.trim().is_empty()),
        tags: args.tags,
    })
}
