//! List command implementation.
//!
//! Primary discovery interface: builds a [`QueryRequest`] from flags and
//! configuration and runs it through the query engine. Supports text, JSON,
//! and CSV formats.

use super::{CommandContext, print_json};
use crate::cli::{ListArgs, OutputFormat};
use crate::config::parse_sort_setting;
use crate::error::Result;
use crate::format::{TextFormatOptions, csv, format_page, terminal_width};
use crate::model::{Priority, Status};
use crate::query::{QueryEngine, QueryRequest, SortDirection};
use crate::storage::MemoryStorage;
use std::io::{self, IsTerminal, Write};
use tracing::debug;

/// Execute the list command.
///
/// # Errors
///
/// Returns an error if a flag value is invalid or output fails.
pub fn execute(args: &ListArgs, storage: &MemoryStorage, ctx: &CommandContext) -> Result<()> {
    let request = build_request(args, ctx)?;
    debug!(?request, "Running list query");

    let page = QueryEngine::new(ctx.config.labeler).query(storage.issues(), &request)?;

    // --json overrides --format
    let output_format = if ctx.json {
        OutputFormat::Json
    } else {
        args.format
    };

    match output_format {
        OutputFormat::Json => print_json(&page)?,
        OutputFormat::Csv => {
            let fields = csv::parse_fields(args.fields.as_deref());
            let mut stdout = io::stdout().lock();
            csv::write_csv(&mut stdout, &page.items, &fields)?;
            stdout.flush()?;
        }
        OutputFormat::Text => {
            if ctx.quiet {
                return Ok(());
            }
            let options = TextFormatOptions {
                use_color: ctx.use_color,
                max_width: io::stdout().is_terminal().then(terminal_width),
            };
            print!("{}", format_page(&page, options));
        }
    }

    Ok(())
}

/// Translate flags plus configured defaults into a query request.
///
/// # Errors
///
/// Returns an error if status, priority, or sort field cannot be parsed.
pub fn build_request(args: &ListArgs, ctx: &CommandContext) -> Result<QueryRequest> {
    let status = args.status.as_deref().map(str::parse::<Status>).transpose()?;
    let priority = args
        .priority
        .as_deref()
        .map(str::parse::<Priority>)
        .transpose()?;
    let sort_field = match args.sort.as_deref() {
        Some(field) => parse_sort_setting(field)?,
        None => ctx.config.sort,
    };
    let sort_direction = if args.desc {
        SortDirection::Descending
    } else if args.asc {
        SortDirection::Ascending
    } else {
        ctx.config.sort_direction
    };

    Ok(QueryRequest {
        page: args.page,
        page_size: args.page_size.unwrap_or(ctx.config.page_size),
        search_text: args.search.clone(),
        status,
        priority,
        category: args.category.clone(),
        sort_field,
        sort_direction,
    })
}
