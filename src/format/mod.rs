//! Output formatting for `issue_desk`.
//!
//! Supports human-readable text output, machine-parseable JSON, and CSV
//! export. JSON output goes to stdout with diagnostics on stderr.
//!
//! # CSV Output
//!
//! The [`csv`] module provides CSV formatting with:
//! - Configurable field selection via `--fields`
//! - Proper escaping of commas, quotes, and newlines

pub mod csv;
mod text;

pub use text::{
    TextFormatOptions, format_category_badge, format_issue_details, format_issue_line,
    format_issue_line_with, format_page, format_page_footer, format_priority_badge,
    format_priority_label, format_status_icon, format_status_label, terminal_width,
    truncate_title,
};
