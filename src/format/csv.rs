//! CSV formatting for `issue_desk`.
//!
//! Provides CSV output for the list command. Handles proper escaping
//! of fields containing commas, quotes, or newlines.

use crate::model::Issue;
use std::io::{self, Write};

/// Default fields for CSV export.
pub const DEFAULT_FIELDS: &[&str] = &[
    "id",
    "title",
    "status",
    "priority",
    "category",
    "assigned_to",
    "created_date",
    "updated_date",
];

/// All available fields for CSV export.
pub const ALL_FIELDS: &[&str] = &[
    "id",
    "title",
    "description",
    "status",
    "priority",
    "category",
    "assigned_to",
    "tags",
    "created_date",
    "updated_date",
];

/// Escape a CSV field value.
///
/// Wraps in double quotes if the value contains commas, quotes, or newlines.
/// Doubles any existing quotes within the value.
#[must_use]
pub fn escape_field(value: &str) -> String {
    let needs_quoting = value.contains([',', '"', '\n', '\r']);

    if needs_quoting {
        let escaped = value.replace('"', "\"\"");
        format!("\"{escaped}\"")
    } else {
        value.to_string()
    }
}

/// Get a field value from an issue by field name.
#[must_use]
pub fn get_field_value(issue: &Issue, field: &str) -> String {
    match field {
        "id" => issue.id.clone(),
        "title" => issue.title.clone(),
        "description" => issue.description.clone(),
        "status" => issue.status.label().to_string(),
        "priority" => issue.priority.label().to_string(),
        "category" => issue.category.clone(),
        "assigned_to" => issue.assigned_to.clone().unwrap_or_default(),
        "tags" => issue.tags.join(";"),
        "created_date" => issue.created_date.to_rfc3339(),
        "updated_date" => issue.updated_date.to_rfc3339(),
        _ => String::new(),
    }
}

/// Parse a comma-separated list of field names.
///
/// Unknown names are dropped. Returns the default fields if the input is
/// empty.
#[must_use]
pub fn parse_fields(fields_arg: Option<&str>) -> Vec<&'static str> {
    match fields_arg {
        Some(arg) if !arg.is_empty() => arg
            .split(',')
            .map(str::trim)
            .filter_map(|f| ALL_FIELDS.iter().find(|&&af| af == f).copied())
            .collect(),
        _ => DEFAULT_FIELDS.to_vec(),
    }
}

/// Format a single issue as a CSV row.
#[must_use]
pub fn format_issue_row(issue: &Issue, fields: &[&str]) -> String {
    fields
        .iter()
        .map(|&field| escape_field(&get_field_value(issue, field)))
        .collect::<Vec<_>>()
        .join(",")
}

/// Write issues as CSV to the given writer.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_csv<W: Write>(writer: &mut W, issues: &[Issue], fields: &[&str]) -> io::Result<()> {
    writeln!(writer, "{}", fields.join(","))?;
    for issue in issues {
        writeln!(writer, "{}", format_issue_row(issue, fields))?;
    }
    Ok(())
}
