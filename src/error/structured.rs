//! Structured error output.
//!
//! Provides machine-parseable error information with:
//! - Error codes for categorization
//! - Hints for self-correction
//! - Retryability flags
//! - Context for debugging
//!
//! Intent detection maps common synonyms ("done", "urgent", "assignee") to
//! the values the CLI accepts, and not-found errors carry the closest
//! existing IDs.

use crate::error::DeskError;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Machine-readable error codes.
///
/// Format: `SCREAMING_SNAKE_CASE` for easy parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // === Issue Errors (exit code 3) ===
    /// Issue with specified ID not found
    IssueNotFound,
    /// Issue ID collision on insert
    IdCollision,

    // === Validation Errors (exit code 4) ===
    /// Argument outside its valid range
    InvalidArgument,
    /// Field validation failed
    ValidationFailed,
    /// Invalid status value
    InvalidStatus,
    /// Invalid priority value
    InvalidPriority,
    /// Invalid sort field or direction
    InvalidSortField,
    /// Unknown locale
    InvalidLocale,

    // === Snapshot Errors (exit code 6) ===
    /// JSONL parse error
    JsonlParseError,

    // === Config Errors (exit code 7) ===
    /// Configuration error
    ConfigError,
    /// Config parse error
    ConfigParseError,

    // === I/O Errors (exit code 8) ===
    /// File I/O error
    IoError,
    /// JSON serialization error
    JsonError,

    // === Internal Errors (exit code 1) ===
    /// Unexpected internal error
    InternalError,
}

impl ErrorCode {
    /// Get the string representation for JSON output.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::IssueNotFound => "ISSUE_NOT_FOUND",
            Self::IdCollision => "ID_COLLISION",
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::ValidationFailed => "VALIDATION_FAILED",
            Self::InvalidStatus => "INVALID_STATUS",
            Self::InvalidPriority => "INVALID_PRIORITY",
            Self::InvalidSortField => "INVALID_SORT_FIELD",
            Self::InvalidLocale => "INVALID_LOCALE",
            Self::JsonlParseError => "JSONL_PARSE_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
            Self::ConfigParseError => "CONFIG_PARSE_ERROR",
            Self::IoError => "IO_ERROR",
            Self::JsonError => "JSON_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Whether fixing the input and retrying can succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument
                | Self::ValidationFailed
                | Self::InvalidStatus
                | Self::InvalidPriority
                | Self::InvalidSortField
                | Self::InvalidLocale
        )
    }

    /// Get the exit code for this error category.
    ///
    /// - 1: Internal/unknown errors
    /// - 3: Issue errors
    /// - 4: Validation and argument errors
    /// - 6: JSONL snapshot errors
    /// - 7: Config errors
    /// - 8: I/O errors
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::IssueNotFound | Self::IdCollision => 3,
            Self::InvalidArgument
            | Self::ValidationFailed
            | Self::InvalidStatus
            | Self::InvalidPriority
            | Self::InvalidSortField
            | Self::InvalidLocale => 4,
            Self::JsonlParseError => 6,
            Self::ConfigError | Self::ConfigParseError => 7,
            Self::IoError | Self::JsonError => 8,
            Self::InternalError => 1,
        }
    }
}

/// Structured error for machine-parseable output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// Machine-readable error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional hint for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Whether the operation can be retried
    pub retryable: bool,
    /// Additional context data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
}

impl StructuredError {
    /// Create a new structured error from a `DeskError`.
    #[must_use]
    pub fn from_error(err: &DeskError) -> Self {
        let (code, context) = Self::extract_code_and_context(err);
        let hint = Self::generate_hint(err);

        Self {
            code,
            message: err.to_string(),
            hint,
            retryable: code.is_retryable(),
            context,
        }
    }

    /// Not-found error whose hint names the closest loaded ids.
    #[must_use]
    pub fn issue_not_found(searched_id: &str, existing_ids: &[String]) -> Self {
        let similar = find_similar_ids(searched_id, existing_ids, 3);

        let hint = if similar.is_empty() {
            Some("Run 'idesk list' to see available issues.".to_string())
        } else if similar.len() == 1 {
            Some(format!("Did you mean '{}'?", similar[0]))
        } else {
            Some(format!("Did you mean one of: {}?", similar.join(", ")))
        };

        Self {
            code: ErrorCode::IssueNotFound,
            message: format!("Issue not found: {searched_id}"),
            hint,
            retryable: false,
            context: Some(json!({
                "searched_id": searched_id,
                "similar_ids": similar,
            })),
        }
    }

    /// JSON envelope written to stderr: `{"error": {...}}`.
    #[must_use]
    pub fn to_json(&self) -> Value {
        json!({
            "error": {
                "code": self.code.as_str(),
                "message": self.message,
                "hint": self.hint,
                "retryable": self.retryable,
                "context": self.context,
            }
        })
    }

    /// Render for a terminal: the message, then the hint on its own line.
    #[must_use]
    pub fn to_human(&self, color: bool) -> String {
        let (error_label, hint_label) = if color {
            ("Error:".red().bold().to_string(), "Hint:".yellow().to_string())
        } else {
            ("Error:".to_string(), "Hint:".to_string())
        };

        match &self.hint {
            Some(hint) => format!("{error_label} {}\n{hint_label} {hint}", self.message),
            None => format!("{error_label} {}", self.message),
        }
    }

    fn extract_code_and_context(err: &DeskError) -> (ErrorCode, Option<Value>) {
        match err {
            DeskError::InvalidArgument { name, reason } => (
                ErrorCode::InvalidArgument,
                Some(json!({"argument": name, "reason": reason})),
            ),
            DeskError::IssueNotFound { id } => {
                (ErrorCode::IssueNotFound, Some(json!({"searched_id": id})))
            }
            DeskError::IdCollision { id } => (ErrorCode::IdCollision, Some(json!({"id": id}))),
            DeskError::Validation { field, reason } => (
                ErrorCode::ValidationFailed,
                Some(json!({"field": field, "reason": reason})),
            ),
            DeskError::ValidationErrors { errors } => (
                ErrorCode::ValidationFailed,
                Some(json!({
                    "errors": errors.iter()
                        .map(|e| json!({"field": e.field, "message": e.message}))
                        .collect::<Vec<_>>()
                })),
            ),
            DeskError::InvalidStatus { status } => (
                ErrorCode::InvalidStatus,
                Some(json!({"status": status, "valid_values": VALID_STATUSES})),
            ),
            DeskError::InvalidPriority { priority } => (
                ErrorCode::InvalidPriority,
                Some(json!({"priority": priority, "valid_values": VALID_PRIORITIES})),
            ),
            DeskError::InvalidSortField { field } => (
                ErrorCode::InvalidSortField,
                Some(json!({"field": field, "valid_values": VALID_SORT_FIELDS})),
            ),
            DeskError::InvalidLocale { locale } => {
                (ErrorCode::InvalidLocale, Some(json!({"locale": locale})))
            }
            DeskError::JsonlParse { line, reason } => (
                ErrorCode::JsonlParseError,
                Some(json!({"line": line, "reason": reason})),
            ),
            DeskError::Config(_) => (ErrorCode::ConfigError, None),
            DeskError::Yaml(_) => (ErrorCode::ConfigParseError, None),
            DeskError::Io(_) => (ErrorCode::IoError, None),
            DeskError::Json(_) => (ErrorCode::JsonError, None),
            DeskError::Other(_) => (ErrorCode::InternalError, None),
        }
    }

    fn generate_hint(err: &DeskError) -> Option<String> {
        // Intent detection beats the generic suggestion when it finds something.
        let detected = match err {
            DeskError::InvalidStatus { status } => {
                detect_status_intent(status).map(|s| format!("Did you mean --status {s}?"))
            }
            DeskError::InvalidPriority { priority } => {
                detect_priority_intent(priority).map(|p| format!("Did you mean --priority {p}?"))
            }
            DeskError::InvalidSortField { field } => {
                detect_sort_intent(field).map(|f| format!("Did you mean --sort {f}?"))
            }
            DeskError::JsonlParse { line, .. } => Some(format!(
                "Check line {line} of the JSONL file for syntax errors."
            )),
            _ => None,
        };

        detected.or_else(|| err.suggestion().map(str::to_string))
    }
}

const VALID_STATUSES: &[&str] = &["new", "in_progress", "resolved", "closed"];
const VALID_PRIORITIES: &[&str] = &["low", "medium", "high", "critical"];
const VALID_SORT_FIELDS: &[&str] = &[
    "title",
    "status",
    "priority",
    "category",
    "assigned_to",
    "created_date",
    "updated_date",
];

static STATUS_SYNONYMS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    [
        ("open", "new"),
        ("todo", "new"),
        ("pending", "new"),
        ("wip", "in_progress"),
        ("working", "in_progress"),
        ("active", "in_progress"),
        ("started", "in_progress"),
        ("done", "resolved"),
        ("fixed", "resolved"),
        ("complete", "resolved"),
        ("completed", "resolved"),
        ("wontfix", "closed"),
        ("archived", "closed"),
    ]
    .into_iter()
    .collect()
});

static PRIORITY_SYNONYMS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    [
        ("urgent", "critical"),
        ("crit", "critical"),
        ("highest", "critical"),
        ("important", "high"),
        ("normal", "medium"),
        ("default", "medium"),
        ("med", "medium"),
        ("minor", "low"),
        ("lowest", "low"),
        ("trivial", "low"),
    ]
    .into_iter()
    .collect()
});

static SORT_SYNONYMS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    [
        ("assignee", "assigned_to"),
        ("owner", "assigned_to"),
        ("created", "created_date"),
        ("created_at", "created_date"),
        ("updated", "updated_date"),
        ("updated_at", "updated_date"),
        ("modified", "updated_date"),
        ("name", "title"),
        ("type", "category"),
    ]
    .into_iter()
    .collect()
});

fn detect_intent(
    input: &str,
    valid: &[&'static str],
    synonyms: &HashMap<&'static str, &'static str>,
) -> Option<&'static str> {
    let lower = input.trim().to_lowercase().replace(['-', ' '], "_");
    if lower.is_empty() {
        return None;
    }

    if let Some(&exact) = valid.iter().find(|v| **v == lower) {
        return Some(exact);
    }
    if let Some(&canonical) = synonyms.get(lower.as_str()) {
        return Some(canonical);
    }
    valid.iter().find(|v| v.starts_with(&lower)).copied()
}

fn detect_status_intent(input: &str) -> Option<&'static str> {
    detect_intent(input, VALID_STATUSES, &STATUS_SYNONYMS)
}

fn detect_priority_intent(input: &str) -> Option<&'static str> {
    detect_intent(input, VALID_PRIORITIES, &PRIORITY_SYNONYMS)
}

fn detect_sort_intent(input: &str) -> Option<&'static str> {
    detect_intent(input, VALID_SORT_FIELDS, &SORT_SYNONYMS)
}

/// Largest edit distance still offered as a suggestion.
const MAX_SUGGESTION_DISTANCE: usize = 3;

fn edit_distance(a: &str, b: &str) -> usize {
    let target: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=target.len()).collect();

    for (i, source_char) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, &target_char) in target.iter().enumerate() {
            let substitution = diagonal + usize::from(source_char != target_char);
            diagonal = row[j + 1];
            row[j + 1] = substitution.min(row[j] + 1).min(diagonal + 1);
        }
    }

    row[target.len()]
}

/// Existing ids close to `searched`, best first.
///
/// Ids that start with the searched text rank ahead of everything else, then
/// ids within a small edit distance. Ties break on the id itself.
#[must_use]
pub fn find_similar_ids(searched: &str, existing: &[String], max_suggestions: usize) -> Vec<String> {
    let needle = searched.trim().to_lowercase();
    let mut ranked: Vec<(bool, usize, &str)> = existing
        .iter()
        .filter_map(|id| {
            let lowered = id.to_lowercase();
            let is_prefix = !needle.is_empty() && lowered.starts_with(&needle) && lowered != needle;
            let distance = edit_distance(&needle, &lowered);
            (is_prefix || distance <= MAX_SUGGESTION_DISTANCE).then_some((
                !is_prefix,
                distance,
                id.as_str(),
            ))
        })
        .collect();

    ranked.sort_unstable();
    ranked
        .into_iter()
        .take(max_suggestions)
        .map(|(_, _, id)| id.to_string())
        .collect()
}
