//! Validation helpers for `issue_desk`.
//!
//! These routines enforce record constraints and return structured
//! validation errors without mutating the store.
//!
//! [`IssueValidator::validate`] applies to every stored record, including
//! ones loaded from a snapshot. [`IssueValidator::validate_new`] adds the
//! stricter rules for issues entered through `idesk create`.

use crate::error::ValidationError;
use crate::model::{Issue, NewIssue};

const MAX_ID_LEN: usize = 64;
const MAX_TITLE_LEN: usize = 500;
const MAX_DESCRIPTION_LEN: usize = 102_400;
const MAX_TAGS: usize = 32;
const MIN_NEW_TITLE_LEN: usize = 3;
const MIN_NEW_DESCRIPTION_LEN: usize = 10;

/// Validates issue fields and invariants.
pub struct IssueValidator;

impl IssueValidator {
    /// Validate an issue and return all validation errors found.
    ///
    /// # Errors
    ///
    /// Returns a `Vec<ValidationError>` if any validation rules are violated.
    pub fn validate(issue: &Issue) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        // ID: required, opaque, no whitespace.
        if issue.id.trim().is_empty() {
            errors.push(ValidationError::new("id", "cannot be empty"));
        } else if issue.id.chars().any(char::is_whitespace) {
            errors.push(ValidationError::new("id", "cannot contain whitespace"));
        }
        if issue.id.len() > MAX_ID_LEN {
            errors.push(ValidationError::new("id", "exceeds 64 characters"));
        }

        Self::validate_fields(issue, &mut errors);

        if issue.updated_date < issue.created_date {
            errors.push(ValidationError::new(
                "updated_date",
                "cannot be before created_date",
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate user-entered creation fields.
    ///
    /// Title needs at least 3 characters, description at least 10, and a
    /// category is required.
    ///
    /// # Errors
    ///
    /// Returns a `Vec<ValidationError>` if any rule is violated.
    pub fn validate_new(new_issue: &NewIssue) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        let title = new_issue.title.trim();
        if title.is_empty() {
            errors.push(ValidationError::new("title", "is required"));
        } else if title.chars().count() < MIN_NEW_TITLE_LEN {
            errors.push(ValidationError::new("title", "must be at least 3 characters"));
        }

        let description = new_issue.description.trim();
        if description.is_empty() {
            errors.push(ValidationError::new("description", "is required"));
        } else if description.chars().count() < MIN_NEW_DESCRIPTION_LEN {
            errors.push(ValidationError::new(
                "description",
                "must be at least 10 characters",
            ));
        }

        if new_issue.category.trim().is_empty() {
            errors.push(ValidationError::new("category", "is required"));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_fields(issue: &Issue, errors: &mut Vec<ValidationError>) {
        if issue.title.trim().is_empty() {
            errors.push(ValidationError::new("title", "cannot be empty"));
        }
        if issue.title.chars().count() > MAX_TITLE_LEN {
            errors.push(ValidationError::new("title", "exceeds 500 characters"));
        }

        if issue.description.len() > MAX_DESCRIPTION_LEN {
            errors.push(ValidationError::new("description", "exceeds 100KB"));
        }

        if issue.tags.len() > MAX_TAGS {
            errors.push(ValidationError::new("tags", "more than 32 tags"));
        }

        if issue
            .assigned_to
            .as_deref()
            .is_some_and(|name| name.trim().is_empty())
        {
            errors.push(ValidationError::new(
                "assigned_to",
                "cannot be blank (omit it to leave unassigned)",
            ));
        }
    }
}
