//! Free-text search over everything an issue shows.
//!
//! A record matches when the lowercased needle is a substring of any of:
//! title, description, assignee, status label, priority label, category,
//! any tag, or the long month name, short month name or locale date string
//! (zero-padded or not) of either timestamp.

use crate::model::Issue;
use crate::util::time::DateLabeler;

/// A lowercased search needle bound to the labeler that renders dates.
#[derive(Debug, Clone)]
pub struct SearchMatcher<'a> {
    needle: String,
    labeler: &'a DateLabeler,
}

impl<'a> SearchMatcher<'a> {
    /// Build a matcher, or `None` when the search text is empty.
    #[must_use]
    pub fn new(text: &str, labeler: &'a DateLabeler) -> Option<Self> {
        if text.is_empty() {
            return None;
        }
        Some(Self {
            needle: text.to_lowercase(),
            labeler,
        })
    }

    #[must_use]
    pub fn needle(&self) -> &str {
        &self.needle
    }

    /// Whether any searchable field of `issue` contains the needle.
    #[must_use]
    pub fn matches(&self, issue: &Issue) -> bool {
        let text_fields = [
            issue.title.as_str(),
            issue.description.as_str(),
            issue.assigned_to.as_deref().unwrap_or(""),
            issue.status.label(),
            issue.priority.label(),
            issue.category.as_str(),
        ];

        if text_fields.iter().any(|field| self.contains(field)) {
            return true;
        }
        if issue.tags.iter().any(|tag| self.contains(tag)) {
            return true;
        }

        // Date labels are rendered last since they allocate.
        [issue.created_date, issue.updated_date]
            .into_iter()
            .flat_map(|at| self.labeler.labels(at))
            .any(|label| self.contains(&label))
    }

    fn contains(&self, haystack: &str) -> bool {
        haystack.to_lowercase().contains(&self.needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Priority, Status};
    use chrono::{TimeZone, Utc};

    fn issue() -> Issue {
        Issue {
            id: "1".to_string(),
            title: "Checkout button misaligned".to_string(),
            description: "Looks wrong on narrow screens".to_string(),
            status: Status::InProgress,
            priority: Priority::Critical,
            category: "Enhancement".to_string(),
            assigned_to: Some("Bob Wilson".to_string()),
            tags: vec!["frontend".to_string(), "ui".to_string()],
            created_date: Utc.with_ymd_and_hms(2025, 3, 4, 10, 0, 0).unwrap(),
            updated_date: Utc.with_ymd_and_hms(2025, 4, 1, 10, 0, 0).unwrap(),
        }
    }

    fn hits(text: &str) -> bool {
        let labeler = DateLabeler::default();
        SearchMatcher::new(text, &labeler).is_some_and(|m| m.matches(&issue()))
    }

    #[test]
    fn empty_text_disables_search() {
        let labeler = DateLabeler::default();
        assert!(SearchMatcher::new("", &labeler).is_none());
        assert!(SearchMatcher::new(" ", &labeler).is_some());
    }

    #[test]
    fn matches_each_text_field_case_insensitively() {
        assert!(hits("CHECKOUT"));
        assert!(hits("narrow"));
        assert!(hits("wilson"));
        assert!(hits("in progress"));
        assert!(hits("critic"));
        assert!(hits("enhance"));
        assert!(hits("FrontEnd"));
    }

    #[test]
    fn matches_month_names_and_date_strings() {
        assert!(hits("march"));
        assert!(hits("mar"));
        assert!(hits("april"));
        assert!(hits("03/04/2025"));
        assert!(hits("04/01"));
        assert!(!hits("january"));
    }

    #[test]
    fn matches_unpadded_us_dates() {
        assert!(hits("3/4/2025"));
        assert!(hits("4/1/2025"));
        assert!(!hits("3/5/2025"));
    }

    #[test]
    fn unknown_text_misses() {
        assert!(!hits("database"));
        assert!(!hits("jane"));
    }
}
