//! Issue query engine.
//!
//! A pure function of a snapshot and a request. The pipeline runs in a
//! fixed order:
//!
//! 1. search (only for non-empty search text)
//! 2. status filter
//! 3. priority filter
//! 4. category filter
//! 5. stable sort (only when a sort field is given)
//! 6. paginate
//!
//! `total_items` counts records after step 4, independent of paging.

mod search;

pub use search::SearchMatcher;

use crate::error::{DeskError, Result};
use crate::model::{Issue, Priority, Status};
use crate::util::time::DateLabeler;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Default page size when a caller does not choose one.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Field an issue list can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Title,
    Status,
    Priority,
    Category,
    AssignedTo,
    CreatedDate,
    UpdatedDate,
}

impl SortField {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Status => "status",
            Self::Priority => "priority",
            Self::Category => "category",
            Self::AssignedTo => "assigned_to",
            Self::CreatedDate => "created_date",
            Self::UpdatedDate => "updated_date",
        }
    }

    /// Ascending comparison of two issues on this field.
    #[must_use]
    pub fn compare(&self, a: &Issue, b: &Issue) -> Ordering {
        match self {
            Self::Title => a.title.cmp(&b.title),
            Self::Status => a.status.cmp(&b.status),
            Self::Priority => a.priority.cmp(&b.priority),
            Self::Category => a.category.cmp(&b.category),
            Self::AssignedTo => a.assigned_to.cmp(&b.assigned_to),
            Self::CreatedDate => a.created_date.cmp(&b.created_date),
            Self::UpdatedDate => a.updated_date.cmp(&b.updated_date),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = DeskError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        match normalized.as_str() {
            "title" => Ok(Self::Title),
            "status" => Ok(Self::Status),
            "priority" => Ok(Self::Priority),
            "category" => Ok(Self::Category),
            "assigned_to" | "assignedto" => Ok(Self::AssignedTo),
            "created_date" | "createddate" => Ok(Self::CreatedDate),
            "updated_date" | "updateddate" => Ok(Self::UpdatedDate),
            _ => Err(DeskError::InvalidSortField {
                field: s.to_string(),
            }),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    #[must_use]
    pub const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

impl FromStr for SortDirection {
    type Err = DeskError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            _ => Err(DeskError::invalid_argument(
                "sort_direction",
                format!("'{s}' is not asc or desc"),
            )),
        }
    }
}

/// Parameters of a single query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    /// 1-based page number.
    pub page: usize,
    pub page_size: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_field: Option<SortField>,
    #[serde(default)]
    pub sort_direction: SortDirection,
}

impl Default for QueryRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            search_text: None,
            status: None,
            priority: None,
            category: None,
            sort_field: None,
            sort_direction: SortDirection::Ascending,
        }
    }
}

impl QueryRequest {
    #[must_use]
    pub fn page(page: usize, page_size: usize) -> Self {
        Self {
            page,
            page_size,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = Some(text.into());
        self
    }

    #[must_use]
    pub const fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub const fn sorted_by(mut self, field: SortField, direction: SortDirection) -> Self {
        self.sort_field = Some(field);
        self.sort_direction = direction;
        self
    }

    /// Reject non-positive page numbers and page sizes.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` naming the offending parameter.
    pub fn validate(&self) -> Result<()> {
        validate_paging(self.page, self.page_size)
    }

    fn keeps(&self, issue: &Issue) -> bool {
        self.status.is_none_or(|status| issue.status == status)
            && self.priority.is_none_or(|priority| issue.priority == priority)
            && self
                .category
                .as_deref()
                .is_none_or(|category| issue.category == category)
    }
}

fn validate_paging(page: usize, page_size: usize) -> Result<()> {
    if page == 0 {
        return Err(DeskError::invalid_argument("page", "must be at least 1"));
    }
    if page_size == 0 {
        return Err(DeskError::invalid_argument(
            "page_size",
            "must be at least 1",
        ));
    }
    Ok(())
}

/// One page of results plus pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    /// Matching records before pagination.
    pub total_items: usize,
    pub current_page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

impl<T> PageResult<T> {
    /// Slice `page` out of `all`, clamping out-of-range pages to empty.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `page` or `page_size` is zero.
    pub fn paginate(all: Vec<T>, page: usize, page_size: usize) -> Result<Self> {
        validate_paging(page, page_size)?;
        let total_items = all.len();
        let total_pages = total_items.div_ceil(page_size);

        let items = match (page - 1).checked_mul(page_size) {
            Some(start) if start < total_items => {
                all.into_iter().skip(start).take(page_size).collect()
            }
            _ => Vec::new(),
        };

        Ok(Self {
            items,
            total_items,
            current_page: page,
            page_size,
            total_pages,
        })
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.current_page > 1 && self.total_pages > 0
    }
}

/// Stateless query engine bound to a date labeler.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryEngine {
    labeler: DateLabeler,
}

impl QueryEngine {
    #[must_use]
    pub const fn new(labeler: DateLabeler) -> Self {
        Self { labeler }
    }

    /// Run the query pipeline over a snapshot.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `page` or `page_size` is zero.
    pub fn query(&self, issues: &[Issue], request: &QueryRequest) -> Result<PageResult<Issue>> {
        request.validate()?;

        let matcher = request
            .search_text
            .as_deref()
            .and_then(|text| SearchMatcher::new(text, &self.labeler));

        let mut selected: Vec<&Issue> = match &matcher {
            Some(matcher) => issues.iter().filter(|i| matcher.matches(i)).collect(),
            None => issues.iter().collect(),
        };
        debug!(
            snapshot = issues.len(),
            searched = selected.len(),
            needle = matcher.as_ref().map(SearchMatcher::needle),
            "search applied"
        );

        selected.retain(|issue| request.keeps(issue));
        debug!(filtered = selected.len(), "filters applied");

        if let Some(field) = request.sort_field {
            // sort_by is stable: ties keep snapshot order in both directions.
            selected.sort_by(|a, b| request.sort_direction.apply(field.compare(a, b)));
        }

        let page = PageResult::paginate(selected, request.page, request.page_size)?;
        debug!(
            page = page.current_page,
            returned = page.items.len(),
            total_pages = page.total_pages,
            "page selected"
        );

        Ok(PageResult {
            items: page.items.into_iter().cloned().collect(),
            total_items: page.total_items,
            current_page: page.current_page,
            page_size: page.page_size,
            total_pages: page.total_pages,
        })
    }
}

/// Run a query with the default labeler (en_US month names, UTC).
///
/// # Errors
///
/// Returns `InvalidArgument` if `page` or `page_size` is zero.
pub fn query(issues: &[Issue], request: &QueryRequest) -> Result<PageResult<Issue>> {
    QueryEngine::default().query(issues, request)
}
