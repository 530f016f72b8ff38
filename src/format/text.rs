//! Text formatting functions for `issue_desk`.
//!
//! - Status icons (○ ◐ ◉ ✓)
//! - Priority and category badges
//! - Issue line, detail view and page footer

use crate::model::{Issue, Priority, Status};
use crate::query::PageResult;
use crate::util::time::DateLabeler;
use colored::Colorize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Status icon characters.
pub mod icons {
    /// New issue, untouched.
    pub const NEW: &str = "○";
    /// Work has started.
    pub const IN_PROGRESS: &str = "◐";
    /// Fixed, awaiting confirmation.
    pub const RESOLVED: &str = "◉";
    /// Done.
    pub const CLOSED: &str = "✓";
}

/// Formatting options for text output.
#[derive(Debug, Clone, Copy)]
pub struct TextFormatOptions {
    pub use_color: bool,
    pub max_width: Option<usize>,
}

impl TextFormatOptions {
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            use_color: false,
            max_width: None,
        }
    }
}

/// Return the icon character for a status.
#[must_use]
pub const fn format_status_icon(status: Status) -> &'static str {
    match status {
        Status::New => icons::NEW,
        Status::InProgress => icons::IN_PROGRESS,
        Status::Resolved => icons::RESOLVED,
        Status::Closed => icons::CLOSED,
    }
}

fn paint_status(text: &str, status: Status, use_color: bool) -> String {
    if !use_color {
        return text.to_string();
    }
    match status {
        Status::New => text.green().to_string(),
        Status::InProgress => text.yellow().to_string(),
        Status::Resolved => text.blue().to_string(),
        Status::Closed => text.bright_black().to_string(),
    }
}

/// Format status label with optional color.
#[must_use]
pub fn format_status_label(status: Status, use_color: bool) -> String {
    paint_status(status.label(), status, use_color)
}

/// Format priority label with optional color.
#[must_use]
pub fn format_priority_label(priority: Priority, use_color: bool) -> String {
    let label = priority.label();
    if !use_color {
        return label.to_string();
    }

    match priority {
        Priority::Critical => label.red().bold().to_string(),
        Priority::High => label.red().to_string(),
        Priority::Medium => label.yellow().to_string(),
        Priority::Low => label.bright_black().to_string(),
    }
}

/// Format priority as a bracketed badge.
#[must_use]
pub fn format_priority_badge(priority: Priority, use_color: bool) -> String {
    format!("[{}]", format_priority_label(priority, use_color))
}

/// Format category as a bracketed badge, or nothing when uncategorized.
#[must_use]
pub fn format_category_badge(category: &str, use_color: bool) -> Option<String> {
    if category.is_empty() {
        return None;
    }
    if use_color {
        Some(format!("[{}]", category.cyan()))
    } else {
        Some(format!("[{category}]"))
    }
}

/// Determine terminal width from environment (falls back to 80).
#[must_use]
pub fn terminal_width() -> usize {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|columns| columns.trim().parse::<usize>().ok())
        .filter(|&value| value > 0)
        .unwrap_or(80)
}

/// Truncate a title to fit within `max_len` visible columns.
///
/// Handles wide characters (emojis, CJK) correctly using `unicode-width`.
#[must_use]
pub fn truncate_title(title: &str, max_len: usize) -> String {
    if max_len == 0 {
        return String::new();
    }
    if UnicodeWidthStr::width(title) <= max_len {
        return title.to_string();
    }

    let (target_len, ellipsis) = if max_len <= 3 {
        (max_len, "")
    } else {
        (max_len - 3, "...")
    };

    let mut w = 0;
    let mut s = String::new();
    for c in title.chars() {
        let cw = UnicodeWidthChar::width(c).unwrap_or(0);
        if w + cw > target_len {
            break;
        }
        w += cw;
        s.push(c);
    }
    s.push_str(ellipsis);
    s
}

/// Format a single-line issue summary with options.
///
/// Format: `{icon} {id} [{priority}] [{category}] {title}`
#[must_use]
pub fn format_issue_line_with(issue: &Issue, options: TextFormatOptions) -> String {
    let priority_plain = format_priority_badge(issue.priority, false);
    let category_plain = format_category_badge(&issue.category, false);

    let prefix_len = UnicodeWidthStr::width(format_status_icon(issue.status))
        + 1
        + UnicodeWidthStr::width(issue.id.as_str())
        + 1
        + UnicodeWidthStr::width(priority_plain.as_str())
        + 1
        + category_plain
            .as_deref()
            .map_or(0, |badge| UnicodeWidthStr::width(badge) + 1);

    let title = options.max_width.map_or_else(
        || issue.title.clone(),
        |width| truncate_title(&issue.title, width.saturating_sub(prefix_len)),
    );

    let icon = paint_status(format_status_icon(issue.status), issue.status, options.use_color);
    let priority = format_priority_badge(issue.priority, options.use_color);
    match format_category_badge(&issue.category, options.use_color) {
        Some(category) => format!("{icon} {} {priority} {category} {title}", issue.id),
        None => format!("{icon} {} {priority} {title}", issue.id),
    }
}

/// Format a single-line issue summary without color or truncation.
#[must_use]
pub fn format_issue_line(issue: &Issue) -> String {
    format_issue_line_with(issue, TextFormatOptions::plain())
}

/// Multi-line detail view used by `show`, `create` and `update`.
#[must_use]
pub fn format_issue_details(issue: &Issue, labeler: &DateLabeler, use_color: bool) -> String {
    let mut out = String::new();
    let header = format!("{}: {}", issue.id, issue.title);
    if use_color {
        out.push_str(&header.bold().to_string());
    } else {
        out.push_str(&header);
    }
    out.push('\n');

    out.push_str(&format!(
        "Status: {}  Priority: {}",
        format_status_label(issue.status, use_color),
        format_priority_label(issue.priority, use_color),
    ));
    if !issue.category.is_empty() {
        out.push_str(&format!("  Category: {}", issue.category));
    }
    out.push('\n');

    out.push_str(&format!(
        "Assignee: {}\n",
        issue.assigned_to.as_deref().unwrap_or("(unassigned)")
    ));
    if !issue.tags.is_empty() {
        out.push_str(&format!("Tags: {}\n", issue.tags.join(", ")));
    }
    out.push_str(&format!("Created: {}\n", labeler.display(issue.created_date)));
    out.push_str(&format!("Updated: {}\n", labeler.display(issue.updated_date)));

    if !issue.description.is_empty() {
        out.push('\n');
        out.push_str(&issue.description);
        out.push('\n');
    }
    out
}

/// Footer line summarizing pagination, with hints for neighbouring pages.
#[must_use]
pub fn format_page_footer<T>(page: &PageResult<T>) -> String {
    let noun = if page.total_items == 1 { "issue" } else { "issues" };
    let mut footer = format!(
        "Page {} of {} ({} {noun})",
        page.current_page, page.total_pages, page.total_items
    );
    if page.has_previous() {
        // Past the end, point back at the last real page.
        let previous = (page.current_page - 1).min(page.total_pages);
        footer.push_str(&format!("  prev: --page {previous}"));
    }
    if page.has_next() {
        footer.push_str(&format!("  next: --page {}", page.current_page + 1));
    }
    footer
}

/// Render a whole page: one line per item, then the footer.
#[must_use]
pub fn format_page(page: &PageResult<Issue>, options: TextFormatOptions) -> String {
    if page.total_items == 0 {
        return "No issues found.\n".to_string();
    }

    let mut out = String::new();
    for issue in &page.items {
        out.push_str(&format_issue_line_with(issue, options));
        out.push('\n');
    }
    if page.items.is_empty() {
        out.push_str("No issues on this page.\n");
    }
    out.push_str(&format_page_footer(page));
    out.push('\n');
    out
}
