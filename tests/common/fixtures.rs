#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use issue_desk::model::{Issue, Priority, Status};

/// Fixed base time so rendered dates are deterministic.
pub fn base_time() -> DateTime<Utc> {
    Utc.timestamp_opt(1_735_689_600, 0).unwrap() // 2025-01-01 00:00:00 UTC
}

pub fn issue(id: &str, title: &str) -> Issue {
    let base = base_time();
    Issue {
        id: id.to_string(),
        title: title.to_string(),
        description: String::new(),
        status: Status::New,
        priority: Priority::Medium,
        category: "Bug".to_string(),
        assigned_to: None,
        tags: vec![],
        created_date: base,
        updated_date: base,
    }
}

pub struct IssueBuilder {
    issue: Issue,
}

impl IssueBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            issue: issue(id, &format!("Issue {id}")),
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.issue.title = title.to_string();
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.issue.description = description.to_string();
        self
    }

    pub fn status(mut self, status: Status) -> Self {
        self.issue.status = status;
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.issue.priority = priority;
        self
    }

    pub fn category(mut self, category: &str) -> Self {
        self.issue.category = category.to_string();
        self
    }

    pub fn assignee(mut self, name: &str) -> Self {
        self.issue.assigned_to = Some(name.to_string());
        self
    }

    pub fn tags(mut self, tags: &[&str]) -> Self {
        self.issue.tags = tags.iter().map(|t| (*t).to_string()).collect();
        self
    }

    /// Set `created_date` and keep `updated_date` from preceding it.
    pub fn created(mut self, at: DateTime<Utc>) -> Self {
        self.issue.created_date = at;
        if self.issue.updated_date < at {
            self.issue.updated_date = at;
        }
        self
    }

    pub fn updated(mut self, at: DateTime<Utc>) -> Self {
        self.issue.updated_date = at;
        self
    }

    pub fn created_days_ago(self, days: i64) -> Self {
        self.created(base_time() - Duration::days(days))
    }

    pub fn build(self) -> Issue {
        self.issue
    }
}

/// Fifty issues ids "1".."50". Ids 3, 7, .. 47 are Resolved (12 of them),
/// priorities cycle through `Priority::ALL`, every date falls in January 2025.
pub fn fifty_issues() -> Vec<Issue> {
    (1..=50)
        .map(|n: i64| {
            let status = match n % 4 {
                3 => Status::Resolved,
                0 => Status::Closed,
                1 => Status::New,
                _ => Status::InProgress,
            };
            let priority = Priority::ALL[usize::try_from(n % 4).unwrap()];
            let created = base_time() + Duration::hours(n * 12);
            IssueBuilder::new(&n.to_string())
                .status(status)
                .priority(priority)
                .created(created)
                .updated(created + Duration::hours(1))
                .build()
        })
        .collect()
}

/// Four issues covering the search surface.
pub fn search_fixture() -> Vec<Issue> {
    let january = Utc.with_ymd_and_hms(2025, 1, 15, 10, 0, 0).unwrap();
    let march = Utc.with_ymd_and_hms(2025, 3, 4, 10, 0, 0).unwrap();
    vec![
        IssueBuilder::new("1")
            .title("Login page crashes")
            .assignee("Jane Smith")
            .priority(Priority::High)
            .tags(&["frontend", "ui"])
            .created(january)
            .build(),
        IssueBuilder::new("2")
            .title("Slow report export")
            .description("Database query takes 30s")
            .category("Enhancement")
            .assignee("Bob Wilson")
            .tags(&["backend", "database"])
            .created(march)
            .build(),
        IssueBuilder::new("3")
            .title("Update README")
            .category("Documentation")
            .status(Status::Resolved)
            .priority(Priority::Low)
            .created(march)
            .build(),
        IssueBuilder::new("4")
            .title("API returns 500")
            .assignee("Alice Brown")
            .status(Status::InProgress)
            .priority(Priority::Critical)
            .tags(&["api"])
            .created(march)
            .build(),
    ]
}
