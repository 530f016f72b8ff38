//! Seeded demo dataset.
//!
//! Produces `count` issues with ids `"1"..="count"`. Field values are drawn
//! from fixed pools so search and filters have something to find. The same
//! seed and clock reading always produce the same records.

use crate::model::{Issue, Priority, Status, normalize_tags};
use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Size of the dataset when no count is configured.
pub const DEFAULT_DEMO_COUNT: usize = 50;

const CATEGORIES: [&str; 4] = ["Bug", "Feature", "Enhancement", "Documentation"];
const TAGS: [&str; 7] = [
    "frontend",
    "backend",
    "ui",
    "api",
    "database",
    "testing",
    "documentation",
];
const ASSIGNEES: [&str; 4] = ["John Doe", "Jane Smith", "Bob Wilson", "Alice Brown"];

const CREATED_WITHIN_DAYS: i64 = 30;
const UPDATED_WITHIN_DAYS: i64 = 7;

fn pick<'a>(rng: &mut StdRng, pool: &[&'a str]) -> &'a str {
    pool[rng.random_range(0..pool.len())]
}

/// Generate the demo dataset relative to `now`.
///
/// Timestamps are offsets back from `now`, so the same seed yields the same
/// records only for the same `now`. The CLI pins it with `demo.now`.
#[must_use]
pub fn demo_issues(count: usize, seed: u64, now: DateTime<Utc>) -> Vec<Issue> {
    let mut rng = StdRng::seed_from_u64(seed);

    (1..=count)
        .map(|n| {
            let status = Status::ALL[rng.random_range(0..Status::ALL.len())];
            let priority = Priority::ALL[rng.random_range(0..Priority::ALL.len())];
            let created_date = now - Duration::days(rng.random_range(0..CREATED_WITHIN_DAYS));
            let updated_date = now - Duration::days(rng.random_range(0..UPDATED_WITHIN_DAYS));
            let category = pick(&mut rng, &CATEGORIES).to_string();

            let tag_count = rng.random_range(1..=4);
            let tags: Vec<String> = (0..tag_count)
                .map(|_| pick(&mut rng, &TAGS).to_string())
                .collect();
            let assignee = pick(&mut rng, &ASSIGNEES).to_string();

            Issue {
                id: n.to_string(),
                title: format!("Issue {n}"),
                description: format!(
                    "This is a detailed description for issue {n}. It contains multiple lines of \
                     text to demonstrate the content wrapping and display capabilities of the \
                     issue tracker."
                ),
                status,
                priority,
                category,
                assigned_to: Some(assignee),
                tags: normalize_tags(&tags),
                created_date,
                updated_date: updated_date.max(created_date),
            }
        })
        .collect()
}
