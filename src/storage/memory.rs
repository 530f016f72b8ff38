//! In-memory record store.
//!
//! Owns the issue lifecycle: creation assigns the id and both timestamps,
//! updates merge partial fields and refresh `updated_date`, deletion
//! removes the record. Records keep insertion order so that queries without
//! a sort field see a stable sequence.

use crate::error::{DeskError, Result};
use crate::model::{Issue, IssueUpdate, NewIssue, normalize_tags};
use crate::util::id::{IdConfig, IdGenerator};
use crate::validation::IssueValidator;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::{debug, info};

/// Issue store backed by a `Vec` plus an id index.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    issues: Vec<Issue>,
    index: HashMap<String, usize>,
    id_generator: IdGenerator,
}

impl MemoryStorage {
    /// Create an empty store that generates ids with the default prefix.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store with a custom id configuration.
    #[must_use]
    pub fn with_id_config(config: IdConfig) -> Self {
        Self {
            id_generator: IdGenerator::new(config),
            ..Self::default()
        }
    }

    /// Build a store from existing records, preserving their order.
    ///
    /// # Errors
    ///
    /// Returns `IdCollision` on duplicate ids or a validation error for an
    /// invalid record.
    pub fn from_issues(issues: Vec<Issue>) -> Result<Self> {
        let mut storage = Self::new();
        storage.extend(issues)?;
        Ok(storage)
    }

    /// Load records into this store, preserving their order.
    ///
    /// # Errors
    ///
    /// Stops at the first record `insert` rejects.
    pub fn extend(&mut self, issues: impl IntoIterator<Item = Issue>) -> Result<()> {
        for issue in issues {
            self.insert(issue)?;
        }
        debug!(count = self.issues.len(), "Loaded issues into store");
        Ok(())
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Borrow the records in insertion order.
    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// All ids in insertion order.
    #[must_use]
    pub fn ids(&self) -> Vec<String> {
        self.issues.iter().map(|i| i.id.clone()).collect()
    }

    /// Create a new issue stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the resulting record is invalid.
    pub fn create(&mut self, new_issue: NewIssue) -> Result<Issue> {
        self.create_at(new_issue, Utc::now())
    }

    /// Create a new issue stamped with `now`.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the resulting record is invalid, or
    /// `IdCollision` if no free id could be generated.
    pub fn create_at(&mut self, new_issue: NewIssue, now: DateTime<Utc>) -> Result<Issue> {
        let id = self.id_generator.generate(
            &new_issue.title,
            &new_issue.description,
            now,
            self.issues.len(),
            |candidate| self.index.contains_key(candidate),
        )?;

        let issue = Issue {
            id,
            title: new_issue.title,
            description: new_issue.description,
            status: new_issue.status,
            priority: new_issue.priority,
            category: new_issue.category,
            assigned_to: new_issue.assigned_to,
            tags: normalize_tags(&new_issue.tags),
            created_date: now,
            updated_date: now,
        };
        IssueValidator::validate(&issue).map_err(DeskError::from_validation_errors)?;

        info!(id = %issue.id, title = %issue.title, "Created issue");
        self.push(issue.clone());
        Ok(issue)
    }

    /// Insert an already-identified record, e.g. from a snapshot.
    ///
    /// # Errors
    ///
    /// Returns `IdCollision` if the id is taken or a validation error if the
    /// record is invalid.
    pub fn insert(&mut self, issue: Issue) -> Result<()> {
        if self.index.contains_key(&issue.id) {
            return Err(DeskError::IdCollision { id: issue.id });
        }
        IssueValidator::validate(&issue).map_err(DeskError::from_validation_errors)?;
        self.push(issue);
        Ok(())
    }

    /// Merge `update` into the issue with `id`, refreshing `updated_date`.
    ///
    /// # Errors
    ///
    /// Returns `IssueNotFound` if the id is unknown or a validation error if
    /// the merged record is invalid. The store is unchanged on error.
    pub fn update(&mut self, id: &str, update: &IssueUpdate) -> Result<Issue> {
        self.update_at(id, update, Utc::now())
    }

    /// Like [`update`](Self::update) with an explicit clock reading.
    ///
    /// `updated_date` becomes `max(now, created_date)` so a skewed clock can
    /// never move it before creation.
    ///
    /// # Errors
    ///
    /// Returns `IssueNotFound` or a validation error.
    pub fn update_at(
        &mut self,
        id: &str,
        update: &IssueUpdate,
        now: DateTime<Utc>,
    ) -> Result<Issue> {
        let position = self.position(id)?;

        let mut merged = self.issues[position].clone();
        update.apply_to(&mut merged);
        merged.updated_date = now.max(merged.created_date);
        IssueValidator::validate(&merged).map_err(DeskError::from_validation_errors)?;

        info!(id = %merged.id, empty_update = update.is_empty(), "Updated issue");
        self.issues[position] = merged.clone();
        Ok(merged)
    }

    /// Look up an issue by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Issue> {
        self.index.get(id).map(|&position| &self.issues[position])
    }

    /// Look up an issue by id, failing with `IssueNotFound`.
    ///
    /// # Errors
    ///
    /// Returns `IssueNotFound` if the id is unknown.
    pub fn get_required(&self, id: &str) -> Result<&Issue> {
        self.get(id)
            .ok_or_else(|| DeskError::IssueNotFound { id: id.to_string() })
    }

    /// Remove an issue and return it.
    ///
    /// # Errors
    ///
    /// Returns `IssueNotFound` if the id is unknown.
    pub fn delete(&mut self, id: &str) -> Result<Issue> {
        let position = self.position(id)?;
        let removed = self.issues.remove(position);
        self.reindex();
        info!(id = %removed.id, "Deleted issue");
        Ok(removed)
    }

    /// Cloned snapshot of every record in insertion order.
    #[must_use]
    pub fn list_all(&self) -> Vec<Issue> {
        self.issues.clone()
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| DeskError::IssueNotFound { id: id.to_string() })
    }

    fn push(&mut self, issue: Issue) {
        self.index.insert(issue.id.clone(), self.issues.len());
        self.issues.push(issue);
    }

    fn reindex(&mut self) {
        self.index = self
            .issues
            .iter()
            .enumerate()
            .map(|(position, issue)| (issue.id.clone(), position))
            .collect();
    }
}
