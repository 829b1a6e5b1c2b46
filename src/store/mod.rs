//! Application state store.
//!
//! This module contains the authoritative issue state for the application:
//! - `Snapshot`: an immutable value describing the whole state at one instant
//! - `Store`: owns the current snapshot and exposes the mutators
//! - Subscription handles and selectors (`subscription`)
//! - Pure derived views over a snapshot (`derive`)
//!
//! Every mutator builds a new snapshot, swaps it in and synchronously
//! notifies subscribers before returning.

pub mod derive;
mod error;
mod subscription;

pub use error::StoreError;
pub use subscription::{Selected, Subscription};

use crate::model::seed::{format_identifier, PROJECT_KEY};
use crate::model::{ActiveView, Issue, Label, Priority, Project, Status};
use chrono::{DateTime, Duration, Utc};
use log::*;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use subscription::Registry;
use uuid::Uuid;

/// Entire store state at one instant.
///
/// Issues are shared by `Arc` between snapshots so an issue untouched by a
/// mutation keeps its identity.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Snapshot {
    pub issues: Vec<Arc<Issue>>,
    pub labels: Arc<Vec<Label>>,
    pub projects: Arc<Vec<Project>>,
    pub selected_issue_id: Option<String>,
    pub active_view: ActiveView,
    pub filter_status: Option<Status>,
    pub search_query: String,
}

/// Partial set of issue fields to replace.
///
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IssueUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub assignee: Option<Option<String>>,
    pub labels: Option<Vec<String>>,
}

impl IssueUpdate {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn assignee(mut self, assignee: Option<String>) -> Self {
        self.assignee = Some(assignee);
        self
    }

    pub fn labels(mut self, labels: Vec<String>) -> Self {
        self.labels = Some(labels);
        self
    }

    fn apply_to(self, issue: &mut Issue) {
        if let Some(title) = self.title {
            issue.title = title;
        }
        if let Some(description) = self.description {
            issue.description = description;
        }
        if let Some(status) = self.status {
            issue.status = status;
        }
        if let Some(priority) = self.priority {
            issue.priority = priority;
        }
        if let Some(assignee) = self.assignee {
            issue.assignee = assignee;
        }
        if let Some(labels) = self.labels {
            issue.labels = labels;
        }
    }
}

/// Data for a new issue. Only the title is required.
///
/// The store does not validate the title; callers reject blank titles.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NewIssue {
    pub title: String,
    pub description: Option<String>,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
}

impl NewIssue {
    pub fn new(title: impl Into<String>) -> Self {
        NewIssue {
            title: title.into(),
            ..NewIssue::default()
        }
    }
}

/// How identifiers are numbered for newly created issues.
///
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierStrategy {
    /// Collection length plus one. Reuses numbers after deletions.
    #[default]
    CollectionLength,
    /// Monotonic counter starting after the highest existing number.
    Sequential,
}

/// Source of the current instant.
///
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
///
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Owns the current snapshot and the subscribers observing it.
///
pub struct Store {
    state: Arc<Snapshot>,
    registry: Rc<RefCell<Registry>>,
    clock: Box<dyn Clock>,
    last_stamp: Option<DateTime<Utc>>,
    identifier_strategy: IdentifierStrategy,
    identifier_prefix: String,
    sequence: usize,
}

impl Store {
    /// Return a new store holding the given initial snapshot.
    ///
    pub fn new(initial: Snapshot) -> Self {
        let identifier_prefix = initial
            .projects
            .first()
            .map(|p| p.key.clone())
            .unwrap_or_else(|| PROJECT_KEY.to_string());
        let sequence = highest_identifier_number(&initial.issues, &identifier_prefix);
        debug!(
            "Initializing store with {} issues (prefix {}, last number {})...",
            initial.issues.len(),
            identifier_prefix,
            sequence
        );
        Store {
            state: Arc::new(initial),
            registry: Rc::new(RefCell::new(Registry::default())),
            clock: Box::new(SystemClock),
            last_stamp: None,
            identifier_strategy: IdentifierStrategy::default(),
            identifier_prefix,
            sequence,
        }
    }

    /// Replace the clock used to stamp created and updated issues.
    ///
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_identifier_strategy(mut self, strategy: IdentifierStrategy) -> Self {
        self.identifier_strategy = strategy;
        self
    }

    /// Return the current snapshot.
    ///
    pub fn get_state(&self) -> Arc<Snapshot> {
        Arc::clone(&self.state)
    }

    /// Register a listener called after every state transition.
    ///
    pub fn subscribe(&mut self, listener: impl FnMut(&Snapshot) + 'static) -> Subscription {
        subscription::subscribe(&self.registry, Box::new(listener))
    }

    /// Subscribe a selector and return a live handle to its projection.
    ///
    pub fn select<T, F>(&mut self, selector: F) -> Selected<T>
    where
        T: PartialEq + 'static,
        F: Fn(&Snapshot) -> T + 'static,
    {
        Selected::new(&self.registry, &self.state, selector)
    }

    /// Number of listeners currently subscribed.
    ///
    pub fn subscriber_count(&self) -> usize {
        self.registry.borrow().active_count()
    }

    /// Set the selected issue. Unknown ids are stored as given.
    ///
    pub fn select_issue(&mut self, id: Option<&str>) {
        let id = id.map(str::to_string);
        self.mutate(move |next| next.selected_issue_id = id);
    }

    pub fn set_active_view(&mut self, view: ActiveView) {
        self.mutate(move |next| next.active_view = view);
    }

    pub fn set_filter_status(&mut self, status: Option<Status>) {
        self.mutate(move |next| next.filter_status = status);
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        self.mutate(move |next| next.search_query = query);
    }

    /// Replace the given fields of an issue and stamp its update time.
    ///
    pub fn update_issue(&mut self, id: &str, update: IssueUpdate) -> Result<Arc<Issue>, StoreError> {
        let index = self.position(id)?;
        let current = Arc::clone(&self.state.issues[index]);
        let mut issue = Issue::clone(&current);
        update.apply_to(&mut issue);
        issue.updated_at = self.next_stamp(Some(current.updated_at));

        let updated = Arc::new(issue);
        let replacement = Arc::clone(&updated);
        self.mutate(move |next| next.issues[index] = replacement);
        debug!("Updated issue {}.", updated.identifier);
        Ok(updated)
    }

    /// Create an issue, prepend it to the collection and return it.
    ///
    pub fn create_issue(&mut self, data: NewIssue) -> Arc<Issue> {
        let identifier = self.next_identifier();
        let now = self.next_stamp(None);
        let issue = Arc::new(Issue {
            id: format!("issue-{}", Uuid::new_v4()),
            identifier,
            title: data.title,
            description: data.description.unwrap_or_default(),
            status: data.status.unwrap_or(Status::Backlog),
            priority: data.priority.unwrap_or(Priority::None),
            assignee: None,
            labels: vec![],
            created_at: now,
            updated_at: now,
        });
        let created = Arc::clone(&issue);
        self.mutate(move |next| next.issues.insert(0, created));
        info!("Created issue {}.", issue.identifier);
        issue
    }

    /// Remove an issue, clearing the selection in the same transition when
    /// the issue was selected.
    ///
    pub fn delete_issue(&mut self, id: &str) -> Result<Arc<Issue>, StoreError> {
        let index = self.position(id)?;
        let removed = Arc::clone(&self.state.issues[index]);
        self.mutate(|next| {
            next.issues.remove(index);
            if next.selected_issue_id.as_deref() == Some(id) {
                next.selected_issue_id = None;
            }
        });
        info!("Deleted issue {}.", removed.identifier);
        Ok(removed)
    }

    fn position(&self, id: &str) -> Result<usize, StoreError> {
        self.state
            .issues
            .iter()
            .position(|issue| issue.id == id)
            .ok_or_else(|| StoreError::IssueNotFound { id: id.to_string() })
    }

    /// Build the next snapshot from the current one, swap it in and notify.
    ///
    fn mutate<F: FnOnce(&mut Snapshot)>(&mut self, change: F) {
        let mut next = Snapshot::clone(&self.state);
        change(&mut next);
        self.state = Arc::new(next);
        subscription::notify(&self.registry, &self.state);
    }

    /// Return a timestamp later than every stamp issued so far and later
    /// than `after`.
    ///
    fn next_stamp(&mut self, after: Option<DateTime<Utc>>) -> DateTime<Utc> {
        let now = self.clock.now();
        let floor = match (self.last_stamp, after) {
            (Some(last), Some(after)) => Some(last.max(after)),
            (last, after) => last.or(after),
        };
        let stamp = match floor {
            Some(floor) if now <= floor => floor + Duration::microseconds(1),
            _ => now,
        };
        self.last_stamp = Some(stamp);
        stamp
    }

    fn next_identifier(&mut self) -> String {
        match self.identifier_strategy {
            IdentifierStrategy::CollectionLength => {
                let identifier =
                    format_identifier(&self.identifier_prefix, self.state.issues.len() + 1);
                if self
                    .state
                    .issues
                    .iter()
                    .any(|issue| issue.identifier == identifier)
                {
                    warn!(
                        "Identifier {} is already used by another issue; set identifier_strategy to sequential to avoid reuse.",
                        identifier
                    );
                }
                identifier
            }
            IdentifierStrategy::Sequential => {
                self.sequence += 1;
                format_identifier(&self.identifier_prefix, self.sequence)
            }
        }
    }
}

/// Highest number among identifiers carrying the given prefix.
///
fn highest_identifier_number(issues: &[Arc<Issue>], prefix: &str) -> usize {
    issues
        .iter()
        .filter_map(|issue| {
            issue
                .identifier
                .strip_prefix(prefix)
                .and_then(|rest| rest.strip_prefix('-'))
                .and_then(|number| number.parse::<usize>().ok())
        })
        .max()
        .unwrap_or(0)
}
