//! Entity model.
//!
//! Plain data types for issues, labels and projects, plus the enumerations
//! used to classify and filter issues.

pub mod seed;

use chrono::{DateTime, Utc};
use fake::Dummy;

/// Workflow state of an issue.
///
#[derive(Clone, Copy, Debug, Dummy, PartialEq, Eq, Hash)]
pub enum Status {
    Backlog,
    Todo,
    InProgress,
    Done,
    Cancelled,
}

impl Status {
    /// All statuses in sidebar order.
    ///
    pub const ALL: [Status; 5] = [
        Status::Backlog,
        Status::Todo,
        Status::InProgress,
        Status::Done,
        Status::Cancelled,
    ];

    /// Human readable label.
    ///
    pub fn label(&self) -> &'static str {
        match self {
            Status::Backlog => "Backlog",
            Status::Todo => "Todo",
            Status::InProgress => "In Progress",
            Status::Done => "Done",
            Status::Cancelled => "Cancelled",
        }
    }

    /// Single-character glyph shown in list rows.
    ///
    pub fn glyph(&self) -> &'static str {
        match self {
            Status::Backlog => "◌",
            Status::Todo => "○",
            Status::InProgress => "◐",
            Status::Done => "●",
            Status::Cancelled => "⊘",
        }
    }

    /// Return the status following this one, wrapping around.
    ///
    pub fn next(&self) -> Status {
        let index = Status::ALL.iter().position(|s| s == self).unwrap_or(0);
        Status::ALL[(index + 1) % Status::ALL.len()]
    }

    /// Whether issues with this status belong to the active view.
    ///
    pub fn is_active(&self) -> bool {
        matches!(self, Status::Todo | Status::InProgress)
    }
}

/// Urgency of an issue.
///
#[derive(Clone, Copy, Debug, Dummy, PartialEq, Eq, Hash)]
pub enum Priority {
    None,
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    /// All priorities from least to most urgent.
    ///
    pub const ALL: [Priority; 5] = [
        Priority::None,
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::Urgent,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Priority::None => "No priority",
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Urgent => "Urgent",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Priority::None => "-",
            Priority::Low => "▂",
            Priority::Medium => "▄",
            Priority::High => "▆",
            Priority::Urgent => "!",
        }
    }

    /// Return the priority following this one, wrapping around.
    ///
    pub fn next(&self) -> Priority {
        let index = Priority::ALL.iter().position(|p| p == self).unwrap_or(0);
        Priority::ALL[(index + 1) % Priority::ALL.len()]
    }
}

/// Scope applied to the issue collection before any other filter.
///
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ActiveView {
    #[default]
    All,
    Active,
    Backlog,
}

impl ActiveView {
    pub fn title(&self) -> &'static str {
        match self {
            ActiveView::All => "All Issues",
            ActiveView::Active => "Active",
            ActiveView::Backlog => "Backlog",
        }
    }

    /// Whether an issue with the given status is in scope for this view.
    ///
    pub fn includes(&self, status: Status) -> bool {
        match self {
            ActiveView::All => true,
            ActiveView::Active => status.is_active(),
            ActiveView::Backlog => status == Status::Backlog,
        }
    }
}

/// Defines issue data structure.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq)]
pub struct Issue {
    pub id: String,
    pub identifier: String,
    pub title: String,
    pub description: String,
    pub status: Status,
    pub priority: Priority,
    pub assignee: Option<String>,
    pub labels: Vec<String>, // Label ids
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Defines label data structure.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq)]
pub struct Label {
    pub id: String,
    pub name: String,
    pub color: String, // #rrggbb
}

/// Defines project data structure.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub key: String,
    pub issue_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_next_wraps() {
        assert_eq!(Status::Backlog.next(), Status::Todo);
        assert_eq!(Status::Done.next(), Status::Cancelled);
        assert_eq!(Status::Cancelled.next(), Status::Backlog);
    }

    #[test]
    fn priority_next_wraps() {
        assert_eq!(Priority::None.next(), Priority::Low);
        assert_eq!(Priority::Urgent.next(), Priority::None);
    }

    #[test]
    fn active_view_includes() {
        for status in Status::ALL {
            assert!(ActiveView::All.includes(status));
        }
        assert!(ActiveView::Active.includes(Status::Todo));
        assert!(ActiveView::Active.includes(Status::InProgress));
        assert!(!ActiveView::Active.includes(Status::Backlog));
        assert!(!ActiveView::Active.includes(Status::Done));
        assert!(ActiveView::Backlog.includes(Status::Backlog));
        assert!(!ActiveView::Backlog.includes(Status::Todo));
    }

    #[test]
    fn labels() {
        assert_eq!(Status::InProgress.label(), "In Progress");
        assert_eq!(Priority::None.label(), "No priority");
        assert_eq!(ActiveView::All.title(), "All Issues");
    }
}
