//! Deterministic seed data loaded at startup.

use super::{Issue, Label, Priority, Project, Status};
use crate::store::Snapshot;
use chrono::{Duration, TimeZone, Utc};
use std::sync::Arc;

/// Key of the seeded project, used as the identifier prefix.
///
pub const PROJECT_KEY: &str = "ISS";

/// People issues can be assigned to.
///
pub const ASSIGNEES: [&str; 5] = [
    "Alex Chen",
    "Jordan Smith",
    "Taylor Brown",
    "Morgan Davis",
    "Casey Wilson",
];

const LABELS: [(&str, &str, &str); 5] = [
    ("1", "bug", "#ef4444"),
    ("2", "feature", "#6366f1"),
    ("3", "improvement", "#22c55e"),
    ("4", "documentation", "#f59e0b"),
    ("5", "design", "#ec4899"),
];

const TITLES: [&str; 25] = [
    "Fix authentication flow on mobile devices",
    "Add dark mode support to settings panel",
    "Optimize database queries for user search",
    "Implement real-time notifications",
    "Update API documentation for v2 endpoints",
    "Refactor payment processing module",
    "Add export functionality for reports",
    "Fix memory leak in WebSocket connection",
    "Improve error handling in file upload",
    "Add keyboard shortcuts for common actions",
    "Implement user invitation flow",
    "Fix timezone issues in scheduling",
    "Add batch delete for archived items",
    "Improve loading states across the app",
    "Fix race condition in data sync",
    "Add support for custom fields",
    "Implement audit logging",
    "Fix pagination in activity feed",
    "Add two-factor authentication",
    "Improve search relevance algorithm",
    "Fix CSS overflow issues on small screens",
    "Add webhook configuration UI",
    "Implement data backup automation",
    "Fix email template rendering",
    "Add role-based access control",
];

const DESCRIPTIONS: [&str; 25] = [
    "Users are experiencing issues when trying to authenticate on mobile. The login button becomes unresponsive after the first tap.",
    "We need to add a dark mode toggle in the settings panel. Should respect system preferences by default.",
    "The user search is taking too long with large datasets. Need to add proper indexing and optimize the query.",
    "Implement WebSocket-based real-time notifications for mentions, assignments, and status changes.",
    "The v2 API documentation is incomplete. Need to document all new endpoints with examples.",
    "The payment module has grown complex. Need to refactor for better maintainability and testing.",
    "Users want to export their reports to CSV and PDF formats.",
    "There's a memory leak when WebSocket connections are repeatedly opened and closed.",
    "File uploads sometimes fail silently. Need better error messages and retry logic.",
    "Power users are requesting keyboard shortcuts for navigation and common actions.",
    "Implement a flow for existing users to invite team members via email.",
    "Scheduled events are showing wrong times for users in different timezones.",
    "When archiving items in bulk, users need to confirm each one. Add batch operations.",
    "Loading states are inconsistent. Some pages show nothing while loading.",
    "Data sync sometimes overwrites newer changes with older data due to race conditions.",
    "Enterprise customers need custom fields for their specific workflows.",
    "For compliance, we need to log all user actions with timestamps.",
    "The activity feed pagination breaks when new items are added while scrolling.",
    "Security requirement: implement TOTP-based two-factor authentication.",
    "Search results don't prioritize exact matches. Need to improve the ranking algorithm.",
    "On mobile screens, some content overflows and becomes inaccessible.",
    "Users need a UI to configure webhooks for external integrations.",
    "Implement automated daily backups with configurable retention.",
    "Some email clients don't render our templates correctly.",
    "Implement granular permissions for different user roles.",
];

// (status, priority, assignee index, label ids); index 5 means unassigned
const ISSUE_DATA: [(Status, Priority, usize, &[&str]); 25] = [
    (Status::Todo, Priority::None, 3, &["4", "2"]),
    (Status::Backlog, Priority::Low, 5, &[]),
    (Status::Cancelled, Priority::Medium, 5, &["1"]),
    (Status::InProgress, Priority::High, 5, &["1"]),
    (Status::InProgress, Priority::Urgent, 4, &["1", "2"]),
    (Status::Done, Priority::None, 5, &["3", "5"]),
    (Status::InProgress, Priority::Low, 3, &["2"]),
    (Status::InProgress, Priority::Medium, 3, &["1", "2"]),
    (Status::Todo, Priority::High, 3, &[]),
    (Status::InProgress, Priority::Urgent, 0, &["2", "4"]),
    (Status::InProgress, Priority::None, 5, &["1", "5"]),
    (Status::Backlog, Priority::Low, 5, &[]),
    (Status::Todo, Priority::Medium, 0, &["2", "3"]),
    (Status::Cancelled, Priority::High, 0, &["1"]),
    (Status::Todo, Priority::Urgent, 5, &["3", "2"]),
    (Status::Done, Priority::None, 4, &["1", "4"]),
    (Status::InProgress, Priority::Low, 3, &["2", "5"]),
    (Status::Backlog, Priority::Medium, 5, &[]),
    (Status::InProgress, Priority::High, 5, &["1", "2"]),
    (Status::Backlog, Priority::Urgent, 4, &[]),
    (Status::Backlog, Priority::None, 5, &["1", "5"]),
    (Status::InProgress, Priority::Low, 3, &["2", "1"]),
    (Status::Backlog, Priority::Medium, 5, &["3"]),
    (Status::Backlog, Priority::High, 4, &["3"]),
    (Status::Backlog, Priority::Urgent, 1, &["2"]),
];

/// Format an identifier for the given project key and sequence number.
///
pub fn format_identifier(key: &str, number: usize) -> String {
    format!("{}-{:03}", key, number)
}

/// Return the seeded labels.
///
pub fn labels() -> Vec<Label> {
    LABELS
        .iter()
        .map(|(id, name, color)| Label {
            id: id.to_string(),
            name: name.to_string(),
            color: color.to_string(),
        })
        .collect()
}

/// Return the seeded issues, newest first.
///
pub fn issues() -> Vec<Issue> {
    let base = Utc
        .with_ymd_and_hms(2025, 12, 22, 12, 0, 0)
        .single()
        .unwrap_or_default();
    ISSUE_DATA
        .iter()
        .enumerate()
        .map(|(i, (status, priority, assignee_index, label_ids))| {
            let created_at = base - Duration::days(i as i64);
            Issue {
                id: format!("issue-{}", i + 1),
                identifier: format_identifier(PROJECT_KEY, i + 1),
                title: TITLES[i].to_string(),
                description: DESCRIPTIONS[i].to_string(),
                status: *status,
                priority: *priority,
                assignee: ASSIGNEES.get(*assignee_index).map(|a| a.to_string()),
                labels: label_ids.iter().map(|l| l.to_string()).collect(),
                created_at,
                updated_at: created_at + Duration::hours(12),
            }
        })
        .collect()
}

/// Return the seeded projects.
///
pub fn projects() -> Vec<Project> {
    vec![Project {
        id: "1".to_string(),
        name: "Main Project".to_string(),
        key: PROJECT_KEY.to_string(),
        issue_count: TITLES.len(),
    }]
}

/// Build the initial snapshot from seed data.
///
pub fn seed_snapshot() -> Snapshot {
    Snapshot {
        issues: issues().into_iter().map(Arc::new).collect(),
        labels: Arc::new(labels()),
        projects: Arc::new(projects()),
        ..Snapshot::default()
    }
}
