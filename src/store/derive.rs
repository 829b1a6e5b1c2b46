//! Pure projections of a snapshot.
//!
//! Nothing here is cached; every call recomputes from the snapshot it is
//! given.

use super::Snapshot;
use crate::model::{ActiveView, Issue, Label, Project, Status};
use std::sync::Arc;

/// Return the issues visible for the snapshot's view, status filter and
/// search query, in collection order.
///
pub fn derive_visible_issues(snapshot: &Snapshot) -> Vec<Arc<Issue>> {
    let query = snapshot.search_query.to_lowercase();
    snapshot
        .issues
        .iter()
        .filter(|issue| snapshot.active_view.includes(issue.status))
        .filter(|issue| match snapshot.filter_status {
            Some(status) => issue.status == status,
            None => true,
        })
        .filter(|issue| query.is_empty() || matches_query(issue, &query))
        .cloned()
        .collect()
}

/// Case-insensitive substring match on title, identifier or description.
/// `query` must already be lower-cased.
///
fn matches_query(issue: &Issue, query: &str) -> bool {
    issue.title.to_lowercase().contains(query)
        || issue.identifier.to_lowercase().contains(query)
        || issue.description.to_lowercase().contains(query)
}

/// Return the selected issue, or None when nothing is selected or the
/// selected id no longer exists.
///
pub fn selected_issue(snapshot: &Snapshot) -> Option<Arc<Issue>> {
    let selected = snapshot.selected_issue_id.as_deref()?;
    snapshot
        .issues
        .iter()
        .find(|issue| issue.id == selected)
        .cloned()
}

pub fn label_by_id<'a>(snapshot: &'a Snapshot, id: &str) -> Option<&'a Label> {
    snapshot.labels.iter().find(|label| label.id == id)
}

/// Resolve an issue's label ids, skipping ids with no matching label.
///
pub fn issue_labels<'a>(snapshot: &'a Snapshot, issue: &Issue) -> Vec<&'a Label> {
    issue
        .labels
        .iter()
        .filter_map(|id| label_by_id(snapshot, id))
        .collect()
}

/// Issue counts shown next to sidebar entries.
///
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SidebarCounts {
    pub all: usize,
    pub active: usize,
    pub backlog: usize,
    pub by_status: Vec<(Status, usize)>,
}

impl SidebarCounts {
    pub fn for_status(&self, status: Status) -> usize {
        self.by_status
            .iter()
            .find(|(s, _)| *s == status)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }
}

/// Count issues per view and per status over the whole collection.
///
pub fn sidebar_counts(snapshot: &Snapshot) -> SidebarCounts {
    let count = |view: ActiveView| {
        snapshot
            .issues
            .iter()
            .filter(|issue| view.includes(issue.status))
            .count()
    };
    SidebarCounts {
        all: snapshot.issues.len(),
        active: count(ActiveView::Active),
        backlog: count(ActiveView::Backlog),
        by_status: Status::ALL
            .iter()
            .map(|status| {
                let n = snapshot
                    .issues
                    .iter()
                    .filter(|issue| issue.status == *status)
                    .count();
                (*status, n)
            })
            .collect(),
    }
}

/// Heading for the issue list: the status filter when set, otherwise the
/// active view.
///
pub fn list_title(snapshot: &Snapshot) -> &'static str {
    match snapshot.filter_status {
        Some(status) => status.label(),
        None => snapshot.active_view.title(),
    }
}

/// Number of issues whose identifier carries the project key.
///
pub fn project_issue_count(snapshot: &Snapshot, project: &Project) -> usize {
    let prefix = format!("{}-", project.key);
    snapshot
        .issues
        .iter()
        .filter(|issue| issue.identifier.starts_with(&prefix))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::seed::seed_snapshot;
    use crate::model::Priority;
    use fake::{Fake, Faker};

    fn issue_with_status(status: Status) -> Arc<Issue> {
        let mut issue: Issue = Faker.fake();
        issue.status = status;
        Arc::new(issue)
    }

    fn snapshot_with(issues: Vec<Arc<Issue>>) -> Snapshot {
        Snapshot {
            issues,
            ..seed_snapshot()
        }
    }

    #[test]
    fn all_view_returns_everything_in_order() {
        let snapshot = seed_snapshot();
        let visible = derive_visible_issues(&snapshot);
        assert_eq!(visible, snapshot.issues);
    }

    #[test]
    fn active_view_is_union_of_todo_and_in_progress() {
        let mut issues = Vec::new();
        for _ in 0..4 {
            for status in Status::ALL {
                issues.push(issue_with_status(status));
            }
        }
        let snapshot = Snapshot {
            active_view: ActiveView::Active,
            ..snapshot_with(issues.clone())
        };

        let visible = derive_visible_issues(&snapshot);

        let expected: Vec<Arc<Issue>> = issues
            .into_iter()
            .filter(|i| matches!(i.status, Status::Todo | Status::InProgress))
            .collect();
        assert_eq!(visible, expected);
    }

    #[test]
    fn active_view_on_seed_data() {
        let snapshot = Snapshot {
            active_view: ActiveView::Active,
            ..seed_snapshot()
        };
        let visible = derive_visible_issues(&snapshot);
        let expected = snapshot
            .issues
            .iter()
            .filter(|i| i.status == Status::Todo || i.status == Status::InProgress)
            .count();
        assert_eq!(visible.len(), expected);
        assert!(visible.iter().all(|i| i.status.is_active()));
    }

    #[test]
    fn backlog_view_keeps_backlog_only() {
        let snapshot = Snapshot {
            active_view: ActiveView::Backlog,
            ..seed_snapshot()
        };
        let visible = derive_visible_issues(&snapshot);
        assert!(!visible.is_empty());
        assert!(visible.iter().all(|i| i.status == Status::Backlog));
    }

    #[test]
    fn status_filter_is_and_with_view() {
        let snapshot = Snapshot {
            active_view: ActiveView::Active,
            filter_status: Some(Status::Done),
            ..seed_snapshot()
        };
        assert!(derive_visible_issues(&snapshot).is_empty());

        let snapshot = Snapshot {
            active_view: ActiveView::Active,
            filter_status: Some(Status::Todo),
            ..seed_snapshot()
        };
        let visible = derive_visible_issues(&snapshot);
        assert!(!visible.is_empty());
        assert!(visible.iter().all(|i| i.status == Status::Todo));
    }

    #[test]
    fn search_is_case_insensitive() {
        let snapshot = Snapshot {
            search_query: "AUTH".to_string(),
            ..seed_snapshot()
        };
        let visible = derive_visible_issues(&snapshot);
        assert!(visible
            .iter()
            .any(|i| i.title == "Fix authentication flow on mobile devices"));
        assert!(visible.iter().all(|i| {
            i.title.to_lowercase().contains("auth")
                || i.identifier.to_lowercase().contains("auth")
                || i.description.to_lowercase().contains("auth")
        }));
    }

    #[test]
    fn search_matches_identifier_and_description() {
        let snapshot = Snapshot {
            search_query: "iss-017".to_string(),
            ..seed_snapshot()
        };
        let visible = derive_visible_issues(&snapshot);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].title, "Implement audit logging");

        let snapshot = Snapshot {
            search_query: "totp".to_string(),
            ..seed_snapshot()
        };
        let visible = derive_visible_issues(&snapshot);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].identifier, "ISS-019");
    }

    #[test]
    fn search_with_no_match_is_empty() {
        let snapshot = Snapshot {
            search_query: "zzzz-no-such-thing".to_string(),
            ..seed_snapshot()
        };
        assert!(derive_visible_issues(&snapshot).is_empty());
    }

    #[test]
    fn derive_is_idempotent() {
        let snapshot = Snapshot {
            active_view: ActiveView::Active,
            search_query: "fix".to_string(),
            ..seed_snapshot()
        };
        let first = derive_visible_issues(&snapshot);
        let second = derive_visible_issues(&snapshot);
        assert_eq!(first, second);
    }

    #[test]
    fn selected_issue_lookup() {
        let mut snapshot = seed_snapshot();
        assert_eq!(selected_issue(&snapshot), None);

        snapshot.selected_issue_id = Some("issue-3".to_string());
        let selected = selected_issue(&snapshot).unwrap();
        assert_eq!(selected.identifier, "ISS-003");

        snapshot.selected_issue_id = Some("issue-999".to_string());
        assert_eq!(selected_issue(&snapshot), None);
    }

    #[test]
    fn issue_labels_skip_dangling_ids() {
        let snapshot = seed_snapshot();
        let mut issue: Issue = Faker.fake();
        issue.labels = vec!["1".to_string(), "42".to_string(), "5".to_string()];

        let labels = issue_labels(&snapshot, &issue);

        let names: Vec<&str> = labels.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["bug", "design"]);
        assert!(label_by_id(&snapshot, "42").is_none());
    }

    #[test]
    fn sidebar_counts_cover_whole_collection() {
        let snapshot = Snapshot {
            active_view: ActiveView::Backlog,
            search_query: "fix".to_string(),
            ..seed_snapshot()
        };
        let counts = sidebar_counts(&snapshot);
        assert_eq!(counts.all, 25);
        let per_status: usize = counts.by_status.iter().map(|(_, n)| n).sum();
        assert_eq!(per_status, 25);
        assert_eq!(
            counts.active,
            counts.for_status(Status::Todo) + counts.for_status(Status::InProgress)
        );
        assert_eq!(counts.backlog, counts.for_status(Status::Backlog));
    }

    #[test]
    fn list_title_prefers_status_filter() {
        let mut snapshot = seed_snapshot();
        assert_eq!(list_title(&snapshot), "All Issues");
        snapshot.active_view = ActiveView::Active;
        assert_eq!(list_title(&snapshot), "Active");
        snapshot.filter_status = Some(Status::InProgress);
        assert_eq!(list_title(&snapshot), "In Progress");
    }

    #[test]
    fn project_issue_count_is_derived() {
        let mut snapshot = seed_snapshot();
        let project = snapshot.projects[0].clone();
        assert_eq!(project_issue_count(&snapshot, &project), 25);

        snapshot.issues.remove(0);
        assert_eq!(project_issue_count(&snapshot, &project), 24);
        assert_eq!(project.issue_count, 25);
    }

    #[test]
    fn priority_does_not_affect_visibility() {
        let mut issue: Issue = Faker.fake();
        issue.status = Status::Todo;
        issue.priority = Priority::Urgent;
        let snapshot = Snapshot {
            active_view: ActiveView::Active,
            ..snapshot_with(vec![Arc::new(issue)])
        };
        assert_eq!(derive_visible_issues(&snapshot).len(), 1);
    }
}
