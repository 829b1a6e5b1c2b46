//! Navigation-related state types.
//!
//! This module contains the focus and input modes of the interface and the
//! selection stepping rules used by keyboard navigation.

use crate::model::Issue;
use std::sync::Arc;

/// Specifying which element receives typed characters.
///
/// Every mode other than `Normal` and `ConfirmDelete` is a text input and
/// suppresses keyboard navigation.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum InputMode {
    Normal,
    Search,
    NewIssue,
    EditTitle,
    EditDescription,
    ConfirmDelete,
}

impl InputMode {
    /// Whether a text input currently has focus.
    ///
    pub fn is_text_input(&self) -> bool {
        matches!(
            self,
            InputMode::Search
                | InputMode::NewIssue
                | InputMode::EditTitle
                | InputMode::EditDescription
        )
    }
}

/// Direction of a selection step.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Step {
    Next,
    Previous,
}

/// Return the id to select after stepping through `visible` from the
/// current selection, or None when the step is a no-op.
///
/// Stepping forward with no selection (or a selection outside the list)
/// picks the first item; stepping back requires a selection inside the list.
/// Neither direction wraps.
pub fn step_selection(visible: &[Arc<Issue>], selected: Option<&str>, step: Step) -> Option<String> {
    let current = selected.and_then(|id| visible.iter().position(|issue| issue.id == id));
    let target = match (step, current) {
        (Step::Next, Some(i)) if i + 1 < visible.len() => Some(i + 1),
        (Step::Next, None) if !visible.is_empty() => Some(0),
        (Step::Previous, Some(i)) if i > 0 => Some(i - 1),
        _ => None,
    };
    target.map(|i| visible[i].id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::{Fake, Faker};

    fn list(ids: &[&str]) -> Vec<Arc<Issue>> {
        ids.iter()
            .map(|id| {
                let mut issue: Issue = Faker.fake();
                issue.id = id.to_string();
                Arc::new(issue)
            })
            .collect()
    }

    #[test]
    fn next_from_nothing_selects_first() {
        let visible = list(&["A", "B", "C"]);
        assert_eq!(
            step_selection(&visible, None, Step::Next),
            Some("A".to_string())
        );
    }

    #[test]
    fn next_advances_and_stops_at_end() {
        let visible = list(&["A", "B", "C"]);
        assert_eq!(
            step_selection(&visible, Some("A"), Step::Next),
            Some("B".to_string())
        );
        assert_eq!(
            step_selection(&visible, Some("B"), Step::Next),
            Some("C".to_string())
        );
        assert_eq!(step_selection(&visible, Some("C"), Step::Next), None);
    }

    #[test]
    fn next_on_empty_list_is_no_op() {
        assert_eq!(step_selection(&[], None, Step::Next), None);
        assert_eq!(step_selection(&[], Some("A"), Step::Next), None);
    }

    #[test]
    fn next_with_selection_outside_list_selects_first() {
        let visible = list(&["A", "B"]);
        assert_eq!(
            step_selection(&visible, Some("Z"), Step::Next),
            Some("A".to_string())
        );
    }

    #[test]
    fn previous_moves_back_and_stops_at_start() {
        let visible = list(&["A", "B", "C"]);
        assert_eq!(
            step_selection(&visible, Some("C"), Step::Previous),
            Some("B".to_string())
        );
        assert_eq!(step_selection(&visible, Some("A"), Step::Previous), None);
    }

    #[test]
    fn previous_without_selection_is_no_op() {
        let visible = list(&["A", "B"]);
        assert_eq!(step_selection(&visible, None, Step::Previous), None);
        assert_eq!(step_selection(&visible, Some("Z"), Step::Previous), None);
    }

    #[test]
    fn text_input_modes() {
        assert!(!InputMode::Normal.is_text_input());
        assert!(!InputMode::ConfirmDelete.is_text_input());
        assert!(InputMode::Search.is_text_input());
        assert!(InputMode::NewIssue.is_text_input());
        assert!(InputMode::EditTitle.is_text_input());
        assert!(InputMode::EditDescription.is_text_input());
    }
}
