use super::{delete_confirmation, footer, issue_detail, issue_list, log, sidebar, Frame};
use crate::state::{InputMode, State};
use ratatui::layout::{Constraint, Direction, Layout};

const SIDEBAR_WIDTH: u16 = 28;
const LOG_HEIGHT: u16 = 8;

/// Render all panels according to state.
///
pub fn all(frame: &mut Frame, state: &mut State) {
    let mut rows = vec![Constraint::Min(5)];
    if state.is_log_visible() {
        rows.push(Constraint::Length(LOG_HEIGHT));
    }
    rows.push(Constraint::Length(1));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(rows)
        .split(frame.size());

    let body = chunks[0];
    let footer_area = chunks[chunks.len() - 1];

    let show_detail = state.get_selected_issue().is_some();
    let mut columns = vec![Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(30)];
    if show_detail {
        columns.push(Constraint::Percentage(40));
    }
    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(columns)
        .split(body);

    sidebar(frame, panels[0], state);
    issue_list(frame, panels[1], state);
    if show_detail {
        issue_detail(frame, panels[2], state);
    }
    if state.is_log_visible() {
        log(frame, chunks[1], state);
    }
    footer(frame, footer_area, state);

    if state.get_input_mode() == InputMode::ConfirmDelete {
        delete_confirmation(frame, body, state);
    }
}
