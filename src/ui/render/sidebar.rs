use super::Frame;
use crate::config::hotkeys::{format_hotkey_display, HotkeyAction, Keymap};
use crate::model::{ActiveView, Status};
use crate::state::State;
use crate::store::derive;
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

const VIEWS: [(ActiveView, HotkeyAction); 3] = [
    (ActiveView::All, HotkeyAction::ViewAll),
    (ActiveView::Active, HotkeyAction::ViewActive),
    (ActiveView::Backlog, HotkeyAction::ViewBacklog),
];

fn filter_action(status: Status) -> HotkeyAction {
    match status {
        Status::Backlog => HotkeyAction::FilterBacklog,
        Status::Todo => HotkeyAction::FilterTodo,
        Status::InProgress => HotkeyAction::FilterInProgress,
        Status::Done => HotkeyAction::FilterDone,
        Status::Cancelled => HotkeyAction::FilterCancelled,
    }
}

/// First key bound to the action, padded for alignment.
///
fn key_hint(keymap: &Keymap, action: HotkeyAction) -> String {
    let key = keymap
        .bindings(action)
        .first()
        .map(format_hotkey_display)
        .unwrap_or_default();
    format!("{:>2} ", key)
}

/// Render sidebar widget according to state.
///
pub fn sidebar(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let keymap = state.get_keymap();
    let snapshot = state.get_snapshot();
    let counts = state.get_sidebar_counts();
    let width = size.width.saturating_sub(2) as usize;

    let entry = |hint: String, marker: Span<'static>, label: &str, count: usize, active: bool| {
        let style = if active {
            styling::active_list_item_style(theme)
        } else {
            styling::normal_text_style(theme)
        };
        let count = count.to_string();
        let used = hint.chars().count() + marker.width() + label.chars().count() + count.len();
        let padding = " ".repeat(width.saturating_sub(used));
        Line::from(vec![
            Span::styled(hint, styling::muted_text_style(theme)),
            marker,
            Span::styled(label.to_string(), style),
            Span::raw(padding),
            Span::styled(count, styling::muted_text_style(theme)),
        ])
    };

    let mut lines = vec![Line::from(Span::styled(
        " Views",
        styling::secondary_text_style(theme),
    ))];
    for (view, action) in VIEWS {
        let count = match view {
            ActiveView::All => counts.all,
            ActiveView::Active => counts.active,
            ActiveView::Backlog => counts.backlog,
        };
        let active = snapshot.filter_status.is_none() && snapshot.active_view == view;
        lines.push(entry(
            key_hint(keymap, action),
            Span::raw(""),
            view.title(),
            count,
            active,
        ));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " Status",
        styling::secondary_text_style(theme),
    )));
    for status in Status::ALL {
        let marker = Span::styled(
            format!("{} ", status.glyph()),
            Style::default().fg(theme.status_color(status)),
        );
        lines.push(entry(
            key_hint(keymap, filter_action(status)),
            marker,
            status.label(),
            counts.for_status(status),
            snapshot.filter_status == Some(status),
        ));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::normal_block_border_style(theme))
        .title(Span::styled(" Issues ", styling::active_block_title_style()));
    let inner = block.inner(size);
    frame.render_widget(block, size);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(1 + snapshot.projects.len() as u16),
        ])
        .split(inner);

    frame.render_widget(Paragraph::new(lines), chunks[0]);

    let projects: Vec<Line> = snapshot
        .projects
        .iter()
        .map(|project| {
            Line::from(vec![
                Span::styled(format!(" {} ", project.key), styling::active_list_item_style(theme)),
                Span::styled(project.name.clone(), styling::normal_text_style(theme)),
                Span::styled(
                    format!(" · {}", derive::project_issue_count(&snapshot, project)),
                    styling::muted_text_style(theme),
                ),
            ])
        })
        .collect();
    let mut project_lines = vec![Line::from(Span::styled(
        " Projects",
        styling::secondary_text_style(theme),
    ))];
    project_lines.extend(projects);
    frame.render_widget(Paragraph::new(project_lines), chunks[1]);
}
