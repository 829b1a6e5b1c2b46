use super::Frame;
use crate::model::Issue;
use crate::state::{InputMode, State};
use crate::store::{derive, Snapshot};
use crate::ui::widgets::styling;
use crate::ui::Theme;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

/// Render the filtered issue list with its search and new-issue inputs.
///
pub fn issue_list(frame: &mut Frame, size: Rect, state: &mut State) {
    let snapshot = state.get_snapshot();
    let visible = state.get_visible_issues();
    let mode = state.get_input_mode();

    let items: Vec<ListItem<'static>> = visible
        .iter()
        .map(|issue| issue_row(state.get_theme(), &snapshot, issue))
        .collect();

    let theme = state.get_theme();
    let border_style = if mode == InputMode::Normal {
        styling::active_block_border_style(theme)
    } else {
        styling::normal_block_border_style(theme)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Line::from(vec![
            Span::styled(
                format!(" {} ", derive::list_title(&snapshot)),
                styling::active_block_title_style(),
            ),
            Span::styled(format!("{} ", visible.len()), styling::muted_text_style(theme)),
        ]));
    let inner = block.inner(size);
    frame.render_widget(block, size);

    let mut rows = vec![Constraint::Length(1)];
    if mode == InputMode::NewIssue {
        rows.push(Constraint::Length(1));
    }
    rows.push(Constraint::Min(1));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(rows)
        .split(inner);

    input_row(
        frame,
        chunks[0],
        theme,
        " ⌕ ",
        state.get_search_input().widget(),
        mode == InputMode::Search,
    );
    if mode == InputMode::NewIssue {
        input_row(
            frame,
            chunks[1],
            theme,
            " + ",
            state.get_new_issue_input().widget(),
            true,
        );
    }

    let list_area = chunks[chunks.len() - 1];
    if items.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "No issues found",
            styling::muted_text_style(theme),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(empty, list_area);
        return;
    }

    let list = List::new(items).highlight_style(styling::current_list_item_style(theme));
    frame.render_stateful_widget(list, list_area, state.get_issues_list_state());
}

fn input_row(
    frame: &mut Frame,
    size: Rect,
    theme: &Theme,
    prefix: &'static str,
    input: impl ratatui::widgets::Widget,
    focused: bool,
) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(size);
    let prefix_style = if focused {
        styling::active_list_item_style(theme)
    } else {
        styling::muted_text_style(theme)
    };
    frame.render_widget(Paragraph::new(Span::styled(prefix, prefix_style)), chunks[0]);
    frame.render_widget(input, chunks[1]);
}

/// Build one list row: priority, identifier, status, title, label chips and
/// the assignee's initial.
///
fn issue_row(theme: &Theme, snapshot: &Snapshot, issue: &Issue) -> ListItem<'static> {
    let mut spans = vec![
        Span::styled(
            format!(" {} ", issue.priority.glyph()),
            Style::default().fg(theme.priority_color(issue.priority)),
        ),
        Span::styled(
            format!("{:<8}", issue.identifier),
            styling::muted_text_style(theme),
        ),
        Span::styled(
            format!("{} ", issue.status.glyph()),
            Style::default().fg(theme.status_color(issue.status)),
        ),
        Span::styled(issue.title.clone(), styling::normal_text_style(theme)),
    ];
    for label in derive::issue_labels(snapshot, issue) {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            format!(" {} ", label.name),
            styling::label_chip_style(theme, &label.color),
        ));
    }
    if let Some(initial) = issue.assignee.as_ref().and_then(|name| name.chars().next()) {
        spans.push(Span::styled(
            format!("  ({})", initial),
            styling::secondary_text_style(theme),
        ));
    }
    ListItem::new(Line::from(spans))
}
