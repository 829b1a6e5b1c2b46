use super::Frame;
use crate::model::Issue;
use crate::state::{InputMode, State};
use crate::store::derive;
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Date shown for the creation time, e.g. `Dec 22, 2025`.
///
fn format_created(issue: &Issue) -> String {
    issue.created_at.format("%b %-d, %Y").to_string()
}

/// Render the detail panel for the selected issue.
///
pub fn issue_detail(frame: &mut Frame, size: Rect, state: &State) {
    let issue = match state.get_selected_issue() {
        Some(issue) => issue,
        None => return,
    };
    let theme = state.get_theme();
    let snapshot = state.get_snapshot();
    let mode = state.get_input_mode();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::active_block_border_style(theme))
        .title(Span::styled(
            format!(" {} ", issue.identifier),
            styling::active_block_title_style(),
        ));
    let inner = block.inner(size);
    frame.render_widget(block, size);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(6),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(inner);

    if mode == InputMode::EditTitle {
        frame.render_widget(state.get_title_input().widget(), chunks[0]);
    } else {
        let title = Paragraph::new(Span::styled(
            issue.title.clone(),
            styling::normal_text_style(theme).add_modifier(Modifier::BOLD),
        ))
        .wrap(Wrap { trim: true });
        frame.render_widget(title, chunks[0]);
    }

    let field = |name: &str, value: Vec<Span<'static>>| {
        let mut spans = vec![Span::styled(
            format!("{:<10}", name),
            styling::muted_text_style(theme),
        )];
        spans.extend(value);
        Line::from(spans)
    };

    let assignee = match &issue.assignee {
        Some(name) => Span::styled(name.clone(), styling::normal_text_style(theme)),
        None => Span::styled("Unassigned", styling::muted_text_style(theme)),
    };
    let labels = derive::issue_labels(&snapshot, &issue);
    let label_spans = if labels.is_empty() {
        vec![Span::styled("None", styling::muted_text_style(theme))]
    } else {
        labels
            .iter()
            .flat_map(|label| {
                [
                    Span::styled(
                        format!(" {} ", label.name),
                        styling::label_chip_style(theme, &label.color),
                    ),
                    Span::raw(" "),
                ]
            })
            .collect()
    };

    let fields = vec![
        field(
            "Status",
            vec![Span::styled(
                format!("{} {}", issue.status.glyph(), issue.status.label()),
                Style::default().fg(theme.status_color(issue.status)),
            )],
        ),
        field(
            "Priority",
            vec![Span::styled(
                format!("{} {}", issue.priority.glyph(), issue.priority.label()),
                Style::default().fg(theme.priority_color(issue.priority)),
            )],
        ),
        field("Assignee", vec![assignee]),
        field("Labels", label_spans),
        field(
            "Created",
            vec![Span::styled(
                format_created(&issue),
                styling::normal_text_style(theme),
            )],
        ),
    ];
    frame.render_widget(Paragraph::new(fields), chunks[1]);

    frame.render_widget(
        Paragraph::new(Span::styled(
            "Description",
            styling::secondary_text_style(theme),
        )),
        chunks[2],
    );
    if mode == InputMode::EditDescription {
        frame.render_widget(state.get_description_input().widget(), chunks[3]);
    } else if issue.description.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Add a description...",
                styling::muted_text_style(theme),
            )),
            chunks[3],
        );
    } else {
        let lines: Vec<Line> = issue
            .description
            .lines()
            .map(|line| Line::from(Span::styled(line.to_string(), styling::normal_text_style(theme))))
            .collect();
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), chunks[3]);
    }
}
