use super::Frame;
use crate::config::hotkeys::{build_footer_text, HotkeyAction};
use crate::state::{InputMode, State};
use crate::ui::ColorSpec;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Footer hints for the current input mode.
///
fn controls_text(state: &State) -> String {
    let keymap = state.get_keymap();
    match state.get_input_mode() {
        InputMode::Search => " Type to search, Enter/Esc: done".to_string(),
        InputMode::NewIssue => " Type a title, Enter: create, Esc: cancel".to_string(),
        InputMode::EditTitle => " Enter: save title, Esc: revert".to_string(),
        InputMode::EditDescription => " Ctrl+s: save description, Esc: revert".to_string(),
        InputMode::ConfirmDelete => " y/Enter: confirm delete, n/Esc: cancel".to_string(),
        InputMode::Normal if state.get_selected_issue().is_some() => build_footer_text(
            keymap,
            &[
                (HotkeyAction::SelectNext, "next"),
                (HotkeyAction::SelectPrevious, "previous"),
                (HotkeyAction::CycleStatus, "status"),
                (HotkeyAction::CyclePriority, "priority"),
                (HotkeyAction::CycleAssignee, "assignee"),
                (HotkeyAction::EditTitle, "title"),
                (HotkeyAction::EditDescription, "description"),
                (HotkeyAction::DeleteIssue, "delete"),
                (HotkeyAction::CopyIdentifier, "copy id"),
                (HotkeyAction::ClearSelection, "close"),
            ],
        ),
        InputMode::Normal => build_footer_text(
            keymap,
            &[
                (HotkeyAction::SelectNext, "next"),
                (HotkeyAction::SelectPrevious, "previous"),
                (HotkeyAction::FocusSearch, "search"),
                (HotkeyAction::NewIssue, "new issue"),
                (HotkeyAction::ToggleLog, "log"),
                (HotkeyAction::Quit, "quit"),
            ],
        ),
    }
}

/// Label and color of the mode indicator.
///
fn mode_badge(state: &State) -> (&'static str, ColorSpec) {
    let theme = state.get_theme();
    match state.get_input_mode() {
        InputMode::Normal => ("NORMAL", theme.footer_normal),
        InputMode::Search => ("SEARCH", theme.footer_search),
        InputMode::NewIssue | InputMode::EditTitle | InputMode::EditDescription => {
            ("EDIT", theme.footer_edit)
        }
        InputMode::ConfirmDelete => ("DELETE", theme.footer_delete),
    }
}

/// Render footer widget.
///
pub fn footer(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let (badge, badge_color) = mode_badge(state);
    let text = match state.get_status_message() {
        Some(message) => format!(" {}", message),
        None => controls_text(state),
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", badge),
            Style::default()
                .fg(theme.background.to_color())
                .bg(badge_color.to_color())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(text, Style::default().fg(theme.text_secondary.to_color())),
    ]);
    frame.render_widget(Paragraph::new(line), size);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::hotkeys::Keymap;
    use crate::logger::LogBuffer;
    use crate::model::seed::seed_snapshot;
    use crate::store::Store;
    use crate::ui::Theme;

    fn state() -> State {
        State::new(
            Store::new(seed_snapshot()),
            Keymap::default(),
            Theme::default(),
            LogBuffer::default(),
        )
    }

    #[test]
    fn hints_follow_selection() {
        let mut state = state();
        assert!(controls_text(&state).contains("n: new issue"));
        state.select_next();
        let text = controls_text(&state);
        assert!(text.contains("s: status"));
        assert!(text.contains("Esc: close"));
    }

    #[test]
    fn badge_tracks_mode() {
        let mut state = state();
        assert_eq!(mode_badge(&state).0, "NORMAL");
        state.focus_search();
        assert_eq!(mode_badge(&state).0, "SEARCH");
        assert!(controls_text(&state).contains("Type to search"));
    }
}
