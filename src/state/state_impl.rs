use super::clipboard::{ClipboardSink, SystemClipboard};
use super::navigation::{step_selection, InputMode, Step};
use crate::config::hotkeys::{HotkeyAction, Keymap};
use crate::logger::LogBuffer;
use crate::model::seed::ASSIGNEES;
use crate::model::{ActiveView, Issue, Status};
use crate::store::derive::{self, SidebarCounts};
use crate::store::{IssueUpdate, NewIssue, Selected, Snapshot, Store};
use crate::ui::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::*;
use ratatui::widgets::ListState;
use std::sync::Arc;
use tui_textarea::{CursorMove, TextArea};

/// Houses the interface state layered over the issue store.
///
/// Issue data lives in the store; this struct keeps live projections of it
/// plus everything the store does not own: focus, text buffers, list scroll
/// position and presentation settings.
pub struct State {
    store: Store,
    visible_issues: Selected<Vec<Arc<Issue>>>,
    selected_issue: Selected<Option<Arc<Issue>>>,
    sidebar_counts: Selected<SidebarCounts>,
    input_mode: InputMode,
    search_input: TextArea<'static>,
    new_issue_input: TextArea<'static>,
    title_input: TextArea<'static>,
    description_input: TextArea<'static>,
    issues_list_state: ListState,
    pending_delete: Option<String>,
    status_message: Option<String>,
    keymap: Keymap,
    theme: Theme,
    assignees: Vec<String>,
    clipboard: Box<dyn ClipboardSink>,
    log_buffer: LogBuffer,
    log_visible: bool,
}

impl State {
    pub fn new(mut store: Store, keymap: Keymap, theme: Theme, log_buffer: LogBuffer) -> Self {
        let visible_issues = store.select(derive::derive_visible_issues);
        let selected_issue = store.select(derive::selected_issue);
        let sidebar_counts = store.select(derive::sidebar_counts);
        let search_input = single_line_input(&store.get_state().search_query, "Search...");
        let mut state = State {
            store,
            visible_issues,
            selected_issue,
            sidebar_counts,
            input_mode: InputMode::Normal,
            search_input,
            new_issue_input: single_line_input("", "Issue title"),
            title_input: TextArea::default(),
            description_input: TextArea::default(),
            issues_list_state: ListState::default(),
            pending_delete: None,
            status_message: None,
            keymap,
            theme,
            assignees: ASSIGNEES.iter().map(|name| name.to_string()).collect(),
            clipboard: Box::new(SystemClipboard::default()),
            log_buffer,
            log_visible: false,
        };
        state.sync_list_selection();
        state
    }

    /// Replace the clipboard used by the copy action.
    ///
    pub fn with_clipboard(mut self, clipboard: impl ClipboardSink + 'static) -> Self {
        self.clipboard = Box::new(clipboard);
        self
    }

    pub fn get_snapshot(&self) -> Arc<Snapshot> {
        self.store.get_state()
    }

    pub fn get_theme(&self) -> &Theme {
        &self.theme
    }

    pub fn get_keymap(&self) -> &Keymap {
        &self.keymap
    }

    pub fn get_input_mode(&self) -> InputMode {
        self.input_mode
    }

    /// Issues currently shown in the list.
    ///
    pub fn get_visible_issues(&self) -> Vec<Arc<Issue>> {
        self.visible_issues.cloned()
    }

    /// Issue shown in the detail panel, if the selection still exists.
    ///
    pub fn get_selected_issue(&self) -> Option<Arc<Issue>> {
        self.selected_issue.cloned()
    }

    pub fn get_sidebar_counts(&self) -> SidebarCounts {
        self.sidebar_counts.cloned()
    }

    pub fn get_issues_list_state(&mut self) -> &mut ListState {
        &mut self.issues_list_state
    }

    pub fn get_search_input(&self) -> &TextArea<'static> {
        &self.search_input
    }

    pub fn get_new_issue_input(&self) -> &TextArea<'static> {
        &self.new_issue_input
    }

    pub fn get_title_input(&self) -> &TextArea<'static> {
        &self.title_input
    }

    pub fn get_description_input(&self) -> &TextArea<'static> {
        &self.description_input
    }

    /// Issue awaiting delete confirmation.
    ///
    pub fn get_pending_delete(&self) -> Option<Arc<Issue>> {
        let id = self.pending_delete.as_deref()?;
        self.store
            .get_state()
            .issues
            .iter()
            .find(|issue| issue.id == id)
            .cloned()
    }

    pub fn get_status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn get_log_buffer(&self) -> &LogBuffer {
        &self.log_buffer
    }

    pub fn is_log_visible(&self) -> bool {
        self.log_visible
    }

    /// Process a key event. Returns false when exit was requested.
    ///
    pub fn handle_key(&mut self, event: KeyEvent) -> bool {
        if event.kind == KeyEventKind::Release {
            return true;
        }
        if event.code == KeyCode::Char('c') && event.modifiers.contains(KeyModifiers::CONTROL) {
            debug!("Processing exit terminal event '{:?}'...", event);
            return false;
        }
        self.status_message = None;

        let keep_running = if self.input_mode.is_text_input() {
            self.handle_text_key(event);
            true
        } else if self.input_mode == InputMode::ConfirmDelete {
            self.handle_confirm_delete_key(event);
            true
        } else {
            self.handle_normal_key(event)
        };
        self.sync_list_selection();
        keep_running
    }

    /// Keys typed while a text input has focus never reach the keymap.
    ///
    fn handle_text_key(&mut self, event: KeyEvent) {
        match self.input_mode {
            InputMode::Search => self.handle_search_key(event),
            InputMode::NewIssue => self.handle_new_issue_key(event),
            InputMode::EditTitle => self.handle_title_key(event),
            InputMode::EditDescription => self.handle_description_key(event),
            InputMode::Normal | InputMode::ConfirmDelete => {}
        }
    }

    fn handle_normal_key(&mut self, event: KeyEvent) -> bool {
        let action = match self.keymap.action_for(&event) {
            Some(action) => action,
            None => return true,
        };
        debug!("Processing {:?} event '{:?}'...", action, event);
        match action {
            HotkeyAction::SelectNext => {
                self.select_next();
            }
            HotkeyAction::SelectPrevious => {
                self.select_previous();
            }
            HotkeyAction::ClearSelection => {
                self.clear_selection();
            }
            HotkeyAction::FocusSearch => {
                self.focus_search();
            }
            HotkeyAction::NewIssue => {
                self.open_new_issue();
            }
            HotkeyAction::DeleteIssue => {
                self.begin_delete();
            }
            HotkeyAction::CycleStatus => {
                self.cycle_status();
            }
            HotkeyAction::CyclePriority => {
                self.cycle_priority();
            }
            HotkeyAction::CycleAssignee => {
                self.cycle_assignee();
            }
            HotkeyAction::EditTitle => {
                self.begin_edit_title();
            }
            HotkeyAction::EditDescription => {
                self.begin_edit_description();
            }
            HotkeyAction::CopyIdentifier => {
                self.copy_identifier();
            }
            HotkeyAction::ViewAll => {
                self.show_view(ActiveView::All);
            }
            HotkeyAction::ViewActive => {
                self.show_view(ActiveView::Active);
            }
            HotkeyAction::ViewBacklog => {
                self.show_view(ActiveView::Backlog);
            }
            HotkeyAction::FilterBacklog => {
                self.toggle_status_filter(Status::Backlog);
            }
            HotkeyAction::FilterTodo => {
                self.toggle_status_filter(Status::Todo);
            }
            HotkeyAction::FilterInProgress => {
                self.toggle_status_filter(Status::InProgress);
            }
            HotkeyAction::FilterDone => {
                self.toggle_status_filter(Status::Done);
            }
            HotkeyAction::FilterCancelled => {
                self.toggle_status_filter(Status::Cancelled);
            }
            HotkeyAction::ToggleLog => {
                self.toggle_log();
            }
            HotkeyAction::Quit => return false,
        }
        true
    }

    fn handle_search_key(&mut self, event: KeyEvent) {
        match event.code {
            KeyCode::Esc | KeyCode::Enter => {
                debug!("Processing exit search mode event '{:?}'...", event);
                self.input_mode = InputMode::Normal;
            }
            _ => {
                if self.search_input.input(event) {
                    let query = self.search_input.lines().join("");
                    self.store.set_search_query(query);
                }
            }
        }
    }

    fn handle_new_issue_key(&mut self, event: KeyEvent) {
        match event.code {
            KeyCode::Esc => {
                debug!("Processing cancel new issue event '{:?}'...", event);
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Enter => {
                self.submit_new_issue();
            }
            _ => {
                self.new_issue_input.input(event);
            }
        }
    }

    fn handle_title_key(&mut self, event: KeyEvent) {
        match event.code {
            KeyCode::Esc => {
                debug!("Processing cancel title edit event '{:?}'...", event);
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Enter => {
                self.save_title();
            }
            _ => {
                self.title_input.input(event);
            }
        }
    }

    fn handle_description_key(&mut self, event: KeyEvent) {
        match event.code {
            KeyCode::Esc => {
                debug!("Processing cancel description edit event '{:?}'...", event);
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Char('s') if event.modifiers.contains(KeyModifiers::CONTROL) => {
                self.save_description();
            }
            _ => {
                self.description_input.input(event);
            }
        }
    }

    fn handle_confirm_delete_key(&mut self, event: KeyEvent) {
        match event.code {
            KeyCode::Enter | KeyCode::Char('y') => {
                self.confirm_delete();
            }
            KeyCode::Esc | KeyCode::Char('n') => {
                self.cancel_delete();
            }
            _ => {}
        }
    }

    /// Select the next visible issue.
    ///
    pub fn select_next(&mut self) -> &mut Self {
        self.step(Step::Next)
    }

    /// Select the previous visible issue.
    ///
    pub fn select_previous(&mut self) -> &mut Self {
        self.step(Step::Previous)
    }

    fn step(&mut self, step: Step) -> &mut Self {
        let selected = self.store.get_state().selected_issue_id.clone();
        let target = {
            let visible = self.visible_issues.get();
            step_selection(&visible, selected.as_deref(), step)
        };
        if let Some(id) = target {
            self.store.select_issue(Some(&id));
        }
        self
    }

    pub fn clear_selection(&mut self) -> &mut Self {
        if self.store.get_state().selected_issue_id.is_some() {
            self.store.select_issue(None);
        }
        self
    }

    pub fn focus_search(&mut self) -> &mut Self {
        self.search_input.move_cursor(CursorMove::End);
        self.input_mode = InputMode::Search;
        self
    }

    pub fn open_new_issue(&mut self) -> &mut Self {
        self.new_issue_input = single_line_input("", "Issue title");
        self.input_mode = InputMode::NewIssue;
        self
    }

    /// Create an issue from the new-issue input. Blank titles keep the
    /// input open.
    ///
    pub fn submit_new_issue(&mut self) -> &mut Self {
        let title = self.new_issue_input.lines().join(" ");
        let title = title.trim();
        if title.is_empty() {
            return self;
        }
        self.store.create_issue(NewIssue::new(title));
        self.input_mode = InputMode::Normal;
        self
    }

    /// Show a view, clearing any status filter.
    ///
    pub fn show_view(&mut self, view: ActiveView) -> &mut Self {
        self.store.set_active_view(view);
        self.store.set_filter_status(None);
        self
    }

    /// Switch to the all view and toggle the given status filter.
    ///
    pub fn toggle_status_filter(&mut self, status: Status) -> &mut Self {
        let current = self.store.get_state().filter_status;
        self.store.set_active_view(ActiveView::All);
        let next = if current == Some(status) {
            None
        } else {
            Some(status)
        };
        self.store.set_filter_status(next);
        self
    }

    pub fn cycle_status(&mut self) -> &mut Self {
        if let Some(issue) = self.get_selected_issue() {
            self.apply_update(&issue, IssueUpdate::default().status(issue.status.next()));
        }
        self
    }

    pub fn cycle_priority(&mut self) -> &mut Self {
        if let Some(issue) = self.get_selected_issue() {
            self.apply_update(
                &issue,
                IssueUpdate::default().priority(issue.priority.next()),
            );
        }
        self
    }

    /// Assign the selected issue to the next person in the roster; the
    /// roster wraps through unassigned.
    ///
    pub fn cycle_assignee(&mut self) -> &mut Self {
        if let Some(issue) = self.get_selected_issue() {
            let next = next_assignee(&self.assignees, issue.assignee.as_deref());
            self.apply_update(&issue, IssueUpdate::default().assignee(next));
        }
        self
    }

    pub fn begin_edit_title(&mut self) -> &mut Self {
        if let Some(issue) = self.get_selected_issue() {
            let mut input = TextArea::new(vec![issue.title.clone()]);
            input.move_cursor(CursorMove::End);
            self.title_input = input;
            self.input_mode = InputMode::EditTitle;
        }
        self
    }

    /// Save the title buffer when it holds a non-blank changed title, then
    /// leave edit mode.
    ///
    pub fn save_title(&mut self) -> &mut Self {
        let title = self.title_input.lines().join(" ");
        let title = title.trim();
        if let Some(issue) = self.get_selected_issue() {
            if !title.is_empty() && title != issue.title {
                self.apply_update(&issue, IssueUpdate::default().title(title));
            }
        }
        self.input_mode = InputMode::Normal;
        self
    }

    pub fn begin_edit_description(&mut self) -> &mut Self {
        if let Some(issue) = self.get_selected_issue() {
            let mut lines: Vec<String> = issue.description.lines().map(String::from).collect();
            if lines.is_empty() {
                lines.push(String::new());
            }
            let mut input = TextArea::new(lines);
            input.move_cursor(CursorMove::Bottom);
            input.move_cursor(CursorMove::End);
            self.description_input = input;
            self.input_mode = InputMode::EditDescription;
        }
        self
    }

    /// Save the description buffer when it differs from the issue, then
    /// leave edit mode.
    ///
    pub fn save_description(&mut self) -> &mut Self {
        let description = self.description_input.lines().join("\n");
        if let Some(issue) = self.get_selected_issue() {
            if description != issue.description {
                self.apply_update(&issue, IssueUpdate::default().description(description));
            }
        }
        self.input_mode = InputMode::Normal;
        self
    }

    pub fn begin_delete(&mut self) -> &mut Self {
        if let Some(issue) = self.get_selected_issue() {
            self.pending_delete = Some(issue.id.clone());
            self.input_mode = InputMode::ConfirmDelete;
        }
        self
    }

    pub fn confirm_delete(&mut self) -> &mut Self {
        if let Some(id) = self.pending_delete.take() {
            if let Err(e) = self.store.delete_issue(&id) {
                warn!("Ignoring delete: {}", e);
            }
        }
        self.input_mode = InputMode::Normal;
        self
    }

    pub fn cancel_delete(&mut self) -> &mut Self {
        self.pending_delete = None;
        self.input_mode = InputMode::Normal;
        self
    }

    /// Copy the selected issue's identifier to the clipboard.
    ///
    pub fn copy_identifier(&mut self) -> &mut Self {
        if let Some(issue) = self.get_selected_issue() {
            match self.clipboard.copy(issue.identifier.clone()) {
                Ok(()) => {
                    info!("Copied {} to clipboard.", issue.identifier);
                    self.status_message = Some(format!("Copied {}", issue.identifier));
                }
                Err(e) => {
                    error!("Failed to copy {}: {}", issue.identifier, e);
                    self.status_message = Some("Clipboard unavailable".to_string());
                }
            }
        }
        self
    }

    pub fn toggle_log(&mut self) -> &mut Self {
        self.log_visible = !self.log_visible;
        self
    }

    fn apply_update(&mut self, issue: &Issue, update: IssueUpdate) {
        if let Err(e) = self.store.update_issue(&issue.id, update) {
            warn!("Ignoring update: {}", e);
        }
    }

    /// Point the list highlight at the selected issue when it is visible.
    ///
    fn sync_list_selection(&mut self) {
        let selected = self.store.get_state().selected_issue_id.clone();
        let index = selected.and_then(|id| {
            self.visible_issues
                .get()
                .iter()
                .position(|issue| issue.id == id)
        });
        self.issues_list_state.select(index);
    }
}

fn single_line_input(text: &str, placeholder: &str) -> TextArea<'static> {
    let mut input = TextArea::new(vec![text.to_string()]);
    input.set_placeholder_text(placeholder.to_string());
    input.move_cursor(CursorMove::End);
    input
}

/// Return the roster entry after `current`, wrapping through unassigned.
/// Assignees outside the roster move to the first entry.
///
fn next_assignee(roster: &[String], current: Option<&str>) -> Option<String> {
    let position = current.map(|name| roster.iter().position(|entry| entry == name));
    match position {
        None | Some(None) => roster.first().cloned(),
        Some(Some(i)) => roster.get(i + 1).cloned(),
    }
}
