use crate::config::Config;
use crate::events::terminal::Handler as TerminalEventHandler;
use crate::logger::LogBuffer;
use crate::model::seed::seed_snapshot;
use crate::state::State;
use crate::store::Store;
use crate::ui::Theme;
use anyhow::Result;
use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use log::*;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io::stdout;

/// Oversees event processing, state management, and terminal output.
///
pub struct App {
    state: State,
}

impl App {
    /// Start a new application according to the given configuration. Returns
    /// the result of the application execution.
    ///
    pub fn start(config: Config, log_buffer: LogBuffer) -> Result<()> {
        info!("Starting application...");
        let theme = Theme::from_name(&config.theme_name).unwrap_or_else(|| {
            warn!(
                "Unknown theme '{}', using {}. Available themes: {}",
                config.theme_name,
                Theme::default().name,
                Theme::available_themes().join(", ")
            );
            Theme::default()
        });
        let store = Store::new(seed_snapshot()).with_identifier_strategy(config.identifier_strategy);
        let mut app = App {
            state: State::new(store, config.keymap, theme, log_buffer),
        };
        app.start_ui()?;
        info!("Exiting application...");
        Ok(())
    }

    /// Prepare the terminal, run the render loop on the main thread and
    /// restore the terminal whatever the loop returned.
    ///
    fn start_ui(&mut self) -> Result<()> {
        debug!("Starting user interface on main thread...");
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen)?;
        enable_raw_mode()?;
        let enhanced_keys = supports_keyboard_enhancement().unwrap_or(false);
        if enhanced_keys {
            // Needed for terminals to report the Super modifier
            execute!(
                stdout,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
            )?;
        }

        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.hide_cursor()?;

        let result = self.run(&mut terminal);

        if enhanced_keys {
            execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
        }
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        result
    }

    fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let terminal_event_handler = TerminalEventHandler::new();
        loop {
            terminal.draw(|frame| crate::ui::render(frame, &mut self.state))?;
            if !terminal_event_handler.handle_next(&mut self.state)? {
                debug!("Received application exit request.");
                break;
            }
        }
        Ok(())
    }
}
