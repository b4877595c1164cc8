// The interactive selection session: state machine, event loop, rendering.
mod app_logic;
mod app_state;
mod event_handler;
mod input;
mod ui_renderer;

pub use app_state::SelectionResult;

// The main function to run the session
pub use self::run_session::run_selection_session;

// This module contains the session loop and terminal setup/teardown
mod run_session {
    use super::app_logic::SessionApp;
    use super::app_state::SelectionResult;
    use super::event_handler::handle_events;
    use super::ui_renderer::ui_frame;
    use crate::catalog::NoteEntry;
    use anyhow::Result;
    use crossterm::{
        event::{DisableMouseCapture, EnableMouseCapture},
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    };
    use ratatui::prelude::{CrosstermBackend, Terminal};
    use std::io::{self, Stdout};
    use std::path::Path;

    /// Run one selection session over the catalog snapshot and return its
    /// single result. The terminal is fully restored before this returns, so
    /// the caller can hand the result off to a foreground editor process.
    pub fn run_selection_session(
        entries: Vec<NoteEntry>,
        notes_dir: &Path,
    ) -> Result<SelectionResult> {
        let mut app = SessionApp::new(entries, notes_dir.to_path_buf());

        let mut terminal = init_terminal()?;
        while app.result.is_none() {
            terminal.draw(|frame| ui_frame(frame, &mut app))?;
            handle_events(&mut app)?;
        }
        restore_terminal(terminal)?;

        Ok(app.result.unwrap_or(SelectionResult::Cancelled))
    }

    fn init_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend).map_err(Into::into)
    }

    fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor().map_err(Into::into)
    }
}
