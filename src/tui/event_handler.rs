use super::app_logic::SessionApp;
use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use std::time::Duration;

pub(super) fn handle_events(app: &mut SessionApp) -> Result<()> {
    if event::poll(Duration::from_millis(50))? {
        match event::read()? {
            Event::Key(key_event) => {
                if key_event.kind == KeyEventKind::Press {
                    app.handle_key(key_event);
                }
            }
            // Resizes only change the viewport; the logical mode never moves.
            Event::Resize(_, _) => app.ensure_highlight_is_visible_in_viewport(),
            _ => {}
        }
    }
    Ok(())
}
