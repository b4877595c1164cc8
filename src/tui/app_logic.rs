use super::app_state::{SelectionResult, SessionMode};
use super::input::InputState;
use crate::catalog::{NOTE_EXTENSION, NoteEntry, strip_note_extension};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::mem;
use std::path::PathBuf;

/// Strip any trailing note extension (case-insensitively), then append
/// exactly one. Idempotent: "foo" and "foo.md" both come out as "foo.md".
pub(super) fn normalize_note_name(raw: &str) -> String {
    format!("{}{}", strip_note_extension(raw), NOTE_EXTENSION)
}

// --- SessionApp struct and impl ---
pub(super) struct SessionApp {
    pub(super) entries: Vec<NoteEntry>,
    pub(super) notes_dir: PathBuf,
    pub(super) mode: SessionMode,
    pub(super) filter_input: String,
    pub(super) filter_cursor_pos: usize,
    pub(super) highlighted_idx: usize,
    pub(super) scroll_offset: usize,
    pub(super) list_viewport_height: usize,
    pub(super) result: Option<SelectionResult>,
}

impl SessionApp {
    pub(super) fn new(entries: Vec<NoteEntry>, notes_dir: PathBuf) -> Self {
        // With nothing to browse, go straight to naming a new note.
        let mode = if entries.is_empty() {
            SessionMode::NamingNote {
                input: InputState::new(),
            }
        } else {
            SessionMode::Browsing { filtering: false }
        };
        SessionApp {
            entries,
            notes_dir,
            mode,
            filter_input: String::new(),
            filter_cursor_pos: 0,
            highlighted_idx: 0,
            scroll_offset: 0,
            list_viewport_height: 0, // Will be updated by ui_renderer
            result: None,
        }
    }

    /// Catalog indices that survive the current filter, in catalog order.
    /// The match is a case-insensitive substring test against the entry's
    /// searchable string (display name + tags).
    pub(super) fn filtered_indices(&self) -> Vec<usize> {
        if self.filter_input.is_empty() {
            return (0..self.entries.len()).collect();
        }
        let lower_filter = self.filter_input.to_lowercase();
        (0..self.entries.len())
            .filter(|&i| {
                self.entries[i]
                    .search_text()
                    .to_lowercase()
                    .contains(&lower_filter)
            })
            .collect()
    }

    pub(super) fn move_highlight(&mut self, delta: i32) {
        let filtered = self.filtered_indices();
        if filtered.is_empty() {
            return;
        }
        let current_pos = filtered.iter().position(|&i| i == self.highlighted_idx);
        let new_pos = match current_pos {
            Some(pos) => (pos as i32 + delta).rem_euclid(filtered.len() as i32) as usize,
            None => {
                if delta > 0 {
                    0
                } else {
                    filtered.len() - 1
                }
            }
        };
        self.highlighted_idx = filtered[new_pos];
    }

    /// After a filter edit the old highlight may have been filtered out;
    /// snap it to the first surviving entry.
    pub(super) fn ensure_highlight_is_valid_after_filter(&mut self) {
        let filtered = self.filtered_indices();
        if filtered.is_empty() {
            return;
        }
        if !filtered.contains(&self.highlighted_idx) {
            self.highlighted_idx = filtered[0];
        }
        self.ensure_highlight_is_visible_in_viewport();
    }

    pub(super) fn ensure_highlight_is_visible_in_viewport(&mut self) {
        if self.list_viewport_height == 0 {
            return;
        }
        let filtered = self.filtered_indices();
        if filtered.is_empty() {
            self.scroll_offset = 0;
            return;
        }
        let pos = filtered
            .iter()
            .position(|&i| i == self.highlighted_idx)
            .unwrap_or(0);
        if pos < self.scroll_offset {
            self.scroll_offset = pos;
        } else if pos >= self.scroll_offset + self.list_viewport_height {
            self.scroll_offset = pos.saturating_sub(self.list_viewport_height - 1);
        }
        if filtered.len() <= self.list_viewport_height {
            self.scroll_offset = 0;
        } else {
            self.scroll_offset = self.scroll_offset.min(filtered.len() - self.list_viewport_height);
        }
    }

    // --- Event handling sub-methods ---
    pub(super) fn handle_key(&mut self, key_event: KeyEvent) {
        // Ctrl-C cancels from any mode.
        if key_event.code == KeyCode::Char('c')
            && key_event.modifiers.contains(KeyModifiers::CONTROL)
        {
            self.result = Some(SelectionResult::Cancelled);
            return;
        }
        // Move the mode out so per-mode handlers can own their payload and
        // return the successor state; every key is exactly one transition or
        // a no-op.
        let mode = mem::replace(&mut self.mode, SessionMode::Browsing { filtering: false });
        self.mode = match mode {
            SessionMode::Browsing { filtering: false } => self.handle_browse_key(key_event),
            SessionMode::Browsing { filtering: true } => self.handle_filter_key(key_event),
            SessionMode::NamingNote { input } => self.handle_naming_key(key_event, input),
            SessionMode::TaggingNote {
                file_name,
                name_input,
                input,
            } => self.handle_tagging_key(key_event, file_name, name_input, input),
        };
    }

    fn handle_browse_key(&mut self, key_event: KeyEvent) -> SessionMode {
        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.result = Some(SelectionResult::Cancelled);
            }
            KeyCode::Enter => {
                // Only confirm when the highlight points at a surviving entry.
                if self.filtered_indices().contains(&self.highlighted_idx) {
                    self.result = Some(SelectionResult::Chosen(
                        self.entries[self.highlighted_idx].path.clone(),
                    ));
                }
            }
            KeyCode::Char('n') => {
                return SessionMode::NamingNote {
                    input: InputState::new(),
                };
            }
            KeyCode::Char('/') => {
                return SessionMode::Browsing { filtering: true };
            }
            KeyCode::Down | KeyCode::Char('j') => self.move_highlight(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_highlight(-1),
            _ => {}
        }
        SessionMode::Browsing { filtering: false }
    }

    fn handle_filter_key(&mut self, key_event: KeyEvent) -> SessionMode {
        match key_event.code {
            KeyCode::Enter => {
                self.ensure_highlight_is_valid_after_filter();
                return SessionMode::Browsing { filtering: false };
            }
            KeyCode::Esc => {
                self.filter_input.clear();
                self.filter_cursor_pos = 0;
                self.ensure_highlight_is_valid_after_filter();
                return SessionMode::Browsing { filtering: false };
            }
            KeyCode::Char(c) => {
                self.filter_input.insert(self.filter_cursor_pos, c);
                self.filter_cursor_pos += 1;
                self.ensure_highlight_is_valid_after_filter();
            }
            KeyCode::Backspace => {
                if self.filter_cursor_pos > 0 && !self.filter_input.is_empty() {
                    self.filter_cursor_pos -= 1;
                    self.filter_input.remove(self.filter_cursor_pos);
                    self.ensure_highlight_is_valid_after_filter();
                }
            }
            KeyCode::Left => {
                if self.filter_cursor_pos > 0 {
                    self.filter_cursor_pos -= 1;
                }
            }
            KeyCode::Right => {
                if self.filter_cursor_pos < self.filter_input.len() {
                    self.filter_cursor_pos += 1;
                }
            }
            _ => {}
        }
        SessionMode::Browsing { filtering: true }
    }

    fn handle_naming_key(&mut self, key_event: KeyEvent, mut input: InputState) -> SessionMode {
        match key_event.code {
            KeyCode::Enter => {
                if input.is_empty() {
                    // Empty names are rejected in place.
                    return SessionMode::NamingNote { input };
                }
                let file_name = normalize_note_name(input.value());
                SessionMode::TaggingNote {
                    file_name,
                    name_input: input,
                    input: InputState::new(),
                }
            }
            KeyCode::Esc => {
                if self.entries.is_empty() {
                    // Nothing to fall back to; the session ends.
                    self.result = Some(SelectionResult::Cancelled);
                    SessionMode::NamingNote { input }
                } else {
                    SessionMode::Browsing { filtering: false }
                }
            }
            _ => {
                apply_text_key(&mut input, key_event);
                SessionMode::NamingNote { input }
            }
        }
    }

    fn handle_tagging_key(
        &mut self,
        key_event: KeyEvent,
        file_name: String,
        name_input: InputState,
        mut input: InputState,
    ) -> SessionMode {
        match key_event.code {
            KeyCode::Enter => {
                // Raw tag buffer, verbatim; handoff runs it through the codec.
                self.result = Some(SelectionResult::Created {
                    path: self.notes_dir.join(&file_name),
                    tag_text: input.value().to_string(),
                });
                SessionMode::TaggingNote {
                    file_name,
                    name_input,
                    input,
                }
            }
            KeyCode::Esc => SessionMode::NamingNote { input: name_input },
            _ => {
                apply_text_key(&mut input, key_event);
                SessionMode::TaggingNote {
                    file_name,
                    name_input,
                    input,
                }
            }
        }
    }
}

fn apply_text_key(input: &mut InputState, key_event: KeyEvent) {
    match key_event.code {
        KeyCode::Char(c) => input.insert_char(c),
        KeyCode::Backspace => input.backspace(),
        KeyCode::Left => input.cursor_left(),
        KeyCode::Right => input.cursor_right(),
        _ => {}
    }
}
