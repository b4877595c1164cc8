use super::input::InputState;
use std::path::PathBuf;

/// The three interaction modes. Each variant carries only the state that
/// mode needs; the catalog, filter, and highlight live on the session app
/// because they outlive mode switches.
#[derive(Debug)]
pub(super) enum SessionMode {
    /// Scrolling/filtering the catalog. `filtering` is true while the filter
    /// line has key focus.
    Browsing { filtering: bool },
    /// Typing the new note's file name.
    NamingNote { input: InputState },
    /// Typing tags for the new note. `name_input` is the filename buffer,
    /// kept so Esc can hand it back untouched.
    TaggingNote {
        file_name: String,
        name_input: InputState,
        input: InputState,
    },
}

/// Terminal outcome of one session. Produced exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionResult {
    /// User quit; nothing to do.
    Cancelled,
    /// An existing note was picked.
    Chosen(PathBuf),
    /// A new note was named; `tag_text` is the raw tag input, verbatim
    /// (possibly empty). The file does not exist yet.
    Created { path: PathBuf, tag_text: String },
}
