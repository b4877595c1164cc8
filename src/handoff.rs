use crate::catalog::strip_note_extension;
use crate::error::NotepickError;
use crate::tags;
use crate::tui::SelectionResult;
use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::path::Path;
use std::process::{Command, Stdio};

/// Act on the session's result: materialize a new note if needed, then hand
/// the file to the editor. Must only be called after the interactive session
/// has fully exited and the terminal is back in normal mode.
pub fn handle_selection(result: SelectionResult) -> Result<()> {
    match result {
        SelectionResult::Cancelled => Ok(()),
        SelectionResult::Chosen(path) => {
            let editor = editor_command()?;
            launch_editor(&editor, &path)
        }
        SelectionResult::Created { path, tag_text } => {
            // Resolve the editor before touching the filesystem, so a
            // misconfigured environment never leaves a half-created note.
            let editor = editor_command()?;
            materialize_note(&path, &tag_text)?;
            launch_editor(&editor, &path)
        }
    }
}

fn editor_command() -> Result<String> {
    editor_from(env::var("EDITOR").ok()).ok_or_else(|| NotepickError::EditorNotConfigured.into())
}

fn editor_from(var: Option<String>) -> Option<String> {
    var.filter(|v| !v.trim().is_empty())
}

/// Write the initial body for a freshly named note. A file that already
/// exists (same name reused) is left untouched and simply opened.
fn materialize_note(path: &Path, tag_text: &str) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    fs::write(path, initial_note_body(path, tag_text))
        .with_context(|| format!("Could not create note {}", path.display()))
}

fn initial_note_body(path: &Path, tag_text: &str) -> String {
    let mut body = String::new();
    if let Some(tag_line) = tags::encode_tag_line(tag_text) {
        body.push_str(&tag_line);
        body.push('\n');
    }
    body.push_str("# ");
    body.push_str(&note_title(path));
    body.push_str("\n\n");
    body
}

/// Title heading text: the extension-stripped base name with its first
/// character upper-cased.
fn note_title(path: &Path) -> String {
    let base = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = strip_note_extension(&base);
    let mut chars = stem.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn launch_editor(editor: &str, path: &Path) -> Result<()> {
    let status = Command::new(editor)
        .arg(path)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| NotepickError::EditorLaunchFailed(format!("could not spawn {editor}: {e}")))?;

    if !status.success() {
        return Err(
            NotepickError::EditorLaunchFailed(format!("{editor} exited with {status}")).into(),
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn initial_body_carries_tag_line_and_title() {
        let body = initial_note_body(Path::new("meeting.md"), "todo urgent");
        assert_eq!(body, "// +todo +urgent\n# Meeting\n\n");
    }

    #[test]
    fn initial_body_without_tags_omits_the_annotation_line() {
        let body = initial_note_body(Path::new("plain.md"), "  ");
        assert_eq!(body, "# Plain\n\n");
    }

    #[test]
    fn note_title_upper_cases_multibyte_initials() {
        assert_eq!(note_title(Path::new("émigré.md")), "Émigré");
        assert_eq!(note_title(Path::new("SHOUTY.MD")), "SHOUTY");
    }

    #[test]
    fn materialize_writes_new_notes_only() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("meeting.md");

        materialize_note(&path, "todo urgent").unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "// +todo +urgent\n# Meeting\n\n"
        );

        // Reusing an existing name must not re-initialize the file.
        fs::write(&path, "edited content\n").unwrap();
        materialize_note(&path, "other").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "edited content\n");
    }

    #[test]
    fn editor_resolution_rejects_unset_or_blank() {
        assert_eq!(editor_from(None), None);
        assert_eq!(editor_from(Some("  ".into())), None);
        assert_eq!(editor_from(Some("vim".into())), Some("vim".into()));
    }

    #[cfg(unix)]
    #[test]
    fn launch_surfaces_spawn_failure_and_nonzero_exit() {
        let path = PathBuf::from("/dev/null");
        assert!(launch_editor("true", &path).is_ok());
        assert!(launch_editor("false", &path).is_err());
        assert!(launch_editor("definitely-not-an-editor-binary", &path).is_err());
    }
}
