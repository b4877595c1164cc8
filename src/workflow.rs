use crate::error::NotepickError;
use crate::{catalog, cli, handoff, tui};
use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment override for the notes directory, checked after the CLI
/// argument and before the `~/notes` default.
const NOTES_DIR_ENV: &str = "NOTEPICK_DIR";
const DEFAULT_NOTES_SUBDIR: &str = "notes";

// Main orchestrator. Two-phase pipeline: the interactive session runs to
// completion and restores the terminal, only then does the handoff spawn the
// editor in the foreground.
pub fn run_notepick(cli_args: cli::Cli) -> Result<()> {
    // Step 1: Resolve and prepare the notes directory.
    let notes_dir = resolve_notes_dir(cli_args.dir)?;
    fs::create_dir_all(&notes_dir).map_err(|source| NotepickError::DirectoryUnavailable {
        path: notes_dir.clone(),
        source,
    })?;

    // Step 2: One synchronous catalog scan; never refreshed mid-session.
    let entries = catalog::scan_notes(&notes_dir)?;

    // Step 3: Run the interactive session to its single result.
    let result = tui::run_selection_session(entries, &notes_dir)?;

    // Step 4: Hand off to the editor (or exit quietly on cancel).
    handoff::handle_selection(result)
}

fn resolve_notes_dir(arg: Option<PathBuf>) -> Result<PathBuf> {
    let home = dirs::home_dir();
    let configured = arg.or_else(|| env::var(NOTES_DIR_ENV).ok().map(PathBuf::from));
    match configured {
        Some(dir) => Ok(expand_tilde(&dir, home.as_deref())),
        None => home
            .map(|h| h.join(DEFAULT_NOTES_SUBDIR))
            .context("Could not determine a home directory for the default notes location"),
    }
}

/// `~`-prefixed paths come in through the env override, which the shell does
/// not expand for us.
fn expand_tilde(path: &Path, home: Option<&Path>) -> PathBuf {
    if let (Some(home), Some(s)) = (home, path.to_str()) {
        if s == "~" {
            return home.to_path_buf();
        }
        if let Some(rest) = s.strip_prefix("~/") {
            return home.join(rest);
        }
    }
    path.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilde_expansion() {
        let home = Path::new("/home/someone");
        assert_eq!(
            expand_tilde(Path::new("~/notes"), Some(home)),
            PathBuf::from("/home/someone/notes")
        );
        assert_eq!(
            expand_tilde(Path::new("~"), Some(home)),
            PathBuf::from("/home/someone")
        );
        assert_eq!(
            expand_tilde(Path::new("/abs/notes"), Some(home)),
            PathBuf::from("/abs/notes")
        );
        // Without a home directory the path passes through untouched.
        assert_eq!(
            expand_tilde(Path::new("~/notes"), None),
            PathBuf::from("~/notes")
        );
    }

    #[test]
    fn explicit_argument_wins() {
        let dir = resolve_notes_dir(Some(PathBuf::from("/tmp/my-notes"))).unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/my-notes"));
    }
}
