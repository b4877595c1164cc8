use std::io;
use std::path::PathBuf;

/// Fatal conditions. Everything else is either a soft per-file warning or an
/// `anyhow` context string on the way up to `main`.
#[derive(Debug, thiserror::Error)]
pub enum NotepickError {
    /// The notes directory itself cannot be listed or created.
    #[error("notes directory {path} is unavailable: {source}")]
    DirectoryUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// $EDITOR is unset or empty. Only raised at handoff time, so the user
    /// can browse and cancel without an editor configured.
    #[error("no editor configured: set the EDITOR environment variable")]
    EditorNotConfigured,

    /// The editor process could not be spawned, or exited non-zero.
    #[error("editor failed: {0}")]
    EditorLaunchFailed(String),
}
