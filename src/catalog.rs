use crate::error::NotepickError;
use crate::tags;
use anyhow::Result;
use ignore::WalkBuilder;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

/// Note file extension, matched case-insensitively.
pub const NOTE_EXTENSION: &str = ".md";

/// Annotation lines are short; never pull a whole file in to find one.
const FIRST_LINE_LIMIT: u64 = 4096;

/// Strip one trailing note extension, case-insensitively. Returns the input
/// unchanged when it does not carry the extension.
pub fn strip_note_extension(name: &str) -> &str {
    let bytes = name.as_bytes();
    if bytes.len() >= NOTE_EXTENSION.len()
        && bytes[bytes.len() - NOTE_EXTENSION.len()..].eq_ignore_ascii_case(NOTE_EXTENSION.as_bytes())
    {
        &name[..name.len() - NOTE_EXTENSION.len()]
    } else {
        name
    }
}

/// One note as discovered by a catalog scan. Immutable after construction;
/// a fresh set is built on every run.
#[derive(Debug, Clone)]
pub struct NoteEntry {
    pub path: PathBuf,
    pub file_name: String,
    pub display_name: String,
    pub tags: Vec<String>,
}

impl NoteEntry {
    /// The string the browse filter matches against: title plus tag tokens.
    pub fn search_text(&self) -> String {
        if self.tags.is_empty() {
            self.display_name.clone()
        } else {
            format!("{} {}", self.display_name, self.tags.join(" "))
        }
    }
}

/// Scan `dir` (flat, non-recursive) for note files and their tag annotations.
///
/// Hidden files and subdirectories are skipped; the extension test is
/// case-insensitive. A file whose first line cannot be read still yields an
/// entry with no tags. Entries come back sorted by file name so catalog order
/// is stable across runs.
pub fn scan_notes(dir: &Path) -> Result<Vec<NoteEntry>> {
    let meta = fs::metadata(dir).map_err(|source| NotepickError::DirectoryUnavailable {
        path: dir.to_path_buf(),
        source,
    })?;
    if !meta.is_dir() {
        return Err(NotepickError::DirectoryUnavailable {
            path: dir.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotADirectory, "not a directory"),
        }
        .into());
    }

    let mut entries: Vec<NoteEntry> = Vec::new();
    let mut walker = WalkBuilder::new(dir);
    // Depth 1: the note store is a single flat directory. Ignore-file
    // semantics are irrelevant here, only the hidden-file filter applies.
    walker.max_depth(Some(1)).standard_filters(false).hidden(true);

    for result in walker.build() {
        let dirent = match result {
            Ok(v) => v,
            Err(e) => {
                eprintln!("⚠️  Warning during scan: {}", e);
                continue;
            }
        };

        if dirent.depth() == 0 {
            continue; // the directory itself
        }
        if !dirent.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let file_name = dirent.file_name().to_string_lossy().into_owned();
        if !file_name.to_lowercase().ends_with(NOTE_EXTENSION) {
            continue;
        }
        let display_name = strip_note_extension(&file_name).to_string();

        let path = dirent.into_path();
        entries.push(NoteEntry {
            tags: read_first_line_tags(&path),
            path,
            file_name,
            display_name,
        });
    }

    entries.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    Ok(entries)
}

/// Bounded read of a note's first line, decoded into tags. Any I/O problem
/// downgrades to "no tags"; a single unreadable note must not block the scan.
fn read_first_line_tags(path: &Path) -> Vec<String> {
    let Ok(file) = File::open(path) else {
        return Vec::new();
    };
    let mut reader = BufReader::new(file.take(FIRST_LINE_LIMIT));
    let mut first_line = String::new();
    if reader.read_line(&mut first_line).is_err() {
        return Vec::new();
    }
    tags::decode_tags(first_line.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, contents: &str) {
        fs::write(dir.join(name), contents).unwrap();
    }

    #[test]
    fn scan_returns_sorted_entries_with_tags() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "b.md", "no tag line here\nbody\n");
        write(temp.path(), "a.md", "// +work\n# A\n");

        let entries = scan_notes(temp.path()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].display_name, "a");
        assert_eq!(entries[0].tags, vec!["work"]);
        assert_eq!(entries[1].display_name, "b");
        assert!(entries[1].tags.is_empty());
    }

    #[test]
    fn scan_skips_non_notes_hidden_files_and_subdirs() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "keep.md", "");
        write(temp.path(), "notes.txt", "");
        write(temp.path(), ".secret.md", "// +hidden\n");
        fs::create_dir(temp.path().join("sub")).unwrap();
        write(&temp.path().join("sub"), "nested.md", "");

        let entries = scan_notes(temp.path()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].file_name, "keep.md");
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "SHOUTY.MD", "// +loud\n");

        let entries = scan_notes(temp.path()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].display_name, "SHOUTY");
        assert_eq!(entries[0].tags, vec!["loud"]);
    }

    #[test]
    fn empty_or_noteless_directory_yields_empty_catalog() {
        let temp = TempDir::new().unwrap();
        assert!(scan_notes(temp.path()).unwrap().is_empty());

        write(temp.path(), "readme.txt", "");
        assert!(scan_notes(temp.path()).unwrap().is_empty());
    }

    #[test]
    fn missing_directory_is_fatal() {
        let temp = TempDir::new().unwrap();
        let gone = temp.path().join("nope");
        let err = scan_notes(&gone).unwrap_err();
        assert!(err.to_string().contains("unavailable"));
    }

    #[test]
    fn search_text_joins_name_and_tags() {
        let entry = NoteEntry {
            path: PathBuf::from("meeting.md"),
            file_name: "meeting.md".into(),
            display_name: "meeting".into(),
            tags: vec!["work".into(), "todo".into()],
        };
        assert_eq!(entry.search_text(), "meeting work todo");
    }
}
