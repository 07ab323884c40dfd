// Input collection: turns the positional arguments into named gist
// entries. `-` reads standard input, anything else is read as a file.

use std::collections::BTreeMap;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use log::{debug, warn};
use uuid::Uuid;

use crate::error::GistError;
use crate::gist::GistFile;

/// Argument that stands for standard input.
pub const STDIN_SENTINEL: &str = "-";

/// Read every argument into a map of entry name to content.
///
/// Entry names must not contain path separators, so files are keyed by
/// their final path component and stdin by a fresh UUID. When two
/// arguments share a name the later one wins.
pub fn collect_files<R: Read>(
    paths: &[String],
    mut stdin: R,
) -> Result<BTreeMap<String, GistFile>, GistError> {
    if paths.is_empty() {
        return Err(GistError::Usage);
    }

    let mut files = BTreeMap::new();
    for arg in paths {
        let (name, content) = if arg == STDIN_SENTINEL {
            debug!("reading standard input");
            let mut content = String::new();
            stdin
                .read_to_string(&mut content)
                .map_err(|source| GistError::Io {
                    path: PathBuf::from(STDIN_SENTINEL),
                    source,
                })?;
            (Uuid::new_v4().to_string(), content)
        } else {
            debug!("reading file: {arg}");
            let content = std::fs::read_to_string(arg).map_err(|source| GistError::Io {
                path: PathBuf::from(arg),
                source,
            })?;
            (entry_name(arg)?, content)
        };

        if files.insert(name.clone(), GistFile { content }).is_some() {
            warn!("{arg} replaces an earlier entry named {name}");
        }
    }
    Ok(files)
}

/// Description used when none is given on the command line.
pub fn default_description(paths: &[String]) -> String {
    paths.join(", ")
}

fn entry_name(arg: &str) -> Result<String, GistError> {
    Path::new(arg)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| GistError::Io {
            path: PathBuf::from(arg),
            source: io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn write(dir: &TempDir, rel: &str, content: &str) -> String {
        let path = dir.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn files_are_keyed_by_basename() {
        let dir = TempDir::new().unwrap();
        let a = write(&dir, "a.txt", "alpha");
        let b = write(&dir, "nested/deeper/b.rs", "fn main() {}");

        let files = collect_files(&[a, b], io::empty()).unwrap();

        assert_eq!(files.len(), 2);
        assert_eq!(files["a.txt"].content, "alpha");
        assert_eq!(files["b.rs"].content, "fn main() {}");
        assert!(files.keys().all(|k| !k.contains('/')));
    }

    #[test]
    fn later_argument_wins_on_basename_collision() {
        let dir = TempDir::new().unwrap();
        let first = write(&dir, "one/notes.md", "first");
        let second = write(&dir, "two/notes.md", "second");
        let other = write(&dir, "other.md", "other");

        let files = collect_files(&[first, other, second], io::empty()).unwrap();

        assert_eq!(files.len(), 2);
        assert_eq!(files["notes.md"].content, "second");
    }

    #[test]
    fn stdin_gets_a_uuid_name() {
        let files = collect_files(&["-".to_string()], Cursor::new("hello")).unwrap();

        let (name, file) = files.iter().next().unwrap();
        assert!(Uuid::parse_str(name).is_ok());
        assert_eq!(file.content, "hello");
    }

    #[test]
    fn stdin_names_differ_between_runs() {
        let first = collect_files(&["-".to_string()], Cursor::new("x")).unwrap();
        let second = collect_files(&["-".to_string()], Cursor::new("x")).unwrap();
        assert_ne!(first.keys().next(), second.keys().next());
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.txt").to_string_lossy().into_owned();

        let err = collect_files(&[missing.clone()], io::empty()).unwrap_err();

        match &err {
            GistError::Io { path, .. } => assert_eq!(path, &PathBuf::from(&missing)),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("nope.txt"));
    }

    #[test]
    fn no_arguments_is_a_usage_error() {
        let err = collect_files(&[], io::empty()).unwrap_err();
        assert!(matches!(err, GistError::Usage));
    }

    #[test]
    fn default_description_joins_arguments() {
        let paths = vec!["a.txt".to_string(), "-".to_string(), "dir/b.txt".to_string()];
        assert_eq!(default_description(&paths), "a.txt, -, dir/b.txt");
    }
}
