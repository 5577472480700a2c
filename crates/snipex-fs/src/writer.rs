//! Snippet output writing.

use std::fs;
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};

use snipex_engine::Snippet;

/// A snippet that could not be written. The run continues past it.
#[derive(Debug, thiserror::Error)]
#[error("failed to write {}: {source}", .path.display())]
pub struct WriteFailure {
    /// Snippet name the failed file belongs to.
    pub name: String,
    /// Path that could not be written.
    pub path: PathBuf,
    /// Underlying I/O error.
    #[source]
    pub source: io::Error,
}

/// Writes materialized snippets under an output root.
///
/// Each snippet becomes `<output_dir>/<name>`, one line per record,
/// newline-terminated, overwriting any pre-existing file. Snippet names may
/// contain path separators; parent directories are created as needed.
pub struct Writer {
    output_dir: PathBuf,
}

impl Writer {
    /// Create a writer rooted at `output_dir`.
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }

    /// Write every snippet, returning the failures.
    ///
    /// A failing snippet is reported and skipped; the remaining snippets
    /// are still written. Creating the output root itself is the only
    /// error that aborts the whole write.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the output directory cannot be created.
    pub fn write_all(&self, snippets: &[Snippet]) -> io::Result<Vec<WriteFailure>> {
        fs::create_dir_all(&self.output_dir)?;

        let mut failures = Vec::new();
        for snippet in snippets {
            let path = self.output_dir.join(&snippet.name);
            tracing::debug!(snippet = %snippet.name, path = %path.display(), "writing output");

            if let Err(source) = write_snippet(&path, snippet) {
                failures.push(WriteFailure {
                    name: snippet.name.clone(),
                    path,
                    source,
                });
            }
        }
        Ok(failures)
    }
}

/// Write one snippet file, creating its parent directories.
fn write_snippet(path: &Path, snippet: &Snippet) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut buffer = Vec::with_capacity(
        snippet.lines.iter().map(|l| l.len() + 1).sum::<usize>(),
    );
    for line in &snippet.lines {
        buffer.write_all(line.as_bytes())?;
        buffer.push(b'\n');
    }
    fs::write(path, buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn snippet(name: &str, lines: &[&str]) -> Snippet {
        Snippet {
            name: name.to_owned(),
            lines: lines.iter().map(|&l| l.to_owned()).collect(),
        }
    }

    #[test]
    fn test_write_creates_output_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let output_dir = temp_dir.path().join("out/snippets");

        let writer = Writer::new(output_dir.clone());
        let failures = writer.write_all(&[snippet("a.txt", &["line"])]).unwrap();

        assert!(failures.is_empty());
        assert_eq!(
            fs::read_to_string(output_dir.join("a.txt")).unwrap(),
            "line\n"
        );
    }

    #[test]
    fn test_lines_are_newline_terminated() {
        let temp_dir = tempfile::tempdir().unwrap();
        let writer = Writer::new(temp_dir.path().to_path_buf());

        writer
            .write_all(&[snippet("s", &["one", "", "three"])])
            .unwrap();

        assert_eq!(
            fs::read_to_string(temp_dir.path().join("s")).unwrap(),
            "one\n\nthree\n"
        );
    }

    #[test]
    fn test_empty_snippet_writes_empty_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let writer = Writer::new(temp_dir.path().to_path_buf());

        writer.write_all(&[snippet("empty", &[])]).unwrap();

        assert_eq!(
            fs::read_to_string(temp_dir.path().join("empty")).unwrap(),
            ""
        );
    }

    #[test]
    fn test_nested_snippet_name_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let writer = Writer::new(temp_dir.path().to_path_buf());

        let failures = writer
            .write_all(&[snippet("docs/examples/hello.rs", &["fn main() {}"])])
            .unwrap();

        assert!(failures.is_empty());
        assert!(temp_dir.path().join("docs/examples/hello.rs").exists());
    }

    #[test]
    fn test_overwrites_existing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("s"), "stale content").unwrap();

        let writer = Writer::new(temp_dir.path().to_path_buf());
        writer.write_all(&[snippet("s", &["fresh"])]).unwrap();

        assert_eq!(
            fs::read_to_string(temp_dir.path().join("s")).unwrap(),
            "fresh\n"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_failure_does_not_abort_remaining_snippets() {
        let temp_dir = tempfile::tempdir().unwrap();
        // A directory where the first snippet's file should go forces a
        // per-snippet failure.
        fs::create_dir(temp_dir.path().join("blocked")).unwrap();
        fs::write(temp_dir.path().join("blocked/keep"), "x").unwrap();

        let writer = Writer::new(temp_dir.path().to_path_buf());
        let failures = writer
            .write_all(&[snippet("blocked", &["a"]), snippet("ok", &["b"])])
            .unwrap();

        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].name, "blocked");
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("ok")).unwrap(),
            "b\n"
        );
    }
}
