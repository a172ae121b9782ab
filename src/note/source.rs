//! Snapshot of a source file at sync time.

use miette::Diagnostic;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while reading a source file.
#[derive(Error, Diagnostic, Debug)]
pub enum SourceError {
    #[error("Failed to read {path}: {source}")]
    #[diagnostic(code(codenote::source::read))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not valid UTF-8 text")]
    #[diagnostic(
        code(codenote::source::not_text),
        help("Only text files can be copied into a note.")
    )]
    NotText { path: PathBuf },
}

/// Extension-less file names that editors assign a language to.
const KNOWN_FILE_NAMES: &[(&str, &str)] = &[
    ("Dockerfile", "dockerfile"),
    ("Makefile", "makefile"),
    ("makefile", "makefile"),
    ("GNUmakefile", "makefile"),
    ("Justfile", "just"),
    ("justfile", "just"),
    ("CMakeLists.txt", "cmake"),
    ("Gemfile", "ruby"),
    ("Rakefile", "ruby"),
];

/// A read-only view of a file's metadata and content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Absolute path of the file.
    pub path: PathBuf,
    /// File name without directory and extension.
    pub base_name: String,
    /// Lowercased extension without the leading dot, empty if none.
    pub extension: String,
    /// Editor-style language id, if one is known.
    pub content_type_hint: Option<String>,
    /// Full raw content.
    pub text: String,
}

impl SourceFile {
    /// Build a snapshot from already-loaded content.
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>, hint: Option<String>) -> Self {
        let path = path.into();
        let base_name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = path
            .extension()
            .map(|s| s.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        let content_type_hint = hint
            .filter(|h| !h.is_empty())
            .or_else(|| hint_for_file_name(&path).map(str::to_string));

        Self {
            path,
            base_name,
            extension,
            content_type_hint,
            text: text.into(),
        }
    }

    /// Read a snapshot from disk.
    ///
    /// The path is made absolute before it is recorded, so the rendered note
    /// always shows where the file lives. Symlinks are not resolved: the note
    /// is named after the path the user gave.
    pub async fn read(path: &Path, hint: Option<String>) -> Result<Self, SourceError> {
        let absolute = std::path::absolute(path).map_err(|source| SourceError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let bytes = tokio::fs::read(&absolute)
            .await
            .map_err(|source| SourceError::Read {
                path: absolute.clone(),
                source,
            })?;

        let text = String::from_utf8(bytes).map_err(|_| SourceError::NotText {
            path: absolute.clone(),
        })?;

        Ok(Self::new(absolute, text, hint))
    }

    /// Bare file name including the extension.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Path as it appears in the rendered note.
    pub fn display_path(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }
}

fn hint_for_file_name(path: &Path) -> Option<&'static str> {
    let name = path.file_name()?.to_str()?;
    KNOWN_FILE_NAMES
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, hint)| *hint)
}
