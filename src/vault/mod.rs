//! Vault module - writes notes into the user's notes directory.
//!
//! Each sync fully replaces `<vault>/<subfolder>/<base>.md`. Files sharing a
//! base name overwrite each other.

mod paths;
mod writer;

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

pub use paths::{is_inside_vault, note_path, note_relative_path, target_dir};
pub use writer::write_note;

/// Errors that can occur while writing a note.
#[derive(Error, Diagnostic, Debug)]
pub enum VaultError {
    #[error("Failed to create directory {path}: {source}")]
    #[diagnostic(code(codenote::vault::create_dir))]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write note {path}: {source}")]
    #[diagnostic(code(codenote::vault::write))]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
