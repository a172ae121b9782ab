//! Note module - turns a source file snapshot into a markdown note.
//!
//! Everything here is pure apart from reading the snapshot from disk.

pub mod language;
pub mod render;
#[cfg(test)]
mod render_test;
pub mod source;

pub use language::{FALLBACK_LANGUAGE, LANGUAGES, classify};
pub use render::{TIMESTAMP_FORMAT, render, render_source};
pub use source::{SourceError, SourceFile};
