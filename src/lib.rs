//! Copy source files into a notes vault as markdown notes.
//!
//! A note is the file name as a heading, the source path, and the file body
//! in a fenced code block tagged with its language. Notes are written on
//! demand (`cnote save`) or whenever a watched file is saved (`cnote watch`).

pub mod cli;
pub mod note;
pub mod settings;
pub mod trigger;
pub mod vault;

mod serde_utils;
