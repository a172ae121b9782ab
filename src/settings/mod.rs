//! Settings module - the configuration surface.
//!
//! Settings live in a JSON file using the same keys as the editor
//! configuration (`obsidianPath`, `subfolder`, `autoSync`, `addTimestamp`)
//! and are read fresh on every operation.

mod model;
mod paths;
mod store;

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

pub use model::{DEFAULT_SUBFOLDER, SettingKey, SyncSettings};
pub use paths::{CONFIG_ENV, get_config_dir, get_settings_path};
#[cfg(test)]
pub use store::MockSettingsStore;
pub use store::{JsonSettingsStore, SettingsStore};

/// Errors that can occur while reading or writing settings.
#[derive(Error, Diagnostic, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings from {path}: {source}")]
    #[diagnostic(code(codenote::settings::read))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Settings file {path} is not valid JSON: {source}")]
    #[diagnostic(
        code(codenote::settings::parse),
        help("Fix or delete the file; missing keys fall back to their defaults.")
    )]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write settings to {path}: {source}")]
    #[diagnostic(code(codenote::settings::write))]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize settings: {0}")]
    #[diagnostic(code(codenote::settings::serialize))]
    Serialize(#[from] serde_json::Error),

    #[error("Unknown setting '{key}'")]
    #[diagnostic(
        code(codenote::settings::unknown_key),
        help("Valid keys: obsidianPath, subfolder, autoSync, addTimestamp")
    )]
    UnknownKey { key: String },

    #[error("Invalid value '{value}' for {key}: expected {expected}")]
    #[diagnostic(code(codenote::settings::invalid_value))]
    InvalidValue {
        key: String,
        value: String,
        expected: &'static str,
    },
}
