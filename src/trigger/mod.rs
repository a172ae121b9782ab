//! Trigger module - manual sync, vault selection and auto-sync on save.
//!
//! Each trigger is a stateless request against the current settings and a
//! fresh snapshot of the file.

mod feedback;
mod service;
mod watcher;

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

#[cfg(test)]
pub use feedback::{MockDirectoryPicker, MockNotifier};
pub use feedback::{ConsoleNotifier, DirectoryPicker, Notifier, PresetPicker, StdinPicker};
pub use service::{
    AUTO_SYNC_STATUS_DURATION, AutoSync, EXCLUDED_PATTERNS, Readiness, SkipReason, SyncReport,
    SyncService, VAULT_PROMPT_TITLE, is_excluded,
};
pub use watcher::{SaveWatcher, WatchSummary, WatcherConfig, WatcherError};

/// Errors surfaced by the manual triggers.
#[derive(Error, Diagnostic, Debug)]
pub enum TriggerError {
    #[error("No active file! Please open a file first.")]
    #[diagnostic(
        code(codenote::trigger::no_active_file),
        help("Pass the file to copy: cnote save <FILE>")
    )]
    NoActiveFile,

    #[error("No notes vault path selected. Operation cancelled.")]
    #[diagnostic(
        code(codenote::trigger::no_vault_selected),
        help("Run `cnote set-vault <DIR>` or set obsidianPath with `cnote config set`.")
    )]
    NoVaultSelected,

    #[error("Selected path does not exist: {path}")]
    #[diagnostic(
        code(codenote::trigger::vault_not_found),
        help("Choose an existing directory.")
    )]
    VaultNotFound { path: PathBuf },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Settings(#[from] crate::settings::SettingsError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Source(#[from] crate::note::SourceError),

    #[error("Error saving to notes vault: {0}")]
    #[diagnostic(code(codenote::trigger::vault))]
    Vault(#[from] crate::vault::VaultError),
}
